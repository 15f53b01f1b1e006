//! Speaker output for the ambient track, backed by rodio.
//!
//! The stream and sink are created on the first `play`, so a machine without
//! an audio device only fails when playback is actually attempted.

use harimu_core::{AudioOutput, HarimuError, Result};
use rodio::{Decoder, OutputStream, Sink, Source};
use std::io::Cursor;
use std::path::Path;

#[derive(Default)]
pub struct RodioOutput {
    track: Option<Vec<u8>>,
    _stream: Option<OutputStream>,
    sink: Option<Sink>,
    volume: f32,
    muted: bool,
}

impl RodioOutput {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_sink(&mut self) -> Result<&Sink> {
        if self.sink.is_none() {
            let track = self
                .track
                .clone()
                .ok_or_else(|| HarimuError::Audio("no track loaded".into()))?;
            let (stream, handle) = OutputStream::try_default()
                .map_err(|e| HarimuError::Audio(format!("Failed to create audio output stream: {e}")))?;
            let sink = Sink::try_new(&handle)
                .map_err(|e| HarimuError::Audio(format!("Failed to create audio sink: {e}")))?;
            let source = Decoder::new(Cursor::new(track))
                .map_err(|e| HarimuError::Audio(format!("Unsupported audio track: {e}")))?;
            sink.append(source.repeat_infinite());
            sink.pause();
            self._stream = Some(stream);
            self.sink = Some(sink);
            self.apply_volume();
        }
        self.sink
            .as_ref()
            .ok_or_else(|| HarimuError::Audio("audio sink unavailable".into()))
    }

    fn apply_volume(&self) {
        if let Some(sink) = &self.sink {
            sink.set_volume(if self.muted { 0.0 } else { self.volume.clamp(0.0, 1.0) });
        }
    }
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, asset: &Path) -> Result<()> {
        let bytes = std::fs::read(asset).map_err(|e| {
            HarimuError::Audio(format!("Failed to read audio track {}: {e}", asset.display()))
        })?;
        self.track = Some(bytes);
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        self.ensure_sink()?.play();
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
        self.apply_volume();
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        self.apply_volume();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_track_is_an_audio_error() {
        let mut out = RodioOutput::new();
        let err = out.load(Path::new("/definitely/not/here.mp3")).unwrap_err();
        assert!(matches!(err, HarimuError::Audio(_)));
    }

    #[test]
    fn play_without_track_fails() {
        let mut out = RodioOutput::new();
        assert!(out.play().is_err());
    }
}
