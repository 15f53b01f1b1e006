//! Conversion from the file schema into the settings the session runtime consumes.

use crate::schema::HarimuConfig;
use harimu_core::{AudioSettings, ChatTimings, EndingSettings, FlowSettings, MoodId, ReliefTimings};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Everything a session needs, with unset fields already filled.
#[derive(Debug, Clone)]
pub struct RuntimeSettings {
    pub flow: FlowSettings,
    pub chat: ChatTimings,
    pub relief: ReliefTimings,
    pub ending: EndingSettings,
    pub audio: AudioSettings,
    pub log_level: String,
    pub log_dir: PathBuf,
}

fn ms(value: Option<u64>, fallback: Duration) -> Duration {
    value.map(Duration::from_millis).unwrap_or(fallback)
}

/// Relative paths in the config are anchored at the config directory.
fn anchor(path: &str, config_dir: &Path) -> PathBuf {
    let p = PathBuf::from(path);
    if p.is_absolute() {
        p
    } else {
        config_dir.join(p)
    }
}

impl HarimuConfig {
    pub fn runtime(&self, config_dir: &Path) -> RuntimeSettings {
        RuntimeSettings {
            flow: self.flow_settings(),
            chat: self.chat_timings(),
            relief: self.relief_timings(),
            ending: self.ending_settings(),
            audio: self.audio_settings(config_dir),
            log_level: self
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or_else(|| crate::defaults::DEFAULT_LOG_LEVEL.to_string()),
            log_dir: self
                .logging
                .as_ref()
                .and_then(|l| l.dir.as_deref())
                .map(|d| anchor(d, config_dir))
                .unwrap_or_else(|| config_dir.join("logs")),
        }
    }

    /// Unknown heavy mood ids are dropped; validation reports them.
    pub fn flow_settings(&self) -> FlowSettings {
        let d = FlowSettings::default();
        let Some(flow) = &self.flow else { return d };
        FlowSettings {
            balloon_probability: flow.balloon_probability.unwrap_or(d.balloon_probability),
            heavy_moods: match &flow.heavy_moods {
                Some(ids) => ids.iter().filter_map(|id| id.parse::<MoodId>().ok()).collect(),
                None => d.heavy_moods,
            },
            max_name_length: flow.max_name_length.unwrap_or(d.max_name_length),
        }
    }

    pub fn chat_timings(&self) -> ChatTimings {
        let d = ChatTimings::default();
        let Some(c) = &self.chat else { return d };
        ChatTimings {
            intro_typing: ms(c.intro_typing_ms, d.intro_typing),
            choices_reveal: ms(c.choices_reveal_ms, d.choices_reveal),
            response_typing_delay: ms(c.response_typing_delay_ms, d.response_typing_delay),
            response: ms(c.response_ms, d.response),
            final_gap: ms(c.final_gap_ms, d.final_gap),
            final_typing: ms(c.final_typing_ms, d.final_typing),
        }
    }

    pub fn relief_timings(&self) -> ReliefTimings {
        let d = ReliefTimings::default();
        let Some(r) = &self.relief else { return d };
        ReliefTimings {
            balloon_intro: ms(r.balloon_intro_ms, d.balloon_intro),
            balloon_done: ms(r.balloon_done_ms, d.balloon_done),
            treat_done: ms(r.treat_done_ms, d.treat_done),
        }
    }

    pub fn ending_settings(&self) -> EndingSettings {
        let d = EndingSettings::default();
        let Some(e) = &self.ending else { return d };
        EndingSettings {
            secret_reveal: ms(e.secret_reveal_ms, d.secret_reveal),
            profile_url: e.profile_url.clone().unwrap_or(d.profile_url),
        }
    }

    pub fn audio_settings(&self, config_dir: &Path) -> AudioSettings {
        let d = AudioSettings::default();
        let Some(a) = &self.audio else { return d };
        AudioSettings {
            enabled: a.enabled.unwrap_or(d.enabled),
            asset_path: a
                .asset_path
                .as_deref()
                .filter(|p| !p.is_empty())
                .map(|p| anchor(p, config_dir)),
            base_volume: a.base_volume.unwrap_or(d.base_volume),
            lowered_volume: a.lowered_volume.unwrap_or(d.lowered_volume),
            fade: ms(a.fade_ms, d.fade),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{AudioConfig, ChatConfig, FlowConfig, LoggingConfig};

    #[test]
    fn empty_config_yields_core_defaults() {
        let rt = HarimuConfig::default().runtime(Path::new("/cfg"));
        assert_eq!(rt.flow.balloon_probability, 0.6);
        assert_eq!(rt.chat.intro_typing, Duration::from_millis(1200));
        assert_eq!(rt.relief.treat_done, Duration::from_millis(1500));
        assert_eq!(rt.ending.secret_reveal, Duration::from_millis(2000));
        assert_eq!(rt.audio.fade, Duration::from_millis(450));
        assert_eq!(rt.log_level, "info");
        assert_eq!(rt.log_dir, PathBuf::from("/cfg/logs"));
    }

    #[test]
    fn overrides_flow_through() {
        let cfg = HarimuConfig {
            flow: Some(FlowConfig {
                heavy_moods: Some(vec!["selfLove".into(), "nonsense".into()]),
                ..Default::default()
            }),
            chat: Some(ChatConfig {
                final_gap_ms: Some(0),
                ..Default::default()
            }),
            audio: Some(AudioConfig {
                asset_path: Some("lofi.mp3".into()),
                ..Default::default()
            }),
            logging: Some(LoggingConfig {
                level: Some("debug".into()),
                dir: Some("/var/log/harimu".into()),
            }),
            ..Default::default()
        };
        let rt = cfg.runtime(Path::new("/cfg"));
        assert_eq!(rt.flow.heavy_moods, vec![MoodId::SelfLove]);
        assert_eq!(rt.chat.final_gap, Duration::ZERO);
        assert_eq!(rt.chat.final_typing, Duration::from_millis(1500));
        assert_eq!(rt.audio.asset_path, Some(PathBuf::from("/cfg/lofi.mp3")));
        assert_eq!(rt.log_level, "debug");
        assert_eq!(rt.log_dir, PathBuf::from("/var/log/harimu"));
    }
}
