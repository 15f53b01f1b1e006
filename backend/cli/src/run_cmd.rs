//! `harimu run`: loads config, starts file logging and hands over to the TUI.

use anyhow::Result;
use clap::Args;
use harimu_core::{RandomSource, RngSource};
use harimu_tui::{AppSettings, AppState};
use tracing::info;

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Seed for the relief-variant draw and affirmation refreshes
    #[arg(long)]
    pub seed: Option<u64>,
    /// Keep the ambient track silent for this session
    #[arg(long)]
    pub no_audio: bool,
}

pub async fn run(args: RunArgs) -> Result<()> {
    // File only: console output would be drawn over by the alternate screen.
    let runtime = crate::startup::prepare(false).await?.runtime;

    let mut settings = AppSettings {
        flow: runtime.flow,
        chat: runtime.chat,
        relief: runtime.relief,
        ending: runtime.ending,
        audio: runtime.audio,
    };
    if args.no_audio {
        settings.audio.enabled = false;
    }
    let audio_enabled = settings.audio.enabled;

    let session_id = uuid::Uuid::new_v4().to_string();
    let today = chrono::Local::now().date_naive();
    info!(session_id = %session_id, seed = ?args.seed, audio = audio_enabled, "Starting session");

    let (variant, affirmation) = sources(args.seed);
    let app = AppState::new(settings, session_id, today).with_sources(variant, affirmation);
    let app = with_speaker(app, audio_enabled);

    harimu_tui::run(app).await
}

/// Two independent streams so refreshing affirmations never shifts the variant draw.
fn sources(seed: Option<u64>) -> (Box<dyn RandomSource>, Box<dyn RandomSource>) {
    match seed {
        Some(seed) => (
            Box::new(RngSource::seeded(seed)),
            Box::new(RngSource::seeded(seed.rotate_left(32) ^ 0x5851_F42D_4C95_7F2D)),
        ),
        None => (
            Box::new(RngSource::from_entropy()),
            Box::new(RngSource::from_entropy()),
        ),
    }
}

#[cfg(feature = "sound")]
fn with_speaker(app: AppState, enabled: bool) -> AppState {
    if enabled {
        app.with_audio_output(Box::new(harimu_tui::sound::RodioOutput::new()))
    } else {
        app
    }
}

#[cfg(not(feature = "sound"))]
fn with_speaker(app: AppState, _enabled: bool) -> AppState {
    app
}
