//! Config defaults: fills every unset field from the runtime defaults in `harimu-core`.

use crate::schema::{
    AudioConfig, ChatConfig, EndingConfig, FlowConfig, HarimuConfig, LoggingConfig, ReliefConfig,
};
use harimu_core::{AudioSettings, ChatTimings, EndingSettings, FlowSettings, ReliefTimings};
use std::time::Duration;

/// Schema version written by `config init`.
pub const CURRENT_VERSION: u32 = 1;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Where `config init` points `audio.assetPath`, relative to the config dir.
pub const SUGGESTED_ASSET_PATH: &str = "audio/dancing-phone.mp3";

fn ms(d: Duration) -> u64 {
    d.as_millis() as u64
}

/// Apply all defaults to a freshly loaded config.
pub fn apply_all_defaults(config: HarimuConfig) -> HarimuConfig {
    let config = apply_flow_defaults(config);
    let config = apply_chat_defaults(config);
    let config = apply_relief_defaults(config);
    let config = apply_ending_defaults(config);
    let config = apply_audio_defaults(config);
    let mut config = apply_logging_defaults(config);
    config.version.get_or_insert(CURRENT_VERSION);
    config
}

fn apply_flow_defaults(mut config: HarimuConfig) -> HarimuConfig {
    let d = FlowSettings::default();
    let flow = config.flow.get_or_insert_with(FlowConfig::default);
    flow.balloon_probability.get_or_insert(d.balloon_probability);
    flow.heavy_moods
        .get_or_insert_with(|| d.heavy_moods.iter().map(|m| m.as_str().to_string()).collect());
    flow.max_name_length.get_or_insert(d.max_name_length);
    config
}

fn apply_chat_defaults(mut config: HarimuConfig) -> HarimuConfig {
    let d = ChatTimings::default();
    let chat = config.chat.get_or_insert_with(ChatConfig::default);
    chat.intro_typing_ms.get_or_insert(ms(d.intro_typing));
    chat.choices_reveal_ms.get_or_insert(ms(d.choices_reveal));
    chat.response_typing_delay_ms.get_or_insert(ms(d.response_typing_delay));
    chat.response_ms.get_or_insert(ms(d.response));
    chat.final_gap_ms.get_or_insert(ms(d.final_gap));
    chat.final_typing_ms.get_or_insert(ms(d.final_typing));
    config
}

fn apply_relief_defaults(mut config: HarimuConfig) -> HarimuConfig {
    let d = ReliefTimings::default();
    let relief = config.relief.get_or_insert_with(ReliefConfig::default);
    relief.balloon_intro_ms.get_or_insert(ms(d.balloon_intro));
    relief.balloon_done_ms.get_or_insert(ms(d.balloon_done));
    relief.treat_done_ms.get_or_insert(ms(d.treat_done));
    config
}

fn apply_ending_defaults(mut config: HarimuConfig) -> HarimuConfig {
    let d = EndingSettings::default();
    let ending = config.ending.get_or_insert_with(EndingConfig::default);
    ending.secret_reveal_ms.get_or_insert(ms(d.secret_reveal));
    ending.profile_url.get_or_insert(d.profile_url);
    config
}

/// `assetPath` stays unset: there is no bundled track. `config init` suggests
/// [`SUGGESTED_ASSET_PATH`].
fn apply_audio_defaults(mut config: HarimuConfig) -> HarimuConfig {
    let d = AudioSettings::default();
    let audio = config.audio.get_or_insert_with(AudioConfig::default);
    audio.enabled.get_or_insert(d.enabled);
    audio.base_volume.get_or_insert(d.base_volume);
    audio.lowered_volume.get_or_insert(d.lowered_volume);
    audio.fade_ms.get_or_insert(ms(d.fade));
    config
}

fn apply_logging_defaults(mut config: HarimuConfig) -> HarimuConfig {
    let logging = config.logging.get_or_insert_with(LoggingConfig::default);
    if logging.level.is_none() {
        logging.level = Some(DEFAULT_LOG_LEVEL.to_string());
    }
    config
}
