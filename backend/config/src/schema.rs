//! Harimu configuration schema.
//!
//! Every field is optional so a partial YAML file overlays the defaults.
//! Durations are plain milliseconds.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarimuConfig {
    /// Schema version of the file.
    #[serde(rename = "_version", default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// View routing parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flow: Option<FlowConfig>,

    /// Scripted chat reveal delays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chat: Option<ChatConfig>,

    /// Stress-relief interstitial delays
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relief: Option<ReliefConfig>,

    /// Ending screen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending: Option<EndingConfig>,

    /// Ambient audio
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<AudioConfig>,

    /// Logging configuration
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowConfig {
    /// Chance in [0, 1] that a heavy mood is routed to the balloon interstitial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balloon_probability: Option<f64>,
    /// Mood ids eligible for the balloon interstitial.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heavy_moods: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_name_length: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intro_typing_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub choices_reveal_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_typing_delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_gap_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_typing_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReliefConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balloon_intro_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub balloon_done_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treat_done_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndingConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_reveal_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Looping background track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_volume: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lowered_volume: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fade_ms: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    /// "trace" | "debug" | "info" | "warn" | "error"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    /// Directory for the rolling log file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_partial_yaml() {
        let yaml = r#"
_version: 1
flow:
  balloonProbability: 0.25
chat:
  introTypingMs: 10
"#;
        let cfg: HarimuConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(cfg.version, Some(1));
        assert_eq!(cfg.flow.unwrap().balloon_probability, Some(0.25));
        assert_eq!(cfg.chat.unwrap().intro_typing_ms, Some(10));
        assert!(cfg.audio.is_none());
    }

    #[test]
    fn empty_sections_are_not_serialized() {
        let yaml = serde_yaml::to_string(&HarimuConfig::default()).unwrap();
        assert_eq!(yaml.trim(), "{}");
    }
}
