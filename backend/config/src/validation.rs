//! Config validation: field checks with user-friendly error messages.

use crate::defaults::CURRENT_VERSION;
use crate::schema::HarimuConfig;
use harimu_core::MoodId;
use thiserror::Error;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// A config validation error with field path and message.
#[derive(Debug, Error)]
#[error("Config validation error at '{path}': {message}")]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

/// A collection of validation errors found in one pass.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }

    fn warn(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Validate the config and return a report of all errors and warnings.
pub fn validate(config: &HarimuConfig) -> ValidationReport {
    let mut report = ValidationReport::default();
    if let Some(v) = config.version.filter(|v| *v > CURRENT_VERSION) {
        report.warn(
            "_version",
            format!("Config version {v} is newer than this build ({CURRENT_VERSION})"),
        );
    }
    validate_flow(config, &mut report);
    validate_ending(config, &mut report);
    validate_audio(config, &mut report);
    validate_logging(config, &mut report);
    report
}

/// Emit every finding of a report through `tracing`.
///
/// Call once the subscriber is installed; findings logged earlier are lost.
pub fn log_report(report: &ValidationReport) {
    for warning in &report.warnings {
        tracing::warn!(path = %warning.path, message = %warning.message, "Config warning");
    }
    for error in &report.errors {
        tracing::error!(path = %error.path, message = %error.message, "Config error");
    }
}

fn validate_flow(config: &HarimuConfig, report: &mut ValidationReport) {
    let Some(flow) = &config.flow else { return };
    if let Some(p) = flow.balloon_probability {
        if !(0.0..=1.0).contains(&p) {
            report.error("flow.balloonProbability", format!("{p} is outside [0, 1]"));
        }
    }
    if flow.max_name_length == Some(0) {
        report.error("flow.maxNameLength", "must be > 0");
    }
    for id in flow.heavy_moods.iter().flatten() {
        if id.parse::<MoodId>().is_err() {
            report.warn("flow.heavyMoods", format!("Unknown mood id '{id}' is ignored"));
        }
    }
}

fn validate_ending(config: &HarimuConfig, report: &mut ValidationReport) {
    let Some(ending) = &config.ending else { return };
    if let Some(url) = &ending.profile_url {
        if url.trim().is_empty() {
            report.error("ending.profileUrl", "Profile URL cannot be empty");
        }
    }
}

fn validate_audio(config: &HarimuConfig, report: &mut ValidationReport) {
    let Some(audio) = &config.audio else { return };
    for (path, volume) in [
        ("audio.baseVolume", audio.base_volume),
        ("audio.loweredVolume", audio.lowered_volume),
    ] {
        if let Some(v) = volume {
            if !(0.0..=1.0).contains(&v) {
                report.error(path, format!("{v} is outside [0, 1]"));
            }
        }
    }
    if let (Some(base), Some(lowered)) = (audio.base_volume, audio.lowered_volume) {
        if lowered > base {
            report.error(
                "audio.loweredVolume",
                format!("{lowered} is louder than baseVolume {base}"),
            );
        }
    }
    if audio.enabled == Some(true) && audio.asset_path.as_deref().map_or(true, str::is_empty) {
        report.warn("audio.assetPath", "Audio is enabled but no track is configured");
    }
}

fn validate_logging(config: &HarimuConfig, report: &mut ValidationReport) {
    let Some(logging) = &config.logging else { return };
    if let Some(level) = &logging.level {
        if !LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            report.error("logging.level", format!("Unknown log level '{level}'"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::apply_all_defaults;
    use crate::schema::{AudioConfig, EndingConfig, FlowConfig, LoggingConfig};

    #[test]
    fn defaults_are_valid() {
        let report = validate(&apply_all_defaults(HarimuConfig::default()));
        assert!(report.is_valid(), "{:?}", report.errors);
        // No bundled track, so the enabled-without-asset warning fires.
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].path, "audio.assetPath");
    }

    #[test]
    fn probability_out_of_range() {
        let cfg = HarimuConfig {
            flow: Some(FlowConfig {
                balloon_probability: Some(1.5),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(!report.is_valid());
        assert_eq!(report.errors[0].path, "flow.balloonProbability");
    }

    #[test]
    fn zero_name_length_is_error() {
        let cfg = HarimuConfig {
            flow: Some(FlowConfig {
                max_name_length: Some(0),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(!validate(&cfg).is_valid());
    }

    #[test]
    fn unknown_heavy_mood_warns() {
        let cfg = HarimuConfig {
            flow: Some(FlowConfig {
                heavy_moods: Some(vec!["burnout".into(), "grumpy".into()]),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("grumpy"));
    }

    #[test]
    fn lowered_louder_than_base() {
        let cfg = HarimuConfig {
            audio: Some(AudioConfig {
                enabled: Some(false),
                base_volume: Some(0.2),
                lowered_volume: Some(0.5),
                ..Default::default()
            }),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].path, "audio.loweredVolume");
    }

    #[test]
    fn volume_outside_unit_range_is_error() {
        let cfg = HarimuConfig {
            audio: Some(AudioConfig {
                enabled: Some(false),
                base_volume: Some(1.4),
                lowered_volume: Some(-0.1),
                ..Default::default()
            }),
            ..Default::default()
        };
        let paths: Vec<_> = validate(&cfg).errors.into_iter().map(|e| e.path).collect();
        assert_eq!(paths, ["audio.baseVolume", "audio.loweredVolume"]);
    }

    #[test]
    fn newer_version_warns() {
        let cfg = HarimuConfig {
            version: Some(CURRENT_VERSION + 1),
            ..Default::default()
        };
        let report = validate(&cfg);
        assert!(report.is_valid());
        assert_eq!(report.warnings[0].path, "_version");
    }

    #[test]
    fn empty_profile_url() {
        let cfg = HarimuConfig {
            ending: Some(EndingConfig {
                profile_url: Some("  ".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(!validate(&cfg).is_valid());
    }

    #[test]
    fn bad_log_level() {
        let cfg = HarimuConfig {
            logging: Some(LoggingConfig {
                level: Some("loud".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(!validate(&cfg).is_valid());
    }
}
