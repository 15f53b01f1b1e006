//! `harimu-config`: runtime configuration for the Harimu session.
//!
//! Provides:
//! - Typed config schema (flow, chat, relief, ending, audio, logging)
//! - YAML read/write with an atomic backup
//! - `${ENV_VAR}` substitution
//! - Default value application
//! - Validation with errors and warnings
//! - Conversion into `harimu-core` settings

pub mod defaults;
pub mod env;
pub mod io;
pub mod runtime;
pub mod schema;
pub mod validation;

pub use defaults::{apply_all_defaults, CURRENT_VERSION, SUGGESTED_ASSET_PATH};
pub use env::{resolve_env_vars, resolve_env_vars_with, MissingEnvVarError};
pub use io::{config_dir, config_file_path, load_config, load_raw, write_config};
pub use runtime::RuntimeSettings;
pub use schema::HarimuConfig;
pub use validation::{log_report, validate, ConfigValidationError, ValidationReport};

use anyhow::{Context, Result};
use harimu_core::HarimuError;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Load, apply env substitution and defaults, and validate a config file.
///
/// This is the main entry point for loading a config at runtime. Validation
/// errors abort. Warnings are left to the caller, which usually has no
/// subscriber yet; see [`log_report`].
pub async fn load_and_prepare(path: &Path) -> Result<HarimuConfig> {
    let value = load_raw(path)
        .await?
        .unwrap_or_else(|| Value::Object(Default::default()));
    prepare_with(value, &std::env::vars().collect())
}

/// The pure half of [`load_and_prepare`], over an explicit environment.
pub fn prepare_with(value: Value, env: &HashMap<String, String>) -> Result<HarimuConfig> {
    let value = resolve_env_vars_with(&value, env).context("Failed to resolve env vars in config")?;

    let config: HarimuConfig =
        serde_json::from_value(value).context("Failed to deserialize config")?;

    let config = apply_all_defaults(config);

    let report = validate(&config);
    if !report.is_valid() {
        let summary = report
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.path, e.message))
            .collect::<Vec<_>>()
            .join("; ");
        return Err(HarimuError::Config(summary).into());
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prepare_substitutes_and_defaults() {
        let env = HashMap::from([("HANDLE".to_string(), "harimu.id".to_string())]);
        let value = json!({ "ending": { "profileUrl": "https://instagram.com/${HANDLE}" } });
        let cfg = prepare_with(value, &env).unwrap();
        let ending = cfg.ending.unwrap();
        assert_eq!(ending.profile_url.unwrap(), "https://instagram.com/harimu.id");
        assert_eq!(ending.secret_reveal_ms, Some(2000));
        assert_eq!(cfg.version, Some(CURRENT_VERSION));
    }

    #[test]
    fn prepare_rejects_invalid_values() {
        let value = json!({ "flow": { "balloonProbability": -0.1 } });
        let err = prepare_with(value, &HashMap::new()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<HarimuError>(),
            Some(HarimuError::Config(msg)) if msg.contains("flow.balloonProbability")
        ));
    }

    #[test]
    fn prepare_fails_on_missing_env() {
        let value = json!({ "audio": { "assetPath": "${HARIMU_TEST_UNSET_TRACK}" } });
        assert!(prepare_with(value, &HashMap::new()).is_err());
    }

    #[tokio::test]
    async fn load_and_prepare_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "relief:\n  treatDoneMs: 10\n").unwrap();
        let cfg = load_and_prepare(&path).await.unwrap();
        let relief = cfg.relief.unwrap();
        assert_eq!(relief.treat_done_ms, Some(10));
        assert_eq!(relief.balloon_intro_ms, Some(2500));
    }
}
