//! Config file read/write with an atomic single-backup rotation.

use crate::schema::HarimuConfig;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// Default config file name within the config directory.
const CONFIG_FILE_NAME: &str = "config.yaml";

/// Resolve the Harimu config directory.
/// Priority: `HARIMU_CONFIG_DIR` env > `~/.harimu/`
pub fn config_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("HARIMU_CONFIG_DIR") {
        if !dir.is_empty() {
            return PathBuf::from(dir);
        }
    }
    match dirs::home_dir() {
        Some(home) => home.join(".harimu"),
        None => PathBuf::from(".harimu"),
    }
}

/// Resolve the full path to the main config file.
pub fn config_file_path(config_dir: &Path) -> PathBuf {
    config_dir.join(CONFIG_FILE_NAME)
}

/// Read the config file as an untyped tree, before env substitution.
///
/// Returns `Ok(None)` if the file doesn't exist (first run). An empty file
/// reads as an empty mapping.
pub async fn load_raw(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file does not exist; using defaults");
        return Ok(None);
    }

    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    if raw.trim().is_empty() {
        return Ok(Some(Value::Object(Default::default())));
    }

    let yaml: serde_yaml::Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse config YAML at: {}", path.display()))?;
    let value = serde_json::to_value(yaml)
        .with_context(|| format!("Config at {} is not a plain mapping", path.display()))?;

    info!(path = %path.display(), "Loaded config");
    Ok(Some(value))
}

/// Load and parse the config from disk without env substitution.
///
/// Returns `Ok(Default::default())` if the file doesn't exist.
pub async fn load_config(path: &Path) -> Result<HarimuConfig> {
    match load_raw(path).await? {
        Some(value) => serde_json::from_value(value)
            .with_context(|| format!("Invalid config at: {}", path.display())),
        None => Ok(HarimuConfig::default()),
    }
}

/// Write config to disk atomically (write to temp file, rename).
///
/// The previous file, if any, is kept as `config.yaml.bak`.
pub async fn write_config(config: &HarimuConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await.with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    if path.exists() {
        let bak = path.with_extension("yaml.bak");
        if let Err(e) = fs::copy(path, &bak).await {
            warn!("Failed to create backup {}: {}", bak.display(), e);
        }
    }

    let yaml = serde_yaml::to_string(config).context("Failed to serialize config to YAML")?;

    let tmp_path = path.with_extension("yaml.tmp");
    fs::write(&tmp_path, yaml.as_bytes())
        .await
        .with_context(|| format!("Failed to write temp config: {}", tmp_path.display()))?;

    fs::rename(&tmp_path, path)
        .await
        .with_context(|| format!("Failed to rename temp config to: {}", path.display()))?;

    info!(path = %path.display(), "Wrote config");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FlowConfig;

    #[test]
    fn file_path_is_inside_dir() {
        let p = config_file_path(Path::new("/tmp/harimu"));
        assert_eq!(p, PathBuf::from("/tmp/harimu/config.yaml"));
    }

    #[tokio::test]
    async fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        assert!(load_raw(&path).await.unwrap().is_none());
        assert_eq!(load_config(&path).await.unwrap(), HarimuConfig::default());
    }

    #[tokio::test]
    async fn empty_file_is_empty_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "").unwrap();
        assert_eq!(load_config(&path).await.unwrap(), HarimuConfig::default());
    }

    #[tokio::test]
    async fn write_then_load_keeps_one_backup() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(&dir.path().join("nested"));

        let mut cfg = HarimuConfig {
            flow: Some(FlowConfig {
                balloon_probability: Some(0.1),
                ..Default::default()
            }),
            ..Default::default()
        };
        write_config(&cfg, &path).await.unwrap();
        assert!(!path.with_extension("yaml.bak").exists());

        cfg.flow.as_mut().unwrap().balloon_probability = Some(0.9);
        write_config(&cfg, &path).await.unwrap();
        write_config(&cfg, &path).await.unwrap();

        let loaded = load_config(&path).await.unwrap();
        assert_eq!(loaded.flow.unwrap().balloon_probability, Some(0.9));

        let bak = std::fs::read_to_string(path.with_extension("yaml.bak")).unwrap();
        assert!(bak.contains("0.9"));
        assert!(!path.with_extension("yaml.tmp").exists());
    }

    #[tokio::test]
    async fn malformed_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = config_file_path(dir.path());
        std::fs::write(&path, "flow: [unclosed").unwrap();
        assert!(load_raw(&path).await.is_err());
    }
}
