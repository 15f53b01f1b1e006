//! Shared command prologue: load the config, install logging, report config findings.

use anyhow::Result;
use harimu_config::{HarimuConfig, RuntimeSettings};
use std::path::Path;

pub struct Prepared {
    pub config: HarimuConfig,
    pub runtime: RuntimeSettings,
}

/// Loads the config from the default location and installs the logger.
///
/// `console` adds the stderr layer; the TUI leaves it off.
pub async fn prepare(console: bool) -> Result<Prepared> {
    prepare_in(&harimu_config::config_dir(), console).await
}

pub async fn prepare_in(config_dir: &Path, console: bool) -> Result<Prepared> {
    let config =
        harimu_config::load_and_prepare(&harimu_config::config_file_path(config_dir)).await?;
    let runtime = config.runtime(config_dir);

    harimu_logging::init_logger(&runtime.log_dir, &runtime.log_level, console)?;
    harimu_config::log_report(&harimu_config::validate(&config));

    Ok(Prepared { config, runtime })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn config_warnings_reach_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.yaml"),
            "flow:\n  heavyMoods: [burnout, grumpy]\nlogging:\n  level: info\n",
        )
        .unwrap();

        let prepared = prepare_in(dir.path(), true).await.unwrap();
        assert_eq!(prepared.runtime.log_dir, dir.path().join("logs"));

        let logged: String = std::fs::read_dir(&prepared.runtime.log_dir)
            .unwrap()
            .filter_map(|entry| entry.ok())
            .filter(|entry| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .starts_with(harimu_logging::LOG_FILE_PREFIX)
            })
            .map(|entry| std::fs::read_to_string(entry.path()).unwrap())
            .collect();
        assert!(logged.contains("Config warning"), "{logged}");
        assert!(logged.contains("grumpy"), "{logged}");
    }
}
