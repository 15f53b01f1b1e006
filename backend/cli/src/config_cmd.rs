//! `harimu config`: show the config path, print the effective config, or write defaults.

use anyhow::{Context, Result};
use clap::Subcommand;
use harimu_config::{
    apply_all_defaults, config_dir, config_file_path, write_config, HarimuConfig,
    SUGGESTED_ASSET_PATH,
};
use std::path::Path;

use crate::terminal_output::{note_info, note_success, note_warn};

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective config (file + defaults) as YAML
    Show,
    /// Write a config file populated with defaults
    Init {
        /// Overwrite an existing file (the old one is kept as .bak)
        #[arg(long)]
        force: bool,
    },
}

pub async fn run(action: ConfigAction) -> Result<()> {
    let dir = config_dir();
    let path = config_file_path(&dir);
    match action {
        ConfigAction::Path => {
            println!("{}", path.display());
        }
        ConfigAction::Show => {
            let config = crate::startup::prepare(true).await?.config;
            print!("{}", serde_yaml::to_string(&config).context("Failed to render config")?);
        }
        ConfigAction::Init { force } => {
            if init(&path, force).await? {
                note_success(&format!("Wrote {}", path.display()));
                let track = dir.join(SUGGESTED_ASSET_PATH);
                if !track.exists() {
                    note_warn(&format!(
                        "No ambient track yet: put an mp3 at {} or point audio.assetPath elsewhere",
                        track.display()
                    ));
                }
            } else {
                note_info(&format!(
                    "{} already exists; pass --force to overwrite",
                    path.display()
                ));
            }
        }
    }
    Ok(())
}

/// Returns `false` when the file exists and `force` is unset.
async fn init(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    write_config(&initial_config(), path).await?;
    Ok(true)
}

/// Defaults plus the suggested track location, so the written file names it.
fn initial_config() -> HarimuConfig {
    let mut config = apply_all_defaults(HarimuConfig::default());
    if let Some(audio) = config.audio.as_mut() {
        audio
            .asset_path
            .get_or_insert_with(|| SUGGESTED_ASSET_PATH.to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn init_respects_existing_file() {
        let dir = std::env::temp_dir().join(format!("harimu-cli-init-{}", std::process::id()));
        let path = config_file_path(&dir);
        let _ = std::fs::remove_dir_all(&dir);

        assert!(init(&path, false).await.unwrap());
        let written = harimu_config::load_config(&path).await.unwrap();
        assert_eq!(written.flow.unwrap().balloon_probability, Some(0.6));
        assert_eq!(
            written.audio.unwrap().asset_path.as_deref(),
            Some(SUGGESTED_ASSET_PATH)
        );

        std::fs::write(&path, "flow:\n  balloonProbability: 0.2\n").unwrap();
        assert!(!init(&path, false).await.unwrap());
        assert!(std::fs::read_to_string(&path).unwrap().contains("0.2"));

        assert!(init(&path, true).await.unwrap());
        assert!(path.with_extension("yaml.bak").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
