mod affirmation_cmd;
mod config_cmd;
mod moods_cmd;
mod run_cmd;
mod startup;
mod terminal_output;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "harimu")]
#[command(about = "Harimu, a gentle check-in in your terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (the default)
    Run(run_cmd::RunArgs),
    /// Print an affirmation
    Affirmation(affirmation_cmd::AffirmationArgs),
    /// List the moods and how each one is routed
    Moods,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: config_cmd::ConfigAction,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Run(run_cmd::RunArgs::default())) {
        Commands::Run(args) => run_cmd::run(args).await,
        Commands::Affirmation(args) => affirmation_cmd::run(args).await,
        Commands::Moods => moods_cmd::run().await,
        Commands::Config { action } => config_cmd::run(action).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_invocation_runs_session() {
        let cli = Cli::try_parse_from(["harimu"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from(["harimu", "run", "--seed", "7", "--no-audio"]).unwrap();
        let Some(Commands::Run(args)) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.seed, Some(7));
        assert!(args.no_audio);
    }

    #[test]
    fn random_and_date_conflict() {
        assert!(Cli::try_parse_from(["harimu", "affirmation", "--random", "--date", "2026-01-01"]).is_err());
    }

    #[test]
    fn parses_config_init_force() {
        let cli = Cli::try_parse_from(["harimu", "config", "init", "--force"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: config_cmd::ConfigAction::Init { force: true }
            })
        ));
    }
}
