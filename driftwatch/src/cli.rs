// driftwatch/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "driftwatch")]
#[command(about = "Data-quality rule engine for pipeline task statistics", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 📖 Lists the built-in check functions (the catalogue)
    Functions {
        /// Emit the catalogue as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// ✅ Validates a rules file without running any check
    Validate {
        /// Path to the rules YAML file
        #[arg(long, default_value = "rules.yml")]
        rules: PathBuf,
    },

    /// 🔍 Replays the analysis over a snapshot (project + runs + stats)
    Check {
        /// Path to the snapshot YAML file
        #[arg(long, default_value = "snapshot.yml")]
        snapshot: PathBuf,

        /// Exit with an error code when any warning is raised
        #[arg(long)]
        strict: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{Result, bail};
    use clap::Parser;

    #[test]
    fn test_cli_parse_functions_defaults() -> Result<()> {
        let args = Cli::parse_from(["driftwatch", "functions"]);
        match args.command {
            Commands::Functions { json } => {
                assert!(!json);
                Ok(())
            }
            _ => bail!("Expected Functions command"),
        }
    }

    #[test]
    fn test_cli_parse_validate_path() -> Result<()> {
        let args = Cli::parse_from(["driftwatch", "validate", "--rules", "/tmp/rules.yml"]);
        match args.command {
            Commands::Validate { rules } => {
                assert_eq!(rules.to_string_lossy(), "/tmp/rules.yml");
                Ok(())
            }
            _ => bail!("Expected Validate command"),
        }
    }

    #[test]
    fn test_cli_parse_check_strict() -> Result<()> {
        let args = Cli::parse_from(["driftwatch", "check", "--strict"]);
        match args.command {
            Commands::Check { snapshot, strict } => {
                assert_eq!(snapshot.to_string_lossy(), "snapshot.yml");
                assert!(strict);
                Ok(())
            }
            _ => bail!("Expected Check command"),
        }
    }
}
