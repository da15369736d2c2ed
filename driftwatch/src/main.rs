// driftwatch/src/main.rs

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // RUST_LOG=debug driftwatch check ... to see the details
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        // --- USE CASE: FUNCTION CATALOGUE ---
        Commands::Functions { json } => {
            commands::functions::execute(json)?;
        }

        // --- USE CASE: VALIDATE RULES ---
        Commands::Validate { rules } => {
            if let Err(e) = commands::validate::execute(&rules) {
                eprintln!("❌ Validation failed: {}", e);
                std::process::exit(1);
            }
        }

        // --- USE CASE: REPLAY A SNAPSHOT ---
        Commands::Check { snapshot, strict } => match commands::check::execute(&snapshot).await {
            Ok(warnings) if warnings == 0 => {
                println!("\n✨ SUCCESS! No warnings raised.");
            }
            Ok(warnings) => {
                println!("\n⚠️  {} warning(s) raised.", warnings);
                if strict {
                    std::process::exit(1);
                }
            }
            Err(e) => {
                eprintln!("\n💥 CRITICAL CHECK ERROR: {}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}
