// ============================================================================
// mergemate - Merge text files into one document
// Main Entry Point
//
// Parses the command line, sets up logging and the Ctrl+C handler, and
// dispatches to the command handlers. The merge pipeline itself lives in
// the library crate.
// ============================================================================

use clap::Parser;
use log::info;
use std::sync::Arc;

use mergemate::app_state::AppState;
use mergemate::cli::{Cli, Commands};
use mergemate::commands::CommandHandler;
use mergemate::errors::MergerResult;
use mergemate::logging::Logger;
use mergemate::signal_handler::SignalHandler;

#[tokio::main]
async fn main() -> MergerResult<()> {
    let cli = Cli::parse();

    // Own logger when a log file is requested, env_logger otherwise
    if cli.log_file.is_some() || cli.error_file.is_some() {
        Logger::init(
            cli.log_file.as_deref(),
            cli.error_file.as_deref(),
            cli.log_level(),
        )?;
    } else {
        env_logger::builder().filter_level(cli.log_level()).init();
    }

    info!("mergemate starting up");

    match cli.command {
        Commands::Merge(args) => {
            info!("Executing merge command");
            let app_state = Arc::new(AppState::new());
            SignalHandler::new(Arc::clone(&app_state)).setup_handlers()?;
            CommandHandler::handle_merge(args, app_state).await?;
        }

        Commands::Extensions => {
            CommandHandler::handle_extensions()?;
        }

        Commands::GenerateConfig(args) => {
            info!("Executing generate-config command");
            CommandHandler::handle_generate_config(args).await?;
        }

        Commands::GuidedSetup(args) => {
            info!("Executing guided-setup command");
            CommandHandler::handle_guided_setup(args).await?;
        }
    }

    info!("mergemate operation completed");
    Ok(())
}
