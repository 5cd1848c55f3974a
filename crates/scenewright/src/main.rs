//! Scenewright CLI binary.
//!
//! This binary provides command-line access to Scenewright's functionality:
//! - Chat with the assistant to write and revise a script
//! - Translate a script's narration in one batch
//! - Preview the script context sent with each turn

use clap::Parser;
use scenewright::ScenewrightConfig;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, run_chat, run_translate, show_context};

    // A missing .env file is fine; the key may already be in the environment
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let log_level = if cli.verbose { "debug" } else { "info" };

    #[cfg(feature = "observability")]
    {
        use scenewright::observability::{ObservabilityConfig, init_observability_with_config};
        init_observability_with_config(
            ObservabilityConfig::new("scenewright")
                .with_log_level(log_level)
                .with_json_logs(cli.json_logs),
        )?;
    }

    #[cfg(not(feature = "observability"))]
    init_tracing(log_level, cli.json_logs)?;

    let config = match &cli.config {
        Some(path) => ScenewrightConfig::from_file(path)?,
        None => ScenewrightConfig::load()?,
    };

    match cli.command {
        Commands::Chat { script, anchor } => {
            run_chat(&config, script.as_deref(), &anchor).await?;
        }

        Commands::Translate {
            script,
            language,
            out,
        } => {
            run_translate(&config, &script, &language, out.as_deref()).await?;
        }

        Commands::Context { script } => {
            show_context(&script)?;
        }
    }

    Ok(())
}

#[cfg(not(feature = "observability"))]
fn init_tracing(log_level: &str, json_logs: bool) -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(log_level))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if json_logs {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}
