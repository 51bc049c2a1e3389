//! Local LLM file summarizer
//!
//! Sends local files to an OpenAI-compatible inference server running on this
//! machine, and shows the Markdown summary it returns in the terminal with
//! save, copy, retry, and theme actions.

mod conversion;
mod core;
mod models;
mod ui;

#[cfg(test)]
mod test_support;

use crate::core::config::Config;
use crate::core::constants::AUTO_MODEL;
use crate::core::error::SummaryError;
use crate::core::logging::init_logging;
use crate::core::providers::LocalServerProvider;
use crate::core::summarizer::SummaryClient;
use crate::models::summary::SummaryRequest;
use crate::ui::presenter::TerminalPresenter;
use crate::ui::session::{SummarySession, Theme};
use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "llm-summarize", version, about = "Summarize local files with a local LLM")]
struct Cli {
    /// Configuration file (default: $CONFIG_PATH, then ./config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Logging level, overrides the configuration file
    #[arg(long, global = true, env = "LOG_LEVEL")]
    log_level: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Summarize one or more files
    Summarize {
        /// Model identifier, or "auto" for the first loaded model
        model: String,

        /// Files to summarize, in prompt order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Save the summary to this path before display
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the raw markdown and exit
        #[arg(long)]
        print: bool,

        /// Start in dark mode
        #[arg(long)]
        dark: bool,
    },
    /// List the models the server offers
    Models,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::load(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration Error: {:#}", e);
            std::process::exit(1);
        }
    };

    init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));

    if let Err(e) = run(cli.command, &config).await {
        error!("{:#}", e);
        let _ = report_failure(&e, &mut std::io::stderr());
        std::process::exit(1);
    }
}

/// Write an error chain, plus the raw server body for format errors
fn report_failure(error: &anyhow::Error, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "{} {:#}", "Error:".red().bold(), error)?;
    if let Some(raw) = error
        .downcast_ref::<SummaryError>()
        .and_then(SummaryError::raw_body)
    {
        writeln!(out, "{}\n{}", "Raw response:".yellow(), raw)?;
    }
    Ok(())
}

/// Summarize and open a session; `output`, when given, is saved before
/// display and a failed save is reported without ending the run
async fn prepare_session(
    client: &SummaryClient,
    model: &str,
    files: Vec<PathBuf>,
    output: Option<&Path>,
    theme: Theme,
    err_out: &mut impl Write,
) -> Result<SummarySession> {
    let model = client.resolve_model(model).await?;
    let request = SummaryRequest::new(model, files)?;
    let result = client.summarize(&request).await?;
    let session = SummarySession::new(request, result, theme);

    if let Some(path) = output {
        if let Err(e) = session.save(path) {
            error!("{:#}", e);
            report_failure(&e, err_out)?;
        }
    }

    Ok(session)
}

async fn run(command: CliCommand, config: &Config) -> Result<()> {
    let provider = LocalServerProvider::new(
        config.base_url(),
        config.request_timeout,
        config.connect_timeout,
    )?;
    info!(
        "Server: {} (timeout: {})",
        config.base_url(),
        if config.request_timeout == 0 {
            "none".to_string()
        } else {
            format!("{}s", config.request_timeout)
        }
    );
    let client = SummaryClient::new(Arc::new(provider), config.instruction.clone());

    match command {
        CliCommand::Summarize {
            model,
            files,
            output,
            print,
            dark,
        } => {
            let theme = Theme::from_dark(dark || config.dark_mode);
            let mut session = prepare_session(
                &client,
                &model,
                files,
                output.as_deref(),
                theme,
                &mut std::io::stderr(),
            )
            .await?;

            if print {
                println!("{}", session.markdown());
                return Ok(());
            }

            let mut presenter = TerminalPresenter::new(std::io::stdout(), config.clipboard_command.clone());
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            presenter.run(&mut session, &client, input).await
        }
        CliCommand::Models => {
            let models = client.list_models().await?;
            if models.is_empty() {
                println!("No models reported by {}", config.base_url());
            }
            for model in models {
                let status = if model.loaded {
                    "loaded".green()
                } else {
                    "not loaded".dimmed()
                };
                println!("{}\t{}", model.id, status);
            }
            println!("\nUse `{}` to pick the first loaded model.", AUTO_MODEL);
            Ok(())
        }
    }
}
