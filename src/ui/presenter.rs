//! Presenter capability interface and its terminal implementation

use crate::core::error::SummaryError;
use crate::core::summarizer::SummaryClient;
use crate::ui::render::render_markdown;
use crate::ui::session::SummarySession;
use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info};

/// Actions a display surface offers on a summary
#[async_trait]
pub trait Presenter: Send {
    /// Display the current summary
    fn show(&mut self, session: &SummarySession) -> Result<()>;

    /// Save to `target`, or to the session's default path; returns the path written
    fn on_save(&mut self, session: &SummarySession, target: Option<PathBuf>) -> Result<PathBuf>;

    fn on_copy(&mut self, session: &SummarySession) -> Result<()>;

    /// Re-run the request; the previous summary survives a failure
    async fn on_retry(
        &mut self,
        session: &mut SummarySession,
        client: &SummaryClient,
    ) -> Result<()>;

    fn on_toggle_theme(&mut self, session: &mut SummarySession) -> Result<()>;
}

/// Commands read by the terminal loop
#[derive(Debug, PartialEq, Eq)]
pub enum PresenterCommand {
    Save(Option<PathBuf>),
    Copy,
    Retry,
    ToggleTheme,
    Quit,
    Help,
    Unknown(String),
}

impl PresenterCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, arg)) => (word, Some(arg.trim())),
            None => (line, None),
        };

        match word.to_lowercase().as_str() {
            "s" | "save" => Self::Save(arg.filter(|a| !a.is_empty()).map(PathBuf::from)),
            "c" | "copy" => Self::Copy,
            "r" | "retry" => Self::Retry,
            "t" | "theme" => Self::ToggleTheme,
            "q" | "quit" | "close" => Self::Quit,
            "" | "h" | "help" | "?" => Self::Help,
            _ => Self::Unknown(line.to_string()),
        }
    }
}

/// Presenter writing styled text to a terminal
pub struct TerminalPresenter<W: Write + Send> {
    out: W,
    clipboard_command: String,
}

impl<W: Write + Send> TerminalPresenter<W> {
    pub fn new(out: W, clipboard_command: impl Into<String>) -> Self {
        Self {
            out,
            clipboard_command: clipboard_command.into(),
        }
    }

    fn print_menu(&mut self, session: &SummarySession) -> Result<()> {
        writeln!(
            self.out,
            "\n{}",
            format!(
                "[s]ave [path]  [c]opy  [r]etry  [t]heme ({})  [q]uit",
                session.theme().label()
            )
            .dimmed()
        )?;
        self.out.flush()?;
        Ok(())
    }

    fn report_error(&mut self, error: &anyhow::Error) -> Result<()> {
        writeln!(self.out, "{} {:#}", "Error:".red().bold(), error)?;
        if let Some(raw) = error
            .downcast_ref::<SummaryError>()
            .and_then(SummaryError::raw_body)
        {
            writeln!(self.out, "{}\n{}", "Raw response:".yellow(), raw)?;
        }
        Ok(())
    }

    /// Show the summary, then act on commands from `input` until quit or EOF
    pub async fn run<R>(
        &mut self,
        session: &mut SummarySession,
        client: &SummaryClient,
        input: R,
    ) -> Result<()>
    where
        R: AsyncBufRead + Unpin + Send,
    {
        self.show(session)?;
        self.print_menu(session)?;

        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            let command = PresenterCommand::parse(&line);
            debug!("Presenter command: {:?}", command);

            let outcome = match command {
                PresenterCommand::Save(target) => match self.on_save(session, target) {
                    Ok(path) => {
                        writeln!(self.out, "{} {}", "Saved".green(), path.display())?;
                        Ok(())
                    }
                    Err(e) => Err(e),
                },
                PresenterCommand::Copy => match self.on_copy(session) {
                    Ok(()) => {
                        writeln!(self.out, "{}", "Copied to clipboard".green())?;
                        Ok(())
                    }
                    Err(e) => Err(e),
                },
                PresenterCommand::Retry => self.on_retry(session, client).await,
                PresenterCommand::ToggleTheme => self.on_toggle_theme(session),
                PresenterCommand::Quit => break,
                PresenterCommand::Help => Ok(()),
                PresenterCommand::Unknown(other) => {
                    writeln!(self.out, "Unknown command: {}", other)?;
                    Ok(())
                }
            };

            if let Err(e) = outcome {
                self.report_error(&e)?;
            }
            self.print_menu(session)?;
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

#[async_trait]
impl<W: Write + Send> Presenter for TerminalPresenter<W> {
    fn show(&mut self, session: &SummarySession) -> Result<()> {
        let request = session.request();
        let header = format!(
            "LLMSummarize | {} | {} file(s) | {}",
            request.model(),
            request.files().len(),
            session.theme().label()
        );
        writeln!(self.out, "{}\n", header.bold())?;
        writeln!(self.out, "{}", render_markdown(session.markdown(), session.theme()))?;
        self.out.flush()?;
        Ok(())
    }

    fn on_save(&mut self, session: &SummarySession, target: Option<PathBuf>) -> Result<PathBuf> {
        let path = target.unwrap_or_else(|| session.default_save_path());
        session.save(&path)?;
        Ok(path)
    }

    fn on_copy(&mut self, session: &SummarySession) -> Result<()> {
        let mut parts = self.clipboard_command.split_whitespace();
        let Some(program) = parts.next() else {
            bail!("No clipboard command configured");
        };

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to run clipboard command `{}`", self.clipboard_command))?;

        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(session.markdown().as_bytes()),
            None => Err(std::io::Error::other("clipboard command has no stdin")),
        };

        let status = child.wait()?;
        written.with_context(|| {
            format!("Failed to write to clipboard command `{}`", self.clipboard_command)
        })?;
        if !status.success() {
            bail!("Clipboard command `{}` exited with {}", self.clipboard_command, status);
        }
        info!("Copied {} chars to clipboard", session.markdown().len());
        Ok(())
    }

    async fn on_retry(
        &mut self,
        session: &mut SummarySession,
        client: &SummaryClient,
    ) -> Result<()> {
        writeln!(self.out, "{}", "Retrying...".dimmed())?;
        self.out.flush()?;
        session.retry(client).await?;
        self.show(session)
    }

    fn on_toggle_theme(&mut self, session: &mut SummarySession) -> Result<()> {
        session.toggle_theme();
        self.show(session)
    }
}
