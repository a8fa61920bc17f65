use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    load_settings,
    render::{render_container, render_plain, ResponseView},
    HttpProcessApi, SubmissionController,
};
use shared::domain::{DisplayState, SelectedFile};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "triage", about = "Classify an email and get a suggested reply")]
struct Cli {
    /// Overrides triage.toml and TRIAGE_API_URL / APP__API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send a .txt/.pdf file or a block of text for classification.
    Submit(SubmitArgs),
    /// Check that the API answers on its health route.
    Health,
}

#[derive(Args, Debug)]
struct SubmitArgs {
    #[arg(long, conflicts_with = "text")]
    file: Option<PathBuf>,
    #[arg(long)]
    text: Option<String>,
    /// Print the response container markup instead of plain text.
    #[arg(long)]
    html: bool,
}

struct TerminalView {
    html: bool,
}

impl ResponseView for TerminalView {
    fn show(&mut self, state: &DisplayState) {
        match state {
            DisplayState::Hidden => {}
            DisplayState::Loading => eprintln!("{}", render_plain(state)),
            _ if self.html => println!("{}", render_container(state)),
            DisplayState::Result(_) => println!("{}", render_plain(state)),
            DisplayState::Error(_) => eprintln!("{}", render_plain(state)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let settings = load_settings().with_api_url(cli.api_url);
    let api = HttpProcessApi::from_settings(&settings)?;

    match cli.command {
        Command::Health => {
            let health = api.health().await?;
            println!("{}: {}", api.health_url()?, health.status);
        }
        Command::Submit(args) => {
            let mut controller = SubmissionController::new(api);
            if let Some(text) = args.text {
                controller.on_text_input(text);
            }
            if let Some(path) = args.file {
                controller.on_file_change(Some(SelectedFile::from_path(path)));
            }

            let mut view = TerminalView { html: args.html };
            if let DisplayState::Error(message) = controller.on_submit(&mut view).await {
                tracing::debug!(%message, "submission ended in error state");
                bail!("submission was not classified");
            }
        }
    }

    Ok(())
}
