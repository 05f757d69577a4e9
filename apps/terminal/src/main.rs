use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{QuizClient, RoundController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

mod config;
mod input;
mod terminal_view;

use config::{load_settings, normalize_server_url};
use input::{parse_command, Command, HELP};
use terminal_view::TerminalView;

#[derive(Parser, Debug)]
#[command(name = "quiz-terminal", about = "Play the real-or-fake flower quiz from a terminal")]
struct Args {
    /// Base URL of the quiz server.
    #[arg(long)]
    server_url: Option<String>,
    /// TOML settings file; `quiz.toml` is read when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    rounds: Option<u32>,
    /// Keep failed requests silent instead of offering a retry.
    #[arg(long)]
    no_retry: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(server_url) = args.server_url {
        settings.server_url = normalize_server_url(&server_url);
    }
    if let Some(rounds) = args.rounds {
        settings.total_rounds = rounds;
    }
    if args.no_retry {
        settings.surface_errors = false;
    }

    let client = QuizClient::with_timeout(&settings.server_url, settings.request_timeout())
        .context("failed to create quiz client")?;

    let view = TerminalView::new(client.clone(), io::stdout());
    let mut controller = RoundController::bind(client, view, settings.controller_options())
        .context("failed to bind quiz page")?;

    info!(server_url = %settings.server_url, "ready; type `start` to play");
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !controller.is_over() {
        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            break;
        };
        match parse_command(&line) {
            Ok(Command::Event(event)) => controller.dispatch(event).await,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Quit) => break,
            Ok(Command::Nothing) => {}
            Err(err) => println!("{err}"),
        }
    }

    info!(
        score = controller.score().0,
        rounds = controller.current_round().0,
        "session ended"
    );
    Ok(())
}
