//! Maps typed terminal commands onto controller events.

use client_core::UiEvent;
use shared::domain::Guess;
use thiserror::Error;

pub const HELP: &str =
    "commands: start | real (r) | fake (f) | next (n) | retry | help | quit (q)";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Help,
    Quit,
    Nothing,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown command `{0}`; type `help` for the list")]
pub struct UnknownCommand(pub String);

pub fn parse_command(line: &str) -> Result<Command, UnknownCommand> {
    let command = match line.trim().to_ascii_lowercase().as_str() {
        "" => Command::Nothing,
        "start" | "s" => Command::Event(UiEvent::Start),
        "real" | "r" => Command::Event(UiEvent::Guess(Guess::Real)),
        "fake" | "f" => Command::Event(UiEvent::Guess(Guess::Fake)),
        "next" | "n" => Command::Event(UiEvent::Next),
        "retry" => Command::Event(UiEvent::Retry),
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        other => return Err(UnknownCommand(other.to_string())),
    };
    Ok(command)
}
