//! UI events and error modeling for the round controller.

use shared::domain::Guess;

use crate::server::ServerError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Start,
    Guess(Guess),
    Next,
    Retry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    OpenSession,
    LoadRound,
    SubmitGuess,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_server_error(context: UiErrorContext, err: &ServerError) -> Self {
        let category = match err {
            ServerError::Unreachable { .. }
            | ServerError::Transport { .. }
            | ServerError::Status { .. } => UiErrorCategory::Transport,
            ServerError::Decode { .. } | ServerError::Protocol(_) => UiErrorCategory::Validation,
            ServerError::Client(_) => UiErrorCategory::Unknown,
        };

        Self {
            category,
            context,
            message: err.to_string(),
        }
    }

    /// Short text suitable for the result line of the page.
    pub fn display_message(&self) -> String {
        let action = match self.context {
            UiErrorContext::OpenSession => "start a game session",
            UiErrorContext::LoadRound => "load the next round",
            UiErrorContext::SubmitGuess => "submit your guess",
        };
        match self.category {
            UiErrorCategory::Transport => {
                format!("Could not {action}: server unreachable. Check the connection and retry.")
            }
            UiErrorCategory::Validation => {
                format!("Could not {action}: the server sent an unexpected response.")
            }
            UiErrorCategory::Unknown => format!("Could not {action}: {}", self.message),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
