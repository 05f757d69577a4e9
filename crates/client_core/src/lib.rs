//! Client-side game loop for the real-or-fake flower quiz.
//!
//! [`RoundController`] owns one play session. It talks to the quiz server
//! through [`GameServer`] and renders through [`GameView`], so the control
//! logic runs the same against a terminal, a browser binding or a test page.

pub mod controller;
pub mod events;
pub mod server;
pub mod view;

pub use controller::{
    cache_busted, ControllerError, ControllerOptions, GuessDisposition, Phase, RetryAction,
    RoundController, DEFAULT_TOTAL_ROUNDS, GAME_OVER_DELAY,
};
pub use events::{UiError, UiErrorCategory, UiErrorContext, UiEvent};
pub use server::{GameServer, QuizClient, ServerError};
pub use view::{ElementId, GameView, PageView};
