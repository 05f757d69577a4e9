//! Round controller: owns one play session and drives the view from server responses.

use std::time::Duration;

use chrono::Utc;
use shared::{
    domain::{Guess, RoundNumber, Score},
    protocol::RoundOutcome,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::{
    events::{UiError, UiErrorContext, UiEvent},
    server::{GameServer, ServerError},
    view::{ElementId, GameView},
};

pub const DEFAULT_TOTAL_ROUNDS: u32 = 10;
pub const GAME_OVER_DELAY: Duration = Duration::from_millis(2000);
pub const NEXT_LABEL: &str = "Next Round";
pub const RETRY_LABEL: &str = "Retry";

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("required element `{0}` is missing from the page")]
    MissingElement(ElementId),
    #[error("total rounds must be at least 1")]
    NoRounds,
}

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub total_rounds: u32,
    pub game_over_delay: Duration,
    /// Show failures on the page with a retry control. When off, a failed
    /// request only gets logged and the page stays as it was.
    pub surface_errors: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            total_rounds: DEFAULT_TOTAL_ROUNDS,
            game_over_delay: GAME_OVER_DELAY,
            surface_errors: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryAction {
    OpenSession,
    LoadRound,
    SubmitGuess(Guess),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    AwaitingGuess,
    AwaitingNext,
    GameOver,
    Failed(RetryAction),
    /// A request failed while errors are not surfaced; nothing moves on.
    Stalled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessDisposition {
    Submitted,
    Ignored,
}

pub fn cache_busted(img_url: &str, token: i64) -> String {
    format!("{img_url}?{token}")
}

fn unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub struct RoundController<S, V> {
    server: S,
    view: V,
    options: ControllerOptions,
    current_round: RoundNumber,
    score: Score,
    phase: Phase,
    guess_enabled: bool,
    last_error: Option<UiError>,
    cache_token: fn() -> i64,
}

impl<S: GameServer, V: GameView> RoundController<S, V> {
    /// Checks that every element the controller writes to exists, then puts
    /// the guess controls into their pre-game state.
    pub fn bind(
        server: S,
        mut view: V,
        options: ControllerOptions,
    ) -> Result<Self, ControllerError> {
        if options.total_rounds == 0 {
            return Err(ControllerError::NoRounds);
        }
        if let Some(missing) = ElementId::ALL.into_iter().find(|id| !view.has_element(*id)) {
            return Err(ControllerError::MissingElement(missing));
        }

        view.set_visible(ElementId::NextButton, false);
        let mut controller = Self {
            server,
            view,
            options,
            current_round: RoundNumber(0),
            score: Score(0),
            phase: Phase::NotStarted,
            guess_enabled: true,
            last_error: None,
            cache_token: unix_millis,
        };
        controller.set_guess_enabled(false);
        Ok(controller)
    }

    pub fn with_cache_token(mut self, cache_token: fn() -> i64) -> Self {
        self.cache_token = cache_token;
        self
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_round(&self) -> RoundNumber {
        self.current_round
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn total_rounds(&self) -> u32 {
        self.options.total_rounds
    }

    pub fn guess_enabled(&self) -> bool {
        self.guess_enabled
    }

    pub fn last_error(&self) -> Option<&UiError> {
        self.last_error.as_ref()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub async fn dispatch(&mut self, event: UiEvent) {
        match event {
            UiEvent::Start => self.start().await,
            UiEvent::Guess(guess) => {
                self.handle_guess(guess).await;
            }
            UiEvent::Next if matches!(self.phase, Phase::Failed(_)) => self.retry().await,
            UiEvent::Next => self.advance().await,
            UiEvent::Retry => self.retry().await,
        }
    }

    pub async fn start(&mut self) {
        if self.phase != Phase::NotStarted {
            debug!(phase = ?self.phase, "ignoring start outside of a fresh session");
            return;
        }
        self.view.set_visible(ElementId::StartButton, false);
        self.view.set_visible(ElementId::Instructions, false);
        self.view.set_visible(ElementId::GameArea, true);
        info!(total_rounds = self.options.total_rounds, "quiz started");
        self.open_session().await;
    }

    /// Resets the server-side session, then loads its first round.
    async fn open_session(&mut self) {
        if let Err(err) = self.server.open_session().await {
            self.fail(UiErrorContext::OpenSession, RetryAction::OpenSession, err);
            return;
        }
        self.load_next_round().await;
    }

    pub async fn load_next_round(&mut self) {
        let outcome = match self.server.next_round().await {
            Ok(response) => response.outcome().map_err(ServerError::from),
            Err(err) => Err(err),
        };

        match outcome {
            Ok(RoundOutcome::GameOver { score, total }) => {
                info!(score = score.0, total, "server reported end of session");
                self.set_guess_enabled(false);
                self.view
                    .replace_game_area(&format!("Game Over! Final Score: {score} / {total}"));
                self.phase = Phase::GameOver;
            }
            Ok(RoundOutcome::Next { round, img_url }) => {
                let total = self.options.total_rounds;
                let round = if round.0 > total {
                    warn!(round = round.0, total, "server round exceeds total; clamping");
                    RoundNumber(total)
                } else {
                    round
                };
                self.current_round = round;
                self.view
                    .set_text(ElementId::RoundInfo, &format!("Round {round} of {total}"));
                let src = cache_busted(&img_url, (self.cache_token)());
                self.view.set_image_source(ElementId::FlowerImage, &src);
                self.set_guess_enabled(true);
                self.last_error = None;
                self.phase = Phase::AwaitingGuess;
                info!(round = round.0, img_url = %img_url, "round loaded");
            }
            Err(err) => self.fail(UiErrorContext::LoadRound, RetryAction::LoadRound, err),
        }
    }

    /// Submits a guess for the current round. Guess controls are disabled before
    /// the request goes out and only a round transition enables them again.
    pub async fn handle_guess(&mut self, guess: Guess) -> GuessDisposition {
        if !self.guess_enabled {
            debug!(%guess, phase = ?self.phase, "guess controls disabled; ignoring guess");
            return GuessDisposition::Ignored;
        }
        self.set_guess_enabled(false);
        self.submit_guess(guess).await;
        GuessDisposition::Submitted
    }

    async fn submit_guess(&mut self, guess: Guess) {
        let response = match self.server.submit_guess(guess).await {
            Ok(response) => response,
            Err(err) => {
                // The server scores a guess as soon as it arrives, so only a
                // request that never left may be sent again.
                let action = if err.never_delivered() {
                    RetryAction::SubmitGuess(guess)
                } else {
                    RetryAction::LoadRound
                };
                self.fail(UiErrorContext::SubmitGuess, action, err);
                return;
            }
        };

        let total = self.options.total_rounds;
        self.last_error = None;
        self.view.set_text(ElementId::Result, &response.result);
        self.score = response.score;
        self.view
            .set_text(ElementId::Score, &format!("Score: {} / {total}", self.score));
        info!(
            round = self.current_round.0,
            %guess,
            correct = ?response.correct,
            score = self.score.0,
            "guess scored"
        );

        if self.current_round.0 < total {
            self.view.set_text(ElementId::NextButton, NEXT_LABEL);
            self.view.set_visible(ElementId::NextButton, true);
            self.phase = Phase::AwaitingNext;
            return;
        }

        self.view.set_visible(ElementId::NextButton, false);
        tokio::time::sleep(self.options.game_over_delay).await;
        self.view.replace_game_area(&format!(
            "Game Over! Final Score: {} / {total}",
            self.score
        ));
        self.phase = Phase::GameOver;
        info!(score = self.score.0, total, "quiz finished");
    }

    pub async fn advance(&mut self) {
        if self.phase != Phase::AwaitingNext {
            debug!(phase = ?self.phase, "no round to advance to");
            return;
        }
        self.view.set_visible(ElementId::NextButton, false);
        self.set_guess_enabled(true);
        self.view.set_text(ElementId::Result, "");
        self.load_next_round().await;
    }

    pub async fn retry(&mut self) {
        let Phase::Failed(action) = self.phase else {
            debug!(phase = ?self.phase, "nothing to retry");
            return;
        };
        self.view.set_visible(ElementId::NextButton, false);
        self.view.set_text(ElementId::Result, "");
        info!(?action, "retrying failed request");
        match action {
            RetryAction::OpenSession => self.open_session().await,
            RetryAction::LoadRound => self.load_next_round().await,
            RetryAction::SubmitGuess(guess) => self.submit_guess(guess).await,
        }
    }

    fn fail(&mut self, context: UiErrorContext, action: RetryAction, err: ServerError) {
        let ui_error = UiError::from_server_error(context, &err);
        warn!(
            ?context,
            category = ?ui_error.category(),
            error = %err,
            "game server request failed"
        );

        if self.options.surface_errors {
            self.set_guess_enabled(false);
            self.view
                .set_text(ElementId::Result, &ui_error.display_message());
            self.view.show_retry(RETRY_LABEL);
            self.phase = Phase::Failed(action);
        } else {
            self.phase = Phase::Stalled;
        }
        self.last_error = Some(ui_error);
    }

    fn set_guess_enabled(&mut self, enabled: bool) {
        for guess in Guess::ALL {
            self.view.set_enabled(ElementId::guess_button(guess), enabled);
        }
        self.guess_enabled = enabled;
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
