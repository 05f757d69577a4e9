use serde::{Deserialize, Serialize};

use crate::{
    domain::{Guess, RoundNumber, Score},
    error::ProtocolError,
};

/// Body of `GET /next_round`.
///
/// The server answers with `{round, img_url}` while rounds remain and with
/// `{game_over: true, score, total}` once the session is exhausted, so every
/// field except `game_over` is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<RoundNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_url: Option<String>,
    #[serde(default)]
    pub game_over: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<Score>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundOutcome {
    Next { round: RoundNumber, img_url: String },
    GameOver { score: Score, total: u32 },
}

impl RoundResponse {
    pub fn next(round: u32, img_url: impl Into<String>) -> Self {
        Self {
            round: Some(RoundNumber(round)),
            img_url: Some(img_url.into()),
            ..Self::default()
        }
    }

    pub fn game_over(score: u32, total: u32) -> Self {
        Self {
            game_over: true,
            score: Some(Score(score)),
            total: Some(total),
            ..Self::default()
        }
    }

    pub fn outcome(&self) -> Result<RoundOutcome, ProtocolError> {
        if self.game_over {
            let score = self.score.ok_or(ProtocolError::missing("score"))?;
            let total = self.total.ok_or(ProtocolError::missing("total"))?;
            return Ok(RoundOutcome::GameOver { score, total });
        }

        let round = self.round.ok_or(ProtocolError::missing("round"))?;
        let img_url = self
            .img_url
            .clone()
            .ok_or(ProtocolError::missing("img_url"))?;
        Ok(RoundOutcome::Next { round, img_url })
    }
}

/// Body of `POST /guess`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessRequest {
    pub guess: Guess,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessResponse {
    pub result: String,
    pub score: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
}
