//! Game server seam and its HTTP implementation.

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::Guess,
    error::ProtocolError,
    protocol::{GuessRequest, GuessResponse, RoundResponse},
};
use thiserror::Error;
use tracing::debug;

pub const SESSION_ENDPOINT: &str = "/";
pub const NEXT_ROUND_ENDPOINT: &str = "/next_round";
pub const GUESS_ENDPOINT: &str = "/guess";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to build http client: {0}")]
    Client(#[source] reqwest::Error),
    /// The connection was never established, so the request was not delivered.
    #[error("could not connect to {endpoint}: {message}")]
    Unreachable {
        endpoint: &'static str,
        message: String,
    },
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("server returned status {status} for {endpoint}")]
    Status { endpoint: &'static str, status: u16 },
    #[error("malformed response from {endpoint}: {message}")]
    Decode {
        endpoint: &'static str,
        message: String,
    },
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl ServerError {
    /// True only when the server cannot have seen the request.
    pub fn never_delivered(&self) -> bool {
        matches!(self, ServerError::Unreachable { .. })
    }
}

/// Remote collaborator that owns image selection and scoring.
#[async_trait]
pub trait GameServer: Send + Sync {
    /// Starts a fresh server-side session, the equivalent of loading the page.
    async fn open_session(&self) -> Result<(), ServerError>;
    async fn next_round(&self) -> Result<RoundResponse, ServerError>;
    async fn submit_guess(&self, guess: Guess) -> Result<GuessResponse, ServerError>;
}

#[async_trait]
impl<T> GameServer for Arc<T>
where
    T: GameServer + ?Sized,
{
    async fn open_session(&self) -> Result<(), ServerError> {
        (**self).open_session().await
    }

    async fn next_round(&self) -> Result<RoundResponse, ServerError> {
        (**self).next_round().await
    }

    async fn submit_guess(&self, guess: Guess) -> Result<GuessResponse, ServerError> {
        (**self).submit_guess(guess).await
    }
}

/// HTTP client for the quiz server. Session state lives in a cookie, so the
/// underlying client keeps a cookie store for its whole lifetime.
#[derive(Debug, Clone)]
pub struct QuizClient {
    http: Client,
    server_url: String,
}

impl QuizClient {
    pub fn new(server_url: impl Into<String>) -> Result<Self, ServerError> {
        Self::with_timeout(server_url, None)
    }

    pub fn with_timeout(
        server_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ServerError> {
        let mut builder = Client::builder().cookie_store(true);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(ServerError::Client)?;
        let server_url = server_url.into().trim_end_matches('/').to_string();
        Ok(Self { http, server_url })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    /// Resolves a server-relative path (such as an image URL) to an absolute URL.
    pub fn resolve(&self, path: &str) -> String {
        if path.contains("://") {
            return path.to_string();
        }
        if path.starts_with('/') {
            format!("{}{path}", self.server_url)
        } else {
            format!("{}/{path}", self.server_url)
        }
    }

    fn checked(
        endpoint: &'static str,
        sent: Result<Response, reqwest::Error>,
    ) -> Result<Response, ServerError> {
        let res = sent.map_err(|source| {
            if source.is_connect() {
                ServerError::Unreachable {
                    endpoint,
                    message: source.to_string(),
                }
            } else {
                ServerError::Transport { endpoint, source }
            }
        })?;
        let status = res.status();
        if !status.is_success() {
            return Err(ServerError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }
        Ok(res)
    }

    async fn decode<T: DeserializeOwned>(
        endpoint: &'static str,
        res: Response,
    ) -> Result<T, ServerError> {
        res.json::<T>().await.map_err(|err| {
            if err.is_decode() {
                ServerError::Decode {
                    endpoint,
                    message: err.to_string(),
                }
            } else {
                ServerError::Transport {
                    endpoint,
                    source: err,
                }
            }
        })
    }
}

#[async_trait]
impl GameServer for QuizClient {
    async fn open_session(&self) -> Result<(), ServerError> {
        let sent = self
            .http
            .get(self.resolve(SESSION_ENDPOINT))
            .send()
            .await;
        Self::checked(SESSION_ENDPOINT, sent)?;
        debug!(server_url = %self.server_url, "opened quiz session");
        Ok(())
    }

    async fn next_round(&self) -> Result<RoundResponse, ServerError> {
        let sent = self
            .http
            .get(self.resolve(NEXT_ROUND_ENDPOINT))
            .send()
            .await;
        let res = Self::checked(NEXT_ROUND_ENDPOINT, sent)?;
        Self::decode(NEXT_ROUND_ENDPOINT, res).await
    }

    async fn submit_guess(&self, guess: Guess) -> Result<GuessResponse, ServerError> {
        let sent = self
            .http
            .post(self.resolve(GUESS_ENDPOINT))
            .json(&GuessRequest { guess })
            .send()
            .await;
        let res = Self::checked(GUESS_ENDPOINT, sent)?;
        Self::decode(GUESS_ENDPOINT, res).await
    }
}

#[cfg(test)]
#[path = "tests/server_tests.rs"]
mod tests;
