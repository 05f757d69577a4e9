use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("malformed round response: missing `{field}`")]
    MissingField { field: &'static str },
    #[error("invalid guess `{0}`; expected `real` or `fake`")]
    UnknownGuess(String),
}

impl ProtocolError {
    pub fn missing(field: &'static str) -> Self {
        Self::MissingField { field }
    }
}
