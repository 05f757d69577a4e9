use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

macro_rules! count_newtype {
    ($name:ident) => {
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

count_newtype!(RoundNumber);
count_newtype!(Score);

/// The two classifications a player can submit for an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Guess {
    Real,
    Fake,
}

impl Guess {
    pub const ALL: [Guess; 2] = [Guess::Real, Guess::Fake];

    pub fn as_str(self) -> &'static str {
        match self {
            Guess::Real => "real",
            Guess::Fake => "fake",
        }
    }
}

impl fmt::Display for Guess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Guess {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "real" => Ok(Guess::Real),
            "fake" => Ok(Guess::Fake),
            other => Err(ProtocolError::UnknownGuess(other.to_string())),
        }
    }
}
