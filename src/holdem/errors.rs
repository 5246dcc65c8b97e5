use thiserror::Error;

use crate::core::{DeckError, HandParseError};

/// Errors surfaced by the equity simulator and outs analyzer. Everything
/// here is detected while validating inputs; once trials start nothing
/// can fail.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum SimulationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Parse(#[from] HandParseError),

    #[error(transparent)]
    Deck(#[from] DeckError),
}
