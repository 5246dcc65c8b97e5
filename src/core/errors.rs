use thiserror::Error;

use crate::core::card::Card;

/// Errors from parsing a single two-character card code.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CardParseError {
    #[error("card codes are two characters, got {0:?}")]
    InvalidLength(String),

    #[error("invalid rank character {0:?}, expected one of 23456789TJQKA")]
    InvalidRankChar(char),

    #[error("invalid suit character {0:?}, expected one of shdc")]
    InvalidSuitChar(char),
}

/// Errors from parsing hole-card or board strings.
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum HandParseError {
    #[error(transparent)]
    Card(#[from] CardParseError),

    #[error("hole cards are two card codes or an empty string, got {0:?}")]
    InvalidHoleCards(String),

    #[error("a board holds 0, 3, 4, or 5 cards, got {0}")]
    InvalidBoardSize(usize),
}

/// Errors from deck bookkeeping.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum DeckError {
    #[error("duplicate card {0} in the fixed inputs")]
    DuplicateCard(Card),

    #[error("tried to draw {requested} cards with only {remaining} remaining")]
    InsufficientCards { requested: usize, remaining: usize },
}

/// Errors from hand evaluation.
#[derive(Error, Debug, PartialEq, Eq, Clone, Copy)]
pub enum RankError {
    #[error("hand evaluation needs 5 cards (up to 7 for best-of), got {0}")]
    InvalidHandSize(usize),
}
