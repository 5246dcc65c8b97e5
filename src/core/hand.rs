use std::fmt;

use crate::core::card::Card;
use crate::core::errors::{CardParseError, HandParseError};

/// A player's private hole cards: either two known cards, or unknown and
/// left for the simulator to deal.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HoleCards {
    /// Dealt randomly during simulation.
    Unknown,
    /// Both cards known.
    Known(Card, Card),
}

impl HoleCards {
    /// Parse a hole-card string: four characters of card codes, or an
    /// empty string for an unknown hand.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_odds::core::HoleCards;
    ///
    /// assert_eq!(HoleCards::Unknown, HoleCards::from_code("").unwrap());
    /// assert!(HoleCards::from_code("AsKh").unwrap().known().is_some());
    /// assert!(HoleCards::from_code("AsK").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<HoleCards, HandParseError> {
        if code.is_empty() {
            return Ok(HoleCards::Unknown);
        }
        let chars: Vec<char> = code.chars().collect();
        if chars.len() != 4 {
            return Err(HandParseError::InvalidHoleCards(code.to_string()));
        }
        let first = Card::from_chars(chars[0], chars[1])?;
        let second = Card::from_chars(chars[2], chars[3])?;
        Ok(HoleCards::Known(first, second))
    }

    /// True when the hand is to be dealt by the simulator.
    pub fn is_unknown(&self) -> bool {
        matches!(self, HoleCards::Unknown)
    }

    /// The two cards if known.
    pub fn known(&self) -> Option<[Card; 2]> {
        match self {
            HoleCards::Unknown => None,
            HoleCards::Known(first, second) => Some([*first, *second]),
        }
    }
}

/// The betting round a board size corresponds to.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

/// Community cards: 0, 3, 4, or 5 of them depending on street.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// The empty preflop board.
    pub fn empty() -> Board {
        Board { cards: Vec::new() }
    }

    /// Build a board, enforcing a legal street size.
    pub fn new(cards: Vec<Card>) -> Result<Board, HandParseError> {
        match cards.len() {
            0 | 3 | 4 | 5 => Ok(Board { cards }),
            n => Err(HandParseError::InvalidBoardSize(n)),
        }
    }

    /// Parse a concatenation of card codes: `""`, 3, 4, or 5 codes.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_odds::core::{Board, Street};
    ///
    /// let board = Board::from_code("2d7cTc").unwrap();
    /// assert_eq!(3, board.len());
    /// assert_eq!(Street::Flop, board.street());
    /// assert!(Board::from_code("2d7c").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Board, HandParseError> {
        let chars: Vec<char> = code.chars().collect();
        let mut cards = Vec::with_capacity(chars.len() / 2);
        let mut pairs = chars.chunks_exact(2);
        for pair in &mut pairs {
            cards.push(Card::from_chars(pair[0], pair[1])?);
        }
        let remainder = pairs.remainder();
        if !remainder.is_empty() {
            let dangling: String = remainder.iter().collect();
            return Err(CardParseError::InvalidLength(dangling).into());
        }
        Board::new(cards)
    }

    /// The community cards, in the order given.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// How many community cards are down.
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True preflop.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Which street this board size belongs to.
    pub fn street(&self) -> Street {
        match self.cards.len() {
            0 => Street::Preflop,
            3 => Street::Flop,
            4 => Street::Turn,
            // Board construction only admits 0/3/4/5.
            _ => Street::River,
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for card in &self.cards {
            write!(f, "{}", card)?;
        }
        Ok(())
    }
}
