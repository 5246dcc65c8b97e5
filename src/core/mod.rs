/// Module with all the card value types and code parsing.
mod card;
/// Export `Card`, `Suit`, and `Value`
pub use self::card::{Card, Suit, Value};

/// Module for the 52-bit card set the deck and simulator share.
mod card_bit_set;
/// Export `CardBitSet` and its iterator
pub use self::card_bit_set::{CardBitSet, CardBitSetIter};

/// Module that lazily enumerates k-card combinations.
mod card_iter;
/// Export `CardIter`
pub use self::card_iter::CardIter;

/// Module for the deck: full construction, removal, uniform sampling.
mod deck;
/// Export `Deck`
pub use self::deck::Deck;

/// Module with the parse, deck, and evaluation error types.
mod errors;
/// Export the error enums
pub use self::errors::{CardParseError, DeckError, HandParseError, RankError};

/// Module for hole cards, boards, and streets.
mod hand;
/// Export `Board`, `HoleCards`, and `Street`
pub use self::hand::{Board, HoleCards, Street};

/// Module ranking five card hands and picking the best five of seven.
mod rank;
/// Export `HandRank` and the evaluation entry points
pub use self::rank::{best_of, evaluate, HandRank};
pub(crate) use self::rank::best_rank;
