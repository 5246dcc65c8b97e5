use crate::core::card::{Card, Value};
use crate::core::card_iter::CardIter;
use crate::core::errors::RankError;

/// The strength of a five card hand.
///
/// Variants are in ascending category order, so the derived `Ord` compares
/// category first. Within a category the `u32` payload encodes the
/// tie-break values as rank bit sets; comparing payloads numerically is
/// the same as comparing the tie-break vectors lexicographically.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash)]
pub enum HandRank {
    /// No matches. Payload: bit set of all five ranks.
    HighCard(u32),
    /// One card matches another. Payload: pair bits above kicker bits.
    OnePair(u32),
    /// Two different pairs. Payload: both pair bits above the kicker bit.
    TwoPair(u32),
    /// Three of the same value. Payload: trip bits above kicker bits.
    ThreeOfAKind(u32),
    /// Five consecutive values. Payload: high card value, Five for the
    /// wheel.
    Straight(u32),
    /// Five cards of one suit. Payload: bit set of all five ranks.
    Flush(u32),
    /// Three of one value and two of another. Payload: trip bits above
    /// pair bits.
    FullHouse(u32),
    /// Four of the same value. Payload: quad bits above the kicker bit.
    FourOfAKind(u32),
    /// A straight, all in one suit. Payload: high card value.
    StraightFlush(u32),
    /// The ten-through-ace straight flush. No payload, the high card is
    /// always Ace.
    RoyalFlush,
}

impl HandRank {
    /// The category tier, 1 (high card) through 10 (royal flush).
    pub fn tier(self) -> u8 {
        match self {
            HandRank::HighCard(_) => 1,
            HandRank::OnePair(_) => 2,
            HandRank::TwoPair(_) => 3,
            HandRank::ThreeOfAKind(_) => 4,
            HandRank::Straight(_) => 5,
            HandRank::Flush(_) => 6,
            HandRank::FullHouse(_) => 7,
            HandRank::FourOfAKind(_) => 8,
            HandRank::StraightFlush(_) => 9,
            HandRank::RoyalFlush => 10,
        }
    }
}

/// Bit mask for the wheel (Ace, two, three, four, five).
const WHEEL: u32 = 0b1_0000_0000_1111;

/// Find the high card of a straight in a rank bit set, if there is one.
/// The wheel reports Five, not Ace. With fewer than five distinct ranks
/// no five-bit run (and no wheel) can exist, so calling this on a paired
/// hand safely returns None.
fn straight_high(value_set: u32) -> Option<u32> {
    // A bit survives the chained ands only if the four bits below it are
    // also set, i.e. it is the top of a five card run.
    let run = value_set & (value_set << 1) & (value_set << 2) & (value_set << 3) & (value_set << 4);
    if run != 0 {
        Some(31 - run.leading_zeros())
    } else if value_set & WHEEL == WHEEL {
        Some(Value::Five as u32)
    } else {
        None
    }
}

/// Rank exactly five cards.
///
/// # Examples
///
/// ```
/// use holdem_odds::core::{evaluate, Card, HandRank};
///
/// let cards: Vec<Card> = ["Ah", "Kh", "Qh", "Jh", "Th"]
///     .iter()
///     .map(|code| Card::from_code(code).unwrap())
///     .collect();
/// let rank = evaluate(&cards).unwrap();
/// assert_eq!(HandRank::RoyalFlush, rank);
/// assert_eq!(10, rank.tier());
/// ```
pub fn evaluate(cards: &[Card]) -> Result<HandRank, RankError> {
    if cards.len() != 5 {
        return Err(RankError::InvalidHandSize(cards.len()));
    }
    Ok(rank_five(cards))
}

/// Rank five cards. Callers guarantee the length.
fn rank_five(cards: &[Card]) -> HandRank {
    let mut value_set: u32 = 0;
    let mut suit_set: u32 = 0;
    let mut value_to_count = [0u8; Value::COUNT];
    for card in cards {
        value_set |= 1 << (card.value as u32);
        suit_set |= 1 << (card.suit as u32);
        value_to_count[card.value as usize] += 1;
    }

    // Rotate into count => bit set of values with that count.
    let mut count_to_value = [0u32; 5];
    for (value, &count) in value_to_count.iter().enumerate() {
        count_to_value[count as usize] |= 1 << value;
    }

    let straight = straight_high(value_set);

    // A five card flush excludes every paired category, so the flush
    // branch settles straight flushes and plain flushes in one place.
    if suit_set.count_ones() == 1 {
        return match straight {
            Some(high) if high == Value::Ace as u32 => HandRank::RoyalFlush,
            Some(high) => HandRank::StraightFlush(high),
            None => HandRank::Flush(value_set),
        };
    }

    let quads = count_to_value[4];
    if quads != 0 {
        let kicker = value_set ^ quads;
        return HandRank::FourOfAKind((quads << 13) | kicker);
    }

    let trips = count_to_value[3];
    let pairs = count_to_value[2];
    if trips != 0 && pairs != 0 {
        return HandRank::FullHouse((trips << 13) | pairs);
    }
    if let Some(high) = straight {
        return HandRank::Straight(high);
    }
    if trips != 0 {
        let kickers = value_set ^ trips;
        return HandRank::ThreeOfAKind((trips << 13) | kickers);
    }
    match pairs.count_ones() {
        2 => {
            let kicker = value_set ^ pairs;
            HandRank::TwoPair((pairs << 13) | kicker)
        }
        1 => {
            let kickers = value_set ^ pairs;
            HandRank::OnePair((pairs << 13) | kickers)
        }
        _ => HandRank::HighCard(value_set),
    }
}

/// Rank the best five card hand that can be made from 5 to 7 cards, by
/// evaluating every five card subset and keeping the maximum. Five cards
/// degenerate to a single evaluation.
///
/// # Examples
///
/// ```
/// use holdem_odds::core::{best_of, Card, HandRank};
///
/// // Two hole cards plus a full board.
/// let cards: Vec<Card> = ["9h", "8h", "7h", "6h", "5h", "Ad", "Ac"]
///     .iter()
///     .map(|code| Card::from_code(code).unwrap())
///     .collect();
/// assert!(matches!(best_of(&cards).unwrap(), HandRank::StraightFlush(_)));
/// ```
pub fn best_of(cards: &[Card]) -> Result<HandRank, RankError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(RankError::InvalidHandSize(cards.len()));
    }
    Ok(best_rank(cards))
}

/// Best five card rank of a 5..=7 card slice. Callers guarantee the
/// length.
pub(crate) fn best_rank(cards: &[Card]) -> HandRank {
    if cards.len() == 5 {
        return rank_five(cards);
    }
    let mut best = HandRank::HighCard(0);
    for combo in CardIter::new(cards, 5) {
        best = best.max(rank_five(&combo));
    }
    best
}
