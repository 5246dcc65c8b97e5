use std::fmt;

use crate::core::errors::CardParseError;

/// Card face value. Values are ordinal, with Ace high.
///
/// The one exception to "Ace high" is the wheel straight (A-2-3-4-5),
/// which the evaluator handles by reporting Five as the high card.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Value {
    /// 2
    Two = 0,
    /// 3
    Three = 1,
    /// 4
    Four = 2,
    /// 5
    Five = 3,
    /// 6
    Six = 4,
    /// 7
    Seven = 5,
    /// 8
    Eight = 6,
    /// 9
    Nine = 7,
    /// T
    Ten = 8,
    /// J
    Jack = 9,
    /// Q
    Queen = 10,
    /// K
    King = 11,
    /// A
    Ace = 12,
}

/// Constant of all the values, in ascending order.
const VALUES: [Value; 13] = [
    Value::Two,
    Value::Three,
    Value::Four,
    Value::Five,
    Value::Six,
    Value::Seven,
    Value::Eight,
    Value::Nine,
    Value::Ten,
    Value::Jack,
    Value::Queen,
    Value::King,
    Value::Ace,
];

impl Value {
    /// How many face values there are.
    pub const COUNT: usize = 13;

    /// Every value, ascending.
    pub const fn values() -> [Value; 13] {
        VALUES
    }

    /// Parse a rank character. Case-insensitive.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_odds::core::Value;
    ///
    /// assert_eq!(Some(Value::Ace), Value::from_char('A'));
    /// assert_eq!(Some(Value::Ten), Value::from_char('t'));
    /// assert_eq!(None, Value::from_char('1'));
    /// ```
    pub fn from_char(c: char) -> Option<Value> {
        match c.to_ascii_uppercase() {
            '2' => Some(Value::Two),
            '3' => Some(Value::Three),
            '4' => Some(Value::Four),
            '5' => Some(Value::Five),
            '6' => Some(Value::Six),
            '7' => Some(Value::Seven),
            '8' => Some(Value::Eight),
            '9' => Some(Value::Nine),
            'T' => Some(Value::Ten),
            'J' => Some(Value::Jack),
            'Q' => Some(Value::Queen),
            'K' => Some(Value::King),
            'A' => Some(Value::Ace),
            _ => None,
        }
    }

    /// The canonical (uppercase) rank character.
    pub fn to_char(self) -> char {
        match self {
            Value::Two => '2',
            Value::Three => '3',
            Value::Four => '4',
            Value::Five => '5',
            Value::Six => '6',
            Value::Seven => '7',
            Value::Eight => '8',
            Value::Nine => '9',
            Value::Ten => 'T',
            Value::Jack => 'J',
            Value::Queen => 'Q',
            Value::King => 'K',
            Value::Ace => 'A',
        }
    }
}

/// Card suit. Purely nominal, no suit outranks another.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Suit {
    /// c
    Club = 0,
    /// d
    Diamond = 1,
    /// h
    Heart = 2,
    /// s
    Spade = 3,
}

const SUITS: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

impl Suit {
    /// How many suits there are.
    pub const COUNT: usize = 4;

    /// Every suit.
    pub const fn suits() -> [Suit; 4] {
        SUITS
    }

    /// Parse a suit character. Case-insensitive.
    pub fn from_char(c: char) -> Option<Suit> {
        match c.to_ascii_lowercase() {
            'c' => Some(Suit::Club),
            'd' => Some(Suit::Diamond),
            'h' => Some(Suit::Heart),
            's' => Some(Suit::Spade),
            _ => None,
        }
    }

    /// The canonical (lowercase) suit character.
    pub fn to_char(self) -> char {
        match self {
            Suit::Club => 'c',
            Suit::Diamond => 'd',
            Suit::Heart => 'h',
            Suit::Spade => 's',
        }
    }
}

/// A playing card: one value, one suit. Equality and hashing are
/// structural, there is no card identity beyond the pair.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    /// The face value.
    pub value: Value,
    /// The suit.
    pub suit: Suit,
}

impl Card {
    /// Create a card from its parts.
    pub fn new(value: Value, suit: Suit) -> Card {
        Card { value, suit }
    }

    /// Parse a two-character card code such as `As` or `kH`.
    /// Case-insensitive in both positions.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_odds::core::{Card, Suit, Value};
    ///
    /// let card = Card::from_code("As").unwrap();
    /// assert_eq!(Card::new(Value::Ace, Suit::Spade), card);
    /// // Input case doesn't matter, output is canonical.
    /// assert_eq!("As", Card::from_code("aS").unwrap().code());
    /// assert!(Card::from_code("Ax").is_err());
    /// ```
    pub fn from_code(code: &str) -> Result<Card, CardParseError> {
        let mut chars = code.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(value), Some(suit), None) => Card::from_chars(value, suit),
            _ => Err(CardParseError::InvalidLength(code.to_string())),
        }
    }

    /// Parse a card from its rank and suit characters.
    pub fn from_chars(value: char, suit: char) -> Result<Card, CardParseError> {
        let value = Value::from_char(value).ok_or(CardParseError::InvalidRankChar(value))?;
        let suit = Suit::from_char(suit).ok_or(CardParseError::InvalidSuitChar(suit))?;
        Ok(Card { value, suit })
    }

    /// The canonical code: uppercase rank character, lowercase suit
    /// character.
    pub fn code(&self) -> String {
        let mut code = String::with_capacity(2);
        code.push(self.value.to_char());
        code.push(self.suit.to_char());
        code
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value.to_char(), self.suit.to_char())
    }
}

/// Dense 0..52 index used by `CardBitSet` and the deck.
impl From<Card> for u8 {
    fn from(card: Card) -> u8 {
        (card.suit as u8) * (Value::COUNT as u8) + (card.value as u8)
    }
}

/// Inverse of the dense index. Only defined for offsets below 52.
impl From<u8> for Card {
    fn from(offset: u8) -> Card {
        let suit = SUITS[(offset / Value::COUNT as u8) as usize];
        let value = VALUES[(offset % Value::COUNT as u8) as usize];
        Card { value, suit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_codes_round_trip() {
        for suit in Suit::suits() {
            for value in Value::values() {
                let card = Card::new(value, suit);
                assert_eq!(card, Card::from_code(&card.code()).unwrap());
            }
        }
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(
            Card::from_code("td").unwrap(),
            Card::from_code("TD").unwrap()
        );
        assert_eq!("Td", Card::from_code("tD").unwrap().code());
    }

    #[test]
    fn test_parse_invalid_rank() {
        assert_eq!(
            Err(CardParseError::InvalidRankChar('1')),
            Card::from_code("1s")
        );
    }

    #[test]
    fn test_parse_invalid_suit() {
        assert_eq!(
            Err(CardParseError::InvalidSuitChar('x')),
            Card::from_code("Ax")
        );
    }

    #[test]
    fn test_parse_invalid_length() {
        assert_eq!(
            Err(CardParseError::InvalidLength("Asd".to_string())),
            Card::from_code("Asd")
        );
        assert_eq!(
            Err(CardParseError::InvalidLength("A".to_string())),
            Card::from_code("A")
        );
        assert_eq!(
            Err(CardParseError::InvalidLength(String::new())),
            Card::from_code("")
        );
    }

    #[test]
    fn test_value_ordering() {
        assert!(Value::Ace > Value::King);
        assert!(Value::Three > Value::Two);
        assert!(Value::Ten < Value::Jack);
    }

    #[test]
    fn test_offset_round_trip() {
        for offset in 0..52u8 {
            assert_eq!(offset, u8::from(Card::from(offset)));
        }
    }

    #[test]
    fn test_display_is_code() {
        let card = Card::from_code("Qh").unwrap();
        assert_eq!("Qh", format!("{}", card));
    }
}
