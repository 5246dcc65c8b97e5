use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::card::Card;
use crate::core::card_bit_set::{CardBitSet, CardBitSetIter};
use crate::core::errors::DeckError;

/// A deck of distinct cards. Freshly constructed it holds all 52;
/// `without` produces the deck left over once every known card has been
/// dealt out. The deck is a set, construction order carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deck {
    cards: CardBitSet,
}

impl Default for Deck {
    fn default() -> Deck {
        Deck::full()
    }
}

impl Deck {
    /// The full 52 card deck.
    pub fn full() -> Deck {
        Deck {
            cards: CardBitSet::full(),
        }
    }

    /// How many cards remain.
    pub fn len(&self) -> usize {
        self.cards.count()
    }

    /// True when no cards remain.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Is the card still in the deck?
    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(card)
    }

    /// The deck with every card in `used` removed.
    ///
    /// Errors with `DeckError::DuplicateCard` if a used card is already
    /// gone; with distinct inputs that can only mean the same card was
    /// supplied twice, so this doubles as the duplicate-input gate.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_odds::core::{Card, Deck};
    ///
    /// let ace = Card::from_code("As").unwrap();
    /// let deck = Deck::full().without([ace]).unwrap();
    /// assert_eq!(51, deck.len());
    /// assert!(!deck.contains(ace));
    /// assert!(deck.without([ace]).is_err());
    /// ```
    pub fn without<I>(&self, used: I) -> Result<Deck, DeckError>
    where
        I: IntoIterator<Item = Card>,
    {
        let mut cards = self.cards;
        for card in used {
            if !cards.contains(card) {
                return Err(DeckError::DuplicateCard(card));
            }
            cards.remove(card);
        }
        Ok(Deck { cards })
    }

    /// Draw `k` distinct cards uniformly at random, without replacement.
    /// The deck itself is unchanged; the draw is returned in deal order.
    ///
    /// Errors with `DeckError::InsufficientCards` if `k` exceeds the
    /// remaining deck size.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, k: usize) -> Result<Vec<Card>, DeckError> {
        if k > self.len() {
            return Err(DeckError::InsufficientCards {
                requested: k,
                remaining: self.len(),
            });
        }
        let mut cards: Vec<Card> = self.iter().collect();
        let (drawn, _) = cards.partial_shuffle(rng, k);
        Ok(drawn.to_vec())
    }

    /// Iterate the remaining cards.
    pub fn iter(&self) -> CardBitSetIter {
        self.cards.into_iter()
    }

    /// The underlying bit set.
    pub fn cards(&self) -> CardBitSet {
        self.cards
    }
}

impl IntoIterator for &Deck {
    type Item = Card;
    type IntoIter = CardBitSetIter;

    fn into_iter(self) -> CardBitSetIter {
        self.iter()
    }
}
