use crate::core::card::Card;

/// Lazy enumerator of every k-card combination of a card slice, driven by
/// a vector of index offsets. Restartable by constructing a fresh one;
/// the main consumer is best-5-of-7 hand selection.
#[derive(Debug)]
pub struct CardIter<'a> {
    /// All the cards combinations are drawn from.
    possible_cards: &'a [Card],

    /// Current index offsets into `possible_cards`.
    idx: Vec<usize>,

    /// How many cards each combination holds.
    num_cards: usize,
}

impl CardIter<'_> {
    /// Create a new `CardIter` yielding every `num_cards`-sized
    /// combination of `possible_cards`.
    ///
    /// # Examples
    ///
    /// ```
    /// use holdem_odds::core::{Card, CardIter};
    ///
    /// let cards: Vec<Card> = ["As", "Kd", "Qh"]
    ///     .iter()
    ///     .map(|code| Card::from_code(code).unwrap())
    ///     .collect();
    /// // 3 choose 2
    /// assert_eq!(3, CardIter::new(&cards, 2).count());
    /// ```
    pub fn new(possible_cards: &[Card], num_cards: usize) -> CardIter<'_> {
        let mut idx: Vec<usize> = (0..num_cards).collect();
        // Start the last offset one step back so the first advance lands
        // on the first combination. num_cards == 1 would underflow here,
        // that case is special-cased in next().
        if num_cards > 1 {
            idx[num_cards - 1] -= 1;
        }
        CardIter {
            possible_cards,
            idx,
            num_cards,
        }
    }
}

impl Iterator for CardIter<'_> {
    type Item = Vec<Card>;

    fn next(&mut self) -> Option<Vec<Card>> {
        if self.num_cards == 1 {
            if self.idx[0] < self.possible_cards.len() {
                let card = self.possible_cards[self.idx[0]];
                self.idx[0] += 1;
                return Some(vec![card]);
            }
            return None;
        }

        let mut current_level = self.num_cards - 1;
        while current_level < self.num_cards {
            self.idx[current_level] += 1;

            // If this offset leaves too few cards for the offsets after
            // it, back up a level; backing up from level 0 means we are
            // done.
            let cards_needed_after = self.num_cards - (current_level + 1);
            if self.idx[current_level] + cards_needed_after >= self.possible_cards.len() {
                if current_level == 0 {
                    return None;
                }
                current_level -= 1;
            } else {
                if current_level < self.num_cards - 1 {
                    self.idx[current_level + 1] = self.idx[current_level];
                }
                current_level += 1;
            }
        }

        Some(
            self.idx
                .iter()
                .map(|&offset| self.possible_cards[offset])
                .collect(),
        )
    }
}
