use std::cmp::Ordering;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::debug;

use crate::core::{best_rank, Board, Card, Deck, DeckError, HandRank, HoleCards};
use crate::holdem::errors::SimulationError;

/// How many trials each parallel worker runs with its own seeded RNG.
/// Chunking by a fixed size keeps a given seed reproducible no matter
/// how rayon schedules the workers.
const TRIALS_PER_CHUNK: u64 = 4096;

/// Per-player win/tie counters for a batch of trials.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    wins: u64,
    ties: u64,
}

fn merge_tallies(mut into: Vec<Tally>, from: Vec<Tally>) -> Vec<Tally> {
    for (a, b) in into.iter_mut().zip(from) {
        a.wins += b.wins;
        a.ties += b.ties;
    }
    into
}

/// One player's aggregate over a simulation run.
///
/// A trial with a single best hand counts toward that player's `wins`; a
/// trial where several players share the best hand counts toward `ties`
/// for each of them. Equity is win percent plus tie percent at full
/// value; tie credit is deliberately not split among the tied players.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquityResult {
    /// Trials this player won outright.
    pub wins: u64,
    /// Trials this player tied for best.
    pub ties: u64,
    /// Total trials run.
    pub trials: u64,
}

impl EquityResult {
    /// Win percentage (0.0 - 100.0).
    pub fn win_percent(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.wins as f64 / self.trials as f64 * 100.0
    }

    /// Tie percentage (0.0 - 100.0).
    pub fn tie_percent(&self) -> f64 {
        if self.trials == 0 {
            return 0.0;
        }
        self.ties as f64 / self.trials as f64 * 100.0
    }

    /// Win percent plus tie percent.
    pub fn equity_percent(&self) -> f64 {
        self.win_percent() + self.tie_percent()
    }
}

/// Monte Carlo equity simulator over a fixed table state.
///
/// Construction validates everything up front: no duplicate fixed cards,
/// and enough cards left for every unknown hand plus board completion.
/// Each trial partial-shuffles the remaining deck, deals two cards to
/// every unknown hand, completes the board to five cards, and compares
/// each player's best five-of-seven rank.
///
/// # Examples
///
/// ```
/// use holdem_odds::core::{Board, HoleCards};
/// use holdem_odds::holdem::EquitySimulator;
///
/// let hands = vec![
///     HoleCards::from_code("AsAh").unwrap(),
///     HoleCards::from_code("KsKh").unwrap(),
/// ];
/// let sim = EquitySimulator::new(hands, Board::empty()).unwrap();
/// let results = sim.simulate_parallel(5_000, 42);
/// assert!(results[0].equity_percent() > results[1].equity_percent());
/// ```
#[derive(Debug, Clone)]
pub struct EquitySimulator {
    hands: Vec<HoleCards>,
    board: Board,
    /// Deck minus every fixed card, in deck order.
    available: Vec<Card>,
    /// Cards dealt per trial: two per unknown hand plus board completion.
    cards_to_draw: usize,
    unknown_hands: usize,
}

impl EquitySimulator {
    /// Create a simulator for the given hands and board.
    pub fn new(hands: Vec<HoleCards>, board: Board) -> Result<EquitySimulator, SimulationError> {
        if hands.is_empty() {
            return Err(SimulationError::InvalidInput(
                "at least one hand is required".to_string(),
            ));
        }
        let mut used: Vec<Card> = board.cards().to_vec();
        let mut unknown_hands = 0;
        for hand in &hands {
            match hand.known() {
                Some(cards) => used.extend(cards),
                None => unknown_hands += 1,
            }
        }
        let deck = Deck::full().without(used)?;
        let cards_to_draw = 2 * unknown_hands + (5 - board.len());
        // This also caps the table at 23 players, which keeps the winner
        // bit mask comfortably inside a u32.
        if cards_to_draw > deck.len() {
            return Err(DeckError::InsufficientCards {
                requested: cards_to_draw,
                remaining: deck.len(),
            }
            .into());
        }
        Ok(EquitySimulator {
            hands,
            board,
            available: deck.iter().collect(),
            cards_to_draw,
            unknown_hands,
        })
    }

    /// The hands being simulated.
    pub fn hands(&self) -> &[HoleCards] {
        &self.hands
    }

    /// The fixed board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// How many cards remain available to deal.
    pub fn remaining(&self) -> usize {
        self.available.len()
    }

    /// Run `trials` trials with a caller-supplied random source. Seed the
    /// source for reproducible results.
    pub fn simulate<R: Rng + ?Sized>(&self, trials: u64, rng: &mut R) -> Vec<EquityResult> {
        let mut tallies = vec![Tally::default(); self.hands.len()];
        let mut scratch = self.available.clone();
        let mut seven = Vec::with_capacity(7);
        for _ in 0..trials {
            self.run_trial(&mut scratch, &mut seven, rng, &mut tallies);
        }
        self.build_results(tallies, trials)
    }

    /// Run `trials` trials across rayon workers. Trials are split into
    /// fixed-size chunks, each chunk gets its own RNG seeded from `seed`
    /// plus the chunk index, and chunk counters are merged by addition
    /// after the join; the outcome is deterministic for a given seed.
    pub fn simulate_parallel(&self, trials: u64, seed: u64) -> Vec<EquityResult> {
        debug!(
            trials,
            players = self.hands.len(),
            board = %self.board,
            "running equity simulation"
        );
        let chunks = trials.div_ceil(TRIALS_PER_CHUNK);
        let tallies = (0..chunks)
            .into_par_iter()
            .map(|chunk| {
                let mut rng = StdRng::seed_from_u64(seed.wrapping_add(chunk));
                let chunk_trials = TRIALS_PER_CHUNK.min(trials - chunk * TRIALS_PER_CHUNK);
                let mut tallies = vec![Tally::default(); self.hands.len()];
                let mut scratch = self.available.clone();
                let mut seven = Vec::with_capacity(7);
                for _ in 0..chunk_trials {
                    self.run_trial(&mut scratch, &mut seven, &mut rng, &mut tallies);
                }
                tallies
            })
            .reduce(
                || vec![Tally::default(); self.hands.len()],
                merge_tallies,
            );
        self.build_results(tallies, trials)
    }

    /// Deal one trial and update the tallies.
    fn run_trial<R: Rng + ?Sized>(
        &self,
        scratch: &mut [Card],
        seven: &mut Vec<Card>,
        rng: &mut R,
        tallies: &mut [Tally],
    ) {
        // One partial shuffle hands out every card the trial needs; the
        // first cards go to the unknown hands, the rest complete the
        // board. Draws within a trial are disjoint by construction.
        let (drawn, _) = scratch.partial_shuffle(rng, self.cards_to_draw);
        let (hole_draw, board_draw) = (&*drawn).split_at(2 * self.unknown_hands);

        let mut best = HandRank::HighCard(0);
        let mut winners: u32 = 0;
        let mut next_unknown = 0;
        for (idx, hand) in self.hands.iter().enumerate() {
            seven.clear();
            match hand.known() {
                Some(cards) => seven.extend_from_slice(&cards),
                None => {
                    seven.extend_from_slice(&hole_draw[next_unknown..next_unknown + 2]);
                    next_unknown += 2;
                }
            }
            seven.extend_from_slice(self.board.cards());
            seven.extend_from_slice(board_draw);

            let rank = best_rank(seven);
            match rank.cmp(&best) {
                Ordering::Greater => {
                    best = rank;
                    winners = 1 << idx;
                }
                Ordering::Equal => winners |= 1 << idx,
                Ordering::Less => {}
            }
        }

        if winners.count_ones() == 1 {
            tallies[winners.trailing_zeros() as usize].wins += 1;
        } else {
            for (idx, tally) in tallies.iter_mut().enumerate() {
                if winners & (1 << idx) != 0 {
                    tally.ties += 1;
                }
            }
        }
    }

    fn build_results(&self, tallies: Vec<Tally>, trials: u64) -> Vec<EquityResult> {
        tallies
            .into_iter()
            .map(|tally| EquityResult {
                wins: tally.wins,
                ties: tally.ties,
                trials,
            })
            .collect()
    }
}
