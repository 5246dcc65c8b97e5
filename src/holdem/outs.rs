use rayon::prelude::*;
use tracing::{debug, trace};

use crate::core::{Board, Card, Deck, HoleCards};
use crate::holdem::equity::EquitySimulator;
use crate::holdem::errors::SimulationError;

/// Equity gain, in percentage points over the baseline, a river card has
/// to produce before it counts as an out. A heuristic for "this card
/// meaningfully helps", not the showdown definition of an out.
pub const OUT_EQUITY_GAIN: f64 = 20.0;

/// River scans run at a tenth of the baseline trial count.
const RIVER_TRIAL_DIVISOR: u64 = 10;

/// Mixer keeping per-candidate seed streams away from each other and
/// from the baseline run's chunk seeds.
const SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// A river card that cleared the out threshold.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutCandidate {
    /// The hypothetical river card.
    pub card: Card,
    /// Player equity with this river fixed on the board.
    pub equity: f64,
    /// Equity minus the baseline equity.
    pub equity_gain: f64,
}

/// Result of scanning every remaining card as a hypothetical river.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OutsReport {
    /// Player equity on the turn board before any river is fixed.
    pub baseline_equity: f64,
    /// Cards clearing the threshold, strongest gain first.
    pub outs: Vec<OutCandidate>,
    /// How many unseen cards were scanned; the denominator for
    /// `outs_percentage`.
    pub deck_remaining: usize,
}

impl OutsReport {
    /// Number of outs found.
    pub fn outs_count(&self) -> usize {
        self.outs.len()
    }

    /// Outs as a percentage of the remaining deck (0.0 - 100.0).
    pub fn outs_percentage(&self) -> f64 {
        if self.deck_remaining == 0 {
            return 0.0;
        }
        self.outs.len() as f64 / self.deck_remaining as f64 * 100.0
    }
}

/// Scans a turn board for the river cards that swing one player's equity.
///
/// The baseline is the player's equity on the 4-card turn board, with the
/// simulator dealing the river and any unknown opponents. Every unseen
/// card is then fixed as the river and re-simulated at a tenth of the
/// trial count; cards beating the baseline by more than
/// [`OUT_EQUITY_GAIN`] points are reported as outs. When no opponent hand
/// is known, a single unknown opponent is assumed.
///
/// # Examples
///
/// ```
/// use holdem_odds::core::Card;
/// use holdem_odds::holdem::OutsAnalyzer;
///
/// let card = |code| Card::from_code(code).unwrap();
/// // Open-ended straight draw on the turn.
/// let analyzer = OutsAnalyzer::new(
///     [card("6h"), card("5h")],
///     [card("8d"), card("7c"), card("2s"), card("Kd")],
///     vec![],
/// )
/// .unwrap();
/// let report = analyzer.analyze(2_000, 7).unwrap();
/// assert!(report.outs_count() <= report.deck_remaining);
/// ```
#[derive(Debug, Clone)]
pub struct OutsAnalyzer {
    player: [Card; 2],
    turn: [Card; 4],
    opponents: Vec<[Card; 2]>,
}

impl OutsAnalyzer {
    /// Create an analyzer for one player on a turn board, with zero or
    /// more known opponent hands. Fails on duplicate cards.
    pub fn new(
        player: [Card; 2],
        turn: [Card; 4],
        opponents: Vec<[Card; 2]>,
    ) -> Result<OutsAnalyzer, SimulationError> {
        // Duplicate gate up front so the scan itself cannot fail.
        Self::remaining_deck(&player, &turn, &opponents)?;
        Ok(OutsAnalyzer {
            player,
            turn,
            opponents,
        })
    }

    fn remaining_deck(
        player: &[Card; 2],
        turn: &[Card; 4],
        opponents: &[[Card; 2]],
    ) -> Result<Deck, SimulationError> {
        let used = player
            .iter()
            .chain(turn.iter())
            .chain(opponents.iter().flatten())
            .copied();
        Ok(Deck::full().without(used)?)
    }

    /// The hands handed to the simulator: the player first, then known
    /// opponents, or one unknown opponent when none are known.
    fn hands(&self) -> Vec<HoleCards> {
        let mut hands = vec![HoleCards::Known(self.player[0], self.player[1])];
        if self.opponents.is_empty() {
            hands.push(HoleCards::Unknown);
        } else {
            hands.extend(
                self.opponents
                    .iter()
                    .map(|cards| HoleCards::Known(cards[0], cards[1])),
            );
        }
        hands
    }

    /// Run the scan at `trials` baseline trials.
    pub fn analyze(&self, trials: u64, seed: u64) -> Result<OutsReport, SimulationError> {
        if trials == 0 {
            return Err(SimulationError::InvalidInput(
                "trial count must be positive".to_string(),
            ));
        }
        let hands = self.hands();
        let turn_board = Board::new(self.turn.to_vec())?;
        let baseline_sim = EquitySimulator::new(hands.clone(), turn_board)?;
        let baseline = baseline_sim.simulate_parallel(trials, seed)[0].equity_percent();

        let candidates: Vec<Card> =
            Self::remaining_deck(&self.player, &self.turn, &self.opponents)?
                .iter()
                .collect();
        let river_trials = (trials / RIVER_TRIAL_DIVISOR).max(1);
        debug!(
            baseline,
            candidates = candidates.len(),
            river_trials,
            "scanning candidate rivers"
        );

        let scanned: Result<Vec<Option<OutCandidate>>, SimulationError> = candidates
            .par_iter()
            .map(|&river| {
                let mut cards = self.turn.to_vec();
                cards.push(river);
                let sim = EquitySimulator::new(hands.clone(), Board::new(cards)?)?;
                let river_seed =
                    seed ^ (u64::from(u8::from(river)) + 1).wrapping_mul(SEED_MIX);
                let equity = sim.simulate_parallel(river_trials, river_seed)[0].equity_percent();
                trace!(river = %river, equity, "candidate river equity");
                Ok((equity > baseline + OUT_EQUITY_GAIN).then(|| OutCandidate {
                    card: river,
                    equity,
                    equity_gain: equity - baseline,
                }))
            })
            .collect();

        let mut outs: Vec<OutCandidate> = scanned?.into_iter().flatten().collect();
        outs.sort_by(|a, b| {
            b.equity_gain
                .total_cmp(&a.equity_gain)
                .then_with(|| u8::from(a.card).cmp(&u8::from(b.card)))
        });

        Ok(OutsReport {
            baseline_equity: baseline,
            outs,
            deck_remaining: candidates.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Value;

    fn card(code: &str) -> Card {
        Card::from_code(code).unwrap()
    }

    fn straight_draw() -> OutsAnalyzer {
        // 6-5 with an 8-7 board: any nine or four completes the straight.
        OutsAnalyzer::new(
            [card("6h"), card("5h")],
            [card("8d"), card("7c"), card("2s"), card("Kd")],
            vec![],
        )
        .unwrap()
    }

    #[test]
    fn test_duplicate_card_rejected() {
        let result = OutsAnalyzer::new(
            [card("6h"), card("5h")],
            [card("6h"), card("7c"), card("2s"), card("Kd")],
            vec![],
        );
        assert!(matches!(result, Err(SimulationError::Deck(_))));
    }

    #[test]
    fn test_zero_trials_rejected() {
        assert!(matches!(
            straight_draw().analyze(0, 1),
            Err(SimulationError::InvalidInput(_))
        ));
    }

    #[test_log::test]
    fn test_open_ended_draw_has_outs() {
        let report = straight_draw().analyze(10_000, 21).unwrap();

        // Two hole cards plus four board cards are out of the deck.
        assert_eq!(46, report.deck_remaining);
        assert!(report.baseline_equity < 60.0);
        assert!(!report.outs.is_empty());
        assert!(report.outs_count() <= report.deck_remaining);
        for out in &report.outs {
            assert!(out.equity_gain > OUT_EQUITY_GAIN);
            assert!(out.equity > report.baseline_equity);
        }
        // The straight-completing ranks both show up.
        assert!(report.outs.iter().any(|o| o.card.value == Value::Nine));
        assert!(report.outs.iter().any(|o| o.card.value == Value::Four));
        // Strongest gain first.
        for pair in report.outs.windows(2) {
            assert!(pair[0].equity_gain >= pair[1].equity_gain);
        }
    }

    #[test]
    fn test_made_nuts_has_no_outs() {
        // A made royal flush cannot gain 20 points from any river.
        let analyzer = OutsAnalyzer::new(
            [card("As"), card("Ks")],
            [card("Qs"), card("Js"), card("Ts"), card("2d")],
            vec![],
        )
        .unwrap();
        let report = analyzer.analyze(2_000, 5).unwrap();
        assert_eq!(0, report.outs_count());
        assert_eq!(0.0, report.outs_percentage());
        assert!(report.baseline_equity > 95.0);
    }

    #[test]
    fn test_known_opponent_changes_the_scan() {
        let analyzer = OutsAnalyzer::new(
            [card("6h"), card("5h")],
            [card("8d"), card("7c"), card("2s"), card("Kd")],
            vec![[card("Kc"), card("Kh")]],
        )
        .unwrap();
        let report = analyzer.analyze(2_000, 11).unwrap();
        // Two more cards are spoken for.
        assert_eq!(44, report.deck_remaining);
        // Against a set of kings the draw is far behind.
        assert!(report.baseline_equity < 40.0);
    }

    #[test]
    fn test_deterministic_with_seed() {
        let a = straight_draw().analyze(2_000, 13).unwrap();
        let b = straight_draw().analyze(2_000, 13).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_outs_percentage() {
        let report = OutsReport {
            baseline_equity: 30.0,
            outs: vec![
                OutCandidate {
                    card: card("9c"),
                    equity: 75.0,
                    equity_gain: 45.0,
                },
                OutCandidate {
                    card: card("4d"),
                    equity: 72.0,
                    equity_gain: 42.0,
                },
            ],
            deck_remaining: 46,
        };
        assert_eq!(2, report.outs_count());
        assert!((report.outs_percentage() - 2.0 / 46.0 * 100.0).abs() < 1e-9);
    }
}
