use std::collections::BTreeMap;

use rand::Rng;

use crate::core::{Board, HoleCards};
use crate::holdem::equity::EquitySimulator;
use crate::holdem::errors::SimulationError;
use crate::holdem::outs::OutsAnalyzer;

/// One player's percentages, rounded to two decimals for presentation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerOdds {
    pub win: f64,
    pub tie: f64,
    pub equity: f64,
}

/// One out, in wire form.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OutDetail {
    /// Card code of the river.
    pub card: String,
    pub current_equity: f64,
    pub new_equity: f64,
    pub equity_gain: f64,
}

/// Wire form of an outs analysis.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct OutsSummary {
    pub outs_count: usize,
    pub outs_cards: Vec<String>,
    pub outs_details: Vec<OutDetail>,
    pub current_equity: f64,
    pub deck_remaining: usize,
    pub outs_percentage: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Estimate win/tie/equity percentages for a table of players.
///
/// `hands` holds one 4-character hole-card string per player with known
/// cards; empty strings and the players beyond `hands.len()` are unknown
/// and get dealt randomly. `board` is the concatenation of 0, 3, 4, or 5
/// card codes. The result maps `player1`..`playerN` to percentages
/// rounded to two decimals.
///
/// Seeds itself from the thread RNG; use [`calculate_odds_seeded`] for
/// reproducible runs.
pub fn calculate_odds<S: AsRef<str>>(
    hands: &[S],
    board: &str,
    player_count: usize,
    trials: u64,
) -> Result<BTreeMap<String, PlayerOdds>, SimulationError> {
    calculate_odds_seeded(hands, board, player_count, trials, rand::thread_rng().gen())
}

/// [`calculate_odds`] with an explicit seed.
///
/// # Examples
///
/// ```
/// use holdem_odds::holdem::calculate_odds_seeded;
///
/// let odds = calculate_odds_seeded(&["AsAh", "KsKh"], "", 2, 5_000, 42).unwrap();
/// assert!(odds["player1"].win > odds["player2"].win);
/// ```
pub fn calculate_odds_seeded<S: AsRef<str>>(
    hands: &[S],
    board: &str,
    player_count: usize,
    trials: u64,
    seed: u64,
) -> Result<BTreeMap<String, PlayerOdds>, SimulationError> {
    if player_count == 0 {
        return Err(SimulationError::InvalidInput(
            "at least one player is required".to_string(),
        ));
    }
    if trials == 0 {
        return Err(SimulationError::InvalidInput(
            "trial count must be positive".to_string(),
        ));
    }
    if hands.len() > player_count {
        return Err(SimulationError::InvalidInput(format!(
            "got {} hands for {} players",
            hands.len(),
            player_count
        )));
    }

    let mut hole_cards = hands
        .iter()
        .map(|code| HoleCards::from_code(code.as_ref()))
        .collect::<Result<Vec<HoleCards>, _>>()?;
    hole_cards.resize(player_count, HoleCards::Unknown);
    let board = Board::from_code(board)?;

    let simulator = EquitySimulator::new(hole_cards, board)?;
    let results = simulator.simulate_parallel(trials, seed);

    Ok(results
        .iter()
        .enumerate()
        .map(|(idx, result)| {
            (
                format!("player{}", idx + 1),
                PlayerOdds {
                    win: round2(result.win_percent()),
                    tie: round2(result.tie_percent()),
                    equity: round2(result.equity_percent()),
                },
            )
        })
        .collect())
}

/// Scan a turn board for the player's outs.
///
/// `player_hand` must be a known 4-character hand, `turn_board` exactly
/// four card codes. Opponent strings may be empty (skipped); any other
/// entry must be a known hand. Seeds itself from the thread RNG; use
/// [`calculate_outs_seeded`] for reproducible runs.
pub fn calculate_outs<S: AsRef<str>>(
    player_hand: &str,
    turn_board: &str,
    opponent_hands: &[S],
    trials: u64,
) -> Result<OutsSummary, SimulationError> {
    calculate_outs_seeded(
        player_hand,
        turn_board,
        opponent_hands,
        trials,
        rand::thread_rng().gen(),
    )
}

/// [`calculate_outs`] with an explicit seed.
pub fn calculate_outs_seeded<S: AsRef<str>>(
    player_hand: &str,
    turn_board: &str,
    opponent_hands: &[S],
    trials: u64,
    seed: u64,
) -> Result<OutsSummary, SimulationError> {
    let player = match HoleCards::from_code(player_hand)? {
        HoleCards::Known(first, second) => [first, second],
        HoleCards::Unknown => {
            return Err(SimulationError::InvalidInput(
                "the player's hole cards are required for outs analysis".to_string(),
            ));
        }
    };

    let board = Board::from_code(turn_board)?;
    let turn: [_; 4] = board.cards().try_into().map_err(|_| {
        SimulationError::InvalidInput(format!(
            "outs analysis runs on the 4-card turn board, got {} cards",
            board.len()
        ))
    })?;

    let mut opponents = Vec::with_capacity(opponent_hands.len());
    for code in opponent_hands {
        if let HoleCards::Known(first, second) = HoleCards::from_code(code.as_ref())? {
            opponents.push([first, second]);
        }
    }

    let report = OutsAnalyzer::new(player, turn, opponents)?.analyze(trials, seed)?;
    let current_equity = round2(report.baseline_equity);

    Ok(OutsSummary {
        outs_count: report.outs_count(),
        outs_cards: report.outs.iter().map(|out| out.card.code()).collect(),
        outs_details: report
            .outs
            .iter()
            .map(|out| OutDetail {
                card: out.card.code(),
                current_equity,
                new_equity: round2(out.equity),
                equity_gain: round2(out.equity_gain),
            })
            .collect(),
        current_equity,
        deck_remaining: report.deck_remaining,
        outs_percentage: round2(report.outs_percentage()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{DeckError, HandParseError};
    use approx::assert_abs_diff_eq;

    #[test_log::test]
    fn test_aces_against_kings_end_to_end() {
        let odds = calculate_odds_seeded(&["AsAh", "KsKh"], "", 2, 20_000, 42).unwrap();
        assert_eq!(2, odds.len());
        assert_abs_diff_eq!(odds["player1"].equity, 80.0, epsilon = 3.0);
        assert_abs_diff_eq!(odds["player2"].equity, 20.0, epsilon = 3.0);
    }

    #[test]
    fn test_two_unknown_hands_end_to_end() {
        let odds = calculate_odds_seeded(&["", ""], "", 2, 20_000, 42).unwrap();
        assert_abs_diff_eq!(odds["player1"].equity, 50.0, epsilon = 3.0);
        assert_abs_diff_eq!(odds["player2"].equity, 50.0, epsilon = 3.0);
    }

    #[test]
    fn test_missing_hands_are_unknown() {
        let odds = calculate_odds_seeded(&["AsAh"], "", 3, 2_000, 7).unwrap();
        assert_eq!(3, odds.len());
        assert!(odds.contains_key("player2"));
        assert!(odds.contains_key("player3"));
        // The known premium hand leads the random ones.
        assert!(odds["player1"].equity > odds["player2"].equity);
    }

    #[test]
    fn test_values_rounded_to_two_decimals() {
        let odds = calculate_odds_seeded(&["AsAh", "KsKh"], "2d7cTc", 2, 3_000, 9).unwrap();
        for player in odds.values() {
            for value in [player.win, player.tie, player.equity] {
                assert!((value * 100.0 - (value * 100.0).round()).abs() < 1e-9);
            }
            assert_abs_diff_eq!(player.win + player.tie, player.equity, epsilon = 0.02);
        }
    }

    #[test]
    fn test_deterministic_for_a_seed() {
        let a = calculate_odds_seeded(&["AsAh", ""], "2d7cTc", 2, 4_000, 11).unwrap();
        let b = calculate_odds_seeded(&["AsAh", ""], "2d7cTc", 2, 4_000, 11).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_rejects_bad_card_code() {
        let result = calculate_odds_seeded(&["AsXx"], "", 2, 100, 1);
        assert!(matches!(result, Err(SimulationError::Parse(_))));
    }

    #[test]
    fn test_rejects_bad_board_length() {
        let result = calculate_odds_seeded(&["AsAh"], "2d7c", 2, 100, 1);
        assert_eq!(
            Err(SimulationError::Parse(HandParseError::InvalidBoardSize(2))),
            result
        );
    }

    #[test]
    fn test_rejects_duplicate_across_inputs() {
        let result = calculate_odds_seeded(&["AsAh", "AsKd"], "", 2, 100, 1);
        assert!(matches!(
            result,
            Err(SimulationError::Deck(DeckError::DuplicateCard(_)))
        ));
    }

    #[test]
    fn test_rejects_more_hands_than_players() {
        let result = calculate_odds_seeded(&["AsAh", "KsKh", "QsQh"], "", 2, 100, 1);
        assert!(matches!(result, Err(SimulationError::InvalidInput(_))));
    }

    #[test]
    fn test_rejects_zero_players_and_zero_trials() {
        let hands: [&str; 0] = [];
        assert!(matches!(
            calculate_odds_seeded(&hands, "", 0, 100, 1),
            Err(SimulationError::InvalidInput(_))
        ));
        assert!(matches!(
            calculate_odds_seeded(&["AsAh"], "", 2, 0, 1),
            Err(SimulationError::InvalidInput(_))
        ));
    }

    #[test_log::test]
    fn test_outs_end_to_end() {
        let opponents: [&str; 0] = [];
        let summary = calculate_outs_seeded("6h5h", "8d7c2sKd", &opponents, 10_000, 21).unwrap();

        assert!(summary.outs_count > 0);
        assert_eq!(summary.outs_count, summary.outs_cards.len());
        assert_eq!(summary.outs_count, summary.outs_details.len());
        assert!(summary.outs_count <= summary.deck_remaining);
        assert_eq!(46, summary.deck_remaining);
        for detail in &summary.outs_details {
            assert!(detail.equity_gain > 20.0);
            assert_eq!(summary.current_equity, detail.current_equity);
            assert_abs_diff_eq!(
                detail.new_equity - detail.current_equity,
                detail.equity_gain,
                epsilon = 0.02
            );
        }
        // Codes come back canonical: uppercase rank, lowercase suit.
        for code in &summary.outs_cards {
            assert_eq!(2, code.len());
            assert!(code.ends_with(|c: char| "shdc".contains(c)));
        }
    }

    #[test]
    fn test_outs_skips_empty_opponents() {
        let summary = calculate_outs_seeded("6h5h", "8d7c2sKd", &["", "KcKh"], 2_000, 3).unwrap();
        // Only the known opponent's cards leave the deck.
        assert_eq!(44, summary.deck_remaining);
    }

    #[test]
    fn test_outs_requires_player_hand() {
        let opponents: [&str; 0] = [];
        assert!(matches!(
            calculate_outs_seeded("", "8d7c2sKd", &opponents, 100, 1),
            Err(SimulationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_outs_requires_turn_board() {
        let opponents: [&str; 0] = [];
        // A flop is too short, a river board too long.
        assert!(matches!(
            calculate_outs_seeded("6h5h", "8d7c2s", &opponents, 100, 1),
            Err(SimulationError::InvalidInput(_))
        ));
        assert!(matches!(
            calculate_outs_seeded("6h5h", "8d7c2sKd9c", &opponents, 100, 1),
            Err(SimulationError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_outs_rejects_malformed_opponent() {
        assert!(matches!(
            calculate_outs_seeded("6h5h", "8d7c2sKd", &["Kc"], 100, 1),
            Err(SimulationError::Parse(_))
        ));
    }

    #[cfg(feature = "serde")]
    mod serde_tests {
        use super::*;

        #[test]
        fn test_odds_wire_shape() {
            let odds = calculate_odds_seeded(&["AsAh", "KsKh"], "", 2, 1_000, 5).unwrap();
            let json = serde_json::to_value(&odds).unwrap();
            let player1 = &json["player1"];
            assert!(player1["win"].is_number());
            assert!(player1["tie"].is_number());
            assert!(player1["equity"].is_number());
        }

        #[test]
        fn test_outs_wire_shape() {
            let opponents: [&str; 0] = [];
            let summary =
                calculate_outs_seeded("6h5h", "8d7c2sKd", &opponents, 1_000, 5).unwrap();
            let json = serde_json::to_value(&summary).unwrap();
            for key in [
                "outs_count",
                "outs_cards",
                "outs_details",
                "current_equity",
                "deck_remaining",
                "outs_percentage",
            ] {
                assert!(json.get(key).is_some(), "missing key {key}");
            }
        }
    }
}
