//! `holdem_odds` is a library for Texas Hold'em odds math. It ranks five
//! card hands, picks the best five of seven, estimates win/tie/equity
//! percentages for any mix of known and unknown hole cards with Monte
//! Carlo sampling, and scans a turn board for the river cards ("outs")
//! that meaningfully improve a player's equity.
//!
//! The [`core`] module holds the card model and the hand evaluator; the
//! [`holdem`] module holds the equity simulator, the outs analyzer, and
//! the string-level `calculate_odds` / `calculate_outs` entry points an
//! HTTP layer would call.
//!
//! ```
//! use holdem_odds::holdem::calculate_odds_seeded;
//!
//! let odds = calculate_odds_seeded(&["AsAh", "KsKh"], "", 2, 5_000, 42).unwrap();
//! // Pocket aces are a big favorite over pocket kings.
//! assert!(odds["player1"].equity > odds["player2"].equity);
//! ```
//!
//! Simulations never share a random source between workers; every entry
//! point has a seeded variant so results are reproducible.

/// Module with all the basic card and hand evaluation functionality.
pub mod core;

/// Module with the Monte Carlo equity simulator, the outs analyzer, and
/// the card-code string API.
pub mod holdem;
