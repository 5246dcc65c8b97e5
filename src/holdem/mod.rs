/// Module for the Monte Carlo equity simulator.
mod equity;
/// Export `EquitySimulator` and `EquityResult`
pub use self::equity::{EquityResult, EquitySimulator};

/// Module with the simulation error type.
mod errors;
/// Export `SimulationError`
pub use self::errors::SimulationError;

/// Module with the card-code string entry points an external layer calls.
mod odds;
/// Export the odds/outs calculation functions and their wire types
pub use self::odds::{
    calculate_odds, calculate_odds_seeded, calculate_outs, calculate_outs_seeded, OutDetail,
    OutsSummary, PlayerOdds,
};

/// Module scanning a turn board for equity-improving river cards.
mod outs;
/// Export `OutsAnalyzer` and its report types
pub use self::outs::{OutCandidate, OutsAnalyzer, OutsReport, OUT_EQUITY_GAIN};
