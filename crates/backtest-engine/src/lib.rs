//! Pairs-trading backtest orchestration: config validation, the
//! signal → simulation → metrics pipeline, and a parallel parameter sweep.

pub mod engine;
pub mod models;
pub mod sweep;

pub use engine::BacktestEngine;
pub use models::BacktestResult;
pub use sweep::{run_sweep, SweepGrid, SweepOutcome};
