use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use pairs_core::BacktestConfig;
use performance_metrics::PerformanceMetrics;
use portfolio_simulator::SimulationOutput;
use signal_generator::SignalSeries;

/// Result of a completed backtest: the full derived time series plus the
/// metrics bundle.
///
/// Created once per run and never mutated afterwards; parallel runs each
/// own their result, so no cross-run locking is needed. All series share
/// `dates` as their index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub config: BacktestConfig,
    /// The aligned date index both legs were evaluated on.
    pub dates: Vec<NaiveDate>,
    pub price1: Vec<f64>,
    pub price2: Vec<f64>,
    /// Ratio, z-score, and signal series from the signal stage.
    pub signal: SignalSeries,
    /// Weights, returns, costs, equity, drawdown, exposure, turnover, and
    /// trade events from the simulation stage.
    pub simulation: SimulationOutput,
    pub metrics: PerformanceMetrics,
}

impl BacktestResult {
    /// Net equity curve convenience accessor.
    pub fn equity(&self) -> &[f64] {
        &self.simulation.equity
    }

    pub fn drawdown(&self) -> &[f64] {
        &self.simulation.drawdown
    }

    pub fn num_trades(&self) -> usize {
        self.simulation.trades.len()
    }
}
