use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BacktestError, PairsResult};

/// Parameters for the z-score signal stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalParams {
    /// Trailing window length, inclusive of the current observation.
    pub window: usize,
    pub entry_threshold: f64,
    pub exit_threshold: f64,
}

impl SignalParams {
    pub fn validate(&self) -> PairsResult<()> {
        if self.window < 2 {
            return Err(BacktestError::Config(format!(
                "window must be >= 2, got {}",
                self.window
            )));
        }
        if !self.entry_threshold.is_finite() || self.entry_threshold <= 0.0 {
            return Err(BacktestError::Config(format!(
                "entry_threshold must be positive, got {}",
                self.entry_threshold
            )));
        }
        if !self.exit_threshold.is_finite() || self.exit_threshold <= 0.0 {
            return Err(BacktestError::Config(format!(
                "exit_threshold must be positive, got {}",
                self.exit_threshold
            )));
        }
        if self.exit_threshold >= self.entry_threshold {
            return Err(BacktestError::Config(format!(
                "exit_threshold {} must be below entry_threshold {} (hysteresis band)",
                self.exit_threshold, self.entry_threshold
            )));
        }
        Ok(())
    }
}

/// Configuration for one backtest run.
///
/// Always passed explicitly into the engine; no run reads ambient or
/// process-wide state, so repeated and parallel runs are reproducible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestConfig {
    pub symbol1: String,
    pub symbol2: String,
    pub window: usize,
    pub entry_threshold: f64,
    pub exit_threshold: f64,
    /// Round-trip-leg cost in basis points, charged on every weight change.
    pub transaction_cost_bps: f64,
    /// Optional restriction of the input series to `[start_date, end_date)`.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    /// Per-period benchmark returns aligned to the price index, for
    /// beta/correlation. None skips those metrics.
    #[serde(default)]
    pub benchmark_returns: Option<Vec<f64>>,
}

impl BacktestConfig {
    pub fn signal_params(&self) -> SignalParams {
        SignalParams {
            window: self.window,
            entry_threshold: self.entry_threshold,
            exit_threshold: self.exit_threshold,
        }
    }

    pub fn validate(&self) -> PairsResult<()> {
        self.signal_params().validate()?;
        if !self.transaction_cost_bps.is_finite() || self.transaction_cost_bps < 0.0 {
            return Err(BacktestError::Config(format!(
                "transaction_cost_bps must be >= 0, got {}",
                self.transaction_cost_bps
            )));
        }
        if let (Some(start), Some(end)) = (self.start_date, self.end_date) {
            if start >= end {
                return Err(BacktestError::Config(format!(
                    "start_date {} must be before end_date {}",
                    start, end
                )));
            }
        }
        Ok(())
    }
}
