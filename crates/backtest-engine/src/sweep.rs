use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use pairs_core::{BacktestConfig, PriceSeries};

use crate::engine::BacktestEngine;

/// Parameter grid for a sweep over (window, entry, exit) combinations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepGrid {
    pub windows: Vec<usize>,
    pub entry_thresholds: Vec<f64>,
    pub exit_thresholds: Vec<f64>,
}

/// Key metrics for one configuration in a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepOutcome {
    pub window: usize,
    pub entry_threshold: f64,
    pub exit_threshold: f64,
    pub sharpe_ratio: Option<f64>,
    pub cagr: Option<f64>,
    pub total_return_percent: f64,
    pub max_drawdown: f64,
    pub num_trades: usize,
}

/// Run every combination in the grid as an independent backtest, in
/// parallel, and rank the outcomes by Sharpe ratio (undefined Sharpe last).
///
/// Combinations that fail validation (e.g. exit >= entry while crossing the
/// grid) or hit a data error are skipped with a warning; one bad cell must
/// not sink the sweep. Runs share nothing, so no ordering is imposed beyond
/// the final sort.
pub fn run_sweep(
    base_config: &BacktestConfig,
    grid: &SweepGrid,
    price1: &PriceSeries,
    price2: &PriceSeries,
) -> Vec<SweepOutcome> {
    let combos: Vec<(usize, f64, f64)> = grid
        .windows
        .iter()
        .flat_map(|&w| {
            grid.entry_thresholds.iter().flat_map(move |&entry| {
                grid.exit_thresholds
                    .iter()
                    .map(move |&exit| (w, entry, exit))
            })
        })
        .collect();

    tracing::info!(combinations = combos.len(), "starting parameter sweep");

    let mut outcomes: Vec<SweepOutcome> = combos
        .par_iter()
        .filter_map(|&(window, entry, exit)| {
            let mut config = base_config.clone();
            config.window = window;
            config.entry_threshold = entry;
            config.exit_threshold = exit;

            match BacktestEngine::new(config).run(price1, price2) {
                Ok(result) => Some(SweepOutcome {
                    window,
                    entry_threshold: entry,
                    exit_threshold: exit,
                    sharpe_ratio: result.metrics.sharpe_ratio,
                    cagr: result.metrics.cagr,
                    total_return_percent: result.metrics.total_return_percent,
                    max_drawdown: result.metrics.max_drawdown,
                    num_trades: result.num_trades(),
                }),
                Err(e) => {
                    tracing::warn!(
                        window,
                        entry,
                        exit,
                        error = %e,
                        "sweep combination skipped"
                    );
                    None
                }
            }
        })
        .collect();

    outcomes.sort_by(|a, b| match (b.sharpe_ratio, a.sharpe_ratio) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(std::cmp::Ordering::Equal),
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, Some(_)) => std::cmp::Ordering::Less,
        (None, None) => std::cmp::Ordering::Equal,
    });

    outcomes
}
