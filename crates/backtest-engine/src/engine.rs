use pairs_core::{
    align_intersection, restrict_range, BacktestConfig, BacktestError, PairsResult, PriceSeries,
};

use crate::models::BacktestResult;

/// Orchestrates one backtest: validation, signal generation, portfolio
/// simulation, and metrics, strictly in that order.
///
/// A run is a pure function of `(config, price data)`: the engine holds no
/// state, reads nothing ambient, and two runs over identical inputs produce
/// bit-identical results.
pub struct BacktestEngine {
    config: BacktestConfig,
}

impl BacktestEngine {
    pub fn new(config: BacktestConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BacktestConfig {
        &self.config
    }

    pub fn run(
        &self,
        price1: &PriceSeries,
        price2: &PriceSeries,
    ) -> PairsResult<BacktestResult> {
        self.config.validate()?;
        price1.validate()?;
        price2.validate()?;

        let p1 = restrict_range(price1, self.config.start_date, self.config.end_date);
        let p2 = restrict_range(price2, self.config.start_date, self.config.end_date);
        let (p1, p2) = align_intersection(&p1, &p2);

        // Need at least one full rolling window for any z-score to exist.
        if p1.len() < self.config.window {
            return Err(BacktestError::Data(format!(
                "{} aligned observations for {}/{}, need at least {} (one rolling window)",
                p1.len(),
                p1.symbol,
                p2.symbol,
                self.config.window
            )));
        }

        let benchmark = match &self.config.benchmark_returns {
            Some(b) if b.len() != p1.len() => {
                return Err(BacktestError::Data(format!(
                    "benchmark has {} returns for {} aligned observations",
                    b.len(),
                    p1.len()
                )));
            }
            Some(b) => Some(b.as_slice()),
            None => None,
        };

        tracing::info!(
            pair = %format!("{}/{}", p1.symbol, p2.symbol),
            observations = p1.len(),
            window = self.config.window,
            entry = self.config.entry_threshold,
            exit = self.config.exit_threshold,
            cost_bps = self.config.transaction_cost_bps,
            "starting backtest"
        );

        let signal = signal_generator::generate(&p1, &p2, &self.config.signal_params())?;
        let simulation = portfolio_simulator::simulate(
            &signal.signals,
            &p1,
            &p2,
            self.config.transaction_cost_bps,
        )?;
        let metrics = performance_metrics::compute(&simulation, benchmark);

        tracing::info!(
            trades = simulation.trades.len(),
            total_return_percent = metrics.total_return_percent,
            sharpe = ?metrics.sharpe_ratio,
            max_drawdown = metrics.max_drawdown,
            "backtest complete"
        );

        Ok(BacktestResult {
            config: self.config.clone(),
            dates: p1.dates(),
            price1: p1.prices(),
            price2: p2.prices(),
            signal,
            simulation,
            metrics,
        })
    }
}
