//! Summary statistics over a simulated strategy: return, risk-adjusted,
//! drawdown, trading, neutrality, and execution metrics.
//!
//! Every ratio with a potentially zero denominator is `Option<f64>`; `None`
//! is the explicit "undefined" sentinel for degenerate inputs (an all-flat
//! backtest, a zero-variance benchmark). Nothing in this crate returns an
//! error: one undefined metric must not abort an otherwise valid run.

use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

use portfolio_simulator::SimulationOutput;

/// Trading periods per year used for annualization (daily bars).
pub const PERIODS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    /// `(final_equity - 1) × 100`.
    pub total_return_percent: f64,
    /// Geometric annualized return. `None` for a zero-variance return
    /// series, where annualizing is not meaningful.
    pub cagr: Option<f64>,
    pub annualized_volatility: Option<f64>,
    pub sharpe_ratio: Option<f64>,
    pub sortino_ratio: Option<f64>,
    /// Worst peak-to-trough decline, in `[-1, 0]`.
    pub max_drawdown: f64,
    pub calmar_ratio: Option<f64>,
    /// Winning fraction of periods with a nonzero net return.
    pub hit_rate: Option<f64>,
    pub average_win: Option<f64>,
    pub average_loss: Option<f64>,
    pub beta_vs_benchmark: Option<f64>,
    pub correlation_vs_benchmark: Option<f64>,
    /// Mean `|Δw1| + |Δw2|` per period.
    pub average_turnover: f64,
    pub total_transaction_cost: f64,
    pub trading_days: usize,
    pub average_gross_exposure: f64,
    pub average_net_exposure: f64,
}

/// Compute the metrics bundle for one simulation.
pub fn compute(output: &SimulationOutput, benchmark_returns: Option<&[f64]>) -> PerformanceMetrics {
    let returns = &output.net_returns;
    let n = returns.len();

    let final_equity = output.equity.last().copied().unwrap_or(1.0);
    let total_return_percent = (final_equity - 1.0) * 100.0;

    let std_dev = if n >= 2 { returns.as_slice().std_dev() } else { f64::NAN };
    let has_variance = std_dev.is_finite() && std_dev > 0.0;

    let cagr = if n > 0 && has_variance && final_equity > 0.0 {
        Some(final_equity.powf(PERIODS_PER_YEAR / n as f64) - 1.0)
    } else {
        None
    };

    let annualized_volatility = if has_variance {
        Some(std_dev * PERIODS_PER_YEAR.sqrt())
    } else {
        None
    };

    let sharpe_ratio = if has_variance {
        let mean = returns.as_slice().mean();
        Some(mean / std_dev * PERIODS_PER_YEAR.sqrt())
    } else {
        None
    };

    let sortino_ratio = {
        let downside_dev = downside_deviation(returns);
        if downside_dev > 0.0 {
            let mean = returns.as_slice().mean();
            Some(mean / downside_dev * PERIODS_PER_YEAR.sqrt())
        } else {
            None
        }
    };

    let max_drawdown = output
        .drawdown
        .iter()
        .copied()
        .fold(0.0_f64, f64::min);

    let calmar_ratio = match (cagr, max_drawdown) {
        (Some(c), dd) if dd < 0.0 => Some(c / dd.abs()),
        _ => None,
    };

    let wins: Vec<f64> = returns.iter().copied().filter(|r| *r > 0.0).collect();
    let losses: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();
    let decided = wins.len() + losses.len();
    let hit_rate = if decided > 0 {
        Some(wins.len() as f64 / decided as f64)
    } else {
        None
    };
    let average_win = if wins.is_empty() { None } else { Some(wins.as_slice().mean()) };
    let average_loss = if losses.is_empty() { None } else { Some(losses.as_slice().mean()) };

    let beta_vs_benchmark = benchmark_returns.and_then(|b| beta(returns, b));
    let correlation_vs_benchmark = benchmark_returns.and_then(|b| correlation(returns, b));

    let average_turnover = mean_or_zero(&output.turnover);
    let total_transaction_cost = output.costs.iter().sum();
    let average_gross_exposure = mean_or_zero(&output.gross_exposure);
    let average_net_exposure = mean_or_zero(&output.net_exposure);

    PerformanceMetrics {
        total_return_percent,
        cagr,
        annualized_volatility,
        sharpe_ratio,
        sortino_ratio,
        max_drawdown,
        calmar_ratio,
        hit_rate,
        average_win,
        average_loss,
        beta_vs_benchmark,
        correlation_vs_benchmark,
        average_turnover,
        total_transaction_cost,
        trading_days: n,
        average_gross_exposure,
        average_net_exposure,
    }
}

/// Root-mean-square of the negative returns, over all periods.
fn downside_deviation(returns: &[f64]) -> f64 {
    if returns.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = returns.iter().map(|r| r.min(0.0).powi(2)).sum();
    (sum_sq / returns.len() as f64).sqrt()
}

/// cov(strategy, benchmark) / var(benchmark), over the common prefix.
/// `None` below 3 observations or for a zero-variance benchmark.
fn beta(returns: &[f64], benchmark: &[f64]) -> Option<f64> {
    let n = returns.len().min(benchmark.len());
    if n < 3 {
        return None;
    }
    let r = &returns[..n];
    let b = &benchmark[..n];

    let mean_r = r.mean();
    let mean_b = b.mean();
    let cov: f64 = r
        .iter()
        .zip(b)
        .map(|(ri, bi)| (ri - mean_r) * (bi - mean_b))
        .sum::<f64>()
        / (n - 1) as f64;
    let var_b: f64 = b.iter().map(|bi| (bi - mean_b).powi(2)).sum::<f64>() / (n - 1) as f64;

    if var_b > 1e-15 {
        Some(cov / var_b)
    } else {
        None
    }
}

fn correlation(returns: &[f64], benchmark: &[f64]) -> Option<f64> {
    let n = returns.len().min(benchmark.len());
    if n < 3 {
        return None;
    }
    let r = &returns[..n];
    let b = &benchmark[..n];

    let mean_r = r.mean();
    let mean_b = b.mean();
    let cov: f64 = r
        .iter()
        .zip(b)
        .map(|(ri, bi)| (ri - mean_r) * (bi - mean_b))
        .sum();
    let var_r: f64 = r.iter().map(|ri| (ri - mean_r).powi(2)).sum();
    let var_b: f64 = b.iter().map(|bi| (bi - mean_b).powi(2)).sum();

    let denom = (var_r * var_b).sqrt();
    if denom > 1e-15 {
        Some(cov / denom)
    } else {
        None
    }
}

fn mean_or_zero(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}
