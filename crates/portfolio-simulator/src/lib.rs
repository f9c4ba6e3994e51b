//! Dollar-neutral portfolio simulation: signals to weights, lagged P&L,
//! transaction costs, and equity/drawdown/exposure accounting.

use serde::{Deserialize, Serialize};

use pairs_core::{
    check_aligned, BacktestError, PairsResult, PositionWeights, PriceSeries, Signal, TradeEvent,
};

/// All per-timestamp series produced by one simulation, index-aligned with
/// the input prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutput {
    pub weights: Vec<PositionWeights>,
    /// Strategy return before costs: `w1[t-1]·r1[t] + w2[t-1]·r2[t]`.
    pub gross_returns: Vec<f64>,
    /// Cost charged at t for the weight change from t-1.
    pub costs: Vec<f64>,
    pub net_returns: Vec<f64>,
    /// Cumulative product of `(1 + net_return)`, starting at 1.0.
    pub equity: Vec<f64>,
    /// Equity with costs ignored, for measuring cost drag.
    pub gross_equity: Vec<f64>,
    /// `equity / running_max - 1`, always in `[-1, 0]`.
    pub drawdown: Vec<f64>,
    pub gross_exposure: Vec<f64>,
    pub net_exposure: Vec<f64>,
    /// `|Δw1| + |Δw2|` per period.
    pub turnover: Vec<f64>,
    pub trades: Vec<TradeEvent>,
}

/// Simulate a signal series against the two price legs.
///
/// Positions decided at t-1 earn period t's returns, so there is no
/// look-ahead. Costs are `turnover × cost_bps / 10_000`, deducted from the
/// period in which the weights change. The simulator holds no state across
/// calls.
pub fn simulate(
    signals: &[Signal],
    price1: &PriceSeries,
    price2: &PriceSeries,
    transaction_cost_bps: f64,
) -> PairsResult<SimulationOutput> {
    if !transaction_cost_bps.is_finite() || transaction_cost_bps < 0.0 {
        return Err(BacktestError::Config(format!(
            "transaction_cost_bps must be >= 0, got {}",
            transaction_cost_bps
        )));
    }
    check_aligned(price1, price2)?;
    if signals.len() != price1.len() {
        return Err(BacktestError::Data(format!(
            "signal series has {} entries for {} price points",
            signals.len(),
            price1.len()
        )));
    }

    let n = signals.len();
    let r1 = price1.returns();
    let r2 = price2.returns();
    let cost_rate = transaction_cost_bps / 10_000.0;

    let weights: Vec<PositionWeights> = signals
        .iter()
        .map(|s| PositionWeights::from_signal(*s))
        .collect();

    let mut gross_returns = Vec::with_capacity(n);
    let mut costs = Vec::with_capacity(n);
    let mut net_returns = Vec::with_capacity(n);
    let mut turnover = Vec::with_capacity(n);
    let mut trades = Vec::new();

    let mut prev_weights = PositionWeights::FLAT;
    let mut prev_signal = Signal::Flat;

    for t in 0..n {
        // Yesterday's weights earn today's returns.
        let gross = if t == 0 {
            0.0
        } else {
            prev_weights.w1 * r1[t] + prev_weights.w2 * r2[t]
        };

        let change =
            (weights[t].w1 - prev_weights.w1).abs() + (weights[t].w2 - prev_weights.w2).abs();
        let cost = change * cost_rate;

        if change > 0.0 {
            trades.push(TradeEvent {
                date: price1.points[t].date,
                from: prev_signal,
                to: signals[t],
                weight_change: change,
                cost,
            });
        }

        gross_returns.push(gross);
        turnover.push(change);
        costs.push(cost);
        net_returns.push(gross - cost);

        prev_weights = weights[t];
        prev_signal = signals[t];
    }

    let equity = compound(&net_returns);
    let gross_equity = compound(&gross_returns);
    let drawdown = drawdown_series(&equity);

    let gross_exposure: Vec<f64> = weights.iter().map(|w| w.gross_exposure()).collect();
    let net_exposure: Vec<f64> = weights.iter().map(|w| w.net_exposure()).collect();

    tracing::debug!(
        periods = n,
        trades = trades.len(),
        final_equity = equity.last().copied().unwrap_or(1.0),
        "simulation complete"
    );

    Ok(SimulationOutput {
        weights,
        gross_returns,
        costs,
        net_returns,
        equity,
        gross_equity,
        drawdown,
        gross_exposure,
        net_exposure,
        turnover,
        trades,
    })
}

/// Geometric compounding from 1.0.
fn compound(returns: &[f64]) -> Vec<f64> {
    let mut equity = Vec::with_capacity(returns.len());
    let mut level = 1.0;
    for r in returns {
        level *= 1.0 + r;
        equity.push(level);
    }
    equity
}

/// Peak-to-trough decline relative to the running maximum.
fn drawdown_series(equity: &[f64]) -> Vec<f64> {
    let mut peak = f64::MIN;
    equity
        .iter()
        .map(|e| {
            if *e > peak {
                peak = *e;
            }
            e / peak - 1.0
        })
        .collect()
}
