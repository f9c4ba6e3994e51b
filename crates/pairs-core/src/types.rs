use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{BacktestError, PairsResult};

/// A single daily close observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub price: f64,
}

/// Date-ordered price history for one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    pub symbol: String,
    pub points: Vec<PricePoint>,
}

impl PriceSeries {
    pub fn new(symbol: impl Into<String>, points: Vec<PricePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Check that dates are strictly increasing and every price is a
    /// positive finite number. A price ratio is undefined otherwise.
    pub fn validate(&self) -> PairsResult<()> {
        for pair in self.points.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(BacktestError::Data(format!(
                    "{}: dates not strictly increasing at {}",
                    self.symbol, pair[1].date
                )));
            }
        }
        for point in &self.points {
            if !point.price.is_finite() || point.price <= 0.0 {
                return Err(BacktestError::Data(format!(
                    "{}: invalid price {} at {}",
                    self.symbol, point.price, point.date
                )));
            }
        }
        Ok(())
    }

    /// Simple returns, `r[t] = p[t]/p[t-1] - 1`. First entry is 0 so the
    /// result shares the price index.
    pub fn returns(&self) -> Vec<f64> {
        let mut out = Vec::with_capacity(self.points.len());
        if self.points.is_empty() {
            return out;
        }
        out.push(0.0);
        out.extend(
            self.points
                .windows(2)
                .map(|w| w[1].price / w[0].price - 1.0),
        );
        out
    }
}

/// Position direction implied by the z-score state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Long the ratio: long leg 1, short leg 2.
    Long,
    /// Short the ratio: short leg 1, long leg 2.
    Short,
    Flat,
}

/// Per-leg portfolio weights at one timestamp.
///
/// Convention: half notional per leg, so an open trade is `(±0.5, ∓0.5)`
/// with gross exposure 1.0. Dollar neutrality (`w1 == -w2`) holds at every
/// timestamp, open or flat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionWeights {
    pub w1: f64,
    pub w2: f64,
}

impl PositionWeights {
    pub const FLAT: PositionWeights = PositionWeights { w1: 0.0, w2: 0.0 };

    pub fn from_signal(signal: Signal) -> Self {
        match signal {
            Signal::Long => Self { w1: 0.5, w2: -0.5 },
            Signal::Short => Self { w1: -0.5, w2: 0.5 },
            Signal::Flat => Self::FLAT,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.w1 == 0.0 && self.w2 == 0.0
    }

    /// `|w1| + |w2|` — total capital deployed.
    pub fn gross_exposure(&self) -> f64 {
        self.w1.abs() + self.w2.abs()
    }

    /// `w1 + w2` — directional market exposure (0 when dollar-neutral).
    pub fn net_exposure(&self) -> f64 {
        self.w1 + self.w2
    }
}

/// A position change between consecutive timestamps, with the cost charged
/// for crossing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    pub date: NaiveDate,
    pub from: Signal,
    pub to: Signal,
    /// `|Δw1| + |Δw2|` across the change.
    pub weight_change: f64,
    /// `weight_change × cost_bps / 10_000`, already deducted from that
    /// period's net return.
    pub cost: f64,
}
