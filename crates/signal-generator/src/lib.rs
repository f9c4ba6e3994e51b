//! Mean-reversion signal generation for a price pair: ratio, rolling
//! z-score, and a hysteresis state machine over entry/exit thresholds.

pub mod rolling;

use serde::{Deserialize, Serialize};

use pairs_core::{check_aligned, PairsResult, PriceSeries, Signal, SignalParams};
use rolling::{rolling_mean, rolling_std};

/// Output of the signal stage, index-aligned with the input prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSeries {
    /// price1 / price2, elementwise.
    pub ratio: Vec<f64>,
    /// Rolling z-score of the ratio. `None` during warm-up and wherever the
    /// rolling std is zero (flat ratio window).
    pub zscore: Vec<Option<f64>>,
    pub signals: Vec<Signal>,
}

/// Elementwise price ratio. Both series must be validated and aligned by
/// the caller or via [`generate`].
pub fn price_ratio(price1: &PriceSeries, price2: &PriceSeries) -> Vec<f64> {
    price1
        .points
        .iter()
        .zip(&price2.points)
        .map(|(a, b)| a.price / b.price)
        .collect()
}

/// Rolling z-score of a ratio series: `(ratio - mean) / std` over a
/// trailing window. Zero-variance windows yield `None` instead of dividing
/// by zero.
pub fn zscore(ratio: &[f64], window: usize) -> Vec<Option<f64>> {
    let means = rolling_mean(ratio, window);
    let stds = rolling_std(ratio, window);

    ratio
        .iter()
        .zip(means.iter().zip(&stds))
        .map(|(r, (mean, std))| match (mean, std) {
            (Some(m), Some(s)) if *s > 0.0 => Some((r - m) / s),
            _ => None,
        })
        .collect()
}

/// Run the hysteresis state machine over a z-score series.
///
/// Starting Flat: enter Short when `z > entry`, Long when `z < -entry`;
/// exit to Flat when `|z| < exit`; hold inside the band. An undefined
/// z-score emits Flat for that timestamp without disturbing the machine's
/// state. Long and Short are never adjacent without a Flat evaluation in
/// between, because entry is only possible from Flat.
pub fn signals_from_zscore(zscore: &[Option<f64>], params: &SignalParams) -> Vec<Signal> {
    let mut state = Signal::Flat;
    let mut out = Vec::with_capacity(zscore.len());

    for z in zscore {
        match z {
            None => out.push(Signal::Flat),
            Some(z) => {
                state = match state {
                    Signal::Flat if *z > params.entry_threshold => Signal::Short,
                    Signal::Flat if *z < -params.entry_threshold => Signal::Long,
                    Signal::Long | Signal::Short if z.abs() < params.exit_threshold => {
                        Signal::Flat
                    }
                    held => held,
                };
                out.push(state);
            }
        }
    }

    out
}

/// Full signal stage: validate, compute the ratio and z-score, and derive
/// signals. Deterministic: identical inputs produce identical output.
pub fn generate(
    price1: &PriceSeries,
    price2: &PriceSeries,
    params: &SignalParams,
) -> PairsResult<SignalSeries> {
    params.validate()?;
    price1.validate()?;
    price2.validate()?;
    check_aligned(price1, price2)?;

    let ratio = price_ratio(price1, price2);
    let zscore = zscore(&ratio, params.window);
    let signals = signals_from_zscore(&zscore, params);

    tracing::debug!(
        pair = %format!("{}/{}", price1.symbol, price2.symbol),
        observations = ratio.len(),
        window = params.window,
        "signal series generated"
    );

    Ok(SignalSeries {
        ratio,
        zscore,
        signals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pairs_core::PricePoint;

    fn series(symbol: &str, prices: &[f64]) -> PriceSeries {
        PriceSeries::new(
            symbol,
            prices
                .iter()
                .enumerate()
                .map(|(i, &price)| PricePoint {
                    date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                        + chrono::Days::new(i as u64),
                    price,
                })
                .collect(),
        )
    }

    fn params(window: usize, entry: f64, exit: f64) -> SignalParams {
        SignalParams {
            window,
            entry_threshold: entry,
            exit_threshold: exit,
        }
    }

    #[test]
    fn warm_up_zscores_are_undefined_and_flat() {
        let p1 = series("A", &[10.0, 11.0, 12.0, 9.0, 10.0]);
        let p2 = series("B", &[10.0, 10.0, 10.0, 10.0, 10.0]);
        let out = generate(&p1, &p2, &params(3, 1.5, 0.5)).unwrap();

        assert_eq!(out.zscore[0], None);
        assert_eq!(out.zscore[1], None);
        assert_eq!(out.signals[0], Signal::Flat);
        assert_eq!(out.signals[1], Signal::Flat);
    }

    #[test]
    fn ratio_scenario_window_three() {
        // Ratio [1.0, 1.1, 1.2, 0.9, 1.0]; z peaks at 1.0 < 1.5 entry, so
        // everything stays Flat while the z-score is defined from index 2 on.
        let p1 = series("A", &[1.0, 1.1, 1.2, 0.9, 1.0]);
        let p2 = series("B", &[1.0, 1.0, 1.0, 1.0, 1.0]);
        let out = generate(&p1, &p2, &params(3, 1.5, 0.5)).unwrap();

        assert!(out.zscore[2..].iter().all(Option::is_some));
        assert!((out.zscore[2].unwrap() - 1.0).abs() < 1e-9);
        assert!(out.signals.iter().all(|s| *s == Signal::Flat));
    }

    #[test]
    fn constant_ratio_stays_flat_without_error() {
        // A = 2 × B at every timestamp: zero-variance windows, z undefined,
        // never a trade regardless of thresholds.
        let b = [50.0, 51.0, 49.5, 52.0, 50.5, 51.2];
        let a: Vec<f64> = b.iter().map(|p| p * 2.0).collect();
        let out = generate(&series("A", &a), &series("B", &b), &params(3, 0.1, 0.05)).unwrap();

        assert!(out.zscore.iter().all(Option::is_none));
        assert!(out.signals.iter().all(|s| *s == Signal::Flat));
    }

    #[test]
    fn hysteresis_holds_position_inside_band() {
        let z = vec![
            None,
            Some(2.0),  // enter short
            Some(1.0),  // inside band, hold
            Some(0.7),  // still above exit, hold
            Some(0.3),  // below exit, flat
            Some(0.4),  // stays flat
        ];
        let s = signals_from_zscore(&z, &params(3, 1.5, 0.5));
        assert_eq!(
            s,
            vec![
                Signal::Flat,
                Signal::Short,
                Signal::Short,
                Signal::Short,
                Signal::Flat,
                Signal::Flat,
            ]
        );
    }

    #[test]
    fn long_entry_on_negative_zscore() {
        let z = vec![Some(-2.0), Some(-0.8), Some(-0.2)];
        let s = signals_from_zscore(&z, &params(3, 1.5, 0.5));
        assert_eq!(s, vec![Signal::Long, Signal::Long, Signal::Flat]);
    }

    #[test]
    fn no_direct_long_to_short_transition() {
        // z swings straight from deep negative to deep positive; the machine
        // must pass through an explicit Flat evaluation before reversing.
        let z = vec![Some(-2.0), Some(3.0), Some(0.1), Some(3.0)];
        let s = signals_from_zscore(&z, &params(3, 1.5, 0.5));
        assert_eq!(s[0], Signal::Long);
        // |3.0| >= exit, so the long is held, not reversed
        assert_eq!(s[1], Signal::Long);
        assert_eq!(s[2], Signal::Flat);
        assert_eq!(s[3], Signal::Short);

        for w in s.windows(2) {
            assert!(
                !(w[0] == Signal::Long && w[1] == Signal::Short)
                    && !(w[0] == Signal::Short && w[1] == Signal::Long)
            );
        }
    }

    #[test]
    fn undefined_zscore_mid_series_emits_flat_but_preserves_state() {
        let z = vec![Some(2.0), None, Some(2.0), Some(0.1)];
        let s = signals_from_zscore(&z, &params(3, 1.5, 0.5));
        // Short entered, gap emits Flat, then the held short resumes and
        // finally exits below the band.
        assert_eq!(
            s,
            vec![Signal::Short, Signal::Flat, Signal::Short, Signal::Flat]
        );
    }

    #[test]
    fn generation_is_deterministic() {
        let p1 = series("A", &[10.0, 10.5, 11.2, 9.8, 10.1, 10.9, 9.5]);
        let p2 = series("B", &[20.0, 19.8, 20.4, 20.9, 20.2, 19.7, 20.5]);
        let p = params(3, 1.0, 0.3);
        let first = generate(&p1, &p2, &p).unwrap();
        let second = generate(&p1, &p2, &p).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn non_positive_price_is_a_data_error() {
        let p1 = series("A", &[10.0, -1.0, 11.0]);
        let p2 = series("B", &[10.0, 10.0, 10.0]);
        assert!(generate(&p1, &p2, &params(2, 1.5, 0.5)).is_err());
    }
}
