pub mod align;
pub mod config;
pub mod error;
pub mod types;

pub use align::*;
pub use config::*;
pub use error::*;
pub use types::*;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(day: u32, price: f64) -> PricePoint {
        PricePoint {
            date: NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            price,
        }
    }

    #[test]
    fn validate_accepts_clean_series() {
        let s = PriceSeries::new("KO", vec![point(1, 60.0), point(2, 61.0), point(3, 59.5)]);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_price() {
        let s = PriceSeries::new("KO", vec![point(1, 60.0), point(2, 0.0)]);
        assert!(matches!(s.validate(), Err(BacktestError::Data(_))));

        let s = PriceSeries::new("KO", vec![point(1, 60.0), point(2, -3.0)]);
        assert!(s.validate().is_err());
    }

    #[test]
    fn validate_rejects_nan_price() {
        let s = PriceSeries::new("KO", vec![point(1, 60.0), point(2, f64::NAN)]);
        assert!(matches!(s.validate(), Err(BacktestError::Data(_))));
    }

    #[test]
    fn validate_rejects_duplicate_dates() {
        let s = PriceSeries::new("KO", vec![point(1, 60.0), point(1, 61.0)]);
        assert!(matches!(s.validate(), Err(BacktestError::Data(_))));
    }

    #[test]
    fn returns_share_the_price_index() {
        let s = PriceSeries::new("KO", vec![point(1, 100.0), point(2, 110.0), point(3, 99.0)]);
        let r = s.returns();
        assert_eq!(r.len(), 3);
        assert_eq!(r[0], 0.0);
        assert!((r[1] - 0.1).abs() < 1e-12);
        assert!((r[2] - (99.0 / 110.0 - 1.0)).abs() < 1e-12);
    }

    #[test]
    fn weights_are_dollar_neutral_for_every_signal() {
        for signal in [Signal::Long, Signal::Short, Signal::Flat] {
            let w = PositionWeights::from_signal(signal);
            assert_eq!(w.w1, -w.w2);
            assert_eq!(w.net_exposure(), 0.0);
        }
        assert_eq!(PositionWeights::from_signal(Signal::Long).gross_exposure(), 1.0);
        assert!(PositionWeights::from_signal(Signal::Flat).is_flat());
    }
}
