/// Trailing-window mean over `window` observations inclusive of the current
/// one. Entries before a full window are `None`, never zero.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            Some(slice.iter().sum::<f64>() / window as f64)
        })
        .collect()
}

/// Trailing-window sample standard deviation (Bessel, n-1), matching the
/// pandas default. `None` until a full window is available.
pub fn rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    values
        .iter()
        .enumerate()
        .map(|(i, _)| {
            if i + 1 < window || window < 2 {
                return None;
            }
            let slice = &values[i + 1 - window..=i];
            let mean = slice.iter().sum::<f64>() / window as f64;
            let variance = slice.iter().map(|v| (v - mean).powi(2)).sum::<f64>()
                / (window as f64 - 1.0);
            Some(variance.sqrt())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warm_up_entries_are_none() {
        let m = rolling_mean(&[1.0, 2.0, 3.0, 4.0], 3);
        assert_eq!(m[0], None);
        assert_eq!(m[1], None);
        assert_eq!(m[2], Some(2.0));
        assert_eq!(m[3], Some(3.0));
    }

    #[test]
    fn std_uses_sample_variance() {
        // Window [1, 2, 3]: mean 2, sample variance 1
        let s = rolling_std(&[1.0, 2.0, 3.0], 3);
        assert!((s[2].unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn constant_window_has_zero_std() {
        let s = rolling_std(&[5.0, 5.0, 5.0, 5.0], 3);
        assert_eq!(s[2], Some(0.0));
        assert_eq!(s[3], Some(0.0));
    }

    #[test]
    fn window_longer_than_series_is_all_none() {
        assert!(rolling_mean(&[1.0, 2.0], 5).iter().all(Option::is_none));
        assert!(rolling_std(&[1.0, 2.0], 5).iter().all(Option::is_none));
    }
}
