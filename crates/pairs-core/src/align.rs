use chrono::NaiveDate;

use crate::error::{BacktestError, PairsResult};
use crate::types::{PricePoint, PriceSeries};

/// Check that two series share an identical date index.
pub fn check_aligned(a: &PriceSeries, b: &PriceSeries) -> PairsResult<()> {
    if a.len() != b.len() {
        return Err(BacktestError::Data(format!(
            "series length mismatch: {} has {} points, {} has {}",
            a.symbol,
            a.len(),
            b.symbol,
            b.len()
        )));
    }
    for (pa, pb) in a.points.iter().zip(&b.points) {
        if pa.date != pb.date {
            return Err(BacktestError::Data(format!(
                "date mismatch: {} at {}, {} at {}",
                a.symbol, pa.date, b.symbol, pb.date
            )));
        }
    }
    Ok(())
}

/// Restrict both series to the dates they share, preserving order.
///
/// Both inputs must already be validated (strictly increasing dates), so a
/// single forward merge suffices.
pub fn align_intersection(a: &PriceSeries, b: &PriceSeries) -> (PriceSeries, PriceSeries) {
    let mut out_a: Vec<PricePoint> = Vec::new();
    let mut out_b: Vec<PricePoint> = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);

    while i < a.points.len() && j < b.points.len() {
        let (pa, pb) = (a.points[i], b.points[j]);
        if pa.date == pb.date {
            out_a.push(pa);
            out_b.push(pb);
            i += 1;
            j += 1;
        } else if pa.date < pb.date {
            i += 1;
        } else {
            j += 1;
        }
    }

    (
        PriceSeries::new(a.symbol.clone(), out_a),
        PriceSeries::new(b.symbol.clone(), out_b),
    )
}

/// Keep only points with `start <= date < end`. Open bounds pass through.
pub fn restrict_range(
    series: &PriceSeries,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> PriceSeries {
    let points = series
        .points
        .iter()
        .copied()
        .filter(|p| start.map_or(true, |s| p.date >= s) && end.map_or(true, |e| p.date < e))
        .collect();
    PriceSeries::new(series.symbol.clone(), points)
}
