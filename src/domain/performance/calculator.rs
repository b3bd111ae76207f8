use crate::domain::errors::PerformanceError;
use crate::domain::series::{PerformanceSeries, PriceSeries};
use rust_decimal::Decimal;

/// Converts an absolute series into cumulative percentage change relative to
/// its oldest day: `100 * (value - baseline) / baseline`.
///
/// The series must be oldest-first; the baseline is element 0. A zero
/// baseline is an error rather than an infinite or NaN result, and so is a
/// change too large for `Decimal`.
pub fn to_performance(series: &PriceSeries) -> Result<PerformanceSeries, PerformanceError> {
    let baseline = series
        .first()
        .map(|c| c.value)
        .ok_or_else(|| PerformanceError::EmptySeries {
            label: series.label().to_string(),
        })?;

    if baseline.is_zero() {
        return Err(PerformanceError::ZeroBaseline {
            label: series.label().to_string(),
        });
    }

    let points = series
        .closes()
        .iter()
        .map(|c| {
            percent_change(baseline, c.value).ok_or_else(|| PerformanceError::Overflow {
                label: series.label().to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(PerformanceSeries::new(series.label(), points))
}

/// Percentage change from `baseline` to `value`, `None` on overflow.
/// Caller guarantees a non-zero baseline.
fn percent_change(baseline: Decimal, value: Decimal) -> Option<Decimal> {
    value
        .checked_sub(baseline)?
        .checked_mul(Decimal::ONE_HUNDRED)?
        .checked_div(baseline)
}
