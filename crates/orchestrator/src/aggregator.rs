//! Cross-platform metrics normalization.

use adbridge_core::types::{MetricRecord, PerformanceSummary};

/// Round a currency value to two decimals.
fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sum impressions, clicks and spend across metric rows from any mix of
/// platforms.
///
/// Spend is accumulated in full precision major units and rounded exactly
/// once at the end, so micros-reporting and major-unit-reporting platforms
/// combine without compounding rounding error.
pub fn summarize<'a, I>(records: I) -> PerformanceSummary
where
    I: IntoIterator<Item = &'a MetricRecord>,
{
    let mut summary = PerformanceSummary::default();
    let mut spend = 0.0f64;
    for record in records {
        summary.impressions += record.impressions;
        summary.clicks += record.clicks;
        spend += record.spend.to_major();
    }
    summary.spend = round_currency(spend);
    summary
}
