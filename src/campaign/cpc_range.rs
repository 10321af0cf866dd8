use crate::core::{round_cents, CpcRange, ScoredKeyword};

/// Volume-weighted bid range for a group of keywords.
///
/// Falls back to [`CpcRange::DEFAULT`] when the group is empty or has no
/// search volume to weight by. Bounds are rounded to cents.
pub fn aggregate_cpc_range(keywords: &[ScoredKeyword]) -> CpcRange {
    let (volume, weighted_low, weighted_high) =
        keywords
            .iter()
            .fold((0.0_f64, 0.0_f64, 0.0_f64), |(v, low, high), kw| {
                let w = kw.metrics.average_monthly_searches as f64;
                (v + w, low + kw.metrics.bid_low * w, high + kw.metrics.bid_high * w)
            });

    if volume <= 0.0 {
        return CpcRange::DEFAULT;
    }

    CpcRange::new(
        round_cents(weighted_low / volume),
        round_cents(weighted_high / volume),
    )
}
