use std::collections::HashSet;

use crate::config::FilteringConfig;
use crate::core::KeywordRecord;

/// Lowercase, trim, and collapse internal whitespace.
pub fn normalize_term(term: &str) -> String {
    term.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Deduplicates raw records by normalized term and applies
/// provenance-tiered volume thresholds.
#[derive(Debug, Clone, Default)]
pub struct Deduplicator {
    filtering: FilteringConfig,
}

impl Deduplicator {
    pub fn new(filtering: FilteringConfig) -> Self {
        Self { filtering }
    }

    /// Dedup then filter.
    pub fn process(&self, records: &[KeywordRecord]) -> Vec<KeywordRecord> {
        self.filter_by_volume(self.deduplicate(records))
    }

    /// Keep the most trusted record per normalized term.
    ///
    /// Records are visited in provenance priority order (stable within a
    /// provenance), so output is ordered by trust and then by input position.
    pub fn deduplicate(&self, records: &[KeywordRecord]) -> Vec<KeywordRecord> {
        let mut ordered: Vec<&KeywordRecord> = records.iter().collect();
        ordered.sort_by_key(|r| r.provenance.rank());

        let mut seen = HashSet::new();
        let unique: Vec<KeywordRecord> = ordered
            .into_iter()
            .filter_map(|record| {
                let key = normalize_term(&record.term);
                if key.is_empty() || !seen.insert(key.clone()) {
                    return None;
                }
                Some(KeywordRecord {
                    term: key,
                    ..record.clone()
                })
            })
            .collect();

        tracing::debug!(
            input = records.len(),
            unique = unique.len(),
            "Deduplicated keyword records"
        );
        unique
    }

    pub fn filter_by_volume(&self, records: Vec<KeywordRecord>) -> Vec<KeywordRecord> {
        let before = records.len();
        let qualified: Vec<_> = records
            .into_iter()
            .filter(|r| r.search_volume >= self.filtering.min_volume_for(r.provenance))
            .collect();

        tracing::debug!(
            dropped = before - qualified.len(),
            kept = qualified.len(),
            "Applied provenance volume thresholds"
        );
        qualified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Competition, Provenance};
    use pretty_assertions::assert_eq;

    fn rec(term: &str, volume: u64, provenance: Provenance) -> KeywordRecord {
        KeywordRecord::new(term, volume, 1.0, 2.0, Competition::Medium, provenance)
    }

    #[test]
    fn test_normalize_term() {
        assert_eq!(normalize_term("  BI   Software "), "bi software");
        assert_eq!(normalize_term("   "), "");
    }

    #[test]
    fn test_higher_trust_provenance_wins() {
        let records = vec![
            rec("BI Tools", 9000, Provenance::Estimated),
            rec("bi tools", 700, Provenance::Verified),
            rec("bi  tools ", 5000, Provenance::Untagged),
        ];
        let out = Deduplicator::default().deduplicate(&records);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].term, "bi tools");
        assert_eq!(out[0].provenance, Provenance::Verified);
        assert_eq!(out[0].search_volume, 700);
    }

    #[test]
    fn test_output_ordered_by_trust_then_input() {
        let records = vec![
            rec("a", 2000, Provenance::Untagged),
            rec("b", 2000, Provenance::Estimated),
            rec("c", 2000, Provenance::Verified),
            rec("d", 2000, Provenance::Untagged),
            rec("e", 2000, Provenance::Brand),
        ];
        let terms: Vec<_> = Deduplicator::default()
            .deduplicate(&records)
            .into_iter()
            .map(|r| r.term)
            .collect();
        assert_eq!(terms, vec!["c", "e", "a", "d", "b"]);
    }

    #[test]
    fn test_thresholds_tiered_by_provenance() {
        let records = vec![
            rec("verified low", 150, Provenance::Verified),
            rec("untagged low", 450, Provenance::Untagged),
            rec("untagged ok", 500, Provenance::Untagged),
            rec("estimated low", 900, Provenance::Estimated),
            rec("estimated ok", 1000, Provenance::Estimated),
        ];
        let terms: Vec<_> = Deduplicator::default()
            .process(&records)
            .into_iter()
            .map(|r| r.term)
            .collect();
        assert_eq!(terms, vec!["verified low", "untagged ok", "estimated ok"]);
    }

    #[test]
    fn test_empty_terms_dropped() {
        let records = vec![rec("   ", 5000, Provenance::Verified)];
        assert!(Deduplicator::default().process(&records).is_empty());
    }

    #[test]
    fn test_process_is_idempotent() {
        let dedup = Deduplicator::default();
        let records = vec![
            rec("Cubehq", 1200, Provenance::Brand),
            rec("cubehq", 400, Provenance::Estimated),
            rec("bi software", 3000, Provenance::Untagged),
        ];
        let once = dedup.process(&records);
        let twice = dedup.process(&once);
        assert_eq!(once, twice);
    }
}
