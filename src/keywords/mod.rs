pub mod dedup;

pub use dedup::{normalize_term, Deduplicator};
