pub mod relevance;
pub mod vocabulary;

pub use relevance::{BatchContext, RelevanceScorer, ScoreBreakdown};
pub use vocabulary::{tokenize, TermMatcher};
