//! Word-boundary vocabulary matching.
//!
//! Terms and vocabulary entries are tokenized the same way (lowercase,
//! split on anything that is not alphanumeric). A vocabulary entry matches
//! when its tokens appear consecutively in the term. A term token also
//! matches its singular vocabulary form ("dashboards" matches "dashboard"),
//! so plurals do not need separate entries.

/// Lowercase tokens of a term.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn token_matches(vocab: &str, token: &str) -> bool {
    token == vocab
        || token.strip_suffix('s') == Some(vocab)
        || token.strip_suffix("es") == Some(vocab)
}

fn phrase_in(phrase: &[String], tokens: &[String]) -> bool {
    if phrase.is_empty() || phrase.len() > tokens.len() {
        return false;
    }
    tokens.windows(phrase.len()).any(|window| {
        window
            .iter()
            .zip(phrase)
            .all(|(token, vocab)| token_matches(vocab, token))
    })
}

/// Pre-tokenized vocabulary list.
#[derive(Debug, Clone, Default)]
pub struct TermMatcher {
    phrases: Vec<Vec<String>>,
}

impl TermMatcher {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = terms
            .into_iter()
            .map(|t| tokenize(t.as_ref()))
            .filter(|p| !p.is_empty())
            .collect();
        Self { phrases }
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    /// True when any vocabulary entry occurs in `tokens`.
    pub fn matches(&self, tokens: &[String]) -> bool {
        self.phrases.iter().any(|p| phrase_in(p, tokens))
    }

    /// Number of distinct vocabulary entries present in `tokens`.
    pub fn count_matches(&self, tokens: &[String]) -> usize {
        self.phrases.iter().filter(|p| phrase_in(p, tokens)).count()
    }

    /// True when a single-token entry occurs strictly inside the term,
    /// never as its first or last token.
    pub fn matches_interior(&self, tokens: &[String]) -> bool {
        if tokens.len() < 3 {
            return false;
        }
        let interior = &tokens[1..tokens.len() - 1];
        self.phrases
            .iter()
            .filter(|p| p.len() == 1)
            .any(|p| interior.iter().any(|t| t == &p[0]))
    }
}
