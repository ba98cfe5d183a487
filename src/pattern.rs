use anyhow::{bail, Context, Result};
use regex::{Regex, RegexBuilder};

/// Half-open byte range of a match within a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A compiled pattern that matches whole tokens and reports where they are.
///
/// Tokens are bounded by non-word characters on both sides, and a hyphen
/// counts as a boundary: `word("pod")` matches inside `pod-blah` but never
/// inside `podcast`.
#[derive(Debug, Clone)]
pub struct TokenPattern {
    regex: Regex,
}

impl TokenPattern {
    /// Whole-token pattern for a single literal word. Case-sensitive.
    pub fn word(word: &str) -> Result<Self> {
        Self::words(&[word], false)
    }

    /// Whole-token alternation over several literal words. This is how a
    /// failure pattern is built from a caller-chosen vocabulary.
    ///
    /// `\b` only asserts between a word and a non-word character, so it is
    /// applied per word and only at word-character edges; a literal that
    /// starts or ends with a non-word character (`[`, `:`, ...) is its own
    /// boundary there.
    pub fn words<S: AsRef<str>>(words: &[S], case_insensitive: bool) -> Result<Self> {
        if words.is_empty() || words.iter().any(|w| w.as_ref().is_empty()) {
            bail!("token pattern requires at least one non-empty word");
        }

        let alternatives: Vec<String> = words
            .iter()
            .map(|w| {
                let word = w.as_ref();
                let mut alt = String::new();
                if word.chars().next().is_some_and(is_word_char) {
                    alt.push_str(r"\b");
                }
                alt.push_str(&regex::escape(word));
                if word.chars().last().is_some_and(is_word_char) {
                    alt.push_str(r"\b");
                }
                alt
            })
            .collect();
        let pattern = format!("(?:{})", alternatives.join("|"));
        Self::from_regex(&pattern, case_insensitive)
    }

    /// Compile an arbitrary regex for callers that need more than literal
    /// words. Boundary handling is then the caller's responsibility.
    pub fn from_regex(pattern: &str, case_insensitive: bool) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_insensitive)
            .build()
            .with_context(|| format!("Invalid pattern: {}", pattern))?;

        Ok(Self { regex })
    }

    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// First match span within the line, if any.
    pub fn find(&self, line: &str) -> Option<Span> {
        self.regex.find(line).map(|m| Span::new(m.start(), m.end()))
    }

    /// All non-overlapping match spans within the line, left to right.
    pub fn find_all(&self, line: &str) -> Vec<Span> {
        self.regex
            .find_iter(line)
            .map(|m| Span::new(m.start(), m.end()))
            .collect()
    }
}

/// The character class `\b` keys on, mirroring the regex crate's `\w`.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
