use crate::escape::escape_html;
use crate::highlight::{merge_spans, render_line};
use crate::pattern::{Span, TokenPattern};
use anyhow::Result;
use std::collections::HashMap;
use tracing::debug;

/// Lines of context kept on each side of an interesting line.
pub const DEFAULT_CONTEXT: usize = 4;

/// Filter name -> literal value; an empty value disables that filter.
pub type Filters = HashMap<String, String>;

/// Reference id (as it appears verbatim in logs) -> human-meaningful
/// descriptor, built by an external log-correlation pass. Read-only here.
pub type ObjRefDict = HashMap<String, String>;

/// Condenses a log into an HTML-safe excerpt of its interesting lines.
///
/// A line is interesting if the error pattern matches it, if any enabled
/// filter value matches it as a whole token, or if it contains a reference id
/// whose descriptor equals an enabled filter value. Interesting lines keep
/// `context` lines around them; everything else collapses.
#[derive(Debug, Clone)]
pub struct Digester {
    context: usize,
}

impl Default for Digester {
    fn default() -> Self {
        Self::new()
    }
}

impl Digester {
    pub fn new() -> Self {
        Self {
            context: DEFAULT_CONTEXT,
        }
    }

    pub fn with_context(context: usize) -> Self {
        Self { context }
    }

    /// Digest `text` into a line-break-joined, HTML-safe excerpt.
    ///
    /// `skip_fmt` is called once per collapsed run with the number of lines
    /// it replaces; the engine does not choose the wording. The result embeds
    /// directly into a larger HTML document without further escaping. A
    /// document with no interesting lines digests to the empty string.
    pub fn digest<F>(
        &self,
        text: &str,
        error_pattern: &TokenPattern,
        filters: &Filters,
        skip_fmt: F,
        objref_dict: Option<&ObjRefDict>,
    ) -> Result<String>
    where
        F: Fn(usize) -> String,
    {
        // Escape up front; matching and markup both run over the escaped
        // lines, so match spans stay valid for injection.
        let lines: Vec<String> = text.split('\n').map(|l| escape_html(l)).collect();
        let extra = extra_patterns(filters, objref_dict)?;

        let mut spans_by_line: Vec<Vec<Span>> = Vec::with_capacity(lines.len());
        for line in &lines {
            let mut spans = error_pattern.find_all(line);
            for pattern in &extra {
                spans.extend(pattern.find_all(line));
            }
            spans_by_line.push(merge_spans(spans));
        }

        let interesting = spans_by_line.iter().filter(|s| !s.is_empty()).count();
        debug!(
            lines = lines.len(),
            interesting,
            extra_patterns = extra.len(),
            "scanned log"
        );
        if interesting == 0 {
            return Ok(String::new());
        }

        let covered = paint_coverage(&spans_by_line, self.context);

        let mut out: Vec<String> = Vec::new();
        let n = lines.len();
        let mut i = 0;
        while i < n {
            if covered[i] {
                if spans_by_line[i].is_empty() {
                    out.push(lines[i].clone());
                } else {
                    out.push(render_line(&lines[i], &spans_by_line[i]));
                }
                i += 1;
            } else {
                let start = i;
                while i < n && !covered[i] {
                    i += 1;
                }
                if i - start >= 2 {
                    out.push(skip_fmt(i - start));
                }
            }
        }

        debug!(emitted = out.len(), "digest complete");
        Ok(out.join("\n"))
    }
}

/// Digest with the default context radius.
pub fn digest<F>(
    text: &str,
    error_pattern: &TokenPattern,
    filters: &Filters,
    skip_fmt: F,
    objref_dict: Option<&ObjRefDict>,
) -> Result<String>
where
    F: Fn(usize) -> String,
{
    Digester::new().digest(text, error_pattern, filters, skip_fmt, objref_dict)
}

/// Word patterns for every enabled filter value, plus one for every
/// dictionary id whose descriptor equals an enabled filter value (indirect
/// correlation; never fires without a dictionary).
fn extra_patterns(filters: &Filters, objref_dict: Option<&ObjRefDict>) -> Result<Vec<TokenPattern>> {
    let enabled: Vec<&str> = filters
        .values()
        .filter(|v| !v.is_empty())
        .map(|v| v.as_str())
        .collect();

    let mut patterns = Vec::with_capacity(enabled.len());
    for value in &enabled {
        patterns.push(TokenPattern::word(value)?);
    }

    if let Some(dict) = objref_dict {
        for (id, descriptor) in dict {
            if enabled.iter().any(|v| *v == descriptor.as_str()) {
                patterns.push(TokenPattern::word(id)?);
            }
        }
    }

    Ok(patterns)
}

/// Boolean coverage over line positions: every interesting line paints
/// `[i - context, i + context]` clamped to the document, so overlapping
/// windows merge for free. A single uncovered line wedged against the next
/// window (interior, or at position 0) is then absorbed and shown, since a
/// marker would be longer than the line it hides; a single uncovered line at
/// the document tail stays uncovered and is truncated by the caller.
fn paint_coverage(spans_by_line: &[Vec<Span>], context: usize) -> Vec<bool> {
    let n = spans_by_line.len();
    let mut covered = vec![false; n];

    for (i, spans) in spans_by_line.iter().enumerate() {
        if spans.is_empty() {
            continue;
        }
        let start = i.saturating_sub(context);
        let end = (i + context).min(n - 1);
        for slot in &mut covered[start..=end] {
            *slot = true;
        }
    }

    for i in 0..n {
        if !covered[i] && i + 1 < n && covered[i + 1] && (i == 0 || covered[i - 1]) {
            covered[i] = true;
        }
    }

    covered
}
