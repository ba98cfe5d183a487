use crate::pattern::Span;

const HILIGHT_OPEN: &str = r#"<span class="hilight">"#;
const KEYWORD_OPEN: &str = r#"<span class="keyword">"#;
const SPAN_CLOSE: &str = "</span>";

/// Sort spans and union any that overlap or touch, so two patterns matching
/// the same text never produce nested keyword markers.
pub fn merge_spans(mut spans: Vec<Span>) -> Vec<Span> {
    spans.sort_by_key(|s| (s.start, s.end));

    let mut merged: Vec<Span> = Vec::with_capacity(spans.len());
    for span in spans {
        match merged.last_mut() {
            Some(last) if span.start <= last.end => last.end = last.end.max(span.end),
            _ => merged.push(span),
        }
    }
    merged
}

/// Inject highlight markup into an already-escaped line.
///
/// Every whitespace-delimited token containing at least one match span is
/// wrapped in a "hilight" marker, with the matched bytes nested in a
/// "keyword" marker; token characters outside the match stay inside the
/// hilight marker but outside the keyword marker. Tokens without matches and
/// inter-token whitespace pass through unchanged.
///
/// `spans` must be merged and sorted (see [`merge_spans`]) and refer to byte
/// offsets within `line`.
pub fn render_line(line: &str, spans: &[Span]) -> String {
    let mut out = String::with_capacity(line.len() + 64);
    let mut pos = 0;

    for (start, token) in tokens(line) {
        let end = start + token.len();
        out.push_str(&line[pos..start]);

        // Clamp spans to the token; a regex that matches across whitespace
        // contributes its in-token portion to each token it touches.
        let hits: Vec<Span> = spans
            .iter()
            .filter(|s| s.start < end && s.end > start)
            .map(|s| Span::new(s.start.max(start), s.end.min(end)))
            .collect();

        if hits.is_empty() {
            out.push_str(token);
        } else {
            out.push_str(HILIGHT_OPEN);
            let mut cursor = start;
            for hit in hits {
                out.push_str(&line[cursor..hit.start]);
                out.push_str(KEYWORD_OPEN);
                out.push_str(&line[hit.start..hit.end]);
                out.push_str(SPAN_CLOSE);
                cursor = hit.end;
            }
            out.push_str(&line[cursor..end]);
            out.push_str(SPAN_CLOSE);
        }

        pos = end;
    }

    out.push_str(&line[pos..]);
    out
}

/// Whitespace-delimited tokens with their starting byte offsets.
fn tokens(line: &str) -> Vec<(usize, &str)> {
    let mut out = Vec::new();
    let mut start = None;

    for (i, c) in line.char_indices() {
        if c.is_whitespace() {
            if let Some(s) = start.take() {
                out.push((s, &line[s..i]));
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        out.push((s, &line[s..]));
    }

    out
}
