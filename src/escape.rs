/// Escape text for inclusion in HTML.
///
/// Single pass, so each input character is escaped exactly once and nothing
/// is ever re-escaped. The entity spellings match what the surrounding
/// dashboard's template engine emits.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }

    out
}
