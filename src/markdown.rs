//! Small Markdown helpers for the terminal report.

/// Backslash-escape the bracket and parenthesis characters that terminate link text or targets.
pub(crate) fn escape_md_link(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '[' | ']' | '(' | ')') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Collapse line breaks so free text stays on a single heading line.
pub(crate) fn sanitize_heading(s: &str) -> String {
    s.replace(['\r', '\n'], " ")
}

/// The first `max_chars` characters of `s`, with `...` appended when anything was cut.
pub(crate) fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}...", &s[..end]),
        None => s.to_string(),
    }
}
