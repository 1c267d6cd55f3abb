//! Cleanup of raw text fragments from quiz exports.
//!
//! Exports embed formatting directives such as `[!b]`, `[!i:3]` or
//! `[!info:3]` and wrap formula spans in `$`. Neither carries meaning for
//! the exam, so both are stripped before whitespace is collapsed.

/// Whitespace as the export format understands it: Unicode `White_Space`
/// without NEL (U+0085), plus the byte-order mark that editors leave at
/// the start of files.
pub(crate) fn is_space(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Characters a header or option line never contains.
pub(crate) fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Strips directives and `$` delimiters, collapses whitespace runs into a
/// single space and trims the result.
///
/// Idempotent: a directive exposed by removing another one or a `$`
/// (`[$!b]`, `[[!a]!b]`) is removed in the same pass, so the output never
/// contains a `[!` followed by a `]`.
pub fn normalize(raw: &str) -> String {
    collapse_whitespace(&strip_directives(raw))
}

/// Drops every `$` and every `[!...]` span in a single pass.
///
/// A `]` closes the leftmost `[!` still open and discards everything from
/// it. Openers are tracked as positions in the output, so an opener formed
/// by a removal (a `[` left in front of an incoming `!`) is found without
/// rescanning.
fn strip_directives(input: &str) -> String {
    let mut out: Vec<char> = Vec::with_capacity(input.len());
    let mut open: Option<usize> = None;

    for c in input.chars() {
        match c {
            '$' => {}
            ']' if open.is_some() => {
                if let Some(start) = open.take() {
                    out.truncate(start);
                }
            }
            '!' if out.last() == Some(&'[') => {
                if open.is_none() {
                    open = Some(out.len() - 1);
                }
                out.push(c);
            }
            _ => out.push(c),
        }
    }

    out.into_iter().collect()
}

fn collapse_whitespace(input: &str) -> String {
    input
        .split(is_space)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
