//! Array literal formatting pass.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::FormatterConfig;
use crate::lexer::{in_protected, protected_spans};
use crate::passes::{line_indent_at, multiline_block};
use crate::tree::{contains_nested_brackets, find_matching_bracket, split_top_level};

static ASSIGNED_ARRAY: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"=[ \t]*\[").unwrap());

/// Format a flat `[ … ]` literal that follows an assignment.
///
/// Over `arrayFormatting.maxElementsPerLine` the elements go one per line,
/// every element comma-terminated, with the closing bracket back at the
/// statement line's indentation; `trailingSemicolon` then appends a `;`
/// when none follows. At or under the threshold the elements join on one
/// unpadded inline line.
pub fn format_arrays(text: &str, config: &FormatterConfig) -> String {
    let spans = protected_spans(text);
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in ASSIGNED_ARRAY.find_iter(text) {
        if m.start() < last || in_protected(&spans, m.start()) {
            continue;
        }
        // The match starts at `=`; comparison operands are not assignments.
        if m.start() > 0 && matches!(bytes[m.start() - 1], b'=' | b'<' | b'>' | b'!') {
            continue;
        }
        let open = m.end() - 1;
        let Some(close) = find_matching_bracket(text, open) else {
            continue;
        };
        if bytes.get(close) != Some(&b']') {
            continue;
        }
        let inner = &text[open + 1..close];
        if contains_nested_brackets(inner) {
            continue;
        }
        let items = split_top_level(inner, &[',']);
        if items.is_empty() {
            continue;
        }

        out.push_str(&text[last..open]);
        if items.len() > config.array_formatting.max_elements_per_line {
            let indent = line_indent_at(text, m.start());
            out.push_str(&multiline_block(
                &items,
                '[',
                ']',
                ',',
                true,
                indent,
                &config.indent_unit(),
            ));
            if config.array_formatting.trailing_semicolon && bytes.get(close + 1) != Some(&b';') {
                out.push(';');
            }
        } else {
            out.push_str(&format!("[{}]", items.join(", ")));
        }
        last = close + 1;
    }
    out.push_str(&text[last..]);
    out
}
