//! Type annotation block formatting pass.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::FormatterConfig;
use crate::lexer::{in_protected, protected_spans};
use crate::passes::{line_indent_at, multiline_block};
use crate::tree::{contains_nested_brackets, find_matching_bracket, split_top_level};

static ANNOTATED_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:const|let|var)\s+[A-Za-z_$][A-Za-z0-9_$]*[ \t]*:[ \t]*\{").unwrap()
});

/// Format the `{ … }` type annotation of a declaration.
///
/// Properties are split on top-level commas and semicolons and re-emitted
/// with semicolons. Over `typeFormatting.maxPropertiesPerLine` they go one
/// per line with the last semicolon controlled by `trailingSemicolon`;
/// otherwise they join on one space-padded inline line. Anchoring on the
/// declaration keywords keeps parameter annotations and object members out
/// of reach.
pub fn format_type_annotations(text: &str, config: &FormatterConfig) -> String {
    let spans = protected_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in ANNOTATED_DECLARATION.find_iter(text) {
        if m.start() < last || in_protected(&spans, m.start()) {
            continue;
        }
        let open = m.end() - 1;
        let Some(close) = find_matching_bracket(text, open) else {
            continue;
        };
        if text.as_bytes().get(close) != Some(&b'}') {
            continue;
        }
        let inner = &text[open + 1..close];
        if contains_nested_brackets(inner) {
            continue;
        }
        let items = split_top_level(inner, &[',', ';']);
        if items.is_empty() {
            continue;
        }

        out.push_str(&text[last..open]);
        if items.len() > config.type_formatting.max_properties_per_line {
            let indent = line_indent_at(text, m.start());
            out.push_str(&multiline_block(
                &items,
                '{',
                '}',
                ';',
                config.type_formatting.trailing_semicolon,
                indent,
                &config.indent_unit(),
            ));
        } else {
            out.push_str(&format!("{{ {} }}", items.join("; ")));
        }
        last = close + 1;
    }
    out.push_str(&text[last..]);
    out
}
