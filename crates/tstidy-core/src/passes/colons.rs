//! Colon spacing normalization.

use std::sync::LazyLock;

use regex::Regex;

use crate::lexer::{in_protected, protected_spans};

static COLON_SPACING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t]*:[ \t]*(\S)").unwrap());

/// Normalize horizontal spacing around a code `:` to a single `": "`.
///
/// Runs on the raw text before rendering. Colons inside strings and
/// comments are skipped, and the pattern requires a non-space character on
/// the same line after the colon, so lines are never joined and a
/// line-terminating colon stays as written.
pub fn normalize_colon_spacing(text: &str) -> String {
    let spans = protected_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in COLON_SPACING.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        let colon_pos = m.start() + m.as_str().find(':').unwrap_or(0);
        if in_protected(&spans, colon_pos) {
            continue;
        }
        out.push_str(&text[last..m.start()]);
        out.push_str(": ");
        out.push_str(caps.get(1).map_or("", |g| g.as_str()));
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tightens_and_widens_to_single_space() {
        assert_eq!(normalize_colon_spacing("a:b"), "a: b");
        assert_eq!(normalize_colon_spacing("a :b"), "a: b");
        assert_eq!(normalize_colon_spacing("a  :  b"), "a: b");
    }

    #[test]
    fn already_normalized_is_unchanged() {
        assert_eq!(normalize_colon_spacing("let a: string = b;"), "let a: string = b;");
    }

    #[test]
    fn applies_to_every_code_colon() {
        assert_eq!(
            normalize_colon_spacing("const o = {a :1, b:2};"),
            "const o = {a: 1, b: 2};"
        );
    }

    #[test]
    fn string_interiors_keep_their_colons() {
        let source = "const url = 'http://example.com';";
        assert_eq!(normalize_colon_spacing(source), source);
        let double = r#"const s = "a : b";"#;
        assert_eq!(normalize_colon_spacing(double), double);
    }

    #[test]
    fn comments_keep_their_colons() {
        let source = "// note:   indent\nlet x = 1;";
        assert_eq!(normalize_colon_spacing(source), source);
        let block = "/* a :b */ let x = 1;";
        assert_eq!(normalize_colon_spacing(block), block);
    }

    #[test]
    fn line_ending_colon_is_untouched() {
        let source = "switch (x) {\ncase 1:\nbreak;\n}";
        assert_eq!(normalize_colon_spacing(source), source);
    }
}
