//! Object literal formatting pass.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::FormatterConfig;
use crate::lexer::{in_protected, protected_spans};
use crate::passes::{line_indent_at, multiline_block};
use crate::tree::{contains_nested_brackets, find_matching_bracket, split_top_level};

static DECLARATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:const|let|var)\s+[A-Za-z_$][A-Za-z0-9_$]*").unwrap());

/// Format `const|let|var <name> [: <Type>] = { … }` initializers.
///
/// The initializer body must be flat. With more top-level items than
/// `objectFormatting.maxPropertiesPerLine` the items go one per line, one
/// unit deeper than the declaration line, with the closing brace back at the
/// declaration indentation; otherwise they join on one space-padded inline
/// line. Only the brace region is replaced, so surrounding text such as a
/// trailing `;` survives as written.
pub fn format_object_literals(text: &str, config: &FormatterConfig) -> String {
    let spans = protected_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for m in DECLARATION.find_iter(text) {
        if m.start() < last || in_protected(&spans, m.start()) {
            continue;
        }
        let Some((open, close)) = initializer_extent(text, m.end()) else {
            continue;
        };
        let inner = &text[open + 1..close];
        if contains_nested_brackets(inner) {
            continue;
        }
        let items = split_top_level(inner, &[',']);
        if items.is_empty() {
            continue;
        }

        out.push_str(&text[last..open]);
        if items.len() > config.object_formatting.max_properties_per_line {
            let indent = line_indent_at(text, m.start());
            out.push_str(&multiline_block(
                &items,
                '{',
                '}',
                ',',
                config.object_formatting.trailing_comma,
                indent,
                &config.indent_unit(),
            ));
        } else {
            out.push_str(&format!("{{ {} }}", items.join(", ")));
        }
        last = close + 1;
    }
    out.push_str(&text[last..]);
    out
}

/// Find the `{ … }` initializer span after the declared name.
///
/// Skips an optional `: Type` annotation, including a braced annotation
/// body, up to the assignment `=`. Arrow and comparison operators stop the
/// scan, as do `;`, end of input, and a newline outside annotation braces.
fn initializer_extent(text: &str, from: usize) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let mut i = skip_horizontal_ws(bytes, from);
    if bytes.get(i) == Some(&b':') {
        i = assignment_after_annotation(text, i + 1)?;
    } else if bytes.get(i) == Some(&b'=') && !matches!(bytes.get(i + 1), Some(b'=') | Some(b'>')) {
        i += 1;
    } else {
        return None;
    }

    let open = skip_horizontal_ws(bytes, i);
    if bytes.get(open) != Some(&b'{') {
        return None;
    }
    let close = find_matching_bracket(text, open)?;
    if bytes.get(close) != Some(&b'}') {
        return None;
    }
    Some((open, close))
}

fn assignment_after_annotation(text: &str, mut i: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    while i < bytes.len() {
        match bytes[i] {
            b'{' => i = find_matching_bracket(text, i)? + 1,
            b'=' => {
                if matches!(bytes.get(i + 1), Some(b'=') | Some(b'>'))
                    || matches!(bytes[i - 1], b'<' | b'>' | b'!' | b'=')
                {
                    return None;
                }
                return Some(i + 1);
            }
            b';' | b'\n' => return None,
            _ => i += 1,
        }
    }
    None
}

fn skip_horizontal_ws(bytes: &[u8], mut i: usize) -> usize {
    while matches!(bytes.get(i), Some(b' ') | Some(b'\t')) {
        i += 1;
    }
    i
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(max: usize, trailing: bool) -> FormatterConfig {
        let mut config = FormatterConfig::default();
        config.object_formatting.max_properties_per_line = max;
        config.object_formatting.trailing_comma = trailing;
        config
    }

    #[test]
    fn explodes_over_threshold() {
        let source = r#"const test = {nice: true, hello: "yes"};"#;
        let expected = "const test = {\n  nice: true,\n  hello: \"yes\"\n};";
        assert_eq!(format_object_literals(source, &config(1, false)), expected);
    }

    #[test]
    fn inlines_at_threshold() {
        let source = r#"const test = {nice: true, hello: "yes"};"#;
        let expected = r#"const test = { nice: true, hello: "yes" };"#;
        assert_eq!(format_object_literals(source, &config(2, false)), expected);
    }

    #[test]
    fn trailing_comma_lands_on_last_item() {
        let source = "let o = {a: 1, b: 2};";
        let expected = "let o = {\n  a: 1,\n  b: 2,\n};";
        assert_eq!(format_object_literals(source, &config(1, true)), expected);
    }

    #[test]
    fn braced_annotation_is_skipped_not_rewritten() {
        let source = "const a: {x: number} = {x: 1, y: 2};";
        let expected = "const a: {x: number} = {\n  x: 1,\n  y: 2\n};";
        assert_eq!(format_object_literals(source, &config(1, false)), expected);
    }

    #[test]
    fn indented_declaration_keeps_its_indent() {
        let source = "  const p = {a: 1, b: 2};";
        let expected = "  const p = {\n    a: 1,\n    b: 2\n  };";
        assert_eq!(format_object_literals(source, &config(1, false)), expected);
    }

    #[test]
    fn nested_initializer_passes_through() {
        let source = "const a = {x: {y: 1}, z: 2};";
        assert_eq!(format_object_literals(source, &config(1, false)), source);
    }

    #[test]
    fn commented_declaration_passes_through() {
        let source = "// const a = {x: 1, y: 2};";
        assert_eq!(format_object_literals(source, &config(1, false)), source);
    }

    #[test]
    fn quoted_declaration_passes_through() {
        let source = r#"const s = "let a = {x: 1, y: 2}";"#;
        assert_eq!(format_object_literals(source, &config(1, false)), source);
    }

    #[test]
    fn loop_headers_are_not_initializers() {
        let source = "for (let i = 0; i < n; i++) { x(); }";
        assert_eq!(format_object_literals(source, &config(1, false)), source);
        let of_loop = "for (const item of items) { y(); }";
        assert_eq!(format_object_literals(of_loop, &config(1, false)), of_loop);
    }

    #[test]
    fn destructuring_is_untouched() {
        let source = "const {a, b} = pair;";
        assert_eq!(format_object_literals(source, &config(1, false)), source);
    }

    #[test]
    fn empty_initializer_is_untouched() {
        let source = "let cache = {};";
        assert_eq!(format_object_literals(source, &config(1, false)), source);
    }

    #[test]
    fn multiline_form_is_a_fixed_point() {
        let source = r#"const test = {nice: true, hello: "yes"};"#;
        let cfg = config(1, false);
        let once = format_object_literals(source, &cfg);
        assert_eq!(format_object_literals(&once, &cfg), once);
    }

    #[test]
    fn arrow_function_assignment_passes_through() {
        let source = "const f = () => ({a: 1, b: 2});";
        assert_eq!(format_object_literals(source, &config(1, false)), source);
    }

    #[test]
    fn unclosed_initializer_passes_through() {
        let source = "const a = {x: 1, y: 2";
        assert_eq!(format_object_literals(source, &config(1, false)), source);
    }
}
