//! Import statement formatting pass.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::FormatterConfig;
use crate::lexer::{in_protected, protected_spans};
use crate::tree::split_top_level;

static NAMED_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\bimport[ \t]*\{([^}]*)\}[ \t]*from[ \t]*['"]([^'"]+)['"][ \t]*;?"#).unwrap()
});

static DEFAULT_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\bimport[ \t]+([A-Za-z_$][A-Za-z0-9_$]*)[ \t]+from[ \t]*['"]([^'"]+)['"][ \t]*;?"#,
    )
    .unwrap()
});

/// Normalize `import` statements.
///
/// Named imports are re-joined with a single comma-space, never sorted;
/// `importFormat.spacesAroundImports` pads or tightens the braces. Default
/// imports get the same spacing treatment and stay brace-less. Both forms
/// come out single-quoted and semicolon-terminated. Namespace and
/// side-effect imports are left alone.
pub fn format_imports(text: &str, config: &FormatterConfig) -> String {
    let named = rewrite_named(text, config);
    rewrite_default(&named)
}

fn rewrite_named(text: &str, config: &FormatterConfig) -> String {
    let spans = protected_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in NAMED_IMPORT.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        if m.start() < last || in_protected(&spans, m.start()) {
            continue;
        }
        let names = split_top_level(caps.get(1).map_or("", |g| g.as_str()), &[',']);
        if names.is_empty() {
            continue;
        }
        let path = caps.get(2).map_or("", |g| g.as_str());
        let joined = names.join(", ");
        let braces = if config.import_format.spaces_around_imports {
            format!("{{ {joined} }}")
        } else {
            format!("{{{joined}}}")
        };

        out.push_str(&text[last..m.start()]);
        out.push_str(&format!("import {braces} from '{path}';"));
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}

fn rewrite_default(text: &str) -> String {
    let spans = protected_spans(text);
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for caps in DEFAULT_IMPORT.captures_iter(text) {
        let Some(m) = caps.get(0) else { continue };
        if m.start() < last || in_protected(&spans, m.start()) {
            continue;
        }
        let name = caps.get(1).map_or("", |g| g.as_str());
        let path = caps.get(2).map_or("", |g| g.as_str());

        out.push_str(&text[last..m.start()]);
        out.push_str(&format!("import {name} from '{path}';"));
        last = m.end();
    }
    out.push_str(&text[last..]);
    out
}
