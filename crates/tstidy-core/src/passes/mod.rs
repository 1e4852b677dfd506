//! Construct normalization passes.
//!
//! A fixed pipeline over the renderer output: object literals, then type
//! annotation blocks, then arrays, then imports. Each pass is one pure
//! function that runs exactly once, left to right, with no retry loop; the
//! emission shapes re-parse to themselves on the next run, which is what
//! keeps the pipeline idempotent. A candidate a pass cannot fully recognize
//! (unclosed or nested brackets, zero items, anchor inside a string or
//! comment) is left untouched.
//!
//! The colon spacing pass is the exception to the ordering: it runs on the
//! raw text before rendering.

mod arrays;
mod colons;
mod imports;
mod objects;
mod types;

pub use arrays::format_arrays;
pub use colons::normalize_colon_spacing;
pub use imports::format_imports;
pub use objects::format_object_literals;
pub use types::format_type_annotations;

use crate::config::FormatterConfig;

/// Run the post-render normalization pipeline in its fixed order.
pub fn apply(text: &str, config: &FormatterConfig) -> String {
    let text = format_object_literals(text, config);
    let text = format_type_annotations(&text, config);
    let text = format_arrays(&text, config);
    format_imports(&text, config)
}

/// Leading whitespace of the line containing `pos`.
pub(crate) fn line_indent_at(text: &str, pos: usize) -> &str {
    let line_start = text[..pos].rfind('\n').map_or(0, |i| i + 1);
    let line = &text[line_start..];
    let end = line
        .char_indices()
        .find(|&(_, c)| c != ' ' && c != '\t')
        .map_or(line.len(), |(i, _)| i);
    &line[..end]
}

/// Emit items one per line between `open` and `close`, one unit deeper than
/// `indent`. Every item except the last is separator-terminated; the last
/// only when `trailing_sep` is set.
pub(crate) fn multiline_block(
    items: &[String],
    open: char,
    close: char,
    sep: char,
    trailing_sep: bool,
    indent: &str,
    unit: &str,
) -> String {
    let mut out = String::new();
    out.push(open);
    out.push('\n');
    for (idx, item) in items.iter().enumerate() {
        out.push_str(indent);
        out.push_str(unit);
        out.push_str(item);
        if idx + 1 < items.len() || trailing_sep {
            out.push(sep);
        }
        out.push('\n');
    }
    out.push_str(indent);
    out.push(close);
    out
}
