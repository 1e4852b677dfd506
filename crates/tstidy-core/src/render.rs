//! Depth-based indentation renderer.
//!
//! Walks the bracket tree bottom-up and rebuilds the text with each block
//! body indented by nesting depth. Leaf nodes keep their source span; an
//! interior node puts its opener at the end of the current line, re-flows
//! its body one unit deeper, and places the closer on a line of its own.
//! Lines that start inside a string or comment are spliced back unchanged,
//! so literal interiors survive byte for byte.

use std::ops::Range;

use crate::config::FormatterConfig;
use crate::lexer::{in_protected, protected_spans};
use crate::tree::{parse, BracketNode};

/// Re-indent `source` according to its bracket nesting.
///
/// Top-level text outside any bracket is preserved verbatim. Unclosed
/// brackets pass through untouched from their opener to end of input.
pub fn render(source: &str, config: &FormatterConfig) -> String {
    let tree = parse(source);
    if tree.children.is_empty() {
        return source.to_string();
    }
    Renderer {
        source,
        spans: protected_spans(source),
        unit: config.indent_unit(),
    }
    .render_root(&tree)
}

struct Renderer<'a> {
    source: &'a str,
    spans: Vec<Range<usize>>,
    unit: String,
}

impl Renderer<'_> {
    /// Root-level text is never re-indented, only child blocks are.
    fn render_root(&self, root: &BracketNode) -> String {
        let mut out = String::with_capacity(self.source.len());
        let mut cursor = 0;
        for child in &root.children {
            out.push_str(&self.source[cursor..child.start]);
            match child.end {
                Some(end) if child.is_leaf() => {
                    out.push_str(&self.source[child.start..=end]);
                    cursor = end + 1;
                }
                Some(end) => {
                    out.push_str(&self.render_node(child));
                    cursor = end + 1;
                }
                None => {
                    out.push_str(&self.source[child.start..]);
                    cursor = self.source.len();
                }
            }
        }
        out.push_str(&self.source[cursor..]);
        out
    }

    fn render_node(&self, node: &BracketNode) -> String {
        let end = match node.end {
            Some(end) => end,
            None => return self.source[node.start..].to_string(),
        };

        let mut body = BodyWriter::default();
        let mut cursor = node.start + 1;
        for child in &node.children {
            self.push_span(&mut body, cursor, child.start);
            let child_end = match child.end {
                Some(child_end) => child_end,
                None => {
                    // Positional closing means a closed node cannot contain
                    // an open child; handled anyway so the walk stays total.
                    self.push_span(&mut body, child.start, end);
                    cursor = end;
                    break;
                }
            };
            if child.is_leaf() {
                self.push_span(&mut body, child.start, child_end + 1);
            } else {
                body.push_block(&self.render_node(child));
            }
            cursor = child_end + 1;
        }
        if cursor < end {
            self.push_span(&mut body, cursor, end);
        }

        // The actual source characters are kept, so a kind-mismatched
        // closer survives rendering.
        let opener = &self.source[node.start..node.start + 1];
        let closer = &self.source[end..end + 1];
        let closer_indent = self.unit.repeat(node.depth.saturating_sub(1));

        let lines = body.finish(node.depth, &self.unit);
        if lines.is_empty() {
            return format!("{opener}\n{closer_indent}{closer}");
        }
        let mut out = String::with_capacity(self.source.len() / 2);
        out.push_str(opener);
        out.push('\n');
        out.push_str(&lines.join("\n"));
        out.push('\n');
        out.push_str(&closer_indent);
        out.push_str(closer);
        out
    }

    /// Feed a source span into the writer character by character, carrying
    /// the protection flag of each position so string and comment content
    /// is never trimmed.
    fn push_span(&self, body: &mut BodyWriter, from: usize, to: usize) {
        for (i, c) in self.source[from..to].char_indices() {
            let protected = in_protected(&self.spans, from + i);
            if c == '\n' {
                body.newline(protected);
            } else {
                body.push_char(c, protected);
            }
        }
    }
}

struct Line {
    text: String,
    verbatim: bool,
}

/// Accumulates the body lines of one interior node.
///
/// A line is `verbatim` when it must not be trimmed or re-indented: either
/// it continues a multi-line string or comment, or it belongs to an already
/// rendered child block whose indentation is final.
#[derive(Default)]
struct BodyWriter {
    lines: Vec<Line>,
    cur: String,
    cur_verbatim: bool,
    last_protected: bool,
}

impl BodyWriter {
    fn push_char(&mut self, c: char, protected: bool) {
        self.cur.push(c);
        self.last_protected = protected;
    }

    fn push_generated(&mut self, s: &str) {
        self.cur.push_str(s);
        self.last_protected = false;
    }

    /// A newline inside a protected span means the next line continues the
    /// literal and must be kept verbatim.
    fn newline(&mut self, protected: bool) {
        self.flush(protected);
    }

    fn flush(&mut self, next_verbatim: bool) {
        let mut text = std::mem::take(&mut self.cur);
        if !self.last_protected {
            let trimmed = text.trim_end().len();
            text.truncate(trimmed);
        }
        self.lines.push(Line {
            text,
            verbatim: self.cur_verbatim,
        });
        self.cur_verbatim = next_verbatim;
        self.last_protected = false;
    }

    /// Splice the rendered output of a child block. Its first line joins the
    /// current line, interior lines keep the indentation the child already
    /// computed, and its closer line starts a fresh current line so trailing
    /// text like `;` or `else` stays attached.
    fn push_block(&mut self, block: &str) {
        let mut fragments = block.split('\n');
        if let Some(first) = fragments.next() {
            self.push_generated(first);
        }
        let rest: Vec<&str> = fragments.collect();
        if let Some((last, mid)) = rest.split_last() {
            self.flush(false);
            for line in mid {
                self.lines.push(Line {
                    text: (*line).to_string(),
                    verbatim: true,
                });
            }
            self.push_generated(last);
        }
    }

    fn finish(mut self, depth: usize, unit: &str) -> Vec<String> {
        self.flush(false);
        let mut lines = self.lines;

        let is_blank = |line: &Line| !line.verbatim && line.text.trim().is_empty();
        while lines.first().is_some_and(is_blank) {
            lines.remove(0);
        }
        while lines.last().is_some_and(is_blank) {
            lines.pop();
        }

        let indent = unit.repeat(depth);
        lines
            .into_iter()
            .map(|line| {
                if line.verbatim {
                    line.text
                } else if line.text.trim().is_empty() {
                    String::new()
                } else {
                    format!("{indent}{}", line.text.trim_start())
                }
            })
            .collect()
    }
}
