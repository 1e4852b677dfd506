//! Bracket region trees
//!
//! Builds the hierarchical model of nested `{}`, `()`, `[]` regions that
//! drives depth-based indentation. Brackets only count while the classifier
//! reports code; bracket characters inside strings, comments and template
//! interpolation are plain text. This module is also the home of the
//! canonical top-level separator definition shared by every normalization
//! pass, so no pass keeps a private notion of nesting depth.

use crate::lexer::Classifier;

/// Kind of a tree node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Synthetic document node, never emitted as brackets
    Root,
    Curly,
    Square,
    Round,
}

impl NodeKind {
    fn from_opener(c: char) -> Option<NodeKind> {
        match c {
            '{' => Some(NodeKind::Curly),
            '[' => Some(NodeKind::Square),
            '(' => Some(NodeKind::Round),
            _ => None,
        }
    }

    /// Opening and closing delimiter characters; `None` for the root
    pub fn delimiters(self) -> Option<(char, char)> {
        match self {
            NodeKind::Root => None,
            NodeKind::Curly => Some(('{', '}')),
            NodeKind::Square => Some(('[', ']')),
            NodeKind::Round => Some(('(', ')')),
        }
    }
}

fn is_closer(c: char) -> bool {
    matches!(c, '}' | ']' | ')')
}

/// One nested bracket region.
///
/// `start` is the byte offset of the opening bracket (0 for the root) and
/// `end` the offset of the closing bracket. A node left unclosed at end of
/// input keeps `end == None`; it renders as a verbatim leaf and never aborts
/// the build. Children are ordered by `start` and never overlap. Ownership
/// runs parent to children; no parent links are stored.
#[derive(Debug, Clone)]
pub struct BracketNode {
    pub kind: NodeKind,
    pub start: usize,
    pub end: Option<usize>,
    pub children: Vec<BracketNode>,
    pub depth: usize,
}

impl BracketNode {
    fn new(kind: NodeKind, start: usize) -> Self {
        Self {
            kind,
            start,
            end: None,
            children: Vec::new(),
            depth: 0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.kind == NodeKind::Root
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_closed(&self) -> bool {
        self.end.is_some()
    }
}

/// Parse the bracket structure of `source`.
///
/// Closing is positional: any closing character closes the innermost open
/// node regardless of kind, so a stray `)` can close a `{` node. The
/// mismatch is logged at debug level and otherwise preserved. A closer with
/// no open node is ignored and remains ordinary text. Depths are assigned in
/// one top-down pass once the walk completes.
pub fn parse(source: &str) -> BracketNode {
    let mut stack = vec![BracketNode::new(NodeKind::Root, 0)];
    let mut classifier = Classifier::new();

    let mut chars = source.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        if !classifier.step(c, next).is_code() {
            continue;
        }

        if let Some(kind) = NodeKind::from_opener(c) {
            stack.push(BracketNode::new(kind, i));
        } else if is_closer(c) {
            if stack.len() > 1 {
                if let Some(mut node) = stack.pop() {
                    if node.kind.delimiters().map(|(_, close)| close) != Some(c) {
                        tracing::debug!(
                            "bracket kind mismatch: '{}' at byte {} closes the bracket opened at byte {}",
                            c,
                            i,
                            node.start
                        );
                    }
                    node.end = Some(i);
                    if let Some(parent) = stack.last_mut() {
                        parent.children.push(node);
                    }
                }
            } else {
                tracing::debug!("ignoring stray '{}' at byte {}", c, i);
            }
        }
    }

    // Unclosed nodes unwind onto their parents with end left unset.
    while stack.len() > 1 {
        if let Some(node) = stack.pop() {
            if let Some(parent) = stack.last_mut() {
                parent.children.push(node);
            }
        }
    }

    let mut root = stack.pop().unwrap_or_else(|| BracketNode::new(NodeKind::Root, 0));
    assign_depths(&mut root, 0);
    root
}

fn assign_depths(node: &mut BracketNode, depth: usize) {
    node.depth = depth;
    for child in &mut node.children {
        assign_depths(child, depth + 1);
    }
}

/// Split `fragment` on separators at bracket depth zero.
///
/// This is the canonical definition of a top-level separator: depth follows
/// the same classifier-driven walk that builds the tree, so separators
/// nested inside further brackets, strings or comments never count. Items
/// are trimmed and empty items dropped, which also swallows a trailing
/// separator in the input.
pub fn split_top_level(fragment: &str, seps: &[char]) -> Vec<String> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut item_start = 0usize;
    let mut classifier = Classifier::new();

    let mut chars = fragment.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        if !classifier.step(c, next).is_code() {
            continue;
        }
        if NodeKind::from_opener(c).is_some() {
            depth += 1;
        } else if is_closer(c) {
            depth = depth.saturating_sub(1);
        } else if depth == 0 && seps.contains(&c) {
            items.push(fragment[item_start..i].trim().to_string());
            item_start = i + c.len_utf8();
        }
    }
    items.push(fragment[item_start..].trim().to_string());
    items.retain(|item| !item.is_empty());
    items
}

/// Locate the closer matching the opener at `open_idx`, positionally.
///
/// The scan starts from the beginning of `text` so that string and comment
/// context before the opener is honored. Returns `None` when `open_idx` is
/// not an opening bracket or the region never closes.
pub fn find_matching_bracket(text: &str, open_idx: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut classifier = Classifier::new();

    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let class = classifier.step(c, next);
        if i < open_idx {
            continue;
        }
        if i == open_idx {
            if !class.is_code() || NodeKind::from_opener(c).is_none() {
                return None;
            }
            depth = 1;
            continue;
        }
        if !class.is_code() {
            continue;
        }
        if NodeKind::from_opener(c).is_some() {
            depth += 1;
        } else if is_closer(c) {
            depth -= 1;
            if depth == 0 {
                return Some(i);
            }
        }
    }
    None
}

/// Whether any code-classified bracket occurs in `fragment`.
///
/// Passes use this to refuse constructs with nested structure and degrade to
/// pass-through.
pub fn contains_nested_brackets(fragment: &str) -> bool {
    let mut classifier = Classifier::new();
    let mut chars = fragment.char_indices().peekable();
    while let Some((_, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        if classifier.step(c, next).is_code() && (NodeKind::from_opener(c).is_some() || is_closer(c))
        {
            return true;
        }
    }
    false
}
