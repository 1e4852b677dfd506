//! Lexical classification
//!
//! Distinguishes code from strings and comments one character at a time.
//! The classifier is the only genuine state machine in the pipeline: the
//! bracket tree builder consumes its stream, and the renderer and passes
//! use the derived protected spans to keep literal contents byte-identical.

use std::ops::Range;

/// Lexical context of a single input position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    Code,
    LineComment,
    BlockComment,
    SingleQuoteString,
    DoubleQuoteString,
    TemplateString,
}

impl LexState {
    /// Whether brackets and separators at this position are structural
    pub fn is_code(self) -> bool {
        self == LexState::Code
    }

    pub fn is_string(self) -> bool {
        matches!(
            self,
            LexState::SingleQuoteString | LexState::DoubleQuoteString | LexState::TemplateString
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, LexState::LineComment | LexState::BlockComment)
    }
}

/// Streaming six-state classifier.
///
/// `//` outside strings opens a line comment until the next newline (the
/// newline itself is code again); `/*` opens a block comment until `*/`;
/// an unescaped `'`, `"` or backtick toggles the matching string state.
/// A quote directly preceded by a backslash does not close its string; the
/// check is single-character only, so `\\` followed by a quote keeps the
/// string open. Template interpolation `${...}` is not reclassified, its
/// brackets are plain string content. An unterminated string or comment
/// holds its state through end of input without error.
#[derive(Debug, Clone)]
pub struct Classifier {
    state: LexState,
    prev: Option<char>,
    skip: bool,
    close_after_skip: bool,
}

impl Classifier {
    pub fn new() -> Self {
        Self {
            state: LexState::Code,
            prev: None,
            skip: false,
            close_after_skip: false,
        }
    }

    /// State the classifier will be in for the next character
    pub fn state(&self) -> LexState {
        self.state
    }

    /// Classify one character. `next` is a single character of lookahead,
    /// needed for the two-character tokens `//`, `/*` and `*/`.
    pub fn step(&mut self, c: char, next: Option<char>) -> LexState {
        if self.skip {
            // Second character of a two-character token, already decided.
            self.skip = false;
            let class = self.state;
            if self.close_after_skip {
                self.close_after_skip = false;
                self.state = LexState::Code;
            }
            self.prev = Some(c);
            return class;
        }

        let class = match self.state {
            LexState::Code => match c {
                '/' if next == Some('/') => {
                    self.state = LexState::LineComment;
                    self.skip = true;
                    LexState::LineComment
                }
                '/' if next == Some('*') => {
                    self.state = LexState::BlockComment;
                    self.skip = true;
                    LexState::BlockComment
                }
                '\'' => {
                    self.state = LexState::SingleQuoteString;
                    LexState::SingleQuoteString
                }
                '"' => {
                    self.state = LexState::DoubleQuoteString;
                    LexState::DoubleQuoteString
                }
                '`' => {
                    self.state = LexState::TemplateString;
                    LexState::TemplateString
                }
                _ => LexState::Code,
            },
            LexState::LineComment => {
                if c == '\n' {
                    self.state = LexState::Code;
                    LexState::Code
                } else {
                    LexState::LineComment
                }
            }
            LexState::BlockComment => {
                if c == '*' && next == Some('/') {
                    self.skip = true;
                    self.close_after_skip = true;
                }
                LexState::BlockComment
            }
            LexState::SingleQuoteString => {
                if c == '\'' && self.prev != Some('\\') {
                    self.state = LexState::Code;
                }
                LexState::SingleQuoteString
            }
            LexState::DoubleQuoteString => {
                if c == '"' && self.prev != Some('\\') {
                    self.state = LexState::Code;
                }
                LexState::DoubleQuoteString
            }
            LexState::TemplateString => {
                if c == '`' && self.prev != Some('\\') {
                    self.state = LexState::Code;
                }
                LexState::TemplateString
            }
        };

        self.prev = Some(c);
        class
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new()
    }
}

/// Maximal byte ranges classified as anything other than code.
///
/// Both delimiters of a string belong to its span; a line comment span ends
/// before its terminating newline. The ranges are sorted and non-overlapping.
pub fn protected_spans(source: &str) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut open: Option<usize> = None;
    let mut classifier = Classifier::new();

    let mut chars = source.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        let class = classifier.step(c, next);
        if class.is_code() {
            if let Some(start) = open.take() {
                spans.push(start..i);
            }
        } else if open.is_none() {
            open = Some(i);
        }
    }
    if let Some(start) = open {
        spans.push(start..source.len());
    }

    spans
}

/// Whether `pos` lies inside one of the (sorted, non-overlapping) spans
pub fn in_protected(spans: &[Range<usize>], pos: usize) -> bool {
    let idx = spans.partition_point(|span| span.end <= pos);
    spans.get(idx).is_some_and(|span| span.start <= pos)
}
