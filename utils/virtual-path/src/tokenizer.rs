//! Word-level shell tokenizer backed by tree-sitter-bash.
//!
//! Produces the words of a command line together with their byte spans in
//! the source. Only the word-bearing nodes a path can live in are reported;
//! command/process substitutions, parameter expansions, heredoc bodies and
//! comments are skipped entirely.

use tree_sitter::Node;
use tree_sitter::Parser;
use tree_sitter::Tree;

use crate::error::Result;
use crate::error::VirtualPathError;

/// A byte span in the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length of the span.
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty.
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// Kinds of word tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordKind {
    /// A plain word (unquoted).
    Word,
    /// Single-quoted string ('...').
    SingleQuoted,
    /// Double-quoted string ("...").
    DoubleQuoted,
    /// Adjacent pieces forming one shell word, e.g. `--out="$dir"/x`.
    Concatenation,
}

impl WordKind {
    fn from_node_kind(kind: &str) -> Option<Self> {
        match kind {
            "word" => Some(Self::Word),
            "raw_string" => Some(Self::SingleQuoted),
            "string" => Some(Self::DoubleQuoted),
            "concatenation" => Some(Self::Concatenation),
            _ => None,
        }
    }
}

/// A shell word with its position in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordToken {
    pub kind: WordKind,
    /// Raw source text, including any quotes.
    pub text: String,
    pub span: Span,
    /// Word-bearing pieces of a concatenation; empty for other kinds.
    pub parts: Vec<WordToken>,
}

/// Node kinds whose contents are never treated as path words.
const OPAQUE_KINDS: &[&str] = &[
    "command_substitution",
    "process_substitution",
    "expansion",
    "simple_expansion",
    "arithmetic_expansion",
    "ansi_c_string",
    "translated_string",
    "heredoc_start",
    "heredoc_body",
    "heredoc_end",
    "comment",
];

/// Tokenize a command line into words with byte spans.
///
/// Returns [`VirtualPathError::Unparsable`] if the source contains syntax
/// errors, so callers can fall back to the original text.
pub fn tokenize_words(source: &str) -> Result<Vec<WordToken>> {
    let tree = parse(source)?;
    let root = tree.root_node();
    if root.has_error() {
        return Err(VirtualPathError::Unparsable);
    }

    let mut words = Vec::new();
    collect_words(root, source, &mut words);
    Ok(words)
}

fn parse(source: &str) -> Result<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_bash::LANGUAGE.into())
        .map_err(|err| VirtualPathError::Grammar(err.to_string()))?;
    parser.parse(source, None).ok_or(VirtualPathError::Unparsable)
}

fn collect_words(node: Node<'_>, source: &str, out: &mut Vec<WordToken>) {
    if OPAQUE_KINDS.contains(&node.kind()) {
        return;
    }

    if let Some(token) = word_token(node, source) {
        out.push(token);
        return;
    }

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_words(child, source, out);
    }
}

fn word_token(node: Node<'_>, source: &str) -> Option<WordToken> {
    let kind = WordKind::from_node_kind(node.kind())?;
    let span = Span::new(node.start_byte(), node.end_byte());
    let text = source.get(span.start..span.end)?.to_string();

    let parts = if kind == WordKind::Concatenation {
        let mut cursor = node.walk();
        node.named_children(&mut cursor)
            .filter_map(|child| word_token(child, source))
            .collect()
    } else {
        Vec::new()
    };

    Some(WordToken {
        kind,
        text,
        span,
        parts,
    })
}

#[cfg(test)]
#[path = "tokenizer.test.rs"]
mod tests;
