//! Positional rewriting of virtual paths inside shell command lines.
//!
//! Every word is checked for a virtual prefix (plain, quoted, or the value
//! side of `key=value` / `key:value`). Changed words are spliced back at their
//! original spans; everything between them is copied verbatim.

use std::borrow::Cow;

use crate::mount::MountTable;
use crate::tokenizer::Span;
use crate::tokenizer::WordKind;
use crate::tokenizer::WordToken;
use crate::tokenizer::tokenize_words;

/// Separators for assignment-style words, in precedence order.
const ASSIGNMENT_SEPARATORS: [char; 2] = ['=', ':'];

/// Rewrite a shell command so virtual paths become physical paths.
///
/// Returns the input unchanged (borrowed) when it cannot be parsed or when
/// no word refers to a virtual path.
pub fn rewrite_command<'a>(mounts: &MountTable, command: &'a str) -> Cow<'a, str> {
    let words = match tokenize_words(command) {
        Ok(words) => words,
        Err(err) => {
            tracing::debug!(error = %err, "leaving command unrewritten");
            return Cow::Borrowed(command);
        }
    };

    let mut replacements = Vec::new();
    for word in &words {
        collect_replacements(mounts, word, &mut replacements);
    }

    if replacements.is_empty() {
        return Cow::Borrowed(command);
    }

    replacements.sort_by_key(|(span, _)| span.start);

    let mut rebuilt = String::with_capacity(command.len());
    let mut last = 0;
    for (span, value) in &replacements {
        rebuilt.push_str(&command[last..span.start]);
        rebuilt.push_str(value);
        last = span.end;
    }
    rebuilt.push_str(&command[last..]);

    tracing::trace!(original = command, rewritten = %rebuilt, "rewrote virtual paths");
    Cow::Owned(rebuilt)
}

fn collect_replacements(mounts: &MountTable, word: &WordToken, out: &mut Vec<(Span, String)>) {
    if let Some(rewritten) = rewrite_word(mounts, &word.text) {
        out.push((word.span, rewritten));
        return;
    }

    // A concatenation that did not rebase as a whole may still hold a quoted
    // path piece, e.g. `--out="/results/x"`.
    if word.kind == WordKind::Concatenation {
        for part in &word.parts {
            collect_replacements(mounts, part, out);
        }
    }
}

/// Rewrites a single shell word, preserving surrounding quotes.
///
/// Returns `None` if the word does not change.
pub(crate) fn rewrite_word(mounts: &MountTable, word: &str) -> Option<String> {
    if word.is_empty() {
        return None;
    }

    if let Some((quote, inner)) = split_quotes(word) {
        return rewrite_unquoted(mounts, inner).map(|inner| format!("{quote}{inner}{quote}"));
    }

    rewrite_unquoted(mounts, word)
}

/// Returns the quote character and inner text of a fully quoted word.
fn split_quotes(word: &str) -> Option<(char, &str)> {
    let quote = word.chars().next().filter(|c| matches!(c, '\'' | '"'))?;
    if word.len() < 2 || !word.ends_with(quote) {
        return None;
    }
    Some((quote, &word[1..word.len() - 1]))
}

fn rewrite_unquoted(mounts: &MountTable, token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }

    if let Some(rebased) = rebase_token(mounts, token) {
        return Some(rebased);
    }

    // Common assignment patterns like `--input=/data/file.csv` or `PATH:/skills`.
    ASSIGNMENT_SEPARATORS.iter().find_map(|&separator| {
        let (head, tail) = token.split_once(separator)?;
        let tail = rebase_token(mounts, tail)?;
        Some(format!("{head}{separator}{tail}"))
    })
}

fn rebase_token(mounts: &MountTable, value: &str) -> Option<String> {
    if mounts.is_physical(value) {
        return None;
    }
    mounts.rebase(value)
}

#[cfg(test)]
#[path = "rewrite.test.rs"]
mod tests;
