//! Line-numbered rendering for file reads.

/// Shown instead of line-numbered output for an empty file.
pub const EMPTY_FILE_REMINDER: &str = "System reminder: File exists but has empty contents";

/// Lines longer than this are cut to keep reads bounded.
pub const MAX_LINE_CHARS: usize = 2000;

/// Renders `limit` lines from `offset` as `"{number:>6}\t{line}"`.
///
/// Returns `None` when `offset` is past the last line.
pub fn format_lines(content: &str, offset: usize, limit: usize) -> Option<String> {
    let total = content.lines().count();
    if offset >= total {
        return None;
    }

    let rendered: Vec<String> = content
        .lines()
        .enumerate()
        .skip(offset)
        .take(limit)
        .map(|(idx, line)| format!("{:>6}\t{}", idx + 1, clip(line)))
        .collect();
    Some(rendered.join("\n"))
}

fn clip(line: &str) -> &str {
    match line.char_indices().nth(MAX_LINE_CHARS) {
        Some((idx, _)) => &line[..idx],
        None => line,
    }
}

#[cfg(test)]
#[path = "format.test.rs"]
mod tests;
