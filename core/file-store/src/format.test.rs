use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_format_all_lines() {
    assert_eq!(
        format_lines("a\nb\n", 0, 10).as_deref(),
        Some("     1\ta\n     2\tb")
    );
}

#[test]
fn test_format_window_keeps_absolute_numbers() {
    let content = (1..=10).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
    assert_eq!(
        format_lines(&content, 3, 2).as_deref(),
        Some("     4\tline 4\n     5\tline 5")
    );
}

#[test]
fn test_offset_past_end() {
    assert_eq!(format_lines("a\nb", 2, 10), None);
    assert_eq!(format_lines("", 0, 10), None);
}

#[test]
fn test_long_lines_clipped() {
    let line = "x".repeat(MAX_LINE_CHARS + 50);
    let rendered = format_lines(&line, 0, 1).unwrap();
    assert_eq!(rendered.len(), 7 + MAX_LINE_CHARS);
}
