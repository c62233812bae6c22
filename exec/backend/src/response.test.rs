use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_merge_output() {
    assert_eq!(merge_output("out", ""), "out");
    assert_eq!(merge_output("", "err"), "err");
    assert_eq!(merge_output("out", "err"), "out\nerr");
    assert_eq!(merge_output("", ""), "");
}

#[test]
fn test_truncate_within_limit() {
    let (output, truncated) = truncate_output("hello".to_string(), 5);
    assert_eq!(output, "hello");
    assert!(!truncated);
}

#[test]
fn test_truncate_keeps_head_and_tail() {
    let input = format!("{}{}", "a".repeat(600), "b".repeat(1400));
    let (output, truncated) = truncate_output(input, 1000);
    assert!(truncated);
    assert!(output.len() <= 1200);
    assert!(output.starts_with(&"a".repeat(500)));
    assert!(output.ends_with(&"b".repeat(500)));
    assert_eq!(output.len(), 1000 + TRUNCATION_MARKER.len());
    assert!(output.contains(TRUNCATION_MARKER));
}

#[test]
fn test_truncate_counts_chars_not_bytes() {
    let input = "é".repeat(12);
    let (output, truncated) = truncate_output(input, 10);
    assert!(truncated);
    assert_eq!(output, format!("{}{TRUNCATION_MARKER}{}", "é".repeat(5), "é".repeat(5)));

    // 12 chars but 24 bytes: within a 12 char bound.
    let (output, truncated) = truncate_output("é".repeat(12), 12);
    assert!(!truncated);
    assert_eq!(output.chars().count(), 12);
}

#[test]
fn test_from_streams_merges_and_truncates() {
    let response = ExecuteResponse::from_streams(b"x".repeat(2000).as_slice(), b"", 0, 1000);
    assert!(response.truncated);
    assert!(response.output.len() <= 1200);

    let response = ExecuteResponse::from_streams(b"out\n", b"warn\n", 3, 1000);
    assert_eq!(response.output, "out\n\nwarn\n");
    assert_eq!(response.exit_code, 3);
    assert!(!response.truncated);
}

#[test]
fn test_from_streams_lossy_utf8() {
    let response = ExecuteResponse::from_streams(&[b'o', b'k', 0xff], b"", 0, 100);
    assert_eq!(response.output, "ok\u{fffd}");
}

#[test]
fn test_timed_out() {
    let response = ExecuteResponse::timed_out(5);
    assert_eq!(response.output, "Command timed out after 5s");
    assert_eq!(response.exit_code, TIMEOUT_EXIT_CODE);
    assert!(response.is_timeout());
    assert!(!response.truncated);
}

#[test]
fn test_error() {
    let response = ExecuteResponse::error("boom");
    assert_eq!(response.output, "Error executing command: boom");
    assert_eq!(response.exit_code, 1);
    assert!(!response.is_success());
}

#[test]
fn test_serde_field_names() {
    let response = ExecuteResponse {
        output: "hi".to_string(),
        exit_code: 0,
        truncated: false,
    };
    let json = serde_json::to_value(&response).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"output": "hi", "exit_code": 0, "truncated": false})
    );
}
