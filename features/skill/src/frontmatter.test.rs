use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_basic_parse() {
    let content = "---\nname: csv-analytics\ndescription: test\n---\nThis is the body.\n";
    let (yaml, body) = parse_frontmatter(content).unwrap();
    assert_eq!(yaml, "name: csv-analytics\ndescription: test\n");
    assert_eq!(body, "This is the body.\n");
}

#[test]
fn test_no_frontmatter_error() {
    let err = parse_frontmatter("Just markdown.").unwrap_err();
    assert!(err.contains("missing opening"));
}

#[test]
fn test_missing_closing_delimiter() {
    let err = parse_frontmatter("---\nname: test\nno closing here\n").unwrap_err();
    assert!(err.contains("missing closing"));
}

#[test]
fn test_empty_frontmatter() {
    let (yaml, body) = parse_frontmatter("---\n---\nBody.\n").unwrap();
    assert_eq!(yaml, "");
    assert_eq!(body, "Body.\n");
}

#[test]
fn test_body_with_triple_dashes() {
    let content = "---\nname: test\n---\nSome content.\n\n---\n\nMore.\n";
    let (yaml, body) = parse_frontmatter(content).unwrap();
    assert_eq!(yaml, "name: test\n");
    assert_eq!(body, "Some content.\n\n---\n\nMore.\n");
}

#[test]
fn test_crlf_and_bom() {
    let content = "\u{feff}---\r\nname: win\r\n---\r\nbody\r\n";
    let (yaml, body) = parse_frontmatter(content).unwrap();
    assert_eq!(yaml, "name: win\r\n");
    assert_eq!(body, "body\r\n");
}

#[test]
fn test_closing_delimiter_at_eof() {
    let (yaml, body) = parse_frontmatter("---\nname: x\n---").unwrap();
    assert_eq!(yaml, "name: x\n");
    assert_eq!(body, "");
}

#[test]
fn test_deserialize_ignores_extra_keys() {
    let fm: SkillFrontmatter =
        serde_yml::from_str("name: a\ndescription: b\nlicense: MIT\n").unwrap();
    assert_eq!(fm.name.as_deref(), Some("a"));
    assert_eq!(fm.description.as_deref(), Some("b"));
}
