use super::*;
use pretty_assertions::assert_eq;

fn texts(tokens: &[WordToken]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

#[test]
fn test_simple_words() {
    let tokens = tokenize_words("cat /data/x.csv").unwrap();
    assert_eq!(texts(&tokens), vec!["cat", "/data/x.csv"]);
    assert!(tokens.iter().all(|t| t.kind == WordKind::Word));
}

#[test]
fn test_spans_match_source() {
    let source = "python3  /scripts/run.py --in=/data/a.csv > /results/out.txt";
    let tokens = tokenize_words(source).unwrap();
    assert!(!tokens.is_empty());
    for token in &tokens {
        assert_eq!(&source[token.span.start..token.span.end], token.text);
        assert_eq!(token.span.len(), token.text.len());
    }
    assert!(texts(&tokens).contains(&"/results/out.txt"));
}

#[test]
fn test_quoted_words() {
    let tokens = tokenize_words("cat '/data/x.csv' \"/data/y.csv\"").unwrap();
    let quoted: Vec<_> = tokens.iter().skip(1).map(|t| (t.kind, t.text.as_str())).collect();
    assert_eq!(
        quoted,
        vec![
            (WordKind::SingleQuoted, "'/data/x.csv'"),
            (WordKind::DoubleQuoted, "\"/data/y.csv\""),
        ]
    );
}

#[test]
fn test_pipeline_and_list_words() {
    let tokens = tokenize_words("cat /data/a | head -n 5 && ls /results").unwrap();
    let words = texts(&tokens);
    assert!(words.contains(&"/data/a"));
    assert!(words.contains(&"head"));
    assert!(words.contains(&"/results"));
}

#[test]
fn test_command_substitution_is_opaque() {
    let tokens = tokenize_words("echo $(cat /data/x)").unwrap();
    assert_eq!(texts(&tokens), vec!["echo"]);
}

#[test]
fn test_concatenation_parts() {
    let tokens = tokenize_words("tool --out=\"/data/x\"").unwrap();
    let concat = tokens
        .iter()
        .find(|t| t.kind == WordKind::Concatenation)
        .expect("concatenation token");
    assert_eq!(concat.text, "--out=\"/data/x\"");
    assert!(
        concat
            .parts
            .iter()
            .any(|p| p.kind == WordKind::DoubleQuoted && p.text == "\"/data/x\"")
    );
}

#[test]
fn test_unterminated_quote_is_unparsable() {
    let err = tokenize_words("cat '/data/x.csv").unwrap_err();
    assert!(matches!(err, VirtualPathError::Unparsable));
}

#[test]
fn test_empty_source() {
    let tokens = tokenize_words("").unwrap();
    assert!(tokens.is_empty());
}

#[test]
fn test_span_helpers() {
    let span = Span::new(3, 7);
    assert_eq!(span.len(), 4);
    assert!(!span.is_empty());
    assert!(Span::new(5, 5).is_empty());
}
