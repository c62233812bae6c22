use super::*;
use pretty_assertions::assert_eq;

fn table() -> MountTable {
    MountTable::new([
        VirtualMount::new("/", "/srv/ws"),
        VirtualMount::new("/data", "/srv/ws/data"),
        VirtualMount::new("skills/", "/opt/skills"),
    ])
    .unwrap()
}

#[test]
fn test_normalize_prefix() {
    assert_eq!(normalize_prefix("/"), "/");
    assert_eq!(normalize_prefix(""), "/");
    assert_eq!(normalize_prefix("///"), "/");
    assert_eq!(normalize_prefix("data"), "/data");
    assert_eq!(normalize_prefix("/data/"), "/data");
    assert_eq!(normalize_prefix("data//"), "/data");
}

#[test]
fn test_missing_root_mount() {
    let err = MountTable::new([VirtualMount::new("/data", "/srv/data")]).unwrap_err();
    assert!(matches!(err, VirtualPathError::MissingRootMount));
}

#[test]
fn test_sorted_by_descending_prefix_length() {
    let table = table();
    let prefixes: Vec<_> = table.iter().map(|(prefix, _)| prefix).collect();
    assert_eq!(prefixes, vec!["/skills", "/data", "/"]);
    assert_eq!(table.len(), 3);
    assert_eq!(table.root(), Path::new("/srv/ws"));
}

#[test]
fn test_duplicate_prefix_replaces_earlier() {
    let table = MountTable::new([
        VirtualMount::new("/", "/a"),
        VirtualMount::new("/", "/b"),
    ])
    .unwrap();
    assert_eq!(table.len(), 1);
    assert_eq!(table.root(), Path::new("/b"));
}

#[test]
fn test_rebase_specific_mount() {
    let table = table();
    assert_eq!(
        table.rebase("/data/x.csv").as_deref(),
        Some("/srv/ws/data/x.csv")
    );
    assert_eq!(
        table.rebase("/skills/csv/SKILL.md").as_deref(),
        Some("/opt/skills/csv/SKILL.md")
    );
}

#[test]
fn test_rebase_exact_prefix_has_no_trailing_separator() {
    let table = table();
    assert_eq!(table.rebase("/data").as_deref(), Some("/srv/ws/data"));
    assert_eq!(table.rebase("/").as_deref(), Some("/srv/ws"));
}

#[test]
fn test_rebase_collapses_leading_separators() {
    let table = table();
    assert_eq!(
        table.rebase("/data//x.csv").as_deref(),
        Some("/srv/ws/data/x.csv")
    );
    assert_eq!(table.rebase("/data//").as_deref(), Some("/srv/ws/data"));
    assert_eq!(table.rebase("//etc").as_deref(), Some("/srv/ws/etc"));
    assert_eq!(
        table.rebase("/data/out/").as_deref(),
        Some("/srv/ws/data/out/")
    );
}

#[test]
fn test_rebase_prefix_must_end_at_separator() {
    // `/database` is not under `/data`; the root mount catches it instead.
    let table = table();
    assert_eq!(
        table.rebase("/database/x").as_deref(),
        Some("/srv/ws/database/x")
    );
}

#[test]
fn test_rebase_requires_absolute_value() {
    let table = table();
    assert_eq!(table.rebase("data/x.csv"), None);
    assert_eq!(table.rebase(""), None);
}

#[test]
fn test_is_physical() {
    let table = table();
    assert!(table.is_physical("/srv/ws"));
    assert!(table.is_physical("/srv/ws/data/x.csv"));
    assert!(table.is_physical("/opt/skills/a"));
    assert!(!table.is_physical("/srv/wsx"));
    assert!(!table.is_physical("/data/x.csv"));
}

#[test]
fn test_virtualize_prefers_most_specific_physical() {
    let table = table();
    assert_eq!(
        table.virtualize(Path::new("/srv/ws/data/x.csv")).as_deref(),
        Some("/data/x.csv")
    );
    assert_eq!(
        table.virtualize(Path::new("/srv/ws/scripts/run.py")).as_deref(),
        Some("/scripts/run.py")
    );
    assert_eq!(table.virtualize(Path::new("/srv/ws")).as_deref(), Some("/"));
    assert_eq!(
        table.virtualize(Path::new("/opt/skills")).as_deref(),
        Some("/skills")
    );
    assert_eq!(table.virtualize(Path::new("/etc/passwd")), None);
}
