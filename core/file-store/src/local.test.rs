use super::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use vexec_virtual_path::VirtualMount;

struct Fixture {
    _tmp: TempDir,
    workspace: PathBuf,
    store: LocalFileStore,
}

fn fixture() -> Fixture {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let workspace = tmp.path().join("workspace");
    let skills = tmp.path().join("skills");
    std::fs::create_dir_all(workspace.join("data")).expect("create data");
    std::fs::create_dir_all(skills.join("csv")).expect("create skills");
    std::fs::write(workspace.join("data/orders.csv"), "id,total\n1,10\n2,20\n").expect("write csv");
    std::fs::write(workspace.join("notes.md"), "hello\n").expect("write notes");
    std::fs::write(skills.join("csv/SKILL.md"), "---\nname: csv\n---\n").expect("write skill");

    let resolver = VirtualPathResolver::new([
        VirtualMount::new("/", &workspace),
        VirtualMount::new("/data", workspace.join("data")),
        VirtualMount::new("/skills", &skills),
    ])
    .expect("resolver");

    Fixture {
        workspace: std::fs::canonicalize(&workspace).expect("canonicalize"),
        store: LocalFileStore::new(Arc::new(resolver)),
        _tmp: tmp,
    }
}

fn paths(entries: &[FileInfo]) -> Vec<&str> {
    entries.iter().map(|e| e.path.as_str()).collect()
}

#[test]
fn test_id() {
    let f = fixture();
    assert_eq!(f.store.id(), "local-fs-workspace");
}

#[test]
fn test_validate_path() {
    assert!(validate_path("/data/x.csv").is_ok());
    assert!(matches!(
        validate_path("data/x.csv"),
        Err(FileStoreError::InvalidPath { .. })
    ));
    assert!(validate_path("/data/../../etc/passwd").is_err());
    assert!(validate_path("/data/..hidden").is_ok());
}

#[test]
fn test_resolve() {
    let f = fixture();
    assert_eq!(
        f.store.resolve("/data/orders.csv").unwrap(),
        f.workspace.join("data/orders.csv")
    );
}

#[tokio::test]
async fn test_ls_root_includes_mounts() {
    let f = fixture();
    let entries = f.store.ls("/").await.unwrap();
    assert_eq!(paths(&entries), vec!["/data", "/skills", "/notes.md"]);
    assert!(entries[0].is_dir);
    assert_eq!(entries[2].size, 6);
    assert!(entries[2].modified_at.is_some());
}

#[tokio::test]
async fn test_ls_subdir() {
    let f = fixture();
    let entries = f.store.ls("/data/").await.unwrap();
    assert_eq!(paths(&entries), vec!["/data/orders.csv"]);
}

#[tokio::test]
async fn test_ls_missing_dir() {
    let f = fixture();
    let err = f.store.ls("/nope").await.unwrap_err();
    assert!(matches!(err, FileStoreError::NotFound(ref p) if p == "/nope"));
}

#[tokio::test]
async fn test_read_with_line_numbers() {
    let f = fixture();
    let content = f.store.read("/data/orders.csv", 0, 2000).await.unwrap();
    assert_eq!(content, "     1\tid,total\n     2\t1,10\n     3\t2,20");

    let window = f.store.read("/data/orders.csv", 1, 1).await.unwrap();
    assert_eq!(window, "     2\t1,10");
}

#[tokio::test]
async fn test_read_offset_past_end() {
    let f = fixture();
    assert!(f.store.read("/data/orders.csv", 10, 5).await.is_err());
}

#[tokio::test]
async fn test_read_empty_file() {
    let f = fixture();
    std::fs::write(f.workspace.join("empty.txt"), "").unwrap();
    let content = f.store.read("/empty.txt", 0, 10).await.unwrap();
    assert_eq!(content, EMPTY_FILE_REMINDER);
}

#[tokio::test]
async fn test_read_through_skills_mount() {
    let f = fixture();
    let content = f.store.read("/skills/csv/SKILL.md", 0, 1).await.unwrap();
    assert_eq!(content, "     1\t---");
}

#[tokio::test]
async fn test_write_creates_parents_and_refuses_overwrite() {
    let f = fixture();
    f.store.write("/results/out/summary.txt", "done").await.unwrap();
    assert_eq!(
        std::fs::read_to_string(f.workspace.join("results/out/summary.txt")).unwrap(),
        "done"
    );

    let err = f.store.write("/results/out/summary.txt", "again").await.unwrap_err();
    assert!(matches!(err, FileStoreError::AlreadyExists(_)));
}

#[tokio::test]
async fn test_edit_single_occurrence() {
    let f = fixture();
    let count = f.store.edit("/notes.md", "hello", "bye", false).await.unwrap();
    assert_eq!(count, 1);
    assert_eq!(
        std::fs::read_to_string(f.workspace.join("notes.md")).unwrap(),
        "bye\n"
    );
}

#[tokio::test]
async fn test_edit_ambiguous_and_replace_all() {
    let f = fixture();
    let err = f
        .store
        .edit("/data/orders.csv", "0", "5", false)
        .await
        .unwrap_err();
    assert!(matches!(err, FileStoreError::AmbiguousEdit { count: 2 }));

    let count = f.store.edit("/data/orders.csv", "0", "5", true).await.unwrap();
    assert_eq!(count, 2);
    assert_eq!(
        std::fs::read_to_string(f.workspace.join("data/orders.csv")).unwrap(),
        "id,total\n1,15\n2,25\n"
    );
}

#[tokio::test]
async fn test_edit_errors() {
    let f = fixture();
    assert!(matches!(
        f.store.edit("/notes.md", "absent", "x", false).await,
        Err(FileStoreError::StringNotFound(_))
    ));
    assert!(matches!(
        f.store.edit("/notes.md", "", "x", false).await,
        Err(FileStoreError::EmptyOldString)
    ));
    assert!(matches!(
        f.store.edit("/missing.md", "a", "b", false).await,
        Err(FileStoreError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_glob() {
    let f = fixture();
    std::fs::write(f.workspace.join("data/more.csv"), "x").unwrap();
    std::fs::write(f.workspace.join("data/readme.txt"), "x").unwrap();

    let matches = f.store.glob("*.csv", "/data").await.unwrap();
    assert_eq!(paths(&matches), vec!["/data/more.csv", "/data/orders.csv"]);

    let nested = f.store.glob("**/*.csv", "/").await.unwrap();
    assert_eq!(paths(&nested), vec!["/data/more.csv", "/data/orders.csv"]);

    // `*` does not cross directories.
    assert!(f.store.glob("*.csv", "/").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_glob_invalid_pattern() {
    let f = fixture();
    assert!(matches!(
        f.store.glob("[", "/").await,
        Err(FileStoreError::InvalidGlob { .. })
    ));
}

#[test]
fn test_path_helpers() {
    assert_eq!(parent_of("/skills"), "/");
    assert_eq!(parent_of("/data/raw"), "/data");
    assert_eq!(normalize_dir("/data/"), "/data");
    assert_eq!(normalize_dir("/"), "/");
    assert_eq!(join_virtual("/", "a"), "/a");
    assert_eq!(join_virtual("/data", "a"), "/data/a");
}
