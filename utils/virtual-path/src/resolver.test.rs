use super::*;
use crate::VirtualPathError;
use pretty_assertions::assert_eq;
use std::sync::Arc;

fn resolver() -> VirtualPathResolver {
    VirtualPathResolver::new([
        VirtualMount::new("/", "/srv/ws"),
        VirtualMount::new("/data", "/srv/ws/data"),
        VirtualMount::new("/skills", "/srv/skills"),
    ])
    .unwrap()
}

#[test]
fn test_new_requires_root_mount() {
    let err = VirtualPathResolver::new([VirtualMount::new("/data", "/srv/data")]).unwrap_err();
    assert!(matches!(err, VirtualPathError::MissingRootMount));
}

#[test]
fn test_resolve() {
    let resolver = resolver();
    assert_eq!(
        resolver.resolve("/data/x.csv"),
        Some(PathBuf::from("/srv/ws/data/x.csv"))
    );
    assert_eq!(resolver.resolve("/skills"), Some(PathBuf::from("/srv/skills")));
    assert_eq!(resolver.resolve("/"), Some(PathBuf::from("/srv/ws")));
    assert_eq!(
        resolver.resolve("/notes.md"),
        Some(PathBuf::from("/srv/ws/notes.md"))
    );
    assert_eq!(resolver.resolve("notes.md"), None);
}

#[test]
fn test_resolve_physical_path_is_stable() {
    let resolver = resolver();
    assert_eq!(
        resolver.resolve("/srv/ws/data/x.csv"),
        Some(PathBuf::from("/srv/ws/data/x.csv"))
    );
}

#[test]
fn test_rewrite_and_resolve_agree() {
    let resolver = resolver();
    let resolved = resolver.resolve("/data/x.csv").unwrap();
    assert_eq!(
        resolver.rewrite_command("wc -l /data/x.csv"),
        format!("wc -l {}", resolved.display())
    );
}

#[test]
fn test_virtualize_round_trip() {
    let resolver = resolver();
    let physical = resolver.resolve("/skills/csv/SKILL.md").unwrap();
    assert_eq!(
        resolver.virtualize(&physical).as_deref(),
        Some("/skills/csv/SKILL.md")
    );
}

#[test]
fn test_root_and_mounts() {
    let resolver = resolver();
    assert_eq!(resolver.root(), Path::new("/srv/ws"));
    assert_eq!(resolver.mounts().len(), 3);
}

#[test]
fn test_shared_across_threads() {
    let resolver = Arc::new(resolver());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let resolver = Arc::clone(&resolver);
            std::thread::spawn(move || resolver.rewrite_command(&format!("cat /data/{i}.csv")).into_owned())
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), format!("cat /srv/ws/data/{i}.csv"));
    }
}
