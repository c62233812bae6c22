use super::*;
use crate::mount::VirtualMount;
use pretty_assertions::assert_eq;

fn mounts() -> MountTable {
    MountTable::new([
        VirtualMount::new("/", "/srv/ws"),
        VirtualMount::new("/data", "/srv/ws/data"),
        VirtualMount::new("/scripts", "/srv/ws/scripts"),
        VirtualMount::new("/results", "/srv/ws/results"),
        VirtualMount::new("/skills", "/srv/skills"),
    ])
    .unwrap()
}

fn rewrite(command: &str) -> String {
    rewrite_command(&mounts(), command).into_owned()
}

#[test]
fn test_rewrite_plain_path() {
    assert_eq!(rewrite("cat /data/x.csv"), "cat /srv/ws/data/x.csv");
}

#[test]
fn test_rewrite_exact_prefix() {
    assert_eq!(rewrite("ls /data"), "ls /srv/ws/data");
    assert_eq!(rewrite("ls /"), "ls /srv/ws");
}

#[test]
fn test_rewrite_root_mount() {
    assert_eq!(rewrite("cat /notes.txt"), "cat /srv/ws/notes.txt");
}

#[test]
fn test_most_specific_mount_wins() {
    assert_eq!(
        rewrite("cat /skills/csv/SKILL.md"),
        "cat /srv/skills/csv/SKILL.md"
    );
}

#[test]
fn test_preserves_single_quotes() {
    assert_eq!(rewrite("cat '/data/x.csv'"), "cat '/srv/ws/data/x.csv'");
}

#[test]
fn test_preserves_double_quotes() {
    assert_eq!(
        rewrite("cat \"/data/my file.csv\""),
        "cat \"/srv/ws/data/my file.csv\""
    );
}

#[test]
fn test_rewrite_assignment_value_only() {
    assert_eq!(
        rewrite("tool --input=/data/x.csv"),
        "tool --input=/srv/ws/data/x.csv"
    );
}

#[test]
fn test_rewrite_colon_value() {
    assert_eq!(rewrite("tool out:/results/r.txt"), "tool out:/srv/ws/results/r.txt");
}

#[test]
fn test_colon_used_when_equals_does_not_rebase() {
    assert_eq!(
        rewrite("tool a=b:/data/x"),
        "tool a=b:/srv/ws/data/x"
    );
}

#[test]
fn test_rewrite_env_assignment_prefix() {
    assert_eq!(
        rewrite("INPUT=/data/x.csv python3 job.py"),
        "INPUT=/srv/ws/data/x.csv python3 job.py"
    );
}

#[test]
fn test_rewrite_quoted_piece_of_concatenation() {
    assert_eq!(
        rewrite("tool --out=\"/results/r.txt\""),
        "tool --out=\"/srv/ws/results/r.txt\""
    );
}

#[test]
fn test_rewrite_pipeline_preserves_layout() {
    let command = "cat  /data/a.csv |  python3 /scripts/f.py\t> /results/o.txt && echo done";
    assert_eq!(
        rewrite(command),
        "cat  /srv/ws/data/a.csv |  python3 /srv/ws/scripts/f.py\t> /srv/ws/results/o.txt && echo done"
    );
}

#[test]
fn test_no_virtual_paths_returns_borrowed_original() {
    let command = "ls -la  &&  echo \"hi there\" | wc -l";
    let rewritten = rewrite_command(&mounts(), command);
    assert!(matches!(rewritten, Cow::Borrowed(_)));
    assert_eq!(rewritten, command);
}

#[test]
fn test_relative_paths_untouched() {
    let command = "python3 scripts/run.py data/x.csv";
    assert_eq!(rewrite(command), command);
}

#[test]
fn test_unparsable_command_is_unchanged() {
    let command = "cat '/data/x.csv";
    let rewritten = rewrite_command(&mounts(), command);
    assert!(matches!(rewritten, Cow::Borrowed(_)));
    assert_eq!(rewritten, command);
}

#[test]
fn test_command_substitution_not_rewritten() {
    let command = "echo $(cat /data/x)";
    assert_eq!(rewrite(command), command);
}

#[test]
fn test_rewrite_is_idempotent() {
    let once = rewrite("python3 /scripts/f.py --in=/data/a.csv > '/results/o.txt'");
    assert_eq!(
        once,
        "python3 /srv/ws/scripts/f.py --in=/srv/ws/data/a.csv > '/srv/ws/results/o.txt'"
    );
    assert_eq!(rewrite(&once), once);
}

#[test]
fn test_rewrite_word_edge_cases() {
    let mounts = mounts();
    assert_eq!(rewrite_word(&mounts, ""), None);
    assert_eq!(rewrite_word(&mounts, "'"), None);
    // Mismatched quotes are treated as an unquoted token.
    assert_eq!(rewrite_word(&mounts, "'/data/x\""), None);
    assert_eq!(rewrite_word(&mounts, "''"), None);
    assert_eq!(
        rewrite_word(&mounts, "\"/data\"").as_deref(),
        Some("\"/srv/ws/data\"")
    );
}
