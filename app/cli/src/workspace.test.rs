use super::*;
use pretty_assertions::assert_eq;

fn config_in(root: &std::path::Path) -> AppConfig {
    AppConfig::with_root(root)
}

#[tokio::test]
async fn test_bootstrap_local_creates_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());

    let workspace = bootstrap(&config).await.unwrap();

    for sub in ["data", "scripts", "results"] {
        assert!(config.workspace_dir.join(sub).is_dir(), "{sub} missing");
    }
    assert!(config.skills_dir.is_dir());
    assert_eq!(workspace.executor.id(), "local-exec-workspace");
    assert!(workspace.skills.is_empty());
}

#[tokio::test]
async fn test_executor_and_files_share_paths() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    let workspace = bootstrap(&config).await.unwrap();

    let response = workspace
        .executor
        .execute("echo 'id,total' > /data/orders.csv")
        .await;
    assert_eq!(response.exit_code, 0, "{}", response.output);

    let content = workspace.files.read("/data/orders.csv", 0, 10).await.unwrap();
    assert!(content.contains("id,total"));
    assert_eq!(
        config.resolver().unwrap().resolve("/data/orders.csv").unwrap(),
        config.workspace_dir.join("data/orders.csv")
    );
}

#[tokio::test]
async fn test_bootstrap_discovers_skills() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    let skill_dir = config.skills_dir.join("csv");
    std::fs::create_dir_all(&skill_dir).unwrap();
    std::fs::write(
        skill_dir.join("SKILL.md"),
        "---\nname: csv\ndescription: CSV tools\n---\n",
    )
    .unwrap();

    let workspace = bootstrap(&config).await.unwrap();
    assert_eq!(workspace.skills.len(), 1);
    assert_eq!(workspace.skills[0].virtual_skill_md_path, "/skills/csv/SKILL.md");

    let skill_md = workspace
        .files
        .read("/skills/csv/SKILL.md", 0, 10)
        .await
        .unwrap();
    assert!(skill_md.contains("name: csv"));
}
