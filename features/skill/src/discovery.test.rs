use super::*;
use pretty_assertions::assert_eq;

fn write_skill(root: &Path, dir: &str, content: &str) {
    let skill_dir = root.join(dir);
    std::fs::create_dir_all(&skill_dir).unwrap();
    std::fs::write(skill_dir.join(SKILL_MD), content).unwrap();
}

#[test]
fn test_missing_dir_yields_empty() {
    let tmp = tempfile::tempdir().unwrap();
    assert!(discover_skills(&tmp.path().join("absent")).is_empty());
}

#[test]
fn test_discovers_valid_skills_sorted() {
    let tmp = tempfile::tempdir().unwrap();
    write_skill(
        tmp.path(),
        "web-research",
        "---\nname: web-research\ndescription: Search the web\n---\n# Web\n",
    );
    write_skill(
        tmp.path(),
        "csv-analytics",
        "---\nname: csv-analytics\ndescription: Analyze CSV files\n---\n# CSV\n",
    );

    let skills = discover_skills(tmp.path());
    let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["csv-analytics", "web-research"]);

    let csv = &skills[0];
    assert_eq!(csv.description, "Analyze CSV files");
    assert_eq!(csv.virtual_skill_md_path, "/skills/csv-analytics/SKILL.md");
    assert!(csv.skill_root.is_absolute());
    assert!(csv.skill_md_path.ends_with("csv-analytics/SKILL.md"));
}

#[test]
fn test_skips_invalid_skills() {
    let tmp = tempfile::tempdir().unwrap();
    write_skill(tmp.path(), "good", "---\nname: good\ndescription: ok\n---\n");
    write_skill(tmp.path(), "no-frontmatter", "# Just markdown\n");
    write_skill(tmp.path(), "no-description", "---\nname: half\n---\n");
    write_skill(tmp.path(), "bad-yaml", "---\nname: [unclosed\n---\n");
    std::fs::create_dir_all(tmp.path().join("no-skill-md")).unwrap();
    std::fs::write(tmp.path().join("stray.md"), "---\nname: x\n---\n").unwrap();

    let skills = discover_skills(tmp.path());
    let names: Vec<_> = skills.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["good"]);
}

#[test]
fn test_load_skill_errors() {
    let tmp = tempfile::tempdir().unwrap();
    write_skill(tmp.path(), "no-name", "---\ndescription: d\n---\n");
    let err = load_skill(&tmp.path().join("no-name")).unwrap_err();
    assert!(matches!(err, SkillError::MissingField { field: "name", .. }));

    let err = load_skill(&tmp.path().join("missing")).unwrap_err();
    assert!(matches!(err, SkillError::Io { .. }));
}

#[test]
fn test_virtual_path_uses_directory_name() {
    let tmp = tempfile::tempdir().unwrap();
    write_skill(
        tmp.path(),
        "dir-name",
        "---\nname: Display Name\ndescription: d\n---\n",
    );
    let skill = load_skill(&tmp.path().join("dir-name")).unwrap();
    assert_eq!(skill.name, "Display Name");
    assert_eq!(skill.virtual_skill_md_path, "/skills/dir-name/SKILL.md");
}
