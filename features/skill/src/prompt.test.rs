use super::*;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn skill(name: &str, description: &str) -> SkillMetadata {
    SkillMetadata {
        name: name.to_string(),
        description: description.to_string(),
        skill_root: PathBuf::from(format!("/opt/skills/{name}")),
        skill_md_path: PathBuf::from(format!("/opt/skills/{name}/SKILL.md")),
        virtual_skill_md_path: format!("/skills/{name}/SKILL.md"),
    }
}

#[test]
fn test_empty_catalog() {
    assert_eq!(format_skills_prompt(&[]), "");
}

#[test]
fn test_catalog_lists_virtual_paths() {
    let prompt = format_skills_prompt(&[
        skill("csv-analytics", "Analyze CSV files"),
        skill("web-research", "Search the web"),
    ]);
    assert!(prompt.starts_with("## Available Skills"));
    assert!(prompt.contains("- **csv-analytics**: Analyze CSV files\n  Path: `/skills/csv-analytics/SKILL.md`"));
    assert!(prompt.contains("- **web-research**: Search the web"));
    assert!(!prompt.contains("/opt/skills"));
    assert!(prompt.contains("### Usage Guidelines"));
}

#[test]
fn test_append_to_system_prompt() {
    let skills = [skill("csv", "d")];
    let combined = append_skills_prompt(Some("You are helpful."), &skills);
    assert!(combined.starts_with("You are helpful.\n\n## Available Skills"));

    assert_eq!(append_skills_prompt(Some("base"), &[]), "base");
    assert_eq!(append_skills_prompt(None, &skills), format_skills_prompt(&skills));
    assert_eq!(append_skills_prompt(Some(""), &[]), "");
}
