//! Skill directory discovery.
//!
//! A skill is an immediate subdirectory of the skills directory containing a
//! `SKILL.md` whose frontmatter names it and describes it. Invalid skills
//! are skipped with a warning so one broken skill never hides the rest.

use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use walkdir::WalkDir;

use crate::error::Result;
use crate::error::SkillError;
use crate::frontmatter::SkillFrontmatter;
use crate::frontmatter::parse_frontmatter;

/// The expected skill file name in each skill directory.
pub const SKILL_MD: &str = "SKILL.md";

/// Virtual prefix under which the skills directory is mounted.
pub const SKILLS_VIRTUAL_ROOT: &str = "/skills";

/// Catalog entry for one skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillMetadata {
    pub name: String,
    pub description: String,
    /// Absolute path of the skill directory.
    pub skill_root: PathBuf,
    /// Absolute path of the skill's SKILL.md.
    pub skill_md_path: PathBuf,
    /// Path the agent uses to read the skill, e.g. `/skills/csv/SKILL.md`.
    pub virtual_skill_md_path: String,
}

/// Discovers every valid skill under `skills_dir`, sorted by directory name.
///
/// A missing directory yields an empty catalog.
pub fn discover_skills(skills_dir: &Path) -> Vec<SkillMetadata> {
    if !skills_dir.is_dir() {
        tracing::debug!(dir = %skills_dir.display(), "skills directory not found");
        return Vec::new();
    }

    let walker = WalkDir::new(skills_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut skills = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::debug!(error = %err, "skipping inaccessible entry during skill scan");
                continue;
            }
        };
        if !entry.file_type().is_dir() {
            continue;
        }

        let skill_md = entry.path().join(SKILL_MD);
        if !skill_md.is_file() {
            continue;
        }

        match load_skill(entry.path()) {
            Ok(skill) => skills.push(skill),
            Err(err) => {
                tracing::warn!(
                    skill = %entry.file_name().to_string_lossy(),
                    error = %err,
                    "skipping invalid skill"
                );
            }
        }
    }

    tracing::debug!(dir = %skills_dir.display(), count = skills.len(), "discovered skills");
    skills
}

/// Parses the SKILL.md of a single skill directory.
pub fn load_skill(skill_dir: &Path) -> Result<SkillMetadata> {
    let skill_md = skill_dir.join(SKILL_MD);
    let content = std::fs::read_to_string(&skill_md).map_err(|source| SkillError::Io {
        path: skill_md.clone(),
        source,
    })?;

    let (yaml, _body) =
        parse_frontmatter(&content).map_err(|message| SkillError::FrontmatterParse {
            file: skill_md.clone(),
            message,
        })?;

    let frontmatter: SkillFrontmatter = if yaml.trim().is_empty() {
        SkillFrontmatter::default()
    } else {
        serde_yml::from_str(yaml).map_err(|source| SkillError::YamlParse {
            file: skill_md.clone(),
            source,
        })?
    };

    let name = frontmatter.name.ok_or_else(|| SkillError::MissingField {
        file: skill_md.clone(),
        field: "name",
    })?;
    let description = frontmatter.description.ok_or_else(|| SkillError::MissingField {
        file: skill_md.clone(),
        field: "description",
    })?;

    let dir_name = skill_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let skill_root = absolute(skill_dir);
    let skill_md_path = skill_root.join(SKILL_MD);

    Ok(SkillMetadata {
        name,
        description,
        skill_root,
        skill_md_path,
        virtual_skill_md_path: format!("{SKILLS_VIRTUAL_ROOT}/{dir_name}/{SKILL_MD}"),
    })
}

fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
#[path = "discovery.test.rs"]
mod tests;
