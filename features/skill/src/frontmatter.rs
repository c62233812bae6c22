//! YAML frontmatter parser for SKILL.md files.

use serde::Deserialize;

/// Required frontmatter fields. Unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SkillFrontmatter {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Splits `---` delimited frontmatter from the markdown body.
///
/// Returns `(yaml, body)`. The opening delimiter must be the first line; the
/// closing one is the next line consisting only of `---`.
pub fn parse_frontmatter(content: &str) -> Result<(&str, &str), String> {
    let content = content.trim_start_matches('\u{feff}');

    let mut lines = content.split_inclusive('\n');
    let opening = lines.next().unwrap_or_default();
    if opening.trim_end() != "---" {
        return Err("missing opening `---` frontmatter delimiter".to_string());
    }

    let yaml_start = opening.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == "---" {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            return Ok((yaml, body));
        }
        offset += line.len();
    }

    Err("missing closing `---` frontmatter delimiter".to_string())
}

#[cfg(test)]
#[path = "frontmatter.test.rs"]
mod tests;
