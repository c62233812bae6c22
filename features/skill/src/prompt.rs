//! Progressive-disclosure prompt for the skill catalog.

use std::fmt::Write as _;

use crate::discovery::SkillMetadata;

const HEADER: &str = "\
## Available Skills (Progressive Disclosure)

The skills below bundle scripts and documentation for specialized tasks.
Only their names and descriptions are listed here.

**How to use a skill:**
1. When a request matches a skill's description, call `read_file()` on its SKILL.md
2. SKILL.md explains the skill's scripts (under `scripts/`) and docs (under `docs/`)
3. Run scripts with the `execute` tool as SKILL.md instructs
4. Load extra docs from `docs/` only when SKILL.md points to them and they are needed

### Skill Catalog
";

const GUIDELINES: &str = "
### Usage Guidelines

- **Read SKILL.md only when relevant**: do not load every skill up front
- **Follow SKILL.md**: each skill documents how to call its scripts
- **Run scripts with execute**: e.g. `execute(\"python3 /skills/<skill>/scripts/<script>.py ...\")`
- **Process large data off-model**: for big inputs (more than ~1000 rows) use scripts to
  filter or aggregate instead of reading everything into context

### Example Workflow

1. User asks: \"Find the top 5 orders in my CSV\"
2. The csv-analytics skill matches
3. Call `read_file(\"/skills/csv-analytics/SKILL.md\")`
4. SKILL.md mentions a filter_high_value.py script
5. Call `execute(\"python3 /skills/csv-analytics/scripts/filter_high_value.py ...\")`
6. Summarize the filtered results
";

/// Formats the catalog prompt; empty when there are no skills.
pub fn format_skills_prompt(skills: &[SkillMetadata]) -> String {
    if skills.is_empty() {
        return String::new();
    }

    let mut prompt = String::from(HEADER);
    for skill in skills {
        let _ = write!(
            prompt,
            "\n- **{}**: {}\n  Path: `{}`",
            skill.name, skill.description, skill.virtual_skill_md_path
        );
    }
    prompt.push('\n');
    prompt.push_str(GUIDELINES);
    prompt
}

/// Appends the catalog prompt to an existing system prompt.
pub fn append_skills_prompt(system_prompt: Option<&str>, skills: &[SkillMetadata]) -> String {
    let catalog = format_skills_prompt(skills);
    match system_prompt {
        Some(base) if !base.is_empty() && !catalog.is_empty() => format!("{base}\n\n{catalog}"),
        Some(base) if !base.is_empty() => base.to_string(),
        _ => catalog,
    }
}

#[cfg(test)]
#[path = "prompt.test.rs"]
mod tests;
