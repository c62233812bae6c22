//! Skill catalog for agents working in a virtual filesystem.
//!
//! Skills live in immediate subdirectories of the skills directory, each
//! with a `SKILL.md` carrying YAML frontmatter:
//!
//! ```text
//! ---
//! name: csv-analytics
//! description: Filter and summarize CSV files
//! ---
//! # CSV analytics
//! ...
//! ```
//!
//! [`discover_skills`] builds the catalog once at startup and
//! [`format_skills_prompt`] renders the name/description listing the agent
//! sees. Full SKILL.md content is only read on demand through `/skills/...`.

mod discovery;
mod error;
mod frontmatter;
mod prompt;

pub use discovery::SKILL_MD;
pub use discovery::SKILLS_VIRTUAL_ROOT;
pub use discovery::SkillMetadata;
pub use discovery::discover_skills;
pub use discovery::load_skill;
pub use error::Result;
pub use error::SkillError;
pub use frontmatter::SkillFrontmatter;
pub use frontmatter::parse_frontmatter;
pub use prompt::append_skills_prompt;
pub use prompt::format_skills_prompt;
