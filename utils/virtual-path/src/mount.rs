//! Mount table mapping virtual prefixes to physical directories.

use std::path::Path;
use std::path::PathBuf;

use crate::error::Result;
use crate::error::VirtualPathError;

/// The virtual prefix of the workspace root mount.
pub const ROOT_PREFIX: &str = "/";

/// Mapping between a virtual path prefix and its physical location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualMount {
    /// Agent-facing prefix, e.g. `/data`.
    pub virtual_prefix: String,
    /// Real directory backing the prefix.
    pub physical: PathBuf,
}

impl VirtualMount {
    /// Create a new mount.
    pub fn new(virtual_prefix: impl Into<String>, physical: impl Into<PathBuf>) -> Self {
        Self {
            virtual_prefix: virtual_prefix.into(),
            physical: physical.into(),
        }
    }
}

/// A normalized mount with precomputed string forms of its physical path.
#[derive(Debug, Clone)]
struct ResolvedMount {
    prefix: String,
    physical: PathBuf,
    /// Physical path as text, used verbatim when the token is exactly the prefix.
    physical_display: String,
    /// Physical path without a trailing separator; empty when the path is `/`.
    physical_base: String,
}

impl ResolvedMount {
    fn new(prefix: String, physical: PathBuf) -> Self {
        let physical_display = physical.to_string_lossy().into_owned();
        let physical_base = physical_display.trim_end_matches('/').to_string();
        Self {
            prefix,
            physical,
            physical_display,
            physical_base,
        }
    }

    /// Appends the part of a token after its prefix to the physical path.
    ///
    /// Leading separators are collapsed, so `/data//x` lands on `<data>/x`.
    fn join(&self, rest: &str) -> String {
        let rest = rest.trim_start_matches('/');
        if rest.is_empty() {
            self.physical_display.clone()
        } else {
            format!("{}/{rest}", self.physical_base)
        }
    }

    fn contains_physical(&self, value: &str) -> bool {
        if self.physical_base.is_empty() {
            return false;
        }
        value == self.physical_base
            || value
                .strip_prefix(self.physical_base.as_str())
                .is_some_and(|rest| rest.starts_with('/'))
    }
}

/// Immutable, normalized set of virtual mounts.
///
/// Mounts are kept in descending prefix length so that a more specific
/// mount (`/skills`) always wins over a less specific one (`/`).
#[derive(Debug, Clone)]
pub struct MountTable {
    mounts: Vec<ResolvedMount>,
}

impl MountTable {
    /// Builds the table, normalizing prefixes and absolutizing physical paths.
    ///
    /// A later mount with the same normalized prefix replaces an earlier one.
    /// Fails if no mount maps the root prefix `/`.
    pub fn new(mounts: impl IntoIterator<Item = VirtualMount>) -> Result<Self> {
        let mut normalized: Vec<ResolvedMount> = Vec::new();
        for mount in mounts {
            let prefix = normalize_prefix(&mount.virtual_prefix);
            let resolved = ResolvedMount::new(prefix, absolutize(&mount.physical));
            match normalized.iter_mut().find(|m| m.prefix == resolved.prefix) {
                Some(existing) => *existing = resolved,
                None => normalized.push(resolved),
            }
        }

        if !normalized.iter().any(|m| m.prefix == ROOT_PREFIX) {
            return Err(VirtualPathError::MissingRootMount);
        }

        normalized.sort_by_key(|m| std::cmp::Reverse(m.prefix.len()));
        Ok(Self { mounts: normalized })
    }

    /// Iterates `(prefix, physical)` pairs in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Path)> {
        self.mounts
            .iter()
            .map(|m| (m.prefix.as_str(), m.physical.as_path()))
    }

    pub fn len(&self) -> usize {
        self.mounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mounts.is_empty()
    }

    /// Physical path of the root (`/`) mount.
    pub fn root(&self) -> &Path {
        self.mounts
            .iter()
            .find(|m| m.prefix == ROOT_PREFIX)
            .map(|m| m.physical.as_path())
            .unwrap_or_else(|| Path::new(ROOT_PREFIX))
    }

    /// Rebases a token that starts with a virtual prefix onto its physical path.
    ///
    /// Returns `None` when the value is not absolute. The root mount matches
    /// every absolute value, so any absolute value rebases.
    pub fn rebase(&self, value: &str) -> Option<String> {
        if !value.starts_with('/') {
            return None;
        }

        for mount in &self.mounts {
            if mount.prefix == ROOT_PREFIX {
                return Some(mount.join(value));
            }

            let rest = value
                .strip_prefix(mount.prefix.as_str())
                .filter(|rest| rest.is_empty() || rest.starts_with('/'));
            if let Some(rest) = rest {
                return Some(mount.join(rest));
            }
        }

        None
    }

    /// Returns true if `value` already lies under one of the physical paths.
    pub fn is_physical(&self, value: &str) -> bool {
        self.mounts.iter().any(|m| m.contains_physical(value))
    }

    /// Maps a physical path back to its virtual form, preferring the mount
    /// with the most specific physical directory.
    pub fn virtualize(&self, physical: &Path) -> Option<String> {
        let (mount, rest) = self
            .mounts
            .iter()
            .filter_map(|m| physical.strip_prefix(&m.physical).ok().map(|rest| (m, rest)))
            .max_by_key(|(m, _)| m.physical.components().count())?;

        let rest = rest.to_string_lossy();
        let virtual_path = match (mount.prefix.as_str(), rest.is_empty()) {
            (prefix, true) => prefix.to_string(),
            (ROOT_PREFIX, false) => format!("/{rest}"),
            (prefix, false) => format!("{prefix}/{rest}"),
        };
        Some(virtual_path)
    }
}

/// Normalizes a prefix to start with `/` and never end with `/` (except `/`).
pub(crate) fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim_end_matches('/');
    if trimmed.is_empty() {
        return ROOT_PREFIX.to_string();
    }
    if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    }
}

/// Canonicalizes existing paths; falls back to a lexical absolute path.
fn absolutize(path: &Path) -> PathBuf {
    std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
#[path = "mount.test.rs"]
mod tests;
