//! Resolver shared by shell execution and file operations.

use std::borrow::Cow;
use std::path::Path;
use std::path::PathBuf;

use crate::error::Result;
use crate::mount::MountTable;
use crate::mount::VirtualMount;
use crate::rewrite::rewrite_command;

/// Maps agent-facing virtual paths onto physical directories.
///
/// Read-only after construction; share it behind an `Arc` between the
/// execution backend and the file store so a path means the same thing in
/// both places.
#[derive(Debug, Clone)]
pub struct VirtualPathResolver {
    mounts: MountTable,
}

impl VirtualPathResolver {
    /// Builds a resolver from an ordered list of mounts.
    ///
    /// Fails with [`VirtualPathError::MissingRootMount`](crate::VirtualPathError::MissingRootMount)
    /// if no mount maps `/`.
    pub fn new(mounts: impl IntoIterator<Item = VirtualMount>) -> Result<Self> {
        let mounts = MountTable::new(mounts)?;
        tracing::debug!(mounts = mounts.len(), root = %mounts.root().display(), "virtual path resolver ready");
        Ok(Self { mounts })
    }

    pub fn mounts(&self) -> &MountTable {
        &self.mounts
    }

    /// Physical directory backing `/`.
    pub fn root(&self) -> &Path {
        self.mounts.root()
    }

    /// Rewrites every virtual path in a shell command line.
    pub fn rewrite_command<'a>(&self, command: &'a str) -> Cow<'a, str> {
        rewrite_command(&self.mounts, command)
    }

    /// Resolves a single absolute virtual path to its physical location.
    ///
    /// Paths already under a mount's physical directory are returned as is,
    /// matching how [`rewrite_command`](Self::rewrite_command) treats them.
    /// Returns `None` for relative paths.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        if self.mounts.is_physical(path) {
            return Some(PathBuf::from(path));
        }
        self.mounts.rebase(path).map(PathBuf::from)
    }

    /// Maps a physical path back to the virtual path the agent would use.
    pub fn virtualize(&self, physical: &Path) -> Option<String> {
        self.mounts.virtualize(physical)
    }
}

#[cfg(test)]
#[path = "resolver.test.rs"]
mod tests;
