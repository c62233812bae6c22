use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

use crate::error::Result;

/// Default number of lines returned by [`FileStore::read`].
pub const DEFAULT_READ_LIMIT: usize = 2000;

/// A directory entry, addressed by its virtual path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileInfo {
    pub path: String,
    pub is_dir: bool,
    /// Size in bytes; zero for directories.
    pub size: u64,
    /// RFC 3339 modification time, when the platform reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
}

/// File operations over absolute virtual paths.
///
/// Paths are the same ones the agent uses in shell commands, so `/data/x.csv`
/// refers to the same file here and in `cat /data/x.csv`.
#[async_trait]
pub trait FileStore: Send + Sync {
    fn id(&self) -> &str;

    /// Lists the immediate children of a directory, directories first.
    async fn ls(&self, path: &str) -> Result<Vec<FileInfo>>;

    /// Reads `limit` lines starting at the 0-based line `offset`, formatted
    /// with 1-based line numbers (`cat -n` style).
    async fn read(&self, path: &str, offset: usize, limit: usize) -> Result<String>;

    /// Creates a new file. Fails if the file already exists.
    async fn write(&self, path: &str, content: &str) -> Result<()>;

    /// Replaces `old` with `new`, returning the number of replacements.
    ///
    /// Without `replace_all`, `old` must occur exactly once.
    async fn edit(&self, path: &str, old: &str, new: &str, replace_all: bool) -> Result<usize>;

    /// Finds files under `path` whose relative path matches `pattern`.
    async fn glob(&self, pattern: &str, path: &str) -> Result<Vec<FileInfo>>;
}
