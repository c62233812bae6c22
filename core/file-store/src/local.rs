//! [`FileStore`] over the local filesystem, addressed through virtual paths.

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use globset::GlobBuilder;
use tokio::fs;
use vexec_virtual_path::ROOT_PREFIX;
use vexec_virtual_path::VirtualPathResolver;

use crate::error::FileStoreError;
use crate::error::Result;
use crate::format::EMPTY_FILE_REMINDER;
use crate::format::format_lines;
use crate::store::FileInfo;
use crate::store::FileStore;

/// Local file store sharing its resolver with the execution backend.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    id: String,
    resolver: Arc<VirtualPathResolver>,
}

impl LocalFileStore {
    pub fn new(resolver: Arc<VirtualPathResolver>) -> Self {
        let dir_name = resolver
            .root()
            .file_name()
            .map_or_else(|| "root".to_string(), |name| name.to_string_lossy().into_owned());
        Self {
            id: format!("local-fs-{dir_name}"),
            resolver,
        }
    }

    pub fn resolver(&self) -> &Arc<VirtualPathResolver> {
        &self.resolver
    }

    /// Validates a virtual path and maps it to its physical location.
    pub fn resolve(&self, path: &str) -> Result<PathBuf> {
        let path = validate_path(path)?;
        self.resolver
            .resolve(path)
            .ok_or_else(|| FileStoreError::InvalidPath {
                path: path.to_string(),
                reason: "no mount matches this path",
            })
    }

    /// Mount prefixes that appear as children of `dir` without existing on disk there.
    fn mount_children(&self, dir: &str) -> Vec<String> {
        self.resolver
            .mounts()
            .iter()
            .map(|(prefix, _)| prefix)
            .filter(|prefix| *prefix != ROOT_PREFIX && parent_of(prefix) == dir)
            .map(str::to_string)
            .collect()
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    fn id(&self) -> &str {
        &self.id
    }

    async fn ls(&self, path: &str) -> Result<Vec<FileInfo>> {
        let physical = self.resolve(path)?;
        let dir = normalize_dir(path);

        let mut reader = fs::read_dir(&physical)
            .await
            .map_err(|err| FileStoreError::io(path, err))?;
        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|err| FileStoreError::io(path, err))?
        {
            let name = entry.file_name().to_string_lossy().into_owned();
            let metadata = match entry.metadata().await {
                Ok(metadata) => metadata,
                Err(err) => {
                    tracing::debug!(entry = %name, error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            entries.push(file_info(join_virtual(&dir, &name), &metadata));
        }

        for prefix in self.mount_children(&dir) {
            if entries.iter().any(|e| e.path == prefix) {
                continue;
            }
            entries.push(FileInfo {
                path: prefix,
                is_dir: true,
                size: 0,
                modified_at: None,
            });
        }

        sort_entries(&mut entries);
        Ok(entries)
    }

    async fn read(&self, path: &str, offset: usize, limit: usize) -> Result<String> {
        let physical = self.resolve(path)?;
        let bytes = fs::read(&physical)
            .await
            .map_err(|err| FileStoreError::io(path, err))?;
        let content = String::from_utf8_lossy(&bytes);

        if content.trim().is_empty() {
            return Ok(EMPTY_FILE_REMINDER.to_string());
        }

        format_lines(&content, offset, limit).ok_or_else(|| FileStoreError::InvalidPath {
            path: path.to_string(),
            reason: "line offset exceeds file length",
        })
    }

    async fn write(&self, path: &str, content: &str) -> Result<()> {
        let physical = self.resolve(path)?;
        if fs::try_exists(&physical).await.unwrap_or(false) {
            return Err(FileStoreError::AlreadyExists(path.to_string()));
        }
        if let Some(parent) = physical.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|err| FileStoreError::io(path, err))?;
        }
        fs::write(&physical, content)
            .await
            .map_err(|err| FileStoreError::io(path, err))?;
        tracing::debug!(path, physical = %physical.display(), bytes = content.len(), "wrote file");
        Ok(())
    }

    async fn edit(&self, path: &str, old: &str, new: &str, replace_all: bool) -> Result<usize> {
        if old.is_empty() {
            return Err(FileStoreError::EmptyOldString);
        }
        let physical = self.resolve(path)?;
        let content = fs::read_to_string(&physical)
            .await
            .map_err(|err| FileStoreError::io(path, err))?;

        let count = content.matches(old).count();
        let updated = match count {
            0 => return Err(FileStoreError::StringNotFound(old.to_string())),
            1 => content.replacen(old, new, 1),
            _ if replace_all => content.replace(old, new),
            _ => return Err(FileStoreError::AmbiguousEdit { count }),
        };

        fs::write(&physical, updated)
            .await
            .map_err(|err| FileStoreError::io(path, err))?;
        tracing::debug!(path, replacements = count, "edited file");
        Ok(count)
    }

    async fn glob(&self, pattern: &str, path: &str) -> Result<Vec<FileInfo>> {
        let physical = self.resolve(path)?;
        let dir = normalize_dir(path);
        let matcher = GlobBuilder::new(pattern.trim_start_matches('/'))
            .literal_separator(true)
            .build()
            .map_err(|err| FileStoreError::InvalidGlob {
                pattern: pattern.to_string(),
                error: err.to_string(),
            })?
            .compile_matcher();

        let mut matches = Vec::new();
        for entry in walkdir::WalkDir::new(&physical)
            .min_depth(1)
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            let Ok(relative) = entry.path().strip_prefix(&physical) else {
                continue;
            };
            if !matcher.is_match(relative) {
                continue;
            }
            let Ok(metadata) = entry.metadata() else {
                continue;
            };
            let virtual_path = join_virtual(&dir, &relative_to_virtual(relative));
            matches.push(file_info(virtual_path, &metadata));
        }

        sort_entries(&mut matches);
        Ok(matches)
    }
}

/// Accepts absolute virtual paths without `..` components.
fn validate_path(path: &str) -> Result<&str> {
    let invalid = |reason| FileStoreError::InvalidPath {
        path: path.to_string(),
        reason,
    };
    if !path.starts_with('/') {
        return Err(invalid("path must be absolute"));
    }
    if path.contains('\0') {
        return Err(invalid("path contains a NUL byte"));
    }
    if path.split('/').any(|component| component == "..") {
        return Err(invalid("path must not contain '..'"));
    }
    Ok(path)
}

fn normalize_dir(path: &str) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        ROOT_PREFIX.to_string()
    } else {
        trimmed.to_string()
    }
}

fn join_virtual(dir: &str, name: &str) -> String {
    if dir == ROOT_PREFIX {
        format!("/{name}")
    } else {
        format!("{dir}/{name}")
    }
}

fn parent_of(prefix: &str) -> &str {
    match prefix.rfind('/') {
        Some(0) | None => ROOT_PREFIX,
        Some(idx) => &prefix[..idx],
    }
}

fn relative_to_virtual(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn file_info(path: String, metadata: &std::fs::Metadata) -> FileInfo {
    let is_dir = metadata.is_dir();
    FileInfo {
        path,
        is_dir,
        size: if is_dir { 0 } else { metadata.len() },
        modified_at: metadata
            .modified()
            .ok()
            .map(|time| DateTime::<Utc>::from(time).to_rfc3339()),
    }
}

fn sort_entries(entries: &mut [FileInfo]) {
    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.path.cmp(&b.path)));
}

#[cfg(test)]
#[path = "local.test.rs"]
mod tests;
