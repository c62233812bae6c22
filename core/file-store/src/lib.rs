//! File operations over agent-facing virtual paths.
//!
//! [`LocalFileStore`] resolves every path through the same
//! [`VirtualPathResolver`](vexec_virtual_path::VirtualPathResolver) the local
//! execution backend uses for shell commands.

mod error;
mod format;
mod local;
mod store;

pub use error::FileStoreError;
pub use error::Result;
pub use format::EMPTY_FILE_REMINDER;
pub use format::format_lines;
pub use local::LocalFileStore;
pub use store::DEFAULT_READ_LIMIT;
pub use store::FileInfo;
pub use store::FileStore;
