//! Virtual filesystem paths for agent-facing shell commands.
//!
//! The agent sees a small set of stable virtual paths (`/data`, `/scripts`,
//! `/results`, `/skills`, ...) while commands run against real directories.
//! This crate owns the mapping between the two:
//!
//! - [`VirtualMount`] / [`MountTable`]: normalized prefix → physical path table
//! - [`tokenize_words`]: tree-sitter based word tokenizer with byte spans
//! - [`VirtualPathResolver`]: `resolve()` for single paths and
//!   `rewrite_command()` for whole shell command lines
//!
//! # Quick Start
//!
//! ```
//! use vexec_virtual_path::{VirtualMount, VirtualPathResolver};
//!
//! let resolver = VirtualPathResolver::new([
//!     VirtualMount::new("/", "/srv/workspace"),
//!     VirtualMount::new("/data", "/srv/workspace/data"),
//! ])
//! .unwrap();
//!
//! let cmd = resolver.rewrite_command("head -n 5 '/data/orders.csv' | wc -l");
//! assert_eq!(cmd, "head -n 5 '/srv/workspace/data/orders.csv' | wc -l");
//! ```

mod error;
mod mount;
mod resolver;
mod rewrite;
mod tokenizer;

pub use error::Result;
pub use error::VirtualPathError;
pub use mount::MountTable;
pub use mount::ROOT_PREFIX;
pub use mount::VirtualMount;
pub use resolver::VirtualPathResolver;
pub use rewrite::rewrite_command;
pub use tokenizer::Span;
pub use tokenizer::WordKind;
pub use tokenizer::WordToken;
pub use tokenizer::tokenize_words;
