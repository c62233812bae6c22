//! Shared utilities for the vexec workspace.

mod logging;

pub use logging::ConfigurableTimer;
pub use logging::LoggingConfig;
pub use logging::TimezoneConfig;
pub use logging::build_env_filter;
pub use logging::init_logging;
pub use logging::with_scoped_logging;
pub use logging::with_scoped_writer;

#[doc(hidden)]
pub use tracing_subscriber as __tracing_subscriber;
