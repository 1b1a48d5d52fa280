//! # Sightline Utilities
//!
//! Logging setup shared by the Sightline crates, plus re-exports of the
//! `tracing` macros so front-end code can log without a direct dependency.

pub mod logging;

pub use logging::{init_logging, init_logging_for_tui, init_logging_with_level, LogFormat, LogGuard, LogLevel, LoggingError};
pub use tracing::{debug, error, info, trace, warn};
