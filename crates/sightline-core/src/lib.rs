//! # sightline-core
//!
//! Debug session control for Sightline.
//!
//! This crate owns everything between a native debugging engine and the
//! passive views that mirror its state:
//! - The [`Backend`] trait the engine is driven through
//! - The [`Session`] that owns one target/process lifecycle
//! - Backend-agnostic types (locations, locals, breakpoints)
//! - A scripted in-process backend for demos and tests
//!
//! ## Execution model
//!
//! Single-threaded and synchronous. Every backend call blocks until the engine
//! confirms the new state; there is no event loop and no cancellation.

pub mod backend;
pub mod error;
pub mod prelude;
pub mod session;
pub mod types;

pub use backend::{Backend, LaunchOptions};
// Re-export commonly used types
pub use error::{SessionError, SessionResult};
pub use session::{Session, SessionSnapshot, SessionState};
pub use types::{SourceLocation, Variable};
