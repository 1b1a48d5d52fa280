//! # Error Types
//!
//! Error handling for debug session operations.
//!
//! We use `thiserror` to automatically generate `Error` trait implementations
//! and nice error messages.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for session operations
///
/// Each variant corresponds to a specific way a session operation can fail.
/// Malformed console commands are deliberately absent: the backend reports
/// those as captured stderr text (see [`crate::types::CommandOutput`]).
///
/// ## Error Categories
///
/// 1. **Target errors**: TargetCreation, AlreadyInitialized, NoTarget
/// 2. **Process errors**: Launch, ProcessState
/// 3. **Breakpoint errors**: Breakpoint
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError
{
    /// The target binary could not be loaded
    ///
    /// This happens when the path does not exist or the backend cannot parse
    /// the file. The session stays uninitialized, so creating a target again
    /// is allowed.
    #[error("Failed to create target from {}: {reason}", path.display())]
    TargetCreation
    {
        /// Path that was handed to the backend
        path: PathBuf,
        /// Backend supplied explanation
        reason: String,
    },

    /// The process could not be spawned
    ///
    /// The session stays in its previous state, so launching again is allowed.
    #[error("Failed to launch process: {0}")]
    Launch(String),

    /// Operation requires a stopped process
    ///
    /// Returned by stepping and continuing when there is no process, or when
    /// the process already exited. Nothing about the session changes.
    #[error("Invalid process state: {0}")]
    ProcessState(String),

    /// A target was already created for this session
    ///
    /// A session is bound to exactly one target for its lifetime.
    #[error("Session already has a target")]
    AlreadyInitialized,

    /// Operation requires a target but none was created yet
    #[error("No target has been created")]
    NoTarget,

    /// The backend refused to create a breakpoint
    #[error("Failed to set breakpoint: {0}")]
    Breakpoint(String),
}

/// Convenience type alias for `Result<T, SessionError>`
///
/// ```rust
/// use sightline_core::error::SessionResult;
/// fn foo() -> SessionResult<()>
/// {
///     Ok(())
/// }
/// ```
pub type SessionResult<T> = std::result::Result<T, SessionError>;
