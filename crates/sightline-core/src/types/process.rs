//! Backend handles and process state.
//!
//! Handles are opaque to the session: the backend hands them out and is the
//! only party that knows what they refer to.

use std::fmt;

macro_rules! backend_handle {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(u64);

        impl $name
        {
            /// Create a handle from a raw value.
            #[must_use]
            pub const fn from_raw(value: u64) -> Self
            {
                Self(value)
            }

            /// Get the raw numeric representation (useful for logging / errors).
            #[must_use]
            pub const fn raw(self) -> u64
            {
                self.0
            }
        }

        impl fmt::Display for $name
        {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
            {
                write!(f, "{}", self.0)
            }
        }
    };
}

backend_handle!(
    /// Identifies a target (a loaded executable) inside the backend.
    TargetHandle
);
backend_handle!(
    /// Identifies a launched process inside the backend.
    ProcessHandle
);
backend_handle!(
    /// Identifies a breakpoint inside the backend.
    BreakpointHandle
);

/// State of a process as reported by the backend
///
/// Because every backend call is synchronous, `Running` is only observed when
/// the backend itself reports a process that has not stopped yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessState
{
    /// Stopped and inspectable (entry, breakpoint hit, end of a step).
    Stopped,
    /// Executing.
    Running,
    /// Exited with the given status code. The handle is dead.
    Exited(i32),
}

impl ProcessState
{
    /// Returns `true` if the process can be stepped or inspected.
    #[must_use]
    pub const fn is_stopped(self) -> bool
    {
        matches!(self, Self::Stopped)
    }
}

impl fmt::Display for ProcessState
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        match self {
            Self::Stopped => write!(f, "stopped"),
            Self::Running => write!(f, "running"),
            Self::Exited(code) => write!(f, "exited with status = {code}"),
        }
    }
}
