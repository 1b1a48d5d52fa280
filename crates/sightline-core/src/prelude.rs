//! Common module for library exports

pub use crate::backend::scripted::{Program, ScriptedBackend};
pub use crate::backend::{Backend, LaunchOptions};
pub use crate::error::{SessionError, SessionResult};
pub use crate::session::{Session, SessionSnapshot, SessionState};
pub use crate::types::{Breakpoint, BreakpointSpec, CommandOutput, ProcessState, SourceLocation, Variable};
