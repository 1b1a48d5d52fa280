//! # Types
//!
//! Backend-agnostic types used throughout the session layer.
//!
//! These types describe what the debugger reports (stop locations, locals,
//! breakpoints) without committing to any particular engine, so the session
//! and the views never see backend-specific structures.

pub mod breakpoint;
pub mod command;
pub mod location;
pub mod process;
pub mod variable;

// Re-export all public types
pub use breakpoint::{Breakpoint, BreakpointSpec};
pub use command::CommandOutput;
pub use location::SourceLocation;
pub use process::{BreakpointHandle, ProcessHandle, ProcessState, TargetHandle};
pub use variable::Variable;
