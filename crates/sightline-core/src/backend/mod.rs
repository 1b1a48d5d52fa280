//! # Backend Trait
//!
//! The interface to a native debugging engine.
//!
//! Everything that is actually hard about debugging (symbol resolution,
//! breakpoint insertion, stack unwinding, expression evaluation) happens behind
//! this trait. The session only shuttles calls through it and keeps track of
//! what the engine reported.
//!
//! ## Synchronous contract
//!
//! Implementations must run with asynchronous event delivery disabled: every
//! method blocks until the engine confirms the resulting state. There is no
//! callback-driven event loop, no cancellation and no timeout.
//!
//! ## Implementations
//!
//! - [`scripted::ScriptedBackend`]: an in-process engine that executes a
//!   declarative program model. Used by the front-ends and the test-suite.

pub mod scripted;

use std::env;
use std::path::{Path, PathBuf};

use crate::error::SessionResult;
use crate::types::{Breakpoint, BreakpointHandle, BreakpointSpec, CommandOutput, ProcessHandle, ProcessState, SourceLocation, TargetHandle, Variable};

/// Arguments and working directory for a launch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchOptions
{
    /// Command-line arguments, not including the program name.
    pub args: Vec<String>,
    /// Working directory of the new process.
    pub cwd: PathBuf,
}

impl LaunchOptions
{
    /// Options with the given arguments and the current working directory.
    pub fn with_args<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            args: args.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }
}

impl Default for LaunchOptions
{
    fn default() -> Self
    {
        Self {
            args: Vec::new(),
            cwd: env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }
}

/// Native debugging engine interface
///
/// The session is the only caller. Views never reach the backend directly.
///
/// ## Lifecycle
///
/// 1. Load an executable: `create_target(path)`
/// 2. Set breakpoints: `add_breakpoint(target, spec)`
/// 3. Start it: `launch(target, options)` (process stops at entry)
/// 4. Drive it: `step_into`, `continue_`
/// 5. Inspect: `current_stop_location`, `locals_of_current_frame`
/// 6. Tear down: `kill`
///
/// ## Thread Safety
///
/// Backends are **not** re-entrant. Issuing a step while a previous step has
/// not returned is undefined; the single-threaded session makes that
/// impossible by construction.
pub trait Backend
{
    /// Load an executable and return its target handle
    ///
    /// ## Errors
    ///
    /// - `TargetCreation`: the file is missing or not an executable the engine understands
    fn create_target(&mut self, path: &Path) -> SessionResult<TargetHandle>;

    /// Request a breakpoint on the target
    ///
    /// Resolution happens inside the engine; a breakpoint that matches nothing
    /// is still created and simply has no locations.
    ///
    /// ## Errors
    ///
    /// - `NoTarget`: the handle is unknown
    /// - `Breakpoint`: the engine refused the request
    fn add_breakpoint(&mut self, target: TargetHandle, spec: &BreakpointSpec) -> SessionResult<BreakpointHandle>;

    /// All breakpoints of a target with their resolved locations
    ///
    /// Ordered by breakpoint index; locations keep the engine's order. Returns
    /// an empty list when no breakpoint has been set.
    fn list_breakpoints(&self, target: TargetHandle) -> Vec<Breakpoint>;

    /// Launch the target; the new process is stopped at its entry point
    ///
    /// ## Errors
    ///
    /// - `Launch`: the engine could not spawn the process
    fn launch(&mut self, target: TargetHandle, options: &LaunchOptions) -> SessionResult<ProcessHandle>;

    /// The live process of a target, if any
    ///
    /// Console commands can launch or kill processes behind the session's
    /// back; this lets the session adopt whatever the engine currently has.
    fn target_process(&self, target: TargetHandle) -> Option<ProcessHandle>;

    /// The target console commands currently operate on
    ///
    /// Lets the session adopt a target created with `target create`.
    fn selected_target(&self) -> Option<TargetHandle>;

    /// Remember the options a console `run` should launch with
    ///
    /// Typed launches pass their options explicitly; engines without a
    /// console launch can ignore this.
    fn set_launch_options(&mut self, _options: &LaunchOptions) {}

    /// Current state of a process
    ///
    /// Unknown handles report `Exited(0)`.
    fn process_state(&self, process: ProcessHandle) -> ProcessState;

    /// Where the selected thread's top frame is stopped
    ///
    /// `None` when the process is running, has exited, or the frame has no
    /// line information.
    fn current_stop_location(&self, process: ProcessHandle) -> Option<SourceLocation>;

    /// Step into the next source line, entering calls
    ///
    /// ## Errors
    ///
    /// - `ProcessState`: the process is not stopped or does not exist
    fn step_into(&mut self, process: ProcessHandle) -> SessionResult<()>;

    /// Resume until the next breakpoint or process exit
    ///
    /// ## Errors
    ///
    /// - `ProcessState`: the process is not stopped or does not exist
    fn continue_(&mut self, process: ProcessHandle) -> SessionResult<()>;

    /// Terminate the process
    ///
    /// ## Errors
    ///
    /// - `ProcessState`: the process does not exist
    fn kill(&mut self, process: ProcessHandle) -> SessionResult<()>;

    /// Variables visible in the current frame
    ///
    /// Empty when there is no stopped frame.
    fn locals_of_current_frame(&self, process: ProcessHandle) -> Vec<Variable>;

    /// Run a free-form console command
    ///
    /// Never fails: malformed input is reported in [`CommandOutput::stderr`].
    fn execute_command(&mut self, text: &str) -> CommandOutput;
}
