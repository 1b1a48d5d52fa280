//! # Session
//!
//! One debug target's lifecycle, owned end to end.
//!
//! The session is the only component that talks to the [`Backend`]. Views and
//! front-ends read a [`SessionSnapshot`] and never mutate anything.
//!
//! ## State machine
//!
//! ```text
//! Uninitialized --create_target--> TargetCreated --launch--> Stopped <--> Running
//!                                                              |
//!                                    (step/continue/kill) --> Exited --launch--> Stopped
//! ```
//!
//! - `add_breakpoint` is valid once a target exists.
//! - `step_into` / `continue_` are valid only in `Stopped`.
//! - `launch` is the only way into `Stopped`.
//!
//! ## Re-entrancy
//!
//! Every operation blocks until the backend confirms the new state and none of
//! them may be called while another is in progress. `&mut self` receivers make
//! that a compile-time property for safe code.

use std::fmt;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::backend::{Backend, LaunchOptions};
use crate::error::{SessionError, SessionResult};
use crate::types::{BreakpointHandle, BreakpointSpec, CommandOutput, ProcessHandle, ProcessState, SourceLocation, TargetHandle, Variable};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState
{
    /// No target yet.
    Uninitialized,
    /// Target loaded, no process.
    TargetCreated,
    /// Process stopped and inspectable.
    Stopped,
    /// Process executing.
    Running,
    /// Process exited or was killed.
    Exited,
}

impl fmt::Display for SessionState
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        let label = match self {
            Self::Uninitialized => "uninitialized",
            Self::TargetCreated => "target created",
            Self::Stopped => "stopped",
            Self::Running => "running",
            Self::Exited => "exited",
        };
        write!(f, "{label}")
    }
}

/// Immutable projection of a session handed to views
///
/// Built fresh from the backend every time it is requested; nothing in here is
/// cached between stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot
{
    /// Lifecycle state at the time of the snapshot.
    pub state: SessionState,
    /// Where the process is stopped, if it is.
    pub location: Option<SourceLocation>,
    /// Every resolved breakpoint location, in backend enumeration order.
    pub breakpoints: Vec<SourceLocation>,
    /// Locals of the current frame, empty unless stopped.
    pub locals: Vec<Variable>,
}

impl SessionSnapshot
{
    /// Snapshot of a session that has nothing loaded.
    #[must_use]
    pub fn empty() -> Self
    {
        Self {
            state: SessionState::Uninitialized,
            location: None,
            breakpoints: Vec::new(),
            locals: Vec::new(),
        }
    }
}

/// Debug session over a backend
///
/// ## Example
///
/// ```rust
/// use sightline_core::backend::scripted::{Program, ScriptedBackend};
/// use sightline_core::Session;
///
/// let backend = ScriptedBackend::new().with_program("a.out", Program::sample());
/// let mut session = Session::new(backend);
/// session.create_target("a.out")?;
/// session.add_breakpoint("main")?;
/// session.launch()?;
/// assert_eq!(session.breakpoints(), vec!["main.c:9:3".to_string()]);
/// # Ok::<(), sightline_core::SessionError>(())
/// ```
pub struct Session<B: Backend>
{
    backend: B,
    target: Option<TargetHandle>,
    process: Option<ProcessHandle>,
    state: SessionState,
    location: Option<SourceLocation>,
    launch_options: LaunchOptions,
}

impl<B: Backend> Session<B>
{
    /// Create an uninitialized session that owns `backend`.
    pub fn new(backend: B) -> Self
    {
        Self {
            backend,
            target: None,
            process: None,
            state: SessionState::Uninitialized,
            location: None,
            launch_options: LaunchOptions::default(),
        }
    }

    /// Replace the arguments and working directory used by [`Session::launch`]
    ///
    /// A `run` typed at the console uses the same options.
    #[must_use]
    pub fn with_launch_options(mut self, options: LaunchOptions) -> Self
    {
        self.backend.set_launch_options(&options);
        self.launch_options = options;
        self
    }

    /// Read-only access to the backend.
    pub fn backend(&self) -> &B
    {
        &self.backend
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState
    {
        self.state
    }

    /// The target handle, once created.
    pub fn target(&self) -> Option<TargetHandle>
    {
        self.target
    }

    /// Where the process is stopped. `None` unless the state is `Stopped`.
    pub fn current_location(&self) -> Option<&SourceLocation>
    {
        self.location.as_ref()
    }

    /// Load the executable this session is bound to
    ///
    /// ## Errors
    ///
    /// - `AlreadyInitialized`: a target was already created
    /// - `TargetCreation`: the backend could not load `path`
    pub fn create_target(&mut self, path: impl AsRef<Path>) -> SessionResult<TargetHandle>
    {
        let path = path.as_ref();
        if self.target.is_some() {
            return Err(SessionError::AlreadyInitialized);
        }
        let target = self.backend.create_target(path).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "target creation failed");
        })?;
        info!(target = %target, path = %path.display(), "target created");
        self.target = Some(target);
        self.state = SessionState::TargetCreated;
        Ok(target)
    }

    /// Request a breakpoint from text such as `main` or `main.c:12`
    ///
    /// Views are not refreshed; callers decide when to render.
    ///
    /// ## Errors
    ///
    /// - `NoTarget`: called before [`Session::create_target`]
    /// - `Breakpoint`: the text is empty or the backend refused the request
    pub fn add_breakpoint(&mut self, spec: &str) -> SessionResult<BreakpointHandle>
    {
        self.add_breakpoint_spec(spec.parse()?)
    }

    /// Request a breakpoint from an already-built [`BreakpointSpec`]
    ///
    /// ## Errors
    ///
    /// Same as [`Session::add_breakpoint`].
    pub fn add_breakpoint_spec(&mut self, spec: BreakpointSpec) -> SessionResult<BreakpointHandle>
    {
        let target = self.target.ok_or(SessionError::NoTarget)?;
        let id = self.backend.add_breakpoint(target, &spec)?;
        info!(breakpoint = %id, spec = %spec, "breakpoint added");
        Ok(id)
    }

    /// Every resolved breakpoint location, typed
    pub fn breakpoint_locations(&self) -> Vec<SourceLocation>
    {
        let Some(target) = self.target else {
            return Vec::new();
        };
        self.backend
            .list_breakpoints(target)
            .into_iter()
            .flat_map(|bp| bp.locations)
            .collect()
    }

    /// Every resolved breakpoint location as `file:line:column`
    ///
    /// Ordered by breakpoint index, then location index within the breakpoint.
    pub fn breakpoints(&self) -> Vec<String>
    {
        self.breakpoint_locations().iter().map(ToString::to_string).collect()
    }

    /// Start the target; the process stops at its entry point
    ///
    /// Re-running after the previous process exited or was killed is allowed.
    ///
    /// ## Errors
    ///
    /// - `Launch`: no target, a process is still live, or the backend failed
    ///   to spawn. The session state is left as it was.
    pub fn launch(&mut self) -> SessionResult<ProcessHandle>
    {
        let target = self
            .target
            .ok_or_else(|| SessionError::Launch("no target has been created".to_string()))?;
        if self.process.is_some() {
            return Err(SessionError::Launch("a process is already running".to_string()));
        }

        let process = self.backend.launch(target, &self.launch_options)?;
        info!(process = %process, "process launched");
        self.process = Some(process);
        self.refresh_stop();
        Ok(process)
    }

    /// Step into the next source line
    ///
    /// ## Errors
    ///
    /// - `ProcessState`: there is no stopped process. Nothing changes.
    pub fn step_into(&mut self) -> SessionResult<()>
    {
        let process = self.stopped_process("step")?;
        self.backend.step_into(process)?;
        self.refresh_stop();
        debug!(location = ?self.location, state = %self.state, "step complete");
        Ok(())
    }

    /// Resume until the next breakpoint or exit
    ///
    /// ## Errors
    ///
    /// - `ProcessState`: there is no stopped process. Nothing changes.
    pub fn continue_(&mut self) -> SessionResult<()>
    {
        let process = self.stopped_process("continue")?;
        self.backend.continue_(process)?;
        self.refresh_stop();
        debug!(location = ?self.location, state = %self.state, "continue complete");
        Ok(())
    }

    /// Terminate the process. Does nothing if there is none.
    ///
    /// ## Errors
    ///
    /// Propagates a backend failure to kill a live process.
    pub fn kill(&mut self) -> SessionResult<()>
    {
        let Some(process) = self.process.take() else {
            return Ok(());
        };
        if !matches!(self.backend.process_state(process), ProcessState::Exited(_)) {
            if let Err(e) = self.backend.kill(process) {
                self.process = Some(process);
                return Err(e);
            }
        }
        info!(process = %process, "process killed");
        self.location = None;
        self.state = SessionState::Exited;
        Ok(())
    }

    /// Locals of the current frame; empty when not stopped
    pub fn locals(&self) -> Vec<Variable>
    {
        match self.process {
            Some(process) if self.state == SessionState::Stopped => self.backend.locals_of_current_frame(process),
            _ => Vec::new(),
        }
    }

    /// Run a free-form console command, then re-derive state from the backend
    ///
    /// Malformed commands are not errors; their diagnostics are in the
    /// returned [`CommandOutput::stderr`].
    pub fn execute_command(&mut self, text: &str) -> CommandOutput
    {
        let output = self.backend.execute_command(text);
        if output.is_error() {
            debug!(command = text, stderr = %output.stderr.trim_end(), "console command reported an error");
        }
        self.sync();
        output
    }

    /// Re-derive target, process, state and location from the backend
    ///
    /// Console commands can create targets and launch, step or kill processes
    /// without going through the typed operations.
    pub fn sync(&mut self)
    {
        if self.target.is_none() {
            if let Some(adopted) = self.backend.selected_target() {
                info!(target = %adopted, "adopted target created from the console");
                self.target = Some(adopted);
                self.state = SessionState::TargetCreated;
            }
        }
        let Some(target) = self.target else {
            return;
        };
        if let Some(live) = self.backend.target_process(target) {
            if self.process != Some(live) {
                debug!(process = %live, "adopted process started from the console");
                self.process = Some(live);
            }
        }
        self.refresh_stop();
    }

    /// Build a snapshot for the views
    pub fn snapshot(&self) -> SessionSnapshot
    {
        SessionSnapshot {
            state: self.state,
            location: self.location.clone(),
            breakpoints: self.breakpoint_locations(),
            locals: self.locals(),
        }
    }

    fn stopped_process(&self, action: &str) -> SessionResult<ProcessHandle>
    {
        match (self.process, self.state) {
            (Some(process), SessionState::Stopped) => Ok(process),
            (Some(_), state) => Err(SessionError::ProcessState(format!("cannot {action}: process is {state}"))),
            (None, _) => Err(SessionError::ProcessState(format!("cannot {action}: no process"))),
        }
    }

    /// Recompute state and location after a stop event.
    fn refresh_stop(&mut self)
    {
        let Some(process) = self.process else {
            return;
        };
        match self.backend.process_state(process) {
            ProcessState::Stopped => {
                self.state = SessionState::Stopped;
                self.location = self.backend.current_stop_location(process);
            }
            ProcessState::Running => {
                self.state = SessionState::Running;
                self.location = None;
            }
            ProcessState::Exited(code) => {
                info!(process = %process, code, "process exited");
                self.process = None;
                self.state = SessionState::Exited;
                self.location = None;
            }
        }
    }
}

impl<B: Backend> Drop for Session<B>
{
    fn drop(&mut self)
    {
        if let Err(e) = self.kill() {
            warn!(error = %e, "failed to kill process during session teardown");
        }
    }
}

impl<B: Backend> fmt::Debug for Session<B>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        f.debug_struct("Session")
            .field("target", &self.target)
            .field("process", &self.process)
            .field("state", &self.state)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
