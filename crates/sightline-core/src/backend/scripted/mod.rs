//! # Scripted Backend
//!
//! An in-process engine that implements [`Backend`] over the declarative
//! [`Program`] model instead of a real process.
//!
//! Programs are registered under a path with [`ScriptedBackend::load`]; only
//! registered paths can become targets. Each target has at most one process,
//! represented as a call stack of `(function, statement)` frames. Stepping,
//! continuing and breakpoint hits follow the rules documented on [`Program`].
//!
//! The console accepts an lldb-flavoured command subset (see `help`) and
//! operates on the most recently created target.

mod console;
pub mod program;

use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

pub use self::program::{Action, Function, Program, Statement};
use self::console::{ConsoleCommand, HELP_TEXT};
use super::{Backend, LaunchOptions};
use crate::error::{SessionError, SessionResult};
use crate::types::{Breakpoint, BreakpointHandle, BreakpointSpec, CommandOutput, ProcessHandle, ProcessState, SourceLocation, TargetHandle, Variable};

/// Depth at which runaway recursion is treated as a stack overflow.
const MAX_FRAME_DEPTH: usize = 1024;

/// Exit status reported when the stack overflows (128 + SIGSEGV).
const STACK_OVERFLOW_STATUS: i32 = 139;

/// Exit status reported for a killed process (SIGKILL).
const KILLED_STATUS: i32 = 9;

/// Value shown for a local whose declaration has not executed yet.
const UNINITIALIZED: &str = "<uninitialized>";

#[derive(Debug, Clone, Copy)]
struct Frame
{
    function: usize,
    /// Index of the statement the frame is stopped at.
    statement: usize,
}

#[derive(Debug)]
struct Process
{
    handle: ProcessHandle,
    frames: Vec<Frame>,
    state: ProcessState,
    args: Vec<String>,
}

#[derive(Debug)]
struct Target
{
    handle: TargetHandle,
    path: PathBuf,
    program: Program,
    breakpoints: Vec<Breakpoint>,
    process: Option<Process>,
}

/// In-process engine executing [`Program`]s
#[derive(Debug, Default)]
pub struct ScriptedBackend
{
    images: HashMap<PathBuf, Program>,
    targets: Vec<Target>,
    next_id: u64,
    /// Used by console `run`.
    launch_options: LaunchOptions,
}

impl ScriptedBackend
{
    /// Create an engine with no loadable programs.
    #[must_use]
    pub fn new() -> Self
    {
        Self::default()
    }

    /// Make `program` loadable under `path`.
    pub fn load(&mut self, path: impl Into<PathBuf>, program: Program)
    {
        self.images.insert(path.into(), program);
    }

    /// Builder form of [`ScriptedBackend::load`].
    #[must_use]
    pub fn with_program(mut self, path: impl Into<PathBuf>, program: Program) -> Self
    {
        self.load(path, program);
        self
    }

    /// The program behind a target, if the handle is known.
    #[must_use]
    pub fn program(&self, target: TargetHandle) -> Option<&Program>
    {
        self.target(target).map(|t| &t.program)
    }

    /// Arguments a process was launched with.
    #[must_use]
    pub fn launch_args(&self, process: ProcessHandle) -> Option<&[String]>
    {
        self.target_of_process(process)
            .and_then(|t| t.process.as_ref())
            .map(|p| p.args.as_slice())
    }

    fn allocate_id(&mut self) -> u64
    {
        self.next_id += 1;
        self.next_id
    }

    fn target(&self, handle: TargetHandle) -> Option<&Target>
    {
        self.targets.iter().find(|t| t.handle == handle)
    }

    fn target_mut(&mut self, handle: TargetHandle) -> Option<&mut Target>
    {
        self.targets.iter_mut().find(|t| t.handle == handle)
    }

    fn target_of_process(&self, handle: ProcessHandle) -> Option<&Target>
    {
        self.targets
            .iter()
            .find(|t| t.process.as_ref().is_some_and(|p| p.handle == handle))
    }

    fn target_of_process_mut(&mut self, handle: ProcessHandle) -> Option<&mut Target>
    {
        self.targets
            .iter_mut()
            .find(|t| t.process.as_ref().is_some_and(|p| p.handle == handle))
    }

    /// The stopped process of a target, for mutation.
    fn stopped_process(&mut self, handle: ProcessHandle) -> SessionResult<&mut Target>
    {
        let target = self
            .target_of_process_mut(handle)
            .ok_or_else(|| SessionError::ProcessState(format!("no process with handle {handle}")))?;
        let state = target.process.as_ref().map_or(ProcessState::Exited(0), |p| p.state);
        if !state.is_stopped() {
            return Err(SessionError::ProcessState(format!("process {handle} is {state}")));
        }
        Ok(target)
    }

    // -- console ---------------------------------------------------------------

    fn console(&mut self, command: ConsoleCommand) -> CommandOutput
    {
        match command {
            ConsoleCommand::Empty => CommandOutput::default(),
            ConsoleCommand::Help => CommandOutput::stdout(HELP_TEXT),
            ConsoleCommand::Invalid(word) => CommandOutput::stderr(format!("error: '{word}' is not a valid command.\n")),
            ConsoleCommand::Usage(message) => CommandOutput::stderr(format!("{message}\n")),
            ConsoleCommand::TargetCreate(_) if !self.targets.is_empty() => {
                CommandOutput::stderr("error: a target already exists; only one target can be debugged at a time\n")
            }
            ConsoleCommand::TargetCreate(path) => match self.create_target(Path::new(&path)) {
                Ok(_) => CommandOutput::stdout(format!("Current executable set to '{path}'.\n")),
                Err(e) => CommandOutput::stderr(format!("error: {e}\n")),
            },
            ConsoleCommand::BreakpointSet(spec) => self.console_breakpoint_set(&spec),
            ConsoleCommand::BreakpointList => self.console_breakpoint_list(),
            ConsoleCommand::Run => self.console_run(),
            ConsoleCommand::Step => self.console_drive(|backend, process| backend.step_into(process)),
            ConsoleCommand::Continue => self.console_drive(|backend, process| backend.continue_(process)),
            ConsoleCommand::FrameVariable => self.console_frame_variable(),
            ConsoleCommand::Kill => self.console_kill(),
        }
    }

    fn console_breakpoint_set(&mut self, spec: &BreakpointSpec) -> CommandOutput
    {
        let Some(target) = self.selected_target() else {
            return no_target();
        };
        match self.add_breakpoint(target, spec) {
            Ok(id) => {
                let locations = self
                    .list_breakpoints(target)
                    .into_iter()
                    .find(|bp| bp.id == id)
                    .map(|bp| bp.locations)
                    .unwrap_or_default();
                match locations.as_slice() {
                    [] => CommandOutput::stdout(format!(
                        "Breakpoint {id}: no locations (pending).\nWARNING:  Unable to resolve breakpoint to any actual locations.\n"
                    )),
                    [location] => CommandOutput::stdout(format!("Breakpoint {id}: where = {location}\n")),
                    many => CommandOutput::stdout(format!("Breakpoint {id}: {} locations.\n", many.len())),
                }
            }
            Err(e) => CommandOutput::stderr(format!("error: {e}\n")),
        }
    }

    fn console_breakpoint_list(&self) -> CommandOutput
    {
        let Some(target) = self.selected_target() else {
            return no_target();
        };
        let breakpoints = self.list_breakpoints(target);
        if breakpoints.is_empty() {
            return CommandOutput::stdout("No breakpoints currently set.\n");
        }

        let mut out = String::from("Current breakpoints:\n");
        for bp in &breakpoints {
            let _ = writeln!(out, "{}: {} = '{}', locations = {}", bp.id, spec_kind(&bp.spec), bp.spec, bp.locations.len());
            for (index, location) in bp.locations.iter().enumerate() {
                let _ = writeln!(out, "  {}.{}: where = {location}", bp.id, index + 1);
            }
        }
        CommandOutput::stdout(out)
    }

    fn console_run(&mut self) -> CommandOutput
    {
        let Some(target) = self.selected_target() else {
            return no_target();
        };
        let options = self.launch_options.clone();
        match self.launch(target, &options) {
            Ok(process) => {
                let path = self.target(target).map(|t| t.path.display().to_string()).unwrap_or_default();
                let mut out = format!("Process {process} launched: '{path}'\n");
                out.push_str(&self.describe_process(process));
                CommandOutput::stdout(out)
            }
            Err(e) => CommandOutput::stderr(format!("error: {e}\n")),
        }
    }

    fn console_drive(&mut self, action: impl FnOnce(&mut Self, ProcessHandle) -> SessionResult<()>) -> CommandOutput
    {
        let Some(process) = self.selected_target().and_then(|t| self.target_process(t)) else {
            return no_process();
        };
        match action(self, process) {
            Ok(()) => CommandOutput::stdout(self.describe_process(process)),
            Err(e) => CommandOutput::stderr(format!("error: {e}\n")),
        }
    }

    fn console_frame_variable(&self) -> CommandOutput
    {
        let Some(process) = self.selected_target().and_then(|t| self.target_process(t)) else {
            return no_process();
        };
        let mut out = String::new();
        for variable in self.locals_of_current_frame(process) {
            let _ = writeln!(out, "{variable}");
        }
        CommandOutput::stdout(out)
    }

    fn console_kill(&mut self) -> CommandOutput
    {
        let Some(process) = self.selected_target().and_then(|t| self.target_process(t)) else {
            return no_process();
        };
        match self.kill(process) {
            Ok(()) => CommandOutput::stdout(self.describe_process(process)),
            Err(e) => CommandOutput::stderr(format!("error: {e}\n")),
        }
    }

    fn describe_process(&self, process: ProcessHandle) -> String
    {
        match self.process_state(process) {
            ProcessState::Stopped => match self.current_stop_location(process) {
                Some(location) => format!("Process {process} stopped at {location}\n"),
                None => format!("Process {process} stopped\n"),
            },
            ProcessState::Running => format!("Process {process} running\n"),
            ProcessState::Exited(code) => format!("Process {process} exited with status = {code}\n"),
        }
    }
}

fn no_target() -> CommandOutput
{
    CommandOutput::stderr("error: invalid target, create a target using the 'target create' command\n")
}

fn no_process() -> CommandOutput
{
    CommandOutput::stderr("error: Command requires a current process.\n")
}

fn spec_kind(spec: &BreakpointSpec) -> &'static str
{
    match spec {
        BreakpointSpec::Symbol(_) => "name",
        BreakpointSpec::FileLine { .. } => "file",
    }
}

/// Execute one statement of the top frame. Returns `false` once the process
/// has exited.
fn advance(program: &Program, process: &mut Process) -> bool
{
    let Some(frame) = process.frames.last().copied() else {
        return false;
    };
    let function = &program.functions[frame.function];

    match function.statements.get(frame.statement).map(|s| &s.action) {
        Some(Action::Call(callee)) => match program.function_index(callee) {
            Some(index) if process.frames.len() >= MAX_FRAME_DEPTH => {
                trace!(callee = %callee, index, "stack overflow");
                process.frames.clear();
                process.state = ProcessState::Exited(STACK_OVERFLOW_STATUS);
                return false;
            }
            Some(index) => {
                process.frames.push(Frame {
                    function: index,
                    statement: 0,
                });
                if program.functions[index].statements.is_empty() {
                    return unwind(program, process, 0);
                }
            }
            None => return next_statement(program, process),
        },
        Some(Action::Return(code)) => return unwind(program, process, *code),
        Some(Action::Declare(_) | Action::Plain) => return next_statement(program, process),
        None => return unwind(program, process, 0),
    }
    true
}

/// Move the top frame to its next statement, falling off the end as a return.
fn next_statement(program: &Program, process: &mut Process) -> bool
{
    let Some(frame) = process.frames.last_mut() else {
        return false;
    };
    frame.statement += 1;
    if frame.statement >= program.functions[frame.function].statements.len() {
        return unwind(program, process, 0);
    }
    true
}

/// Pop frames until one still has statements left to run.
fn unwind(program: &Program, process: &mut Process, code: i32) -> bool
{
    process.frames.pop();
    while let Some(caller) = process.frames.last_mut() {
        caller.statement += 1;
        if caller.statement < program.functions[caller.function].statements.len() {
            return true;
        }
        process.frames.pop();
    }
    process.state = ProcessState::Exited(code);
    false
}

fn stop_location(program: &Program, process: &Process) -> Option<SourceLocation>
{
    if !process.state.is_stopped() {
        return None;
    }
    let frame = process.frames.last()?;
    let statement = program.functions.get(frame.function)?.statements.get(frame.statement)?;
    Some(program.location(statement))
}

impl Backend for ScriptedBackend
{
    fn create_target(&mut self, path: &Path) -> SessionResult<TargetHandle>
    {
        let Some(program) = self.images.get(path).cloned() else {
            return Err(SessionError::TargetCreation {
                path: path.to_path_buf(),
                reason: "unable to find executable".to_string(),
            });
        };
        let handle = TargetHandle::from_raw(self.allocate_id());
        debug!(target = %handle, path = %path.display(), "created target");
        self.targets.push(Target {
            handle,
            path: path.to_path_buf(),
            program,
            breakpoints: Vec::new(),
            process: None,
        });
        Ok(handle)
    }

    fn add_breakpoint(&mut self, target: TargetHandle, spec: &BreakpointSpec) -> SessionResult<BreakpointHandle>
    {
        let entry = self.target_mut(target).ok_or(SessionError::NoTarget)?;
        let id = BreakpointHandle::from_raw(entry.breakpoints.len() as u64 + 1);
        let locations = entry.program.resolve(spec);
        debug!(breakpoint = %id, spec = %spec, locations = locations.len(), "resolved breakpoint");
        entry.breakpoints.push(Breakpoint {
            id,
            spec: spec.clone(),
            locations,
        });
        Ok(id)
    }

    fn list_breakpoints(&self, target: TargetHandle) -> Vec<Breakpoint>
    {
        self.target(target).map(|t| t.breakpoints.clone()).unwrap_or_default()
    }

    fn launch(&mut self, target: TargetHandle, options: &LaunchOptions) -> SessionResult<ProcessHandle>
    {
        let handle = ProcessHandle::from_raw(self.next_id + 1);
        let entry = self
            .target_mut(target)
            .ok_or_else(|| SessionError::Launch(format!("unknown target {target}")))?;

        if entry
            .process
            .as_ref()
            .is_some_and(|p| !matches!(p.state, ProcessState::Exited(_)))
        {
            return Err(SessionError::Launch("a process is already running for this target".to_string()));
        }

        let main = entry
            .program
            .function_index("main")
            .ok_or_else(|| SessionError::Launch(format!("no entry point 'main' in {}", entry.program.file)))?;

        let mut process = Process {
            handle,
            frames: vec![Frame {
                function: main,
                statement: 0,
            }],
            state: ProcessState::Stopped,
            args: options.args.clone(),
        };
        if entry.program.functions[main].statements.is_empty() {
            unwind(&entry.program, &mut process, 0);
        }
        debug!(process = %handle, args = ?options.args, cwd = %options.cwd.display(), state = %process.state, "launched");
        entry.process = Some(process);
        self.next_id += 1;
        self.launch_options = options.clone();
        Ok(handle)
    }

    fn target_process(&self, target: TargetHandle) -> Option<ProcessHandle>
    {
        self.target(target)
            .and_then(|t| t.process.as_ref())
            .filter(|p| !matches!(p.state, ProcessState::Exited(_)))
            .map(|p| p.handle)
    }

    fn selected_target(&self) -> Option<TargetHandle>
    {
        self.targets.last().map(|t| t.handle)
    }

    fn set_launch_options(&mut self, options: &LaunchOptions)
    {
        self.launch_options = options.clone();
    }

    fn process_state(&self, process: ProcessHandle) -> ProcessState
    {
        self.target_of_process(process)
            .and_then(|t| t.process.as_ref())
            .map_or(ProcessState::Exited(0), |p| p.state)
    }

    fn current_stop_location(&self, process: ProcessHandle) -> Option<SourceLocation>
    {
        let target = self.target_of_process(process)?;
        stop_location(&target.program, target.process.as_ref()?)
    }

    fn step_into(&mut self, process: ProcessHandle) -> SessionResult<()>
    {
        let target = self.stopped_process(process)?;
        if let Some(running) = target.process.as_mut() {
            advance(&target.program, running);
            trace!(process = %process, state = %running.state, "stepped");
        }
        Ok(())
    }

    fn continue_(&mut self, process: ProcessHandle) -> SessionResult<()>
    {
        let target = self.stopped_process(process)?;
        let Some(running) = target.process.as_mut() else {
            return Ok(());
        };
        let stops: Vec<SourceLocation> = target
            .breakpoints
            .iter()
            .flat_map(|bp| bp.locations.iter().cloned())
            .collect();

        while advance(&target.program, running) {
            if stop_location(&target.program, running).is_some_and(|loc| stops.contains(&loc)) {
                break;
            }
        }
        trace!(process = %process, state = %running.state, "continued");
        Ok(())
    }

    fn kill(&mut self, process: ProcessHandle) -> SessionResult<()>
    {
        let target = self
            .target_of_process_mut(process)
            .ok_or_else(|| SessionError::ProcessState(format!("no process with handle {process}")))?;
        if let Some(running) = target.process.as_mut() {
            if matches!(running.state, ProcessState::Exited(_)) {
                return Err(SessionError::ProcessState(format!("process {process} already exited")));
            }
            running.frames.clear();
            running.state = ProcessState::Exited(KILLED_STATUS);
        }
        debug!(process = %process, "killed");
        Ok(())
    }

    fn locals_of_current_frame(&self, process: ProcessHandle) -> Vec<Variable>
    {
        let Some(target) = self.target_of_process(process) else {
            return Vec::new();
        };
        let Some(running) = target.process.as_ref().filter(|p| p.state.is_stopped()) else {
            return Vec::new();
        };
        let Some(frame) = running.frames.last() else {
            return Vec::new();
        };
        let function = &target.program.functions[frame.function];

        let declared = function.statements.iter().enumerate().filter_map(|(index, statement)| match &statement.action {
            Action::Declare(variable) if index < frame.statement => Some(variable.clone()),
            Action::Declare(variable) => Some(Variable {
                value: UNINITIALIZED.to_string(),
                ..variable.clone()
            }),
            _ => None,
        });
        function.params.iter().cloned().chain(declared).collect()
    }

    fn execute_command(&mut self, text: &str) -> CommandOutput
    {
        let command = console::parse(text);
        debug!(command = ?command, "console");
        self.console(command)
    }
}
