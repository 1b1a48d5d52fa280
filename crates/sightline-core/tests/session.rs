//! Tests for the session lifecycle over the scripted backend

use sightline_core::backend::scripted::{Function, Program, ScriptedBackend};
use sightline_core::{Backend, LaunchOptions, Session, SessionError, SessionState, SourceLocation};

fn sample_session() -> Session<ScriptedBackend>
{
    Session::new(ScriptedBackend::new().with_program("a.out", Program::sample()))
}

fn created() -> Session<ScriptedBackend>
{
    let mut session = sample_session();
    session.create_target("a.out").unwrap();
    session
}

#[test]
fn test_no_breakpoints_lists_nothing()
{
    let session = created();
    assert!(session.breakpoints().is_empty());
    assert!(sample_session().breakpoints().is_empty());
}

#[test]
fn test_breakpoint_on_main_resolves_to_first_statement()
{
    let mut session = created();
    session.add_breakpoint("main").unwrap();
    assert_eq!(session.breakpoints(), vec!["main.c:9:3".to_string()]);
}

#[test]
fn test_breakpoints_keep_backend_order()
{
    let mut session = created();
    session.add_breakpoint("square").unwrap();
    session.add_breakpoint("nothing_here").unwrap();
    session.add_breakpoint("main.c:10").unwrap();
    assert_eq!(session.breakpoints(), vec!["main.c:3:3".to_string(), "main.c:10:3".to_string()]);
}

#[test]
fn test_create_target_twice_is_rejected()
{
    let mut session = created();
    assert_eq!(session.create_target("a.out"), Err(SessionError::AlreadyInitialized));
    assert_eq!(session.state(), SessionState::TargetCreated);
}

#[test]
fn test_create_target_with_bad_path()
{
    let mut session = sample_session();
    let err = session.create_target("/no/such/binary").unwrap_err();
    assert!(matches!(err, SessionError::TargetCreation { .. }));
    assert_eq!(session.state(), SessionState::Uninitialized);
}

#[test]
fn test_create_target_can_retry_after_failure()
{
    let mut session = sample_session();
    assert!(session.create_target("/no/such/binary").is_err());
    session.create_target("a.out").unwrap();
    assert_eq!(session.state(), SessionState::TargetCreated);
}

#[test]
fn test_console_run_uses_session_launch_options()
{
    let backend = ScriptedBackend::new().with_program("a.out", Program::sample());
    let mut session = Session::new(backend).with_launch_options(LaunchOptions::with_args(["-v", "input.txt"]));
    session.create_target("a.out").unwrap();

    session.execute_command("run");
    assert_eq!(session.state(), SessionState::Stopped);

    let target = session.target().unwrap();
    let process = session.backend().target_process(target).unwrap();
    let args = session.backend().launch_args(process).unwrap();
    assert_eq!(args, ["-v".to_string(), "input.txt".to_string()]);
}

#[test]
fn test_breakpoint_before_target()
{
    let mut session = sample_session();
    assert_eq!(session.add_breakpoint("main"), Err(SessionError::NoTarget));
}

#[test]
fn test_launch_without_target()
{
    let mut session = sample_session();
    assert!(matches!(session.launch(), Err(SessionError::Launch(_))));
    assert_eq!(session.state(), SessionState::Uninitialized);
}

#[test]
fn test_launch_stops_at_main()
{
    let mut session = created();
    session.add_breakpoint("main").unwrap();
    session.launch().unwrap();
    assert_eq!(session.state(), SessionState::Stopped);
    assert_eq!(session.current_location(), Some(&SourceLocation::new("main.c", 9, 3)));
}

#[test]
fn test_launch_twice_is_rejected_and_leaves_state()
{
    let mut session = created();
    session.launch().unwrap();
    assert!(matches!(session.launch(), Err(SessionError::Launch(_))));
    assert_eq!(session.state(), SessionState::Stopped);
}

#[test]
fn test_launch_failure_keeps_target_created()
{
    let program = Program::new("lib.c").function(Function::new("helper", 1).ret(2, 3, 0));
    let mut session = Session::new(ScriptedBackend::new().with_program("lib.so", program));
    session.create_target("lib.so").unwrap();
    assert!(matches!(session.launch(), Err(SessionError::Launch(_))));
    assert_eq!(session.state(), SessionState::TargetCreated);
}

#[test]
fn test_step_into_call_lands_in_callee()
{
    let mut session = created();
    session.launch().unwrap();
    session.step_into().unwrap();
    assert_eq!(session.current_location(), Some(&SourceLocation::new("main.c", 10, 3)));
    session.step_into().unwrap();
    assert_eq!(session.current_location(), Some(&SourceLocation::new("main.c", 3, 3)));
}

#[test]
fn test_locals_after_initializer()
{
    let mut session = created();
    session.add_breakpoint("main").unwrap();
    session.launch().unwrap();
    session.step_into().unwrap();
    let locals: Vec<String> = session.locals().iter().map(ToString::to_string).collect();
    assert!(locals.contains(&"(int) i = 42".to_string()));
}

#[test]
fn test_locals_empty_without_process()
{
    let session = created();
    assert!(session.locals().is_empty());
}

#[test]
fn test_step_without_process_changes_nothing()
{
    let mut session = created();
    session.add_breakpoint("main").unwrap();
    let before = session.snapshot();

    assert!(matches!(session.step_into(), Err(SessionError::ProcessState(_))));
    assert!(matches!(session.continue_(), Err(SessionError::ProcessState(_))));
    assert_eq!(session.snapshot(), before);
    assert_eq!(session.current_location(), None);
}

#[test]
fn test_continue_runs_to_exit()
{
    let mut session = created();
    session.launch().unwrap();
    session.continue_().unwrap();
    assert_eq!(session.state(), SessionState::Exited);
    assert_eq!(session.current_location(), None);
    assert!(matches!(session.step_into(), Err(SessionError::ProcessState(_))));
}

#[test]
fn test_continue_stops_at_breakpoint()
{
    let mut session = created();
    session.add_breakpoint("square").unwrap();
    session.launch().unwrap();
    session.continue_().unwrap();
    assert_eq!(session.current_location(), Some(&SourceLocation::new("main.c", 3, 3)));
    let locals: Vec<String> = session.locals().iter().map(ToString::to_string).collect();
    assert_eq!(locals, vec!["(int) x = 42", "(int) result = <uninitialized>"]);
}

#[test]
fn test_kill_is_idempotent_and_allows_relaunch()
{
    let mut session = created();
    session.kill().unwrap();
    session.launch().unwrap();
    session.kill().unwrap();
    session.kill().unwrap();
    assert_eq!(session.state(), SessionState::Exited);
    assert!(session.locals().is_empty());

    session.launch().unwrap();
    assert_eq!(session.state(), SessionState::Stopped);
}

#[test]
fn test_console_commands_are_adopted()
{
    let mut session = created();
    let output = session.execute_command("b square");
    assert!(!output.is_error());
    assert_eq!(session.breakpoints(), vec!["main.c:3:3".to_string()]);

    session.execute_command("run");
    assert_eq!(session.state(), SessionState::Stopped);
    session.execute_command("continue");
    assert_eq!(session.current_location(), Some(&SourceLocation::new("main.c", 3, 3)));

    session.execute_command("kill");
    assert_eq!(session.state(), SessionState::Exited);
}

#[test]
fn test_invalid_console_command_reports_on_stderr()
{
    let mut session = created();
    let output = session.execute_command("foo");
    assert_eq!(output.stderr, "error: 'foo' is not a valid command.\n");
    assert!(output.stdout.is_empty());
    assert_eq!(session.state(), SessionState::TargetCreated);
}

#[test]
fn test_snapshot_projects_session()
{
    let mut session = created();
    session.add_breakpoint("main").unwrap();
    session.launch().unwrap();
    let snapshot = session.snapshot();
    assert_eq!(snapshot.state, SessionState::Stopped);
    assert_eq!(snapshot.location, Some(SourceLocation::new("main.c", 9, 3)));
    assert_eq!(snapshot.breakpoints, vec![SourceLocation::new("main.c", 9, 3)]);
    assert_eq!(snapshot.locals.len(), 1);
}
