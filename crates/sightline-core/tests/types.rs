//! Tests for backend-agnostic types

use sightline_core::types::{BreakpointHandle, BreakpointSpec, ProcessState, SourceLocation, Variable};

#[test]
fn test_location_display()
{
    let location = SourceLocation::new("src/main.c", 12, 5);
    assert_eq!(location.to_string(), "src/main.c:12:5");
}

#[test]
fn test_variable_display()
{
    let variable = Variable::new("i", "int", "42");
    assert_eq!(variable.to_string(), "(int) i = 42");
}

#[test]
fn test_breakpoint_spec_parsing()
{
    assert_eq!("main".parse::<BreakpointSpec>().unwrap(), BreakpointSpec::symbol("main"));
    assert_eq!(
        "dir/main.c:40".parse::<BreakpointSpec>().unwrap(),
        BreakpointSpec::file_line("dir/main.c", 40)
    );
    // A C++ scope is a name, not a file:line.
    assert_eq!(
        "ns::func".parse::<BreakpointSpec>().unwrap(),
        BreakpointSpec::symbol("ns::func")
    );
    assert_eq!(":12".parse::<BreakpointSpec>().unwrap(), BreakpointSpec::symbol(":12"));
    assert!("   ".parse::<BreakpointSpec>().is_err());
}

#[test]
fn test_breakpoint_spec_display_round_trips_text()
{
    assert_eq!(BreakpointSpec::file_line("main.c", 3).to_string(), "main.c:3");
    assert_eq!(BreakpointSpec::symbol("square").to_string(), "square");
}

#[test]
fn test_handle_raw()
{
    let handle = BreakpointHandle::from_raw(7);
    assert_eq!(handle.raw(), 7);
    assert_eq!(handle.to_string(), "7");
}

#[test]
fn test_process_state()
{
    assert!(ProcessState::Stopped.is_stopped());
    assert!(!ProcessState::Running.is_stopped());
    assert_eq!(ProcessState::Exited(3).to_string(), "exited with status = 3");
}
