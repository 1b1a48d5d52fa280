//! Console command parsing for the scripted backend.
//!
//! Accepts the small lldb-flavoured subset the scripted engine can act on.
//! Parsing never fails: anything unrecognised becomes [`ConsoleCommand::Invalid`]
//! or [`ConsoleCommand::Usage`] and is reported on stderr by the caller.

use crate::types::BreakpointSpec;

/// A parsed console line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ConsoleCommand
{
    /// Blank input.
    Empty,
    Help,
    TargetCreate(String),
    BreakpointSet(BreakpointSpec),
    BreakpointList,
    Run,
    Step,
    Continue,
    FrameVariable,
    Kill,
    /// First word is not a command.
    Invalid(String),
    /// Known command used wrongly; carries the full error line.
    Usage(String),
}

pub(crate) fn parse(text: &str) -> ConsoleCommand
{
    let words: Vec<&str> = text.split_whitespace().collect();
    let Some((&first, rest)) = words.split_first() else {
        return ConsoleCommand::Empty;
    };

    match (first, rest) {
        ("help" | "h", _) => ConsoleCommand::Help,
        ("run" | "r", _) => ConsoleCommand::Run,
        ("step" | "s", []) => ConsoleCommand::Step,
        ("continue" | "c", []) => ConsoleCommand::Continue,
        ("kill", []) => ConsoleCommand::Kill,
        ("v", []) => ConsoleCommand::FrameVariable,
        ("b" | "break", [spec @ ..]) if !spec.is_empty() => match spec.join(" ").parse::<BreakpointSpec>() {
            Ok(spec) => ConsoleCommand::BreakpointSet(spec),
            Err(e) => ConsoleCommand::Usage(format!("error: {e}")),
        },
        ("b" | "break", []) => ConsoleCommand::BreakpointList,
        ("target", ["create", path]) => ConsoleCommand::TargetCreate((*path).to_string()),
        ("breakpoint", ["set", options @ ..]) => parse_breakpoint_set(options),
        ("breakpoint", ["list"]) => ConsoleCommand::BreakpointList,
        ("process", ["launch", ..]) => ConsoleCommand::Run,
        ("process", ["continue"]) => ConsoleCommand::Continue,
        ("process", ["kill"]) => ConsoleCommand::Kill,
        ("thread", ["step-in"]) => ConsoleCommand::Step,
        ("frame", ["variable"]) => ConsoleCommand::FrameVariable,
        ("target" | "breakpoint" | "process" | "thread" | "frame", [sub, ..]) => {
            ConsoleCommand::Usage(format!("error: '{sub}' is not a valid subcommand of \"{first}\"."))
        }
        ("target" | "breakpoint" | "process" | "thread" | "frame" | "step" | "s" | "continue" | "c" | "kill" | "v", _) => {
            ConsoleCommand::Usage(format!("error: invalid use of '{first}'; try 'help'."))
        }
        _ => ConsoleCommand::Invalid(first.to_string()),
    }
}

/// `breakpoint set --name <sym>` or `breakpoint set --file <f> --line <n>`.
fn parse_breakpoint_set(options: &[&str]) -> ConsoleCommand
{
    let mut name = None;
    let mut file = None;
    let mut line = None;

    let mut iter = options.iter();
    while let Some(&option) = iter.next() {
        let Some(&value) = iter.next() else {
            return ConsoleCommand::Usage(format!("error: missing value for option '{option}'"));
        };
        match option {
            "--name" | "-n" => name = Some(value),
            "--file" | "-f" => file = Some(value),
            "--line" | "-l" => match value.parse::<u32>() {
                Ok(n) => line = Some(n),
                Err(_) => return ConsoleCommand::Usage(format!("error: invalid line number: '{value}'")),
            },
            other => return ConsoleCommand::Usage(format!("error: unknown option '{other}'")),
        }
    }

    match (name, file, line) {
        (Some(name), None, None) => ConsoleCommand::BreakpointSet(BreakpointSpec::symbol(name)),
        (None, Some(file), Some(line)) => ConsoleCommand::BreakpointSet(BreakpointSpec::file_line(file, line)),
        _ => ConsoleCommand::Usage("error: specify either --name, or --file and --line".to_string()),
    }
}

pub(crate) const HELP_TEXT: &str = "Debugger commands:
  breakpoint set --name <symbol>            -- Set a breakpoint on a function.
  breakpoint set --file <file> --line <n>   -- Set a breakpoint on a source line.
  breakpoint list                           -- List breakpoints and their locations.
  b <symbol|file:line>                      -- Shorthand for breakpoint set.
  target create <path>                      -- Load an executable.
  run                                       -- Launch the current target.
  step                                      -- Step into the next source line.
  continue                                  -- Resume until a breakpoint or exit.
  frame variable                            -- Show local variables.
  kill                                      -- Terminate the current process.
";
