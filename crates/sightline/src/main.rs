use std::env;
use std::io::{self, BufRead, Write};
use std::process;

use clap::{Args, Parser, Subcommand};
use sightline_core::backend::scripted::{Program, ScriptedBackend};
use sightline_core::{LaunchOptions, Session};
use sightline_ui::surface::{BufferEditor, SurfaceName};
use sightline_ui::views::{SourceCache, PROMPT};
use sightline_ui::Workbench;
use sightline_utils::{LogFormat, LogGuard, LogLevel, info, init_logging, init_logging_for_tui, init_logging_with_level, warn};

/// Drive an lldb-style debug session from a terminal UI or a line console.
#[derive(Parser, Debug)]
#[command(name = "sightline")]
#[command(version)]
#[command(about = "Drive an lldb-style debug session from a terminal UI or a line console", long_about = None)]
struct Cli
{
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace). Overrides RUST_LOG.
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    /// Target to debug; must name a loaded program.
    #[arg(long, global = true, default_value = SAMPLE_PATH)]
    program: String,
}

#[derive(Subcommand, Debug)]
enum Commands
{
    /// Interactive four-pane terminal UI
    Tui(SessionArgs),
    /// Read console commands from stdin and print the command log
    Console(SessionArgs),
}

#[derive(Args, Debug)]
struct SessionArgs
{
    /// Breakpoint to set before starting, e.g. `main` or `main.c:10`. Repeatable.
    #[arg(long = "break", short = 'b', value_name = "SPEC")]
    breakpoints: Vec<String>,

    /// Arguments passed to the debuggee on launch
    #[arg(last = true)]
    args: Vec<String>,
}

/// Path the built-in sample program is loaded under.
const SAMPLE_PATH: &str = "a.out";

fn main()
{
    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Tui(args) => run_tui(&cli, args),
        Commands::Console(args) => run_console(&cli, args),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run_tui(cli: &Cli, args: &SessionArgs) -> Result<(), Box<dyn std::error::Error>>
{
    // stdout belongs to the UI, so logs go to a file.
    let guard = init_logging_for_tui(cli.log_level)?;
    if let Some(path) = guard.file() {
        info!(path = %path.display(), "terminal UI logging to file");
    }

    let workbench = build_workbench(cli, args)?;
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(sightline_ui::run_tui(workbench))?;
    Ok(())
}

fn run_console(cli: &Cli, args: &SessionArgs) -> Result<(), Box<dyn std::error::Error>>
{
    let _guard = init_console_logging(cli.log_level)?;
    let mut workbench = build_workbench(cli, args)?;

    let mut stdout = io::stdout();
    print!("{PROMPT}");
    stdout.flush()?;

    for line in io::stdin().lock().lines() {
        let line = line?;
        if matches!(line.trim(), "quit" | "q" | "exit") {
            break;
        }

        let raw = format!("{PROMPT}{line}");
        workbench
            .editor_mut()
            .buffer_mut(SurfaceName::CommandLine)
            .replace_last_line(raw.as_str());
        let seen = workbench.editor().lines(SurfaceName::CommandLine).len();

        workbench.submit(&raw);
        for failure in workbench.take_diagnostics() {
            warn!(failure = %failure, "view refresh failed");
        }

        let log = workbench.editor().lines(SurfaceName::CommandLine);
        if let Some((prompt, output)) = log[seen..].split_last() {
            for text in output {
                println!("{text}");
            }
            print!("{prompt}");
        }
        stdout.flush()?;
    }
    println!();

    info!(state = %workbench.session().state(), "console closed");
    Ok(())
}

/// Console logs share stdout with the transcript, so stay quiet unless asked.
fn init_console_logging(level: Option<LogLevel>) -> Result<LogGuard, sightline_utils::LoggingError>
{
    match level {
        Some(level) => init_logging_with_level(level, LogFormat::from_env()?),
        None if env::var_os("RUST_LOG").is_none() => init_logging_with_level(LogLevel::Warn, LogFormat::from_env()?),
        None => init_logging(),
    }
}

/// Session over the sample program with the requested breakpoints set.
fn build_workbench(cli: &Cli, args: &SessionArgs) -> Result<Workbench<ScriptedBackend, BufferEditor>, Box<dyn std::error::Error>>
{
    let program = Program::sample();
    let mut sources = SourceCache::new();
    if let Some(text) = &program.source {
        sources.insert(program.file.clone(), text);
    }

    let backend = ScriptedBackend::new().with_program(SAMPLE_PATH, program);
    let mut session = Session::new(backend).with_launch_options(LaunchOptions::with_args(args.args.clone()));
    session.create_target(&cli.program)?;
    info!(program = %cli.program, "target ready");

    let mut workbench = Workbench::with_default_views(session, BufferEditor::new(), sources);
    for spec in &args.breakpoints {
        workbench.add_breakpoint(spec)?;
    }
    workbench.refresh();
    Ok(workbench)
}
