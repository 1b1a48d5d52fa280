//! Integration tests for the workbench, dispatcher and registry over the
//! scripted backend.

use sightline_core::backend::scripted::{Program, ScriptedBackend};
use sightline_core::{Session, SessionSnapshot, SessionState};
use sightline_ui::surface::{BufferEditor, Editor, Highlight, Surface, SurfaceError, SurfaceName, SurfaceResult};
use sightline_ui::views::{RenderError, RenderResult, SourceCache, View, PROMPT};
use sightline_ui::Workbench;

fn sample_sources() -> SourceCache
{
    let mut sources = SourceCache::new();
    if let Some(source) = Program::sample().source {
        sources.insert("main.c", &source);
    }
    sources
}

fn workbench() -> Workbench<ScriptedBackend, BufferEditor>
{
    let mut session = Session::new(ScriptedBackend::new().with_program("a.out", Program::sample()));
    session.create_target("a.out").unwrap();
    Workbench::with_default_views(session, BufferEditor::new(), sample_sources())
}

fn log(workbench: &Workbench<ScriptedBackend, BufferEditor>) -> Vec<String>
{
    workbench.editor().lines(SurfaceName::CommandLine).to_vec()
}

#[test]
fn test_log_starts_with_prompt()
{
    let workbench = workbench();
    assert_eq!(log(&workbench), vec![PROMPT.to_string()]);
}

#[test]
fn test_invalid_command_is_reported_verbatim()
{
    let mut workbench = workbench();
    workbench.editor_mut().buffer_mut(SurfaceName::CommandLine).replace_last_line("(lldb) foo");
    let output = workbench.submit("(lldb) foo");
    assert!(output.is_error());

    let lines = log(&workbench);
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "(lldb) foo");
    assert_eq!(lines[1], "error: 'foo' is not a valid command.");
    assert_eq!(lines[2], PROMPT);

    let cursor = workbench.editor().buffer(SurfaceName::CommandLine).unwrap().cursor();
    assert_eq!(cursor.line, 3);
    assert_eq!(cursor.column, PROMPT.len() + 1);
}

#[test]
fn test_submit_refreshes_breakpoints_but_direct_add_does_not()
{
    let mut workbench = workbench();

    workbench.add_breakpoint("square").unwrap();
    assert!(workbench.editor().lines(SurfaceName::Breakpoints).is_empty());

    workbench.submit("(lldb) b main");
    assert_eq!(
        workbench.editor().lines(SurfaceName::Breakpoints),
        &["main.c:3:3".to_string(), "main.c:9:3".to_string()]
    );
}

#[test]
fn test_stepping_updates_code_and_locals()
{
    let mut workbench = workbench();
    workbench.launch().unwrap();

    let code = workbench.editor().buffer(SurfaceName::Code).unwrap();
    assert_eq!(code.highlight(), Some(Highlight { line: 9, column: 3 }));
    assert_eq!(code.lines().len(), 12);
    assert_eq!(workbench.editor().lines(SurfaceName::Variables), &["(int) i = <uninitialized>".to_string()]);

    workbench.step_into().unwrap();
    assert!(workbench.editor().lines(SurfaceName::Variables).contains(&"(int) i = 42".to_string()));

    workbench.step_into().unwrap();
    let code = workbench.editor().buffer(SurfaceName::Code).unwrap();
    assert_eq!(code.highlight(), Some(Highlight { line: 3, column: 3 }));
}

#[test]
fn test_exit_clears_highlight_and_locals()
{
    let mut workbench = workbench();
    workbench.launch().unwrap();
    workbench.continue_().unwrap();

    assert_eq!(workbench.session().state(), SessionState::Exited);
    let code = workbench.editor().buffer(SurfaceName::Code).unwrap();
    assert_eq!(code.highlight(), None);
    assert_eq!(code.lines().len(), 12);
    assert!(workbench.editor().lines(SurfaceName::Variables).is_empty());
}

#[test]
fn test_failed_operation_leaves_views_alone()
{
    let mut workbench = workbench();
    assert!(workbench.step_into().is_err());
    assert!(workbench.editor().lines(SurfaceName::Code).is_empty());
    assert!(workbench.take_diagnostics().is_empty());
}

#[test]
fn test_console_launch_is_adopted()
{
    let mut workbench = workbench();
    workbench.submit("(lldb) run");
    assert_eq!(workbench.session().state(), SessionState::Stopped);
    assert_eq!(
        workbench.editor().buffer(SurfaceName::Code).unwrap().highlight(),
        Some(Highlight { line: 9, column: 3 })
    );
    workbench.submit("(lldb) kill");
    assert_eq!(workbench.session().state(), SessionState::Exited);
}

#[test]
fn test_console_second_target_is_refused()
{
    let mut workbench = workbench();
    let target = workbench.session().target();

    let output = workbench.submit("(lldb) target create a.out");
    assert!(output.is_error());
    assert_eq!(workbench.session().target(), target);

    workbench.submit("(lldb) b main");
    assert_eq!(workbench.editor().lines(SurfaceName::Breakpoints), &["main.c:9:3".to_string()]);

    workbench.submit("(lldb) run");
    assert_eq!(workbench.session().state(), SessionState::Stopped);
    assert_eq!(
        workbench.editor().buffer(SurfaceName::Code).unwrap().highlight(),
        Some(Highlight { line: 9, column: 3 })
    );
}

#[test]
fn test_console_target_is_adopted()
{
    let session = Session::new(ScriptedBackend::new().with_program("a.out", Program::sample()));
    let mut workbench = Workbench::with_default_views(session, BufferEditor::new(), sample_sources());

    let output = workbench.submit("(lldb) target create a.out");
    assert!(!output.is_error());
    assert!(workbench.session().target().is_some());
    assert_eq!(workbench.session().state(), SessionState::TargetCreated);

    workbench.submit("(lldb) run");
    assert_eq!(workbench.session().state(), SessionState::Stopped);
    assert_eq!(
        workbench.editor().buffer(SurfaceName::Code).unwrap().highlight(),
        Some(Highlight { line: 9, column: 3 })
    );
}

struct BrokenView;

impl View for BrokenView
{
    fn name(&self) -> &'static str
    {
        "broken"
    }

    fn surface(&self) -> SurfaceName
    {
        SurfaceName::Code
    }

    fn render(&mut self, _snapshot: &SessionSnapshot, _editor: &mut dyn Editor) -> RenderResult<()>
    {
        Err(SurfaceError::Unavailable(SurfaceName::Code).into())
    }
}

#[test]
fn test_failing_view_does_not_block_others()
{
    let mut session = Session::new(ScriptedBackend::new().with_program("a.out", Program::sample()));
    session.create_target("a.out").unwrap();
    let mut workbench = Workbench::new(session, BufferEditor::new());
    let broken = workbench.register(Box::new(BrokenView));
    workbench.register(Box::new(sightline_ui::views::BreakpointsView::new()));

    workbench.add_breakpoint("main").unwrap();
    workbench.refresh();

    let diagnostics = workbench.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].view, broken);
    assert_eq!(diagnostics[0].name, "broken");
    assert_eq!(diagnostics[0].error, RenderError::Surface(SurfaceError::Unavailable(SurfaceName::Code)));
    assert_eq!(workbench.editor().lines(SurfaceName::Breakpoints), &["main.c:9:3".to_string()]);

    workbench.unregister(broken);
    workbench.refresh();
    assert!(workbench.take_diagnostics().is_empty());
}

/// Editor that has no variables surface.
#[derive(Default)]
struct NoVariables
{
    inner: BufferEditor,
}

impl Editor for NoVariables
{
    fn surface(&mut self, name: SurfaceName) -> SurfaceResult<&mut dyn Surface>
    {
        if name == SurfaceName::Variables {
            return Err(SurfaceError::Unavailable(name));
        }
        self.inner.surface(name)
    }
}

#[test]
fn test_missing_surface_is_a_diagnostic()
{
    let mut session = Session::new(ScriptedBackend::new().with_program("a.out", Program::sample()));
    session.create_target("a.out").unwrap();
    let mut workbench = Workbench::with_default_views(session, NoVariables::default(), sample_sources());
    workbench.take_diagnostics();

    workbench.launch().unwrap();
    let diagnostics = workbench.take_diagnostics();
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].name, "locals");
    assert_eq!(
        workbench.editor().inner.buffer(SurfaceName::Code).unwrap().highlight(),
        Some(Highlight { line: 9, column: 3 })
    );
}
