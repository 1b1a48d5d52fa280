//! # sightline-ui
//!
//! Projects a debug [`Session`](sightline_core::Session) onto editor surfaces.
//!
//! - [`surface`]: the editor boundary and an in-memory editor
//! - [`views`]: breakpoints, locals, code and command-log views
//! - [`registry`]: keeps views consistent with the session
//! - [`dispatcher`]: console input to session commands
//! - [`workbench`]: the controller that ties them together
//! - [`tui`]: a `ratatui` front-end over the in-memory editor
//!
//! ## Usage
//!
//! ```rust
//! use sightline_core::backend::scripted::{Program, ScriptedBackend};
//! use sightline_core::Session;
//! use sightline_ui::surface::{BufferEditor, SurfaceName};
//! use sightline_ui::views::SourceCache;
//! use sightline_ui::Workbench;
//!
//! let mut session = Session::new(ScriptedBackend::new().with_program("a.out", Program::sample()));
//! session.create_target("a.out")?;
//! let mut workbench = Workbench::with_default_views(session, BufferEditor::new(), SourceCache::new());
//!
//! workbench.submit("(lldb) b main");
//! assert_eq!(workbench.editor().lines(SurfaceName::Breakpoints), &["main.c:9:3".to_string()]);
//! # Ok::<(), sightline_core::SessionError>(())
//! ```

pub mod app;
pub mod dispatcher;
pub mod event;
pub mod registry;
pub mod surface;
pub mod tui;
pub mod ui;
pub mod views;
pub mod widgets;
pub mod workbench;

pub use app::App;
pub use dispatcher::CommandDispatcher;
pub use registry::{RenderFailure, ViewId, ViewRegistry};
pub use tui::Tui;
pub use workbench::Workbench;

use sightline_core::Backend;
use surface::BufferEditor;

/// Run the terminal UI over `workbench` until the user quits.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn or restored.
pub async fn run_tui<B: Backend>(workbench: Workbench<B, BufferEditor>) -> std::io::Result<()>
{
    let mut app = App::new(workbench);
    let mut tui = Tui::new()?;
    tui.run(&mut app).await
}
