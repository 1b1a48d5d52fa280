//! Frame layout

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use sightline_core::Backend;

use crate::app::App;
use crate::surface::SurfaceName;

const HELP_TEXT: &str = "Enter:Submit | F9:Launch F11:Step F5:Continue | ↑/↓:Scroll log | Esc:Quit";

/// Draw the whole UI
///
/// ```text
/// +------------------ header ------------------+
/// | breakpoints |                              |
/// |-------------|            code              |
/// |  variables  |                              |
/// +---------------- command log ---------------+
/// +------------------ footer ------------------+
/// ```
pub fn draw<B: Backend>(frame: &mut Frame, app: &App<B>)
{
    let footer_height = if app.status_message.is_some() { 4 } else { 3 };
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(8),
        Constraint::Percentage(35),
        Constraint::Length(footer_height),
    ])
    .split(frame.area());

    draw_header(frame, rows[0], app);

    let columns = Layout::horizontal([Constraint::Percentage(30), Constraint::Percentage(70)]).split(rows[1]);
    let side = Layout::vertical([Constraint::Percentage(40), Constraint::Percentage(60)]).split(columns[0]);

    let editor = app.workbench.editor();
    crate::widgets::draw_list_pane(frame, side[0], "Breakpoints", editor.lines(SurfaceName::Breakpoints));
    crate::widgets::draw_list_pane(frame, side[1], "Variables", editor.lines(SurfaceName::Variables));
    crate::widgets::draw_code_pane(frame, columns[1], editor.buffer(SurfaceName::Code));
    crate::widgets::draw_command_log(frame, rows[2], editor.buffer(SurfaceName::CommandLine), app.log_scrollback);

    draw_footer(frame, rows[3], app);
}

fn draw_header<B: Backend>(frame: &mut Frame, area: Rect, app: &App<B>)
{
    let session = app.workbench.session();
    let mut spans = vec![
        Span::styled("State: ", Style::default().fg(Color::Yellow)),
        Span::raw(session.state().to_string()),
    ];
    if let Some(location) = session.current_location() {
        spans.push(Span::styled("  At: ", Style::default().fg(Color::Yellow)));
        spans.push(Span::raw(location.to_string()));
    }

    let header = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title("Sightline"))
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(header, area);
}

fn draw_footer<B: Backend>(frame: &mut Frame, area: Rect, app: &App<B>)
{
    let mut lines = vec![Line::from(HELP_TEXT)];
    if let Some(message) = &app.status_message {
        lines.push(Line::from(Span::styled(
            format!("Error: {message}"),
            Style::default().fg(Color::Red),
        )));
    }

    let footer = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, area);
}
