//! Pane widgets drawn from editor surfaces

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::surface::{Surface, TextBuffer};

/// Plain list of surface lines.
pub fn draw_list_pane(frame: &mut Frame, area: Rect, title: &str, lines: &[String])
{
    let body: Vec<Line> = if lines.is_empty() {
        vec![Line::from(Span::styled("(none)", Style::default().fg(Color::DarkGray)))]
    } else {
        lines.iter().map(|line| Line::from(line.as_str())).collect()
    };

    let pane = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title(title.to_string()))
        .style(Style::default().fg(Color::White));
    frame.render_widget(pane, area);
}

/// Source with line numbers; the highlighted line is marked and kept in view.
pub fn draw_code_pane(frame: &mut Frame, area: Rect, buffer: Option<&TextBuffer>)
{
    let block = Block::default().borders(Borders::ALL).title("Code");
    let Some(buffer) = buffer.filter(|b| b.line_count() > 0) else {
        frame.render_widget(Paragraph::new("No source loaded").block(block), area);
        return;
    };

    let current = buffer.highlight().map(|h| h.line as usize);
    let width = buffer.line_count().to_string().len();
    let body: Vec<Line> = buffer
        .lines()
        .iter()
        .enumerate()
        .map(|(index, text)| {
            let number = index + 1;
            if Some(number) == current {
                Line::from(vec![
                    Span::styled(format!("{number:>width$} > "), Style::default().fg(Color::Yellow)),
                    Span::styled(text.as_str(), Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD)),
                ])
            } else {
                Line::from(vec![
                    Span::styled(format!("{number:>width$}   "), Style::default().fg(Color::DarkGray)),
                    Span::raw(text.as_str()),
                ])
            }
        })
        .collect();

    let visible = usize::from(area.height.saturating_sub(2));
    let offset = current.map_or(0, |line| line.saturating_sub(visible / 2 + 1));
    let pane = Paragraph::new(body)
        .block(block)
        .scroll((u16::try_from(offset).unwrap_or(u16::MAX), 0));
    frame.render_widget(pane, area);
}

/// Command log pinned to its last line, minus `scrollback` lines.
pub fn draw_command_log(frame: &mut Frame, area: Rect, buffer: Option<&TextBuffer>, scrollback: usize)
{
    let lines = buffer.map(TextBuffer::lines).unwrap_or_default();
    let visible = usize::from(area.height.saturating_sub(2));
    let end = lines.len().saturating_sub(scrollback);
    let start = end.saturating_sub(visible);

    let body: Vec<Line> = lines[start..end]
        .iter()
        .map(|line| {
            if line.starts_with("error:") {
                Line::from(Span::styled(line.as_str(), Style::default().fg(Color::Red)))
            } else {
                Line::from(line.as_str())
            }
        })
        .collect();

    let pane = Paragraph::new(body)
        .block(Block::default().borders(Borders::ALL).title("Command Log"))
        .style(Style::default().fg(Color::White));
    frame.render_widget(pane, area);

    if scrollback == 0 {
        if let Some(cursor) = buffer.map(|b| b.cursor()) {
            let row = cursor.line.saturating_sub(start + 1);
            let x = area.x + 1 + u16::try_from(cursor.column.saturating_sub(1)).unwrap_or(0);
            let y = area.y + 1 + u16::try_from(row).unwrap_or(0);
            frame.set_cursor_position((x.min(area.right().saturating_sub(2)), y));
        }
    }
}
