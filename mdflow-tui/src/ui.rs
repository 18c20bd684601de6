//! UI rendering

use crate::app::App;
use crate::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Draw the UI
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Document
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_document(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

fn render_document(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let visible: Vec<Line<'static>> = app
        .rendered
        .iter()
        .skip(app.scroll)
        .take(area.height as usize)
        .cloned()
        .collect();

    frame.render_widget(Paragraph::new(visible), area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: ratatui::layout::Rect) {
    let theme = Theme::for_variant(app.options.theme);
    let style = Style::default()
        .fg(theme.status_bar_fg)
        .bg(theme.status_bar_bg);

    let name = app
        .doc
        .path
        .as_ref()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "[stream]".to_string());

    let left = format!(
        " {}  rev {}  {} blocks",
        name,
        app.doc.rev,
        app.doc.blocks.len()
    );
    let right = format!("{} ", app.cache.summary());

    let pad = (area.width as usize)
        .saturating_sub(left.len())
        .saturating_sub(right.len());

    let line = Line::from(vec![
        Span::styled(left, style),
        Span::styled(" ".repeat(pad), style),
        Span::styled(right, style),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
