use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode::display_width;

const TITLE: &str = " To-Do";

/// Render the header: app title with the session date on the right, then task counts
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let date = format!("{} ", app.session.current_date());

    let mut top = vec![Span::styled(
        TITLE,
        Style::default()
            .fg(app.theme.accent)
            .bg(bg)
            .add_modifier(Modifier::BOLD),
    )];
    let used = display_width(TITLE) + display_width(&date);
    if used < width {
        top.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        top.push(Span::styled(
            date,
            Style::default().fg(app.theme.text_bright).bg(bg),
        ));
    }

    let counts = app.session.counts();
    let summary = if counts.all == 0 {
        " nothing to do yet".to_string()
    } else {
        format!(" {} to do \u{00b7} {} finished", counts.active, counts.finished)
    };
    let bottom = Line::from(Span::styled(
        summary,
        Style::default().fg(app.theme.muted).bg(bg),
    ));

    let paragraph = Paragraph::new(vec![Line::from(top), bottom]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
