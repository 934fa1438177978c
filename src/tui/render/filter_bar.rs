use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Filter;
use crate::tui::app::App;

/// Render the filter tabs with per-filter counts, then a separator line
pub fn render_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let counts = app.session.counts();
    let selected = app.session.filter();

    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    for (i, filter) in Filter::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("   ", Style::default().bg(bg)));
        }
        let style = if filter == selected {
            Style::default()
                .fg(app.theme.accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(app.theme.muted).bg(bg)
        };
        spans.push(Span::styled(
            format!("{} ({})", filter.label(), counts.get(filter)),
            style,
        ));
    }

    let separator = Line::from(Span::styled(
        "\u{2500}".repeat(area.width as usize),
        Style::default().fg(app.theme.muted).bg(bg),
    ));

    let paragraph = Paragraph::new(vec![Line::from(spans), separator]).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
