use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::util::unicode::{display_width, truncate_to_width};

/// Key hints for the current mode
fn key_hints(app: &App) -> String {
    match app.mode {
        Mode::NewTask => {
            if app.session.features().due_date {
                "\u{2190}/\u{2192} due date  Tab field  Enter save  Esc cancel".into()
            } else {
                "Tab field  Enter save  Esc cancel".into()
            }
        }
        Mode::Navigate => {
            let mut hints = String::from("n add  space toggle  Tab filter");
            if app.session.features().bulk_actions {
                hints.push_str("  F/U all");
            }
            hints.push_str("  ? hints  q quit");
            hints
        }
    }
}

/// Render the bottom row: status message on the left, key hints on the right
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let message = app
        .status
        .as_deref()
        .map(|s| format!(" {}", s))
        .unwrap_or_default();
    let message = truncate_to_width(&message, width);
    let used = display_width(&message);

    let mut spans = vec![Span::styled(
        message,
        Style::default().fg(app.theme.status).bg(bg),
    )];

    if app.show_key_hints {
        let hints = format!("{} ", key_hints(app));
        let hints_w = display_width(&hints);
        // Hints yield to the message when both do not fit
        if used + hints_w + 2 <= width {
            spans.push(Span::styled(
                " ".repeat(width - used - hints_w),
                Style::default().bg(bg),
            ));
            spans.push(Span::styled(hints, Style::default().fg(app.theme.muted).bg(bg)));
        }
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
