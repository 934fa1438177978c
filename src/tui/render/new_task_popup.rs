use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::tui::app::{App, FormField};
use crate::util::dates::format_due_date;
use crate::util::unicode::{display_width, truncate_front_to_width, truncate_to_width};

const LABEL_W: usize = 13;

/// Render the new-task form centered over the list
pub fn render_new_task_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(draft) = app.session.draft() else {
        return;
    };
    let features = app.session.features();

    let popup_w: u16 = 56.min(area.width.saturating_sub(2));
    let inner_w = popup_w.saturating_sub(2) as usize;

    let bg = app.theme.background;
    let label_style = Style::default().fg(app.theme.muted).bg(bg);
    let text_style = Style::default().fg(app.theme.text).bg(bg);
    let focus_style = Style::default()
        .fg(app.theme.text_bright)
        .bg(app.theme.cursor_bg)
        .add_modifier(Modifier::BOLD);

    let desc_label = if features.require_description {
        " Description*"
    } else {
        " Description"
    };

    let mut fields: Vec<(&str, String, FormField)> = vec![
        (" Title", draft.title.clone(), FormField::Title),
        (desc_label, draft.description.clone(), FormField::Description),
    ];
    if let Some(due) = draft.due_date {
        fields.push((
            " Due",
            format!("\u{2039} {} \u{203a}", format_due_date(due)),
            FormField::DueDate,
        ));
    }

    let mut lines: Vec<Line> = vec![Line::from(Span::styled("", text_style))];
    for (label, value, field) in fields {
        let focused = app.form_field == field;
        let value_w = inner_w.saturating_sub(LABEL_W + 1);
        let mut shown = value;
        if focused && field != FormField::DueDate {
            shown.push('\u{258c}');
        }
        // Keep the tail visible while typing past the edge
        let shown = if display_width(&shown) > value_w && focused {
            truncate_front_to_width(&shown, value_w)
        } else {
            truncate_to_width(&shown, value_w)
        };
        let pad = value_w.saturating_sub(display_width(&shown));
        lines.push(Line::from(vec![
            Span::styled(format!("{:<width$} ", label, width = LABEL_W), label_style),
            Span::styled(
                format!("{}{}", shown, " ".repeat(pad)),
                if focused { focus_style } else { text_style },
            ),
        ]));
    }
    lines.push(Line::from(Span::styled("", text_style)));
    lines.push(Line::from(Span::styled(
        " Enter save  Esc cancel  Tab next field",
        label_style,
    )));

    let popup_h = ((lines.len() as u16) + 2).min(area.height.saturating_sub(2));
    let overlay_area = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(Span::styled(
            " New task ",
            Style::default()
                .fg(app.theme.accent)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.accent).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, overlay_area);
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}
