use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::{Filter, Task};
use crate::tui::app::App;
use crate::tui::theme::Theme;
use crate::util::dates::format_due_date;
use crate::util::unicode::{display_width, truncate_to_width};

/// Render the visible tasks, one per row, keeping the cursor on screen
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let height = area.height as usize;
    let width = area.width as usize;

    app.clamp_cursor();
    if app.cursor < app.scroll_offset {
        app.scroll_offset = app.cursor;
    } else if height > 0 && app.cursor >= app.scroll_offset + height {
        app.scroll_offset = app.cursor + 1 - height;
    }

    let tasks = app.session.visible_tasks();
    if tasks.is_empty() {
        let hint = match app.session.filter() {
            Filter::All => " No tasks yet. Press n to add one.",
            Filter::Active => " Nothing left to do.",
            Filter::Finished => " Nothing finished yet.",
        };
        let paragraph = Paragraph::new(Line::from(Span::styled(
            hint,
            Style::default().fg(app.theme.muted).bg(bg),
        )))
        .style(Style::default().bg(bg));
        frame.render_widget(paragraph, area);
        return;
    }

    let lines: Vec<Line> = tasks
        .iter()
        .enumerate()
        .skip(app.scroll_offset)
        .take(height)
        .map(|(i, task)| task_line(task, i == app.cursor, width, &app.theme))
        .collect();

    let paragraph = Paragraph::new(lines).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// `▸ [x] Title - description  due 9/24/2022 ....... 3:45 PM, Sat, 24 Sep`
fn task_line<'a>(task: &Task, selected: bool, width: usize, theme: &Theme) -> Line<'a> {
    let bg = if selected { theme.cursor_bg } else { theme.background };
    let base = Style::default().bg(bg);
    let marker = if selected { " \u{25b8} " } else { "   " };
    let checkbox = format!("[{}] ", task.state().checkbox_char());

    let mut title_style = base.fg(if selected { theme.text_bright } else { theme.text });
    if task.finished {
        title_style = title_style.fg(theme.muted).add_modifier(Modifier::CROSSED_OUT);
    }

    // Timestamp goes on the right only when there is room for it
    let stamp_w = display_width(&task.created) + 2;
    let fixed_w = display_width(marker) + display_width(&checkbox);
    let show_stamp = width >= fixed_w + stamp_w + 10;
    let mut room = width.saturating_sub(fixed_w + if show_stamp { stamp_w } else { 0 });

    let mut spans = vec![
        Span::styled(marker, base.fg(theme.cursor_marker)),
        Span::styled(checkbox, base.fg(theme.state_color(task.state()))),
    ];

    let title = truncate_to_width(&task.title, room);
    room -= display_width(&title);
    spans.push(Span::styled(title, title_style));

    if !task.description.is_empty() && room > 4 {
        let desc = truncate_to_width(&format!(" - {}", task.description), room);
        room -= display_width(&desc);
        spans.push(Span::styled(desc, base.fg(theme.muted)));
    }

    if let Some(due) = task.due_date {
        let due = format!("  due {}", format_due_date(due));
        if display_width(&due) <= room {
            room -= display_width(&due);
            spans.push(Span::styled(due, base.fg(theme.due)));
        }
    }

    if show_stamp {
        spans.push(Span::styled(" ".repeat(room + 2), base));
        spans.push(Span::styled(task.created.clone(), base.fg(theme.muted)));
    } else if selected {
        spans.push(Span::styled(" ".repeat(room), base));
    }

    Line::from(spans)
}
