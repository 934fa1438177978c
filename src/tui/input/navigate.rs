use crossterm::event::{KeyCode, KeyEvent};

use crate::model::Filter;
use crate::tui::app::{App, FormField, Mode};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.show_key_hints = !app.show_key_hints,

        // Cursor
        KeyCode::Char('j') | KeyCode::Down => {
            if app.cursor + 1 < app.visible_len() {
                app.cursor += 1;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => app.cursor = app.cursor.saturating_sub(1),
        KeyCode::Char('g') | KeyCode::Home => app.cursor = 0,
        KeyCode::Char('G') | KeyCode::End => app.cursor = app.visible_len().saturating_sub(1),

        // Filter
        KeyCode::Tab => select_filter(app, app.session.filter().cycle()),
        KeyCode::Char('1') => select_filter(app, Filter::All),
        KeyCode::Char('2') => select_filter(app, Filter::Active),
        KeyCode::Char('3') => select_filter(app, Filter::Finished),

        // Tasks
        KeyCode::Char(' ') | KeyCode::Char('x') | KeyCode::Enter => toggle_selected(app),
        KeyCode::Char('n') | KeyCode::Char('a') => {
            app.session.open_new_task();
            app.form_field = FormField::Title;
            app.mode = Mode::NewTask;
        }
        KeyCode::Char('F') => bulk(app, true),
        KeyCode::Char('U') => bulk(app, false),
        _ => {}
    }
}

fn select_filter(app: &mut App, filter: Filter) {
    app.session.select_filter(filter);
    app.cursor = 0;
    app.scroll_offset = 0;
}

fn toggle_selected(app: &mut App) {
    let Some(id) = app.selected_task_id() else {
        return;
    };
    let finished = app
        .session
        .store()
        .get(id)
        .is_some_and(|t| t.finished);
    if let Err(e) = app.session.set_finished(id, !finished) {
        app.status = Some(e.to_string());
    }
}

fn bulk(app: &mut App, finished: bool) {
    match app.session.set_all_finished(finished) {
        Ok(0) => app.status = Some("nothing to change".into()),
        Ok(_) => {}
        Err(e) => app.status = Some(e.to_string()),
    }
}
