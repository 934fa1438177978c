use crossterm::event::{KeyCode, KeyEvent};

use crate::session::SessionError;
use crate::tui::app::{App, FormField, Mode};
use crate::util::unicode::pop_grapheme;

pub(super) fn handle_new_task(app: &mut App, key: KeyEvent) {
    let has_due = app.session.creation().has_due_date();
    match key.code {
        KeyCode::Esc => {
            app.session.cancel_new_task();
            app.mode = Mode::Navigate;
        }
        KeyCode::Enter => submit(app),
        KeyCode::Tab | KeyCode::Down => app.form_field = app.form_field.next(has_due),
        KeyCode::BackTab | KeyCode::Up => {
            // n-1 steps forward is one step back in an n-field cycle
            let steps = if has_due { 2 } else { 1 };
            for _ in 0..steps {
                app.form_field = app.form_field.next(has_due);
            }
        }
        _ => match app.form_field {
            FormField::Title | FormField::Description => edit_text(app, key),
            FormField::DueDate => edit_due_date(app, key),
        },
    }
}

fn submit(app: &mut App) {
    match app.session.confirm_new_task() {
        Ok(_) => {
            app.mode = Mode::Navigate;
            app.form_field = FormField::Title;
        }
        Err(SessionError::Task(e)) => {
            // Rejected: the form stays open with its input
            app.status = Some(e.to_string());
        }
        Err(e) => {
            app.status = Some(e.to_string());
            app.mode = Mode::Navigate;
        }
    }
}

fn edit_text(app: &mut App, key: KeyEvent) {
    let field = app.form_field;
    app.session.edit_draft(|draft| {
        let text = match field {
            FormField::Description => &mut draft.description,
            _ => &mut draft.title,
        };
        match key.code {
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => pop_grapheme(text),
            _ => {}
        }
    });
}

fn edit_due_date(app: &mut App, key: KeyEvent) {
    let days = match key.code {
        KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('l') => 1,
        KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('h') => -1,
        KeyCode::PageUp => 7,
        KeyCode::PageDown => -7,
        _ => return,
    };
    app.session.shift_due_date(days);
}
