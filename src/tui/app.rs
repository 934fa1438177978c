use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use crate::model::{AppConfig, TaskId};
use crate::ops::store::StoreEvent;
use crate::session::Session;

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// The new-task popup has focus
    NewTask,
}

/// Focused field in the new-task popup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    DueDate,
}

impl FormField {
    /// Next field in tab order; the due date is skipped when the form has none
    pub fn next(self, has_due_date: bool) -> FormField {
        match self {
            FormField::Title => FormField::Description,
            FormField::Description if has_due_date => FormField::DueDate,
            FormField::Description | FormField::DueDate => FormField::Title,
        }
    }
}

/// Main application state
pub struct App {
    pub session: Session,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme: Theme,
    pub show_key_hints: bool,
    /// Cursor index into the visible task list
    pub cursor: usize,
    /// First visible row of the task list
    pub scroll_offset: usize,
    pub form_field: FormField,
    /// One-line message for the status row, cleared on the next key
    pub status: Option<String>,
    /// Store events not yet reflected in the UI
    pending: Rc<RefCell<Vec<StoreEvent>>>,
    needs_redraw: bool,
}

impl App {
    pub fn new(mut session: Session, config: &AppConfig) -> Self {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&pending);
        session.subscribe(Box::new(move |event: &StoreEvent| {
            sink.borrow_mut().push(event.clone());
        }));

        App {
            session,
            mode: Mode::Navigate,
            should_quit: false,
            theme: Theme::from_config(&config.ui),
            show_key_hints: config.ui.show_key_hints,
            cursor: 0,
            scroll_offset: 0,
            form_field: FormField::Title,
            status: None,
            pending,
            needs_redraw: true,
        }
    }

    /// Fold queued store events into UI state. Returns true if there were any.
    pub fn sync_store_events(&mut self) -> bool {
        let events: Vec<StoreEvent> = self.pending.borrow_mut().drain(..).collect();
        if events.is_empty() {
            return false;
        }
        for event in &events {
            match event {
                StoreEvent::Added { id } => {
                    self.status = Some(format!("added #{}", id));
                    // Follow the new task if it is visible
                    if let Some(pos) = self.visible_position(*id) {
                        self.cursor = pos;
                    }
                }
                StoreEvent::FinishedChanged { id, finished } => {
                    let verb = if *finished { "finished" } else { "reopened" };
                    self.status = Some(format!("{} #{}", verb, id));
                }
                StoreEvent::BulkFinished { finished, changed } => {
                    let verb = if *finished { "finished" } else { "reopened" };
                    let noun = if *changed == 1 { "task" } else { "tasks" };
                    self.status = Some(format!("{} {} {}", verb, changed, noun));
                }
            }
        }
        self.clamp_cursor();
        self.needs_redraw = true;
        true
    }

    pub fn request_redraw(&mut self) {
        self.needs_redraw = true;
    }

    /// Whether a frame must be drawn; resets the flag
    pub fn take_redraw(&mut self) -> bool {
        std::mem::replace(&mut self.needs_redraw, false)
    }

    pub fn visible_len(&self) -> usize {
        self.session.visible_tasks().len()
    }

    fn visible_position(&self, id: TaskId) -> Option<usize> {
        self.session.visible_tasks().iter().position(|t| t.id == id)
    }

    /// Id of the task under the cursor
    pub fn selected_task_id(&self) -> Option<TaskId> {
        self.session.visible_tasks().get(self.cursor).map(|t| t.id)
    }

    /// Keep the cursor inside the visible list
    pub fn clamp_cursor(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.cursor = 0;
        } else if self.cursor >= len {
            self.cursor = len - 1;
        }
    }
}

/// Run the TUI application
pub fn run(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let session = Session::new(config);
    let mut app = App::new(session, config);
    info!(date = app.session.current_date(), "starting terminal UI");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!(tasks = app.session.store().len(), "session ended");
    result
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        app.sync_store_events();
        if app.take_redraw() {
            terminal.draw(|frame| render::render(frame, app))?;
        }

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                    app.request_redraw();
                }
                Event::Resize(..) => app.request_redraw(),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NewTask, Variant};
    use crate::tui::render::test_helpers::app_with_variant;

    #[test]
    fn test_form_field_order() {
        assert_eq!(FormField::Title.next(true), FormField::Description);
        assert_eq!(FormField::Description.next(true), FormField::DueDate);
        assert_eq!(FormField::DueDate.next(true), FormField::Title);
        assert_eq!(FormField::Description.next(false), FormField::Title);
    }

    #[test]
    fn test_store_events_update_status() {
        let mut app = app_with_variant(Variant::Bulk);
        assert!(!app.sync_store_events());

        app.session.add_task(NewTask::new("A", "a")).unwrap();
        app.session.add_task(NewTask::new("B", "b")).unwrap();
        assert!(app.sync_store_events());
        assert_eq!(app.status.as_deref(), Some("added #1"));
        assert_eq!(app.cursor, 1);
        assert!(app.take_redraw());
        assert!(!app.take_redraw());

        app.session.set_all_finished(true).unwrap();
        app.sync_store_events();
        assert_eq!(app.status.as_deref(), Some("finished 2 tasks"));
    }

    #[test]
    fn test_cursor_clamped_when_list_shrinks() {
        let mut app = app_with_variant(Variant::Dated);
        for title in ["A", "B", "C"] {
            app.session.add_task(NewTask::new(title, "")).unwrap();
        }
        app.sync_store_events();
        app.cursor = 2;
        app.session.select_filter(crate::model::Filter::Finished);
        app.clamp_cursor();
        assert_eq!(app.cursor, 0);
        assert_eq!(app.selected_task_id(), None);
    }
}
