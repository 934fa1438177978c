use ratatui::style::Color;
use tracing::warn;

use crate::model::{TaskState, UiConfig};

/// Colors by role. Every role can be overridden from `[ui.colors]`.
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub text: Color,
    pub text_bright: Color,
    /// App title, selected filter, popup border
    pub accent: Color,
    /// Secondary text: descriptions, timestamps, hints
    pub muted: Color,
    /// Checkbox of a finished task
    pub finished: Color,
    pub due: Color,
    /// Status row message
    pub status: Color,
    pub cursor_bg: Color,
    pub cursor_marker: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::Rgb(0x10, 0x14, 0x1C),
            text: Color::Rgb(0xC8, 0xCE, 0xD8),
            text_bright: Color::Rgb(0xFF, 0xFF, 0xFF),
            accent: Color::Rgb(0x5E, 0xB1, 0xFF),
            muted: Color::Rgb(0x6E, 0x77, 0x88),
            finished: Color::Rgb(0x5F, 0xD7, 0x87),
            due: Color::Rgb(0xF0, 0xC0, 0x5A),
            status: Color::Rgb(0xF0, 0xC0, 0x5A),
            cursor_bg: Color::Rgb(0x1E, 0x2A, 0x3C),
            cursor_marker: Color::Rgb(0x5E, 0xB1, 0xFF),
        }
    }
}

/// `#RRGGBB` or shorthand `#RGB`
fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if !hex.is_ascii() {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        6 => Some(Color::Rgb(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        )),
        3 => {
            let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 0x11);
            Some(Color::Rgb(expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

impl Theme {
    /// Defaults with the `[ui.colors]` overrides applied. Bad entries are logged and skipped.
    pub fn from_config(ui: &UiConfig) -> Self {
        let mut theme = Theme::default();
        for (role, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                warn!(role = %role, value = %value, "ignoring unparseable color");
                continue;
            };
            match theme.role_mut(role) {
                Some(slot) => *slot = color,
                None => warn!(role = %role, "ignoring unknown color role"),
            }
        }
        theme
    }

    fn role_mut(&mut self, role: &str) -> Option<&mut Color> {
        Some(match role {
            "background" => &mut self.background,
            "text" => &mut self.text,
            "text_bright" => &mut self.text_bright,
            "accent" => &mut self.accent,
            "muted" => &mut self.muted,
            "finished" => &mut self.finished,
            "due" => &mut self.due,
            "status" => &mut self.status,
            "cursor_bg" => &mut self.cursor_bg,
            "cursor_marker" => &mut self.cursor_marker,
            _ => return None,
        })
    }

    /// Checkbox color for a task
    pub fn state_color(&self, state: TaskState) -> Color {
        match state {
            TaskState::Active => self.text,
            TaskState::Finished => self.finished,
        }
    }
}
