//! Help bar widget for displaying keybind hints

use crate::ui::state::Mode;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// A keybind hint to display in the help bar
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyHint {
    /// Key combination (e.g., "Tab", "↑/↓")
    pub key: &'static str,
    /// Action description (e.g., "toggle", "move")
    pub action: &'static str,
}

impl KeyHint {
    #[must_use]
    pub const fn new(key: &'static str, action: &'static str) -> Self {
        Self { key, action }
    }
}

/// Hints for the keys that do something in `mode`
#[must_use]
pub fn hints_for(mode: &Mode) -> Vec<KeyHint> {
    match mode {
        Mode::Normal => vec![
            KeyHint::new("↑/↓", "move"),
            KeyHint::new("e", "pick product"),
            KeyHint::new("a", "add line"),
            KeyHint::new("d", "discount"),
            KeyHint::new("t", "% / flat"),
            KeyHint::new("v", "variants"),
            KeyHint::new("x", "remove"),
            KeyHint::new("m", "reorder"),
            KeyHint::new("q", "quit"),
        ],
        Mode::EditDiscount(_) => vec![
            KeyHint::new("0-9 .", "amount"),
            KeyHint::new("t", "% / flat"),
            KeyHint::new("Enter", "done"),
        ],
        Mode::Grab(_) => vec![
            KeyHint::new("↑/↓", "move"),
            KeyHint::new("Enter", "drop"),
            KeyHint::new("Esc", "cancel"),
        ],
        Mode::Picker => vec![
            KeyHint::new("type", "search"),
            KeyHint::new("↑/↓", "navigate"),
            KeyHint::new("Tab", "toggle"),
            KeyHint::new("Enter", "add"),
            KeyHint::new("Esc", "cancel"),
        ],
    }
}

/// Help bar widget that displays keybind hints at the bottom
pub struct HelpBar<'a> {
    hints: &'a [KeyHint],
    theme: &'a Theme,
}

impl<'a> HelpBar<'a> {
    #[must_use]
    pub const fn new(hints: &'a [KeyHint], theme: &'a Theme) -> Self {
        Self { hints, theme }
    }
}

impl Widget for HelpBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = Vec::new();

        for (i, hint) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("  ", self.theme.dimmed_style()));
            }
            spans.push(Span::styled(hint.key, self.theme.cursor_style()));
            spans.push(Span::styled(":", self.theme.dimmed_style()));
            spans.push(Span::raw(hint.action));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
