//! Search bar widget for the picker query

use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Search bar widget that displays the query with a trailing cursor
pub struct SearchBar<'a> {
    query: &'a str,
    prompt: &'a str,
    theme: &'a Theme,
    /// Shown while a search is pending or loading
    busy: bool,
}

impl<'a> SearchBar<'a> {
    #[must_use]
    pub const fn new(query: &'a str, prompt: &'a str, theme: &'a Theme) -> Self {
        Self {
            query,
            prompt,
            theme,
            busy: false,
        }
    }

    #[must_use]
    pub const fn busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}

impl Widget for SearchBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style())
            .title(" Search product ");

        let inner = block.inner(area);
        block.render(area, buf);

        let mut spans = vec![
            Span::styled(self.prompt, self.theme.dimmed_style()),
            Span::raw(" "),
            Span::raw(self.query),
            Span::styled("│", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ];
        if self.busy {
            spans.push(Span::styled("  searching…", self.theme.dimmed_style()));
        }

        Paragraph::new(Line::from(spans)).render(inner, buf);
    }
}
