//! Product picker dialog
//!
//! A centered modal with the search bar, the candidate products with their
//! variants, and a footer with the selection count and loading state.

use super::SearchBar;
use crate::picker::{LoadState, PickerSession};
use crate::selection::CheckState;
use crate::ui::state::PickerRow;
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Widget},
};

pub struct PickerDialog<'a> {
    session: &'a PickerSession,
    rows: &'a [PickerRow],
    cursor: usize,
    query: &'a str,
    search_pending: bool,
    theme: &'a Theme,
}

impl<'a> PickerDialog<'a> {
    #[must_use]
    pub const fn new(
        session: &'a PickerSession,
        rows: &'a [PickerRow],
        cursor: usize,
        query: &'a str,
        theme: &'a Theme,
    ) -> Self {
        Self {
            session,
            rows,
            cursor,
            query,
            search_pending: false,
            theme,
        }
    }

    /// Mark that typed text has not been searched yet
    #[must_use]
    pub const fn search_pending(mut self, pending: bool) -> Self {
        self.search_pending = pending;
        self
    }

    /// Area of the dialog inside `area`
    #[must_use]
    pub fn centered(area: Rect) -> Rect {
        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(area);
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(vertical[1])[1]
    }

    fn checkbox(&self, state: CheckState) -> Span<'static> {
        match state {
            CheckState::Checked => Span::styled("[✓] ", self.theme.checked_style()),
            CheckState::Partial => Span::styled("[-] ", self.theme.partial_style()),
            CheckState::Unchecked => Span::styled("[ ] ", self.theme.dimmed_style()),
        }
    }

    fn row_spans(&self, row: PickerRow) -> Option<Vec<Span<'a>>> {
        let candidates = self.session.candidates();
        match row {
            PickerRow::Product(index) => {
                let product = candidates.get(index)?;
                let mut spans = vec![
                    self.checkbox(self.session.check_state(product)),
                    Span::raw(product.title.as_str()),
                ];
                if product.variants.is_empty() {
                    spans.push(Span::styled("  (no variants)", self.theme.dimmed_style()));
                }
                Some(spans)
            }
            PickerRow::Variant { product, variant } => {
                let product = candidates.get(product)?;
                let variant = product.variants.get(variant)?;
                let state = if self.session.selection().is_variant_selected(variant.id) {
                    CheckState::Checked
                } else {
                    CheckState::Unchecked
                };
                let stock = variant
                    .inventory_quantity
                    .map(|q| format!("  {q} available"))
                    .unwrap_or_default();
                Some(vec![
                    Span::raw("      "),
                    self.checkbox(state),
                    Span::raw(variant.title.as_str()),
                    Span::styled(
                        format!("  ${}{stock}", variant.price),
                        self.theme.dimmed_style(),
                    ),
                ])
            }
        }
    }

    fn footer(&self) -> Line<'static> {
        let count = self.session.selected_count();
        let mut spans = vec![Span::styled(
            format!("{count} product(s) selected"),
            self.theme.info_style(),
        )];

        let status = match self.session.load_state() {
            LoadState::Loading => Some(("  loading…".to_string(), self.theme.dimmed_style())),
            LoadState::LoadingMore => Some(("  loading more…".to_string(), self.theme.dimmed_style())),
            LoadState::Idle => self.session.last_error().map_or_else(
                || {
                    self.session
                        .candidates()
                        .is_empty()
                        .then(|| ("  no products found".to_string(), self.theme.dimmed_style()))
                },
                |e| Some((format!("  {e}"), self.theme.error_style())),
            ),
        };
        if let Some((text, style)) = status {
            spans.push(Span::styled(text, style));
        }
        Line::from(spans)
    }
}

impl Widget for PickerDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.focused_border_style())
            .title(" Select Products ");
        let inner = block.inner(area);
        block.render(area, buf);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let busy = self.search_pending || self.session.load_state() == LoadState::Loading;
        SearchBar::new(self.query, ">", self.theme)
            .busy(busy)
            .render(chunks[0], buf);

        let list_area = chunks[1];
        if list_area.height > 0 {
            let visible_height = list_area.height as usize;
            let start = self.cursor.saturating_sub(visible_height - 1);
            let end = (start + visible_height).min(self.rows.len());

            let items: Vec<ListItem> = self.rows[start.min(end)..end]
                .iter()
                .enumerate()
                .filter_map(|(offset, row)| {
                    let is_cursor = start + offset == self.cursor;
                    let mut spans = vec![Span::styled(
                        if is_cursor { "> " } else { "  " },
                        self.theme.cursor_style(),
                    )];
                    spans.extend(self.row_spans(*row)?);
                    let style = if is_cursor {
                        self.theme.selected_style()
                    } else {
                        Style::default()
                    };
                    Some(ListItem::new(Line::from(spans)).style(style))
                })
                .collect();
            List::new(items).render(list_area, buf);
        }

        Paragraph::new(self.footer()).render(chunks[2], buf);
    }
}
