//! Promotion list widget: numbered product lines with optional variant rows

use crate::list::{Discount, ProductLine, VariantLine};
use crate::ui::state::{AppState, DiscountTarget, Mode, Row};
use crate::ui::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Widget},
};

pub struct LineList<'a> {
    state: &'a AppState,
    theme: &'a Theme,
}

impl<'a> LineList<'a> {
    #[must_use]
    pub const fn new(state: &'a AppState, theme: &'a Theme) -> Self {
        Self { state, theme }
    }

    /// Buffer being typed if `row` is the row whose discount is edited
    fn editing_buffer(&self, row: Row) -> Option<&'a str> {
        let Mode::EditDiscount(edit) = &self.state.mode else {
            return None;
        };
        let lines = self.state.list().lines();
        let matches = match (&edit.target, row) {
            (DiscountTarget::Line(id), Row::Line(index)) => lines.get(index).is_some_and(|l| l.id == *id),
            (DiscountTarget::Variant { line, index }, Row::Variant { line: li, variant }) => {
                *index == variant && lines.get(li).is_some_and(|l| l.id == *line)
            }
            _ => false,
        };
        matches.then_some(edit.buffer.as_str())
    }

    fn discount_spans(&self, discount: &Discount, editing: Option<&'a str>) -> Vec<Span<'a>> {
        let value = editing.map_or_else(|| discount.value.clone(), str::to_string);
        let shown = if value.is_empty() { "_".to_string() } else { value };
        let mut spans = vec![
            Span::raw("  "),
            Span::styled(format!("[{shown}"), self.theme.discount_style()),
        ];
        if editing.is_some() {
            spans.push(Span::styled("│", self.theme.cursor_style()));
        }
        spans.push(Span::styled(
            format!(" {}]", discount.kind.label()),
            self.theme.discount_style(),
        ));
        spans
    }

    fn line_item(&self, number: usize, line: &'a ProductLine, row: Row) -> Vec<Span<'a>> {
        let title_style = if line.is_placeholder() {
            self.theme.dimmed_style()
        } else {
            Style::default()
        };
        let mut spans = vec![
            Span::raw(format!("{number}. ")),
            Span::styled(line.display_title(), title_style),
        ];

        if line.has_multiple_variants() {
            let arrow = if line.show_variants { "▾" } else { "▸" };
            spans.push(Span::styled(
                format!("  {arrow} {} variants", line.variants.len()),
                self.theme.dimmed_style(),
            ));
        }

        let editing = self.editing_buffer(row);
        if line.show_discount || editing.is_some() {
            spans.extend(self.discount_spans(&line.discount, editing));
        }
        spans
    }

    fn variant_item(&self, line: &ProductLine, variant: &'a VariantLine, row: Row) -> Vec<Span<'a>> {
        let mut spans = vec![
            Span::raw("      • "),
            Span::raw(variant.title.as_str()),
            Span::styled(format!("  ${}", variant.price), self.theme.dimmed_style()),
        ];
        let editing = self.editing_buffer(row);
        if line.show_discount || variant.discount.is_applied() || editing.is_some() {
            spans.extend(self.discount_spans(&variant.discount, editing));
        }
        spans
    }
}

impl Widget for LineList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.state.list().lines();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border_style())
            .title(format!(" Products ({}) ", lines.len()));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        let rows = self.state.rows();
        let grabbed = self.state.grabbed_row();
        let visible_height = inner.height as usize;
        let start = self.state.cursor.saturating_sub(visible_height - 1);

        let mut number = 0;
        let mut items = Vec::new();
        for (pos, row) in rows.iter().enumerate() {
            let spans = match *row {
                Row::Line(index) => {
                    number += 1;
                    let Some(line) = lines.get(index) else {
                        continue;
                    };
                    self.line_item(number, line, *row)
                }
                Row::Variant { line, variant } => {
                    let Some(product_line) = lines.get(line) else {
                        continue;
                    };
                    let Some(v) = product_line.variants.get(variant) else {
                        continue;
                    };
                    self.variant_item(product_line, v, *row)
                }
            };
            if pos < start {
                continue;
            }

            let is_cursor = pos == self.state.cursor;
            let cursor_char = if is_cursor { ">" } else { " " };
            let mut line_spans = vec![
                Span::styled(cursor_char, self.theme.cursor_style()),
                Span::raw(" "),
            ];
            line_spans.extend(spans);

            let style = if grabbed == Some(*row) {
                self.theme.grabbed_style()
            } else if is_cursor {
                self.theme.selected_style()
            } else {
                self.theme.normal_style()
            };
            items.push(ListItem::new(Line::from(line_spans)).style(style));
        }

        List::new(items).render(inner, buf);
    }
}
