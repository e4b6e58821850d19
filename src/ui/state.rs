//! Application state for the ratatui TUI
//!
//! Wraps the [`PromoEditor`] with view-only state: cursors, the active
//! mode, the picker's search text and debounce deadline, status messages,
//! and the catalog requests waiting to be started.
//!
//! Every change to the promotion goes through [`PromoEditor::dispatch`].

use crate::config::PickerConfig;
use crate::editor::{EditorCommand, PromoEditor};
use crate::list::{DiscountField, DiscountType, LineId, ListModel, ProductLine};
use crate::picker::{PageLoaded, PickerSession, SearchRequest};
use crate::reorder::{DragKind, DropLocation, DropResult, PRODUCTS_CONTAINER, move_item, variants_container};
use std::mem;
use std::time::{Duration, Instant};

/// Severity of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Success,
    Error,
    Warning,
    Info,
}

/// A status message with timestamp for TTL-based expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub level: MessageLevel,
    pub text: String,
    pub created_at: Instant,
}

impl StatusMessage {
    #[must_use]
    pub fn new(level: MessageLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
            created_at: Instant::now(),
        }
    }

    /// Check if the message has expired based on TTL
    #[must_use]
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.created_at.elapsed() > ttl
    }
}

/// A visible row of the main view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    /// Product line at this index of the list
    Line(usize),
    /// Variant row `variant` of line `line`
    Variant { line: usize, variant: usize },
}

impl Row {
    /// Index of the line the row belongs to
    #[must_use]
    pub const fn line_index(self) -> usize {
        match self {
            Self::Line(line) | Self::Variant { line, .. } => line,
        }
    }
}

/// A visible row of the picker dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerRow {
    Product(usize),
    Variant { product: usize, variant: usize },
}

/// Whose discount is being edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscountTarget {
    Line(LineId),
    Variant { line: LineId, index: usize },
}

/// Discount value being typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscountEdit {
    pub target: DiscountTarget,
    pub buffer: String,
}

/// A row picked up for moving
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grab {
    pub kind: DragKind,
    pub container: String,
    /// Line index owning the grabbed variant (or the grabbed line itself)
    pub line: usize,
    pub origin: usize,
    pub position: usize,
    pub len: usize,
}

/// Current mode of the TUI application
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Normal,
    /// Typing a discount value
    EditDiscount(DiscountEdit),
    /// Moving a line or variant
    Grab(Grab),
    /// The product picker dialog is open
    Picker,
}

/// Application state for the promotion editor
#[derive(Debug)]
pub struct AppState {
    pub editor: PromoEditor,
    pub mode: Mode,
    /// Index into [`AppState::rows`]
    pub cursor: usize,
    /// Index into [`AppState::picker_rows`]
    pub picker_cursor: usize,
    /// Search text typed in the picker
    pub picker_query: String,
    /// When the typed search text should be sent
    pub search_due: Option<Instant>,
    pub debounce: Duration,
    pub load_more_threshold: usize,
    pub messages: Vec<StatusMessage>,
    pub message_ttl: Duration,
    pub should_exit: bool,
    requests: Vec<SearchRequest>,
}

impl AppState {
    #[must_use]
    pub fn new(editor: PromoEditor, picker: &PickerConfig) -> Self {
        Self {
            editor,
            mode: Mode::Normal,
            cursor: 0,
            picker_cursor: 0,
            picker_query: String::new(),
            search_due: None,
            debounce: picker.debounce(),
            load_more_threshold: picker.load_more_threshold.max(1),
            messages: Vec::new(),
            message_ttl: Duration::from_secs(5),
            should_exit: false,
            requests: Vec::new(),
        }
    }

    #[must_use]
    pub const fn list(&self) -> &ListModel {
        self.editor.list()
    }

    #[must_use]
    pub fn picker(&self) -> Option<&PickerSession> {
        self.editor.picker()
    }

    /// Send a command to the editor, queueing any catalog request it issues
    pub fn dispatch(&mut self, command: EditorCommand) {
        if let Some(request) = self.editor.dispatch(command) {
            self.requests.push(request);
        }
        self.clamp_cursors();
    }

    /// Catalog requests to start, oldest first
    pub fn take_requests(&mut self) -> Vec<SearchRequest> {
        mem::take(&mut self.requests)
    }

    pub fn push_message(&mut self, level: MessageLevel, text: impl Into<String>) {
        self.messages.push(StatusMessage::new(level, text));
    }

    /// Messages that have not expired
    #[must_use]
    pub fn active_messages(&self) -> Vec<&StatusMessage> {
        self.messages
            .iter()
            .filter(|m| !m.is_expired(self.message_ttl))
            .collect()
    }

    pub fn expire_messages(&mut self) {
        let ttl = self.message_ttl;
        self.messages.retain(|m| !m.is_expired(ttl));
    }

    // Main view rows

    /// Rows in display order
    ///
    /// While a row is grabbed the order previews where it would land.
    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        let lines = self.list().lines();
        let mut line_order: Vec<usize> = (0..lines.len()).collect();
        let mut variant_order: Option<(usize, Vec<usize>)> = None;

        if let Mode::Grab(grab) = &self.mode {
            match grab.kind {
                DragKind::Product => {
                    move_item(&mut line_order, grab.origin, grab.position);
                }
                DragKind::Variant => {
                    let mut order: Vec<usize> = (0..grab.len).collect();
                    move_item(&mut order, grab.origin, grab.position);
                    variant_order = Some((grab.line, order));
                }
            }
        }

        let mut rows = Vec::new();
        for line in line_order {
            rows.push(Row::Line(line));
            let Some(product_line) = lines.get(line) else {
                continue;
            };
            if !product_line.show_variants {
                continue;
            }
            match &variant_order {
                Some((grabbed_line, order)) if *grabbed_line == line => {
                    rows.extend(order.iter().map(|&variant| Row::Variant { line, variant }));
                }
                _ => {
                    rows.extend(
                        (0..product_line.variants.len()).map(|variant| Row::Variant { line, variant }),
                    );
                }
            }
        }
        rows
    }

    #[must_use]
    pub fn current_row(&self) -> Option<Row> {
        self.rows().get(self.cursor).copied()
    }

    /// The row currently being moved, if any
    #[must_use]
    pub fn grabbed_row(&self) -> Option<Row> {
        let Mode::Grab(grab) = &self.mode else {
            return None;
        };
        Some(match grab.kind {
            DragKind::Product => Row::Line(grab.origin),
            DragKind::Variant => Row::Variant {
                line: grab.line,
                variant: grab.origin,
            },
        })
    }

    fn line_at(&self, index: usize) -> Option<&ProductLine> {
        self.list().lines().get(index)
    }

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        let len = self.rows().len();
        if self.cursor + 1 < len {
            self.cursor += 1;
        }
    }

    fn focus_row(&mut self, row: Row) {
        if let Some(pos) = self.rows().iter().position(|r| *r == row) {
            self.cursor = pos;
        }
    }

    fn clamp_cursors(&mut self) {
        let rows = self.rows().len();
        self.cursor = self.cursor.min(rows.saturating_sub(1));
        let picker_rows = self.picker_rows().len();
        self.picker_cursor = self.picker_cursor.min(picker_rows.saturating_sub(1));
    }

    // Line actions

    pub fn append_line(&mut self) {
        self.dispatch(EditorCommand::AppendPlaceholder);
        let last = self.list().len().saturating_sub(1);
        self.focus_row(Row::Line(last));
    }

    pub fn toggle_variants(&mut self) {
        let Some(row) = self.current_row() else {
            return;
        };
        let index = row.line_index();
        let Some(line) = self.line_at(index) else {
            return;
        };
        if !line.has_multiple_variants() {
            self.push_message(MessageLevel::Info, "Only one variant on this line");
            return;
        }
        let id = line.id;
        self.dispatch(EditorCommand::ToggleVariants(id));
        self.focus_row(Row::Line(index));
    }

    pub fn remove_current(&mut self) {
        let Some(row) = self.current_row() else {
            return;
        };
        match row {
            Row::Line(index) => {
                if self.list().len() <= 1 {
                    self.push_message(MessageLevel::Warning, "The last line cannot be removed");
                    return;
                }
                let Some(id) = self.line_at(index).map(|l| l.id) else {
                    return;
                };
                self.dispatch(EditorCommand::RemoveLine(id));
            }
            Row::Variant { line, variant } => {
                let Some(product_line) = self.line_at(line) else {
                    return;
                };
                if product_line.variants.len() <= 1 {
                    self.push_message(MessageLevel::Warning, "The last variant cannot be removed");
                    return;
                }
                let id = product_line.id;
                self.dispatch(EditorCommand::RemoveVariant {
                    line: id,
                    index: variant,
                });
            }
        }
    }

    // Discounts

    fn discount_target(&self, row: Row) -> Option<DiscountTarget> {
        match row {
            Row::Line(index) => self.line_at(index).map(|l| DiscountTarget::Line(l.id)),
            Row::Variant { line, variant } => self.line_at(line).map(|l| DiscountTarget::Variant {
                line: l.id,
                index: variant,
            }),
        }
    }

    fn discount_of(&self, target: &DiscountTarget) -> Option<(String, DiscountType)> {
        match target {
            DiscountTarget::Line(id) => self
                .list()
                .line(id)
                .map(|l| (l.discount.value.clone(), l.discount.kind)),
            DiscountTarget::Variant { line, index } => self
                .list()
                .line(line)
                .and_then(|l| l.variants.get(*index))
                .map(|v| (v.discount.value.clone(), v.discount.kind)),
        }
    }

    fn update_discount(&mut self, target: &DiscountTarget, field: DiscountField, value: String) {
        let command = match target {
            DiscountTarget::Line(line) => EditorCommand::UpdateDiscount {
                line: *line,
                field,
                value,
            },
            DiscountTarget::Variant { line, index } => EditorCommand::UpdateVariantDiscount {
                line: *line,
                variant_index: *index,
                field,
                value,
            },
        };
        self.dispatch(command);
    }

    /// Start typing a discount for the current row
    ///
    /// A line whose discount editor is hidden gets a fresh discount first.
    pub fn begin_discount(&mut self) {
        let Some(row) = self.current_row() else {
            return;
        };
        if let Row::Line(index) = row
            && let Some(line) = self.line_at(index)
            && !line.show_discount
        {
            let id = line.id;
            self.dispatch(EditorCommand::ShowDiscount(id));
        }
        let Some(target) = self.discount_target(row) else {
            return;
        };
        let buffer = self
            .discount_of(&target)
            .map(|(value, _)| value)
            .unwrap_or_default();
        self.mode = Mode::EditDiscount(DiscountEdit { target, buffer });
    }

    /// Try `candidate` as the new value; the model keeps it only if valid
    fn propose_discount(&mut self, candidate: String) {
        let Mode::EditDiscount(edit) = &self.mode else {
            return;
        };
        let target = edit.target.clone();
        self.update_discount(&target, DiscountField::Value, candidate);

        let accepted = self
            .discount_of(&target)
            .map(|(value, _)| value)
            .unwrap_or_default();
        if let Mode::EditDiscount(edit) = &mut self.mode {
            edit.buffer = accepted;
        }
    }

    pub fn discount_push(&mut self, c: char) {
        let Mode::EditDiscount(edit) = &self.mode else {
            return;
        };
        let mut candidate = edit.buffer.clone();
        if candidate.is_empty() && c == '.' {
            candidate.push('0');
        }
        candidate.push(c);
        let before = edit.buffer.clone();
        self.propose_discount(candidate);
        if matches!(&self.mode, Mode::EditDiscount(edit) if edit.buffer == before) {
            self.push_message(MessageLevel::Warning, "Discount must be a non-negative number");
        }
    }

    pub fn discount_backspace(&mut self) {
        let Mode::EditDiscount(edit) = &self.mode else {
            return;
        };
        let mut candidate = edit.buffer.clone();
        if candidate.pop().is_none() {
            return;
        }
        self.propose_discount(candidate);
    }

    pub fn finish_discount(&mut self) {
        self.mode = Mode::Normal;
    }

    /// Switch the current row's discount between percent and flat
    pub fn toggle_discount_type(&mut self) {
        let target = match &self.mode {
            Mode::EditDiscount(edit) => Some(edit.target.clone()),
            _ => self.current_row().and_then(|row| {
                if let Row::Line(index) = row
                    && self.line_at(index).is_some_and(|l| !l.show_discount)
                {
                    return None;
                }
                self.discount_target(row)
            }),
        };
        let Some(target) = target else {
            return;
        };
        let Some((_, kind)) = self.discount_of(&target) else {
            return;
        };
        self.update_discount(&target, DiscountField::Type, kind.toggled().to_string());
    }

    // Moving rows

    /// Pick up the current row for moving
    pub fn begin_grab(&mut self) {
        let Some(row) = self.current_row() else {
            return;
        };
        let grab = match row {
            Row::Line(index) => Grab {
                kind: DragKind::Product,
                container: PRODUCTS_CONTAINER.to_string(),
                line: index,
                origin: index,
                position: index,
                len: self.list().len(),
            },
            Row::Variant { line, variant } => {
                let Some(product_line) = self.line_at(line) else {
                    return;
                };
                Grab {
                    kind: DragKind::Variant,
                    container: variants_container(&product_line.id),
                    line,
                    origin: variant,
                    position: variant,
                    len: product_line.variants.len(),
                }
            }
        };
        if grab.len < 2 {
            return;
        }
        self.mode = Mode::Grab(grab);
    }

    pub fn grab_up(&mut self) {
        if let Mode::Grab(grab) = &mut self.mode {
            grab.position = grab.position.saturating_sub(1);
        }
        self.focus_grabbed();
    }

    pub fn grab_down(&mut self) {
        if let Mode::Grab(grab) = &mut self.mode
            && grab.position + 1 < grab.len
        {
            grab.position += 1;
        }
        self.focus_grabbed();
    }

    fn focus_grabbed(&mut self) {
        if let Some(row) = self.grabbed_row() {
            self.focus_row(row);
        }
    }

    /// Release the grabbed row at its previewed position
    pub fn drop_grab(&mut self) {
        let Mode::Grab(grab) = mem::take(&mut self.mode) else {
            return;
        };
        let drop = DropResult {
            kind: grab.kind,
            source: DropLocation::new(grab.container.clone(), grab.origin),
            destination: Some(DropLocation::new(grab.container, grab.position)),
        };
        self.dispatch(EditorCommand::Drop(drop));

        let landed = match grab.kind {
            DragKind::Product => Row::Line(grab.position),
            DragKind::Variant => Row::Variant {
                line: grab.line,
                variant: grab.position,
            },
        };
        self.focus_row(landed);
    }

    /// Release the grabbed row outside any container
    pub fn cancel_grab(&mut self) {
        let Mode::Grab(grab) = mem::take(&mut self.mode) else {
            return;
        };
        self.dispatch(EditorCommand::Drop(DropResult {
            kind: grab.kind,
            source: DropLocation::new(grab.container, grab.origin),
            destination: None,
        }));
        self.focus_grabbed_origin(grab.kind, grab.line, grab.origin);
    }

    fn focus_grabbed_origin(&mut self, kind: DragKind, line: usize, origin: usize) {
        let row = match kind {
            DragKind::Product => Row::Line(origin),
            DragKind::Variant => Row::Variant {
                line,
                variant: origin,
            },
        };
        self.focus_row(row);
    }

    // Picker

    /// Open the picker for the line under the cursor
    pub fn open_picker(&mut self) {
        let Some(row) = self.current_row() else {
            return;
        };
        self.dispatch(EditorCommand::OpenPicker {
            index: row.line_index(),
        });
        if self.picker().is_some() {
            self.mode = Mode::Picker;
            self.picker_cursor = 0;
            self.picker_query.clear();
            self.search_due = None;
        }
    }

    pub fn close_picker(&mut self) {
        self.dispatch(EditorCommand::ClosePicker);
        self.search_due = None;
        self.mode = Mode::Normal;
    }

    pub fn confirm_picker(&mut self) {
        let index = self.editor.editing_index();
        let count = self.picker().map_or(0, PickerSession::selected_count);
        self.dispatch(EditorCommand::ConfirmPicker);
        self.search_due = None;
        self.mode = Mode::Normal;

        if count > 0 {
            self.push_message(MessageLevel::Success, format!("Added {count} product(s)"));
            if let Some(index) = index {
                self.focus_row(Row::Line(index));
            }
        }
    }

    /// Candidate rows: each product followed by its variants
    #[must_use]
    pub fn picker_rows(&self) -> Vec<PickerRow> {
        let Some(session) = self.picker() else {
            return Vec::new();
        };
        let mut rows = Vec::new();
        for (product, candidate) in session.candidates().iter().enumerate() {
            rows.push(PickerRow::Product(product));
            rows.extend(
                (0..candidate.variants.len()).map(|variant| PickerRow::Variant { product, variant }),
            );
        }
        rows
    }

    pub fn picker_up(&mut self) {
        self.picker_cursor = self.picker_cursor.saturating_sub(1);
    }

    pub fn picker_down(&mut self) {
        let len = self.picker_rows().len();
        if self.picker_cursor + 1 < len {
            self.picker_cursor += 1;
        }
        self.maybe_load_more();
    }

    /// Request the next page once the cursor is near the end of the results
    pub fn maybe_load_more(&mut self) {
        let len = self.picker_rows().len();
        let remaining = len.saturating_sub(self.picker_cursor + 1);
        if remaining < self.load_more_threshold {
            self.dispatch(EditorCommand::LoadMore);
        }
    }

    /// Toggle the product or variant under the picker cursor
    pub fn picker_toggle(&mut self) {
        let Some(session) = self.picker() else {
            return;
        };
        let Some(row) = self.picker_rows().get(self.picker_cursor).copied() else {
            return;
        };
        let command = match row {
            PickerRow::Product(index) => {
                let Some(product) = session.candidates().get(index) else {
                    return;
                };
                if product.variants.is_empty() {
                    self.push_message(MessageLevel::Info, "This product has no variants");
                    return;
                }
                EditorCommand::ToggleProduct(product.id)
            }
            PickerRow::Variant { product, variant } => {
                let Some(candidate) = session.candidates().get(product) else {
                    return;
                };
                let Some(v) = candidate.variants.get(variant) else {
                    return;
                };
                EditorCommand::ToggleVariant {
                    product_id: candidate.id,
                    variant_id: v.id,
                }
            }
        };
        self.dispatch(command);
    }

    pub fn query_push(&mut self, c: char, now: Instant) {
        self.picker_query.push(c);
        self.search_due = Some(now + self.debounce);
    }

    pub fn query_backspace(&mut self, now: Instant) {
        if self.picker_query.pop().is_some() {
            self.search_due = Some(now + self.debounce);
        }
    }

    /// Send the typed search once the debounce period has passed
    pub fn poll_debounce(&mut self, now: Instant) {
        let Some(due) = self.search_due else {
            return;
        };
        if now < due {
            return;
        }
        self.search_due = None;
        let query = self.picker_query.clone();
        self.picker_cursor = 0;
        self.dispatch(EditorCommand::Search(query));
    }

    /// Hand a finished fetch to the editor
    pub fn page_loaded(&mut self, loaded: PageLoaded) {
        let current = self
            .picker()
            .and_then(PickerSession::in_flight)
            .is_some_and(|ticket| ticket == loaded.request.ticket);
        self.dispatch(EditorCommand::PageLoaded(loaded));

        if !current {
            return;
        }
        if let Some(error) = self.picker().and_then(PickerSession::last_error) {
            let text = format!("Search failed: {error}");
            self.push_message(MessageLevel::Error, text);
        } else if self.picker().is_some_and(PickerSession::has_more) {
            // a page thinned out by exclusion leaves nothing to scroll towards
            self.maybe_load_more();
        }
    }
}
