//! Promotion editor
//!
//! Single entry point for every user intent. The editor owns the list model
//! and, while the dialog is open, the picker session. Each call to
//! [`PromoEditor::dispatch`] runs to completion before the next one, so no
//! half-applied state is ever visible to the view.
//!
//! When a command needs catalog data, `dispatch` returns the
//! [`SearchRequest`] to run; its result comes back later as
//! [`EditorCommand::PageLoaded`].

use crate::catalog::{DEFAULT_PAGE_SIZE, ProductId, VariantId};
use crate::list::{DiscountField, LineId, ListModel};
use crate::picker::{PageLoaded, PickerSession, SearchRequest};
use crate::reorder::DropResult;
use tracing::{debug, info};

/// A user intent or a completed fetch
#[derive(Debug)]
pub enum EditorCommand {
    /// Open the picker to fill the line at `index`
    OpenPicker { index: usize },
    /// Close the picker without changing the list
    ClosePicker,
    /// Close the picker and splice its selection into the list
    ConfirmPicker,
    /// Change the picker's search text
    Search(String),
    /// Ask for the next page of picker results
    LoadMore,
    /// A catalog response arrived
    PageLoaded(PageLoaded),
    ToggleProduct(ProductId),
    ToggleVariant {
        product_id: ProductId,
        variant_id: VariantId,
    },
    UpdateDiscount {
        line: LineId,
        field: DiscountField,
        value: String,
    },
    UpdateVariantDiscount {
        line: LineId,
        variant_index: usize,
        field: DiscountField,
        value: String,
    },
    /// "Add Discount" on a line
    ShowDiscount(LineId),
    /// Expand or collapse a line's variants
    ToggleVariants(LineId),
    RemoveLine(LineId),
    RemoveVariant { line: LineId, index: usize },
    AppendPlaceholder,
    /// A drag gesture finished
    Drop(DropResult),
}

#[derive(Debug)]
struct OpenPicker {
    session: PickerSession,
    editing_index: usize,
}

/// Editor state: the list plus an optional open picker
#[derive(Debug)]
pub struct PromoEditor {
    list: ListModel,
    picker: Option<OpenPicker>,
    page_size: u32,
}

impl Default for PromoEditor {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PromoEditor {
    /// A new editor with one placeholder line
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self::with_list(ListModel::new(), page_size)
    }

    /// An editor over an existing list
    #[must_use]
    pub const fn with_list(list: ListModel, page_size: u32) -> Self {
        Self {
            list,
            picker: None,
            page_size,
        }
    }

    #[must_use]
    pub const fn list(&self) -> &ListModel {
        &self.list
    }

    /// The open picker, if any
    #[must_use]
    pub fn picker(&self) -> Option<&PickerSession> {
        self.picker.as_ref().map(|p| &p.session)
    }

    /// Line index the open picker will replace
    #[must_use]
    pub fn editing_index(&self) -> Option<usize> {
        self.picker.as_ref().map(|p| p.editing_index)
    }

    /// Apply one command; returns a catalog request to run, if any
    pub fn dispatch(&mut self, command: EditorCommand) -> Option<SearchRequest> {
        match command {
            EditorCommand::OpenPicker { index } => self.open_picker(index),
            EditorCommand::ClosePicker => {
                if self.picker.take().is_some() {
                    debug!("picker cancelled");
                }
                None
            }
            EditorCommand::ConfirmPicker => {
                self.confirm_picker();
                None
            }
            EditorCommand::Search(query) => self.session_mut().map(|s| s.set_query(query)),
            EditorCommand::LoadMore => self.session_mut().and_then(PickerSession::load_more),
            EditorCommand::PageLoaded(loaded) => {
                if let Some(session) = self.session_mut() {
                    session.apply_page(loaded);
                } else {
                    debug!("catalog response arrived after picker closed");
                }
                None
            }
            EditorCommand::ToggleProduct(product_id) => {
                if let Some(session) = self.session_mut() {
                    session.toggle_product(product_id);
                }
                None
            }
            EditorCommand::ToggleVariant {
                product_id,
                variant_id,
            } => {
                if let Some(session) = self.session_mut() {
                    session.toggle_variant(product_id, variant_id);
                }
                None
            }
            EditorCommand::UpdateDiscount { line, field, value } => {
                self.list.update_discount(&line, field, &value);
                None
            }
            EditorCommand::UpdateVariantDiscount {
                line,
                variant_index,
                field,
                value,
            } => {
                self.list
                    .update_variant_discount(&line, variant_index, field, &value);
                None
            }
            EditorCommand::ShowDiscount(line) => {
                self.list.show_discount(&line);
                None
            }
            EditorCommand::ToggleVariants(line) => {
                self.list.toggle_variants(&line);
                None
            }
            EditorCommand::RemoveLine(line) => {
                self.list.remove_line(&line);
                None
            }
            EditorCommand::RemoveVariant { line, index } => {
                self.list.remove_variant(&line, index);
                None
            }
            EditorCommand::AppendPlaceholder => {
                self.list.append_placeholder();
                None
            }
            EditorCommand::Drop(drop) => {
                if !self.list.apply_drop(&drop) {
                    debug!(?drop, "drop ignored");
                }
                None
            }
        }
    }

    fn session_mut(&mut self) -> Option<&mut PickerSession> {
        self.picker.as_mut().map(|p| &mut p.session)
    }

    fn open_picker(&mut self, index: usize) -> Option<SearchRequest> {
        if index >= self.list.len() {
            return None;
        }
        let (session, request) = PickerSession::open(self.list.listed_product_ids(), self.page_size);
        self.picker = Some(OpenPicker {
            session,
            editing_index: index,
        });
        Some(request)
    }

    fn confirm_picker(&mut self) {
        let Some(OpenPicker {
            session,
            editing_index,
        }) = self.picker.take()
        else {
            return;
        };

        let selected = session.confirm();
        let count = selected.len();
        if self.list.replace_at(editing_index, selected) {
            info!(count, index = editing_index, "products added to promotion");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MockCatalog;
    use crate::list::DiscountType;
    use crate::reorder::{DragKind, DropLocation, PRODUCTS_CONTAINER};

    /// Resolve a request synchronously against the demo catalog
    fn serve(editor: &mut PromoEditor, request: Option<SearchRequest>) {
        let catalog = MockCatalog::demo();
        if let Some(request) = request {
            let result = catalog.page(&request.query, request.page, request.limit);
            editor.dispatch(EditorCommand::PageLoaded(PageLoaded { request, result }));
        }
    }

    fn open(editor: &mut PromoEditor, index: usize) {
        let request = editor.dispatch(EditorCommand::OpenPicker { index });
        serve(editor, request);
    }

    fn candidate_ids(editor: &PromoEditor) -> Vec<ProductId> {
        editor
            .picker()
            .map(|p| p.candidates().iter().map(|c| c.id).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_open_and_confirm_replaces_placeholder() {
        let mut editor = PromoEditor::new(10);
        open(&mut editor, 0);

        editor.dispatch(EditorCommand::ToggleProduct(81));
        editor.dispatch(EditorCommand::ToggleProduct(77));
        editor.dispatch(EditorCommand::ConfirmPicker);

        assert!(editor.picker().is_none());
        let ids: Vec<LineId> = editor.list().lines().iter().map(|l| l.id).collect();
        assert_eq!(ids, vec![LineId::Product(77), LineId::Product(81)]);
    }

    #[test]
    fn test_confirm_with_nothing_selected_keeps_line() {
        let mut editor = PromoEditor::new(10);
        let before = editor.list().clone();
        open(&mut editor, 0);

        editor.dispatch(EditorCommand::ConfirmPicker);

        assert!(editor.picker().is_none());
        assert_eq!(editor.list(), &before);
    }

    #[test]
    fn test_close_picker_discards_selection() {
        let mut editor = PromoEditor::new(10);
        open(&mut editor, 0);
        editor.dispatch(EditorCommand::ToggleProduct(80));
        editor.dispatch(EditorCommand::ClosePicker);

        assert!(editor.picker().is_none());
        assert!(editor.list().lines()[0].is_placeholder());
    }

    #[test]
    fn test_listed_products_excluded_from_picker() {
        let mut editor = PromoEditor::new(10);
        open(&mut editor, 0);
        editor.dispatch(EditorCommand::ToggleProduct(77));
        editor.dispatch(EditorCommand::ConfirmPicker);
        editor.dispatch(EditorCommand::AppendPlaceholder);

        open(&mut editor, 1);

        assert_eq!(editor.editing_index(), Some(1));
        let ids = candidate_ids(&editor);
        assert!(!ids.contains(&77));
        assert_eq!(ids.first(), Some(&80));
    }

    #[test]
    fn test_open_picker_out_of_range() {
        let mut editor = PromoEditor::new(10);
        assert!(editor.dispatch(EditorCommand::OpenPicker { index: 3 }).is_none());
        assert!(editor.picker().is_none());
    }

    #[test]
    fn test_picker_commands_without_picker_are_noops() {
        let mut editor = PromoEditor::new(10);
        assert!(editor.dispatch(EditorCommand::Search("x".into())).is_none());
        assert!(editor.dispatch(EditorCommand::LoadMore).is_none());
        editor.dispatch(EditorCommand::ToggleProduct(77));
        editor.dispatch(EditorCommand::ConfirmPicker);
        assert_eq!(editor.list().len(), 1);
    }

    #[test]
    fn test_search_and_load_more_through_dispatch() {
        let mut editor = PromoEditor::new(5);
        open(&mut editor, 0);
        assert_eq!(candidate_ids(&editor).len(), 5);

        let more = editor.dispatch(EditorCommand::LoadMore);
        assert!(more.is_some());
        serve(&mut editor, more);
        assert_eq!(candidate_ids(&editor).len(), 10);

        let search = editor.dispatch(EditorCommand::Search("socks".into()));
        serve(&mut editor, search);
        assert_eq!(candidate_ids(&editor), vec![81]);
    }

    #[test]
    fn test_late_response_after_close_is_ignored() {
        let mut editor = PromoEditor::new(10);
        let request = editor.dispatch(EditorCommand::OpenPicker { index: 0 });
        editor.dispatch(EditorCommand::ClosePicker);

        serve(&mut editor, request);
        assert!(editor.picker().is_none());
    }

    #[test]
    fn test_discount_commands() {
        let mut editor = PromoEditor::new(10);
        open(&mut editor, 0);
        editor.dispatch(EditorCommand::ToggleProduct(77));
        editor.dispatch(EditorCommand::ConfirmPicker);
        let line = LineId::Product(77);

        editor.dispatch(EditorCommand::ShowDiscount(line));
        editor.dispatch(EditorCommand::UpdateDiscount {
            line,
            field: DiscountField::Value,
            value: "15".into(),
        });
        editor.dispatch(EditorCommand::UpdateDiscount {
            line,
            field: DiscountField::Value,
            value: "abc".into(),
        });
        editor.dispatch(EditorCommand::UpdateVariantDiscount {
            line,
            variant_index: 2,
            field: DiscountField::Type,
            value: "flat".into(),
        });

        let product_line = editor.list().line(&line).unwrap();
        assert!(product_line.show_discount);
        assert_eq!(product_line.discount.value, "15");
        assert_eq!(product_line.variants[2].discount.kind, DiscountType::Flat);
    }

    #[test]
    fn test_drop_reorders_lines() {
        let mut editor = PromoEditor::new(10);
        open(&mut editor, 0);
        editor.dispatch(EditorCommand::ToggleProduct(77));
        editor.dispatch(EditorCommand::ToggleProduct(80));
        editor.dispatch(EditorCommand::ConfirmPicker);

        editor.dispatch(EditorCommand::Drop(DropResult {
            kind: DragKind::Product,
            source: DropLocation::new(PRODUCTS_CONTAINER, 1),
            destination: Some(DropLocation::new(PRODUCTS_CONTAINER, 0)),
        }));

        assert_eq!(editor.list().lines()[0].id, LineId::Product(80));
    }

    #[test]
    fn test_remove_commands_respect_guards() {
        let mut editor = PromoEditor::new(10);
        let only = editor.list().lines()[0].id;
        editor.dispatch(EditorCommand::RemoveLine(only));
        assert_eq!(editor.list().len(), 1);

        editor.dispatch(EditorCommand::AppendPlaceholder);
        editor.dispatch(EditorCommand::RemoveLine(only));
        assert_eq!(editor.list().len(), 1);
        assert_ne!(editor.list().lines()[0].id, only);
    }
}
