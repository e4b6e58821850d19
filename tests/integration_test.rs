//! Integration tests for promolist
//!
//! These tests drive the editor the way the terminal frontend does: every
//! change is a dispatched command, and catalog requests are answered from
//! the in-memory demo catalog.

use promolist::catalog::{Catalog, MockCatalog, Product, ProductId};
use promolist::editor::{EditorCommand, PromoEditor};
use promolist::list::{DiscountField, DiscountType, LineId};
use promolist::picker::{PageLoaded, SearchRequest, run_search};
use promolist::reorder::{DragKind, DropLocation, DropResult, PRODUCTS_CONTAINER, variants_container};
use std::sync::Arc;

/// Answer `request` from `catalog` and feed the result back
fn serve(editor: &mut PromoEditor, catalog: &MockCatalog, request: Option<SearchRequest>) {
    if let Some(request) = request {
        let result = catalog.page(&request.query, request.page, request.limit);
        editor.dispatch(EditorCommand::PageLoaded(PageLoaded { request, result }));
    }
}

fn candidate_ids(editor: &PromoEditor) -> Vec<ProductId> {
    editor
        .picker()
        .map(|p| p.candidates().iter().map(|c| c.id).collect())
        .unwrap_or_default()
}

fn line_ids(editor: &PromoEditor) -> Vec<LineId> {
    editor.list().lines().iter().map(|l| l.id).collect()
}

/// Fill the line at `index` with product `id`, fully selected
fn add_product(editor: &mut PromoEditor, catalog: &MockCatalog, index: usize, id: ProductId) {
    let request = editor.dispatch(EditorCommand::OpenPicker { index });
    serve(editor, catalog, request);
    editor.dispatch(EditorCommand::ToggleProduct(id));
    editor.dispatch(EditorCommand::ConfirmPicker);
}

fn demo_subset(ids: &[ProductId]) -> MockCatalog {
    let products: Vec<Product> = MockCatalog::demo()
        .products()
        .iter()
        .filter(|p| ids.contains(&p.id))
        .cloned()
        .collect();
    MockCatalog::new(products)
}

#[test]
fn test_listed_product_is_excluded_from_picker() {
    let catalog = demo_subset(&[77, 80, 81]);
    let mut editor = PromoEditor::new(10);
    add_product(&mut editor, &catalog, 0, 77);
    assert_eq!(line_ids(&editor), vec![LineId::Product(77)]);

    editor.dispatch(EditorCommand::AppendPlaceholder);
    let request = editor.dispatch(EditorCommand::OpenPicker { index: 1 });
    serve(&mut editor, &catalog, request);

    assert_eq!(candidate_ids(&editor), vec![80, 81]);
}

#[test]
fn test_deselected_variant_is_left_out() {
    let catalog = MockCatalog::demo();
    let mut editor = PromoEditor::new(10);

    let request = editor.dispatch(EditorCommand::OpenPicker { index: 0 });
    serve(&mut editor, &catalog, request);
    editor.dispatch(EditorCommand::ToggleProduct(81));
    editor.dispatch(EditorCommand::ToggleVariant {
        product_id: 81,
        variant_id: 68,
    });
    editor.dispatch(EditorCommand::ConfirmPicker);

    let line = &editor.list().lines()[0];
    assert_eq!(line.id, LineId::Product(81));
    let variants: Vec<u64> = line.variants.iter().map(|v| v.id).collect();
    assert_eq!(variants, vec![65, 66, 67, 69]);
}

#[test]
fn test_multi_select_replaces_placeholder_in_catalog_order() {
    let catalog = MockCatalog::demo();
    let mut editor = PromoEditor::new(10);
    editor.dispatch(EditorCommand::AppendPlaceholder);
    let trailing = line_ids(&editor)[1];

    let request = editor.dispatch(EditorCommand::OpenPicker { index: 0 });
    serve(&mut editor, &catalog, request);
    editor.dispatch(EditorCommand::ToggleProduct(82));
    editor.dispatch(EditorCommand::ToggleProduct(77));
    editor.dispatch(EditorCommand::ConfirmPicker);

    assert_eq!(
        line_ids(&editor),
        vec![LineId::Product(77), LineId::Product(82), trailing]
    );
}

#[test]
fn test_cancelled_picker_leaves_list_alone() {
    let catalog = MockCatalog::demo();
    let mut editor = PromoEditor::new(10);
    let before = editor.list().clone();

    let request = editor.dispatch(EditorCommand::OpenPicker { index: 0 });
    serve(&mut editor, &catalog, request);
    editor.dispatch(EditorCommand::ToggleProduct(80));
    editor.dispatch(EditorCommand::ClosePicker);

    assert!(editor.picker().is_none());
    assert_eq!(editor.list(), &before);
}

#[test]
fn test_paging_and_stale_search() {
    let catalog = MockCatalog::demo();
    let mut editor = PromoEditor::new(5);

    let first = editor.dispatch(EditorCommand::OpenPicker { index: 0 });
    serve(&mut editor, &catalog, first);
    assert_eq!(candidate_ids(&editor).len(), 5);

    let more = editor.dispatch(EditorCommand::LoadMore);
    assert!(editor.dispatch(EditorCommand::LoadMore).is_none());
    serve(&mut editor, &catalog, more);
    assert_eq!(candidate_ids(&editor).len(), 10);

    let slow = editor.dispatch(EditorCommand::Search("t".to_string()));
    let fast = editor.dispatch(EditorCommand::Search("towel".to_string()));
    serve(&mut editor, &catalog, fast);
    serve(&mut editor, &catalog, slow);

    assert_eq!(candidate_ids(&editor), vec![77]);
}

#[test]
fn test_discount_validation() {
    let catalog = MockCatalog::demo();
    let mut editor = PromoEditor::new(10);
    add_product(&mut editor, &catalog, 0, 77);
    let line = LineId::Product(77);

    editor.dispatch(EditorCommand::ShowDiscount(line));
    let set = |value: &str| EditorCommand::UpdateDiscount {
        line,
        field: DiscountField::Value,
        value: value.to_string(),
    };
    editor.dispatch(set("12.5"));
    editor.dispatch(set("-5"));
    editor.dispatch(set("abc"));
    editor.dispatch(EditorCommand::UpdateDiscount {
        line,
        field: DiscountField::Type,
        value: "flat".to_string(),
    });

    let discount = &editor.list().lines()[0].discount;
    assert_eq!(discount.value, "12.5");
    assert_eq!(discount.kind, DiscountType::Flat);

    editor.dispatch(EditorCommand::UpdateVariantDiscount {
        line,
        variant_index: 1,
        field: DiscountField::Value,
        value: "3".to_string(),
    });
    let variants = &editor.list().lines()[0].variants;
    assert_eq!(variants[1].discount.value, "3");
    assert!(variants[0].discount.value.is_empty());
}

#[test]
fn test_reorder_lines_and_variants() {
    let catalog = MockCatalog::demo();
    let mut editor = PromoEditor::new(10);
    add_product(&mut editor, &catalog, 0, 77);
    for (index, id) in [(1, 80), (2, 81), (3, 82)] {
        editor.dispatch(EditorCommand::AppendPlaceholder);
        add_product(&mut editor, &catalog, index, id);
    }

    editor.dispatch(EditorCommand::Drop(DropResult {
        kind: DragKind::Product,
        source: DropLocation::new(PRODUCTS_CONTAINER, 0),
        destination: Some(DropLocation::new(PRODUCTS_CONTAINER, 2)),
    }));
    assert_eq!(
        line_ids(&editor),
        [80, 81, 77, 82].map(LineId::Product).to_vec()
    );

    let container = variants_container(&LineId::Product(81));
    editor.dispatch(EditorCommand::Drop(DropResult {
        kind: DragKind::Variant,
        source: DropLocation::new(container.clone(), 4),
        destination: Some(DropLocation::new(container.clone(), 0)),
    }));
    // a variant dropped on the product list is refused
    editor.dispatch(EditorCommand::Drop(DropResult {
        kind: DragKind::Variant,
        source: DropLocation::new(container, 0),
        destination: Some(DropLocation::new(PRODUCTS_CONTAINER, 0)),
    }));

    let socks = editor.list().line(&LineId::Product(81)).unwrap();
    let ids: Vec<u64> = socks.variants.iter().map(|v| v.id).collect();
    assert_eq!(ids, vec![69, 65, 66, 67, 68]);
    assert_eq!(editor.list().len(), 4);
}

#[test]
fn test_guarded_removals() {
    let catalog = MockCatalog::demo();
    let mut editor = PromoEditor::new(10);
    add_product(&mut editor, &catalog, 0, 80);
    let line = LineId::Product(80);

    editor.dispatch(EditorCommand::RemoveVariant { line, index: 0 });
    editor.dispatch(EditorCommand::RemoveLine(line));

    let lines = editor.list().lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].variants.len(), 1);
}

#[tokio::test]
async fn test_fetch_through_shared_catalog() {
    let catalog: Arc<dyn Catalog> = Arc::new(MockCatalog::demo());
    let mut editor = PromoEditor::new(10);

    let request = editor
        .dispatch(EditorCommand::OpenPicker { index: 0 })
        .unwrap();
    let task_catalog = Arc::clone(&catalog);
    let loaded = tokio::spawn(async move { run_search(task_catalog.as_ref(), request).await })
        .await
        .unwrap();
    editor.dispatch(EditorCommand::PageLoaded(loaded));

    assert_eq!(candidate_ids(&editor).len(), 10);
}

#[test]
fn test_final_list_serializes() {
    let catalog = MockCatalog::demo();
    let mut editor = PromoEditor::new(10);
    add_product(&mut editor, &catalog, 0, 82);

    let json = serde_json::to_value(editor.list().lines()).unwrap();
    assert_eq!(json[0]["id"], "82");
    assert_eq!(json[0]["discount"]["type"], "percent");
    assert!(json[0].get("show_variants").is_none());
}
