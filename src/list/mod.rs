//! Promotion list model
//!
//! The ordered sequence of lines shown in the main view. Each line carries
//! its own discount and, for chosen products, an ordered list of variant
//! rows with independent discounts.
//!
//! Guarded operations (removing the last line, removing a line's last
//! variant, invalid discount input) are silent no-ops that report `false`.

mod discount;
mod models;

pub use discount::{Discount, DiscountField, DiscountType, is_valid_amount};
pub use models::{LineId, ProductLine, VariantLine};

use crate::catalog::ProductId;
use crate::selection::FinalizedProduct;
use std::collections::HashSet;

/// The list of lines in a promotion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListModel {
    lines: Vec<ProductLine>,
    next_placeholder: u64,
}

impl Default for ListModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ListModel {
    /// A list holding one placeholder line
    #[must_use]
    pub fn new() -> Self {
        Self {
            lines: vec![ProductLine::placeholder(1)],
            next_placeholder: 2,
        }
    }

    /// Build a list from existing lines
    ///
    /// An empty input yields a single placeholder.
    #[must_use]
    pub fn from_lines(lines: Vec<ProductLine>) -> Self {
        if lines.is_empty() {
            return Self::new();
        }
        let next_placeholder = lines
            .iter()
            .filter_map(|l| match l.id {
                LineId::Placeholder(n) => Some(n),
                LineId::Product(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;
        Self {
            lines,
            next_placeholder,
        }
    }

    /// All lines in display order
    #[must_use]
    pub fn lines(&self) -> &[ProductLine] {
        &self.lines
    }

    /// Number of lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Always false; a list keeps at least one line
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Find a line by id
    #[must_use]
    pub fn line(&self, id: &LineId) -> Option<&ProductLine> {
        self.lines.iter().find(|l| l.id == *id)
    }

    /// Index of a line by id
    #[must_use]
    pub fn position(&self, id: &LineId) -> Option<usize> {
        self.lines.iter().position(|l| l.id == *id)
    }

    pub(crate) fn line_mut(&mut self, id: &LineId) -> Option<&mut ProductLine> {
        self.lines.iter_mut().find(|l| l.id == *id)
    }

    pub(crate) fn lines_mut(&mut self) -> &mut Vec<ProductLine> {
        &mut self.lines
    }

    /// Product ids already on the list, for excluding them from the picker
    #[must_use]
    pub fn listed_product_ids(&self) -> HashSet<ProductId> {
        self.lines.iter().filter_map(ProductLine::product_id).collect()
    }

    /// Replace the line at `index` with the products chosen in the picker
    ///
    /// An empty selection leaves the list untouched, as does an index past
    /// the end.
    pub fn replace_at(&mut self, index: usize, selected: Vec<FinalizedProduct>) -> bool {
        if selected.is_empty() || index >= self.lines.len() {
            return false;
        }

        let new_lines: Vec<ProductLine> = selected.into_iter().map(ProductLine::from).collect();
        self.lines.splice(index..=index, new_lines);
        true
    }

    /// Edit a line's discount
    pub fn update_discount(&mut self, id: &LineId, field: DiscountField, value: &str) -> bool {
        self.line_mut(id)
            .is_some_and(|line| line.discount.set(field, value))
    }

    /// Edit the discount of one variant row
    pub fn update_variant_discount(
        &mut self,
        id: &LineId,
        variant_index: usize,
        field: DiscountField,
        value: &str,
    ) -> bool {
        self.line_mut(id)
            .and_then(|line| line.variants.get_mut(variant_index))
            .is_some_and(|variant| variant.discount.set(field, value))
    }

    /// Start a fresh discount on a line and reveal its editor
    pub fn show_discount(&mut self, id: &LineId) -> bool {
        let Some(line) = self.line_mut(id) else {
            return false;
        };
        line.discount = Discount::default();
        line.show_discount = true;
        true
    }

    /// Expand or collapse a line's variant rows
    ///
    /// Lines with a single variant have nothing to expand.
    pub fn toggle_variants(&mut self, id: &LineId) -> bool {
        match self.line_mut(id) {
            Some(line) if line.has_multiple_variants() => {
                line.show_variants = !line.show_variants;
                true
            }
            _ => false,
        }
    }

    /// Remove a line unless it is the only one
    pub fn remove_line(&mut self, id: &LineId) -> bool {
        if self.lines.len() <= 1 {
            return false;
        }
        let Some(index) = self.position(id) else {
            return false;
        };
        self.lines.remove(index);
        true
    }

    /// Remove a variant row unless it is the line's only one
    pub fn remove_variant(&mut self, id: &LineId, variant_index: usize) -> bool {
        match self.line_mut(id) {
            Some(line) if line.variants.len() > 1 && variant_index < line.variants.len() => {
                line.variants.remove(variant_index);
                true
            }
            _ => false,
        }
    }

    /// Append an empty line and return its id
    pub fn append_placeholder(&mut self) -> LineId {
        let line = ProductLine::placeholder(self.next_placeholder);
        self.next_placeholder += 1;
        let id = line.id;
        self.lines.push(line);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{finalized, sample_products};

    fn list_with_products() -> ListModel {
        let products = sample_products();
        let mut list = ListModel::new();
        list.replace_at(
            0,
            vec![finalized(&products[0], &[1, 2, 3]), finalized(&products[1], &[64])],
        );
        list
    }

    fn ids(list: &ListModel) -> Vec<String> {
        list.lines().iter().map(|l| l.id.to_string()).collect()
    }

    #[test]
    fn test_new_list_has_one_placeholder() {
        let list = ListModel::new();
        assert_eq!(list.len(), 1);
        assert!(list.lines()[0].is_placeholder());
        assert!(list.listed_product_ids().is_empty());
    }

    #[test]
    fn test_replace_at_splices_in_place() {
        let products = sample_products();
        let mut list = ListModel::new();
        let second = list.append_placeholder();
        let third = list.append_placeholder();

        assert!(list.replace_at(1, vec![finalized(&products[2], &[65, 66])]));

        assert_eq!(ids(&list), vec!["empty-1".to_string(), "81".to_string(), third.to_string()]);
        assert!(list.line(&second).is_none());
    }

    #[test]
    fn test_replace_at_multiple_products_keeps_selection_order() {
        let list = list_with_products();
        assert_eq!(ids(&list), vec!["77".to_string(), "80".to_string()]);
        assert_eq!(list.listed_product_ids(), [77, 80].into_iter().collect());
    }

    #[test]
    fn test_replace_at_empty_selection_is_noop() {
        let mut list = ListModel::new();
        let before = list.clone();
        assert!(!list.replace_at(0, Vec::new()));
        assert_eq!(list, before);
    }

    #[test]
    fn test_replace_at_out_of_range() {
        let products = sample_products();
        let mut list = ListModel::new();
        assert!(!list.replace_at(4, vec![finalized(&products[0], &[1])]));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_update_discount_validation() {
        let mut list = list_with_products();
        let id = LineId::Product(77);

        assert!(list.update_discount(&id, DiscountField::Value, "12.5"));
        assert!(!list.update_discount(&id, DiscountField::Value, "-5"));
        assert_eq!(list.line(&id).unwrap().discount.value, "12.5");

        assert!(list.update_discount(&id, DiscountField::Type, "flat"));
        assert_eq!(list.line(&id).unwrap().discount.kind, DiscountType::Flat);
    }

    #[test]
    fn test_update_discount_unknown_line() {
        let mut list = list_with_products();
        assert!(!list.update_discount(&LineId::Product(999), DiscountField::Value, "1"));
    }

    #[test]
    fn test_update_variant_discount_is_independent() {
        let mut list = list_with_products();
        let id = LineId::Product(77);

        assert!(list.update_variant_discount(&id, 1, DiscountField::Value, "4"));
        assert!(!list.update_variant_discount(&id, 7, DiscountField::Value, "4"));

        let line = list.line(&id).unwrap();
        assert_eq!(line.variants[1].discount.value, "4");
        assert_eq!(line.variants[0].discount.value, "");
        assert_eq!(line.discount.value, "");
    }

    #[test]
    fn test_show_discount_resets_fields() {
        let mut list = list_with_products();
        let id = LineId::Product(77);
        list.update_discount(&id, DiscountField::Value, "9");
        list.update_discount(&id, DiscountField::Type, "flat");

        assert!(list.show_discount(&id));

        let line = list.line(&id).unwrap();
        assert!(line.show_discount);
        assert_eq!(line.discount, Discount::default());
    }

    #[test]
    fn test_remove_last_line_is_noop() {
        let mut list = ListModel::new();
        let only = list.lines()[0].id;
        assert!(!list.remove_line(&only));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_remove_line_preserves_order() {
        let mut list = list_with_products();
        list.append_placeholder();

        assert!(list.remove_line(&LineId::Product(80)));
        assert_eq!(ids(&list), vec!["77".to_string(), "empty-2".to_string()]);
    }

    #[test]
    fn test_remove_only_variant_is_noop() {
        let mut list = list_with_products();
        let id = LineId::Product(80);

        assert!(!list.remove_variant(&id, 0));
        let line = list.line(&id).unwrap();
        assert_eq!(line.variants.len(), 1);
        assert_eq!(line.variants[0].id, 64);
    }

    #[test]
    fn test_remove_variant_preserves_order() {
        let mut list = list_with_products();
        let id = LineId::Product(77);

        assert!(list.remove_variant(&id, 1));
        let remaining: Vec<u64> = list.line(&id).unwrap().variants.iter().map(|v| v.id).collect();
        assert_eq!(remaining, vec![1, 3]);
    }

    #[test]
    fn test_toggle_variants_requires_multiple() {
        let mut list = list_with_products();

        assert!(list.toggle_variants(&LineId::Product(77)));
        assert!(list.line(&LineId::Product(77)).unwrap().show_variants);
        assert!(!list.toggle_variants(&LineId::Product(80)));
        assert!(list.toggle_variants(&LineId::Product(77)));
        assert!(!list.line(&LineId::Product(77)).unwrap().show_variants);
    }

    #[test]
    fn test_append_placeholder_ids_are_unique() {
        let mut list = ListModel::new();
        let a = list.append_placeholder();
        let b = list.append_placeholder();
        assert_ne!(a, b);
        assert_eq!(list.len(), 3);

        list.remove_line(&b);
        let c = list.append_placeholder();
        assert_ne!(b, c);
    }

    #[test]
    fn test_from_lines_continues_placeholder_counter() {
        let mut list = ListModel::from_lines(vec![ProductLine::placeholder(7)]);
        assert_eq!(list.append_placeholder(), LineId::Placeholder(8));
        assert_eq!(ListModel::from_lines(Vec::new()).len(), 1);
    }
}
