//! Picker selection model
//!
//! Tracks which products and variants are checked during one picker session.
//! State is two flat maps:
//!
//! - `selected_products`: product id → product record
//! - `selected_variants`: variant id → (variant record, owning product id)
//!
//! A product id is in `selected_products` exactly when at least one of its
//! variants is in `selected_variants`. Every mutation keeps this true.
//! Checked/partial/unchecked is derived from the two maps on demand and never
//! stored.

use crate::catalog::{Product, ProductId, Variant, VariantId};
use std::collections::HashMap;

/// Display state of a product checkbox
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    /// Every variant is selected
    Checked,
    /// Some but not all variants are selected
    Partial,
    /// No variant is selected
    Unchecked,
}

/// A selected variant and the product it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedVariant {
    pub variant: Variant,
    pub product_id: ProductId,
}

/// One product of a finalized selection, restricted to its chosen variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalizedProduct {
    pub product: Product,
    /// Selected variants in catalog order
    pub variants: Vec<Variant>,
}

/// Selection state for one picker session
#[derive(Debug, Clone, Default)]
pub struct SelectionModel {
    selected_products: HashMap<ProductId, Product>,
    selected_variants: HashMap<VariantId, SelectedVariant>,
    /// First-seen catalog position of every product, used to order `finalize`
    fetch_rank: HashMap<ProductId, usize>,
}

impl SelectionModel {
    /// Create an empty selection
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Note the catalog order of freshly fetched products
    ///
    /// Products already seen keep their original position.
    pub fn record_fetched<'a>(&mut self, products: impl IntoIterator<Item = &'a Product>) {
        for product in products {
            let next = self.fetch_rank.len();
            self.fetch_rank.entry(product.id).or_insert(next);
        }
    }

    /// Flip a whole product between all-selected and none-selected
    ///
    /// A checked or partial product is cleared along with every one of its
    /// variants. An unchecked product is selected with all of its variants.
    /// Products without variants cannot be selected.
    pub fn toggle_product(&mut self, product: &Product) {
        if self.is_product_selected(product.id) {
            self.selected_products.remove(&product.id);
            for variant in &product.variants {
                self.selected_variants.remove(&variant.id);
            }
            return;
        }

        if product.variants.is_empty() {
            return;
        }

        self.selected_products.insert(product.id, product.clone());
        for variant in &product.variants {
            self.selected_variants.insert(
                variant.id,
                SelectedVariant {
                    variant: variant.clone(),
                    product_id: product.id,
                },
            );
        }
    }

    /// Flip a single variant, selecting or dropping its product as needed
    pub fn toggle_variant(&mut self, product: &Product, variant: &Variant) {
        if self.selected_variants.remove(&variant.id).is_some() {
            let still_selected = self
                .selected_variants
                .values()
                .any(|v| v.product_id == product.id);
            if !still_selected {
                self.selected_products.remove(&product.id);
            }
            return;
        }

        self.selected_variants.insert(
            variant.id,
            SelectedVariant {
                variant: variant.clone(),
                product_id: product.id,
            },
        );
        self.selected_products
            .entry(product.id)
            .or_insert_with(|| product.clone());
    }

    /// Whether the product is checked or partial
    #[must_use]
    pub fn is_product_selected(&self, product_id: ProductId) -> bool {
        self.selected_products.contains_key(&product_id)
    }

    /// Whether the variant is checked
    #[must_use]
    pub fn is_variant_selected(&self, variant_id: VariantId) -> bool {
        self.selected_variants.contains_key(&variant_id)
    }

    /// Whether some but not all of the product's variants are checked
    #[must_use]
    pub fn is_product_partial(&self, product: &Product) -> bool {
        self.check_state(product) == CheckState::Partial
    }

    /// Derived checkbox state for `product`
    #[must_use]
    pub fn check_state(&self, product: &Product) -> CheckState {
        let selected = product
            .variants
            .iter()
            .filter(|v| self.is_variant_selected(v.id))
            .count();

        match selected {
            0 => CheckState::Unchecked,
            n if n == product.variants.len() => CheckState::Checked,
            _ => CheckState::Partial,
        }
    }

    /// Number of products with at least one selected variant
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected_products.len()
    }

    /// Number of selected variants across all products
    #[must_use]
    pub fn selected_variant_count(&self) -> usize {
        self.selected_variants.len()
    }

    /// Whether nothing is selected
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected_products.is_empty()
    }

    /// Whether the product/variant equivalence holds
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let owners_selected = self
            .selected_variants
            .values()
            .all(|v| self.selected_products.contains_key(&v.product_id));
        let products_backed = self.selected_products.keys().all(|id| {
            self.selected_variants
                .values()
                .any(|v| v.product_id == *id)
        });
        owners_selected && products_backed
    }

    /// Convert the selection into products restricted to their chosen variants
    ///
    /// Products come out in catalog fetch order; products never seen in a
    /// fetch sort last by id. Variants keep the order of the product record.
    #[must_use]
    pub fn finalize(&self) -> Vec<FinalizedProduct> {
        let mut products: Vec<&Product> = self.selected_products.values().collect();
        products.sort_by_key(|p| (self.fetch_rank.get(&p.id).copied().unwrap_or(usize::MAX), p.id));

        products
            .into_iter()
            .filter_map(|product| {
                let variants: Vec<Variant> = product
                    .variants
                    .iter()
                    .filter(|v| self.is_variant_selected(v.id))
                    .cloned()
                    .collect();

                (!variants.is_empty()).then(|| FinalizedProduct {
                    product: product.clone(),
                    variants,
                })
            })
            .collect()
    }
}
