//! Testing utilities for promolist
//!
//! Fixture products drawn from the demo catalog plus small builders for
//! hand-made products and finalized selections.
//!
//! Only available when compiled with `cfg(test)`.

use crate::catalog::{MockCatalog, Product, ProductId, Variant, VariantId};
use crate::selection::FinalizedProduct;

/// The first four demo products: 77 (3 variants), 80 (1), 81 (5), 82 (1)
#[must_use]
pub fn sample_products() -> Vec<Product> {
    MockCatalog::demo().products()[..4].to_vec()
}

/// Build a product with one generated variant per id
#[must_use]
pub fn product(id: ProductId, title: &str, variant_ids: &[VariantId]) -> Product {
    Product {
        id,
        title: title.to_string(),
        image: None,
        variants: variant_ids
            .iter()
            .map(|&vid| Variant {
                id: vid,
                product_id: Some(id),
                title: format!("Variant {vid}"),
                price: "1.00".to_string(),
                inventory_quantity: Some(10),
            })
            .collect(),
    }
}

/// A finalized selection of `product` restricted to `variant_ids`
///
/// # Panics
/// Panics if a variant id does not belong to the product.
#[must_use]
pub fn finalized(product: &Product, variant_ids: &[VariantId]) -> FinalizedProduct {
    let variants = variant_ids
        .iter()
        .map(|id| {
            product
                .variant(*id)
                .cloned()
                .unwrap_or_else(|| panic!("variant {id} not in product {}", product.id))
        })
        .collect();

    FinalizedProduct {
        product: product.clone(),
        variants,
    }
}
