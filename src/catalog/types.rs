//! Wire types returned by the catalog search endpoint

use serde::{Deserialize, Serialize};

/// Catalog product identifier
pub type ProductId = u64;

/// Catalog variant identifier
pub type VariantId = u64;

/// A product record as returned by the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    #[serde(default)]
    pub image: Option<ProductImage>,
    /// Variants in catalog order
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// Product image reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    #[serde(default)]
    pub src: Option<String>,
}

/// A purchasable variant of a product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub title: String,
    /// Decimal price string, kept verbatim
    pub price: String,
    #[serde(default)]
    pub inventory_quantity: Option<i64>,
}

impl Product {
    /// Image URL, if the catalog supplied one
    #[must_use]
    pub fn image_src(&self) -> Option<&str> {
        self.image.as_ref().and_then(|image| image.src.as_deref())
    }

    /// Look up one of this product's variants
    #[must_use]
    pub fn variant(&self, id: VariantId) -> Option<&Variant> {
        self.variants.iter().find(|v| v.id == id)
    }
}

/// Decode a search response body.
///
/// The service answers `null` instead of `[]` when nothing matches.
///
/// # Errors
///
/// Returns `serde_json::Error` if the body is neither `null` nor a product array.
pub fn decode_page(body: &str) -> Result<Vec<Product>, serde_json::Error> {
    let page: Option<Vec<Product>> = serde_json::from_str(body)?;
    Ok(page.unwrap_or_default())
}
