//! Line types for the promotion list

use super::discount::Discount;
use crate::catalog::{Product, ProductId, Variant, VariantId};
use crate::selection::FinalizedProduct;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const PLACEHOLDER_PREFIX: &str = "empty-";

/// Identity of a line in the list
///
/// Placeholder ids live in their own namespace so they can never collide
/// with catalog product ids.
/// Serialized as its display form: `"77"` or `"empty-1"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum LineId {
    /// A chosen catalog product
    Product(ProductId),
    /// An empty line awaiting a product
    Placeholder(u64),
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Product(id) => write!(f, "{id}"),
            Self::Placeholder(n) => write!(f, "{PLACEHOLDER_PREFIX}{n}"),
        }
    }
}

impl FromStr for LineId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(n) = s.strip_prefix(PLACEHOLDER_PREFIX) {
            return n
                .parse()
                .map(Self::Placeholder)
                .map_err(|_| format!("invalid placeholder id '{s}'"));
        }
        s.parse()
            .map(Self::Product)
            .map_err(|_| format!("invalid line id '{s}'"))
    }
}

impl From<LineId> for String {
    fn from(id: LineId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for LineId {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// One variant row under a product line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantLine {
    pub id: VariantId,
    pub title: String,
    pub price: String,
    pub inventory_quantity: Option<i64>,
    pub discount: Discount,
}

impl From<Variant> for VariantLine {
    fn from(variant: Variant) -> Self {
        Self {
            id: variant.id,
            title: variant.title,
            price: variant.price,
            inventory_quantity: variant.inventory_quantity,
            discount: Discount::default(),
        }
    }
}

/// A top-level entry of the promotion list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLine {
    pub id: LineId,
    pub title: String,
    pub image_src: Option<String>,
    pub discount: Discount,
    /// Variant rows; order is user-controlled
    pub variants: Vec<VariantLine>,
    /// Whether variant rows are expanded (view state)
    #[serde(skip)]
    pub show_variants: bool,
    /// Whether the discount editor is shown (view state)
    #[serde(skip)]
    pub show_discount: bool,
}

impl ProductLine {
    /// A new empty line
    #[must_use]
    pub fn placeholder(n: u64) -> Self {
        Self {
            id: LineId::Placeholder(n),
            title: String::new(),
            image_src: None,
            discount: Discount::default(),
            variants: Vec::new(),
            show_variants: false,
            show_discount: false,
        }
    }

    /// Whether this line still awaits a product
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self.id, LineId::Placeholder(_))
    }

    /// Whether the line has enough variants to list them separately
    #[must_use]
    pub fn has_multiple_variants(&self) -> bool {
        self.variants.len() > 1
    }

    /// Title for display, with a prompt for placeholders
    #[must_use]
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Select Product"
        } else {
            &self.title
        }
    }

    /// Catalog product id, if any
    #[must_use]
    pub const fn product_id(&self) -> Option<ProductId> {
        match self.id {
            LineId::Product(id) => Some(id),
            LineId::Placeholder(_) => None,
        }
    }
}

impl From<FinalizedProduct> for ProductLine {
    fn from(selected: FinalizedProduct) -> Self {
        let FinalizedProduct { product, variants } = selected;
        let image_src = product.image_src().map(str::to_string);
        let Product { id, title, .. } = product;

        Self {
            id: LineId::Product(id),
            title,
            image_src,
            discount: Discount::default(),
            variants: variants.into_iter().map(VariantLine::from).collect(),
            show_variants: false,
            show_discount: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::list::DiscountType;
    use crate::testing::sample_products;

    #[test]
    fn test_line_id_display_and_parse() {
        assert_eq!(LineId::Product(77).to_string(), "77");
        assert_eq!(LineId::Placeholder(3).to_string(), "empty-3");
        assert_eq!("77".parse::<LineId>(), Ok(LineId::Product(77)));
        assert_eq!("empty-3".parse::<LineId>(), Ok(LineId::Placeholder(3)));
        assert!("empty-x".parse::<LineId>().is_err());
        assert!("products".parse::<LineId>().is_err());
    }

    #[test]
    fn test_line_id_serializes_as_string() {
        let json = serde_json::to_string(&[LineId::Product(80), LineId::Placeholder(2)]).unwrap();
        assert_eq!(json, r#"["80","empty-2"]"#);

        let back: Vec<LineId> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![LineId::Product(80), LineId::Placeholder(2)]);
        assert!(serde_json::from_str::<LineId>(r#""nope""#).is_err());
    }

    #[test]
    fn test_placeholder_line() {
        let line = ProductLine::placeholder(1);
        assert!(line.is_placeholder());
        assert!(line.variants.is_empty());
        assert_eq!(line.display_title(), "Select Product");
        assert!(!line.show_variants);
        assert_eq!(line.product_id(), None);
    }

    #[test]
    fn test_line_from_finalized_product() {
        let products = sample_products();
        let towel = products[0].clone();
        let variants = vec![towel.variants[0].clone(), towel.variants[2].clone()];

        let line = ProductLine::from(FinalizedProduct {
            product: towel,
            variants,
        });

        assert_eq!(line.id, LineId::Product(77));
        assert!(!line.is_placeholder());
        assert_eq!(line.variants.len(), 2);
        assert_eq!(line.variants[1].id, 3);
        assert_eq!(line.discount.value, "");
        assert_eq!(line.discount.kind, DiscountType::Percent);
        assert!(line.variants.iter().all(|v| !v.discount.is_applied()));
        assert!(line.image_src.is_some());
    }
}
