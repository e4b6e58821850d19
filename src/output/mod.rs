//! Output formatting for CLI display
//!
//! Renders catalog search results for the terminal: one line per product
//! followed by its indented variants.

use crate::catalog::{Product, Variant};
use colored::Colorize;

/// Format a variant row
#[must_use]
pub fn variant_line(variant: &Variant) -> String {
    let stock = variant
        .inventory_quantity
        .map_or_else(|| "n/a".to_string(), |q| q.to_string());
    format!(
        "    {} {}  ${}  (stock {stock})",
        format!("#{}", variant.id).dimmed(),
        variant.title,
        variant.price
    )
}

/// Format a product header
///
/// In quiet mode only `<id>\t<title>` is printed.
#[must_use]
pub fn product_line(product: &Product, quiet: bool) -> String {
    if quiet {
        return format!("{}\t{}", product.id, product.title);
    }
    let count = product.variants.len();
    let noun = if count == 1 { "variant" } else { "variants" };
    format!(
        "{} {}  {}",
        format!("[{}]", product.id).cyan(),
        product.title.bold(),
        format!("{count} {noun}").dimmed()
    )
}

/// Format a whole page of results
#[must_use]
pub fn product_page(products: &[Product], quiet: bool) -> Vec<String> {
    let mut lines = Vec::new();
    for product in products {
        lines.push(product_line(product, quiet));
        if !quiet {
            lines.extend(product.variants.iter().map(variant_line));
        }
    }
    lines
}

/// Summary printed after a page
#[must_use]
pub fn page_summary(shown: usize, page: u32, has_more: bool) -> String {
    let more = if has_more {
        format!(" (more on page {})", page + 1)
    } else {
        String::new()
    };
    format!("{shown} product(s) on page {page}{more}")
}
