//! Discount values attached to product and variant lines

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a discount value is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    /// Percentage off
    #[default]
    Percent,
    /// Fixed amount off
    Flat,
}

impl DiscountType {
    /// The other discount type
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Percent => Self::Flat,
            Self::Flat => Self::Percent,
        }
    }

    /// Short label for display
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Percent => "% Off",
            Self::Flat => "flat off",
        }
    }
}

impl fmt::Display for DiscountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percent => write!(f, "percent"),
            Self::Flat => write!(f, "flat"),
        }
    }
}

impl FromStr for DiscountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "percent" => Ok(Self::Percent),
            "flat" => Ok(Self::Flat),
            other => Err(format!("unknown discount type '{other}'")),
        }
    }
}

/// Which discount field an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscountField {
    /// The numeric amount (`discountValue`)
    Value,
    /// The interpretation (`discountType`)
    Type,
}

/// Discount on a line
///
/// An empty `value` means no discount applies, whatever `kind` says.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Discount {
    pub value: String,
    #[serde(rename = "type")]
    pub kind: DiscountType,
}

impl Discount {
    /// Whether a non-empty amount is set
    #[must_use]
    pub fn is_applied(&self) -> bool {
        !self.value.is_empty()
    }

    /// Assign one field from raw user input
    ///
    /// Values must be empty or a finite, non-negative number; types must be
    /// `percent` or `flat`. Anything else is ignored and the previous value
    /// kept. Returns whether the input was applied.
    pub fn set(&mut self, field: DiscountField, value: &str) -> bool {
        match field {
            DiscountField::Value => {
                if !is_valid_amount(value) {
                    return false;
                }
                self.value = value.to_string();
                true
            }
            DiscountField::Type => match value.parse::<DiscountType>() {
                Ok(kind) => {
                    self.kind = kind;
                    true
                }
                Err(_) => false,
            },
        }
    }
}

/// Empty, or parses as a finite number ≥ 0
#[must_use]
pub fn is_valid_amount(value: &str) -> bool {
    if value.is_empty() {
        return true;
    }
    value
        .parse::<f64>()
        .is_ok_and(|n| n.is_finite() && n >= 0.0)
}
