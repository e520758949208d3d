//! # Unit Types
//!
//! Lightweight wrappers for the quantities a quotation deals with. Wall areas
//! are square meters, insulation thickness is whole millimeters, and money is
//! Korean won carried as `f64` (design-fee and VAT multipliers produce
//! fractional won before the final floor rounding).
//!
//! Line items carry an [`ItemUnit`], the sales unit printed in the quotation's
//! unit column.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{ItemUnit, SquareMeters};
//!
//! let wall = SquareMeters(120.0);
//! assert_eq!(wall.0, 120.0);
//! assert_eq!(ItemUnit::Bag.symbol(), "포");
//! ```

use serde::{Deserialize, Serialize};
use std::ops::Mul;

/// Area in square meters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SquareMeters(pub f64);

/// Currency amount in Korean won
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Won(pub f64);

impl Mul<SquareMeters> for Won {
    type Output = Won;

    /// Per-area rate times an area
    fn mul(self, rhs: SquareMeters) -> Won {
        Won(self.0 * rhs.0)
    }
}

/// Sales unit of a quotation row.
///
/// Serializes to the symbol printed on the quotation (e.g. `"㎡"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemUnit {
    /// Square meters of wall coverage
    #[serde(rename = "㎡")]
    SquareMeter,
    /// Anchor sets
    #[serde(rename = "set")]
    Set,
    /// Individual pieces
    #[serde(rename = "ea")]
    Each,
    /// Pails / cans (mortar, release agent)
    #[serde(rename = "통")]
    Pail,
    /// Bags (cement, base coat)
    #[serde(rename = "포")]
    Bag,
    /// Tile sheets
    #[serde(rename = "장")]
    Sheet,
    /// Won, used by the discount row
    #[serde(rename = "원")]
    Won,
}

impl ItemUnit {
    /// Symbol printed in the unit column
    pub fn symbol(&self) -> &'static str {
        match self {
            ItemUnit::SquareMeter => "㎡",
            ItemUnit::Set => "set",
            ItemUnit::Each => "ea",
            ItemUnit::Pail => "통",
            ItemUnit::Bag => "포",
            ItemUnit::Sheet => "장",
            ItemUnit::Won => "원",
        }
    }
}

impl std::fmt::Display for ItemUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_times_area() {
        let labor = Won(12_000.0) * SquareMeters(90.0);
        assert_eq!(labor, Won(1_080_000.0));
    }

    #[test]
    fn test_unit_serializes_to_symbol() {
        assert_eq!(serde_json::to_string(&ItemUnit::SquareMeter).unwrap(), "\"㎡\"");
        let unit: ItemUnit = serde_json::from_str("\"포\"").unwrap();
        assert_eq!(unit, ItemUnit::Bag);
        assert_eq!(unit.to_string(), "포");
    }
}
