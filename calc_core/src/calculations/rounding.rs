//! Quantity and currency rounding.
//!
//! Consumables are sold in packs, so their quantities round **up** to the
//! pack size. The final total rounds **down** to the quotation's rounding
//! step and the difference is disclosed as a discount.

use serde::{Deserialize, Serialize};

/// Rounding policy attached to each rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", content = "lot", rename_all = "snake_case")]
pub enum Rounding {
    /// Keep the fractional quantity (insulation board, corner tile, panels)
    None,
    /// Round up to a whole unit
    Whole,
    /// Round up to a multiple of the lot size (anchors and track by 100,
    /// fasteners by 500)
    Lot(u32),
}

impl Rounding {
    /// Apply the policy to a raw quantity
    pub fn apply(&self, quantity: f64) -> f64 {
        match self {
            Rounding::None => quantity,
            Rounding::Whole => quantity.ceil(),
            Rounding::Lot(lot) => ceil_to_multiple(quantity, f64::from(*lot)),
        }
    }
}

/// Round `quantity` up to the next multiple of `unit`.
///
/// ```rust
/// use calc_core::calculations::ceil_to_multiple;
///
/// assert_eq!(ceil_to_multiple(636.0, 100.0), 700.0);
/// assert_eq!(ceil_to_multiple(600.0, 500.0), 1000.0);
/// ```
pub fn ceil_to_multiple(quantity: f64, unit: f64) -> f64 {
    (quantity / unit).ceil() * unit
}

/// Round a currency value down to a multiple of `step`.
///
/// A zero, negative or NaN step floors to whole won.
///
/// ```rust
/// use calc_core::calculations::floor_to_step;
///
/// assert_eq!(floor_to_step(12_345.0, 100.0), 12_300.0);
/// assert_eq!(floor_to_step(12_345.6, 0.0), 12_345.0);
/// ```
pub fn floor_to_step(value: f64, step: f64) -> f64 {
    let step = if step > 0.0 { step } else { 1.0 };
    (value / step).floor() * step
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policies() {
        assert_eq!(Rounding::None.apply(129.6), 129.6);
        assert_eq!(Rounding::Whole.apply(20.000004), 21.0);
        assert_eq!(Rounding::Whole.apply(12.0), 12.0);
        assert_eq!(Rounding::Lot(100).apply(636.0), 700.0);
        assert_eq!(Rounding::Lot(100).apply(700.0), 700.0);
        assert_eq!(Rounding::Lot(500).apply(501.0), 1000.0);
        assert_eq!(Rounding::Lot(500).apply(0.0), 0.0);
    }

    #[test]
    fn test_floor_to_step_bounds() {
        let steps = [1.0, 10.0, 100.0, 1_000.0, 10_000.0];
        let values = [0.0, 9.0, 10.0, 12_345.67, 2_073_600.0000000005, 31_999_999.9];
        for step in steps {
            for value in values {
                let floored = floor_to_step(value, step);
                assert!(floored <= value, "{floored} > {value}");
                assert!(value - floored < step, "gap too large for {value} / {step}");
            }
        }
    }

    #[test]
    fn test_floor_to_step_bad_step_floors_to_whole_won() {
        assert_eq!(floor_to_step(99.5, 0.0), 99.0);
        assert_eq!(floor_to_step(99.5, -10.0), 99.0);
        assert_eq!(floor_to_step(99.5, f64::NAN), 99.0);
        assert_eq!(floor_to_step(13_417_972.3, 0.0), 13_417_972.0);
    }

    #[test]
    fn test_rounding_serialization() {
        let json = serde_json::to_string(&Rounding::Lot(100)).unwrap();
        assert_eq!(json, r#"{"policy":"lot","lot":100}"#);
        let roundtrip: Rounding = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, Rounding::Lot(100));
    }
}
