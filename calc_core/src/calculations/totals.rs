//! # Totals
//!
//! Aggregates the priced rows into the figures printed under the table:
//!
//! 1. every row is scaled by the design-fee multiplier
//! 2. formwork adds a flat per-㎡ labor amount, *not* scaled by the design fee
//! 3. VAT is 10 % of the subtotal and only added when VAT is included
//! 4. the total is floored to the rounding step; the remainder is the discount

use serde::{Deserialize, Serialize};

use super::rounding::floor_to_step;
use super::{CalculationParams, MaterialItem, SystemId};
use crate::prices::keys;
use crate::prices::PriceTable;
use crate::units::{SquareMeters, Won};

/// Value-added tax rate
pub const VAT_RATE: f64 = 0.10;

/// Totals-stage configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteOptions {
    /// Add the design fee to every row
    pub design_fee_enabled: bool,

    /// Design fee in percent
    pub design_fee_rate: f64,

    /// Add 10 % VAT to the total
    pub vat_included: bool,

    /// Final total is floored to a multiple of this (won)
    pub round_step: f64,
}

impl Default for QuoteOptions {
    fn default() -> Self {
        QuoteOptions {
            design_fee_enabled: false,
            design_fee_rate: 10.0,
            vat_included: false,
            round_step: 10.0,
        }
    }
}

impl QuoteOptions {
    /// `1 + rate/100` when the design fee is enabled, else 1
    pub fn design_fee_multiplier(&self) -> f64 {
        if self.design_fee_enabled {
            1.0 + self.design_fee_rate / 100.0
        } else {
            1.0
        }
    }
}

/// Final figures of a quotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    /// Multiplier applied to every row
    pub design_fee_multiplier: f64,

    /// Sum of rows after the design fee
    pub materials_supply: f64,

    /// Flat formwork labor rate per ㎡ as applied: 0 for other systems and
    /// when labor is excluded
    pub labor_rate: f64,

    /// Flat formwork labor amount
    pub labor_supply: f64,

    /// `materials_supply + labor_supply`
    pub subtotal: f64,

    /// 10 % of the subtotal, reported even when not included
    pub vat: f64,

    /// Subtotal, plus VAT when included
    pub total: f64,

    /// Total floored to the rounding step
    pub total_rounded: f64,

    /// `total - total_rounded`
    pub discount: f64,
}

impl Totals {
    /// Whether a discount line should be disclosed
    pub fn has_discount(&self) -> bool {
        self.discount > 0.0
    }

    /// Whether the flat formwork labor line should be shown; true for
    /// formwork with labor even when the area is zero
    pub fn has_flat_labor(&self) -> bool {
        self.labor_rate > 0.0
    }
}

/// Aggregate priced rows into totals.
///
/// `params` supplies the system, area and labor switch for the flat
/// formwork labor; `prices` supplies its rate.
pub fn compute_totals(
    items: &[MaterialItem],
    params: &CalculationParams,
    options: &QuoteOptions,
    prices: &PriceTable,
) -> Totals {
    let design_fee_multiplier = options.design_fee_multiplier();

    let materials_supply: f64 = items
        .iter()
        .map(|item| item.extended_price * design_fee_multiplier)
        .sum();

    let labor_rate = if params.system == SystemId::Form && params.labor_included {
        prices.labor_rate(keys::FORM_LABOR)
    } else {
        0.0
    };
    let labor_supply = (Won(labor_rate) * SquareMeters(params.area)).0;

    let subtotal = materials_supply + labor_supply;
    let vat = subtotal * VAT_RATE;
    let total = if options.vat_included { subtotal + vat } else { subtotal };
    let total_rounded = floor_to_step(total, options.round_step);

    Totals {
        design_fee_multiplier,
        materials_supply,
        labor_rate,
        labor_supply,
        subtotal,
        vat,
        total,
        total_rounded,
        discount: total - total_rounded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{calculate_materials, ItemKind};
    use crate::units::ItemUnit;

    fn item(extended_price: f64) -> MaterialItem {
        MaterialItem {
            name: "row".to_string(),
            unit: ItemUnit::Each,
            quantity: 1.0,
            unit_price: extended_price,
            extended_price,
            kind: ItemKind::Material,
        }
    }

    #[test]
    fn test_plain_sum() {
        let items = vec![item(1_000.0), item(2_345.0)];
        let totals = compute_totals(&items, &CalculationParams::default(), &QuoteOptions::default(), &PriceTable::default());
        assert_eq!(totals.materials_supply, 3_345.0);
        assert_eq!(totals.labor_supply, 0.0);
        assert_eq!(totals.subtotal, 3_345.0);
        assert_eq!(totals.total, 3_345.0);
        assert_eq!(totals.total_rounded, 3_340.0);
        assert_eq!(totals.discount, 5.0);
        assert!(totals.has_discount());
    }

    #[test]
    fn test_design_fee_scales_rows() {
        let items = vec![item(10_000.0), item(20_000.0)];
        let options = QuoteOptions {
            design_fee_enabled: true,
            design_fee_rate: 10.0,
            ..QuoteOptions::default()
        };
        let totals = compute_totals(&items, &CalculationParams::default(), &options, &PriceTable::default());
        assert!((totals.design_fee_multiplier - 1.1).abs() < 1e-12);
        assert!((totals.materials_supply - 33_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_disabled_design_fee_ignores_rate() {
        let options = QuoteOptions {
            design_fee_enabled: false,
            design_fee_rate: 50.0,
            ..QuoteOptions::default()
        };
        assert_eq!(options.design_fee_multiplier(), 1.0);
    }

    #[test]
    fn test_vat_included() {
        let items = vec![item(100_000.0)];
        let options = QuoteOptions {
            vat_included: true,
            round_step: 1_000.0,
            ..QuoteOptions::default()
        };
        let totals = compute_totals(&items, &CalculationParams::default(), &options, &PriceTable::default());
        assert!((totals.vat - 10_000.0).abs() < 1e-9);
        assert!((totals.total - 110_000.0).abs() < 1e-9);
        assert!(!totals.has_flat_labor());
    }

    #[test]
    fn test_vat_reported_but_not_added() {
        let items = vec![item(100_000.0)];
        let totals = compute_totals(&items, &CalculationParams::default(), &QuoteOptions::default(), &PriceTable::default());
        assert!((totals.vat - 10_000.0).abs() < 1e-9);
        assert_eq!(totals.total, 100_000.0);
        assert!(!totals.has_discount());
    }

    #[test]
    fn test_form_labor_not_scaled_by_design_fee() {
        let prices = PriceTable::default();
        let params = CalculationParams {
            system: SystemId::Form,
            area: 90.0,
            thickness: 60,
            ..CalculationParams::default()
        };
        let items = calculate_materials(&params, &prices);
        let options = QuoteOptions {
            design_fee_enabled: true,
            design_fee_rate: 20.0,
            round_step: 1.0,
            ..QuoteOptions::default()
        };
        let totals = compute_totals(&items, &params, &options, &prices);

        let rows: f64 = items.iter().map(|i| i.extended_price).sum();
        assert_eq!(totals.labor_rate, 12_000.0);
        assert_eq!(totals.labor_supply, 1_080_000.0);
        assert!((totals.materials_supply - rows * 1.2).abs() < 1e-6);
        assert!((totals.subtotal - (rows * 1.2 + 1_080_000.0)).abs() < 1e-6);
    }

    #[test]
    fn test_form_labor_gated() {
        let prices = PriceTable::default();
        let params = CalculationParams {
            system: SystemId::Form,
            area: 90.0,
            thickness: 60,
            labor_included: false,
            ..CalculationParams::default()
        };
        let items = calculate_materials(&params, &prices);
        let totals = compute_totals(&items, &params, &QuoteOptions::default(), &prices);
        assert_eq!(totals.labor_rate, 0.0);
        assert_eq!(totals.labor_supply, 0.0);
        assert!(!totals.has_flat_labor());
    }

    #[test]
    fn test_form_labor_shown_at_zero_area() {
        let params = CalculationParams {
            system: SystemId::Form,
            area: 0.0,
            thickness: 60,
            ..CalculationParams::default()
        };
        let totals = compute_totals(&[], &params, &QuoteOptions::default(), &PriceTable::default());
        assert_eq!(totals.labor_rate, 12_000.0);
        assert_eq!(totals.labor_supply, 0.0);
        assert!(totals.has_flat_labor());
    }

    #[test]
    fn test_rc_scenario_totals() {
        let prices = PriceTable::default();
        let params = CalculationParams::default();
        let items = calculate_materials(&params, &prices);
        let totals = compute_totals(&items, &params, &QuoteOptions::default(), &prices);

        // no flat labor for RC, labor rows are already in the items
        assert_eq!(totals.labor_supply, 0.0);
        assert!(totals.total_rounded <= totals.total);
        assert!(totals.discount < 10.0);
        assert_eq!(totals.total_rounded % 10.0, 0.0);
    }
}
