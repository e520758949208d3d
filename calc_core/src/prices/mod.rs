//! # Price Table
//!
//! The price table holds every unit price the quotation engine looks up:
//!
//! - **Thickness-indexed prices** for three families (poured concrete,
//!   track frame, pattern formwork), keyed by insulation thickness in mm
//! - **Material prices**, keyed by trade name
//! - **Labor rates**, per ㎡, keyed by trade name
//!
//! Lookups never fail. A missing key resolves to the fallback price declared
//! next to the key in [`keys`], so a caller may store an incomplete table and
//! still get a complete quotation.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::prices::{keys, PriceTable, ThicknessFamily};
//!
//! let mut table = PriceTable::default();
//! assert_eq!(table.thickness_price(ThicknessFamily::Concrete, 100, keys::INSULATION_FALLBACK), 16_000.0);
//!
//! table.material_prices.clear();
//! assert_eq!(table.material_price(keys::DRILL_BIT), 5_000.0);
//! ```

pub mod keys;

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use keys::PriceKey;

/// Price families indexed by insulation thickness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThicknessFamily {
    /// Poured concrete (RC) insulation board
    #[serde(rename = "rc")]
    Concrete,
    /// Track-frame (LGS / WOOD) insulation board
    Track,
    /// Pattern formwork panel
    Form,
}

impl ThicknessFamily {
    /// All families, in settings-tab order
    pub const ALL: [ThicknessFamily; 3] = [
        ThicknessFamily::Concrete,
        ThicknessFamily::Track,
        ThicknessFamily::Form,
    ];

    /// Short code used on the command line
    pub fn code(&self) -> &'static str {
        match self {
            ThicknessFamily::Concrete => "rc",
            ThicknessFamily::Track => "track",
            ThicknessFamily::Form => "form",
        }
    }

    /// Parse from the short code (case-insensitive)
    pub fn from_code(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "rc" | "concrete" => Some(ThicknessFamily::Concrete),
            "track" | "lgs" | "wood" => Some(ThicknessFamily::Track),
            "form" => Some(ThicknessFamily::Form),
            _ => None,
        }
    }
}

/// Complete price configuration.
///
/// Serializes to camelCase JSON with the four-mapping layout the settings
/// surface edits:
///
/// ```json
/// {
///   "rcThicknessPrices": { "100": 16000.0, "120": 18700.0 },
///   "trackThicknessPrices": { "100": 16000.0 },
///   "formThicknessPrices": { "60": 17600.0 },
///   "materialPrices": { "드릴비트": 5000.0 },
///   "laborRates": { "단열재 노무비": 23000.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceTable {
    #[serde(default)]
    pub rc_thickness_prices: BTreeMap<u32, f64>,
    #[serde(default)]
    pub track_thickness_prices: BTreeMap<u32, f64>,
    #[serde(default)]
    pub form_thickness_prices: BTreeMap<u32, f64>,
    #[serde(default)]
    pub material_prices: BTreeMap<String, f64>,
    #[serde(default)]
    pub labor_rates: BTreeMap<String, f64>,
}

const INSULATION_PRICES: [(u32, f64); 16] = [
    (100, 16_000.0), (120, 18_700.0), (125, 19_300.0), (130, 19_700.0),
    (135, 19_900.0), (150, 22_400.0), (155, 23_200.0), (160, 24_000.0),
    (170, 24_800.0), (180, 26_000.0), (190, 27_400.0), (200, 28_800.0),
    (220, 31_700.0), (240, 34_600.0), (250, 36_100.0), (300, 43_300.0),
];

const FORM_PANEL_PRICES: [(u32, f64); 13] = [
    (60, 17_600.0), (65, 18_700.0), (70, 19_800.0), (80, 22_000.0),
    (90, 24_200.0), (100, 26_400.0), (110, 28_600.0), (120, 30_800.0),
    (130, 32_000.0), (140, 34_000.0), (150, 36_300.0), (160, 37_500.0),
    (180, 38_500.0),
];

/// Built-in price table, used until a table has been saved.
static DEFAULT_TABLE: Lazy<PriceTable> = Lazy::new(|| {
    let material_prices = [
        (keys::BASE_COAT.name, 21_000.0),
        (keys::JOINT_CEMENT.name, 6_500.0),
        (keys::ADHESIVE_MORTAR.name, 35_000.0),
        (keys::FOAM_BOND.name, 6_500.0),
        (keys::DRILL_BIT.name, 5_000.0),
        (keys::DISK_ANCHOR.name, 400.0),
        (keys::DISK_ANCHOR_120.name, 400.0),
        (keys::DISK_ANCHOR_150.name, 450.0),
        (keys::DISK_ANCHOR_200.name, 500.0),
        (keys::DISK_ANCHOR_250.name, 550.0),
        (keys::ALUMINUM_TRACK.name, 1_000.0),
        (keys::STEEL_FASTENER.name, 40.0),
        (keys::DELTA_FASTENER.name, 40.0),
        (keys::BRICK_TILE.name, 18_000.0),
        (keys::LONG_BRICK_CORNER.name, 1_200.0),
        (keys::BRICK_CORNER.name, 1_200.0),
        (keys::RELEASE_AGENT.name, 55_000.0),
    ];
    let labor_rates = [
        (keys::INSULATION_LABOR.name, 23_000.0),
        (keys::TILE_LABOR.name, 23_000.0),
        (keys::JOINT_LABOR.name, 10_000.0),
        (keys::REMODEL_INSULATION_LABOR.name, 25_000.0),
        (keys::FORM_LABOR.name, 12_000.0),
    ];

    PriceTable {
        rc_thickness_prices: INSULATION_PRICES.into_iter().collect(),
        track_thickness_prices: INSULATION_PRICES.into_iter().collect(),
        form_thickness_prices: FORM_PANEL_PRICES.into_iter().collect(),
        material_prices: material_prices
            .into_iter()
            .map(|(name, price)| (name.to_string(), price))
            .collect(),
        labor_rates: labor_rates
            .into_iter()
            .map(|(name, price)| (name.to_string(), price))
            .collect(),
    }
});

impl Default for PriceTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

impl PriceTable {
    /// A fresh copy of the built-in table.
    pub fn reset() -> Self {
        PriceTable::default()
    }

    /// The thickness map for a family
    pub fn thickness_prices(&self, family: ThicknessFamily) -> &BTreeMap<u32, f64> {
        match family {
            ThicknessFamily::Concrete => &self.rc_thickness_prices,
            ThicknessFamily::Track => &self.track_thickness_prices,
            ThicknessFamily::Form => &self.form_thickness_prices,
        }
    }

    fn thickness_prices_mut(&mut self, family: ThicknessFamily) -> &mut BTreeMap<u32, f64> {
        match family {
            ThicknessFamily::Concrete => &mut self.rc_thickness_prices,
            ThicknessFamily::Track => &mut self.track_thickness_prices,
            ThicknessFamily::Form => &mut self.form_thickness_prices,
        }
    }

    /// Thickness-indexed price, or `fallback` when the thickness has no entry.
    pub fn thickness_price(&self, family: ThicknessFamily, thickness_mm: u32, fallback: f64) -> f64 {
        match self.thickness_prices(family).get(&thickness_mm) {
            Some(price) => *price,
            None => {
                debug!(family = family.code(), thickness_mm, fallback, "thickness price missing, using fallback");
                fallback
            }
        }
    }

    /// Material price for a key, or the key's fallback.
    pub fn material_price(&self, key: PriceKey) -> f64 {
        lookup(&self.material_prices, key, "material")
    }

    /// Labor rate for a key, or the key's fallback.
    pub fn labor_rate(&self, key: PriceKey) -> f64 {
        lookup(&self.labor_rates, key, "labor")
    }

    /// Thicknesses offered for a family, ascending.
    pub fn available_thicknesses(&self, family: ThicknessFamily) -> Vec<u32> {
        // BTreeMap keys are already ordered
        self.thickness_prices(family).keys().copied().collect()
    }

    /// Smallest available thickness for a family, 0 when none are priced.
    pub fn default_thickness(&self, family: ThicknessFamily) -> u32 {
        self.thickness_prices(family)
            .keys()
            .next()
            .copied()
            .unwrap_or(0)
    }

    /// Keep `thickness_mm` if it is priced for the family, otherwise fall
    /// back to [`default_thickness`](Self::default_thickness).
    pub fn resolve_thickness(&self, family: ThicknessFamily, thickness_mm: u32) -> u32 {
        if self.thickness_prices(family).contains_key(&thickness_mm) {
            thickness_mm
        } else {
            self.default_thickness(family)
        }
    }

    /// Add or replace a thickness price
    pub fn set_thickness_price(&mut self, family: ThicknessFamily, thickness_mm: u32, price: f64) {
        self.thickness_prices_mut(family).insert(thickness_mm, price);
    }

    /// Remove a thickness entry, returning its price if present
    pub fn remove_thickness_price(&mut self, family: ThicknessFamily, thickness_mm: u32) -> Option<f64> {
        self.thickness_prices_mut(family).remove(&thickness_mm)
    }

    /// Add or replace a material price
    pub fn set_material_price(&mut self, name: impl Into<String>, price: f64) {
        self.material_prices.insert(name.into(), price);
    }

    /// Add or replace a labor rate
    pub fn set_labor_rate(&mut self, name: impl Into<String>, price: f64) {
        self.labor_rates.insert(name.into(), price);
    }
}

fn lookup(map: &BTreeMap<String, f64>, key: PriceKey, kind: &'static str) -> f64 {
    match map.get(key.name) {
        Some(price) => *price,
        None => {
            debug!(kind, key = key.name, fallback = key.fallback, "price key missing, using fallback");
            key.fallback
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table_contents() {
        let table = PriceTable::default();
        assert_eq!(table.rc_thickness_prices.len(), 16);
        assert_eq!(table.track_thickness_prices, table.rc_thickness_prices);
        assert_eq!(table.form_thickness_prices[&60], 17_600.0);
        assert_eq!(table.material_price(keys::DISK_ANCHOR_150), 450.0);
        assert_eq!(table.material_price(keys::DISK_ANCHOR_250), 550.0);
        assert_eq!(table.labor_rate(keys::FORM_LABOR), 12_000.0);
    }

    #[test]
    fn test_missing_keys_fall_back() {
        let table = PriceTable {
            rc_thickness_prices: BTreeMap::new(),
            track_thickness_prices: BTreeMap::new(),
            form_thickness_prices: BTreeMap::new(),
            material_prices: BTreeMap::new(),
            labor_rates: BTreeMap::new(),
        };
        assert_eq!(table.material_price(keys::RELEASE_AGENT), 55_000.0);
        assert_eq!(table.labor_rate(keys::JOINT_LABOR), 10_000.0);
        assert_eq!(
            table.thickness_price(ThicknessFamily::Form, 60, keys::FORM_PANEL_FALLBACK),
            17_600.0
        );
    }

    #[test]
    fn test_stored_price_wins_over_fallback() {
        let mut table = PriceTable::default();
        table.set_material_price(keys::DRILL_BIT.name, 7_777.0);
        assert_eq!(table.material_price(keys::DRILL_BIT), 7_777.0);
    }

    #[test]
    fn test_available_thicknesses_sorted() {
        let mut table = PriceTable::default();
        table.set_thickness_price(ThicknessFamily::Form, 55, 15_000.0);
        let values = table.available_thicknesses(ThicknessFamily::Form);
        assert_eq!(values.first(), Some(&55));
        assert!(values.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_resolve_thickness() {
        let mut table = PriceTable::default();
        assert_eq!(table.resolve_thickness(ThicknessFamily::Concrete, 150), 150);
        assert_eq!(table.resolve_thickness(ThicknessFamily::Concrete, 151), 100);

        table.rc_thickness_prices.clear();
        assert_eq!(table.resolve_thickness(ThicknessFamily::Concrete, 150), 0);
    }

    #[test]
    fn test_remove_thickness_price() {
        let mut table = PriceTable::default();
        assert_eq!(table.remove_thickness_price(ThicknessFamily::Track, 300), Some(43_300.0));
        assert_eq!(table.remove_thickness_price(ThicknessFamily::Track, 300), None);
    }

    #[test]
    fn test_json_layout() {
        let table = PriceTable::default();
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.contains("\"rcThicknessPrices\":{\"100\":16000.0"));
        assert!(json.contains("\"laborRates\""));

        let roundtrip: PriceTable = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, table);
    }

    #[test]
    fn test_incomplete_json_is_accepted() {
        let table: PriceTable = serde_json::from_str(r#"{"materialPrices":{"박리제":60000}}"#).unwrap();
        assert!(table.rc_thickness_prices.is_empty());
        assert_eq!(table.material_price(keys::RELEASE_AGENT), 60_000.0);
    }

    #[test]
    fn test_family_codes() {
        for family in ThicknessFamily::ALL {
            assert_eq!(ThicknessFamily::from_code(family.code()), Some(family));
        }
        assert_eq!(ThicknessFamily::from_code("WOOD"), Some(ThicknessFamily::Track));
        assert_eq!(ThicknessFamily::from_code("steel"), None);
    }
}
