//! # Quotation Calculations
//!
//! This module turns a parameter set and a price table into priced line
//! items, then into final totals. Each stage follows the pattern:
//!
//! - inputs are plain JSON-serializable structs
//! - the stage is a pure function with no I/O and no hidden state
//!
//! ## Stages
//!
//! - [`anchor`] - disk-anchor size band for an insulation thickness
//! - [`rounding`] - pack-size rounding of quantities, floor rounding of totals
//! - [`rules`] - the ordered rule set of each system family
//! - [`engine`] - rule evaluation into [`MaterialItem`] rows
//! - [`totals`] - design fee, flat formwork labor, VAT and final rounding
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::{calculate_materials, CalculationParams, SystemId};
//! use calc_core::prices::PriceTable;
//!
//! let params = CalculationParams {
//!     system: SystemId::Form,
//!     area: 90.0,
//!     thickness: 60,
//!     ..CalculationParams::default()
//! };
//! let items = calculate_materials(&params, &PriceTable::default());
//! assert_eq!(items.len(), 4);
//! assert_eq!(items[1].quantity, 3.0);
//! ```

pub mod anchor;
pub mod engine;
pub mod rounding;
pub mod rules;
pub mod totals;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::prices::ThicknessFamily;
use crate::units::ItemUnit;

// Re-export commonly used items
pub use anchor::AnchorBand;
pub use engine::calculate_materials;
pub use rounding::{ceil_to_multiple, floor_to_step, Rounding};
pub use totals::{compute_totals, QuoteOptions, Totals, VAT_RATE};

/// Exterior insulation installation method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SystemId {
    /// Tile-faced insulation board on reinforced concrete
    #[default]
    #[serde(rename = "RC")]
    Rc,
    /// Track-mounted board on light-gauge steel framing
    #[serde(rename = "LGS")]
    Lgs,
    /// Track-mounted board on timber framing
    #[serde(rename = "WOOD")]
    Wood,
    /// Pattern formwork
    #[serde(rename = "FORM")]
    Form,
}

impl SystemId {
    /// All systems, in tab order
    pub const ALL: [SystemId; 4] = [SystemId::Rc, SystemId::Lgs, SystemId::Wood, SystemId::Form];

    /// Identifier used in JSON and on the command line
    pub fn code(&self) -> &'static str {
        match self {
            SystemId::Rc => "RC",
            SystemId::Lgs => "LGS",
            SystemId::Wood => "WOOD",
            SystemId::Form => "FORM",
        }
    }

    /// Parse from the identifier (case-insensitive)
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RC" => Ok(SystemId::Rc),
            "LGS" => Ok(SystemId::Lgs),
            "WOOD" => Ok(SystemId::Wood),
            "FORM" => Ok(SystemId::Form),
            _ => Err(CalcError::invalid_input(
                "system",
                s,
                "Expected one of RC, LGS, WOOD, FORM",
            )),
        }
    }

    /// Thickness price family the system draws from
    pub fn family(&self) -> ThicknessFamily {
        match self {
            SystemId::Rc => ThicknessFamily::Concrete,
            SystemId::Lgs | SystemId::Wood => ThicknessFamily::Track,
            SystemId::Form => ThicknessFamily::Form,
        }
    }

    /// Quotation title for the system
    pub fn label(&self) -> &'static str {
        match self {
            SystemId::Rc => "타일부착형 단열재 (철근콘크리트)",
            SystemId::Lgs => "타일부착형 단열재 (경량철골조)",
            SystemId::Wood => "타일부착형 단열재 (목조)",
            SystemId::Form => "패턴거푸집",
        }
    }

    /// Short description shown next to the identifier
    pub fn description(&self) -> &'static str {
        match self {
            SystemId::Rc => "RC 후부착 시스템",
            SystemId::Lgs => "트랙식 경량철골조",
            SystemId::Wood => "트랙식 목조",
            SystemId::Form => "패턴 거푸집 시스템",
        }
    }

    /// Whether loss rates, fire resistance and corner tiles apply
    pub fn uses_tile_options(&self) -> bool {
        !matches!(self, SystemId::Form)
    }
}

impl std::fmt::Display for SystemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Corner tile product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerTileKind {
    /// Long brick corner, 16 sheets per meter
    LongBrick,
    /// Brick corner, 14 sheets per meter
    BrickCorner,
}

impl CornerTileKind {
    /// Sheets needed per meter of corner
    pub fn sheets_per_meter(&self) -> f64 {
        match self {
            CornerTileKind::LongBrick => 16.0,
            CornerTileKind::BrickCorner => 14.0,
        }
    }

    /// Row name, also the material price key
    pub fn item_name(&self) -> &'static str {
        self.price_key().name
    }

    pub(crate) fn price_key(&self) -> crate::prices::keys::PriceKey {
        match self {
            CornerTileKind::LongBrick => crate::prices::keys::LONG_BRICK_CORNER,
            CornerTileKind::BrickCorner => crate::prices::keys::BRICK_CORNER,
        }
    }

    /// Parse from common spellings
    pub fn from_str_flexible(s: &str) -> CalcResult<Self> {
        match s.trim().to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "long_brick" | "longbrick" => Ok(CornerTileKind::LongBrick),
            "brick_corner" | "brickcorner" | "brickco" => Ok(CornerTileKind::BrickCorner),
            _ => Err(CalcError::invalid_input(
                "corner_tile",
                s,
                "Expected long-brick or brick-corner",
            )),
        }
    }
}

/// Engine input.
///
/// `thickness` is read against the price family of `system` (RC board,
/// track board or formwork panel). A zero thickness produces no rows, and
/// JSON input without a `thickness` field deserializes to zero: nothing is
/// quoted until a thickness is chosen. [`Default`] starts from 100 mm.
///
/// ## JSON Example
///
/// ```json
/// {
///   "system": "RC",
///   "area": 120.0,
///   "thickness": 100,
///   "insulation_loss_rate": 8.0,
///   "tile_loss_rate": 10.0,
///   "is_fire_resistant": false,
///   "corner_tile": "long_brick",
///   "corner_tile_length": 2.5,
///   "labor_included": true
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationParams {
    /// Installation method, selects the rule set
    pub system: SystemId,

    /// Wall area in ㎡
    pub area: f64,

    /// Insulation (or panel) thickness in mm, 0 when none is selected
    #[serde(default)]
    pub thickness: u32,

    /// Insulation board loss rate in percent
    pub insulation_loss_rate: f64,

    /// Brick tile loss rate in percent
    pub tile_loss_rate: f64,

    /// Semi-noncombustible board: linear per-mm price and a name suffix
    pub is_fire_resistant: bool,

    /// Corner tile product, if corner tiles are quoted
    pub corner_tile: Option<CornerTileKind>,

    /// Total corner length in meters
    pub corner_tile_length: f64,

    /// Whether labor rows (and formwork labor) are quoted
    pub labor_included: bool,
}

impl Default for CalculationParams {
    fn default() -> Self {
        CalculationParams {
            system: SystemId::Rc,
            area: 120.0,
            thickness: 100,
            insulation_loss_rate: 8.0,
            tile_loss_rate: 10.0,
            is_fire_resistant: false,
            corner_tile: None,
            corner_tile_length: 0.0,
            labor_included: true,
        }
    }
}

impl CalculationParams {
    /// Caller-side validation of user input.
    ///
    /// The engine itself does not call this; it propagates whatever numbers
    /// it is given.
    pub fn validate(&self) -> CalcResult<()> {
        check_non_negative("area", self.area)?;
        check_non_negative("insulation_loss_rate", self.insulation_loss_rate)?;
        check_non_negative("tile_loss_rate", self.tile_loss_rate)?;
        check_non_negative("corner_tile_length", self.corner_tile_length)?;
        Ok(())
    }

    /// Corner tile product and length, when a positive length is quoted
    pub fn corner_tile_request(&self) -> Option<(CornerTileKind, f64)> {
        match self.corner_tile {
            Some(kind) if self.corner_tile_length > 0.0 => Some((kind, self.corner_tile_length)),
            _ => None,
        }
    }
}

fn check_non_negative(field: &str, value: f64) -> CalcResult<()> {
    // also rejects NaN
    if !(value >= 0.0) || value.is_infinite() {
        return Err(CalcError::invalid_input(
            field,
            value.to_string(),
            "Must be a non-negative number",
        ));
    }
    Ok(())
}

/// What a row represents; drives quantity display and labor filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// Insulation board, quantity kept fractional
    InsulationBoard,
    /// Formwork panel, quantity equals the area
    FormPanel,
    /// Consumables and accessories
    Material,
    /// Corner tile, absolute sheet count
    CornerTile,
    /// Per-area labor row
    Labor,
}

/// One priced row of the quotation.
///
/// `extended_price` is always `unit_price * quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialItem {
    /// Row label as printed
    pub name: String,

    /// Sales unit
    pub unit: ItemUnit,

    /// Quantity after pack-size rounding
    pub quantity: f64,

    /// Unit price (won)
    pub unit_price: f64,

    /// `unit_price * quantity` (won)
    pub extended_price: f64,

    /// Row classification
    pub kind: ItemKind,
}
