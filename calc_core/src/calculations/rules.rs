//! # Rule Sets
//!
//! Each system family is a fixed, ordered list of [`Rule`]s. A rule names
//! one quotation row, how its raw quantity derives from the wall area, how
//! that quantity is rounded, and its unit price already resolved against the
//! price table. Row order is the printed order of the quotation.
//!
//! | Family    | Rows                                                             |
//! |-----------|------------------------------------------------------------------|
//! | RC        | board, anchor, mortar, foam bond, drill bit, base coat, tile,    |
//! |           | (corner tile), joint cement, (3 labor rows)                      |
//! | LGS/WOOD  | board, track, anchor, fastener, foam bond, base coat, tile,      |
//! |           | (corner tile), joint cement, (3 labor rows)                      |
//! | FORM      | panel, release agent, foam bond, anchor                          |
//!
//! The per-area factors are trade consumption rates and are kept exactly as
//! priced, including the slightly different foam-bond rates of the RC and
//! track families.

use serde::{Deserialize, Serialize};

use super::anchor::AnchorBand;
use super::rounding::Rounding;
use super::{CalculationParams, ItemKind, SystemId};
use crate::prices::keys::{self, PriceKey};
use crate::prices::PriceTable;
use crate::units::ItemUnit;

/// Insulation price per mm of thickness for semi-noncombustible board
pub const FIRE_RESISTANT_PRICE_PER_MM: f64 = 200.0;

/// Insulation surcharge per ㎡ on timber framing
pub const WOOD_INSULATION_SURCHARGE: f64 = 1_000.0;

/// Name suffix disclosing semi-noncombustible board
pub const FIRE_RESISTANT_SUFFIX: &str = " - 준불연";

/// Coverage of one release-agent pail and one foam-bond can on formwork (㎡)
pub const FORM_COVERAGE_M2: f64 = 30.0;

/// Anchors per ㎡ of formwork
pub const FORM_ANCHORS_PER_M2: f64 = 0.81;

// Per-㎡ consumption rates
const RC_ANCHORS_PER_M2: f64 = 5.3;
const RC_MORTAR_PER_M2: f64 = 0.05;
const RC_FOAM_BOND_PER_M2: f64 = 0.1666667;
const DRILL_BITS_PER_M2: f64 = 0.1;
const BASE_COAT_PER_M2: f64 = 0.1666667;
const JOINT_CEMENT_PER_M2: f64 = 0.2631579;
const TRACK_PER_M2: f64 = 2.7;
const TRACK_ANCHORS_PER_M2: f64 = 3.0;
const FASTENERS_PER_M2: f64 = 5.0;
const TRACK_FOAM_BOND_PER_M2: f64 = 0.1538;

/// How a rule's raw quantity is derived
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", content = "value", rename_all = "snake_case")]
pub enum Basis {
    /// `factor * area`
    PerArea(f64),
    /// `area / coverage`, one unit per `coverage` ㎡
    Coverage(f64),
    /// A fixed count independent of area
    Absolute(f64),
}

impl Basis {
    /// Raw (unrounded) quantity for a wall area
    pub fn raw_quantity(&self, area: f64) -> f64 {
        match self {
            Basis::PerArea(factor) => factor * area,
            Basis::Coverage(coverage) => area / coverage,
            Basis::Absolute(count) => *count,
        }
    }
}

/// One row of a rule set, with its unit price resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub unit: ItemUnit,
    pub kind: ItemKind,
    pub basis: Basis,
    pub rounding: Rounding,
    pub unit_price: f64,
}

impl Rule {
    fn new(name: impl Into<String>, unit: ItemUnit, kind: ItemKind, basis: Basis, rounding: Rounding, unit_price: f64) -> Self {
        Rule {
            name: name.into(),
            unit,
            kind,
            basis,
            rounding,
            unit_price,
        }
    }

    /// Whole-unit consumable priced from the material table
    fn material(key: PriceKey, unit: ItemUnit, basis: Basis, prices: &PriceTable) -> Self {
        Rule::new(key.name, unit, ItemKind::Material, basis, Rounding::Whole, prices.material_price(key))
    }

    /// Consumable sold in lots
    fn lot(name: impl Into<String>, unit: ItemUnit, factor: f64, lot: u32, unit_price: f64) -> Self {
        Rule::new(name, unit, ItemKind::Material, Basis::PerArea(factor), Rounding::Lot(lot), unit_price)
    }

    fn labor(key: PriceKey, prices: &PriceTable) -> Self {
        Rule::new(key.name, ItemUnit::SquareMeter, ItemKind::Labor, Basis::PerArea(1.0), Rounding::Whole, prices.labor_rate(key))
    }
}

/// Ordered rules for a parameter set.
///
/// Returns an empty list when `params.thickness` is zero.
pub fn rule_set(params: &CalculationParams, prices: &PriceTable) -> Vec<Rule> {
    if params.thickness == 0 {
        return Vec::new();
    }
    match params.system {
        SystemId::Rc => concrete_rules(params, prices),
        SystemId::Lgs | SystemId::Wood => track_rules(params, prices),
        SystemId::Form => formwork_rules(params, prices),
    }
}

/// Insulation board unit price after the fire-resistance and timber rules
pub fn insulation_unit_price(params: &CalculationParams, prices: &PriceTable) -> f64 {
    if params.is_fire_resistant {
        return f64::from(params.thickness) * FIRE_RESISTANT_PRICE_PER_MM;
    }
    let base = prices.thickness_price(params.system.family(), params.thickness, keys::INSULATION_FALLBACK);
    if params.system == SystemId::Wood {
        base + WOOD_INSULATION_SURCHARGE
    } else {
        base
    }
}

fn insulation_board(params: &CalculationParams, prices: &PriceTable) -> Rule {
    let suffix = if params.is_fire_resistant { FIRE_RESISTANT_SUFFIX } else { "" };
    Rule::new(
        format!("단열재 (로스율 {}%){}", params.insulation_loss_rate, suffix),
        ItemUnit::SquareMeter,
        ItemKind::InsulationBoard,
        Basis::PerArea(1.0 + params.insulation_loss_rate / 100.0),
        Rounding::None,
        insulation_unit_price(params, prices),
    )
}

fn disk_anchor(params: &CalculationParams, prices: &PriceTable, per_m2: f64) -> Rule {
    let band = AnchorBand::for_thickness(params.thickness);
    Rule::lot(band.item_name(), ItemUnit::Set, per_m2, 100, prices.material_price(band.price_key()))
}

fn brick_tile(params: &CalculationParams, prices: &PriceTable) -> Rule {
    Rule::new(
        format!("벽돌타일 (로스율 {}%)", params.tile_loss_rate),
        ItemUnit::SquareMeter,
        ItemKind::Material,
        Basis::PerArea(1.0 + params.tile_loss_rate / 100.0),
        Rounding::Whole,
        prices.material_price(keys::BRICK_TILE),
    )
}

/// Tile, corner tile, joint cement and labor rows shared by the tiled families
fn push_tile_finish(rules: &mut Vec<Rule>, params: &CalculationParams, prices: &PriceTable) {
    rules.push(brick_tile(params, prices));

    if let Some((kind, length_m)) = params.corner_tile_request() {
        rules.push(Rule::new(
            kind.item_name(),
            ItemUnit::Sheet,
            ItemKind::CornerTile,
            Basis::Absolute(kind.sheets_per_meter() * length_m),
            Rounding::None,
            prices.material_price(kind.price_key()),
        ));
    }

    rules.push(Rule::material(keys::JOINT_CEMENT, ItemUnit::Bag, Basis::PerArea(JOINT_CEMENT_PER_M2), prices));

    if params.labor_included {
        rules.push(Rule::labor(keys::INSULATION_LABOR, prices));
        rules.push(Rule::labor(keys::TILE_LABOR, prices));
        rules.push(Rule::labor(keys::JOINT_LABOR, prices));
    }
}

fn concrete_rules(params: &CalculationParams, prices: &PriceTable) -> Vec<Rule> {
    let mut rules = vec![
        insulation_board(params, prices),
        disk_anchor(params, prices, RC_ANCHORS_PER_M2),
        Rule::material(keys::ADHESIVE_MORTAR, ItemUnit::Pail, Basis::PerArea(RC_MORTAR_PER_M2), prices),
        Rule::material(keys::FOAM_BOND, ItemUnit::Each, Basis::PerArea(RC_FOAM_BOND_PER_M2), prices),
        Rule::material(keys::DRILL_BIT, ItemUnit::Each, Basis::PerArea(DRILL_BITS_PER_M2), prices),
        Rule::material(keys::BASE_COAT, ItemUnit::Bag, Basis::PerArea(BASE_COAT_PER_M2), prices),
    ];
    push_tile_finish(&mut rules, params, prices);
    rules
}

fn track_rules(params: &CalculationParams, prices: &PriceTable) -> Vec<Rule> {
    let fastener = if params.system == SystemId::Wood {
        keys::DELTA_FASTENER
    } else {
        keys::STEEL_FASTENER
    };

    let mut rules = vec![
        insulation_board(params, prices),
        Rule::lot(keys::ALUMINUM_TRACK.name, ItemUnit::Each, TRACK_PER_M2, 100, prices.material_price(keys::ALUMINUM_TRACK)),
        disk_anchor(params, prices, TRACK_ANCHORS_PER_M2),
        Rule::lot(fastener.name, ItemUnit::Each, FASTENERS_PER_M2, 500, prices.material_price(fastener)),
        Rule::material(keys::FOAM_BOND, ItemUnit::Each, Basis::PerArea(TRACK_FOAM_BOND_PER_M2), prices),
        Rule::material(keys::BASE_COAT, ItemUnit::Bag, Basis::PerArea(BASE_COAT_PER_M2), prices),
    ];
    push_tile_finish(&mut rules, params, prices);
    rules
}

fn formwork_rules(params: &CalculationParams, prices: &PriceTable) -> Vec<Rule> {
    let panel_price = prices.thickness_price(params.system.family(), params.thickness, keys::FORM_PANEL_FALLBACK);
    vec![
        Rule::new(
            format!("패턴 거푸집 패널 ({}T)", params.thickness),
            ItemUnit::SquareMeter,
            ItemKind::FormPanel,
            Basis::PerArea(1.0),
            Rounding::None,
            panel_price,
        ),
        Rule::material(keys::RELEASE_AGENT, ItemUnit::Pail, Basis::Coverage(FORM_COVERAGE_M2), prices),
        Rule::material(keys::FOAM_BOND, ItemUnit::Each, Basis::Coverage(FORM_COVERAGE_M2), prices),
        Rule::material(keys::DISK_ANCHOR, ItemUnit::Each, Basis::PerArea(FORM_ANCHORS_PER_M2), prices),
    ]
}
