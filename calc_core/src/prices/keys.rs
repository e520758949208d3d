//! Price-table keys and their fallback prices.
//!
//! Every key the rule sets look up is declared here together with the price
//! used when the table has no entry for it. The keys are the trade names
//! the price table is edited under, so they stay in Korean.

/// A price-table key paired with the price used when the key is missing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceKey {
    /// Name the price is stored under
    pub name: &'static str,
    /// Fallback unit price (won)
    pub fallback: f64,
}

impl PriceKey {
    const fn new(name: &'static str, fallback: f64) -> Self {
        PriceKey { name, fallback }
    }
}

// ============================================================================
// Thickness-indexed fallbacks
// ============================================================================

/// Insulation board price for RC and track-frame families when the
/// thickness has no entry
pub const INSULATION_FALLBACK: f64 = 16_000.0;

/// Formwork panel price when the thickness has no entry
pub const FORM_PANEL_FALLBACK: f64 = 17_600.0;

// ============================================================================
// Material prices
// ============================================================================

pub const BASE_COAT: PriceKey = PriceKey::new("Terra Flex 20kg", 21_000.0);
pub const JOINT_CEMENT: PriceKey = PriceKey::new("메지 시멘트", 6_500.0);
pub const ADHESIVE_MORTAR: PriceKey = PriceKey::new("접착 몰탈", 35_000.0);
pub const FOAM_BOND: PriceKey = PriceKey::new("단열재 부착용 폼본드", 6_500.0);
pub const DRILL_BIT: PriceKey = PriceKey::new("드릴비트", 5_000.0);
/// Unbanded anchor, used by the formwork family
pub const DISK_ANCHOR: PriceKey = PriceKey::new("디스크 앙카", 400.0);
pub const DISK_ANCHOR_120: PriceKey = PriceKey::new("디스크 앙카 120mm", 400.0);
pub const DISK_ANCHOR_150: PriceKey = PriceKey::new("디스크 앙카 150mm", 400.0);
pub const DISK_ANCHOR_200: PriceKey = PriceKey::new("디스크 앙카 200mm", 400.0);
pub const DISK_ANCHOR_250: PriceKey = PriceKey::new("디스크 앙카 250mm", 400.0);
pub const ALUMINUM_TRACK: PriceKey = PriceKey::new("알루미늄 트랙", 1_000.0);
pub const STEEL_FASTENER: PriceKey = PriceKey::new("철판피스", 40.0);
pub const DELTA_FASTENER: PriceKey = PriceKey::new("델타피스", 40.0);
pub const BRICK_TILE: PriceKey = PriceKey::new("벽돌타일 (로스율 10%)", 18_000.0);
pub const LONG_BRICK_CORNER: PriceKey = PriceKey::new("롱브릭 코너타일", 1_200.0);
pub const BRICK_CORNER: PriceKey = PriceKey::new("브릭코 코너타일", 1_200.0);
pub const RELEASE_AGENT: PriceKey = PriceKey::new("박리제", 55_000.0);

// ============================================================================
// Labor rates (per ㎡)
// ============================================================================

pub const INSULATION_LABOR: PriceKey = PriceKey::new("단열재 노무비", 23_000.0);
pub const TILE_LABOR: PriceKey = PriceKey::new("타일 노무비", 23_000.0);
pub const JOINT_LABOR: PriceKey = PriceKey::new("메지 시공비", 10_000.0);
pub const REMODEL_INSULATION_LABOR: PriceKey = PriceKey::new("단열재 노무비(리모델링)", 25_000.0);
pub const FORM_LABOR: PriceKey = PriceKey::new("패턴거푸집 시공비", 12_000.0);
