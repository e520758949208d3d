//! Rule evaluation.
//!
//! Evaluates the rule set of a parameter set into priced rows, one row per
//! rule, in rule order. Rows with the same name are kept separate.

use tracing::debug;

use super::rules::{rule_set, Rule};
use super::{CalculationParams, MaterialItem};
use crate::prices::PriceTable;

/// Compute the priced rows of a quotation.
///
/// Pure and cheap; callers re-run it on every parameter change. A zero
/// thickness yields an empty list. Inputs are not validated, see
/// [`CalculationParams::validate`].
pub fn calculate_materials(params: &CalculationParams, prices: &PriceTable) -> Vec<MaterialItem> {
    let rules = rule_set(params, prices);
    if rules.is_empty() {
        debug!(system = params.system.code(), "no thickness selected, quotation is empty");
    }
    rules.into_iter().map(|rule| evaluate(rule, params.area)).collect()
}

fn evaluate(rule: Rule, area: f64) -> MaterialItem {
    let quantity = rule.rounding.apply(rule.basis.raw_quantity(area));
    MaterialItem {
        extended_price: rule.unit_price * quantity,
        name: rule.name,
        unit: rule.unit,
        quantity,
        unit_price: rule.unit_price,
        kind: rule.kind,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::{CornerTileKind, ItemKind, SystemId};
    use crate::units::ItemUnit;

    fn rc_scenario() -> CalculationParams {
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

    fn find<'a>(items: &'a [MaterialItem], name: &str) -> &'a MaterialItem {
        items
            .iter()
            .find(|item| item.name == name)
            .unwrap_or_else(|| panic!("row {name} missing"))
    }

    #[test]
    fn test_rc_scenario() {
        let items = calculate_materials(&rc_scenario(), &PriceTable::default());
        assert_eq!(items.len(), 12);

        let board = &items[0];
        assert_eq!(board.kind, ItemKind::InsulationBoard);
        assert!((board.quantity - 129.6).abs() < 1e-9);
        assert_eq!(board.unit_price, 16_000.0);
        assert!((board.extended_price - 2_073_600.0).abs() < 1e-6);

        let anchor = &items[1];
        assert_eq!(anchor.name, "디스크 앙카 120mm");
        assert_eq!(anchor.unit, ItemUnit::Set);
        assert_eq!(anchor.quantity, 700.0);
        assert_eq!(anchor.unit_price, 400.0);
        assert_eq!(anchor.extended_price, 280_000.0);
    }

    #[test]
    fn test_rc_consumable_rounding() {
        let items = calculate_materials(&rc_scenario(), &PriceTable::default());
        assert_eq!(find(&items, "접착 몰탈").quantity, 6.0);
        // 0.1666667 * 120 = 20.000004, rounds up
        assert_eq!(find(&items, "단열재 부착용 폼본드").quantity, 21.0);
        assert_eq!(find(&items, "드릴비트").quantity, 12.0);
        assert_eq!(find(&items, "Terra Flex 20kg").quantity, 21.0);
        assert_eq!(find(&items, "벽돌타일 (로스율 10%)").quantity, 132.0);
        assert_eq!(find(&items, "메지 시멘트").quantity, 32.0);
        assert_eq!(find(&items, "단열재 노무비").quantity, 120.0);
    }

    #[test]
    fn test_labor_rows_gated() {
        let mut params = rc_scenario();
        params.labor_included = false;
        let items = calculate_materials(&params, &PriceTable::default());
        assert!(items.iter().all(|item| item.kind != ItemKind::Labor));
        for name in ["단열재 노무비", "타일 노무비", "메지 시공비"] {
            assert!(items.iter().all(|item| item.name != name));
        }
    }

    #[test]
    fn test_extended_price_is_exact_product() {
        let prices = PriceTable::default();
        for system in SystemId::ALL {
            for area in [0.0, 1.0, 37.5, 120.0, 999.9] {
                let params = CalculationParams {
                    system,
                    area,
                    thickness: if system == SystemId::Form { 60 } else { 180 },
                    corner_tile: Some(CornerTileKind::BrickCorner),
                    corner_tile_length: 3.3,
                    ..rc_scenario()
                };
                for item in calculate_materials(&params, &prices) {
                    assert_eq!(item.extended_price, item.unit_price * item.quantity, "{}", item.name);
                }
            }
        }
    }

    #[test]
    fn test_corner_tile_independent_of_area() {
        let prices = PriceTable::default();
        let mut params = rc_scenario();
        params.corner_tile = Some(CornerTileKind::LongBrick);
        params.corner_tile_length = 2.5;

        let mut quantities = Vec::new();
        for area in [10.0, 120.0, 5_000.0] {
            params.area = area;
            let items = calculate_materials(&params, &prices);
            let corner = find(&items, "롱브릭 코너타일");
            assert_eq!(corner.unit, ItemUnit::Sheet);
            quantities.push(corner.quantity);
        }
        assert_eq!(quantities, vec![40.0, 40.0, 40.0]);
    }

    #[test]
    fn test_corner_tile_keeps_fraction() {
        let mut params = rc_scenario();
        params.system = SystemId::Lgs;
        params.corner_tile = Some(CornerTileKind::BrickCorner);
        params.corner_tile_length = 3.3;
        let items = calculate_materials(&params, &PriceTable::default());
        let corner = find(&items, "브릭코 코너타일");
        assert!((corner.quantity - 46.2).abs() < 1e-9);
        assert_eq!(corner.unit_price, 1_200.0);
    }

    #[test]
    fn test_track_lots() {
        let mut params = rc_scenario();
        params.system = SystemId::Lgs;
        let items = calculate_materials(&params, &PriceTable::default());
        // 2.7 * 120 = 324 -> 400
        assert_eq!(find(&items, "알루미늄 트랙").quantity, 400.0);
        // 3 * 120 = 360 -> 400
        assert_eq!(find(&items, "디스크 앙카 120mm").quantity, 400.0);
        // 5 * 120 = 600 -> 1000
        assert_eq!(find(&items, "철판피스").quantity, 1_000.0);
        // 0.1538 * 120 = 18.456 -> 19
        assert_eq!(find(&items, "단열재 부착용 폼본드").quantity, 19.0);
    }

    #[test]
    fn test_form_scenario() {
        let params = CalculationParams {
            system: SystemId::Form,
            area: 90.0,
            thickness: 60,
            ..rc_scenario()
        };
        let items = calculate_materials(&params, &PriceTable::default());
        assert_eq!(items.len(), 4);
        assert_eq!(items[0].quantity, 90.0);
        assert_eq!(items[0].extended_price, 90.0 * 17_600.0);
        assert_eq!(items[1].name, "박리제");
        assert_eq!(items[1].quantity, 3.0);
        assert_eq!(items[2].quantity, 3.0);
        assert_eq!(items[3].name, "디스크 앙카");
        assert_eq!(items[3].quantity, 73.0);
        assert_eq!(items[3].unit, ItemUnit::Each);
    }

    #[test]
    fn test_fire_resistant_overrides_table() {
        let mut prices = PriceTable::default();
        prices.rc_thickness_prices.insert(150, 99_999.0);
        let params = CalculationParams {
            thickness: 150,
            is_fire_resistant: true,
            ..rc_scenario()
        };
        let items = calculate_materials(&params, &prices);
        assert_eq!(items[0].unit_price, 30_000.0);
        assert!(items[0].name.ends_with(" - 준불연"));
        assert_eq!(items[1].name, "디스크 앙카 150mm");
        assert_eq!(items[1].unit_price, 450.0);
    }

    #[test]
    fn test_empty_price_table_still_quotes() {
        let prices: PriceTable = serde_json::from_str("{}").unwrap();
        let items = calculate_materials(&rc_scenario(), &prices);
        assert_eq!(items.len(), 12);
        assert_eq!(items[0].unit_price, 16_000.0);
        assert_eq!(find(&items, "메지 시공비").unit_price, 10_000.0);
    }

    #[test]
    fn test_zero_thickness_is_empty() {
        let mut params = rc_scenario();
        params.thickness = 0;
        assert!(calculate_materials(&params, &PriceTable::default()).is_empty());
    }
}
