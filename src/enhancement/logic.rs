use super::types::*;
use crate::catalog::Catalog;
use crate::core::constants::{ENHANCE_BASE_COST, ENHANCE_BONUS_PER_LEVEL, ENHANCE_COST_RATE};
use crate::core::error::GameError;

/// `floor(base * (1 + level * 0.1))`
pub fn enhanced_stat(base: u32, level: u32) -> u32 {
    (base as f64 * (1.0 + level as f64 * ENHANCE_BONUS_PER_LEVEL)).floor() as u32
}

/// Gold needed to go from `current_level` to `current_level + 1`.
pub fn enhancement_cost(current_level: u32) -> u64 {
    (ENHANCE_BASE_COST * ENHANCE_COST_RATE.powi(current_level as i32)).floor() as u64
}

/// Total gold to raise an item from level 0 to `levels`.
pub fn cumulative_cost(levels: u32) -> u64 {
    (0..levels).map(enhancement_cost).sum()
}

/// Spend team gold to raise `item` one level in the shared ledger.
/// Refused without side effects when gold is short or the item is unknown.
pub fn enhance(
    ledger: &mut EnhancementLedger,
    team_gold: &mut u64,
    catalog: &Catalog,
    item: &str,
) -> Result<EnhanceReceipt, GameError> {
    if catalog.equipment(item).is_none() {
        return Err(GameError::UnknownItem(item.to_string()));
    }
    let cost = enhancement_cost(ledger.level(item));
    if *team_gold < cost {
        return Err(GameError::insufficient_gold(cost, *team_gold));
    }

    *team_gold -= cost;
    let new_level = ledger.increment(item);
    tracing::info!(item, new_level, cost, "equipment enhanced");
    Ok(EnhanceReceipt {
        item: item.to_string(),
        new_level,
        cost,
        team_gold_left: *team_gold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EquipmentDef;
    use crate::character::EquipmentSlot;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog.equipment.insert(
            "Wooden Sword".into(),
            EquipmentDef {
                attack: 10,
                defense: 0,
                part: EquipmentSlot::Weapon,
                difficulty: 1,
                shop_price: 50,
                image: String::new(),
            },
        );
        catalog
    }

    #[test]
    fn test_cost_curve() {
        assert_eq!(enhancement_cost(0), 50);
        assert_eq!(enhancement_cost(1), 75);
        assert_eq!(enhancement_cost(2), 112);
        assert_eq!(enhancement_cost(3), 168);
    }

    #[test]
    fn test_enhanced_stat_floors() {
        assert_eq!(enhanced_stat(10, 0), 10);
        assert_eq!(enhanced_stat(10, 3), 13);
        assert_eq!(enhanced_stat(7, 1), 7);
        assert_eq!(enhanced_stat(0, 5), 0);
    }

    #[test]
    fn test_enhance_debits_and_increments() {
        let catalog = catalog();
        let mut ledger = EnhancementLedger::new();
        let mut gold = 130;
        let receipt = enhance(&mut ledger, &mut gold, &catalog, "Wooden Sword").unwrap();
        assert_eq!(receipt.cost, 50);
        assert_eq!(receipt.new_level, 1);
        assert_eq!(gold, 80);
        enhance(&mut ledger, &mut gold, &catalog, "Wooden Sword").unwrap();
        assert_eq!(gold, 5);
        assert_eq!(ledger.level("Wooden Sword"), 2);
    }

    #[test]
    fn test_enhance_refused_without_gold() {
        let catalog = catalog();
        let mut ledger = EnhancementLedger::new();
        let mut gold = 49;
        let err = enhance(&mut ledger, &mut gold, &catalog, "Wooden Sword").unwrap_err();
        assert!(matches!(
            err,
            GameError::InsufficientGold {
                needed: 50,
                available: 49
            }
        ));
        assert_eq!(gold, 49);
        assert_eq!(ledger.level("Wooden Sword"), 0);
    }

    #[test]
    fn test_enhance_unknown_item() {
        let mut ledger = EnhancementLedger::new();
        let mut gold = 1000;
        assert!(matches!(
            enhance(&mut ledger, &mut gold, &catalog(), "Laser Sword"),
            Err(GameError::UnknownItem(_))
        ));
        assert_eq!(gold, 1000);
    }

    #[test]
    fn test_cumulative_cost() {
        assert_eq!(cumulative_cost(0), 0);
        assert_eq!(cumulative_cost(3), 50 + 75 + 112);
    }
}
