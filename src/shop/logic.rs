//! Shop pricing, stock and purchases. All purchases draw on team gold.

use super::types::*;
use crate::catalog::Catalog;
use crate::character::heal;
use crate::core::constants::{
    POTION_HEAL, POTION_NAME, POTION_PRICE, SHOP_DIFFICULTY_FACTOR, SHOP_DISCOUNT,
};
use crate::core::error::GameError;
use crate::core::game_state::GameState;

/// `floor(catalog_price * 0.9)`
pub fn sale_price(catalog_price: u64) -> u64 {
    (catalog_price as f64 * SHOP_DISCOUNT).floor() as u64
}

/// Whether an item of `difficulty` is stocked for a party whose best member is `max_level`.
pub fn is_stocked(difficulty: u32, max_level: u32) -> bool {
    difficulty as f64 <= SHOP_DIFFICULTY_FACTOR * max_level as f64
}

/// Equipment on sale, easiest first.
pub fn shop_offers(catalog: &Catalog, max_level: u32) -> Vec<ShopOffer> {
    let mut offers: Vec<ShopOffer> = catalog
        .equipment
        .iter()
        .filter(|(_, def)| is_stocked(def.difficulty, max_level))
        .map(|(name, def)| ShopOffer {
            item: name.clone(),
            price: sale_price(def.shop_price),
            part: def.part,
            attack: def.attack,
            defense: def.defense,
            difficulty: def.difficulty,
        })
        .collect();
    offers.sort_by(|a, b| a.difficulty.cmp(&b.difficulty).then_with(|| a.item.cmp(&b.item)));
    offers
}

/// Buy `item` for party member `member`. The price comes from the current stock.
pub fn buy_equipment(
    state: &mut GameState,
    catalog: &Catalog,
    item: &str,
    member: usize,
) -> Result<PurchaseReceipt, GameError> {
    let offer = shop_offers(catalog, state.max_level())
        .into_iter()
        .find(|offer| offer.item == item)
        .ok_or_else(|| GameError::UnknownItem(item.to_string()))?;
    state.member(member)?;

    let team_gold_left = state.spend_gold(offer.price)?;
    let buyer = state.member_mut(member)?;
    buyer.inventory.push(offer.item.clone());
    tracing::info!(item, buyer = %buyer.name, price = offer.price, "equipment purchased");
    Ok(PurchaseReceipt {
        item: offer.item,
        member: buyer.name.clone(),
        price: offer.price,
        team_gold_left,
        healed: None,
    })
}

/// Buy and immediately drink a healing potion.
/// A member already at full health is refused before any gold moves.
pub fn buy_potion(state: &mut GameState, member: usize) -> Result<PurchaseReceipt, GameError> {
    let target = state.member(member)?;
    if target.is_full_health() {
        return Err(GameError::AlreadyFullHealth {
            name: target.name.clone(),
        });
    }

    let team_gold_left = state.spend_gold(POTION_PRICE)?;
    let target = state.member_mut(member)?;
    let healed = heal(target, POTION_HEAL);
    tracing::info!(member = %target.name, healed, "healing potion used");
    Ok(PurchaseReceipt {
        item: POTION_NAME.to_string(),
        member: target.name.clone(),
        price: POTION_PRICE,
        team_gold_left,
        healed: Some(healed),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::EquipmentDef;
    use crate::character::EquipmentSlot;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::default();
        for (name, difficulty, price) in [("Stick", 1, 55), ("Axe", 3, 120), ("Katana", 9, 900)] {
            catalog.equipment.insert(
                name.into(),
                EquipmentDef {
                    attack: difficulty * 2,
                    defense: 0,
                    part: EquipmentSlot::Weapon,
                    difficulty,
                    shop_price: price,
                    image: String::new(),
                },
            );
        }
        catalog
    }

    #[test]
    fn test_sale_price_floors() {
        assert_eq!(sale_price(55), 49);
        assert_eq!(sale_price(100), 90);
        assert_eq!(sale_price(0), 0);
    }

    #[test]
    fn test_offers_filtered_and_sorted() {
        let offers = shop_offers(&catalog(), 2);
        let names: Vec<_> = offers.iter().map(|o| o.item.as_str()).collect();
        assert_eq!(names, vec!["Stick", "Axe"]);
        assert_eq!(shop_offers(&catalog(), 6).len(), 3);
    }

    #[test]
    fn test_buy_equipment() {
        let mut state = GameState::new("t");
        let receipt = buy_equipment(&mut state, &catalog(), "Stick", 1).unwrap();
        assert_eq!(receipt.price, 49);
        assert_eq!(state.team_gold, 51);
        assert_eq!(state.members[1].inventory.last().map(String::as_str), Some("Stick"));
    }

    #[test]
    fn test_buy_equipment_insufficient_gold() {
        let mut state = GameState::new("t");
        state.members[0].level = 2;
        let before = state.clone();
        let err = buy_equipment(&mut state, &catalog(), "Axe", 0).unwrap_err();
        assert!(matches!(err, GameError::InsufficientGold { needed: 108, .. }));
        assert_eq!(state, before);
    }

    #[test]
    fn test_buy_unstocked_item_refused() {
        let mut state = GameState::new("t");
        assert!(matches!(
            buy_equipment(&mut state, &catalog(), "Katana", 0),
            Err(GameError::UnknownItem(_))
        ));
    }

    #[test]
    fn test_potion_refused_at_full_health() {
        let mut state = GameState::new("t");
        let err = buy_potion(&mut state, 0).unwrap_err();
        assert!(matches!(err, GameError::AlreadyFullHealth { .. }));
        assert_eq!(state.team_gold, 100);
    }

    #[test]
    fn test_potion_heals_capped() {
        let mut state = GameState::new("t");
        state.members[0].health = 30;
        let receipt = buy_potion(&mut state, 0).unwrap();
        assert_eq!(receipt.healed, Some(70));
        assert_eq!(state.members[0].health, 100);
        assert_eq!(state.team_gold, 90);
    }
}
