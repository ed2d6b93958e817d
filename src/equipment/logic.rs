//! Equipment resolver.
//!
//! Owns the equip/unequip transitions and the attack/defense a character
//! brings to a fight. An item name lives either in the inventory or in one
//! slot, never both for the same copy.

use super::types::StatsOverview;
use crate::catalog::{Catalog, EquipmentDef};
use crate::character::{Character, EquipmentSlot};
use crate::core::constants::{ATTACK_PER_LEVEL, BASE_ATTACK, BASE_DEFENSE};
use crate::core::error::GameError;
use crate::enhancement::{enhanced_stat, EnhancementLedger};

/// Recompute the cached base attack/defense sums from the equipped slots.
/// Unknown item names contribute nothing.
pub fn recompute_stats(character: &mut Character, catalog: &Catalog) {
    let (attack, defense) = character
        .equipped
        .iter_equipped()
        .filter_map(|(_, name)| catalog.equipment(name))
        .fold((0, 0), |(atk, def), item| (atk + item.attack, def + item.defense));
    character.weapon_attack = attack;
    character.weapon_defense = defense;
}

/// Move `item` from the inventory into its slot.
///
/// Whatever occupied the slot goes back to the inventory first. Returns the
/// displaced item, if any.
pub fn equip(
    character: &mut Character,
    catalog: &Catalog,
    item: &str,
) -> Result<Option<String>, GameError> {
    let def = catalog
        .equipment(item)
        .ok_or_else(|| GameError::UnknownItem(item.to_string()))?;
    let index = character
        .inventory
        .iter()
        .position(|owned| owned == item)
        .ok_or_else(|| GameError::not_owned(item))?;

    let owned = character.inventory.remove(index);
    let displaced = character.equipped.replace(def.part, Some(owned));
    if let Some(old) = &displaced {
        character.inventory.push(old.clone());
    }
    recompute_stats(character, catalog);
    tracing::debug!(character = %character.name, item, slot = %def.part, "equipped");
    Ok(displaced)
}

/// Clear `slot`, appending its item to the inventory. Returns the item name.
pub fn unequip(
    character: &mut Character,
    catalog: &Catalog,
    slot: EquipmentSlot,
) -> Result<String, GameError> {
    let item = character
        .equipped
        .replace(slot, None)
        .ok_or(GameError::SlotEmpty(slot))?;
    character.inventory.push(item.clone());
    recompute_stats(character, catalog);
    tracing::debug!(character = %character.name, item = %item, %slot, "unequipped");
    Ok(item)
}

/// Drop one copy of `item` from the inventory.
pub fn discard_item(character: &mut Character, item: &str) -> Result<(), GameError> {
    let index = character
        .inventory
        .iter()
        .position(|owned| owned == item)
        .ok_or_else(|| GameError::not_owned(item))?;
    character.inventory.remove(index);
    Ok(())
}

/// Sum of enhanced attack over every equipped item.
pub fn effective_attack(character: &Character, catalog: &Catalog, ledger: &EnhancementLedger) -> u32 {
    enhanced_sum(character, catalog, ledger, |def| def.attack)
}

/// Sum of enhanced defense over every equipped item.
pub fn effective_defense(
    character: &Character,
    catalog: &Catalog,
    ledger: &EnhancementLedger,
) -> u32 {
    enhanced_sum(character, catalog, ledger, |def| def.defense)
}

fn enhanced_sum(
    character: &Character,
    catalog: &Catalog,
    ledger: &EnhancementLedger,
    stat: impl Fn(&EquipmentDef) -> u32,
) -> u32 {
    character
        .equipped
        .iter_equipped()
        .filter_map(|(_, name)| catalog.equipment(name).map(|def| (name, def)))
        .map(|(name, def)| enhanced_stat(stat(def), ledger.level(name)))
        .sum()
}

/// Inventory items that exist in the equipment catalog, in inventory order.
pub fn equipable_items<'a>(
    character: &'a Character,
    catalog: &'a Catalog,
) -> Vec<(&'a str, &'a EquipmentDef)> {
    character
        .inventory
        .iter()
        .filter_map(|name| catalog.equipment(name).map(|def| (name.as_str(), def)))
        .collect()
}

pub fn base_attack(level: u32) -> u32 {
    BASE_ATTACK + level * ATTACK_PER_LEVEL
}

pub fn stats_overview(
    character: &Character,
    catalog: &Catalog,
    ledger: &EnhancementLedger,
) -> StatsOverview {
    StatsOverview {
        base_attack: base_attack(character.level),
        base_defense: BASE_DEFENSE,
        equipment_attack: effective_attack(character, catalog, ledger),
        equipment_defense: effective_defense(character, catalog, ledger),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(attack: u32, defense: u32, part: EquipmentSlot) -> EquipmentDef {
        EquipmentDef {
            attack,
            defense,
            part,
            difficulty: 1,
            shop_price: 100,
            image: String::new(),
        }
    }

    fn catalog() -> Catalog {
        let mut catalog = Catalog::default();
        catalog
            .equipment
            .insert("Wooden Sword".into(), item(10, 0, EquipmentSlot::Weapon));
        catalog
            .equipment
            .insert("Iron Sword".into(), item(20, 2, EquipmentSlot::Weapon));
        catalog
            .equipment
            .insert("Leather Boots".into(), item(0, 5, EquipmentSlot::Shoes));
        catalog
    }

    fn hero() -> Character {
        Character::new("Hero", "")
            .with_item("Wooden Sword")
            .with_item("Iron Sword")
            .with_item("Leather Boots")
    }

    #[test]
    fn test_equip_moves_item_out_of_inventory() {
        let catalog = catalog();
        let mut c = hero();
        assert_eq!(equip(&mut c, &catalog, "Wooden Sword").unwrap(), None);
        assert_eq!(c.equipped.get(EquipmentSlot::Weapon), Some("Wooden Sword"));
        assert!(!c.owns("Wooden Sword"));
        assert_eq!(c.weapon_attack, 10);
    }

    #[test]
    fn test_equip_swaps_previous_item_back() {
        let catalog = catalog();
        let mut c = hero();
        equip(&mut c, &catalog, "Wooden Sword").unwrap();
        let displaced = equip(&mut c, &catalog, "Iron Sword").unwrap();
        assert_eq!(displaced.as_deref(), Some("Wooden Sword"));
        assert_eq!(c.inventory, vec!["Leather Boots", "Wooden Sword"]);
        assert_eq!(c.weapon_attack, 20);
        assert_eq!(c.weapon_defense, 2);
    }

    #[test]
    fn test_equip_refusals_leave_character_unchanged() {
        let catalog = catalog();
        let mut c = Character::new("Hero", "").with_item("Mystery Rock");
        let before = c.clone();
        assert!(matches!(
            equip(&mut c, &catalog, "Iron Sword"),
            Err(GameError::ItemNotOwned { .. })
        ));
        assert!(matches!(
            equip(&mut c, &catalog, "Mystery Rock"),
            Err(GameError::UnknownItem(_))
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn test_unequip_empty_slot() {
        let mut c = hero();
        assert!(matches!(
            unequip(&mut c, &catalog(), EquipmentSlot::Armor),
            Err(GameError::SlotEmpty(EquipmentSlot::Armor))
        ));
    }

    #[test]
    fn test_enhancement_applies_at_damage_time() {
        let catalog = catalog();
        let mut c = hero();
        equip(&mut c, &catalog, "Wooden Sword").unwrap();
        equip(&mut c, &catalog, "Leather Boots").unwrap();
        let mut ledger = EnhancementLedger::new();
        ledger.increment("Wooden Sword");
        ledger.increment("Wooden Sword");
        assert_eq!(effective_attack(&c, &catalog, &ledger), 12);
        assert_eq!(effective_defense(&c, &catalog, &ledger), 5);
        // cached sum stays at base stats
        assert_eq!(c.weapon_attack, 10);
    }

    #[test]
    fn test_discard_item() {
        let mut c = hero().with_item("Wooden Sword");
        discard_item(&mut c, "Wooden Sword").unwrap();
        assert_eq!(c.inventory.iter().filter(|i| *i == "Wooden Sword").count(), 1);
        assert!(discard_item(&mut c, "Golden Crown").is_err());
    }

    #[test]
    fn test_equipable_items_skip_unknown() {
        let catalog = catalog();
        let c = Character::new("Hero", "")
            .with_item("Healing Herb")
            .with_item("Leather Boots");
        let names: Vec<_> = equipable_items(&c, &catalog).into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["Leather Boots"]);
    }

    #[test]
    fn test_stats_overview() {
        let catalog = catalog();
        let mut c = hero();
        c.level = 3;
        equip(&mut c, &catalog, "Iron Sword").unwrap();
        let stats = stats_overview(&c, &catalog, &EnhancementLedger::new());
        assert_eq!(stats.base_attack, 16);
        assert_eq!(stats.total_attack(), 36);
        assert_eq!(stats.total_defense(), 12);
    }
}
