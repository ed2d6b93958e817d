use crate::character::EquipmentSlot;
use crate::quiz::QuestionBank;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Static equipment entry, keyed by item name in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquipmentDef {
    #[serde(default)]
    pub attack: u32,
    #[serde(default)]
    pub defense: u32,
    pub part: EquipmentSlot,
    /// Minimum party level the item is meant for.
    #[serde(default)]
    pub difficulty: u32,
    #[serde(default)]
    pub shop_price: u64,
    #[serde(default)]
    pub image: String,
}

/// Static monster entry, keyed by monster name in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterDef {
    pub level: u32,
    pub health_range: [u32; 2],
    pub attack_range: [u32; 2],
    pub defense_range: [u32; 2],
    pub exp: u64,
    pub gold: u64,
    #[serde(default)]
    pub image: String,
}

/// A battle map; encounters draw monsters whose level is inside `level_range`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapDef {
    pub name: String,
    pub level_range: [u32; 2],
    pub image: String,
    pub description: String,
}

impl MapDef {
    pub fn contains_level(&self, level: u32) -> bool {
        (self.level_range[0]..=self.level_range[1]).contains(&level)
    }
}

/// All read-only content the engine consults.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub equipment: BTreeMap<String, EquipmentDef>,
    pub monsters: BTreeMap<String, MonsterDef>,
    pub maps: Vec<MapDef>,
    pub questions: QuestionBank,
}

impl Catalog {
    pub fn equipment(&self, name: &str) -> Option<&EquipmentDef> {
        self.equipment.get(name)
    }

    pub fn monster(&self, name: &str) -> Option<&MonsterDef> {
        self.monsters.get(name)
    }

    pub fn map(&self, name: &str) -> Option<&MapDef> {
        self.maps.iter().find(|map| map.name == name)
    }

    /// Monster names whose level lies within `level_range` (inclusive).
    pub fn monsters_for_map(&self, level_range: [u32; 2]) -> Vec<&str> {
        self.monsters
            .iter()
            .filter(|(_, def)| def.level >= level_range[0] && def.level <= level_range[1])
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Equipment names with `difficulty <= level`.
    pub fn equipment_for_level(&self, level: u32) -> Vec<&str> {
        self.equipment
            .iter()
            .filter(|(_, def)| def.difficulty <= level)
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monster(level: u32) -> MonsterDef {
        MonsterDef {
            level,
            health_range: [10, 20],
            attack_range: [5, 8],
            defense_range: [0, 2],
            exp: 10,
            gold: 5,
            image: String::new(),
        }
    }

    fn gear(difficulty: u32) -> EquipmentDef {
        EquipmentDef {
            attack: 3,
            defense: 0,
            part: EquipmentSlot::Weapon,
            difficulty,
            shop_price: 100,
            image: String::new(),
        }
    }

    #[test]
    fn test_monsters_for_map_inclusive_bounds() {
        let mut catalog = Catalog::default();
        catalog.monsters.insert("Slime".into(), monster(1));
        catalog.monsters.insert("Wolf".into(), monster(5));
        catalog.monsters.insert("Golem".into(), monster(6));
        assert_eq!(catalog.monsters_for_map([1, 5]), vec!["Slime", "Wolf"]);
        assert_eq!(catalog.monsters_for_map([6, 10]), vec!["Golem"]);
        assert!(catalog.monsters_for_map([11, 15]).is_empty());
    }

    #[test]
    fn test_equipment_for_level() {
        let mut catalog = Catalog::default();
        catalog.equipment.insert("Stick".into(), gear(1));
        catalog.equipment.insert("Blade".into(), gear(4));
        assert_eq!(catalog.equipment_for_level(3), vec!["Stick"]);
        assert_eq!(catalog.equipment_for_level(4).len(), 2);
    }

    #[test]
    fn test_equipment_def_from_json() {
        let json = r#"{"attack": 5, "defense": 1, "part": "gloves", "difficulty": 2, "shop_price": 80, "image": "g.png"}"#;
        let def: EquipmentDef = serde_json::from_str(json).unwrap();
        assert_eq!(def.part, EquipmentSlot::Gloves);
        assert_eq!(def.shop_price, 80);
    }
}
