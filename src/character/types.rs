use crate::core::constants::HEALTH_PER_LEVEL;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five body slots an equipment piece can occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EquipmentSlot {
    Weapon,
    Armor,
    Gloves,
    Pants,
    Shoes,
}

impl EquipmentSlot {
    /// All slots in display order.
    pub const ALL: [EquipmentSlot; 5] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Armor,
        EquipmentSlot::Gloves,
        EquipmentSlot::Pants,
        EquipmentSlot::Shoes,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Armor => "armor",
            EquipmentSlot::Gloves => "gloves",
            EquipmentSlot::Pants => "pants",
            EquipmentSlot::Shoes => "shoes",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.name().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for EquipmentSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Item names currently worn by a character, one per slot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipped {
    #[serde(default)]
    pub weapon: Option<String>,
    #[serde(default)]
    pub armor: Option<String>,
    #[serde(default)]
    pub gloves: Option<String>,
    #[serde(default)]
    pub pants: Option<String>,
    #[serde(default)]
    pub shoes: Option<String>,
}

impl Equipped {
    pub fn get(&self, slot: EquipmentSlot) -> Option<&str> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_deref(),
            EquipmentSlot::Armor => self.armor.as_deref(),
            EquipmentSlot::Gloves => self.gloves.as_deref(),
            EquipmentSlot::Pants => self.pants.as_deref(),
            EquipmentSlot::Shoes => self.shoes.as_deref(),
        }
    }

    /// Replace the slot's content, returning whatever was there.
    pub fn replace(&mut self, slot: EquipmentSlot, item: Option<String>) -> Option<String> {
        let target = match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Armor => &mut self.armor,
            EquipmentSlot::Gloves => &mut self.gloves,
            EquipmentSlot::Pants => &mut self.pants,
            EquipmentSlot::Shoes => &mut self.shoes,
        };
        std::mem::replace(target, item)
    }

    /// (slot, item name) for every occupied slot, in slot order.
    pub fn iter_equipped(&self) -> impl Iterator<Item = (EquipmentSlot, &str)> {
        EquipmentSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|name| (slot, name)))
    }

    pub fn contains(&self, item: &str) -> bool {
        self.iter_equipped().any(|(_, name)| name == item)
    }
}

/// A playable party member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub level: u32,
    pub exp: u64,
    pub health: u32,
    pub max_health: u32,
    /// Personal purse. Spending always draws on team gold.
    #[serde(default)]
    pub gold: u64,
    /// Owned, unequipped item names; duplicates allowed.
    #[serde(default)]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub equipped: Equipped,
    /// Cached sum of base attack over equipped items.
    #[serde(default)]
    pub weapon_attack: u32,
    /// Cached sum of base defense over equipped items.
    #[serde(default)]
    pub weapon_defense: u32,
    #[serde(default)]
    pub portrait: String,
}

impl Character {
    /// A fresh level-1 character at full health.
    pub fn new(name: impl Into<String>, portrait: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: 1,
            exp: 0,
            health: HEALTH_PER_LEVEL,
            max_health: HEALTH_PER_LEVEL,
            gold: 0,
            inventory: Vec::new(),
            equipped: Equipped::default(),
            weapon_attack: 0,
            weapon_defense: 0,
            portrait: portrait.into(),
        }
    }

    pub fn with_item(mut self, item: impl Into<String>) -> Self {
        self.inventory.push(item.into());
        self
    }

    pub fn is_downed(&self) -> bool {
        self.health == 0
    }

    pub fn is_full_health(&self) -> bool {
        self.health >= self.max_health
    }

    pub fn owns(&self, item: &str) -> bool {
        self.inventory.iter().any(|owned| owned == item)
    }
}
