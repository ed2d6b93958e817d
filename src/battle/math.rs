//! Damage and reward arithmetic for quiz battles.

use crate::catalog::Catalog;
use crate::character::Character;
use crate::core::constants::{MIN_DAMAGE, PARTY_FLAT_DEFENSE};
use crate::enhancement::EnhancementLedger;
use crate::equipment::{base_attack, effective_attack};

/// Attack one member brings: `7 + level * 3` plus enhanced equipment attack.
pub fn member_attack(character: &Character, catalog: &Catalog, ledger: &EnhancementLedger) -> u32 {
    base_attack(character.level) + effective_attack(character, catalog, ledger)
}

/// Damage dealt to the monster on a correct answer.
pub fn correct_answer_damage(total_attack: u32, monster_defense: u32) -> u32 {
    total_attack.saturating_sub(monster_defense).max(MIN_DAMAGE)
}

/// Damage the monster deals on a wrong or missing answer.
pub fn wrong_answer_damage(monster_attack: u32) -> u32 {
    monster_attack
        .saturating_sub(PARTY_FLAT_DEFENSE)
        .max(MIN_DAMAGE)
}

/// Per-member share of team damage, rounded up.
pub fn split_damage(damage: u32, members: usize) -> u32 {
    if members == 0 {
        return damage;
    }
    damage.div_ceil(members as u32)
}

/// Per-member share of team exp, rounded down.
pub fn split_exp(exp: u64, members: usize) -> u64 {
    if members == 0 {
        return 0;
    }
    exp / members as u64
}
