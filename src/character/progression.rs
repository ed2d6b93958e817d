//! Health and experience rules for party members.
//!
//! Every mutation here keeps `0 <= health <= max_health`.

use super::types::Character;
use crate::core::constants::{EXP_PER_LEVEL, HEALTH_PER_LEVEL};

/// Experience needed to leave `level`.
pub fn required_exp(level: u32) -> u64 {
    level as u64 * EXP_PER_LEVEL
}

pub fn max_health_for_level(level: u32) -> u32 {
    level.saturating_mul(HEALTH_PER_LEVEL)
}

/// Apply damage, flooring health at 0. Returns the damage actually absorbed.
pub fn take_damage(character: &mut Character, amount: u32) -> u32 {
    let absorbed = amount.min(character.health);
    character.health -= absorbed;
    absorbed
}

/// Heal up to max health. Returns the amount actually restored.
pub fn heal(character: &mut Character, amount: u32) -> u32 {
    let missing = character.max_health.saturating_sub(character.health);
    let restored = amount.min(missing);
    character.health += restored;
    restored
}

/// Restore a downed character to `ceil(max_health * fraction)`.
pub fn revive(character: &mut Character, fraction: f64) {
    let target = (character.max_health as f64 * fraction).ceil() as u32;
    character.health = target.min(character.max_health);
}

/// Single-step level check.
///
/// Grants at most one level per call: when `exp >= level * 100` the threshold is
/// subtracted, level rises by one and health is refilled at the new maximum.
pub fn check_level_up(character: &mut Character) -> bool {
    let required = required_exp(character.level);
    if character.exp < required {
        return false;
    }
    character.exp -= required;
    character.level += 1;
    character.max_health = max_health_for_level(character.level);
    character.health = character.max_health;
    true
}

/// Repeat `check_level_up` until it stops granting levels. Returns levels gained.
pub fn settle_level_ups(character: &mut Character) -> u32 {
    let mut gained = 0;
    while check_level_up(character) {
        gained += 1;
    }
    gained
}

/// Add experience and settle any level-ups. Returns levels gained.
pub fn grant_exp(character: &mut Character, exp: u64) -> u32 {
    character.exp += exp;
    settle_level_ups(character)
}

/// Highest level in the party (1 for an empty party).
pub fn party_max_level(members: &[Character]) -> u32 {
    members.iter().map(|c| c.level).max().unwrap_or(1)
}
