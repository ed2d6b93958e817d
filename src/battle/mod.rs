//! Battles: encounter generation, turn resolution, fleeing and payouts.

pub mod logic;
pub mod math;
pub mod types;

pub use logic::*;
pub use math::*;
pub use types::*;
