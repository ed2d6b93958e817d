//! Party members: stats, health and experience.

pub mod progression;
pub mod types;

pub use progression::*;
pub use types::*;
