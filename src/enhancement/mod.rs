//! Enhancement economy: the shared per-item ledger and its cost curve.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
