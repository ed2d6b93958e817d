//! Read-only content: equipment, monsters, maps and question banks.

pub mod loader;
pub mod maps;
pub mod types;

pub use loader::{load_catalog, CatalogLoad};
pub use maps::default_maps;
pub use types::*;
