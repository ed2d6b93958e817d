//! Quiz engine: question selection, adjudication and the answer window.

pub mod logic;
pub mod timer;
pub mod types;

pub use logic::*;
pub use timer::{QuestionTimer, Submission};
pub use types::*;
