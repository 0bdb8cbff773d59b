//! Value objects - Immutable objects defined by their attributes

mod level;
mod names;
mod stat;

pub use level::Level;
pub use names::QuestTitle;
pub use stat::{Stat, StatBlock};
