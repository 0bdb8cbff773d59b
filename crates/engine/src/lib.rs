//! LevelUp Engine library.
//!
//! Persistence and session ownership for the progression engine in
//! `levelup-domain`.
//!
//! ## Structure
//!
//! - `infrastructure/` - Port traits and their adapters (storage, clock, config)
//! - `persistence` - Loads and saves the player record under a fixed key
//! - `session` - Single owner of the live record; applies transitions and saves
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod persistence;
pub mod session;

pub use app::App;
pub use persistence::{LoadOutcome, PersistenceError, PersistenceGateway};
pub use session::{PlayerSession, RecordWriter, SaveOutcome, WriteStatus};
