//! Aggregates - consistency boundaries for progression state

pub mod player_record;

pub use player_record::PlayerRecord;
