//! Infrastructure: port traits and the adapters implementing them.

pub mod config;
pub mod ports;
pub mod storage;
pub mod system;
