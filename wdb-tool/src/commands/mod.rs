//! Command implementations for wdb-tool

pub mod export;
pub mod list;
pub mod world_names;
