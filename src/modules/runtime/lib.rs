//! Loaded configuration state for Ormlet
//!
//! This crate sequences the load cycle (path resolution, root inspection,
//! schema validation, connection assembly, dictionary construction) and
//! exposes the resulting immutable state to the SQL execution layer, plus a
//! resettable registry for shared access.

pub mod registry;
pub mod state;
pub mod substitutor;

pub use registry::ConfigRegistry;
pub use state::ConfigState;
