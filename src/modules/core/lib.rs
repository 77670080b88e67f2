//! Core domain model for Ormlet
//!
//! This crate contains the in-memory structures the metadata core produces
//! (template set, mapping table, connection info, validation report) and the
//! error type shared across the workspace.

pub mod domain;
pub mod error;

pub use domain::*;
pub use error::{OrmError, Result};
