//! Type definitions for Ormlet
//!
//! This crate contains shared type definitions used across the Ormlet codebase:
//! database providers, SQL operation categories, and positional-placeholder
//! helpers for template text.

pub mod operation;
pub mod placeholder;
pub mod provider;

pub use operation::SqlOperation;
pub use provider::Provider;
