//! Shared access to the loaded configuration state
//!
//! The registry replaces the ambient process-wide singleton of older ORM
//! cores: it is constructed explicitly, owned at the composition root, and
//! threaded (or `Arc`-shared) to consumers. `reset` exists for test
//! isolation and operator-driven reloads.

use crate::state::ConfigState;
use ormlet_core::Result;
use ormlet_parser::Settings;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

/// Lazily loads the configuration once and hands out shared references
///
/// The first `get` performs the full XML load under the write lock, so
/// exactly one thread ever runs a load cycle; later calls take the
/// read-locked fast path. `reset` clears the slot so the next access
/// reloads from scratch; readers holding an `Arc` to the previous state
/// keep a consistent (immutable) view until they drop it.
pub struct ConfigRegistry {
    base_dir: PathBuf,
    settings: Settings,
    slot: RwLock<Option<Arc<ConfigState>>>,
}

impl ConfigRegistry {
    /// Create a registry; no load happens until the first `get`
    pub fn new(base_dir: impl Into<PathBuf>, settings: Settings) -> Self {
        Self {
            base_dir: base_dir.into(),
            settings,
            slot: RwLock::new(None),
        }
    }

    /// The loaded state, loading it first if necessary
    pub fn get(&self) -> Result<Arc<ConfigState>> {
        if let Some(state) = self.cached() {
            return Ok(state);
        }

        let mut guard = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        // Another thread may have loaded while we waited for the lock.
        if let Some(state) = guard.as_ref() {
            return Ok(Arc::clone(state));
        }

        let state = Arc::new(ConfigState::load(
            self.base_dir.clone(),
            self.settings.clone(),
        )?);
        *guard = Some(Arc::clone(&state));
        Ok(state)
    }

    /// Drop the cached state; the next `get` reloads
    pub fn reset(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// True when a state is currently cached
    pub fn is_loaded(&self) -> bool {
        self.cached().is_some()
    }

    fn cached(&self) -> Option<Arc<ConfigState>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_load_is_not_cached() {
        // Default settings point at files that do not exist.
        let registry = ConfigRegistry::new("/nonexistent", Settings::default());
        assert!(registry.get().is_err());
        assert!(!registry.is_loaded());
    }

    #[test]
    fn test_reset_without_load_is_harmless() {
        let registry = ConfigRegistry::new(".", Settings::default());
        registry.reset();
        assert!(!registry.is_loaded());
    }
}
