//! Refreshable holder for the current menu spec
//!
//! Readers take an `Arc` snapshot and evaluate against it without holding
//! the lock; a refresh validates the new spec fully before swapping it in,
//! so readers never see a partially built or invalid spec.

use crate::menu::MenuSpec;
use authority_core::Result;
use parking_lot::RwLock;
use std::sync::Arc;

/// Load-then-freeze container for a `MenuSpec`
#[derive(Debug)]
pub struct MenuSpecStore {
    current: RwLock<Arc<MenuSpec>>,
}

impl MenuSpecStore {
    /// Create a store holding a validated spec
    pub fn new(spec: MenuSpec) -> Result<Self> {
        spec.validate()?;
        Ok(Self {
            current: RwLock::new(Arc::new(spec)),
        })
    }

    /// Create a store from a wire document
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        Self::new(MenuSpec::from_json(bytes)?)
    }

    /// The spec currently in force
    pub fn snapshot(&self) -> Arc<MenuSpec> {
        Arc::clone(&*self.current.read())
    }

    /// Validate and swap in a new spec
    ///
    /// On error the previous spec stays in force.
    pub fn replace(&self, spec: MenuSpec) -> Result<()> {
        spec.validate()?;
        let menus = spec.len();
        *self.current.write() = Arc::new(spec);
        tracing::info!(menus, "Menu spec refreshed");
        Ok(())
    }

    /// Decode, validate and swap in a new spec
    pub fn replace_from_json(&self, bytes: &[u8]) -> Result<()> {
        let spec = MenuSpec::from_json(bytes).map_err(|err| {
            tracing::warn!(error = %err, "Rejected menu spec refresh");
            err
        })?;
        self.replace(spec)
    }
}
