//! The owner-to-store association.
//!
//! A [`ConfigRegistry`] maps each owning type to exactly one
//! [`ConfigStore`]. It is an explicit object to be passed or injected into
//! the code that needs it, rather than implicit process-global state, which
//! keeps the store testable in isolation. Owner identity is Rust type
//! identity: every method is generic over the owning type.
//!
//! # Examples
//!
//! ```
//! use configurable::{ConfigRegistry, Shape};
//!
//! struct Database;
//!
//! let mut registry = ConfigRegistry::new();
//! registry.declare_defaults::<Database>(
//!     Shape::new().with("host", "localhost").with("port", 5432),
//! );
//!
//! registry.override_with::<Database>(Shape::new().with("port", 6432)).unwrap();
//!
//! let config = registry.current::<Database>().unwrap();
//! assert_eq!(config["host"].as_str(), Some("localhost"));
//! assert_eq!(config["port"].as_i64(), Some(6432));
//! ```

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::store::ConfigStore;
use crate::value::Shape;

/// Associates each owning type with exactly one [`ConfigStore`].
///
/// A store exists for an owner only after
/// [`declare_defaults`](Self::declare_defaults); until then every access
/// for that owner fails with [`Error::NotConfigured`].
#[derive(Debug, Default)]
pub struct ConfigRegistry {
    stores: HashMap<TypeId, ConfigStore>,
}

impl ConfigRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the default configuration shape for owner `O`.
    ///
    /// Creates a new schema-locked store from `shape` and installs it for
    /// `O`, replacing any prior store unconditionally. Re-declaring
    /// defaults discards all prior state, including overrides for keys
    /// still present in the new shape.
    pub fn declare_defaults<O: 'static>(&mut self, shape: Shape) {
        let store = ConfigStore::new(shape);
        if self.stores.insert(TypeId::of::<O>(), store).is_some() {
            log::debug!(
                "re-declared defaults for {}, prior state discarded",
                type_name::<O>()
            );
        } else {
            log::debug!("declared defaults for {}", type_name::<O>());
        }
    }

    /// Applies `overrides` to owner `O`'s store.
    ///
    /// The overrides are merged with the atomic semantics of
    /// [`ConfigStore::merge`]: a mapping containing any key outside `O`'s
    /// declared shape changes nothing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] if `O` has never declared
    /// defaults, or [`Error::KeyNotFound`] from the merge itself.
    pub fn override_with<O: 'static>(&mut self, overrides: Shape) -> Result<()> {
        let store = self
            .stores
            .get_mut(&TypeId::of::<O>())
            .ok_or_else(|| Error::NotConfigured {
                owner: type_name::<O>().to_string(),
            })?;
        log::debug!(
            "applying {} override(s) to {}",
            overrides.len(),
            type_name::<O>()
        );
        store.merge(overrides)
    }

    /// Returns owner `O`'s current configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] if `O` has never declared defaults.
    pub fn current<O: 'static>(&self) -> Result<&ConfigStore> {
        self.stores
            .get(&TypeId::of::<O>())
            .ok_or_else(|| Error::NotConfigured {
                owner: type_name::<O>().to_string(),
            })
    }

    /// Returns owner `O`'s current configuration mutably.
    ///
    /// Mutations through the returned reference go through the store's own
    /// validated operations and are visible to every subsequent reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConfigured`] if `O` has never declared defaults.
    pub fn current_mut<O: 'static>(&mut self) -> Result<&mut ConfigStore> {
        self.stores
            .get_mut(&TypeId::of::<O>())
            .ok_or_else(|| Error::NotConfigured {
                owner: type_name::<O>().to_string(),
            })
    }

    /// Returns true if owner `O` has declared defaults.
    #[must_use]
    pub fn is_configured<O: 'static>(&self) -> bool {
        self.stores.contains_key(&TypeId::of::<O>())
    }

    /// Removes and returns owner `O`'s store, if any.
    ///
    /// After removal the owner is unconfigured again and must re-declare
    /// defaults before any further access.
    pub fn remove<O: 'static>(&mut self) -> Option<ConfigStore> {
        self.stores.remove(&TypeId::of::<O>())
    }

    /// Returns the number of configured owners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stores.len()
    }

    /// Returns true if no owner has declared defaults.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }
}
