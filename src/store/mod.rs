//! The configuration value store.
//!
//! A [`ConfigStore`] is an ownership tree of nested key/value nodes built
//! once from a default [`Shape`]. Construction freezes the key set of each
//! node; every subsequent read or write is validated against that frozen
//! set, at any depth. Nested mappings are recursively wrapped in stores of
//! their own, so chained access always goes through the same validation.
//!
//! A node is only ever mutable through `&mut` access, which makes the
//! single-owner mutation model a compile-time property; the store performs
//! no locking of its own.
//!
//! # Examples
//!
//! ```
//! use configurable::{ConfigStore, Shape};
//!
//! let mut store = ConfigStore::new(
//!     Shape::new()
//!         .with("host", "localhost")
//!         .with("pool", Shape::new().with("size", 8)),
//! );
//!
//! assert_eq!(store.get("host").unwrap().as_str(), Some("localhost"));
//! assert_eq!(store.store("pool").unwrap().get("size").unwrap().as_i64(), Some(8));
//!
//! store.set("host", "db.internal").unwrap();
//! assert_eq!(store["host"].as_str(), Some("db.internal"));
//!
//! // Keys outside the default shape are rejected forever.
//! assert!(store.set("hots", "typo").unwrap_err().is_key_not_found());
//! ```

use std::collections::BTreeMap;
use std::ops;

use serde::ser::{Serialize, Serializer};

use crate::error::{Error, Result};
use crate::value::{Scalar, Shape, Value};

#[cfg(test)]
mod proptests;

/// A stored configuration entry: a scalar leaf or a nested store.
///
/// This is what [`ConfigStore::get`] returns. A nested mapping is never
/// held raw; it is always wrapped in a [`ConfigStore`] with its own locked
/// key set.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    /// A leaf value.
    Scalar(Scalar),
    /// A nested store with its own locked schema.
    Store(ConfigStore),
}

impl ConfigValue {
    /// Returns the scalar value, or `None` if this entry is a nested store.
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Self::Scalar(scalar) => Some(scalar),
            Self::Store(_) => None,
        }
    }

    /// Returns the nested store, or `None` if this entry is a scalar.
    #[must_use]
    pub fn as_store(&self) -> Option<&ConfigStore> {
        match self {
            Self::Store(store) => Some(store),
            Self::Scalar(_) => None,
        }
    }

    /// Returns the nested store mutably, or `None` if this entry is a scalar.
    pub fn as_store_mut(&mut self) -> Option<&mut ConfigStore> {
        match self {
            Self::Store(store) => Some(store),
            Self::Scalar(_) => None,
        }
    }

    /// Returns the boolean value, or `None` for any other entry.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Scalar(Scalar::Bool(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns the integer value, or `None` for any other entry.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Scalar(Scalar::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns the float value, or `None` for any other entry.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Scalar(Scalar::Float(value)) => Some(*value),
            _ => None,
        }
    }

    /// Returns the string value, or `None` for any other entry.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Scalar(Scalar::String(value)) => Some(value),
            _ => None,
        }
    }

    /// Returns true if this entry is the null scalar.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(Scalar::Null))
    }

    /// Returns true if this entry is a nested store.
    #[must_use]
    pub fn is_store(&self) -> bool {
        matches!(self, Self::Store(_))
    }
}

impl From<Value> for ConfigValue {
    /// Wraps an input value for storage: mappings become nested stores
    /// with their own locked key set, scalars are stored verbatim.
    fn from(value: Value) -> Self {
        match value {
            Value::Scalar(scalar) => Self::Scalar(scalar),
            Value::Map(shape) => Self::Store(ConfigStore::new(shape)),
        }
    }
}

impl Serialize for ConfigValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Scalar(scalar) => scalar.serialize(serializer),
            Self::Store(store) => store.serialize(serializer),
        }
    }
}

/// A schema-locked tree of configuration values.
///
/// The key set of every node is fixed when the node is constructed from
/// its default shape and can never grow or shrink afterward. Reads and
/// writes of unknown keys fail with [`Error::KeyNotFound`]; there is no
/// access path that bypasses this validation.
///
/// Each node exclusively owns its children. Replacing a nested key with a
/// new mapping discards the old child entirely: the new child's key set
/// comes solely from the new mapping.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigStore {
    entries: BTreeMap<String, ConfigValue>,
}

impl ConfigStore {
    /// Wraps a default shape into a schema-locked store.
    ///
    /// Every mapping value becomes a child store, recursively. Any shape
    /// is accepted as a schema; construction cannot fail. The node is
    /// sealed the moment this returns — no later call can add or remove
    /// keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use configurable::{ConfigStore, Shape};
    ///
    /// let store = ConfigStore::new(Shape::new().with("retries", 3));
    /// assert_eq!(store.len(), 1);
    /// ```
    #[must_use]
    pub fn new(shape: Shape) -> Self {
        let entries = shape
            .into_iter()
            .map(|(key, value)| (key, ConfigValue::from(value)))
            .collect();
        Self { entries }
    }

    /// Reads the current value of `key`.
    ///
    /// Reading a nested key returns the child store by reference, never a
    /// flattened copy, so further access chains through the child's own
    /// validation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is absent from the key set
    /// locked at construction.
    pub fn get(&self, key: &str) -> Result<&ConfigValue> {
        self.entries.get(key).ok_or_else(|| Error::KeyNotFound {
            key: key.to_string(),
        })
    }

    /// Writes `value` to `key`.
    ///
    /// A mapping value is wrapped into a new child store whose key set
    /// comes solely from that mapping, replacing whatever previously
    /// occupied the key. Any other value overwrites the previous value
    /// verbatim, with no type or shape check against what it replaces.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is absent from the key set
    /// locked at construction. Once locked, no new key can ever be
    /// introduced, including on first write.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> Result<()> {
        if !self.entries.contains_key(key) {
            return Err(Error::KeyNotFound {
                key: key.to_string(),
            });
        }
        self.entries
            .insert(key.to_string(), ConfigValue::from(value.into()));
        Ok(())
    }

    /// Applies every entry of `overrides` via the [`set`](Self::set) rules.
    ///
    /// The merge is shallow: a nested mapping in `overrides` replaces the
    /// child store at that key wholesale, it is not merged into it.
    ///
    /// The merge is atomic. All keys are validated against the locked key
    /// set before any entry is applied, so a failing merge leaves the
    /// store completely unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] naming the first unknown key, in
    /// sorted key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use configurable::{ConfigStore, Shape};
    ///
    /// let mut store = ConfigStore::new(Shape::new().with("a", 1).with("b", 2));
    /// store.merge(Shape::new().with("b", 20)).unwrap();
    /// assert_eq!(store["a"].as_i64(), Some(1));
    /// assert_eq!(store["b"].as_i64(), Some(20));
    /// ```
    pub fn merge(&mut self, overrides: Shape) -> Result<()> {
        if let Some(unknown) = overrides
            .keys()
            .find(|key| !self.entries.contains_key(key.as_str()))
        {
            return Err(Error::KeyNotFound {
                key: unknown.clone(),
            });
        }

        log::trace!("merging {} override(s)", overrides.len());
        for (key, value) in overrides {
            self.entries.insert(key, ConfigValue::from(value));
        }
        Ok(())
    }

    /// Returns the child store at `key`, for chained access.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is absent from the locked
    /// key set, or present but holding a scalar.
    pub fn store(&self, key: &str) -> Result<&ConfigStore> {
        self.get(key)?
            .as_store()
            .ok_or_else(|| Error::KeyNotFound {
                key: key.to_string(),
            })
    }

    /// Returns the child store at `key` mutably.
    ///
    /// Writes through the returned reference are validated against the
    /// child's own key set and visible to every subsequent reader.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] if `key` is absent from the locked
    /// key set, or present but holding a scalar.
    pub fn store_mut(&mut self, key: &str) -> Result<&mut ConfigStore> {
        match self.entries.get_mut(key) {
            Some(ConfigValue::Store(store)) => Ok(store),
            _ => Err(Error::KeyNotFound {
                key: key.to_string(),
            }),
        }
    }

    /// Walks nested stores segment by segment and reads the final key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyNotFound`] naming the failing segment when a
    /// segment is absent from its node's locked key set, when the
    /// traversal reaches a scalar before the final segment, or when
    /// `path` is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use configurable::{ConfigStore, Shape};
    ///
    /// let store = ConfigStore::new(
    ///     Shape::new().with("pool", Shape::new().with("size", 8)),
    /// );
    /// assert_eq!(store.get_path(&["pool", "size"]).unwrap().as_i64(), Some(8));
    /// ```
    pub fn get_path(&self, path: &[&str]) -> Result<&ConfigValue> {
        let (last, ancestors) = path.split_last().ok_or_else(|| Error::KeyNotFound {
            key: String::new(),
        })?;

        let mut node = self;
        for segment in ancestors {
            node = node.store(segment)?;
        }
        node.get(last)
    }

    /// Iterates over the locked key set in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.entries.keys()
    }

    /// Returns true if `key` is part of the locked key set.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of keys in the locked key set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the locked key set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Shape> for ConfigStore {
    fn from(shape: Shape) -> Self {
        Self::new(shape)
    }
}

impl Serialize for ConfigStore {
    /// Serializes the current merged view as a nested map.
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter())
    }
}

/// Attribute-style read access, as sugar over [`ConfigStore::get`].
///
/// # Panics
///
/// Panics on the same condition `get` rejects: a key outside the locked
/// key set. Use `get` where the error should propagate instead.
impl ops::Index<&str> for ConfigStore {
    type Output = ConfigValue;

    fn index(&self, key: &str) -> &ConfigValue {
        match self.get(key) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }
}

/// Chained attribute-style access through nested stores.
///
/// # Panics
///
/// Panics if this entry is a scalar, or if the key is outside the nested
/// store's locked key set.
impl ops::Index<&str> for ConfigValue {
    type Output = ConfigValue;

    fn index(&self, key: &str) -> &ConfigValue {
        match self {
            Self::Store(store) => &store[key],
            Self::Scalar(_) => panic!("cannot index key '{key}' of a scalar value"),
        }
    }
}
