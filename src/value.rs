//! Value model for configuration data.
//!
//! This module defines the three building blocks of a configuration:
//! [`Scalar`] for leaf values, [`Shape`] for the raw, unlocked mapping an
//! owner declares or overrides with, and [`Value`] for a single entry of a
//! shape (either a scalar or a nested shape).
//!
//! Shapes are only an input format. Wrapping a shape in a
//! [`ConfigStore`](crate::ConfigStore) locks its key set; the shape itself
//! performs no validation.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A leaf configuration value.
///
/// Scalars are stored verbatim: overwriting a value never checks the type
/// of the value it replaces.
///
/// Variant order matters for untagged deserialization: integers are tried
/// before floats so that `5432` parses as an `Integer`.
///
/// # Examples
///
/// ```
/// use configurable::Scalar;
///
/// let port = Scalar::Integer(5432);
/// let host = Scalar::String("localhost".to_string());
/// assert_ne!(port, host);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// The absence of a value.
    Null,
    /// A boolean value.
    Bool(bool),
    /// A signed integer value.
    Integer(i64),
    /// A floating-point value.
    Float(f64),
    /// A string value.
    String(String),
}

/// A single entry of a [`Shape`]: a scalar leaf or a nested mapping.
///
/// # Examples
///
/// ```
/// use configurable::{Shape, Value};
///
/// let leaf = Value::from(5432);
/// let nested = Value::from(Shape::new().with("nested", 3));
/// assert_ne!(leaf, nested);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A leaf value.
    Scalar(Scalar),
    /// A nested mapping, wrapped into its own store on insertion.
    Map(Shape),
}

/// An ordered mapping from key to [`Value`]: the raw, unlocked form of a
/// configuration node.
///
/// A shape accepts any keys; it is the act of wrapping it in a
/// [`ConfigStore`](crate::ConfigStore) that freezes the key set.
///
/// # Examples
///
/// Builder-style construction:
///
/// ```
/// use configurable::Shape;
///
/// let shape = Shape::new()
///     .with("host", "localhost")
///     .with("port", 5432)
///     .with("tls", Shape::new().with("enabled", false));
/// assert_eq!(shape.len(), 3);
/// ```
///
/// Shapes also deserialize from any self-describing format, which keeps
/// test fixtures short:
///
/// ```
/// use configurable::Shape;
///
/// let shape: Shape = serde_yaml::from_str("host: localhost\nport: 5432").unwrap();
/// assert!(shape.contains_key("port"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Shape(BTreeMap<String, Value>);

impl Shape {
    /// Creates an empty shape.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry and returns the shape, for builder-style chaining.
    ///
    /// A later entry with the same key replaces the earlier one.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Adds an entry in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Returns the value for `key`, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns true if the shape contains `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Iterates over the keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Iterates over the entries in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the shape has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl IntoIterator for Shape {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Shape {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Shape {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<u32> for Scalar {
    fn from(value: u32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Scalar> for Value {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<Shape> for Value {
    fn from(value: Shape) -> Self {
        Self::Map(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Scalar(value.into())
    }
}
