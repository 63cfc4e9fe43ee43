//! Free-form key/value overrides attached to components and items
//!
//! Every layout and behavior parameter is read through a defaulted accessor:
//! a missing or wrongly-typed key never errors, it falls back to the default
//! the caller supplies. This is what keeps the render path total: no meta
//! lookup can fail a layout pass.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Well-known meta keys consulted by the layout engine and spot controllers.
pub mod keys {
    /// Layout variant: `"grid"`, `"left"`, or `"flow"`.
    pub const LAYOUT: &str = "layout";
    pub const INSET_TOP: &str = "inset-top";
    pub const INSET_LEFT: &str = "inset-left";
    pub const INSET_BOTTOM: &str = "inset-bottom";
    pub const INSET_RIGHT: &str = "inset-right";
    /// Minimum spacing between items on the same row (flow layouts).
    pub const ITEM_SPACING: &str = "item-spacing";
    /// Minimum spacing between rows (flow layouts).
    pub const LINE_SPACING: &str = "line-spacing";
    pub const MIN_ITEM_WIDTH: &str = "min-item-width";
    pub const MIN_ITEM_HEIGHT: &str = "min-item-height";
    pub const MAX_ITEM_WIDTH: &str = "max-item-width";
    pub const MAX_ITEM_HEIGHT: &str = "max-item-height";
    pub const TITLE_LEFT_MARGIN: &str = "title-left-margin";
    pub const TITLE_FONT_SIZE: &str = "title-font-size";
    /// Three-state click behavior flag, see `ClickBehavior`.
    pub const DOUBLE_CLICK: &str = "double-click";
}

/// String-keyed bag of arbitrary JSON values with defaulted lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Meta(HashMap<String, Value>);

impl Meta {
    /// Create an empty meta bag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys present.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no keys are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Raw value lookup.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert or overwrite a value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Iterate over present keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Numeric lookup; missing or non-numeric values yield `default`.
    pub fn f32_or(&self, key: &str, default: f32) -> f32 {
        self.0
            .get(key)
            .and_then(Value::as_f64)
            .map(|v| v as f32)
            .unwrap_or(default)
    }

    /// Boolean lookup; missing or non-boolean values yield `default`.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(default)
    }

    /// String lookup; missing or non-string values yield `default`.
    pub fn str_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or(default)
    }

    /// Three-state boolean lookup: `Some(value)` when the key holds a
    /// boolean, `None` when absent or of another type.
    pub fn flag(&self, key: &str) -> Option<bool> {
        self.0.get(key).and_then(Value::as_bool)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Meta {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
