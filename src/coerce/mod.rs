//! # Coerce Module
//!
//! Best-effort conversion of raw wire values into the declared argument type.
//!
//! ## Scalars
//!
//! | declared | raw | result |
//! |---|---|---|
//! | `string` | any string | unchanged, even `"null"` or `"123"` |
//! | `number` | numeral, leading zeros allowed | number (`"000123"` → `123`) |
//! | `boolean` | `true` / `false`, any case | boolean |
//! | `any` | `"true"`, `"false"`, `"null"` | boolean / null |
//! | `any` | numeral without a significant leading zero | number |
//! | `any` | `"000123"` | unchanged (treated as an identifier) |
//!
//! Anything that does not parse is returned as the original string.
//!
//! ## Arrays
//!
//! Array-typed arguments run through an ordered decision list (see
//! [`ArrayStep`]): decoded JSON arrays, blank strings, JSON array text
//! (accepted only if every element is in the enum), delimiter splitting, and
//! finally promotion of a single value to a one-item array. Each item is then
//! coerced as a scalar.
//!
//! Coercion never fails. It is a pure function of the descriptor, the raw value,
//! the enum and the delimiters.

mod array;
mod scalar;


pub use array::{coerce_array, split_array, ArraySplit, ArrayStep};
pub use scalar::{coerce_scalar, coerce_text, is_numeral, is_safe_numeral, parse_numeral};

use crate::spec::{ArgumentSpec, TypeDescriptor};
use serde_json::Value;

/// Raw value for one argument as handed over by the transport.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawValue {
    /// Argument not present in the request
    #[default]
    Absent,
    /// Untyped wire text (query string, path segment, header, cookie)
    Text(String),
    /// Value already decoded by an upstream body parser
    Json(Value),
}

impl RawValue {
    /// Wrap a decoded JSON value, normalizing JSON strings to [`RawValue::Text`].
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::String(text) => RawValue::Text(text),
            other => RawValue::Json(other),
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, RawValue::Absent)
    }

    /// The raw value as JSON, `None` when absent.
    pub fn to_value(&self) -> Option<Value> {
        match self {
            RawValue::Absent => None,
            RawValue::Text(text) => Some(Value::String(text.clone())),
            RawValue::Json(value) => Some(value.clone()),
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        RawValue::Text(text.to_string())
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        RawValue::Text(text)
    }
}

impl From<Value> for RawValue {
    fn from(value: Value) -> Self {
        RawValue::from_json(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Coerce a present raw value against a descriptor and its options.
pub fn coerce_value(
    descriptor: TypeDescriptor,
    raw: &Value,
    delimiters: &[char],
    enum_values: Option<&[Value]>,
) -> Value {
    if descriptor.is_array {
        coerce_array(descriptor.base_kind, raw, delimiters, enum_values)
    } else {
        coerce_scalar(descriptor.base_kind, raw)
    }
}

impl ArgumentSpec {
    /// Coerce a raw value for this argument.
    ///
    /// Returns `None` only when the argument is absent.
    pub fn coerce(&self, raw: &RawValue) -> Option<Value> {
        let raw = raw.to_value()?;
        Some(coerce_value(
            self.declared_type,
            &raw,
            &self.array_item_delimiters,
            self.enum_values.as_deref(),
        ))
    }
}
