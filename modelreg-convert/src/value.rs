//! The store-neutral property value.

use crate::error::ValueError;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::{Map, Value};

/// Marker prepended to a base64 struct document stored in a string cell, so
/// readers can tell it apart from a plain string sharing the same column.
pub const STRUCT_SENTINEL: &str = "mlmd-struct::";

/// A typed property value with exactly one populated variant.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    Struct(StructValue),
    /// Opaque store-side message. Never constructible from the domain model.
    Proto { type_url: String, value: Vec<u8> },
}

impl PropertyValue {
    /// Variant name used in type mismatch errors.
    #[must_use]
    pub const fn type_label(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Struct(_) => "struct",
            Self::Proto { .. } => "proto",
        }
    }
}

/// A structured document: nested maps, lists and scalars.
///
/// Serialized as a MessagePack map. The domain carries it base64 encoded;
/// the embedded store additionally prefixes [`STRUCT_SENTINEL`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructValue(Map<String, Value>);

impl StructValue {
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// A single-key document holding a list of strings, the representation
    /// of list-valued well-known fields such as `language` or `tasks`.
    #[must_use]
    pub fn from_list(key: &str, items: &[String]) -> Self {
        let mut fields = Map::new();
        fields.insert(
            key.to_string(),
            Value::Array(items.iter().cloned().map(Value::String).collect()),
        );
        Self(fields)
    }

    /// Reads back the list written by [`Self::from_list`].
    pub fn to_list(&self, key: &str) -> Result<Vec<String>, ValueError> {
        let Some(Value::Array(items)) = self.0.get(key) else {
            return Err(ValueError::NotAList(key.to_string()));
        };
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(ValueError::NotAList(key.to_string())),
            })
            .collect()
    }

    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.0
    }

    /// Compact binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ValueError> {
        Ok(rmp_serde::to_vec(&self.0)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ValueError> {
        Ok(Self(rmp_serde::from_slice(bytes)?))
    }

    /// Base64 of the binary form, as carried by the domain model.
    pub fn to_base64(&self) -> Result<String, ValueError> {
        Ok(BASE64.encode(self.to_bytes()?))
    }

    pub fn from_base64(encoded: &str) -> Result<Self, ValueError> {
        Self::from_bytes(&BASE64.decode(encoded)?)
    }

    /// Sentinel-prefixed base64, as stored in a string cell.
    pub fn to_tagged_string(&self) -> Result<String, ValueError> {
        Ok(format!("{STRUCT_SENTINEL}{}", self.to_base64()?))
    }

    /// Decodes a string cell. Returns `None` when the cell is a plain string.
    #[must_use]
    pub fn from_tagged_string(cell: &str) -> Option<Result<Self, ValueError>> {
        cell.strip_prefix(STRUCT_SENTINEL).map(Self::from_base64)
    }
}

impl From<Map<String, Value>> for StructValue {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
