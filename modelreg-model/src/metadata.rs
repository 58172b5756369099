//! User-facing custom property values.
//!
//! This is the REST shape: integers travel as decimal strings, structured
//! documents and opaque protos as base64 text. Translating these into the
//! stores' typed cells is the codec's job, not this module's.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Arbitrary user metadata attached to an entity, keyed by property name.
pub type CustomProperties = HashMap<String, MetadataValue>;

/// A single typed custom property value.
///
/// Exactly one variant is populated by construction; the JSON form carries a
/// `metadataType` discriminator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "metadataType")]
pub enum MetadataValue {
    #[serde(rename = "MetadataBoolValue")]
    Bool { bool_value: bool },

    /// A 64-bit integer in decimal string form.
    #[serde(rename = "MetadataIntValue")]
    Int { int_value: String },

    #[serde(rename = "MetadataDoubleValue")]
    Double { double_value: f64 },

    #[serde(rename = "MetadataStringValue")]
    String { string_value: String },

    /// A structured document (nested maps, lists and scalars), base64 encoded.
    #[serde(rename = "MetadataStructValue")]
    Struct { struct_value: String },

    /// An opaque store-side proto. Read-only: it can be produced from a store
    /// value but never written back.
    #[serde(rename = "MetadataProtoValue")]
    Proto {
        #[serde(rename = "type")]
        type_url: String,
        proto_value: String,
    },
}

impl MetadataValue {
    pub fn bool(value: bool) -> Self {
        Self::Bool { bool_value: value }
    }

    pub fn int(value: i64) -> Self {
        Self::Int {
            int_value: value.to_string(),
        }
    }

    pub fn double(value: f64) -> Self {
        Self::Double {
            double_value: value,
        }
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::String {
            string_value: value.into(),
        }
    }

    /// Wraps an already base64-encoded structured document.
    pub fn structured(encoded: impl Into<String>) -> Self {
        Self::Struct {
            struct_value: encoded.into(),
        }
    }

    /// The `metadataType` discriminator of this value.
    #[must_use]
    pub const fn metadata_type(&self) -> &'static str {
        match self {
            Self::Bool { .. } => "MetadataBoolValue",
            Self::Int { .. } => "MetadataIntValue",
            Self::Double { .. } => "MetadataDoubleValue",
            Self::String { .. } => "MetadataStringValue",
            Self::Struct { .. } => "MetadataStructValue",
            Self::Proto { .. } => "MetadataProtoValue",
        }
    }
}
