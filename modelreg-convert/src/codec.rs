//! PropertyValue codec.
//!
//! Translates one value between the neutral [`PropertyValue`] and each
//! boundary shape:
//!
//! | neutral  | domain                    | graph store        | embedded store                      |
//! |----------|---------------------------|--------------------|-------------------------------------|
//! | `Int`    | decimal string            | `IntValue`         | `int_value`                         |
//! | `Struct` | base64 document           | native struct      | `string_value`, sentinel + base64   |
//! | `Proto`  | read-only (base64 bytes)  | `ProtoValue`       | `proto_value` + `type_url`          |
//!
//! Decoding whatever an encoder produced yields the original value for every
//! variant. The one deliberate asymmetry: a `Proto` can be read into the
//! domain but never written back from it.

use crate::error::ValueError;
use crate::store::{GraphValue, GraphValueKind, PropertyRow, ProtoAny};
use crate::value::{PropertyValue, StructValue};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use modelreg_model::MetadataValue;

// ── Domain ───────────────────────────────────────────────────────

/// Domain value to neutral value.
pub fn from_metadata(value: &MetadataValue) -> Result<PropertyValue, ValueError> {
    match value {
        MetadataValue::Bool { bool_value } => Ok(PropertyValue::Bool(*bool_value)),
        MetadataValue::Int { int_value } => parse_int(int_value).map(PropertyValue::Int),
        MetadataValue::Double { double_value } => Ok(PropertyValue::Double(*double_value)),
        MetadataValue::String { string_value } => Ok(PropertyValue::String(string_value.clone())),
        MetadataValue::Struct { struct_value } => {
            StructValue::from_base64(struct_value).map(PropertyValue::Struct)
        }
        MetadataValue::Proto { .. } => Err(ValueError::ProtoNotWritable),
    }
}

/// Neutral value to domain value.
pub fn to_metadata(value: PropertyValue) -> Result<MetadataValue, ValueError> {
    Ok(match value {
        PropertyValue::Bool(b) => MetadataValue::bool(b),
        PropertyValue::Int(i) => MetadataValue::int(i),
        PropertyValue::Double(d) => MetadataValue::double(d),
        PropertyValue::String(s) => MetadataValue::string(s),
        PropertyValue::Struct(s) => MetadataValue::structured(s.to_base64()?),
        PropertyValue::Proto { type_url, value } => {
            if type_url.is_empty() {
                return Err(ValueError::MissingTypeUrl);
            }
            MetadataValue::Proto {
                type_url,
                proto_value: BASE64.encode(value),
            }
        }
    })
}

/// Parses a decimal integer literal. Malformed literals are errors, never
/// skipped.
pub fn parse_int(literal: &str) -> Result<i64, ValueError> {
    literal
        .parse::<i64>()
        .map_err(|source| ValueError::InvalidInt {
            literal: literal.to_string(),
            source,
        })
}

// ── Graph store ──────────────────────────────────────────────────

pub fn to_graph(value: PropertyValue) -> Result<GraphValue, ValueError> {
    let kind = match value {
        PropertyValue::Bool(b) => GraphValueKind::BoolValue(b),
        PropertyValue::Int(i) => GraphValueKind::IntValue(i),
        PropertyValue::Double(d) => GraphValueKind::DoubleValue(d),
        PropertyValue::String(s) => GraphValueKind::StringValue(s),
        PropertyValue::Struct(s) => GraphValueKind::StructValue(s.into_fields()),
        PropertyValue::Proto { type_url, value } => {
            if type_url.is_empty() {
                return Err(ValueError::MissingTypeUrl);
            }
            GraphValueKind::ProtoValue(ProtoAny { type_url, value })
        }
    };
    Ok(kind.into())
}

pub fn from_graph(value: &GraphValue) -> Result<PropertyValue, ValueError> {
    let Some(kind) = &value.value else {
        return Err(ValueError::TypeMapping);
    };
    Ok(match kind {
        GraphValueKind::IntValue(i) => PropertyValue::Int(*i),
        GraphValueKind::DoubleValue(d) => PropertyValue::Double(*d),
        GraphValueKind::StringValue(s) => PropertyValue::String(s.clone()),
        GraphValueKind::StructValue(fields) => {
            PropertyValue::Struct(StructValue::new(fields.clone()))
        }
        GraphValueKind::ProtoValue(any) => {
            if any.type_url.is_empty() {
                return Err(ValueError::MissingTypeUrl);
            }
            PropertyValue::Proto {
                type_url: any.type_url.clone(),
                value: any.value.clone(),
            }
        }
        GraphValueKind::BoolValue(b) => PropertyValue::Bool(*b),
    })
}

// ── Embedded store ───────────────────────────────────────────────

/// Builds a property row holding `value` in the matching column.
pub fn to_row(
    name: impl Into<String>,
    is_custom: bool,
    value: PropertyValue,
) -> Result<PropertyRow, ValueError> {
    let mut row = PropertyRow::new(name, is_custom);
    match value {
        PropertyValue::Bool(b) => row.bool_value = Some(b),
        PropertyValue::Int(i) => row.int_value = Some(i),
        PropertyValue::Double(d) => row.double_value = Some(d),
        PropertyValue::String(s) => row.string_value = Some(s),
        PropertyValue::Struct(s) => row.string_value = Some(s.to_tagged_string()?),
        PropertyValue::Proto { type_url, value } => {
            if type_url.is_empty() {
                return Err(ValueError::MissingTypeUrl);
            }
            row.proto_value = Some(value);
            row.type_url = Some(type_url);
        }
    }
    Ok(row)
}

/// Reads the value column of a property row.
///
/// Unset columns are skipped; the first set column wins. A sentinel-prefixed
/// string is a struct document. Payload bytes (`proto_value`, or the legacy
/// `byte_value`) need a type url. A row with nothing set is a type mapping
/// error.
pub fn from_row(row: &PropertyRow) -> Result<PropertyValue, ValueError> {
    if let Some(i) = row.int_value {
        return Ok(PropertyValue::Int(i));
    }
    if let Some(d) = row.double_value {
        return Ok(PropertyValue::Double(d));
    }
    if let Some(s) = &row.string_value {
        return match StructValue::from_tagged_string(s) {
            Some(decoded) => decoded.map(PropertyValue::Struct),
            None => Ok(PropertyValue::String(s.clone())),
        };
    }
    if let Some(b) = row.bool_value {
        return Ok(PropertyValue::Bool(b));
    }
    if let Some(bytes) = row.proto_value.as_ref().or(row.byte_value.as_ref()) {
        let type_url = row
            .type_url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(ValueError::MissingTypeUrl)?;
        return Ok(PropertyValue::Proto {
            type_url: type_url.to_string(),
            value: bytes.clone(),
        });
    }
    Err(ValueError::TypeMapping)
}
