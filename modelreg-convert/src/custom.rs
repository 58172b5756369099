//! Custom property map codec.
//!
//! Round-trips the user's `name -> value` map against both property list
//! shapes: the graph store keeps custom properties in their own map, the
//! embedded store mixes them with well-known rows behind an
//! `is_custom_property` flag.

use crate::codec;
use crate::error::{ConvertError, ConvertResult};
use crate::record::Property;
use crate::store::{GraphValue, PropertyRow};
use modelreg_model::{CustomProperties, EntityKind};
use std::collections::BTreeMap;

/// Domain map to neutral properties, one per key, each flagged custom.
///
/// Keys are emitted in sorted order so the output is deterministic.
pub fn to_properties(
    kind: EntityKind,
    custom: &CustomProperties,
) -> ConvertResult<Vec<Property>> {
    let mut keys: Vec<&String> = custom.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|key| {
            codec::from_metadata(&custom[key])
                .map(|value| Property::custom(key.clone(), value))
                .map_err(|e| ConvertError::property(kind, key, e))
        })
        .collect()
}

/// Neutral properties to the domain map, keeping only custom-flagged entries.
pub fn from_properties<'a>(
    kind: EntityKind,
    properties: impl IntoIterator<Item = &'a Property>,
) -> ConvertResult<CustomProperties> {
    properties
        .into_iter()
        .filter(|p| p.is_custom)
        .map(|p| {
            codec::to_metadata(p.value.clone())
                .map(|value| (p.name.clone(), value))
                .map_err(|e| ConvertError::property(kind, &p.name, e))
        })
        .collect()
}

// ── Graph store: separate custom map ─────────────────────────────

pub fn to_graph_map(
    kind: EntityKind,
    custom: &CustomProperties,
) -> ConvertResult<BTreeMap<String, GraphValue>> {
    to_properties(kind, custom)?
        .into_iter()
        .map(|p| {
            codec::to_graph(p.value)
                .map(|cell| (p.name.clone(), cell))
                .map_err(|e| ConvertError::property(kind, p.name, e))
        })
        .collect()
}

/// Every entry of the map is custom; no flag filtering applies.
pub fn from_graph_map(
    kind: EntityKind,
    cells: &BTreeMap<String, GraphValue>,
) -> ConvertResult<CustomProperties> {
    cells
        .iter()
        .map(|(name, cell)| {
            codec::from_graph(cell)
                .and_then(codec::to_metadata)
                .map(|value| (name.clone(), value))
                .map_err(|e| ConvertError::property(kind, name, e))
        })
        .collect()
}

// ── Embedded store: flagged rows ─────────────────────────────────

pub fn to_rows(kind: EntityKind, custom: &CustomProperties) -> ConvertResult<Vec<PropertyRow>> {
    to_properties(kind, custom)?
        .into_iter()
        .map(|p| {
            codec::to_row(p.name.clone(), true, p.value)
                .map_err(|e| ConvertError::property(kind, p.name, e))
        })
        .collect()
}

/// Selects the custom-flagged rows and decodes them.
pub fn from_rows(kind: EntityKind, rows: &[PropertyRow]) -> ConvertResult<CustomProperties> {
    rows.iter()
        .filter(|row| row.is_custom_property)
        .map(|row| {
            codec::from_row(row)
                .and_then(codec::to_metadata)
                .map(|value| (row.name.clone(), value))
                .map_err(|e| ConvertError::property(kind, &row.name, e))
        })
        .collect()
}
