//! The store-neutral form every mapper produces and consumes.

use crate::codec;
use crate::error::{ConvertError, ConvertResult};
use crate::store::{EmbeddedAttributes, EmbeddedEntity, GraphNode};
use crate::value::PropertyValue;
use modelreg_model::{EntityKind, StoreCategory};
use std::collections::BTreeMap;

/// One named property, flagged as custom or well-known.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub name: String,
    pub value: PropertyValue,
    pub is_custom: bool,
}

impl Property {
    pub fn structured(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
            is_custom: false,
        }
    }

    pub fn custom(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            name: name.into(),
            value,
            is_custom: true,
        }
    }
}

/// An entity as attributes plus an ordered property list.
///
/// Well-known properties come first in mapper order, custom properties
/// follow sorted by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub category: StoreCategory,
    pub id: Option<i64>,
    pub type_id: Option<i64>,
    pub type_name: Option<String>,
    pub name: Option<String>,
    pub external_id: Option<String>,
    pub uri: Option<String>,
    pub state: Option<String>,
    pub create_time_since_epoch: Option<i64>,
    pub last_update_time_since_epoch: Option<i64>,
    pub properties: Vec<Property>,
}

impl Record {
    /// An empty record carrying the kind's fixed category and type name.
    #[must_use]
    pub fn new(kind: EntityKind) -> Self {
        Self {
            category: kind.category(),
            id: None,
            type_id: None,
            type_name: Some(kind.type_name().to_string()),
            name: None,
            external_id: None,
            uri: None,
            state: None,
            create_time_since_epoch: None,
            last_update_time_since_epoch: None,
            properties: Vec::new(),
        }
    }

    pub fn structured(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| !p.is_custom)
    }

    pub fn custom(&self) -> impl Iterator<Item = &Property> {
        self.properties.iter().filter(|p| p.is_custom)
    }

    // ── Graph store ──────────────────────────────────────────────

    pub fn into_graph_node(self, kind: EntityKind) -> ConvertResult<GraphNode> {
        let mut properties = BTreeMap::new();
        let mut custom_properties = BTreeMap::new();
        for property in self.properties {
            let cell = codec::to_graph(property.value)
                .map_err(|e| ConvertError::property(kind, &property.name, e))?;
            if property.is_custom {
                custom_properties.insert(property.name, cell);
            } else {
                properties.insert(property.name, cell);
            }
        }
        Ok(GraphNode {
            category: self.category,
            id: self.id,
            type_id: self.type_id,
            type_name: self.type_name,
            name: self.name,
            external_id: self.external_id,
            uri: self.uri,
            state: self.state,
            create_time_since_epoch: self.create_time_since_epoch,
            last_update_time_since_epoch: self.last_update_time_since_epoch,
            properties,
            custom_properties,
        })
    }

    pub fn from_graph_node(node: &GraphNode, kind: EntityKind) -> ConvertResult<Self> {
        let decode = |is_custom: bool| {
            move |(name, cell): (&String, &crate::store::GraphValue)| {
                codec::from_graph(cell)
                    .map(|value| Property {
                        name: name.clone(),
                        value,
                        is_custom,
                    })
                    .map_err(|e| ConvertError::property(kind, name, e))
            }
        };
        let properties = node
            .properties
            .iter()
            .map(decode(false))
            .chain(node.custom_properties.iter().map(decode(true)))
            .collect::<ConvertResult<Vec<_>>>()?;

        Ok(Self {
            category: node.category,
            id: node.id,
            type_id: node.type_id,
            type_name: node.type_name.clone(),
            name: node.name.clone(),
            external_id: node.external_id.clone(),
            uri: node.uri.clone(),
            state: node.state.clone(),
            create_time_since_epoch: node.create_time_since_epoch,
            last_update_time_since_epoch: node.last_update_time_since_epoch,
            properties,
        })
    }

    // ── Embedded store ───────────────────────────────────────────

    pub fn into_embedded(self, kind: EntityKind) -> ConvertResult<EmbeddedEntity> {
        let properties = self
            .properties
            .into_iter()
            .map(|p| {
                codec::to_row(p.name.clone(), p.is_custom, p.value)
                    .map_err(|e| ConvertError::property(kind, p.name, e))
            })
            .collect::<ConvertResult<Vec<_>>>()?;
        Ok(EmbeddedEntity {
            category: self.category,
            id: self.id,
            type_id: self.type_id,
            attributes: EmbeddedAttributes {
                name: self.name,
                external_id: self.external_id,
                uri: self.uri,
                state: self.state,
                create_time_since_epoch: self.create_time_since_epoch,
                last_update_time_since_epoch: self.last_update_time_since_epoch,
            },
            properties,
        })
    }

    /// Embedded rows carry no type name; `type_name` is supplied by the
    /// caller when it has resolved one.
    pub fn from_embedded(
        entity: &EmbeddedEntity,
        kind: EntityKind,
        type_name: Option<String>,
    ) -> ConvertResult<Self> {
        let properties = entity
            .properties
            .iter()
            .map(|row| {
                codec::from_row(row)
                    .map(|value| Property {
                        name: row.name.clone(),
                        value,
                        is_custom: row.is_custom_property,
                    })
                    .map_err(|e| ConvertError::property(kind, &row.name, e))
            })
            .collect::<ConvertResult<Vec<_>>>()?;
        let attrs = &entity.attributes;
        Ok(Self {
            category: entity.category,
            id: entity.id,
            type_id: entity.type_id,
            type_name,
            name: attrs.name.clone(),
            external_id: attrs.external_id.clone(),
            uri: attrs.uri.clone(),
            state: attrs.state.clone(),
            create_time_since_epoch: attrs.create_time_since_epoch,
            last_update_time_since_epoch: attrs.last_update_time_since_epoch,
            properties,
        })
    }
}
