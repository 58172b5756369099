//! Structured property mappers, one per entity kind.
//!
//! A mapper moves an entity's well-known fields into the neutral [`Record`]
//! and back. Absent optional fields are omitted rather than written as
//! nulls; relation ids that encode ownership are mandatory in both
//! directions. Lifecycle state is stored as its wire string under a fixed
//! key (`state`, `desired_state`, `status`) or in the node's state attribute
//! for artifacts and executions.
//!
//! Only names written under an owner are decomposed on read. Kinds that may
//! or may not have an owner record the owner under `parent_id`, so a local
//! name that happens to contain the separator reads back verbatim.

mod artifact;
mod experiment;
mod registered_model;
mod serving;

pub use artifact::{
    artifact_from_embedded, artifact_from_graph_node, artifact_from_record, artifact_to_embedded,
    artifact_to_graph_node, artifact_to_record,
};

use crate::custom;
use crate::error::{ConvertError, ConvertResult, ValueError};
use crate::naming;
use crate::record::{Property, Record};
use crate::registry::TypeRegistry;
use crate::store::{EmbeddedEntity, GraphNode};
use crate::value::{PropertyValue, StructValue};
use modelreg_model::{
    format_id, parse_id, CustomProperties, EntityKind, StoreCategory, WireEnum,
    WireEnumWithDefault,
};
use std::collections::HashMap;

/// Conversion between one domain entity kind and the neutral [`Record`].
pub trait EntityMapper: Sized {
    const KIND: EntityKind;

    /// Builds the record for a create or update.
    ///
    /// `parent_id` is the owner for kinds whose owner is not one of their own
    /// fields (artifacts under a version or run, serve models under an
    /// inference service). Kinds that carry their owner id ignore it.
    /// Timestamps are never written: the store assigns them.
    fn to_record(&self, parent_id: Option<&str>) -> ConvertResult<Record>;

    fn from_record(record: Record) -> ConvertResult<Self>;
}

// ── Store entry points ───────────────────────────────────────────

pub fn to_graph_node<T: EntityMapper>(
    entity: &T,
    parent_id: Option<&str>,
) -> ConvertResult<GraphNode> {
    entity.to_record(parent_id)?.into_graph_node(T::KIND)
}

pub fn from_graph_node<T: EntityMapper>(node: &GraphNode) -> ConvertResult<T> {
    check_type(T::KIND, node.category, node.type_name.as_deref())?;
    T::from_record(Record::from_graph_node(node, T::KIND)?)
}

pub fn to_embedded<T: EntityMapper>(
    entity: &T,
    parent_id: Option<&str>,
) -> ConvertResult<EmbeddedEntity> {
    entity.to_record(parent_id)?.into_embedded(T::KIND)
}

/// Embedded rows identify their type only by id. The row's type id must
/// resolve to `T`'s type name; an untyped row is rejected.
pub fn from_embedded<T: EntityMapper>(
    entity: &EmbeddedEntity,
    registry: &TypeRegistry,
) -> ConvertResult<T> {
    let type_id = entity.type_id.ok_or(ConvertError::Untyped)?;
    let type_name = registry.resolve_name(type_id)?;
    check_type(T::KIND, entity.category, Some(&type_name))?;
    T::from_record(Record::from_embedded(entity, T::KIND, Some(type_name))?)
}

fn check_type(
    kind: EntityKind,
    category: StoreCategory,
    type_name: Option<&str>,
) -> ConvertResult<()> {
    if category != kind.category() {
        return Err(ConvertError::TypeMismatch {
            kind,
            found: format!("{category:?}"),
        });
    }
    match type_name {
        Some(name) if name != kind.type_name() => Err(ConvertError::TypeMismatch {
            kind,
            found: name.to_string(),
        }),
        _ => Ok(()),
    }
}

// ── Writing ──────────────────────────────────────────────────────

/// Structured key holding the owner of an optionally owned entity.
pub(crate) const PARENT_KEY: &str = "parent_id";

pub(crate) struct RecordWriter {
    kind: EntityKind,
    record: Record,
}

impl RecordWriter {
    pub(crate) fn new(kind: EntityKind) -> Self {
        Self {
            kind,
            record: Record::new(kind),
        }
    }

    /// Present only on updates; creates leave identity to the store.
    pub(crate) fn id(&mut self, id: Option<&String>) -> ConvertResult<()> {
        let parsed = id.map(|raw| self.parse(IdField::Id, raw)).transpose()?;
        self.record.id = parsed;
        Ok(())
    }

    pub(crate) fn name(&mut self, owner_id: Option<&str>, name: Option<&String>) {
        self.record.name = Some(naming::compose(owner_id, name.map(String::as_str)));
    }

    /// Records the optional owner under [`PARENT_KEY`] and returns it in
    /// canonical form for use as the name prefix.
    pub(crate) fn parent(&mut self, parent_id: Option<&str>) -> ConvertResult<Option<String>> {
        let Some(raw) = parent_id.filter(|raw| !raw.is_empty()) else {
            return Ok(None);
        };
        let parsed = self.parse(IdField::Property(PARENT_KEY), raw)?;
        self.push(PARENT_KEY, PropertyValue::Int(parsed));
        Ok(Some(format_id(parsed)))
    }

    pub(crate) fn external_id(&mut self, external_id: Option<&String>) {
        self.record.external_id = external_id.cloned();
    }

    pub(crate) fn uri(&mut self, uri: Option<&String>) {
        self.record.uri = uri.cloned();
    }

    pub(crate) fn state_attribute<E: WireEnum>(&mut self, state: Option<E>) {
        self.record.state = state.map(|s| s.as_wire().to_string());
    }

    fn push(&mut self, key: &str, value: PropertyValue) {
        self.record.properties.push(Property::structured(key, value));
    }

    pub(crate) fn string(&mut self, key: &str, value: Option<&String>) {
        if let Some(s) = value {
            self.push(key, PropertyValue::String(s.clone()));
        }
    }

    pub(crate) fn double(&mut self, key: &str, value: Option<f64>) {
        if let Some(d) = value {
            self.push(key, PropertyValue::Double(d));
        }
    }

    pub(crate) fn int(&mut self, key: &str, value: Option<i64>) {
        if let Some(i) = value {
            self.push(key, PropertyValue::Int(i));
        }
    }

    /// A decimal string field (epoch timestamp) stored as an integer.
    pub(crate) fn int_literal(&mut self, key: &'static str, value: Option<&String>) -> ConvertResult<()> {
        if let Some(raw) = value {
            let parsed = self.parse(IdField::Property(key), raw)?;
            self.push(key, PropertyValue::Int(parsed));
        }
        Ok(())
    }

    /// An optional relation id.
    pub(crate) fn id_ref(&mut self, key: &'static str, value: Option<&String>) -> ConvertResult<()> {
        self.int_literal(key, value)
    }

    /// A mandatory relation id. Returns the id in canonical form so callers
    /// can use it as the name prefix.
    pub(crate) fn required_id_ref(
        &mut self,
        key: &'static str,
        value: Option<&String>,
    ) -> ConvertResult<String> {
        let raw = value
            .map(String::as_str)
            .filter(|raw| !raw.is_empty())
            .ok_or(ConvertError::MissingField {
                kind: self.kind,
                field: key,
            })?;
        let parsed = self.parse(IdField::Property(key), raw)?;
        self.push(key, PropertyValue::Int(parsed));
        Ok(format_id(parsed))
    }

    /// A list field, stored as a struct holding the list under `key`.
    pub(crate) fn list(&mut self, key: &str, value: Option<&Vec<String>>) {
        if let Some(items) = value {
            self.push(key, PropertyValue::Struct(StructValue::from_list(key, items)));
        }
    }

    pub(crate) fn state<E: WireEnum>(&mut self, key: &str, state: Option<E>) {
        if let Some(s) = state {
            self.push(key, PropertyValue::String(s.as_wire().to_string()));
        }
    }

    pub(crate) fn finish(mut self, custom: Option<&CustomProperties>) -> ConvertResult<Record> {
        if let Some(custom) = custom {
            let properties = custom::to_properties(self.kind, custom)?;
            self.record.properties.extend(properties);
        }
        Ok(self.record)
    }

    fn parse(&self, field: IdField, raw: &str) -> ConvertResult<i64> {
        parse_id(raw).map_err(|source| ConvertError::InvalidId {
            kind: self.kind,
            field: field.name(),
            source,
        })
    }
}

#[derive(Clone, Copy)]
enum IdField {
    Id,
    Property(&'static str),
}

impl IdField {
    const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Property(key) => key,
        }
    }
}

// ── Reading ──────────────────────────────────────────────────────

pub(crate) struct RecordReader {
    kind: EntityKind,
    record: Record,
    structured: HashMap<String, PropertyValue>,
    custom: CustomProperties,
}

impl RecordReader {
    /// Splits the record's properties into well-known and custom. A key is
    /// interpreted according to its flag only, never as both.
    pub(crate) fn new(kind: EntityKind, mut record: Record) -> ConvertResult<Self> {
        let properties = std::mem::take(&mut record.properties);
        let custom = custom::from_properties(kind, &properties)?;
        let structured = properties
            .into_iter()
            .filter(|p| !p.is_custom)
            .map(|p| (p.name, p.value))
            .collect();
        Ok(Self {
            kind,
            record,
            structured,
            custom,
        })
    }

    pub(crate) fn id(&self) -> Option<String> {
        self.record.id.map(format_id)
    }

    /// The stored name of an entity that is never owned, verbatim.
    pub(crate) fn name(&self) -> Option<String> {
        self.record.name.clone()
    }

    /// The local name of an entity written under `owner`. The prefix is
    /// removed only when it is that owner.
    pub(crate) fn name_under(&self, owner: Option<&str>) -> Option<String> {
        let name = self.record.name.as_deref()?;
        let local = match owner {
            Some(owner) if naming::owner_of(name) == Some(owner) => naming::decompose(name),
            _ => name,
        };
        Some(local.to_string())
    }

    /// The owner recorded by [`RecordWriter::parent`], if any.
    pub(crate) fn parent(&mut self) -> ConvertResult<Option<String>> {
        self.id_ref(PARENT_KEY)
    }

    pub(crate) fn external_id(&self) -> Option<String> {
        self.record.external_id.clone()
    }

    pub(crate) fn uri(&self) -> Option<String> {
        self.record.uri.clone()
    }

    pub(crate) fn create_time(&self) -> Option<String> {
        self.record.create_time_since_epoch.map(format_id)
    }

    pub(crate) fn update_time(&self) -> Option<String> {
        self.record.last_update_time_since_epoch.map(format_id)
    }

    /// Reads the state attribute; absence maps to the enum's declared default.
    pub(crate) fn state_attribute<E: WireEnumWithDefault>(
        &self,
        field: &'static str,
    ) -> ConvertResult<Option<E>> {
        E::parse_or_default(self.record.state.as_deref())
            .map(Some)
            .map_err(|source| ConvertError::InvalidState {
                kind: self.kind,
                field,
                source,
            })
    }

    fn take(&mut self, key: &str) -> Option<PropertyValue> {
        self.structured.remove(key)
    }

    fn mismatch(&self, key: &str, expected: &'static str, found: &PropertyValue) -> ConvertError {
        ConvertError::property(
            self.kind,
            key,
            ValueError::UnexpectedType {
                expected,
                found: found.type_label(),
            },
        )
    }

    pub(crate) fn string(&mut self, key: &str) -> ConvertResult<Option<String>> {
        match self.take(key) {
            None => Ok(None),
            Some(PropertyValue::String(s)) => Ok(Some(s)),
            Some(other) => Err(self.mismatch(key, "string", &other)),
        }
    }

    pub(crate) fn double(&mut self, key: &str) -> ConvertResult<Option<f64>> {
        match self.take(key) {
            None => Ok(None),
            Some(PropertyValue::Double(d)) => Ok(Some(d)),
            Some(other) => Err(self.mismatch(key, "double", &other)),
        }
    }

    pub(crate) fn int(&mut self, key: &str) -> ConvertResult<Option<i64>> {
        match self.take(key) {
            None => Ok(None),
            Some(PropertyValue::Int(i)) => Ok(Some(i)),
            Some(other) => Err(self.mismatch(key, "int", &other)),
        }
    }

    /// An integer property surfaced as a decimal string.
    pub(crate) fn int_literal(&mut self, key: &str) -> ConvertResult<Option<String>> {
        Ok(self.int(key)?.map(format_id))
    }

    pub(crate) fn id_ref(&mut self, key: &str) -> ConvertResult<Option<String>> {
        self.int_literal(key)
    }

    pub(crate) fn required_id_ref(&mut self, key: &'static str) -> ConvertResult<String> {
        self.id_ref(key)?.ok_or(ConvertError::MissingField {
            kind: self.kind,
            field: key,
        })
    }

    pub(crate) fn list(&mut self, key: &str) -> ConvertResult<Option<Vec<String>>> {
        match self.take(key) {
            None => Ok(None),
            Some(PropertyValue::Struct(doc)) => doc
                .to_list(key)
                .map(Some)
                .map_err(|e| ConvertError::property(self.kind, key, e)),
            Some(other) => Err(self.mismatch(key, "struct", &other)),
        }
    }

    /// Reads a state property. Absence stays absent.
    pub(crate) fn state<E: WireEnum>(&mut self, key: &'static str) -> ConvertResult<Option<E>> {
        let raw = self.string(key)?;
        E::parse_optional(raw.as_deref()).map_err(|source| ConvertError::InvalidState {
            kind: self.kind,
            field: key,
            source,
        })
    }

    /// Custom properties are always surfaced, empty or not.
    pub(crate) fn custom(&mut self) -> Option<CustomProperties> {
        Some(std::mem::take(&mut self.custom))
    }
}
