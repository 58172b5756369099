//! Artifact kinds and polymorphic artifact dispatch.
//!
//! All artifacts share one node family, so reading an arbitrary artifact
//! back requires its type name. Graph nodes usually carry it; embedded rows
//! only carry a type id, resolved through the [`TypeRegistry`].

use super::{check_type, EntityMapper, RecordReader, RecordWriter};
use crate::error::{ConvertError, ConvertResult};
use crate::record::Record;
use crate::registry::TypeRegistry;
use crate::store::{EmbeddedEntity, GraphNode};
use modelreg_model::{
    Artifact, ArtifactState, DataSet, DocArtifact, EntityKind, Metric, ModelArtifact, Parameter,
    StoreCategory,
};

/// Artifacts may be created standalone or under a version/run (`parent_id`).
impl EntityMapper for ModelArtifact {
    const KIND: EntityKind = EntityKind::ModelArtifact;

    fn to_record(&self, parent_id: Option<&str>) -> ConvertResult<Record> {
        let mut w = RecordWriter::new(Self::KIND);
        w.id(self.id.as_ref())?;
        let parent = w.parent(parent_id)?;
        w.name(parent.as_deref(), self.name.as_ref());
        w.external_id(self.external_id.as_ref());
        w.uri(self.uri.as_ref());
        w.state_attribute(self.state);
        w.string("description", self.description.as_ref());
        w.string("model_format_name", self.model_format_name.as_ref());
        w.string("model_format_version", self.model_format_version.as_ref());
        w.string("storage_key", self.storage_key.as_ref());
        w.string("storage_path", self.storage_path.as_ref());
        w.string("service_account_name", self.service_account_name.as_ref());
        w.string("model_source_kind", self.model_source_kind.as_ref());
        w.string("model_source_class", self.model_source_class.as_ref());
        w.string("model_source_group", self.model_source_group.as_ref());
        w.string("model_source_id", self.model_source_id.as_ref());
        w.string("model_source_name", self.model_source_name.as_ref());
        w.finish(self.custom_properties.as_ref())
    }

    fn from_record(record: Record) -> ConvertResult<Self> {
        let mut r = RecordReader::new(Self::KIND, record)?;
        let parent = r.parent()?;
        Ok(Self {
            id: r.id(),
            external_id: r.external_id(),
            name: r.name_under(parent.as_deref()),
            uri: r.uri(),
            state: r.state_attribute::<ArtifactState>("state")?,
            description: r.string("description")?,
            model_format_name: r.string("model_format_name")?,
            model_format_version: r.string("model_format_version")?,
            storage_key: r.string("storage_key")?,
            storage_path: r.string("storage_path")?,
            service_account_name: r.string("service_account_name")?,
            model_source_kind: r.string("model_source_kind")?,
            model_source_class: r.string("model_source_class")?,
            model_source_group: r.string("model_source_group")?,
            model_source_id: r.string("model_source_id")?,
            model_source_name: r.string("model_source_name")?,
            custom_properties: r.custom(),
            create_time_since_epoch: r.create_time(),
            last_update_time_since_epoch: r.update_time(),
        })
    }
}

impl EntityMapper for DocArtifact {
    const KIND: EntityKind = EntityKind::DocArtifact;

    fn to_record(&self, parent_id: Option<&str>) -> ConvertResult<Record> {
        let mut w = RecordWriter::new(Self::KIND);
        w.id(self.id.as_ref())?;
        let parent = w.parent(parent_id)?;
        w.name(parent.as_deref(), self.name.as_ref());
        w.external_id(self.external_id.as_ref());
        w.uri(self.uri.as_ref());
        w.state_attribute(self.state);
        w.string("description", self.description.as_ref());
        w.finish(self.custom_properties.as_ref())
    }

    fn from_record(record: Record) -> ConvertResult<Self> {
        let mut r = RecordReader::new(Self::KIND, record)?;
        let parent = r.parent()?;
        Ok(Self {
            id: r.id(),
            external_id: r.external_id(),
            name: r.name_under(parent.as_deref()),
            uri: r.uri(),
            state: r.state_attribute::<ArtifactState>("state")?,
            description: r.string("description")?,
            custom_properties: r.custom(),
            create_time_since_epoch: r.create_time(),
            last_update_time_since_epoch: r.update_time(),
        })
    }
}

impl EntityMapper for DataSet {
    const KIND: EntityKind = EntityKind::DataSet;

    fn to_record(&self, parent_id: Option<&str>) -> ConvertResult<Record> {
        let mut w = RecordWriter::new(Self::KIND);
        w.id(self.id.as_ref())?;
        let parent = w.parent(parent_id)?;
        w.name(parent.as_deref(), self.name.as_ref());
        w.external_id(self.external_id.as_ref());
        w.uri(self.uri.as_ref());
        w.state_attribute(self.state);
        w.string("description", self.description.as_ref());
        w.string("digest", self.digest.as_ref());
        w.string("source_type", self.source_type.as_ref());
        w.string("source", self.source.as_ref());
        w.string("schema", self.schema.as_ref());
        w.string("profile", self.profile.as_ref());
        w.finish(self.custom_properties.as_ref())
    }

    fn from_record(record: Record) -> ConvertResult<Self> {
        let mut r = RecordReader::new(Self::KIND, record)?;
        let parent = r.parent()?;
        Ok(Self {
            id: r.id(),
            external_id: r.external_id(),
            name: r.name_under(parent.as_deref()),
            uri: r.uri(),
            state: r.state_attribute::<ArtifactState>("state")?,
            description: r.string("description")?,
            digest: r.string("digest")?,
            source_type: r.string("source_type")?,
            source: r.string("source")?,
            schema: r.string("schema")?,
            profile: r.string("profile")?,
            custom_properties: r.custom(),
            create_time_since_epoch: r.create_time(),
            last_update_time_since_epoch: r.update_time(),
        })
    }
}

impl EntityMapper for Metric {
    const KIND: EntityKind = EntityKind::Metric;

    fn to_record(&self, parent_id: Option<&str>) -> ConvertResult<Record> {
        let mut w = RecordWriter::new(Self::KIND);
        w.id(self.id.as_ref())?;
        let parent = w.parent(parent_id)?;
        w.name(parent.as_deref(), self.name.as_ref());
        w.external_id(self.external_id.as_ref());
        w.state_attribute(self.state);
        w.string("description", self.description.as_ref());
        w.double("value", self.value);
        w.int_literal("timestamp", self.timestamp.as_ref())?;
        w.int("step", self.step);
        w.finish(self.custom_properties.as_ref())
    }

    fn from_record(record: Record) -> ConvertResult<Self> {
        let mut r = RecordReader::new(Self::KIND, record)?;
        let parent = r.parent()?;
        Ok(Self {
            id: r.id(),
            external_id: r.external_id(),
            name: r.name_under(parent.as_deref()),
            state: r.state_attribute::<ArtifactState>("state")?,
            description: r.string("description")?,
            value: r.double("value")?,
            timestamp: r.int_literal("timestamp")?,
            step: r.int("step")?,
            custom_properties: r.custom(),
            create_time_since_epoch: r.create_time(),
            last_update_time_since_epoch: r.update_time(),
        })
    }
}

impl EntityMapper for Parameter {
    const KIND: EntityKind = EntityKind::Parameter;

    fn to_record(&self, parent_id: Option<&str>) -> ConvertResult<Record> {
        let mut w = RecordWriter::new(Self::KIND);
        w.id(self.id.as_ref())?;
        let parent = w.parent(parent_id)?;
        w.name(parent.as_deref(), self.name.as_ref());
        w.external_id(self.external_id.as_ref());
        w.state_attribute(self.state);
        w.string("description", self.description.as_ref());
        w.string("value", self.value.as_ref());
        w.string("parameter_type", self.parameter_type.as_ref());
        w.finish(self.custom_properties.as_ref())
    }

    fn from_record(record: Record) -> ConvertResult<Self> {
        let mut r = RecordReader::new(Self::KIND, record)?;
        let parent = r.parent()?;
        Ok(Self {
            id: r.id(),
            external_id: r.external_id(),
            name: r.name_under(parent.as_deref()),
            state: r.state_attribute::<ArtifactState>("state")?,
            description: r.string("description")?,
            value: r.string("value")?,
            parameter_type: r.string("parameter_type")?,
            custom_properties: r.custom(),
            create_time_since_epoch: r.create_time(),
            last_update_time_since_epoch: r.update_time(),
        })
    }
}

// ── Polymorphic dispatch ─────────────────────────────────────────

pub fn artifact_to_record(artifact: &Artifact, parent_id: Option<&str>) -> ConvertResult<Record> {
    match artifact {
        Artifact::Model(a) => a.to_record(parent_id),
        Artifact::Doc(a) => a.to_record(parent_id),
        Artifact::DataSet(a) => a.to_record(parent_id),
        Artifact::Metric(a) => a.to_record(parent_id),
        Artifact::Parameter(a) => a.to_record(parent_id),
    }
}

/// Picks the concrete artifact kind from the record's type name.
pub fn artifact_from_record(record: Record) -> ConvertResult<Artifact> {
    let kind = artifact_kind(record.type_name.as_deref().ok_or(ConvertError::Untyped)?)?;
    match kind {
        EntityKind::ModelArtifact => ModelArtifact::from_record(record).map(Artifact::Model),
        EntityKind::DocArtifact => DocArtifact::from_record(record).map(Artifact::Doc),
        EntityKind::DataSet => DataSet::from_record(record).map(Artifact::DataSet),
        EntityKind::Metric => Metric::from_record(record).map(Artifact::Metric),
        EntityKind::Parameter => Parameter::from_record(record).map(Artifact::Parameter),
        other => Err(ConvertError::UnknownType(other.type_name().to_string())),
    }
}

pub fn artifact_to_graph_node(
    artifact: &Artifact,
    parent_id: Option<&str>,
) -> ConvertResult<GraphNode> {
    artifact_to_record(artifact, parent_id)?.into_graph_node(artifact.kind())
}

/// Uses the node's own type name when present, otherwise resolves its type id.
pub fn artifact_from_graph_node(
    node: &GraphNode,
    registry: &TypeRegistry,
) -> ConvertResult<Artifact> {
    let type_name = match &node.type_name {
        Some(name) => name.clone(),
        None => registry.resolve_name(node.type_id.ok_or(ConvertError::Untyped)?)?,
    };
    let kind = artifact_kind(&type_name)?;
    check_type(kind, node.category, Some(&type_name))?;
    let mut record = Record::from_graph_node(node, kind)?;
    record.type_name = Some(type_name);
    artifact_from_record(record)
}

pub fn artifact_to_embedded(
    artifact: &Artifact,
    parent_id: Option<&str>,
) -> ConvertResult<EmbeddedEntity> {
    artifact_to_record(artifact, parent_id)?.into_embedded(artifact.kind())
}

pub fn artifact_from_embedded(
    entity: &EmbeddedEntity,
    registry: &TypeRegistry,
) -> ConvertResult<Artifact> {
    let type_id = entity.type_id.ok_or(ConvertError::Untyped)?;
    let type_name = registry.resolve_name(type_id)?;
    let kind = artifact_kind(&type_name)?;
    check_type(kind, entity.category, Some(&type_name))?;
    artifact_from_record(Record::from_embedded(entity, kind, Some(type_name))?)
}

fn artifact_kind(type_name: &str) -> ConvertResult<EntityKind> {
    EntityKind::from_type_name(type_name)
        .filter(|kind| kind.category() == StoreCategory::Artifact)
        .ok_or_else(|| ConvertError::UnknownType(type_name.to_string()))
}
