use crate::{ArtifactState, CustomProperties, EntityKind};
use serde::{Deserialize, Serialize};

/// Model weights or a pointer to them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelArtifact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ArtifactState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_format_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_format_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_source_kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_source_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_source_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_source_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_source_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_properties: Option<CustomProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time_since_epoch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_time_since_epoch: Option<String>,
}

/// Documentation attached to a version (model card, README, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DocArtifact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ArtifactState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_properties: Option<CustomProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time_since_epoch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_time_since_epoch: Option<String>,
}

/// A dataset consumed or produced by an experiment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DataSet {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ArtifactState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_properties: Option<CustomProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time_since_epoch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_time_since_epoch: Option<String>,
}

/// A numeric measurement logged by an experiment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Metric {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ArtifactState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    /// Epoch milliseconds, as a decimal string.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_properties: Option<CustomProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time_since_epoch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_time_since_epoch: Option<String>,
}

/// A hyperparameter recorded for an experiment run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Parameter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<ArtifactState>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// One of `string`, `number`, `boolean` or `object`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_properties: Option<CustomProperties>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub create_time_since_epoch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_update_time_since_epoch: Option<String>,
}

/// Any artifact kind, discriminated on the wire by `artifactType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "artifactType")]
pub enum Artifact {
    #[serde(rename = "model-artifact")]
    Model(ModelArtifact),
    #[serde(rename = "doc-artifact")]
    Doc(DocArtifact),
    #[serde(rename = "dataset-artifact")]
    DataSet(DataSet),
    #[serde(rename = "metric")]
    Metric(Metric),
    #[serde(rename = "parameter")]
    Parameter(Parameter),
}

impl Artifact {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Model(_) => EntityKind::ModelArtifact,
            Self::Doc(_) => EntityKind::DocArtifact,
            Self::DataSet(_) => EntityKind::DataSet,
            Self::Metric(_) => EntityKind::Metric,
            Self::Parameter(_) => EntityKind::Parameter,
        }
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Model(a) => a.id.as_deref(),
            Self::Doc(a) => a.id.as_deref(),
            Self::DataSet(a) => a.id.as_deref(),
            Self::Metric(a) => a.id.as_deref(),
            Self::Parameter(a) => a.id.as_deref(),
        }
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Model(a) => a.name.as_deref(),
            Self::Doc(a) => a.name.as_deref(),
            Self::DataSet(a) => a.name.as_deref(),
            Self::Metric(a) => a.name.as_deref(),
            Self::Parameter(a) => a.name.as_deref(),
        }
    }
}

impl From<ModelArtifact> for Artifact {
    fn from(value: ModelArtifact) -> Self {
        Self::Model(value)
    }
}

impl From<DocArtifact> for Artifact {
    fn from(value: DocArtifact) -> Self {
        Self::Doc(value)
    }
}

impl From<DataSet> for Artifact {
    fn from(value: DataSet) -> Self {
        Self::DataSet(value)
    }
}

impl From<Metric> for Artifact {
    fn from(value: Metric) -> Self {
        Self::Metric(value)
    }
}

impl From<Parameter> for Artifact {
    fn from(value: Parameter) -> Self {
        Self::Parameter(value)
    }
}
