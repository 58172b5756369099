use serde::{Deserialize, Serialize};
use std::fmt;

/// Which generic store node family an entity kind lives in.
///
/// The graph store keeps three node tables (contexts, artifacts and
/// executions); the embedded store mirrors the same split in its attribute
/// tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreCategory {
    Context,
    Artifact,
    Execution,
}

/// Every entity kind the registry knows how to translate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    RegisteredModel,
    ModelVersion,
    ModelArtifact,
    DocArtifact,
    DataSet,
    Metric,
    Parameter,
    ServingEnvironment,
    InferenceService,
    ServeModel,
    Experiment,
    ExperimentRun,
}

impl EntityKind {
    /// All kinds, in declaration order.
    pub const ALL: [Self; 12] = [
        Self::RegisteredModel,
        Self::ModelVersion,
        Self::ModelArtifact,
        Self::DocArtifact,
        Self::DataSet,
        Self::Metric,
        Self::Parameter,
        Self::ServingEnvironment,
        Self::InferenceService,
        Self::ServeModel,
        Self::Experiment,
        Self::ExperimentRun,
    ];

    /// The fixed store type name used for inbound conversions.
    #[must_use]
    pub const fn type_name(self) -> &'static str {
        match self {
            Self::RegisteredModel => "kf.RegisteredModel",
            Self::ModelVersion => "kf.ModelVersion",
            Self::ModelArtifact => "kf.ModelArtifact",
            Self::DocArtifact => "kf.DocArtifact",
            Self::DataSet => "kf.DataSet",
            Self::Metric => "kf.Metric",
            Self::Parameter => "kf.Parameter",
            Self::ServingEnvironment => "kf.ServingEnvironment",
            Self::InferenceService => "kf.InferenceService",
            Self::ServeModel => "kf.ServeModel",
            Self::Experiment => "kf.Experiment",
            Self::ExperimentRun => "kf.ExperimentRun",
        }
    }

    #[must_use]
    pub const fn category(self) -> StoreCategory {
        match self {
            Self::ModelArtifact
            | Self::DocArtifact
            | Self::DataSet
            | Self::Metric
            | Self::Parameter => StoreCategory::Artifact,
            Self::ServeModel => StoreCategory::Execution,
            Self::RegisteredModel
            | Self::ModelVersion
            | Self::ServingEnvironment
            | Self::InferenceService
            | Self::Experiment
            | Self::ExperimentRun => StoreCategory::Context,
        }
    }

    /// Looks a kind up by its store type name.
    #[must_use]
    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.type_name() == name)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.type_name();
        f.write_str(name.strip_prefix("kf.").unwrap_or(name))
    }
}
