//! Create-time defaults and the upsert entry points built on them.

use crate::error::{ReconcileError, ReconcileResult};
use crate::partition::Reconciled;
use crate::protocol::Override;
use modelreg_model::{
    Artifact, ArtifactState, DataSet, DocArtifact, ExecutionState, Experiment, ExperimentRun,
    ExperimentRunState, ExperimentRunStatus, ExperimentState, InferenceService,
    InferenceServiceState, Metric, ModelArtifact, ModelVersion, ModelVersionState, Parameter,
    RegisteredModel, RegisteredModelState, ServeModel, ServingEnvironment,
};
use tracing::debug;

/// Fills unset lifecycle fields with their creation defaults. Fields the
/// caller set are left alone.
pub trait CreateDefaults {
    fn fill_defaults(&mut self);
}

impl CreateDefaults for RegisteredModel {
    fn fill_defaults(&mut self) {
        self.state.get_or_insert(RegisteredModelState::Live);
    }
}

impl CreateDefaults for ModelVersion {
    fn fill_defaults(&mut self) {
        self.state.get_or_insert(ModelVersionState::Live);
    }
}

impl CreateDefaults for ModelArtifact {
    fn fill_defaults(&mut self) {
        self.state.get_or_insert(ArtifactState::Unknown);
    }
}

impl CreateDefaults for DocArtifact {
    fn fill_defaults(&mut self) {
        self.state.get_or_insert(ArtifactState::Unknown);
    }
}

impl CreateDefaults for DataSet {
    fn fill_defaults(&mut self) {
        self.state.get_or_insert(ArtifactState::Unknown);
    }
}

impl CreateDefaults for Metric {
    fn fill_defaults(&mut self) {
        self.state.get_or_insert(ArtifactState::Unknown);
    }
}

impl CreateDefaults for Parameter {
    fn fill_defaults(&mut self) {
        self.state.get_or_insert(ArtifactState::Unknown);
    }
}

impl CreateDefaults for Artifact {
    fn fill_defaults(&mut self) {
        match self {
            Self::Model(a) => a.fill_defaults(),
            Self::Doc(a) => a.fill_defaults(),
            Self::DataSet(a) => a.fill_defaults(),
            Self::Metric(a) => a.fill_defaults(),
            Self::Parameter(a) => a.fill_defaults(),
        }
    }
}

/// Nothing to default.
impl CreateDefaults for ServingEnvironment {
    fn fill_defaults(&mut self) {}
}

impl CreateDefaults for InferenceService {
    fn fill_defaults(&mut self) {
        self.desired_state.get_or_insert(InferenceServiceState::Deployed);
    }
}

impl CreateDefaults for ServeModel {
    fn fill_defaults(&mut self) {
        self.last_known_state.get_or_insert(ExecutionState::Unknown);
    }
}

impl CreateDefaults for Experiment {
    fn fill_defaults(&mut self) {
        self.state.get_or_insert(ExperimentState::Live);
    }
}

impl CreateDefaults for ExperimentRun {
    fn fill_defaults(&mut self) {
        self.state.get_or_insert(ExperimentRunState::Live);
        self.status.get_or_insert(ExperimentRunStatus::Scheduled);
    }
}

/// Prepares a new entity for insertion: store-assigned fields are dropped
/// and lifecycle defaults filled.
#[must_use]
pub fn prepare_create<T: Reconciled + CreateDefaults>(entity: &T) -> T {
    let mut prepared = entity.clone();
    prepared.clear_identity();
    prepared.fill_defaults();
    debug!(kind = %T::KIND, "Prepared entity for create");
    prepared
}

/// Prepares a full replacement of `existing`: defaults are filled on the
/// update, then [`Override`] restores the protected fields.
///
/// An update carrying an id must target `existing`.
pub fn prepare_update<T: Reconciled + CreateDefaults>(
    existing: &T,
    update: &T,
) -> ReconcileResult<T> {
    if let (Some(stored), Some(requested)) = (existing.id(), update.id())
        && stored != requested
    {
        return Err(ReconcileError::IdMismatch {
            kind: T::KIND,
            existing: stored.to_string(),
            update: requested.to_string(),
        });
    }
    let mut filled = update.clone();
    filled.fill_defaults();
    Override::apply(existing, &filled)
}
