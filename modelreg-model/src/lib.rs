//! REST-facing entity model for the model registry.
//!
//! Defines the strongly-typed domain that the HTTP layer exchanges and that
//! the metadata translation engine converts to and from its storage shapes:
//! - [`RegisteredModel`], [`ModelVersion`] and the artifact kinds gathered in [`Artifact`]
//! - [`ServingEnvironment`], [`InferenceService`], [`ServeModel`]
//! - [`Experiment`], [`ExperimentRun`]
//! - [`MetadataValue`] — the user-facing typed custom property value
//! - lifecycle state enums and their validating parser ([`WireEnum`])
//! - [`EntityKind`] — the compile-time type name and store category of each kind
//!
//! Ids are carried as decimal strings on the wire; [`parse_id`] and
//! [`format_id`] convert them to and from the stores' 64-bit integers.

mod entity;
mod ids;
mod kind;
mod metadata;
mod state;

pub use entity::{
    Artifact, DataSet, DocArtifact, Experiment, ExperimentRun, InferenceService, Metric,
    ModelArtifact, ModelVersion, Parameter, RegisteredModel, ServeModel, ServingEnvironment,
};
pub use ids::{format_id, parse_id, parse_optional_id};
pub use kind::{EntityKind, StoreCategory};
pub use metadata::{CustomProperties, MetadataValue};
pub use state::{
    ArtifactState, ExecutionState, ExperimentRunState, ExperimentRunStatus, ExperimentState,
    InferenceServiceState, ModelVersionState, RegisteredModelState, StateError, WireEnum,
    WireEnumWithDefault,
};

/// Result type alias using the crate's error type.
pub type ModelResult<T> = std::result::Result<T, ModelError>;

/// Errors that can occur while interpreting domain values.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("invalid numeric id {literal:?}: {reason}")]
    InvalidId { literal: String, reason: String },

    #[error(transparent)]
    State(#[from] StateError),
}

/// How the REST boundary should surface an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The input was malformed; report it to the client, never retry.
    BadRequest,
    /// A referenced store type or entity does not exist.
    NotFound,
    /// Startup or programming error.
    Fatal,
}
