//! Domain entities as the REST layer exchanges them.
//!
//! All fields are optional on the wire: identity and timestamps are assigned
//! by the store and absent on create, and update payloads only carry what
//! they change. Which fields a conversion requires is decided by the
//! converters, not by these types.

mod artifact;
mod experiment;
mod registered_model;
mod serving;

pub use artifact::{Artifact, DataSet, DocArtifact, Metric, ModelArtifact, Parameter};
pub use experiment::{Experiment, ExperimentRun};
pub use registered_model::{ModelVersion, RegisteredModel};
pub use serving::{InferenceService, ServeModel, ServingEnvironment};
