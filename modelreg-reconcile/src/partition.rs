//! Per-kind field partitions, one per protocol.
//!
//! Names are the serialized (camelCase) field names. Identity and store
//! timestamps are protected under every protocol; each kind adds the
//! ownership links that must never move once created. Each kind also lists
//! its remaining fields against their Rust names, which is what lets the
//! protocols merge on the typed struct.

use modelreg_model::{
    DataSet, DocArtifact, EntityKind, Experiment, ExperimentRun, InferenceService, Metric,
    ModelArtifact, ModelVersion, Parameter, RegisteredModel, ServeModel, ServingEnvironment,
};
use serde::de::DeserializeOwned;

/// The protected and editable field sets of one protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPartition {
    pub protected: &'static [&'static str],
    pub editable: &'static [&'static str],
}

impl FieldPartition {
    #[must_use]
    pub fn is_protected(&self, field: &str) -> bool {
        self.protected.contains(&field)
    }

    #[must_use]
    pub fn is_editable(&self, field: &str) -> bool {
        self.editable.contains(&field)
    }

    /// Every classified field name, protected first.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> {
        self.protected.iter().chain(self.editable).copied()
    }
}

/// An entity kind with declared reconciliation partitions.
pub trait Reconciled: DeserializeOwned + Clone {
    const KIND: EntityKind;

    /// Partition used by [`crate::Override`].
    const OVERRIDE: FieldPartition;

    /// Partition used by [`crate::Reconcile`].
    const RECONCILE: FieldPartition;

    fn id(&self) -> Option<&str>;

    /// Drops the id and store timestamps, which the store assigns.
    fn clear_identity(&mut self);

    /// Copies the field with serialized name `field` from `from`, set or
    /// not. Returns `false` when `Self` has no such field.
    fn copy_field(&mut self, from: &Self, field: &str) -> bool;

    /// Whether the named field is set, or `None` when `Self` has no such
    /// field.
    fn field_is_set(&self, field: &str) -> Option<bool>;
}

macro_rules! reconciled {
    (
        $ty:ident { $($name:literal => $field:ident),* $(,)? },
        Override { protected: [$($op:literal),* $(,)?], editable: [$($oe:literal),* $(,)?] $(,)? },
        Reconcile { protected: [$($rp:literal),* $(,)?], editable: [$($re:literal),* $(,)?] $(,)? } $(,)?
    ) => {
        impl Reconciled for $ty {
            const KIND: EntityKind = EntityKind::$ty;

            const OVERRIDE: FieldPartition = FieldPartition {
                protected: &["id", "name", "createTimeSinceEpoch", "lastUpdateTimeSinceEpoch", $($op),*],
                editable: &[$($oe),*],
            };

            const RECONCILE: FieldPartition = FieldPartition {
                protected: &["id", "name", "createTimeSinceEpoch", "lastUpdateTimeSinceEpoch", $($rp),*],
                editable: &[$($re),*],
            };

            fn id(&self) -> Option<&str> {
                self.id.as_deref()
            }

            fn clear_identity(&mut self) {
                self.id = None;
                self.create_time_since_epoch = None;
                self.last_update_time_since_epoch = None;
            }

            fn copy_field(&mut self, from: &Self, field: &str) -> bool {
                match field {
                    "id" => self.id.clone_from(&from.id),
                    "name" => self.name.clone_from(&from.name),
                    "createTimeSinceEpoch" => self
                        .create_time_since_epoch
                        .clone_from(&from.create_time_since_epoch),
                    "lastUpdateTimeSinceEpoch" => self
                        .last_update_time_since_epoch
                        .clone_from(&from.last_update_time_since_epoch),
                    $($name => self.$field.clone_from(&from.$field),)*
                    _ => return false,
                }
                true
            }

            fn field_is_set(&self, field: &str) -> Option<bool> {
                let set = match field {
                    "id" => self.id.is_some(),
                    "name" => self.name.is_some(),
                    "createTimeSinceEpoch" => self.create_time_since_epoch.is_some(),
                    "lastUpdateTimeSinceEpoch" => self.last_update_time_since_epoch.is_some(),
                    $($name => self.$field.is_some(),)*
                    _ => return None,
                };
                Some(set)
            }
        }
    };
}

// ── Model registry ───────────────────────────────────────────────

reconciled!(
    RegisteredModel {
        "externalId" => external_id, "description" => description, "owner" => owner,
        "state" => state, "language" => language, "libraryName" => library_name,
        "license" => license, "licenseLink" => license_link, "logo" => logo,
        "maturity" => maturity, "provider" => provider, "readme" => readme, "tasks" => tasks,
        "customProperties" => custom_properties,
    },
    Override {
        protected: [],
        editable: [
            "externalId", "description", "owner", "state", "language", "libraryName", "license",
            "licenseLink", "logo", "maturity", "provider", "readme", "tasks", "customProperties",
        ],
    },
    Reconcile {
        protected: [],
        editable: [
            "externalId", "description", "owner", "state", "language", "libraryName", "license",
            "licenseLink", "logo", "maturity", "provider", "readme", "tasks", "customProperties",
        ],
    },
);

reconciled!(
    ModelVersion {
        "registeredModelId" => registered_model_id, "externalId" => external_id,
        "description" => description, "author" => author, "state" => state,
        "customProperties" => custom_properties,
    },
    Override {
        protected: ["registeredModelId"],
        editable: ["externalId", "description", "author", "state", "customProperties"],
    },
    Reconcile {
        protected: ["registeredModelId"],
        editable: ["externalId", "description", "author", "state", "customProperties"],
    },
);

// ── Artifacts ────────────────────────────────────────────────────

reconciled!(
    ModelArtifact {
        "externalId" => external_id, "description" => description, "uri" => uri,
        "state" => state, "modelFormatName" => model_format_name,
        "modelFormatVersion" => model_format_version, "storageKey" => storage_key,
        "storagePath" => storage_path, "serviceAccountName" => service_account_name,
        "modelSourceKind" => model_source_kind, "modelSourceClass" => model_source_class,
        "modelSourceGroup" => model_source_group, "modelSourceId" => model_source_id,
        "modelSourceName" => model_source_name, "customProperties" => custom_properties,
    },
    Override {
        protected: [],
        editable: [
            "externalId", "description", "uri", "state", "modelFormatName", "modelFormatVersion",
            "storageKey", "storagePath", "serviceAccountName", "modelSourceKind",
            "modelSourceClass", "modelSourceGroup", "modelSourceId", "modelSourceName",
            "customProperties",
        ],
    },
    Reconcile {
        protected: [],
        editable: [
            "externalId", "description", "uri", "state", "modelFormatName", "modelFormatVersion",
            "storageKey", "storagePath", "serviceAccountName", "modelSourceKind",
            "modelSourceClass", "modelSourceGroup", "modelSourceId", "modelSourceName",
            "customProperties",
        ],
    },
);

reconciled!(
    DocArtifact {
        "externalId" => external_id, "description" => description, "uri" => uri,
        "state" => state, "customProperties" => custom_properties,
    },
    Override {
        protected: [],
        editable: ["externalId", "description", "uri", "state", "customProperties"],
    },
    Reconcile {
        protected: [],
        editable: ["externalId", "description", "uri", "state", "customProperties"],
    },
);

reconciled!(
    DataSet {
        "externalId" => external_id, "description" => description, "uri" => uri,
        "state" => state, "digest" => digest, "sourceType" => source_type, "source" => source,
        "schema" => schema, "profile" => profile, "customProperties" => custom_properties,
    },
    Override {
        protected: [],
        editable: [
            "externalId", "description", "uri", "state", "digest", "sourceType", "source",
            "schema", "profile", "customProperties",
        ],
    },
    Reconcile {
        protected: [],
        editable: [
            "externalId", "description", "uri", "state", "digest", "sourceType", "source",
            "schema", "profile", "customProperties",
        ],
    },
);

reconciled!(
    Metric {
        "externalId" => external_id, "description" => description, "state" => state,
        "value" => value, "timestamp" => timestamp, "step" => step,
        "customProperties" => custom_properties,
    },
    Override {
        protected: [],
        editable: [
            "externalId", "description", "state", "value", "timestamp", "step", "customProperties",
        ],
    },
    Reconcile {
        protected: [],
        editable: [
            "externalId", "description", "state", "value", "timestamp", "step", "customProperties",
        ],
    },
);

reconciled!(
    Parameter {
        "externalId" => external_id, "description" => description, "state" => state,
        "value" => value, "parameterType" => parameter_type,
        "customProperties" => custom_properties,
    },
    Override {
        protected: [],
        editable: ["externalId", "description", "state", "value", "parameterType", "customProperties"],
    },
    Reconcile {
        protected: [],
        editable: ["externalId", "description", "state", "value", "parameterType", "customProperties"],
    },
);

// ── Serving ──────────────────────────────────────────────────────

reconciled!(
    ServingEnvironment {
        "externalId" => external_id, "description" => description,
        "customProperties" => custom_properties,
    },
    Override {
        protected: [],
        editable: ["externalId", "description", "customProperties"],
    },
    Reconcile {
        protected: [],
        editable: ["externalId", "description", "customProperties"],
    },
);

reconciled!(
    InferenceService {
        "registeredModelId" => registered_model_id,
        "servingEnvironmentId" => serving_environment_id, "externalId" => external_id,
        "description" => description, "runtime" => runtime, "desiredState" => desired_state,
        "modelVersionId" => model_version_id, "customProperties" => custom_properties,
    },
    Override {
        protected: ["registeredModelId", "servingEnvironmentId"],
        editable: [
            "externalId", "description", "runtime", "desiredState", "modelVersionId",
            "customProperties",
        ],
    },
    Reconcile {
        protected: ["registeredModelId", "servingEnvironmentId"],
        editable: [
            "externalId", "description", "runtime", "desiredState", "modelVersionId",
            "customProperties",
        ],
    },
);

reconciled!(
    ServeModel {
        "modelVersionId" => model_version_id, "externalId" => external_id,
        "description" => description, "lastKnownState" => last_known_state,
        "customProperties" => custom_properties,
    },
    Override {
        protected: ["modelVersionId"],
        editable: ["externalId", "description", "lastKnownState", "customProperties"],
    },
    Reconcile {
        protected: ["modelVersionId"],
        editable: ["externalId", "description", "lastKnownState", "customProperties"],
    },
);

// ── Experiments ──────────────────────────────────────────────────

reconciled!(
    Experiment {
        "externalId" => external_id, "description" => description, "owner" => owner,
        "state" => state, "customProperties" => custom_properties,
    },
    Override {
        protected: [],
        editable: ["externalId", "description", "owner", "state", "customProperties"],
    },
    Reconcile {
        protected: [],
        editable: ["externalId", "description", "owner", "state", "customProperties"],
    },
);

reconciled!(
    ExperimentRun {
        "experimentId" => experiment_id, "startTimeSinceEpoch" => start_time_since_epoch,
        "externalId" => external_id, "description" => description, "owner" => owner,
        "state" => state, "status" => status, "endTimeSinceEpoch" => end_time_since_epoch,
        "customProperties" => custom_properties,
    },
    Override {
        protected: ["experimentId", "startTimeSinceEpoch"],
        editable: [
            "externalId", "description", "owner", "state", "status", "endTimeSinceEpoch",
            "customProperties",
        ],
    },
    Reconcile {
        protected: ["experimentId", "startTimeSinceEpoch"],
        editable: [
            "externalId", "description", "owner", "state", "status", "endTimeSinceEpoch",
            "customProperties",
        ],
    },
);
