use modelreg_model::{EntityKind, ErrorClass};
use thiserror::Error;

/// Result type for reconciliation operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A field is in neither set of a protocol's partition.
    #[error("{kind}: field {field:?} is not classified for {protocol}")]
    Unclassified {
        kind: EntityKind,
        protocol: &'static str,
        field: &'static str,
    },

    /// A field is both protected and editable under one protocol.
    #[error("{kind}: field {field:?} is both protected and editable for {protocol}")]
    DoublyClassified {
        kind: EntityKind,
        protocol: &'static str,
        field: &'static str,
    },

    /// A partition names a field the entity does not have.
    #[error("{kind}: {protocol} partition names unknown field {field:?}")]
    UnknownField {
        kind: EntityKind,
        protocol: &'static str,
        field: &'static str,
    },

    #[error("{0}: entity does not serialize as a struct")]
    NotAStruct(EntityKind),

    /// The update targets a different entity than the one stored.
    #[error("{kind}: update id {update:?} does not match stored id {existing:?}")]
    IdMismatch {
        kind: EntityKind,
        existing: String,
        update: String,
    },
}

impl ReconcileError {
    /// Only a request that contradicts the stored entity is the caller's
    /// fault; the rest are partition tables out of step with the types.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::IdMismatch { .. } => ErrorClass::BadRequest,
            Self::Unclassified { .. }
            | Self::DoublyClassified { .. }
            | Self::UnknownField { .. }
            | Self::NotAStruct(_) => ErrorClass::Fatal,
        }
    }
}
