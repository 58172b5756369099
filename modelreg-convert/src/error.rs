//! Error types for the translation engine.
//!
//! Codec failures are raised as context-free [`ValueError`]s and wrapped
//! into a [`ConvertError`] that names the entity kind and the offending key
//! before they leave the crate.

pub use modelreg_model::ErrorClass;
use modelreg_model::{EntityKind, ModelError, StateError};
use thiserror::Error;

/// Result type for conversion operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

/// A failure translating one value, before key and kind are known.
#[derive(Debug, Error)]
pub enum ValueError {
    /// No value variant is populated.
    #[error("no known value shape matches")]
    TypeMapping,

    #[error("invalid integer literal {literal:?}: {source}")]
    InvalidInt {
        literal: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("cannot encode struct value: {0}")]
    StructEncode(#[from] rmp_serde::encode::Error),

    #[error("cannot decode struct value: {0}")]
    StructDecode(#[from] rmp_serde::decode::Error),

    #[error("proto value has no type url")]
    MissingTypeUrl,

    /// Proto values are store-side only.
    #[error("proto values cannot be written from the domain model")]
    ProtoNotWritable,

    #[error("expected a {expected} value, found {found}")]
    UnexpectedType {
        expected: &'static str,
        found: &'static str,
    },

    #[error("struct value does not hold a string list under {0:?}")]
    NotAList(String),
}

/// Errors from the type identifier registry.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("type id {0} not found")]
    NotFound(i64),

    #[error("type name {0:?} not found")]
    NameNotFound(String),

    #[error("type registry used before initialization")]
    Uninitialized,

    #[error("type registry is already initialized")]
    AlreadyInitialized,

    #[error("type table error: {0}")]
    Backend(String),
}

impl RegistryError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound(_) | Self::NameNotFound(_) => ErrorClass::NotFound,
            Self::Uninitialized | Self::AlreadyInitialized | Self::Backend(_) => ErrorClass::Fatal,
        }
    }
}

/// Errors surfaced by entity conversions.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// A property value could not be translated.
    #[error("{kind}: property {key:?}: {source}")]
    Property {
        kind: EntityKind,
        key: String,
        #[source]
        source: ValueError,
    },

    /// A mandatory structured field is absent.
    #[error("{kind}: missing required field {field:?}")]
    MissingField {
        kind: EntityKind,
        field: &'static str,
    },

    #[error("{kind}: invalid id in {field:?}: {source}")]
    InvalidId {
        kind: EntityKind,
        field: &'static str,
        #[source]
        source: ModelError,
    },

    #[error("{kind}: invalid {field:?}: {source}")]
    InvalidState {
        kind: EntityKind,
        field: &'static str,
        #[source]
        source: StateError,
    },

    /// The store node belongs to a different type than the one requested.
    #[error("{kind}: store node has type {found:?}")]
    TypeMismatch { kind: EntityKind, found: String },

    /// The store type name does not correspond to any known entity kind.
    #[error("unknown store type {0:?}")]
    UnknownType(String),

    #[error("store node carries neither a type name nor a type id")]
    Untyped,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ConvertError {
    pub(crate) fn property(kind: EntityKind, key: impl Into<String>, source: ValueError) -> Self {
        Self::Property {
            kind,
            key: key.into(),
            source,
        }
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Property { .. }
            | Self::MissingField { .. }
            | Self::InvalidId { .. }
            | Self::InvalidState { .. }
            | Self::TypeMismatch { .. }
            | Self::UnknownType(_)
            | Self::Untyped => ErrorClass::BadRequest,
            Self::Registry(e) => e.class(),
            Self::Config(_) => ErrorClass::Fatal,
        }
    }

    /// Whether this error should become a client error at the REST boundary.
    #[must_use]
    pub const fn is_bad_request(&self) -> bool {
        matches!(self.class(), ErrorClass::BadRequest)
    }
}
