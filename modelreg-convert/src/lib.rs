//! Metadata translation engine for the model registry.
//!
//! Converts each domain entity between three representations:
//!
//! - the REST-facing types of `modelreg-model`
//! - graph-store nodes ([`GraphNode`]): typed property maps split into
//!   well-known and custom properties
//! - embedded-store rows ([`EmbeddedEntity`]): attribute columns plus one
//!   generic [`PropertyRow`] per property, flagged custom or not
//!
//! # Architecture
//!
//! Every conversion passes through a store-neutral [`Record`]:
//!
//! ```text
//! domain entity ──EntityMapper──▶ Record ──▶ GraphNode
//!                                        └──▶ EmbeddedEntity
//! ```
//!
//! - [`codec`] translates a single value between the domain, neutral and
//!   store shapes
//! - [`custom`] round-trips a whole custom property map
//! - [`naming`] fakes parent/child ownership inside flat store names
//! - [`TypeRegistry`] resolves store type ids to type names for outbound
//!   conversions that need them
//! - [`mapper`] holds one [`EntityMapper`] per entity kind
//!
//! Nothing here performs I/O except the registry's cache-miss query.

pub mod codec;
mod config;
pub mod custom;
mod error;
pub mod mapper;
pub mod naming;
mod record;
mod registry;
mod sqlite;
mod store;
mod value;

pub use config::RegistryConfig;
pub use error::{ConvertError, ConvertResult, ErrorClass, RegistryError, ValueError};
pub use mapper::{
    artifact_from_embedded, artifact_from_graph_node, artifact_from_record, artifact_to_embedded,
    artifact_to_graph_node, artifact_to_record, from_embedded, from_graph_node, to_embedded,
    to_graph_node, EntityMapper,
};
pub use record::{Property, Record};
pub use registry::{TypeRegistry, TypeTable};
pub use sqlite::SqliteTypeTable;
pub use store::{
    EmbeddedAttributes, EmbeddedEntity, GraphNode, GraphValue, GraphValueKind, PropertyRow,
    ProtoAny,
};
pub use value::{PropertyValue, StructValue, STRUCT_SENTINEL};
