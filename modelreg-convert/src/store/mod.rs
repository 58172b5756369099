//! Boundary shapes owned by the store clients.
//!
//! These mirror what the metadata-store client and the relational
//! persistence layer exchange; the engine only reads and builds them.

mod embedded;
mod graph;

pub use embedded::{EmbeddedAttributes, EmbeddedEntity, PropertyRow};
pub use graph::{GraphNode, GraphValue, GraphValueKind, ProtoAny};
