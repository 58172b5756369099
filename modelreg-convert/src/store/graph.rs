use modelreg_model::StoreCategory;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// An opaque typed message: a type URL plus its serialized bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtoAny {
    pub type_url: String,
    pub value: Vec<u8>,
}

/// The populated variant of a [`GraphValue`].
#[derive(Debug, Clone, PartialEq)]
pub enum GraphValueKind {
    IntValue(i64),
    DoubleValue(f64),
    StringValue(String),
    /// Native structured document.
    StructValue(Map<String, Value>),
    ProtoValue(ProtoAny),
    BoolValue(bool),
}

/// A graph-store property cell. The store's wire format allows a cell with
/// no variant populated, which the codec rejects.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GraphValue {
    pub value: Option<GraphValueKind>,
}

impl From<GraphValueKind> for GraphValue {
    fn from(kind: GraphValueKind) -> Self {
        Self { value: Some(kind) }
    }
}

/// A context, artifact or execution node of the graph metadata store.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphNode {
    pub category: StoreCategory,
    pub id: Option<i64>,
    pub type_id: Option<i64>,
    pub type_name: Option<String>,
    pub name: Option<String>,
    pub external_id: Option<String>,
    /// Artifacts only.
    pub uri: Option<String>,
    /// Artifact state or execution last-known-state, as a wire string.
    pub state: Option<String>,
    pub create_time_since_epoch: Option<i64>,
    pub last_update_time_since_epoch: Option<i64>,
    pub properties: BTreeMap<String, GraphValue>,
    pub custom_properties: BTreeMap<String, GraphValue>,
}

impl GraphNode {
    #[must_use]
    pub const fn new(category: StoreCategory) -> Self {
        Self {
            category,
            id: None,
            type_id: None,
            type_name: None,
            name: None,
            external_id: None,
            uri: None,
            state: None,
            create_time_since_epoch: None,
            last_update_time_since_epoch: None,
            properties: BTreeMap::new(),
            custom_properties: BTreeMap::new(),
        }
    }
}
