use modelreg_model::StoreCategory;

/// Typed attribute columns of an embedded-store entity row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbeddedAttributes {
    pub name: Option<String>,
    pub external_id: Option<String>,
    pub uri: Option<String>,
    pub state: Option<String>,
    pub create_time_since_epoch: Option<i64>,
    pub last_update_time_since_epoch: Option<i64>,
}

/// A generic property row. At most one value column is expected to be set.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyRow {
    pub name: String,
    pub is_custom_property: bool,
    pub int_value: Option<i64>,
    pub double_value: Option<f64>,
    pub string_value: Option<String>,
    pub bool_value: Option<bool>,
    pub byte_value: Option<Vec<u8>>,
    pub proto_value: Option<Vec<u8>>,
    pub type_url: Option<String>,
}

impl PropertyRow {
    pub fn new(name: impl Into<String>, is_custom_property: bool) -> Self {
        Self {
            name: name.into(),
            is_custom_property,
            ..Self::default()
        }
    }
}

/// An embedded-store entity: attribute row plus its ordered property rows.
#[derive(Debug, Clone, PartialEq)]
pub struct EmbeddedEntity {
    pub category: StoreCategory,
    pub id: Option<i64>,
    pub type_id: Option<i64>,
    pub attributes: EmbeddedAttributes,
    pub properties: Vec<PropertyRow>,
}
