use modelreg_convert::custom::{
    from_graph_map, from_properties, from_rows, to_graph_map, to_properties, to_rows,
};
use modelreg_convert::{
    ConvertError, GraphValueKind, Property, PropertyRow, PropertyValue, StructValue, ValueError,
};
use modelreg_model::{CustomProperties, EntityKind, MetadataValue};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{Map, Value};

fn languages() -> MetadataValue {
    let langs = ["en", "es", "cz"].map(String::from);
    let doc = StructValue::from_list("language", &langs);
    MetadataValue::structured(doc.to_base64().unwrap())
}

fn sample() -> CustomProperties {
    let mut props = CustomProperties::new();
    props.insert("language".into(), languages());
    props.insert("epochs".into(), MetadataValue::int(30));
    props.insert("accuracy".into(), MetadataValue::double(0.93));
    props.insert("tuned".into(), MetadataValue::bool(true));
    props.insert("framework".into(), MetadataValue::string("pytorch"));
    props
}

// ── Round trips ──────────────────────────────────────────────────

#[test]
fn graph_map_round_trip() {
    let props = sample();
    let cells = to_graph_map(EntityKind::RegisteredModel, &props).unwrap();
    assert_eq!(cells.len(), 5);
    assert_eq!(
        from_graph_map(EntityKind::RegisteredModel, &cells).unwrap(),
        props
    );
}

#[test]
fn row_round_trip() {
    let props = sample();
    let rows = to_rows(EntityKind::ModelVersion, &props).unwrap();
    assert!(rows.iter().all(|row| row.is_custom_property));
    assert_eq!(from_rows(EntityKind::ModelVersion, &rows).unwrap(), props);
}

#[test]
fn language_list_survives_the_graph_store() {
    let mut props = CustomProperties::new();
    props.insert("language".into(), languages());

    let cells = to_graph_map(EntityKind::RegisteredModel, &props).unwrap();
    let Some(GraphValueKind::StructValue(fields)) = &cells["language"].value else {
        panic!("language is not stored as a struct");
    };
    let list = StructValue::new(fields.clone()).to_list("language").unwrap();
    assert_eq!(list, vec!["en", "es", "cz"]);

    let back = from_graph_map(EntityKind::RegisteredModel, &cells).unwrap();
    assert_eq!(back["language"], languages());
}

#[test]
fn empty_map_round_trips_to_empty() {
    let empty = CustomProperties::new();
    assert!(to_rows(EntityKind::Experiment, &empty).unwrap().is_empty());
    assert_eq!(from_rows(EntityKind::Experiment, &[]).unwrap(), empty);
}

// ── Arbitrary maps ───────────────────────────────────────────────

fn arb_document() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e6f64..1.0e6).prop_map(Value::from),
        "[a-z ]{0,8}".prop_map(Value::String),
    ];
    let value = leaf.prop_recursive(2, 12, 3, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..3).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,4}", inner, 0..3)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    });
    prop::collection::btree_map("[a-z]{1,6}", value, 0..4).prop_map(|entries| {
        let fields: Map<String, Value> = entries.into_iter().collect();
        StructValue::new(fields).to_base64().unwrap()
    })
}

/// Every variant a client may write.
fn arb_metadata_value() -> impl Strategy<Value = MetadataValue> {
    prop_oneof![
        any::<bool>().prop_map(MetadataValue::bool),
        any::<i64>().prop_map(MetadataValue::int),
        (-1.0e12f64..1.0e12).prop_map(MetadataValue::double),
        "[A-Za-z0-9 ./-]{0,16}".prop_map(MetadataValue::string),
        arb_document().prop_map(MetadataValue::structured),
    ]
}

fn arb_custom() -> impl Strategy<Value = CustomProperties> {
    prop::collection::hash_map("[a-z_]{1,12}", arb_metadata_value(), 0..8)
}

proptest! {
    #[test]
    fn any_map_survives_the_graph_store(props in arb_custom()) {
        let cells = to_graph_map(EntityKind::ModelVersion, &props).unwrap();
        prop_assert_eq!(cells.len(), props.len());
        prop_assert_eq!(from_graph_map(EntityKind::ModelVersion, &cells).unwrap(), props);
    }

    #[test]
    fn any_map_survives_flagged_rows(props in arb_custom()) {
        let mut rows = to_rows(EntityKind::DataSet, &props).unwrap();
        let mut structured = PropertyRow::new("digest", false);
        structured.string_value = Some("sha256:abc".into());
        rows.push(structured);
        prop_assert_eq!(from_rows(EntityKind::DataSet, &rows).unwrap(), props);
    }
}

// ── Flagging ─────────────────────────────────────────────────────

#[test]
fn properties_are_flagged_and_sorted() {
    let props = to_properties(EntityKind::ModelArtifact, &sample()).unwrap();
    let names: Vec<&str> = props.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["accuracy", "epochs", "framework", "language", "tuned"]
    );
    assert!(props.iter().all(|p| p.is_custom));
}

#[test]
fn structured_rows_are_ignored() {
    let mut structured = PropertyRow::new("description", false);
    structured.string_value = Some("well-known".into());
    let mut custom = PropertyRow::new("team", true);
    custom.string_value = Some("vision".into());

    let props = from_rows(EntityKind::RegisteredModel, &[structured, custom]).unwrap();
    assert_eq!(props.len(), 1);
    assert_eq!(props["team"], MetadataValue::string("vision"));
}

#[test]
fn from_properties_keeps_custom_only() {
    let props = [
        Property::structured("owner", PropertyValue::String("alice".into())),
        Property::custom("stage", PropertyValue::String("beta".into())),
    ];
    let custom = from_properties(EntityKind::RegisteredModel, &props).unwrap();
    assert_eq!(custom.len(), 1);
    assert_eq!(custom["stage"], MetadataValue::string("beta"));
}

// ── Errors ───────────────────────────────────────────────────────

#[test]
fn malformed_int_names_the_key() {
    let mut props = CustomProperties::new();
    props.insert(
        "epochs".into(),
        MetadataValue::Int {
            int_value: "thirty".into(),
        },
    );
    let err = to_graph_map(EntityKind::ModelVersion, &props).unwrap_err();
    assert!(err.is_bad_request());
    match err {
        ConvertError::Property { kind, key, source } => {
            assert_eq!(kind, EntityKind::ModelVersion);
            assert_eq!(key, "epochs");
            assert!(matches!(source, ValueError::InvalidInt { .. }));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn proto_custom_property_cannot_be_written() {
    let mut props = CustomProperties::new();
    props.insert(
        "blob".into(),
        MetadataValue::Proto {
            type_url: "type.example/Blob".into(),
            proto_value: "AA==".into(),
        },
    );
    let err = to_rows(EntityKind::DocArtifact, &props).unwrap_err();
    assert!(matches!(
        err,
        ConvertError::Property {
            source: ValueError::ProtoNotWritable,
            ..
        }
    ));
}

#[test]
fn stored_proto_is_readable() {
    let mut row = PropertyRow::new("blob", true);
    row.proto_value = Some(vec![0]);
    row.type_url = Some("type.example/Blob".into());
    let props = from_rows(EntityKind::DocArtifact, &[row]).unwrap();
    assert_eq!(
        props["blob"],
        MetadataValue::Proto {
            type_url: "type.example/Blob".into(),
            proto_value: "AA==".into(),
        }
    );
}
