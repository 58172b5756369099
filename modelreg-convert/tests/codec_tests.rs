use modelreg_convert::codec::{
    from_graph, from_metadata, from_row, parse_int, to_graph, to_metadata, to_row,
};
use modelreg_convert::{
    GraphValue, GraphValueKind, PropertyRow, PropertyValue, StructValue, ValueError,
    STRUCT_SENTINEL,
};
use modelreg_model::MetadataValue;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn document(value: Value) -> StructValue {
    match value {
        Value::Object(fields) => StructValue::new(fields),
        other => panic!("not an object: {other}"),
    }
}

fn proto(type_url: &str, bytes: &[u8]) -> PropertyValue {
    PropertyValue::Proto {
        type_url: type_url.to_string(),
        value: bytes.to_vec(),
    }
}

// ── Strategies ───────────────────────────────────────────────────

fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        (-1.0e9f64..1.0e9).prop_map(Value::from),
        "[a-z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

/// Scalars nested up to three levels deep in lists and maps.
fn arb_document_value() -> impl Strategy<Value = Value> {
    arb_scalar().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z_]{1,8}", inner, 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

fn arb_struct() -> impl Strategy<Value = StructValue> {
    prop::collection::btree_map("[a-z_]{1,8}", arb_document_value(), 0..6).prop_map(|entries| {
        let fields: Map<String, Value> = entries.into_iter().collect();
        StructValue::new(fields)
    })
}

/// Every domain-writable variant. Doubles are finite so equality holds.
fn arb_writable() -> impl Strategy<Value = PropertyValue> {
    prop_oneof![
        any::<bool>().prop_map(PropertyValue::Bool),
        any::<i64>().prop_map(PropertyValue::Int),
        (-1.0e12f64..1.0e12).prop_map(PropertyValue::Double),
        "[A-Za-z0-9 ./-]{0,24}".prop_map(PropertyValue::String),
        arb_struct().prop_map(PropertyValue::Struct),
    ]
}

// ── Round trips ──────────────────────────────────────────────────

proptest! {
    #[test]
    fn domain_round_trip(value in arb_writable()) {
        let domain = to_metadata(value.clone()).unwrap();
        prop_assert_eq!(from_metadata(&domain).unwrap(), value);
    }

    #[test]
    fn graph_round_trip(value in arb_writable()) {
        let cell = to_graph(value.clone()).unwrap();
        prop_assert_eq!(from_graph(&cell).unwrap(), value);
    }

    #[test]
    fn embedded_round_trip(value in arb_writable(), custom in any::<bool>()) {
        let row = to_row("key", custom, value.clone()).unwrap();
        prop_assert_eq!(row.is_custom_property, custom);
        prop_assert_eq!(from_row(&row).unwrap(), value);
    }

    #[test]
    fn struct_base64_round_trip(doc in arb_struct()) {
        let encoded = doc.to_base64().unwrap();
        prop_assert_eq!(StructValue::from_base64(&encoded).unwrap(), doc);
    }
}

#[test]
fn proto_round_trips_through_both_stores() {
    let value = proto("type.googleapis.com/ml.Example", &[0x08, 0x96, 0x01]);

    let cell = to_graph(value.clone()).unwrap();
    assert_eq!(from_graph(&cell).unwrap(), value);

    let row = to_row("payload", true, value.clone()).unwrap();
    assert_eq!(row.type_url.as_deref(), Some("type.googleapis.com/ml.Example"));
    assert_eq!(from_row(&row).unwrap(), value);
}

// ── Domain boundary ──────────────────────────────────────────────

#[test]
fn int_is_a_decimal_string_in_the_domain() {
    let domain = to_metadata(PropertyValue::Int(-42)).unwrap();
    assert_eq!(domain, MetadataValue::int(-42));
    assert_eq!(
        serde_json::to_value(&domain).unwrap(),
        json!({"metadataType": "MetadataIntValue", "int_value": "-42"})
    );
}

#[test]
fn malformed_int_literal_is_an_error() {
    let domain = MetadataValue::Int {
        int_value: "12abc".into(),
    };
    let err = from_metadata(&domain).unwrap_err();
    assert!(matches!(err, ValueError::InvalidInt { ref literal, .. } if literal == "12abc"));
    assert!(parse_int("").is_err());
    assert_eq!(parse_int("9223372036854775807").unwrap(), i64::MAX);
}

#[test]
fn proto_is_readable_but_not_writable() {
    let domain = to_metadata(proto("type.example/Msg", b"abc")).unwrap();
    assert_eq!(
        domain,
        MetadataValue::Proto {
            type_url: "type.example/Msg".into(),
            proto_value: "YWJj".into(),
        }
    );
    assert!(matches!(
        from_metadata(&domain).unwrap_err(),
        ValueError::ProtoNotWritable
    ));
}

#[test]
fn proto_without_type_url_is_rejected() {
    assert!(matches!(
        to_metadata(proto("", b"x")).unwrap_err(),
        ValueError::MissingTypeUrl
    ));
    assert!(matches!(
        to_graph(proto("", b"x")).unwrap_err(),
        ValueError::MissingTypeUrl
    ));
    assert!(matches!(
        to_row("p", false, proto("", b"x")).unwrap_err(),
        ValueError::MissingTypeUrl
    ));
}

#[test]
fn struct_with_bad_base64_is_an_error() {
    let domain = MetadataValue::structured("not base64!");
    assert!(matches!(
        from_metadata(&domain).unwrap_err(),
        ValueError::Base64(_)
    ));
}

// ── Store shapes ─────────────────────────────────────────────────

#[test]
fn struct_is_native_in_the_graph_store() {
    let doc = document(json!({"language": ["en", "es"]}));
    let cell = to_graph(PropertyValue::Struct(doc.clone())).unwrap();
    assert_eq!(
        cell,
        GraphValue::from(GraphValueKind::StructValue(doc.into_fields()))
    );
}

#[test]
fn struct_is_sentinel_tagged_in_the_embedded_store() {
    let doc = document(json!({"a": 1}));
    let row = to_row("doc", false, PropertyValue::Struct(doc.clone())).unwrap();
    let cell = row.string_value.as_deref().unwrap();
    assert!(cell.starts_with(STRUCT_SENTINEL));
    assert_eq!(&cell[STRUCT_SENTINEL.len()..], doc.to_base64().unwrap());
    assert_eq!(row.int_value, None);
}

#[test]
fn plain_string_cell_stays_a_string() {
    let mut row = PropertyRow::new("note", true);
    row.string_value = Some("mlmd-structure is not a struct".into());
    assert_eq!(
        from_row(&row).unwrap(),
        PropertyValue::String("mlmd-structure is not a struct".into())
    );
}

#[test]
fn empty_graph_cell_is_a_type_mapping_error() {
    assert!(matches!(
        from_graph(&GraphValue::default()).unwrap_err(),
        ValueError::TypeMapping
    ));
}

#[test]
fn empty_row_is_a_type_mapping_error() {
    assert!(matches!(
        from_row(&PropertyRow::new("empty", false)).unwrap_err(),
        ValueError::TypeMapping
    ));
}

#[test]
fn legacy_byte_value_reads_as_proto() {
    let mut row = PropertyRow::new("blob", true);
    row.byte_value = Some(vec![1, 2, 3]);
    row.type_url = Some("type.example/Blob".into());
    assert_eq!(from_row(&row).unwrap(), proto("type.example/Blob", &[1, 2, 3]));

    row.type_url = None;
    assert!(matches!(
        from_row(&row).unwrap_err(),
        ValueError::MissingTypeUrl
    ));
}

#[test]
fn first_populated_column_wins() {
    let mut row = PropertyRow::new("mixed", false);
    row.double_value = Some(1.5);
    row.bool_value = Some(true);
    assert_eq!(from_row(&row).unwrap(), PropertyValue::Double(1.5));
}
