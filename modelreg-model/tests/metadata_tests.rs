use modelreg_model::MetadataValue;
use serde_json::json;

#[test]
fn int_value_travels_as_string() {
    let value = MetadataValue::int(-42);
    assert_eq!(
        serde_json::to_value(&value).unwrap(),
        json!({"metadataType": "MetadataIntValue", "int_value": "-42"})
    );
}

#[test]
fn proto_value_uses_type_key() {
    let value: MetadataValue = serde_json::from_value(json!({
        "metadataType": "MetadataProtoValue",
        "type": "type.googleapis.com/example.Msg",
        "proto_value": "AAE="
    }))
    .unwrap();
    assert_eq!(
        value,
        MetadataValue::Proto {
            type_url: "type.googleapis.com/example.Msg".into(),
            proto_value: "AAE=".into(),
        }
    );
}

#[test]
fn unknown_metadata_type_is_rejected() {
    let result: Result<MetadataValue, _> =
        serde_json::from_value(json!({"metadataType": "MetadataFooValue"}));
    assert!(result.is_err());
}

#[test]
fn metadata_type_matches_serde_tag() {
    for value in [
        MetadataValue::bool(true),
        MetadataValue::int(1),
        MetadataValue::double(1.5),
        MetadataValue::string("x"),
        MetadataValue::structured("eA=="),
    ] {
        let json = serde_json::to_value(&value).unwrap();
        assert_eq!(json["metadataType"], value.metadata_type());
    }
}
