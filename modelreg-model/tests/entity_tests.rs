use modelreg_model::{
    Artifact, EntityKind, InferenceService, MetadataValue, Metric, ModelArtifact,
    RegisteredModel, RegisteredModelState, StoreCategory,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;

// ── JSON shape ───────────────────────────────────────────────────

#[test]
fn registered_model_uses_camel_case_and_skips_absent() {
    let model = RegisteredModel {
        name: Some("m1".into()),
        external_id: Some("ext".into()),
        state: Some(RegisteredModelState::Live),
        license_link: Some("https://example.com/license".into()),
        ..Default::default()
    };
    let value = serde_json::to_value(&model).unwrap();
    assert_eq!(
        value,
        json!({
            "name": "m1",
            "externalId": "ext",
            "state": "LIVE",
            "licenseLink": "https://example.com/license"
        })
    );
}

#[test]
fn registered_model_deserializes_partial_payload() {
    let model: RegisteredModel =
        serde_json::from_value(json!({"description": "new desc"})).unwrap();
    assert_eq!(model.description.as_deref(), Some("new desc"));
    assert_eq!(model.name, None);
    assert_eq!(model.state, None);
}

#[test]
fn invalid_state_is_rejected_on_deserialize() {
    let result: Result<RegisteredModel, _> = serde_json::from_value(json!({"state": "bogus"}));
    assert!(result.is_err());
}

#[test]
fn custom_properties_carry_metadata_type() {
    let mut props = HashMap::new();
    props.insert("framework".to_string(), MetadataValue::string("onnx"));
    let svc = InferenceService {
        custom_properties: Some(props),
        ..Default::default()
    };
    let value = serde_json::to_value(&svc).unwrap();
    assert_eq!(
        value["customProperties"]["framework"],
        json!({"metadataType": "MetadataStringValue", "string_value": "onnx"})
    );
}

// ── Artifact union ───────────────────────────────────────────────

#[test]
fn artifact_is_tagged_by_artifact_type() {
    let artifact = Artifact::from(ModelArtifact {
        name: Some("weights".into()),
        uri: Some("s3://bucket/weights".into()),
        ..Default::default()
    });
    let value = serde_json::to_value(&artifact).unwrap();
    assert_eq!(value["artifactType"], "model-artifact");
    assert_eq!(value["uri"], "s3://bucket/weights");

    let back: Artifact = serde_json::from_value(value).unwrap();
    assert_eq!(back, artifact);
}

#[test]
fn artifact_accessors() {
    let artifact = Artifact::from(Metric {
        id: Some("9".into()),
        name: Some("accuracy".into()),
        value: Some(0.93),
        ..Default::default()
    });
    assert_eq!(artifact.kind(), EntityKind::Metric);
    assert_eq!(artifact.id(), Some("9"));
    assert_eq!(artifact.name(), Some("accuracy"));
}

// ── Entity kinds ─────────────────────────────────────────────────

#[test]
fn kind_type_names_are_unique_and_resolvable() {
    for kind in EntityKind::ALL {
        assert_eq!(EntityKind::from_type_name(kind.type_name()), Some(kind));
    }
    assert_eq!(EntityKind::from_type_name("mlmd.Dataset"), None);
}

#[test]
fn kind_categories() {
    assert_eq!(EntityKind::RegisteredModel.category(), StoreCategory::Context);
    assert_eq!(EntityKind::DocArtifact.category(), StoreCategory::Artifact);
    assert_eq!(EntityKind::ServeModel.category(), StoreCategory::Execution);
}

#[test]
fn kind_display_drops_namespace() {
    assert_eq!(EntityKind::InferenceService.to_string(), "InferenceService");
}
