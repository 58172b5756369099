use modelreg_model::{
    ExperimentRun, ExperimentRunStatus, InferenceService, MetadataValue, Metric, ModelVersion,
    ModelVersionState, RegisteredModel, RegisteredModelState,
};
use modelreg_reconcile::{Override, Reconcile};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::collections::HashMap;

fn stored_model() -> RegisteredModel {
    RegisteredModel {
        id: Some("4".into()),
        name: Some("m1".into()),
        owner: Some("alice".into()),
        state: Some(RegisteredModelState::Live),
        create_time_since_epoch: Some("1700000000000".into()),
        last_update_time_since_epoch: Some("1700000000000".into()),
        ..Default::default()
    }
}

// ── Reconcile ────────────────────────────────────────────────────

#[test]
fn reconcile_changes_only_the_supplied_editable_field() {
    let existing = RegisteredModel {
        name: Some("m1".into()),
        owner: Some("alice".into()),
        state: Some(RegisteredModelState::Live),
        ..Default::default()
    };
    let update = RegisteredModel {
        description: Some("new desc".into()),
        ..Default::default()
    };

    let merged = Reconcile::apply(&existing, &update).unwrap();
    assert_eq!(
        merged,
        RegisteredModel {
            name: Some("m1".into()),
            owner: Some("alice".into()),
            state: Some(RegisteredModelState::Live),
            description: Some("new desc".into()),
            ..Default::default()
        }
    );
}

#[test]
fn reconcile_ignores_protected_fields_in_the_update() {
    let update = RegisteredModel {
        id: Some("99".into()),
        name: Some("renamed".into()),
        create_time_since_epoch: Some("1".into()),
        state: Some(RegisteredModelState::Archived),
        ..Default::default()
    };
    let merged = Reconcile::apply(&stored_model(), &update).unwrap();
    assert_eq!(merged.id.as_deref(), Some("4"));
    assert_eq!(merged.name.as_deref(), Some("m1"));
    assert_eq!(merged.create_time_since_epoch.as_deref(), Some("1700000000000"));
    assert_eq!(merged.state, Some(RegisteredModelState::Archived));
}

#[test]
fn reconcile_replaces_custom_properties_wholesale() {
    let existing = ModelVersion {
        registered_model_id: Some("4".into()),
        custom_properties: Some(HashMap::from([
            ("a".to_string(), MetadataValue::int(1)),
            ("b".to_string(), MetadataValue::int(2)),
        ])),
        ..Default::default()
    };
    let update = ModelVersion {
        custom_properties: Some(HashMap::from([("c".to_string(), MetadataValue::bool(true))])),
        ..Default::default()
    };
    let merged = Reconcile::apply(&existing, &update).unwrap();
    assert_eq!(
        merged.custom_properties,
        Some(HashMap::from([("c".to_string(), MetadataValue::bool(true))]))
    );
    assert_eq!(merged.registered_model_id.as_deref(), Some("4"));
}

#[test]
fn reconcile_keeps_owner_links() {
    let existing = InferenceService {
        registered_model_id: Some("4".into()),
        serving_environment_id: Some("1".into()),
        model_version_id: Some("5".into()),
        ..Default::default()
    };
    let update = InferenceService {
        registered_model_id: Some("8".into()),
        model_version_id: Some("6".into()),
        ..Default::default()
    };
    let merged = Reconcile::apply(&existing, &update).unwrap();
    assert_eq!(merged.registered_model_id.as_deref(), Some("4"));
    assert_eq!(merged.serving_environment_id.as_deref(), Some("1"));
    assert_eq!(merged.model_version_id.as_deref(), Some("6"));
}

// ── Override ─────────────────────────────────────────────────────

#[test]
fn override_takes_the_update_but_restores_identity() {
    let update = RegisteredModel {
        id: Some("99".into()),
        name: Some("renamed".into()),
        description: Some("replaced".into()),
        ..Default::default()
    };
    let merged = Override::apply(&stored_model(), &update).unwrap();
    assert_eq!(
        merged,
        RegisteredModel {
            id: Some("4".into()),
            name: Some("m1".into()),
            description: Some("replaced".into()),
            create_time_since_epoch: Some("1700000000000".into()),
            last_update_time_since_epoch: Some("1700000000000".into()),
            ..Default::default()
        }
    );
}

#[test]
fn override_drops_protected_fields_absent_from_existing() {
    let existing = ModelVersion {
        name: Some("v1".into()),
        ..Default::default()
    };
    let update = ModelVersion {
        registered_model_id: Some("4".into()),
        state: Some(ModelVersionState::Archived),
        ..Default::default()
    };
    let merged = Override::apply(&existing, &update).unwrap();
    assert_eq!(merged.registered_model_id, None);
    assert_eq!(merged.name.as_deref(), Some("v1"));
    assert_eq!(merged.state, Some(ModelVersionState::Archived));
}

#[test]
fn override_keeps_run_start_time() {
    let existing = ExperimentRun {
        experiment_id: Some("30".into()),
        start_time_since_epoch: Some("100".into()),
        ..Default::default()
    };
    let update = ExperimentRun {
        start_time_since_epoch: Some("200".into()),
        end_time_since_epoch: Some("300".into()),
        status: Some(ExperimentRunStatus::Finished),
        ..Default::default()
    };
    let merged = Override::apply(&existing, &update).unwrap();
    assert_eq!(merged.experiment_id.as_deref(), Some("30"));
    assert_eq!(merged.start_time_since_epoch.as_deref(), Some("100"));
    assert_eq!(merged.end_time_since_epoch.as_deref(), Some("300"));
    assert_eq!(merged.status, Some(ExperimentRunStatus::Finished));
}

// ── Non-finite values ────────────────────────────────────────────

#[test]
fn infinite_metric_value_survives_both_protocols() {
    let existing = Metric {
        value: Some(f64::INFINITY),
        step: Some(1),
        ..Default::default()
    };
    let update = Metric {
        step: Some(2),
        ..Default::default()
    };

    let merged = Reconcile::apply(&existing, &update).unwrap();
    assert_eq!(merged.value, Some(f64::INFINITY));
    assert_eq!(merged.step, Some(2));

    let replaced = Override::apply(&existing, &existing).unwrap();
    assert_eq!(replaced.value, Some(f64::INFINITY));

    let negative = Metric {
        value: Some(f64::NEG_INFINITY),
        ..Default::default()
    };
    let merged = Reconcile::apply(&existing, &negative).unwrap();
    assert_eq!(merged.value, Some(f64::NEG_INFINITY));
}

#[test]
fn nan_metric_value_is_kept() {
    let existing = Metric {
        value: Some(f64::NAN),
        ..Default::default()
    };
    let merged = Reconcile::apply(&existing, &Metric::default()).unwrap();
    assert!(merged.value.is_some_and(f64::is_nan));
    let merged = Override::apply(&existing, &existing).unwrap();
    assert!(merged.value.is_some_and(f64::is_nan));
}

#[test]
fn nan_custom_property_does_not_fail_the_merge() {
    let existing = ModelVersion {
        registered_model_id: Some("4".into()),
        custom_properties: Some(HashMap::from([(
            "loss".to_string(),
            MetadataValue::double(f64::NAN),
        )])),
        ..Default::default()
    };
    let update = ModelVersion {
        description: Some("retrained".into()),
        ..Default::default()
    };
    let merged = Reconcile::apply(&existing, &update).unwrap();
    assert_eq!(merged.description.as_deref(), Some("retrained"));
    let loss = &merged.custom_properties.unwrap()["loss"];
    assert!(matches!(loss, MetadataValue::Double { double_value } if double_value.is_nan()));
}

// ── Properties ───────────────────────────────────────────────────

fn arb_model() -> impl Strategy<Value = RegisteredModel> {
    (
        proptest::option::of("[0-9]{1,4}"),
        proptest::option::of("[a-z]{1,8}"),
        proptest::option::of("[a-z ]{0,16}"),
        proptest::option::of("[a-z]{1,8}"),
        proptest::option::of(prop_oneof![
            Just(RegisteredModelState::Live),
            Just(RegisteredModelState::Archived),
        ]),
    )
        .prop_map(|(id, name, description, owner, state)| RegisteredModel {
            id,
            name,
            description,
            owner,
            state,
            ..Default::default()
        })
}

proptest! {
    #[test]
    fn reconcile_with_itself_is_identity(model in arb_model()) {
        prop_assert_eq!(Reconcile::apply(&model, &model).unwrap(), model.clone());
        prop_assert_eq!(Override::apply(&model, &model).unwrap(), model);
    }

    #[test]
    fn protected_fields_always_come_from_existing(existing in arb_model(), update in arb_model()) {
        for merged in [
            Reconcile::apply(&existing, &update).unwrap(),
            Override::apply(&existing, &update).unwrap(),
        ] {
            prop_assert_eq!(&merged.id, &existing.id);
            prop_assert_eq!(&merged.name, &existing.name);
        }
    }

    #[test]
    fn override_takes_editable_fields_from_update(existing in arb_model(), update in arb_model()) {
        let merged = Override::apply(&existing, &update).unwrap();
        prop_assert_eq!(merged.description, update.description);
        prop_assert_eq!(merged.owner, update.owner);
        prop_assert_eq!(merged.state, update.state);
    }
}
