use modelreg_convert::naming::{compose, decompose, owner_of, OWNER_SEPARATOR};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use uuid::Uuid;

#[test]
fn owned_name_is_prefixed() {
    assert_eq!(compose(Some("123"), Some("v1")), "123:v1");
    assert_eq!(decompose(&compose(Some("123"), Some("v1"))), "v1");
    assert_eq!(owner_of("123:v1"), Some("123"));
}

#[test]
fn unowned_name_is_unchanged() {
    assert_eq!(compose(None, Some("v1")), "v1");
    assert_eq!(compose(Some(""), Some("v1")), "v1");
    assert_eq!(decompose("plain"), "plain");
    assert_eq!(owner_of("plain"), None);
}

#[test]
fn extra_separators_belong_to_the_local_name() {
    assert_eq!(decompose("7:a:b:c"), "a:b:c");
    assert_eq!(decompose(&compose(Some("7"), Some("x:y"))), "x:y");
}

#[test]
fn missing_name_is_generated() {
    let first = compose(Some("42"), None);
    let second = compose(Some("42"), None);
    assert_ne!(first, second);

    let prefix = format!("42{OWNER_SEPARATOR}");
    assert!(first.starts_with(&prefix));
    assert!(Uuid::parse_str(decompose(&first)).is_ok());
    assert!(Uuid::parse_str(&compose(None, None)).is_ok());
}

proptest! {
    #[test]
    fn decompose_inverts_compose(owner in "[0-9]{1,12}", local in "[A-Za-z0-9:._ -]{0,32}") {
        let composed = compose(Some(&owner), Some(&local));
        prop_assert_eq!(decompose(&composed), local.as_str());
        prop_assert_eq!(owner_of(&composed), Some(owner.as_str()));
    }
}
