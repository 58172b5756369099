//! Owner-prefixed store names.
//!
//! Both stores name entities in one flat namespace per type, so an owned
//! entity is stored as `<ownerId>:<localName>` to keep sibling names unique
//! per owner. Callers go through [`compose`] and [`decompose`] rather than
//! concatenating names themselves.

use uuid::Uuid;

/// Separator between the owner id and the local name.
pub const OWNER_SEPARATOR: char = ':';

/// Builds the store name for an entity.
///
/// An absent local name is replaced with a random unique token. An absent or
/// empty owner leaves the name unprefixed.
#[must_use]
pub fn compose(owner_id: Option<&str>, local_name: Option<&str>) -> String {
    let local = local_name.map_or_else(|| Uuid::new_v4().to_string(), str::to_string);
    match owner_id.filter(|owner| !owner.is_empty()) {
        Some(owner) => format!("{owner}{OWNER_SEPARATOR}{local}"),
        None => local,
    }
}

/// Recovers the local name: everything after the first separator, with any
/// further separators kept verbatim, or the whole name when unprefixed.
#[must_use]
pub fn decompose(store_name: &str) -> &str {
    store_name
        .split_once(OWNER_SEPARATOR)
        .map_or(store_name, |(_, local)| local)
}

/// The owner segment of a prefixed name, if any.
#[must_use]
pub fn owner_of(store_name: &str) -> Option<&str> {
    store_name
        .split_once(OWNER_SEPARATOR)
        .map(|(owner, _)| owner)
}
