//! The two merge protocols.
//!
//! Both merge on the typed entity, one field at a time: every field is an
//! `Option`, so "take this field from that side" is a copy of the whole
//! option and "present in the update" is `is_some`. Values are never
//! re-encoded, so a non-finite double or any custom property survives a
//! merge unchanged.

use crate::error::{ReconcileError, ReconcileResult};
use crate::partition::{FieldPartition, Reconciled};
use tracing::debug;

/// A merge protocol: which partition it reads and how it combines the
/// existing and update sides.
pub trait Protocol {
    const NAME: &'static str;

    fn partition<T: Reconciled>() -> FieldPartition;

    fn merge_fields<T: Reconciled>(
        existing: &T,
        update: &T,
        partition: &FieldPartition,
    ) -> ReconcileResult<T>;
}

/// Full replacement: the update wins except for protected fields, which
/// always come from the existing entity (and stay absent if absent there).
#[derive(Debug, Clone, Copy, Default)]
pub struct Override;

/// Partial update: the existing entity wins except for editable fields
/// present in the update. An editable field absent from the update keeps
/// its existing value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconcile;

impl Protocol for Override {
    const NAME: &'static str = "override";

    fn partition<T: Reconciled>() -> FieldPartition {
        T::OVERRIDE
    }

    fn merge_fields<T: Reconciled>(
        existing: &T,
        update: &T,
        partition: &FieldPartition,
    ) -> ReconcileResult<T> {
        let mut merged = update.clone();
        for &field in partition.protected {
            if !merged.copy_field(existing, field) {
                return Err(unknown_field::<T, Self>(field));
            }
        }
        Ok(merged)
    }
}

impl Protocol for Reconcile {
    const NAME: &'static str = "reconcile";

    fn partition<T: Reconciled>() -> FieldPartition {
        T::RECONCILE
    }

    fn merge_fields<T: Reconciled>(
        existing: &T,
        update: &T,
        partition: &FieldPartition,
    ) -> ReconcileResult<T> {
        let mut merged = existing.clone();
        for &field in partition.editable {
            match update.field_is_set(field) {
                Some(true) => {
                    merged.copy_field(update, field);
                }
                Some(false) => {}
                None => return Err(unknown_field::<T, Self>(field)),
            }
        }
        Ok(merged)
    }
}

impl Override {
    /// Returns `update` with every protected field restored from `existing`.
    pub fn apply<T: Reconciled>(existing: &T, update: &T) -> ReconcileResult<T> {
        merge::<Self, T>(existing, update)
    }
}

impl Reconcile {
    /// Returns `existing` with the editable fields `update` carries applied.
    pub fn apply<T: Reconciled>(existing: &T, update: &T) -> ReconcileResult<T> {
        merge::<Self, T>(existing, update)
    }
}

fn merge<P: Protocol, T: Reconciled>(existing: &T, update: &T) -> ReconcileResult<T> {
    let merged = P::merge_fields(existing, update, &P::partition::<T>())?;
    debug!(kind = %T::KIND, protocol = P::NAME, "Merged entity update");
    Ok(merged)
}

fn unknown_field<T: Reconciled, P: Protocol>(field: &'static str) -> ReconcileError {
    ReconcileError::UnknownField {
        kind: T::KIND,
        protocol: P::NAME,
        field,
    }
}
