//! Update reconciliation for model registry entities.
//!
//! Every entity field is classified, per protocol, as either protected
//! (identity, timestamps, owner links) or editable. Two protocols merge an
//! update into an existing entity:
//!
//! - [`Override`] starts from the update and restores the protected fields
//!   from the existing entity. Used for full replacement, after
//!   [`CreateDefaults`] has filled the update.
//! - [`Reconcile`] starts from the existing entity and copies in only the
//!   editable fields the update carries. Used for partial updates.
//!
//! The partitions are plain tables on [`Reconciled`]. [`check_coverage`]
//! compares them against the fields serde reports for the type, so a field
//! added to an entity without being classified fails loudly.

mod defaults;
mod error;
mod fields;
mod partition;
mod protocol;

pub use defaults::{prepare_create, prepare_update, CreateDefaults};
pub use error::{ReconcileError, ReconcileResult};
pub use fields::{check_all, check_coverage, field_names};
pub use partition::{FieldPartition, Reconciled};
pub use protocol::{Override, Protocol, Reconcile};
