//! Field-coverage checks.
//!
//! Serde's derived `Deserialize` hands its complete field list to
//! `deserialize_struct`. [`field_names`] captures that list with a
//! deserializer that does nothing else, which gives a reflection-free view
//! of every serialized field of an entity.

use crate::error::{ReconcileError, ReconcileResult};
use crate::partition::Reconciled;
use crate::protocol::{Override, Protocol, Reconcile};
use modelreg_model::{
    DataSet, DocArtifact, Experiment, ExperimentRun, InferenceService, Metric, ModelArtifact,
    ModelVersion, Parameter, RegisteredModel, ServeModel, ServingEnvironment,
};
use serde::de::{self, DeserializeOwned, Deserializer, Visitor};
use tracing::debug;

struct FieldCapture<'a> {
    fields: &'a mut Option<&'static [&'static str]>,
}

impl<'de> Deserializer<'de> for FieldCapture<'_> {
    type Error = de::value::Error;

    fn deserialize_any<V: Visitor<'de>>(self, _visitor: V) -> Result<V::Value, Self::Error> {
        Err(de::Error::custom("not a struct"))
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value, Self::Error> {
        *self.fields = Some(fields);
        Err(de::Error::custom("fields captured"))
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

/// The serialized field names of `T`, or `None` when `T` does not
/// deserialize as a struct.
#[must_use]
pub fn field_names<T: DeserializeOwned>() -> Option<&'static [&'static str]> {
    let mut fields = None;
    // Always an error: the capture never produces a value.
    let _ = T::deserialize(FieldCapture {
        fields: &mut fields,
    });
    fields
}

/// Verifies that protocol `P` classifies every field of `T` exactly once
/// and names no field `T` lacks.
pub fn check_coverage<T: Reconciled, P: Protocol>() -> ReconcileResult<()> {
    let fields = field_names::<T>().ok_or(ReconcileError::NotAStruct(T::KIND))?;
    let partition = P::partition::<T>();

    for &field in fields {
        match (partition.is_protected(field), partition.is_editable(field)) {
            (true, false) | (false, true) => {}
            (true, true) => {
                return Err(ReconcileError::DoublyClassified {
                    kind: T::KIND,
                    protocol: P::NAME,
                    field,
                });
            }
            (false, false) => {
                return Err(ReconcileError::Unclassified {
                    kind: T::KIND,
                    protocol: P::NAME,
                    field,
                });
            }
        }
    }

    if let Some(field) = partition.fields().find(|name| !fields.contains(name)) {
        return Err(ReconcileError::UnknownField {
            kind: T::KIND,
            protocol: P::NAME,
            field,
        });
    }
    Ok(())
}

fn check_both<T: Reconciled>() -> ReconcileResult<()> {
    check_coverage::<T, Override>()?;
    check_coverage::<T, Reconcile>()
}

/// Runs [`check_coverage`] for every entity kind under both protocols.
pub fn check_all() -> ReconcileResult<()> {
    check_both::<RegisteredModel>()?;
    check_both::<ModelVersion>()?;
    check_both::<ModelArtifact>()?;
    check_both::<DocArtifact>()?;
    check_both::<DataSet>()?;
    check_both::<Metric>()?;
    check_both::<Parameter>()?;
    check_both::<ServingEnvironment>()?;
    check_both::<InferenceService>()?;
    check_both::<ServeModel>()?;
    check_both::<Experiment>()?;
    check_both::<ExperimentRun>()?;
    debug!("Field partitions cover every entity kind");
    Ok(())
}
