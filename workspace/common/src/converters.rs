//! Conversion of raw prediction objects into the canonical record shape.

use crate::forecast::{Column, HourlyRecord, RecordField};
use crate::RawRecord;
use serde_json::Value;

/// Converts one raw prediction object into an [`HourlyRecord`].
///
/// Unknown keys are ignored. A missing or ill-typed required field is an error;
/// there is no partial acceptance.
pub fn record_from_object(object: &RawRecord) -> Result<HourlyRecord, serde_json::Error> {
    serde_json::from_value(Value::Object(object.clone()))
}

/// Returns the canonical fields present in `object`, in the order its keys appear.
pub fn field_order(object: &RawRecord) -> Vec<RecordField> {
    object
        .keys()
        .filter_map(|key| RecordField::from_name(key))
        .collect()
}

/// Returns every key of `object` as a column, in the order its keys appear.
pub fn columns(object: &RawRecord) -> Vec<Column> {
    object
        .keys()
        .map(|key| match RecordField::from_name(key) {
            Some(field) => Column::Field(field),
            None => Column::Extra(key.clone()),
        })
        .collect()
}

/// The keys of `object` that [`HourlyRecord`] does not model.
pub fn extra_fields(object: &RawRecord) -> RawRecord {
    object
        .iter()
        .filter(|(key, _)| RecordField::from_name(key).is_none())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}
