//! CSV export of the hourly forecast.

use common::{Column, HourlyRecord, RecordField};
use serde_json::Value;

use crate::result::PredictionResult;

/// File name offered for the download.
pub const EXPORT_FILE_NAME: &str = "solar_predictions.csv";
pub const EXPORT_MIME: &str = "text/csv;charset=utf-8;";

/// Serializes the forecast sequence as CSV.
///
/// Columns are every key of the first record, in the order the service sent
/// them; keys without a typed field are written as received. Returns `None`
/// for an empty sequence: there is nothing to download.
pub fn export_csv(result: &PredictionResult) -> Option<String> {
    if result.is_empty() {
        return None;
    }

    let header = result.columns().iter().map(|column| column.name().to_string());
    let rows = result.records().iter().enumerate().map(|(index, record)| {
        result
            .columns()
            .iter()
            .map(|column| match column {
                Column::Field(field) => cell(record, *field),
                Column::Extra(key) => result.extra(index, key).map(value_cell).unwrap_or_default(),
            })
            .collect::<Vec<_>>()
    });

    Some(write_table(header, rows))
}

/// Serializes `records` with one column per entry of `fields`, in that order.
///
/// The first line is the header. Lines are separated by `\n` without a trailing
/// newline. A field a record does not carry is written as an empty cell.
pub fn export_records(records: &[HourlyRecord], fields: &[RecordField]) -> Option<String> {
    if records.is_empty() {
        return None;
    }

    let header = fields.iter().map(|field| field.name().to_string());
    let rows = records
        .iter()
        .map(|record| fields.iter().map(|field| cell(record, *field)).collect::<Vec<_>>());

    Some(write_table(header, rows))
}

fn write_table(
    header: impl Iterator<Item = String>,
    rows: impl Iterator<Item = Vec<String>>,
) -> String {
    let mut lines = vec![header.map(|name| escape_csv(&name)).collect::<Vec<_>>().join(",")];
    for row in rows {
        lines.push(row.iter().map(|value| escape_csv(value)).collect::<Vec<_>>().join(","));
    }
    lines.join("\n")
}

fn cell(record: &HourlyRecord, field: RecordField) -> String {
    match field {
        RecordField::Hour => record.hour.to_string(),
        RecordField::PredictedPower => record.predicted_power.to_string(),
        RecordField::ActualPower => record
            .actual_power
            .map(|power| power.to_string())
            .unwrap_or_default(),
        RecordField::ModuleTemp => record.module_temp.to_string(),
        RecordField::Efficiency => record.efficiency.to_string(),
    }
}

fn value_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn escape_csv(value: &str) -> String {
    let needs_quotes = value.contains(',')
        || value.contains('"')
        || value.contains('\n')
        || value.contains('\r');
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
