use common::{
    columns, extra_fields, field_order, record_from_object, Column, HourlyRecord,
    ManualPredictionResponse, RawRecord, RecordField,
};
use serde_json::Value;
use tracing::debug;

use crate::error::{PredictionError, Result};

/// Decimal places of the headline power shown on the dashboard.
pub const HEADLINE_DECIMALS: i32 = 2;

/// The outcome of one successful exchange, ready for charts and export.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionResult {
    records: Vec<HourlyRecord>,
    field_order: Vec<RecordField>,
    columns: Vec<Column>,
    /// Untyped keys of each record, index-aligned with `records`.
    extras: Vec<RawRecord>,
    system_efficiency: f64,
    headline_power: Option<f64>,
}

impl PredictionResult {
    /// Builds a result from records already in canonical shape.
    ///
    /// The export field order is the canonical one, without `actual_power`
    /// when the first record has none.
    pub fn new(records: Vec<HourlyRecord>, system_efficiency: f64) -> Self {
        let field_order = match records.first() {
            Some(first) => RecordField::ALL
                .into_iter()
                .filter(|f| *f != RecordField::ActualPower || first.actual_power.is_some())
                .collect(),
            None => Vec::new(),
        };
        let columns = field_order.iter().copied().map(Column::Field).collect();
        let headline_power = headline_power_of(&records);
        Self {
            records,
            field_order,
            columns,
            extras: Vec::new(),
            system_efficiency,
            headline_power,
        }
    }

    /// Normalizes a raw response: records are taken verbatim and in order, the
    /// efficiency is copied, and the headline power derived.
    ///
    /// Any malformed record rejects the whole payload.
    pub fn from_response(response: ManualPredictionResponse) -> Result<Self> {
        let records = response
            .predictions
            .iter()
            .enumerate()
            .map(|(index, object)| {
                record_from_object(object).map_err(|e| {
                    PredictionError::MalformedResponse(format!("prediction {}: {}", index, e))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let first = response.predictions.first();
        let field_order = first.map(field_order).unwrap_or_default();
        let columns = first.map(columns).unwrap_or_default();
        let extras = response.predictions.iter().map(extra_fields).collect();
        debug!(
            records = records.len(),
            columns = columns.len(),
            system_efficiency = response.system_efficiency,
            "Normalized prediction response"
        );

        let headline_power = headline_power_of(&records);
        Ok(Self {
            records,
            field_order,
            columns,
            extras,
            system_efficiency: response.system_efficiency,
            headline_power,
        })
    }

    pub fn records(&self) -> &[HourlyRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Field names of the first record, in the order the service sent them.
    pub fn field_order(&self) -> &[RecordField] {
        &self.field_order
    }

    /// Every key of the first record, including ones without a typed field.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Value of an untyped key on the record at `index`, as the service sent it.
    pub fn extra(&self, index: usize, key: &str) -> Option<&Value> {
        self.extras.get(index).and_then(|extras| extras.get(key))
    }

    pub fn system_efficiency(&self) -> f64 {
        self.system_efficiency
    }

    /// Predicted power of the first hour, rounded; `None` for an empty forecast.
    pub fn headline_power(&self) -> Option<f64> {
        self.headline_power
    }

    pub fn headline_power_display(&self) -> Option<String> {
        self.headline_power
            .map(|power| format!("{:.*}", HEADLINE_DECIMALS as usize, power))
    }

    pub fn system_efficiency_display(&self) -> String {
        self.system_efficiency.to_string()
    }
}

/// Headline power of a forecast sequence.
pub fn headline_power_of(records: &[HourlyRecord]) -> Option<f64> {
    records
        .first()
        .map(|record| round_to(record.predicted_power, HEADLINE_DECIMALS))
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
