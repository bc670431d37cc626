//! Raw input fields of the dashboard form.

use common::ManualPredictionRequest;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

use crate::session::{PendingRequest, PredictionSession};

/// One of the three sensor readings the form collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    AmbientTemp,
    ModuleTemp,
    Irradiation,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::AmbientTemp, Field::ModuleTemp, Field::Irradiation];

    /// Name of the field in the request body.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Field::AmbientTemp => "ambient_temp",
            Field::ModuleTemp => "module_temp",
            Field::Irradiation => "irradiation",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::AmbientTemp => "Ambient Temperature (°C)",
            Field::ModuleTemp => "Module Temperature (°C)",
            Field::Irradiation => "Irradiation (W/m²)",
        }
    }
}

/// Error returned when a field name matches none of the form inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown input field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for Field {
    type Err = UnknownField;

    /// Accepts both the dashboard names (`ambientTemp`) and the wire names (`ambient_temp`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ambientTemp" | "ambient_temp" => Ok(Field::AmbientTemp),
            "moduleTemp" | "module_temp" => Ok(Field::ModuleTemp),
            "irradiation" => Ok(Field::Irradiation),
            _ => Err(UnknownField(s.to_string())),
        }
    }
}

/// The three readings as typed. Empty text means nothing was entered.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InputReadings {
    ambient_temp: String,
    module_temp: String,
    irradiation: String,
}

impl InputReadings {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::AmbientTemp => &self.ambient_temp,
            Field::ModuleTemp => &self.module_temp,
            Field::Irradiation => &self.irradiation,
        }
    }

    /// The entered text, or `None` when the field is still empty.
    pub fn value(&self, field: Field) -> Option<&str> {
        Some(self.get(field)).filter(|v| !v.is_empty())
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::AmbientTemp => &mut self.ambient_temp,
            Field::ModuleTemp => &mut self.module_temp,
            Field::Irradiation => &mut self.irradiation,
        }
    }

    /// Builds the request body; texts are passed through verbatim.
    pub fn to_request(&self) -> ManualPredictionRequest {
        ManualPredictionRequest {
            ambient_temp: self.ambient_temp.clone(),
            module_temp: self.module_temp.clone(),
            irradiation: self.irradiation.clone(),
        }
    }
}

/// Owns the form inputs for the lifetime of the view.
///
/// Nothing is validated here; the prediction service decides what it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    readings: InputReadings,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn readings(&self) -> &InputReadings {
        &self.readings
    }

    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        trace!(field = field.wire_name(), %value, "Form field updated");
        *self.readings.slot(field) = value;
    }

    /// Sets a field addressed by name, see [`Field::from_str`].
    pub fn set_field_by_name(&mut self, name: &str, value: impl Into<String>) -> Result<(), UnknownField> {
        let field = name.parse::<Field>()?;
        self.set_field(field, value);
        Ok(())
    }

    /// Forwards the current readings to `session`.
    ///
    /// Returns the request to execute, or `None` while another request is in flight.
    pub fn submit(&self, session: &mut PredictionSession) -> Option<PendingRequest> {
        let pending = session.begin(self.readings.to_request());
        if pending.is_none() {
            debug!("Submit ignored, a prediction request is already in flight");
        }
        pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::RequestStatus;

    #[test]
    fn test_fields_start_empty() {
        let form = FormState::new();
        for field in Field::ALL {
            assert_eq!(form.readings().value(field), None);
            assert_eq!(form.readings().get(field), "");
        }
    }

    #[test]
    fn test_set_field_stores_raw_text() {
        let mut form = FormState::new();
        form.set_field(Field::AmbientTemp, "25");
        form.set_field(Field::Irradiation, "not a number");

        assert_eq!(form.readings().value(Field::AmbientTemp), Some("25"));
        assert_eq!(form.readings().value(Field::Irradiation), Some("not a number"));
        assert_eq!(form.readings().value(Field::ModuleTemp), None);
    }

    #[test]
    fn test_set_field_by_name() {
        let mut form = FormState::new();
        form.set_field_by_name("moduleTemp", "45").unwrap();
        form.set_field_by_name("ambient_temp", "-400").unwrap();

        assert_eq!(form.readings().get(Field::ModuleTemp), "45");
        assert_eq!(form.readings().get(Field::AmbientTemp), "-400");
        assert_eq!(
            form.set_field_by_name("windSpeed", "3"),
            Err(UnknownField("windSpeed".to_string()))
        );
    }

    #[test]
    fn test_to_request_passes_values_verbatim() {
        let mut form = FormState::new();
        form.set_field(Field::AmbientTemp, "25");
        form.set_field(Field::ModuleTemp, "45.50");

        let request = form.readings().to_request();
        assert_eq!(request.ambient_temp, "25");
        assert_eq!(request.module_temp, "45.50");
        assert_eq!(request.irradiation, "");
    }

    #[test]
    fn test_submit_moves_session_in_flight() {
        let mut form = FormState::new();
        let mut session = PredictionSession::new();
        form.set_field(Field::Irradiation, "800");

        let pending = form.submit(&mut session).unwrap();
        assert_eq!(session.status(), RequestStatus::InFlight);
        assert_eq!(pending.request.irradiation, "800");
    }

    #[test]
    fn test_submit_while_in_flight_is_noop() {
        let form = FormState::new();
        let mut session = PredictionSession::new();

        let first = form.submit(&mut session);
        let second = form.submit(&mut session);

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(session.status(), RequestStatus::InFlight);
    }

    #[test]
    fn test_editing_while_in_flight_is_allowed() {
        let mut form = FormState::new();
        let mut session = PredictionSession::new();
        let pending = form.submit(&mut session).unwrap();

        form.set_field(Field::AmbientTemp, "30");

        assert_eq!(pending.request.ambient_temp, "");
        assert_eq!(form.readings().get(Field::AmbientTemp), "30");
    }
}
