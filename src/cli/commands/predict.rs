use anyhow::{anyhow, Context, Result};
use session::{
    export_csv, Field, FormState, PredictionSession, PredictionTransport, RequestStatus,
};
use std::path::Path;
use tracing::{debug, info, trace, warn};

use crate::client::HttpTransport;
use crate::config::ClientConfig;

/// Raw sensor readings as given on the command line
#[derive(Debug, Clone, Default)]
pub struct Readings {
    pub ambient_temp: String,
    pub module_temp: String,
    pub irradiation: String,
}

impl Readings {
    fn to_form(&self) -> FormState {
        let mut form = FormState::new();
        form.set_field(Field::AmbientTemp, self.ambient_temp.as_str());
        form.set_field(Field::ModuleTemp, self.module_temp.as_str());
        form.set_field(Field::Irradiation, self.irradiation.as_str());
        form
    }
}

pub async fn predict(config: &ClientConfig, readings: Readings, export: Option<&Path>) -> Result<()> {
    trace!("Entering predict function");
    let transport = HttpTransport::new(config).context("Failed to build HTTP client")?;
    info!("Requesting forecast from {}", transport.url());

    let session = run_prediction(&transport, &readings).await;
    println!("{}", render_summary(&session));

    if session.status() == RequestStatus::Failed {
        let reason = session
            .last_error()
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        return Err(anyhow!("Prediction failed: {}", reason));
    }

    if let Some(path) = export {
        if write_export(&session, path)? {
            println!("Forecast written to {}", path.display());
        } else {
            warn!("No prediction data, skipping export to {}", path.display());
        }
    }

    Ok(())
}

/// Runs a single exchange for `readings` and returns the settled session
pub async fn run_prediction<T>(transport: &T, readings: &Readings) -> PredictionSession
where
    T: PredictionTransport + ?Sized,
{
    let form = readings.to_form();
    let mut session = PredictionSession::new();

    if let Some(pending) = form.submit(&mut session) {
        let completion = session.run(transport, pending).await;
        debug!(?completion, status = ?session.status(), "Prediction exchange finished");
    }

    session
}

/// Human readable summary of the session's current snapshot
pub fn render_summary(session: &PredictionSession) -> String {
    let mut lines = Vec::new();

    if let Some(error) = session.last_error() {
        lines.push(format!("Prediction failed: {}", error));
    }

    match session.result() {
        Some(result) if !result.is_empty() => {
            let headline = result.headline_power_display().unwrap_or_default();
            lines.push(format!("Predicted power:   {} kW", headline));
            lines.push(format!("System efficiency: {} %", result.system_efficiency_display()));
            lines.push(String::new());
            lines.push(format!("{:>6}  {:>10}  {:>10}  {:>8}  {:>10}", "hour", "predicted", "historical", "temp", "efficiency"));
            for record in result.records() {
                let actual = record
                    .actual_power
                    .map(|p| p.to_string())
                    .unwrap_or_else(|| "-".to_string());
                lines.push(format!(
                    "{:>6}  {:>10}  {:>10}  {:>8}  {:>10}",
                    record.hour.to_string(),
                    record.predicted_power,
                    actual,
                    record.module_temp,
                    record.efficiency
                ));
            }
        }
        Some(result) => {
            lines.push("No prediction data".to_string());
            lines.push(format!("System efficiency: {} %", result.system_efficiency_display()));
        }
        None => {
            if session.last_error().is_none() {
                lines.push("No prediction data".to_string());
            }
        }
    }

    lines.join("\n")
}

/// Writes the CSV export of the session's result to `path`
///
/// Returns `false` without touching the file system when there is nothing to export.
pub fn write_export(session: &PredictionSession, path: &Path) -> Result<bool> {
    let Some(csv) = session.result().and_then(|result| export_csv(&result)) else {
        return Ok(false);
    };

    std::fs::write(path, csv)
        .with_context(|| format!("Failed to write export to {}", path.display()))?;
    Ok(true)
}
