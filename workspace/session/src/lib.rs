//! Prediction request/response lifecycle of the solar dashboard.
//!
//! [`FormState`] collects the raw sensor readings, [`PredictionSession`] runs
//! one exchange at a time against a [`PredictionTransport`] and holds the
//! latest [`PredictionResult`], from which chart series and the CSV export are
//! derived. Nothing here depends on a runtime, so the same code drives the
//! browser dashboard and the command line client.

pub mod charts;
pub mod error;
pub mod export;
pub mod form;
pub mod result;
pub mod session;
pub mod transport;

pub use charts::{dashboard_charts, Axis, ChartSeries, ChartSpec, SeriesKind};
pub use error::{ErrorKind, PredictionError};
pub use export::{export_csv, export_records, EXPORT_FILE_NAME, EXPORT_MIME};
pub use form::{Field, FormState, InputReadings, UnknownField};
pub use result::{headline_power_of, PredictionResult};
pub use session::{Completion, PendingRequest, PredictionSession, RequestId, RequestStatus};
pub use transport::{decode_response, PredictionTransport};
