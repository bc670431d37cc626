//! The request/response state machine of the dashboard.

use common::{ManualPredictionRequest, ManualPredictionResponse};
use std::rc::Rc;
use tracing::{debug, error, info, instrument, warn};

use crate::error::{PredictionError, Result};
use crate::result::PredictionResult;
use crate::transport::PredictionTransport;

/// Where the session is in its request lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestStatus {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Monotonic identifier of an issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

/// A request the session has admitted and that must now be executed.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingRequest {
    pub id: RequestId,
    pub request: ManualPredictionRequest,
}

/// What [`PredictionSession::complete`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// A new result replaced the previous one.
    Succeeded,
    /// The exchange failed; the previous result is kept.
    Failed,
    /// The outcome belongs to a request that is no longer current and was dropped.
    Discarded,
}

/// Owns the current prediction result and request status.
///
/// At most one request is outstanding. A finished exchange replaces the held
/// result as a whole; consumers only ever see complete snapshots.
#[derive(Debug, Clone, Default)]
pub struct PredictionSession {
    status: RequestStatus,
    result: Option<Rc<PredictionResult>>,
    last_error: Option<PredictionError>,
    last_issued: Option<RequestId>,
}

impl PredictionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn is_in_flight(&self) -> bool {
        self.status == RequestStatus::InFlight
    }

    /// Snapshot of the latest successful result, if any.
    pub fn result(&self) -> Option<Rc<PredictionResult>> {
        self.result.clone()
    }

    pub fn has_results(&self) -> bool {
        self.result.is_some()
    }

    /// Error of the latest failed exchange; cleared when a new request begins.
    pub fn last_error(&self) -> Option<&PredictionError> {
        self.last_error.as_ref()
    }

    /// Admits a new request unless one is already in flight.
    ///
    /// The status moves to `InFlight` before the caller starts the call. The
    /// previous result stays visible until the new one supersedes it.
    pub fn begin(&mut self, request: ManualPredictionRequest) -> Option<PendingRequest> {
        if self.is_in_flight() {
            debug!(last_issued = ?self.last_issued, "Request already in flight, submission ignored");
            return None;
        }

        let id = RequestId(self.last_issued.map_or(1, |RequestId(last)| last + 1));
        self.last_issued = Some(id);
        self.status = RequestStatus::InFlight;
        self.last_error = None;
        debug!(request_id = id.0, "Prediction request started");

        Some(PendingRequest { id, request })
    }

    /// Applies the outcome of request `id`.
    ///
    /// Outcomes of any request other than the latest in-flight one are dropped.
    pub fn complete(
        &mut self,
        id: RequestId,
        outcome: Result<ManualPredictionResponse>,
    ) -> Completion {
        if !self.is_in_flight() || self.last_issued != Some(id) {
            warn!(
                request_id = id.0,
                latest = ?self.last_issued,
                status = ?self.status,
                "Discarding outcome of a request that is no longer current"
            );
            return Completion::Discarded;
        }

        match outcome.and_then(PredictionResult::from_response) {
            Ok(result) => {
                info!(
                    request_id = id.0,
                    records = result.records().len(),
                    headline_power = ?result.headline_power(),
                    "Prediction succeeded"
                );
                self.result = Some(Rc::new(result));
                self.status = RequestStatus::Succeeded;
                Completion::Succeeded
            }
            Err(e) => {
                error!(request_id = id.0, error = %e, "Prediction failed");
                self.last_error = Some(e);
                self.status = RequestStatus::Failed;
                Completion::Failed
            }
        }
    }

    /// Executes an admitted request on `transport` and applies its outcome.
    #[instrument(skip_all, fields(request_id = pending.id.0))]
    pub async fn run<T>(&mut self, transport: &T, pending: PendingRequest) -> Completion
    where
        T: PredictionTransport + ?Sized,
    {
        let outcome = transport.predict(&pending.request).await;
        self.complete(pending.id, outcome)
    }

    /// Begins and runs a request in one step; `None` when one is already in flight.
    pub async fn submit<T>(
        &mut self,
        transport: &T,
        request: ManualPredictionRequest,
    ) -> Option<Completion>
    where
        T: PredictionTransport + ?Sized,
    {
        let pending = self.begin(request)?;
        Some(self.run(transport, pending).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::export::export_csv;
    use crate::form::{Field, FormState};
    use crate::transport::decode_response;
    use async_trait::async_trait;
    use serde_json::json;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Transport answering from a queue of canned outcomes.
    #[derive(Default)]
    struct ScriptedTransport {
        outcomes: RefCell<VecDeque<Result<ManualPredictionResponse>>>,
        requests: RefCell<Vec<ManualPredictionRequest>>,
    }

    impl ScriptedTransport {
        fn answering(outcomes: Vec<Result<ManualPredictionResponse>>) -> Self {
            Self { outcomes: RefCell::new(outcomes.into()), ..Default::default() }
        }

        fn calls(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    #[async_trait(?Send)]
    impl PredictionTransport for ScriptedTransport {
        async fn predict(&self, request: &ManualPredictionRequest) -> Result<ManualPredictionResponse> {
            self.requests.borrow_mut().push(request.clone());
            self.outcomes
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(PredictionError::Transport("no scripted outcome".into())))
        }
    }

    fn ok(value: serde_json::Value) -> Result<ManualPredictionResponse> {
        Ok(serde_json::from_value(value).unwrap())
    }

    fn scenario_a_response() -> Result<ManualPredictionResponse> {
        ok(json!({
            "predictions": [{"hour": 1, "predicted_power": 4.567, "module_temp": 45, "efficiency": 18.2}],
            "system_efficiency": 17.9
        }))
    }

    fn server_error() -> Result<ManualPredictionResponse> {
        decode_response(500, r#"{"error": "could not convert string to float: ''"}"#)
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = PredictionSession::new();
        assert_eq!(session.status(), RequestStatus::Idle);
        assert!(session.result().is_none());
        assert!(session.last_error().is_none());
    }

    #[tokio::test]
    async fn test_scenario_a_headline_and_efficiency() {
        let transport = ScriptedTransport::answering(vec![scenario_a_response()]);
        let mut form = FormState::new();
        let mut session = PredictionSession::new();
        form.set_field(Field::AmbientTemp, "25");
        form.set_field(Field::ModuleTemp, "45");
        form.set_field(Field::Irradiation, "800");

        let pending = form.submit(&mut session).unwrap();
        let completion = session.run(&transport, pending).await;

        assert_eq!(completion, Completion::Succeeded);
        assert_eq!(session.status(), RequestStatus::Succeeded);
        let result = session.result().unwrap();
        assert_eq!(result.headline_power_display().as_deref(), Some("4.57"));
        assert_eq!(result.system_efficiency_display(), "17.9");

        let sent = transport.requests.borrow();
        assert_eq!(sent[0].ambient_temp, "25");
        assert_eq!(sent[0].module_temp, "45");
        assert_eq!(sent[0].irradiation, "800");
    }

    #[tokio::test]
    async fn test_scenario_b_server_error_without_prior_result() {
        let transport = ScriptedTransport::answering(vec![server_error(), scenario_a_response()]);
        let mut session = PredictionSession::new();

        let completion = session.submit(&transport, ManualPredictionRequest::default()).await;

        assert_eq!(completion, Some(Completion::Failed));
        assert_eq!(session.status(), RequestStatus::Failed);
        assert!(!session.has_results());
        assert_eq!(session.last_error().map(|e| e.kind()), Some(ErrorKind::Transport));

        // Resubmission stays possible.
        let retry = session.submit(&transport, ManualPredictionRequest::default()).await;
        assert_eq!(retry, Some(Completion::Succeeded));
        assert!(session.last_error().is_none());
        assert_eq!(transport.calls(), 2);
    }

    #[tokio::test]
    async fn test_scenario_c_empty_predictions() {
        let transport = ScriptedTransport::answering(vec![ok(json!({
            "predictions": [],
            "system_efficiency": 0.0
        }))]);
        let mut session = PredictionSession::new();

        session.submit(&transport, ManualPredictionRequest::default()).await;

        assert_eq!(session.status(), RequestStatus::Succeeded);
        let result = session.result().unwrap();
        assert!(result.is_empty());
        assert_eq!(result.headline_power(), None);
        assert_eq!(export_csv(&result), None);
    }

    #[tokio::test]
    async fn test_failure_keeps_previous_result() {
        let transport = ScriptedTransport::answering(vec![
            scenario_a_response(),
            Err(PredictionError::Timeout { after_ms: 30_000 }),
        ]);
        let mut session = PredictionSession::new();

        session.submit(&transport, ManualPredictionRequest::default()).await;
        let before = session.result().unwrap();
        session.submit(&transport, ManualPredictionRequest::default()).await;

        assert_eq!(session.status(), RequestStatus::Failed);
        assert_eq!(session.last_error(), Some(&PredictionError::Timeout { after_ms: 30_000 }));
        assert!(Rc::ptr_eq(&before, &session.result().unwrap()));
    }

    #[tokio::test]
    async fn test_malformed_payload_fails_without_partial_acceptance() {
        let transport = ScriptedTransport::answering(vec![ok(json!({
            "predictions": [
                {"hour": 8, "predicted_power": 1.0, "module_temp": 30, "efficiency": 60.0},
                {"hour": 10, "predicted_power": null, "module_temp": 30, "efficiency": 60.0}
            ],
            "system_efficiency": 60.0
        }))]);
        let mut session = PredictionSession::new();

        session.submit(&transport, ManualPredictionRequest::default()).await;

        assert_eq!(session.status(), RequestStatus::Failed);
        assert!(session.result().is_none());
        assert_eq!(
            session.last_error().map(|e| e.kind()),
            Some(ErrorKind::MalformedResponse)
        );
    }

    #[test]
    fn test_no_second_request_while_in_flight() {
        let mut session = PredictionSession::new();

        let first = session.begin(ManualPredictionRequest::default());
        let second = session.begin(ManualPredictionRequest::default());
        let third = session.begin(ManualPredictionRequest::default());

        assert_eq!(first.map(|p| p.id), Some(RequestId(1)));
        assert!(second.is_none());
        assert!(third.is_none());
    }

    #[tokio::test]
    async fn test_ignored_submit_sends_nothing() {
        let transport = ScriptedTransport::answering(vec![scenario_a_response()]);
        let form = FormState::new();
        let mut session = PredictionSession::new();

        let pending = form.submit(&mut session).unwrap();
        for _ in 0..3 {
            if let Some(extra) = form.submit(&mut session) {
                session.run(&transport, extra).await;
            }
        }
        assert_eq!(transport.calls(), 0);

        session.run(&transport, pending).await;
        assert_eq!(transport.calls(), 1);
    }

    #[test]
    fn test_stale_outcomes_are_discarded() {
        let mut session = PredictionSession::new();
        let first = session.begin(ManualPredictionRequest::default()).unwrap();
        assert_eq!(
            session.complete(first.id, server_error()),
            Completion::Failed
        );

        let second = session.begin(ManualPredictionRequest::default()).unwrap();
        assert_eq!(second.id, RequestId(2));

        // A late answer for the first request must not land on the second.
        assert_eq!(
            session.complete(first.id, scenario_a_response()),
            Completion::Discarded
        );
        assert_eq!(session.status(), RequestStatus::InFlight);
        assert!(session.result().is_none());

        assert_eq!(
            session.complete(second.id, scenario_a_response()),
            Completion::Succeeded
        );
        // Completing twice is a no-op.
        assert_eq!(
            session.complete(second.id, server_error()),
            Completion::Discarded
        );
        assert_eq!(session.status(), RequestStatus::Succeeded);
    }

    #[tokio::test]
    async fn test_new_result_replaces_previous() {
        let transport = ScriptedTransport::answering(vec![
            scenario_a_response(),
            ok(json!({
                "predictions": [
                    {"hour": 8, "predicted_power": 2.0, "module_temp": 31, "efficiency": 60.0},
                    {"hour": 10, "predicted_power": 3.0, "module_temp": 33, "efficiency": 70.0}
                ],
                "system_efficiency": 65.0
            })),
        ]);
        let mut session = PredictionSession::new();

        session.submit(&transport, ManualPredictionRequest::default()).await;
        let first = session.result().unwrap();
        session.submit(&transport, ManualPredictionRequest::default()).await;
        let second = session.result().unwrap();

        assert_eq!(first.records().len(), 1);
        assert_eq!(second.records().len(), 2);
        assert_eq!(second.headline_power(), Some(2.0));
        assert_eq!(second.system_efficiency(), 65.0);
    }
}
