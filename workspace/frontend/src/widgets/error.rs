use session::{ErrorKind, PredictionError};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PredictionErrorPanelProps {
    pub error: PredictionError,
    pub on_retry: Callback<()>,
    /// A resubmission is already running.
    #[prop_or_default]
    pub in_flight: bool,
}

/// Heading and hint shown for a failed exchange.
fn describe(error: &PredictionError) -> (&'static str, &'static str) {
    match error {
        PredictionError::Transport(_) => (
            "Could not reach the prediction service",
            "Check that the service is running and the API address is correct.",
        ),
        PredictionError::Timeout { .. } => (
            "The prediction service did not answer in time",
            "The service may be busy. Try again in a moment.",
        ),
        PredictionError::HttpStatus { status, .. } if *status >= 500 => (
            "The prediction service could not process these readings",
            "Make sure all three readings are filled in with numbers.",
        ),
        PredictionError::HttpStatus { .. } => (
            "The prediction service refused the request",
            "The request was not accepted by the service.",
        ),
        PredictionError::MalformedResponse(_) => (
            "The forecast could not be read",
            "The service answered with data in an unexpected shape.",
        ),
    }
}

fn kind_badge(kind: ErrorKind) -> (&'static str, &'static str) {
    match kind {
        ErrorKind::Transport => ("badge-error", "transport"),
        ErrorKind::MalformedResponse => ("badge-warning", "malformed response"),
    }
}

/// Shown in place of the stat panel when a request fails before any forecast exists.
#[function_component(PredictionErrorPanel)]
pub fn prediction_error_panel(props: &PredictionErrorPanelProps) -> Html {
    let (heading, hint) = describe(&props.error);
    let (badge_class, badge_text) = kind_badge(props.error.kind());
    log::warn!("Showing {} failure panel: {}", badge_text, props.error);

    let onclick = {
        let on_retry = props.on_retry.clone();
        Callback::from(move |_: MouseEvent| {
            log::debug!("Retrying prediction from error panel");
            on_retry.emit(());
        })
    };

    html! {
        <div class="card bg-base-100 shadow border border-error/30">
            <div class="card-body items-center text-center gap-3">
                <i class="fas fa-plug-circle-exclamation text-3xl text-error"></i>
                <h2 class="card-title">{heading}</h2>
                <span class={classes!("badge", badge_class)}>{badge_text}</span>
                <p class="text-sm text-gray-500">{hint}</p>
                <code class="text-xs bg-base-200 rounded px-2 py-1">{props.error.to_string()}</code>
                <button class="btn btn-primary btn-sm" disabled={props.in_flight} {onclick}>
                    <i class="fas fa-redo"></i>
                    {" Retry prediction"}
                </button>
            </div>
        </div>
    }
}
