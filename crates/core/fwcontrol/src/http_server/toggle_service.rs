use super::AppState;
use crate::ServiceActionResult;
use axum::extract::rejection::FormRejection;
use axum::extract::State;
use axum::Form;
use axum::Json;
use serde::Deserialize;
use tracing::warn;

/// Fields posted by the control page
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ToggleRequest {
    #[serde(rename = "serviceName")]
    service_name: Option<String>,
    action: Option<String>,
}

/// Failures are described by the JSON payload, never by the HTTP status.
///
/// A body that is not a valid form is handled as an empty form.
pub(crate) async fn toggle_service(
    State(state): State<AppState>,
    form: Result<Form<ToggleRequest>, FormRejection>,
) -> Json<ServiceActionResult> {
    let request = match form {
        Ok(Form(request)) => request,
        Err(rejection) => {
            warn!("Ignoring malformed toggle request: {rejection}");
            ToggleRequest::default()
        }
    };

    // only an absent field falls back to the default, a posted name is used as is
    let service_name = request
        .service_name
        .as_deref()
        .unwrap_or(&*state.default_service);
    let action = request.action.as_deref().unwrap_or_default();

    Json(state.toggle.handle_request(service_name, action).await)
}
