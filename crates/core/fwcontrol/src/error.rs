use system_services::SystemServiceError;

/// Failures that prevent a toggle request from reaching a known outcome.
///
/// These never reach the HTTP client as errors: [`ServiceToggle`](crate::ServiceToggle)
/// turns them into an inactive result describing the failure.
#[derive(Debug, thiserror::Error)]
pub enum ToggleError {
    #[error("failed to query the status of {service}: {source}")]
    Probe {
        service: String,
        source: SystemServiceError,
    },

    #[error("failed to {action} {service}: {source}")]
    Mutation {
        service: String,
        action: &'static str,
        source: SystemServiceError,
    },
}
