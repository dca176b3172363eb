//! Shared blocking HTTP plumbing.

use crate::error::{Service, SyncError};

/// Build the agent shared by all clients in a run.
///
/// The agent carries its own cookie jar, so the JustWatch warm-up request and
/// the GraphQL call that follows share a session.
pub fn build_agent() -> ureq::Agent {
    ureq::AgentBuilder::new()
        .user_agent(concat!("marquee/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Turn a ureq call result into the response body, mapping non-2xx statuses
/// to [`SyncError::Status`].
pub(crate) fn read_body(
    service: Service,
    result: Result<ureq::Response, ureq::Error>,
) -> Result<String, SyncError> {
    match result {
        Ok(response) => response
            .into_string()
            .map_err(|source| SyncError::Body { service, source }),
        Err(ureq::Error::Status(status, response)) => Err(SyncError::Status {
            service,
            status,
            body: response.into_string().unwrap_or_default(),
        }),
        Err(ureq::Error::Transport(transport)) => Err(SyncError::Transport {
            service,
            source: Box::new(transport),
        }),
    }
}
