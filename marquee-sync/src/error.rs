//! Error types for marquee-sync.

use std::fmt;

use thiserror::Error;

/// Remote service an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    JustWatch,
    Tmdb,
    Radarr,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::JustWatch => write!(f, "JustWatch"),
            Service::Tmdb => write!(f, "TMDb"),
            Service::Radarr => write!(f, "Radarr"),
        }
    }
}

/// All errors that can arise while talking to the three services.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Connection, DNS, or TLS failure before any status was received.
    #[error("{service} request failed: {source}")]
    Transport {
        service: Service,
        #[source]
        source: Box<ureq::Transport>,
    },

    /// Non-2xx response.
    #[error("{service} returned HTTP {status}: {body}")]
    Status {
        service: Service,
        status: u16,
        body: String,
    },

    /// Reading the response body failed mid-stream.
    #[error("failed to read {service} response: {source}")]
    Body {
        service: Service,
        #[source]
        source: std::io::Error,
    },

    /// Body was not the JSON shape we expect (malformed or missing keys).
    #[error("unexpected {service} response: {source}")]
    Decode {
        service: Service,
        #[source]
        source: serde_json::Error,
    },

    /// GraphQL endpoint answered with an `errors` array and no data.
    #[error("{service} GraphQL error: {message}")]
    Graphql { service: Service, message: String },
}

impl SyncError {
    pub fn service(&self) -> Service {
        match self {
            SyncError::Transport { service, .. }
            | SyncError::Status { service, .. }
            | SyncError::Body { service, .. }
            | SyncError::Decode { service, .. }
            | SyncError::Graphql { service, .. } => *service,
        }
    }
}

/// Convenience constructor for [`SyncError::Decode`].
pub(crate) fn decode_err(service: Service, source: serde_json::Error) -> SyncError {
    SyncError::Decode { service, source }
}
