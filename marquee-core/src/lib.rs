//! Marquee core library — domain types, configuration, errors, log rotation.
//!
//! - [`types`] — newtypes and the records exchanged between services
//! - [`config`] — environment-driven [`Config`]
//! - [`error`] — [`ConfigError`]
//! - [`log_rotation`] — single-generation size-based rotation

pub mod config;
pub mod error;
pub mod log_rotation;
pub mod types;

pub use config::{Config, JustWatchSettings, RadarrSettings, RegistrationSettings, TmdbSettings};
pub use error::ConfigError;
pub use types::{CandidateTitle, CatalogMatch, MembershipSet, RegistrationRequest, TmdbId};
