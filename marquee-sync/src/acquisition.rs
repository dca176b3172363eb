//! Radarr v3 movie collection: membership read and registration.

use serde::Deserialize;

use marquee_core::{MembershipSet, RadarrSettings, RegistrationRequest, TmdbId};

use crate::error::{decode_err, Service, SyncError};
use crate::http::read_body;

const API_KEY_HEADER: &str = "X-Api-Key";

/// The acquisition manager's movie collection.
pub trait AcquisitionManager {
    /// TMDb ids of every movie already tracked.
    fn existing_ids(&self) -> Result<MembershipSet, SyncError>;

    /// Register a movie for monitoring.
    fn add_movie(&self, request: &RegistrationRequest) -> Result<(), SyncError>;
}

pub struct RadarrClient {
    agent: ureq::Agent,
    settings: RadarrSettings,
}

impl RadarrClient {
    pub fn new(agent: ureq::Agent, settings: RadarrSettings) -> Self {
        Self { agent, settings }
    }

    fn movie_url(&self) -> String {
        format!("{}/api/v3/movie", self.settings.url)
    }
}

impl AcquisitionManager for RadarrClient {
    fn existing_ids(&self) -> Result<MembershipSet, SyncError> {
        let url = self.movie_url();
        tracing::debug!(%url, "reading Radarr collection");
        let result = self
            .agent
            .get(&url)
            .set(API_KEY_HEADER, &self.settings.api_key)
            .call();
        parse_collection(&read_body(Service::Radarr, result)?)
    }

    fn add_movie(&self, request: &RegistrationRequest) -> Result<(), SyncError> {
        let url = self.movie_url();
        tracing::debug!(%url, tmdb_id = %request.tmdb_id, "registering movie");
        let result = self
            .agent
            .post(&url)
            .set(API_KEY_HEADER, &self.settings.api_key)
            .send_json(request);
        read_body(Service::Radarr, result).map(|_| ())
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RadarrMovie {
    tmdb_id: TmdbId,
}

/// Membership set from a `GET /api/v3/movie` body.
pub fn parse_collection(body: &str) -> Result<MembershipSet, SyncError> {
    let movies: Vec<RadarrMovie> =
        serde_json::from_str(body).map_err(|e| decode_err(Service::Radarr, e))?;
    Ok(movies.into_iter().map(|m| m.tmdb_id).collect())
}
