//! TMDb movie search.

use serde::Deserialize;
use serde_json::Value;

use marquee_core::{CatalogMatch, TmdbSettings};

use crate::error::{decode_err, Service, SyncError};
use crate::http::read_body;

/// Free-text title lookup against the metadata catalog.
pub trait CatalogSearch {
    /// First hit for `title`, or `None` when the search comes back empty.
    fn search_movie(&self, title: &str) -> Result<Option<CatalogMatch>, SyncError>;
}

pub struct TmdbClient {
    agent: ureq::Agent,
    settings: TmdbSettings,
}

impl TmdbClient {
    pub fn new(agent: ureq::Agent, settings: TmdbSettings) -> Self {
        Self { agent, settings }
    }
}

impl CatalogSearch for TmdbClient {
    fn search_movie(&self, title: &str) -> Result<Option<CatalogMatch>, SyncError> {
        let url = format!("{}/search/movie", self.settings.base_url);
        tracing::debug!(%url, query = title, "searching TMDb");

        let result = self
            .agent
            .get(&url)
            .query("api_key", &self.settings.api_key)
            .query("query", title)
            .call();
        first_match(&read_body(Service::Tmdb, result)?)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Value>,
}

/// `results[0]` of a `/search/movie` body, exactly as ranked by TMDb.
///
/// Later results are not inspected, so a malformed tail does not fail the lookup.
pub fn first_match(body: &str) -> Result<Option<CatalogMatch>, SyncError> {
    let response: SearchResponse =
        serde_json::from_str(body).map_err(|e| decode_err(Service::Tmdb, e))?;
    match response.results.into_iter().next() {
        None => Ok(None),
        Some(first) => serde_json::from_value(first)
            .map(Some)
            .map_err(|e| decode_err(Service::Tmdb, e)),
    }
}
