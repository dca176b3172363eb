//! Domain types shared by the watchlist, catalog, and Radarr clients.
//!
//! Nothing here is persisted; every value lives for a single run.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// TMDb movie id — the join key between the catalog and Radarr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TmdbId(pub i64);

impl fmt::Display for TmdbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// One entry of the JustWatch list, as returned by the discovery service.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateTitle {
    pub title: String,
    pub imdb_score: Option<f64>,
    /// Site-relative path such as `/us/movie/heat`.
    pub full_path: String,
    pub poster_url: String,
    /// Opaque JustWatch object id.
    pub object_id: String,
}

/// First hit of a TMDb movie search.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CatalogMatch {
    pub id: TmdbId,
    pub original_title: String,
}

/// TMDb ids Radarr already tracks, read once at the start of a run.
///
/// Only lookups are exposed; the snapshot is never updated during the run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MembershipSet(HashSet<TmdbId>);

impl MembershipSet {
    pub fn contains(&self, id: TmdbId) -> bool {
        self.0.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<TmdbId> for MembershipSet {
    fn from_iter<I: IntoIterator<Item = TmdbId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// `addOptions` block of a Radarr movie POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOptions {
    pub search_for_movie: bool,
}

/// Body of `POST /api/v3/movie`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRequest {
    pub tmdb_id: TmdbId,
    pub title: String,
    pub quality_profile_id: i64,
    pub root_folder_path: String,
    pub monitored: bool,
    pub add_options: AddOptions,
}

impl RegistrationRequest {
    /// Build a monitored request that asks Radarr to search immediately.
    pub fn monitored(
        matched: &CatalogMatch,
        quality_profile_id: i64,
        root_folder_path: impl Into<String>,
    ) -> Self {
        Self {
            tmdb_id: matched.id,
            title: matched.original_title.clone(),
            quality_profile_id,
            root_folder_path: root_folder_path.into(),
            monitored: true,
            add_options: AddOptions {
                search_for_movie: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn registration_request_serializes_radarr_shape() {
        let matched = CatalogMatch {
            id: TmdbId(949),
            original_title: "Heat".into(),
        };
        let req = RegistrationRequest::monitored(&matched, 4, "/data/movies");

        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            json!({
                "tmdbId": 949,
                "title": "Heat",
                "qualityProfileId": 4,
                "rootFolderPath": "/data/movies",
                "monitored": true,
                "addOptions": { "searchForMovie": true }
            })
        );
    }

    #[test]
    fn membership_set_lookups() {
        let set: MembershipSet = [TmdbId(1), TmdbId(2), TmdbId(2)].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains(TmdbId(2)));
        assert!(!set.contains(TmdbId(3)));
        assert!(MembershipSet::default().is_empty());
    }
}
