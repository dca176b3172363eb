//! Environment-driven configuration.
//!
//! # API pattern
//!
//! - [`Config::from_lookup`] — explicit key lookup; used in tests
//! - [`Config::from_env`] — reads the process environment, delegates to `from_lookup`
//!
//! Call [`load_dotenv`] first so values from a `.env` file are visible.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

pub const DEFAULT_ROOT_FOLDER: &str = "/movies";
pub const DEFAULT_QUALITY_PROFILE_ID: i64 = 1;
pub const DEFAULT_COUNTRY: &str = "US";
pub const DEFAULT_LANGUAGE: &str = "en";
pub const DEFAULT_JUSTWATCH_GRAPHQL_URL: &str = "https://apis.justwatch.com/graphql";
pub const DEFAULT_JUSTWATCH_HOME_URL: &str = "https://www.justwatch.com";
pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Load a `.env` file into the process environment.
///
/// With `None`, `.env` in the working directory is tried and silently skipped
/// if missing. An explicit path must load. Existing variables are never
/// overridden.
pub fn load_dotenv(path: Option<&Path>) -> Result<(), ConfigError> {
    match path {
        None => {
            dotenvy::dotenv().ok();
            Ok(())
        }
        Some(path) => dotenvy::from_path(path)
            .map(|_| ())
            .map_err(|err| ConfigError::EnvFile {
                path: path.display().to_string(),
                reason: err.to_string(),
            }),
    }
}

// ── Sections ─────────────────────────────────────────────────

/// Discovery-service list parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JustWatchSettings {
    pub list_id: String,
    pub country: String,
    pub language: String,
    pub graphql_url: String,
    /// Fetched once before the GraphQL call to obtain session cookies.
    pub home_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbSettings {
    pub api_key: String,
    pub base_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RadarrSettings {
    /// Base URL without trailing slash, e.g. `http://radarr:7878`.
    pub url: String,
    pub api_key: String,
}

/// Fixed fields attached to every Radarr registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSettings {
    pub quality_profile_id: i64,
    pub root_folder: String,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            quality_profile_id: DEFAULT_QUALITY_PROFILE_ID,
            root_folder: DEFAULT_ROOT_FOLDER.to_string(),
        }
    }
}

// ── Top-level config ─────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub justwatch: JustWatchSettings,
    pub tmdb: TmdbSettings,
    pub radarr: RadarrSettings,
    pub registration: RegistrationSettings,
    /// Log file to rotate and append to; stderr when unset.
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Build config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let require = |key: &'static str| get(key).ok_or(ConfigError::Missing { key });
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let quality_profile_id = match get("RADARR_QUALITY_PROFILE_ID") {
            None => DEFAULT_QUALITY_PROFILE_ID,
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .map_err(|e| ConfigError::Invalid {
                    key: "RADARR_QUALITY_PROFILE_ID",
                    value: raw.clone(),
                    reason: e.to_string(),
                })?,
        };

        Ok(Self {
            justwatch: JustWatchSettings {
                list_id: require("JUSTWATCH_LIST_ID")?,
                country: or("JUSTWATCH_COUNTRY", DEFAULT_COUNTRY),
                language: or("JUSTWATCH_LANGUAGE", DEFAULT_LANGUAGE),
                graphql_url: or("JUSTWATCH_GRAPHQL_URL", DEFAULT_JUSTWATCH_GRAPHQL_URL),
                home_url: or("JUSTWATCH_HOME_URL", DEFAULT_JUSTWATCH_HOME_URL),
            },
            tmdb: TmdbSettings {
                api_key: require("TMDB_API_KEY")?,
                base_url: trim_slash(or("TMDB_BASE_URL", DEFAULT_TMDB_BASE_URL)),
            },
            radarr: RadarrSettings {
                url: trim_slash(require("RADARR_URL")?),
                api_key: require("RADARR_API_KEY")?,
            },
            registration: RegistrationSettings {
                quality_profile_id,
                root_folder: or("RADARR_ROOT_FOLDER", DEFAULT_ROOT_FOLDER),
            },
            log_file: get("LOGFILE_PATH").map(PathBuf::from),
        })
    }
}

fn trim_slash(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
