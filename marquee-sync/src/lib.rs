//! # marquee-sync
//!
//! Blocking clients for JustWatch, TMDb, and Radarr, plus the batch pipeline
//! that ties them together.
//!
//! Build a [`Clients`] from a [`marquee_core::Config`] and call
//! [`Clients::run`], or hand any trait implementations to [`pipeline::run`].

pub mod acquisition;
pub mod catalog;
pub mod discovery;
pub mod error;
pub mod http;
pub mod pipeline;

use marquee_core::Config;

pub use acquisition::{AcquisitionManager, RadarrClient};
pub use catalog::{CatalogSearch, TmdbClient};
pub use discovery::{JustWatchClient, WatchlistSource};
pub use error::{Service, SyncError};
pub use pipeline::{ItemOutcome, ItemReport, RunReport};

/// The three live service clients for one run, sharing a single agent.
pub struct Clients {
    pub watchlist: JustWatchClient,
    pub catalog: TmdbClient,
    pub radarr: RadarrClient,
}

impl Clients {
    pub fn from_config(config: &Config) -> Self {
        let agent = http::build_agent();
        Self {
            watchlist: JustWatchClient::new(agent.clone(), config.justwatch.clone()),
            catalog: TmdbClient::new(agent.clone(), config.tmdb.clone()),
            radarr: RadarrClient::new(agent, config.radarr.clone()),
        }
    }

    /// [`pipeline::run_with`] against the live services.
    pub fn run(
        &self,
        config: &Config,
        dry_run: bool,
        on_item: impl FnMut(&ItemReport),
    ) -> Result<RunReport, SyncError> {
        pipeline::run_with(
            &self.watchlist,
            &self.catalog,
            &self.radarr,
            &config.registration,
            dry_run,
            on_item,
        )
    }
}
