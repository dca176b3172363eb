//! Batch orchestration: fetch the watchlist and the Radarr baseline, then
//! resolve and register each candidate in list order.
//!
//! Fetch failures abort the run. Anything that goes wrong for a single
//! candidate is recorded as [`ItemOutcome::Failed`] and the batch moves on.

use std::collections::HashSet;

use marquee_core::{CandidateTitle, MembershipSet, RegistrationRequest, RegistrationSettings, TmdbId};

use crate::acquisition::AcquisitionManager;
use crate::catalog::CatalogSearch;
use crate::discovery::WatchlistSource;
use crate::error::SyncError;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// What happened to one candidate title.
#[derive(Debug)]
pub enum ItemOutcome {
    /// Registered with Radarr.
    Added { tmdb_id: TmdbId, title: String },
    /// `--dry-run` mode: the movie *would* have been registered.
    WouldAdd { tmdb_id: TmdbId, title: String },
    /// Radarr already tracks it, or an earlier candidate in this run resolved to the same id.
    AlreadyPresent { tmdb_id: TmdbId },
    /// TMDb returned no results for the title.
    NoMatch,
    /// Resolution or registration failed; the rest of the batch continues.
    Failed { error: SyncError },
}

#[derive(Debug)]
pub struct ItemReport {
    pub candidate: CandidateTitle,
    pub outcome: ItemOutcome,
}

/// Summary of one batch, in watchlist order.
#[derive(Debug, Default)]
pub struct RunReport {
    pub items: Vec<ItemReport>,
    /// Size of the Radarr baseline read at the start of the run.
    pub existing_count: usize,
}

impl RunReport {
    pub fn added_count(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Added { .. }))
    }

    pub fn would_add_count(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::WouldAdd { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|o| matches!(o, ItemOutcome::Failed { .. }))
    }

    fn count(&self, pred: impl Fn(&ItemOutcome) -> bool) -> usize {
        self.items.iter().filter(|i| pred(&i.outcome)).count()
    }
}

// ---------------------------------------------------------------------------
// run
// ---------------------------------------------------------------------------

/// Run one batch.
///
/// The Radarr membership set is a snapshot taken before any registration;
/// movies added to Radarr by someone else mid-run are not seen.
pub fn run<W, C, A>(
    source: &W,
    catalog: &C,
    manager: &A,
    settings: &RegistrationSettings,
    dry_run: bool,
) -> Result<RunReport, SyncError>
where
    W: WatchlistSource + ?Sized,
    C: CatalogSearch + ?Sized,
    A: AcquisitionManager + ?Sized,
{
    run_with(source, catalog, manager, settings, dry_run, |_| {})
}

/// [`run`], calling `on_item` as soon as each title is finished.
///
/// Lets callers report progress before the batch completes.
pub fn run_with<W, C, A, F>(
    source: &W,
    catalog: &C,
    manager: &A,
    settings: &RegistrationSettings,
    dry_run: bool,
    mut on_item: F,
) -> Result<RunReport, SyncError>
where
    W: WatchlistSource + ?Sized,
    C: CatalogSearch + ?Sized,
    A: AcquisitionManager + ?Sized,
    F: FnMut(&ItemReport),
{
    let candidates = source.fetch_watchlist()?;
    let existing = manager.existing_ids()?;
    tracing::info!(
        candidates = candidates.len(),
        existing = existing.len(),
        "fetched watchlist and Radarr baseline"
    );

    let mut batch = Batch {
        catalog,
        manager,
        settings,
        existing: &existing,
        added_this_run: HashSet::new(),
        dry_run,
    };

    let items = candidates
        .into_iter()
        .map(|candidate| {
            let outcome = batch
                .process(&candidate)
                .unwrap_or_else(|error| ItemOutcome::Failed { error });
            log_outcome(&candidate, &outcome);
            let item = ItemReport { candidate, outcome };
            on_item(&item);
            item
        })
        .collect();

    Ok(RunReport {
        items,
        existing_count: existing.len(),
    })
}

struct Batch<'a, C: ?Sized, A: ?Sized> {
    catalog: &'a C,
    manager: &'a A,
    settings: &'a RegistrationSettings,
    existing: &'a MembershipSet,
    added_this_run: HashSet<TmdbId>,
    dry_run: bool,
}

impl<C, A> Batch<'_, C, A>
where
    C: CatalogSearch + ?Sized,
    A: AcquisitionManager + ?Sized,
{
    /// resolve → check membership → register.
    fn process(&mut self, candidate: &CandidateTitle) -> Result<ItemOutcome, SyncError> {
        let Some(matched) = self.catalog.search_movie(&candidate.title)? else {
            return Ok(ItemOutcome::NoMatch);
        };

        if self.existing.contains(matched.id) || self.added_this_run.contains(&matched.id) {
            return Ok(ItemOutcome::AlreadyPresent { tmdb_id: matched.id });
        }

        let request = RegistrationRequest::monitored(
            &matched,
            self.settings.quality_profile_id,
            self.settings.root_folder.clone(),
        );

        if !self.dry_run {
            self.manager.add_movie(&request)?;
        }
        self.added_this_run.insert(matched.id);

        let (tmdb_id, title) = (request.tmdb_id, request.title);
        Ok(if self.dry_run {
            ItemOutcome::WouldAdd { tmdb_id, title }
        } else {
            ItemOutcome::Added { tmdb_id, title }
        })
    }
}

fn log_outcome(candidate: &CandidateTitle, outcome: &ItemOutcome) {
    let name = candidate.title.as_str();
    match outcome {
        ItemOutcome::Added { tmdb_id, title } => {
            tracing::info!(candidate = name, %tmdb_id, title = %title, "added to Radarr")
        }
        ItemOutcome::WouldAdd { tmdb_id, title } => {
            tracing::info!(candidate = name, %tmdb_id, title = %title, "[dry-run] would add to Radarr")
        }
        ItemOutcome::AlreadyPresent { tmdb_id } => {
            tracing::debug!(candidate = name, %tmdb_id, "already in Radarr")
        }
        ItemOutcome::NoMatch => tracing::warn!(candidate = name, "no TMDb match"),
        ItemOutcome::Failed { error } => {
            tracing::warn!(candidate = name, error = %error, "failed to process title")
        }
    }
}
