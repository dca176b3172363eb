//! Human-readable per-title report for stdout.

use std::io::{self, Write};

use marquee_sync::{ItemOutcome, ItemReport, RunReport};

/// One line for a finished title, flushed so partial runs leave a record.
pub fn write_item(out: &mut impl Write, item: &ItemReport) -> io::Result<()> {
    let name = &item.candidate.title;
    match &item.outcome {
        ItemOutcome::Added { tmdb_id, title } => {
            writeln!(out, "Added: {title} (TMDb ID {tmdb_id})")?
        }
        ItemOutcome::WouldAdd { tmdb_id, title } => {
            writeln!(out, "[dry-run] Would add: {title} (TMDb ID {tmdb_id})")?
        }
        ItemOutcome::AlreadyPresent { tmdb_id } => {
            writeln!(out, "Already in Radarr: {name} (TMDb ID {tmdb_id})")?
        }
        ItemOutcome::NoMatch => writeln!(out, "No TMDb match for: {name}")?,
        ItemOutcome::Failed { error } => writeln!(out, "Error processing {name}: {error}")?,
    }
    out.flush()
}

/// Final count line.
pub fn write_summary(out: &mut impl Write, report: &RunReport, dry_run: bool) -> io::Result<()> {
    if dry_run {
        writeln!(
            out,
            "[dry-run] Completed. Would add {} new movies to Radarr.",
            report.would_add_count()
        )
    } else {
        writeln!(
            out,
            "Completed. Added {} new movies to Radarr.",
            report.added_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use marquee_core::{CandidateTitle, TmdbId};
    use marquee_sync::{Service, SyncError};

    use super::*;

    fn item(title: &str, outcome: ItemOutcome) -> ItemReport {
        ItemReport {
            candidate: CandidateTitle {
                title: title.into(),
                imdb_score: None,
                full_path: String::new(),
                poster_url: String::new(),
                object_id: String::new(),
            },
            outcome,
        }
    }

    fn render(report: &RunReport, dry_run: bool) -> String {
        let mut buf = Vec::new();
        for item in &report.items {
            write_item(&mut buf, item).unwrap();
        }
        write_summary(&mut buf, report, dry_run).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn lines_follow_watchlist_order() {
        let report = RunReport {
            items: vec![
                item(
                    "Movie A",
                    ItemOutcome::Added {
                        tmdb_id: TmdbId(100),
                        title: "Movie A".into(),
                    },
                ),
                item("Movie B", ItemOutcome::NoMatch),
                item("Heat", ItemOutcome::AlreadyPresent { tmdb_id: TmdbId(949) }),
                item(
                    "Movie D",
                    ItemOutcome::Failed {
                        error: SyncError::Status {
                            service: Service::Radarr,
                            status: 500,
                            body: "boom".into(),
                        },
                    },
                ),
            ],
            existing_count: 1,
        };

        assert_eq!(
            render(&report, false),
            "Added: Movie A (TMDb ID 100)\n\
             No TMDb match for: Movie B\n\
             Already in Radarr: Heat (TMDb ID 949)\n\
             Error processing Movie D: Radarr returned HTTP 500: boom\n\
             Completed. Added 1 new movies to Radarr.\n"
        );
    }

    #[test]
    fn dry_run_summary_counts_would_add() {
        let report = RunReport {
            items: vec![item(
                "Arrival",
                ItemOutcome::WouldAdd {
                    tmdb_id: TmdbId(329865),
                    title: "Arrival".into(),
                },
            )],
            existing_count: 0,
        };

        let text = render(&report, true);
        assert!(text.starts_with("[dry-run] Would add: Arrival (TMDb ID 329865)\n"));
        assert!(text.ends_with("[dry-run] Completed. Would add 1 new movies to Radarr.\n"));
    }
}
