//! Drives a full scraping session: login, board navigation, then one
//! collect-and-export pass per search term.

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use std::path::Path;
use tracing::info;

use crate::cli::formatters::{format_collection, format_saved};
use crate::config::{Credentials, Settings};
use crate::export::{self, ExportedFiles};
use crate::listing::{Collection, Collector, ListingSource};
use crate::scraping::{kvma, KvmaListing, Session};

/// Collect from `source`, print the preview, and write the output pair.
pub fn collect_and_export<S: ListingSource + ?Sized>(
    collector: &Collector,
    source: &mut S,
    term: &str,
    today: NaiveDate,
    output_dir: &Path,
) -> Result<(Collection, ExportedFiles)> {
    let collection = collector.collect(source, today);
    print!(
        "{}",
        format_collection(term, collector.lookback_days, &collector.keywords, &collection)
    );

    let files = export::export_run(output_dir, today, term, &collection.entries)
        .with_context(|| format!("Failed to save results for '{}'", term))?;
    print!("{}", format_saved(&files));

    Ok((collection, files))
}

/// Log in, open the job board and run every configured search.
pub fn run(settings: &Settings, credentials: &Credentials) -> Result<Vec<ExportedFiles>> {
    let session = Session::launch(settings.headless)?;
    kvma::login(&session, credentials)?;
    kvma::open_job_board(&session)?;

    let collector = settings.collector();
    let mut saved = Vec::new();

    for term in settings.search_terms.iter().filter(|t| !t.trim().is_empty()) {
        kvma::search(&session, term)?;
        let today = Local::now().date_naive();
        let mut listing = KvmaListing::new(&session);
        let (_, files) = collect_and_export(&collector, &mut listing, term, today, &settings.output_dir)?;
        saved.push(files);
    }

    info!("Finished {} search run(s)", saved.len());
    Ok(saved)
}
