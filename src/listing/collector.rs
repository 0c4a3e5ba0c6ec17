use chrono::NaiveDate;
use std::fmt;
use tracing::{debug, info, warn};

use super::dates::within_lookback;
use super::{extract_rows, CollectedEntry, ListingSource};

/// Default trailing window, in days
pub const DEFAULT_LOOKBACK_DAYS: u32 = 30;
/// Hard cap on pages visited in one collection
pub const DEFAULT_MAX_PAGES: usize = 50;
/// Keywords a title must contain (any of)
pub const DEFAULT_KEYWORDS: &[&str] = &["1년차", "인턴"];

/// Why a collection stopped paging
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StopReason {
    /// A page produced no rows
    Exhausted,
    /// The oldest dated row on the last page fell outside the window
    OutOfWindow,
    /// A page had rows but none carried a parseable date
    NoDatedRows,
    /// No navigation strategy reached a next page
    NoNextPage,
    /// The page cap was reached
    PageCap,
    /// Reading a page failed; entries gathered before it are kept
    ReadFailed(String),
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StopReason::Exhausted => write!(f, "no more rows"),
            StopReason::OutOfWindow => write!(f, "reached postings older than the lookback window"),
            StopReason::NoDatedRows => write!(f, "page had no parseable dates"),
            StopReason::NoNextPage => write!(f, "no next page"),
            StopReason::PageCap => write!(f, "page limit reached"),
            StopReason::ReadFailed(e) => write!(f, "page read failed: {}", e),
        }
    }
}

/// Result of one collection run
#[derive(Debug, Clone)]
pub struct Collection {
    pub entries: Vec<CollectedEntry>,
    pub pages_read: usize,
    pub stop: StopReason,
}

/// Walks a listing newest-first, keeping keyword matches inside the lookback
/// window and stopping once a page's oldest posting falls outside it.
#[derive(Debug, Clone)]
pub struct Collector {
    pub keywords: Vec<String>,
    pub lookback_days: u32,
    pub max_pages: usize,
}

impl Default for Collector {
    fn default() -> Self {
        Self {
            keywords: DEFAULT_KEYWORDS.iter().map(|k| k.to_string()).collect(),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            max_pages: DEFAULT_MAX_PAGES,
        }
    }
}

impl Collector {
    pub fn new(keywords: Vec<String>, lookback_days: u32, max_pages: usize) -> Self {
        Self {
            keywords,
            lookback_days,
            max_pages,
        }
    }

    /// Collect matching entries from `source`, treating `today` as "now".
    ///
    /// Rows without a parseable date are never kept and do not take part
    /// in the continue-paging decision.
    pub fn collect<S: ListingSource + ?Sized>(&self, source: &mut S, today: NaiveDate) -> Collection {
        let mut entries = Vec::new();
        let mut pages_read = 0;

        let stop = loop {
            if pages_read >= self.max_pages {
                break StopReason::PageCap;
            }

            let raw = match source.read_rows() {
                Ok(raw) => raw,
                Err(e) => {
                    warn!("Failed to read listing page {}: {:#}", pages_read + 1, e);
                    break StopReason::ReadFailed(format!("{:#}", e));
                }
            };
            pages_read += 1;

            let rows = extract_rows(&raw, &source.current_url());
            debug!("rows on page {} = {}", pages_read, rows.len());
            if rows.is_empty() {
                break StopReason::Exhausted;
            }

            for row in &rows {
                if !row.matches_any(&self.keywords) {
                    continue;
                }
                if let Some(date) = row.date.filter(|d| within_lookback(Some(*d), today, self.lookback_days)) {
                    entries.push(CollectedEntry {
                        date,
                        title: row.title.clone(),
                        link: row.link.clone(),
                    });
                }
            }

            let oldest = match rows.iter().filter_map(|r| r.date).min() {
                Some(d) => d,
                None => {
                    warn!("Page {} has {} rows but no parseable dates", pages_read, rows.len());
                    break StopReason::NoDatedRows;
                }
            };
            if !within_lookback(Some(oldest), today, self.lookback_days) {
                break StopReason::OutOfWindow;
            }

            if pages_read >= self.max_pages {
                break StopReason::PageCap;
            }
            if !source.advance() {
                break StopReason::NoNextPage;
            }
        };

        info!(
            "Collected {} entries from {} page(s); stopped: {}",
            entries.len(),
            pages_read,
            stop
        );

        Collection {
            entries,
            pages_read,
            stop,
        }
    }
}
