//! Job-board listing model and the recency-filtered collector
//!
//! A listing source yields raw table rows one page at a time. Rows are
//! turned into [`ListingRow`]s here, then filtered by keyword and date in
//! [`collector`].

pub mod collector;
pub mod dates;
pub mod links;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::Result;

pub use collector::{Collection, Collector, StopReason};
pub use dates::{parse_listing_date, within_lookback};
pub use links::resolve_link;

/// Minimum number of `<td>` cells a data row must carry.
pub const MIN_DATA_CELLS: usize = 4;
/// Cell holding the posting title (and its link).
pub const TITLE_CELL: usize = 1;
/// Cell holding the posting date.
pub const DATE_CELL: usize = 3;

/// One `<td>` as read from the page. Every field is optional because each
/// read can fail or time out on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCell {
    pub text: Option<String>,
    pub link_text: Option<String>,
    pub href: Option<String>,
}

impl RawCell {
    pub fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            ..Default::default()
        }
    }

    pub fn link(text: &str, href: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            link_text: Some(text.to_string()),
            href: Some(href.to_string()),
        }
    }
}

/// One `<tr>` as read from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    /// The row contains `<th>` cells
    pub is_header: bool,
    pub cells: Vec<RawCell>,
}

impl RawRow {
    pub fn data(cells: Vec<RawCell>) -> Self {
        Self {
            is_header: false,
            cells,
        }
    }

    pub fn header() -> Self {
        Self {
            is_header: true,
            cells: Vec::new(),
        }
    }
}

/// A parsed row of the listing table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRow {
    pub date: Option<NaiveDate>,
    /// Date cell text as it appeared on the page
    pub raw_date: String,
    pub title: String,
    pub link: String,
}

impl ListingRow {
    /// Date for display: `YYYY-MM-DD` when parsed, the raw cell text otherwise.
    pub fn display_date(&self) -> String {
        match self.date {
            Some(d) => d.format("%Y-%m-%d").to_string(),
            None => self.raw_date.clone(),
        }
    }

    pub fn matches_any(&self, keywords: &[String]) -> bool {
        keywords.iter().any(|k| self.title.contains(k.as_str()))
    }
}

/// A row that passed the keyword and recency filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedEntry {
    #[serde(rename = "날짜", serialize_with = "serialize_date")]
    pub date: NaiveDate,
    #[serde(rename = "제목")]
    pub title: String,
    #[serde(rename = "링크")]
    pub link: String,
}

fn serialize_date<S: serde::Serializer>(date: &NaiveDate, s: S) -> std::result::Result<S::Ok, S::Error> {
    s.collect_str(&date.format("%Y-%m-%d"))
}

/// Something that shows one page of listing rows at a time.
pub trait ListingSource {
    /// URL of the page currently shown, used to resolve relative links.
    fn current_url(&self) -> String;

    /// Read every `<tr>` of the current page's listing table.
    ///
    /// An `Err` means the page as a whole could not be read.
    fn read_rows(&mut self) -> Result<Vec<RawRow>>;

    /// Move to the next page. `false` means there is no next page.
    fn advance(&mut self) -> bool;
}

/// Turn a raw `<tr>` into a [`ListingRow`].
///
/// Header rows and rows with fewer than [`MIN_DATA_CELLS`] cells yield `None`.
pub fn extract_row(raw: &RawRow, page_url: &str) -> Option<ListingRow> {
    if raw.is_header || raw.cells.len() < MIN_DATA_CELLS {
        return None;
    }

    let title_cell = &raw.cells[TITLE_CELL];
    let title = title_cell
        .link_text
        .as_deref()
        .or(title_cell.text.as_deref())
        .unwrap_or_default()
        .trim()
        .to_string();
    let link = resolve_link(page_url, title_cell.href.as_deref());

    let raw_date = raw.cells[DATE_CELL]
        .text
        .as_deref()
        .unwrap_or_default()
        .trim()
        .to_string();
    let date = parse_listing_date(&raw_date);

    Some(ListingRow {
        date,
        raw_date,
        title,
        link,
    })
}

/// Extract every usable row of a page.
pub fn extract_rows(raw: &[RawRow], page_url: &str) -> Vec<ListingRow> {
    raw.iter().filter_map(|r| extract_row(r, page_url)).collect()
}
