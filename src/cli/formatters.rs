//! Output formatting module for CLI display
//!
//! Keeps terminal presentation of a search run apart from collection and export.

use colored::Colorize;
use tabled::{settings::Style, Table, Tabled};

use crate::export::ExportedFiles;
use crate::listing::{CollectedEntry, Collection};

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "날짜")]
    date: String,
    #[tabled(rename = "제목")]
    title: String,
    #[tabled(rename = "링크")]
    link: String,
}

impl From<&CollectedEntry> for EntryRow {
    fn from(entry: &CollectedEntry) -> Self {
        Self {
            date: entry.date.format("%Y-%m-%d").to_string(),
            title: entry.title.clone(),
            link: entry.link.clone(),
        }
    }
}

/// Summary and preview table for one search term
pub fn format_collection(term: &str, lookback_days: u32, keywords: &[String], collection: &Collection) -> String {
    let mut output = format!(
        "\n{} '{}' - last {} days & ({}): {} match(es) over {} page(s), stopped: {}\n",
        "[RESULT]".cyan().bold(),
        term,
        lookback_days,
        keywords.join("|"),
        collection.entries.len(),
        collection.pages_read,
        collection.stop
    );

    if collection.entries.is_empty() {
        output.push_str(&format!("  {}\n", "No matching postings".yellow()));
        return output;
    }

    let rows: Vec<EntryRow> = collection.entries.iter().map(EntryRow::from).collect();
    output.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    output.push('\n');
    output
}

/// One `[SAVE]` line per written file
pub fn format_saved(files: &ExportedFiles) -> String {
    [&files.csv, &files.xlsx]
        .iter()
        .map(|path| {
            format!(
                "{} {} ({} rows)\n",
                "[SAVE]".green().bold(),
                path.display(),
                files.rows
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::StopReason;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn collection(entries: Vec<CollectedEntry>) -> Collection {
        Collection {
            entries,
            pages_read: 2,
            stop: StopReason::OutOfWindow,
        }
    }

    #[test]
    fn test_collection_table_lists_entries() {
        colored::control::set_override(false);
        let entry = CollectedEntry {
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            title: "인턴 수의사 모집".to_string(),
            link: "https://www.kvma.or.kr/kvma/view.php?id=5".to_string(),
        };
        let out = format_collection("인턴", 30, &["1년차".to_string(), "인턴".to_string()], &collection(vec![entry]));

        assert!(out.contains("[RESULT] '인턴' - last 30 days & (1년차|인턴): 1 match(es) over 2 page(s)"));
        assert!(out.contains("2024-05-01"));
        assert!(out.contains("view.php?id=5"));
    }

    #[test]
    fn test_empty_collection_says_so() {
        colored::control::set_override(false);
        let out = format_collection("1년차", 30, &["1년차".to_string()], &collection(vec![]));
        assert!(out.contains("No matching postings"));
    }

    #[test]
    fn test_saved_lines() {
        colored::control::set_override(false);
        let files = ExportedFiles {
            csv: PathBuf::from("data/a.csv"),
            xlsx: PathBuf::from("data/a.xlsx"),
            rows: 3,
        };
        let out = format_saved(&files);
        assert_eq!(out, "[SAVE] data/a.csv (3 rows)\n[SAVE] data/a.xlsx (3 rows)\n");
    }
}
