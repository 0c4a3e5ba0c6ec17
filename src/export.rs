//! CSV and XLSX output for collected entries

use anyhow::{Context, Result};
use chrono::NaiveDate;
use csv::WriterBuilder;
use rust_xlsxwriter::{Format, Workbook};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::JobsError;
use crate::listing::CollectedEntry;

/// Column headers: date, title, link
pub const HEADERS: [&str; 3] = ["날짜", "제목", "링크"];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const FILE_PREFIX: &str = "kvma_jobs_list";
const SHEET_NAME: &str = "jobs";

/// Paths written for one search run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub csv: PathBuf,
    pub xlsx: PathBuf,
    pub rows: usize,
}

/// File stem for a run: `kvma_jobs_list_<YYYYMMDD>_<term>`.
pub fn output_stem(today: NaiveDate, term: &str) -> String {
    let term: String = term
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("{}_{}_{}", FILE_PREFIX, today.format("%Y%m%d"), term)
}

/// Write entries as UTF-8 CSV with a byte-order mark.
pub fn write_csv(path: &Path, entries: &[CollectedEntry]) -> Result<()> {
    let mut file = File::create(path)
        .map_err(JobsError::Io)
        .with_context(|| format!("Failed to create {:?}", path))?;
    file.write_all(UTF8_BOM).context("Failed to write CSV byte-order mark")?;

    let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
    writer.write_record(HEADERS).context("Failed to write CSV header")?;
    for entry in entries {
        writer.serialize(entry).context("Failed to write CSV row")?;
    }
    writer.flush().context("Failed to flush CSV")?;
    Ok(())
}

/// Write entries to a single-sheet XLSX workbook with a bold header row.
pub fn write_xlsx(path: &Path, entries: &[CollectedEntry]) -> Result<()> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, entry) in entries.iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_string(row, 0, entry.date.format("%Y-%m-%d").to_string())?;
        worksheet.write_string(row, 1, &entry.title)?;
        worksheet.write_string(row, 2, &entry.link)?;
    }
    worksheet.set_column_width(0, 12.0)?;
    worksheet.set_column_width(1, 60.0)?;
    worksheet.set_column_width(2, 50.0)?;

    workbook
        .save(path)
        .map_err(|e| JobsError::Export(e.to_string()))
        .with_context(|| format!("Failed to save {:?}", path))?;
    Ok(())
}

/// Write the CSV for a run and mirror it into XLSX, both under `dir`.
pub fn export_run(
    dir: &Path,
    today: NaiveDate,
    term: &str,
    entries: &[CollectedEntry],
) -> Result<ExportedFiles> {
    crate::config::ensure_output_dir(dir)?;
    let stem = output_stem(today, term);

    let csv = dir.join(format!("{}.csv", stem));
    write_csv(&csv, entries)?;
    info!("Saved {:?} ({} rows)", csv, entries.len());

    let xlsx = dir.join(format!("{}.xlsx", stem));
    write_xlsx(&xlsx, entries)?;
    info!("Saved {:?} ({} rows)", xlsx, entries.len());

    Ok(ExportedFiles {
        csv,
        xlsx,
        rows: entries.len(),
    })
}
