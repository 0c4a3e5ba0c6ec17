use clap::Parser;
use std::path::PathBuf;

use crate::config::Settings;

pub mod formatters;

#[derive(Parser, Debug)]
#[command(name = "kvma-jobs")]
#[command(
    version,
    about = "Collect recent KVMA veterinarian job postings into CSV/XLSX"
)]
#[command(
    long_about = "Logs into the KVMA member site, searches the veterinarian job board, keeps postings from the last 30 days whose title contains 1년차 or 인턴, and saves them to dated CSV and XLSX files.\n\nCredentials are read from KVMA_ID and KVMA_PW (a .env file is honoured)."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Settings file (TOML). Defaults to <config dir>/kvma-jobs/config.toml when present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for the CSV/XLSX output
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Run Chrome without a window
    #[arg(long)]
    pub headless: bool,

    /// Board search term; repeat to run several searches (replaces configured terms)
    #[arg(short = 't', long = "term")]
    pub terms: Vec<String>,
}

impl Cli {
    /// Overlay command-line values onto loaded settings.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(dir) = &self.output_dir {
            settings.output_dir = dir.clone();
        }
        if self.headless {
            settings.headless = true;
        }
        if !self.terms.is_empty() {
            settings.search_terms = self.terms.clone();
        }
    }
}
