//! kvma-jobs - recent veterinarian job postings from the KVMA member site
//!
//! This library logs into the site with a Chrome session, pages through the
//! job board's search results newest-first, keeps keyword matches inside a
//! lookback window, and exports them to CSV and XLSX.

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod export;
pub mod listing;
pub mod scraping;
