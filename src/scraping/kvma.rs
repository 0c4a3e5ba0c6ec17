// KVMA (대한수의사회) member site flow
//
// Login, menu navigation to the veterinarian job board, keyword search, and
// a ListingSource over the search results table.

use anyhow::{Context, Result};
use headless_chrome::Element;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::session::Session;
use super::{Strategy, Target};
use crate::config::Credentials;
use crate::error::JobsError;
use crate::listing::{ListingSource, RawCell, RawRow, DATE_CELL, TITLE_CELL};

pub const HOME_URL: &str = "https://www.kvma.or.kr/";

const USERNAME_INPUT: Target = Target::Css("#username");
const PASSWORD_INPUT: Target = Target::Css("#password");
const LOGIN_BUTTON: Target = Target::Css("#ct > div > div > ul > form > button");

const MENU_RECRUITMENT: Target = Target::Text("채용매매");
const MENU_VET_WANTED: Target = Target::Text("수의사 구인");

const SEARCH_INPUT: Target = Target::Css("#findtext");
const SEARCH_BUTTON: Target =
    Target::Css("#ct > div > div.content > div.srch-bx.text-right.form-inline > input.btn.bg-blue");

/// Where the results table rows live, most specific first
pub const ROW_STRATEGIES: &[Strategy] = &[
    Strategy::new("list form table", Target::Css("#listform table tbody tr")),
    Strategy::new("any table body", Target::Css("table.tb tbody tr, table tbody tr")),
];

/// Ways to reach the next results page, in preference order
pub const NEXT_PAGE_STRATEGIES: &[Strategy] = &[
    Strategy::new("다음 label", Target::Text("다음")),
    Strategy::new("> link", Target::LinkText(">")),
    Strategy::new("Next link", Target::LinkText("Next")),
];

const FILL_TIMEOUT: Duration = Duration::from_secs(3);
const CLICK_TIMEOUT: Duration = Duration::from_secs(3);
const NEXT_PAGE_TIMEOUT: Duration = Duration::from_millis(1500);
/// The login redirect does not trigger a detectable navigation; wait it out
const LOGIN_WAIT: Duration = Duration::from_secs(5);
/// Pause between typing into fields
const TYPING_PAUSE: Duration = Duration::from_millis(500);

/// Open the home page and submit the login form.
pub fn login(session: &Session, credentials: &Credentials) -> Result<()> {
    session.goto(HOME_URL).context("Failed to open KVMA home page")?;

    session
        .fill(&USERNAME_INPUT, &credentials.id, FILL_TIMEOUT)
        .context("Login form not available")?;
    std::thread::sleep(TYPING_PAUSE);
    session
        .fill(&PASSWORD_INPUT, credentials.secret(), FILL_TIMEOUT)
        .context("Login form not available")?;
    std::thread::sleep(TYPING_PAUSE);

    session
        .click(&LOGIN_BUTTON, CLICK_TIMEOUT)
        .context("Failed to submit login form")?;
    std::thread::sleep(LOGIN_WAIT);

    info!("Current URL after login: {}", session.current_url());
    Ok(())
}

/// Walk the menu from the landing page to the veterinarian job board.
pub fn open_job_board(session: &Session) -> Result<()> {
    for menu in [MENU_RECRUITMENT, MENU_VET_WANTED] {
        session
            .click_and_wait(&menu, CLICK_TIMEOUT)
            .map_err(|e| JobsError::Navigation(format!("{:#}", e)))
            .with_context(|| format!("Failed to open menu {}", menu))?;
        info!("{} page URL: {}", menu, session.current_url());
    }
    Ok(())
}

/// Run a board search for `term` and wait for the results page.
pub fn search(session: &Session, term: &str) -> Result<()> {
    info!("Searching job board for '{}'", term);
    session
        .fill(&SEARCH_INPUT, term, FILL_TIMEOUT)
        .context("Search box not available")?;
    session
        .click_and_wait(&SEARCH_BUTTON, CLICK_TIMEOUT)
        .with_context(|| format!("Search for '{}' did not load", term))?;
    Ok(())
}

/// Search results as seen through the browser tab
pub struct KvmaListing<'a> {
    session: &'a Session,
}

impl<'a> KvmaListing<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }
}

impl ListingSource for KvmaListing<'_> {
    fn current_url(&self) -> String {
        self.session.current_url()
    }

    fn read_rows(&mut self) -> Result<Vec<RawRow>> {
        self.session.settle().context("Results page never finished loading")?;

        let Some((strategy, rows)) = self.session.find_all_first(ROW_STRATEGIES) else {
            debug!("No listing table rows found");
            return Ok(Vec::new());
        };
        debug!("Found {} table rows via '{}'", rows.len(), strategy);

        Ok(rows.iter().map(read_raw_row).collect())
    }

    fn advance(&mut self) -> bool {
        match self.session.click_first(NEXT_PAGE_STRATEGIES, NEXT_PAGE_TIMEOUT) {
            Some(name) => {
                debug!("Moved to next page via '{}'", name);
                true
            }
            None => {
                warn!("No next-page control found");
                false
            }
        }
    }
}

/// Read the cells the collector cares about; every failed read leaves its field empty.
fn read_raw_row(tr: &Element<'_>) -> RawRow {
    let is_header = tr
        .find_elements("th")
        .map(|th| !th.is_empty())
        .unwrap_or(false);
    if is_header {
        return RawRow::header();
    }

    let tds = tr.find_elements("td").unwrap_or_default();
    let cells = tds
        .iter()
        .enumerate()
        .map(|(idx, td)| match idx {
            TITLE_CELL => read_title_cell(td),
            DATE_CELL => RawCell {
                text: td.get_inner_text().ok(),
                ..Default::default()
            },
            _ => RawCell::default(),
        })
        .collect();

    RawRow::data(cells)
}

fn read_title_cell(td: &Element<'_>) -> RawCell {
    let anchor = td.find_element("a").ok();
    RawCell {
        text: td.get_inner_text().ok(),
        link_text: anchor.as_ref().and_then(|a| a.get_inner_text().ok()),
        href: anchor
            .as_ref()
            .and_then(|a| a.get_attribute_value("href").ok().flatten()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(strategies: &[Strategy]) -> Vec<&'static str> {
        strategies.iter().map(|s| s.name).collect()
    }

    #[test]
    fn test_next_page_strategies_keep_rank_order() {
        assert_eq!(names(NEXT_PAGE_STRATEGIES), vec!["다음 label", "> link", "Next link"]);
        assert_eq!(NEXT_PAGE_STRATEGIES[0].target, Target::Text("다음"));
        assert_eq!(NEXT_PAGE_STRATEGIES[1].target, Target::LinkText(">"));
    }

    #[test]
    fn test_row_strategies_prefer_list_form() {
        assert_eq!(names(ROW_STRATEGIES), vec!["list form table", "any table body"]);
        assert_eq!(ROW_STRATEGIES[0].target, Target::Css("#listform table tbody tr"));
    }
}
