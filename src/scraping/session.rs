// Chrome browsing session
//
// Thin wrapper over a single headless_chrome tab exposing the handful of
// actions the site flow needs: navigate, click, fill, wait, read.

use anyhow::{Context, Result};
use headless_chrome::{Browser, Element, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use super::{Selector, Strategy, Target};
use crate::error::JobsError;

/// Pause after navigation so late XHRs finish before reading the page
const SETTLE_DELAY: Duration = Duration::from_millis(500);
/// Default wait for any single element lookup
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(3);

/// One browser with one tab
pub struct Session {
    _browser: Browser,
    tab: Arc<Tab>,
}

impl Session {
    /// Launch Chrome and open a tab. Headed unless `headless` is set.
    pub fn launch(headless: bool) -> Result<Self> {
        info!("Launching Chrome (headless: {})", headless);

        let options = LaunchOptions {
            headless,
            sandbox: false,
            args: vec![
                OsStr::new("--disable-dev-shm-usage"),
                OsStr::new("--window-size=1280,900"),
            ],
            ..Default::default()
        };

        let browser = Browser::new(options)
            .map_err(|e| JobsError::Browser(e.to_string()))
            .context("Failed to launch Chrome. Is Chrome/Chromium installed?")?;

        let tab = browser
            .new_tab()
            .map_err(|e| JobsError::Browser(e.to_string()))
            .context("Failed to create browser tab")?;
        tab.set_default_timeout(DEFAULT_TIMEOUT);

        Ok(Self {
            _browser: browser,
            tab,
        })
    }

    pub fn current_url(&self) -> String {
        self.tab.get_url()
    }

    pub fn goto(&self, url: &str) -> Result<()> {
        info!("Navigating to {}", url);
        self.tab
            .navigate_to(url)
            .with_context(|| format!("Failed to navigate to {}", url))?;
        self.wait_for_network_idle()
    }

    /// Block until the current navigation has finished loading.
    pub fn wait_for_network_idle(&self) -> Result<()> {
        self.tab
            .wait_until_navigated()
            .context("Timed out waiting for page load")?;
        Ok(())
    }

    /// Wait for the page to load, then give scripts a moment to finish.
    pub fn settle(&self) -> Result<()> {
        self.wait_for_network_idle()?;
        std::thread::sleep(SETTLE_DELAY);
        Ok(())
    }

    /// Wait up to `timeout` for an element matching `target`.
    pub fn find(&self, target: &Target, timeout: Duration) -> Result<Element<'_>> {
        let found = match target.selector() {
            Selector::Css(selector) => self.tab.wait_for_element_with_custom_timeout(selector, timeout),
            Selector::XPath(xpath) => self.tab.wait_for_xpath_with_custom_timeout(&xpath, timeout),
        };
        found.map_err(|e| JobsError::Navigation(format!("{} not found: {}", target, e)).into())
    }

    /// All elements matching a CSS selector; empty when nothing matches.
    pub fn find_all(&self, selector: &str) -> Vec<Element<'_>> {
        self.tab.find_elements(selector).unwrap_or_default()
    }

    pub fn click(&self, target: &Target, timeout: Duration) -> Result<()> {
        debug!("click {}", target);
        let element = self.find(target, timeout)?;
        element
            .click()
            .with_context(|| format!("Failed to click {}", target))?;
        Ok(())
    }

    /// Click `target` and wait for the resulting navigation.
    pub fn click_and_wait(&self, target: &Target, timeout: Duration) -> Result<()> {
        self.click(target, timeout)?;
        self.wait_for_network_idle()
    }

    /// Replace the value of an input field.
    pub fn fill(&self, target: &Target, value: &str, timeout: Duration) -> Result<()> {
        debug!("fill {}", target);
        let element = self.find(target, timeout)?;
        element
            .click()
            .with_context(|| format!("Failed to focus {}", target))?;
        element
            .call_js_fn(
                "function(v) { this.value = v; this.dispatchEvent(new Event('input', { bubbles: true })); }",
                vec![serde_json::json!(value)],
                false,
            )
            .with_context(|| format!("Failed to fill {}", target))?;
        Ok(())
    }

    /// Try each strategy in order; click the first one found within `timeout`
    /// and return its name.
    pub fn click_first(&self, strategies: &[Strategy], timeout: Duration) -> Option<&'static str> {
        for strategy in strategies {
            match self.click_and_wait(&strategy.target, timeout) {
                Ok(()) => {
                    debug!("strategy '{}' succeeded", strategy.name);
                    return Some(strategy.name);
                }
                Err(e) => debug!("strategy '{}' failed: {:#}", strategy.name, e),
            }
        }
        None
    }

    /// Elements for the first CSS strategy that matches anything, with its name.
    pub fn find_all_first(&self, strategies: &[Strategy]) -> Option<(&'static str, Vec<Element<'_>>)> {
        strategies.iter().find_map(|strategy| match strategy.target {
            Target::Css(selector) => {
                let found = self.find_all(selector);
                (!found.is_empty()).then_some((strategy.name, found))
            }
            _ => None,
        })
    }
}
