// Browser automation for the KVMA member site
// Uses a Chrome session because the job board sits behind a login form

pub mod kvma;
pub mod session;

use std::fmt;

pub use kvma::KvmaListing;
pub use session::Session;

/// How to locate an element on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// CSS selector
    Css(&'static str),
    /// Any element whose own text contains the string
    Text(&'static str),
    /// An `<a>` whose visible text contains the string
    LinkText(&'static str),
}

/// Query handed to the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Css(&'static str),
    XPath(String),
}

impl Target {
    pub fn selector(&self) -> Selector {
        match self {
            Target::Css(sel) => Selector::Css(*sel),
            Target::Text(text) => Selector::XPath(format!(
                "//body//*[not(self::script) and not(self::style)][contains(normalize-space(text()), {})]",
                xpath_literal(text)
            )),
            Target::LinkText(text) => Selector::XPath(format!(
                "//a[contains(normalize-space(.), {})]",
                xpath_literal(text)
            )),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Target::Css(sel) => write!(f, "css={}", sel),
            Target::Text(text) => write!(f, "text={}", text),
            Target::LinkText(text) => write!(f, "link={}", text),
        }
    }
}

/// A named way of finding an element, tried in rank order with its peers.
#[derive(Debug, Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub target: Target,
}

impl Strategy {
    pub const fn new(name: &'static str, target: Target) -> Self {
        Self { name, target }
    }
}

/// Quote a string for use inside an XPath expression.
fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        format!("'{}'", text)
    } else if !text.contains('"') {
        format!("\"{}\"", text)
    } else {
        let parts: Vec<String> = text.split('\'').map(|p| format!("'{}'", p)).collect();
        format!("concat({})", parts.join(", \"'\", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_target_passes_selector_through() {
        assert_eq!(Target::Css("#findtext").selector(), Selector::Css("#findtext"));
    }

    #[test]
    fn test_link_text_xpath() {
        assert_eq!(
            Target::LinkText("Next").selector(),
            Selector::XPath("//a[contains(normalize-space(.), 'Next')]".to_string())
        );
    }

    #[test]
    fn test_text_xpath_skips_scripts() {
        let Selector::XPath(xpath) = Target::Text("다음").selector() else {
            panic!("text target should produce xpath");
        };
        assert!(xpath.contains("not(self::script)"));
        assert!(xpath.ends_with("'다음')]"));
    }

    #[test]
    fn test_xpath_literal_quoting() {
        assert_eq!(xpath_literal("abc"), "'abc'");
        assert_eq!(xpath_literal("it's"), "\"it's\"");
        assert_eq!(xpath_literal("a'b\"c"), "concat('a', \"'\", 'b\"c')");
    }

    #[test]
    fn test_target_display() {
        assert_eq!(Target::Text("채용매매").to_string(), "text=채용매매");
        assert_eq!(Target::Css("#username").to_string(), "css=#username");
    }
}
