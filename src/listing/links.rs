use tracing::debug;
use url::Url;

/// Path segment under which the site serves its board pages.
pub const SITE_PATH_SEGMENT: &str = "/kvma/";

/// Site root (scheme + host + port, no trailing slash) for a page URL.
pub fn site_root(page_url: &str) -> Option<String> {
    let url = Url::parse(page_url).ok()?;
    let origin = url.origin();
    origin.is_tuple().then(|| origin.ascii_serialization())
}

/// Resolve an `href` read from a listing row into an absolute URL.
///
/// - empty or missing → empty string
/// - `http…` → unchanged
/// - `/path` → `<root>/path`
/// - `path` → `<root>/kvma/path`
pub fn resolve_link(page_url: &str, href: Option<&str>) -> String {
    let href = match href.map(str::trim) {
        Some(h) if !h.is_empty() => h,
        _ => return String::new(),
    };
    if href.starts_with("http") {
        return href.to_string();
    }
    let Some(root) = site_root(page_url) else {
        debug!("Cannot resolve {:?} against page URL {:?}", href, page_url);
        return href.to_string();
    };
    if href.starts_with('/') {
        format!("{}{}", root, href)
    } else {
        format!("{}{}{}", root, SITE_PATH_SEGMENT, href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://www.kvma.or.kr/kvma/board.php?bo_table=job&page=2";
    const ROOT: &str = "https://www.kvma.or.kr";

    #[test]
    fn test_rooted_link_joins_site_root() {
        assert_eq!(
            resolve_link(PAGE, Some("/kvma/view.php?id=5")),
            format!("{}/kvma/view.php?id=5", ROOT)
        );
    }

    #[test]
    fn test_relative_link_joins_board_segment() {
        assert_eq!(
            resolve_link(PAGE, Some("view.php?id=5")),
            format!("{}/kvma/view.php?id=5", ROOT)
        );
    }

    #[test]
    fn test_board_segment_in_query_does_not_shift_root() {
        let page = "https://www.kvma.or.kr/bbs/list.php?return=/kvma/main";
        assert_eq!(
            resolve_link(page, Some("/kvma/view.php?id=5")),
            format!("{}/kvma/view.php?id=5", ROOT)
        );
        assert_eq!(
            resolve_link(page, Some("view.php?id=5")),
            format!("{}/kvma/view.php?id=5", ROOT)
        );
    }

    #[test]
    fn test_absolute_link_passes_through() {
        let abs = "https://example.com/kvma/view.php?id=9";
        assert_eq!(resolve_link(PAGE, Some(abs)), abs);
    }

    #[test]
    fn test_missing_href_is_empty() {
        assert_eq!(resolve_link(PAGE, None), "");
        assert_eq!(resolve_link(PAGE, Some("   ")), "");
    }

    #[test]
    fn test_site_root_is_origin() {
        assert_eq!(site_root("https://www.kvma.or.kr/index.php").as_deref(), Some(ROOT));
        assert_eq!(site_root("https://www.kvma.or.kr/").as_deref(), Some(ROOT));
        assert_eq!(site_root("https://www.kvma.or.kr").as_deref(), Some(ROOT));
        assert_eq!(
            site_root("http://localhost:8080/kvma/board.php").as_deref(),
            Some("http://localhost:8080")
        );
    }

    #[test]
    fn test_unparseable_page_url_keeps_href() {
        assert_eq!(site_root("about:blank"), None);
        assert_eq!(resolve_link("not a url", Some("view.php?id=5")), "view.php?id=5");
    }
}
