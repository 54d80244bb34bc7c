//! Small string helpers shared by the page parsers.

use std::sync::LazyLock;

use regex::Regex;

static MULTI_SPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r" {2,}").unwrap());

/// Drop runs of two or more spaces entirely, then strip every newline.
///
/// Runs are removed, not collapsed: `"Name  \nExtra"` becomes `"NameExtra"`.
pub fn clean_string(s: &str) -> String {
    MULTI_SPACE_RE.replace_all(s, "").replace('\n', "")
}

/// Strip the query string from a wiki link, keeping everything left of the first `?`.
pub fn clean_page_url(url: Option<&str>) -> Option<String> {
    let url = url.filter(|u| !u.is_empty())?;
    Some(url.split('?').next().unwrap_or(url).to_string())
}
