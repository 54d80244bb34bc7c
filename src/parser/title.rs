use std::sync::LazyLock;

use regex::Regex;

use crate::model::PageType;
use crate::settings::DEFAULT_SITE_TOKEN;

static PY_CLASS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]+ Class").unwrap());
static PY_MODULE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9] Module").unwrap());

const OPERATOR_SUFFIXES: &[(&str, PageType)] = &[
    (" CHOP", PageType::Chop),
    (" SOP", PageType::Sop),
    (" COMP", PageType::Comp),
    (" MAT", PageType::Mat),
    (" TOP", PageType::Top),
    (" DAT", PageType::Dat),
];

/// Strips the `" - <site token> Wiki"` suffix from page titles.
#[derive(Debug, Clone)]
pub struct TitleCleaner {
    suffix_re: Regex,
}

impl TitleCleaner {
    pub fn new(site_token: &str) -> Result<Self, regex::Error> {
        let token = site_token
            .split_whitespace()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(r"\s+");
        let suffix_re = Regex::new(&format!(r"\s+-\s+{}\s*Wiki", token))?;
        Ok(TitleCleaner { suffix_re })
    }

    /// Repeats until nothing matches: removing an inner suffix can expose an
    /// outer one.
    pub fn clean(&self, raw: &str) -> String {
        let mut title = raw.trim().to_string();
        loop {
            let stripped = self.suffix_re.replace_all(&title, "").trim().to_string();
            if stripped == title {
                return title;
            }
            title = stripped;
        }
    }
}

impl Default for TitleCleaner {
    fn default() -> Self {
        TitleCleaner::new(DEFAULT_SITE_TOKEN).expect("default site token is a valid pattern")
    }
}

/// Map a cleaned title to its page type. Rules are ordered; the first match wins.
pub fn classify(title: &str) -> PageType {
    if title.starts_with("Category:") {
        return PageType::Category;
    }
    if PY_CLASS_RE.is_match(title) {
        return PageType::PyClass;
    }
    if PY_MODULE_RE.is_match(title) {
        return PageType::PyModule;
    }
    if title.starts_with("TScript:") {
        return if title.ends_with(" Command") {
            PageType::TScriptCmd
        } else {
            PageType::TScriptExpr
        };
    }
    if title.ends_with(" Command") {
        return PageType::TScriptCmd;
    }
    if let Some((_, page_type)) = OPERATOR_SUFFIXES
        .iter()
        .find(|(suffix, _)| title.ends_with(suffix))
    {
        return *page_type;
    }
    if title.ends_with(" Vid") {
        return PageType::Video;
    }
    PageType::Other
}
