use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::error::PageError;
use crate::model::PageInfo;
use crate::utils::{clean_page_url, clean_string};

static ANCHOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static EMPHASIS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("em").unwrap());
static CONTENT_TEXT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("#mw-content-text").unwrap());
static CONTENT_LTR: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".mw-content-ltr").unwrap());

static PREV_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"previous [0-9]+").unwrap());
static NEXT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"next [0-9]+").unwrap());

const EMPTY_MARKER: &str = "This category currently contains no pages or media";

/// One page of a (possibly paginated) category listing.
pub fn parse(title: &str, doc: &Html) -> Result<PageInfo, PageError> {
    let root = doc.root_element();
    let mut info = PageInfo {
        name: Some(title.replace("Category:", "")),
        prev: pagination_href(root, &PREV_RE),
        next: pagination_href(root, &NEXT_RE),
        ..Default::default()
    };

    let is_empty = root
        .select(&EMPHASIS)
        .any(|em| element_text(em) == EMPTY_MARKER);
    if is_empty {
        info.empty = Some(true);
        return Ok(info);
    }

    let content = root
        .select(&CONTENT_TEXT)
        .next()
        .ok_or(PageError::MissingNode {
            selector: "#mw-content-text",
        })?;
    // The container itself may carry the class; only descendants count.
    let table = content
        .select(&CONTENT_LTR)
        .find(|el| el.id() != content.id());
    if let Some(table) = table {
        let contents = table
            .select(&ANCHOR)
            .map(|a| clean_string(&element_text(a)))
            .collect();
        info.contents = Some(contents);
    }
    Ok(info)
}

fn pagination_href(root: ElementRef<'_>, pattern: &Regex) -> Option<String> {
    let anchor = root
        .select(&ANCHOR)
        .find(|a| pattern.is_match(&element_text(*a)))?;
    clean_page_url(anchor.value().attr("href"))
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect()
}
