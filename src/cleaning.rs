//! Boilerplate removal for MediaWiki monobook pages.

use std::sync::LazyLock;

use ego_tree::NodeId;
use scraper::{ElementRef, Html, Node, Selector};
use tracing::debug;

static BOILERPLATE_TAGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("meta, link, style").unwrap());
static BOILERPLATE_SELECTORS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("#globalWrapper > div:nth-of-type(1), .visualClear").unwrap());
static H1: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());

const BOILERPLATE_IDS: &[&str] = &[
    "top",
    "column-one",
    "siteSub",
    "contentSub",
    "jump-to-nav",
    "p-TouchDesigner_088",
    "catlinks",
    "footer",
    "mw-js-message",
];

const UNWRAP_IDS: &[&str] = &["globalWrapper", "column-content"];

/// Strip navigation, styling and wrapper markup from a page, in place.
/// Targets that are already gone are skipped, so cleaning twice is a no-op.
///
/// Queries start from the root element: the arena keeps detached nodes, and
/// only attached ones may match.
pub fn clean_page(doc: &mut Html) {
    remove_matching(doc, &BOILERPLATE_TAGS);
    remove_matching(doc, &BOILERPLATE_SELECTORS);
    for id in BOILERPLATE_IDS {
        remove_matching(doc, &id_selector(id));
    }

    if let Some(span) = sole_heading_span(doc) {
        unwrap_node(doc, span);
    }

    for id in UNWRAP_IDS {
        let wrapper = doc.root_element().select(&id_selector(id)).next().map(|el| el.id());
        if let Some(wrapper) = wrapper {
            unwrap_node(doc, wrapper);
        }
    }
}

/// The first `h1`'s span, if it is the heading's only content. Whitespace-only
/// text does not count as content.
fn sole_heading_span(doc: &Html) -> Option<NodeId> {
    let h1 = doc.root_element().select(&H1).next()?;
    let mut content = h1.children().filter(|node| match node.value() {
        Node::Text(text) => !text.trim().is_empty(),
        _ => true,
    });
    let only = content.next()?;
    if content.next().is_some() {
        return None;
    }
    let span = ElementRef::wrap(only)?;
    (span.value().name() == "span").then(|| span.id())
}

fn id_selector(id: &str) -> Selector {
    // Attribute form accepts ids that are not valid CSS identifiers.
    Selector::parse(&format!("[id=\"{}\"]", id)).unwrap()
}

fn remove_matching(doc: &mut Html, selector: &Selector) {
    let ids: Vec<NodeId> = doc.root_element().select(selector).map(|el| el.id()).collect();
    if !ids.is_empty() {
        debug!(count = ids.len(), "removing boilerplate nodes");
    }
    for id in ids {
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Replace a node by its children, keeping their order.
fn unwrap_node(doc: &mut Html, id: NodeId) {
    let Some(node) = doc.tree.get(id) else {
        return;
    };
    if node.parent().is_none() {
        return;
    }
    let children: Vec<NodeId> = node.children().map(|c| c.id()).collect();
    for child in children {
        if let Some(mut c) = doc.tree.get_mut(child) {
            c.detach();
        }
        if let Some(mut node) = doc.tree.get_mut(id) {
            node.insert_id_before(child);
        }
    }
    if let Some(mut node) = doc.tree.get_mut(id) {
        node.detach();
    }
}
