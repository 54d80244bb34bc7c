use std::collections::{BTreeMap, HashMap, HashSet};

use tracing::info;

use super::page_set::PageId;
use super::Page;
use crate::error::GroupError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChainLink {
    pub prev: Option<PageId>,
    pub next: Option<PageId>,
}

/// All category pages sharing one display name, possibly spread over several
/// paginated chains.
#[derive(Debug, Clone)]
pub struct CategoryGroup {
    name: String,
    pages: Vec<PageId>,
    pages_by_filename: BTreeMap<String, PageId>,
    links: Option<HashMap<PageId, ChainLink>>,
    subjects: BTreeMap<String, Vec<PageId>>,
}

impl CategoryGroup {
    pub fn new(name: impl Into<String>) -> Self {
        CategoryGroup {
            name: name.into(),
            pages: Vec::new(),
            pages_by_filename: BTreeMap::new(),
            links: None,
            subjects: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pages(&self) -> &[PageId] {
        &self.pages
    }

    /// Member file names in insertion order.
    pub fn filenames<'a>(&'a self, arena: &'a [Page]) -> impl Iterator<Item = &'a str> {
        self.pages.iter().map(|id| arena[id.index()].fname.as_str())
    }

    pub fn subjects(&self) -> &BTreeMap<String, Vec<PageId>> {
        &self.subjects
    }

    pub fn add_page(&mut self, id: PageId, fname: &str) {
        self.pages.push(id);
        self.pages_by_filename.insert(fname.to_string(), id);
    }

    pub(crate) fn remove_page(&mut self, id: PageId) {
        self.pages.retain(|p| *p != id);
        self.pages_by_filename.retain(|_, p| *p != id);
    }

    /// Resolve each member's `prev`/`next` file names against this group.
    /// Names that are absent or point outside the group resolve to `None`.
    pub fn link_pages(&mut self, arena: &[Page]) {
        let resolve = |target: Option<&String>| {
            target.and_then(|fname| self.pages_by_filename.get(fname).copied())
        };
        let links = self
            .pages
            .iter()
            .map(|&id| {
                let info = &arena[id.index()].page_info;
                let link = ChainLink {
                    prev: resolve(info.prev.as_ref()),
                    next: resolve(info.next.as_ref()),
                };
                (id, link)
            })
            .collect();
        self.links = Some(links);
    }

    pub fn index_subjects(&mut self, arena: &[Page]) {
        self.subjects.clear();
        for &id in &self.pages {
            let Some(contents) = &arena[id.index()].page_info.contents else {
                continue;
            };
            for subject in contents {
                self.subjects.entry(subject.clone()).or_default().push(id);
            }
        }
    }

    fn links(&self) -> Result<&HashMap<PageId, ChainLink>, GroupError> {
        self.links.as_ref().ok_or_else(|| GroupError::NotLinked {
            group: self.name.clone(),
        })
    }

    #[allow(dead_code)]
    pub fn link(&self, id: PageId) -> Result<ChainLink, GroupError> {
        Ok(self.links()?.get(&id).copied().unwrap_or_default())
    }

    /// Chain heads: members with no resolved `prev` page.
    pub fn find_firsts(&self) -> Result<Vec<PageId>, GroupError> {
        let links = self.links()?;
        Ok(self
            .pages
            .iter()
            .copied()
            .filter(|id| links.get(id).map_or(true, |l| l.prev.is_none()))
            .collect())
    }

    /// Walk `next` links from `first` until the chain ends.
    pub fn get_chain(&self, first: PageId, arena: &[Page]) -> Result<Vec<PageId>, GroupError> {
        let links = self.links()?;
        let mut seen = HashSet::new();
        let mut chain = Vec::new();
        let mut current = Some(first);
        while let Some(id) = current {
            if !seen.insert(id) {
                return Err(GroupError::MalformedChain {
                    group: self.name.clone(),
                    fname: arena[id.index()].fname.clone(),
                });
            }
            chain.push(id);
            current = links.get(&id).and_then(|l| l.next);
        }
        Ok(chain)
    }

    /// Split members into the canonical chain and duplicate scrapes.
    ///
    /// With several heads, the head whose chain is shortest wins; the first
    /// such head wins ties.
    pub fn separate_real_and_redundant_pages(
        &self,
        arena: &[Page],
    ) -> Result<(Vec<PageId>, Vec<PageId>), GroupError> {
        let firsts = self.find_firsts()?;
        if firsts.len() <= 1 {
            return Ok((self.pages.clone(), Vec::new()));
        }

        let chains = firsts
            .iter()
            .map(|&first| self.get_chain(first, arena))
            .collect::<Result<Vec<_>, _>>()?;
        let shortest = chains
            .iter()
            .enumerate()
            .min_by_key(|(_, chain)| chain.len())
            .map(|(i, _)| i)
            .unwrap_or(0);

        let mut real = Vec::new();
        let mut redundant = Vec::new();
        for (i, chain) in chains.into_iter().enumerate() {
            if i == shortest {
                real = chain;
            } else {
                redundant.extend(chain);
            }
        }
        info!(
            group = %self.name,
            "found {}/{} real pages and {}/{} redundant pages",
            real.len(),
            self.pages.len(),
            redundant.len(),
            self.pages.len()
        );
        Ok((real, redundant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::test_support::category_page;

    fn group_of(pages: &[Page]) -> CategoryGroup {
        let mut group = CategoryGroup::new("CHOPs");
        for (i, page) in pages.iter().enumerate() {
            group.add_page(PageId::new(i), &page.fname);
        }
        group.link_pages(pages);
        group
    }

    fn fnames(ids: &[PageId], pages: &[Page]) -> Vec<String> {
        ids.iter().map(|id| pages[id.index()].fname.clone()).collect()
    }

    /// `len` pages chained `<prefix>0 -> <prefix>1 -> ...`.
    fn chain_pages(prefix: &str, len: usize) -> Vec<Page> {
        (0..len)
            .map(|i| {
                let fname = format!("{}{}.html", prefix, i);
                let prev = (i > 0).then(|| format!("{}{}.html", prefix, i - 1));
                let next = (i + 1 < len).then(|| format!("{}{}.html", prefix, i + 1));
                category_page(&fname, "CHOPs", prev.as_deref(), next.as_deref())
            })
            .collect()
    }

    #[test]
    fn links_resolve_within_group() {
        let pages = vec![
            category_page("A.html", "CHOPs", None, Some("B.html")),
            category_page("B.html", "CHOPs", Some("A.html"), None),
        ];
        let group = group_of(&pages);
        let a = group.link(PageId::new(0)).unwrap();
        assert_eq!(a.prev, None);
        assert_eq!(a.next, Some(PageId::new(1)));
        let chain = group.get_chain(PageId::new(0), &pages).unwrap();
        assert_eq!(fnames(&chain, &pages), vec!["A.html", "B.html"]);
    }

    #[test]
    fn unresolved_link_becomes_none() {
        let pages = vec![category_page("A.html", "CHOPs", Some("Missing.html"), Some("Gone.html"))];
        let group = group_of(&pages);
        assert_eq!(group.link(PageId::new(0)).unwrap(), ChainLink::default());
        assert_eq!(group.find_firsts().unwrap(), vec![PageId::new(0)]);
    }

    #[test]
    fn isolated_page_is_singleton_chain() {
        let pages = vec![category_page("Solo.html", "CHOPs", None, None)];
        let group = group_of(&pages);
        let chain = group.get_chain(PageId::new(0), &pages).unwrap();
        assert_eq!(chain, vec![PageId::new(0)]);
    }

    #[test]
    fn links_unavailable_before_linking() {
        let mut group = CategoryGroup::new("CHOPs");
        group.add_page(PageId::new(0), "A.html");
        assert_eq!(
            group.find_firsts(),
            Err(GroupError::NotLinked { group: "CHOPs".into() })
        );
    }

    #[test]
    fn cycle_is_reported_not_followed() {
        let pages = vec![
            category_page("A.html", "CHOPs", None, Some("B.html")),
            category_page("B.html", "CHOPs", Some("A.html"), Some("C.html")),
            category_page("C.html", "CHOPs", Some("B.html"), Some("B.html")),
        ];
        let group = group_of(&pages);
        let err = group.get_chain(PageId::new(0), &pages).unwrap_err();
        assert_eq!(
            err,
            GroupError::MalformedChain {
                group: "CHOPs".into(),
                fname: "B.html".into()
            }
        );
    }

    #[test]
    fn single_head_means_all_real() {
        let pages = chain_pages("p", 4);
        let group = group_of(&pages);
        let (real, redundant) = group.separate_real_and_redundant_pages(&pages).unwrap();
        assert_eq!(real.len(), 4);
        assert!(redundant.is_empty());
    }

    #[test]
    fn shortest_chain_wins_with_multiple_heads() {
        let mut pages = chain_pages("long", 5);
        pages.extend(chain_pages("short", 3));
        let group = group_of(&pages);
        assert_eq!(group.find_firsts().unwrap().len(), 2);

        let (real, redundant) = group.separate_real_and_redundant_pages(&pages).unwrap();
        assert_eq!(
            fnames(&real, &pages),
            vec!["short0.html", "short1.html", "short2.html"]
        );
        assert_eq!(redundant.len(), 5);
        assert!(fnames(&redundant, &pages).iter().all(|f| f.starts_with("long")));
    }

    #[test]
    fn filenames_follow_insertion_order() {
        let pages = vec![
            category_page("Category_SOPs_full.html", "SOPs", None, None),
            category_page("Category_SOPs.html", "SOPs", None, None),
        ];
        let group = group_of(&pages);
        assert_eq!(
            group.filenames(&pages).collect::<Vec<_>>(),
            vec!["Category_SOPs_full.html", "Category_SOPs.html"]
        );
    }

    #[test]
    fn subjects_keep_field_order_and_duplicates() {
        let mut pages = chain_pages("p", 2);
        pages[0].page_info.contents = Some(vec!["Noise CHOP".into(), "Wave CHOP".into()]);
        pages[1].page_info.contents = Some(vec!["Noise CHOP".into()]);
        let mut group = group_of(&pages);
        group.index_subjects(&pages);
        assert_eq!(
            group.subjects()["Noise CHOP"],
            vec![PageId::new(0), PageId::new(1)]
        );
        assert_eq!(group.subjects()["Wave CHOP"], vec![PageId::new(0)]);
    }
}
