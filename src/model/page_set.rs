use std::collections::{BTreeMap, HashMap};

use super::{CategoryGroup, Page, PageType};

/// Index of a page in its [`PageSet`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PageId(usize);

impl PageId {
    pub fn new(index: usize) -> Self {
        PageId(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Default)]
pub struct PageSet {
    pages: Vec<Page>,
    pages_by_filename: HashMap<String, PageId>,
    pages_by_type: BTreeMap<PageType, Vec<PageId>>,
    category_groups: BTreeMap<String, CategoryGroup>,
}

impl PageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pages in first-insertion order of their file names.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, id: PageId) -> &Page {
        &self.pages[id.index()]
    }

    #[allow(dead_code)]
    pub fn get(&self, fname: &str) -> Option<&Page> {
        self.pages_by_filename.get(fname).map(|&id| self.page(id))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn pages_by_type(&self) -> &BTreeMap<PageType, Vec<PageId>> {
        &self.pages_by_type
    }

    pub fn category_groups(&self) -> &BTreeMap<String, CategoryGroup> {
        &self.category_groups
    }

    /// Insert a page. A page with an already-known file name takes over the
    /// old page's slot and drops out of the old page's type bucket and group.
    pub fn add_page(&mut self, page: Page) -> PageId {
        let id = match self.pages_by_filename.get(&page.fname).copied() {
            Some(id) => {
                self.detach(id);
                self.pages[id.index()] = page;
                id
            }
            None => {
                let id = PageId::new(self.pages.len());
                self.pages_by_filename.insert(page.fname.clone(), id);
                self.pages.push(page);
                id
            }
        };

        let page = &self.pages[id.index()];
        self.pages_by_type.entry(page.page_type).or_default().push(id);
        if page.page_type == PageType::Category {
            let name = page.page_info.name.clone().unwrap_or_default();
            self.category_groups
                .entry(name.clone())
                .or_insert_with(|| CategoryGroup::new(name))
                .add_page(id, &page.fname);
        }
        id
    }

    fn detach(&mut self, id: PageId) {
        let old = &self.pages[id.index()];
        if let Some(bucket) = self.pages_by_type.get_mut(&old.page_type) {
            bucket.retain(|p| *p != id);
            if bucket.is_empty() {
                self.pages_by_type.remove(&old.page_type);
            }
        }
        if old.page_type == PageType::Category {
            let name = old.page_info.name.clone().unwrap_or_default();
            if let Some(group) = self.category_groups.get_mut(&name) {
                group.remove_page(id);
                if group.pages().is_empty() {
                    self.category_groups.remove(&name);
                }
            }
        }
    }

    /// Link chains and build subject indices for every category group.
    pub fn link_groups(&mut self) {
        for group in self.category_groups.values_mut() {
            group.link_pages(&self.pages);
            group.index_subjects(&self.pages);
        }
    }

    /// Mutable access for in-place cleaning; identity fields must not change.
    pub fn pages_mut(&mut self) -> impl Iterator<Item = &mut Page> {
        self.pages.iter_mut()
    }
}
