pub mod extract;
pub mod title;

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use scraper::{Html, Selector};
use tracing::{debug, info};

use crate::error::PageError;
use crate::model::{Page, PageSet};
use crate::settings::Settings;
use extract::ParserRegistry;
use title::TitleCleaner;

static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());

/// Turns wiki HTML files into [`Page`]s: title → type → info, computed eagerly.
#[derive(Debug, Clone, Default)]
pub struct PageLoader {
    titles: TitleCleaner,
    parsers: ParserRegistry,
}

impl PageLoader {
    pub fn new(titles: TitleCleaner, parsers: ParserRegistry) -> Self {
        PageLoader { titles, parsers }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let titles = TitleCleaner::new(&settings.site_token)
            .with_context(|| format!("invalid site token {:?}", settings.site_token))?;
        Ok(Self::new(titles, ParserRegistry::default()))
    }

    pub fn load_page(&self, fpath: &Path) -> Result<Page> {
        let html = std::fs::read_to_string(fpath)
            .with_context(|| format!("failed to read {}", fpath.display()))?;
        let page = self
            .parse_page(fpath, Html::parse_document(&html))
            .with_context(|| format!("failed to parse {}", fpath.display()))?;
        Ok(page)
    }

    pub fn parse_page(&self, fpath: &Path, doc: Html) -> Result<Page, PageError> {
        let raw_title = doc
            .root_element()
            .select(&TITLE)
            .next()
            .map(|t| t.text().collect::<String>())
            .ok_or_else(|| PageError::MissingTitle {
                fpath: fpath.to_path_buf(),
            })?;
        let title = self.titles.clean(&raw_title);
        let page_type = title::classify(&title);
        let page_info = self.parsers.parse_page_info(page_type, &title, &doc)?;
        debug!(title = %title, page_type = %page_type, "parsed page");
        Ok(Page::new(fpath, title, page_type, page_info, Some(doc)))
    }

    /// Load every file, then link and index the category groups.
    pub fn load_page_set(&self, fpaths: &[PathBuf]) -> Result<PageSet> {
        let pb = ProgressBar::new(fpaths.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")?
                .progress_chars("#>-"),
        );

        let mut page_set = PageSet::new();
        for fpath in fpaths {
            debug!("loading page {}", fpath.display());
            page_set.add_page(self.load_page(fpath)?);
            pb.inc(1);
        }
        pb.finish_and_clear();

        page_set.link_groups();
        info!(
            pages = page_set.len(),
            category_groups = page_set.category_groups().len(),
            "loaded page set"
        );
        Ok(page_set)
    }
}

/// Expand directory arguments to the HTML files directly inside them, sorted.
pub fn expand_inputs(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = std::fs::read_dir(path)
            .with_context(|| format!("failed to list {}", path.display()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && is_html(p))
            .collect();
        found.sort();
        files.extend(found);
    }
    Ok(files)
}

fn is_html(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("html") | Some("htm")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PageType;

    const FIXTURES: &str = "tests/fixtures";

    fn fixture(name: &str) -> PathBuf {
        Path::new(FIXTURES).join(name)
    }

    #[test]
    fn load_operator_page() {
        let page = PageLoader::default().load_page(&fixture("Noise_CHOP.html")).unwrap();
        assert_eq!(page.fname, "Noise_CHOP.html");
        assert_eq!(page.title, "Noise CHOP");
        assert_eq!(page.page_type, PageType::Chop);
        assert_eq!(page.page_info.name.as_deref(), Some("Noise CHOP"));
        assert!(page.doc().is_some());
    }

    #[test]
    fn load_tscript_page() {
        let page = PageLoader::default().load_page(&fixture("TScript_abs.html")).unwrap();
        assert_eq!(page.title, "TScript:abs");
        assert_eq!(page.page_type, PageType::TScriptExpr);
        assert_eq!(page.page_info.name.as_deref(), Some("abs"));
    }

    #[test]
    fn missing_title_is_an_error() {
        let doc = Html::parse_document("<html><body><p>untitled</p></body></html>");
        let err = PageLoader::default()
            .parse_page(Path::new("untitled.html"), doc)
            .unwrap_err();
        assert!(matches!(err, PageError::MissingTitle { .. }));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(PageLoader::default().load_page(&fixture("nope.html")).is_err());
    }

    #[test]
    fn expand_directory_to_sorted_html_files() {
        let files = expand_inputs(&[PathBuf::from(FIXTURES)]).unwrap();
        assert!(!files.is_empty());
        assert!(files.iter().all(|f| is_html(f)));
        let mut sorted = files.clone();
        sorted.sort();
        assert_eq!(files, sorted);

        let single = expand_inputs(&[fixture("Noise_CHOP.html")]).unwrap();
        assert_eq!(single, vec![fixture("Noise_CHOP.html")]);
    }

    #[test]
    fn page_set_links_paginated_category() {
        let files = vec![
            fixture("Category_CHOPs.html"),
            fixture("Category_CHOPs_2.html"),
            fixture("Noise_CHOP.html"),
        ];
        let set = PageLoader::default().load_page_set(&files).unwrap();
        assert_eq!(set.len(), 3);

        let group = &set.category_groups()["CHOPs"];
        let firsts = group.find_firsts().unwrap();
        assert_eq!(firsts.len(), 1);
        let chain = group.get_chain(firsts[0], set.pages()).unwrap();
        let names: Vec<&str> = chain.iter().map(|id| set.page(*id).fname.as_str()).collect();
        assert_eq!(names, vec!["Category_CHOPs.html", "Category_CHOPs_2.html"]);
        assert_eq!(group.subjects()["Noise CHOP"].len(), 2);
    }
}
