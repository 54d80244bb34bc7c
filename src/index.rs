use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::model::{CategoryGroup, PageInfo, PageSet, PageType};

#[derive(Debug, Serialize)]
pub struct PageEntry<'a> {
    pub fpath: String,
    pub fname: &'a str,
    pub title: &'a str,
    #[serde(rename = "pageType")]
    pub page_type: PageType,
    #[serde(rename = "pageInfo")]
    pub page_info: &'a PageInfo,
    /// Serialized markup after cleaning.
    pub html: String,
}

#[derive(Debug, Serialize)]
pub struct GroupEntry<'a> {
    pub name: &'a str,
    pub pages: Vec<&'a str>,
    pub subjects: BTreeMap<&'a str, Vec<&'a str>>,
}

#[derive(Debug, Serialize)]
pub struct PageSetIndex<'a> {
    pub pages: Vec<PageEntry<'a>>,
    #[serde(rename = "pageTypes")]
    pub page_types: BTreeMap<PageType, Vec<&'a str>>,
    #[serde(rename = "categoryGroups")]
    pub category_groups: BTreeMap<&'a str, GroupEntry<'a>>,
}

pub fn build_index(page_set: &PageSet) -> Result<PageSetIndex<'_>> {
    let pages = page_set
        .pages()
        .iter()
        .map(|page| -> Result<PageEntry> {
            Ok(PageEntry {
                fpath: page.fpath.display().to_string(),
                fname: &page.fname,
                title: &page.title,
                page_type: page.page_type,
                page_info: &page.page_info,
                html: page.markup()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let page_types = page_set
        .pages_by_type()
        .iter()
        .map(|(page_type, ids)| {
            let fnames: Vec<&str> = ids.iter().map(|id| page_set.page(*id).fname.as_str()).collect();
            (*page_type, fnames)
        })
        .collect();

    let category_groups = page_set
        .category_groups()
        .iter()
        .map(|(name, group)| (name.as_str(), group_entry(page_set, group)))
        .collect();

    Ok(PageSetIndex {
        pages,
        page_types,
        category_groups,
    })
}

fn group_entry<'a>(page_set: &'a PageSet, group: &'a CategoryGroup) -> GroupEntry<'a> {
    let subjects = group
        .subjects()
        .iter()
        .map(|(subject, ids)| {
            let fnames: Vec<&str> = ids.iter().map(|id| page_set.page(*id).fname.as_str()).collect();
            (subject.as_str(), fnames)
        })
        .collect();
    GroupEntry {
        name: group.name(),
        pages: group.filenames(page_set.pages()).collect(),
        subjects,
    }
}

/// Write the index as JSON: two-space indent, object keys sorted.
pub fn write_index(page_set: &PageSet, path: &Path) -> Result<()> {
    let index = build_index(page_set)?;
    // Round-trip through `Value` so every object, including page info, gets sorted keys.
    let value = serde_json::to_value(&index)?;
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, &value)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}
