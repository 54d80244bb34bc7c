//! Human-readable dump of a loaded page set (`getinfo`).

use std::io::Write;

use anyhow::Result;
use itertools::Itertools;
use tracing::warn;

use crate::model::{CategoryGroup, PageId, PageSet};

pub fn dump_info(page_set: &PageSet, out: &mut impl Write) -> Result<()> {
    writeln!(out, "WikiPageSet:")?;
    for (page_type, ids) in page_set.pages_by_type() {
        writeln!(out, "  [{}]", page_type)?;
        let sorted = ids
            .iter()
            .map(|id| page_set.page(*id))
            .sorted_by(|a, b| a.fname.cmp(&b.fname));
        for page in sorted {
            writeln!(out, "    {}", page)?;
        }
    }
    writeln!(out, " category groups:")?;
    for group in page_set.category_groups().values() {
        dump_group(page_set, group, out)?;
    }
    Ok(())
}

fn dump_group(page_set: &PageSet, group: &CategoryGroup, out: &mut impl Write) -> Result<()> {
    let pages = page_set.pages();
    let fname = |id: &PageId| page_set.page(*id).fname.as_str();

    writeln!(out, "  [category group: {}]", group.name())?;
    for id in group.pages() {
        writeln!(out, "    {}", page_set.page(*id))?;
    }

    writeln!(out, "    first pages:")?;
    for first in group.find_firsts()? {
        writeln!(out, "      {}", page_set.page(first))?;
        match group.get_chain(first, pages) {
            Ok(chain) => writeln!(out, "         {:?}", chain.iter().map(fname).collect_vec())?,
            Err(err) => {
                warn!(%err, "skipping malformed chain");
                writeln!(out, "         <{}>", err)?;
            }
        }
    }

    writeln!(out, "    pages by subject:")?;
    for (subject, ids) in group.subjects() {
        write!(out, "      {}: ", subject)?;
        for id in ids {
            write!(out, " {}", fname(id))?;
        }
        writeln!(out)?;
    }

    match group.separate_real_and_redundant_pages(pages) {
        Ok((real, redundant)) => {
            writeln!(out, "    real pages:")?;
            for id in &real {
                writeln!(out, "         {}", fname(id))?;
            }
            writeln!(out, "    redundant pages:")?;
            for id in &redundant {
                writeln!(out, "         {}", fname(id))?;
            }
        }
        Err(err) => {
            warn!(%err, "cannot separate real and redundant pages");
            writeln!(out, "    real/redundant pages unavailable: {}", err)?;
        }
    }
    Ok(())
}
