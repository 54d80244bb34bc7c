pub mod category;
pub mod page_set;

use std::fmt;
use std::path::{Path, PathBuf};

use scraper::Html;
use serde::{Deserialize, Serialize};

use crate::cleaning;
use crate::error::PageError;

pub use category::CategoryGroup;
pub use page_set::{PageId, PageSet};

/// Page kind, derived from the title by [`crate::parser::title::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Category,
    PyClass,
    PyModule,
    TScriptCmd,
    TScriptExpr,
    Chop,
    Sop,
    Comp,
    Mat,
    Top,
    Dat,
    Video,
    Other,
}

impl PageType {
    pub const OPERATOR_FAMILIES: [PageType; 6] = [
        PageType::Chop,
        PageType::Sop,
        PageType::Comp,
        PageType::Mat,
        PageType::Top,
        PageType::Dat,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageType::Category => "category",
            PageType::PyClass => "pyclass",
            PageType::PyModule => "pymodule",
            PageType::TScriptCmd => "tscriptcmd",
            PageType::TScriptExpr => "tscriptexpr",
            PageType::Chop => "chop",
            PageType::Sop => "sop",
            PageType::Comp => "comp",
            PageType::Mat => "mat",
            PageType::Top => "top",
            PageType::Dat => "dat",
            PageType::Video => "video",
            PageType::Other => "other",
        }
    }
}

impl fmt::Display for PageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-dependent metadata pulled from a page's title and markup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty: Option<bool>,
    #[serde(rename = "subType", skip_serializing_if = "Option::is_none")]
    pub sub_type: Option<String>,
}

impl fmt::Display for PageInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[derive(Debug, Clone)]
pub struct Page {
    pub fpath: PathBuf,
    pub fname: String,
    pub title: String,
    pub page_type: PageType,
    pub page_info: PageInfo,
    doc: Option<Html>,
}

impl Page {
    pub fn new(
        fpath: impl Into<PathBuf>,
        title: impl Into<String>,
        page_type: PageType,
        page_info: PageInfo,
        doc: Option<Html>,
    ) -> Self {
        let fpath = fpath.into();
        let fname = file_name(&fpath);
        Page {
            fpath,
            fname,
            title: title.into(),
            page_type,
            page_info,
            doc,
        }
    }

    #[allow(dead_code)]
    pub fn doc(&self) -> Option<&Html> {
        self.doc.as_ref()
    }

    fn require_doc(&mut self) -> Result<&mut Html, PageError> {
        let fname = &self.fname;
        self.doc.as_mut().ok_or_else(|| PageError::MarkupNotLoaded {
            fname: fname.clone(),
        })
    }

    pub fn clean(&mut self) -> Result<(), PageError> {
        cleaning::clean_page(self.require_doc()?);
        Ok(())
    }

    /// Serialized markup, as it stands after any cleaning.
    pub fn markup(&self) -> Result<String, PageError> {
        self.doc
            .as_ref()
            .map(|doc| doc.html())
            .ok_or_else(|| PageError::MarkupNotLoaded {
                fname: self.fname.clone(),
            })
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WikiPage(fname: {}, pageType: {}, title: {}, info: {})",
            self.fname, self.page_type, self.title, self.page_info
        )
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
