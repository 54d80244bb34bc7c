pub mod category;
pub mod operator;
pub mod tscript;

use std::collections::HashMap;

use scraper::Html;

use crate::error::PageError;
use crate::model::{PageInfo, PageType};
use tscript::TScriptKind;

/// Extracts a [`PageInfo`] record from a page's cleaned title and markup.
pub trait ParsePage {
    fn parse_page(&self, title: &str, doc: &Html) -> Result<PageInfo, PageError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageParser {
    Category,
    TScript(TScriptKind),
    PyClass,
    PyModule,
    Operator(PageType),
}

impl ParsePage for PageParser {
    fn parse_page(&self, title: &str, doc: &Html) -> Result<PageInfo, PageError> {
        match *self {
            PageParser::Category => category::parse(title, doc),
            PageParser::TScript(kind) => Ok(tscript::parse(kind, title)),
            PageParser::PyClass | PageParser::PyModule => Ok(PageInfo::default()),
            PageParser::Operator(family) => Ok(operator::parse(family, title)),
        }
    }
}

/// Page type → parser. Types without an entry yield an empty record.
#[derive(Debug, Clone)]
pub struct ParserRegistry {
    parsers: HashMap<PageType, PageParser>,
}

impl ParserRegistry {
    pub fn get(&self, page_type: PageType) -> Option<&PageParser> {
        self.parsers.get(&page_type)
    }

    pub fn parse_page_info(
        &self,
        page_type: PageType,
        title: &str,
        doc: &Html,
    ) -> Result<PageInfo, PageError> {
        match self.get(page_type) {
            Some(parser) => parser.parse_page(title, doc),
            None => Ok(PageInfo::default()),
        }
    }
}

impl Default for ParserRegistry {
    fn default() -> Self {
        let mut parsers = HashMap::from([
            (PageType::Category, PageParser::Category),
            (PageType::TScriptCmd, PageParser::TScript(TScriptKind::Command)),
            (PageType::TScriptExpr, PageParser::TScript(TScriptKind::Expression)),
            (PageType::PyClass, PageParser::PyClass),
            (PageType::PyModule, PageParser::PyModule),
        ]);
        for family in PageType::OPERATOR_FAMILIES {
            parsers.insert(family, PageParser::Operator(family));
        }
        ParserRegistry { parsers }
    }
}
