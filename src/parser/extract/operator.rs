use crate::model::{PageInfo, PageType};

/// Operator reference pages (`Noise CHOP`, `Table DAT`, ...) are named by their title.
pub fn parse(family: PageType, title: &str) -> PageInfo {
    PageInfo {
        name: Some(title.to_string()),
        sub_type: Some(family.as_str().to_string()),
        ..Default::default()
    }
}
