use crate::model::PageInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TScriptKind {
    Command,
    Expression,
}

impl TScriptKind {
    pub fn sub_type(self) -> &'static str {
        match self {
            TScriptKind::Command => "cmd",
            TScriptKind::Expression => "expr",
        }
    }
}

pub fn parse(kind: TScriptKind, title: &str) -> PageInfo {
    PageInfo {
        name: Some(title.replace("TScript:", "")),
        sub_type: Some(kind.sub_type().to_string()),
        ..Default::default()
    }
}
