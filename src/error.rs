use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("page {fpath:?} has no <title>")]
    MissingTitle { fpath: PathBuf },

    #[error("required node `{selector}` not found")]
    MissingNode { selector: &'static str },

    #[error("markup has not been loaded for page {fname}")]
    MarkupNotLoaded { fname: String },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GroupError {
    /// A `next` link points back into a chain that is already being walked.
    #[error("category group {group:?}: chain loops back to page {fname}")]
    MalformedChain { group: String, fname: String },

    #[error("category group {group:?} has not been linked yet")]
    NotLinked { group: String },
}
