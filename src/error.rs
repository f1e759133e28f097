use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("not found: {0}")]
    NotFound(PathBuf),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("data error: {0}")]
    Data(String),
}

impl ExtractError {
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not-found",
            Self::Io(_) => "io",
            Self::Pattern(_) => "pattern",
            Self::Data(_) => "data",
        }
    }
}

/// Category label for the top-level diagnostic; anything outside the
/// taxonomy reports as "unknown".
pub fn error_category(err: &anyhow::Error) -> &'static str {
    if let Some(extract) = err.downcast_ref::<ExtractError>() {
        return extract.category();
    }
    if err.downcast_ref::<std::io::Error>().is_some() {
        return "io";
    }
    "unknown"
}
