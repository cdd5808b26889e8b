use std::fmt;
use thiserror::Error;

/// The pipeline step a failure originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validate,
    Fetch,
    Extract,
    Build,
    Generate,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Validate => "validate",
            Stage::Fetch => "fetch",
            Stage::Extract => "extract",
            Stage::Build => "build",
            Stage::Generate => "generate",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Fetch(String),

    #[error("{0}")]
    Extraction(String),

    #[error("{0}")]
    Generation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("External error: {0}")]
    External(#[from] anyhow::Error),
}

impl Error {
    /// Pipeline stage for request-level failures, `None` for everything else.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            Error::Validation(_) => Some(Stage::Validate),
            Error::Fetch(_) => Some(Stage::Fetch),
            Error::Extraction(_) => Some(Stage::Extract),
            Error::Generation(_) => Some(Stage::Generate),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_classification() {
        assert_eq!(Error::Validation("bad".into()).stage(), Some(Stage::Validate));
        assert_eq!(Error::Fetch("down".into()).stage(), Some(Stage::Fetch));
        assert_eq!(Error::Extraction("thin".into()).stage(), Some(Stage::Extract));
        assert_eq!(Error::Generation("quota".into()).stage(), Some(Stage::Generate));
        assert_eq!(Error::NotFound("Note not found".into()).stage(), None);
    }

    #[test]
    fn test_messages_are_surfaced_verbatim() {
        let err = Error::Extraction("Not enough readable content found".to_string());
        assert_eq!(err.to_string(), "Not enough readable content found");
        assert_eq!(Stage::Generate.to_string(), "generate");
    }
}
