use thiserror::Error;

use crate::io::IoError;

/// Errors produced while loading an assertion suite.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Suite format could not be resolved from the file extension.
    #[error("unable to resolve suite format from `{path}`: {source}")]
    ResolveFormat {
        path: String,
        #[source]
        source: IoError,
    },

    /// Suite file could not be opened.
    #[error("failed to open suite file `{path}`: {source}")]
    OpenFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Suite file could not be parsed in its declared format.
    #[error("failed to read suite `{path}`: {source}")]
    Read {
        path: String,
        #[source]
        source: IoError,
    },

    /// Suite file held zero or several documents.
    #[error("suite file must contain exactly one document, found {found}")]
    DocumentCount { found: usize },

    /// Suite document does not follow the suite schema.
    #[error("invalid suite schema: {source}")]
    Schema {
        #[source]
        source: serde_json::Error,
    },

    /// An assertion entry carries no validator body.
    #[error("asserts[{index}] does not declare a validator")]
    MissingValidator { index: usize },
}

/// Errors produced while selecting the document a validator runs against.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ContextError {
    #[error("no documents to assert on")]
    NoDocuments,

    #[error("documentIndex {index} out of range ({len} documents)")]
    IndexOutOfRange { index: usize, len: usize },
}
