use std::path::PathBuf;

/// Fatal extraction errors. Unknown tags and content models are counted as
/// diagnostics instead.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The event stream broke stack discipline.
    #[error("structural error at byte {position}{}: {message}", page_context(.title))]
    Structural {
        message: String,
        position: u64,
        title: Option<String>,
    },

    /// The XML reader rejected the document.
    #[error("malformed XML at byte {position}{}: {source}", page_context(.title))]
    Xml {
        source: quick_xml::Error,
        position: u64,
        title: Option<String>,
    },

    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Invalid configuration, raised before any parsing.
    #[error("configuration error: {message}")]
    Config { message: String },

    /// The caller's sink refused a record.
    #[error("sink error: {0}")]
    Sink(#[source] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExtractError>;

fn page_context(title: &Option<String>) -> String {
    match title {
        Some(t) => format!(" (in page {:?})", t),
        None => String::new(),
    }
}

impl ExtractError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn structural(msg: impl Into<String>) -> Self {
        Self::Structural {
            message: msg.into(),
            position: 0,
            title: None,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Fills in the byte offset and page title for errors raised without them.
    pub fn at(self, pos: u64, page: Option<&str>) -> Self {
        match self {
            Self::Structural {
                message,
                position,
                title,
            } => Self::Structural {
                message,
                position: if position == 0 { pos } else { position },
                title: title.or_else(|| page.map(str::to_string)),
            },
            Self::Xml {
                source,
                position,
                title,
            } => Self::Xml {
                source,
                position: if position == 0 { pos } else { position },
                title: title.or_else(|| page.map(str::to_string)),
            },
            other => other,
        }
    }

    /// True for the errors that abort a run mid-document.
    pub fn is_fatal_parse_error(&self) -> bool {
        matches!(self, Self::Structural { .. } | Self::Xml { .. })
    }
}
