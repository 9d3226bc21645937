use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid icon pack: {message}")]
    InvalidPack { message: String },

    #[error("Invalid icon table: {message}")]
    InvalidIconTable { message: String },

    #[error("Invalid settings: {message}")]
    InvalidSettings { message: String },

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Per-entry failure of the SVG icon compiler. Never aborts a batch.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("Not found: {path}")]
    ResourceNotFound { path: String },

    #[error("empty body: {path}")]
    EmptyBody { path: String },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Per-descriptor failure of the icon pack loader.
///
/// The display form is the user-facing warning text; the pack is omitted from the load result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PackLoadError {
    /// Network, HTTP status, redirect or parse failure for a remote pack.
    #[error("Could not load icon pack \"{name}\": {reason}")]
    Fetch { name: String, reason: String },

    /// Disk or parse failure for a local pack.
    #[error("Could not load icon pack \"{name}\": {reason}")]
    Read { name: String, reason: String },
}

impl PackLoadError {
    pub fn name(&self) -> &str {
        match self {
            Self::Fetch { name, .. } | Self::Read { name, .. } => name,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            Self::Fetch { reason, .. } | Self::Read { reason, .. } => reason,
        }
    }
}

/// Raised by the diagram rendering library when the diagram text cannot be rendered.
///
/// `message` is the raw library message and may contain markup and HTML entities.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct DiagramSyntaxError {
    pub message: String,
}

impl DiagramSyntaxError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
