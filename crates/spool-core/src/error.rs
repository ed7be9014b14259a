//! Error types for spool-core.

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in spool-core operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No repository is bound to the controller.
    #[error("no repository is bound - open a project first")]
    NoRepository,

    /// Author string does not match the `Name <email>` pattern.
    #[error("malformed author '{0}': expected \"Name <email>\"")]
    InvalidAuthor(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("toml serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    /// Git operation error.
    #[error("git error: {0}")]
    Git(#[from] spool_git::Error),
}
