use thiserror::Error;

/// Failures inside the behavior core.
///
/// None of these cross a tick boundary: per-tick entry points log them and
/// degrade to a default instead.
#[derive(Error, Debug)]
pub enum WildlifeError {
    #[error("Missing dependency: {0}")]
    MissingDependency(String),

    #[error("Invalid {what} index {index} (valid range 0..{len})")]
    InvalidIndex {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("Reference not found: {0}")]
    MissingReference(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("TOML encode error: {0}")]
    TomlEncode(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, WildlifeError>;
