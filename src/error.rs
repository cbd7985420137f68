use thiserror::Error;

/// Errors raised while loading material packs or resolving names
#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("failed to read material pack: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed material pack: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to encode item tag: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown material: {0}")]
    UnknownMaterial(String),

    #[error("unknown tool kind: {0}")]
    UnknownToolKind(String),

    #[error("unknown part kind: {0}")]
    UnknownPartKind(String),

    #[error("invalid color value: {0}")]
    InvalidColor(String),

    #[error("cannot compose a {handle} with a {head}")]
    MismatchedParts {
        handle: &'static str,
        head: &'static str,
    },
}

pub type Result<T> = std::result::Result<T, MaterialError>;
