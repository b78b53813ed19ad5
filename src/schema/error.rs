use std::path::PathBuf;

/// Failure to load or compile a declarative schema
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed TOML schema: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("malformed JSON schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported schema file {0}: expected a .toml or .json extension")]
    UnsupportedFormat(PathBuf),

    #[error("invalid pattern for field '{field}': {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    #[error("schema name must not be empty")]
    EmptyName,
}
