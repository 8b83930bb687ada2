pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unsupported input format: {format} (expected json, yaml or json5)")]
    UnsupportedInputFormat { format: String },

    #[error("Invalid slot inputs JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid slot inputs YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid slot inputs JSON5: {0}")]
    Json5(#[from] json5::Error),

    #[error("Invalid settings at `{path}`: {message}")]
    InvalidConfig { path: String, message: String },
}
