use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("toml serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("binary `{binary}` missing from PATH")]
    BinaryMissing { binary: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("credential error: {0}")]
    Auth(String),

    #[error("transcription job targeting {destination} failed: {cause}")]
    Submission { destination: String, cause: String },

    #[error("transcription job targeting {destination} timed out after {seconds}s")]
    Timeout { destination: String, seconds: u64 },
}

pub type AppResult<T> = Result<T, AppError>;
