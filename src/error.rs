use thiserror::Error;

#[derive(Error, Debug)]
pub enum LineageError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Data integrity error: {kind} {handle} could not be resolved")]
    DataIntegrity { kind: &'static str, handle: String },
    #[error("Config error: {0}")]
    Config(String),
    #[error("Import error: {0}")]
    Import(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LineageError>;

impl LineageError {
    pub fn missing_person(handle: impl Into<String>) -> Self {
        Self::DataIntegrity { kind: "person", handle: handle.into() }
    }
    pub fn missing_family(handle: impl Into<String>) -> Self {
        Self::DataIntegrity { kind: "family", handle: handle.into() }
    }
}

// Helper conversions
impl From<config::ConfigError> for LineageError {
    fn from(e: config::ConfigError) -> Self { Self::Config(e.to_string()) }
}
