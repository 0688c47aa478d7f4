use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid line bank: {0}")]
    InvalidLineBank(String),

    #[error("Tier {0} out of range (expected 0..=2)")]
    InvalidTier(u8),

    #[error("Config error: {0}")]
    Config(String),
}
