use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid manifest: {0}")]
    InvalidManifest(#[from] serde_json::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Error, Debug)]
pub enum AudioError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("`{program}` failed with {}", code.map(|c| format!("exit code {c}")).unwrap_or_else(|| "a signal".into()))]
    CommandFailed { program: String, code: Option<i32> },

    #[error("No {0} backend available on this system")]
    NoBackend(&'static str),
}
