use thiserror::Error;

#[derive(Error, Debug)]
pub enum HostError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Audio error: {0}")]
    Audio(#[from] rover_assets::AudioError),

    #[error("Core error: {0}")]
    Core(#[from] rover_core::CoreError),

    #[error("Switch error: {0}")]
    Switch(String),
}
