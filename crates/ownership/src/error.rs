use thiserror::Error;

pub type Result<T> = std::result::Result<T, OwnershipError>;

#[derive(Error, Debug)]
pub enum OwnershipError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid owner alias config: {0}")]
    InvalidAliasConfig(#[from] serde_json::Error),

    #[error("`git {command}` failed: {stderr}")]
    GitCommand { command: String, stderr: String },
}
