use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodeownersError>;

#[derive(Error, Debug)]
pub enum CodeownersError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
