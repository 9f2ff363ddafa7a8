use thiserror::Error;

pub type StorageResult<T> = std::result::Result<T, StorageError>;
pub type UploadResult<T> = std::result::Result<T, UploadError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("storage rejected the file: {0}")]
    Rejected(String),
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("a file and a resource name are required")]
    MissingInformation,
    #[error("an upload is already running")]
    InProgress,
    #[error("upload failed: {0}")]
    Storage(#[from] StorageError),
}
