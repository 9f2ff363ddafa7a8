use thiserror::Error;

use crate::model::entity::ModuleId;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("json error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("module {0} not found")]
    ModuleNotFound(ModuleId),
    #[error("course document is invalid: {0}")]
    InvalidCourse(String),
}
