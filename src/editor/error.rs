use thiserror::Error;

pub type EditorResult<T> = std::result::Result<T, EditorError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("module is read-only for the current actor")]
    ReadOnly,
    #[error("module is not being edited")]
    NotEditing,
    #[error("lesson index {index} is out of range for {len} lessons")]
    LessonIndexOutOfRange { index: usize, len: usize },
}
