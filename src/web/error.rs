use axum::{Json, http::StatusCode, response::IntoResponse};
use thiserror::Error;

use crate::{
    editor::EditorError,
    error::log_error,
    model::{ResourceType, ResourceTyped, entity::Module},
    uploader::{StorageError, UploadError},
};

pub type WebResult<T> = std::result::Result<T, WebError>;

#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("AuthenticationCookieInvalid, cookie: {cookie}. Error: {error}")]
    AuthenticationCookieInvalid {
        cookie: String,
        error: crate::auth::CryptError,
    },

    #[error("AuthenticationRequired")]
    AuthenticationRequired,
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("ResourceNotFound: {resource_type:?}")]
    ResourceNotFound { resource_type: ResourceType },

    #[error("ResourceForbidden: {resource_type:?}")]
    ResourceForbidden { resource_type: ResourceType },

    #[error("ResourceBadRequest: {resource_type:?}. Details: {details}")]
    ResourceBadRequest {
        resource_type: ResourceType,
        details: String,
    },

    #[error("ResourceConflict: {resource_type:?}. Details: {details}")]
    ResourceConflict {
        resource_type: ResourceType,
        details: String,
    },
}

#[derive(Debug, Error)]
pub enum UploadRequestError {
    #[error("UploadMissingInformation")]
    UploadMissingInformation,

    #[error("UploadInProgress")]
    UploadInProgress,

    #[error("UploadStorageFailed: {0}")]
    UploadStorageFailed(#[from] StorageError),

    #[error("UploadMalformed: {0}")]
    UploadMalformed(String),

    #[error("UploadTooLarge: limit {limit} bytes")]
    UploadTooLarge { limit: usize },
}

impl AuthenticationError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            Self::AuthenticationCookieInvalid { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::AuthenticationCookieInvalid { .. } => {
                String::from("Authentication error, cookie invalid.")
            }
            Self::AuthenticationRequired => String::from("Authentication required."),
        }
    }
}

impl ResourceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            Self::ResourceForbidden { .. } => StatusCode::FORBIDDEN,
            Self::ResourceBadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::ResourceConflict { .. } => StatusCode::CONFLICT,
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ResourceNotFound { .. } => String::from("Resource error, resource not found."),
            Self::ResourceForbidden { .. } => String::from("Resource error, resource forbidden."),
            Self::ResourceBadRequest { details, .. } => {
                format!("Resource error, bad request: {details}.")
            }
            Self::ResourceConflict { details, .. } => format!("Resource error, {details}."),
        }
    }
}

impl UploadRequestError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::UploadMissingInformation => StatusCode::BAD_REQUEST,
            Self::UploadMalformed(_) => StatusCode::BAD_REQUEST,
            Self::UploadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::UploadInProgress => StatusCode::CONFLICT,
            Self::UploadStorageFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::UploadMissingInformation => {
                String::from("Missing information, please provide a file and name for your resource.")
            }
            Self::UploadMalformed(_) => String::from("Upload error, malformed form data."),
            Self::UploadTooLarge { limit } => {
                format!("Upload error, the request exceeds the {limit} byte limit.")
            }
            Self::UploadInProgress => String::from("Upload error, an upload is already running."),
            Self::UploadStorageFailed(e) => format!("Upload failed: {e}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum WebError {
    #[error("ResourceError - {0}")]
    ResourceError(#[from] ResourceError),
    #[error("AuthenticationError - {0}")]
    AuthenticationError(#[from] AuthenticationError),
    #[error("UploadError - {0}")]
    UploadError(#[from] UploadRequestError),
}

impl WebError {
    pub fn resource_not_found(r#type: ResourceType) -> Self {
        Self::ResourceError(ResourceError::ResourceNotFound {
            resource_type: r#type,
        })
    }

    pub fn resource_forbidden(r#type: ResourceType) -> Self {
        Self::ResourceError(ResourceError::ResourceForbidden {
            resource_type: r#type,
        })
    }

    pub fn resource_bad_request<S: Into<String>>(r#type: ResourceType, details: S) -> Self {
        Self::ResourceError(ResourceError::ResourceBadRequest {
            resource_type: r#type,
            details: details.into(),
        })
    }

    pub fn resource_conflict<S: Into<String>>(r#type: ResourceType, details: S) -> Self {
        Self::ResourceError(ResourceError::ResourceConflict {
            resource_type: r#type,
            details: details.into(),
        })
    }

    pub fn auth_cookie_invalid<S: Into<String>>(
        cookie: S,
        error: crate::auth::CryptError,
    ) -> Self {
        Self::AuthenticationError(AuthenticationError::AuthenticationCookieInvalid {
            cookie: cookie.into(),
            error,
        })
    }

    pub fn auth_required() -> Self {
        Self::AuthenticationError(AuthenticationError::AuthenticationRequired)
    }

    pub fn upload_malformed<S: Into<String>>(details: S) -> Self {
        Self::UploadError(UploadRequestError::UploadMalformed(details.into()))
    }

    pub fn upload_too_large(limit: usize) -> Self {
        Self::UploadError(UploadRequestError::UploadTooLarge { limit })
    }

    pub fn status_code(&self) -> axum::http::StatusCode {
        match self {
            Self::ResourceError(e) => e.status_code(),
            Self::AuthenticationError(e) => e.status_code(),
            Self::UploadError(e) => e.status_code(),
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ResourceError(e) => e.client_display(),
            Self::AuthenticationError(e) => e.client_display(),
            Self::UploadError(e) => e.client_display(),
        }
    }
}

impl From<EditorError> for WebError {
    fn from(value: EditorError) -> Self {
        match value {
            EditorError::ReadOnly => Self::resource_forbidden(Module::get_resource_type()),
            EditorError::NotEditing => {
                Self::resource_conflict(ResourceType::EditSession, "module is not being edited")
            }
            EditorError::LessonIndexOutOfRange { .. } => {
                Self::resource_bad_request(ResourceType::Lesson, value.to_string())
            }
        }
    }
}

impl From<UploadError> for WebError {
    fn from(value: UploadError) -> Self {
        match value {
            UploadError::MissingInformation => {
                UploadRequestError::UploadMissingInformation.into()
            }
            UploadError::InProgress => UploadRequestError::UploadInProgress.into(),
            UploadError::Storage(e) => UploadRequestError::UploadStorageFailed(e).into(),
        }
    }
}

#[derive(serde::Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message for the client
    pub message: String,
    /// HTTP status code (stringified)
    pub status_code: String,
    /// Optional debug details (only in debug mode)
    pub details: Option<String>,
}

impl IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        log_error(&self);

        let status_code = self.status_code();
        let display = self.client_display();

        let body = ErrorResponse {
            message: display,
            status_code: status_code.as_str().to_string(),
            details: if cfg!(debug_assertions) {
                Some(self.to_string())
            } else {
                None
            },
        };

        (status_code, Json(body)).into_response()
    }
}
