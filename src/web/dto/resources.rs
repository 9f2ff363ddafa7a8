use serde::Serialize;

use crate::model::entity::Resource;
use crate::notify::Notification;

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    pub resource: Resource,
    pub notifications: Vec<Notification>,
}

/// Multipart form accepted by the upload endpoint, for the docs only.
#[allow(unused)]
#[derive(utoipa::ToSchema)]
pub struct UploadForm {
    /// Resource name, defaults to the file name
    pub name: Option<String>,
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
