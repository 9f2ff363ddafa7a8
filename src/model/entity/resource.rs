use serde::{Deserialize, Serialize};

use crate::model::repo::{ResourceType, ResourceTyped};

/// An uploaded file available for reuse across lessons.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: String,
    pub name: String,
    /// Declared MIME type, or a coarse [`ResourceCategory`] when the upload had none.
    #[serde(rename = "type")]
    pub media_type: String,
    pub size: u64,
    pub url: String,
    pub date_added: String,
}

impl ResourceTyped for Resource {
    fn get_resource_type() -> ResourceType {
        ResourceType::Resource
    }
}

impl Resource {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn date_added(&self) -> &str {
        &self.date_added
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceCategory {
    Image,
    Document,
    Video,
    Audio,
    Other,
}

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "svg", "webp"];
const DOCUMENT_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "xls", "xlsx", "ppt", "pptx", "txt"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "avi"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "flac"];

impl ResourceCategory {
    /// Category by the text after the last `.` of `filename`, case-insensitive.
    /// A name without a dot is treated as its own extension.
    pub fn from_filename(filename: &str) -> Self {
        let ext = filename
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_lowercase();
        let ext = ext.as_str();

        if IMAGE_EXTENSIONS.contains(&ext) {
            Self::Image
        } else if DOCUMENT_EXTENSIONS.contains(&ext) {
            Self::Document
        } else if VIDEO_EXTENSIONS.contains(&ext) {
            Self::Video
        } else if AUDIO_EXTENSIONS.contains(&ext) {
            Self::Audio
        } else {
            Self::Other
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Document => "document",
            Self::Video => "video",
            Self::Audio => "audio",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Type string stored on a [`Resource`]: the declared media type when present,
/// otherwise the category derived from the file name.
pub fn resource_media_type(declared: &str, filename: &str) -> String {
    if declared.is_empty() {
        ResourceCategory::from_filename(filename).to_string()
    } else {
        declared.to_string()
    }
}
