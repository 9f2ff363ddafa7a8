use serde::{Deserialize, Serialize};

use crate::model::repo::{ResourceType, ResourceTyped};

/// Media kind of a lesson. Unrecognized tags survive a round trip through
/// [`LessonKind::Other`] and render with the generic icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LessonKind {
    Video,
    Text,
    Pdf,
    Exercise,
    Image,
    Other(String),
}

impl LessonKind {
    /// Picks the lesson kind for a resource by its MIME type.
    pub fn from_media_type(media_type: &str) -> Self {
        if media_type.starts_with("image/") {
            Self::Image
        } else if media_type.starts_with("video/") {
            Self::Video
        } else if media_type.starts_with("application/pdf") {
            Self::Pdf
        } else {
            Self::Text
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Video => "video",
            Self::Text => "text",
            Self::Pdf => "pdf",
            Self::Exercise => "exercise",
            Self::Image => "image",
            Self::Other(tag) => tag,
        }
    }

    /// Icon name shown next to the lesson.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Text => "file-text",
            Self::Pdf => "file",
            Self::Image => "image",
            Self::Exercise => "book-open",
            Self::Other(_) => "file",
        }
    }
}

impl From<&str> for LessonKind {
    fn from(value: &str) -> Self {
        match value {
            "video" => Self::Video,
            "text" => Self::Text,
            "pdf" => Self::Pdf,
            "exercise" => Self::Exercise,
            "image" => Self::Image,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for LessonKind {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<LessonKind> for String {
    fn from(value: LessonKind) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for LessonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    /// Free-form label, e.g. `10 min`.
    pub duration: String,
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "video")]
    pub kind: LessonKind,
    pub completed: bool,
    pub description: String,
}

impl ResourceTyped for Lesson {
    fn get_resource_type() -> ResourceType {
        ResourceType::Lesson
    }
}

impl Lesson {
    pub fn new<I, T, D, S>(id: I, title: T, duration: D, kind: LessonKind, description: S) -> Self
    where
        I: Into<String>,
        T: Into<String>,
        D: Into<String>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            title: title.into(),
            duration: duration.into(),
            kind,
            completed: false,
            description: description.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    pub fn kind(&self) -> &LessonKind {
        &self.kind
    }

    pub fn completed(&self) -> bool {
        self.completed
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}
