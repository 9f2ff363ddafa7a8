use serde::{Deserialize, Serialize};

use crate::editor::{DraftEdit, LessonEdit, ModuleView};
use crate::model::entity::Resource;
use crate::notify::Notification;

/// One draft operation, tagged by `op`.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DraftEditBody {
    SetTitle {
        title: String,
    },
    SetDescription {
        description: String,
    },
    EditLesson {
        index: usize,
        /// `{"field": "title" | "duration" | "type" | "description", "value": "..."}`
        #[schema(value_type = Object)]
        edit: LessonEdit,
    },
    AddLesson {},
    /// Adds a lesson from an uploaded resource.
    AddResource {
        resource_id: String,
    },
    RemoveLesson {
        index: usize,
    },
    ToggleResourceSelector {},
}

impl DraftEditBody {
    /// Draft edit for this body. `AddResource` needs the resolved resource.
    pub fn into_edit(self, resource: Option<Resource>) -> Option<DraftEdit> {
        match self {
            Self::SetTitle { title } => Some(DraftEdit::SetTitle(title)),
            Self::SetDescription { description } => Some(DraftEdit::SetDescription(description)),
            Self::EditLesson { index, edit } => Some(DraftEdit::EditLesson { index, edit }),
            Self::AddLesson {} => Some(DraftEdit::AddLesson),
            Self::AddResource { .. } => resource.map(DraftEdit::AddResourceLesson),
            Self::RemoveLesson { index } => Some(DraftEdit::RemoveLesson { index }),
            Self::ToggleResourceSelector {} => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ModuleActionResponse {
    pub module: ModuleView,
    pub notifications: Vec<Notification>,
}
