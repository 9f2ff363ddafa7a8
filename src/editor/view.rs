use serde::Serialize;

use crate::model::entity::{Lesson, Module, ModuleId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EditorMode {
    ReadOnly,
    Viewing,
    Editing,
}

#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct LessonView {
    pub index: usize,
    pub id: String,
    pub title: String,
    pub duration: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub icon: &'static str,
    pub completed: bool,
    pub description: String,
}

impl LessonView {
    fn new(index: usize, lesson: &Lesson) -> Self {
        Self {
            index,
            id: lesson.id().to_string(),
            title: lesson.title().to_string(),
            duration: lesson.duration().to_string(),
            kind: lesson.kind().to_string(),
            icon: lesson.kind().icon(),
            completed: lesson.completed(),
            description: lesson.description().to_string(),
        }
    }
}

/// What the module looks like for the current actor: the committed module
/// while viewing, the draft while editing.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
pub struct ModuleView {
    pub id: ModuleId,
    pub title: String,
    pub description: String,
    pub completion: u8,
    pub mode: EditorMode,
    pub open: bool,
    pub resource_selector_open: bool,
    /// Collapsible trigger text, only in the authoring viewing mode.
    pub lessons_label: Option<String>,
    pub lessons: Vec<LessonView>,
}

impl ModuleView {
    pub(crate) fn new(
        module: &Module,
        mode: EditorMode,
        open: bool,
        resource_selector_open: bool,
    ) -> Self {
        let lessons_label = match mode {
            EditorMode::Viewing => Some(format!("View Lessons ({})", module.lessons().len())),
            _ => None,
        };

        Self {
            id: module.id(),
            title: module.title().to_string(),
            description: module.description().to_string(),
            completion: module.completion(),
            mode,
            open,
            resource_selector_open,
            lessons_label,
            lessons: module
                .lessons()
                .iter()
                .enumerate()
                .map(|(i, lesson)| LessonView::new(i, lesson))
                .collect(),
        }
    }
}
