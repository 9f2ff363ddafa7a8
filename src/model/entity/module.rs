use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::model::entity::{Lesson, Resource};
use crate::model::repo::{ResourceType, ResourceTyped};

pub type ModuleId = u32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Module {
    pub id: ModuleId,
    pub title: String,
    pub description: String,
    /// Completion percentage, `0..=100`.
    pub completion: u8,
    /// Display and authoring order.
    pub lessons: Vec<Lesson>,
}

impl ResourceTyped for Module {
    fn get_resource_type() -> ResourceType {
        ResourceType::Module
    }
}

impl Module {
    pub fn new<T: Into<String>, D: Into<String>>(id: ModuleId, title: T, description: D) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completion: 0,
            lessons: Vec::new(),
        }
    }

    pub fn with_lessons(mut self, lessons: Vec<Lesson>) -> Self {
        self.lessons = lessons;
        self
    }

    pub fn id(&self) -> ModuleId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn completion(&self) -> u8 {
        self.completion
    }

    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// Lesson ids that occur more than once, in order of their second appearance.
    pub fn duplicate_lesson_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.lessons
            .iter()
            .map(Lesson::id)
            .filter(|id| !seen.insert(*id))
            .collect()
    }
}

/// Seed document for the course store: the authoritative module and resource
/// lists owned by the course view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    #[serde(default)]
    pub modules: Vec<Module>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseIssue {
    DuplicateModuleId(ModuleId),
    DuplicateLessonId { module_id: ModuleId, lesson_id: String },
    CompletionOutOfRange { module_id: ModuleId, completion: u8 },
}

impl std::fmt::Display for CourseIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateModuleId(id) => write!(f, "module id {id} is used more than once"),
            Self::DuplicateLessonId {
                module_id,
                lesson_id,
            } => write!(f, "module {module_id}: lesson id `{lesson_id}` is not unique"),
            Self::CompletionOutOfRange {
                module_id,
                completion,
            } => write!(f, "module {module_id}: completion {completion}% is above 100"),
        }
    }
}

impl Course {
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        serde_json::from_slice(bytes)
    }

    /// Checks the invariants the editor relies on but does not enforce itself.
    pub fn validate(&self) -> Vec<CourseIssue> {
        let mut issues = Vec::new();
        let mut module_ids = HashSet::new();

        for module in &self.modules {
            if !module_ids.insert(module.id()) {
                issues.push(CourseIssue::DuplicateModuleId(module.id()));
            }
            if module.completion() > 100 {
                issues.push(CourseIssue::CompletionOutOfRange {
                    module_id: module.id(),
                    completion: module.completion(),
                });
            }
            for lesson_id in module.duplicate_lesson_ids() {
                issues.push(CourseIssue::DuplicateLessonId {
                    module_id: module.id(),
                    lesson_id: lesson_id.to_string(),
                });
            }
        }

        issues
    }
}
