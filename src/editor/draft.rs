//! Pure transformations of a draft module. Every function leaves its input
//! untouched and returns the next draft.

use serde::Deserialize;

use crate::editor::error::{EditorError, EditorResult};
use crate::model::entity::{Lesson, LessonKind, Module, Resource};

pub const NEW_LESSON_TITLE: &str = "New Lesson";
pub const NEW_LESSON_DURATION: &str = "10 min";
pub const NEW_LESSON_DESCRIPTION: &str = "Enter lesson description";
pub const RESOURCE_LESSON_DURATION: &str = "N/A";

/// A single field-level change to one lesson.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "lowercase")]
pub enum LessonEdit {
    Title(String),
    Duration(String),
    #[serde(rename = "type")]
    Kind(LessonKind),
    Description(String),
}

/// One step of an editing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftEdit {
    SetTitle(String),
    SetDescription(String),
    EditLesson { index: usize, edit: LessonEdit },
    AddLesson,
    AddResourceLesson(Resource),
    RemoveLesson { index: usize },
}

pub fn apply(draft: &Module, edit: &DraftEdit) -> EditorResult<Module> {
    match edit {
        DraftEdit::SetTitle(title) => Ok(with_title(draft, title)),
        DraftEdit::SetDescription(description) => Ok(with_description(draft, description)),
        DraftEdit::EditLesson { index, edit } => with_lesson_edit(draft, *index, edit),
        DraftEdit::AddLesson => Ok(with_new_lesson(draft)),
        DraftEdit::AddResourceLesson(resource) => Ok(with_resource_lesson(draft, resource)),
        DraftEdit::RemoveLesson { index } => without_lesson(draft, *index),
    }
}

pub fn with_title(draft: &Module, title: &str) -> Module {
    Module {
        title: title.to_string(),
        ..draft.clone()
    }
}

pub fn with_description(draft: &Module, description: &str) -> Module {
    Module {
        description: description.to_string(),
        ..draft.clone()
    }
}

pub fn with_lesson_edit(draft: &Module, index: usize, edit: &LessonEdit) -> EditorResult<Module> {
    check_index(draft, index)?;

    let mut next = draft.clone();
    let lesson = &mut next.lessons[index];
    match edit {
        LessonEdit::Title(title) => lesson.title = title.clone(),
        LessonEdit::Duration(duration) => lesson.duration = duration.clone(),
        LessonEdit::Kind(kind) => lesson.kind = kind.clone(),
        LessonEdit::Description(description) => lesson.description = description.clone(),
    }
    Ok(next)
}

/// Appends a placeholder lesson. Its id is `{module}-{count + 1}`, so it may
/// collide with an existing id after a removal in the same session.
pub fn with_new_lesson(draft: &Module) -> Module {
    let id = format!("{}-{}", draft.id(), draft.lessons().len() + 1);
    let lesson = Lesson::new(
        id,
        NEW_LESSON_TITLE,
        NEW_LESSON_DURATION,
        LessonKind::Text,
        NEW_LESSON_DESCRIPTION,
    );
    appended(draft, lesson)
}

/// Appends a lesson pointing at `resource`, typed by its MIME prefix.
pub fn with_resource_lesson(draft: &Module, resource: &Resource) -> Module {
    let id = format!(
        "{}-{}-{}",
        draft.id(),
        draft.lessons().len() + 1,
        resource.id()
    );
    let lesson = Lesson::new(
        id,
        resource.name(),
        RESOURCE_LESSON_DURATION,
        LessonKind::from_media_type(resource.media_type()),
        format!("Resource added from course materials: {}", resource.name()),
    );
    appended(draft, lesson)
}

pub fn without_lesson(draft: &Module, index: usize) -> EditorResult<Module> {
    check_index(draft, index)?;

    let mut next = draft.clone();
    next.lessons.remove(index);
    Ok(next)
}

fn appended(draft: &Module, lesson: Lesson) -> Module {
    let mut next = draft.clone();
    next.lessons.push(lesson);
    next
}

fn check_index(draft: &Module, index: usize) -> EditorResult<()> {
    let len = draft.lessons().len();
    if index < len {
        Ok(())
    } else {
        Err(EditorError::LessonIndexOutOfRange { index, len })
    }
}
