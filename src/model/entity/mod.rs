mod module;
pub use module::{Course, CourseIssue, Module, ModuleId};

mod lesson;
pub use lesson::{Lesson, LessonKind};

mod resource;
pub use resource::{Resource, ResourceCategory, resource_media_type};
