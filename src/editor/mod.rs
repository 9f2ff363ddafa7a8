//! Module editor: a read-only collapsible list for learners, a draft/commit
//! form for authors.

use std::sync::Arc;

use crate::model::Authorizer;
use crate::model::entity::{Module, Resource};
use crate::notify::{Notification, Notifier};

pub mod draft;
pub use draft::{DraftEdit, LessonEdit};

mod error;
pub use error::{EditorError, EditorResult};

mod view;
pub use view::{EditorMode, LessonView, ModuleView};

/// Receives the saved module. The editor keeps its own copy.
pub type OnModuleUpdate = Box<dyn FnMut(Module) + Send>;

enum EditorState {
    ReadOnly,
    Viewing,
    Editing {
        draft: Module,
        resource_selector_open: bool,
    },
}

pub struct ModuleEditor {
    committed: Module,
    state: EditorState,
    open: bool,
    notifier: Arc<dyn Notifier>,
    on_update: OnModuleUpdate,
}

impl std::fmt::Debug for ModuleEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleEditor")
            .field("module_id", &self.committed.id())
            .field("mode", &self.mode())
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

impl ModuleEditor {
    /// The capability is checked once, here.
    pub fn new<F>(
        module: Module,
        authorizer: &dyn Authorizer,
        notifier: Arc<dyn Notifier>,
        on_update: F,
    ) -> Self
    where
        F: FnMut(Module) + Send + 'static,
    {
        let state = if authorizer.can_edit() {
            EditorState::Viewing
        } else {
            EditorState::ReadOnly
        };

        Self {
            committed: module,
            state,
            open: false,
            notifier,
            on_update: Box::new(on_update),
        }
    }

    pub fn mode(&self) -> EditorMode {
        match self.state {
            EditorState::ReadOnly => EditorMode::ReadOnly,
            EditorState::Viewing => EditorMode::Viewing,
            EditorState::Editing { .. } => EditorMode::Editing,
        }
    }

    pub fn committed(&self) -> &Module {
        &self.committed
    }

    pub fn draft(&self) -> Option<&Module> {
        match &self.state {
            EditorState::Editing { draft, .. } => Some(draft),
            _ => None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn toggle_open(&mut self) {
        self.open = !self.open;
    }

    pub fn resource_selector_open(&self) -> bool {
        matches!(
            self.state,
            EditorState::Editing {
                resource_selector_open: true,
                ..
            }
        )
    }

    /// Takes a newer committed module from the owner. A running draft is kept.
    pub fn set_module(&mut self, module: Module) {
        self.committed = module;
    }

    #[tracing::instrument(skip(self), fields(module_id = self.committed.id()))]
    pub fn begin_edit(&mut self) -> EditorResult<()> {
        match self.state {
            EditorState::ReadOnly => Err(EditorError::ReadOnly),
            EditorState::Editing { .. } => Ok(()),
            EditorState::Viewing => {
                tracing::debug!("entering edit mode");
                self.state = EditorState::Editing {
                    draft: self.committed.clone(),
                    resource_selector_open: false,
                };
                Ok(())
            }
        }
    }

    /// Applies one edit to the draft. Field edits have no side effects.
    pub fn apply(&mut self, edit: DraftEdit) -> EditorResult<()> {
        let closes_selector = matches!(edit, DraftEdit::AddResourceLesson(_));
        let (current, resource_selector_open) = self.editing_mut()?;

        *current = draft::apply(current, &edit)?;
        if closes_selector {
            *resource_selector_open = false;
        }
        Ok(())
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) -> EditorResult<()> {
        self.apply(DraftEdit::SetTitle(title.into()))
    }

    pub fn set_description<S: Into<String>>(&mut self, description: S) -> EditorResult<()> {
        self.apply(DraftEdit::SetDescription(description.into()))
    }

    pub fn edit_lesson(&mut self, index: usize, edit: LessonEdit) -> EditorResult<()> {
        self.apply(DraftEdit::EditLesson { index, edit })
    }

    pub fn add_lesson(&mut self) -> EditorResult<()> {
        self.apply(DraftEdit::AddLesson)
    }

    pub fn add_resource_as_lesson(&mut self, resource: &Resource) -> EditorResult<()> {
        self.apply(DraftEdit::AddResourceLesson(resource.clone()))
    }

    pub fn remove_lesson(&mut self, index: usize) -> EditorResult<()> {
        self.apply(DraftEdit::RemoveLesson { index })
    }

    pub fn toggle_resource_selector(&mut self) -> EditorResult<()> {
        let (_, resource_selector_open) = self.editing_mut()?;
        *resource_selector_open = !*resource_selector_open;
        Ok(())
    }

    /// Hands the draft to the owner and makes it the new baseline.
    #[tracing::instrument(skip(self), fields(module_id = self.committed.id()))]
    pub fn save(&mut self) -> EditorResult<&Module> {
        let draft = match std::mem::replace(&mut self.state, EditorState::Viewing) {
            EditorState::Editing { draft, .. } => draft,
            EditorState::Viewing => return Err(EditorError::NotEditing),
            EditorState::ReadOnly => {
                self.state = EditorState::ReadOnly;
                return Err(EditorError::ReadOnly);
            }
        };

        (self.on_update)(draft.clone());
        self.committed = draft;
        tracing::info!(lessons = self.committed.lessons().len(), "module saved");

        self.notifier.notify(Notification::new(
            "Module Updated",
            "Your changes have been saved successfully.",
        ));
        Ok(&self.committed)
    }

    /// Drops the draft without telling the owner.
    #[tracing::instrument(skip(self), fields(module_id = self.committed.id()))]
    pub fn cancel(&mut self) -> EditorResult<()> {
        self.editing_mut()?;
        self.state = EditorState::Viewing;
        tracing::debug!("draft discarded");
        Ok(())
    }

    pub fn view(&self) -> ModuleView {
        let module = self.draft().unwrap_or(&self.committed);
        ModuleView::new(module, self.mode(), self.open, self.resource_selector_open())
    }

    fn editing_mut(&mut self) -> EditorResult<(&mut Module, &mut bool)> {
        match &mut self.state {
            EditorState::ReadOnly => Err(EditorError::ReadOnly),
            EditorState::Viewing => Err(EditorError::NotEditing),
            EditorState::Editing {
                draft,
                resource_selector_open,
            } => Ok((draft, resource_selector_open)),
        }
    }
}
