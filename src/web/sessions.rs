//! Per-actor module editors kept between requests.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::editor::{EditorMode, ModuleEditor, ModuleView};
use crate::error::log_error;
use crate::model::entity::{Module, ModuleId};
use crate::model::{Authorizer, ModelManager, ResourceTyped};
use crate::notify::{Notification, NotificationLog};
use crate::web::{AuthenticatedUser, WebError, WebResult};

pub struct EditSession {
    editor: ModuleEditor,
    notifications: NotificationLog,
}

impl EditSession {
    fn new(mm: &ModelManager, user: &AuthenticatedUser, module: Module) -> Self {
        let notifications = NotificationLog::new();
        let store = mm.store().clone();
        let editor = ModuleEditor::new(
            module,
            user,
            Arc::new(notifications.clone()),
            move |saved| {
                if let Err(e) = store.update_module(saved) {
                    log_error(&e);
                }
            },
        );

        Self {
            editor,
            notifications,
        }
    }

    pub fn editor(&self) -> &ModuleEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut ModuleEditor {
        &mut self.editor
    }

    pub fn take_notifications(&self) -> Vec<Notification> {
        self.notifications.drain()
    }

    /// Nothing worth keeping: no draft and the lesson list is collapsed.
    fn is_idle(&self) -> bool {
        self.editor.draft().is_none() && !self.editor.is_open()
    }
}

type SessionKey = (String, ModuleId);

#[derive(Clone, Default)]
pub struct EditSessions {
    inner: Arc<Mutex<HashMap<SessionKey, EditSession>>>,
}

impl EditSessions {
    /// Runs `f` on the actor's session for `module_id`, opening one if needed.
    /// A session that is not editing picks up the latest stored module first.
    /// Sessions left idle afterwards are dropped.
    pub async fn with_session<T>(
        &self,
        mm: &ModelManager,
        user: &AuthenticatedUser,
        module_id: ModuleId,
        f: impl FnOnce(&mut EditSession) -> WebResult<T>,
    ) -> WebResult<T> {
        let module = mm
            .store()
            .module(module_id)
            .ok_or(WebError::resource_not_found(Module::get_resource_type()))?;

        let key = (user.user_id().to_string(), module_id);
        let mut sessions = self.inner.lock().await;
        let session = sessions
            .entry(key.clone())
            .or_insert_with(|| EditSession::new(mm, user, module.clone()));

        if session.editor().draft().is_none() {
            session.editor_mut().set_module(module);
        }

        let result = f(session);
        if session.is_idle() {
            sessions.remove(&key);
        }
        result
    }

    /// Number of sessions currently held.
    pub async fn active(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Views of every module for the actor, using open sessions where present.
    pub async fn views(&self, mm: &ModelManager, user: &AuthenticatedUser) -> Vec<ModuleView> {
        let sessions = self.inner.lock().await;

        mm.store()
            .modules()
            .into_iter()
            .map(|module| {
                let key = (user.user_id().to_string(), module.id());
                match sessions.get(&key) {
                    Some(session) if session.editor().draft().is_some() => session.editor().view(),
                    maybe => {
                        let mode = if user.can_edit() {
                            EditorMode::Viewing
                        } else {
                            EditorMode::ReadOnly
                        };
                        let open = maybe.is_some_and(|s| s.editor().is_open());
                        ModuleView::new(&module, mode, open, false)
                    }
                }
            })
            .collect()
    }
}
