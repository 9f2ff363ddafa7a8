use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::model::ModelManager;
use crate::uploader::{DEFAULT_MAX_UPLOAD_BYTES, ResourceStorage};
use crate::web::sessions::EditSessions;

#[derive(Clone)]
pub struct AppState {
    mm: ModelManager,
    sessions: EditSessions,
    storage: Arc<dyn ResourceStorage>,
    jwt: Arc<str>,
    uploads_dir: PathBuf,
    max_upload_bytes: usize,
    docs: bool,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("mm", &self.mm)
            .field("uploads_dir", &self.uploads_dir)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("docs", &self.docs)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new<K: Into<Arc<str>>>(
        mm: ModelManager,
        storage: Arc<dyn ResourceStorage>,
        jwt: K,
        uploads_dir: PathBuf,
    ) -> Self {
        Self {
            mm,
            sessions: EditSessions::default(),
            storage,
            jwt: jwt.into(),
            uploads_dir,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            docs: false,
        }
    }

    pub fn with_docs(mut self, docs: bool) -> Self {
        self.docs = docs;
        self
    }

    pub fn with_max_upload_bytes(mut self, max_upload_bytes: usize) -> Self {
        self.max_upload_bytes = max_upload_bytes;
        self
    }

    pub fn mm(&self) -> &ModelManager {
        &self.mm
    }

    pub fn sessions(&self) -> &EditSessions {
        &self.sessions
    }

    pub fn storage(&self) -> Arc<dyn ResourceStorage> {
        self.storage.clone()
    }

    pub fn jwt(&self) -> &str {
        &self.jwt
    }

    pub fn uploads_dir(&self) -> &Path {
        &self.uploads_dir
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn docs(&self) -> bool {
        self.docs
    }
}
