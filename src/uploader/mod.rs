//! Resource upload dialog: pick a file, name it, upload it, hand the
//! resulting [`Resource`] to the owner.

use std::sync::Arc;

use serde::Serialize;

use crate::model::entity::Resource;
use crate::notify::{Notification, Notifier};

mod error;
pub use error::{StorageError, StorageResult, UploadError, UploadResult};

mod storage;
pub use storage::{
    DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_SIMULATED_DELAY, DiskStorage, ResourceStorage,
    SimulatedStorage,
};

/// A file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    media_type: String,
    bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new<N: Into<String>, M: Into<String>>(name: N, media_type: M, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared MIME type, possibly empty.
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UploaderState {
    /// Dialog closed.
    Idle,
    /// Dialog open, nothing picked yet.
    Open,
    FileSelected,
    Uploading,
}

pub type OnResourceAdded = Box<dyn FnMut(Resource) + Send>;

/// Holds the uploading flag up while a storage call is in flight and lowers
/// it on drop, so an abandoned upload leaves the dialog retryable.
struct UploadingFlag<'a>(&'a mut bool);

impl<'a> UploadingFlag<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for UploadingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

pub struct ResourceUploader {
    storage: Arc<dyn ResourceStorage>,
    notifier: Arc<dyn Notifier>,
    on_resource_added: OnResourceAdded,
    open: bool,
    file: Option<SelectedFile>,
    name: String,
    uploading: bool,
}

impl std::fmt::Debug for ResourceUploader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceUploader")
            .field("state", &self.state())
            .field("file", &self.file.as_ref().map(SelectedFile::name))
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl ResourceUploader {
    pub fn new<F>(
        storage: Arc<dyn ResourceStorage>,
        notifier: Arc<dyn Notifier>,
        on_resource_added: F,
    ) -> Self
    where
        F: FnMut(Resource) + Send + 'static,
    {
        Self {
            storage,
            notifier,
            on_resource_added: Box::new(on_resource_added),
            open: false,
            file: None,
            name: String::new(),
            uploading: false,
        }
    }

    pub fn state(&self) -> UploaderState {
        match (self.open, &self.file, self.uploading) {
            (_, _, true) => UploaderState::Uploading,
            (false, _, _) => UploaderState::Idle,
            (true, None, _) => UploaderState::Open,
            (true, Some(_), _) => UploaderState::FileSelected,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    /// Closes the dialog. The picked file and name stay for the next open.
    pub fn close(&mut self) {
        self.open = false;
    }

    /// Picks a file. The name defaults to the file name when still empty.
    pub fn select_file(&mut self, file: SelectedFile) {
        if self.name.is_empty() {
            self.name = file.name().to_string();
        }
        self.file = Some(file);
        self.open = true;
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    /// Whether the upload button is enabled.
    pub fn can_upload(&self) -> bool {
        self.file.is_some() && !self.uploading
    }

    /// Uploads the picked file. On failure the file and name are kept so the
    /// user can retry.
    #[tracing::instrument(skip(self), fields(name = %self.name))]
    pub async fn upload(&mut self) -> UploadResult<Resource> {
        if self.uploading {
            return Err(UploadError::InProgress);
        }

        let file = match &self.file {
            Some(file) if !self.name.trim().is_empty() => file,
            _ => {
                tracing::debug!("upload rejected, file or name missing");
                self.notifier.notify(Notification::destructive(
                    "Missing information",
                    "Please provide a file and name for your resource",
                ));
                return Err(UploadError::MissingInformation);
            }
        };

        let result = {
            let _uploading = UploadingFlag::raise(&mut self.uploading);
            self.storage.upload_resource(file, &self.name).await
        };

        match result {
            Ok(resource) => {
                (self.on_resource_added)(resource.clone());
                self.file = None;
                self.name.clear();
                self.open = false;

                tracing::info!(id = resource.id(), "resource uploaded");
                self.notifier.notify(Notification::new(
                    "Resource uploaded",
                    "Your resource has been uploaded successfully",
                ));
                Ok(resource)
            }
            Err(e) => {
                crate::error::log_error(&e);
                let description = match e.to_string() {
                    msg if msg.is_empty() => String::from("An unexpected error occurred"),
                    msg => msg,
                };
                self.notifier
                    .notify(Notification::destructive("Upload failed", description));
                Err(e.into())
            }
        }
    }
}
