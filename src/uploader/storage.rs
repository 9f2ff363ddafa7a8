use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use tokio::io::AsyncWriteExt;

use crate::model::entity::{Resource, resource_media_type};
use crate::uploader::SelectedFile;
use crate::uploader::error::StorageResult;
use crate::utils::uploads::sanitize_filename;

pub const DEFAULT_SIMULATED_DELAY: Duration = Duration::from_millis(1500);

/// Largest upload request accepted unless configured otherwise.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Where uploaded files end up. The uploader dialog only talks to this.
#[async_trait]
pub trait ResourceStorage: Send + Sync {
    async fn upload_resource(&self, file: &SelectedFile, name: &str) -> StorageResult<Resource>;
}

/// Millisecond timestamp. Unique only as long as uploads are a millisecond apart.
fn new_resource_id() -> String {
    Utc::now().timestamp_millis().to_string()
}

fn build_resource(id: String, file: &SelectedFile, name: &str, url: String) -> Resource {
    Resource {
        id,
        name: name.to_string(),
        media_type: resource_media_type(file.media_type(), file.name()),
        size: file.size(),
        url,
        date_added: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Waits a fixed delay and hands out a `blob:` URL that lives as long as the
/// session. Never fails.
#[derive(Debug, Clone)]
pub struct SimulatedStorage {
    delay: Duration,
}

impl SimulatedStorage {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for SimulatedStorage {
    fn default() -> Self {
        Self::new(DEFAULT_SIMULATED_DELAY)
    }
}

#[async_trait]
impl ResourceStorage for SimulatedStorage {
    async fn upload_resource(&self, file: &SelectedFile, name: &str) -> StorageResult<Resource> {
        tokio::time::sleep(self.delay).await;

        let url = format!("blob:session/{}", uuid::Uuid::new_v4());
        Ok(build_resource(new_resource_id(), file, name, url))
    }
}

/// Writes files into the uploads directory, which the server exposes under
/// `public_prefix`.
#[derive(Debug, Clone)]
pub struct DiskStorage {
    dir: PathBuf,
    public_prefix: String,
}

impl DiskStorage {
    pub fn new<P: Into<PathBuf>, S: Into<String>>(dir: P, public_prefix: S) -> Self {
        Self {
            dir: dir.into(),
            public_prefix: public_prefix.into(),
        }
    }

    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[async_trait]
impl ResourceStorage for DiskStorage {
    #[tracing::instrument(skip(self, file), fields(file = file.name(), size = file.size()))]
    async fn upload_resource(&self, file: &SelectedFile, name: &str) -> StorageResult<Resource> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let id = new_resource_id();
        // ids can repeat within a millisecond, stored files must not
        let stored_name = format!(
            "{}-{}-{}",
            id,
            uuid::Uuid::new_v4().simple(),
            sanitize_filename(file.name())
        );
        let mut fd = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(self.dir.join(&stored_name))
            .await?;
        fd.write_all(file.bytes()).await?;
        fd.flush().await?;
        tracing::debug!("stored upload as {}", stored_name);

        let url = format!("{}{}", self.public_prefix, stored_name);
        Ok(build_resource(id, file, name, url))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn simulated_waits_and_builds_resource() {
        let storage = SimulatedStorage::default();
        let file = SelectedFile::new("clip.webm", "", vec![0u8; 300]);

        let started = tokio::time::Instant::now();
        let resource = storage.upload_resource(&file, "Clip").await.unwrap();

        assert!(started.elapsed() >= DEFAULT_SIMULATED_DELAY);
        assert_eq!(resource.name(), "Clip");
        assert_eq!(resource.media_type(), "video");
        assert_eq!(resource.size(), 300);
        assert!(resource.url().starts_with("blob:session/"));
        assert!(resource.id().parse::<i64>().is_ok());
        assert!(chrono::DateTime::parse_from_rfc3339(resource.date_added()).is_ok());
    }

    #[tokio::test]
    async fn disk_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DiskStorage::new(dir.path().join("uploads"), "/api/v1/static/");
        let file = SelectedFile::new("my notes.txt", "text/plain", b"hello".to_vec());

        let resource = storage.upload_resource(&file, "Notes").await.unwrap();

        assert_eq!(resource.media_type(), "text/plain");
        let stored = resource.url().strip_prefix("/api/v1/static/").unwrap();
        assert!(stored.ends_with("-my_notes.txt"));
        let written = std::fs::read(storage.dir().join(stored)).unwrap();
        assert_eq!(written, b"hello");
    }

    #[tokio::test]
    async fn disk_keeps_same_named_uploads_apart() {
        let dir = tempfile::tempdir().unwrap();
        let storage = DiskStorage::new(dir.path(), "/s/");
        let first = SelectedFile::new("a.txt", "text/plain", b"first".to_vec());
        let second = SelectedFile::new("a.txt", "text/plain", b"second".to_vec());

        let a = storage.upload_resource(&first, "A").await.unwrap();
        let b = storage.upload_resource(&second, "B").await.unwrap();

        assert_ne!(a.url(), b.url());
        let read = |r: &Resource| {
            let stored = r.url().strip_prefix("/s/").unwrap().to_string();
            std::fs::read(dir.path().join(stored)).unwrap()
        };
        assert_eq!(read(&a), b"first");
        assert_eq!(read(&b), b"second");
    }
}
