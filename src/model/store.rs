use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

use crate::model::{
    entity::{Course, Module, ModuleId, Resource},
    error::{StoreError, StoreResult},
    repo::Page,
};

/// In-memory course state. Clones share the same data, like a pool handle.
#[derive(Debug, Clone, Default)]
pub struct CourseStore {
    inner: Arc<RwLock<Course>>,
}

impl CourseStore {
    pub fn new(course: Course) -> Self {
        Self {
            inner: Arc::new(RwLock::new(course)),
        }
    }

    /// Loads and validates a JSON course document.
    pub async fn load(path: &Path) -> StoreResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let course = Course::from_json(&bytes)?;

        let issues = course.validate();
        if let Some(issue) = issues.first() {
            return Err(StoreError::InvalidCourse(issue.to_string()));
        }

        tracing::debug!(
            "loaded {} modules and {} resources from {}",
            course.modules.len(),
            course.resources.len(),
            path.display()
        );
        Ok(Self::new(course))
    }

    pub fn modules(&self) -> Vec<Module> {
        self.read(|course| course.modules.clone())
    }

    pub fn module(&self, id: ModuleId) -> Option<Module> {
        self.read(|course| course.modules.iter().find(|m| m.id() == id).cloned())
    }

    /// Replaces the stored module with the same id.
    pub fn update_module(&self, module: Module) -> StoreResult<()> {
        let mut course = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        let slot = course
            .modules
            .iter_mut()
            .find(|m| m.id() == module.id())
            .ok_or(StoreError::ModuleNotFound(module.id()))?;
        *slot = module;
        Ok(())
    }

    pub fn resources(&self) -> Vec<Resource> {
        self.read(|course| course.resources.clone())
    }

    pub fn resources_page(&self, limit: i64, offset: i64) -> Page<Resource> {
        self.read(|course| Page::slice(&course.resources, limit, offset))
    }

    pub fn add_resource(&self, resource: Resource) {
        let mut course = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        course.resources.push(resource);
    }

    fn read<T>(&self, f: impl FnOnce(&Course) -> T) -> T {
        let course = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&course)
    }
}
