mod access;
pub use access::{Authorizer, EDITOR_ROLES, StaticRoles, UserRole};

pub mod entity;

mod error;
pub use error::{StoreError, StoreResult};

mod repo;
pub use repo::{Page, ResourceType, ResourceTyped};

mod store;
pub use store::CourseStore;

#[derive(Debug, Clone, Default)]
pub struct ModelManager {
    store: CourseStore,
}

impl ModelManager {
    pub fn new(store: CourseStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &CourseStore {
        &self.store
    }
}
