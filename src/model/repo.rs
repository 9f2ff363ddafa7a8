use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum ResourceType {
    Module,
    Lesson,
    Resource,
    EditSession,
}

#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, limit: i64, offset: i64) -> Self {
        Self {
            items,
            total,
            limit,
            offset,
        }
    }

    /// Cuts one page out of an ordered list.
    pub fn slice(all: &[T], limit: i64, offset: i64) -> Self
    where
        T: Clone,
    {
        let start = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
        let take = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
        let items = all.iter().skip(start).take(take).cloned().collect();
        Self::new(items, all.len() as i64, limit, offset)
    }
}

pub trait ResourceTyped {
    fn get_resource_type() -> ResourceType;
}
