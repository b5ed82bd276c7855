use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::store::{Entity, Store};
use crate::query::engine::{apply_filter, apply_sort, paginate, query};
use crate::query::{FilterSpec, ListQuery, QueryResult, SortSpec};

/// Process-local store kept in insertion order.
pub struct MemoryStore<T> {
    records: Arc<RwLock<Vec<T>>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    pub fn with_records(records: Vec<T>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Entity> Store<T> for MemoryStore<T> {
    async fn count_matching(&self, filter: Option<&FilterSpec>) -> Result<u64, DatabaseError> {
        let records = self.records.read().await;
        Ok(apply_filter(records.iter(), filter).len() as u64)
    }

    async fn fetch_page(
        &self,
        filter: Option<&FilterSpec>,
        sort: Option<&SortSpec>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<T>, DatabaseError> {
        let records = self.records.read().await;
        let mut matching = apply_filter(records.iter(), filter);
        apply_sort(&mut matching, sort);
        Ok(paginate(&matching, offset, limit))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, DatabaseError> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, mut record: T) -> Result<T, DatabaseError> {
        if record.id().is_nil() {
            record.set_id(Uuid::new_v4());
        }
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(DatabaseError::Conflict(format!(
                "{} record {} already exists",
                T::TABLE,
                record.id()
            )));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, id: Uuid, mut record: T) -> Result<Option<T>, DatabaseError> {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id() == id) {
            Some(existing) => {
                record.set_id(id);
                *existing = record.clone();
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<Option<T>, DatabaseError> {
        let mut records = self.records.write().await;
        Ok(records
            .iter()
            .position(|r| r.id() == id)
            .map(|index| records.remove(index)))
    }

    async fn delete_where(&self, column: &'static str, id: Uuid) -> Result<u64, DatabaseError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.uuid_value(column) != Some(id));
        Ok((before - records.len()) as u64)
    }

    /// Count and page come from one snapshot of the collection.
    async fn list(&self, request: &ListQuery) -> Result<QueryResult<T>, DatabaseError> {
        let records = self.records.read().await;
        Ok(query(&records, request))
    }
}
