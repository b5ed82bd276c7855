use async_trait::async_trait;
use sqlx::{postgres::PgRow, FromRow};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::query::{FilterSpec, ListQuery, Listable, Page, PageMeta, QueryResult, SortSpec, SqlParam};

/// A record kept in one of the entity stores.
pub trait Entity:
    Listable + Clone + Send + Sync + Unpin + for<'r> FromRow<'r, PgRow> + 'static
{
    fn id(&self) -> Uuid;
    fn set_id(&mut self, id: Uuid);

    /// Persisted column/value pairs, id first.
    fn values(&self) -> Vec<(&'static str, SqlParam)>;

    /// Uuid stored in `column`, if that column holds one.
    fn uuid_value(&self, column: &str) -> Option<Uuid> {
        self.values().into_iter().find_map(|(c, v)| match v {
            SqlParam::Uuid(id) if c == column => Some(id),
            _ => None,
        })
    }
}

/// Storage port for one entity type.
///
/// Both backends honor the same list contract: filter before counting, sort
/// before slicing, and report the matching total independent of the page.
#[async_trait]
pub trait Store<T: Entity>: Send + Sync {
    async fn count_matching(&self, filter: Option<&FilterSpec>) -> Result<u64, DatabaseError>;

    async fn fetch_page(
        &self,
        filter: Option<&FilterSpec>,
        sort: Option<&SortSpec>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<T>, DatabaseError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, DatabaseError>;

    /// Insert a record. A nil id is replaced with a fresh one.
    async fn insert(&self, record: T) -> Result<T, DatabaseError>;

    /// Replace the mutable fields of `id`. `None` when it does not exist.
    async fn update(&self, id: Uuid, record: T) -> Result<Option<T>, DatabaseError>;

    /// Remove `id` and return what was removed.
    async fn delete(&self, id: Uuid) -> Result<Option<T>, DatabaseError>;

    /// Remove every record whose `column` equals `id`. Returns the count removed.
    async fn delete_where(&self, column: &'static str, id: Uuid) -> Result<u64, DatabaseError>;

    /// Evaluate a full list query.
    async fn list(&self, query: &ListQuery) -> Result<QueryResult<T>, DatabaseError> {
        let total_matching = self.count_matching(query.filter.as_ref()).await?;
        let offset = query.page.offset();
        let items = if offset >= total_matching {
            Vec::new()
        } else {
            self.fetch_page(query.filter.as_ref(), query.sort.as_ref(), offset, query.page.size)
                .await?
        };
        Ok(QueryResult { items, total_matching })
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Run `query` against `store` and attach pagination metadata.
pub async fn list_page<T: Entity>(store: &dyn Store<T>, query: &ListQuery) -> Result<Page<T>, DatabaseError> {
    let result = store.list(query).await?;
    Ok(Page {
        meta: PageMeta::new(&query.page, result.total_matching),
        items: result.items,
    })
}
