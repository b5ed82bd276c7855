use std::marker::PhantomData;

use async_trait::async_trait;
use sqlx::postgres::PgArguments;
use sqlx::{PgPool, Postgres, Row};
use uuid::Uuid;

use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::store::{Entity, Store};
use crate::query::filter::validate_identifier;
use crate::query::{Filter, FilterSpec, SortSpec, SqlParam};

type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;
type PgQueryAs<'q, O> = sqlx::query::QueryAs<'q, Postgres, O, PgArguments>;

/// Store backed by one Postgres table per entity.
pub struct PgStore<T> {
    pool: PgPool,
    _phantom: PhantomData<T>,
}

impl<T: Entity> PgStore<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    fn filter(&self, filter: Option<&FilterSpec>) -> Result<Filter, DatabaseError> {
        let mut built = Filter::new(T::TABLE)?;
        built.where_filter(filter);
        Ok(built)
    }
}

#[async_trait]
impl<T: Entity> Store<T> for PgStore<T> {
    async fn count_matching(&self, filter: Option<&FilterSpec>) -> Result<u64, DatabaseError> {
        let sql = self.filter(filter)?.to_count_sql()?;
        let mut q = sqlx::query(&sql.query);
        for p in &sql.params {
            q = bind_param_query(q, p);
        }
        let row = q.fetch_one(&self.pool).await?;
        let count: i64 = row.try_get("count")?;
        Ok(count.max(0) as u64)
    }

    async fn fetch_page(
        &self,
        filter: Option<&FilterSpec>,
        sort: Option<&SortSpec>,
        offset: u64,
        limit: u64,
    ) -> Result<Vec<T>, DatabaseError> {
        let mut built = self.filter(filter)?;
        built.order(sort).limit(limit, offset);
        let sql = built.to_sql()?;
        let mut q = sqlx::query_as::<_, T>(&sql.query);
        for p in &sql.params {
            q = bind_param_query_as(q, p);
        }
        Ok(q.fetch_all(&self.pool).await?)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<T>, DatabaseError> {
        let sql = format!("SELECT * FROM \"{}\" WHERE \"id\" = $1", T::TABLE);
        Ok(sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn insert(&self, mut record: T) -> Result<T, DatabaseError> {
        if record.id().is_nil() {
            record.set_id(Uuid::new_v4());
        }
        let values = record.values();
        let columns = values
            .iter()
            .map(|(c, _)| format!("\"{}\"", c))
            .collect::<Vec<_>>()
            .join(", ");
        let placeholders = (1..=values.len())
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO \"{}\" ({}) VALUES ({}) RETURNING *",
            T::TABLE,
            columns,
            placeholders
        );

        let mut q = sqlx::query_as::<_, T>(&sql);
        for (_, v) in &values {
            q = bind_param_query_as(q, v);
        }
        q.fetch_one(&self.pool).await.map_err(map_write_error)
    }

    async fn update(&self, id: Uuid, record: T) -> Result<Option<T>, DatabaseError> {
        // Skip the id column; the path id wins.
        let values: Vec<_> = record.values().into_iter().skip(1).collect();
        let assignments = values
            .iter()
            .enumerate()
            .map(|(i, (c, _))| format!("\"{}\" = ${}", c, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE \"{}\" SET {} WHERE \"id\" = ${} RETURNING *",
            T::TABLE,
            assignments,
            values.len() + 1
        );

        let mut q = sqlx::query_as::<_, T>(&sql);
        for (_, v) in &values {
            q = bind_param_query_as(q, v);
        }
        q.bind(id).fetch_optional(&self.pool).await.map_err(map_write_error)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<T>, DatabaseError> {
        let sql = format!("DELETE FROM \"{}\" WHERE \"id\" = $1 RETURNING *", T::TABLE);
        sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_write_error)
    }

    async fn delete_where(&self, column: &'static str, id: Uuid) -> Result<u64, DatabaseError> {
        validate_identifier(column).map_err(DatabaseError::QueryError)?;
        let sql = format!("DELETE FROM \"{}\" WHERE \"{}\" = $1", T::TABLE, column);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        DatabaseManager::health_check(&self.pool).await
    }
}

/// Map constraint violations to conflicts; everything else stays a driver error.
pub(crate) fn map_write_error(err: sqlx::Error) -> DatabaseError {
    if let sqlx::Error::Database(db) = &err {
        match db.code().as_deref() {
            Some("23505") => return DatabaseError::Conflict("Record already exists".to_string()),
            Some("23503") => {
                return DatabaseError::Conflict("Record is referenced by other records".to_string())
            }
            _ => {}
        }
    }
    DatabaseError::Sqlx(err)
}

fn bind_param_query<'q>(q: PgQuery<'q>, v: &'q SqlParam) -> PgQuery<'q> {
    match v {
        SqlParam::Uuid(id) => q.bind(*id),
        SqlParam::Text(s) => q.bind(s.as_str()),
        SqlParam::OptText(s) => q.bind(s.as_deref()),
        SqlParam::Float(f) => q.bind(*f),
        SqlParam::Int(i) => q.bind(*i),
    }
}

fn bind_param_query_as<'q, O>(q: PgQueryAs<'q, O>, v: &'q SqlParam) -> PgQueryAs<'q, O>
where
    O: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        SqlParam::Uuid(id) => q.bind(*id),
        SqlParam::Text(s) => q.bind(s.as_str()),
        SqlParam::OptText(s) => q.bind(s.as_deref()),
        SqlParam::Float(f) => q.bind(*f),
        SqlParam::Int(i) => q.bind(*i),
    }
}
