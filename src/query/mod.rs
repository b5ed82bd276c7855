pub mod engine;
pub mod error;
pub mod filter;
pub mod filter_order;
pub mod filter_where;
pub mod params;
pub mod types;

pub use engine::{query, QueryResult};
pub use error::QueryError;
pub use filter::Filter;
pub use params::{ListParams, ListQuery};
pub use types::*;
