pub mod dto;
pub mod extract;
pub mod response;
pub mod validation;

pub use extract::ApiJson;
pub use response::{Created, PagedResponse};
