pub mod auth;
pub mod fault;
pub mod guard;

pub use auth::{jwt_auth_middleware, AuthUser};
pub use fault::handle_panic;
pub use guard::{role_guard, AccessPolicy, AccessRule};
