pub mod handlers;
pub mod routes;

pub use routes::{create_http_routes, create_static_routes, not_found};
