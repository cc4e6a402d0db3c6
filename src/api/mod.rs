//! E-Recycle Scanner API Module
//! HTTP binding for the barcode resolver

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use handlers::AppState;
pub use routes::create_router;
pub use types::*;
