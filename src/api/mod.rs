//! API Module
//!
//! HTTP handlers and routing for the proxy demo server.
//!
//! # Endpoints
//! - `GET /data/:id` - Read a record through the cache
//! - `PUT /data/:id` - Write a record through the proxy
//! - `GET /stats` - Proxy statistics
//! - `GET /log`, `DELETE /log` - Read or clear the access log
//! - `DELETE /cache` - Clear the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
