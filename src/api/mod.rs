//! API Module
//!
//! HTTP handlers and routing for the title cache REST API.
//!
//! # Endpoints
//! - `PUT /titles` - Cache a numbered title
//! - `GET /titles/:name` - Look up a title by question name
//! - `GET /partitions` - Partition occupancy
//! - `GET /stats` - Cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
