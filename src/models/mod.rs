//! Request and Response models for the title cache API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::InsertRequest;
pub use responses::{
    ErrorResponse, HealthResponse, InsertResponse, LookupResponse, PartitionsResponse,
    StatsResponse,
};
