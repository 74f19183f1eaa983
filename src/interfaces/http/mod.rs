//! HTTP REST API interfaces
//!
//! - `common`: error envelope and validated JSON extraction
//! - `middleware`: role-gated JWT authorization
//! - `modules`: per-resource DTOs and handlers
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
