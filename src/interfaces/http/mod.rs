//! HTTP REST API interfaces
//!
//! - `auth`: gateway-asserted identity extraction
//! - `common`: response envelope, pagination, validated JSON extractor
//! - `modules`: request handlers for all resources
//! - `router`: API router with Swagger documentation

pub mod auth;
pub mod common;
pub mod modules;
pub mod router;

pub use router::create_api_router;
