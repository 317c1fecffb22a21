//! # Tripvar Booking Service
//!
//! Reservation engine for the Tripvar travel platform: turns a guest's
//! date-range request into a non-overlapping, priced booking against a
//! destination's calendar, and reverses it under a tiered refund policy.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: Core business entities, types and traits
//! - **application**: Booking lifecycle and availability use cases
//! - **infrastructure**: External concerns (database, storage backends)
//! - **interfaces**: REST API with Swagger documentation
//! - **notifications**: Event bus feeding the notification pipeline
//! - **shared**: Pagination and retry helpers

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod notifications;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositories, SeaOrmRepositoryProvider,
};

// Re-export API router
pub use interfaces::http::create_api_router;

// Re-export notifications
pub use notifications::{create_event_bus, Event, EventBus, SharedEventBus};
