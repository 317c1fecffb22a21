//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod booking_repository;
pub mod destination_repository;
pub mod repository_provider;

pub use repository_provider::SeaOrmRepositoryProvider;
