//! Destination aggregate (read-side of the external catalog)

pub mod model;
pub mod repository;

pub use model::{Destination, DEFAULT_MAX_GUESTS};
pub use repository::DestinationRepository;
