//! Storage backends outside the primary database

pub mod memory;

pub use memory::InMemoryRepositories;
