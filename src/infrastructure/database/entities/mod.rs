//! SeaORM entities

pub mod booking;
pub mod destination;
