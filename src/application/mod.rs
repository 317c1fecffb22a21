//! Application layer: booking lifecycle and availability use cases

pub mod availability;
pub mod booking_service;

pub use availability::AvailabilityChecker;
pub use booking_service::{
    Actor, BookingService, CancellationOutcome, CreateBooking, Role,
};
