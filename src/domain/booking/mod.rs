//! Booking aggregate: entity, stay period, pricing, refund policy, repository

pub mod model;
pub mod period;
pub mod pricing;
pub mod refund;
pub mod repository;

pub use model::{
    Booking, BookingStatus, ContactInfo, PaymentMethod, PaymentStatus, MAX_GUESTS, MIN_GUESTS,
};
pub use period::StayPeriod;
pub use pricing::Quote;
pub use refund::RefundTier;
pub use repository::{
    BookingFilter, BookingPage, BookingRepository, BookingStatistics, CancellationRecord,
};
