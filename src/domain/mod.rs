pub mod booking;
pub mod destination;
pub mod error;
pub mod repositories;

// Re-export commonly used types
pub use booking::{
    Booking, BookingFilter, BookingPage, BookingRepository, BookingStatistics, BookingStatus,
    CancellationRecord, ContactInfo, PaymentMethod, PaymentStatus, Quote, RefundTier, StayPeriod,
    MAX_GUESTS, MIN_GUESTS,
};
pub use destination::{Destination, DestinationRepository};
pub use error::{DomainError, DomainResult};
pub use repositories::RepositoryProvider;
