//! Real-time booking event notifications
//!
//! The booking lifecycle publishes here; the external notification pipeline
//! subscribes. Consumers are decoupled from the success path of the
//! operations that emit.

pub mod event_bus;
pub mod events;

pub use event_bus::{create_event_bus, EventBus, EventSubscriber, SharedEventBus};
pub use events::{BookingCancelledEvent, BookingConfirmedEvent, Event, EventMessage};
