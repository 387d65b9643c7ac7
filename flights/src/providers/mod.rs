//! External collaborators of the fare workflow.
//!
//! This module defines traits for every dependency the workflow reaches
//! outside itself for. Providers are **interfaces**, not implementations:
//! the reducers depend on these traits, and the shell provides concrete
//! implementations.
//!
//! This enables:
//! - **Testing**: use mocks (in-memory, deterministic)
//! - **Production**: use real services (availability API, modal host,
//!   booking API, browser storage)

pub mod availability;
pub mod booking;
pub mod confirmation;
pub mod storage;

// Re-export provider traits
pub use availability::AvailabilityClient;
pub use booking::BookingGateway;
pub use confirmation::{
    ClubUpsellResponse, ConfirmationHost, Dialog, DialogResponse, InsufficientPointsResponse,
};
pub use storage::SessionStorage;
