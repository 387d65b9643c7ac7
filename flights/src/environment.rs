//! Flight workflow environment.
//!
//! This module defines the environment type for dependency injection in
//! the flight reducers.

use crate::providers::{AvailabilityClient, BookingGateway, ConfirmationHost, SessionStorage};
use fareflow_core::environment::Clock;

/// Flight workflow environment.
///
/// Contains all external dependencies needed by the flight reducers.
///
/// # Type Parameters
///
/// - `A`: Availability client
/// - `C`: Confirmation host
/// - `B`: Booking gateway
/// - `G`: Session storage
/// - `K`: Clock
#[derive(Clone)]
pub struct FlightEnvironment<A, C, B, G, K>
where
    A: AvailabilityClient + Clone,
    C: ConfirmationHost + Clone,
    B: BookingGateway + Clone,
    G: SessionStorage + Clone,
    K: Clock + Clone,
{
    /// Availability client.
    pub availability: A,

    /// Confirmation host.
    pub confirmations: C,

    /// Booking gateway.
    pub booking: B,

    /// Session storage for analytics timestamps.
    pub storage: G,

    /// Clock.
    pub clock: K,
}

impl<A, C, B, G, K> FlightEnvironment<A, C, B, G, K>
where
    A: AvailabilityClient + Clone,
    C: ConfirmationHost + Clone,
    B: BookingGateway + Clone,
    G: SessionStorage + Clone,
    K: Clock + Clone,
{
    /// Create a new flight environment.
    #[must_use]
    pub const fn new(availability: A, confirmations: C, booking: B, storage: G, clock: K) -> Self {
        Self {
            availability,
            confirmations,
            booking,
            storage,
            clock,
        }
    }
}
