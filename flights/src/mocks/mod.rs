//! Mock providers for testing.
//!
//! Mocks simulate the external collaborators deterministically: scripted
//! responses, recorded calls, no I/O. They are compiled under the
//! `test-utils` feature (on by default) so integration tests and
//! downstream crates can drive full workflows without a network.

pub mod availability;
pub mod booking;
pub mod confirmation;
pub mod storage;

pub use availability::{MockAvailabilityClient, RecordedCall};
pub use booking::{GatewayCall, MockBookingGateway};
pub use confirmation::MockConfirmationHost;
pub use storage::MockSessionStorage;

use crate::environment::FlightEnvironment;
use fareflow_core::environment::FixedClock;

/// A fully mocked environment at a fixed instant.
///
/// The clock reads 2024-06-01T12:00:00Z.
#[must_use]
pub fn mock_environment() -> FlightEnvironment<
    MockAvailabilityClient,
    MockConfirmationHost,
    MockBookingGateway,
    MockSessionStorage,
    FixedClock,
> {
    FlightEnvironment::new(
        MockAvailabilityClient::new(),
        MockConfirmationHost::new(),
        MockBookingGateway::new(),
        MockSessionStorage::new(),
        FixedClock {
            time: chrono::DateTime::from_timestamp(1_717_243_200, 0).unwrap_or_default(),
        },
    )
}
