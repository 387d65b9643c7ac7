//! Mock booking gateway for testing.

use crate::error::{FlightError, Result};
use crate::models::BookingData;
use crate::providers::BookingGateway;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A call the mock gateway received, for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    /// Session reset.
    ResetSession,
    /// Club membership enrollment.
    AddClubMembership {
        /// Signup credential sent.
        signup: Option<String>,
    },
    /// Configuration refresh.
    RefreshConfiguration,
    /// Booking re-fetch.
    FetchBooking,
    /// Point multiplier refresh.
    RefreshPointMultipliers,
    /// Ancillary availability load.
    LoadAncillaryAvailability,
    /// Bundle re-pricing.
    RepriceBundles {
        /// Bundle codes sent.
        bundle_codes: Vec<String>,
    },
}

#[derive(Debug, Default)]
struct Inner {
    failing: bool,
    booking: Option<BookingData>,
    calls: Vec<GatewayCall>,
}

/// Mock booking gateway.
///
/// Succeeds by default; `with_failure` makes every call fail.
#[derive(Debug, Clone, Default)]
pub struct MockBookingGateway {
    inner: Arc<Mutex<Inner>>,
}

impl MockBookingGateway {
    /// Create a mock where every call succeeds.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make every gateway call fail.
    #[must_use]
    pub fn with_failure(self) -> Self {
        self.locked().failing = true;
        self
    }

    /// Script the booking returned by `fetch_booking`.
    #[must_use]
    pub fn with_booking(self, booking: BookingData) -> Self {
        self.locked().booking = Some(booking);
        self
    }

    /// The calls received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.locked().calls.clone()
    }

    fn record(&self, call: GatewayCall) -> Result<()> {
        let mut inner = self.locked();
        inner.calls.push(call);
        if inner.failing {
            Err(FlightError::Booking("gateway failure".into()))
        } else {
            Ok(())
        }
    }
}

impl BookingGateway for MockBookingGateway {
    fn reset_session(&self) -> impl Future<Output = Result<()>> + Send {
        let result = self.record(GatewayCall::ResetSession);
        async move { result }
    }

    fn add_club_membership(
        &self,
        signup: Option<&str>,
    ) -> impl Future<Output = Result<()>> + Send {
        let result = self.record(GatewayCall::AddClubMembership {
            signup: signup.map(ToOwned::to_owned),
        });
        async move { result }
    }

    fn refresh_configuration(&self) -> impl Future<Output = Result<()>> + Send {
        let result = self.record(GatewayCall::RefreshConfiguration);
        async move { result }
    }

    fn fetch_booking(&self) -> impl Future<Output = Result<BookingData>> + Send {
        let result = self.record(GatewayCall::FetchBooking).map(|()| {
            self.locked().booking.clone().unwrap_or(BookingData {
                record_locator: "MOCK01".into(),
                amount_due: 0.0,
                award_point_total: 0,
                seat_remapping_needed: false,
            })
        });
        async move { result }
    }

    fn refresh_point_multipliers(&self) -> impl Future<Output = Result<()>> + Send {
        let result = self.record(GatewayCall::RefreshPointMultipliers);
        async move { result }
    }

    fn load_ancillary_availability(&self) -> impl Future<Output = Result<()>> + Send {
        let result = self.record(GatewayCall::LoadAncillaryAvailability);
        async move { result }
    }

    fn reprice_bundles(
        &self,
        bundle_codes: &[String],
    ) -> impl Future<Output = Result<()>> + Send {
        let result = self.record(GatewayCall::RepriceBundles {
            bundle_codes: bundle_codes.to_vec(),
        });
        async move { result }
    }
}
