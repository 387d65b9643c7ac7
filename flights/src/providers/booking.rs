//! Booking gateway trait.

use crate::error::Result;
use crate::models::BookingData;

/// Booking gateway.
///
/// Abstracts the booking-session collaborators the purchase workflow
/// chains into after a sell: session control, club membership,
/// configuration, ancillary availability, and bundle pricing.
pub trait BookingGateway: Send + Sync {
    /// Reset the booking session.
    ///
    /// # Errors
    ///
    /// Returns an error if the reset fails; the pending continuation is
    /// dropped.
    fn reset_session(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Add a club membership to the booking.
    ///
    /// `signup` carries the enrollment credential for newly enrolling
    /// members; `None` enrolls the logged-in user directly.
    ///
    /// # Errors
    ///
    /// Returns an error if enrollment fails; the pending continuation is
    /// dropped.
    fn add_club_membership(
        &self,
        signup: Option<&str>,
    ) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Refresh the booking configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh fails.
    fn refresh_configuration(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Re-fetch the in-progress booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch fails.
    fn fetch_booking(&self) -> impl std::future::Future<Output = Result<BookingData>> + Send;

    /// Refresh the loyalty point base multipliers.
    ///
    /// # Errors
    ///
    /// Returns an error if the refresh fails.
    fn refresh_point_multipliers(&self) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Load ancillary availability for the booking.
    ///
    /// # Errors
    ///
    /// Returns an error if the load fails; the pending continuation is
    /// dropped.
    fn load_ancillary_availability(&self)
    -> impl std::future::Future<Output = Result<()>> + Send;

    /// Re-price the bundles already selected on the booking.
    ///
    /// # Errors
    ///
    /// Returns an error if pricing fails.
    fn reprice_bundles(
        &self,
        bundle_codes: &[String],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
