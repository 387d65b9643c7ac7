//! Error types for the fare search and purchase workflow.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for flight workflow operations.
pub type Result<T> = std::result::Result<T, FlightError>;

/// Error taxonomy for the fare workflow.
///
/// Validation errors are produced synchronously by workflow steps and
/// replace the remaining continuation. Transport errors are caught at the
/// effect boundary and converted into the same global error list, paired
/// with a loading-counter decrement where a counter was incremented.
///
/// The `Display` output of each variant is its stable error key, surfaced
/// verbatim to the UI layer.
#[derive(Debug, Error, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlightError {
    // ═══════════════════════════════════════════════════════════
    // Validation Errors
    // ═══════════════════════════════════════════════════════════
    /// Search criteria dates are not in non-decreasing order.
    #[error("invalid-search-dates")]
    InvalidSearchDates,

    /// Selected departures are not strictly increasing across legs.
    #[error("invalid-fare-selections")]
    InvalidFareSelections,

    /// A selected journey no longer exists in the latest search result.
    #[error("invalid-fare-selection-journey-not-found")]
    FareSelectionJourneyNotFound,

    /// A selected fare key no longer exists in the latest search result.
    #[error("invalid-fare-selection-fare-not-found")]
    FareSelectionFareNotFound,

    /// No eligible fare could be found for at least one leg.
    #[error("lowest-fare-unavailable")]
    LowestFareUnavailable,

    // ═══════════════════════════════════════════════════════════
    // Transport Errors
    // ═══════════════════════════════════════════════════════════
    /// An availability request (search, low fare, redemption fee) failed.
    #[error("availability-request-failed: {0}")]
    Availability(String),

    /// A sell or modify-sell request failed.
    #[error("sell-request-failed: {0}")]
    Sell(String),

    /// A booking collaborator call (session reset, club membership,
    /// configuration, ancillary, bundle pricing) failed.
    #[error("booking-request-failed: {0}")]
    Booking(String),
}

impl FlightError {
    /// Returns `true` if this error was produced by a validation step
    /// rather than a failed collaborator call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidSearchDates
                | Self::InvalidFareSelections
                | Self::FareSelectionJourneyNotFound
                | Self::FareSelectionFareNotFound
                | Self::LowestFareUnavailable
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_stable_error_key() {
        assert_eq!(
            FlightError::InvalidSearchDates.to_string(),
            "invalid-search-dates"
        );
        assert_eq!(
            FlightError::InvalidFareSelections.to_string(),
            "invalid-fare-selections"
        );
    }

    #[test]
    fn transport_errors_are_not_validation() {
        assert!(FlightError::InvalidSearchDates.is_validation());
        assert!(!FlightError::Availability("timeout".into()).is_validation());
    }
}
