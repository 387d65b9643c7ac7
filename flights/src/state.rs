//! State types for the fare selection store.
//!
//! The whole workflow operates on a single [`FlightState`] snapshot. Only
//! the store reducer's pure transitions may change it; every other
//! component reads it and proposes new intents.

use crate::error::FlightError;
use crate::models::{
    BookingData, Flow, Journey, JourneyFare, LowFareResult, LowFareView, PackageInventory,
    PointsCashMode, Route, SearchRequest, SearchResult, SeasonalNotice, SubFlow, UserProfile,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Sparse per-leg fare selections.
///
/// Keys are leg indices; absence of a key means "no selection for this
/// leg". The map is ordered so validation can scan legs in ascending
/// index order.
pub type FareSelections = BTreeMap<usize, JourneyFare>;

/// Root state of the fare search and purchase workflow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlightState {
    /// Latest enriched search result.
    pub search_result: Option<SearchResult>,

    /// Latest low-fare calendar result.
    pub low_fare_result: Option<LowFareResult>,

    /// Current per-leg fare selections.
    pub fare_selections: FareSelections,

    /// Shadow copy of the selections as they were before the most recent
    /// change, for rollback and diffing.
    pub previous_fare_selections: FareSelections,

    /// Per-leg low-fare calendar view selections.
    pub low_fare_views: BTreeMap<usize, LowFareView>,

    /// Pending availability searches. Incremented on request start,
    /// decremented on completion or failure; callers keep start/stop
    /// pairs balanced, the counter never clamps.
    pub search_loading: i32,

    /// Pending low-fare searches, same discipline as `search_loading`.
    pub low_fare_search_loading: i32,

    /// Points/cash mode of the active booking.
    pub points_cash_mode: PointsCashMode,

    /// Redemption fee for the active award booking.
    pub redemption_fee: f64,

    /// The search input as currently edited, kept alongside results so
    /// re-searches (points toggle, session reset) can reuse it.
    pub search_input: Option<SearchRequest>,

    /// Seasonal service notices loaded from configuration.
    pub seasonal_notices: Vec<SeasonalNotice>,

    /// The active user, when logged in.
    pub user: Option<UserProfile>,

    /// Booking context shared with the purchase steps.
    pub booking: BookingContext,

    /// Inventory of the package search paired with this flight search.
    pub package_result: Option<PackageInventory>,

    /// Navigation context the routing decision reads.
    pub navigation: NavigationContext,

    /// Global error list surfaced to the user.
    pub errors: Vec<FlightError>,
}

/// Booking context read and written by the purchase steps.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingContext {
    /// Data of the in-progress booking, set by sell/modify responses.
    pub data: Option<BookingData>,

    /// Modify flows: the already-booked journeys, in leg order.
    pub active_journeys: Vec<Journey>,

    /// Bundle codes already selected on the booking.
    pub selected_bundle_codes: Vec<String>,
}

/// Navigation context for routing decisions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationContext {
    /// Flow the user is currently in.
    pub flow: Flow,

    /// Current URL without parameters.
    pub current_url: String,

    /// Last route the workflow decided on.
    pub current_route: Option<Route>,

    /// Active sub-flow marker, if any.
    pub sub_flow: Option<SubFlow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_empty() {
        let state = FlightState::default();

        assert!(state.search_result.is_none());
        assert!(state.fare_selections.is_empty());
        assert_eq!(state.search_loading, 0);
        assert_eq!(state.points_cash_mode, PointsCashMode::Unset);
        assert!(state.errors.is_empty());
    }
}
