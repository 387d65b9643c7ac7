//! The intent catalog of the fare search and purchase workflow.
//!
//! Every input to the engine is a [`FlightAction`]. Workflow intents carry
//! an explicit `next` continuation: the ordered list of follow-up intents
//! to dispatch once the step succeeds. Validating steps forward `next`
//! unchanged on success and replace it with a single error intent on
//! failure; effectful steps prepend their own result-setting intents
//! ahead of it.

use crate::error::FlightError;
use crate::models::{
    BookingData, JourneyFare, LowFarePayload, LowFareSearchRequest, LowFareView,
    PackageInventory, PointsCashMode, Route, SearchPayload, SearchRequest, SeasonalNotice,
    SubFlow, UserProfile,
};
use serde::{Deserialize, Serialize};

/// Which workflow step triggered a routing decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigateTrigger {
    /// A combination search completed.
    CombinationSearch,

    /// A sell completed.
    SellTrip,

    /// A modify-sell completed.
    ModifySellTrip,
}

/// Flight workflow action.
///
/// This enum represents all possible inputs to the flight reducers:
/// workflow intents (with continuations), pure store transitions, and
/// app-level intents the orchestrations emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FlightAction {
    // ═══════════════════════════════════════════════════════════════════
    // Search workflow
    // ═══════════════════════════════════════════════════════════════════
    /// Run the full combination search chain for the current search input:
    /// clear errors and results, validate dates and seasonal service, then
    /// fan out into the low-fare search, the availability search, the
    /// routing decision, and the initial points/cash mode.
    CombinationSearch {
        /// Continuation appended to the end of the chain.
        next: Vec<FlightAction>,
    },

    /// Validate that a multi-city request's dates are non-decreasing.
    ValidateSearchDates {
        /// The request under validation.
        search: SearchRequest,
        /// Forwarded unchanged when validation passes.
        next: Vec<FlightAction>,
    },

    /// Check the request against seasonal service notices; an applicable
    /// notice opens a blocking modal and abandons the chain.
    ValidateSeasonalService {
        /// The request under validation.
        search: SearchRequest,
        /// Forwarded unchanged when no notice applies.
        next: Vec<FlightAction>,
    },

    /// Run an availability search. Points-mode requests issue the cash and
    /// points calls concurrently and merge the fares.
    Search {
        /// The request to search for.
        search: SearchRequest,
    },

    /// Run a low-fare calendar search.
    LowFareSearch {
        /// The request to search for.
        search: LowFareSearchRequest,
        /// Forwarded after the result lands; dropped on failure.
        next: Vec<FlightAction>,
    },

    /// Toggle points pricing and re-run both searches inside a session
    /// reset.
    ChangeUsePoints {
        /// The new points flag.
        use_points: bool,
        /// Whether to also clear fare selections (the default).
        clear_selections: bool,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Fare selection
    // ═══════════════════════════════════════════════════════════════════
    /// Validate the current selections against the latest search result
    /// and, in modify flows, against the already-booked journeys.
    ValidateFareSelections {
        /// Forwarded unchanged when validation passes.
        next: Vec<FlightAction>,
    },

    /// Re-resolve the first stale round-trip selection against the latest
    /// search result.
    ValidateAndUpdateFareSelection,

    /// Set or clear the selection of one leg.
    SetFareSelection {
        /// Leg index.
        index: usize,
        /// The new selection; `None` removes the leg's entry entirely.
        journey_fare: Option<JourneyFare>,
    },

    /// Rewrite every selection to its standard (or point-cash) fare.
    SelectStandardFares,

    /// Rewrite every selection to its club (or point-cash-club) fare,
    /// falling back to standard where no club fare exists.
    SelectClubFares,

    /// Select the cheapest eligible fare and journey for every leg.
    SelectLowestFares,

    /// The lowest-fare computation found a leg with no eligible fare.
    SelectLowestFaresFailure,

    /// Change the low-fare calendar view of every leg.
    ChangeLowFareView {
        /// Leg index the user changed.
        index: usize,
        /// The new view.
        view: LowFareView,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Purchase workflow
    // ═══════════════════════════════════════════════════════════════════
    /// Confirm post-midnight departures with the user before proceeding.
    GetEarlyFlightOk {
        /// Forwarded when no selection is early or the user confirms.
        next: Vec<FlightAction>,
    },

    /// Execute the purchase transaction for the current selections.
    SellTrip {
        /// Whether to add a club membership before the follow-ups run.
        add_club_membership: bool,
    },

    /// Execute the modify purchase transaction for the current selections.
    ModifySellTrip {
        /// Club signup credential collected by the upsell dialog.
        signup: Option<String>,
        /// Whether to enroll the user in the club.
        enroll_in_club: bool,
    },

    /// Offer the club upsell, then sell with club or standard fares
    /// depending on the user's choice.
    UpsellClubAndSellTrip,

    /// Select standard fares on every leg, then sell (book flow) or
    /// modify-sell (modify flows).
    SelectStandardFaresAndSellTrip,

    /// Select club fares on every leg, then sell (book flow) or
    /// modify-sell (modify flows).
    SelectClubFaresAndSellTrip {
        /// Club signup credential collected by the upsell dialog.
        signup: Option<String>,
        /// Whether to enroll the user in the club.
        enroll_in_club: bool,
    },

    /// Verify the user's point balance covers the selections before
    /// selling, offering recovery paths when it does not.
    CheckForSufficientPointsAndSellTrip {
        /// Club signup credential collected by the upsell dialog.
        signup: Option<String>,
        /// Whether to enroll the user in the club.
        enroll_in_club: bool,
    },

    /// Open the modify-flight dialog and mark the modify sub-flow.
    ShowModifyFlightModal,

    /// Decide where to route after the triggering step completed.
    Navigate {
        /// The step that triggered the decision.
        trigger: NavigateTrigger,
    },

    // ═══════════════════════════════════════════════════════════════════
    // Store transitions
    // ═══════════════════════════════════════════════════════════════════
    /// Store a search result (enriching the raw payload).
    SetSearchResult {
        /// The request that produced the payload.
        search: SearchRequest,
        /// The raw payload; `None` when the system returned no data.
        payload: Option<SearchPayload>,
    },

    /// Store a low-fare search result.
    SetLowFareSearchResult {
        /// The request that produced the payload.
        search: LowFareSearchRequest,
        /// The raw payload; `None` when the system returned no data.
        payload: Option<LowFarePayload>,
    },

    /// Clear results, selections, views, and points/cash mode together.
    ClearSearchResults,

    /// Clear fare and view selections, leaving results intact.
    ClearFareAndViewSelections,

    /// Clear fare selections only.
    ClearFareSelections,

    /// Start (`true`) or stop (`false`) one pending availability search.
    SetSearchLoading(bool),

    /// Start (`true`) or stop (`false`) one pending low-fare search.
    SetLowFareSearchLoading(bool),

    /// Set the points/cash mode of the active booking.
    SetPointsCashMode(PointsCashMode),

    /// Store the redemption fee of the active award booking.
    SetRedemptionFee(f64),

    // ═══════════════════════════════════════════════════════════════════
    // App-level intents
    // ═══════════════════════════════════════════════════════════════════
    /// Clear the global error list.
    ClearErrors,

    /// Append an error to the global error list.
    AddError(FlightError),

    /// Reset the booking session, then dispatch the continuation.
    ResetSession {
        /// Dispatched after the reset succeeds.
        next: Vec<FlightAction>,
    },

    /// Store the current search input.
    SetSearchInput(SearchRequest),

    /// Set or clear the active user.
    SetUser(Option<UserProfile>),

    /// Update the user's award program point balance.
    UpdatePointBalance(i64),

    /// Store booking data returned by a sell or modify-sell call.
    SetBookingData(Option<BookingData>),

    /// Add a club membership to the booking, then dispatch the
    /// continuation.
    AddClubMembership {
        /// Signup credential, when the member is newly enrolling.
        signup: Option<String>,
        /// Dispatched after the membership is added.
        next: Vec<FlightAction>,
    },

    /// Refresh the booking configuration.
    RefreshConfiguration,

    /// Re-fetch the in-progress booking.
    RefreshBookingData,

    /// Refresh the loyalty point base multipliers.
    RefreshPointMultipliers,

    /// Load ancillary availability, then dispatch the continuation.
    LoadAncillaryAvailability {
        /// Dispatched after availability loads.
        next: Vec<FlightAction>,
    },

    /// Re-price the bundles already selected on the booking.
    RepriceBundles,

    /// Record the routing decision for the shell to act on.
    NavigateTo(Route),

    /// Mark or clear the active sub-flow.
    SetSubFlow(Option<SubFlow>),

    /// Store the seasonal service notices.
    SetSeasonalNotices(Vec<SeasonalNotice>),

    /// Store the package inventory paired with this flight search.
    SetPackageResult(Option<PackageInventory>),

    // ═══════════════════════════════════════════════════════════════════
    // Analytics markers
    // ═══════════════════════════════════════════════════════════════════
    /// Analytics: report user details after a search produced data.
    TrackUserDetails,

    /// Analytics: report a flight result impression.
    TrackImpression,

    /// Analytics: report that flights were available.
    TrackFlightsAvailable,
}
