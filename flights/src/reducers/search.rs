//! Search orchestrations.
//!
//! Handles the combination search chain, date and seasonal-service
//! validation, the availability and low-fare searches, the points
//! toggle, and the re-selection reaction when a fresh result lands.
//!
//! Validating steps forward their continuation unchanged on success and
//! replace it with a single error intent on failure. Effectful steps
//! prepend their result-setting intents ahead of the continuation.

use crate::actions::{FlightAction, NavigateTrigger};
use crate::environment::FlightEnvironment;
use crate::models::{
    JourneyFare, LowFareSearchRequest, PointsCashMode, SearchRequest, TripType,
};
use crate::providers::{
    AvailabilityClient, BookingGateway, ConfirmationHost, Dialog, SessionStorage,
};
use crate::selectors;
use crate::state::FlightState;
use fareflow_core::effect::Effect;
use fareflow_core::environment::Clock;
use fareflow_core::reducer::{INLINE_EFFECTS, Reducer};
use fareflow_core::{SmallVec, smallvec};

/// Storage key under which search timestamps are recorded for analytics.
const SEARCH_TIME_KEY: &str = "searchTime";

/// Search workflow reducer.
#[derive(Debug, Clone)]
pub struct SearchReducer<A, C, B, G, K> {
    _phantom: std::marker::PhantomData<(A, C, B, G, K)>,
}

impl<A, C, B, G, K> SearchReducer<A, C, B, G, K> {
    /// Create the search reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, C, B, G, K> Default for SearchReducer<A, C, B, G, K> {
    fn default() -> Self {
        Self::new()
    }
}

/// The initial points/cash mode a combination search establishes.
///
/// Modify flows price in points-and-cash when the user asked for points
/// on a booking that was not originally points-only, and in pure points
/// otherwise. Fresh bookings start unset.
fn initial_points_cash_mode(search: &SearchRequest) -> PointsCashMode {
    if search.original_booking.is_some() {
        if search.use_points && !search.originally_points_only {
            PointsCashMode::PointsAndCash
        } else {
            PointsCashMode::PointsOnly
        }
    } else {
        PointsCashMode::Unset
    }
}

/// The actions a landed search result produces: loading stop, result
/// set, and the analytics markers when the payload carried data.
fn search_landed(
    search: SearchRequest,
    payload: Option<crate::models::SearchPayload>,
) -> Vec<FlightAction> {
    let has_data = payload.is_some();
    let mut actions = vec![
        FlightAction::SetSearchLoading(false),
        FlightAction::SetSearchResult { search, payload },
    ];
    if has_data {
        actions.extend([
            FlightAction::TrackUserDetails,
            FlightAction::TrackImpression,
            FlightAction::TrackFlightsAvailable,
        ]);
    }
    actions
}

impl<A, C, B, G, K> Reducer for SearchReducer<A, C, B, G, K>
where
    A: AvailabilityClient + Clone + 'static,
    C: ConfirmationHost + Clone + 'static,
    B: BookingGateway + Clone + 'static,
    G: SessionStorage + Clone + 'static,
    K: Clock + Clone + 'static,
{
    type State = FlightState;
    type Action = FlightAction;
    type Environment = FlightEnvironment<A, C, B, G, K>;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; INLINE_EFFECTS]> {
        match action {
            // ═══════════════════════════════════════════════════════════
            // CombinationSearch: the full chain
            // ═══════════════════════════════════════════════════════════
            FlightAction::CombinationSearch { next } => {
                let Some(search) = state.search_input.clone() else {
                    tracing::warn!("combination search dispatched without a search input");
                    return smallvec![];
                };

                let mode = initial_points_cash_mode(&search);
                let low_fare = LowFareSearchRequest::from_search(&search);

                let mut inner = vec![
                    FlightAction::LowFareSearch {
                        search: low_fare,
                        next: vec![],
                    },
                    FlightAction::Search {
                        search: search.clone(),
                    },
                    FlightAction::Navigate {
                        trigger: NavigateTrigger::CombinationSearch,
                    },
                    FlightAction::SetPointsCashMode(mode),
                ];
                inner.extend(next);

                smallvec![Effect::Dispatch(vec![
                    FlightAction::ClearErrors,
                    FlightAction::ClearSearchResults,
                    FlightAction::ValidateSearchDates {
                        search: search.clone(),
                        next: vec![FlightAction::ValidateSeasonalService {
                            search,
                            next: inner,
                        }],
                    },
                ])]
            }

            // ═══════════════════════════════════════════════════════════
            // Validation steps
            // ═══════════════════════════════════════════════════════════
            FlightAction::ValidateSearchDates { search, next } => {
                // Linear searches carry server-validated dates; only
                // multi-city criteria are ordered client-side.
                if search.trip_type != TripType::MultiCity {
                    return smallvec![Effect::Dispatch(next)];
                }

                let mut previous: Option<chrono::NaiveDate> = None;
                let mut outcome = next;
                for criterion in &search.criteria {
                    match previous {
                        Some(p) if criterion.date < p => {
                            outcome = vec![FlightAction::AddError(
                                crate::error::FlightError::InvalidSearchDates,
                            )];
                            break;
                        }
                        _ => previous = Some(criterion.date),
                    }
                }
                smallvec![Effect::Dispatch(outcome)]
            }

            FlightAction::ValidateSeasonalService { search, next } => {
                let applicable = state
                    .seasonal_notices
                    .iter()
                    .find(|notice| search.criteria.iter().any(|c| notice.applies_to(c)));

                match applicable {
                    Some(notice) => {
                        // A blocking notice abandons the whole chain; the
                        // dialog response is not wired to a retry here.
                        tracing::warn!(
                            from = %notice.from_station,
                            to = %notice.to_station,
                            "seasonal service notice blocks the search"
                        );
                        let confirmations = env.confirmations.clone();
                        let message = notice.message.clone();
                        smallvec![Effect::future(async move {
                            confirmations
                                .open(Dialog::SeasonalNotice { message })
                                .await;
                            vec![]
                        })]
                    }
                    None => smallvec![Effect::Dispatch(next)],
                }
            }

            // ═══════════════════════════════════════════════════════════
            // Availability search
            // ═══════════════════════════════════════════════════════════
            FlightAction::Search { search } => {
                let timestamp = env.clock.now().format("%H:%M:%S").to_string();
                let storage = env.storage.clone();

                let availability = env.availability.clone();
                let fetch: Effect<FlightAction> = if search.use_points {
                    // Hybrid pricing: cash and points searches run
                    // concurrently; the merge requires both to settle and
                    // either failure fails the join.
                    Effect::future(async move {
                        storage.set_item(SEARCH_TIME_KEY, &timestamp);
                        let (cash, points) = tokio::join!(
                            availability.search(&search, false),
                            availability.search(&search, true),
                        );
                        match (cash, points) {
                            (Ok(cash), Ok(points)) => {
                                let merged = match (cash, points) {
                                    (Some(cash), Some(points)) => {
                                        Some(cash.merge_point_cash(points))
                                    }
                                    (cash, None) => cash,
                                    (None, _) => None,
                                };
                                tracing::info!(
                                    has_data = merged.is_some(),
                                    "hybrid availability search complete"
                                );
                                search_landed(search, merged)
                            }
                            (Err(error), _) | (_, Err(error)) => vec![
                                FlightAction::SetSearchLoading(false),
                                FlightAction::AddError(error),
                            ],
                        }
                    })
                } else {
                    Effect::future(async move {
                        storage.set_item(SEARCH_TIME_KEY, &timestamp);
                        match availability.search(&search, false).await {
                            Ok(payload) => {
                                tracing::info!(
                                    has_data = payload.is_some(),
                                    "availability search complete"
                                );
                                search_landed(search, payload)
                            }
                            Err(error) => vec![
                                FlightAction::SetSearchLoading(false),
                                FlightAction::AddError(error),
                            ],
                        }
                    })
                };

                smallvec![
                    Effect::one(FlightAction::SetSearchLoading(true)),
                    fetch,
                ]
            }

            // ═══════════════════════════════════════════════════════════
            // Low-fare calendar search
            // ═══════════════════════════════════════════════════════════
            FlightAction::LowFareSearch { search, next } => {
                let availability = env.availability.clone();
                smallvec![
                    Effect::one(FlightAction::SetLowFareSearchLoading(true)),
                    Effect::future(async move {
                        match availability.search_low_fare(&search).await {
                            Ok(payload) => {
                                let mut actions = vec![
                                    FlightAction::SetLowFareSearchLoading(false),
                                    FlightAction::SetLowFareSearchResult { search, payload },
                                ];
                                actions.extend(next);
                                actions
                            }
                            Err(error) => {
                                tracing::warn!(%error, "low-fare search failed, dropping continuation");
                                vec![
                                    FlightAction::SetLowFareSearchLoading(false),
                                    FlightAction::AddError(error),
                                ]
                            }
                        }
                    }),
                ]
            }

            // ═══════════════════════════════════════════════════════════
            // Points toggle
            // ═══════════════════════════════════════════════════════════
            FlightAction::ChangeUsePoints {
                use_points,
                clear_selections,
            } => {
                let mut next = Vec::new();

                if let (Some(low_fare), Some(result), Some(input)) = (
                    state.low_fare_result.as_ref(),
                    state.search_result.as_ref(),
                    state.search_input.as_ref(),
                ) {
                    let mut input = input.clone();
                    input.use_points = use_points;
                    let mut low_fare_search = low_fare.search.clone();
                    low_fare_search.use_points = use_points;
                    let mut search = result.search.clone();
                    search.use_points = use_points;

                    next.push(FlightAction::SetSearchInput(input));
                    next.push(FlightAction::ResetSession {
                        next: vec![
                            FlightAction::LowFareSearch {
                                search: low_fare_search,
                                next: vec![],
                            },
                            FlightAction::Search { search },
                        ],
                    });
                }

                if clear_selections {
                    next.push(FlightAction::ClearFareSelections);
                }

                smallvec![Effect::Dispatch(next)]
            }

            // ═══════════════════════════════════════════════════════════
            // Re-selection when a fresh result lands
            // ═══════════════════════════════════════════════════════════
            FlightAction::SetSearchResult { .. } => {
                let Some(result) = state.search_result.as_ref() else {
                    return smallvec![];
                };
                let point_cash = selectors::is_award_booking(state)
                    && state.points_cash_mode == PointsCashMode::PointsAndCash;

                let mut actions = Vec::new();
                for selected in state.fare_selections.values() {
                    let designator = &selected.journey.designator;
                    let Some(trip_index) =
                        result.trip_index_for(&designator.origin, &designator.destination)
                    else {
                        continue;
                    };
                    let Some(journey) = result.trips[trip_index]
                        .journeys
                        .iter()
                        .find(|j| j.journey_key == selected.journey.journey_key)
                    else {
                        tracing::debug!(
                            journey_key = %selected.journey.journey_key,
                            "selected journey absent from the fresh result"
                        );
                        continue;
                    };

                    let want_club = selected.fare.is_club_fare;
                    let fares = if point_cash {
                        &journey.point_cash_fares
                    } else {
                        &journey.fares
                    };
                    let Some(fare) = fares.values().find(|f| f.is_club_fare == want_club)
                    else {
                        continue;
                    };

                    actions.push(FlightAction::SetFareSelection {
                        index: trip_index,
                        journey_fare: Some(JourneyFare {
                            journey: journey.clone(),
                            fare: fare.clone(),
                        }),
                    });
                }

                smallvec![Effect::Dispatch(actions)]
            }

            _ => smallvec![],
        }
    }
}
