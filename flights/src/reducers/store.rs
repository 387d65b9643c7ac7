//! The fare selection store: pure state transitions.
//!
//! One transition per intent type; every transition replaces only the
//! fields it owns and preserves the rest unchanged. This reducer is the
//! single writer of [`FlightState`] — the workflow reducers read
//! snapshots and propose new intents, never mutate.

use crate::actions::FlightAction;
use crate::environment::FlightEnvironment;
use crate::error::FlightError;
use crate::models::{PointsCashMode, SearchResult, LowFareResult, LOYALTY_PROGRAM_CODE};
use crate::providers::{AvailabilityClient, BookingGateway, ConfirmationHost, SessionStorage};
use crate::state::FlightState;
use fareflow_core::environment::Clock;
use fareflow_core::effect::Effect;
use fareflow_core::reducer::{INLINE_EFFECTS, Reducer};
use fareflow_core::{SmallVec, smallvec};

/// Fare selection store reducer.
#[derive(Debug, Clone)]
pub struct StoreReducer<A, C, B, G, K> {
    _phantom: std::marker::PhantomData<(A, C, B, G, K)>,
}

impl<A, C, B, G, K> StoreReducer<A, C, B, G, K> {
    /// Create the store reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, C, B, G, K> Default for StoreReducer<A, C, B, G, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A, C, B, G, K> Reducer for StoreReducer<A, C, B, G, K>
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
        _env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; INLINE_EFFECTS]> {
        match action {
            // ═══════════════════════════════════════════════════════════
            // Results
            // ═══════════════════════════════════════════════════════════
            FlightAction::SetSearchResult { search, payload } => {
                state.search_result = Some(SearchResult::from_payload(search, payload));
            }

            FlightAction::SetLowFareSearchResult { search, payload } => {
                state.low_fare_result = Some(LowFareResult { search, payload });
            }

            FlightAction::ClearSearchResults => {
                state.search_result = None;
                state.low_fare_result = None;
                state.fare_selections.clear();
                state.low_fare_views.clear();
                state.points_cash_mode = PointsCashMode::Unset;
            }

            FlightAction::ClearFareAndViewSelections => {
                state.fare_selections.clear();
                state.low_fare_views.clear();
                state.points_cash_mode = PointsCashMode::Unset;
            }

            FlightAction::ClearFareSelections => {
                state.fare_selections.clear();
                state.points_cash_mode = PointsCashMode::Unset;
            }

            // ═══════════════════════════════════════════════════════════
            // Loading counters
            // ═══════════════════════════════════════════════════════════
            FlightAction::SetSearchLoading(start) => {
                state.search_loading += if start { 1 } else { -1 };
            }

            FlightAction::SetLowFareSearchLoading(start) => {
                state.low_fare_search_loading += if start { 1 } else { -1 };
            }

            // ═══════════════════════════════════════════════════════════
            // Selections
            // ═══════════════════════════════════════════════════════════
            FlightAction::SetFareSelection {
                index,
                journey_fare,
            } => {
                // Snapshot the prior selections before the change; the
                // shadow accumulates, newest entries winning.
                let prior = state.fare_selections.clone();
                state.previous_fare_selections.extend(prior);

                match journey_fare {
                    Some(jf) => {
                        state.fare_selections.insert(index, jf);
                    }
                    None => {
                        state.fare_selections.remove(&index);
                    }
                }
            }

            FlightAction::SelectStandardFares => {
                let point_cash = state.points_cash_mode == PointsCashMode::PointsAndCash;
                for jf in state.fare_selections.values_mut() {
                    let replacement = if point_cash {
                        jf.journey.point_cash.clone()
                    } else {
                        jf.journey.standard_fare.clone()
                    };
                    if let Some(fare) = replacement {
                        jf.fare = fare;
                    }
                }
            }

            FlightAction::SelectClubFares => {
                let point_cash = state.points_cash_mode == PointsCashMode::PointsAndCash;
                for jf in state.fare_selections.values_mut() {
                    let replacement = if point_cash {
                        jf.journey
                            .point_cash_club_fare
                            .clone()
                            .or_else(|| jf.journey.point_cash.clone())
                    } else {
                        jf.journey
                            .club_fare
                            .clone()
                            .or_else(|| jf.journey.standard_fare.clone())
                    };
                    if let Some(fare) = replacement {
                        jf.fare = fare;
                    }
                }
            }

            FlightAction::ChangeLowFareView { index, view } => {
                state.low_fare_views.insert(index, view);
                // With results on screen the view change applies to every
                // leg of the active calendar.
                if state.search_result.is_some() {
                    if let Some(low_fare) = state.low_fare_result.as_ref() {
                        for i in 0..low_fare.search.criteria.len() {
                            state.low_fare_views.insert(i, view);
                        }
                    }
                }
            }

            FlightAction::SelectLowestFaresFailure => {
                state.errors.push(FlightError::LowestFareUnavailable);
            }

            // ═══════════════════════════════════════════════════════════
            // Modes and fees
            // ═══════════════════════════════════════════════════════════
            FlightAction::SetPointsCashMode(mode) => {
                state.points_cash_mode = mode;
            }

            FlightAction::SetRedemptionFee(fee) => {
                state.redemption_fee = fee;
            }

            // ═══════════════════════════════════════════════════════════
            // App-level context
            // ═══════════════════════════════════════════════════════════
            FlightAction::ClearErrors => {
                state.errors.clear();
            }

            FlightAction::AddError(error) => {
                state.errors.push(error);
            }

            FlightAction::SetSearchInput(search) => {
                state.search_input = Some(search);
            }

            FlightAction::SetUser(user) => {
                state.user = user;
            }

            FlightAction::UpdatePointBalance(balance) => {
                if let Some(user) = state.user.as_mut() {
                    for program in &mut user.programs {
                        if program.code == LOYALTY_PROGRAM_CODE {
                            program.balance = balance;
                        }
                    }
                }
            }

            FlightAction::SetBookingData(data) => {
                state.booking.data = data;
            }

            FlightAction::NavigateTo(route) => {
                state.navigation.current_route = Some(route);
            }

            FlightAction::SetSubFlow(sub_flow) => {
                state.navigation.sub_flow = sub_flow;
            }

            FlightAction::SetSeasonalNotices(notices) => {
                state.seasonal_notices = notices;
            }

            FlightAction::SetPackageResult(result) => {
                state.package_result = result;
            }

            // Workflow intents are handled by the scheduler reducers.
            _ => return smallvec![],
        }

        smallvec![Effect::None]
    }
}
