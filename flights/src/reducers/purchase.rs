//! Purchase orchestrations.
//!
//! Handles the sell and modify-sell transactions and the branch paths in
//! front of them: early-flight confirmation, the club upsell, the
//! insufficient-points recovery, the routing decision, and the booking
//! gateway steps the sell chains into.

use crate::actions::{FlightAction, NavigateTrigger};
use crate::environment::FlightEnvironment;
use crate::models::{
    Flow, JourneyFare, PackageKind, PointsCashMode, Route, SearchType, SubFlow,
};
use crate::providers::{
    AvailabilityClient, BookingGateway, ConfirmationHost, Dialog, DialogResponse, SessionStorage,
};
use crate::selectors;
use crate::state::FlightState;
use fareflow_core::effect::Effect;
use fareflow_core::environment::Clock;
use fareflow_core::reducer::{INLINE_EFFECTS, Reducer};
use fareflow_core::{SmallVec, smallvec};

/// Purchase workflow reducer.
#[derive(Debug, Clone)]
pub struct PurchaseReducer<A, C, B, G, K> {
    _phantom: std::marker::PhantomData<(A, C, B, G, K)>,
}

impl<A, C, B, G, K> PurchaseReducer<A, C, B, G, K> {
    /// Create the purchase reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, C, B, G, K> Default for PurchaseReducer<A, C, B, G, K> {
    fn default() -> Self {
        Self::new()
    }
}

/// The routing decision for a completed workflow step.
fn route_for(trigger: NavigateTrigger, state: &FlightState) -> Vec<FlightAction> {
    let flow = state.navigation.flow;
    let search_type = state.search_input.as_ref().map(|s| s.search_type);
    let package = state.package_result;

    match trigger {
        NavigateTrigger::CombinationSearch => match search_type {
            Some(SearchType::Flight) | None => match flow {
                Flow::MyTrips | Flow::CheckIn => {
                    vec![FlightAction::NavigateTo(Route::ModifyFlights(flow))]
                }
                Flow::Book => {
                    if state.navigation.current_url == "/book/flights" {
                        vec![]
                    } else {
                        vec![FlightAction::NavigateTo(Route::BookFlights)]
                    }
                }
            },
            Some(SearchType::Package(kind)) => match kind {
                PackageKind::FlightCar => {
                    if package.is_some_and(|r| r.vehicles == 0) {
                        vec![FlightAction::NavigateTo(Route::BookFlights)]
                    } else {
                        vec![FlightAction::NavigateTo(Route::BookFlightsCars)]
                    }
                }
                PackageKind::FlightHotel => match package {
                    Some(r) if r.hotels == 0 => {
                        vec![FlightAction::NavigateTo(Route::BookFlights)]
                    }
                    Some(_) => vec![FlightAction::NavigateTo(Route::BookFlightsHotels)],
                    None => vec![],
                },
                PackageKind::FlightHotelCar => {
                    if package.is_some_and(|r| r.hotels == 0 && r.vehicles == 0) {
                        vec![FlightAction::NavigateTo(Route::BookFlights)]
                    } else {
                        vec![FlightAction::NavigateTo(Route::Package)]
                    }
                }
            },
        },
        NavigateTrigger::SellTrip => {
            let is_package = matches!(search_type, Some(SearchType::Package(_)));
            if is_package && package.is_some() {
                vec![FlightAction::NavigateTo(Route::Package)]
            } else {
                vec![FlightAction::NavigateTo(Route::BundleOffer)]
            }
        }
        NavigateTrigger::ModifySellTrip => vec![FlightAction::NavigateTo(Route::Next)],
    }
}

impl<A, C, B, G, K> Reducer for PurchaseReducer<A, C, B, G, K>
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
            // Early-flight confirmation
            // ═══════════════════════════════════════════════════════════
            FlightAction::GetEarlyFlightOk { next } => {
                let early = state
                    .fare_selections
                    .values()
                    .find(|jf| jf.journey.is_early);

                match early {
                    Some(jf) => {
                        let confirmations = env.confirmations.clone();
                        let dialog = Dialog::EarlyFlight {
                            flight_number: jf.journey.flight_number.clone(),
                            departure: jf.journey.designator.departure,
                        };
                        smallvec![Effect::future(async move {
                            match confirmations.open(dialog).await {
                                Some(DialogResponse::Confirmed(true)) => next,
                                _ => {
                                    tracing::warn!(
                                        "early flight declined, abandoning the purchase"
                                    );
                                    vec![]
                                }
                            }
                        })]
                    }
                    None => smallvec![Effect::Dispatch(next)],
                }
            }

            // ═══════════════════════════════════════════════════════════
            // Sell
            // ═══════════════════════════════════════════════════════════
            FlightAction::SellTrip {
                add_club_membership,
            } => {
                let selections = state.fare_selections.clone();
                let passengers = selectors::seat_count(state);
                let promo_code = state
                    .search_input
                    .as_ref()
                    .and_then(|s| s.promo_code.clone());
                let is_award = selectors::is_award_booking(state);
                let mode = state.points_cash_mode;
                let availability = env.availability.clone();

                smallvec![
                    Effect::one(FlightAction::ClearErrors),
                    Effect::future(async move {
                        let sold = availability
                            .sell_trip(
                                &selections,
                                passengers,
                                promo_code.as_deref(),
                                is_award,
                                mode,
                            )
                            .await;
                        match sold {
                            Ok(sell) => {
                                tracing::info!(
                                    record_locator = %sell.booking.record_locator,
                                    "sell complete"
                                );
                                let follow_ups = vec![
                                    FlightAction::RefreshConfiguration,
                                    FlightAction::RefreshPointMultipliers,
                                    FlightAction::Navigate {
                                        trigger: NavigateTrigger::SellTrip,
                                    },
                                ];
                                let mut actions = vec![
                                    FlightAction::SetBookingData(Some(sell.booking)),
                                    FlightAction::LoadAncillaryAvailability { next: vec![] },
                                ];
                                if add_club_membership {
                                    actions.push(FlightAction::AddClubMembership {
                                        signup: None,
                                        next: follow_ups,
                                    });
                                } else {
                                    actions.extend(follow_ups);
                                }
                                actions
                            }
                            Err(error) => vec![FlightAction::AddError(error)],
                        }
                    }),
                ]
            }

            FlightAction::ModifySellTrip {
                signup,
                enroll_in_club,
            } => {
                let selections = state.fare_selections.clone();
                let passengers = selectors::seat_count(state);
                let original_journey_keys = state
                    .search_input
                    .as_ref()
                    .and_then(|s| s.original_booking.as_ref())
                    .map(|b| b.journey_keys.clone())
                    .unwrap_or_default();
                let is_award = selectors::is_award_booking(state);
                let mode = state.points_cash_mode;
                let reprice = !state.booking.selected_bundle_codes.is_empty();
                let availability = env.availability.clone();

                smallvec![
                    Effect::one(FlightAction::ClearErrors),
                    Effect::future(async move {
                        let sold = availability
                            .modify_sell_trip(
                                &selections,
                                passengers,
                                &original_journey_keys,
                                is_award,
                                mode,
                            )
                            .await;
                        match sold {
                            Ok(resp) => {
                                let mut booking = resp.new_booking;
                                booking.seat_remapping_needed = resp.seat_remapping_needed;
                                tracing::info!(
                                    record_locator = %booking.record_locator,
                                    "modify sell complete"
                                );

                                let follow_ups = if signup.is_some() || enroll_in_club {
                                    vec![FlightAction::AddClubMembership {
                                        signup,
                                        next: vec![
                                            FlightAction::RefreshConfiguration,
                                            FlightAction::RefreshBookingData,
                                            FlightAction::Navigate {
                                                trigger: NavigateTrigger::ModifySellTrip,
                                            },
                                        ],
                                    }]
                                } else {
                                    vec![
                                        FlightAction::RefreshConfiguration,
                                        FlightAction::Navigate {
                                            trigger: NavigateTrigger::ModifySellTrip,
                                        },
                                    ]
                                };

                                let mut actions = vec![
                                    FlightAction::SetBookingData(Some(booking)),
                                    FlightAction::LoadAncillaryAvailability {
                                        next: follow_ups,
                                    },
                                ];
                                if reprice {
                                    actions.push(FlightAction::RepriceBundles);
                                }
                                actions
                            }
                            Err(error) => vec![FlightAction::AddError(error)],
                        }
                    }),
                ]
            }

            // ═══════════════════════════════════════════════════════════
            // Club upsell
            // ═══════════════════════════════════════════════════════════
            FlightAction::UpsellClubAndSellTrip => {
                let logged_in = state.user.is_some();
                let is_club = state.user.as_ref().is_some_and(|u| u.is_club_member);
                let flow = state.navigation.flow;

                if !is_club && !logged_in && flow != Flow::Book {
                    let confirmations = env.confirmations.clone();
                    smallvec![Effect::future(async move {
                        match confirmations.open(Dialog::ClubUpsell).await {
                            Some(DialogResponse::ClubUpsell(response)) => {
                                if response.password.is_some()
                                    || response.logged_in_person_on_booking
                                {
                                    vec![FlightAction::SelectClubFaresAndSellTrip {
                                        signup: response.password,
                                        enroll_in_club: !response.logged_in_as_club,
                                    }]
                                } else {
                                    vec![FlightAction::SelectStandardFaresAndSellTrip]
                                }
                            }
                            _ => {
                                tracing::warn!("club upsell dismissed, abandoning the sell");
                                vec![]
                            }
                        }
                    })]
                } else if !is_club && logged_in && flow != Flow::Book {
                    smallvec![Effect::one(FlightAction::SelectClubFaresAndSellTrip {
                        signup: None,
                        enroll_in_club: true,
                    })]
                } else {
                    smallvec![Effect::one(FlightAction::SelectClubFaresAndSellTrip {
                        signup: None,
                        enroll_in_club: false,
                    })]
                }
            }

            FlightAction::SelectStandardFaresAndSellTrip => {
                let next = if state.navigation.flow == Flow::Book {
                    vec![FlightAction::ResetSession {
                        next: vec![
                            FlightAction::SelectStandardFares,
                            FlightAction::SellTrip {
                                add_club_membership: false,
                            },
                        ],
                    }]
                } else {
                    vec![
                        FlightAction::SelectStandardFares,
                        FlightAction::ModifySellTrip {
                            signup: None,
                            enroll_in_club: false,
                        },
                    ]
                };
                smallvec![Effect::one(FlightAction::GetEarlyFlightOk { next })]
            }

            FlightAction::SelectClubFaresAndSellTrip {
                signup,
                enroll_in_club,
            } => {
                let is_club = state.user.as_ref().is_some_and(|u| u.is_club_member);
                let next = if state.navigation.flow == Flow::Book {
                    vec![FlightAction::ResetSession {
                        next: vec![
                            FlightAction::SelectClubFares,
                            FlightAction::SellTrip {
                                add_club_membership: !is_club,
                            },
                        ],
                    }]
                } else {
                    vec![
                        FlightAction::SelectClubFares,
                        FlightAction::ModifySellTrip {
                            signup,
                            enroll_in_club,
                        },
                    ]
                };
                smallvec![Effect::one(FlightAction::GetEarlyFlightOk { next })]
            }

            // ═══════════════════════════════════════════════════════════
            // Insufficient-points recovery
            // ═══════════════════════════════════════════════════════════
            FlightAction::CheckForSufficientPointsAndSellTrip {
                signup: _,
                enroll_in_club,
            } => {
                let required = selectors::loyalty_points_required(state, enroll_in_club);
                let flow = state.navigation.flow;

                let continue_flow = if enroll_in_club {
                    vec![FlightAction::UpsellClubAndSellTrip]
                } else if flow == Flow::Book {
                    vec![FlightAction::GetEarlyFlightOk {
                        next: vec![FlightAction::ResetSession {
                            next: vec![FlightAction::SellTrip {
                                add_club_membership: false,
                            }],
                        }],
                    }]
                } else {
                    vec![FlightAction::GetEarlyFlightOk {
                        next: vec![FlightAction::ModifySellTrip {
                            signup: None,
                            enroll_in_club: false,
                        }],
                    }]
                };

                let Some(user) = state.user.as_ref() else {
                    return smallvec![Effect::Dispatch(continue_flow)];
                };
                let balance = user.point_balance();
                if required <= balance {
                    return smallvec![Effect::Dispatch(continue_flow)];
                }

                let is_club = user.is_club_member;
                let mode = state.points_cash_mode;
                let seats = selectors::seat_count(state);
                let point_cash_total = selectors::points_cash_loyalty_points_total(
                    &state.fare_selections,
                    is_club,
                ) * i64::from(seats);
                let selections = state.fare_selections.clone();
                let leg_count = state.search_result.as_ref().map(|r| r.trips.len());
                let confirmations = env.confirmations.clone();

                let dialog = Dialog::InsufficientPoints {
                    points_required: required,
                    point_balance: balance,
                    is_point_plus_cash: mode == PointsCashMode::PointsAndCash,
                    is_change_flight: !(point_cash_total <= balance
                        && mode == PointsCashMode::PointsOnly),
                };

                smallvec![Effect::future(async move {
                    let response = confirmations.open(dialog).await;
                    let Some(DialogResponse::InsufficientPoints(response)) = response else {
                        return vec![FlightAction::ClearFareAndViewSelections];
                    };

                    if let Some(balance) = response.updated_balance {
                        vec![
                            FlightAction::ChangeUsePoints {
                                use_points: true,
                                clear_selections: false,
                            },
                            FlightAction::UpdatePointBalance(balance),
                        ]
                    } else if response.continue_anyway {
                        continue_flow
                    } else if response.switch_to_point_cash && !selections.is_empty() {
                        // Re-select the point-cash facet of every leg, then
                        // re-validate under the hybrid mode.
                        let mut actions: Vec<FlightAction> = selections
                            .iter()
                            .filter_map(|(index, jf)| {
                                let fare = if is_club {
                                    jf.journey
                                        .point_cash_club_fare
                                        .clone()
                                        .or_else(|| jf.journey.point_cash.clone())
                                } else {
                                    jf.journey.point_cash.clone()
                                };
                                fare.map(|fare| FlightAction::SetFareSelection {
                                    index: *index,
                                    journey_fare: Some(JourneyFare {
                                        journey: jf.journey.clone(),
                                        fare,
                                    }),
                                })
                            })
                            .collect();
                        actions.push(FlightAction::ValidateAndUpdateFareSelection);
                        actions.push(FlightAction::SetPointsCashMode(
                            PointsCashMode::PointsAndCash,
                        ));
                        actions
                    } else if let Some(leg_count) = leg_count {
                        let mut actions: Vec<FlightAction> = (0..leg_count)
                            .map(|index| FlightAction::SetFareSelection {
                                index,
                                journey_fare: None,
                            })
                            .collect();
                        actions.push(FlightAction::ChangeUsePoints {
                            use_points: false,
                            clear_selections: false,
                        });
                        actions
                    } else {
                        vec![FlightAction::ClearFareAndViewSelections]
                    }
                })]
            }

            // ═══════════════════════════════════════════════════════════
            // Modify-flight entry
            // ═══════════════════════════════════════════════════════════
            FlightAction::ShowModifyFlightModal => {
                let confirmations = env.confirmations.clone();
                smallvec![
                    Effect::one(FlightAction::SetSubFlow(Some(SubFlow::ModifyFlight))),
                    Effect::future(async move {
                        confirmations.open(Dialog::ModifyFlight).await;
                        vec![]
                    }),
                ]
            }

            // ═══════════════════════════════════════════════════════════
            // Routing
            // ═══════════════════════════════════════════════════════════
            FlightAction::Navigate { trigger } => {
                smallvec![Effect::Dispatch(route_for(trigger, state))]
            }

            // ═══════════════════════════════════════════════════════════
            // Booking gateway steps
            // ═══════════════════════════════════════════════════════════
            FlightAction::ResetSession { next } => {
                let booking = env.booking.clone();
                smallvec![Effect::future(async move {
                    match booking.reset_session().await {
                        Ok(()) => next,
                        Err(error) => {
                            tracing::warn!(%error, "session reset failed, dropping continuation");
                            vec![FlightAction::AddError(error)]
                        }
                    }
                })]
            }

            FlightAction::AddClubMembership { signup, next } => {
                let booking = env.booking.clone();
                smallvec![Effect::future(async move {
                    match booking.add_club_membership(signup.as_deref()).await {
                        Ok(()) => next,
                        Err(error) => {
                            tracing::warn!(%error, "club enrollment failed, dropping continuation");
                            vec![FlightAction::AddError(error)]
                        }
                    }
                })]
            }

            FlightAction::RefreshConfiguration => {
                let booking = env.booking.clone();
                smallvec![Effect::future(async move {
                    match booking.refresh_configuration().await {
                        Ok(()) => vec![],
                        Err(error) => vec![FlightAction::AddError(error)],
                    }
                })]
            }

            FlightAction::RefreshBookingData => {
                let booking = env.booking.clone();
                smallvec![Effect::future(async move {
                    match booking.fetch_booking().await {
                        Ok(data) => vec![FlightAction::SetBookingData(Some(data))],
                        Err(error) => vec![FlightAction::AddError(error)],
                    }
                })]
            }

            FlightAction::RefreshPointMultipliers => {
                let booking = env.booking.clone();
                smallvec![Effect::future(async move {
                    match booking.refresh_point_multipliers().await {
                        Ok(()) => vec![],
                        Err(error) => vec![FlightAction::AddError(error)],
                    }
                })]
            }

            FlightAction::LoadAncillaryAvailability { next } => {
                let booking = env.booking.clone();
                smallvec![Effect::future(async move {
                    match booking.load_ancillary_availability().await {
                        Ok(()) => next,
                        Err(error) => {
                            tracing::warn!(%error, "ancillary load failed, dropping continuation");
                            vec![FlightAction::AddError(error)]
                        }
                    }
                })]
            }

            FlightAction::RepriceBundles => {
                let codes = state.booking.selected_bundle_codes.clone();
                let booking = env.booking.clone();
                smallvec![Effect::future(async move {
                    match booking.reprice_bundles(&codes).await {
                        Ok(()) => vec![],
                        Err(error) => vec![FlightAction::AddError(error)],
                    }
                })]
            }

            _ => smallvec![],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::mocks::{
        MockAvailabilityClient, MockBookingGateway, MockConfirmationHost, MockSessionStorage,
        mock_environment,
    };
    use crate::models::{
        BookingData, Designator, Fare, Journey, LoyaltyProgram, PackageInventory, SearchCriterion,
        SearchRequest, SearchResult, SellPayload, Trip, TripType, UserProfile,
    };
    use crate::providers::{ClubUpsellResponse, InsufficientPointsResponse};
    use chrono::NaiveDate;
    use fareflow_core::environment::FixedClock;
    use fareflow_testing::{assertions, drain_effects};
    use std::collections::BTreeMap;

    type TestEnv = FlightEnvironment<
        MockAvailabilityClient,
        MockConfirmationHost,
        MockBookingGateway,
        MockSessionStorage,
        FixedClock,
    >;

    fn reducer() -> PurchaseReducer<
        MockAvailabilityClient,
        MockConfirmationHost,
        MockBookingGateway,
        MockSessionStorage,
        FixedClock,
    > {
        PurchaseReducer::new()
    }

    fn env_with_confirmations(confirmations: MockConfirmationHost) -> TestEnv {
        let base = mock_environment();
        FlightEnvironment::new(
            base.availability,
            confirmations,
            base.booking,
            base.storage,
            base.clock,
        )
    }

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn fare(key: &str, amount: f64, points: i64, club: bool) -> Fare {
        Fare {
            key: key.into(),
            amount,
            original_amount: None,
            amount_difference: None,
            loyalty_points: points,
            accrual_total_tax: 0.0,
            tax_fee_sum: 10.0,
            is_club_fare: club,
            is_card_holder_fare: false,
            product_class: if club { "RO".into() } else { "YO".into() },
            point_cash: false,
        }
    }

    fn journey(key: &str, hour: u32) -> Journey {
        let standard = fare("std", 100.0, 10_000, false);
        Journey {
            journey_key: key.into(),
            designator: Designator {
                origin: "JFK".into(),
                destination: "LAX".into(),
                departure: date(10).and_hms_opt(hour, 0, 0).unwrap(),
                arrival: date(10).and_hms_opt(hour + 6, 0, 0).unwrap(),
            },
            flight_number: "123".into(),
            fares: BTreeMap::new(),
            point_cash_fares: BTreeMap::new(),
            standard_fare: Some(standard),
            club_fare: Some(fare("club", 80.0, 8_000, true)),
            card_holder_fare: None,
            point_cash: Some(fare("pc", 40.0, 5_000, false)),
            point_cash_club_fare: Some(fare("pc-club", 30.0, 4_000, true)),
            is_early: hour < 4,
            is_next_day_arrival: false,
        }
    }

    fn selection(journey: Journey) -> JourneyFare {
        let fare = journey.standard_fare.clone().unwrap();
        JourneyFare { journey, fare }
    }

    fn search_request(use_points: bool) -> SearchRequest {
        SearchRequest {
            criteria: vec![SearchCriterion::new("JFK", "LAX", date(10))],
            passengers: 1,
            use_points,
            originally_points_only: false,
            default_journey_key: None,
            promo_code: Some("SAVE".into()),
            trip_type: TripType::OneWay,
            search_type: SearchType::Flight,
            original_booking: None,
        }
    }

    fn booking_data() -> BookingData {
        BookingData {
            record_locator: "ABC123".into(),
            amount_due: 110.0,
            award_point_total: 0,
            seat_remapping_needed: false,
        }
    }

    fn user(balance: i64, is_club: bool) -> UserProfile {
        UserProfile {
            programs: vec![LoyaltyProgram {
                code: "NK".into(),
                balance,
            }],
            is_club_member: is_club,
            is_card_holder: false,
            tier_code: "GOLD".into(),
            redemption_fee_waiver: false,
        }
    }

    fn award_state(balance: i64, is_club: bool) -> FlightState {
        let search = search_request(true);
        let mut state = FlightState {
            search_input: Some(search.clone()),
            search_result: Some(SearchResult {
                search,
                trips: vec![Trip {
                    origin: "JFK".into(),
                    destination: "LAX".into(),
                    journeys: vec![journey("j1", 9)],
                    default_journey: None,
                }],
            }),
            user: Some(user(balance, is_club)),
            ..FlightState::default()
        };
        state.fare_selections.insert(0, selection(journey("j1", 9)));
        state
    }

    fn continuation() -> Vec<FlightAction> {
        vec![FlightAction::TrackImpression]
    }

    #[test]
    fn no_early_selection_forwards_immediately_without_a_dialog() {
        let mut state = FlightState::default();
        state.fare_selections.insert(0, selection(journey("j1", 9)));
        let env = mock_environment();
        let confirmations = env.confirmations.clone();

        let effects = reducer().reduce(
            &mut state,
            FlightAction::GetEarlyFlightOk {
                next: continuation(),
            },
            &env,
        );

        assertions::assert_dispatches(&effects, &continuation());
        assert!(confirmations.opened().is_empty());
    }

    #[tokio::test]
    async fn confirmed_early_flight_forwards_the_continuation() {
        let mut state = FlightState::default();
        state.fare_selections.insert(0, selection(journey("j1", 2)));
        let env = env_with_confirmations(
            MockConfirmationHost::new().with_response(Some(DialogResponse::Confirmed(true))),
        );

        let effects = reducer().reduce(
            &mut state,
            FlightAction::GetEarlyFlightOk {
                next: continuation(),
            },
            &env,
        );

        assert_eq!(drain_effects(effects).await, continuation());
    }

    #[tokio::test]
    async fn declined_early_flight_abandons_the_continuation() {
        let mut state = FlightState::default();
        state.fare_selections.insert(0, selection(journey("j1", 2)));
        let env = env_with_confirmations(
            MockConfirmationHost::new().with_response(Some(DialogResponse::Confirmed(false))),
        );

        let effects = reducer().reduce(
            &mut state,
            FlightAction::GetEarlyFlightOk {
                next: continuation(),
            },
            &env,
        );

        assert!(drain_effects(effects).await.is_empty());
    }

    #[tokio::test]
    async fn sell_success_sets_booking_data_and_chains_follow_ups() {
        let base = mock_environment();
        let availability = MockAvailabilityClient::new().with_sell_response(Ok(SellPayload {
            booking: booking_data(),
        }));
        let env = FlightEnvironment::new(
            availability.clone(),
            base.confirmations,
            base.booking,
            base.storage,
            base.clock,
        );
        let mut state = award_state(50_000, false);
        state.points_cash_mode = PointsCashMode::PointsOnly;

        let effects = reducer().reduce(
            &mut state,
            FlightAction::SellTrip {
                add_club_membership: false,
            },
            &env,
        );

        let produced = drain_effects(effects).await;
        assert_eq!(produced[0], FlightAction::ClearErrors);
        assert!(matches!(produced[1], FlightAction::SetBookingData(Some(_))));
        assert!(matches!(
            produced[2],
            FlightAction::LoadAncillaryAvailability { .. }
        ));
        assert_eq!(produced[3], FlightAction::RefreshConfiguration);
        assert_eq!(produced[4], FlightAction::RefreshPointMultipliers);
        assert!(matches!(
            produced[5],
            FlightAction::Navigate {
                trigger: NavigateTrigger::SellTrip
            }
        ));

        // The sell call carried the award flags and promo code.
        match &availability.calls()[0] {
            crate::mocks::RecordedCall::Sell {
                passengers,
                is_award,
                mode,
                promo_code,
                legs,
            } => {
                assert_eq!(*passengers, 1);
                assert!(*is_award);
                assert_eq!(*mode, PointsCashMode::PointsOnly);
                assert_eq!(promo_code.as_deref(), Some("SAVE"));
                assert_eq!(*legs, 1);
            }
            other => panic!("expected a sell call, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sell_with_club_membership_wraps_the_follow_ups() {
        let base = mock_environment();
        let env = FlightEnvironment::new(
            MockAvailabilityClient::new().with_sell_response(Ok(SellPayload {
                booking: booking_data(),
            })),
            base.confirmations,
            base.booking,
            base.storage,
            base.clock,
        );

        let effects = reducer().reduce(
            &mut award_state(50_000, false),
            FlightAction::SellTrip {
                add_club_membership: true,
            },
            &env,
        );

        let produced = drain_effects(effects).await;
        let FlightAction::AddClubMembership { next, .. } = &produced[3] else {
            panic!("expected the follow-ups wrapped in AddClubMembership");
        };
        assert_eq!(next[0], FlightAction::RefreshConfiguration);
    }

    #[tokio::test]
    async fn failed_sell_reports_one_error_and_commits_nothing() {
        let base = mock_environment();
        let env = FlightEnvironment::new(
            MockAvailabilityClient::new(),
            base.confirmations,
            base.booking,
            base.storage,
            base.clock,
        );

        let effects = reducer().reduce(
            &mut award_state(50_000, false),
            FlightAction::SellTrip {
                add_club_membership: false,
            },
            &env,
        );

        let produced = drain_effects(effects).await;
        assert_eq!(produced[0], FlightAction::ClearErrors);
        assert!(matches!(produced[1], FlightAction::AddError(_)));
        assert_eq!(produced.len(), 2);
    }

    #[tokio::test]
    async fn upsell_signup_response_routes_to_club_fares_with_enrollment() {
        let env = env_with_confirmations(MockConfirmationHost::new().with_response(Some(
            DialogResponse::ClubUpsell(ClubUpsellResponse {
                password: Some("hunter2".into()),
                logged_in_person_on_booking: false,
                logged_in_as_club: false,
            }),
        )));
        let mut state = FlightState::default();
        state.navigation.flow = Flow::MyTrips;

        let effects = reducer().reduce(&mut state, FlightAction::UpsellClubAndSellTrip, &env);

        let produced = drain_effects(effects).await;
        assert_eq!(
            produced,
            vec![FlightAction::SelectClubFaresAndSellTrip {
                signup: Some("hunter2".into()),
                enroll_in_club: true,
            }]
        );
    }

    #[tokio::test]
    async fn upsell_declined_response_routes_to_standard_fares() {
        let env = env_with_confirmations(MockConfirmationHost::new().with_response(Some(
            DialogResponse::ClubUpsell(ClubUpsellResponse::default()),
        )));
        let mut state = FlightState::default();
        state.navigation.flow = Flow::MyTrips;

        let effects = reducer().reduce(&mut state, FlightAction::UpsellClubAndSellTrip, &env);

        assert_eq!(
            drain_effects(effects).await,
            vec![FlightAction::SelectStandardFaresAndSellTrip]
        );
    }

    #[tokio::test]
    async fn upsell_dismissed_emits_nothing() {
        let env = env_with_confirmations(MockConfirmationHost::new().with_response(None));
        let mut state = FlightState::default();
        state.navigation.flow = Flow::MyTrips;

        let effects = reducer().reduce(&mut state, FlightAction::UpsellClubAndSellTrip, &env);

        assert!(drain_effects(effects).await.is_empty());
    }

    #[test]
    fn logged_in_non_member_outside_book_auto_enrolls() {
        let mut state = FlightState {
            user: Some(user(0, false)),
            ..FlightState::default()
        };
        state.navigation.flow = Flow::CheckIn;

        let effects =
            reducer().reduce(&mut state, FlightAction::UpsellClubAndSellTrip, &mock_environment());

        assertions::assert_dispatches(
            &effects,
            &[FlightAction::SelectClubFaresAndSellTrip {
                signup: None,
                enroll_in_club: true,
            }],
        );
    }

    #[test]
    fn book_flow_wraps_the_sell_in_a_session_reset() {
        let effects = reducer().reduce(
            &mut FlightState::default(),
            FlightAction::SelectStandardFaresAndSellTrip,
            &mock_environment(),
        );

        assertions::assert_dispatches(
            &effects,
            &[FlightAction::GetEarlyFlightOk {
                next: vec![FlightAction::ResetSession {
                    next: vec![
                        FlightAction::SelectStandardFares,
                        FlightAction::SellTrip {
                            add_club_membership: false,
                        },
                    ],
                }],
            }],
        );
    }

    #[test]
    fn modify_flows_chain_into_a_modify_sell_instead() {
        let mut state = FlightState::default();
        state.navigation.flow = Flow::MyTrips;

        let effects = reducer().reduce(
            &mut state,
            FlightAction::SelectClubFaresAndSellTrip {
                signup: Some("hunter2".into()),
                enroll_in_club: true,
            },
            &mock_environment(),
        );

        assertions::assert_dispatches(
            &effects,
            &[FlightAction::GetEarlyFlightOk {
                next: vec![
                    FlightAction::SelectClubFares,
                    FlightAction::ModifySellTrip {
                        signup: Some("hunter2".into()),
                        enroll_in_club: true,
                    },
                ],
            }],
        );
    }

    #[test]
    fn sufficient_points_proceed_directly_with_the_continue_flow() {
        let mut state = award_state(50_000, false);
        let env = mock_environment();
        let confirmations = env.confirmations.clone();

        let effects = reducer().reduce(
            &mut state,
            FlightAction::CheckForSufficientPointsAndSellTrip {
                signup: None,
                enroll_in_club: false,
            },
            &env,
        );

        assertions::assert_dispatches(
            &effects,
            &[FlightAction::GetEarlyFlightOk {
                next: vec![FlightAction::ResetSession {
                    next: vec![FlightAction::SellTrip {
                        add_club_membership: false,
                    }],
                }],
            }],
        );
        assert!(confirmations.opened().is_empty());
    }

    #[tokio::test]
    async fn insufficient_points_continue_routes_to_the_upsell_path() {
        // Balance 5000 against a 6000-point requirement: 10000 standard
        // points less the 4000-point enrollment saving.
        let mut state = award_state(5_000, false);
        state
            .fare_selections
            .get_mut(&0)
            .unwrap()
            .journey
            .club_fare = Some(fare("club", 80.0, 6_000, true));
        let env = env_with_confirmations(MockConfirmationHost::new().with_response(Some(
            DialogResponse::InsufficientPoints(InsufficientPointsResponse {
                updated_balance: None,
                continue_anyway: true,
                switch_to_point_cash: false,
            }),
        )));

        let effects = reducer().reduce(
            &mut state,
            FlightAction::CheckForSufficientPointsAndSellTrip {
                signup: None,
                enroll_in_club: true,
            },
            &env,
        );

        assert_eq!(
            drain_effects(effects).await,
            vec![FlightAction::UpsellClubAndSellTrip]
        );
    }

    #[tokio::test]
    async fn insufficient_points_switch_reselects_point_cash_fares() {
        let mut state = award_state(1_000, false);
        let env = env_with_confirmations(MockConfirmationHost::new().with_response(Some(
            DialogResponse::InsufficientPoints(InsufficientPointsResponse {
                updated_balance: None,
                continue_anyway: false,
                switch_to_point_cash: true,
            }),
        )));

        let effects = reducer().reduce(
            &mut state,
            FlightAction::CheckForSufficientPointsAndSellTrip {
                signup: None,
                enroll_in_club: false,
            },
            &env,
        );

        let produced = drain_effects(effects).await;
        match &produced[0] {
            FlightAction::SetFareSelection {
                index: 0,
                journey_fare: Some(jf),
            } => assert_eq!(jf.fare.key, "pc"),
            other => panic!("expected a point-cash re-selection, got {other:?}"),
        }
        assert_eq!(produced[1], FlightAction::ValidateAndUpdateFareSelection);
        assert_eq!(
            produced[2],
            FlightAction::SetPointsCashMode(PointsCashMode::PointsAndCash)
        );
    }

    #[tokio::test]
    async fn insufficient_points_updated_balance_stays_in_points_mode() {
        let state = award_state(1_000, false);
        let env = env_with_confirmations(MockConfirmationHost::new().with_response(Some(
            DialogResponse::InsufficientPoints(InsufficientPointsResponse {
                updated_balance: Some(20_000),
                continue_anyway: false,
                switch_to_point_cash: false,
            }),
        )));

        let effects = reducer().reduce(
            &mut { state },
            FlightAction::CheckForSufficientPointsAndSellTrip {
                signup: None,
                enroll_in_club: false,
            },
            &env,
        );

        assert_eq!(
            drain_effects(effects).await,
            vec![
                FlightAction::ChangeUsePoints {
                    use_points: true,
                    clear_selections: false,
                },
                FlightAction::UpdatePointBalance(20_000),
            ]
        );
    }

    #[tokio::test]
    async fn insufficient_points_cancel_clears_every_leg_and_leaves_points_mode() {
        let state = award_state(1_000, false);
        let env = env_with_confirmations(MockConfirmationHost::new().with_response(Some(
            DialogResponse::InsufficientPoints(InsufficientPointsResponse::default()),
        )));

        let effects = reducer().reduce(
            &mut { state },
            FlightAction::CheckForSufficientPointsAndSellTrip {
                signup: None,
                enroll_in_club: false,
            },
            &env,
        );

        assert_eq!(
            drain_effects(effects).await,
            vec![
                FlightAction::SetFareSelection {
                    index: 0,
                    journey_fare: None,
                },
                FlightAction::ChangeUsePoints {
                    use_points: false,
                    clear_selections: false,
                },
            ]
        );
    }

    #[tokio::test]
    async fn insufficient_points_dismissed_clears_fare_and_view_selections() {
        let state = award_state(1_000, false);
        let env = env_with_confirmations(MockConfirmationHost::new().with_response(None));

        let effects = reducer().reduce(
            &mut { state },
            FlightAction::CheckForSufficientPointsAndSellTrip {
                signup: None,
                enroll_in_club: false,
            },
            &env,
        );

        assert_eq!(
            drain_effects(effects).await,
            vec![FlightAction::ClearFareAndViewSelections]
        );
    }

    #[test]
    fn navigate_after_search_routes_modify_flows_to_their_pages() {
        let mut state = award_state(0, false);
        state.navigation.flow = Flow::MyTrips;

        let effects = reducer().reduce(
            &mut state,
            FlightAction::Navigate {
                trigger: NavigateTrigger::CombinationSearch,
            },
            &mock_environment(),
        );

        assertions::assert_dispatches(
            &effects,
            &[FlightAction::NavigateTo(Route::ModifyFlights(Flow::MyTrips))],
        );
    }

    #[test]
    fn navigate_skips_when_already_on_the_flights_page() {
        let mut state = award_state(0, false);
        state.navigation.current_url = "/book/flights".into();

        let effects = reducer().reduce(
            &mut state,
            FlightAction::Navigate {
                trigger: NavigateTrigger::CombinationSearch,
            },
            &mock_environment(),
        );

        assertions::assert_dispatches(&effects, &[]);
    }

    #[test]
    fn empty_package_inventory_falls_back_to_the_flight_route() {
        let mut state = award_state(0, false);
        state.search_input.as_mut().unwrap().search_type =
            SearchType::Package(PackageKind::FlightCar);
        state.package_result = Some(PackageInventory {
            hotels: 3,
            vehicles: 0,
        });

        let effects = reducer().reduce(
            &mut state,
            FlightAction::Navigate {
                trigger: NavigateTrigger::CombinationSearch,
            },
            &mock_environment(),
        );

        assertions::assert_dispatches(&effects, &[FlightAction::NavigateTo(Route::BookFlights)]);
    }

    #[test]
    fn navigate_after_modify_sell_advances_the_flow() {
        let effects = reducer().reduce(
            &mut FlightState::default(),
            FlightAction::Navigate {
                trigger: NavigateTrigger::ModifySellTrip,
            },
            &mock_environment(),
        );

        assertions::assert_dispatches(&effects, &[FlightAction::NavigateTo(Route::Next)]);
    }

    #[tokio::test]
    async fn modify_sell_with_bundles_triggers_repricing() {
        let base = mock_environment();
        let env = FlightEnvironment::new(
            MockAvailabilityClient::new().with_modify_sell_response(Ok(
                crate::models::ModifySellPayload {
                    new_booking: booking_data(),
                    seat_remapping_needed: true,
                },
            )),
            base.confirmations,
            base.booking,
            base.storage,
            base.clock,
        );
        let mut state = award_state(50_000, false);
        state.booking.selected_bundle_codes = vec!["BIZ".into()];

        let effects = reducer().reduce(
            &mut state,
            FlightAction::ModifySellTrip {
                signup: None,
                enroll_in_club: false,
            },
            &env,
        );

        let produced = drain_effects(effects).await;
        assert_eq!(produced[0], FlightAction::ClearErrors);
        let FlightAction::SetBookingData(Some(booking)) = &produced[1] else {
            panic!("expected booking data");
        };
        assert!(booking.seat_remapping_needed);
        let FlightAction::LoadAncillaryAvailability { next } = &produced[2] else {
            panic!("expected the ancillary load");
        };
        assert_eq!(next[0], FlightAction::RefreshConfiguration);
        assert!(matches!(
            next[1],
            FlightAction::Navigate {
                trigger: NavigateTrigger::ModifySellTrip
            }
        ));
        assert_eq!(produced[3], FlightAction::RepriceBundles);
    }

    #[tokio::test]
    async fn reset_session_failure_drops_the_continuation() {
        let base = mock_environment();
        let env = FlightEnvironment::new(
            base.availability,
            base.confirmations,
            MockBookingGateway::new().with_failure(),
            base.storage,
            base.clock,
        );

        let effects = reducer().reduce(
            &mut FlightState::default(),
            FlightAction::ResetSession {
                next: continuation(),
            },
            &env,
        );

        let produced = drain_effects(effects).await;
        assert!(matches!(produced[0], FlightAction::AddError(_)));
        assert_eq!(produced.len(), 1);
    }
}
