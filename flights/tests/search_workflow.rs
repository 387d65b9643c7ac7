//! Search workflow integration tests.
//!
//! Drives the full combined reducer through the real store runtime with
//! mock providers, asserting on the processed action traces and the
//! resulting state.

#![allow(clippy::unwrap_used, clippy::panic)]

use chrono::NaiveDate;
use fareflow_core::environment::FixedClock;
use fareflow_flights::mocks::{
    MockAvailabilityClient, MockBookingGateway, MockConfirmationHost, MockSessionStorage,
    mock_environment,
};
use fareflow_flights::models::{
    Designator, FarePayload, JourneyPayload, PassengerFare, PointsCashMode, SearchCriterion,
    SearchPayload, SearchRequest, SearchType, ServiceCharge, TripPayload, TripType,
};
use fareflow_flights::reducers::{FlightReducer, flight_reducer};
use fareflow_flights::{FlightAction, FlightEnvironment, FlightState};
use fareflow_runtime::Store;

type TestEnv = FlightEnvironment<
    MockAvailabilityClient,
    MockConfirmationHost,
    MockBookingGateway,
    MockSessionStorage,
    FixedClock,
>;

type TestStore = Store<
    FlightState,
    FlightAction,
    TestEnv,
    FlightReducer<
        MockAvailabilityClient,
        MockConfirmationHost,
        MockBookingGateway,
        MockSessionStorage,
        FixedClock,
    >,
>;

fn store_with(env: TestEnv) -> TestStore {
    Store::new(FlightState::default(), flight_reducer(), env)
}

fn env_with_availability(availability: MockAvailabilityClient) -> TestEnv {
    let base = mock_environment();
    FlightEnvironment::new(
        availability,
        base.confirmations,
        base.booking,
        base.storage,
        base.clock,
    )
}

fn date(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

fn search_request() -> SearchRequest {
    SearchRequest {
        criteria: vec![SearchCriterion::new("JFK", "LAX", date(10))],
        passengers: 1,
        use_points: false,
        originally_points_only: false,
        default_journey_key: None,
        promo_code: None,
        trip_type: TripType::OneWay,
        search_type: SearchType::Flight,
        original_booking: None,
    }
}

fn fare_payload(key: &str, amount: f64, club: bool) -> FarePayload {
    FarePayload {
        fare_availability_key: key.to_string(),
        is_club_fare: club,
        is_card_holder_fare: false,
        product_class: if club { "RO".into() } else { "YO".into() },
        passenger_fares: vec![PassengerFare {
            fare_amount: amount,
            original_fare_amount: None,
            fare_amount_difference: None,
            loyalty_points: 1_000,
            accrual_total_tax: 4.5,
            service_charges: vec![ServiceCharge {
                detail: "TaxFeeSum".into(),
                amount: 12.0,
            }],
        }],
        point_cash: false,
    }
}

fn journey_payload(key: &str) -> JourneyPayload {
    JourneyPayload {
        journey_key: key.to_string(),
        designator: Designator {
            origin: "JFK".into(),
            destination: "LAX".into(),
            departure: date(10).and_hms_opt(9, 0, 0).unwrap(),
            arrival: date(10).and_hms_opt(15, 0, 0).unwrap(),
        },
        flight_number: "123".into(),
        fares: [
            ("f-std".to_string(), fare_payload("f-std", 100.0, false)),
            ("f-club".to_string(), fare_payload("f-club", 80.0, true)),
        ]
        .into(),
        point_cash_fares: None,
    }
}

fn one_journey_payload() -> SearchPayload {
    SearchPayload {
        trips: vec![TripPayload {
            origin: "JFK".into(),
            destination: "LAX".into(),
            journeys: vec![journey_payload("j1")],
        }],
    }
}

fn drain_trace(rx: &mut tokio::sync::broadcast::Receiver<FlightAction>) -> Vec<FlightAction> {
    let mut trace = Vec::new();
    while let Ok(action) = rx.try_recv() {
        trace.push(action);
    }
    trace
}

#[tokio::test]
async fn search_emits_loading_result_and_analytics_in_fixed_order() {
    let env = env_with_availability(
        MockAvailabilityClient::new().with_search_response(Ok(Some(one_journey_payload()))),
    );
    let store = store_with(env);
    let mut rx = store.subscribe();

    store
        .send(FlightAction::Search {
            search: search_request(),
        })
        .await
        .unwrap();

    let trace = drain_trace(&mut rx);
    assert!(matches!(trace[0], FlightAction::Search { .. }));
    assert_eq!(trace[1], FlightAction::SetSearchLoading(true));
    assert_eq!(trace[2], FlightAction::SetSearchLoading(false));
    assert!(matches!(trace[3], FlightAction::SetSearchResult { .. }));
    assert_eq!(trace[4], FlightAction::TrackUserDetails);
    assert_eq!(trace[5], FlightAction::TrackImpression);
    assert_eq!(trace[6], FlightAction::TrackFlightsAvailable);

    let (loading, result) = store
        .state(|s| (s.search_loading, s.search_result.clone()))
        .await;
    assert_eq!(loading, 0);
    let result = result.unwrap();
    assert_eq!(result.trips.len(), 1);
    assert_eq!(result.trips[0].journeys[0].journey_key, "j1");
    assert_eq!(
        result.trips[0].journeys[0].standard_fare.as_ref().unwrap().key,
        "f-std"
    );
}

#[tokio::test]
async fn empty_search_response_skips_analytics() {
    let env = env_with_availability(
        MockAvailabilityClient::new().with_search_response(Ok(None)),
    );
    let store = store_with(env);
    let mut rx = store.subscribe();

    store
        .send(FlightAction::Search {
            search: search_request(),
        })
        .await
        .unwrap();

    let trace = drain_trace(&mut rx);
    assert!(!trace.contains(&FlightAction::TrackUserDetails));
    assert!(!trace.contains(&FlightAction::TrackImpression));
    // An empty body still lands as a (journey-less) result.
    let result = store.state(|s| s.search_result.clone()).await.unwrap();
    assert!(result.trips[0].journeys.is_empty());
}

#[tokio::test]
async fn loading_counter_balances_under_overlapping_searches() {
    let env = env_with_availability(
        MockAvailabilityClient::new().with_search_response(Ok(Some(one_journey_payload()))),
    );
    let store = store_with(env);

    let first = store.send(FlightAction::Search {
        search: search_request(),
    });
    let second = store.send(FlightAction::Search {
        search: search_request(),
    });
    let (a, b) = tokio::join!(first, second);
    a.unwrap();
    b.unwrap();

    assert_eq!(store.state(|s| s.search_loading).await, 0);
}

#[tokio::test]
async fn failed_search_balances_the_counter_and_surfaces_the_error() {
    let env = env_with_availability(MockAvailabilityClient::new().with_search_response(Err(
        fareflow_flights::FlightError::Availability("timeout".into()),
    )));
    let store = store_with(env);

    store
        .send(FlightAction::Search {
            search: search_request(),
        })
        .await
        .unwrap();

    let (loading, errors) = store.state(|s| (s.search_loading, s.errors.clone())).await;
    assert_eq!(loading, 0);
    assert_eq!(errors.len(), 1);
}

#[tokio::test]
async fn hybrid_search_merges_points_fares_without_touching_cash_fares() {
    let availability = MockAvailabilityClient::new()
        .with_search_response(Ok(Some(one_journey_payload())))
        .with_points_search_response(Ok(Some(one_journey_payload())));
    let store = store_with(env_with_availability(availability.clone()));

    let mut search = search_request();
    search.use_points = true;
    store.send(FlightAction::Search { search }).await.unwrap();

    // Both calls ran.
    assert_eq!(availability.calls().len(), 2);

    let result = store.state(|s| s.search_result.clone()).await.unwrap();
    let journey = &result.trips[0].journeys[0];
    assert_eq!(journey.fares.len(), 2);
    assert!(journey.fares.values().all(|f| !f.point_cash));
    assert_eq!(journey.point_cash_fares.len(), 2);
    assert!(journey.point_cash_fares.values().all(|f| f.point_cash));
    assert!(journey.point_cash.is_some());
    assert!(journey.point_cash_club_fare.is_some());
}

#[tokio::test]
async fn combination_search_lands_both_results_and_routes() {
    let availability = MockAvailabilityClient::new()
        .with_search_response(Ok(Some(one_journey_payload())))
        .with_low_fare_response(Ok(None));
    let store = store_with(env_with_availability(availability));

    store
        .send(FlightAction::SetSearchInput(search_request()))
        .await
        .unwrap();
    store
        .send(FlightAction::CombinationSearch { next: vec![] })
        .await
        .unwrap();

    let state = store.state(std::clone::Clone::clone).await;
    assert!(state.search_result.is_some());
    assert!(state.low_fare_result.is_some());
    assert_eq!(state.points_cash_mode, PointsCashMode::Unset);
    assert_eq!(
        state.navigation.current_route,
        Some(fareflow_flights::models::Route::BookFlights)
    );
    assert!(state.errors.is_empty());
}

#[tokio::test]
async fn combination_search_with_bad_multi_city_dates_stops_at_validation() {
    let availability = MockAvailabilityClient::new()
        .with_search_response(Ok(Some(one_journey_payload())));
    let store = store_with(env_with_availability(availability.clone()));

    let mut search = search_request();
    search.trip_type = TripType::MultiCity;
    search.criteria = vec![
        SearchCriterion::new("JFK", "LAX", date(10)),
        SearchCriterion::new("LAX", "JFK", date(8)),
    ];
    store
        .send(FlightAction::SetSearchInput(search))
        .await
        .unwrap();
    store
        .send(FlightAction::CombinationSearch { next: vec![] })
        .await
        .unwrap();

    let state = store.state(std::clone::Clone::clone).await;
    assert_eq!(state.errors.len(), 1);
    assert!(state.search_result.is_none());
    // Neither search was issued.
    assert!(availability.calls().is_empty());
}

#[tokio::test]
async fn stale_selections_reresolve_when_a_fresh_result_lands() {
    let env = env_with_availability(
        MockAvailabilityClient::new().with_search_response(Ok(Some(one_journey_payload()))),
    );
    let store = store_with(env);

    store
        .send(FlightAction::Search {
            search: search_request(),
        })
        .await
        .unwrap();

    // Select the club fare of journey j1.
    let journey = store
        .state(|s| s.search_result.as_ref().unwrap().trips[0].journeys[0].clone())
        .await;
    let club = journey.club_fare.clone().unwrap();
    store
        .send(FlightAction::SetFareSelection {
            index: 0,
            journey_fare: Some(fareflow_flights::models::JourneyFare {
                journey,
                fare: club,
            }),
        })
        .await
        .unwrap();

    // A fresh result with renamed fare keys lands; the selection follows
    // the journey key and keeps its club facet.
    let mut fresh = one_journey_payload();
    let renamed: std::collections::BTreeMap<_, _> = [
        ("n-std".to_string(), fare_payload("n-std", 110.0, false)),
        ("n-club".to_string(), fare_payload("n-club", 90.0, true)),
    ]
    .into();
    fresh.trips[0].journeys[0].fares = renamed;
    store
        .send(FlightAction::SetSearchResult {
            search: search_request(),
            payload: Some(fresh),
        })
        .await
        .unwrap();

    let selection = store.state(|s| s.fare_selections.get(&0).cloned()).await.unwrap();
    assert_eq!(selection.fare.key, "n-club");
    assert!(selection.fare.is_club_fare);
}

#[tokio::test]
async fn clearing_a_selection_removes_the_key_and_unmakes_completion() {
    let env = env_with_availability(
        MockAvailabilityClient::new().with_search_response(Ok(Some(one_journey_payload()))),
    );
    let store = store_with(env);

    store
        .send(FlightAction::SetSearchInput(search_request()))
        .await
        .unwrap();
    store
        .send(FlightAction::Search {
            search: search_request(),
        })
        .await
        .unwrap();

    let journey = store
        .state(|s| s.search_result.as_ref().unwrap().trips[0].journeys[0].clone())
        .await;
    let fare = journey.standard_fare.clone().unwrap();
    store
        .send(FlightAction::SetFareSelection {
            index: 0,
            journey_fare: Some(fareflow_flights::models::JourneyFare { journey, fare }),
        })
        .await
        .unwrap();
    assert!(
        store
            .state(|s| fareflow_flights::selectors::all_fare_selection_made(s))
            .await
    );

    store
        .send(FlightAction::SetFareSelection {
            index: 0,
            journey_fare: None,
        })
        .await
        .unwrap();

    let (absent, complete) = store
        .state(|s| {
            (
                !s.fare_selections.contains_key(&0),
                fareflow_flights::selectors::all_fare_selection_made(s),
            )
        })
        .await;
    assert!(absent);
    assert!(!complete);
}

#[tokio::test]
async fn seasonal_notice_abandons_the_whole_chain() {
    let availability = MockAvailabilityClient::new()
        .with_search_response(Ok(Some(one_journey_payload())));
    let base = mock_environment();
    let confirmations = base.confirmations.clone();
    let env = FlightEnvironment::new(
        availability.clone(),
        base.confirmations,
        base.booking,
        base.storage,
        base.clock,
    );
    let store = store_with(env);

    store
        .send(FlightAction::SetSeasonalNotices(vec![
            fareflow_flights::models::SeasonalNotice {
                from_station: "JFK".into(),
                to_station: "ANY".into(),
                start_date: date(1),
                end_date: date(30),
                message: "route paused for the season".into(),
            },
        ]))
        .await
        .unwrap();
    store
        .send(FlightAction::SetSearchInput(search_request()))
        .await
        .unwrap();
    store
        .send(FlightAction::CombinationSearch { next: vec![] })
        .await
        .unwrap();

    assert_eq!(confirmations.opened().len(), 1);
    assert!(availability.calls().is_empty());
    assert!(store.state(|s| s.search_result.is_none()).await);
}

#[tokio::test]
async fn change_use_points_reruns_both_searches_after_a_session_reset() {
    let availability = MockAvailabilityClient::new()
        .with_search_response(Ok(Some(one_journey_payload())))
        .with_points_search_response(Ok(Some(one_journey_payload())))
        .with_low_fare_response(Ok(None));
    let base = mock_environment();
    let booking = base.booking.clone();
    let env = FlightEnvironment::new(
        availability.clone(),
        base.confirmations,
        booking.clone(),
        base.storage,
        base.clock,
    );
    let store = store_with(env);

    store
        .send(FlightAction::SetSearchInput(search_request()))
        .await
        .unwrap();
    store
        .send(FlightAction::CombinationSearch { next: vec![] })
        .await
        .unwrap();
    let calls_before = availability.calls().len();

    store
        .send(FlightAction::ChangeUsePoints {
            use_points: true,
            clear_selections: true,
        })
        .await
        .unwrap();

    assert!(
        booking
            .calls()
            .contains(&fareflow_flights::mocks::GatewayCall::ResetSession)
    );
    // The re-run issues the low-fare call plus the hybrid pair.
    assert_eq!(availability.calls().len(), calls_before + 3);
    let state = store.state(std::clone::Clone::clone).await;
    assert!(state.search_input.as_ref().unwrap().use_points);
    assert!(state.fare_selections.is_empty());
}
