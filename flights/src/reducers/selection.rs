//! Fare selection validation and reactions.
//!
//! Handles the two-pass selection validation, the round-trip stale-fare
//! repair, the lowest-fare selection, and the reactions that keep the
//! redemption fee and club pricing in step with selection and login
//! changes.

use crate::actions::FlightAction;
use crate::environment::FlightEnvironment;
use crate::error::FlightError;
use crate::models::{
    CLUB_PRODUCT_CLASS, Fare, Journey, JourneyFare, LoyaltyKind, PointsCashMode, TripType,
};
use crate::providers::{AvailabilityClient, BookingGateway, ConfirmationHost, SessionStorage};
use crate::selectors;
use crate::state::FlightState;
use chrono::NaiveDateTime;
use fareflow_core::effect::Effect;
use fareflow_core::environment::Clock;
use fareflow_core::reducer::{INLINE_EFFECTS, Reducer};
use fareflow_core::{SmallVec, smallvec};

/// Selection workflow reducer.
#[derive(Debug, Clone)]
pub struct SelectionReducer<A, C, B, G, K> {
    _phantom: std::marker::PhantomData<(A, C, B, G, K)>,
}

impl<A, C, B, G, K> SelectionReducer<A, C, B, G, K> {
    /// Create the selection reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<A, C, B, G, K> Default for SelectionReducer<A, C, B, G, K> {
    fn default() -> Self {
        Self::new()
    }
}

/// The cheapest fare a user is eligible for on a journey, across the
/// standard, club-if-member, and card-holder-if-holder facets.
fn lowest_eligible_fare(journey: &Journey, is_club: bool, is_card_holder: bool) -> Option<Fare> {
    if journey.fares.is_empty() {
        return None;
    }

    let mut candidates: Vec<&Fare> = Vec::new();
    candidates.extend(journey.standard_fare.as_ref());
    if is_club {
        candidates.extend(journey.club_fare.as_ref());
    }
    if is_card_holder {
        candidates.extend(journey.card_holder_fare.as_ref());
    }

    candidates
        .into_iter()
        .min_by(|a, b| a.amount.total_cmp(&b.amount))
        .cloned()
}

/// Fee classification of a first-leg selection: points-only when the
/// selected value matches the journey's standard fare, blended
/// otherwise.
fn classify_loyalty<T: PartialEq>(selected: T, standard: Option<T>) -> LoyaltyKind {
    if standard.is_some_and(|s| s == selected) {
        LoyaltyKind::PointsOnly
    } else {
        LoyaltyKind::PointsAndMonetary
    }
}

impl<A, C, B, G, K> Reducer for SelectionReducer<A, C, B, G, K>
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
            // Two-pass selection validation
            // ═══════════════════════════════════════════════════════════
            FlightAction::ValidateFareSelections { next } => {
                // Pass 1: modify flows check the effective departure of
                // every leg — the current selection where one exists, the
                // already-booked journey otherwise. Any non-increasing
                // sequence short-circuits pass 2 entirely.
                let journeys = &state.booking.active_journeys;
                if !journeys.is_empty() {
                    let departures: Vec<NaiveDateTime> = journeys
                        .iter()
                        .enumerate()
                        .map(|(i, journey)| {
                            state.fare_selections.get(&i).map_or(
                                journey.designator.departure,
                                |jf| jf.journey.designator.departure,
                            )
                        })
                        .collect();

                    let ordered = departures.windows(2).all(|pair| pair[1] > pair[0]);
                    if !ordered {
                        return smallvec![Effect::one(FlightAction::AddError(
                            FlightError::InvalidFareSelections,
                        ))];
                    }
                }

                // Pass 2: selections in ascending leg order. The first
                // violation replaces the remainder of the continuation
                // with a single error; later keys are not checked.
                let mut previous: Option<NaiveDateTime> = None;
                let mut outcome = next;
                for jf in state.fare_selections.values() {
                    let departure = jf.journey.designator.departure;
                    if previous.is_some_and(|p| departure <= p) {
                        outcome = vec![FlightAction::AddError(
                            FlightError::InvalidFareSelections,
                        )];
                        break;
                    }
                    previous = Some(departure);

                    let journey_found = state
                        .search_result
                        .as_ref()
                        .is_some_and(|r| r.journey_exists(&jf.journey.journey_key));
                    if !journey_found {
                        outcome = vec![FlightAction::AddError(
                            FlightError::FareSelectionJourneyNotFound,
                        )];
                        break;
                    }

                    let fare_found = state
                        .search_result
                        .as_ref()
                        .is_some_and(|r| r.fare_key_exists(&jf.fare.key));
                    if !fare_found {
                        outcome = vec![FlightAction::AddError(
                            FlightError::FareSelectionFareNotFound,
                        )];
                        break;
                    }
                }

                smallvec![Effect::Dispatch(outcome)]
            }

            // ═══════════════════════════════════════════════════════════
            // Round-trip stale-fare repair
            // ═══════════════════════════════════════════════════════════
            FlightAction::ValidateAndUpdateFareSelection => {
                let applicable = state.search_input.as_ref().is_some_and(|input| {
                    input.trip_type == TripType::RoundTrip && !input.use_points
                });
                let Some(result) = state.search_result.as_ref() else {
                    return smallvec![];
                };
                if !applicable || state.fare_selections.is_empty() {
                    return smallvec![];
                }

                // Fix the first stale selection that can be re-resolved by
                // journey key; selections whose journey is gone are left
                // for ValidateFareSelections to report.
                for (index, jf) in &state.fare_selections {
                    if result.fare_key_exists_in_standard(&jf.fare.key) {
                        continue;
                    }

                    let resolved = result
                        .trips
                        .get(*index)
                        .and_then(|t| {
                            t.journeys
                                .iter()
                                .find(|j| j.journey_key == jf.journey.journey_key)
                        })
                        .and_then(|journey| {
                            let fare = if jf.fare.product_class == CLUB_PRODUCT_CLASS {
                                journey.club_fare.clone()
                            } else {
                                journey.standard_fare.clone()
                            };
                            fare.map(|fare| JourneyFare {
                                journey: journey.clone(),
                                fare,
                            })
                        });

                    if let Some(journey_fare) = resolved {
                        return smallvec![Effect::one(FlightAction::SetFareSelection {
                            index: *index,
                            journey_fare: Some(journey_fare),
                        })];
                    }
                }

                smallvec![]
            }

            // ═══════════════════════════════════════════════════════════
            // Lowest-fare selection
            // ═══════════════════════════════════════════════════════════
            FlightAction::SelectLowestFares => {
                let Some(result) = state.search_result.as_ref() else {
                    return smallvec![Effect::one(FlightAction::SelectLowestFaresFailure)];
                };
                let is_club = state.user.as_ref().is_some_and(|u| u.is_club_member);
                let is_card_holder = state.user.as_ref().is_some_and(|u| u.is_card_holder);

                let mut actions = Vec::with_capacity(result.trips.len());
                for (index, trip) in result.trips.iter().enumerate() {
                    let cheapest = trip
                        .journeys
                        .iter()
                        .filter_map(|journey| {
                            lowest_eligible_fare(journey, is_club, is_card_holder)
                                .map(|fare| (journey, fare))
                        })
                        .min_by(|(_, a), (_, b)| a.amount.total_cmp(&b.amount));

                    match cheapest {
                        Some((journey, fare)) => {
                            actions.push(FlightAction::SetFareSelection {
                                index,
                                journey_fare: Some(JourneyFare {
                                    journey: journey.clone(),
                                    fare,
                                }),
                            });
                        }
                        // A leg with no eligible journey fails the whole
                        // selection; no partial list is applied.
                        None => {
                            return smallvec![Effect::one(
                                FlightAction::SelectLowestFaresFailure
                            )];
                        }
                    }
                }

                smallvec![Effect::Dispatch(actions)]
            }

            // ═══════════════════════════════════════════════════════════
            // Redemption fee on first-leg selection
            // ═══════════════════════════════════════════════════════════
            FlightAction::SetFareSelection {
                index: 0,
                journey_fare: Some(journey_fare),
            } if selectors::is_award_booking(state) => {
                let loyalty = classify_loyalty(
                    journey_fare.fare.amount,
                    journey_fare.journey.standard_fare.as_ref().map(|f| f.amount),
                );
                let tier = state
                    .user
                    .as_ref()
                    .map(|u| u.tier_code.clone())
                    .unwrap_or_default();
                let departure = journey_fare.journey.designator.departure;
                let availability = env.availability.clone();

                smallvec![Effect::future(async move {
                    // A failed fee lookup degrades to a zero fee.
                    let fee = availability
                        .redemption_fee(departure, loyalty, &tier)
                        .await
                        .unwrap_or(0.0);
                    vec![FlightAction::SetRedemptionFee(fee)]
                })]
            }

            // ═══════════════════════════════════════════════════════════
            // Login reactions
            // ═══════════════════════════════════════════════════════════
            FlightAction::SetUser(Some(user)) => {
                let mut effects: SmallVec<[Effect<FlightAction>; INLINE_EFFECTS]> = smallvec![];
                let award = selectors::is_award_booking(state);

                // Re-price the redemption fee with the user's tier, unless
                // their tier waives it.
                if award && !user.redemption_fee_waiver {
                    if let Some(first) = state.fare_selections.get(&0) {
                        let loyalty = classify_loyalty(
                            first.fare.loyalty_points,
                            first
                                .journey
                                .standard_fare
                                .as_ref()
                                .map(|f| f.loyalty_points),
                        );
                        let tier = user.tier_code.clone();
                        let departure = first.journey.designator.departure;
                        let availability = env.availability.clone();

                        effects.push(Effect::future(async move {
                            let fee = availability
                                .redemption_fee(departure, loyalty, &tier)
                                .await
                                .unwrap_or(0.0);
                            vec![FlightAction::SetRedemptionFee(fee)]
                        }));
                    }
                }

                // A club member logging into an award booking gets club
                // pricing on every selection.
                if award && user.is_club_member && !state.fare_selections.is_empty() {
                    let point_cash = state.points_cash_mode == PointsCashMode::PointsAndCash;
                    let rewrites: Vec<FlightAction> = state
                        .fare_selections
                        .iter()
                        .filter_map(|(index, jf)| {
                            let fare = if point_cash {
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
                            fare.map(|fare| FlightAction::SetFareSelection {
                                index: *index,
                                journey_fare: Some(JourneyFare {
                                    journey: jf.journey.clone(),
                                    fare,
                                }),
                            })
                        })
                        .collect();
                    effects.push(Effect::Dispatch(rewrites));
                }

                effects
            }

            _ => smallvec![],
        }
    }
}
