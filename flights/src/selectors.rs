//! The derivation layer: pure projections over [`FlightState`].
//!
//! Every function here is referentially transparent — it reads the
//! snapshot (plus named external facts such as the current date) and
//! returns a derived value, recomputed on demand. Totals reduce over the
//! current selection map; an absent selection contributes zero. Savings
//! multiply the per-booking delta by seat count.

use crate::models::{
    LowFareDay, LowFareView, LowestFare, PointsCashMode, UserProfile,
};
use crate::state::{FareSelections, FlightState};
use chrono::{Duration, NaiveDate, NaiveDateTime};

/// Per-leg price breakdown row.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBreakdown {
    /// Cash total for this leg across all seats.
    pub total: f64,

    /// Loyalty point total for this leg across all seats.
    pub points_total: i64,

    /// Origin station code of the leg.
    pub origin: String,

    /// Destination station code of the leg.
    pub destination: String,
}

/// Whether the active booking is paid partly or fully with points.
///
/// True when a non-zero award total already exists on the in-progress
/// booking, or when the active search explicitly requested points.
#[must_use]
pub fn is_award_booking(state: &FlightState) -> bool {
    let booked_award = state
        .booking
        .data
        .as_ref()
        .is_some_and(|b| b.award_point_total > 0);
    let searched_points = state
        .search_result
        .as_ref()
        .is_some_and(|r| r.search.use_points);
    booked_award || searched_points
}

/// Seat count of the active search; never zero.
#[must_use]
pub fn seat_count(state: &FlightState) -> u32 {
    state
        .search_input
        .as_ref()
        .map_or(1, |s| s.passengers.max(1))
}

/// Sum of the standard fare amounts of the selected journeys.
#[must_use]
pub fn standard_fare_total(selections: &FareSelections) -> f64 {
    selections
        .values()
        .filter_map(|jf| jf.journey.standard_fare.as_ref())
        .map(|f| f.amount)
        .sum()
}

/// Sum of the selected fares' amounts.
#[must_use]
pub fn fare_selection_total(selections: &FareSelections) -> f64 {
    selections.values().map(|jf| jf.fare.amount).sum()
}

/// Sum of the selected fares' loyalty point costs.
#[must_use]
pub fn loyalty_points_selection_total(selections: &FareSelections) -> i64 {
    selections.values().map(|jf| jf.fare.loyalty_points).sum()
}

/// Sum of the point-cash fare amounts of the selected journeys.
///
/// Club members price at the point-cash club fare where one exists.
#[must_use]
pub fn point_cash_fare_total(selections: &FareSelections, is_club_member: bool) -> f64 {
    selections
        .values()
        .filter_map(|jf| {
            if is_club_member && jf.journey.point_cash_club_fare.is_some() {
                jf.journey.point_cash_club_fare.as_ref()
            } else {
                jf.journey.point_cash.as_ref()
            }
        })
        .map(|f| f.amount)
        .sum()
}

/// Sum of the loyalty point costs of the selected journeys' cash fares.
///
/// Club members price at the club fare where one exists.
#[must_use]
pub fn loyalty_points_total(selections: &FareSelections, is_club_member: bool) -> i64 {
    selections
        .values()
        .filter_map(|jf| {
            if is_club_member && jf.journey.club_fare.is_some() {
                jf.journey.club_fare.as_ref()
            } else {
                jf.journey.standard_fare.as_ref()
            }
        })
        .map(|f| f.loyalty_points)
        .sum()
}

/// Sum of the loyalty point costs of the selected journeys' point-cash
/// fares.
///
/// Club members price at the point-cash club fare where one exists.
#[must_use]
pub fn points_cash_loyalty_points_total(selections: &FareSelections, is_club_member: bool) -> i64 {
    selections
        .values()
        .filter_map(|jf| {
            if is_club_member && jf.journey.point_cash_club_fare.is_some() {
                jf.journey.point_cash_club_fare.as_ref()
            } else {
                jf.journey.point_cash.as_ref()
            }
        })
        .map(|f| f.loyalty_points)
        .sum()
}

/// Cash saved across the booking by taking club fares over standard,
/// multiplied by seat count.
#[must_use]
pub fn club_savings(selections: &FareSelections, seats: u32) -> f64 {
    let per_booking: f64 = selections
        .values()
        .filter_map(|jf| {
            let club = jf.journey.club_fare.as_ref()?;
            let standard = jf.journey.standard_fare.as_ref()?;
            Some(standard.amount - club.amount)
        })
        .sum();
    per_booking * f64::from(seats.max(1))
}

/// Loyalty points a non-member would save by enrolling, multiplied by
/// seat count. Zero for members — they already price at the club fare.
#[must_use]
pub fn loyalty_points_club_saving_total(
    selections: &FareSelections,
    seats: u32,
    is_club_member: bool,
) -> i64 {
    if is_club_member {
        return 0;
    }
    let per_booking: i64 = selections
        .values()
        .filter_map(|jf| {
            let club = jf.journey.club_fare.as_ref()?;
            let standard = jf.journey.standard_fare.as_ref()?;
            Some(standard.loyalty_points - club.loyalty_points)
        })
        .sum();
    per_booking * i64::from(seats.max(1))
}

/// Point-cash analogue of [`loyalty_points_club_saving_total`].
#[must_use]
pub fn points_cash_loyalty_points_club_saving_total(
    selections: &FareSelections,
    seats: u32,
    is_club_member: bool,
) -> i64 {
    if is_club_member {
        return 0;
    }
    let per_booking: i64 = selections
        .values()
        .filter_map(|jf| {
            let club = jf.journey.point_cash_club_fare.as_ref()?;
            let plain = jf.journey.point_cash.as_ref()?;
            Some(plain.loyalty_points - club.loyalty_points)
        })
        .sum();
    per_booking * i64::from(seats.max(1))
}

/// Cash a non-member would save on point-cash fares by enrolling,
/// multiplied by seat count.
#[must_use]
pub fn points_cash_fare_club_saving_total(
    selections: &FareSelections,
    seats: u32,
    is_club_member: bool,
) -> f64 {
    if is_club_member {
        return 0.0;
    }
    points_cash_fare_saving_total(selections, seats)
}

/// Cash delta between plain and club point-cash fares across the
/// booking, multiplied by seat count, regardless of membership.
#[must_use]
pub fn points_cash_fare_saving_total(selections: &FareSelections, seats: u32) -> f64 {
    let per_booking: f64 = selections
        .values()
        .filter_map(|jf| {
            let club = jf.journey.point_cash_club_fare.as_ref()?;
            let plain = jf.journey.point_cash.as_ref()?;
            Some(plain.amount - club.amount)
        })
        .sum();
    per_booking * f64::from(seats.max(1))
}

/// Loyalty point total priced at the card-holder fare where one exists,
/// falling back to the standard fare.
#[must_use]
pub fn loyalty_points_card_holder_total(selections: &FareSelections) -> i64 {
    selections
        .values()
        .filter_map(|jf| {
            jf.journey
                .card_holder_fare
                .as_ref()
                .or(jf.journey.standard_fare.as_ref())
        })
        .map(|f| f.loyalty_points)
        .sum()
}

/// Whether any selected fare is a club fare.
#[must_use]
pub fn selection_is_club_fare(selections: &FareSelections) -> bool {
    selections.values().any(|jf| jf.fare.is_club_fare)
}

/// Whether any selected fare came from the points search of a hybrid
/// merge.
#[must_use]
pub fn point_cash_selection(selections: &FareSelections) -> bool {
    selections.values().any(|jf| jf.fare.point_cash)
}

/// The active user's point balance across award-funding programs; zero
/// while logged out.
#[must_use]
pub fn user_point_balance(state: &FlightState) -> i64 {
    state.user.as_ref().map_or(0, UserProfile::point_balance)
}

/// The redemption fee of the active award booking.
#[must_use]
pub fn redemption_fee(state: &FlightState) -> f64 {
    state.redemption_fee
}

/// Whether every visible leg has a selection.
///
/// Compares the selection count against the number of legs whose
/// criteria are not flagged hidden. False while no search result exists.
#[must_use]
pub fn all_fare_selection_made(state: &FlightState) -> bool {
    let Some(result) = state.search_result.as_ref() else {
        return false;
    };
    let visible_legs = result
        .trips
        .iter()
        .enumerate()
        .filter(|(i, _)| !result.search.criteria.get(*i).is_some_and(|c| c.hidden))
        .count();
    state.fare_selections.len() == visible_legs
}

/// Whether the first selection departs within the next 24 hours.
#[must_use]
pub fn fare_selection_within_24_hours(selections: &FareSelections, now: NaiveDateTime) -> bool {
    selections.values().next().is_some_and(|jf| {
        let delta = jf.journey.designator.departure.signed_duration_since(now);
        delta >= Duration::zero() && delta <= Duration::hours(24)
    })
}

/// Loyalty point total of the selected fares across all seats.
#[must_use]
pub fn flight_points_breakdown_total(selections: &FareSelections, seats: u32) -> i64 {
    loyalty_points_selection_total(selections) * i64::from(seats.max(1))
}

/// The points the current selections require under the active mode,
/// across all seats, net of the club-enrollment discount when the caller
/// is enrolling.
#[must_use]
pub fn loyalty_points_required(state: &FlightState, enroll_in_club: bool) -> i64 {
    let is_club = state.user.as_ref().is_some_and(|u| u.is_club_member);
    let seats = seat_count(state);
    let selections = &state.fare_selections;

    if state.points_cash_mode == PointsCashMode::PointsAndCash {
        let total = points_cash_loyalty_points_total(selections, is_club) * i64::from(seats);
        if enroll_in_club {
            total - points_cash_loyalty_points_club_saving_total(selections, seats, is_club)
        } else {
            total
        }
    } else {
        let total = loyalty_points_total(selections, is_club) * i64::from(seats);
        if enroll_in_club {
            total - loyalty_points_club_saving_total(selections, seats, is_club)
        } else {
            total
        }
    }
}

/// Headline flight total for the price breakdown.
///
/// Award bookings price at the standard total (cash or points-only mode)
/// or the selected-fare total (points-and-cash mode) plus the redemption
/// fee; cash bookings price at the selected-fare total. Multiplied by
/// seat count.
#[must_use]
pub fn flight_breakdown_total(state: &FlightState) -> f64 {
    let seats = f64::from(seat_count(state));
    let selections = &state.fare_selections;

    if is_award_booking(state) {
        let base = match state.points_cash_mode {
            PointsCashMode::Unset | PointsCashMode::PointsOnly => standard_fare_total(selections),
            PointsCashMode::PointsAndCash => fare_selection_total(selections),
        };
        (base + state.redemption_fee) * seats
    } else {
        fare_selection_total(selections) * seats
    }
}

/// Per-leg breakdown rows for the flights section of the price summary.
#[must_use]
pub fn flights_section_breakdown_totals(
    selections: &FareSelections,
    seats: u32,
) -> Vec<SectionBreakdown> {
    let seats = seats.max(1);
    selections
        .values()
        .map(|jf| SectionBreakdown {
            total: jf.fare.amount * f64::from(seats),
            points_total: jf.fare.loyalty_points * i64::from(seats),
            origin: jf.journey.designator.origin.clone(),
            destination: jf.journey.designator.destination.clone(),
        })
        .collect()
}

/// The low-fare calendar view selected for a leg.
#[must_use]
pub fn low_fare_view(state: &FlightState, index: usize) -> Option<LowFareView> {
    state.low_fare_views.get(&index).copied()
}

/// Expand the stored low-fare result into per-day calendar cells.
///
/// Each leg's begin/end window becomes one cell per day, in window
/// order. Past dates and dates with no market are empty cells. In points
/// mode the cell prices at the market's lowest point amount; in cash
/// mode at the cheapest fare-plus-taxes across the market's low fares.
#[must_use]
pub fn low_fare_calendar(state: &FlightState, today: NaiveDate) -> Vec<LowFareDay> {
    let Some(result) = state.low_fare_result.as_ref() else {
        return Vec::new();
    };

    let mut days = Vec::new();
    for (trip_index, criterion) in result.search.criteria.iter().enumerate() {
        let mut date = criterion.begin_date;
        while date <= criterion.end_date {
            let market = result.payload.as_ref().and_then(|p| {
                p.markets.iter().find(|m| {
                    m.origin == criterion.origin
                        && m.destination == criterion.destination
                        && m.departure_date == date
                })
            });

            let lowest = match market {
                Some(market) if date >= today => {
                    if result.search.use_points {
                        market.lowest_fare_amount.as_ref().map(|lfa| {
                            #[allow(clippy::cast_precision_loss)]
                            let points = lfa.fare_point_amount as f64;
                            LowestFare {
                                fare_amount: points,
                                taxes_and_fees_amount: 0.0,
                                total_fare_amount: points,
                                fare_amount_difference: lfa.fare_amount_difference,
                            }
                        })
                    } else {
                        market
                            .low_fares
                            .iter()
                            .filter_map(|entry| {
                                entry
                                    .passengers
                                    .get("ADT")
                                    .or_else(|| entry.passengers.get("CHD"))
                                    .map(|p| LowestFare {
                                        fare_amount: p.fare_amount,
                                        taxes_and_fees_amount: p.taxes_and_fees_amount,
                                        total_fare_amount: p.fare_amount
                                            + p.taxes_and_fees_amount,
                                        fare_amount_difference: p.fare_amount_difference.or(
                                            market
                                                .lowest_fare_amount
                                                .as_ref()
                                                .and_then(|l| l.fare_amount_difference),
                                        ),
                                    })
                            })
                            .min_by(|a, b| {
                                a.total_fare_amount.total_cmp(&b.total_fare_amount)
                            })
                    }
                }
                _ => None,
            };

            days.push(LowFareDay {
                origin: criterion.origin.clone(),
                destination: criterion.destination.clone(),
                date,
                trip_index,
                lowest,
            });
            date += Duration::days(1);
        }
    }
    days
}
