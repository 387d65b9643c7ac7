//! Domain models for fare search and purchase.
//!
//! Raw payload types mirror what the availability system returns; enriched
//! types are what the rest of the workflow operates on. Enrichment happens
//! once, when a search result lands, so every downstream reader sees the
//! derived fare slots and journey flags without recomputing them.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque journey identifier assigned by the availability system.
pub type JourneyKey = String;

/// Opaque fare availability key assigned by the availability system.
pub type FareKey = String;

/// Loyalty program whose point balances fund award bookings.
pub const LOYALTY_PROGRAM_CODE: &str = "NK";

/// Product class marking a fare as the reduced club class.
pub const CLUB_PRODUCT_CLASS: &str = "RO";

/// Local departures before this hour are flagged as early flights.
pub const EARLY_DEPARTURE_HOUR: u32 = 4;

/// Days added on each side of a criterion date for the low-fare window.
pub const LOW_FARE_WINDOW_DAYS: i64 = 3;

// ═══════════════════════════════════════════════════════════════════════
// Search input
// ═══════════════════════════════════════════════════════════════════════

/// Trip shape of a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TripType {
    /// Single leg.
    OneWay,
    /// Outbound plus return leg.
    RoundTrip,
    /// Three or more independently dated legs.
    MultiCity,
}

/// Product kind of a combination search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchType {
    /// Flight-only search.
    Flight,
    /// Multi-product package search.
    Package(PackageKind),
}

/// Package composition of a multi-product search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PackageKind {
    /// Flight plus rental car.
    FlightCar,
    /// Flight plus hotel.
    FlightHotel,
    /// Flight plus hotel plus rental car.
    FlightHotelCar,
}

/// One origin/destination/date unit of a (possibly multi-city) search.
///
/// Ordering within the request is semantically significant: each index is
/// one leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCriterion {
    /// Origin station code.
    pub origin: String,

    /// Destination station code.
    pub destination: String,

    /// Travel date for this leg.
    pub date: NaiveDate,

    /// Pre-selected journey for this leg, if any.
    pub journey_key: Option<JourneyKey>,

    /// Legs flagged hidden are excluded from the all-selections check.
    pub hidden: bool,
}

impl SearchCriterion {
    /// Create a visible criterion with no pre-selected journey.
    #[must_use]
    pub fn new(origin: impl Into<String>, destination: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            date,
            journey_key: None,
            hidden: false,
        }
    }
}

/// The booking being modified, when the search runs inside a modify flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginalBooking {
    /// Record locator of the booking being modified.
    pub record_locator: String,

    /// Journey keys of the originally booked journeys, in leg order.
    pub journey_keys: Vec<JourneyKey>,
}

/// A trip search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Ordered legs of the search.
    pub criteria: Vec<SearchCriterion>,

    /// Passenger/seat count.
    pub passengers: u32,

    /// Whether the search prices in loyalty points.
    pub use_points: bool,

    /// Modify flows: whether the original booking was paid purely in
    /// points.
    pub originally_points_only: bool,

    /// Journey to pre-select in each leg's result, if present.
    pub default_journey_key: Option<JourneyKey>,

    /// Promo code applied at sell time.
    pub promo_code: Option<String>,

    /// Trip shape.
    pub trip_type: TripType,

    /// Product kind.
    pub search_type: SearchType,

    /// Present when the search runs inside a modify flow.
    pub original_booking: Option<OriginalBooking>,
}

/// One leg of a low-fare calendar search: the criterion date widened to a
/// begin/end window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowFareCriterion {
    /// Origin station code.
    pub origin: String,

    /// Destination station code.
    pub destination: String,

    /// First date of the window.
    pub begin_date: NaiveDate,

    /// Last date of the window.
    pub end_date: NaiveDate,

    /// The date the user actually searched for.
    pub selected_date: NaiveDate,
}

/// A low-fare calendar search request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowFareSearchRequest {
    /// Ordered legs of the search.
    pub criteria: Vec<LowFareCriterion>,

    /// Whether the calendar prices in loyalty points.
    pub use_points: bool,
}

impl LowFareSearchRequest {
    /// Widen a trip search into its low-fare calendar request.
    #[must_use]
    pub fn from_search(search: &SearchRequest) -> Self {
        Self {
            criteria: search
                .criteria
                .iter()
                .map(|c| LowFareCriterion {
                    origin: c.origin.clone(),
                    destination: c.destination.clone(),
                    begin_date: c.date - chrono::Duration::days(LOW_FARE_WINDOW_DAYS),
                    end_date: c.date + chrono::Duration::days(LOW_FARE_WINDOW_DAYS),
                    selected_date: c.date,
                })
                .collect(),
            use_points: search.use_points,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Availability payloads (raw)
// ═══════════════════════════════════════════════════════════════════════

/// Departure/arrival designator of a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Designator {
    /// Origin station code.
    pub origin: String,

    /// Destination station code.
    pub destination: String,

    /// Local departure time.
    pub departure: NaiveDateTime,

    /// Local arrival time.
    pub arrival: NaiveDateTime,
}

/// One service charge row of a passenger fare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCharge {
    /// Charge detail code; tax/fee rows carry `"TaxFeeSum"`.
    pub detail: String,

    /// Charge amount.
    pub amount: f64,
}

/// Per-passenger pricing detail of a raw fare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassengerFare {
    /// Cash amount.
    pub fare_amount: f64,

    /// Pre-discount amount, when the fare is discounted.
    pub original_fare_amount: Option<f64>,

    /// Modify flows: delta versus the original booking's fare.
    pub fare_amount_difference: Option<f64>,

    /// Loyalty point cost.
    pub loyalty_points: i64,

    /// Accrued tax total.
    pub accrual_total_tax: f64,

    /// Itemized charges.
    pub service_charges: Vec<ServiceCharge>,
}

/// A raw fare as returned by the availability system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarePayload {
    /// Availability key for this fare.
    pub fare_availability_key: FareKey,

    /// Club (member) fare flag.
    pub is_club_fare: bool,

    /// Card-holder fare flag.
    pub is_card_holder_fare: bool,

    /// Product class code.
    pub product_class: String,

    /// Per-passenger pricing; the first entry drives the headline amounts.
    pub passenger_fares: Vec<PassengerFare>,

    /// Set on fares copied from a points search during the hybrid merge.
    pub point_cash: bool,
}

/// A raw journey as returned by the availability system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyPayload {
    /// Journey identifier.
    pub journey_key: JourneyKey,

    /// Departure/arrival designator.
    pub designator: Designator,

    /// Marketing flight number of the first segment.
    pub flight_number: String,

    /// Fares keyed by availability key.
    pub fares: BTreeMap<FareKey, FarePayload>,

    /// Point-cash fares, populated by the hybrid merge.
    pub point_cash_fares: Option<BTreeMap<FareKey, FarePayload>>,
}

/// One leg of a raw search payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPayload {
    /// Origin station code.
    pub origin: String,

    /// Destination station code.
    pub destination: String,

    /// Bookable journeys for this leg.
    pub journeys: Vec<JourneyPayload>,
}

/// A raw search payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    /// One entry per leg, in request order.
    pub trips: Vec<TripPayload>,
}

impl SearchPayload {
    /// Merge a points-mode payload into this cash-mode payload.
    ///
    /// Every fare of the points payload is copied into the corresponding
    /// journey (matched by position) under the separate point-cash fare
    /// set, tagged as a point-cash fare. The cash fare sets are untouched.
    #[must_use]
    pub fn merge_point_cash(mut self, points: SearchPayload) -> SearchPayload {
        for (trip, points_trip) in self.trips.iter_mut().zip(points.trips) {
            for (journey, points_journey) in trip.journeys.iter_mut().zip(points_trip.journeys) {
                let fares = points_journey
                    .fares
                    .into_iter()
                    .map(|(key, fare)| {
                        (
                            key,
                            FarePayload {
                                point_cash: true,
                                ..fare
                            },
                        )
                    })
                    .collect();
                journey.point_cash_fares = Some(fares);
            }
        }
        self
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Enriched result types
// ═══════════════════════════════════════════════════════════════════════

/// A priced, faceted offer attached to a journey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fare {
    /// Availability key.
    pub key: FareKey,

    /// Headline amount: the fare-amount delta in modify flows, the cash
    /// amount otherwise.
    pub amount: f64,

    /// Pre-discount amount, when discounted.
    pub original_amount: Option<f64>,

    /// Modify flows: delta versus the original booking's fare.
    pub amount_difference: Option<f64>,

    /// Loyalty point cost.
    pub loyalty_points: i64,

    /// Accrued tax total.
    pub accrual_total_tax: f64,

    /// Sum of tax/fee service charges across all passengers.
    pub tax_fee_sum: f64,

    /// Club (member) fare flag.
    pub is_club_fare: bool,

    /// Card-holder fare flag.
    pub is_card_holder_fare: bool,

    /// Product class code.
    pub product_class: String,

    /// Whether this fare came from the points search of a hybrid merge.
    pub point_cash: bool,
}

impl Fare {
    /// Flatten a raw fare's per-passenger detail into the flat shape the
    /// workflow operates on.
    #[must_use]
    pub fn from_payload(payload: &FarePayload) -> Self {
        let headline = payload.passenger_fares.first();
        let tax_fee_sum = payload
            .passenger_fares
            .iter()
            .flat_map(|pf| &pf.service_charges)
            .filter(|sc| sc.detail == "TaxFeeSum")
            .map(|sc| sc.amount)
            .sum();

        Self {
            key: payload.fare_availability_key.clone(),
            amount: headline
                .map(|pf| pf.fare_amount_difference.unwrap_or(pf.fare_amount))
                .unwrap_or_default(),
            original_amount: headline.and_then(|pf| pf.original_fare_amount),
            amount_difference: headline.and_then(|pf| pf.fare_amount_difference),
            loyalty_points: headline.map(|pf| pf.loyalty_points).unwrap_or_default(),
            accrual_total_tax: headline.map(|pf| pf.accrual_total_tax).unwrap_or_default(),
            tax_fee_sum,
            is_club_fare: payload.is_club_fare,
            is_card_holder_fare: payload.is_card_holder_fare,
            product_class: payload.product_class.clone(),
            point_cash: payload.point_cash,
        }
    }
}

/// A bookable flight option for one leg, enriched with derived fare slots
/// and schedule flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Journey {
    /// Journey identifier.
    pub journey_key: JourneyKey,

    /// Departure/arrival designator.
    pub designator: Designator,

    /// Marketing flight number of the first segment.
    pub flight_number: String,

    /// Cash fares keyed by availability key.
    pub fares: BTreeMap<FareKey, Fare>,

    /// Point-cash fares keyed by availability key; empty outside hybrid
    /// searches.
    pub point_cash_fares: BTreeMap<FareKey, Fare>,

    /// First non-club cash fare.
    pub standard_fare: Option<Fare>,

    /// First club cash fare.
    pub club_fare: Option<Fare>,

    /// First card-holder cash fare.
    pub card_holder_fare: Option<Fare>,

    /// First non-club point-cash fare.
    pub point_cash: Option<Fare>,

    /// First club point-cash fare.
    pub point_cash_club_fare: Option<Fare>,

    /// Local departure hour is before [`EARLY_DEPARTURE_HOUR`].
    pub is_early: bool,

    /// Arrival date is strictly after the departure date.
    pub is_next_day_arrival: bool,
}

impl Journey {
    /// Enrich a raw journey: flatten its fares and derive the fare slots
    /// and schedule flags.
    #[must_use]
    pub fn enrich(payload: &JourneyPayload) -> Self {
        let fares: BTreeMap<FareKey, Fare> = payload
            .fares
            .iter()
            .map(|(key, fare)| (key.clone(), Fare::from_payload(fare)))
            .collect();
        let point_cash_fares: BTreeMap<FareKey, Fare> = payload
            .point_cash_fares
            .as_ref()
            .map(|pcf| {
                pcf.iter()
                    .map(|(key, fare)| (key.clone(), Fare::from_payload(fare)))
                    .collect()
            })
            .unwrap_or_default();

        let standard_fare = fares.values().find(|f| !f.is_club_fare).cloned();
        let club_fare = fares.values().find(|f| f.is_club_fare).cloned();
        let card_holder_fare = fares.values().find(|f| f.is_card_holder_fare).cloned();
        let point_cash = point_cash_fares.values().find(|f| !f.is_club_fare).cloned();
        let point_cash_club_fare = point_cash_fares.values().find(|f| f.is_club_fare).cloned();

        Self {
            journey_key: payload.journey_key.clone(),
            designator: payload.designator.clone(),
            flight_number: payload.flight_number.clone(),
            fares,
            point_cash_fares,
            standard_fare,
            club_fare,
            card_holder_fare,
            point_cash,
            point_cash_club_fare,
            is_early: payload.designator.departure.hour() < EARLY_DEPARTURE_HOUR,
            is_next_day_arrival: payload.designator.arrival.date() > payload.designator.departure.date(),
        }
    }
}

/// One leg of an enriched search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trip {
    /// Origin station code.
    pub origin: String,

    /// Destination station code.
    pub destination: String,

    /// Enriched journeys for this leg.
    pub journeys: Vec<Journey>,

    /// Journey matching the request's default journey key, if any.
    pub default_journey: Option<Journey>,
}

/// An enriched search result: the request plus one trip per leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// The request that produced this result.
    pub search: SearchRequest,

    /// One trip per leg, in request order.
    pub trips: Vec<Trip>,
}

impl SearchResult {
    /// Build an enriched result from a raw payload.
    ///
    /// Legs the payload omitted get an empty placeholder trip at their
    /// request position, so leg indices always line up with criteria.
    #[must_use]
    pub fn from_payload(search: SearchRequest, payload: Option<SearchPayload>) -> Self {
        let mut trips = payload.map(|p| p.trips).unwrap_or_default();

        for (i, criterion) in search.criteria.iter().enumerate() {
            let present = trips
                .iter()
                .any(|t| t.origin == criterion.origin && t.destination == criterion.destination);
            if !present {
                trips.insert(
                    i.min(trips.len()),
                    TripPayload {
                        origin: criterion.origin.clone(),
                        destination: criterion.destination.clone(),
                        journeys: Vec::new(),
                    },
                );
            }
        }

        let trips = trips
            .iter()
            .map(|trip| {
                let journeys: Vec<Journey> = trip.journeys.iter().map(Journey::enrich).collect();
                let default_journey = search.default_journey_key.as_ref().and_then(|key| {
                    journeys.iter().find(|j| &j.journey_key == key).cloned()
                });
                Trip {
                    origin: trip.origin.clone(),
                    destination: trip.destination.clone(),
                    journeys,
                    default_journey,
                }
            })
            .collect();

        Self { search, trips }
    }

    /// Whether any trip still offers the given journey.
    #[must_use]
    pub fn journey_exists(&self, journey_key: &str) -> bool {
        self.trips
            .iter()
            .any(|t| t.journeys.iter().any(|j| j.journey_key == journey_key))
    }

    /// Whether any journey still offers the given fare key, in either its
    /// cash fare set or its point-cash fare set.
    #[must_use]
    pub fn fare_key_exists(&self, fare_key: &str) -> bool {
        self.trips.iter().any(|t| {
            t.journeys.iter().any(|j| {
                j.fares.contains_key(fare_key) || j.point_cash_fares.contains_key(fare_key)
            })
        })
    }

    /// Whether any journey still offers the given fare key in its cash
    /// fare set.
    #[must_use]
    pub fn fare_key_exists_in_standard(&self, fare_key: &str) -> bool {
        self.trips
            .iter()
            .any(|t| t.journeys.iter().any(|j| j.fares.contains_key(fare_key)))
    }

    /// Position of the trip serving the given origin/destination pair.
    #[must_use]
    pub fn trip_index_for(&self, origin: &str, destination: &str) -> Option<usize> {
        self.trips
            .iter()
            .position(|t| t.origin == origin && t.destination == destination)
    }
}

/// A journey/fare pair selected for one leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JourneyFare {
    /// The selected journey.
    pub journey: Journey,

    /// The selected fare within that journey.
    pub fare: Fare,
}

// ═══════════════════════════════════════════════════════════════════════
// Low-fare calendar
// ═══════════════════════════════════════════════════════════════════════

/// A raw low-fare market: one origin/destination/date cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowFareMarketPayload {
    /// Origin station code.
    pub origin: String,

    /// Destination station code.
    pub destination: String,

    /// Departure date of this cell.
    pub departure_date: NaiveDate,

    /// Headline lowest amount for points-mode calendars.
    pub lowest_fare_amount: Option<LowestFareAmount>,

    /// Per-fare detail for cash-mode calendars.
    pub low_fares: Vec<LowFareEntry>,
}

/// Headline lowest amount of a market.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowestFareAmount {
    /// Cash amount.
    pub fare_amount: f64,

    /// Loyalty point amount.
    pub fare_point_amount: i64,

    /// Modify flows: delta versus the original booking's fare.
    pub fare_amount_difference: Option<f64>,
}

/// One low-fare entry with per-passenger-type pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowFareEntry {
    /// Pricing keyed by passenger type code (`"ADT"`, `"CHD"`, ...).
    pub passengers: BTreeMap<String, LowFarePassenger>,
}

/// Per-passenger-type pricing of a low-fare entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowFarePassenger {
    /// Cash amount.
    pub fare_amount: f64,

    /// Taxes and fees amount.
    pub taxes_and_fees_amount: f64,

    /// Modify flows: delta versus the original booking's fare.
    pub fare_amount_difference: Option<f64>,
}

/// A raw low-fare search payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowFarePayload {
    /// Markets in no particular order; the calendar derivation aligns them
    /// to the request windows.
    pub markets: Vec<LowFareMarketPayload>,
}

/// A stored low-fare search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowFareResult {
    /// The request that produced this result.
    pub search: LowFareSearchRequest,

    /// The raw payload, if the system returned one.
    pub payload: Option<LowFarePayload>,
}

/// One derived cell of the low-fare calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowFareDay {
    /// Origin station code.
    pub origin: String,

    /// Destination station code.
    pub destination: String,

    /// Date of this cell.
    pub date: NaiveDate,

    /// Leg index this cell belongs to.
    pub trip_index: usize,

    /// Lowest fare offered on this date; `None` for past dates and dates
    /// with no availability.
    pub lowest: Option<LowestFare>,
}

/// The lowest fare of a calendar cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowestFare {
    /// Cash (or point, in points mode) amount.
    pub fare_amount: f64,

    /// Taxes and fees amount.
    pub taxes_and_fees_amount: f64,

    /// Fare plus taxes and fees.
    pub total_fare_amount: f64,

    /// Modify flows: delta versus the original booking's fare.
    pub fare_amount_difference: Option<f64>,
}

/// View mode of a leg's low-fare calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LowFareView {
    /// Day-by-day grid.
    Grid,
    /// Flat list.
    List,
}

// ═══════════════════════════════════════════════════════════════════════
// Purchase and booking
// ═══════════════════════════════════════════════════════════════════════

/// Points/cash purchase mode of the active booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PointsCashMode {
    /// Cash purchase; no award pricing selected.
    #[default]
    Unset,

    /// Pure points purchase.
    PointsOnly,

    /// Hybrid points-plus-cash purchase.
    PointsAndCash,
}

impl PointsCashMode {
    /// Wire code of this mode.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Unset => "",
            Self::PointsOnly => "P",
            Self::PointsAndCash => "Pc",
        }
    }
}

/// Fee classification of an award booking's first leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoyaltyKind {
    /// The selected fare is the plain standard fare paid in points.
    PointsOnly,

    /// The selected fare blends points and cash.
    PointsAndMonetary,
}

impl LoyaltyKind {
    /// Wire code of this kind.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::PointsOnly => "PointsOnly",
            Self::PointsAndMonetary => "PointsAndMonetary",
        }
    }
}

/// Booking data returned by a sell or modify-sell call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingData {
    /// Record locator of the booking.
    pub record_locator: String,

    /// Outstanding balance due.
    pub amount_due: f64,

    /// Loyalty points applied to the booking.
    pub award_point_total: i64,

    /// Modify flows: whether seats must be remapped after the change.
    pub seat_remapping_needed: bool,
}

/// Response payload of a sell call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SellPayload {
    /// The booking created by the sell.
    pub booking: BookingData,
}

/// Response payload of a modify-sell call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifySellPayload {
    /// The re-priced booking.
    pub new_booking: BookingData,

    /// Whether seats must be remapped after the change.
    pub seat_remapping_needed: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// Context models
// ═══════════════════════════════════════════════════════════════════════

/// A seasonal service notice blocking part of the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalNotice {
    /// Origin station code, or `"ANY"`.
    pub from_station: String,

    /// Destination station code, or `"ANY"`.
    pub to_station: String,

    /// First affected date, exclusive.
    pub start_date: NaiveDate,

    /// Last affected date, exclusive.
    pub end_date: NaiveDate,

    /// Message shown to the user.
    pub message: String,
}

impl SeasonalNotice {
    /// Whether this notice applies to the given criterion.
    #[must_use]
    pub fn applies_to(&self, criterion: &SearchCriterion) -> bool {
        let origin_matches =
            self.from_station == criterion.origin || self.from_station == "ANY";
        let destination_matches =
            self.to_station == criterion.destination || self.to_station == "ANY";
        origin_matches
            && destination_matches
            && criterion.date > self.start_date
            && criterion.date < self.end_date
    }
}

/// A loyalty program membership of the active user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoyaltyProgram {
    /// Program code.
    pub code: String,

    /// Current point balance.
    pub balance: i64,
}

/// The active user, as the workflow needs to see them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Loyalty program memberships.
    pub programs: Vec<LoyaltyProgram>,

    /// Club membership flag.
    pub is_club_member: bool,

    /// Co-branded card holder flag.
    pub is_card_holder: bool,

    /// Loyalty tier code, used for redemption fee pricing.
    pub tier_code: String,

    /// Whether the user's tier waives redemption fees.
    pub redemption_fee_waiver: bool,
}

impl UserProfile {
    /// Total point balance across award-funding programs.
    #[must_use]
    pub fn point_balance(&self) -> i64 {
        self.programs
            .iter()
            .filter(|p| p.code == LOYALTY_PROGRAM_CODE)
            .map(|p| p.balance)
            .sum()
    }
}

/// Booking flow the user is currently in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Flow {
    /// New booking flow.
    #[default]
    Book,

    /// Modify flow entered from the trip list.
    MyTrips,

    /// Modify flow entered from check-in.
    CheckIn,
}

/// Sub-flow marker within a flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubFlow {
    /// The modify-flight dialog is driving the flow.
    ModifyFlight,
}

/// Inventory counts of a package search result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageInventory {
    /// Number of hotels offered.
    pub hotels: usize,

    /// Number of rental vehicles offered.
    pub vehicles: usize,
}

/// Routing decision emitted by the navigate step; the shell maps these to
/// actual pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Route {
    /// Flight results inside the book flow.
    BookFlights,

    /// Flight plus car results.
    BookFlightsCars,

    /// Flight plus hotel results.
    BookFlightsHotels,

    /// Flight results inside a modify flow.
    ModifyFlights(Flow),

    /// Multi-product package results.
    Package,

    /// Post-sell bundle offer.
    BundleOffer,

    /// Advance to the next page of the current flow.
    Next,
}
