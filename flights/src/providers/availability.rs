//! Availability client trait.

use crate::error::Result;
use crate::models::{
    JourneyKey, LowFarePayload, LowFareSearchRequest, LoyaltyKind, ModifySellPayload,
    PointsCashMode, SearchPayload, SearchRequest, SellPayload,
};
use crate::state::FareSelections;
use chrono::NaiveDateTime;

/// Availability client.
///
/// This trait abstracts over the reservation system's availability and
/// purchase endpoints. Transport concerns (authentication, retries) live
/// behind the implementation.
pub trait AvailabilityClient: Send + Sync {
    /// Run an availability search.
    ///
    /// `Ok(None)` means the system answered with an empty body; the
    /// workflow stores an empty result and skips analytics.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level or is
    /// rejected by the system.
    fn search(
        &self,
        search: &SearchRequest,
        use_points: bool,
    ) -> impl std::future::Future<Output = Result<Option<SearchPayload>>> + Send;

    /// Run a low-fare calendar search.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails at the transport level or is
    /// rejected by the system.
    fn search_low_fare(
        &self,
        search: &LowFareSearchRequest,
    ) -> impl std::future::Future<Output = Result<Option<LowFarePayload>>> + Send;

    /// Execute the purchase transaction for the given selections.
    ///
    /// # Errors
    ///
    /// Returns an error if the sell fails; no partial state is committed.
    fn sell_trip(
        &self,
        selections: &FareSelections,
        passengers: u32,
        promo_code: Option<&str>,
        is_award: bool,
        mode: PointsCashMode,
    ) -> impl std::future::Future<Output = Result<SellPayload>> + Send;

    /// Execute the modify purchase transaction for the given selections.
    ///
    /// # Errors
    ///
    /// Returns an error if the modify-sell fails; no partial state is
    /// committed.
    fn modify_sell_trip(
        &self,
        selections: &FareSelections,
        passengers: u32,
        original_journey_keys: &[JourneyKey],
        is_award: bool,
        mode: PointsCashMode,
    ) -> impl std::future::Future<Output = Result<ModifySellPayload>> + Send;

    /// Price the redemption fee for an award booking's first leg.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; callers degrade to a zero
    /// fee.
    fn redemption_fee(
        &self,
        departure: NaiveDateTime,
        loyalty: LoyaltyKind,
        tier_code: &str,
    ) -> impl std::future::Future<Output = Result<f64>> + Send;
}
