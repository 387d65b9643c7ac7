//! Mock availability client for testing.

use crate::error::{FlightError, Result};
use crate::models::{
    JourneyKey, LowFarePayload, LowFareSearchRequest, LoyaltyKind, ModifySellPayload,
    PointsCashMode, SearchPayload, SearchRequest, SellPayload,
};
use crate::providers::AvailabilityClient;
use crate::state::FareSelections;
use chrono::NaiveDateTime;
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A call the mock client received, for assertions.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    /// An availability search.
    Search {
        /// The points flag of the call.
        use_points: bool,
    },
    /// A low-fare calendar search.
    LowFare,
    /// A sell.
    Sell {
        /// Seat count sent.
        passengers: u32,
        /// Award flag sent.
        is_award: bool,
        /// Points/cash mode sent.
        mode: PointsCashMode,
        /// Promo code sent.
        promo_code: Option<String>,
        /// Number of legs sold.
        legs: usize,
    },
    /// A modify-sell.
    ModifySell {
        /// Seat count sent.
        passengers: u32,
        /// Award flag sent.
        is_award: bool,
        /// Points/cash mode sent.
        mode: PointsCashMode,
        /// Original journey keys sent.
        original_journey_keys: Vec<JourneyKey>,
        /// Number of legs sold.
        legs: usize,
    },
    /// A redemption fee lookup.
    RedemptionFee {
        /// Fee classification sent.
        loyalty: LoyaltyKind,
        /// Tier code sent.
        tier_code: String,
    },
}

#[derive(Debug, Default)]
struct Inner {
    cash_search: Option<Result<Option<SearchPayload>>>,
    points_search: Option<Result<Option<SearchPayload>>>,
    low_fare: Option<Result<Option<LowFarePayload>>>,
    sell: Option<Result<SellPayload>>,
    modify_sell: Option<Result<ModifySellPayload>>,
    fee: Option<Result<f64>>,
    calls: Vec<RecordedCall>,
}

/// Mock availability client.
///
/// Responses are scripted per endpoint; unscripted searches answer
/// `Ok(None)` and unscripted purchase calls fail.
#[derive(Debug, Clone, Default)]
pub struct MockAvailabilityClient {
    inner: Arc<Mutex<Inner>>,
}

impl MockAvailabilityClient {
    /// Create a mock with no scripted responses.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Script the cash-mode search response.
    #[must_use]
    pub fn with_search_response(self, response: Result<Option<SearchPayload>>) -> Self {
        self.locked().cash_search = Some(response);
        self
    }

    /// Script the points-mode search response.
    #[must_use]
    pub fn with_points_search_response(self, response: Result<Option<SearchPayload>>) -> Self {
        self.locked().points_search = Some(response);
        self
    }

    /// Script the low-fare search response.
    #[must_use]
    pub fn with_low_fare_response(self, response: Result<Option<LowFarePayload>>) -> Self {
        self.locked().low_fare = Some(response);
        self
    }

    /// Script the sell response.
    #[must_use]
    pub fn with_sell_response(self, response: Result<SellPayload>) -> Self {
        self.locked().sell = Some(response);
        self
    }

    /// Script the modify-sell response.
    #[must_use]
    pub fn with_modify_sell_response(self, response: Result<ModifySellPayload>) -> Self {
        self.locked().modify_sell = Some(response);
        self
    }

    /// Script the redemption fee response.
    #[must_use]
    pub fn with_fee_response(self, response: Result<f64>) -> Self {
        self.locked().fee = Some(response);
        self
    }

    /// The calls received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.locked().calls.clone()
    }
}

impl AvailabilityClient for MockAvailabilityClient {
    fn search(
        &self,
        _search: &SearchRequest,
        use_points: bool,
    ) -> impl Future<Output = Result<Option<SearchPayload>>> + Send {
        let response = {
            let mut inner = self.locked();
            inner.calls.push(RecordedCall::Search { use_points });
            if use_points {
                inner.points_search.clone()
            } else {
                inner.cash_search.clone()
            }
        };
        async move { response.unwrap_or(Ok(None)) }
    }

    fn search_low_fare(
        &self,
        _search: &LowFareSearchRequest,
    ) -> impl Future<Output = Result<Option<LowFarePayload>>> + Send {
        let response = {
            let mut inner = self.locked();
            inner.calls.push(RecordedCall::LowFare);
            inner.low_fare.clone()
        };
        async move { response.unwrap_or(Ok(None)) }
    }

    fn sell_trip(
        &self,
        selections: &FareSelections,
        passengers: u32,
        promo_code: Option<&str>,
        is_award: bool,
        mode: PointsCashMode,
    ) -> impl Future<Output = Result<SellPayload>> + Send {
        let response = {
            let mut inner = self.locked();
            inner.calls.push(RecordedCall::Sell {
                passengers,
                is_award,
                mode,
                promo_code: promo_code.map(ToOwned::to_owned),
                legs: selections.len(),
            });
            inner.sell.clone()
        };
        async move {
            response.unwrap_or_else(|| Err(FlightError::Sell("no sell response scripted".into())))
        }
    }

    fn modify_sell_trip(
        &self,
        selections: &FareSelections,
        passengers: u32,
        original_journey_keys: &[JourneyKey],
        is_award: bool,
        mode: PointsCashMode,
    ) -> impl Future<Output = Result<ModifySellPayload>> + Send {
        let response = {
            let mut inner = self.locked();
            inner.calls.push(RecordedCall::ModifySell {
                passengers,
                is_award,
                mode,
                original_journey_keys: original_journey_keys.to_vec(),
                legs: selections.len(),
            });
            inner.modify_sell.clone()
        };
        async move {
            response
                .unwrap_or_else(|| Err(FlightError::Sell("no modify response scripted".into())))
        }
    }

    fn redemption_fee(
        &self,
        _departure: NaiveDateTime,
        loyalty: LoyaltyKind,
        tier_code: &str,
    ) -> impl Future<Output = Result<f64>> + Send {
        let response = {
            let mut inner = self.locked();
            inner.calls.push(RecordedCall::RedemptionFee {
                loyalty,
                tier_code: tier_code.to_owned(),
            });
            inner.fee.clone()
        };
        async move { response.unwrap_or(Ok(0.0)) }
    }
}
