//! # Fareflow Flights
//!
//! Fare search and purchase workflow engine: availability search, fare
//! selection, and the sell transaction, with branch paths for club
//! upsell, insufficient-points recovery, seasonal-service notices, and
//! early-flight confirmation.
//!
//! ## Architecture
//!
//! The engine is built from three layers over a single state snapshot:
//!
//! - **Fare selection store** ([`reducers::StoreReducer`]): pure state
//!   transitions, one per intent, the only writer of [`FlightState`].
//! - **Continuation scheduler** ([`reducers::SearchReducer`],
//!   [`reducers::SelectionReducer`], [`reducers::PurchaseReducer`]):
//!   workflow handlers that consume one intent, read the current
//!   snapshot, perform validation or call a collaborator, and emit the
//!   follow-up intents — the caller's continuation on success, a single
//!   error intent on failure.
//! - **Derivation layer** ([`selectors`]): pure functions recomputing
//!   trip/fare/points totals from the snapshot on every read.
//!
//! Every intent is seen by every reducer; exactly one of them owns any
//! given state transition. Use [`reducers::flight_reducer`] to assemble
//! the combined reducer for a store runtime.
//!
//! ## Example
//!
//! ```rust,ignore
//! use fareflow_flights::{FlightAction, FlightState, reducers::flight_reducer};
//! use fareflow_runtime::Store;
//!
//! let store = Store::new(FlightState::default(), flight_reducer(), env);
//!
//! store.send(FlightAction::CombinationSearch { next: vec![] }).await?;
//! let result = store.state(|s| s.search_result.clone()).await;
//! ```

// Public modules
pub mod actions;
pub mod environment;
pub mod error;
pub mod models;
pub mod providers;
pub mod reducers;
pub mod selectors;
pub mod state;

#[cfg(feature = "test-utils")]
pub mod mocks;

// Re-export main types for convenience
pub use actions::{FlightAction, NavigateTrigger};
pub use environment::FlightEnvironment;
pub use error::{FlightError, Result};
pub use state::{FareSelections, FlightState};
