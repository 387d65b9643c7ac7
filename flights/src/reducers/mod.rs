//! Flight workflow reducers.
//!
//! Four focused reducers observe the same action stream: the store owns
//! every state transition, and the search, selection, and purchase
//! reducers interpret the workflow intents, emitting continuations and
//! error intents. [`flight_reducer`] combines them, store first, so the
//! workflow reducers always read post-transition state for the intent
//! being processed.

pub mod purchase;
pub mod search;
pub mod selection;
pub mod store;

// Re-export
pub use purchase::PurchaseReducer;
pub use search::SearchReducer;
pub use selection::SelectionReducer;
pub use store::StoreReducer;

use crate::actions::FlightAction;
use crate::environment::FlightEnvironment;
use crate::providers::{AvailabilityClient, BookingGateway, ConfirmationHost, SessionStorage};
use crate::state::FlightState;
use fareflow_core::composition::{CombinedReducer, combine_reducers};
use fareflow_core::environment::Clock;

/// The combined flight reducer type.
pub type FlightReducer<A, C, B, G, K> =
    CombinedReducer<FlightState, FlightAction, FlightEnvironment<A, C, B, G, K>>;

/// Assemble the full flight workflow reducer.
///
/// Every action is seen by every part, in order: store transitions
/// first, then the search, selection, and purchase handlers.
#[must_use]
pub fn flight_reducer<A, C, B, G, K>() -> FlightReducer<A, C, B, G, K>
where
    A: AvailabilityClient + Clone + Send + Sync + 'static,
    C: ConfirmationHost + Clone + Send + Sync + 'static,
    B: BookingGateway + Clone + Send + Sync + 'static,
    G: SessionStorage + Clone + Send + Sync + 'static,
    K: Clock + Clone + Send + Sync + 'static,
{
    combine_reducers(vec![
        Box::new(StoreReducer::new()),
        Box::new(SearchReducer::new()),
        Box::new(SelectionReducer::new()),
        Box::new(PurchaseReducer::new()),
    ])
}
