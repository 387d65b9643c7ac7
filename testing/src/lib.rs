//! # Fareflow Testing
//!
//! Testing utilities for the fareflow architecture.
//!
//! Provides a fluent Given-When-Then harness for reducers plus helpers
//! for asserting on and draining the effects a reducer returns.


pub use reducer_test::{ReducerTest, assertions, drain_effects};
