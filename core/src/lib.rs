//! # Fareflow Core
//!
//! Core traits and types for the fareflow intent/effect architecture.
//!
//! This crate provides the fundamental abstractions for building workflow
//! engines in which every input is an explicit intent (an action), every
//! state change flows through a pure reducer, and every side effect is a
//! value interpreted by a runtime rather than executed in place.
//!
//! ## Core Concepts
//!
//! - **State**: a single owned snapshot of a feature's data
//! - **Action**: all possible inputs to a reducer, including the follow-up
//!   intents ("continuations") a workflow step schedules for later
//! - **Reducer**: pure function `(State, Action, Environment) → Effects`
//! - **Effect**: a description of follow-up work — more actions to
//!   dispatch, or an async computation that resolves to more actions
//! - **Environment**: injected dependencies via traits
//!
//! ## Architecture Principles
//!
//! - Functional Core, Imperative Shell
//! - Unidirectional Data Flow
//! - Explicit Effects (no hidden I/O)
//! - Dependency Injection via Environment
//!
//! ## Example
//!
//! ```ignore
//! use fareflow_core::{effect::Effect, reducer::Reducer, smallvec, SmallVec};
//!
//! struct CounterReducer;
//!
//! impl Reducer for CounterReducer {
//!     type State = i64;
//!     type Action = CounterAction;
//!     type Environment = ();
//!
//!     fn reduce(
//!         &self,
//!         state: &mut i64,
//!         action: CounterAction,
//!         _env: &(),
//!     ) -> SmallVec<[Effect<CounterAction>; 4]> {
//!         match action {
//!             CounterAction::Increment => *state += 1,
//!         }
//!         smallvec![Effect::None]
//!     }
//! }
//! ```

// Re-export commonly used types
pub use chrono::{DateTime, Utc};
pub use serde::{Deserialize, Serialize};
pub use smallvec::{SmallVec, smallvec};

/// Reducer composition utilities
pub mod composition;

/// Reducer module - The core trait for business logic
///
/// Reducers are pure functions: `(State, Action, Environment) → Effects`.
///
/// They contain all business logic and are deterministic and testable.
/// A reducer may read any part of the state snapshot it is given, but the
/// only way it communicates with the outside world is through the effects
/// it returns.
pub mod reducer {
    use super::effect::Effect;
    use smallvec::SmallVec;

    /// The number of effects a reducer can return without allocating.
    pub const INLINE_EFFECTS: usize = 4;

    /// The Reducer trait - core abstraction for business logic
    ///
    /// # Type Parameters
    ///
    /// - `State`: The domain state this reducer operates on
    /// - `Action`: The action type this reducer processes
    /// - `Environment`: The injected dependencies this reducer needs
    pub trait Reducer {
        /// The state type this reducer operates on
        type State;

        /// The action type this reducer processes
        type Action;

        /// The environment type with injected dependencies
        type Environment;

        /// Reduce an action into state changes and effects
        ///
        /// This function:
        /// 1. Validates the action against the current state snapshot
        /// 2. Updates state in place (pure transitions only)
        /// 3. Returns effect descriptions to be interpreted by the runtime
        ///
        /// # Arguments
        ///
        /// - `state`: Mutable reference to current state
        /// - `action`: The action to process
        /// - `env`: Reference to injected dependencies
        ///
        /// # Returns
        ///
        /// An ordered list of effects; the runtime executes them strictly
        /// in the order given.
        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; INLINE_EFFECTS]>;
    }
}

/// Effect module - Side effect descriptions
///
/// Effects describe follow-up work to be performed by the runtime. They
/// are values (not execution), returned from reducers and interpreted by
/// the Store in strict order.
pub mod effect {
    use std::future::Future;
    use std::pin::Pin;

    /// Effect type - describes follow-up work for the runtime
    ///
    /// Effects are NOT executed immediately. They are descriptions of what
    /// should happen next, returned from reducers and interpreted by the
    /// Store runtime.
    ///
    /// # Type Parameters
    ///
    /// - `Action`: The action type that effects can produce (feedback loop)
    pub enum Effect<Action> {
        /// No-op effect
        None,

        /// Dispatch follow-up actions synchronously, in order
        ///
        /// This is how a workflow step forwards its continuation: the
        /// runtime processes each action (and everything it produces)
        /// before moving on to the next one.
        Dispatch(Vec<Action>),

        /// Arbitrary async computation
        ///
        /// Resolves to the ordered list of actions to dispatch next. An
        /// empty list means the workflow branch is abandoned.
        Future(Pin<Box<dyn Future<Output = Vec<Action>> + Send>>),
    }

    // Manual Debug implementation since Future doesn't implement Debug
    impl<Action> std::fmt::Debug for Effect<Action>
    where
        Action: std::fmt::Debug,
    {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            match self {
                Effect::None => write!(f, "Effect::None"),
                Effect::Dispatch(actions) => {
                    f.debug_tuple("Effect::Dispatch").field(actions).finish()
                },
                Effect::Future(_) => write!(f, "Effect::Future(<future>)"),
            }
        }
    }

    impl<Action> Effect<Action> {
        /// Dispatch a single follow-up action
        #[must_use]
        pub fn one(action: Action) -> Effect<Action> {
            Effect::Dispatch(vec![action])
        }

        /// Wrap an async computation that resolves to follow-up actions
        #[must_use]
        pub fn future<F>(fut: F) -> Effect<Action>
        where
            F: Future<Output = Vec<Action>> + Send + 'static,
        {
            Effect::Future(Box::pin(fut))
        }
    }
}

/// Environment module - Dependency injection traits
///
/// All external dependencies are abstracted behind traits and injected
/// via the Environment parameter of a reducer.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }

    /// Test clock that always returns a fixed instant.
    #[derive(Debug, Clone, Copy)]
    pub struct FixedClock {
        /// The instant reported by every call to [`Clock::now`].
        pub time: DateTime<Utc>,
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::effect::Effect;

    #[test]
    fn effect_one_wraps_a_single_action() {
        let effect: Effect<u32> = Effect::one(7);
        match effect {
            Effect::Dispatch(actions) => assert_eq!(actions, vec![7]),
            _ => panic!("expected Dispatch"),
        }
    }

    #[test]
    fn effect_future_resolves_to_actions() {
        let effect: Effect<u32> = Effect::future(async { vec![1, 2, 3] });
        match effect {
            Effect::Future(fut) => {
                let actions = tokio_test::block_on(fut);
                assert_eq!(actions, vec![1, 2, 3]);
            },
            _ => panic!("expected Future"),
        }
    }

    #[test]
    fn debug_formats_without_executing_futures() {
        let effect: Effect<u32> = Effect::future(async { vec![] });
        assert_eq!(format!("{effect:?}"), "Effect::Future(<future>)");
    }
}
