//! # Fareflow Runtime
//!
//! Runtime implementation for the fareflow architecture.
//!
//! This crate provides the Store runtime that coordinates reducer
//! execution and effect interpretation.
//!
//! ## Core Components
//!
//! - **Store**: owns the state and runs the interpreter loop
//! - **Interpreter loop**: pops the next action, runs the reducer, and
//!   pushes the produced actions ahead of previously queued work so every
//!   workflow branch runs to completion in strict FIFO order
//!
//! Intent processing is a single logical thread: `Future` effects are
//! awaited inline, so at most one action is being reduced per `send` call
//! at any time. Concurrency exists only inside individual effects (for
//! example, two availability calls joined inside one future) and across
//! independent `send` calls, which serialize at the state lock.
//!
//! ## Example
//!
//! ```ignore
//! use fareflow_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action; returns once the action and everything it
//! // produced have been processed.
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field.clone()).await;
//! ```

use fareflow_core::{effect::Effect, reducer::Reducer};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug)]
    pub enum StoreError {
        /// A single `send` produced more actions than the configured limit.
        ///
        /// This guards against a continuation cycle dispatching forever;
        /// the offending queue is dropped and state is left as of the last
        /// completed reduction.
        #[error("Dispatch limit exceeded after {0} actions")]
        DispatchLimitExceeded(usize),
    }
}

pub use error::StoreError;

/// Upper bound on the number of actions one `send` call may process.
const DISPATCH_LIMIT: usize = 10_000;

/// Work items for the interpreter loop.
enum Item<A> {
    Action(A),
    Effect(Effect<A>),
}

/// The Store - runtime for reducer-based features
///
/// The Store manages:
/// 1. State (behind `RwLock` for concurrent access)
/// 2. Reducer (business logic)
/// 3. Environment (injected dependencies)
/// 4. Effect interpretation (with feedback loop)
///
/// # Type Parameters
///
/// - `S`: State type
/// - `A`: Action type
/// - `E`: Environment type
/// - `R`: Reducer implementation
pub struct Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    state: Arc<RwLock<S>>,
    reducer: Arc<R>,
    environment: Arc<E>,
    /// Action broadcast channel for observing processed actions.
    ///
    /// Every action that reaches the reducer is broadcast to observers,
    /// in processing order. This enables request-response patterns and
    /// assertions on workflow traces in tests.
    action_broadcast: broadcast::Sender<A>,
}

impl<S, A, E, R> Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
    A: Send + Clone + 'static,
    S: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// Create a new store with initial state, reducer, and environment
    ///
    /// The action broadcast capacity defaults to 64; increase it with
    /// [`Store::with_broadcast_capacity`] if observers frequently lag.
    #[must_use]
    pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
        Self::with_broadcast_capacity(initial_state, reducer, environment, 64)
    }

    /// Create a new Store with custom action broadcast capacity
    #[must_use]
    pub fn with_broadcast_capacity(
        initial_state: S,
        reducer: R,
        environment: E,
        capacity: usize,
    ) -> Self {
        let (action_broadcast, _) = broadcast::channel(capacity);

        Self {
            state: Arc::new(RwLock::new(initial_state)),
            reducer: Arc::new(reducer),
            environment: Arc::new(environment),
            action_broadcast,
        }
    }

    /// Send an action to the store and process it to completion
    ///
    /// This is the primary way to interact with the store. The call
    /// returns once the action and every follow-up action it produced
    /// (transitively, through `Dispatch` and `Future` effects) have been
    /// reduced.
    ///
    /// # Ordering
    ///
    /// Effects returned by the reducer are interpreted strictly in order,
    /// and the actions an effect produces are processed before the next
    /// effect of the same reducer run. This preserves per-branch FIFO
    /// semantics for workflow continuations.
    ///
    /// # Concurrency
    ///
    /// Multiple concurrent `send` calls are allowed; they serialize at the
    /// state lock per reduction, and their effect futures may overlap.
    /// State observed by a reducer is coherent as of its dispatch time.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::DispatchLimitExceeded`] if a continuation
    /// cycle produces an unreasonable number of actions.
    pub async fn send(&self, action: A) -> Result<(), StoreError> {
        let mut queue: VecDeque<Item<A>> = VecDeque::new();
        queue.push_back(Item::Action(action));

        let mut processed = 0_usize;

        while let Some(item) = queue.pop_front() {
            match item {
                Item::Action(action) => {
                    processed += 1;
                    if processed > DISPATCH_LIMIT {
                        tracing::error!(processed, "dispatch limit exceeded, dropping queue");
                        return Err(StoreError::DispatchLimitExceeded(processed));
                    }

                    // Observers see the action before its effects run.
                    let _ = self.action_broadcast.send(action.clone());

                    let effects = {
                        let mut state = self.state.write().await;
                        self.reducer.reduce(&mut state, action, &self.environment)
                    };

                    // Front-insert in order: this run's effects execute
                    // before previously queued sibling work.
                    for (i, effect) in effects.into_iter().enumerate() {
                        queue.insert(i, Item::Effect(effect));
                    }
                },
                Item::Effect(Effect::None) => {},
                Item::Effect(Effect::Dispatch(actions)) => {
                    for (i, action) in actions.into_iter().enumerate() {
                        queue.insert(i, Item::Action(action));
                    }
                },
                Item::Effect(Effect::Future(fut)) => {
                    let actions = fut.await;
                    for (i, action) in actions.into_iter().enumerate() {
                        queue.insert(i, Item::Action(action));
                    }
                },
            }
        }

        tracing::trace!(processed, "send complete");
        Ok(())
    }

    /// Read a projection of the current state
    ///
    /// The closure runs under a read lock; keep it cheap and return owned
    /// data.
    pub async fn state<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&S) -> T,
    {
        let state = self.state.read().await;
        f(&state)
    }

    /// Subscribe to the stream of processed actions
    ///
    /// Subscribe before `send`ing to observe a complete trace.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<A> {
        self.action_broadcast.subscribe()
    }
}

impl<S, A, E, R> Clone for Store<S, A, E, R>
where
    R: Reducer<State = S, Action = A, Environment = E>,
{
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            reducer: Arc::clone(&self.reducer),
            environment: Arc::clone(&self.environment),
            action_broadcast: self.action_broadcast.clone(),
        }
    }
}
