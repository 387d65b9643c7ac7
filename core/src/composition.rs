//! Reducer composition utilities.
//!
//! Large features are built from several focused reducers that all observe
//! the same action stream, exactly one of which owns any given state
//! transition. [`combine_reducers`] assembles them into a single reducer
//! whose effects are the concatenation of the parts' effects, in order.

use crate::effect::Effect;
use crate::reducer::{INLINE_EFFECTS, Reducer};
use smallvec::SmallVec;

/// Combines multiple reducers into one.
///
/// Every reducer sees every action, in registration order. State
/// transitions should be owned by exactly one of the combined reducers;
/// the others treat the action as a read-only trigger for effects.
///
/// # Example
///
/// ```ignore
/// let combined = combine_reducers(vec![
///     Box::new(StoreReducer::new()),
///     Box::new(SearchReducer::new()),
/// ]);
/// ```
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; INLINE_EFFECTS]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;

    #[derive(Clone, Debug, Default)]
    struct AppState {
        counter: i64,
        logged: usize,
    }

    #[derive(Clone, Debug)]
    enum AppAction {
        Increment,
    }

    struct CounterReducer;

    impl Reducer for CounterReducer {
        type State = AppState;
        type Action = AppAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut AppState,
            action: AppAction,
            _env: &(),
        ) -> SmallVec<[Effect<AppAction>; INLINE_EFFECTS]> {
            match action {
                AppAction::Increment => state.counter += 1,
            }
            smallvec![Effect::None]
        }
    }

    struct LoggingReducer;

    impl Reducer for LoggingReducer {
        type State = AppState;
        type Action = AppAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut AppState,
            _action: AppAction,
            _env: &(),
        ) -> SmallVec<[Effect<AppAction>; INLINE_EFFECTS]> {
            state.logged += 1;
            smallvec![]
        }
    }

    #[test]
    fn every_reducer_sees_every_action() {
        let combined = combine_reducers::<AppState, AppAction, ()>(vec![
            Box::new(CounterReducer),
            Box::new(LoggingReducer),
        ]);

        let mut state = AppState::default();
        let effects = combined.reduce(&mut state, AppAction::Increment, &());

        assert_eq!(state.counter, 1);
        assert_eq!(state.logged, 1);
        assert_eq!(effects.len(), 1);
    }
}
