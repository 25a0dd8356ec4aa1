use super::{State, Transition};

/// Stable state reached after `via` is applied in `start`.
///
/// Total by construction: the host may repeat an activation or deactivate a
/// component that was never activated, and both are absorbed rather than
/// rejected.
pub const fn goal_state(start: State, via: Transition) -> State {
    match (start, via) {
        (_, Transition::Activate) => State::Active,
        (_, Transition::Deactivate) => State::Inactive,
    }
}

/// True when applying `via` in `start` changes nothing observable.
///
/// Only a deactivation of an inactive component qualifies. A repeated
/// activation still re-runs the dependency snapshot and handshake.
pub const fn is_noop(start: State, via: Transition) -> bool {
    matches!((start, via), (State::Inactive, Transition::Deactivate))
}
