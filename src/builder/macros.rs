//! Macros for ergonomic transition table construction.

/// Build a [`TransitionTable`](crate::core::TransitionTable) from literals.
///
/// Each entry maps a state to its outgoing transitions; the state
/// expression is evaluated once per entry. Every state listed
/// on the left is registered, including those with no transitions, so a
/// table written this way validates as long as every destination appears
/// as a state.
///
/// # Example
///
/// ```
/// use transitioner::transition_table;
///
/// let table = transition_table! {
///     "pending" => { "confirm" => "confirmed", "cancel" => "cancelled" },
///     "confirmed" => { "cancel" => "cancelled" },
///     "cancelled" => {},
/// };
///
/// assert_eq!(table.len(), 3);
/// assert!(table.validate().is_success());
/// ```
#[macro_export]
macro_rules! transition_table {
    () => {
        $crate::core::TransitionTable::new()
    };
    (
        $(
            $from:expr => { $($transition:expr => $to:expr),* $(,)? }
        ),+ $(,)?
    ) => {{
        let table = $crate::core::TransitionTable::new();
        $(
            let from: $crate::core::StateKey = ::std::convert::Into::into($from);
            $(
                let table = table.with_transition(from.clone(), $transition, $to);
            )*
            let table = table.with_state(from);
        )+
        table
    }};
}
