//! Strategies for obtaining the state machine used by one transition.

use crate::core::{Booking, TransitionName, TransitionTable};
use crate::machine::{
    MachineConfig, MachineError, StateMachine, StateMachineFactory, TableMachineFactory,
};
use std::fmt;
use std::sync::{Arc, Mutex};

/// Supplies the state machine for a booking about to be transitioned.
///
/// `Ok(None)` means no machine is available; the engine reports that as an
/// engine error. Errors returned here are classified exactly like errors
/// from the machine's own `transition`.
pub trait MachineResolver<B>: Send + Sync {
    fn resolve(
        &self,
        booking: &B,
        transition: &TransitionName,
    ) -> Result<Option<Arc<dyn StateMachine>>, MachineError>;

    /// Receives the machine produced by a fully successful transition.
    ///
    /// Stateless resolvers ignore it.
    fn advance(&self, _next: Arc<dyn StateMachine>) -> Result<(), MachineError> {
        Ok(())
    }
}

/// Builds a fresh machine per call, seeded with the booking's status and a
/// shared transition table.
///
/// Calls are independent of each other, so an engine using this resolver
/// can be shared freely between threads.
#[derive(Clone)]
pub struct TableResolver {
    table: Arc<TransitionTable>,
    factory: Arc<dyn StateMachineFactory>,
}

impl TableResolver {
    /// Resolver producing [`TableMachine`](crate::machine::TableMachine)s.
    pub fn new(table: Arc<TransitionTable>) -> Self {
        Self::with_factory(table, TableMachineFactory)
    }

    /// Resolver delegating machine construction to `factory`.
    pub fn with_factory(
        table: Arc<TransitionTable>,
        factory: impl StateMachineFactory + 'static,
    ) -> Self {
        Self {
            table,
            factory: Arc::new(factory),
        }
    }

    pub fn table(&self) -> &Arc<TransitionTable> {
        &self.table
    }
}

impl fmt::Debug for TableResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableResolver")
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}

impl<B: Booking> MachineResolver<B> for TableResolver {
    fn resolve(
        &self,
        booking: &B,
        _transition: &TransitionName,
    ) -> Result<Option<Arc<dyn StateMachine>>, MachineError> {
        let machine = self.factory.make(MachineConfig {
            initial_state: booking.status(),
            transitions: &self.table,
            subject: booking,
        })?;
        Ok(Some(machine))
    }
}

/// Reuses one externally supplied machine for every call.
///
/// After each successful transition the shared machine is replaced by the
/// resulting one, so the resolver's state advances across calls. The lock
/// only guards the handover: callers must still serialize `apply` calls on
/// an engine using this resolver.
#[derive(Debug, Default)]
pub struct FixedMachineResolver {
    machine: Mutex<Option<Arc<dyn StateMachine>>>,
}

impl FixedMachineResolver {
    pub fn new(machine: Arc<dyn StateMachine>) -> Self {
        Self {
            machine: Mutex::new(Some(machine)),
        }
    }

    /// Resolver without a machine; every transition fails until one is set.
    pub fn empty() -> Self {
        Self {
            machine: Mutex::new(None),
        }
    }

    /// The machine the next transition will use.
    pub fn current(&self) -> Result<Option<Arc<dyn StateMachine>>, MachineError> {
        let guard = self.machine.lock().map_err(|_| poisoned())?;
        Ok(guard.clone())
    }

    /// Replace the shared machine.
    pub fn replace(&self, machine: Arc<dyn StateMachine>) -> Result<(), MachineError> {
        let mut guard = self.machine.lock().map_err(|_| poisoned())?;
        *guard = Some(machine);
        Ok(())
    }
}

fn poisoned() -> MachineError {
    MachineError::Internal("shared state machine lock poisoned".to_string())
}

impl<B> MachineResolver<B> for FixedMachineResolver {
    fn resolve(
        &self,
        _booking: &B,
        _transition: &TransitionName,
    ) -> Result<Option<Arc<dyn StateMachine>>, MachineError> {
        self.current()
    }

    fn advance(&self, next: Arc<dyn StateMachine>) -> Result<(), MachineError> {
        self.replace(next)
    }
}

/// Asks a caller-supplied callback for the machine.
pub struct ProviderResolver<F> {
    provider: F,
}

impl<F> ProviderResolver<F> {
    pub fn new(provider: F) -> Self {
        Self { provider }
    }
}

impl<F> fmt::Debug for ProviderResolver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderResolver").finish_non_exhaustive()
    }
}

impl<B, F> MachineResolver<B> for ProviderResolver<F>
where
    F: Fn(&B, &TransitionName) -> Option<Arc<dyn StateMachine>> + Send + Sync,
{
    fn resolve(
        &self,
        booking: &B,
        transition: &TransitionName,
    ) -> Result<Option<Arc<dyn StateMachine>>, MachineError> {
        Ok((self.provider)(booking, transition))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BookingRecord;
    use crate::machine::{ReadableStateMachine, TableMachine};
    use chrono::{TimeZone, Utc};

    fn table() -> Arc<TransitionTable> {
        Arc::new(
            TransitionTable::new()
                .with_transition("pending", "confirm", "confirmed")
                .with_state("confirmed"),
        )
    }

    fn booking(status: &str) -> BookingRecord {
        BookingRecord::new(
            Utc.timestamp_opt(100, 0).unwrap(),
            Utc.timestamp_opt(200, 0).unwrap(),
            status,
        )
    }

    fn state_of(machine: &Arc<dyn StateMachine>) -> String {
        machine
            .as_readable()
            .map(|m| m.current_state().to_string())
            .unwrap_or_default()
    }

    #[test]
    fn table_resolver_seeds_with_booking_status() {
        let resolver = TableResolver::new(table());

        let machine = resolver
            .resolve(&booking("confirmed"), &"confirm".into())
            .unwrap()
            .unwrap();

        assert_eq!(state_of(&machine), "confirmed");
    }

    #[test]
    fn table_resolver_builds_fresh_machines() {
        let resolver = TableResolver::new(table());
        let pending = booking("pending");

        let first = resolver.resolve(&pending, &"confirm".into()).unwrap().unwrap();
        let second = resolver.resolve(&pending, &"confirm".into()).unwrap().unwrap();

        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn table_resolver_propagates_factory_errors() {
        let resolver = TableResolver::with_factory(
            table(),
            |_config: MachineConfig<'_>| -> Result<Arc<dyn StateMachine>, MachineError> {
                Err(MachineError::Internal("no machines today".to_string()))
            },
        );

        let result = resolver.resolve(&booking("pending"), &"confirm".into());
        assert!(matches!(result, Err(MachineError::Internal(_))));
    }

    #[test]
    fn fixed_resolver_advances_shared_machine() {
        let resolver = FixedMachineResolver::new(Arc::new(TableMachine::new(table(), "pending")));
        let pending = booking("pending");

        let machine =
            MachineResolver::<BookingRecord>::resolve(&resolver, &pending, &"confirm".into())
                .unwrap()
                .unwrap();
        let next = machine.transition(&"confirm".into()).unwrap();
        MachineResolver::<BookingRecord>::advance(&resolver, next).unwrap();

        let current = resolver.current().unwrap().unwrap();
        assert_eq!(state_of(&current), "confirmed");
    }

    #[test]
    fn empty_fixed_resolver_has_no_machine() {
        let resolver = FixedMachineResolver::empty();
        let resolved =
            MachineResolver::<BookingRecord>::resolve(&resolver, &booking("pending"), &"x".into());
        assert!(resolved.unwrap().is_none());
    }

    #[test]
    fn provider_resolver_calls_back() {
        let shared = table();
        let resolver = ProviderResolver::new(move |b: &BookingRecord, _t: &TransitionName| {
            let machine: Arc<dyn StateMachine> =
                Arc::new(TableMachine::new(Arc::clone(&shared), b.status().clone()));
            Some(machine)
        });

        let machine = resolver
            .resolve(&booking("pending"), &"confirm".into())
            .unwrap()
            .unwrap();
        assert_eq!(state_of(&machine), "pending");
    }
}
