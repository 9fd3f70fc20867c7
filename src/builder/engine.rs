//! Builder for constructing transition engines.

use crate::builder::error::BuildError;
use crate::builder::settings::EngineSettings;
use crate::core::{Booking, TransitionName, TransitionTable};
use crate::engine::{
    AliasNormalizer, BookingFactory, ExtraFields, FactoryResolver, FixedMachineResolver,
    IdentityNormalizer, MachineResolver, ProviderResolver, TableResolver, TransitionEngine,
    TransitionNormalizer,
};
use crate::error::{DefaultErrorFactory, EngineId, ErrorFactory};
use crate::machine::{StateMachine, StateMachineFactory};
use std::sync::Arc;

const DEFAULT_NAME: &str = "booking-transitioner";

/// Builder for constructing transition engines with a fluent API.
///
/// A machine source and a booking factory are required; everything else
/// has a default (identity normalization, best-effort extra fields, the
/// default error factory).
pub struct EngineBuilder<B: Booking + Clone + 'static> {
    name: Option<String>,
    resolver: Option<Arc<dyn MachineResolver<B>>>,
    factories: Option<Arc<dyn FactoryResolver<B>>>,
    normalizer: Option<Arc<dyn TransitionNormalizer<B>>>,
    extra_fields: ExtraFields,
    errors: Option<Arc<dyn ErrorFactory<B>>>,
}

impl<B: Booking + Clone + 'static> EngineBuilder<B> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: None,
            resolver: None,
            factories: None,
            normalizer: None,
            extra_fields: ExtraFields::default(),
            errors: None,
        }
    }

    /// Name reported in the engine's [`EngineId`].
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build a fresh [`TableMachine`](crate::machine::TableMachine) from
    /// `table` for every call.
    pub fn table(self, table: impl Into<Arc<TransitionTable>>) -> Self {
        self.machine_resolver(TableResolver::new(table.into()))
    }

    /// Build a fresh machine from `table` with `factory` for every call.
    pub fn table_with_factory(
        self,
        table: impl Into<Arc<TransitionTable>>,
        factory: impl StateMachineFactory + 'static,
    ) -> Self {
        self.machine_resolver(TableResolver::with_factory(table.into(), factory))
    }

    /// Reuse `machine` for every call, advancing it after each success.
    pub fn fixed_machine(self, machine: Arc<dyn StateMachine>) -> Self {
        self.machine_resolver(FixedMachineResolver::new(machine))
    }

    /// Ask `provider` for the machine on every call.
    pub fn machine_provider<F>(self, provider: F) -> Self
    where
        F: Fn(&B, &TransitionName) -> Option<Arc<dyn StateMachine>> + Send + Sync + 'static,
    {
        self.machine_resolver(ProviderResolver::new(provider))
    }

    /// Use a custom machine resolution strategy.
    pub fn machine_resolver(mut self, resolver: impl MachineResolver<B> + 'static) -> Self {
        self.resolver = Some(Arc::new(resolver));
        self
    }

    /// Use the same booking factory for every transition.
    pub fn booking_factory(self, factory: impl BookingFactory<B> + 'static) -> Self {
        let factory: Arc<dyn BookingFactory<B>> = Arc::new(factory);
        self.factory_resolver(factory)
    }

    /// Choose the booking factory per transition.
    pub fn factory_resolver(mut self, factories: impl FactoryResolver<B> + 'static) -> Self {
        self.factories = Some(Arc::new(factories));
        self
    }

    pub fn normalizer(mut self, normalizer: impl TransitionNormalizer<B> + 'static) -> Self {
        self.normalizer = Some(Arc::new(normalizer));
        self
    }

    pub fn extra_fields(mut self, policy: ExtraFields) -> Self {
        self.extra_fields = policy;
        self
    }

    pub fn error_factory(mut self, errors: impl ErrorFactory<B> + 'static) -> Self {
        self.errors = Some(Arc::new(errors));
        self
    }

    /// Apply settings: validated table, aliases, field policy and name.
    ///
    /// Returns an error if the table has violations.
    pub fn settings(mut self, settings: EngineSettings) -> Result<Self, BuildError> {
        let table = settings.transitions.validated()?;
        self = self.table(table).extra_fields(settings.extra_fields);

        if !settings.aliases.is_empty() {
            self = self.normalizer(AliasNormalizer::from(settings.aliases));
        }
        if let Some(name) = settings.name {
            self = self.name(name);
        }

        Ok(self)
    }

    /// Build the engine.
    /// Returns an error if required parts are missing.
    pub fn build(self) -> Result<TransitionEngine<B>, BuildError> {
        let resolver = self.resolver.ok_or(BuildError::MissingMachineResolver)?;
        let factories = self.factories.ok_or(BuildError::MissingBookingFactory)?;
        let name = self.name.unwrap_or_else(|| DEFAULT_NAME.to_string());

        Ok(TransitionEngine {
            id: EngineId::new(name),
            normalizer: self
                .normalizer
                .unwrap_or_else(|| Arc::new(IdentityNormalizer)),
            resolver,
            factories,
            extra_fields: self.extra_fields,
            errors: self.errors.unwrap_or_else(|| Arc::new(DefaultErrorFactory)),
        })
    }
}

impl<B: Booking + Clone + 'static> Default for EngineBuilder<B> {
    fn default() -> Self {
        Self::new()
    }
}
