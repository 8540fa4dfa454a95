use crate::domain::capability::Capability;
use crate::domain::ports::{ProcessorAdapter, ProcessorAdapterRef};
use crate::error::{BillingError, ConfigurationError, Result};
use std::collections::HashMap;

/// Maps processor identifiers to the adapters implementing them.
///
/// Resolution happens per call, so an owner's current `processor` value is
/// always what decides which adapter runs.
#[derive(Default, Clone)]
pub struct ProcessorRegistry {
    adapters: HashMap<String, ProcessorAdapterRef>,
}

impl ProcessorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an adapter under its processor identifier.
    ///
    /// Fails on a blank or whitespace-containing identifier, on a duplicate
    /// registration, and on adapters that support no capability at all.
    pub fn register(&mut self, adapter: ProcessorAdapterRef) -> Result<()> {
        let processor = adapter.processor().to_string();

        if processor.is_empty() || processor.chars().any(char::is_whitespace) {
            return Err(BillingError::Registration(format!(
                "invalid processor identifier `{processor}`"
            )));
        }
        if self.adapters.contains_key(&processor) {
            return Err(BillingError::Registration(format!(
                "processor `{processor}` is already registered"
            )));
        }
        if !Capability::ALL.iter().any(|c| adapter.supports(*c)) {
            return Err(BillingError::Registration(format!(
                "processor `{processor}` supports no operations"
            )));
        }

        tracing::debug!(processor = %processor, "registered processor adapter");
        self.adapters.insert(processor, adapter);
        Ok(())
    }

    pub fn with(mut self, adapter: ProcessorAdapterRef) -> Result<Self> {
        self.register(adapter)?;
        Ok(self)
    }

    /// Registered processor identifiers, sorted.
    pub fn processors(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.adapters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Finds the adapter that handles `capability` for `processor`.
    ///
    /// An unset processor is a configuration problem; a processor that is set
    /// but has no `<processor>_<capability>` operation is an unknown operation.
    pub fn resolve(
        &self,
        processor: Option<&str>,
        capability: Capability,
    ) -> Result<&dyn ProcessorAdapter> {
        let processor = processor
            .filter(|p| !p.is_empty())
            .ok_or(ConfigurationError::ProcessorNotSet)?;

        match self.adapters.get(processor) {
            Some(adapter) if adapter.supports(capability) => {
                tracing::debug!(
                    processor = %processor,
                    operation = %capability.operation_name(processor),
                    "dispatching processor operation"
                );
                Ok(adapter.as_ref())
            }
            _ => Err(BillingError::unknown_operation(processor, capability)),
        }
    }
}
