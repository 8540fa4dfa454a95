use crate::domain::capability::Capability;
use thiserror::Error;

/// The owner is missing billing configuration an operation depends on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("processor not set")]
    ProcessorNotSet,
    #[error("no {processor} customer is attached to this owner")]
    ProcessorIdNotSet { processor: String },
}

/// A failure reported by a processor adapter.
///
/// The dispatcher hands these back to the caller exactly as the adapter
/// produced them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{processor} error: {message}")]
pub struct ProcessorError {
    pub processor: String,
    pub code: Option<String>,
    pub message: String,
}

impl ProcessorError {
    pub fn new(processor: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            processor: processor.into(),
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }
}

#[derive(Error, Debug)]
pub enum BillingError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Unknown operation `{operation}`")]
    UnknownOperation {
        processor: String,
        capability: Capability,
        operation: String,
    },
    #[error("Registration error: {0}")]
    Registration(String),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    ValidationError(String),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
}

impl BillingError {
    pub fn unknown_operation(processor: &str, capability: Capability) -> Self {
        Self::UnknownOperation {
            processor: processor.to_string(),
            capability,
            operation: capability.operation_name(processor),
        }
    }
}

pub type Result<T> = std::result::Result<T, BillingError>;
