use billable::application::billable::{Billable, Clock};
use billable::application::engine::BillingEngine;
use billable::application::registry::ProcessorRegistry;
use billable::config::Settings;
use billable::domain::ports::OwnerStoreBox;
use billable::infrastructure::in_memory::InMemoryOwnerStore;
use billable::infrastructure::sandbox::SandboxProcessor;
use billable::interfaces::csv::operation_reader::OperationReader;
use billable::interfaces::csv::report_writer::ReportWriter;
use chrono::Utc;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .init();
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<&Path>) -> Result<OwnerStoreBox> {
    use billable::infrastructure::rocksdb::RocksDBStore;

    match db_path {
        Some(path) => Ok(Box::new(RocksDBStore::open(path).into_diagnostic()?)),
        None => Ok(Box::new(InMemoryOwnerStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<&Path>) -> Result<OwnerStoreBox> {
    if db_path.is_some() {
        tracing::warn!(
            "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
        );
    }
    Ok(Box::new(InMemoryOwnerStore::new()))
}

fn build_registry(settings: &Settings, clock: &Clock) -> Result<ProcessorRegistry> {
    let mut registry = ProcessorRegistry::new();
    for processor in &settings.processors {
        let adapter = SandboxProcessor::new(processor.as_str())
            .with_prices(settings.prices.clone())
            .with_clock(clock.clone());
        registry.register(Arc::new(adapter)).into_diagnostic()?;
    }
    tracing::debug!(processors = ?registry.processors(), "registered sandbox processors");
    Ok(registry)
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let settings = Settings::parse();

    let clock: Clock = match settings.as_of {
        Some(as_of) => Arc::new(move || as_of),
        None => Arc::new(Utc::now),
    };
    let registry = Arc::new(build_registry(&settings, &clock)?);
    let billable = Billable::with_clock(registry, clock);
    let engine = BillingEngine::new(billable, open_store(settings.db_path.as_deref())?);

    let file = File::open(&settings.input).into_diagnostic()?;
    let reader = OperationReader::new(file);
    for op_result in reader.operations() {
        match op_result {
            Ok(op) => {
                let owner = op.owner;
                if let Err(e) = engine.process_operation(op).await {
                    tracing::warn!(owner, error = %e, "Error processing operation");
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Error reading operation");
            }
        }
    }

    let reports = engine.into_results().await.into_diagnostic()?;

    let stdout = io::stdout();
    let mut writer = ReportWriter::new(stdout.lock());
    writer.write_reports(reports).into_diagnostic()?;

    Ok(())
}
