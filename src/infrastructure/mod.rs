//! Adapters for the domain ports: owner stores and the sandbox processor.

pub mod in_memory;
#[cfg(feature = "storage-rocksdb")]
pub mod rocksdb;
pub mod sandbox;
