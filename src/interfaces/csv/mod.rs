//! CSV input and output for the batch binary.

pub mod operation_reader;
pub mod report_writer;
