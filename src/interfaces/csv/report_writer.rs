use crate::application::engine::OwnerReport;
use crate::error::Result;
use std::io::Write;

/// Writes owner reports as CSV, one row per owner.
pub struct ReportWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> ReportWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_reports(&mut self, reports: impl IntoIterator<Item = OwnerReport>) -> Result<()> {
        for report in reports {
            self.writer.serialize(report)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
