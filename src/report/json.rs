use super::{ReportSink, RunEvent};
use std::io::Write;
use tracing::warn;

/// Writes each event as a single line of JSON.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &RunEvent) -> anyhow::Result<()> {
        serde_json::to_writer(&mut self.out, event)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}

impl<W: Write> ReportSink for JsonLinesSink<W> {
    fn handle(&mut self, event: &RunEvent) {
        if let Err(e) = self.write_event(event) {
            warn!("Failed to write JSON report line: {}", e);
        }
    }
}
