use super::{LanguageResult, OverallStatus, ProgressEvent, ReportSink, RunEvent};
use std::io::{self, Write};
use tracing::warn;

/// Printed under the final status of a completed run.
pub const STATUS_LEGEND: &str =
    "Each language lists its support status per pair (available/downloadable/unavailable).";

/// Writes a run as plain text, one block per language.
pub struct ConsoleSink<W: Write> {
    out: W,
    status: OverallStatus,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            status: OverallStatus::Initial,
        }
    }

    /// Last overall status seen.
    pub fn status(&self) -> OverallStatus {
        self.status
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &RunEvent) -> io::Result<()> {
        match event {
            RunEvent::Status {
                status, message, ..
            } => {
                self.status = *status;
                writeln!(self.out, "{}", message)?;
                if *status == OverallStatus::Success {
                    writeln!(self.out, "{}", STATUS_LEGEND)?;
                }
                Ok(())
            }
            RunEvent::Progress(progress) => self.write_progress(progress),
            RunEvent::Result(result) => self.write_result(result),
        }?;
        self.out.flush()
    }

    fn write_progress(&mut self, event: &ProgressEvent) -> io::Result<()> {
        writeln!(
            self.out,
            "({} of {}) Checking: {} ({})...",
            event.progress.completed_checks, event.progress.total_checks, event.language, event.pair
        )
    }

    fn write_result(&mut self, result: &LanguageResult) -> io::Result<()> {
        write!(
            self.out,
            "{} ({}) [{}]",
            result.name,
            result.code.to_uppercase(),
            result.headline_status()
        )?;
        if result.is_base_language() {
            write!(self.out, " · Base Language")?;
        }
        writeln!(self.out)?;

        for pair in &result.pair_statuses {
            writeln!(self.out, "    {:<12} {}", pair.options().to_string(), pair.status)?;
        }
        Ok(())
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn handle(&mut self, event: &RunEvent) {
        if let Err(e) = self.write_event(event) {
            warn!("Failed to write report output: {}", e);
        }
    }
}
