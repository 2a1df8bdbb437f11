use anyhow::Result;
use std::io;
use tracing::{info, warn};
use translator_probe::config::{Config, ReportFormat};
use translator_probe::http::HttpTranslator;
use translator_probe::i18n::LanguageRegistry;
use translator_probe::prober::AvailabilityProber;
use translator_probe::report::{ConsoleSink, JsonLinesSink, OverallStatus, ReportSink};
use translator_probe::sequencer::CheckSequencer;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored when absent)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so stdout stays a clean report
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("translator_probe=info".parse()?),
        )
        .init();

    let config = Config::from_env()?;
    let capability = HttpTranslator::from_config(&config)?;
    let registry = LanguageRegistry::builtin();
    info!(
        "Probing {} languages ({} checks)",
        registry.len(),
        registry.total_checks()
    );

    let sequencer = CheckSequencer::new(registry, AvailabilityProber::new(config.retry_config()));

    let mut sink: Box<dyn ReportSink> = match config.report_format {
        ReportFormat::Text => Box::new(ConsoleSink::new(io::stdout())),
        ReportFormat::Json => Box::new(JsonLinesSink::new(io::stdout())),
    };

    let report = sequencer.run(&capability, &mut *sink).await;

    if report.status == OverallStatus::Error {
        warn!("Run aborted: no translation capability");
        std::process::exit(1);
    }

    let summary = &report.summary;
    info!(
        "✓ {} checks over {} languages: {} available, {} downloadable, {} downloading, {} unavailable, {} errors ({:.1}% available)",
        summary.checks,
        summary.languages,
        summary.available,
        summary.downloadable,
        summary.downloading,
        summary.unavailable,
        summary.errors,
        summary.available_rate
    );

    Ok(())
}
