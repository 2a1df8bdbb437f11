//! Check sequencer: walks the registry and checks every language one pair
//! at a time.
//!
//! For each language three checks run in a fixed order: L → EN, EN → L, and
//! L → L (the last one stands in for "is the language model installed").
//! Exactly one probe is in flight at any moment.

use crate::capability::{CheckOptions, TranslatorCapability};
use crate::i18n::{LanguageEntry, LanguageRegistry, BASE_LANGUAGE};
use crate::prober::AvailabilityProber;
use crate::report::{
    LanguageResult, OverallStatus, PairStatus, ProgressEvent, ProgressState, ReportSink,
    RunEvent, RunSummary,
};
use tracing::{debug, error, info};

/// Shown when the host has no translation capability at all.
pub const CAPABILITY_MISSING_MESSAGE: &str =
    "❌ Translator API Not Found. Set TRANSLATOR_API_URL to a reachable translation host.";

/// What a finished run looked like.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub status: OverallStatus,
    pub progress: ProgressState,
    pub summary: RunSummary,
}

pub struct CheckSequencer {
    registry: LanguageRegistry,
    prober: AvailabilityProber,
}

impl CheckSequencer {
    pub fn new(registry: LanguageRegistry, prober: AvailabilityProber) -> Self {
        Self { registry, prober }
    }

    pub fn registry(&self) -> &LanguageRegistry {
        &self.registry
    }

    /// Check every language in the registry and report to `sink`.
    ///
    /// Returns with [`OverallStatus::Error`] without probing anything if
    /// the capability is absent. Individual check failures never stop the run.
    pub async fn run(
        &self,
        capability: &dyn TranslatorCapability,
        sink: &mut dyn ReportSink,
    ) -> RunReport {
        let mut progress = ProgressState {
            completed_checks: 0,
            total_checks: self.registry.total_checks(),
        };

        if !capability.is_present() {
            error!("Translation capability not found, aborting run");
            sink.handle(&RunEvent::Status {
                status: OverallStatus::Error,
                message: CAPABILITY_MISSING_MESSAGE.to_string(),
                progress: None,
            });
            return RunReport {
                status: OverallStatus::Error,
                progress,
                summary: RunSummary::from_results(&[]),
            };
        }

        info!(
            "Starting {} availability checks across {} languages",
            progress.total_checks,
            self.registry.len()
        );
        sink.handle(&RunEvent::Status {
            status: OverallStatus::Progress,
            message: format!(
                "✅ Translator API Found. Starting {} availability checks...",
                progress.total_checks
            ),
            progress: Some(progress),
        });

        let mut results = Vec::with_capacity(self.registry.len());
        for entry in self.registry.iter() {
            let result = self
                .check_language(capability, entry, &mut progress, sink)
                .await;
            info!(
                "{} ({}): {}",
                result.name,
                result.code,
                result.headline_status()
            );
            sink.handle(&RunEvent::Result(result.clone()));
            results.push(result);
        }

        sink.handle(&RunEvent::Status {
            status: OverallStatus::Success,
            message: format!(
                "✅ Testing Complete! {} availability checks performed.",
                progress.total_checks
            ),
            progress: Some(progress),
        });

        RunReport {
            status: OverallStatus::Success,
            progress,
            summary: RunSummary::from_results(&results),
        }
    }

    async fn check_language(
        &self,
        capability: &dyn TranslatorCapability,
        entry: &LanguageEntry,
        progress: &mut ProgressState,
        sink: &mut dyn ReportSink,
    ) -> LanguageResult {
        let code = entry.code.as_str();

        let to_base = self
            .check_pair(capability, entry, CheckOptions::new(code, BASE_LANGUAGE), progress, sink)
            .await;
        let from_base = self
            .check_pair(capability, entry, CheckOptions::new(BASE_LANGUAGE, code), progress, sink)
            .await;
        let to_self = self
            .check_pair(capability, entry, CheckOptions::new(code, code), progress, sink)
            .await;

        LanguageResult {
            code: entry.code.clone(),
            name: entry.name.clone(),
            pair_statuses: [to_base, from_base, to_self],
        }
    }

    async fn check_pair(
        &self,
        capability: &dyn TranslatorCapability,
        entry: &LanguageEntry,
        options: CheckOptions,
        progress: &mut ProgressState,
        sink: &mut dyn ReportSink,
    ) -> PairStatus {
        progress.completed_checks += 1;
        sink.handle(&RunEvent::Progress(ProgressEvent {
            progress: *progress,
            language: entry.name.clone(),
            pair: options.clone(),
        }));

        let status = self.prober.probe(capability, &options).await;
        debug!("{} {}: {}", entry.name, options, status);
        PairStatus::new(&options, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{AvailabilityStatus, ScriptedCapability};
    use crate::i18n::{LanguageEntry, LANGUAGE_NAMES};
    use crate::retry::{Delay, RetryConfig};
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    struct NoDelay;

    #[async_trait::async_trait]
    impl Delay for NoDelay {
        async fn wait(&self, _duration: Duration) {}
    }

    fn sequencer(registry: LanguageRegistry) -> CheckSequencer {
        let prober =
            AvailabilityProber::with_delay(RetryConfig::availability_probe(), Box::new(NoDelay));
        CheckSequencer::new(registry, prober)
    }

    fn french_only() -> LanguageRegistry {
        LanguageRegistry::new(vec![LanguageEntry::new("fr", "French")]).unwrap()
    }

    fn results(events: &[RunEvent]) -> Vec<&LanguageResult> {
        events
            .iter()
            .filter_map(|e| match e {
                RunEvent::Result(r) => Some(r),
                _ => None,
            })
            .collect()
    }

    fn progress_events(events: &[RunEvent]) -> Vec<&ProgressEvent> {
        events
            .iter()
            .filter_map(|e| match e {
                RunEvent::Progress(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_single_language_end_to_end() {
        let capability = ScriptedCapability::always(AvailabilityStatus::Available);
        let mut events: Vec<RunEvent> = Vec::new();

        let report = sequencer(french_only()).run(&capability, &mut events).await;

        let expected = LanguageResult {
            code: "fr".to_string(),
            name: "French".to_string(),
            pair_statuses: [
                PairStatus::new(&CheckOptions::new("fr", "en"), AvailabilityStatus::Available),
                PairStatus::new(&CheckOptions::new("en", "fr"), AvailabilityStatus::Available),
                PairStatus::new(&CheckOptions::new("fr", "fr"), AvailabilityStatus::Available),
            ],
        };
        assert_eq!(results(&events), vec![&expected]);

        let final_progress = ProgressState {
            completed_checks: 3,
            total_checks: 3,
        };
        match events.last() {
            Some(RunEvent::Status {
                status, progress, ..
            }) => {
                assert_eq!(*status, OverallStatus::Success);
                assert_eq!(*progress, Some(final_progress));
            }
            other => panic!("expected final success status, got {:?}", other),
        }

        assert_eq!(report.status, OverallStatus::Success);
        assert_eq!(report.progress, final_progress);
        assert_eq!(report.summary.checks, 3);
        assert_eq!(report.summary.available, 3);
    }

    #[tokio::test]
    async fn test_event_order_for_one_language() {
        let capability = ScriptedCapability::always(AvailabilityStatus::Available);
        let mut events: Vec<RunEvent> = Vec::new();

        sequencer(french_only()).run(&capability, &mut events).await;

        let kinds: Vec<&str> = events
            .iter()
            .map(|e| match e {
                RunEvent::Status { status, .. } => match status {
                    OverallStatus::Progress => "start",
                    OverallStatus::Success => "success",
                    _ => "other",
                },
                RunEvent::Progress(_) => "progress",
                RunEvent::Result(_) => "result",
            })
            .collect();
        assert_eq!(
            kinds,
            vec!["start", "progress", "progress", "progress", "result", "success"]
        );

        let labels: Vec<String> = progress_events(&events)
            .iter()
            .map(|p| format!("{} {}", p.progress.completed_checks, p.pair))
            .collect();
        assert_eq!(labels, vec!["1 FR → EN", "2 EN → FR", "3 FR → FR"]);
    }

    /// Counts progress events as they reach the sink.
    struct ProgressCounter(Arc<AtomicUsize>);

    impl ReportSink for ProgressCounter {
        fn handle(&mut self, event: &RunEvent) {
            if let RunEvent::Progress(_) = event {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    /// Records how many progress events the sink had seen at each query.
    struct ProgressWitness {
        seen: Arc<AtomicUsize>,
        observed: Mutex<Vec<usize>>,
    }

    #[async_trait::async_trait]
    impl TranslatorCapability for ProgressWitness {
        fn is_present(&self) -> bool {
            true
        }

        async fn availability(
            &self,
            _options: &CheckOptions,
        ) -> Result<AvailabilityStatus, crate::capability::CapabilityError> {
            self.observed
                .lock()
                .unwrap()
                .push(self.seen.load(Ordering::SeqCst));
            Ok(AvailabilityStatus::Available)
        }
    }

    #[tokio::test]
    async fn test_progress_is_reported_before_each_query() {
        let seen = Arc::new(AtomicUsize::new(0));
        let capability = ProgressWitness {
            seen: seen.clone(),
            observed: Mutex::new(Vec::new()),
        };
        let mut sink = ProgressCounter(seen);

        sequencer(french_only()).run(&capability, &mut sink).await;

        assert_eq!(*capability.observed.lock().unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_absent_capability_emits_single_error() {
        let capability = ScriptedCapability::absent();
        let mut events: Vec<RunEvent> = Vec::new();

        let report = sequencer(LanguageRegistry::builtin())
            .run(&capability, &mut events)
            .await;

        assert_eq!(events.len(), 1);
        match &events[0] {
            RunEvent::Status {
                status, message, ..
            } => {
                assert_eq!(*status, OverallStatus::Error);
                assert_eq!(message, CAPABILITY_MISSING_MESSAGE);
            }
            other => panic!("expected error status, got {:?}", other),
        }
        assert!(capability.calls().is_empty());
        assert_eq!(report.status, OverallStatus::Error);
        assert_eq!(report.progress.completed_checks, 0);
        assert_eq!(report.summary.languages, 0);
    }

    #[tokio::test]
    async fn test_probe_calls_follow_registry_and_pair_order() {
        let registry = LanguageRegistry::from_codes(&["de", "ja"], LANGUAGE_NAMES).unwrap();
        let capability = ScriptedCapability::always(AvailabilityStatus::Downloadable);
        let mut events: Vec<RunEvent> = Vec::new();

        sequencer(registry).run(&capability, &mut events).await;

        let calls: Vec<String> = capability.calls().iter().map(|c| c.to_string()).collect();
        assert_eq!(
            calls,
            vec!["DE → EN", "EN → DE", "DE → DE", "JA → EN", "EN → JA", "JA → JA"]
        );

        let names: Vec<&str> = results(&events).iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["German", "Japanese"]);
    }

    #[tokio::test]
    async fn test_exhausted_check_is_recorded_and_run_continues() {
        let registry = LanguageRegistry::from_codes(&["fr", "es"], LANGUAGE_NAMES).unwrap();
        // fr→en fails all three attempts; everything after answers.
        let capability = ScriptedCapability::scripted(
            vec![
                None,
                None,
                None,
                Some(AvailabilityStatus::Downloadable),
                Some(AvailabilityStatus::Unavailable),
            ],
            Some(AvailabilityStatus::Available),
        );
        let mut events: Vec<RunEvent> = Vec::new();

        let report = sequencer(registry).run(&capability, &mut events).await;

        let all = results(&events);
        assert_eq!(all.len(), 2);
        let statuses: Vec<AvailabilityStatus> =
            all[0].pair_statuses.iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            vec![
                AvailabilityStatus::Error,
                AvailabilityStatus::Downloadable,
                AvailabilityStatus::Unavailable,
            ]
        );
        assert_eq!(all[0].headline_status(), AvailabilityStatus::Unavailable);
        assert!(all[1]
            .pair_statuses
            .iter()
            .all(|p| p.status == AvailabilityStatus::Available));

        assert_eq!(report.status, OverallStatus::Success);
        assert_eq!(report.summary.errors, 1);
        assert_eq!(capability.calls().len(), 8);
    }

    #[tokio::test]
    async fn test_unknown_code_keeps_placeholder_name() {
        let registry = LanguageRegistry::from_codes(&["tlh"], LANGUAGE_NAMES).unwrap();
        let capability = ScriptedCapability::always(AvailabilityStatus::Unavailable);
        let mut events: Vec<RunEvent> = Vec::new();

        sequencer(registry).run(&capability, &mut events).await;

        assert_eq!(results(&events)[0].name, "Unknown Language");
        assert_eq!(progress_events(&events)[0].language, "Unknown Language");
    }

    proptest! {
        #[test]
        fn prop_run_emits_one_result_per_language(size in 0usize..12) {
            let codes: Vec<&str> = crate::i18n::BUILTIN_CODES.iter().take(size).copied().collect();
            let registry = LanguageRegistry::from_codes(&codes, LANGUAGE_NAMES).unwrap();
            let capability = ScriptedCapability::always(AvailabilityStatus::Available);
            let mut events: Vec<RunEvent> = Vec::new();

            let report = tokio_test::block_on(sequencer(registry).run(&capability, &mut events));

            prop_assert_eq!(report.progress.total_checks, 3 * size);
            prop_assert_eq!(report.progress.completed_checks, 3 * size);
            prop_assert_eq!(results(&events).len(), size);
            prop_assert_eq!(progress_events(&events).len(), 3 * size);
            prop_assert_eq!(capability.calls().len(), 3 * size);

            let counts: Vec<usize> = progress_events(&events)
                .iter()
                .map(|p| p.progress.completed_checks)
                .collect();
            prop_assert_eq!(counts, (1..=3 * size).collect::<Vec<_>>());
        }
    }
}
