//! The execution wrapper shared by every algorithm.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::RunConfig;
use crate::element::{self, VisualElement};
use crate::error::SortError;
use crate::registry::{Algorithm, Precondition};
use crate::step::{SnapshotSink, StepStats, Stepper};

/// How a run ended, as far as the caller is concerned. None of these are failures of the
/// library itself, those come back as `Err(SortError)` from [`run`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
    PreconditionFailed(Precondition),
    Exhausted { attempts: u32 },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunOutcome::Completed)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunReport {
    pub outcome: RunOutcome,
    /// Wall-clock time from start to the terminal state.
    pub elapsed: Duration,
    /// The working copy in its terminal state.
    pub elements: Vec<VisualElement>,
    pub stats: StepStats,
}

/// Runs `algorithm` over a copy of `seed`, publishing every step into `sink`.
///
/// `seed` itself is never touched. The working copy starts with all flags cleared. A cancelled
/// run publishes one last snapshot with no comparing marks, a completed run has every element
/// sorted. `Err` is only returned for broken invariants or a sink that went away.
pub async fn run<S>(
    algorithm: Algorithm,
    seed: &[VisualElement],
    config: &RunConfig,
    token: CancellationToken,
    sink: &mut S,
) -> Result<RunReport, SortError>
where
    S: SnapshotSink + Send,
{
    let mut working: Vec<VisualElement> = seed.iter().map(VisualElement::at_rest).collect();

    info!(
        algorithm = algorithm.key(),
        len = working.len(),
        delay_ms = config.step_delay.as_millis() as u64,
        "starting run"
    );

    let start = Instant::now();
    let mut step = Stepper::new(sink, token, config.step_delay);
    let result = algorithm.execute(&mut working, &mut step, config).await;
    let elapsed = start.elapsed();

    let outcome = match result {
        Ok(()) => {
            if let Some(reason) = completion_violation(&working) {
                warn!(algorithm = algorithm.key(), %reason, "run finished in an invalid state");
                return Err(SortError::Invariant {
                    algorithm: algorithm.key(),
                    reason,
                });
            }
            step.completed(elapsed);
            RunOutcome::Completed
        }
        Err(SortError::Cancelled) => {
            element::clear_comparing(&mut working);
            step.forward(&working)?;
            RunOutcome::Cancelled
        }
        Err(SortError::PreconditionFailed(precondition)) => {
            debug!(algorithm = algorithm.key(), %precondition, "precondition not met");
            RunOutcome::PreconditionFailed(precondition)
        }
        Err(SortError::Exhausted { attempts }) => RunOutcome::Exhausted { attempts },
        Err(err) => {
            warn!(algorithm = algorithm.key(), %err, "run failed");
            return Err(err);
        }
    };

    let stats = step.stats();
    info!(
        algorithm = algorithm.key(),
        outcome = ?outcome,
        elapsed_ms = elapsed.as_millis() as u64,
        snapshots = stats.snapshots,
        ticks = stats.ticks,
        "run finished"
    );

    Ok(RunReport {
        outcome,
        elapsed,
        elements: working,
        stats,
    })
}

fn completion_violation(v: &[VisualElement]) -> Option<String> {
    if !element::is_ordered(v) {
        return Some("values are not in non-decreasing order".to_string());
    }
    if let Some(i) = v.iter().position(|e| e.comparing || !e.sorted) {
        return Some(format!("element {i} is not at rest and sorted"));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{from_values, values};
    use crate::step::{NullSink, Snapshot, SinkClosed};

    fn instant() -> RunConfig {
        RunConfig::default().with_delay(Duration::ZERO)
    }

    #[derive(Default)]
    struct Recorder {
        snapshots: Vec<Snapshot>,
        completed: Vec<Duration>,
    }

    impl SnapshotSink for Recorder {
        fn publish(&mut self, snapshot: Snapshot) -> Result<(), SinkClosed> {
            self.snapshots.push(snapshot);
            Ok(())
        }

        fn completed(&mut self, elapsed: Duration) {
            self.completed.push(elapsed);
        }
    }

    struct Closed;

    impl SnapshotSink for Closed {
        fn publish(&mut self, _snapshot: Snapshot) -> Result<(), SinkClosed> {
            Err(SinkClosed)
        }
    }

    #[tokio::test]
    async fn completed_run_reports_once() {
        let mut sink = Recorder::default();
        let seed = from_values(&[5, 3, 1, 4, 2]);
        let report = run(
            Algorithm::Bubble,
            &seed,
            &instant(),
            CancellationToken::new(),
            &mut sink,
        )
        .await
        .unwrap();

        assert_eq!(report.outcome, RunOutcome::Completed);
        assert_eq!(values(&report.elements), vec![1, 2, 3, 4, 5]);
        assert!(element::is_finished(&report.elements));
        assert_eq!(sink.completed, vec![report.elapsed]);
        assert_eq!(report.stats.snapshots, sink.snapshots.len() as u64);
        assert_eq!(values(&seed), vec![5, 3, 1, 4, 2]);
    }

    #[tokio::test]
    async fn seed_flags_do_not_leak_into_the_run() {
        let mut seed = from_values(&[2, 1]);
        seed[0].sorted = true;
        seed[1].comparing = true;

        let mut sink = Recorder::default();
        run(
            Algorithm::Bubble,
            &seed,
            &instant(),
            CancellationToken::new(),
            &mut sink,
        )
        .await
        .unwrap();

        let first = &sink.snapshots[0];
        assert!(!first[0].sorted);
    }

    #[tokio::test]
    async fn cancelled_before_start() {
        let token = CancellationToken::new();
        token.cancel();

        let mut sink = Recorder::default();
        let report = run(
            Algorithm::Quick,
            &from_values(&[3, 2, 1]),
            &instant(),
            token,
            &mut sink,
        )
        .await
        .unwrap();

        assert_eq!(report.outcome, RunOutcome::Cancelled);
        assert!(sink.completed.is_empty());
        // Only the cleanup snapshot.
        assert_eq!(sink.snapshots.len(), 1);
        assert_eq!(sink.snapshots[0].values(), vec![3, 2, 1]);
    }

    #[tokio::test]
    async fn bitonic_rejects_length_before_publishing() {
        let mut sink = Recorder::default();
        let report = run(
            Algorithm::Bitonic,
            &from_values(&[6, 5, 4, 3, 2, 1]),
            &instant(),
            CancellationToken::new(),
            &mut sink,
        )
        .await
        .unwrap();

        assert_eq!(
            report.outcome,
            RunOutcome::PreconditionFailed(Precondition::PowerOfTwoLength)
        );
        assert!(sink.snapshots.is_empty());
        assert_eq!(values(&report.elements), vec![6, 5, 4, 3, 2, 1]);
    }

    #[tokio::test]
    async fn zero_attempts_exhausts_unsorted_bogo() {
        let report = run(
            Algorithm::Bogo,
            &from_values(&[2, 1]),
            &instant().with_max_shuffle_attempts(0),
            CancellationToken::new(),
            &mut NullSink,
        )
        .await
        .unwrap();

        assert_eq!(report.outcome, RunOutcome::Exhausted { attempts: 0 });
        assert!(report.elements.iter().all(|e| !e.comparing));
    }

    #[tokio::test]
    async fn closed_sink_is_a_defect() {
        let err = run(
            Algorithm::Heap,
            &from_values(&[2, 1, 3]),
            &instant(),
            CancellationToken::new(),
            &mut Closed,
        )
        .await
        .unwrap_err();

        assert_eq!(err, SortError::SinkClosed);
        assert!(err.is_defect());
    }

    #[test]
    fn completion_checks() {
        let mut v = from_values(&[1, 2]);
        assert!(completion_violation(&v).is_some());
        element::mark_all_sorted(&mut v);
        assert_eq!(completion_violation(&v), None);
        v.swap(0, 1);
        assert!(completion_violation(&v).is_some());
    }
}
