//! Owns the displayed array and at most one run in flight.

use std::panic;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::config::{clamp_array_size, RunConfig, Speed};
use crate::element::{self, VisualElement};
use crate::error::{ControlError, SortError};
use crate::patterns;
use crate::registry::{Algorithm, Precondition};
use crate::runner::{self, RunOutcome, RunReport};
use crate::step::SnapshotSink;

/// Where the controller is in its lifecycle. Every terminal state accepts new commands.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Idle,
    Running,
    Completed { elapsed: Duration },
    Cancelled { elapsed: Duration },
    PreconditionFailed(Precondition),
    Exhausted { attempts: u32 },
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }
}

impl From<&RunReport> for RunState {
    fn from(report: &RunReport) -> Self {
        match report.outcome {
            RunOutcome::Completed => RunState::Completed {
                elapsed: report.elapsed,
            },
            RunOutcome::Cancelled => RunState::Cancelled {
                elapsed: report.elapsed,
            },
            RunOutcome::PreconditionFailed(precondition) => {
                RunState::PreconditionFailed(precondition)
            }
            RunOutcome::Exhausted { attempts } => RunState::Exhausted { attempts },
        }
    }
}

struct ActiveRun {
    algorithm: Algorithm,
    token: CancellationToken,
    handle: JoinHandle<Result<RunReport, SortError>>,
}

/// The state a presentation layer drives: the current array, the settings and the run, if any.
///
/// Runs are spawned onto the ambient tokio runtime, so [`Visualizer::start_run`] must be called
/// from within one. A run stays in flight, and the controller stays busy, until
/// [`Visualizer::wait`] collected it.
pub struct Visualizer {
    config: RunConfig,
    array: Vec<VisualElement>,
    rng: StdRng,
    state: RunState,
    active: Option<ActiveRun>,
}

impl Visualizer {
    /// Starts out with a random array of `config.array_size` elements.
    pub fn new(config: RunConfig) -> Self {
        Self::with_seed(config, patterns::random_init_seed())
    }

    /// Like [`Visualizer::new`], with a fixed seed for array generation.
    pub fn with_seed(config: RunConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let array = element::from_values(&patterns::random_values(&mut rng, config.array_size));

        Self {
            config,
            array,
            rng,
            state: RunState::Idle,
            active: None,
        }
    }

    pub fn array(&self) -> &[VisualElement] {
        &self.array
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// The algorithm of the run in flight.
    pub fn running(&self) -> Option<Algorithm> {
        self.active.as_ref().map(|run| run.algorithm)
    }

    /// Replaces the array with `size` fresh random values. `size` is clamped to the supported
    /// range.
    pub fn regenerate_array(&mut self, size: usize) -> Result<&[VisualElement], ControlError> {
        self.ensure_idle()?;

        let size = clamp_array_size(size);
        self.config.array_size = size;
        self.array = element::from_values(&patterns::random_values(&mut self.rng, size));
        self.state = RunState::Idle;

        debug!(size, "regenerated array");
        Ok(&self.array)
    }

    /// Uses the given values as-is, without clamping the length.
    pub fn set_array(&mut self, values: &[u32]) -> Result<(), ControlError> {
        self.ensure_idle()?;

        self.array = element::from_values(values);
        self.state = RunState::Idle;
        Ok(())
    }

    pub fn set_speed(&mut self, speed: Speed) -> Result<(), ControlError> {
        self.set_delay(speed.delay())
    }

    /// The delay is fixed for a run once it started, hence only accepted while idle.
    pub fn set_delay(&mut self, delay: Duration) -> Result<(), ControlError> {
        self.ensure_idle()?;

        self.config.step_delay = delay;
        Ok(())
    }

    /// Spawns a run of `algorithm` over a copy of the current array. Snapshots go to `sink`.
    pub fn start_run<S>(&mut self, algorithm: Algorithm, sink: S) -> Result<(), ControlError>
    where
        S: SnapshotSink + Send + 'static,
    {
        self.ensure_idle()?;

        let token = CancellationToken::new();
        let run_token = token.clone();
        let seed = self.array.clone();
        let config = self.config.clone();

        let handle = tokio::spawn(async move {
            let mut sink = sink;
            runner::run(algorithm, &seed, &config, run_token, &mut sink).await
        });

        info!(algorithm = algorithm.key(), len = self.array.len(), "run started");

        self.active = Some(ActiveRun {
            algorithm,
            token,
            handle,
        });
        self.state = RunState::Running;
        Ok(())
    }

    /// Requests cancellation of the run in flight. Returns false if there is none.
    pub fn cancel_run(&self) -> bool {
        match &self.active {
            Some(run) => {
                run.token.cancel();
                true
            }
            None => false,
        }
    }

    /// A handle that cancels the run in flight from elsewhere, e.g. a signal handler.
    pub fn cancel_token(&self) -> Option<CancellationToken> {
        self.active.as_ref().map(|run| run.token.clone())
    }

    /// Waits for the run in flight to reach a terminal state.
    ///
    /// The terminal array becomes the displayed array. A panic inside the run is resumed here.
    pub async fn wait(&mut self) -> Result<RunReport, ControlError> {
        let run = self.active.take().ok_or(ControlError::NoRun)?;

        let result = match run.handle.await {
            Ok(result) => result,
            Err(err) if err.is_panic() => panic::resume_unwind(err.into_panic()),
            Err(err) => {
                self.state = RunState::Idle;
                return Err(ControlError::Join(err.to_string()));
            }
        };

        match result {
            Ok(report) => {
                self.array.clone_from(&report.elements);
                self.state = RunState::from(&report);
                Ok(report)
            }
            Err(err) => {
                self.state = RunState::Idle;
                Err(err.into())
            }
        }
    }

    fn ensure_idle(&self) -> Result<(), ControlError> {
        if self.active.is_some() {
            Err(ControlError::Busy)
        } else {
            Ok(())
        }
    }
}

impl Drop for Visualizer {
    fn drop(&mut self) {
        if let Some(run) = &self.active {
            run.token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{MAX_ARRAY_SIZE, MIN_ARRAY_SIZE};
    use crate::step::{NullSink, Snapshot};

    use tokio::sync::mpsc;

    fn instant() -> RunConfig {
        RunConfig::default().with_delay(Duration::ZERO)
    }

    #[test]
    fn regenerate_clamps_and_replaces() {
        let mut vis = Visualizer::with_seed(RunConfig::default().with_array_size(20), 3);
        assert_eq!(vis.array().len(), 20);

        assert_eq!(vis.regenerate_array(1).unwrap().len(), MIN_ARRAY_SIZE);
        assert_eq!(vis.regenerate_array(5000).unwrap().len(), MAX_ARRAY_SIZE);
        assert_eq!(vis.config().array_size, MAX_ARRAY_SIZE);
        assert!(vis.array().iter().all(|e| *e == e.at_rest()));
    }

    #[test]
    fn same_seed_same_array() {
        let a = Visualizer::with_seed(RunConfig::default(), 11);
        let b = Visualizer::with_seed(RunConfig::default(), 11);
        assert_eq!(a.array(), b.array());
    }

    #[tokio::test]
    async fn wait_without_run() {
        let mut vis = Visualizer::with_seed(instant(), 1);
        assert!(matches!(vis.wait().await, Err(ControlError::NoRun)));
        assert!(!vis.cancel_run());
    }

    #[tokio::test]
    async fn completed_run_becomes_the_array() {
        let mut vis = Visualizer::with_seed(instant(), 1);
        vis.set_array(&[4, 2, 3, 1]).unwrap();

        let (tx, mut rx) = mpsc::unbounded_channel::<Snapshot>();
        vis.start_run(Algorithm::Heap, tx).unwrap();
        assert_eq!(vis.state(), RunState::Running);
        assert_eq!(vis.running(), Some(Algorithm::Heap));

        let report = vis.wait().await.unwrap();
        assert!(report.outcome.is_completed());
        assert!(matches!(vis.state(), RunState::Completed { .. }));
        assert_eq!(element::values(vis.array()), vec![1, 2, 3, 4]);

        let mut last = None;
        while let Some(snapshot) = rx.recv().await {
            last = Some(snapshot);
        }
        assert_eq!(last.map(|s| s.to_vec()), Some(vis.array().to_vec()));

        // Terminal states accept new commands.
        vis.regenerate_array(8).unwrap();
        vis.start_run(Algorithm::Quick, NullSink).unwrap();
        vis.wait().await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn commands_are_rejected_while_running() {
        let mut vis = Visualizer::with_seed(RunConfig::default().with_speed(Speed::Slow), 5);
        vis.start_run(Algorithm::Bubble, NullSink).unwrap();

        assert!(matches!(vis.regenerate_array(10), Err(ControlError::Busy)));
        assert!(matches!(vis.set_speed(Speed::Fast), Err(ControlError::Busy)));
        assert!(matches!(
            vis.start_run(Algorithm::Quick, NullSink),
            Err(ControlError::Busy)
        ));

        assert!(vis.cancel_run());
        let report = vis.wait().await.unwrap();
        assert_eq!(report.outcome, RunOutcome::Cancelled);
        assert!(matches!(vis.state(), RunState::Cancelled { .. }));
        assert!(vis.array().iter().all(|e| !e.comparing));

        vis.set_speed(Speed::Fast).unwrap();
        assert_eq!(vis.config().step_delay, Duration::from_millis(25));
    }

    #[tokio::test]
    async fn precondition_leaves_array_alone() {
        let mut vis = Visualizer::with_seed(instant(), 9);
        vis.set_array(&[3, 1, 2]).unwrap();
        vis.start_run(Algorithm::Bitonic, NullSink).unwrap();

        let report = vis.wait().await.unwrap();
        assert_eq!(
            vis.state(),
            RunState::PreconditionFailed(Precondition::PowerOfTwoLength)
        );
        assert_eq!(report.stats.snapshots, 0);
        assert_eq!(element::values(vis.array()), vec![3, 1, 2]);
    }
}
