//! Step primitives handed to every algorithm body.
//!
//! A body never announces a mutation or waits on its own. It calls [`Stepper::publish`] to hand
//! the current state to the presentation layer and [`Stepper::tick`] to pause until the next
//! animation step. Both observe the run's cancellation token, so a body that only uses these two
//! operations is cancellable without checking anything itself.

use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::element::{self, VisualElement};
use crate::error::{Result, SortError};

/// A point-in-time, read-only copy of the element sequence.
///
/// Later mutation of the working array never changes a snapshot that was already published.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot(Arc<[VisualElement]>);

impl Snapshot {
    pub fn new(elements: &[VisualElement]) -> Self {
        Self(Arc::from(elements))
    }

    pub fn values(&self) -> Vec<u32> {
        element::values(&self.0)
    }

    pub fn to_vec(&self) -> Vec<VisualElement> {
        self.0.to_vec()
    }
}

impl Deref for Snapshot {
    type Target = [VisualElement];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Returned by a sink that can no longer accept snapshots.
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("snapshot sink is closed")]
pub struct SinkClosed;

impl From<SinkClosed> for SortError {
    fn from(_: SinkClosed) -> Self {
        SortError::SinkClosed
    }
}

/// The outbound seam towards the presentation layer.
pub trait SnapshotSink {
    /// Called for every published snapshot, in publish order.
    fn publish(&mut self, snapshot: Snapshot) -> std::result::Result<(), SinkClosed>;

    /// Called exactly once when a run completes naturally.
    fn completed(&mut self, _elapsed: Duration) {}
}

/// Records every snapshot, mostly useful for tests.
impl SnapshotSink for Vec<Snapshot> {
    fn publish(&mut self, snapshot: Snapshot) -> std::result::Result<(), SinkClosed> {
        self.push(snapshot);
        Ok(())
    }
}

impl SnapshotSink for mpsc::UnboundedSender<Snapshot> {
    fn publish(&mut self, snapshot: Snapshot) -> std::result::Result<(), SinkClosed> {
        self.send(snapshot).map_err(|_| SinkClosed)
    }
}

impl<S: SnapshotSink + ?Sized> SnapshotSink for Box<S> {
    fn publish(&mut self, snapshot: Snapshot) -> std::result::Result<(), SinkClosed> {
        (**self).publish(snapshot)
    }

    fn completed(&mut self, elapsed: Duration) {
        (**self).completed(elapsed)
    }
}

/// Discards everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NullSink;

impl SnapshotSink for NullSink {
    fn publish(&mut self, _snapshot: Snapshot) -> std::result::Result<(), SinkClosed> {
        Ok(())
    }
}

/// Adapts a closure into a sink that never closes.
pub struct FnSink<F>(pub F);

impl<F> SnapshotSink for FnSink<F>
where
    F: FnMut(Snapshot),
{
    fn publish(&mut self, snapshot: Snapshot) -> std::result::Result<(), SinkClosed> {
        (self.0)(snapshot);
        Ok(())
    }
}

/// How often the primitives were used during one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    pub snapshots: u64,
    pub ticks: u64,
}

/// The step primitives bound to one run's sink, token and delay.
pub struct Stepper<'a> {
    sink: &'a mut (dyn SnapshotSink + Send),
    token: CancellationToken,
    delay: Duration,
    stats: StepStats,
}

impl<'a> Stepper<'a> {
    pub fn new(
        sink: &'a mut (dyn SnapshotSink + Send),
        token: CancellationToken,
        delay: Duration,
    ) -> Self {
        Self {
            sink,
            token,
            delay,
            stats: StepStats::default(),
        }
    }

    /// Forwards a copy of `elements` to the sink.
    ///
    /// Fails with [`SortError::Cancelled`] once the token has fired, even if the body never
    /// reaches another `tick`.
    pub fn publish(&mut self, elements: &[VisualElement]) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(SortError::Cancelled);
        }

        self.forward(elements)
    }

    /// Suspends for the configured delay, or until the token fires, whichever comes first.
    ///
    /// A zero delay does not sleep, it only yields once so that other tasks on the same
    /// runtime (including whoever cancels) get to run.
    pub async fn tick(&mut self) -> Result<()> {
        if self.token.is_cancelled() {
            return Err(SortError::Cancelled);
        }

        self.stats.ticks += 1;

        if self.delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::select! {
                biased;
                _ = self.token.cancelled() => return Err(SortError::Cancelled),
                _ = tokio::time::sleep(self.delay) => {}
            }
        }

        if self.token.is_cancelled() {
            Err(SortError::Cancelled)
        } else {
            Ok(())
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn stats(&self) -> StepStats {
        self.stats
    }

    /// Publishes without looking at the token. Used for the cleanup snapshot after cancellation.
    pub(crate) fn forward(&mut self, elements: &[VisualElement]) -> Result<()> {
        self.sink.publish(Snapshot::new(elements))?;
        self.stats.snapshots += 1;

        Ok(())
    }

    pub(crate) fn completed(&mut self, elapsed: Duration) {
        self.sink.completed(elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::from_values;

    use tokio::time::Instant;

    #[tokio::test]
    async fn publish_forwards_independent_copy() {
        let mut sink: Vec<Snapshot> = Vec::new();
        let mut v = from_values(&[3, 1, 2]);

        {
            let mut step = Stepper::new(&mut sink, CancellationToken::new(), Duration::ZERO);
            step.publish(&v).unwrap();
            v.swap(0, 1);
            step.publish(&v).unwrap();
            assert_eq!(step.stats().snapshots, 2);
        }

        assert_eq!(sink[0].values(), vec![3, 1, 2]);
        assert_eq!(sink[1].values(), vec![1, 3, 2]);
    }

    #[tokio::test]
    async fn publish_after_cancel_fails() {
        let mut sink: Vec<Snapshot> = Vec::new();
        let token = CancellationToken::new();
        token.cancel();

        {
            let mut step = Stepper::new(&mut sink, token, Duration::ZERO);
            assert_eq!(
                step.publish(&from_values(&[1])),
                Err(SortError::Cancelled)
            );
            assert_eq!(step.tick().await, Err(SortError::Cancelled));
            assert_eq!(step.stats(), StepStats::default());
        }

        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn closed_channel_is_reported() {
        let (mut tx, rx) = mpsc::unbounded_channel();
        drop(rx);

        let mut step = Stepper::new(&mut tx, CancellationToken::new(), Duration::ZERO);
        assert_eq!(
            step.publish(&from_values(&[1, 2])),
            Err(SortError::SinkClosed)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn tick_waits_for_delay() {
        let mut sink = NullSink;
        let mut step = Stepper::new(&mut sink, CancellationToken::new(), Duration::from_millis(25));

        let start = Instant::now();
        step.tick().await.unwrap();
        step.tick().await.unwrap();

        assert!(start.elapsed() >= Duration::from_millis(50));
        assert_eq!(step.stats().ticks, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_zero_delay_returns_without_sleeping() {
        let mut sink = NullSink;
        let mut step = Stepper::new(&mut sink, CancellationToken::new(), Duration::ZERO);

        let start = Instant::now();
        for _ in 0..100 {
            step.tick().await.unwrap();
        }

        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_interrupts_tick() {
        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });

        let mut sink = NullSink;
        let mut step = Stepper::new(&mut sink, token, Duration::from_secs(60));

        let start = Instant::now();
        assert_eq!(step.tick().await, Err(SortError::Cancelled));
        assert!(start.elapsed() < Duration::from_secs(60));
    }

    #[tokio::test]
    async fn fn_sink_sees_every_snapshot() {
        let mut seen = 0usize;
        {
            let mut sink = FnSink(|s: Snapshot| seen += s.len());
            let mut step = Stepper::new(&mut sink, CancellationToken::new(), Duration::ZERO);
            step.publish(&from_values(&[1, 2, 3])).unwrap();
            step.publish(&from_values(&[4])).unwrap();
        }
        assert_eq!(seen, 4);
    }
}
