//! Algorithm bodies and the staging helpers they share.
//!
//! Every mutation a body makes is staged the same way: mark the participants as comparing,
//! publish, tick, mutate, publish, tick, clear the marks, publish. The helpers below are those
//! stages, so the bodies read like the textbook algorithm plus the occasional `sorted` mark.

pub mod bitonic;
pub mod bogo;
pub mod brick;
pub mod bubble;
pub mod comb;
pub mod gnome;
pub mod heap;
pub mod insertion;
pub mod merge;
pub mod pancake;
pub mod quick;
pub mod radix;
pub mod selection;
pub mod shaker;
pub mod shell;
pub mod stooge;

use crate::element::{self, VisualElement};
use crate::error::Result;
use crate::step::Stepper;

/// Marks `indices` as comparing, publishes and ticks.
pub(crate) async fn highlight(
    v: &mut [VisualElement],
    step: &mut Stepper<'_>,
    indices: impl IntoIterator<Item = usize>,
) -> Result<()> {
    for i in indices {
        v[i].comparing = true;
    }
    step.publish(v)?;
    step.tick().await
}

/// Clears the comparing mark of `indices` and publishes.
pub(crate) fn release(
    v: &mut [VisualElement],
    step: &mut Stepper<'_>,
    indices: impl IntoIterator<Item = usize>,
) -> Result<()> {
    for i in indices {
        v[i].comparing = false;
    }
    step.publish(v)
}

/// Exchanges two slots, publishes and ticks.
pub(crate) async fn swap(
    v: &mut [VisualElement],
    step: &mut Stepper<'_>,
    a: usize,
    b: usize,
) -> Result<()> {
    v.swap(a, b);
    step.publish(v)?;
    step.tick().await
}

/// Fully staged compare-and-exchange of `a < b`. Returns true if the pair was out of order and
/// got swapped.
pub(crate) async fn compare_exchange(
    v: &mut [VisualElement],
    step: &mut Stepper<'_>,
    a: usize,
    b: usize,
) -> Result<bool> {
    highlight(v, step, [a, b]).await?;

    let out_of_order = v[a].value > v[b].value;
    if out_of_order {
        swap(v, step, a, b).await?;
    }

    release(v, step, [a, b])?;

    Ok(out_of_order)
}

/// Marks one slot as being in its final position and publishes.
pub(crate) fn settle(v: &mut [VisualElement], step: &mut Stepper<'_>, i: usize) -> Result<()> {
    v[i].sorted = true;
    step.publish(v)
}

/// The final sweep: every element sorted, none comparing.
pub(crate) fn finish(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    element::mark_all_sorted(v);
    step.publish(v)
}

/// Writes `order` over `v[offset..offset + order.len()]` one staged slot at a time.
///
/// Used by the algorithms that rebuild a range from scratch buffers. If the run stops part way,
/// the slots not yet written are filled in directly so `v` stays a permutation of its input.
pub(crate) async fn write_back(
    v: &mut [VisualElement],
    step: &mut Stepper<'_>,
    offset: usize,
    order: &[VisualElement],
    settle_written: bool,
) -> Result<()> {
    let mut written = 0;
    let result = write_each(v, step, offset, order, settle_written, &mut written).await;

    if result.is_err() {
        for (slot, e) in v[offset + written..].iter_mut().zip(&order[written..]) {
            *slot = e.at_rest();
        }
    }

    result
}

async fn write_each(
    v: &mut [VisualElement],
    step: &mut Stepper<'_>,
    offset: usize,
    order: &[VisualElement],
    settle_written: bool,
    written: &mut usize,
) -> Result<()> {
    for (idx, e) in order.iter().enumerate() {
        let slot = offset + idx;
        highlight(v, step, [slot]).await?;

        v[slot] = VisualElement {
            value: e.value,
            comparing: true,
            sorted: settle_written,
        };
        *written += 1;

        step.publish(v)?;
        step.tick().await?;
        release(v, step, [slot])?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{from_values, values};
    use crate::error::SortError;
    use crate::step::{Snapshot, SnapshotSink, SinkClosed};

    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    /// Fires the token once `limit` snapshots went through.
    struct CancelAfter {
        token: CancellationToken,
        limit: usize,
        seen: usize,
    }

    impl SnapshotSink for CancelAfter {
        fn publish(&mut self, _snapshot: Snapshot) -> std::result::Result<(), SinkClosed> {
            self.seen += 1;
            if self.seen >= self.limit {
                self.token.cancel();
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn compare_exchange_stages_a_swap() {
        let mut sink: Vec<Snapshot> = Vec::new();
        let mut v = from_values(&[2, 1]);
        {
            let mut step = Stepper::new(&mut sink, CancellationToken::new(), Duration::ZERO);
            assert!(compare_exchange(&mut v, &mut step, 0, 1).await.unwrap());
            assert!(!compare_exchange(&mut v, &mut step, 0, 1).await.unwrap());
        }

        // highlight, swap, release, then highlight, release.
        assert_eq!(sink.len(), 5);
        assert!(sink[0].iter().all(|e| e.comparing));
        assert_eq!(sink[0].values(), vec![2, 1]);
        assert_eq!(sink[1].values(), vec![1, 2]);
        assert!(sink[2].iter().all(|e| !e.comparing));
        assert_eq!(values(&v), vec![1, 2]);
    }

    #[tokio::test]
    async fn write_back_restores_permutation_on_cancel() {
        let token = CancellationToken::new();
        let mut sink = CancelAfter {
            token: token.clone(),
            limit: 4,
            seen: 0,
        };

        let mut v = from_values(&[9, 9, 9, 9]);
        let order = from_values(&[1, 2, 3, 4]);
        let result = {
            let mut step = Stepper::new(&mut sink, token, Duration::ZERO);
            write_back(&mut v, &mut step, 0, &order, false).await
        };

        assert_eq!(result, Err(SortError::Cancelled));
        assert_eq!(values(&v), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn finish_marks_everything() {
        let mut sink: Vec<Snapshot> = Vec::new();
        let mut v = from_values(&[3, 1]);
        v[0].comparing = true;
        {
            let mut step = Stepper::new(&mut sink, CancellationToken::new(), Duration::ZERO);
            finish(&mut v, &mut step).unwrap();
        }
        assert!(element::is_finished(&v));
        assert_eq!(sink.len(), 1);
    }
}
