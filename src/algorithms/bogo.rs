//! Bogo sort: shuffle until ordered, within a fixed attempt budget.

use rand::Rng;
use tracing::trace;

use super::{finish, highlight, release, settle, swap};
use crate::element::{self, VisualElement};
use crate::error::{Result, SortError};
use crate::step::Stepper;

/// Source of shuffle positions.
pub trait Shuffler {
    /// Returns a uniformly chosen index in `0..upper`. `upper` is never zero.
    fn pick(&mut self, upper: usize) -> usize;
}

/// Adapts any [`rand::Rng`] into a [`Shuffler`].
#[derive(Clone, Debug)]
pub struct RngShuffler<R>(pub R);

impl<R: Rng> Shuffler for RngShuffler<R> {
    fn pick(&mut self, upper: usize) -> usize {
        self.0.gen_range(0..upper)
    }
}

/// Shuffles until ordered. After `max_attempts` shuffles without success the run ends with
/// [`SortError::Exhausted`], leaving `v` in its last shuffled state with no comparing marks.
pub async fn sort<S>(
    v: &mut [VisualElement],
    step: &mut Stepper<'_>,
    shuffler: &mut S,
    max_attempts: u32,
) -> Result<()>
where
    S: Shuffler + Send,
{
    let mut attempts = 0;

    while !element::is_ordered(v) {
        if attempts == max_attempts {
            element::clear_comparing(v);
            step.publish(v)?;
            return Err(SortError::Exhausted { attempts });
        }

        attempts += 1;
        shuffle(v, step, shuffler).await?;
        trace!(attempts, "shuffled");
    }

    for i in 0..v.len() {
        settle(v, step, i)?;
        step.tick().await?;
    }

    finish(v, step)
}

/// One staged Fisher-Yates pass.
async fn shuffle<S>(v: &mut [VisualElement], step: &mut Stepper<'_>, shuffler: &mut S) -> Result<()>
where
    S: Shuffler + Send,
{
    for i in (1..v.len()).rev() {
        let j = shuffler.pick(i + 1);
        highlight(v, step, [i, j]).await?;
        swap(v, step, i, j).await?;
        release(v, step, [i, j])?;
    }

    Ok(())
}
