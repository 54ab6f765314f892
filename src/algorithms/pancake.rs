use super::{finish, highlight, release, settle};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    for size in (2..=v.len()).rev() {
        let max = find_max(v, step, size).await?;

        if max != size - 1 {
            flip(v, step, max).await?;
            flip(v, step, size - 1).await?;
        }

        settle(v, step, size - 1)?;
    }

    finish(v, step)
}

/// Scans `v[..size]`, keeping the running maximum highlighted.
async fn find_max(v: &mut [VisualElement], step: &mut Stepper<'_>, size: usize) -> Result<usize> {
    let mut max = 0;
    highlight(v, step, [0]).await?;

    for i in 1..size {
        highlight(v, step, [i]).await?;

        if v[i].value > v[max].value {
            v[max].comparing = false;
            max = i;
        } else {
            v[i].comparing = false;
        }
        step.publish(v)?;
    }

    release(v, step, [max])?;
    Ok(max)
}

/// Reverses the prefix `v[..=k]`.
async fn flip(v: &mut [VisualElement], step: &mut Stepper<'_>, k: usize) -> Result<()> {
    if k == 0 {
        return Ok(());
    }

    highlight(v, step, 0..=k).await?;
    v[..=k].reverse();
    step.publish(v)?;
    step.tick().await?;
    release(v, step, 0..=k)
}
