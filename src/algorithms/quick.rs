//! Quick sort with Lomuto partitioning around the last element.

use futures::future::{BoxFuture, FutureExt};

use super::{finish, highlight, release, settle, swap};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    if !v.is_empty() {
        let high = v.len() - 1;
        quick_sort(v, step, 0, high).await?;
    }

    finish(v, step)
}

fn quick_sort<'a, 'b: 'a>(
    v: &'a mut [VisualElement],
    step: &'a mut Stepper<'b>,
    low: usize,
    high: usize,
) -> BoxFuture<'a, Result<()>> {
    async move {
        if low == high {
            return settle(v, step, low);
        }

        let pivot = partition(v, step, low, high).await?;
        // Everything left of the pivot is smaller, nothing right of it is.
        settle(v, step, pivot)?;

        if pivot > low {
            quick_sort(v, step, low, pivot - 1).await?;
        }
        if pivot < high {
            quick_sort(v, step, pivot + 1, high).await?;
        }

        Ok(())
    }
    .boxed()
}

async fn partition(
    v: &mut [VisualElement],
    step: &mut Stepper<'_>,
    low: usize,
    high: usize,
) -> Result<usize> {
    let pivot = v[high].value;
    highlight(v, step, [high]).await?;

    let mut store = low;
    for j in low..high {
        highlight(v, step, [j]).await?;

        if v[j].value < pivot {
            if store != j {
                highlight(v, step, [store]).await?;
                swap(v, step, store, j).await?;
                release(v, step, [store])?;
            }
            store += 1;
        }

        release(v, step, [j])?;
    }

    if store != high {
        highlight(v, step, [store]).await?;
        swap(v, step, store, high).await?;
    }
    release(v, step, [store, high])?;

    Ok(store)
}
