use futures::future::{BoxFuture, FutureExt};

use super::{compare_exchange, finish};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    if v.len() > 1 {
        let end = v.len() - 1;
        stooge(v, step, 0, end).await?;
    }

    finish(v, step)
}

/// Sorts `v[start..=end]`: fix the endpoints, then the first two thirds, the last two thirds and
/// the first two thirds again.
fn stooge<'a, 'b: 'a>(
    v: &'a mut [VisualElement],
    step: &'a mut Stepper<'b>,
    start: usize,
    end: usize,
) -> BoxFuture<'a, Result<()>> {
    async move {
        if start >= end {
            return Ok(());
        }

        compare_exchange(v, step, start, end).await?;

        let len = end - start + 1;
        if len > 2 {
            let third = len / 3;
            stooge(v, step, start, end - third).await?;
            stooge(v, step, start + third, end).await?;
            stooge(v, step, start, end - third).await?;
        }

        Ok(())
    }
    .boxed()
}
