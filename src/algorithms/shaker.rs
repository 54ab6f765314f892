use super::{compare_exchange, finish, settle};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

/// Cocktail shaker sort: bubble passes alternating direction, settling one element at each end.
pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    let mut start = 0;
    let mut end = v.len();

    while start + 1 < end {
        let mut swapped = false;
        for i in start..end - 1 {
            swapped |= compare_exchange(v, step, i, i + 1).await?;
        }
        end -= 1;
        settle(v, step, end)?;

        if !swapped {
            break;
        }

        swapped = false;
        for i in (start..end - 1).rev() {
            swapped |= compare_exchange(v, step, i, i + 1).await?;
        }
        settle(v, step, start)?;
        start += 1;

        if !swapped {
            break;
        }
    }

    finish(v, step)
}
