use super::{compare_exchange, finish};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    let len = v.len();
    let mut gap = len;
    let mut swapped = true;

    while gap > 1 || swapped {
        // Shrink factor 1.3.
        gap = (gap * 10 / 13).max(1);
        swapped = false;

        for i in 0..len.saturating_sub(gap) {
            swapped |= compare_exchange(v, step, i, i + gap).await?;
        }
    }

    finish(v, step)
}
