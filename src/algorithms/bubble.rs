use super::{compare_exchange, finish, settle};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    let len = v.len();

    for i in 0..len.saturating_sub(1) {
        let mut swapped = false;

        for j in 0..len - i - 1 {
            swapped |= compare_exchange(v, step, j, j + 1).await?;
        }

        // The largest remaining element has bubbled up to the trailing boundary.
        settle(v, step, len - i - 1)?;

        if !swapped {
            break;
        }
    }

    finish(v, step)
}
