use super::{compare_exchange, finish};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

/// Odd-even transposition sort.
pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    let last = v.len().saturating_sub(1);
    let mut ordered = false;

    while !ordered {
        ordered = true;

        for i in (1..last).step_by(2) {
            if compare_exchange(v, step, i, i + 1).await? {
                ordered = false;
            }
        }

        for i in (0..last).step_by(2) {
            if compare_exchange(v, step, i, i + 1).await? {
                ordered = false;
            }
        }
    }

    finish(v, step)
}
