use super::{compare_exchange, finish};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    let mut pos = 1;

    while pos < v.len() {
        if compare_exchange(v, step, pos - 1, pos).await? {
            pos = (pos - 1).max(1);
        } else {
            pos += 1;
        }
    }

    finish(v, step)
}
