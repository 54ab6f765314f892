use super::{compare_exchange, finish};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

/// Shell sort over the halving gap sequence `n/2, n/4, .., 1`, using gapped exchanges.
pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    let len = v.len();
    let mut gap = len / 2;

    while gap > 0 {
        for i in gap..len {
            let mut j = i;
            while j >= gap && compare_exchange(v, step, j - gap, j).await? {
                j -= gap;
            }
        }
        gap /= 2;
    }

    finish(v, step)
}
