use super::{finish, highlight, release, swap};
use crate::element::VisualElement;
use crate::error::{Result, SortError};
use crate::registry::Precondition;
use crate::step::Stepper;

/// Iterative bitonic sorting network. Only defined for power-of-two lengths; any other length is
/// rejected before the first publish.
pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    let len = v.len();
    if !Precondition::PowerOfTwoLength.holds(len) {
        return Err(SortError::PreconditionFailed(
            Precondition::PowerOfTwoLength,
        ));
    }

    let mut k = 2;
    while k <= len {
        let mut j = k / 2;
        while j > 0 {
            for i in 0..len {
                let partner = i ^ j;
                if partner <= i {
                    continue;
                }

                let ascending = (i & k) == 0;
                highlight(v, step, [i, partner]).await?;

                let out_of_order = if ascending {
                    v[i].value > v[partner].value
                } else {
                    v[i].value < v[partner].value
                };
                if out_of_order {
                    swap(v, step, i, partner).await?;
                }

                release(v, step, [i, partner])?;
            }
            j /= 2;
        }
        k *= 2;
    }

    finish(v, step)
}
