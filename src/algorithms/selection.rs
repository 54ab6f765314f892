use super::{finish, highlight, release, swap};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    let len = v.len();

    for i in 0..len {
        let mut min = i;

        v[i].comparing = true;
        step.publish(v)?;

        for j in (i + 1)..len {
            highlight(v, step, [j]).await?;

            if v[j].value < v[min].value {
                if min != i {
                    v[min].comparing = false;
                }
                min = j;
            } else {
                v[j].comparing = false;
            }

            step.publish(v)?;
        }

        if min != i {
            swap(v, step, i, min).await?;
        }

        // Everything left of i + 1 is now the i + 1 smallest elements, in order.
        v[i].sorted = true;
        release(v, step, [i, min])?;
    }

    finish(v, step)
}
