use super::{finish, highlight, release};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    for i in 1..v.len() {
        let key = v[i].value;
        let mut hole = i;

        let shifted = shift_into_place(v, step, key, &mut hole).await;

        // While shifting, the key only lives in `key`. It goes back into the array before any
        // error leaves this frame.
        v[hole].value = key;
        shifted?;

        highlight(v, step, [hole]).await?;
        release(v, step, [hole])?;
    }

    finish(v, step)
}

/// Moves larger elements one slot right until the hole sits where `key` belongs.
async fn shift_into_place(
    v: &mut [VisualElement],
    step: &mut Stepper<'_>,
    key: u32,
    hole: &mut usize,
) -> Result<()> {
    while *hole > 0 {
        let prev = *hole - 1;
        highlight(v, step, [prev, *hole]).await?;

        if v[prev].value <= key {
            return release(v, step, [prev, *hole]);
        }

        v[*hole].value = v[prev].value;
        step.publish(v)?;
        step.tick().await?;

        release(v, step, [prev, *hole])?;
        *hole = prev;
    }

    Ok(())
}
