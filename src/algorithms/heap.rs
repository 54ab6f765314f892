use super::{finish, highlight, release, swap};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    let len = v.len();

    for root in (0..len / 2).rev() {
        sift_down(v, step, root, len).await?;
    }

    for end in (1..len).rev() {
        highlight(v, step, [0, end]).await?;
        swap(v, step, 0, end).await?;
        // The maximum of the heap just left it for good.
        v[end].sorted = true;
        release(v, step, [0, end])?;

        sift_down(v, step, 0, end).await?;
    }

    finish(v, step)
}

/// Restores the max-heap property below `root` within `v[..size]`.
async fn sift_down(
    v: &mut [VisualElement],
    step: &mut Stepper<'_>,
    mut root: usize,
    size: usize,
) -> Result<()> {
    loop {
        let left = 2 * root + 1;
        if left >= size {
            return Ok(());
        }
        let right = left + 1;
        let family = move || [root, left, right].into_iter().filter(move |&i| i < size);

        highlight(v, step, family()).await?;

        let mut largest = root;
        if v[left].value > v[largest].value {
            largest = left;
        }
        if right < size && v[right].value > v[largest].value {
            largest = right;
        }

        if largest != root {
            swap(v, step, root, largest).await?;
        }
        release(v, step, family())?;

        if largest == root {
            return Ok(());
        }
        root = largest;
    }
}
