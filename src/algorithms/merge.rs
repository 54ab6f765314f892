//! Top-down merge sort. Each merge rebuilds its range from scratch copies of the two halves.

use futures::future::{BoxFuture, FutureExt};

use super::{finish, highlight, release, write_back};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    let len = v.len();
    if len > 1 {
        merge_sort(v, step, 0, len - 1).await?;
    }

    finish(v, step)
}

fn merge_sort<'a, 'b: 'a>(
    v: &'a mut [VisualElement],
    step: &'a mut Stepper<'b>,
    left: usize,
    right: usize,
) -> BoxFuture<'a, Result<()>> {
    async move {
        if left >= right {
            return Ok(());
        }

        let mid = left + (right - left) / 2;
        merge_sort(v, step, left, mid).await?;
        merge_sort(v, step, mid + 1, right).await?;
        merge(v, step, left, mid, right).await
    }
    .boxed()
}

async fn merge(
    v: &mut [VisualElement],
    step: &mut Stepper<'_>,
    left: usize,
    mid: usize,
    right: usize,
) -> Result<()> {
    let merged = merged_run(&v[left..=mid], &v[mid + 1..=right]);
    // Only the outermost merge places elements where they finally belong.
    let outermost = left == 0 && right == v.len() - 1;

    highlight(v, step, left..=right).await?;
    write_back(v, step, left, &merged, outermost).await?;
    release(v, step, left..=right)
}

/// Stable merge of two ordered runs, flags stripped.
fn merged_run(lhs: &[VisualElement], rhs: &[VisualElement]) -> Vec<VisualElement> {
    let mut out = Vec::with_capacity(lhs.len() + rhs.len());
    let (mut i, mut j) = (0, 0);

    while i < lhs.len() && j < rhs.len() {
        if lhs[i].value <= rhs[j].value {
            out.push(lhs[i].at_rest());
            i += 1;
        } else {
            out.push(rhs[j].at_rest());
            j += 1;
        }
    }
    out.extend(lhs[i..].iter().map(VisualElement::at_rest));
    out.extend(rhs[j..].iter().map(VisualElement::at_rest));

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{from_values, values};

    #[test]
    fn merged_run_is_stable_and_ordered() {
        let lhs = from_values(&[1, 4, 4, 9]);
        let rhs = from_values(&[2, 4, 10]);
        assert_eq!(values(&merged_run(&lhs, &rhs)), vec![1, 2, 4, 4, 4, 9, 10]);
        assert_eq!(values(&merged_run(&[], &rhs)), vec![2, 4, 10]);
    }
}
