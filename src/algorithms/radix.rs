//! LSD radix sort, base 10.

use super::{finish, highlight, release, write_back};
use crate::element::VisualElement;
use crate::error::Result;
use crate::step::Stepper;

pub async fn sort(v: &mut [VisualElement], step: &mut Stepper<'_>) -> Result<()> {
    let Some(max) = v.iter().map(|e| e.value).max() else {
        return finish(v, step);
    };

    let digits = digit_count(max);
    let mut place = 1u64;
    for pass in 1..=digits {
        let order = distribute(v, step, place).await?;
        // The last pass writes every element to its final slot.
        write_back(v, step, 0, &order, pass == digits).await?;
        place *= 10;
    }

    finish(v, step)
}

/// Reads every element once and returns them stably ordered by the digit at `place`.
async fn distribute(
    v: &mut [VisualElement],
    step: &mut Stepper<'_>,
    place: u64,
) -> Result<Vec<VisualElement>> {
    let mut buckets: [Vec<VisualElement>; 10] = Default::default();

    for i in 0..v.len() {
        highlight(v, step, [i]).await?;
        let digit = (u64::from(v[i].value) / place % 10) as usize;
        buckets[digit].push(v[i].at_rest());
        release(v, step, [i])?;
    }

    Ok(buckets.into_iter().flatten().collect())
}

fn digit_count(mut n: u32) -> u32 {
    let mut digits = 1;
    while n >= 10 {
        n /= 10;
        digits += 1;
    }
    digits
}
