//! Input shapes for generating arrays, for the controller as well as tests and benchmarks.

use std::env;
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};

use rand::distributions::Uniform;
use rand::prelude::*;

use once_cell::sync::OnceCell;

/// Bar heights the presentation layer can draw. Generated values fall in here.
pub const VALUE_RANGE: Range<u32> = 10..410;

// --- Public ---

pub fn random(size: usize) -> Vec<u32> {
    //     .
    // : . : :
    // :.:::.::

    random_values(&mut new_seed(), size)
}

/// `size` values drawn uniformly from [`VALUE_RANGE`] using `rng`.
pub fn random_values<R: Rng + ?Sized>(rng: &mut R, size: usize) -> Vec<u32> {
    let dist = Uniform::from(VALUE_RANGE);
    (0..size).map(|_| dist.sample(rng)).collect()
}

pub fn random_uniform<R>(size: usize, range: R) -> Vec<u32>
where
    R: Into<Uniform<u32>>,
{
    // :.:.:.::
    let mut rng = new_seed();
    let dist: Uniform<u32> = range.into();

    (0..size).map(|_| dist.sample(&mut rng)).collect()
}

pub fn all_equal(size: usize) -> Vec<u32> {
    // ......
    // ::::::

    vec![66; size]
}

pub fn ascending(size: usize) -> Vec<u32> {
    //     .:
    //   .:::
    // .:::::

    spread(size).collect()
}

pub fn descending(size: usize) -> Vec<u32> {
    // :.
    // :::.
    // :::::.

    spread(size).rev().collect()
}

pub fn saw_mixed(size: usize, saw_count: usize) -> Vec<u32> {
    // :.  :.    .::.    .:
    // :::.:::..::::::..:::

    if size == 0 {
        return Vec::new();
    }

    let mut rng = new_seed();
    let mut vals = random_values(&mut rng, size);
    let chunk_size = (size / saw_count.max(1)).max(1);

    for chunk in vals.chunks_mut(chunk_size) {
        if rng.gen::<bool>() {
            chunk.sort_unstable();
        } else {
            chunk.sort_unstable_by_key(|&e| std::cmp::Reverse(e));
        }
    }

    vals
}

pub fn pipe_organ(size: usize) -> Vec<u32> {
    //   .:.
    // .:::::.

    let mut vals = random(size);

    vals[..size / 2].sort_unstable();
    vals[size / 2..].sort_unstable_by_key(|&e| std::cmp::Reverse(e));

    vals
}

pub fn few_unique(size: usize) -> Vec<u32> {
    // :. :. .:
    // ::.::.::

    random_uniform(size, 100u32..=103)
}

static USE_FIXED_SEED: AtomicBool = AtomicBool::new(true);

/// Every call to [`random_init_seed`] returns a fresh seed from here on.
pub fn disable_fixed_seed() {
    USE_FIXED_SEED.store(false, Ordering::Release);
}

/// One seed per process, unless disabled. `OVERRIDE_SEED` pins it for reproducing a failure.
pub fn random_init_seed() -> u64 {
    if USE_FIXED_SEED.load(Ordering::Acquire) {
        static SEED: OnceCell<u64> = OnceCell::new();
        *SEED.get_or_init(|| {
            env::var("OVERRIDE_SEED")
                .ok()
                .and_then(|raw| raw.parse::<u64>().ok())
                .unwrap_or_else(|| thread_rng().gen())
        })
    } else {
        thread_rng().gen()
    }
}

// --- Private ---

fn new_seed() -> StdRng {
    StdRng::seed_from_u64(random_init_seed())
}

/// `size` strictly increasing values, spaced evenly across the value range when they fit.
fn spread(size: usize) -> impl DoubleEndedIterator<Item = u32> {
    let span = (VALUE_RANGE.end - VALUE_RANGE.start) as usize;
    let step = (span / size.max(1)).max(1) as u32;

    (0..size as u32).map(move |i| VALUE_RANGE.start + i * step)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_stay_drawable() {
        for v in [random(300), saw_mixed(300, 7), pipe_organ(300), few_unique(300)] {
            assert_eq!(v.len(), 300);
            assert!(v.iter().all(|x| VALUE_RANGE.contains(x)));
        }
    }

    #[test]
    fn ordered_shapes() {
        let up = ascending(50);
        assert!(up.windows(2).all(|w| w[0] < w[1]));
        assert!(up.iter().all(|x| VALUE_RANGE.contains(x)));

        let mut down = descending(50);
        down.reverse();
        assert_eq!(down, up);

        assert!(ascending(0).is_empty());
        assert_eq!(all_equal(3), vec![66, 66, 66]);
    }

    #[test]
    fn pipe_organ_rises_then_falls() {
        let v = pipe_organ(20);
        assert!(v[..10].windows(2).all(|w| w[0] <= w[1]));
        assert!(v[10..].windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn same_seed_same_values() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(random_values(&mut a, 16), random_values(&mut b, 16));
    }
}
