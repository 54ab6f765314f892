use std::env;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use sort_anim::{element, patterns, run, Algorithm, NullSink, RunConfig};

const BENCH_SIZES: [usize; 3] = [16, 64, 128];

/// Measures the step machinery: every publish copies the array, every tick yields once.
#[inline(never)]
fn bench_run(
    c: &mut Criterion,
    rt: &Runtime,
    algorithm: Algorithm,
    test_size: usize,
    pattern_name: &str,
    pattern_provider: fn(usize) -> Vec<u32>,
) {
    let config = RunConfig::default().with_delay(Duration::ZERO);

    let batch_size = if test_size > 30 {
        BatchSize::LargeInput
    } else {
        BatchSize::SmallInput
    };

    c.bench_function(
        &format!("{}-{pattern_name}-{test_size}", algorithm.key()),
        |b| {
            b.iter_batched(
                || element::from_values(&pattern_provider(test_size)),
                |seed| {
                    rt.block_on(run(
                        algorithm,
                        black_box(&seed),
                        &config,
                        CancellationToken::new(),
                        &mut NullSink,
                    ))
                },
                batch_size,
            )
        },
    );
}

fn wants(algorithm: Algorithm, test_size: usize) -> bool {
    if algorithm.check(test_size).is_err() {
        return false;
    }

    match algorithm {
        // Only meaningful on tiny inputs.
        Algorithm::Bogo => false,
        Algorithm::Stooge => test_size <= 64,
        _ => true,
    }
}

fn criterion_benchmark(c: &mut Criterion) {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .unwrap();

    // Limit to a single algorithm with BENCH_ALGORITHM=quick-sort.
    let only = env::var("BENCH_ALGORITHM")
        .ok()
        .map(|name| name.parse::<Algorithm>().unwrap());

    let pattern_providers: [(&str, fn(usize) -> Vec<u32>); 3] = [
        ("random", patterns::random),
        ("descending", patterns::descending),
        ("few_unique", patterns::few_unique),
    ];

    for algorithm in Algorithm::ALL {
        if only.is_some_and(|only| only != algorithm) {
            continue;
        }

        for test_size in BENCH_SIZES {
            if !wants(algorithm, test_size) {
                continue;
            }

            for (pattern_name, pattern_provider) in pattern_providers {
                bench_run(c, &rt, algorithm, test_size, pattern_name, pattern_provider);
            }
        }
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
