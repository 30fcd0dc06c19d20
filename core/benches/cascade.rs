use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use tilesweep_core::{BoardConfig, Session};

fn open_board(c: &mut Criterion) {
    let mut group = c.benchmark_group("cascade");

    for (name, config) in [
        ("beginner", BoardConfig::BEGINNER),
        ("intermediate", BoardConfig::INTERMEDIATE),
        ("expert", BoardConfig::EXPERT),
    ] {
        group.bench_function(name, |b| {
            b.iter_batched(
                || Session::new(config, 0xC0FFEE).unwrap(),
                |mut session| black_box(session.reveal(0).unwrap()),
                BatchSize::SmallInput,
            )
        });
    }

    let sparse = BoardConfig::new(200, 200, 0.01).unwrap();
    group.bench_function("sparse_200x200", |b| {
        b.iter_batched(
            || Session::new(sparse, 0xC0FFEE).unwrap(),
            |mut session| black_box(session.reveal(20_100).unwrap()),
            BatchSize::LargeInput,
        )
    });

    group.finish();
}

criterion_group!(benches, open_board);
criterion_main!(benches);
