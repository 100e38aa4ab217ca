use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use herald_events::{EventHub, Handler, expand_namespaces, split_event_list};
use std::hint::black_box;

// ============================================================================
// Benchmark: Name Parsing
// ============================================================================

fn bench_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");

    group.bench_function("split_single", |b| {
        b.iter(|| black_box(split_event_list(black_box("order:created"))));
    });

    group.bench_function("split_compound", |b| {
        b.iter(|| black_box(split_event_list(black_box("created, paid  shipped,refunded"))));
    });

    group.bench_function("expand_deep", |b| {
        b.iter(|| black_box(expand_namespaces(black_box("tenant:order:item:price:changed"))));
    });

    group.finish();
}

// ============================================================================
// Benchmark: Dispatch
// ============================================================================

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    for handlers in [1usize, 8, 64] {
        let hub = EventHub::<u64>::new();
        for _ in 0..handlers {
            hub.bind("order:created", &Handler::new(|_, payload| {
                black_box(payload);
                Ok(())
            }));
        }

        group.bench_with_input(BenchmarkId::new("exact", handlers), &hub, |b, hub| {
            b.iter(|| hub.trigger(black_box("order:created"), Some(&1)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("descendant", handlers), &hub, |b, hub| {
            b.iter(|| hub.trigger(black_box("order:created:eu:retail"), Some(&1)).unwrap());
        });
    }

    let hub = EventHub::<u64>::new();
    group.bench_function("miss", |b| {
        b.iter(|| hub.trigger(black_box("nobody:listens:here"), None).unwrap());
    });

    group.finish();
}

// ============================================================================
// Benchmark: Registry Mutation
// ============================================================================

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    group.bench_function("bind_unbind_compound", |b| {
        let hub = EventHub::<()>::new();
        let handler = Handler::new(|_, _| Ok(()));
        b.iter(|| {
            hub.bind(black_box("a, b, c"), &handler);
            hub.unbind(black_box("a, b, c"), &handler);
        });
    });

    group.bench_function("once_cycle", |b| {
        let hub = EventHub::<()>::new();
        let handler = Handler::new(|_, _| Ok(()));
        b.iter(|| {
            hub.once("ready", &handler);
            hub.trigger("ready", None).unwrap()
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parsing, bench_dispatch, bench_registry);
criterion_main!(benches);
