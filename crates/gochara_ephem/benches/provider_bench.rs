use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gochara_ephem::{
    AnalyticProvider, Body, PositionFlags, PositionProvider, TableBuilder, TabulatedProvider,
};

const JD: f64 = 2_460_310.5;

fn analytic_bench(c: &mut Criterion) {
    let flags = PositionFlags::default();
    let mut group = c.benchmark_group("analytic_position");
    for body in [Body::Sun, Body::Moon, Body::Mars, Body::TrueNode] {
        group.bench_function(body.name(), |b| {
            b.iter(|| {
                AnalyticProvider
                    .position(black_box(body), black_box(JD + 0.25), black_box(flags))
                    .expect("in range")
            })
        });
    }
    group.finish();
}

fn tabulated_bench(c: &mut Criterion) {
    let table = TableBuilder::new(JD, JD + 60.0)
        .with_bodies(&[Body::Moon, Body::Mars])
        .build(&AnalyticProvider)
        .expect("table should build");
    let provider = TabulatedProvider::from_table(table);
    let flags = PositionFlags::default();

    let mut group = c.benchmark_group("tabulated_position");
    for body in [Body::Moon, Body::Mars] {
        group.bench_function(body.name(), |b| {
            b.iter(|| {
                provider
                    .position(black_box(body), black_box(JD + 17.25), black_box(flags))
                    .expect("in range")
            })
        });
    }
    group.finish();
}

fn table_build_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("table_build");
    group.sample_size(10);
    group.bench_function("moon_30d", |b| {
        b.iter(|| {
            TableBuilder::new(JD, JD + 30.0)
                .with_bodies(&[Body::Moon])
                .build(&AnalyticProvider)
                .expect("table should build")
        })
    });
    group.finish();
}

criterion_group!(benches, analytic_bench, tabulated_bench, table_build_bench);
criterion_main!(benches);
