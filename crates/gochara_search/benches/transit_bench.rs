use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gochara_ephem::{AnalyticProvider, Body, PositionFlags, TableBuilder, TabulatedProvider};
use gochara_search::{
    ChainPolicy, SearchDirection, SequenceRequest, SolverConfig, TransitQuery, generate_sequence,
    solve_transit,
};
use gochara_vedic::AyanamshaSystem;

const JD: f64 = 2_460_310.5;

fn solve_bench(c: &mut Criterion) {
    let flags = PositionFlags::sidereal_true(AyanamshaSystem::Lahiri);
    let cfg = SolverConfig::default();
    let table = TableBuilder::new(JD, JD + 90.0)
        .with_bodies(&[Body::Sun, Body::Moon, Body::Mercury])
        .build(&AnalyticProvider)
        .expect("table should build");
    let tabulated = TabulatedProvider::from_table(table);

    let mut group = c.benchmark_group("solve_transit");
    for body in [Body::Sun, Body::Moon, Body::Mercury] {
        let q = TransitQuery::new(body, flags, 0.0, JD + 1.5, SearchDirection::Forward);
        group.bench_function(format!("analytic_{}", body.name()), |b| {
            b.iter(|| solve_transit(&AnalyticProvider, black_box(&q), &cfg).expect("solves"))
        });
        group.bench_function(format!("tabulated_{}", body.name()), |b| {
            b.iter(|| solve_transit(&tabulated, black_box(&q), &cfg).expect("solves"))
        });
    }
    group.finish();
}

fn sequence_bench(c: &mut Criterion) {
    let flags = PositionFlags::sidereal_true(AyanamshaSystem::Lahiri);
    let cfg = SolverConfig::default();
    let req = SequenceRequest::new(Body::Moon, flags, 0.0, JD, 24);

    let mut group = c.benchmark_group("generate_sequence");
    group.sample_size(20);
    group.bench_function("moon_24_previous", |b| {
        b.iter(|| generate_sequence(&AnalyticProvider, black_box(&req), &cfg).expect("valid"))
    });
    let independent = req.with_chain(ChainPolicy::FromReference);
    group.bench_function("moon_24_reference_serial", |b| {
        b.iter(|| generate_sequence(&AnalyticProvider, black_box(&independent), &cfg).expect("valid"))
    });
    let parallel = independent.with_parallel(true);
    group.bench_function("moon_24_reference_parallel", |b| {
        b.iter(|| generate_sequence(&AnalyticProvider, black_box(&parallel), &cfg).expect("valid"))
    });
    group.finish();
}

criterion_group!(benches, solve_bench, sequence_bench);
criterion_main!(benches);
