use criterion::{black_box, criterion_group, criterion_main, Criterion};
use nalgebra::Point2;
use signfit_core::{fit, order_quad, solve_affine, Quad, SourceRect};

fn storefront_quad() -> [Point2<f64>; 4] {
    [
        Point2::new(515.0, 262.0),
        Point2::new(112.0, 84.0),
        Point2::new(96.0, 301.0),
        Point2::new(530.0, 140.0),
    ]
}

fn bench_fit(c: &mut Criterion) {
    let source = SourceRect::new(2.4, 0.6).expect("valid rect");
    let picked = storefront_quad();
    let to_world = |p: Point2<f64>| Point2::new(p.x / 64.0 - 5.0, 3.75 - p.y / 64.0);

    c.bench_function("fit/storefront", |b| {
        b.iter(|| fit(black_box(&source), black_box(&picked), to_world))
    });

    let ordered = order_quad(&Quad(picked));
    let src = source.corners();
    c.bench_function("solve_affine", |b| {
        b.iter(|| solve_affine(black_box(&src), black_box(&ordered), 1e-12))
    });
}

criterion_group!(benches, bench_fit);
criterion_main!(benches);
