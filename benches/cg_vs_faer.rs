use criterion::{black_box, Criterion, criterion_group, criterion_main};
use faer::Mat;
use faer::linalg::solvers::SolveCore;
use iteralg::matrix::operator;
use iteralg::{AlgOptions, ConjugateGradient, IterativeAlgorithm, Jacobi};

fn bench_cg_vs_faer(c: &mut Criterion) {
    let n = 200;
    // diagonally dominant SPD: A = I·(n + 1) + S, S symmetric with entries in [-1, 1]
    let a = Mat::from_fn(n, n, |i, j| {
        let s = ((i + j) as f64).sin() * ((i * j) as f64).cos();
        if i == j { n as f64 + 1.0 + s } else { s }
    });
    let b: Vec<f64> = (0..n).map(|i| (i as f64).cos()).collect();
    let quiet = AlgOptions::new().with_progress(false).with_max_iter(n);

    c.bench_function("iteralg CG", |ben| {
        ben.iter(|| {
            let mut x = vec![0.0; n];
            let mut solver = ConjugateGradient::new(operator(&a), black_box(b.clone()), &mut x)
                .with_options(quiet.clone());
            let _stats = solver.run().unwrap();
        })
    });

    c.bench_function("iteralg Jacobi-PCG", |ben| {
        let pc = Jacobi::from_matrix(&a);
        ben.iter(|| {
            let mut x = vec![0.0; n];
            let mut solver = ConjugateGradient::new(operator(&a), black_box(b.clone()), &mut x)
                .with_preconditioner(pc.clone())
                .with_options(quiet.clone());
            let _stats = solver.run().unwrap();
        })
    });

    c.bench_function("faer raw LU", |ben| {
        ben.iter(|| {
            let factor = faer::linalg::solvers::FullPivLu::new(a.as_ref());
            let mut y = b.clone();
            let n = y.len();
            let y_mat = faer::MatMut::from_column_major_slice_mut(&mut y, n, 1);
            factor.solve_in_place_with_conj(faer::Conj::No, y_mat);
        })
    });
}

criterion_group!(benches, bench_cg_vs_faer);
criterion_main!(benches);
