//! Tests for the conjugate gradient state machine against direct solvers on random matrices.
//!
//! These tests verify that stepping conjugate gradient to completion produces solutions that
//! closely match a direct LU solve on small random SPD systems, that it terminates within `n`
//! iterations, and that its search directions stay A-conjugate.

use approx::assert_abs_diff_eq;
use faer::Mat;
use faer::linalg::solvers::SolveCore;
use iteralg::matrix::operator;
use iteralg::{ConjugateGradient, InnerProduct, IterativeAlgorithm, Jacobi};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Helper function to generate a random symmetric positive definite (SPD) matrix `A` and a random right-hand side `b`.
///
/// The SPD matrix is constructed as `A = Mᵀ M + I`, where `M` is a random matrix and `I` is the identity.
/// This ensures that `A` is symmetric and positive definite, suitable for CG.
fn random_spd(n: usize, seed: u64) -> (Mat<f64>, Vec<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<f64> = (0..n * n).map(|_| rng.r#gen()).collect();
    let m = Mat::from_fn(n, n, |i, j| data[j * n + i]);
    let m_t = m.transpose();
    let a = &m_t * &m + Mat::<f64>::identity(n, n);
    let b: Vec<f64> = (0..n).map(|_| rng.r#gen()).collect();
    (a, b)
}

fn direct_solve(a: &Mat<f64>, b: &[f64]) -> Vec<f64> {
    let n = b.len();
    let mut x_direct = b.to_vec();
    let lus = faer::linalg::solvers::FullPivLu::new(a.as_ref());
    let x_mat = faer::MatMut::from_column_major_slice_mut(&mut x_direct, n, 1);
    lus.solve_in_place_with_conj(faer::Conj::No, x_mat);
    x_direct
}

/// Test that CG, run for `n` steps, matches the direct LU solution on a random SPD system.
#[test]
fn cg_vs_direct_on_spd() {
    let n = 10;
    let (a, b) = random_spd(n, 42);
    let x_direct = direct_solve(&a, &b);

    let mut x_cg = vec![0.0; n];
    let mut solver = ConjugateGradient::new(operator(&a), b.clone(), &mut x_cg).with_max_iter(n);
    let stats = solver.run().unwrap();
    assert!(stats.iterations <= n);
    drop(solver);

    // Compare each element of the solutions
    for i in 0..n {
        assert_abs_diff_eq!(x_cg[i], x_direct[i], epsilon = 1e-6);
    }
}

/// Jacobi-preconditioned CG reaches the same solution.
#[test]
fn pcg_vs_direct_on_spd() {
    let n = 8;
    let (a, b) = random_spd(n, 7);
    let x_direct = direct_solve(&a, &b);

    let mut x_pcg = vec![0.0; n];
    let mut solver = ConjugateGradient::new(operator(&a), b.clone(), &mut x_pcg)
        .with_preconditioner(Jacobi::from_matrix(&a))
        .with_max_iter(n);
    solver.run().unwrap();
    drop(solver);

    for i in 0..n {
        assert_abs_diff_eq!(x_pcg[i], x_direct[i], epsilon = 1e-6);
    }
}

/// Every pair of search directions is A-conjugate: pᵢᵀ A pⱼ ≈ 0 for i ≠ j.
#[test]
fn search_directions_are_conjugate() {
    let n = 6;
    let (a, b) = random_spd(n, 3);
    let apply = operator(&a);
    let mut x = vec![0.0; n];
    let mut solver = ConjugateGradient::new(operator(&a), b, &mut x).with_max_iter(n);

    solver.init().unwrap();
    let mut directions = vec![solver.direction().unwrap().clone()];
    while !solver.done() {
        solver.update().unwrap();
        if solver.iteration() < solver.max_iter() {
            directions.push(solver.direction().unwrap().clone());
        }
    }
    solver.cleanup();
    assert_eq!(directions.len(), n);

    let a_dirs: Vec<Vec<f64>> = directions.iter().map(|p| apply(p).unwrap()).collect();
    for i in 0..n {
        for j in 0..n {
            if i == j {
                continue;
            }
            let scale = (directions[i].dot(&a_dirs[i]) * directions[j].dot(&a_dirs[j])).sqrt();
            let rel = directions[i].dot(&a_dirs[j]).abs() / scale;
            assert!(rel < 1e-6, "p{i}ᵀ A p{j} / scale = {rel:e}");
        }
    }
}

/// The residual estimate √(rᵀr) drops to round-off level after `n` steps.
///
/// Shifting `Mᵀ M + I` by `4n·I` makes it diagonally dominant, so round-off in the
/// recurrence stays far below the tolerance.
#[test]
fn residual_vanishes_within_n_iterations() {
    let n = 10;
    let (m, b) = random_spd(n, 99);
    let shift = 4.0 * n as f64;
    let a = Mat::from_fn(n, n, |i, j| if i == j { m[(i, j)] + shift } else { m[(i, j)] });
    let b_norm = b.norm();
    let mut x = vec![0.0; n];
    let mut solver = ConjugateGradient::new(operator(&a), b.clone(), &mut x).with_max_iter(n + 1);
    solver.init().unwrap();
    while !solver.done() && solver.iteration() < n {
        solver.update().unwrap();
    }
    assert!(solver.residual() <= 1e-8 * b_norm, "residual = {:e}", solver.residual());
    solver.cleanup();
    drop(solver);

    let mut r = operator(&a)(&x).unwrap();
    for (ri, bi) in r.iter_mut().zip(&b) {
        *ri = bi - *ri;
    }
    assert!(r.norm() <= 1e-8 * b_norm);
}
