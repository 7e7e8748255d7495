use nalgebra::{DMatrix, DVector};

/// Poor man's approx assertion for matrices
#[macro_export]
macro_rules! assert_approx_matrix_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        let diff = $x - $y;

        let max_absdiff = diff.abs().max();
        let approx_eq = max_absdiff <= $tol;

        if !approx_eq {
            println!("abstol: {:e}", $tol);
            println!("left: {}", $x);
            println!("right: {}", $y);
            println!("diff: {:e}", diff);
        }
        assert!(approx_eq);
    }};
}

#[macro_export]
macro_rules! assert_panics {
    ($e:expr) => {{
        use std::panic::catch_unwind;
        use std::stringify;
        let expr_string = stringify!($e);
        let result = catch_unwind(|| $e);
        if result.is_ok() {
            panic!("assert_panics!({}) failed.", expr_string);
        }
    }};
}

/// Approximates the Jacobian of $f: \mathbb{R}^n \rightarrow \mathbb{R}^m$ at `x` with central
/// finite differences of step size `h`.
///
/// The result is the $m \times n$ matrix with entries $J_{ij} = \partial f_i / \partial x_j$.
pub fn approximate_jacobian_fd(m: usize, f: impl Fn(&[f64]) -> DVector<f64>, x: &[f64], h: f64) -> DMatrix<f64> {
    let n = x.len();
    let mut jacobian = DMatrix::zeros(m, n);
    let mut x_perturbed = x.to_vec();
    for j in 0..n {
        // df/dx_j ~ (f(x + h e_j) - f(x - h e_j)) / (2 h)
        x_perturbed[j] = x[j] + h;
        let f_plus = f(&x_perturbed);
        x_perturbed[j] = x[j] - h;
        let f_minus = f(&x_perturbed);
        x_perturbed[j] = x[j];

        assert_eq!(f_plus.len(), m, "Function must have output dimension m");
        jacobian.set_column(j, &((f_plus - f_minus) / (2.0 * h)));
    }
    jacobian
}
