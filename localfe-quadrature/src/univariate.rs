//! Gauss–Legendre rules for the intervals `[-1, 1]` and `[0, 1]`.

use crate::Rule;
use std::f64::consts::PI;

const MAX_NEWTON_ITERATIONS: usize = 100;

/// Legendre polynomial `p_n` and its predecessor `p_{n-1}` evaluated at a point.
///
/// The derivative formula is singular at |x| == 1, so this is only suitable for the open
/// interval (-1, 1).
#[derive(Debug, Clone, Copy)]
struct Legendre {
    n: usize,
    x: f64,
    p_n: f64,
    p_n_minus_1: f64,
}

impl Legendre {
    fn at(n: usize, x: f64) -> Self {
        // Bonnet's recursion
        //  m p_m(x) = (2m - 1) x p_{m - 1}(x) - (m - 1) p_{m - 2}(x)
        let (mut current, mut previous) = (1.0, 0.0);
        for m in 1..=n {
            let m = m as f64;
            let next = ((2.0 * m - 1.0) * x * current - (m - 1.0) * previous) / m;
            previous = current;
            current = next;
        }
        Self {
            n,
            x,
            p_n: current,
            p_n_minus_1: previous,
        }
    }

    fn value(&self) -> f64 {
        self.p_n
    }

    fn derivative(&self) -> f64 {
        // dp_n/dx (x) = n (x p_n(x) - p_{n - 1}(x)) / (x^2 - 1)
        let n = self.n as f64;
        n * (self.x * self.p_n - self.p_n_minus_1) / (self.x * self.x - 1.0)
    }
}

/// Gauss–Legendre rule with the given number of points on `[-1, 1]`.
///
/// With `n` points, polynomials of degree up to `2n - 1` are integrated exactly.
///
/// # Panics
///
/// Panics if zero points are requested.
pub fn gauss(num_points: usize) -> Rule<1> {
    let n = num_points;
    assert!(n > 0, "number of points must be positive");

    // Roots are symmetric around the origin, so only the non-negative half is computed
    let half = (n + 1) / 2;
    let mut points = vec![[0.0]; n];
    let mut weights = vec![0.0; n];

    for i in 0..half {
        let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
        let mut legendre = Legendre::at(n, x);
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let dx = -legendre.value() / legendre.derivative();
            x += dx;
            legendre = Legendre::at(n, x);
            if dx.abs() <= 1e-15 {
                break;
            }
        }

        let dp = legendre.derivative();
        let w = 2.0 / ((1.0 - x * x) * dp * dp);

        points[i] = [x];
        weights[i] = w;
        points[n - 1 - i] = [-x];
        weights[n - 1 - i] = w;
    }

    (weights, points)
}

/// Gauss–Legendre rule with the given number of points on `[0, 1]`.
pub fn gauss_unit_interval(num_points: usize) -> Rule<1> {
    let (weights, points) = gauss(num_points);
    let weights = weights.into_iter().map(|w| 0.5 * w).collect();
    let points = points.into_iter().map(|[x]| [0.5 * (x + 1.0)]).collect();
    (weights, points)
}

/// The number of Gauss points needed to integrate polynomials of the given degree exactly.
pub fn num_points_for_strength(strength: usize) -> usize {
    strength / 2 + 1
}
