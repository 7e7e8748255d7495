//! Quadrature building blocks for finite element reference domains.
//!
//! Rules are stored as pairs `(weights, points)`. Rules of a dimension only known at runtime use
//! [`DynRule`], and can be grown one dimension at a time by [`collapsed::extrude`] (product with
//! the unit interval) and [`collapsed::cone`] (collapsed product with an apex).

pub mod collapsed;
pub mod univariate;

/// A D-dimensional point.
pub type Point<const D: usize> = [f64; D];

/// A D-dimensional rule.
pub type Rule<const D: usize> = (Vec<f64>, Vec<Point<D>>);

/// A rule whose dimension is only known at runtime.
pub type DynRule = (Vec<f64>, Vec<Vec<f64>>);

/// Integrates the given function with the given rule.
pub fn integrate<F>(rule: &DynRule, f: F) -> f64
where
    F: Fn(&[f64]) -> f64,
{
    let (weights, points) = rule;
    weights
        .iter()
        .zip(points)
        .map(|(w, x)| w * f(x))
        .sum()
}

/// The rule for the zero-dimensional reference point.
pub fn point() -> DynRule {
    (vec![1.0], vec![Vec::new()])
}
