//! Rules for domains grown one dimension at a time from a lower-dimensional base domain.
//!
//! Given a rule for a base domain `B` with coordinates in `R^m`, [`extrude`] produces a rule for
//! the prism `B × [0, 1]` and [`cone`] produces a rule for the pyramid over `B` with apex
//! `e_{m+1}`. The pyramid is integrated through the collapsed (Duffy) map
//! `(b, z) -> (b (1 - z), z)`, whose Jacobian determinant is `(1 - z)^m`.

use crate::univariate::{gauss_unit_interval, num_points_for_strength};
use crate::DynRule;

/// Tensor product of the base rule with a Gauss rule on `[0, 1]` of the given strength.
pub fn extrude(base: &DynRule, strength: usize) -> DynRule {
    let (base_weights, base_points) = base;
    let (z_weights, z_points) = gauss_unit_interval(num_points_for_strength(strength));

    let mut weights = Vec::with_capacity(base_weights.len() * z_weights.len());
    let mut points = Vec::with_capacity(weights.capacity());
    for (wb, b) in base_weights.iter().zip(base_points) {
        for (wz, [z]) in z_weights.iter().zip(&z_points) {
            let mut p = b.clone();
            p.push(*z);
            weights.push(wb * wz);
            points.push(p);
        }
    }
    (weights, points)
}

/// Collapsed product rule for the pyramid over a base domain of dimension `base_dim`.
///
/// A polynomial of degree `p` on the pyramid becomes a polynomial of degree at most `p + m` in
/// the collapsed coordinate, which the Gauss rule in `z` accounts for.
pub fn cone(base: &DynRule, base_dim: usize, strength: usize) -> DynRule {
    let (base_weights, base_points) = base;
    let (z_weights, z_points) = gauss_unit_interval(num_points_for_strength(strength + base_dim));

    let mut weights = Vec::with_capacity(base_weights.len() * z_weights.len());
    let mut points = Vec::with_capacity(weights.capacity());
    for (wb, b) in base_weights.iter().zip(base_points) {
        debug_assert_eq!(b.len(), base_dim);
        for (wz, [z]) in z_weights.iter().zip(&z_points) {
            let scale = 1.0 - z;
            let mut p: Vec<f64> = b.iter().map(|x| x * scale).collect();
            p.push(*z);
            weights.push(wb * wz * scale.powi(base_dim as i32));
            points.push(p);
        }
    }
    (weights, points)
}
