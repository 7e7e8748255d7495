//! Raviart–Thomas elements on simplices of arbitrary dimension and order.
//!
//! The space of order `k` on the reference `n`-simplex is `RT_k = (P_k)^n + x P~_k`, where `P~_k`
//! are the homogeneous polynomials of degree `k`. Its degrees of freedom are
//!
//! - for every facet `F` and every Bernstein polynomial `q` of degree `k` on `F`, the normal
//!   moment `int_F (v . nu_F) q`,
//! - for every component `c` and every Bernstein polynomial `q` of degree `k - 1` on the
//!   simplex, the moment `int_T v_c q` (absent for `k = 0`).
//!
//! Here `nu_F = -grad(lambda_j)` is the outward normal of `F` scaled by the height over the vertex
//! `j` opposite to `F`, and facet integrals are taken over the parametrization of `F` by the
//! reference `(n-1)`-simplex. All moments of barycentric monomials are evaluated in closed form by
//! the Dirichlet formula `int lambda^alpha = alpha! / (|alpha| + m)!` on the reference `m`-simplex,
//! so that the construction is exact whenever the field is.
use crate::basis::{check_order, BasisFactory};
use crate::coefficients::{CoefficientsFactory, LocalCoefficients};
use crate::error::Error;
use crate::finite_element::GenericLocalFiniteElement;
use crate::interpolation::{check_sizes, InterpolationFactory, LocalInterpolation};
use crate::linalg::invert;
use crate::polynomial::{MonomialSet, PolynomialBasis, Variables};
use crate::quadrature::QuadratureRule;
use crate::topology::Topology;
use itertools::izip;
use localfe_traits::Field;
use log::debug;
use nalgebra::{DMatrix, DVector};
use numeric_literals::replace_float_literals;
use rustc_hash::FxHashMap;
use std::marker::PhantomData;

const FAMILY: &str = "Raviart-Thomas";

/// The dimension of the Raviart–Thomas space of the given order on the simplex of the given
/// dimension, `n C(n + k, k) + C(n + k - 1, k)`.
///
/// # Panics
///
/// Panics if the dimension is zero.
pub fn raviart_thomas_size(dim: usize, order: usize) -> usize {
    assert!(dim > 0, "Raviart-Thomas spaces require a positive dimension");
    dim * binomial(dim + order, order) + binomial(dim + order - 1, order)
}

fn binomial(n: usize, k: usize) -> usize {
    (0..k).fold(1, |acc, i| acc * (n - i) / (i + 1))
}

fn check_simplex(topology: &Topology) -> Result<(), Error> {
    if topology.is_simplex() && topology.dimension() > 0 {
        Ok(())
    } else {
        Err(Error::UnsupportedTopology {
            topology: topology.name(),
            family: FAMILY,
        })
    }
}

fn factorials<T: Field>(max: usize) -> Vec<T> {
    let mut table = Vec::with_capacity(max + 1);
    table.push(T::one());
    for i in 1..=max {
        let next = table[i - 1].clone() * T::from_integer(i);
        table.push(next);
    }
    table
}

/// The multinomial coefficient `|alpha|! / alpha!`.
fn multinomial<T: Field>(alpha: &[usize], factorials: &[T]) -> T {
    let total: usize = alpha.iter().sum();
    let mut value = factorials[total].clone();
    for &a in alpha {
        value /= factorials[a].clone();
    }
    value
}

/// `-grad(lambda_j)` for the barycentric coordinate of vertex `j` of the reference simplex.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
fn scaled_outward_normal<T: Field>(dim: usize, opposite_vertex: usize) -> Vec<T> {
    (0..dim)
        .map(|d| {
            if opposite_vertex == 0 {
                1.0
            } else if d + 1 == opposite_vertex {
                -1.0
            } else {
                0.0
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Support {
    /// A facet, given by its index and the vertex opposite to it.
    Facet { facet: usize, opposite_vertex: usize },
    Interior,
}

/// The functional `v -> int (v . direction) scale lambda^exponent` over its support.
#[derive(Debug, Clone, PartialEq)]
struct MomentFunctional<T> {
    support: Support,
    direction: Vec<T>,
    exponent: Vec<usize>,
    scale: T,
}

/// L2 moment functionals of the Raviart–Thomas element.
#[derive(Debug, Clone, PartialEq)]
pub struct MomentInterpolation<T> {
    topology: Topology,
    order: usize,
    functionals: Vec<MomentFunctional<T>>,
}

impl<T: Field> MomentInterpolation<T> {
    pub fn new(topology: &Topology, order: usize) -> Result<Self, Error> {
        check_simplex(topology)?;
        let n = topology.dimension();
        let k = order;
        let factorials = factorials::<T>(k);
        let mut functionals = Vec::new();

        let facet_exponents = Topology::simplex(n - 1).barycentric_exponents(k)?;
        for (facet, vertices) in topology.sub_entities(1).iter().enumerate() {
            let opposite_vertex = (0..=n)
                .find(|v| !vertices.contains(v))
                .expect("Internal error: every facet of a simplex misses exactly one vertex");
            let direction = scaled_outward_normal(n, opposite_vertex);
            for gamma in &facet_exponents {
                let mut exponent = vec![0; n + 1];
                for (&vertex, &g) in vertices.iter().zip(gamma) {
                    exponent[vertex] = g;
                }
                functionals.push(MomentFunctional {
                    support: Support::Facet {
                        facet,
                        opposite_vertex,
                    },
                    direction: direction.clone(),
                    scale: multinomial(gamma, &factorials),
                    exponent,
                });
            }
        }

        if k > 0 {
            let interior_exponents = topology.barycentric_exponents(k - 1)?;
            for c in 0..n {
                let direction = (0..n)
                    .map(|d| if d == c { T::one() } else { T::zero() })
                    .collect::<Vec<_>>();
                for gamma in &interior_exponents {
                    functionals.push(MomentFunctional {
                        support: Support::Interior,
                        direction: direction.clone(),
                        exponent: gamma.clone(),
                        scale: multinomial(gamma, &factorials),
                    });
                }
            }
        }

        Ok(Self {
            topology: topology.clone(),
            order,
            functionals,
        })
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Applies functional `i` to the vector monomial `e_component lambda^beta`.
    ///
    /// The factorial table must cover `|beta| + order + dim`.
    fn moment(&self, i: usize, component: usize, beta: &[usize], factorials: &[T]) -> T {
        let functional = &self.functionals[i];
        let weight = &functional.direction[component];
        if weight.is_zero() {
            return T::zero();
        }
        let n = self.topology.dimension();
        let simplex_dim = match functional.support {
            // The test function is supported on the facet, where lambda_j vanishes
            Support::Facet { opposite_vertex, .. } if beta[opposite_vertex] > 0 => return T::zero(),
            Support::Facet { .. } => n - 1,
            Support::Interior => n,
        };

        let mut total = simplex_dim;
        let mut product = functional.scale.clone() * weight.clone();
        for (&b, &g) in beta.iter().zip(&functional.exponent) {
            product *= factorials[b + g].clone();
            total += b + g;
        }
        product / factorials[total].clone()
    }

    /// Values of all functionals on every vector monomial `e_c m` of the given monomial set.
    ///
    /// Row `i` lists the non-zero entries `(c * M + m, value)` of functional `i`.
    fn moment_table(&self, monomials: &MonomialSet) -> Vec<Vec<(usize, T)>> {
        let n = self.topology.dimension();
        let exponents = monomials.barycentric_exponents();
        let factorials = factorials::<T>(monomials.degree() + self.order + n);
        let m = exponents.len();
        (0..self.functionals.len())
            .map(|i| {
                let mut row = Vec::new();
                for c in 0..n {
                    for (k, beta) in exponents.iter().enumerate() {
                        let value = self.moment(i, c, beta, &factorials);
                        if !value.is_zero() {
                            row.push((c * m + k, value));
                        }
                    }
                }
                row
            })
            .collect()
    }
}

impl<T: Field> LocalInterpolation<T> for MomentInterpolation<T> {
    fn size(&self) -> usize {
        self.functionals.len()
    }

    fn interpolate(&self, f: &dyn Fn(&[T]) -> DVector<T>) -> Vec<T> {
        let n = self.topology.dimension();
        let strength = 2 * self.order + 2;
        let vertices: Vec<Vec<T>> = self
            .topology
            .vertex_coordinates()
            .iter()
            .map(|x| x.iter().map(|&x_i| T::from_integer(x_i)).collect())
            .collect();

        // Quadrature samples (weight, barycentric coordinates, f) for every support
        let facet_rule = QuadratureRule::<T>::for_topology(&Topology::simplex(n - 1), strength);
        let facet_samples: Vec<Vec<(T, Vec<T>, DVector<T>)>> = self
            .topology
            .sub_entities(1)
            .iter()
            .map(|facet_vertices| {
                izip!(facet_rule.weights(), facet_rule.points())
                    .map(|(w, s)| {
                        let mut mu = vec![T::one()];
                        for s_i in s {
                            mu[0] -= s_i.clone();
                            mu.push(s_i.clone());
                        }
                        let mut x = vec![T::zero(); n];
                        for (mu_l, &vertex) in mu.iter().zip(facet_vertices) {
                            for (x_d, v_d) in x.iter_mut().zip(&vertices[vertex]) {
                                *x_d += mu_l.clone() * v_d.clone();
                            }
                        }
                        (w.clone(), barycentric_coordinates(&x), f(&x))
                    })
                    .collect()
            })
            .collect();
        let interior_samples: Vec<(T, Vec<T>, DVector<T>)> = if self.order > 0 {
            let rule = QuadratureRule::<T>::for_topology(&self.topology, strength);
            izip!(rule.weights(), rule.points())
                .map(|(w, x)| (w.clone(), barycentric_coordinates(x), f(x)))
                .collect()
        } else {
            Vec::new()
        };

        self.functionals
            .iter()
            .map(|functional| {
                let samples = match functional.support {
                    Support::Facet { facet, .. } => &facet_samples[facet],
                    Support::Interior => &interior_samples,
                };
                let mut sum = T::zero();
                for (w, lambda, value) in samples {
                    let mut flux = T::zero();
                    for (v_c, d_c) in value.iter().zip(&functional.direction) {
                        flux += v_c.clone() * d_c.clone();
                    }
                    let mut test = functional.scale.clone();
                    for (lambda_l, &e) in lambda.iter().zip(&functional.exponent) {
                        for _ in 0..e {
                            test *= lambda_l.clone();
                        }
                    }
                    sum += w.clone() * flux * test;
                }
                sum
            })
            .collect()
    }

    fn interpolate_basis(&self, basis: &PolynomialBasis<T>) -> Result<DMatrix<T>, Error> {
        let n = self.topology.dimension();
        check_sizes(self.size(), n, basis)?;
        if basis.monomials().dimension() != n {
            return Err(Error::DimensionMismatch {
                expected: n,
                actual: basis.monomials().dimension(),
            });
        }

        let table = self.moment_table(basis.monomials());
        let coefficients = basis.coefficients();
        let mut matrix = DMatrix::zeros(self.size(), coefficients.nrows());
        for (i, row) in table.iter().enumerate() {
            for j in 0..coefficients.nrows() {
                let mut sum = T::zero();
                for (column, value) in row {
                    sum += coefficients[(j, *column)].clone() * value.clone();
                }
                matrix[(i, j)] = sum;
            }
        }
        Ok(matrix)
    }
}

fn barycentric_coordinates<T: Field>(x: &[T]) -> Vec<T> {
    let mut lambda = Vec::with_capacity(x.len() + 1);
    lambda.push(T::one());
    for x_i in x {
        lambda[0] -= x_i.clone();
        lambda.push(x_i.clone());
    }
    lambda
}

/// One term `scale * e_component * lambda^monomial` of a prebasis function.
#[derive(Debug, Clone)]
struct Term<T> {
    component: usize,
    monomial: usize,
    scale: T,
}

/// Constructs Raviart–Thomas bases.
///
/// The dual basis is computed in the computation field `C` and converted to the storage field `S`
/// at the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct RaviartThomasBasisFactory<S, C = S>(PhantomData<(S, C)>);

impl<S: Field, C: Field> BasisFactory<S> for RaviartThomasBasisFactory<S, C> {
    fn create(topology: &Topology, order: usize) -> Result<PolynomialBasis<S>, Error> {
        check_simplex(topology)?;
        check_order::<C>(FAMILY, order)?;
        let basis = raviart_thomas_basis::<C>(topology, order)?;
        debug!(
            "Constructed {} basis of order {} on {} with {} functions",
            FAMILY,
            order,
            topology,
            basis.coefficients().nrows()
        );
        Ok(basis.cast())
    }
}

fn raviart_thomas_basis<C: Field>(topology: &Topology, order: usize) -> Result<PolynomialBasis<C>, Error> {
    let n = topology.dimension();
    let k = order;
    let scales = factorials::<C>(k + 1);

    // Monomials of degree k and k + 1 in the barycentric coordinates
    let mut exponents = topology.barycentric_exponents(k)?;
    exponents.extend(topology.barycentric_exponents(k + 1)?);
    let index: FxHashMap<Vec<usize>, usize> = exponents
        .iter()
        .enumerate()
        .map(|(i, beta)| (beta.clone(), i))
        .collect();

    // Bernstein-scaled prebasis of (P_k)^n followed by x P~_k
    let mut prebasis: Vec<Vec<Term<C>>> = Vec::new();
    for c in 0..n {
        for beta in exponents.iter().filter(|beta| beta.iter().sum::<usize>() == k) {
            prebasis.push(vec![Term {
                component: c,
                monomial: index[beta],
                scale: multinomial(beta, &scales),
            }]);
        }
    }
    for beta in exponents
        .iter()
        .filter(|beta| beta.iter().sum::<usize>() == k && beta[0] == 0)
    {
        let scale = multinomial(beta, &scales);
        let terms = (0..n)
            .map(|c| {
                let mut raised = beta.clone();
                raised[c + 1] += 1;
                Term {
                    component: c,
                    monomial: index[&raised],
                    scale: scale.clone(),
                }
            })
            .collect();
        prebasis.push(terms);
    }

    let interpolation = MomentInterpolation::<C>::new(topology, order)?;
    let size = prebasis.len();
    assert_eq!(
        size,
        interpolation.size(),
        "Internal error: number of functionals must match the dimension of the space"
    );

    // dual(i, a) is functional i applied to prebasis function a
    let moment_factorials = factorials::<C>(2 * k + 1 + n);
    let dual = DMatrix::from_fn(size, size, |i, a| {
        let mut value = C::zero();
        for term in &prebasis[a] {
            let moment = interpolation.moment(i, term.component, &exponents[term.monomial], &moment_factorials);
            value += term.scale.clone() * moment;
        }
        value
    });
    let dual_inverse = invert(&dual).expect("Internal error: Raviart-Thomas dual matrix must be invertible");

    // Basis function j is sum_a dual_inverse(a, j) prebasis_a
    let m = exponents.len();
    let mut coefficients = DMatrix::zeros(size, n * m);
    for j in 0..size {
        for (a, terms) in prebasis.iter().enumerate() {
            let mix = dual_inverse[(a, j)].clone();
            if mix.is_zero() {
                continue;
            }
            for term in terms {
                coefficients[(j, term.component * m + term.monomial)] += mix.clone() * term.scale.clone();
            }
        }
    }

    let monomials = MonomialSet::new(n, Variables::Barycentric, exponents);
    Ok(PolynomialBasis::new(monomials, n, k + 1, coefficients))
}

/// Local keys of the Raviart–Thomas element: one group per facet, then the interior.
#[derive(Debug, Clone, Copy, Default)]
pub struct RaviartThomasCoefficientsFactory;

impl CoefficientsFactory for RaviartThomasCoefficientsFactory {
    fn create(topology: &Topology, order: usize) -> Result<LocalCoefficients, Error> {
        check_simplex(topology)?;
        let n = topology.dimension();
        let per_facet = binomial(n - 1 + order, order);
        let interior = if order > 0 { n * binomial(n + order - 1, order - 1) } else { 0 };
        let facets = (0..topology.size(1)).flat_map(|facet| std::iter::repeat((1, facet)).take(per_facet));
        let cell = std::iter::repeat((0, 0)).take(interior);
        Ok(LocalCoefficients::from_entities(facets.chain(cell)))
    }
}

/// Constructs the L2 moment interpolation of Raviart–Thomas elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct RaviartThomasL2InterpolationFactory<S>(PhantomData<S>);

impl<S: Field> InterpolationFactory<S> for RaviartThomasL2InterpolationFactory<S> {
    type Interpolation = MomentInterpolation<S>;

    fn create(topology: &Topology, order: usize) -> Result<Self::Interpolation, Error> {
        MomentInterpolation::new(topology, order)
    }
}

/// The Raviart–Thomas element on a simplex, stored in `S` and constructed in `C`.
pub type RaviartThomasSimplexLocalFiniteElement<S, C = S> = GenericLocalFiniteElement<
    S,
    RaviartThomasBasisFactory<S, C>,
    RaviartThomasCoefficientsFactory,
    RaviartThomasL2InterpolationFactory<S>,
>;

#[deprecated(note = "Use RaviartThomasSimplexLocalFiniteElement instead")]
pub type RaviartThomasLocalFiniteElement<S, C = S> = RaviartThomasSimplexLocalFiniteElement<S, C>;
