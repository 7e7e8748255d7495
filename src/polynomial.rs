//! Monomials and polynomial bases stored as dense coefficient tables.
use crate::basis::LocalBasis;
use localfe_traits::{field_cast, Field};
use nalgebra::{DMatrix, DVector, Scalar};

/// The variables in which monomials are expressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variables {
    /// The reference coordinates `x_0, ..., x_{d-1}`.
    Cartesian,
    /// The barycentric coordinates of the reference simplex, `1 - sum(x), x_0, ..., x_{d-1}`.
    Barycentric,
}

/// An ordered set of monomials over a fixed set of variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonomialSet {
    dimension: usize,
    variables: Variables,
    exponents: Vec<Vec<usize>>,
}

impl MonomialSet {
    /// # Panics
    ///
    /// Panics if an exponent does not have one entry per variable.
    pub fn new(dimension: usize, variables: Variables, exponents: Vec<Vec<usize>>) -> Self {
        let num_variables = match variables {
            Variables::Cartesian => dimension,
            Variables::Barycentric => dimension + 1,
        };
        assert!(
            exponents.iter().all(|alpha| alpha.len() == num_variables),
            "Every exponent must have one entry per variable"
        );
        Self {
            dimension,
            variables,
            exponents,
        }
    }

    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn variables(&self) -> Variables {
        self.variables
    }

    pub fn exponents(&self) -> &[Vec<usize>] {
        &self.exponents
    }

    /// The highest total degree of any monomial in the set.
    pub fn degree(&self) -> usize {
        self.exponents
            .iter()
            .map(|alpha| alpha.iter().sum())
            .max()
            .unwrap_or(0)
    }

    /// The exponents rewritten in the barycentric coordinates of the reference simplex.
    ///
    /// Since `x_i` is the barycentric coordinate of vertex `i + 1`, a Cartesian exponent `alpha`
    /// becomes `(0, alpha)`.
    pub fn barycentric_exponents(&self) -> Vec<Vec<usize>> {
        match self.variables {
            Variables::Barycentric => self.exponents.clone(),
            Variables::Cartesian => self
                .exponents
                .iter()
                .map(|alpha| std::iter::once(0).chain(alpha.iter().copied()).collect())
                .collect(),
        }
    }

    fn variable_values<T: Field>(&self, x: &[T]) -> Vec<T> {
        assert_eq!(x.len(), self.dimension, "Point dimension must match monomial dimension");
        match self.variables {
            Variables::Cartesian => x.to_vec(),
            Variables::Barycentric => {
                let mut lambda0 = T::one();
                for x_i in x {
                    lambda0 -= x_i.clone();
                }
                std::iter::once(lambda0).chain(x.iter().cloned()).collect()
            }
        }
    }

    /// Derivative of variable `i` with respect to `x_d`, which is always -1, 0 or 1.
    fn variable_derivative(&self, i: usize, d: usize) -> i8 {
        match self.variables {
            Variables::Cartesian => (i == d) as i8,
            Variables::Barycentric if i == 0 => -1,
            Variables::Barycentric => (i == d + 1) as i8,
        }
    }

    /// Table of `v_i^p` for every variable `v_i` and every power up to the degree of the set.
    fn power_table<T: Field>(&self, values: &[T]) -> Vec<Vec<T>> {
        let max_power = self
            .exponents
            .iter()
            .flat_map(|alpha| alpha.iter().copied())
            .max()
            .unwrap_or(0);
        values
            .iter()
            .map(|v| {
                let mut powers = Vec::with_capacity(max_power + 1);
                powers.push(T::one());
                for p in 1..=max_power {
                    let next = powers[p - 1].clone() * v.clone();
                    powers.push(next);
                }
                powers
            })
            .collect()
    }

    /// Values of all monomials at the given point.
    pub fn evaluate<T: Field>(&self, x: &[T]) -> Vec<T> {
        let powers = self.power_table(&self.variable_values(x));
        self.exponents
            .iter()
            .map(|alpha| {
                let mut value = T::one();
                for (i, &e) in alpha.iter().enumerate() {
                    value *= powers[i][e].clone();
                }
                value
            })
            .collect()
    }

    /// Gradients of all monomials with respect to the reference coordinates.
    ///
    /// Entry `[m][d]` holds the derivative of monomial `m` with respect to `x_d`.
    pub fn evaluate_gradients<T: Field>(&self, x: &[T]) -> Vec<Vec<T>> {
        let powers = self.power_table(&self.variable_values(x));
        self.exponents
            .iter()
            .map(|alpha| {
                (0..self.dimension)
                    .map(|d| {
                        let mut derivative = T::zero();
                        for (i, &e_i) in alpha.iter().enumerate() {
                            let dv = self.variable_derivative(i, d);
                            if e_i == 0 || dv == 0 {
                                continue;
                            }
                            // Product rule: e_i v_i^(e_i - 1) dv_i/dx_d times the other factors
                            let mut term = T::from_integer(e_i) * powers[i][e_i - 1].clone();
                            for (l, &e_l) in alpha.iter().enumerate() {
                                if l != i {
                                    term *= powers[l][e_l].clone();
                                }
                            }
                            if dv > 0 {
                                derivative += term;
                            } else {
                                derivative -= term;
                            }
                        }
                        derivative
                    })
                    .collect()
            })
            .collect()
    }
}

/// A basis of (possibly vector-valued) polynomials.
///
/// Component `c` of basis function `j` is `sum_m coefficients[(j, c * M + m)] * monomial_m`,
/// where `M` is the number of monomials.
#[derive(Debug, Clone, PartialEq)]
pub struct PolynomialBasis<T: Scalar> {
    monomials: MonomialSet,
    range_dimension: usize,
    order: usize,
    coefficients: DMatrix<T>,
}

impl<T: Field> PolynomialBasis<T> {
    /// # Panics
    ///
    /// Panics if the coefficient table does not have `range_dimension * monomials.len()`
    /// columns.
    pub fn new(monomials: MonomialSet, range_dimension: usize, order: usize, coefficients: DMatrix<T>) -> Self {
        assert_eq!(
            coefficients.ncols(),
            range_dimension * monomials.len(),
            "Coefficient table must have one column per (component, monomial) pair"
        );
        Self {
            monomials,
            range_dimension,
            order,
            coefficients,
        }
    }

    /// The basis consisting of the single constant function 1.
    pub fn constant(dimension: usize) -> Self {
        let monomials = MonomialSet::new(dimension, Variables::Cartesian, vec![vec![0; dimension]]);
        Self::new(monomials, 1, 0, DMatrix::from_element(1, 1, T::one()))
    }

    pub fn monomials(&self) -> &MonomialSet {
        &self.monomials
    }

    pub fn coefficients(&self) -> &DMatrix<T> {
        &self.coefficients
    }

    /// Converts the coefficient table to another field.
    pub fn cast<S: Field>(&self) -> PolynomialBasis<S> {
        PolynomialBasis {
            monomials: self.monomials.clone(),
            range_dimension: self.range_dimension,
            order: self.order,
            coefficients: self.coefficients.map(|c| field_cast::<S, T>(&c)),
        }
    }
}

impl<T: Field> LocalBasis<T> for PolynomialBasis<T> {
    fn size(&self) -> usize {
        self.coefficients.nrows()
    }

    fn order(&self) -> usize {
        self.order
    }

    fn dimension(&self) -> usize {
        self.monomials.dimension()
    }

    fn range_dimension(&self) -> usize {
        self.range_dimension
    }

    fn evaluate_function(&self, x: &[T]) -> Vec<DVector<T>> {
        let values = self.monomials.evaluate(x);
        let m = values.len();
        (0..self.size())
            .map(|j| {
                DVector::from_fn(self.range_dimension, |c, _| {
                    let mut sum = T::zero();
                    for (k, v) in values.iter().enumerate() {
                        sum += self.coefficients[(j, c * m + k)].clone() * v.clone();
                    }
                    sum
                })
            })
            .collect()
    }

    fn evaluate_jacobian(&self, x: &[T]) -> Vec<DMatrix<T>> {
        let gradients = self.monomials.evaluate_gradients(x);
        let m = gradients.len();
        let dim = self.dimension();
        (0..self.size())
            .map(|j| {
                DMatrix::from_fn(self.range_dimension, dim, |c, d| {
                    let mut sum = T::zero();
                    for (k, gradient) in gradients.iter().enumerate() {
                        sum += self.coefficients[(j, c * m + k)].clone() * gradient[d].clone();
                    }
                    sum
                })
            })
            .collect()
    }
}
