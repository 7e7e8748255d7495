//! Jacobians of all shape functions agree with finite differences of their values.
use localfe::finite_element::LocalFiniteElement;
use localfe::geometry_type::GeometryType;
use localfe::lagrange::LagrangeLocalFiniteElement;
use localfe::proptest::point_in_reference_element;
use localfe::raviart_thomas::RaviartThomasSimplexLocalFiniteElement;
use localfe::topology::Topology;
use localfe::variant::FiniteElementVariant;
use nalgebra::DVector;
use proptest::prelude::*;
use util::{approximate_jacobian_fd, assert_approx_matrix_eq};

fn elements() -> Vec<FiniteElementVariant<f64>> {
    let mut elements = Vec::new();
    for dim in 1..=3 {
        for order in 0..=2 {
            let element = RaviartThomasSimplexLocalFiniteElement::<f64>::new(GeometryType::simplex(dim), order).unwrap();
            elements.push(element.into());
        }
    }
    for geometry_type in [
        GeometryType::quadrilateral(),
        GeometryType::tetrahedron(),
        GeometryType::prism(),
        GeometryType::pyramid(),
    ] {
        for order in 1..=2 {
            let element = LagrangeLocalFiniteElement::<f64>::new(geometry_type, order).unwrap();
            elements.push(element.into());
        }
    }
    elements
}

fn max_finite_difference_error(element: &FiniteElementVariant<f64>, x: &[f64], h: f64) -> f64 {
    element
        .evaluate_jacobian(x)
        .iter()
        .enumerate()
        .map(|(j, jacobian)| {
            let f = |y: &[f64]| -> DVector<f64> { element.evaluate_function(y)[j].clone() };
            let approximate = approximate_jacobian_fd(jacobian.nrows(), f, x, h);
            (jacobian - approximate).abs().max()
        })
        .fold(0.0, f64::max)
}

fn element_and_point() -> impl Strategy<Value = (FiniteElementVariant<f64>, Vec<f64>)> {
    proptest::sample::select(elements()).prop_flat_map(|element| {
        let topology = Topology::from_geometry_type(&element.geometry_type()).unwrap();
        (Just(element), point_in_reference_element(&topology))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn jacobian_matches_finite_differences((element, x) in element_and_point()) {
        let jacobians = element.evaluate_jacobian(&x);
        for (j, jacobian) in jacobians.iter().enumerate() {
            let dim = element.local_basis().monomials().dimension();
            let m = jacobian.nrows();
            let f = |y: &[f64]| -> DVector<f64> { element.evaluate_function(y)[j].clone() };
            let approximate = approximate_jacobian_fd(m, f, &x, 1e-6);
            prop_assert_eq!(jacobian.ncols(), dim);
            assert_approx_matrix_eq!(jacobian, &approximate, abstol = 1e-6);
        }
    }

    #[test]
    fn finite_difference_error_shrinks_with_step((element, x) in element_and_point()) {
        // Central differences converge quadratically until rounding errors dominate
        let errors: Vec<f64> = [1e-3, 1e-4, 1e-5]
            .iter()
            .map(|&h| max_finite_difference_error(&element, &x, h))
            .collect();
        for (coarse, fine) in errors.iter().zip(&errors[1..]) {
            prop_assert!(*fine <= coarse / 50.0 + 1e-7, "errors {:?} on {}", errors, element.geometry_type());
        }
    }

    #[test]
    fn lagrange_bases_are_partitions_of_unity(
        (element, x) in element_and_point().prop_filter("Lagrange elements only", |(element, _)| {
            matches!(element, FiniteElementVariant::Lagrange(_))
        })
    ) {
        let sum: f64 = element.evaluate_function(&x).iter().map(|value| value[0]).sum();
        prop_assert!((sum - 1.0).abs() <= 1e-12);
    }
}
