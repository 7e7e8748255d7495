//! Elements stored in one field and constructed in another.
use localfe::finite_element::LocalFiniteElement;
use localfe::geometry_type::GeometryType;
use localfe::interpolation::{interpolation_tolerance, max_interpolation_deviation};
use localfe::lagrange::LagrangeLocalFiniteElement;
use localfe::raviart_thomas::RaviartThomasSimplexLocalFiniteElement;
use localfe::field_cast;
use matrixcompare::assert_scalar_eq;
use num::BigRational;

const POINTS_2D: [[f64; 2]; 3] = [[0.1, 0.2], [0.5, 0.25], [0.0, 1.0]];

#[test]
fn single_precision_storage_from_double_precision_construction() {
    let accurate = RaviartThomasSimplexLocalFiniteElement::<f64>::new(GeometryType::triangle(), 2).unwrap();
    let stored = RaviartThomasSimplexLocalFiniteElement::<f32, f64>::new(GeometryType::triangle(), 2).unwrap();

    for x in POINTS_2D {
        let x_f32 = [x[0] as f32, x[1] as f32];
        let expected = accurate.evaluate_function(&x);
        let values = stored.evaluate_function(&x_f32);
        for (value, expected) in values.iter().zip(&expected) {
            for (v, e) in value.iter().zip(expected.iter()) {
                assert_scalar_eq!(*v as f64, *e, comp = abs, tol = 1e-4);
            }
        }
    }

    let deviation = max_interpolation_deviation(stored.local_interpolation(), stored.local_basis()).unwrap();
    assert!(deviation <= interpolation_tolerance::<f32>(2, 2));
}

#[test]
fn exact_construction_rounds_to_double_precision() {
    let exact = RaviartThomasSimplexLocalFiniteElement::<BigRational>::new(GeometryType::tetrahedron(), 1).unwrap();
    let rounded = RaviartThomasSimplexLocalFiniteElement::<f64, BigRational>::new(GeometryType::tetrahedron(), 1).unwrap();
    let direct = RaviartThomasSimplexLocalFiniteElement::<f64>::new(GeometryType::tetrahedron(), 1).unwrap();

    let exact_coefficients = exact.basis().coefficients();
    let rounded_coefficients = rounded.basis().coefficients();
    for (e, r) in exact_coefficients.iter().zip(rounded_coefficients.iter()) {
        assert_eq!(field_cast::<f64, BigRational>(e), *r);
    }

    let x = [0.1, 0.3, 0.2];
    for (r, d) in rounded.evaluate_function(&x).iter().zip(direct.evaluate_function(&x)) {
        for (r, d) in r.iter().zip(d.iter()) {
            assert_scalar_eq!(*r, *d, comp = abs, tol = 1e-10);
        }
    }
}

#[test]
fn lagrange_with_exact_construction() {
    let element = LagrangeLocalFiniteElement::<f64, BigRational>::new(GeometryType::pyramid(), 2).unwrap();
    let vertices = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    for (i, vertex) in vertices.iter().enumerate() {
        let values = element.evaluate_function(vertex);
        for (j, value) in values.iter().enumerate() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_scalar_eq!(value[0], expected, comp = abs, tol = 1e-13);
        }
    }
}
