//! End-to-end lookups through the cache.
use localfe::cache::FiniteElementCache;
use localfe::finite_element::LocalFiniteElement;
use localfe::geometry_type::GeometryType;
use localfe::Error;
use matrixcompare::{assert_matrix_eq, assert_scalar_eq};
use nalgebra::DVector;

#[test]
fn lowest_order_raviart_thomas_on_triangle() {
    let cache = FiniteElementCache::<f64, f64>::raviart_thomas(2, 0).unwrap();
    let element = cache.get(&GeometryType::triangle()).unwrap();
    assert_eq!(element.size(), 3);

    let (x, y) = (0.3, 0.2);
    let values = element.evaluate_function(&[x, y]);
    let expected = [
        DVector::from_vec(vec![x, y - 1.0]),
        DVector::from_vec(vec![x - 1.0, y]),
        DVector::from_vec(vec![x, y]),
    ];
    for (value, expected) in values.iter().zip(&expected) {
        assert_matrix_eq!(*value, *expected, comp = abs, tol = 1e-13);
    }

    for jacobian in element.evaluate_jacobian(&[x, y]) {
        assert_scalar_eq!(jacobian.trace(), 2.0, comp = abs, tol = 1e-13);
    }

    let keys = element.local_coefficients().keys();
    assert!(keys.iter().enumerate().all(|(i, key)| key.codim == 1 && key.sub_entity == i && key.index == 0));
}

#[test]
fn linear_lagrange_on_triangle() {
    let cache = FiniteElementCache::<f64, f64>::lagrange(2, 1).unwrap();
    let element = cache.get(&GeometryType::triangle()).unwrap();
    assert_eq!(element.size(), 3);
    assert_eq!(element.order(), 1);

    let vertices = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0]];
    for (i, vertex) in vertices.iter().enumerate() {
        let values = element.evaluate_function(vertex);
        assert_eq!(values.len(), 3);
        for (j, value) in values.iter().enumerate() {
            let expected = if i == j { 1.0 } else { 0.0 };
            assert_scalar_eq!(value[0], expected, comp = abs, tol = 1e-14);
        }
    }
}

#[test]
fn unsupported_requests_are_reported() {
    let result = FiniteElementCache::<f64, f32>::lagrange(2, 5);
    assert_eq!(
        result.err(),
        Some(Error::UnsupportedOrder {
            family: "Lagrange",
            order: 5,
            max_order: 4
        })
    );

    let cache = FiniteElementCache::<f64>::raviart_thomas(3, 1).unwrap();
    assert_eq!(
        cache.get(&GeometryType::hexahedron()).err(),
        Some(Error::UnsupportedGeometryType(GeometryType::hexahedron()))
    );
}
