//! Interpolating the basis of an element must give the identity matrix.
use localfe::finite_element::LocalFiniteElement;
use localfe::geometry_type::GeometryType;
use localfe::interpolation::{interpolation_tolerance, max_interpolation_deviation, MAX_INTERPOLATION_TOLERANCE};
use localfe::lagrange::LagrangeLocalFiniteElement;
use localfe::raviart_thomas::RaviartThomasSimplexLocalFiniteElement;
use localfe::Field;
use num::BigRational;
use paste::paste;

fn assert_identity<T: Field>(element: &dyn LocalFiniteElement<T>, dim: usize, order: usize) {
    let deviation = max_interpolation_deviation(element.local_interpolation(), element.local_basis()).unwrap();
    let tolerance = interpolation_tolerance::<T>(dim, order);
    assert!(
        deviation <= tolerance,
        "deviation {:e} exceeds tolerance {:e} on {} with order {}",
        deviation,
        tolerance,
        element.geometry_type(),
        order
    );
}

macro_rules! raviart_thomas_identity_tests {
    ($name:ident, $storage:ty, $computation:ty: $(($dim:literal, $order:literal)),*) => {
        paste! {
            $(
            #[test]
            fn [<raviart_thomas_ $name _dim_ $dim _order_ $order>]() {
                let element =
                    RaviartThomasSimplexLocalFiniteElement::<$storage, $computation>::new(GeometryType::simplex($dim), $order)
                        .unwrap();
                assert_identity::<$storage>(&element, $dim, $order);
            }
            )*
        }
    };
}

raviart_thomas_identity_tests!(f64, f64, f64:
    (1, 0), (1, 1), (1, 2), (1, 3), (1, 4), (1, 5),
    (2, 0), (2, 1), (2, 2), (2, 3), (2, 4), (2, 5),
    (3, 0), (3, 1), (3, 2), (3, 3), (3, 4), (3, 5),
    (4, 0), (4, 1), (4, 2), (4, 3), (4, 4), (4, 5));

raviart_thomas_identity_tests!(f32, f32, f32:
    (1, 0), (1, 1), (1, 2), (1, 3), (1, 4),
    (2, 0), (2, 1), (2, 2), (2, 3), (2, 4),
    (3, 0), (3, 1), (3, 2), (3, 3), (3, 4),
    (4, 0), (4, 1), (4, 2), (4, 3), (4, 4));

raviart_thomas_identity_tests!(f32_from_f64, f32, f64:
    (1, 4), (2, 3), (2, 4), (3, 3), (3, 4), (4, 3), (4, 4));

raviart_thomas_identity_tests!(bigrational, BigRational, BigRational:
    (1, 0), (1, 1), (1, 2),
    (2, 0), (2, 1), (2, 2), (2, 3),
    (3, 0), (3, 1), (3, 2),
    (4, 0), (4, 1));

#[test]
fn exact_fields_have_zero_tolerance() {
    assert_eq!(interpolation_tolerance::<BigRational>(3, 2), 0.0);
    assert!(interpolation_tolerance::<f64>(3, 2) > 0.0);
    assert!(interpolation_tolerance::<f32>(3, 2) > interpolation_tolerance::<f64>(3, 2));
    assert!(interpolation_tolerance::<f64>(3, 3) > interpolation_tolerance::<f64>(3, 2));
}

#[test]
fn inexact_tolerances_detect_wrong_bases() {
    for dim in 1..=4 {
        for order in 0..=f32::MAX_ORDER.unwrap() {
            let tolerance = interpolation_tolerance::<f32>(dim, order);
            assert!(tolerance > 0.0);
            assert!(tolerance < 1e-1, "tolerance {:e} for dim {} order {}", tolerance, dim, order);
        }
        for order in 0..=f64::MAX_ORDER.unwrap() {
            assert!(interpolation_tolerance::<f64>(dim, order) <= MAX_INTERPOLATION_TOLERANCE);
        }
    }
    assert_eq!(interpolation_tolerance::<f32>(4, 4), MAX_INTERPOLATION_TOLERANCE);
    assert_eq!(interpolation_tolerance::<f32>(usize::MAX / 2, 3), MAX_INTERPOLATION_TOLERANCE);
}

#[test]
fn lagrange_elements() {
    let geometry_types_and_orders = [
        (GeometryType::line(), 0..=5),
        (GeometryType::triangle(), 0..=4),
        (GeometryType::quadrilateral(), 0..=4),
        (GeometryType::tetrahedron(), 0..=3),
        (GeometryType::hexahedron(), 0..=2),
        (GeometryType::prism(), 0..=2),
        (GeometryType::pyramid(), 0..=2),
    ];
    for (geometry_type, orders) in geometry_types_and_orders {
        for order in orders {
            let element = LagrangeLocalFiniteElement::<f64>::new(geometry_type, order).unwrap();
            assert_identity::<f64>(&element, geometry_type.dim(), order);
        }
    }
}

#[test]
fn exact_lagrange_elements() {
    for geometry_type in [GeometryType::prism(), GeometryType::pyramid(), GeometryType::hexahedron()] {
        for order in 1..=2 {
            let element = LagrangeLocalFiniteElement::<BigRational>::new(geometry_type, order).unwrap();
            let deviation = max_interpolation_deviation(element.local_interpolation(), element.local_basis()).unwrap();
            assert_eq!(deviation, 0.0);
        }
    }
}
