use localfe::finite_element::LocalFiniteElement;
use localfe::geometry_type::GeometryType;
use localfe::lagrange::{LagrangeLocalFiniteElement, P0LocalFiniteElement};
use localfe::raviart_thomas::RaviartThomasSimplexLocalFiniteElement;
use localfe::variant::FiniteElementVariant;

#[test]
fn dispatches_to_active_element() {
    let element = RaviartThomasSimplexLocalFiniteElement::<f64>::new(GeometryType::tetrahedron(), 1).unwrap();
    let variant = FiniteElementVariant::from(element.clone());
    assert!(matches!(variant, FiniteElementVariant::RaviartThomas(_)));

    assert_eq!(variant.size(), element.size());
    assert_eq!(variant.order(), 1);
    assert_eq!(variant.geometry_type(), GeometryType::tetrahedron());
    assert_eq!(variant.local_coefficients(), element.coefficients());
    assert_eq!(variant.local_basis(), element.basis());
    assert_eq!(variant.local_interpolation().size(), element.size());

    let x = [0.1, 0.2, 0.3];
    assert_eq!(variant.evaluate_function(&x), element.evaluate_function(&x));
    assert_eq!(variant.evaluate_jacobian(&x), element.evaluate_jacobian(&x));
}

#[test]
fn lagrange_elements_of_all_shapes_share_one_variant() {
    for geometry_type in [
        GeometryType::tetrahedron(),
        GeometryType::hexahedron(),
        GeometryType::prism(),
        GeometryType::pyramid(),
    ] {
        let element = LagrangeLocalFiniteElement::<f64>::new(geometry_type, 1).unwrap();
        let variant: FiniteElementVariant<f64> = element.into();
        assert!(matches!(variant, FiniteElementVariant::Lagrange(_)));
        assert_eq!(variant.geometry_type(), geometry_type);
    }
}

#[test]
fn p0_variant() {
    let variant: FiniteElementVariant<f64> = P0LocalFiniteElement::new(GeometryType::none(1)).into();
    assert!(matches!(variant, FiniteElementVariant::P0(_)));
    assert_eq!(variant.size(), 1);
    assert_eq!(variant.order(), 0);
    assert_eq!(variant.evaluate_function(&[3.0])[0][0], 1.0);
    assert_eq!(variant.as_local_finite_element().geometry_type(), GeometryType::none(1));
}
