use localfe::cache::{FiniteElementCache, Registry};
use localfe::finite_element::LocalFiniteElement;
use localfe::geometry_type::GeometryType;
use localfe::lagrange::P0LocalFiniteElement;
use localfe::variant::FiniteElementVariant;
use localfe::Error;

#[test]
fn lagrange_registry_contents() {
    let registry = Registry::<f64>::lagrange(2, 1);
    assert_eq!(
        registry.geometry_types().collect::<Vec<_>>(),
        vec![GeometryType::triangle(), GeometryType::quadrilateral()]
    );

    let registry = Registry::<f64>::lagrange(2, 0);
    assert!(registry.contains(&GeometryType::none(2)));
    assert_eq!(registry.len(), 3);

    let registry = Registry::<f64>::lagrange(3, 0);
    assert!(!registry.contains(&GeometryType::none(3)));
    assert!(registry.contains(&GeometryType::pyramid()));
    assert_eq!(registry.len(), 4);

    assert_eq!(Registry::<f64>::lagrange(3, 2).len(), 4);
    let registry = Registry::<f64>::lagrange(3, 3);
    assert_eq!(
        registry.geometry_types().collect::<Vec<_>>(),
        vec![GeometryType::tetrahedron(), GeometryType::hexahedron()]
    );
}

#[test]
fn get_returns_registered_elements() {
    let cache = FiniteElementCache::<f64>::lagrange(3, 1).unwrap();
    assert_eq!(cache.dimension(), 3);
    for (geometry_type, size) in [
        (GeometryType::tetrahedron(), 4),
        (GeometryType::pyramid(), 5),
        (GeometryType::prism(), 6),
        (GeometryType::hexahedron(), 8),
    ] {
        let element = cache.get(&geometry_type).unwrap();
        assert_eq!(element.size(), size);
        assert_eq!(element.geometry_type(), geometry_type);
        assert_eq!(element.order(), 1);
    }
    assert_eq!(
        cache.get(&GeometryType::none(3)).err(),
        Some(Error::UnsupportedGeometryType(GeometryType::none(3)))
    );
}

#[test]
fn get_rejects_other_dimensions() {
    let cache = FiniteElementCache::<f64>::raviart_thomas(2, 0).unwrap();
    assert!(cache.get(&GeometryType::triangle()).is_ok());
    assert_eq!(
        cache.get(&GeometryType::tetrahedron()).err(),
        Some(Error::UnsupportedGeometryType(GeometryType::tetrahedron()))
    );
    assert_eq!(
        cache.get(&GeometryType::line()).err(),
        Some(Error::UnsupportedGeometryType(GeometryType::line()))
    );
    assert_eq!(
        cache.get(&GeometryType::quadrilateral()).err(),
        Some(Error::UnsupportedGeometryType(GeometryType::quadrilateral()))
    );
}

#[test]
fn geometry_types_of_cache() {
    let cache = FiniteElementCache::<f64>::lagrange(2, 0).unwrap();
    assert_eq!(
        cache.geometry_types(),
        vec![GeometryType::triangle(), GeometryType::quadrilateral(), GeometryType::none(2)]
    );
    assert!(matches!(
        cache.get(&GeometryType::none(2)).unwrap(),
        FiniteElementVariant::P0(_)
    ));
}

#[test]
fn construction_errors_are_reported() {
    let result = FiniteElementCache::<f32>::raviart_thomas(2, 5);
    assert!(matches!(result, Err(Error::UnsupportedOrder { order: 5, .. })));
}

#[test]
fn custom_registry() {
    let mut registry = Registry::<f64>::new(1);
    let line = GeometryType::line();
    registry
        .register(line, move || Ok(P0LocalFiniteElement::<f64>::new(line).into()))
        .unwrap();
    let none = GeometryType::none(1);
    registry
        .register(none, move || Ok(P0LocalFiniteElement::<f64>::new(none).into()))
        .unwrap();

    let cache = FiniteElementCache::from_registry(&registry).unwrap();
    assert_eq!(cache.geometry_types(), vec![line, none]);
    assert_eq!(cache.get(&none).unwrap().geometry_type(), none);
}
