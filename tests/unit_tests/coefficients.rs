use localfe::coefficients::{LocalCoefficients, LocalKey};
use localfe::topology::Topology;

#[test]
fn from_entities_numbers_keys_per_sub_entity() {
    let coefficients = LocalCoefficients::from_entities(vec![(1, 0), (1, 0), (1, 2), (0, 0), (1, 0)]);
    assert_eq!(
        coefficients.keys(),
        &[
            LocalKey::new(0, 1, 0),
            LocalKey::new(0, 1, 1),
            LocalKey::new(2, 1, 0),
            LocalKey::new(0, 0, 0),
            LocalKey::new(0, 1, 2),
        ]
    );
    assert_eq!(coefficients.size(), 5);
    assert_eq!(coefficients.local_key(2).sub_entity, 2);
}

#[test]
fn consistency_with_topology() {
    let triangle = Topology::simplex(2);
    let valid = LocalCoefficients::from_entities((0..3).map(|facet| (1, facet)));
    assert!(valid.is_consistent_with(&triangle));

    // The triangle only has three edges
    let out_of_range = LocalCoefficients::new(vec![LocalKey::new(3, 1, 0)]);
    assert!(!out_of_range.is_consistent_with(&triangle));

    let duplicate = LocalCoefficients::new(vec![LocalKey::new(0, 2, 0), LocalKey::new(0, 2, 0)]);
    assert!(!duplicate.is_consistent_with(&triangle));

    let gap = LocalCoefficients::new(vec![LocalKey::new(0, 0, 0), LocalKey::new(0, 0, 2)]);
    assert!(!gap.is_consistent_with(&triangle));

    let codim_too_large = LocalCoefficients::new(vec![LocalKey::new(0, 3, 0)]);
    assert!(!codim_too_large.is_consistent_with(&triangle));
}

#[test]
fn local_key_serde_round_trip() {
    let key = LocalKey::new(3, 1, 2);
    let json = serde_json::to_string(&key).unwrap();
    assert_eq!(json, r#"{"sub_entity":3,"codim":1,"index":2}"#);
    assert_eq!(serde_json::from_str::<LocalKey>(&json).unwrap(), key);
}
