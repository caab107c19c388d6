use std::f64::consts::FRAC_PI_2;

use crate::parameter_error::ParameterError;
use crate::parameters::dh_kinematics::DhChain;
use crate::parameters_legs::dh_kinematics::LegGeometry;

const READ_ERROR: &str = "Failed to load parameters from file";
const SMALL: f64 = 1e-12;

#[test]
fn test_chain_from_yaml() {
    let loaded = DhChain::from_yaml_file("src/tests/data/diamond_leg.yaml").expect(READ_ERROR);
    let expected = DhChain::diamond_leg();
    assert_eq!(loaded.len(), expected.len());
    for (l, e) in loaded.iter().zip(expected.iter()) {
        assert!((l.alpha - e.alpha).abs() < SMALL);
        assert_eq!(l.a, e.a);
        assert_eq!(l.d, e.d);
        assert!((l.theta - e.theta).abs() < SMALL);
    }
}

#[test]
fn test_chain_yaml_round_trip() {
    let chain = DhChain::diamond_leg();
    let reloaded = DhChain::from_yaml(&chain.to_yaml()).expect(READ_ERROR);
    for (l, e) in reloaded.iter().zip(chain.iter()) {
        // deg() output keeps four decimals
        assert!((l.alpha - e.alpha).abs() < 1e-5);
        assert!((l.theta - e.theta).abs() < 1e-5);
        assert_eq!(l.a, e.a);
        assert_eq!(l.d, e.d);
    }
}

#[test]
fn test_leg_geometry_from_yaml() {
    let loaded = LegGeometry::from_yaml_file("src/tests/data/leg_geometry.yaml").expect(READ_ERROR);
    assert_eq!(loaded.links.len(), 4);
    assert!((loaded.links[1].alpha + FRAC_PI_2).abs() < SMALL);
    for offset in loaded.joint_offsets {
        assert!((offset - FRAC_PI_2).abs() < SMALL);
    }
    assert_eq!(loaded.sign_corrections, [1, -1, 1]);
}

#[test]
fn test_leg_geometry_defaults() {
    let loaded = LegGeometry::from_yaml_file("src/tests/data/leg_geometry_defaults.yaml").expect(READ_ERROR);
    assert_eq!(loaded.joint_offsets, [0.0; 3]);
    assert_eq!(loaded.sign_corrections, [1; 3]);
}

#[test]
fn test_leg_geometry_wrong_offsets_length() {
    let result = LegGeometry::from_yaml_file("src/tests/data/leg_geometry_short_offsets.yaml");
    assert!(matches!(result, Err(ParameterError::InvalidLength { expected: 3, found: 2 })));
}

#[test]
fn test_leg_geometry_needs_four_links() {
    let yaml = "dh_params:\n  - { alpha: 0, a: 1, d: 0, theta: 0 }\n";
    assert!(matches!(
        LegGeometry::from_yaml(yaml),
        Err(ParameterError::InvalidLength { expected: 4, found: 1 })
    ));
}

#[test]
fn test_missing_file() {
    let result = DhChain::from_yaml_file("src/tests/data/no_such_chain.yaml");
    assert!(matches!(result, Err(ParameterError::IoError(_))));
}

#[test]
fn test_malformed_yaml() {
    assert!(matches!(
        DhChain::from_yaml("dh_params:\n  - { alpha: zero, a: 1, d: 0, theta: 0 }\n"),
        Err(ParameterError::ParseError(_))
    ));
}
