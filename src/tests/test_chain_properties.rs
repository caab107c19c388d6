use std::f64::consts::PI;

use crate::kinematic_traits::{Kinematics, Vec3, BASE_ORIGIN};
use crate::kinematics_impl::{DhConvention, DhKinematics};
use crate::parameters::dh_kinematics::{DhChain, DhParams};
use crate::tests::test_utils::{bit_identical, positions_approx_equal};

const SMALL: f64 = 1e-12;

const CONVENTIONS: [DhConvention; 2] = [DhConvention::Standard, DhConvention::Modified];

/// Irregular chains of several lengths, including a degenerate one.
fn sample_chains() -> Vec<DhChain> {
    vec![
        DhChain::default(),
        DhChain::from([DhParams::new(0.4, 1.0, 2.0, -0.3)]),
        DhChain::diamond_leg(),
        DhChain::from([
            DhParams::new(PI, 0.0, 0.0, 0.0),
            DhParams::new(0.0, 0.0, 0.0, 7.0 * PI),
            DhParams::new(-2.5, 12.0, -3.0, 100.0),
            DhParams::new(0.1, -0.5, 0.25, -42.0),
            DhParams::new(1.0, 1.0, 1.0, 1.0),
            DhParams::new(0.0, 0.0, 0.0, 0.0),
        ]),
    ]
}

#[test]
fn test_length_and_base_origin() {
    for convention in CONVENTIONS {
        let kinematics = DhKinematics::new(convention);
        for chain in sample_chains() {
            let positions = kinematics.joint_positions(chain.links());
            assert_eq!(positions.len(), chain.len() + 1);
            assert_eq!(positions[0], BASE_ORIGIN);
        }
    }
}

#[test]
fn test_empty_chain_is_base_only() {
    let positions = DhKinematics::default().joint_positions(&[]);
    assert_eq!(positions, vec![BASE_ORIGIN]);
}

#[test]
fn test_deterministic() {
    for convention in CONVENTIONS {
        let kinematics = DhKinematics::new(convention);
        for chain in sample_chains() {
            let first = kinematics.joint_positions(chain.links());
            let second = kinematics.joint_positions(chain.clone().links());
            assert!(bit_identical(&first, &second));
        }
    }
}

#[test]
fn test_all_zero_chain_stays_at_origin() {
    let chain = DhChain::new(vec![DhParams::default(); 4]);
    for convention in CONVENTIONS {
        let positions = DhKinematics::new(convention).joint_positions(chain.links());
        assert_eq!(positions.len(), 5);
        for p in &positions {
            assert_eq!(*p, Vec3::zeros());
        }
    }
}

#[test]
fn test_single_link_translation_along_x() {
    let length = 63.25;
    let chain = [DhParams::new(0.0, length, 0.0, 0.0)];
    for convention in CONVENTIONS {
        let positions = DhKinematics::new(convention).joint_positions(&chain);
        assert_eq!(positions, vec![BASE_ORIGIN, Vec3::new(length, 0.0, 0.0)]);
    }
}

#[test]
fn test_pure_rotation_does_not_move_joint() {
    for theta in [0.3, -1.7, PI, 12.0] {
        let chain = [DhParams::new(0.0, 0.0, 0.0, theta)];
        for convention in CONVENTIONS {
            let positions = DhKinematics::new(convention).joint_positions(&chain);
            assert!(positions[1].norm() < SMALL, "theta {} moved joint to {}", theta, positions[1]);
        }
    }
}

#[test]
fn test_coincident_joints_are_valid() {
    // Zero-length links between real ones: repeated points, no failure
    let chain = [
        DhParams::new(0.0, 10.0, 0.0, 0.5),
        DhParams::new(0.0, 0.0, 0.0, 0.0),
        DhParams::new(0.0, 0.0, 0.0, 1.2),
        DhParams::new(0.0, 5.0, 0.0, 0.0),
    ];
    let positions = DhKinematics::default().joint_positions(&chain);
    assert_eq!(positions[1], positions[2]);
    assert_eq!(positions[2], positions[3]);
    assert!(((positions[4] - positions[3]).norm() - 5.0).abs() < SMALL);
}

#[test]
fn test_planar_chain_matches_closed_form() {
    // Planar arm in the xy plane: x = sum(a_i cos(theta_1 + .. + theta_i))
    let (a1, a2, t1, t2) = (3.0, 2.0, 0.6, -1.1);
    let chain = [DhParams::new(0.0, a1, 0.0, t1), DhParams::new(0.0, a2, 0.0, t2)];
    let positions = DhKinematics::default().joint_positions(&chain);
    let expected = [
        BASE_ORIGIN,
        Vec3::new(a1 * t1.cos(), a1 * t1.sin(), 0.0),
        Vec3::new(a1 * t1.cos() + a2 * (t1 + t2).cos(), a1 * t1.sin() + a2 * (t1 + t2).sin(), 0.0),
    ];
    assert!(positions_approx_equal(&positions, &expected, SMALL));
}

#[test]
fn test_link_distances_preserved() {
    // Rigid motions: in the standard convention each link moves its origin by sqrt(a^2 + d^2)
    let kinematics = DhKinematics::default();
    for chain in sample_chains() {
        let positions = kinematics.joint_positions(chain.links());
        for (i, link) in chain.iter().enumerate() {
            let step = (positions[i + 1] - positions[i]).norm();
            let expected = (link.a * link.a + link.d * link.d).sqrt();
            assert!((step - expected).abs() < 1e-9, "link {}: {} vs {}", i, step, expected);
        }
    }
}

#[test]
fn test_non_finite_input_propagates() {
    let chain = [
        DhParams::new(0.0, 1.0, 0.0, 0.0),
        DhParams::new(0.0, f64::NAN, 0.0, 0.0),
        DhParams::new(0.0, 1.0, 0.0, 0.0),
    ];
    let positions = DhKinematics::default().joint_positions(&chain);
    assert_eq!(positions.len(), 4);
    assert_eq!(positions[1], Vec3::new(1.0, 0.0, 0.0));
    assert!(positions[2].x.is_nan());
    assert!(positions[3].x.is_nan(), "NaN must not be masked downstream");

    let infinite = [DhParams::new(0.0, 0.0, f64::INFINITY, 0.0)];
    let positions = DhKinematics::default().joint_positions(&infinite);
    assert!(positions[1].z.is_infinite());
}

#[test]
fn test_conventions_differ_on_diamond_leg() {
    let chain = DhChain::diamond_leg();
    let standard = DhKinematics::new(DhConvention::Standard).joint_positions(chain.links());
    let modified = DhKinematics::new(DhConvention::Modified).joint_positions(chain.links());
    assert!((standard[4] - modified[4]).norm() > 1.0);
}
