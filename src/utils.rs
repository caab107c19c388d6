//! Helper functions

use serde::{Deserialize, Serialize};

use crate::kinematic_traits::{PositionSequence, Vec3};

/// Checks if all coordinates of all positions are finite. The evaluator never masks
/// non-finite values, callers that must not draw them can use this to skip a sequence.
pub fn is_valid(positions: &PositionSequence) -> bool {
    positions.iter().all(|p| p.iter().all(|c| c.is_finite()))
}

/// Unit of joint angles as they cross the system boundary. Everything inside the evaluator
/// is in radians, reports are converted exactly once when they enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    /// Servo angles, as the robot reports them.
    #[default]
    Degrees,
    Radians,
}

impl AngleUnit {
    /// Convert angle in this unit to radians
    pub fn to_radians(&self, angle: f64) -> f64 {
        match self {
            AngleUnit::Degrees => angle.to_radians(),
            AngleUnit::Radians => angle,
        }
    }

    /// Convert angle in radians to this unit
    pub fn from_radians(&self, radians: f64) -> f64 {
        match self {
            AngleUnit::Degrees => radians.to_degrees(),
            AngleUnit::Radians => radians,
        }
    }
}

/// Print a position sequence, one joint per line.
pub fn dump_positions(positions: &PositionSequence) {
    if positions.is_empty() {
        println!("No positions");
    }
    for (i, p) in positions.iter().enumerate() {
        println!("{}: {}", i, format_position(p));
    }
}

/// Single position as "x, y, z" with fixed precision.
pub fn format_position(p: &Vec3) -> String {
    format!("{:9.4}, {:9.4}, {:9.4}", p.x, p.y, p.z)
}

/// formatting for YAML output
pub(crate) fn deg(x: &f64) -> String {
    if *x == 0.0 {
        return "0".to_string();
    }
    format!("deg({:.4})", x.to_degrees())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deg_formatting() {
        assert_eq!(deg(&0.0), "0");
        assert_eq!(deg(&std::f64::consts::FRAC_PI_2), "deg(90.0000)");
        assert_eq!(deg(&-std::f64::consts::PI), "deg(-180.0000)");
    }

    #[test]
    fn test_angle_units() {
        assert_eq!(AngleUnit::Radians.to_radians(1.25), 1.25);
        assert!((AngleUnit::Degrees.to_radians(180.0) - std::f64::consts::PI).abs() < 1e-12);
        assert!((AngleUnit::Degrees.from_radians(std::f64::consts::FRAC_PI_2) - 90.0).abs() < 1e-12);
    }

    #[test]
    fn test_is_valid() {
        let mut positions = vec![Vec3::zeros(), Vec3::new(1.0, 2.0, 3.0)];
        assert!(is_valid(&positions));
        positions.push(Vec3::new(f64::NAN, 0.0, 0.0));
        assert!(!is_valid(&positions));
    }
}
