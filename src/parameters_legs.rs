//! Hardcoded DH geometry of the Diamond legs

pub mod dh_kinematics {
    use std::f64::consts::FRAC_PI_2;

    use serde::{Deserialize, Serialize};

    use crate::leg_state::JointAngles;
    use crate::parameter_error::ParameterError;
    use crate::parameters::dh_kinematics::{DhChain, DhParams};
    use crate::utils::{deg, AngleUnit};

    /// Number of links in a leg chain: lower hip, upper hip, shoulder and the foot.
    pub const LEG_LINKS: usize = 4;

    /// Number of actuated links, the first ones in the chain.
    pub const ACTUATED_LINKS: usize = 3;

    /// Default leg pose shown in the parameter editor (lengths in millimeters).
    pub const DIAMOND_LEG: [DhParams; LEG_LINKS] = [
        DhParams::new(0.0, 0.0, 15.5, FRAC_PI_2),
        DhParams::new(-FRAC_PI_2, -9.3, 21.1, -2.1),
        DhParams::new(0.0, 63.25, 0.0, -2.0),
        DhParams::new(0.0, 82.5, 0.0, 0.0),
    ];

    impl DhChain {
        /// The default Diamond leg chain, the target of "reset".
        pub fn diamond_leg() -> Self {
            DhChain::from(DIAMOND_LEG)
        }
    }

    /// Fixed geometry of one leg, with the rule mapping reported joint angles into the
    /// `theta` of the actuated links. Link `i` for `i < 3` receives
    /// `theta = angle * sign_corrections[i] - joint_offsets[i]` (radians); the last link
    /// is the foot and never changes.
    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    pub struct LegGeometry {
        /// Link parameters. The `theta` of actuated links is overwritten by angle reports.
        pub links: DhChain,

        /// Subtracted from each actuated angle after sign correction, radians. Servos report
        /// 90 degrees at their mechanical center.
        pub joint_offsets: [f64; ACTUATED_LINKS],

        /// Direction of positive rotation of each actuated joint, `1` or `-1`.
        pub sign_corrections: [i8; ACTUATED_LINKS],
    }

    impl Default for LegGeometry {
        fn default() -> Self {
            LegGeometry::diamond()
        }
    }

    impl LegGeometry {
        /// Geometry of the Diamond legs: servo center maps to `theta = 0`.
        pub fn diamond() -> Self {
            LegGeometry {
                links: DhChain::diamond_leg(),
                joint_offsets: [FRAC_PI_2; ACTUATED_LINKS],
                sign_corrections: [1; ACTUATED_LINKS],
            }
        }

        /// Checks chain length and sign corrections.
        pub fn validate(&self) -> Result<(), ParameterError> {
            if self.links.len() != LEG_LINKS {
                return Err(ParameterError::InvalidLength {
                    expected: LEG_LINKS,
                    found: self.links.len(),
                });
            }
            for (i, &sc) in self.sign_corrections.iter().enumerate() {
                if sc != -1 && sc != 1 {
                    return Err(ParameterError::ParseError(format!(
                        "sign_corrections[{}] must be -1 or 1 (got {})", i, sc
                    )));
                }
            }
            Ok(())
        }

        /// Builds the leg chain for the given joint angles. Only the `theta` of the three
        /// actuated links is substituted, all other parameters come from the geometry.
        pub fn chain_for(&self, angles: &JointAngles, unit: AngleUnit) -> DhChain {
            let mut chain = self.links.clone();
            for (i, angle) in angles.as_array().into_iter().enumerate() {
                if i >= chain.len() {
                    break;
                }
                let q = unit.to_radians(angle);
                chain[i].theta = q * self.sign_corrections[i] as f64 - self.joint_offsets[i];
            }
            chain
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            format!(
                "{}joint_offsets: [{}]\nsign_corrections: [{}]\n",
                self.links.to_yaml(),
                self.joint_offsets.iter().map(deg).collect::<Vec<_>>().join(","),
                self.sign_corrections.iter().map(|x| x.to_string()).collect::<Vec<_>>().join(",")
            )
        }
    }
}
