//! Forward kinematics for the legs of the Diamond quadruped robot.
//!
//! Each leg is described as a chain of Denavit-Hartenberg (DH) links, base to tip: three
//! actuated joints (lower hip, upper hip, shoulder) followed by the fixed foot link. The
//! crate turns such a chain into the positions of every joint, which the control panel
//! draws as a stick figure, and keeps those positions up to date while joint angles are
//! reported by the robot or DH parameters are edited by hand.
//!
//! # Features
//!
//! - Link transforms in the standard (distal) DH convention, or in the modified (Craig)
//!   convention when asked for explicitly.
//! - Chain evaluation into joint positions, link frames or the tip frame.
//! - An editable parameter store that never exposes a chain together with positions
//!   computed from a different chain.
//! - A position feed where status polls and parameter edits share the same recomputation
//!   path, with the most recently triggered result always winning.
//! - Status reports in all shapes the robot has used, normalized into one leg state.
//! - Chains and leg geometry from YAML files, panel requests as JSON.
//!
//! # Conventions
//!
//! Inside the crate angles are radians. Joint angles reported by the robot are degrees and
//! are converted once, when they enter the [`position_feed`]. In the standard convention a
//! link is `RotZ(theta) * TransZ(d) * TransX(a) * RotX(alpha)`, so a single link with only
//! `a = L` set ends at `(L, 0, 0)`.
//!
//! ```
//! use diamond_kinematics::kinematic_traits::Kinematics;
//! use diamond_kinematics::kinematics_impl::DhKinematics;
//! use diamond_kinematics::parameters::dh_kinematics::DhChain;
//!
//! let kinematics = DhKinematics::default();
//! let positions = kinematics.joint_positions(DhChain::diamond_leg().links());
//! assert_eq!(positions.len(), 5);
//! ```

pub mod parameters;
pub mod parameters_legs;

#[cfg(feature = "allow_filesystem")]
pub mod parameters_from_file;

pub mod parameter_error;
pub mod utils;
pub mod kinematic_traits;
pub mod kinematics_impl;

pub mod parameter_store;
pub mod leg_state;
pub mod position_feed;
pub mod kinematics_request;

#[cfg(test)]
mod tests;
