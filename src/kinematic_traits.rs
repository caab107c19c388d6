extern crate nalgebra as na;

use na::{Matrix4, Vector3};
use crate::parameters::dh_kinematics::DhParams;

/// Homogeneous 4x4 transform (rotation + translation) of a link frame relative to its parent.
/// ```
/// extern crate nalgebra as na;
/// use na::{Matrix4, Vector3};
///
/// type Transform = Matrix4<f64>;
///
/// // Pure translation by one unit along x
/// let transform = Transform::new_translation(&Vector3::new(1.0, 0.0, 0.0));
/// assert_eq!(transform[(0, 3)], 1.0);
/// ```
pub type Transform = Matrix4<f64>;

/// Position in the root frame of a chain.
pub type Vec3 = Vector3<f64>;

/// Joint positions of a chain, base origin first, then the origin of each link frame.
/// Always one element longer than the chain it was computed from.
pub type PositionSequence = Vec<Vec3>;

/// The base origin, position 0 of every position sequence.
pub const BASE_ORIGIN: Vec3 = Vec3::new(0.0, 0.0, 0.0);

/// Forward kinematics over a chain of Denavit-Hartenberg links. Implementations are pure:
/// the same chain always produces bit-identical output.
pub trait Kinematics: Send + Sync {
    /// Transform of a single link, relative to its parent frame.
    fn link_transform(&self, link: &DhParams) -> Transform;

    /// Cumulative frames of all links. Element 0 is the identity (base frame),
    /// element k is the frame reached after composing links 0..k.
    fn forward_with_link_frames(&self, chain: &[DhParams]) -> Vec<Transform>;

    /// Frame of the chain tip.
    fn forward(&self, chain: &[DhParams]) -> Transform;

    /// Position of every joint origin in the base frame, base origin included.
    fn joint_positions(&self, chain: &[DhParams]) -> PositionSequence;
}
