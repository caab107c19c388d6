use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::kinematic_traits::{Kinematics, PositionSequence, Transform, Vec3, BASE_ORIGIN};
use crate::parameters::dh_kinematics::DhParams;

/// Order in which the four elementary motions of a link are composed. Both conventions
/// describe valid kinematic chains, but the same numbers give a different skeleton under
/// each, so a chain must always be evaluated with the convention it was written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DhConvention {
    /// Classical (distal) convention:
    /// `T = RotZ(theta) * TransZ(d) * TransX(a) * RotX(alpha)`.
    /// Link length `a` translates along the x axis of the new frame.
    #[default]
    Standard,

    /// Craig's modified (proximal) convention:
    /// `T = RotX(alpha) * TransX(a) * RotZ(theta) * TransZ(d)`.
    Modified,
}

impl DhConvention {
    /// Builds the homogeneous transform of one link. Total over the reals, NaN or infinite
    /// parameters simply propagate into the matrix.
    pub fn transform(&self, link: &DhParams) -> Transform {
        let (sa, ca) = link.alpha.sin_cos();
        let (st, ct) = link.theta.sin_cos();
        let (a, d) = (link.a, link.d);

        match self {
            DhConvention::Standard => Transform::new(
                ct, -st * ca, st * sa, a * ct,
                st, ct * ca, -ct * sa, a * st,
                0.0, sa, ca, d,
                0.0, 0.0, 0.0, 1.0,
            ),
            DhConvention::Modified => Transform::new(
                ct, -st, 0.0, a,
                st * ca, ct * ca, -sa, -sa * d,
                st * sa, ct * sa, ca, ca * d,
                0.0, 0.0, 0.0, 1.0,
            ),
        }
    }
}

/// Forward kinematics of a Denavit-Hartenberg chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct DhKinematics {
    convention: DhConvention,
}

impl DhKinematics {
    /// Creates a new `DhKinematics` evaluating chains in the given convention.
    pub fn new(convention: DhConvention) -> Self {
        DhKinematics { convention }
    }

    pub fn convention(&self) -> DhConvention {
        self.convention
    }
}

/// Origin of the frame, that is, the translation column of the homogeneous transform.
pub(crate) fn frame_origin(frame: &Transform) -> Vec3 {
    Vec3::new(frame[(0, 3)], frame[(1, 3)], frame[(2, 3)])
}

impl Kinematics for DhKinematics {
    fn link_transform(&self, link: &DhParams) -> Transform {
        self.convention.transform(link)
    }

    fn forward_with_link_frames(&self, chain: &[DhParams]) -> Vec<Transform> {
        let mut frames = Vec::with_capacity(chain.len() + 1);
        let mut accumulated = Transform::identity();
        frames.push(accumulated);

        for link in chain {
            // Right multiplication: each link is expressed in the frame of its parent.
            accumulated *= self.link_transform(link);
            frames.push(accumulated);
        }
        frames
    }

    fn forward(&self, chain: &[DhParams]) -> Transform {
        chain
            .iter()
            .fold(Transform::identity(), |accumulated, link| accumulated * self.link_transform(link))
    }

    fn joint_positions(&self, chain: &[DhParams]) -> PositionSequence {
        let mut positions = Vec::with_capacity(chain.len() + 1);
        positions.push(BASE_ORIGIN);

        let mut accumulated = Transform::identity();
        for link in chain {
            accumulated *= self.link_transform(link);
            positions.push(frame_origin(&accumulated));
        }

        trace!(links = chain.len(), convention = ?self.convention, "evaluated chain");
        positions
    }
}
