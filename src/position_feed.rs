//! Single recomputation path for live angle reports and interactive DH edits.
//!
//! Both kinds of trigger are turned into a chain and evaluated by the same [`Kinematics`],
//! so positions from a status poll and from the parameter editor can not diverge numerically.
//! Every trigger gets a generation number when submitted. A result is only published
//! if nothing newer has been published for that leg, so when results arrive out of order
//! the most recently triggered one wins and older ones are dropped.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::kinematic_traits::{Kinematics, PositionSequence};
use crate::kinematics_impl::DhKinematics;
use crate::leg_state::{JointAngles, JointState, LegName, LegState, RobotStatus};
use crate::parameters::dh_kinematics::DhChain;
use crate::parameters_legs::dh_kinematics::LegGeometry;
use crate::utils::AngleUnit;

/// Something that requires the positions of a leg to be recomputed.
#[derive(Debug, Clone, PartialEq)]
pub enum Trigger {
    /// New joint angles from a status poll, in the feed's angle unit.
    AngleReport { leg: LegName, joints: [JointState; 3] },

    /// A complete chain from the parameter editor.
    ParameterEdit { leg: LegName, chain: DhChain },
}

impl Trigger {
    /// Angle report carrying commanded angles only.
    pub fn angles(leg: LegName, angles: JointAngles) -> Self {
        Trigger::AngleReport {
            leg,
            joints: angles.as_array().map(JointState::commanded),
        }
    }

    pub fn edit(leg: LegName, chain: DhChain) -> Self {
        Trigger::ParameterEdit { leg, chain }
    }

    pub fn leg(&self) -> LegName {
        match self {
            Trigger::AngleReport { leg, .. } | Trigger::ParameterEdit { leg, .. } => *leg,
        }
    }
}

/// A recomputation that has been triggered but not evaluated yet. It owns its chain,
/// so later triggers can not change what it computes.
#[derive(Debug, Clone)]
pub struct PendingRecompute {
    generation: u64,
    leg: LegName,
    chain: DhChain,
    joints: Option<[JointState; 3]>,
}

impl PendingRecompute {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn chain(&self) -> &DhChain {
        &self.chain
    }

    pub fn evaluate(self, kinematics: &dyn Kinematics) -> Recomputed {
        let positions = kinematics.joint_positions(self.chain.links());
        Recomputed {
            generation: self.generation,
            leg: self.leg,
            joints: self.joints,
            positions,
        }
    }
}

/// Evaluated recomputation, ready to be published.
#[derive(Debug, Clone)]
pub struct Recomputed {
    generation: u64,
    leg: LegName,
    joints: Option<[JointState; 3]>,
    pub positions: PositionSequence,
}

impl Recomputed {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Default)]
struct LegEntry {
    state: LegState,
    published: u64,
}

/// Owns the latest [`LegState`] of every leg. There is one feed per control panel,
/// passed to whoever needs it.
pub struct PositionFeed {
    kinematics: Arc<dyn Kinematics>,
    geometry: BTreeMap<LegName, LegGeometry>,
    unit: AngleUnit,
    next_generation: u64,
    legs: BTreeMap<LegName, LegEntry>,
}

impl PositionFeed {
    /// Creates a feed where every leg has the same geometry.
    pub fn new(kinematics: Arc<dyn Kinematics>, geometry: LegGeometry, unit: AngleUnit) -> Self {
        PositionFeed {
            kinematics,
            geometry: LegName::ALL.into_iter().map(|leg| (leg, geometry.clone())).collect(),
            unit,
            next_generation: 1,
            legs: BTreeMap::new(),
        }
    }

    /// Feed for the Diamond robot: standard DH convention, angles reported in degrees.
    pub fn diamond() -> Self {
        Self::new(Arc::new(DhKinematics::default()), LegGeometry::diamond(), AngleUnit::Degrees)
    }

    /// Overrides the geometry of one leg.
    pub fn set_geometry(&mut self, leg: LegName, geometry: LegGeometry) {
        self.geometry.insert(leg, geometry);
    }

    pub fn geometry(&self, leg: LegName) -> &LegGeometry {
        &self.geometry[&leg]
    }

    pub fn unit(&self) -> AngleUnit {
        self.unit
    }

    pub fn kinematics(&self) -> &dyn Kinematics {
        self.kinematics.as_ref()
    }

    /// Captures the chain a trigger asks for and assigns it the next generation.
    pub fn submit(&mut self, trigger: Trigger) -> PendingRecompute {
        let generation = self.next_generation;
        self.next_generation += 1;

        match trigger {
            Trigger::AngleReport { leg, joints } => {
                let angles = JointAngles::new(joints[0].angle, joints[1].angle, joints[2].angle);
                if !angles.is_finite() {
                    warn!(%leg, ?angles, "non-finite joint angle reported");
                }
                let chain = self.geometry[&leg].chain_for(&angles, self.unit);
                PendingRecompute { generation, leg, chain, joints: Some(joints) }
            }
            Trigger::ParameterEdit { leg, chain } => {
                PendingRecompute { generation, leg, chain, joints: None }
            }
        }
    }

    /// Publishes an evaluated result unless something triggered later has already been
    /// published for the same leg. Returns whether the result was taken.
    pub fn publish(&mut self, result: Recomputed) -> bool {
        let entry = self.legs.entry(result.leg).or_default();
        if result.generation <= entry.published {
            debug!(leg = %result.leg, generation = result.generation, published = entry.published,
                "discarded superseded recomputation");
            return false;
        }

        entry.published = result.generation;
        if let Some([lower_hip, upper_hip, shoulder]) = result.joints {
            entry.state.lower_hip = lower_hip;
            entry.state.upper_hip = upper_hip;
            entry.state.shoulder = shoulder;
        }
        entry.state.positions = result.positions;
        true
    }

    /// Submits, evaluates and publishes in one go. Returns the positions now exposed for the leg.
    pub fn apply(&mut self, trigger: Trigger) -> &PositionSequence {
        let leg = trigger.leg();
        let pending = self.submit(trigger);
        let result = pending.evaluate(self.kinematics.as_ref());
        self.publish(result);
        &self.legs[&leg].state.positions
    }

    /// Feeds every leg of a status poll through [`PositionFeed::apply`].
    pub fn apply_status(&mut self, status: &RobotStatus) {
        for (&leg, report) in &status.legs {
            let trigger = Trigger::AngleReport { leg, joints: report.joints() };
            self.apply(trigger);
        }
    }

    /// Latest published positions of the leg, if any were published yet.
    pub fn positions(&self, leg: LegName) -> Option<&PositionSequence> {
        self.legs.get(&leg).map(|entry| &entry.state.positions)
    }

    pub fn leg_state(&self, leg: LegName) -> Option<&LegState> {
        self.legs.get(&leg).map(|entry| &entry.state)
    }
}
