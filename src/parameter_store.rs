//! Editable DH chain with its always-matching joint positions.
//!
//! The store owns the chain being edited and recomputes the positions on every accepted
//! change. Chain and positions are published together as one immutable [`ChainSnapshot`],
//! swapped as a whole, so a reader can never pair a chain with positions computed from
//! a different one.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::kinematic_traits::{Kinematics, PositionSequence};
use crate::kinematics_impl::DhKinematics;
use crate::parameter_error::ParameterError;
use crate::parameters::dh_kinematics::{DhChain, DhField};

/// Chain and the positions computed from it, at one revision of the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ChainSnapshot {
    /// Incremented on every accepted change, starts at 0.
    pub revision: u64,
    pub chain: DhChain,
    pub positions: PositionSequence,
}

pub struct ParameterStore {
    kinematics: Arc<dyn Kinematics>,
    preset: DhChain,
    current: Arc<ChainSnapshot>,
}

impl ParameterStore {
    /// Creates the store holding `preset`, which is also what [`ParameterStore::reset`]
    /// restores.
    pub fn new(kinematics: Arc<dyn Kinematics>, preset: DhChain) -> Self {
        let positions = kinematics.joint_positions(preset.links());
        let current = Arc::new(ChainSnapshot {
            revision: 0,
            chain: preset.clone(),
            positions,
        });
        ParameterStore { kinematics, preset, current }
    }

    /// Store with the default Diamond leg, evaluated in the standard convention.
    pub fn diamond_leg() -> Self {
        Self::new(Arc::new(DhKinematics::default()), DhChain::diamond_leg())
    }

    /// Current chain and positions. The returned snapshot stays valid and unchanged
    /// whatever happens to the store later.
    pub fn snapshot(&self) -> Arc<ChainSnapshot> {
        Arc::clone(&self.current)
    }

    pub fn chain(&self) -> &DhChain {
        &self.current.chain
    }

    pub fn positions(&self) -> &PositionSequence {
        &self.current.positions
    }

    pub fn revision(&self) -> u64 {
        self.current.revision
    }

    pub fn preset(&self) -> &DhChain {
        &self.preset
    }

    /// Replaces the whole chain at once and recomputes positions.
    pub fn replace_all(&mut self, chain: DhChain) {
        self.publish(chain);
    }

    /// Restores the preset chain.
    pub fn reset(&mut self) {
        self.publish(self.preset.clone());
    }

    /// Replaces one field of one link. A non-finite value is rejected and leaves the store
    /// exactly as it was.
    ///
    /// # Panics
    /// If `index` is not a link of the current chain.
    pub fn update_field(&mut self, index: usize, field: DhField, value: f64) -> Result<(), ParameterError> {
        let links = self.current.chain.len();
        assert!(index < links, "link index {} out of range for a chain of {} links", index, links);

        if !value.is_finite() {
            warn!(index, %field, value, "rejected non-finite DH parameter");
            return Err(ParameterError::NonFiniteValue {
                field: format!("{}[{}]", field, index),
                value,
            });
        }

        let mut chain = self.current.chain.clone();
        chain[index] = chain[index].with(field, value);
        self.publish(chain);
        Ok(())
    }

    /// Same as [`ParameterStore::update_field`], for values typed into the parameter table.
    /// Text that does not parse as a number is rejected without touching the store.
    ///
    /// # Panics
    /// If `index` is not a link of the current chain.
    pub fn update_field_text(&mut self, index: usize, field: DhField, text: &str) -> Result<(), ParameterError> {
        match text.trim().parse::<f64>() {
            Ok(value) => self.update_field(index, field, value),
            Err(e) => {
                warn!(index, %field, text, "rejected non-numeric DH parameter");
                Err(ParameterError::ParseError(format!("{}[{}] = '{}': {}", field, index, text, e)))
            }
        }
    }

    fn publish(&mut self, chain: DhChain) {
        let positions = self.kinematics.joint_positions(chain.links());
        let revision = self.current.revision + 1;
        debug!(revision, links = chain.len(), "recomputed joint positions");
        self.current = Arc::new(ChainSnapshot { revision, chain, positions });
    }
}
