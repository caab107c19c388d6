//! Supports extracting DH chains and leg geometry from YAML file (optional)

use std::path::Path;
use serde::Deserialize;
use serde_saphyr::Options;

use crate::parameter_error::ParameterError;
use crate::parameters::dh_kinematics::{DhChain, DhParams};
use crate::parameters_legs::dh_kinematics::{LegGeometry, ACTUATED_LINKS};

fn default_offsets() -> Vec<f64> { vec![0.0; ACTUATED_LINKS] }
fn default_sign_corrections() -> Vec<i8> { vec![1; ACTUATED_LINKS] }

#[derive(Deserialize)]
struct ChainRoot {
    pub dh_params: Vec<DhParams>,
}

#[derive(Deserialize)]
struct LegRoot {
    pub dh_params: Vec<DhParams>,
    #[serde(default = "default_offsets")]
    pub joint_offsets: Vec<f64>,
    #[serde(default = "default_sign_corrections")]
    pub sign_corrections: Vec<i8>,
}

fn parse<T: for<'de> Deserialize<'de>>(contents: &str) -> Result<T, ParameterError> {
    serde_saphyr::from_str_with_options(
        contents,
        Options { angle_conversions: true, ..Default::default() },
    ).map_err(|e| ParameterError::ParseError(format!("{}", e)))
}

fn check_finite(links: &[DhParams]) -> Result<(), ParameterError> {
    for (i, link) in links.iter().enumerate() {
        if !link.is_finite() {
            return Err(ParameterError::ParseError(format!(
                "dh_params[{}] must be finite (got {:?})", i, link
            )));
        }
    }
    Ok(())
}

impl DhChain {
    /// Read the chain from YAML file. YAML file like this is supported:
    /// ```yaml
    /// # Diamond leg
    /// dh_params:
    ///   - { alpha: 0, a: 0, d: 15.5, theta: deg(90) }
    ///   - { alpha: deg(-90), a: -9.3, d: 21.1, theta: -2.1 }
    ///   - { alpha: 0, a: 63.25, d: 0, theta: -2 }
    ///   - { alpha: 0, a: 82.5, d: 0, theta: 0 }
    /// ```
    /// Angles are radians unless written with the deg(angle) function (serde_saphyr).
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ParameterError> {
        let root: ChainRoot = parse(contents)?;
        check_finite(&root.dh_params)?;
        Ok(DhChain::new(root.dh_params))
    }
}

impl LegGeometry {
    /// Read the leg geometry from YAML file. Same as a chain file, with optional
    /// offsets and sign corrections of the three actuated joints:
    /// ```yaml
    /// dh_params:
    ///   - { alpha: 0, a: 0, d: 15.5, theta: 0 }
    ///   - { alpha: deg(-90), a: -9.3, d: 21.1, theta: 0 }
    ///   - { alpha: 0, a: 63.25, d: 0, theta: 0 }
    ///   - { alpha: 0, a: 82.5, d: 0, theta: 0 }
    /// joint_offsets: [deg(90), deg(90), deg(90)]
    /// sign_corrections: [1, -1, 1]
    /// ```
    /// Offsets default to 0, sign corrections to 1.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ParameterError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ParameterError> {
        let root: LegRoot = parse(contents)?;
        check_finite(&root.dh_params)?;

        let joint_offsets = vec_to_three(root.joint_offsets)?;
        for (i, &ofs) in joint_offsets.iter().enumerate() {
            if !ofs.is_finite() {
                return Err(ParameterError::ParseError(format!(
                    "joint_offsets[{}] must be finite (got {})", i, ofs
                )));
            }
        }

        let geometry = LegGeometry {
            links: DhChain::new(root.dh_params),
            joint_offsets,
            sign_corrections: vec_to_three(root.sign_corrections)?,
        };
        geometry.validate()?;
        Ok(geometry)
    }
}

/// Convert a vector to an array, one value per actuated joint.
fn vec_to_three<T: Copy>(v: Vec<T>) -> Result<[T; ACTUATED_LINKS], ParameterError> {
    let found = v.len();
    v.try_into().map_err(|_| ParameterError::InvalidLength { expected: ACTUATED_LINKS, found })
}
