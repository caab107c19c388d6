//! JSON bodies exchanged with the control panel when it asks for the positions of an
//! edited chain: `{"dh_params": [{alpha, a, d, theta}, ...]}` in,
//! `{"positions": [[x, y, z], ...]}` out.
//!
//! JSON numbers can not hold NaN or infinities, so non-finite coordinates are written
//! as the strings `"NaN"`, `"Infinity"` and `"-Infinity"` and read back from them. A
//! diverged chain reaches the renderer as such, it is never turned into `null` or zero.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::kinematic_traits::{Kinematics, PositionSequence, Vec3};
use crate::parameter_error::ParameterError;
use crate::parameters::dh_kinematics::DhChain;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicsRequest {
    pub dh_params: DhChain,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicsResponse {
    #[serde(serialize_with = "serialize_positions", deserialize_with = "deserialize_positions")]
    pub positions: PositionSequence,
}

/// One coordinate on the wire: a plain number, or the name of a non-finite value.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum Coordinate {
    Number(f64),
    Named(String),
}

impl From<f64> for Coordinate {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Coordinate::Named("NaN".to_string())
        } else if value == f64::INFINITY {
            Coordinate::Named("Infinity".to_string())
        } else if value == f64::NEG_INFINITY {
            Coordinate::Named("-Infinity".to_string())
        } else {
            Coordinate::Number(value)
        }
    }
}

impl Coordinate {
    fn value(self) -> Result<f64, String> {
        match self {
            Coordinate::Number(value) => Ok(value),
            Coordinate::Named(name) => match name.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                other => Err(format!("invalid coordinate '{}'", other)),
            },
        }
    }
}

fn serialize_positions<S: Serializer>(positions: &PositionSequence, serializer: S) -> Result<S::Ok, S::Error> {
    let encoded: Vec<[Coordinate; 3]> = positions
        .iter()
        .map(|p| [p.x.into(), p.y.into(), p.z.into()])
        .collect();
    encoded.serialize(serializer)
}

fn deserialize_positions<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PositionSequence, D::Error> {
    let encoded = Vec::<[Coordinate; 3]>::deserialize(deserializer)?;
    encoded
        .into_iter()
        .map(|[x, y, z]| {
            Ok(Vec3::new(
                x.value().map_err(D::Error::custom)?,
                y.value().map_err(D::Error::custom)?,
                z.value().map_err(D::Error::custom)?,
            ))
        })
        .collect()
}

impl KinematicsRequest {
    pub fn from_json(body: &str) -> Result<Self, ParameterError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn evaluate(&self, kinematics: &dyn Kinematics) -> KinematicsResponse {
        KinematicsResponse {
            positions: kinematics.joint_positions(self.dh_params.links()),
        }
    }
}

impl KinematicsResponse {
    pub fn from_json(body: &str) -> Result<Self, ParameterError> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn to_json(&self) -> Result<String, ParameterError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics_impl::DhKinematics;
    use crate::parameters::dh_kinematics::DhParams;

    #[test]
    fn test_request_response() {
        let request = KinematicsRequest::from_json(
            r#"{"dh_params": [{"alpha": 0, "a": 2, "d": 0, "theta": 0},
                              {"alpha": 0, "a": 0, "d": 3, "theta": 0}]}"#,
        ).unwrap();
        let response = request.evaluate(&DhKinematics::default());
        assert_eq!(response.to_json().unwrap(), r#"{"positions":[[0.0,0.0,0.0],[2.0,0.0,0.0],[2.0,0.0,3.0]]}"#);
    }

    #[test]
    fn test_overflowing_chain_keeps_infinity() {
        // Two huge offsets overflow the tip to +inf
        let request = KinematicsRequest {
            dh_params: DhChain::from([DhParams::new(0.0, 0.0, 1e308, 0.0), DhParams::new(0.0, 0.0, 1e308, 0.0)]),
        };
        let response = request.evaluate(&DhKinematics::default());
        assert_eq!(response.positions[2].z, f64::INFINITY);

        let json = response.to_json().unwrap();
        assert!(json.contains(r#""Infinity""#), "{}", json);
        assert!(!json.contains("null"), "{}", json);

        let reloaded = KinematicsResponse::from_json(&json).unwrap();
        assert_eq!(reloaded, response);
    }

    #[test]
    fn test_non_finite_values_stay_distinct() {
        let response = KinematicsResponse {
            positions: vec![Vec3::new(f64::NAN, f64::INFINITY, f64::NEG_INFINITY), Vec3::new(1.5, -2.0, 0.0)],
        };
        let json = response.to_json().unwrap();
        assert_eq!(json, r#"{"positions":[["NaN","Infinity","-Infinity"],[1.5,-2.0,0.0]]}"#);

        let reloaded = KinematicsResponse::from_json(&json).unwrap();
        assert!(reloaded.positions[0].x.is_nan());
        assert_eq!(reloaded.positions[0].y, f64::INFINITY);
        assert_eq!(reloaded.positions[0].z, f64::NEG_INFINITY);
        assert_eq!(reloaded.positions[1], Vec3::new(1.5, -2.0, 0.0));
    }

    #[test]
    fn test_unknown_coordinate_name_rejected() {
        let result = KinematicsResponse::from_json(r#"{"positions":[["inf",0,0]]}"#);
        assert!(matches!(result, Err(ParameterError::ParseError(_))));
    }

    #[test]
    fn test_missing_field_rejected() {
        let result = KinematicsRequest::from_json(r#"{"dh_params": [{"alpha": 0, "a": 2, "d": 0}]}"#);
        assert!(matches!(result, Err(ParameterError::ParseError(_))));
    }

    #[test]
    fn test_empty_chain() {
        let request = KinematicsRequest::from_json(r#"{"dh_params": []}"#).unwrap();
        let response = request.evaluate(&DhKinematics::default());
        assert_eq!(response.positions.len(), 1);
    }
}
