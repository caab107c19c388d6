//! Canonical leg state and the status report shapes the robot has used over time.
//!
//! Status polls have reported legs either as flat `[lower_hip, upper_hip, shoulder]`
//! arrays, as maps of joint name to angle, or as maps of joint name to a nested object
//! carrying the commanded angle, the measured angle and the feedback calibration.
//! All of them are normalized into [`LegState`] here, so the kinematics only ever
//! deals with one schema.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::kinematic_traits::PositionSequence;
use crate::parameter_error::ParameterError;

/// The four legs of the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LegName {
    FrontLeft,
    BackLeft,
    BackRight,
    FrontRight,
}

impl LegName {
    pub const ALL: [LegName; 4] = [
        LegName::FrontLeft,
        LegName::BackLeft,
        LegName::BackRight,
        LegName::FrontRight,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            LegName::FrontLeft => "front_left",
            LegName::BackLeft => "back_left",
            LegName::BackRight => "back_right",
            LegName::FrontRight => "front_right",
        }
    }
}

impl fmt::Display for LegName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LegName {
    type Err = ParameterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LegName::ALL
            .into_iter()
            .find(|leg| leg.name() == s)
            .ok_or_else(|| ParameterError::UnknownLeg(s.to_string()))
    }
}

/// Angles of the three actuated joints of one leg, in the unit of the report they came from.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointAngles {
    pub lower_hip: f64,
    pub upper_hip: f64,
    pub shoulder: f64,
}

impl JointAngles {
    pub fn new(lower_hip: f64, upper_hip: f64, shoulder: f64) -> Self {
        JointAngles { lower_hip, upper_hip, shoulder }
    }

    /// Angles in chain order: lower hip, upper hip, shoulder.
    pub fn as_array(&self) -> [f64; 3] {
        [self.lower_hip, self.upper_hip, self.shoulder]
    }

    pub fn is_finite(&self) -> bool {
        self.as_array().iter().all(|a| a.is_finite())
    }
}

/// Linear calibration of the servo position feedback: `actual = m * reading + b`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub m: f64,
    pub b: f64,
}

/// One joint of a leg. Only `angle` is always present; the rest is extended telemetry
/// that only some controller builds report.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct JointState {
    /// Commanded angle.
    pub angle: f64,

    /// Angle measured by the servo feedback, if available.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calibration: Option<Calibration>,
}

impl JointState {
    pub fn commanded(angle: f64) -> Self {
        JointState { angle, actual: None, calibration: None }
    }
}

/// Canonical per-leg state: joint angles plus the positions derived from them.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LegState {
    pub lower_hip: JointState,
    pub upper_hip: JointState,
    pub shoulder: JointState,
    pub positions: PositionSequence,
}

impl LegState {
    /// Commanded angles of the three joints.
    pub fn angles(&self) -> JointAngles {
        JointAngles::new(self.lower_hip.angle, self.upper_hip.angle, self.shoulder.angle)
    }
}

/// A joint as it appears in a status report: a bare number or the nested telemetry object.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JointReport {
    Angle(f64),
    Detailed {
        angle: f64,
        #[serde(default)]
        actual: Option<f64>,
        #[serde(default)]
        m: Option<f64>,
        #[serde(default)]
        b: Option<f64>,
    },
}

impl From<JointReport> for JointState {
    fn from(report: JointReport) -> Self {
        match report {
            JointReport::Angle(angle) => JointState::commanded(angle),
            JointReport::Detailed { angle, actual, m, b } => JointState {
                angle,
                actual,
                calibration: match (m, b) {
                    (Some(m), Some(b)) => Some(Calibration { m, b }),
                    _ => None,
                },
            },
        }
    }
}

/// A leg as it appears in a status report.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LegReport {
    /// `[lower_hip, upper_hip, shoulder]`
    Angles([f64; 3]),
    Joints {
        lower_hip: JointReport,
        upper_hip: JointReport,
        shoulder: JointReport,
    },
}

impl LegReport {
    /// Normalized joints in chain order.
    pub fn joints(&self) -> [JointState; 3] {
        match *self {
            LegReport::Angles(angles) => angles.map(JointState::commanded),
            LegReport::Joints { lower_hip, upper_hip, shoulder } => {
                [lower_hip.into(), upper_hip.into(), shoulder.into()]
            }
        }
    }

    pub fn angles(&self) -> JointAngles {
        let [lower_hip, upper_hip, shoulder] = self.joints();
        JointAngles::new(lower_hip.angle, upper_hip.angle, shoulder.angle)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatteryState {
    pub percentage: f64,
    pub status: String,
}

/// One status poll: every leg the controller reported, plus the battery if present.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RobotStatus {
    pub legs: BTreeMap<LegName, LegReport>,
    #[serde(default)]
    pub battery: Option<BatteryState>,
}

impl RobotStatus {
    /// Parse the JSON body of a status poll.
    pub fn from_json(body: &str) -> Result<Self, ParameterError> {
        Ok(serde_json::from_str(body)?)
    }
}
