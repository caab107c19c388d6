//! Defines the Denavit-Hartenberg parameter data structures

pub mod dh_kinematics {
    use std::fmt;
    use std::ops::{Index, IndexMut};
    use std::str::FromStr;

    use serde::{Deserialize, Serialize};

    use crate::parameter_error::ParameterError;
    use crate::utils::deg;

    /// Geometric descriptor of a single link, relating its frame to the frame of the parent link.
    /// Angles are in radians, lengths in whatever unit the leg geometry uses (millimeters for the
    /// Diamond legs).
    #[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
    pub struct DhParams {
        /// Link twist, rotation about the common normal.
        pub alpha: f64,

        /// Link length, distance along the common normal.
        pub a: f64,

        /// Link offset, distance along the joint axis.
        pub d: f64,

        /// Joint angle, rotation about the joint axis.
        pub theta: f64,
    }

    impl DhParams {
        pub const fn new(alpha: f64, a: f64, d: f64, theta: f64) -> Self {
            DhParams { alpha, a, d, theta }
        }

        /// Value of the given field.
        pub fn get(&self, field: DhField) -> f64 {
            match field {
                DhField::Alpha => self.alpha,
                DhField::A => self.a,
                DhField::D => self.d,
                DhField::Theta => self.theta,
            }
        }

        /// Copy of these parameters with exactly one field replaced.
        pub fn with(self, field: DhField, value: f64) -> Self {
            let mut params = self;
            match field {
                DhField::Alpha => params.alpha = value,
                DhField::A => params.a = value,
                DhField::D => params.d = value,
                DhField::Theta => params.theta = value,
            }
            params
        }

        /// True if all four fields are finite numbers.
        pub fn is_finite(&self) -> bool {
            DhField::ALL.iter().all(|&f| self.get(f).is_finite())
        }
    }

    /// Names one of the four fields of [`DhParams`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum DhField {
        Alpha,
        A,
        D,
        Theta,
    }

    impl DhField {
        /// All fields in the order the parameter table shows them.
        pub const ALL: [DhField; 4] = [DhField::Alpha, DhField::A, DhField::D, DhField::Theta];

        pub fn name(&self) -> &'static str {
            match self {
                DhField::Alpha => "alpha",
                DhField::A => "a",
                DhField::D => "d",
                DhField::Theta => "theta",
            }
        }
    }

    impl fmt::Display for DhField {
        fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str(self.name())
        }
    }

    impl FromStr for DhField {
        type Err = ParameterError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.trim().to_lowercase().as_str() {
                "alpha" => Ok(DhField::Alpha),
                "a" => Ok(DhField::A),
                "d" => Ok(DhField::D),
                "theta" => Ok(DhField::Theta),
                other => Err(ParameterError::UnknownField(other.to_string())),
            }
        }
    }

    /// Ordered sequence of link parameters, base to tip. The order defines the order
    /// in which link transforms are composed.
    #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct DhChain {
        links: Vec<DhParams>,
    }

    impl DhChain {
        pub fn new(links: Vec<DhParams>) -> Self {
            DhChain { links }
        }

        pub fn links(&self) -> &[DhParams] {
            &self.links
        }

        pub fn len(&self) -> usize {
            self.links.len()
        }

        pub fn is_empty(&self) -> bool {
            self.links.is_empty()
        }

        pub fn iter(&self) -> std::slice::Iter<'_, DhParams> {
            self.links.iter()
        }

        /// Convert to string yaml representation (quick viewing, etc).
        pub fn to_yaml(&self) -> String {
            let mut yaml = String::from("dh_params:\n");
            for link in &self.links {
                yaml.push_str(&format!(
                    "  - {{ alpha: {}, a: {}, d: {}, theta: {} }}\n",
                    deg(&link.alpha),
                    link.a,
                    link.d,
                    deg(&link.theta)
                ));
            }
            yaml
        }
    }

    impl From<Vec<DhParams>> for DhChain {
        fn from(links: Vec<DhParams>) -> Self {
            DhChain::new(links)
        }
    }

    impl<const N: usize> From<[DhParams; N]> for DhChain {
        fn from(links: [DhParams; N]) -> Self {
            DhChain::new(links.to_vec())
        }
    }

    impl AsRef<[DhParams]> for DhChain {
        fn as_ref(&self) -> &[DhParams] {
            &self.links
        }
    }

    impl Index<usize> for DhChain {
        type Output = DhParams;

        fn index(&self, index: usize) -> &DhParams {
            &self.links[index]
        }
    }

    impl IndexMut<usize> for DhChain {
        fn index_mut(&mut self, index: usize) -> &mut DhParams {
            &mut self.links[index]
        }
    }

    impl<'a> IntoIterator for &'a DhChain {
        type Item = &'a DhParams;
        type IntoIter = std::slice::Iter<'a, DhParams>;

        fn into_iter(self) -> Self::IntoIter {
            self.links.iter()
        }
    }
}
