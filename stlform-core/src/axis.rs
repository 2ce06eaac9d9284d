//! Coordinate axis selector

use crate::error::{Error, Result};
use nalgebra::{Unit, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three world axes
///
/// Parsed from the tokens `"X"`, `"Y"` and `"Z"` (case-insensitive); doubles
/// as the index 0/1/2 into a coordinate triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE", try_from = "String")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in application order
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Coordinate index of this axis
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Unit vector pointing along this axis
    pub fn unit(self) -> Unit<Vector3<f64>> {
        match self {
            Axis::X => Vector3::x_axis(),
            Axis::Y => Vector3::y_axis(),
            Axis::Z => Vector3::z_axis(),
        }
    }

    /// Upper-case token for this axis
    pub fn as_str(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

impl FromStr for Axis {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token.trim() {
            t if t.eq_ignore_ascii_case("x") => Ok(Axis::X),
            t if t.eq_ignore_ascii_case("y") => Ok(Axis::Y),
            t if t.eq_ignore_ascii_case("z") => Ok(Axis::Z),
            other => Err(Error::invalid_argument(format!(
                "unknown axis {other:?}, expected one of X, Y, Z"
            ))),
        }
    }
}

impl TryFrom<String> for Axis {
    type Error = Error;

    fn try_from(token: String) -> Result<Self> {
        token.parse()
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
