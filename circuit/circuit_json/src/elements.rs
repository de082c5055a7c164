use std::fmt::{Display, Formatter};

use serde::Serializer;

#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    #[serde(serialize_with = "serialize_coordinate")]
    pub x: f64,
    #[serde(serialize_with = "serialize_coordinate")]
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Largest integer a browser can represent exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Whole numbers are written without a fractional part, e.g. `1` not `1.0`, as browsers write them.
fn serialize_coordinate<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    match value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        true => serializer.serialize_i64(*value as i64),
        false => serializer.serialize_f64(*value),
    }
}

/// A component as placed on the PCB.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct PcbComponent {
    pub pcb_component_id: String,
    pub source_component_id: String,
}

/// A component as declared in the source code, `name` is what users refer to it by, e.g. `R1`.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
pub struct SourceComponent {
    pub source_component_id: String,
    pub name: String,
}
