use circuit_json::Point;
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

pub const GROUP_CENTER: &str = "group_center";

const PCB_PLACEMENTS: &str = "pcb_placements";

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PcbPlacement {
    /// e.g. `R1`, the name of the source component
    pub selector: String,
    pub center: Point,
    pub relative_to: String,
}

impl PcbPlacement {
    pub fn new(selector: String, center: Point) -> Self {
        Self {
            selector,
            center,
            relative_to: GROUP_CENTER.to_string(),
        }
    }
}

/// The manual edits file document.
///
/// Only `pcb_placements` is interpreted, every other key (e.g. `manual_trace_hints`, `schematic_placements`)
/// is carried through unchanged and in its original order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManualEditsFile {
    document: Map<String, Value>,
}

impl ManualEditsFile {
    /// Absent or blank content is treated as an empty document.
    pub fn parse(content: Option<&str>) -> Result<Self, ManualEditsError> {
        let content = match content {
            Some(content) if !content.trim().is_empty() => content,
            _ => return Ok(Self::default()),
        };

        let value: Value = serde_json::from_str(content).map_err(ManualEditsError::InvalidContent)?;
        match value {
            Value::Object(document) => Ok(Self {
                document,
            }),
            _ => Err(ManualEditsError::NotAnObject),
        }
    }

    pub fn pcb_placements(&self) -> Result<Vec<PcbPlacement>, ManualEditsError> {
        match self.document.get(PCB_PLACEMENTS) {
            None => Ok(vec![]),
            Some(placements) => {
                Vec::<PcbPlacement>::deserialize(placements).map_err(ManualEditsError::InvalidPcbPlacements)
            }
        }
    }

    /// Replaces the placement with the same selector, keeping its position in the list, otherwise appends it.
    pub fn upsert_pcb_placement(&mut self, placement: PcbPlacement) -> Result<(), ManualEditsError> {
        let placement_value = serde_json::to_value(&placement).map_err(ManualEditsError::Serialize)?;

        let placements = self
            .document
            .entry(PCB_PLACEMENTS)
            .or_insert_with(|| Value::Array(vec![]));

        let Value::Array(placements) = placements else {
            return Err(ManualEditsError::PcbPlacementsNotAnArray);
        };

        let existing = placements
            .iter_mut()
            .find(|candidate| candidate.get("selector").and_then(Value::as_str) == Some(placement.selector.as_str()));

        match existing {
            Some(existing) => *existing = placement_value,
            None => placements.push(placement_value),
        }

        Ok(())
    }

    /// Pretty-printed with two space indentation.
    pub fn to_pretty_string(&self) -> Result<String, ManualEditsError> {
        serde_json::to_string_pretty(&self.document).map_err(ManualEditsError::Serialize)
    }
}

#[derive(Error, Debug)]
pub enum ManualEditsError {
    #[error("Invalid manual edits file content. cause: {0}")]
    InvalidContent(serde_json::Error),
    #[error("Manual edits file content must be a JSON object")]
    NotAnObject,
    #[error("Invalid pcb placements. cause: {0}")]
    InvalidPcbPlacements(serde_json::Error),
    #[error("Manual edits file 'pcb_placements' must be an array")]
    PcbPlacementsNotAnArray,
    #[error("Unable to serialize manual edits file. cause: {0}")]
    Serialize(serde_json::Error),
}
