//! A minimal model of circuit JSON, the compiled representation of a circuit design.
//!
//! Circuit JSON is an array of elements, each tagged by a `type` field. Most consumers treat the document
//! as opaque; only the lookups needed to resolve manual edits are modelled here.

use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::trace;

pub use crate::elements::{PcbComponent, Point, SourceComponent};

mod elements;

pub const PCB_COMPONENT: &str = "pcb_component";
pub const SOURCE_COMPONENT: &str = "source_component";

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CircuitJson(Vec<Value>);

impl CircuitJson {
    /// Elements whose `type` field equals `element_type`, in document order.
    pub fn elements_of_type<'a>(&'a self, element_type: &'a str) -> impl Iterator<Item = &'a Value> + 'a {
        self.0
            .iter()
            .filter(move |element| element.get("type").and_then(Value::as_str) == Some(element_type))
    }

    pub fn pcb_component(&self, pcb_component_id: &str) -> Result<Option<PcbComponent>, CircuitJsonError> {
        self.find_typed(PCB_COMPONENT, "pcb_component_id", pcb_component_id)
    }

    pub fn source_component(&self, source_component_id: &str) -> Result<Option<SourceComponent>, CircuitJsonError> {
        self.find_typed(SOURCE_COMPONENT, "source_component_id", source_component_id)
    }

    /// Resolve the source component that a placed pcb component was generated from.
    pub fn source_component_for_pcb_component(
        &self,
        pcb_component_id: &str,
    ) -> Result<SourceComponent, CircuitJsonError> {
        let pcb_component = self
            .pcb_component(pcb_component_id)?
            .ok_or_else(|| CircuitJsonError::UnknownPcbComponent(pcb_component_id.to_string()))?;

        self.source_component(&pcb_component.source_component_id)?
            .ok_or_else(|| CircuitJsonError::UnknownSourceComponent {
                pcb_component_id: pcb_component.pcb_component_id.clone(),
                source_component_id: pcb_component.source_component_id.clone(),
            })
    }

    fn find_typed<T>(&self, element_type: &str, id_field: &str, id: &str) -> Result<Option<T>, CircuitJsonError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let Some(element) = self
            .elements_of_type(element_type)
            .find(|element| element.get(id_field).and_then(Value::as_str) == Some(id))
        else {
            trace!("element not found. type: {}, {}: {}", element_type, id_field, id);
            return Ok(None);
        };

        T::deserialize(element)
            .map(Some)
            .map_err(|cause| CircuitJsonError::InvalidElement {
                element_type: element_type.to_string(),
                id: id.to_string(),
                cause,
            })
    }
}

impl FromStr for CircuitJson {
    type Err = CircuitJsonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s).map_err(CircuitJsonError::Parse)
    }
}

#[derive(Error, Debug)]
pub enum CircuitJsonError {
    #[error("Unable to parse circuit json. cause: {0}")]
    Parse(serde_json::Error),

    #[error("Invalid element. type: {element_type}, id: {id}, cause: {cause}")]
    InvalidElement {
        element_type: String,
        id: String,
        cause: serde_json::Error,
    },

    #[error("Unknown pcb component. pcb_component_id: {0}")]
    UnknownPcbComponent(String),

    #[error("Unknown source component. pcb_component_id: {pcb_component_id}, source_component_id: {source_component_id}")]
    UnknownSourceComponent {
        pcb_component_id: String,
        source_component_id: String,
    },
}
