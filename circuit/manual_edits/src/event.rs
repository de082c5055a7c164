use circuit_json::Point;

/// A single user manipulation of the rendered circuit.
///
/// Events are produced by the viewer while a gesture is performed, `in_progress` is set until the gesture
/// (e.g. a drag) is finished.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EditEvent {
    pub edit_event_id: String,
    #[serde(default)]
    pub in_progress: bool,
    /// milliseconds since the unix epoch
    #[serde(default)]
    pub created_at: f64,
    #[serde(flatten)]
    pub kind: EditEventKind,
}

impl EditEvent {
    pub fn is_in_progress(&self) -> bool {
        self.in_progress
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "edit_event_type", rename_all = "snake_case")]
pub enum EditEventKind {
    EditPcbComponentLocation {
        pcb_component_id: String,
        original_center: Point,
        new_center: Point,
    },
    EditPcbTraceHint {
        pcb_port_id: String,
        #[serde(default)]
        pcb_trace_hint_id: Option<String>,
        route: Vec<TraceHintPoint>,
    },
    EditSchematicComponentLocation {
        schematic_component_id: String,
        original_center: Point,
        new_center: Point,
    },
    /// Event types introduced by newer viewers, these are never merged.
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TraceHintPoint {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub via: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_layer: Option<String>,
}
