use circuit_json::CircuitJson;
use tracing::{debug, trace, warn};

use crate::event::{EditEvent, EditEventKind};
use crate::overlay::{ManualEditsError, ManualEditsFile, PcbPlacement};

/// Merges a batch of edit events into the manual edits file.
///
/// Implementations must not filter in-progress events, callers decide which batches are complete.
pub trait EditEventReconciler {
    fn apply(
        &self,
        edit_events: &[EditEvent],
        circuit_json: &CircuitJson,
        manual_edits_file_content: Option<&str>,
    ) -> Result<ManualEditsFile, ManualEditsError>;
}

/// Records moved pcb components as `pcb_placements`, selected by source component name.
#[derive(Debug, Default, Clone, Copy)]
pub struct PcbEditEventReconciler;

impl EditEventReconciler for PcbEditEventReconciler {
    fn apply(
        &self,
        edit_events: &[EditEvent],
        circuit_json: &CircuitJson,
        manual_edits_file_content: Option<&str>,
    ) -> Result<ManualEditsFile, ManualEditsError> {
        let mut manual_edits_file = ManualEditsFile::parse(manual_edits_file_content)?;

        for edit_event in edit_events {
            let EditEventKind::EditPcbComponentLocation {
                pcb_component_id,
                new_center,
                ..
            } = &edit_event.kind
            else {
                trace!("ignoring edit event. edit_event_id: {}", edit_event.edit_event_id);
                continue;
            };

            let source_component = match circuit_json.source_component_for_pcb_component(pcb_component_id) {
                Ok(source_component) => source_component,
                Err(error) => {
                    warn!(
                        "Unable to resolve component for edit event. edit_event_id: {}, cause: {}",
                        edit_event.edit_event_id, error
                    );
                    continue;
                }
            };

            debug!(
                "Placing component. selector: {}, center: {}",
                source_component.name, new_center
            );
            manual_edits_file.upsert_pcb_placement(PcbPlacement::new(source_component.name, *new_center))?;
        }

        Ok(manual_edits_file)
    }
}
