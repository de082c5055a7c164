//! Manual edits made to a rendered circuit, and how they are merged into the manual edits file.
//!
//! The manual edits file (the overlay) records user-applied placement overrides that are layered on top
//! of the generated circuit json.

pub use crate::event::{EditEvent, EditEventKind, TraceHintPoint};
pub use crate::overlay::{ManualEditsError, ManualEditsFile, PcbPlacement, GROUP_CENTER};
pub use crate::reconciler::{EditEventReconciler, PcbEditEventReconciler};

mod event;
mod overlay;
mod reconciler;
