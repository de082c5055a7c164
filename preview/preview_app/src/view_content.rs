use circuit_json::CircuitJson;

/// Identifies the 3D scene rendered for one circuit json snapshot.
///
/// The shell keeps the scene object it creates keyed by this handle, e.g. for exporting, a new handle
/// is issued whenever the circuit json changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SceneHandle(pub u64);

impl SceneHandle {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CodeEditorContent {
    pub code: String,
    pub manual_edits_file_content: String,
    pub read_only: bool,
    pub is_streaming: bool,
    pub show_import_and_format_buttons: bool,
}

/// What to render for the active view.
///
/// Views keyed by `remount_key` must discard any visual state when the key changes.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum ViewContent {
    Code(CodeEditorContent),
    Pcb {
        circuit_json: CircuitJson,
        remount_key: String,
    },
    Schematic {
        circuit_json: CircuitJson,
        remount_key: u32,
    },
    Cad {
        circuit_json: CircuitJson,
        scene: SceneHandle,
    },
    Bom {
        circuit_json: CircuitJson,
    },
    CircuitJson {
        circuit_json: CircuitJson,
    },
    Error {
        code: String,
        error_message: Option<String>,
    },
    /// Nothing to show yet, offers to run the code.
    #[default]
    Empty,
    /// The view is not configured, e.g. the code view when the code tab is not shown.
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ViewportHeight {
    /// The full viewport height, less the header.
    FullScreen { offset_px: u32 },
    Fixed { height_px: u32 },
}

const FULL_SCREEN_OFFSET_PX: u32 = 96;
const FIXED_HEIGHT_PX: u32 = 620;

impl ViewportHeight {
    pub fn new(is_full_screen: bool) -> Self {
        match is_full_screen {
            true => ViewportHeight::FullScreen {
                offset_px: FULL_SCREEN_OFFSET_PX,
            },
            false => ViewportHeight::Fixed {
                height_px: FIXED_HEIGHT_PX,
            },
        }
    }
}

impl Default for ViewportHeight {
    fn default() -> Self {
        Self::new(false)
    }
}
