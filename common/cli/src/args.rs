use clap::ValueEnum;
use preview_app::PreviewView;

/// Args decouple of CLI arg handling requirements from the internal data structures

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[value(rename_all = "lower")]
pub enum PreviewViewArg {
    Code,
    Pcb,
    Schematic,
    Cad,
    Bom,
    #[value(name("circuitjson"))]
    CircuitJson,
    Error,
}

impl From<PreviewViewArg> for PreviewView {
    fn from(value: PreviewViewArg) -> Self {
        match value {
            PreviewViewArg::Code => Self::Code,
            PreviewViewArg::Pcb => Self::Pcb,
            PreviewViewArg::Schematic => Self::Schematic,
            PreviewViewArg::Cad => Self::Cad,
            PreviewViewArg::Bom => Self::Bom,
            PreviewViewArg::CircuitJson => Self::CircuitJson,
            PreviewViewArg::Error => Self::Error,
        }
    }
}
