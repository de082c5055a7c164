use strum_macros::{AsRefStr, Display, EnumString, VariantArray};
use tracing::debug;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantArray
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PreviewView {
    Code,
    #[default]
    Pcb,
    Schematic,
    Cad,
    Bom,
    CircuitJson,
    Error,
}

impl PreviewView {
    pub fn label(&self) -> &'static str {
        match self {
            PreviewView::Code => "Code",
            PreviewView::Pcb => "PCB",
            PreviewView::Schematic => "Schematic",
            PreviewView::Cad => "3D",
            PreviewView::Bom => "Bill of Materials",
            PreviewView::CircuitJson => "JSON",
            PreviewView::Error => "Errors",
        }
    }

    /// Shown in place of the view when its widget fails, other views are unaffected.
    pub fn fallback_message(&self) -> &'static str {
        match self {
            PreviewView::Code => "Error loading code editor",
            PreviewView::Pcb => "Error loading PCB viewer",
            PreviewView::Schematic => "Error loading Schematic",
            PreviewView::Cad => "Error loading 3D viewer",
            PreviewView::Bom => "Error loading BOM",
            PreviewView::CircuitJson => "Error loading JSON viewer",
            PreviewView::Error => "Error loading errors",
        }
    }

    /// Views that render a result of a run and show a freshness indicator on their tab.
    pub fn shows_freshness(&self) -> bool {
        matches!(self, PreviewView::Pcb | PreviewView::Schematic | PreviewView::Cad)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum TabPlacement {
    TabBar,
    /// The overflow dropdown menu
    Menu,
}

/// Tabs in display order.
pub fn tab_layout(show_code_tab: bool, show_json_tab: bool) -> Vec<(PreviewView, TabPlacement)> {
    let mut tabs = vec![];
    if show_code_tab {
        tabs.push((PreviewView::Code, TabPlacement::TabBar));
    }
    tabs.extend([
        (PreviewView::Pcb, TabPlacement::TabBar),
        (PreviewView::Schematic, TabPlacement::TabBar),
        (PreviewView::Cad, TabPlacement::TabBar),
        (PreviewView::Error, TabPlacement::Menu),
        (PreviewView::Bom, TabPlacement::Menu),
    ]);
    if show_json_tab {
        tabs.push((PreviewView::CircuitJson, TabPlacement::Menu));
    }
    tabs
}

/// Which view is active.
///
/// Automatic transitions are invoked by the caller when it observes the corresponding external change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewSelector {
    active: PreviewView,
}

impl ViewSelector {
    pub fn new(show_code_tab: bool) -> Self {
        let active = match show_code_tab {
            true => PreviewView::Code,
            false => PreviewView::Pcb,
        };
        Self {
            active,
        }
    }

    pub fn active(&self) -> PreviewView {
        self.active
    }

    pub fn select(&mut self, view: PreviewView) {
        debug!("Selecting view. view: {}", view);
        self.active = view;
    }

    /// Call when the error message changed, a non-empty message forces the error view.
    pub fn on_error_message(&mut self, error_message: Option<&str>) -> bool {
        match error_message {
            Some(message) if !message.is_empty() => {
                debug!("Error arrived, showing error view. previous: {}", self.active);
                self.active = PreviewView::Error;
                true
            }
            _ => false,
        }
    }

    /// Call when the circuit json changed.
    ///
    /// Only leaves the code view, never takes the user away from a view they navigated to.
    pub fn on_circuit_json(&mut self, circuit_json_present: bool, error_present: bool) -> bool {
        if self.active == PreviewView::Code && circuit_json_present && !error_present {
            debug!("Circuit json arrived, showing pcb view.");
            self.active = PreviewView::Pcb;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;
    use strum::VariantArray;

    use super::*;

    #[rstest]
    #[case(true, PreviewView::Code)]
    #[case(false, PreviewView::Pcb)]
    fn initial_view(#[case] show_code_tab: bool, #[case] expected: PreviewView) {
        assert_eq!(ViewSelector::new(show_code_tab).active(), expected);
    }

    #[rstest]
    fn error_forces_error_view(
        #[values(
            PreviewView::Code,
            PreviewView::Pcb,
            PreviewView::Schematic,
            PreviewView::Cad,
            PreviewView::Bom,
            PreviewView::CircuitJson,
            PreviewView::Error
        )]
        initial: PreviewView,
    ) {
        // given
        let mut selector = ViewSelector::new(true);
        selector.select(initial);

        // when
        selector.on_error_message(Some("boom"));

        // then
        assert_eq!(selector.active(), PreviewView::Error);
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn cleared_error_keeps_view(#[case] error_message: Option<&str>) {
        // given
        let mut selector = ViewSelector::new(false);
        selector.select(PreviewView::Bom);

        // when
        let changed = selector.on_error_message(error_message);

        // then
        assert!(!changed);
        assert_eq!(selector.active(), PreviewView::Bom);
    }

    #[rstest]
    #[case(PreviewView::Code, true, false, PreviewView::Pcb)]
    #[case(PreviewView::Code, true, true, PreviewView::Code)]
    #[case(PreviewView::Code, false, false, PreviewView::Code)]
    #[case(PreviewView::Bom, true, false, PreviewView::Bom)]
    #[case(PreviewView::Schematic, true, false, PreviewView::Schematic)]
    fn circuit_json_arrival(
        #[case] initial: PreviewView,
        #[case] present: bool,
        #[case] error_present: bool,
        #[case] expected: PreviewView,
    ) {
        // given
        let mut selector = ViewSelector::new(true);
        selector.select(initial);

        // when
        selector.on_circuit_json(present, error_present);

        // then
        assert_eq!(selector.active(), expected);
    }

    #[test]
    fn tab_layout_with_all_tabs() {
        // when
        let tabs = tab_layout(true, true);

        // then
        let views = tabs
            .iter()
            .map(|(view, _)| *view)
            .collect::<Vec<_>>();
        assert_eq!(views, vec![
            PreviewView::Code,
            PreviewView::Pcb,
            PreviewView::Schematic,
            PreviewView::Cad,
            PreviewView::Error,
            PreviewView::Bom,
            PreviewView::CircuitJson,
        ]);
        assert_eq!(tabs.len(), PreviewView::VARIANTS.len());
    }

    #[test]
    fn tab_layout_without_optional_tabs() {
        // when
        let tabs = tab_layout(false, false);

        // then
        assert!(!tabs
            .iter()
            .any(|(view, _)| matches!(view, PreviewView::Code | PreviewView::CircuitJson)));
    }

    #[test]
    fn view_names() {
        for view in PreviewView::VARIANTS {
            let name = view.to_string();
            assert_eq!(PreviewView::from_str(&name).unwrap(), *view);
            assert_eq!(serde_json::to_string(view).unwrap(), format!("\"{}\"", name));
        }
        assert_eq!(PreviewView::CircuitJson.as_ref(), "circuitjson");
    }
}
