use std::time::SystemTime;

use anyhow::anyhow;
pub use circuit_json::CircuitJson;
use circuit_json::PCB_COMPONENT;
use crux_core::macros::effect;
use crux_core::render::RenderOperation;
pub use crux_core::Core;
use crux_core::{render, App, Command};
use derivative::Derivative;
pub use manual_edits::EditEvent;
use manual_edits::{EditEventReconciler, ManualEditsError, PcbEditEventReconciler};
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::effects::editor::EditorOperation;
use crate::effects::layout::LayoutOperation;
use crate::effects::manual_edits_file::ManualEditsOperation;
use crate::effects::runner::RunOperation;
use crate::effects::{editor, layout, manual_edits_file, runner};
pub use crate::staleness::FreshnessIndicator;
use crate::staleness::{freshness_indicator, RunRequest, RunTracker, SourceFingerprint};
pub use crate::view_content::{CodeEditorContent, SceneHandle, ViewContent, ViewportHeight};
pub use crate::view_selector::{PreviewView, TabPlacement};
use crate::view_selector::{tab_layout, ViewSelector};

pub mod effects;
pub mod staleness;
pub mod view_content;
pub mod view_selector;

/// The preview core, `R` merges manual edit events into the manual edits file.
#[derive(Default)]
pub struct Preview<R = PcbEditEventReconciler> {
    reconciler: R,
}

#[derive(Derivative, serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
#[derivative(Default)]
#[serde(default)]
pub struct PreviewOptions {
    /// Adds the code view, which also becomes the initial view.
    pub show_code_tab: bool,
    #[derivative(Default(value = "true"))]
    pub show_json_tab: bool,
    #[derivative(Default(value = "true"))]
    pub show_import_and_format_buttons: bool,
    pub read_only: bool,
    pub is_full_screen: bool,
    /// When the host can toggle full screen, it handles `LayoutOperation::ToggleFullScreen`.
    pub full_screen_toggle_enabled: bool,
}

#[derive(Default)]
pub struct Model {
    options: PreviewOptions,

    code: String,
    /// Owned by the host, updates are requested via [`ManualEditsOperation`].
    manual_edits_file_content: Option<String>,
    is_streaming: bool,

    run: RunTracker,
    view_selector: ViewSelector,

    circuit_json: Option<CircuitJson>,
    circuit_json_key: String,
    scene: SceneHandle,
    /// The error reported by the run, not to be confused with `error`.
    error_message: Option<String>,

    error: Option<(chrono::DateTime<chrono::Utc>, String)>,
}

impl Model {
    fn new(options: PreviewOptions, code: String, manual_edits_file_content: Option<String>) -> Self {
        Self {
            view_selector: ViewSelector::new(options.show_code_tab),
            options,
            code,
            manual_edits_file_content,
            ..Default::default()
        }
    }

    fn fingerprint(&self) -> SourceFingerprint {
        SourceFingerprint::new(&self.code, self.manual_edits_file_content.as_deref())
    }

    /// Empty messages are treated as no error.
    fn error_message(&self) -> Option<&str> {
        self.error_message
            .as_deref()
            .filter(|message| !message.is_empty())
    }

    fn view_content(&self, view: PreviewView) -> ViewContent {
        if let PreviewView::Code = view {
            return match self.options.show_code_tab {
                true => ViewContent::Code(CodeEditorContent {
                    code: self.code.clone(),
                    manual_edits_file_content: self
                        .manual_edits_file_content
                        .clone()
                        .unwrap_or_default(),
                    read_only: self.options.read_only,
                    is_streaming: self.is_streaming,
                    show_import_and_format_buttons: self.options.show_import_and_format_buttons,
                }),
                false => ViewContent::Hidden,
            };
        }

        if let PreviewView::Error = view {
            return match self.circuit_json.is_some() || self.error_message().is_some() {
                true => ViewContent::Error {
                    code: self.code.clone(),
                    error_message: self.error_message.clone(),
                },
                false => ViewContent::Empty,
            };
        }

        let circuit_json = self.circuit_json.clone();
        let content = match view {
            PreviewView::Pcb => circuit_json.map(|circuit_json| ViewContent::Pcb {
                circuit_json,
                remount_key: self.circuit_json_key.clone(),
            }),
            PreviewView::Schematic => circuit_json.map(|circuit_json| ViewContent::Schematic {
                circuit_json,
                remount_key: self.run.trigger_count(),
            }),
            PreviewView::Cad => circuit_json.map(|circuit_json| ViewContent::Cad {
                circuit_json,
                scene: self.scene,
            }),
            PreviewView::Bom => circuit_json.map(|circuit_json| ViewContent::Bom {
                circuit_json,
            }),
            PreviewView::CircuitJson => circuit_json.map(|circuit_json| ViewContent::CircuitJson {
                circuit_json,
            }),
            PreviewView::Code | PreviewView::Error => None,
        };

        content.unwrap_or(ViewContent::Empty)
    }
}

#[effect]
pub enum Effect {
    Render(RenderOperation),
    Runner(RunOperation),
    ManualEdits(ManualEditsOperation),
    Editor(EditorOperation),
    Layout(LayoutOperation),
}

#[derive(serde::Serialize, serde::Deserialize, Default, PartialEq, Debug, Clone)]
pub struct RunButtonViewModel {
    pub enabled: bool,
    pub is_running: bool,
}

#[derive(serde::Serialize, serde::Deserialize, PartialEq, Debug, Clone)]
pub struct TabItem {
    pub view: PreviewView,
    pub label: String,
    pub placement: TabPlacement,
    pub selected: bool,
    pub indicator: Option<FreshnessIndicator>,
    /// e.g. the error count
    pub badge: Option<u32>,
}

#[derive(serde::Serialize, serde::Deserialize, Default, PartialEq, Debug, Clone)]
pub struct PreviewViewModel {
    pub active_view: PreviewView,
    pub tabs: Vec<TabItem>,
    /// Shown on the overflow menu trigger when there is an error.
    pub menu_error_indicator: bool,
    pub run_button: RunButtonViewModel,
    pub is_stale: bool,
    pub content: ViewContent,
    pub fallback_message: String,
    pub viewport_height: ViewportHeight,
    pub is_full_screen: bool,
    pub full_screen_toggle_enabled: bool,
    pub error: Option<(chrono::DateTime<chrono::Utc>, String)>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub enum Event {
    None,
    /// Resets all state, e.g. when a different snippet is opened.
    Mount {
        options: PreviewOptions,
        code: String,
        manual_edits_file_content: Option<String>,
    },

    //
    // Editing surface
    //
    CodeChanged {
        code: String,
    },
    DtsChanged {
        dts: String,
    },
    ManualEditsFileContentChanged {
        content: Option<String>,
    },

    //
    // Runs
    //
    TriggerRun,
    RunStarted,
    RunFinished,
    CircuitJsonChanged {
        circuit_json: Option<CircuitJson>,
        /// Changes when the pcb view should be remounted, unchanged if `None`.
        key: Option<String>,
    },
    ErrorMessageChanged {
        error_message: Option<String>,
    },

    //
    // Views
    //
    SelectView {
        view: PreviewView,
    },
    /// A batch of edit events from the pcb view.
    EditEventsChanged {
        edit_events: Vec<EditEvent>,
    },
    SetStreaming {
        is_streaming: bool,
    },
    SetFullScreen {
        is_full_screen: bool,
    },
    ToggleFullScreen,
}

impl<R: EditEventReconciler> Preview<R> {
    fn update_inner(
        &self,
        event: Event,
    ) -> Box<dyn FnOnce(&mut Model) -> Result<Command<Effect, Event>, AppError> + '_> {
        match event {
            Event::None => Box::new(|_model: &mut Model| Ok(render::render())),
            Event::Mount {
                options,
                code,
                manual_edits_file_content,
            } => Box::new(move |model: &mut Model| {
                info!("Mounting preview. options: {:?}", options);
                *model = Model::new(options, code, manual_edits_file_content);

                Ok(render::render())
            }),
            Event::CodeChanged {
                code,
            } => Box::new(move |model: &mut Model| {
                trace!("Code changed. length: {}", code.len());
                model.code.clone_from(&code);

                Ok(Command::all([editor::code_changed(code), render::render()]))
            }),
            Event::DtsChanged {
                dts,
            } => Box::new(move |_model: &mut Model| Ok(editor::dts_changed(dts))),
            Event::ManualEditsFileContentChanged {
                content,
            } => Box::new(move |model: &mut Model| {
                trace!("Manual edits file content changed. content: {:?}", content);
                model.manual_edits_file_content = content;

                Ok(render::render())
            }),
            Event::TriggerRun => Box::new(|model: &mut Model| {
                let fingerprint = model.fingerprint();
                match model.run.request_run(&fingerprint) {
                    RunRequest::Dispatched {
                        trigger_count,
                    } => {
                        info!("Running. trigger_count: {}", trigger_count);
                        Ok(Command::all([runner::run(trigger_count), render::render()]))
                    }
                    RunRequest::Coalesced => Ok(render::render()),
                }
            }),
            Event::RunStarted => Box::new(|model: &mut Model| {
                model.run.run_started();

                Ok(render::render())
            }),
            Event::RunFinished => Box::new(|model: &mut Model| {
                let fingerprint = model.fingerprint();
                match model.run.run_finished(&fingerprint) {
                    Some(RunRequest::Dispatched {
                        trigger_count,
                    }) => {
                        info!("Running pending rerun. trigger_count: {}", trigger_count);
                        Ok(Command::all([runner::run(trigger_count), render::render()]))
                    }
                    _ => Ok(render::render()),
                }
            }),
            Event::CircuitJsonChanged {
                circuit_json,
                key,
            } => Box::new(move |model: &mut Model| {
                if let Some(key) = key {
                    model.circuit_json_key = key;
                }

                if model.circuit_json == circuit_json {
                    trace!("Circuit json unchanged.");
                    return Ok(render::render());
                }

                debug!(
                    "Circuit json changed. pcb_components: {:?}",
                    circuit_json
                        .as_ref()
                        .map(|circuit_json| circuit_json.elements_of_type(PCB_COMPONENT).count())
                );
                model.circuit_json = circuit_json;
                model.scene = model.scene.next();

                let error_present = model.error_message().is_some();
                model
                    .view_selector
                    .on_circuit_json(model.circuit_json.is_some(), error_present);

                Ok(render::render())
            }),
            Event::ErrorMessageChanged {
                error_message,
            } => Box::new(move |model: &mut Model| {
                if model.error_message == error_message {
                    return Ok(render::render());
                }

                debug!("Error message changed. error_message: {:?}", error_message);
                model.error_message = error_message;
                model
                    .view_selector
                    .on_error_message(model.error_message.as_deref());

                Ok(render::render())
            }),
            Event::SelectView {
                view,
            } => Box::new(move |model: &mut Model| {
                model.view_selector.select(view);

                Ok(render::render())
            }),
            Event::EditEventsChanged {
                edit_events,
            } => Box::new(move |model: &mut Model| {
                // committing part of a gesture would record intermediate positions
                if edit_events
                    .iter()
                    .any(EditEvent::is_in_progress)
                {
                    trace!("Edit gesture in progress. edit_events: {}", edit_events.len());
                    return Ok(Command::done());
                }

                let Some(circuit_json) = &model.circuit_json else {
                    debug!("Ignoring edit events, no circuit json. edit_events: {}", edit_events.len());
                    return Ok(Command::done());
                };

                let manual_edits_file = self
                    .reconciler
                    .apply(&edit_events, circuit_json, model.manual_edits_file_content.as_deref())
                    .map_err(AppError::ManualEditsError)?;

                let content = manual_edits_file
                    .to_pretty_string()
                    .map_err(AppError::ManualEditsError)?;

                info!("Manual edits updated. edit_events: {}", edit_events.len());

                Ok(manual_edits_file::update(content))
            }),
            Event::SetStreaming {
                is_streaming,
            } => Box::new(move |model: &mut Model| {
                model.is_streaming = is_streaming;

                Ok(render::render())
            }),
            Event::SetFullScreen {
                is_full_screen,
            } => Box::new(move |model: &mut Model| {
                model.options.is_full_screen = is_full_screen;

                Ok(render::render())
            }),
            Event::ToggleFullScreen => Box::new(|model: &mut Model| {
                if !model.options.full_screen_toggle_enabled {
                    return Err(AppError::OperationError(anyhow!("Full screen toggle is not enabled")));
                }

                Ok(layout::toggle_full_screen())
            }),
        }
    }
}

impl<R> App for Preview<R>
where
    R: EditEventReconciler + Default + Send + Sync + 'static,
{
    type Event = Event;
    type Model = Model;
    type ViewModel = PreviewViewModel;
    type Capabilities = ();
    type Effect = Effect;

    fn update(
        &self,
        event: Self::Event,
        model: &mut Self::Model,
        _caps: &Self::Capabilities,
    ) -> Command<Self::Effect, Self::Event> {
        let try_fn = self.update_inner(event);

        match try_fn(model) {
            Err(e) => {
                model
                    .error
                    .replace((chrono::DateTime::from(SystemTime::now()), format!("{:?}", e)));
                render::render()
            }
            Ok(command) => {
                model.error.take();
                command
            }
        }
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        let fingerprint = model.fingerprint();
        let is_stale = model.run.is_stale(&fingerprint);
        let has_result = model.circuit_json.is_some();
        let error_present = model.error_message().is_some();
        let active_view = model.view_selector.active();

        let tabs = tab_layout(model.options.show_code_tab, model.options.show_json_tab)
            .into_iter()
            .map(|(view, placement)| TabItem {
                view,
                label: view.label().to_string(),
                placement,
                selected: view == active_view,
                indicator: match view.shows_freshness() {
                    true => freshness_indicator(has_result, is_stale),
                    false => None,
                },
                badge: match view {
                    PreviewView::Error if error_present => Some(1),
                    _ => None,
                },
            })
            .collect();

        let view_model = PreviewViewModel {
            active_view,
            tabs,
            menu_error_indicator: error_present,
            run_button: RunButtonViewModel {
                enabled: model.run.is_run_enabled(&fingerprint),
                is_running: model.run.is_running(),
            },
            is_stale,
            content: model.view_content(active_view),
            fallback_message: active_view
                .fallback_message()
                .to_string(),
            viewport_height: ViewportHeight::new(model.options.is_full_screen),
            is_full_screen: model.options.is_full_screen,
            full_screen_toggle_enabled: model.options.full_screen_toggle_enabled,
            error: model.error.clone(),
        };

        trace!("view model: {:?}", view_model);

        view_model
    }
}

#[derive(Error, Debug)]
enum AppError {
    #[error("Operation error, cause: {0}")]
    OperationError(anyhow::Error),
    #[error("Manual edits error. cause: {0}")]
    ManualEditsError(ManualEditsError),
}

#[cfg(test)]
mod app_tests {
    use circuit_json::Point;
    use crux_core::{assert_effect, testing::AppTester};
    use manual_edits::EditEventKind;

    use super::*;

    const CIRCUIT: &str = r#"[
        { "type": "source_component", "source_component_id": "sc0", "name": "R1" },
        { "type": "pcb_component", "pcb_component_id": "pc0", "source_component_id": "sc0" }
    ]"#;

    fn circuit_json() -> CircuitJson {
        CIRCUIT.parse().unwrap()
    }

    fn mount(options: PreviewOptions, code: &str, manual_edits_file_content: Option<&str>) -> Event {
        Event::Mount {
            options,
            code: code.to_string(),
            manual_edits_file_content: manual_edits_file_content.map(str::to_string),
        }
    }

    fn code_tab_options() -> PreviewOptions {
        PreviewOptions {
            show_code_tab: true,
            ..PreviewOptions::default()
        }
    }

    fn circuit_json_changed(circuit_json: Option<CircuitJson>) -> Event {
        Event::CircuitJsonChanged {
            circuit_json,
            key: Some("key-1".to_string()),
        }
    }

    fn move_event(id: &str, in_progress: bool, x: f64, y: f64) -> EditEvent {
        EditEvent {
            edit_event_id: id.to_string(),
            in_progress,
            created_at: 0.0,
            kind: EditEventKind::EditPcbComponentLocation {
                pcb_component_id: "pc0".to_string(),
                original_center: Point::default(),
                new_center: Point::new(x, y),
            },
        }
    }

    fn run_trigger_counts(effects: impl Iterator<Item = Effect>) -> Vec<u32> {
        effects
            .filter_map(|effect| match effect {
                Effect::Runner(request) => match request.operation {
                    RunOperation::Run {
                        trigger_count,
                    } => Some(trigger_count),
                },
                _ => None,
            })
            .collect()
    }

    fn manual_edits_updates(effects: impl Iterator<Item = Effect>) -> Vec<String> {
        effects
            .filter_map(|effect| match effect {
                Effect::ManualEdits(request) => match request.operation {
                    ManualEditsOperation::Update {
                        content,
                    } => Some(content),
                },
                _ => None,
            })
            .collect()
    }

    #[test]
    fn minimal() {
        let hello = AppTester::<Preview>::default();
        let mut model = Model::default();

        // Call 'update' and request effects
        let update = hello.update(Event::None, &mut model);

        // Check update asked us to `Render`
        assert_effect!(update, Effect::Render(_));

        // Make sure the view matches our expectations
        let actual_view = &hello.view(&model);
        assert_eq!(actual_view.active_view, PreviewView::Pcb);
        assert_eq!(actual_view.content, ViewContent::Empty);
        assert!(actual_view.run_button.enabled);
        assert!(!actual_view.is_stale);
        assert_eq!(actual_view.error, None);
    }

    #[test]
    fn run_disables_until_source_changes() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(mount(code_tab_options(), "A", Some("")), &mut model);

        // expect
        assert!(app.view(&model).run_button.enabled);

        // when
        let update = app.update(Event::TriggerRun, &mut model);

        // then
        assert_eq!(run_trigger_counts(update.into_effects()), vec![1]);

        // when
        app.update(Event::RunStarted, &mut model);

        // then
        let view = app.view(&model);
        assert!(!view.is_stale);
        assert!(!view.run_button.enabled);
        assert!(view.run_button.is_running);

        // when
        let update = app.update(
            Event::CodeChanged {
                code: "B".to_string(),
            },
            &mut model,
        );

        // then
        assert_effect!(update, Effect::Editor(_));
        let view = app.view(&model);
        assert!(view.is_stale);
        assert!(view.run_button.enabled);
    }

    #[test]
    fn manual_edits_change_makes_result_stale() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(mount(PreviewOptions::default(), "A", None), &mut model);
        app.update(Event::TriggerRun, &mut model);
        app.update(Event::RunFinished, &mut model);

        // when
        app.update(
            Event::ManualEditsFileContentChanged {
                content: Some("{}".to_string()),
            },
            &mut model,
        );

        // then
        assert!(app.view(&model).run_button.enabled);
    }

    #[test]
    fn run_requests_during_flight_are_coalesced() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(mount(PreviewOptions::default(), "A", None), &mut model);
        app.update(Event::TriggerRun, &mut model);
        app.update(Event::RunStarted, &mut model);
        app.update(
            Event::CodeChanged {
                code: "B".to_string(),
            },
            &mut model,
        );

        // when
        let first = app.update(Event::TriggerRun, &mut model);
        let second = app.update(Event::TriggerRun, &mut model);

        // then
        assert!(run_trigger_counts(first.into_effects()).is_empty());
        assert!(run_trigger_counts(second.into_effects()).is_empty());

        // when
        let finished = app.update(Event::RunFinished, &mut model);

        // then
        assert_eq!(run_trigger_counts(finished.into_effects()), vec![2]);
        assert!(!app.view(&model).is_stale);
    }

    #[test]
    fn run_without_started_confirmation_does_not_block_next_run() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(mount(PreviewOptions::default(), "A", Some("")), &mut model);
        app.update(Event::TriggerRun, &mut model);
        app.update(
            Event::CodeChanged {
                code: "B".to_string(),
            },
            &mut model,
        );

        // when
        let update = app.update(Event::TriggerRun, &mut model);

        // then
        assert_eq!(run_trigger_counts(update.into_effects()), vec![2]);
        let view = app.view(&model);
        assert!(!view.is_stale);
        assert!(!view.run_button.enabled);
    }

    #[test]
    fn error_forces_error_view() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(mount(PreviewOptions::default(), "A", None), &mut model);
        app.update(
            Event::SelectView {
                view: PreviewView::Bom,
            },
            &mut model,
        );

        // when
        app.update(
            Event::ErrorMessageChanged {
                error_message: Some("Unexpected token".to_string()),
            },
            &mut model,
        );

        // then
        let view = app.view(&model);
        assert_eq!(view.active_view, PreviewView::Error);
        assert!(view.menu_error_indicator);
        assert_eq!(view.content, ViewContent::Error {
            code: "A".to_string(),
            error_message: Some("Unexpected token".to_string()),
        });
        let error_tab = view
            .tabs
            .iter()
            .find(|tab| tab.view == PreviewView::Error)
            .unwrap();
        assert_eq!(error_tab.badge, Some(1));
        assert!(error_tab.selected);
    }

    #[test]
    fn circuit_json_leaves_code_view() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(mount(code_tab_options(), "A", None), &mut model);
        assert_eq!(app.view(&model).active_view, PreviewView::Code);

        // when
        app.update(circuit_json_changed(Some(circuit_json())), &mut model);

        // then
        let view = app.view(&model);
        assert_eq!(view.active_view, PreviewView::Pcb);
        assert_eq!(view.content, ViewContent::Pcb {
            circuit_json: circuit_json(),
            remount_key: "key-1".to_string(),
        });
    }

    #[test]
    fn circuit_json_does_not_steal_other_views() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(mount(code_tab_options(), "A", None), &mut model);
        app.update(
            Event::SelectView {
                view: PreviewView::Bom,
            },
            &mut model,
        );

        // when
        app.update(circuit_json_changed(Some(circuit_json())), &mut model);

        // then
        assert_eq!(app.view(&model).active_view, PreviewView::Bom);
    }

    #[test]
    fn circuit_json_removal_keeps_view_and_shows_empty_state() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(mount(PreviewOptions::default(), "A", None), &mut model);
        app.update(circuit_json_changed(Some(circuit_json())), &mut model);
        app.update(
            Event::SelectView {
                view: PreviewView::Schematic,
            },
            &mut model,
        );

        // when
        app.update(circuit_json_changed(None), &mut model);

        // then
        let view = app.view(&model);
        assert_eq!(view.active_view, PreviewView::Schematic);
        assert_eq!(view.content, ViewContent::Empty);
        assert_eq!(view.fallback_message, "Error loading Schematic");
    }

    #[test]
    fn freshness_indicators() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(mount(PreviewOptions::default(), "A", None), &mut model);

        let indicators = |view: &PreviewViewModel| {
            view.tabs
                .iter()
                .map(|tab| tab.indicator)
                .collect::<Vec<_>>()
        };

        // expect
        assert!(indicators(&app.view(&model))
            .iter()
            .all(Option::is_none));

        // when
        app.update(Event::TriggerRun, &mut model);
        app.update(circuit_json_changed(Some(circuit_json())), &mut model);

        // then
        let up_to_date = Some(FreshnessIndicator::UpToDate);
        assert_eq!(indicators(&app.view(&model)), vec![
            up_to_date, up_to_date, up_to_date, None, None, None
        ]);

        // when
        app.update(
            Event::CodeChanged {
                code: "AB".to_string(),
            },
            &mut model,
        );

        // then
        let outdated = Some(FreshnessIndicator::Outdated);
        assert_eq!(indicators(&app.view(&model)), vec![
            outdated, outdated, outdated, None, None, None
        ]);
    }

    #[test]
    fn new_circuit_json_issues_new_scene_handle() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(mount(PreviewOptions::default(), "A", None), &mut model);
        app.update(
            Event::SelectView {
                view: PreviewView::Cad,
            },
            &mut model,
        );
        app.update(circuit_json_changed(Some(circuit_json())), &mut model);
        let ViewContent::Cad {
            scene: first, ..
        } = app.view(&model).content
        else {
            panic!("expected cad content");
        };

        // when
        app.update(circuit_json_changed(Some(CircuitJson::default())), &mut model);

        // then
        let ViewContent::Cad {
            scene: second, ..
        } = app.view(&model).content
        else {
            panic!("expected cad content");
        };
        assert_ne!(first, second);
    }

    #[test]
    fn completed_edit_batch_updates_manual_edits_file() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(mount(PreviewOptions::default(), "A", Some("")), &mut model);
        app.update(circuit_json_changed(Some(circuit_json())), &mut model);

        // when
        let update = app.update(
            Event::EditEventsChanged {
                edit_events: vec![
                    move_event("e1", false, 1.0, 1.0),
                    move_event("e2", false, 2.0, 3.5),
                ],
            },
            &mut model,
        );

        // then
        let expected_content = [
            "{",
            "  \"pcb_placements\": [",
            "    {",
            "      \"selector\": \"R1\",",
            "      \"center\": {",
            "        \"x\": 2,",
            "        \"y\": 3.5",
            "      },",
            "      \"relative_to\": \"group_center\"",
            "    }",
            "  ]",
            "}",
        ]
        .join("\n");
        assert_eq!(manual_edits_updates(update.into_effects()), vec![expected_content]);
    }

    #[test]
    fn edit_batch_without_circuit_json_is_discarded() {
        // given
        let app = AppTester::<Preview<UnreachableReconciler>>::default();
        let mut model = Model::default();
        app.update(mount(PreviewOptions::default(), "A", Some("")), &mut model);

        // when
        let update = app.update(
            Event::EditEventsChanged {
                edit_events: vec![move_event("e1", false, 1.0, 1.0)],
            },
            &mut model,
        );

        // then
        assert_eq!(update.effects().count(), 0);
        assert!(model.error.is_none());
        assert_eq!(model.manual_edits_file_content, Some("".to_string()));
    }

    #[test]
    fn empty_edit_batch_emits_current_manual_edits() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(
            mount(PreviewOptions::default(), "A", Some(r#"{"pcb_placements":[]}"#)),
            &mut model,
        );
        app.update(circuit_json_changed(Some(circuit_json())), &mut model);

        // when
        let update = app.update(
            Event::EditEventsChanged {
                edit_events: vec![],
            },
            &mut model,
        );

        // then
        assert_eq!(manual_edits_updates(update.into_effects()), vec!["{\n  \"pcb_placements\": []\n}".to_string()]);
    }

    #[derive(Default)]
    struct UnreachableReconciler;

    impl EditEventReconciler for UnreachableReconciler {
        fn apply(
            &self,
            _edit_events: &[EditEvent],
            _circuit_json: &CircuitJson,
            _manual_edits_file_content: Option<&str>,
        ) -> Result<manual_edits::ManualEditsFile, ManualEditsError> {
            panic!("reconciler must not be called")
        }
    }

    #[test]
    fn in_progress_edit_batch_is_discarded() {
        // given
        let app = AppTester::<Preview<UnreachableReconciler>>::default();
        let mut model = Model::default();
        app.update(mount(PreviewOptions::default(), "A", None), &mut model);
        app.update(circuit_json_changed(Some(circuit_json())), &mut model);

        // when
        let update = app.update(
            Event::EditEventsChanged {
                edit_events: vec![
                    move_event("e1", false, 1.0, 1.0),
                    move_event("e2", false, 2.0, 2.0),
                    move_event("e3", true, 3.0, 3.0),
                ],
            },
            &mut model,
        );

        // then
        assert_eq!(update.effects().count(), 0);
        assert_eq!(model.manual_edits_file_content, None);
    }

    #[test]
    fn invalid_manual_edits_file_is_reported() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(mount(PreviewOptions::default(), "A", Some("{ broken")), &mut model);
        app.update(circuit_json_changed(Some(circuit_json())), &mut model);

        // when
        let update = app.update(
            Event::EditEventsChanged {
                edit_events: vec![move_event("e1", false, 1.0, 1.0)],
            },
            &mut model,
        );

        // then
        assert!(manual_edits_updates(update.into_effects()).is_empty());
        let (_timestamp, message) = app.view(&model).error.unwrap();
        assert!(message.starts_with("ManualEditsError"), "message: {}", message);
    }

    #[test]
    fn full_screen_toggle() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(
            mount(
                PreviewOptions {
                    full_screen_toggle_enabled: true,
                    ..PreviewOptions::default()
                },
                "A",
                None,
            ),
            &mut model,
        );

        // when
        let update = app.update(Event::ToggleFullScreen, &mut model);

        // then
        assert_effect!(update, Effect::Layout(_));

        // when
        app.update(
            Event::SetFullScreen {
                is_full_screen: true,
            },
            &mut model,
        );

        // then
        let view = app.view(&model);
        assert!(view.is_full_screen);
        assert_eq!(view.viewport_height, ViewportHeight::FullScreen {
            offset_px: 96
        });
    }

    #[test]
    fn full_screen_toggle_disabled() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();

        // when
        app.update(Event::ToggleFullScreen, &mut model);

        // then
        assert!(app.view(&model).error.is_some());
    }

    #[test]
    fn code_view_content() {
        // given
        let app = AppTester::<Preview>::default();
        let mut model = Model::default();
        app.update(
            mount(
                PreviewOptions {
                    show_code_tab: true,
                    read_only: true,
                    ..PreviewOptions::default()
                },
                "export default () => <board />",
                None,
            ),
            &mut model,
        );
        app.update(
            Event::SetStreaming {
                is_streaming: true,
            },
            &mut model,
        );

        // then
        assert_eq!(
            app.view(&model).content,
            ViewContent::Code(CodeEditorContent {
                code: "export default () => <board />".to_string(),
                manual_edits_file_content: "".to_string(),
                read_only: true,
                is_streaming: true,
                show_import_and_format_buttons: true,
            })
        );
    }
}
