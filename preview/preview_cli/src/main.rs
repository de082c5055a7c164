use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::bail;
use clap::Parser;
use crossbeam_channel::unbounded;
use preview_app::effects::editor::EditorOperation;
use preview_app::effects::layout::LayoutOperation;
use preview_app::effects::manual_edits_file::ManualEditsOperation;
use preview_app::effects::runner::RunOperation;
use preview_app::{CircuitJson, EditEvent, Effect, Event, PreviewOptions};
use serde::de::DeserializeOwned;
use snippets::card::{SnippetCard, SnippetCardOptions};
use snippets::order_steps::{OrderProgress, OrderStep};
use snippets::snippet::Snippet;
use thiserror::Error;
use tracing::{debug, info, trace};

use crate::core::Core;
use crate::opts::{Command, Opts};

mod core;
mod opts;

fn main() -> anyhow::Result<()> {
    let args = argfile::expand_args(argfile::parse_fromfile, argfile::PREFIX)?;

    let opts = Opts::parse_from(args);

    cli::tracing::configure_tracing(opts.trace.clone(), opts.verbose.clone())?;

    match opts.command {
        Command::Replay {
            events,
            select,
            manual_edits,
        } => {
            let mut events: Vec<Event> = read_json(&events)?;
            if let Some(view) = select {
                events.push(Event::SelectView {
                    view: view.into(),
                });
            }

            let shell = Shell {
                manual_edits_path: manual_edits,
                fail_on_error: false,
            };

            let core = core::new();
            for event in events {
                run_loop(&core, &shell, event)?;
            }

            println!("{}", serde_json::to_string_pretty(&core.view())?);
        }
        Command::ApplyEdits {
            circuit_json,
            manual_edits,
            edit_events,
        } => {
            let circuit_json = read_to_string(&circuit_json)?.parse::<CircuitJson>()?;
            let edit_events: Vec<EditEvent> = read_json(&edit_events)?;
            let manual_edits_file_content = match manual_edits.exists() {
                true => Some(read_to_string(&manual_edits)?),
                false => None,
            };

            let shell = Shell {
                manual_edits_path: Some(manual_edits),
                fail_on_error: true,
            };

            let core = core::new();
            run_loop(&core, &shell, Event::Mount {
                options: PreviewOptions::default(),
                code: String::new(),
                manual_edits_file_content,
            })?;
            run_loop(&core, &shell, Event::CircuitJsonChanged {
                circuit_json: Some(circuit_json),
                key: None,
            })?;
            run_loop(&core, &shell, Event::EditEventsChanged {
                edit_events,
            })?;
        }
        Command::OrderSteps {
            progress,
        } => {
            let progress = match progress {
                Some(path) => {
                    let flags: BTreeMap<String, bool> = read_json(&path)?;
                    OrderProgress::try_from_flags(&flags)?
                }
                None => OrderProgress::default(),
            };

            for step in OrderStep::ordered() {
                let mark = match progress.is_complete(*step) {
                    true => 'x',
                    false => ' ',
                };
                println!("[{}] {}", mark, step);
            }

            println!("completed: {}/{}", progress.completed_count(), OrderStep::ordered().len());

            match progress.next_step() {
                Some(step) => println!("next: {}", step),
                None => println!("finished"),
            }
        }
        Command::SnippetCard {
            snippet,
            base_url,
            show_owner,
            current_user,
        } => {
            let snippet: Snippet = read_json(&snippet)?;

            let options = SnippetCardOptions {
                show_owner,
                is_current_user_snippet: current_user,
                delete_enabled: current_user,
                ..SnippetCardOptions::new(&base_url)
            };

            let card = SnippetCard::build(&snippet, &options, chrono::Utc::now());
            debug!("card: {:?}", card);

            println!("{}", serde_json::to_string_pretty(&card)?);
        }
    }

    Ok(())
}

/// How the CLI responds to effects.
struct Shell {
    /// Where manual edits file updates are written, if anywhere.
    manual_edits_path: Option<PathBuf>,
    /// Errors are otherwise reported in the printed view model.
    fail_on_error: bool,
}

fn run_loop(core: &Core, shell: &Shell, event: Event) -> Result<(), anyhow::Error> {
    let (tx, rx) = unbounded::<Effect>();

    core::update(core, event, &Arc::new(tx))?;

    while let Ok(effect) = rx.recv() {
        trace!("run_loop. effect: {:?}", effect);
        match effect {
            _render @ Effect::Render(_) => {
                let view = core.view();

                if let Some((_timestamp, error)) = view.error {
                    if shell.fail_on_error {
                        bail!(error)
                    }
                }
            }
            Effect::Runner(request) => match request.operation {
                RunOperation::Run {
                    trigger_count,
                } => {
                    // The CLI cannot evaluate code, results are replayed as events.
                    info!("Run requested. trigger_count: {}", trigger_count)
                }
            },
            Effect::ManualEdits(request) => match request.operation {
                ManualEditsOperation::Update {
                    content,
                } => {
                    if let Some(path) = &shell.manual_edits_path {
                        fs::write(path, &content)?;
                        info!("Manual edits file written. path: {:?}", path);
                    }

                    run_loop(core, shell, Event::ManualEditsFileContentChanged {
                        content: Some(content),
                    })?
                }
            },
            Effect::Editor(request) => match request.operation {
                EditorOperation::CodeChanged {
                    code,
                } => debug!("Code changed. length: {}", code.len()),
                EditorOperation::DtsChanged {
                    dts,
                } => debug!("Dts changed. length: {}", dts.len()),
            },
            Effect::Layout(request) => match request.operation {
                LayoutOperation::ToggleFullScreen => {
                    let is_full_screen = core.view().is_full_screen;
                    run_loop(core, shell, Event::SetFullScreen {
                        is_full_screen: !is_full_screen,
                    })?
                }
            },
        }
    }
    Ok(())
}

#[derive(Error, Debug)]
enum InputError {
    #[error("Unable to read file. path: {path:?}, cause: {cause}")]
    Read { path: PathBuf, cause: std::io::Error },
    #[error("Unable to parse file. path: {path:?}, cause: {cause}")]
    Parse { path: PathBuf, cause: serde_json::Error },
}

fn read_to_string(path: &Path) -> Result<String, InputError> {
    fs::read_to_string(path).map_err(|cause| InputError::Read {
        path: path.to_path_buf(),
        cause,
    })
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, InputError> {
    let content = read_to_string(path)?;
    serde_json::from_str(&content).map_err(|cause| InputError::Parse {
        path: path.to_path_buf(),
        cause,
    })
}
