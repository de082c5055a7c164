#![deny(missing_docs)]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use cli::args::PreviewViewArg;

#[derive(Parser, Debug)]
#[command(name = "preview_cli")]
#[command(bin_name = "preview_cli")]
#[command(version, about, long_about = None)]
pub(crate) struct Opts {
    #[command(subcommand)]
    pub(crate) command: Command,

    /// Trace log file
    #[arg(long, num_args = 0..=1, default_missing_value = "trace.log")]
    pub(crate) trace: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) verbose: Verbosity<InfoLevel>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Command {
    /// Replay a sequence of preview events and print the resulting view model as JSON
    Replay {
        /// A JSON array of events
        #[arg(long, value_name = "EVENTS_FILE")]
        events: PathBuf,

        /// Select a view after the events have been replayed
        #[arg(long)]
        select: Option<PreviewViewArg>,

        /// Write the manual edits file content to this file when it is updated
        #[arg(long, value_name = "MANUAL_EDITS_FILE")]
        manual_edits: Option<PathBuf>,
    },
    /// Apply a batch of pcb edit events to a manual edits file
    ApplyEdits {
        /// The circuit json the edit events refer to
        #[arg(long, value_name = "CIRCUIT_JSON_FILE")]
        circuit_json: PathBuf,

        /// The manual edits file, created if it does not exist
        #[arg(long, value_name = "MANUAL_EDITS_FILE")]
        manual_edits: PathBuf,

        /// A JSON array of edit events
        #[arg(long, value_name = "EDIT_EVENTS_FILE")]
        edit_events: PathBuf,
    },
    /// List the order steps, marking completed ones
    OrderSteps {
        /// A JSON object of step flags, e.g. '{ "are_gerbers_generated": true }'
        #[arg(long, value_name = "PROGRESS_FILE")]
        progress: Option<PathBuf>,
    },
    /// Print the card for a snippet as JSON
    SnippetCard {
        /// The snippet, as JSON
        #[arg(long, value_name = "SNIPPET_FILE")]
        snippet: PathBuf,

        /// Base url for snippet images, e.g. 'https://registry-api.example.com'
        #[arg(long)]
        base_url: String,

        /// Show the owner name before the snippet name
        #[arg(long)]
        show_owner: bool,

        /// The snippet belongs to the current user
        #[arg(long)]
        current_user: bool,
    },
}
