//! Tracks whether the rendered output is stale relative to the current source.

use tracing::{debug, trace};

/// The editable source a run is computed from.
///
/// Only ever compared for equality. An absent manual edits file is distinct from an empty one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceFingerprint {
    code: String,
    manual_edits_file_content: Option<String>,
}

impl SourceFingerprint {
    pub fn new(code: &str, manual_edits_file_content: Option<&str>) -> Self {
        Self {
            code: code.to_string(),
            manual_edits_file_content: manual_edits_file_content.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunRequest {
    /// A run was dispatched, the baseline now matches the source at dispatch time.
    Dispatched { trigger_count: u32 },
    /// A run is in flight, a single rerun will be considered when it finishes.
    Coalesced,
}

#[derive(Debug, Clone, Default)]
pub struct RunTracker {
    baseline: SourceFingerprint,
    trigger_count: u32,
    in_flight: bool,
    rerun_pending: bool,
}

impl RunTracker {
    pub fn trigger_count(&self) -> u32 {
        self.trigger_count
    }

    pub fn is_running(&self) -> bool {
        self.in_flight
    }

    pub fn is_stale(&self, current: &SourceFingerprint) -> bool {
        self.baseline != *current
    }

    /// The first run is always permitted.
    pub fn is_run_enabled(&self, current: &SourceFingerprint) -> bool {
        self.trigger_count == 0 || self.is_stale(current)
    }

    pub fn request_run(&mut self, current: &SourceFingerprint) -> RunRequest {
        if self.in_flight {
            debug!("Run in flight, coalescing run request.");
            self.rerun_pending = true;
            return RunRequest::Coalesced;
        }

        self.dispatch(current)
    }

    /// Requests are only coalesced once the host confirms a run started.
    pub fn run_started(&mut self) {
        self.in_flight = true;
    }

    /// Returns the pending rerun, if one was requested and the source changed since the last dispatch.
    pub fn run_finished(&mut self, current: &SourceFingerprint) -> Option<RunRequest> {
        self.in_flight = false;

        let rerun_pending = std::mem::take(&mut self.rerun_pending);
        match rerun_pending && self.is_stale(current) {
            true => Some(self.dispatch(current)),
            false => {
                trace!("run finished. rerun_pending: {}", rerun_pending);
                None
            }
        }
    }

    fn dispatch(&mut self, current: &SourceFingerprint) -> RunRequest {
        self.trigger_count += 1;
        self.baseline = current.clone();

        RunRequest::Dispatched {
            trigger_count: self.trigger_count,
        }
    }
}

/// The dot shown on result tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FreshnessIndicator {
    UpToDate,
    Outdated,
}

/// No indicator is shown until there is a result.
pub fn freshness_indicator(has_result: bool, is_stale: bool) -> Option<FreshnessIndicator> {
    match (has_result, is_stale) {
        (false, _) => None,
        (true, false) => Some(FreshnessIndicator::UpToDate),
        (true, true) => Some(FreshnessIndicator::Outdated),
    }
}
