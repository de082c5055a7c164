//! The stages a fabrication order passes through, in order.
//!
//! Each stage is recorded on an order as a boolean flag named after the step, e.g. `is_gerber_analyzed`.

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

use strum::VariantArray;
use strum_macros::{AsRefStr, Display, EnumString, VariantArray};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    Display,
    EnumString,
    AsRefStr,
    VariantArray
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum OrderStep {
    AreGerbersGenerated,
    AreGerbersUploaded,
    IsGerberAnalyzed,
    AreInitialCostsCalculated,
    IsPcbAddedToCart,
    IsBomUploaded,
    IsPnpUploaded,
    IsBomPnpAnalyzed,
    IsBomParsingComplete,
    AreComponentsAvailable,
    IsPatchMapGenerated,
    IsJsonMergeFileCreated,
    IsDfmResultGenerated,
    AreFilesDownloaded,
    AreProductCategoriesFetched,
    AreFinalCostsCalculated,
    IsJsonMergeFileUpdated,
    IsAddedToCart,
}

impl OrderStep {
    /// All steps, in pipeline order.
    pub fn ordered() -> &'static [OrderStep] {
        OrderStep::VARIANTS
    }
}

/// Which steps of an order are complete.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct OrderProgress {
    completed: BTreeSet<OrderStep>,
}

impl OrderProgress {
    /// Builds progress from the flags stored on an order, every key must name a step.
    pub fn try_from_flags(flags: &BTreeMap<String, bool>) -> Result<Self, OrderStepError> {
        let mut completed = BTreeSet::new();
        for (name, done) in flags {
            let step = OrderStep::from_str(name).map_err(|_| OrderStepError::UnknownStep(name.clone()))?;
            if *done {
                completed.insert(step);
            }
        }

        Ok(Self {
            completed,
        })
    }

    pub fn complete(&mut self, step: OrderStep) {
        self.completed.insert(step);
    }

    pub fn is_complete(&self, step: OrderStep) -> bool {
        self.completed.contains(&step)
    }

    /// The first step, in pipeline order, that is not complete.
    pub fn next_step(&self) -> Option<OrderStep> {
        OrderStep::ordered()
            .iter()
            .copied()
            .find(|step| !self.is_complete(*step))
    }

    pub fn is_finished(&self) -> bool {
        self.next_step().is_none()
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum OrderStepError {
    #[error("Unknown order step. name: '{0}'")]
    UnknownStep(String),
}
