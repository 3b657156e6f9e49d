//! # Observer Hook
//!
//! The core never logs. Callers that want visibility into selections and
//! compatibility checks inject a [`BuildObserver`]; every method has a no-op
//! default so an observer only implements what it cares about.
//!
//! ```text
//! PcBuilder::select ───────► component_selected / selection_rejected
//! evaluate_with ───────────► check_performed (once per rule that ran)
//!               └──────────► evaluated (final verdict)
//! ```

use crate::compatibility::{CheckOutcome, Verdict};
use crate::error::CoreError;
use crate::types::{Category, Component};

/// Receives events from the selection and evaluation engine.
pub trait BuildObserver {
    /// A component was stored in `slot`.
    fn component_selected(&self, _slot: Category, _component: &Component) {}

    /// A selection request was rejected. `slot` is `None` when the category
    /// key itself could not be parsed.
    fn selection_rejected(&self, _slot: Option<Category>, _error: &CoreError) {}

    /// One compatibility rule was evaluated.
    fn check_performed(&self, _outcome: &CheckOutcome) {}

    /// Evaluation finished.
    fn evaluated(&self, _verdict: &Verdict) {}
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl BuildObserver for NoopObserver {}
