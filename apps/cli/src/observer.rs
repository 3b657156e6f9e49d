//! Forwards builder events to `tracing`.

use pcbuild_core::compatibility::{CheckOutcome, Verdict};
use pcbuild_core::{BuildObserver, Category, Component, CoreError};
use tracing::{debug, info, warn};

/// Logs selections, rejections and verdicts.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl BuildObserver for TracingObserver {
    fn component_selected(&self, slot: Category, component: &Component) {
        info!(
            slot = %slot,
            id = component.id(),
            name = %component.name(),
            "Component selected"
        );
    }

    fn selection_rejected(&self, slot: Option<Category>, error: &CoreError) {
        match slot {
            Some(slot) => warn!(slot = %slot, error = %error, "Selection rejected"),
            None => warn!(error = %error, "Selection rejected"),
        }
    }

    fn check_performed(&self, outcome: &CheckOutcome) {
        debug!(?outcome, passed = outcome.passed(), "Compatibility rule evaluated");
    }

    fn evaluated(&self, verdict: &Verdict) {
        if verdict.is_compatible() {
            info!("Compatibility check passed");
        } else {
            warn!(reason = %verdict.reason(), "Compatibility check failed");
        }
    }
}
