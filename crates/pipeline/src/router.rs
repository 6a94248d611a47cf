//! Router — pure mapping from a classified intent to the next processing
//! stage.
//!
//! The mapping is total and injective on the eight-intent domain. Two extra
//! terminal outcomes exist: "End Task" ends the turn without invoking any
//! handler, and a fallback catches any unmapped label. The fallback is a
//! safety net for an upstream contract violation, not a reachable branch
//! under correct operation — it logs a warning and terminates.

use leetmentor_core::intent::Intent;
use tracing::warn;

/// The routing outcome for one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Dispatch to the handler for this intent.
    Handle(Intent),
    /// Terminate the turn without invoking a handler.
    End,
    /// Terminal for a label outside the taxonomy.
    Fallback,
}

/// Map a validated intent to its handler. Total and injective by
/// construction: every intent routes to its own handler.
pub fn route(intent: Intent) -> Route {
    Route::Handle(intent)
}

/// Map a raw routing label, covering the two terminal codes.
///
/// "End Task" terminates cleanly; any label outside the taxonomy falls back
/// to termination with a warning, since it indicates the classifier contract
/// was violated upstream.
pub fn route_label(label: &str) -> Route {
    if label.trim().eq_ignore_ascii_case("end task") {
        return Route::End;
    }
    match Intent::parse(label) {
        Ok(intent) => route(intent),
        Err(_) => {
            warn!(label, "Unmapped routing label, terminating turn via fallback");
            Route::Fallback
        }
    }
}
