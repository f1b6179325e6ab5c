//! Eligibility - what the observed controls make possible
//!
//! Independent of any policy: these functions only look at which controls
//! exist and since when.

use chrono::{DateTime, Utc};

use crate::core::models::{ControlName, ControlSet, Level, ZERO_TIME};

/// Highest level the controls make possible, with the reason
#[must_use]
pub fn eligible_level(controls: &ControlSet) -> (Level, &'static str) {
    let continuity = controls.get(&ControlName::ContinuityEnforced).is_some();
    let provenance = controls.get(&ControlName::ProvenanceAvailable).is_some();

    match (continuity, provenance) {
        (true, true) => (Level::Level3, "continuity is enabled and provenance is available"),
        (true, false) => (Level::Level2, "continuity is enabled but provenance is not available"),
        (false, _) => (Level::Level1, "continuity is not enabled"),
    }
}

/// Instant since which `level` has held continuously, if it holds at all
///
/// Level 3 needs both continuity and provenance, so the later of the two
/// activation instants is the binding one.
#[must_use]
pub fn eligible_since(controls: &ControlSet, level: Level) -> Option<DateTime<Utc>> {
    match level {
        Level::Level1 => Some(ZERO_TIME),
        Level::Level2 => controls.since(&ControlName::ContinuityEnforced),
        Level::Level3 => {
            let continuity = controls.since(&ControlName::ContinuityEnforced)?;
            let provenance = controls.since(&ControlName::ProvenanceAvailable)?;
            Some(continuity.max(provenance))
        },
    }
}
