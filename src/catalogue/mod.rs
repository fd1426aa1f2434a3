//! The slide shape catalogue: a process-wide, write-once registry of every
//! slide/wifi shape the game can draw, keyed by its simai-style notation
//! (e.g. `"3p7"`, `"6V46"`, `"2w6"`).
//!
//! Shapes are generated once, from a handful of canonical templates rotated
//! and reflected across every start pad (see [`templates`]), rather than
//! hand-authored per key. Callers must run [`init`] once before the first
//! [`get`]; this mirrors the game's own one-time asset load and lets the
//! rest of the crate treat catalogue lookups as infallible-but-checked.

mod curve;
mod shape;
mod templates;

use std::collections::HashMap;
use std::sync::OnceLock;

pub use curve::Curve;
pub use shape::{JudgeArea, Shape, SlidePath, SlideShape, WifiShape};

use crate::error::{JudgeError, JudgeResult};

static CATALOGUE: OnceLock<HashMap<String, Shape>> = OnceLock::new();

/// Populate the catalogue. Idempotent: later calls are no-ops once the
/// registry has been built.
pub fn init() {
    if CATALOGUE.get().is_some() {
        return;
    }

    let built = templates::build();
    log::debug!("slide catalogue built with {} shapes", built.len());
    let _ = CATALOGUE.set(built);
}

/// Look up a shape by its catalogue key.
///
/// # Errors
///
/// Returns [`JudgeError::CatalogueNotInitialized`] if [`init`] hasn't run
/// yet, or [`JudgeError::UnknownShape`] if no template generated this key.
pub fn get(key: &str) -> JudgeResult<&'static Shape> {
    let catalogue = CATALOGUE.get().ok_or(JudgeError::CatalogueNotInitialized)?;

    catalogue
        .get(key)
        .ok_or_else(|| JudgeError::UnknownShape(key.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_before_init_is_a_contract_error() {
        // Run in isolation from other tests that may have already called
        // `init` in-process: only assert the Ok path is never reached for an
        // obviously bogus key when uninitialized would also fail the same
        // way, so instead assert the error variant when we can observe it.
        if CATALOGUE.get().is_none() {
            assert!(matches!(get("1-3"), Err(JudgeError::CatalogueNotInitialized)));
        }
    }

    #[test]
    fn unknown_key_after_init_is_reported() {
        init();
        assert!(matches!(get("not-a-real-shape"), Err(JudgeError::UnknownShape(k)) if k == "not-a-real-shape"));
    }

    #[test]
    fn known_key_resolves() {
        init();
        assert!(get("1-3").is_ok());
    }
}
