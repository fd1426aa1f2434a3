//! Offline muri analysis for simai-notation rhythm game charts (§1–2).
//!
//! This crate takes an already-parsed chart (a note list plus the action
//! list the converter projects from it) and reports *muri*: configurations
//! that cannot be cleared with a perfect result regardless of player skill.
//! It owns three things: the slide shape catalogue, the note/action data
//! model and its converter, and the dynamic + static judge engines. It does
//! not parse `simai`/`ma2` source text, render anything, or print reports —
//! those are a caller's job.
//!
//! The public surface is intentionally small (§6): initialize the slide
//! catalogue once, build a note list and convert it to actions, then either
//! run [`static_check`] for a cheap non-simulated pass or drive a
//! [`DynamicEngine`] tick by tick for the full simulation.

mod catalogue;
mod config;
mod constants;
mod engine;
mod error;
mod geometry;
mod model;
mod util;

/// Process-wide slide shape catalogue: call `slide_catalogue::init()` once
/// before the first `slide_catalogue::get()`. Only these two entry points
/// are public; the shape/curve types they return stay crate-internal.
pub mod slide_catalogue {
    pub use crate::catalogue::{get, init};
}

pub use config::JudgeConfig;
pub use engine::{static_check, DynamicEngine, MuriRecord};
pub use error::{JudgeError, JudgeResult};
pub use geometry::{Group, Pad};
pub use model::{
    generate_actions, group_touches, link_slides, number_combo, Action, Cursor, HoldNote, Judge,
    MergeKey, Note, NoteCommon, SegmentInfo, SlideChainNote, TapNote, TouchChild, TouchCircle,
    TouchGroupNote, TouchHoldNote, TouchNote, WifiLane, WifiNote,
};
