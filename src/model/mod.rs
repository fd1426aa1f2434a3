//! The data model (§3): notes, the actions the converter projects them into,
//! and the chaining/grouping/numbering passes that run over a parsed chart
//! before conversion.

mod action;
mod chaining;
mod convert;
mod cursor;
mod note;

pub use action::{Action, MergeKey, TouchCircle};
pub use chaining::{group_touches, link_slides, number_combo};
pub use convert::generate_actions;
pub use cursor::Cursor;
pub use note::{
    Judge, NoteCommon, SegmentInfo, SlideChainNote, TapNote, TouchChild, TouchGroupNote,
    TouchHoldNote, TouchNote, WifiLane, WifiNote,
};
pub use note::{HoldNote, Note};

/// A tick count. Can be negative during a chart's lead-in.
pub type Moment = i64;

/// Index into the parsed chart's note list. Actions carry this instead of a
/// borrow, since one note can project into several actions and the engine
/// needs to look judgement results back up by note.
pub type NoteId = usize;

/// Index into the converter's action list.
pub type ActionId = usize;
