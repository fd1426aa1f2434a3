//! Muri records (§6 Output, §7): the only serializable type in this crate.
//! Everything else is consumed in-process; a record list is the boundary
//! where a report writer takes over.

use serde::Serialize;

use crate::model::Cursor;

/// A cheap, serializable snapshot of a [`Cursor`]. Kept distinct from
/// `Cursor` itself so `serde` stays scoped to this module rather than
/// spreading onto the whole data model.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RecordCursor {
    pub line: u32,
    pub column: u32,
    pub text: String,
}

impl From<&Cursor> for RecordCursor {
    fn from(c: &Cursor) -> Self {
        Self {
            line: c.line,
            column: c.column,
            text: c.text.to_string(),
        }
    }
}

/// Outcome of one judge area in a slide's progression log, for
/// `SlideTooFast` reporting.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "outcome")]
pub enum JudgeAreaOutcome {
    Consumed { cause: RecordCursor, time: f64 },
    Skipped,
}

/// One finding. `time` fields are in seconds (ticks / `JUDGE_TPS`).
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum MuriRecord {
    Overlap {
        time: f64,
        affected: RecordCursor,
        cause: RecordCursor,
        /// `Display` form of the shared [`crate::geometry::Pad`] (e.g.
        /// `"A5"`), kept a plain string so `Pad` itself never needs `serde`.
        pad: String,
        delta: f64,
    },
    SlideHeadTap {
        time: f64,
        affected: RecordCursor,
        cause: RecordCursor,
        delta: f64,
    },
    TapOnSlide {
        time: f64,
        affected: RecordCursor,
        cause: RecordCursor,
        delta: f64,
    },
    SlideTooFast {
        time: f64,
        affected: RecordCursor,
        judge_areas: Vec<JudgeAreaOutcome>,
    },
    MultiTouch {
        time: f64,
        affected: Vec<RecordCursor>,
        hand_count: u32,
    },
}

impl MuriRecord {
    pub fn time(&self) -> f64 {
        match self {
            MuriRecord::Overlap { time, .. }
            | MuriRecord::SlideHeadTap { time, .. }
            | MuriRecord::TapOnSlide { time, .. }
            | MuriRecord::SlideTooFast { time, .. }
            | MuriRecord::MultiTouch { time, .. } => *time,
        }
    }

    /// The note-cursor used for the (line, column) sort order the spec
    /// requires (`affected-note (line, column)`). `MultiTouch` sorts by its
    /// first affected cursor.
    pub fn sort_cursor(&self) -> Option<&RecordCursor> {
        match self {
            MuriRecord::Overlap { affected, .. }
            | MuriRecord::SlideHeadTap { affected, .. }
            | MuriRecord::TapOnSlide { affected, .. }
            | MuriRecord::SlideTooFast { affected, .. } => Some(affected),
            MuriRecord::MultiTouch { affected, .. } => affected.first(),
        }
    }
}

/// Sorts records by affected-note `(line, column)`, matching the spec's
/// output ordering. Ties keep their relative order (stable sort).
pub fn sort_records(records: &mut [MuriRecord]) {
    records.sort_by_key(|r| r.sort_cursor().map(|c| (c.line, c.column)).unwrap_or((u32::MAX, u32::MAX)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Pad;

    #[test]
    fn sort_orders_by_line_then_column() {
        let mut records = vec![
            MuriRecord::Overlap {
                time: 0.0,
                affected: RecordCursor { line: 3, column: 1, text: "b".into() },
                cause: RecordCursor { line: 3, column: 1, text: "b".into() },
                pad: Pad::from_number(crate::geometry::Group::A, 1).to_string(),
                delta: 0.0,
            },
            MuriRecord::Overlap {
                time: 0.0,
                affected: RecordCursor { line: 1, column: 1, text: "a".into() },
                cause: RecordCursor { line: 1, column: 1, text: "a".into() },
                pad: Pad::from_number(crate::geometry::Group::A, 1).to_string(),
                delta: 0.0,
            },
        ];
        sort_records(&mut records);
        assert_eq!(records[0].sort_cursor().unwrap().line, 1);
    }
}
