use crate::catalogue::SlidePath;
use crate::geometry::{Pad, Point};

use super::{ActionId, Moment, NoteId};

/// A live touch circle an action is producing at some tick, in actual
/// (already canvas-scaled) pixel units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchCircle {
    pub center: Point,
    pub radius: f64,
    pub tangent: Point,
}

/// Opaque merge-eligibility key (§9 design notes). Two touch circles
/// produced on the same tick may be deduplicated only when both actions
/// carry the same key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MergeKey {
    /// A single non-wifi slide never merges with anything else, but still
    /// needs a key distinct per action so repeated lookups are meaningful.
    Slide(ActionId),
    /// Both lanes of the same wifi note share this key, so their touch
    /// circles may coalesce into one.
    Wifi(NoteId),
}

/// One entry of the time-ordered action list the converter produces and the
/// dynamic engine consumes.
#[derive(Clone, Debug)]
pub enum Action {
    Press {
        source: NoteId,
        moment: Moment,
        position: Point,
        radius: f64,
        duration: Moment,
        end_moment: Moment,
        require_two_hands: bool,
    },
    Slide {
        source: NoteId,
        moment: Moment,
        path: SlidePath,
        radius: f64,
        duration: Moment,
        end_moment: Moment,
        is_wifi: bool,
        merge_key: Option<MergeKey>,
        require_two_hands: bool,
    },
    ExtraPadDown {
        source: NoteId,
        moment: Moment,
        pad: Pad,
    },
}

impl Action {
    pub fn source(&self) -> NoteId {
        match self {
            Action::Press { source, .. } => *source,
            Action::Slide { source, .. } => *source,
            Action::ExtraPadDown { source, .. } => *source,
        }
    }

    pub fn moment(&self) -> Moment {
        match self {
            Action::Press { moment, .. } => *moment,
            Action::Slide { moment, .. } => *moment,
            Action::ExtraPadDown { moment, .. } => *moment,
        }
    }

    pub fn require_two_hands(&self) -> bool {
        match self {
            Action::Press { require_two_hands, .. } => *require_two_hands,
            Action::Slide { require_two_hands, .. } => *require_two_hands,
            Action::ExtraPadDown { .. } => false,
        }
    }

    pub fn is_finished(&self, now: Moment) -> bool {
        match self {
            Action::Press { end_moment, .. } => now >= *end_moment,
            Action::Slide { end_moment, .. } => now >= *end_moment,
            Action::ExtraPadDown { moment, .. } => now > *moment,
        }
    }

    /// Produce this tick's touch circle, if any (`ExtraPadDown` never does).
    pub fn touch_circle(&self, now: Moment) -> Option<TouchCircle> {
        match self {
            Action::Press {
                moment,
                end_moment,
                position,
                radius,
                ..
            } => {
                if *moment <= now && now < *end_moment {
                    Some(TouchCircle {
                        center: *position,
                        radius: *radius,
                        tangent: Point::ZERO,
                    })
                } else {
                    None
                }
            }
            Action::Slide {
                moment,
                duration,
                path,
                radius,
                end_moment,
                ..
            } => {
                if now < *moment || now >= *end_moment {
                    return None;
                }

                let t = if *duration <= 0 {
                    1.0
                } else {
                    ((now - moment) as f64 / *duration as f64).min(1.0)
                };

                Some(TouchCircle {
                    center: path.point(t),
                    radius: *radius,
                    tangent: path.tangent(t),
                })
            }
            Action::ExtraPadDown { .. } => None,
        }
    }

    pub fn merge_key(&self) -> Option<MergeKey> {
        match self {
            Action::Slide { merge_key, .. } => *merge_key,
            _ => None,
        }
    }
}
