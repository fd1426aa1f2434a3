//! The static muri checker (§4.5): overlap, slide-head-tap, and
//! tap-on-slide, derived straight from the note list with no simulation.

use crate::catalogue::{self, Shape};
use crate::config::JudgeConfig;
use crate::constants::{ticks_to_seconds, COLLIDE_EXTRA_DELTA};
use crate::geometry::Pad;
use crate::model::{Moment, Note};

use super::record::{MuriRecord, RecordCursor};

fn simple_pad_and_window(note: &Note) -> Option<(Pad, Moment, Option<Moment>)> {
    match note {
        Note::Tap(t) => Some((t.pad, t.common.moment, None)),
        Note::Touch(t) => Some((t.pad, t.common.moment, None)),
        Note::Hold(h) => Some((h.pad, h.common.moment, Some(h.end_moment))),
        Note::TouchHold(t) => Some((t.pad, t.common.moment, Some(t.end_moment))),
        _ => None,
    }
}

/// Overlap: any pair of simple notes sharing a pad within `overlay_threshold`
/// ticks, plus the Hold-over-Hold interval overlap case (the interval check
/// only applies when both notes have an `end_moment`, i.e. both are Holds).
fn check_overlap(notes: &[Note], config: &JudgeConfig, out: &mut Vec<MuriRecord>) {
    let overlay = config.overlay_threshold() as Moment;

    let simples: Vec<(usize, Pad, Moment, Option<Moment>)> = notes
        .iter()
        .enumerate()
        .filter_map(|(i, n)| simple_pad_and_window(n).map(|(p, m, e)| (i, p, m, e)))
        .collect();

    for a in 0..simples.len() {
        for b in (a + 1)..simples.len() {
            let (ia, pad_a, moment_a, end_a) = simples[a];
            let (ib, pad_b, moment_b, end_b) = simples[b];
            if pad_a != pad_b {
                continue;
            }

            let flagged = (moment_a - moment_b).abs() <= overlay
                || matches!(
                    (end_a, end_b),
                    (Some(end_a), Some(_)) if moment_b >= moment_a - overlay && moment_b <= end_a + overlay
                );

            if !flagged {
                continue;
            }

            out.push(MuriRecord::Overlap {
                time: ticks_to_seconds(moment_a.min(moment_b) as f64),
                affected: RecordCursor::from(&notes[ib].common().cursor),
                cause: RecordCursor::from(&notes[ia].common().cursor),
                pad: pad_a.to_string(),
                delta: ticks_to_seconds((moment_b - moment_a) as f64),
            });
        }
    }
}

struct SlideStart {
    index: usize,
    start_pad: Pad,
    shoot_moment: Moment,
}

fn slide_starts(notes: &[Note]) -> Vec<SlideStart> {
    notes
        .iter()
        .enumerate()
        .filter_map(|(i, n)| match n {
            Note::SlideChain(s) => Some(SlideStart {
                index: i,
                start_pad: s.start_pad,
                shoot_moment: s.shoot_moment,
            }),
            Note::Wifi(w) => Some(SlideStart {
                index: i,
                start_pad: w.start_pad,
                shoot_moment: w.shoot_moment,
            }),
            _ => None,
        })
        .collect()
}

/// Slide-head-tap: a Tap/Hold on a slide's start pad landing just after the
/// star shoots.
fn check_slide_head_tap(notes: &[Note], config: &JudgeConfig, out: &mut Vec<MuriRecord>) {
    let threshold = config.tap_on_slide_threshold() as Moment;
    let collide = config.collide_threshold() as Moment;

    for slide in slide_starts(notes) {
        for (i, note) in notes.iter().enumerate() {
            let Some((pad, moment, _)) = simple_pad_and_window(note) else {
                continue;
            };
            if pad != slide.start_pad || !matches!(note, Note::Tap(_) | Note::Hold(_)) {
                continue;
            }

            let delta = moment - slide.shoot_moment;
            if delta >= threshold && delta <= collide {
                out.push(MuriRecord::SlideHeadTap {
                    time: ticks_to_seconds(moment as f64),
                    affected: RecordCursor::from(&notes[i].common().cursor),
                    cause: RecordCursor::from(&notes[slide.index].common().cursor),
                    delta: ticks_to_seconds(delta as f64),
                });
            }
        }
    }
}

/// Tap-on-slide: a tap sitting inside a slide's per-area "collide interval"
/// along the catalogue path.
fn check_tap_on_slide(notes: &[Note], config: &JudgeConfig, out: &mut Vec<MuriRecord>) {
    let threshold = config.tap_on_slide_threshold() as Moment;
    let collide = config.collide_threshold() as Moment;

    for slide in slide_starts(notes) {
        let (shape_key, end_moment, is_wifi) = match &notes[slide.index] {
            Note::SlideChain(s) => (
                s.segment_infos.last().map(|i| i.shape_key.clone()),
                s.end_moment,
                false,
            ),
            Note::Wifi(w) => (None, w.end_moment, true),
            _ => continue,
        };

        let enter_times: Vec<(Pad, Moment)> = if is_wifi {
            // Wifi only ever checks its start pad and the three lane end
            // pads, per spec (no per-area catalogue sampling needed).
            vec![(slide.start_pad, slide.shoot_moment)]
        } else {
            let Some(key) = shape_key else { continue };
            let Ok(Shape::Slide(shape)) = catalogue::get(&key) else {
                continue;
            };
            shape
                .judge_sequence
                .iter()
                .map(|area| {
                    let enter_moment =
                        slide.shoot_moment + (area.enter_t * (end_moment - slide.shoot_moment) as f64) as Moment;
                    (area.pad, enter_moment)
                })
                .collect()
        };

        for (area_idx, &(pad, enter)) in enter_times.iter().enumerate() {
            let is_last = area_idx + 1 == enter_times.len();
            let upper = if is_last {
                end_moment + COLLIDE_EXTRA_DELTA
            } else {
                enter + collide
            };
            let lower = (enter - COLLIDE_EXTRA_DELTA).max(slide.shoot_moment + threshold);

            for (i, note) in notes.iter().enumerate() {
                if !matches!(note, Note::Tap(_)) {
                    continue;
                }
                let Some((tap_pad, moment, _)) = simple_pad_and_window(note) else {
                    continue;
                };
                if tap_pad != pad || moment < lower || moment > upper {
                    continue;
                }

                out.push(MuriRecord::TapOnSlide {
                    time: ticks_to_seconds(moment as f64),
                    affected: RecordCursor::from(&notes[i].common().cursor),
                    cause: RecordCursor::from(&notes[slide.index].common().cursor),
                    delta: ticks_to_seconds((moment - enter) as f64),
                });
            }
        }
    }
}

/// Runs all three static checks and returns findings sorted by
/// affected-note `(line, column)`.
pub fn static_check(notes: &[Note], config: &JudgeConfig) -> Vec<MuriRecord> {
    let mut out = Vec::new();
    check_overlap(notes, config, &mut out);
    check_slide_head_tap(notes, config, &mut out);
    check_tap_on_slide(notes, config, &mut out);
    super::record::sort_records(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Group;
    use crate::model::{Cursor, NoteCommon, TapNote};

    fn tap(pad: Pad, moment: Moment) -> Note {
        Note::Tap(TapNote {
            common: NoteCommon::new(Cursor::new(1, 1, "1"), moment),
            pad,
            is_slide_head: false,
        })
    }

    #[test]
    fn overlap_flags_close_same_pad_taps() {
        let notes = vec![tap(Pad::from_number(Group::A, 5), 100), tap(Pad::from_number(Group::A, 5), 101)];
        let config = JudgeConfig::default();
        let records = static_check(&notes, &config);
        assert_eq!(records.len(), 1);
        assert!(matches!(records[0], MuriRecord::Overlap { .. }));
    }

    #[test]
    fn distant_same_pad_taps_do_not_overlap() {
        let notes = vec![tap(Pad::from_number(Group::A, 5), 0), tap(Pad::from_number(Group::A, 5), 50)];
        let config = JudgeConfig::default();
        let records = static_check(&notes, &config);
        assert!(records.is_empty());
    }
}
