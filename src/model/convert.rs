//! Converts a numbered, chained note list into the flat, time-ordered
//! `Action` list the dynamic engine consumes (§4.3).

use crate::catalogue::Shape;
use crate::config::JudgeConfig;

use super::action::{Action, MergeKey};
use super::note::Note;
use super::NoteId;

/// Projects each note into zero or more actions and returns them sorted by
/// `moment` (stable, so same-moment actions keep note order).
pub fn generate_actions(notes: &[Note], config: &JudgeConfig) -> Vec<Action> {
    let mut actions = Vec::new();

    for (id, note) in notes.iter().enumerate() {
        push_actions_for(id, note, config, &mut actions);
    }

    actions.sort_by_key(|a| a.moment());
    actions
}

fn push_actions_for(id: NoteId, note: &Note, config: &JudgeConfig, out: &mut Vec<Action>) {
    match note {
        Note::Tap(t) => {
            if t.is_slide_head {
                return;
            }
            out.push(Action::Press {
                source: id,
                moment: t.common.moment,
                position: t.pad.center_offset(),
                radius: config.hand_radius_normal(),
                duration: 0,
                end_moment: t.common.moment + config.release_delay() as i64,
                require_two_hands: false,
            });
        }
        Note::Hold(h) => {
            if h.is_slide_head {
                return;
            }
            let end_moment = if h.tail_on_slide_head {
                h.end_moment - config.release_delay() as i64
            } else {
                h.end_moment
            };
            out.push(Action::Press {
                source: id,
                moment: h.common.moment,
                position: h.pad.center_offset(),
                radius: config.hand_radius_normal(),
                duration: h.duration,
                end_moment,
                require_two_hands: false,
            });
        }
        Note::Touch(t) => {
            if t.on_slide {
                return;
            }
            out.push(Action::Press {
                source: id,
                moment: t.common.moment,
                position: t.pad.center_offset(),
                radius: config.hand_radius_normal(),
                duration: 0,
                end_moment: t.common.moment + config.release_delay() as i64,
                require_two_hands: false,
            });
        }
        Note::TouchHold(t) => {
            if t.on_slide {
                return;
            }
            out.push(Action::Press {
                source: id,
                moment: t.common.moment,
                position: t.pad.center_offset(),
                radius: config.hand_radius_normal(),
                duration: t.duration,
                end_moment: t.end_moment,
                require_two_hands: false,
            });
        }
        Note::TouchGroup(g) => {
            if g.on_slide {
                return;
            }
            out.push(Action::Press {
                source: id,
                moment: g.common.moment,
                position: g.center,
                radius: g.radius,
                duration: 0,
                end_moment: g.common.moment + config.release_delay() as i64,
                require_two_hands: g.radius > config.hand_radius_max(),
            });
        }
        Note::SlideChain(s) => {
            if !s.after_slide {
                if let Ok(Shape::Slide(first_shape)) = crate::catalogue::get(&s.segment_infos[0].shape_key) {
                    let first_area_duration =
                        first_shape.judge_sequence.first().map_or(0.0, |a| a.enter_t) * s.durations[0] as f64;
                    let delay = config.extra_paddown_delay().min(first_area_duration) as i64;
                    out.push(Action::ExtraPadDown {
                        source: id,
                        moment: s.shoot_moment + delay,
                        pad: s.start_pad,
                    });
                }
            }

            for (seg_idx, &duration) in s.durations.iter().enumerate() {
                let moment = s.segment_shoot_moments[seg_idx];
                let Ok(Shape::Slide(shape)) = crate::catalogue::get(&s.segment_infos[seg_idx].shape_key) else {
                    continue;
                };
                out.push(Action::Slide {
                    source: id,
                    moment,
                    path: shape.path.clone(),
                    radius: config.hand_radius_normal(),
                    duration,
                    end_moment: moment + duration,
                    is_wifi: false,
                    merge_key: Some(MergeKey::Slide(out.len())),
                    require_two_hands: false,
                });
            }
        }
        Note::Wifi(w) => {
            let key = format!("{}w{}", w.start_pad.number(), w.start_pad.rotate(4).number());
            let Ok(Shape::Wifi(shape)) = crate::catalogue::get(&key) else {
                return;
            };

            let first_area_duration = shape.lanes[0].first().map_or(0.0, |a| a.enter_t)
                * (w.end_moment - w.shoot_moment) as f64;
            let delay = config.extra_paddown_delay().min(first_area_duration) as i64;
            out.push(Action::ExtraPadDown {
                source: id,
                moment: w.shoot_moment + delay,
                pad: w.start_pad,
            });

            // Only the two outer lanes produce real-hand touch circles; the
            // center lane is judged but not rendered as a separate action.
            for lane in [0usize, 2] {
                out.push(Action::Slide {
                    source: id,
                    moment: w.shoot_moment,
                    path: shape.paths[lane].clone(),
                    radius: config.hand_radius_wifi(),
                    duration: w.end_moment - w.shoot_moment,
                    end_moment: w.end_moment,
                    is_wifi: true,
                    merge_key: Some(MergeKey::Wifi(id)),
                    require_two_hands: config.hand_radius_wifi() > config.hand_radius_max(),
                });
            }
        }
    }
}
