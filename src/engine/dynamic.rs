//! The dynamic judge engine (§4.4): a discrete-time simulator advancing by
//! explicit `tick` calls, with no internal threads or async tasks (§5).

use std::collections::{BTreeSet, HashMap};

use log::{debug, warn};

use crate::config::JudgeConfig;
use crate::constants::{ticks_to_seconds, JUDGE_TPS};
use crate::engine::record::{JudgeAreaOutcome, MuriRecord, RecordCursor};
use crate::geometry::Pad;
use crate::model::{Action, ActionId, Moment, Note, NoteId};

const PAD_SLOTS: usize = 64;

fn pad_slot(pad: Pad) -> usize {
    pad.encoded() as usize
}

#[derive(Clone, Copy)]
struct KeptTouch {
    action: ActionId,
    center: crate::geometry::Point,
    radius: f64,
    tangent: crate::geometry::Point,
    merge_key: Option<crate::model::MergeKey>,
    is_wifi: bool,
    two_hands: bool,
}

/// Drives a parsed note/action list through the tick-based simulation and
/// accumulates muri findings as notes finish judging.
pub struct DynamicEngine {
    config: JudgeConfig,
    notes: Vec<Note>,
    actions: Vec<Action>,

    now: Moment,
    note_pointer: usize,
    action_pointer: usize,

    active_notes: Vec<NoteId>,
    active_actions: Vec<ActionId>,
    finished_notes: Vec<NoteId>,

    prev_pad_state: [bool; PAD_SLOTS],
    prev_pad_source: HashMap<Pad, ActionId>,

    seen_multitouch_sets: Vec<BTreeSet<NoteId>>,
    records: Vec<MuriRecord>,

    strict_v_shape_skip: bool,
}

impl DynamicEngine {
    /// `lead_in` is the (usually negative) starting value of `now`, giving
    /// slides and taps near moment 0 room to activate before the chart
    /// "starts".
    pub fn new(notes: Vec<Note>, actions: Vec<Action>, config: JudgeConfig, lead_in: Moment) -> Self {
        Self {
            config,
            notes,
            actions,
            now: lead_in,
            note_pointer: 0,
            action_pointer: 0,
            active_notes: Vec::new(),
            active_actions: Vec::new(),
            finished_notes: Vec::new(),
            prev_pad_state: [false; PAD_SLOTS],
            prev_pad_source: HashMap::new(),
            seen_multitouch_sets: Vec::new(),
            records: Vec::new(),
            strict_v_shape_skip: false,
        }
    }

    pub fn now(&self) -> Moment {
        self.now
    }

    pub fn active_notes(&self) -> impl Iterator<Item = &Note> {
        self.active_notes.iter().map(|&i| &self.notes[i])
    }

    pub fn records(&self) -> &[MuriRecord] {
        &self.records
    }

    /// Snapshot of every pad whose disc was covered by a live touch circle
    /// on the most recently completed tick.
    pub fn pad_states(&self) -> Vec<Pad> {
        Pad::all().filter(|p| self.prev_pad_state[pad_slot(*p)]).collect()
    }

    pub fn is_drained(&self) -> bool {
        self.note_pointer >= self.notes.len() && self.active_notes.is_empty()
    }

    /// Advances the simulated timer by `delta` ticks and runs one full
    /// 8-step tick (§4.4).
    pub fn tick(&mut self, delta: Moment) {
        let last_now = self.now;
        self.now += delta;
        let now = self.now;

        self.activate(now);

        let mut extra_pad_downs: Vec<(Pad, ActionId)> = Vec::new();
        let mut kept: Vec<KeptTouch> = Vec::new();
        let mut still_active_actions = Vec::with_capacity(self.active_actions.len());

        for &action_id in &self.active_actions {
            let action = &self.actions[action_id];

            if let Action::ExtraPadDown { moment, pad, .. } = action {
                if *moment > last_now && *moment <= now {
                    extra_pad_downs.push((*pad, action_id));
                }
            }

            if let Some(circle) = action.touch_circle(now) {
                let merge_key = action.merge_key();
                let is_wifi = matches!(action, Action::Slide { is_wifi: true, .. });
                let eligible = merge_key.is_some();

                let duplicate = eligible
                    && kept.iter().any(|k| {
                        let key_ok = if is_wifi {
                            k.is_wifi && k.merge_key == merge_key
                        } else {
                            k.merge_key.is_some()
                        };
                        key_ok
                            && (k.center - circle.center).length() < self.config.distance_merge_slide()
                            && (k.tangent - circle.tangent).length() < self.config.delta_tangent_merge_slide()
                    });

                if !duplicate {
                    kept.push(KeptTouch {
                        action: action_id,
                        center: circle.center,
                        radius: circle.radius,
                        tangent: circle.tangent,
                        merge_key,
                        is_wifi,
                        two_hands: action.require_two_hands(),
                    });
                }
            }

            if !action.is_finished(now) {
                still_active_actions.push(action_id);
            }
        }
        self.active_actions = still_active_actions;

        let mut next_pad_state = [false; PAD_SLOTS];
        let mut pad_source: HashMap<Pad, ActionId> = HashMap::new();
        for pad in Pad::all() {
            for touch in &kept {
                if pad.center_offset().distance(touch.center) <= pad.radius() + touch.radius {
                    next_pad_state[pad_slot(pad)] = true;
                    pad_source.insert(pad, touch.action);
                }
            }
        }

        let hand_count: u32 = kept.iter().map(|t| if t.two_hands { 2 } else { 1 }).sum();
        if hand_count > 2 {
            let sources: BTreeSet<NoteId> = kept.iter().map(|t| self.actions[t.action].source()).collect();
            if !self.seen_multitouch_sets.contains(&sources) {
                let affected: Vec<RecordCursor> =
                    sources.iter().map(|&id| RecordCursor::from(&self.notes[id].common().cursor)).collect();
                warn!("multi-touch: {hand_count} hands at tick {now}");
                self.records.push(MuriRecord::MultiTouch {
                    time: ticks_to_seconds(now as f64),
                    affected,
                    hand_count,
                });
                self.seen_multitouch_sets.push(sources);
            }
        }

        let mut pad_down_map: HashMap<Pad, ActionId> = HashMap::new();
        let mut pad_up_map: HashMap<Pad, ActionId> = HashMap::new();
        for pad in Pad::all() {
            let slot = pad_slot(pad);
            let was = self.prev_pad_state[slot];
            let is = next_pad_state[slot];
            if !was && is {
                if let Some(&source) = pad_source.get(&pad) {
                    pad_down_map.insert(pad, source);
                }
            }
            if was && !is {
                if let Some(&source) = self.prev_pad_source.get(&pad) {
                    pad_up_map.insert(pad, source);
                }
            }
        }
        for (pad, action_id) in extra_pad_downs {
            pad_down_map.insert(pad, action_id);
        }

        for pad in Pad::all() {
            if let Some(&action_id) = pad_down_map.get(&pad) {
                for &note_id in &self.active_notes {
                    if self.notes[note_id].on_pad_down(now, pad, action_id) {
                        break;
                    }
                }
            }
        }

        let mut still_active = Vec::with_capacity(self.active_notes.len());
        for &note_id in &self.active_notes {
            self.notes[note_id].update(now, &pad_source, &pad_up_map, self.strict_v_shape_skip);
            if self.notes[note_id].finish(now) {
                self.finished_notes.push(note_id);
            } else {
                still_active.push(note_id);
            }
        }
        self.active_notes = still_active;

        self.retire(now);

        self.prev_pad_state = next_pad_state;
        self.prev_pad_source = pad_source;
    }

    fn activate(&mut self, now: Moment) {
        while self.note_pointer < self.notes.len()
            && now >= self.notes[self.note_pointer].common().moment - 2 * JUDGE_TPS
        {
            self.active_notes.push(self.note_pointer);
            self.note_pointer += 1;
        }
        while self.action_pointer < self.actions.len()
            && now >= self.actions[self.action_pointer].moment() - JUDGE_TPS
        {
            self.active_actions.push(self.action_pointer);
            self.action_pointer += 1;
        }
    }

    fn retire(&mut self, now: Moment) {
        let finished = std::mem::take(&mut self.finished_notes);
        for note_id in finished {
            let judge_bad = matches!(self.notes[note_id].common().judge, crate::model::Judge::Bad);
            if !judge_bad {
                continue;
            }

            match &self.notes[note_id] {
                Note::SlideChain(s) => {
                    let judge_areas = s
                        .area_judge_log
                        .iter()
                        .map(|entry| match entry {
                            Some((action, moment)) => JudgeAreaOutcome::Consumed {
                                cause: RecordCursor::from(&self.notes[self.actions[*action].source()].common().cursor),
                                time: ticks_to_seconds(*moment as f64),
                            },
                            None => JudgeAreaOutcome::Skipped,
                        })
                        .collect();
                    debug!("slide note {note_id} retired Bad at tick {now}");
                    self.records.push(MuriRecord::SlideTooFast {
                        time: ticks_to_seconds(now as f64),
                        affected: RecordCursor::from(&self.notes[note_id].common().cursor),
                        judge_areas,
                    });
                }
                Note::Wifi(w) => {
                    let judge_areas = w
                        .lanes
                        .iter()
                        .flat_map(|lane| lane.area_judge_log.iter())
                        .map(|entry| match entry {
                            Some((action, moment)) => JudgeAreaOutcome::Consumed {
                                cause: RecordCursor::from(&self.notes[self.actions[*action].source()].common().cursor),
                                time: ticks_to_seconds(*moment as f64),
                            },
                            None => JudgeAreaOutcome::Skipped,
                        })
                        .collect();
                    debug!("wifi note {note_id} retired Bad at tick {now}");
                    self.records.push(MuriRecord::SlideTooFast {
                        time: ticks_to_seconds(now as f64),
                        affected: RecordCursor::from(&self.notes[note_id].common().cursor),
                        judge_areas,
                    });
                }
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Group;
    use crate::model::{Cursor, NoteCommon, TapNote};

    #[test]
    fn minimal_tap_judges_critical_with_no_muri() {
        let pad = Pad::from_number(Group::A, 1);
        let notes = vec![Note::Tap(TapNote {
            common: NoteCommon::new(Cursor::new(1, 1, "1"), 0),
            pad,
            is_slide_head: false,
        })];
        let actions = vec![Action::Press {
            source: 0,
            moment: 0,
            position: pad.center_offset(),
            radius: pad.radius(),
            duration: 3,
            end_moment: 3,
            require_two_hands: false,
        }];

        let mut engine = DynamicEngine::new(notes, actions, JudgeConfig::default(), 0);
        for _ in 0..5 {
            engine.tick(1);
        }

        assert!(engine.records().is_empty());
    }
}
