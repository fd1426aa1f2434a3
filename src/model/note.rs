//! The note algebra (§3): a tagged-variant `Note` type replacing the
//! abstract-base-class hierarchy the original judge code used. Each variant
//! carries its own progression state; dispatch is a `match`, not virtual
//! calls.

use std::collections::HashMap;

use crate::constants::{
    SLIDE_AVAILABLE, SLIDE_CRITICAL, SLIDE_DELTA_SHIFT, TAP_AVAILABLE, TAP_CRITICAL,
    TOUCH_AVAILABLE, TOUCH_CRITICAL,
};
use crate::geometry::Pad;

use super::cursor::Cursor;
use super::{ActionId, Moment, NoteId};

/// A note's judgement outcome. Anything other than `Critical` once judged is
/// a muri-driving `Bad` result; `NotYet` is not a final state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Judge {
    NotYet,
    Critical,
    Bad,
}

impl Judge {
    pub fn is_final(self) -> bool {
        !matches!(self, Judge::NotYet)
    }
}

/// Fields every note variant carries.
#[derive(Clone, Debug)]
pub struct NoteCommon {
    pub cursor: Cursor,
    pub moment: Moment,
    pub judge: Judge,
    pub judge_moment: Option<Moment>,
    pub judge_action: Option<ActionId>,
    /// 1-based combo position, assigned by [`super::number_combo`]. `0`
    /// until numbering has run.
    pub combo: u32,
}

impl NoteCommon {
    pub fn new(cursor: Cursor, moment: Moment) -> Self {
        Self {
            cursor,
            moment,
            judge: Judge::NotYet,
            judge_moment: None,
            judge_action: None,
            combo: 0,
        }
    }

    fn judge_as(&mut self, now: Moment, judge: Judge, action: Option<ActionId>) {
        self.judge = judge;
        self.judge_moment = Some(now);
        self.judge_action = action;
    }
}

#[derive(Clone, Debug)]
pub struct TapNote {
    pub common: NoteCommon,
    pub pad: Pad,
    pub is_slide_head: bool,
}

#[derive(Clone, Debug)]
pub struct HoldNote {
    pub common: NoteCommon,
    pub pad: Pad,
    pub is_slide_head: bool,
    pub duration: Moment,
    pub end_moment: Moment,
    pub tail_on_slide_head: bool,
}

#[derive(Clone, Debug)]
pub struct TouchNote {
    pub common: NoteCommon,
    pub pad: Pad,
    pub on_slide: bool,
    pub group_parent: Option<NoteId>,
}

#[derive(Clone, Debug)]
pub struct TouchHoldNote {
    pub common: NoteCommon,
    pub pad: Pad,
    pub duration: Moment,
    pub end_moment: Moment,
    pub on_slide: bool,
}

/// One child of a [`TouchGroupNote`]: judged independently, but the group as
/// a whole auto-judges the stragglers once enough children have resolved.
#[derive(Clone, Debug)]
pub struct TouchChild {
    pub pad: Pad,
    pub judge: Judge,
    pub judge_moment: Option<Moment>,
    pub judge_action: Option<ActionId>,
}

#[derive(Clone, Debug)]
pub struct TouchGroupNote {
    pub common: NoteCommon,
    pub children: Vec<TouchChild>,
    pub center: crate::geometry::Point,
    pub radius: f64,
    pub on_slide: bool,
    pub threshold: usize,
}

/// One segment of a (possibly chained) slide, identified by its catalogue
/// key.
#[derive(Clone, Debug)]
pub struct SegmentInfo {
    pub shape_key: String,
    pub is_v_shape: bool,
}

#[derive(Clone, Debug)]
pub struct SlideChainNote {
    pub common: NoteCommon,
    pub start_pad: Pad,
    pub segment_infos: Vec<SegmentInfo>,
    pub durations: Vec<Moment>,
    pub wait_duration: Moment,
    pub shoot_moment: Moment,
    pub segment_shoot_moments: Vec<Moment>,
    pub end_moment: Moment,
    pub critical_moment: Moment,
    pub critical_delta: Moment,
    pub available_moment: Moment,
    pub judge_sequence: Vec<Pad>,
    /// `partition[i]` marks area `i` as the first area of a new segment
    /// (other than segment 0).
    pub partition: Vec<bool>,
    pub before_slide: bool,
    pub after_slide: bool,
    pub cur_area_idx: usize,
    pub cur_segment_idx: usize,
    pub pressing: Option<Pad>,
    pub area_judge_log: Vec<Option<(ActionId, Moment)>>,
    pub is_l_shape: bool,
    pub is_special_l: bool,
}

impl SlideChainNote {
    pub fn total_area_num(&self) -> usize {
        self.judge_sequence.len()
    }

    fn starts_with_v_shape(&self) -> bool {
        self.segment_infos.first().is_some_and(|s| s.is_v_shape)
    }

    /// Resolved per DESIGN.md: the upstream "skip second area of a
    /// V-shape-led chain" relaxation is preserved unless `strict` is set.
    fn can_skip_area(&self, strict_v_shape: bool) -> bool {
        let total = self.total_area_num();

        if self.cur_area_idx + 1 >= total {
            return false;
        }

        if self.is_l_shape && self.cur_area_idx == 1 {
            return false;
        }

        if self.is_special_l && self.cur_area_idx == 3 {
            return false;
        }

        if strict_v_shape && self.starts_with_v_shape() && self.cur_area_idx == 1 {
            return false;
        }

        self.pressing.is_some() || total >= 4 || self.cur_area_idx != total.saturating_sub(2)
    }

    /// Runs one step of the progression state machine. Returns `true` if
    /// state changed, so the caller can loop until it returns `false`.
    fn progress_once(
        &mut self,
        now: Moment,
        pad_source: &HashMap<Pad, ActionId>,
        pad_up: &HashMap<Pad, ActionId>,
        strict_v_shape: bool,
    ) -> bool {
        if self.cur_area_idx >= self.total_area_num() {
            return false;
        }

        let area_pad = self.judge_sequence[self.cur_area_idx];

        if self.pressing.is_none() {
            if let Some(&action) = pad_source.get(&area_pad) {
                self.pressing = Some(area_pad);
                self.area_judge_log[self.cur_area_idx] = Some((action, now));
                if self.partition[self.cur_area_idx] {
                    self.cur_segment_idx += 1;
                }
                return true;
            }
            return false;
        }

        if let Some(p) = self.pressing {
            if !pad_source.contains_key(&p) {
                self.pressing = None;
                self.cur_area_idx += 1;
                return true;
            }
        }

        if self.can_skip_area(strict_v_shape) {
            let next_idx = self.cur_area_idx + 1;
            let next_pad = self.judge_sequence[next_idx];
            let source = pad_source.get(&next_pad).or_else(|| pad_up.get(&next_pad));

            if let Some(&action) = source {
                self.pressing = Some(next_pad);
                self.area_judge_log[next_idx] = Some((action, now));
                if self.partition[next_idx] {
                    self.cur_segment_idx += 1;
                }
                self.cur_area_idx += 2;
                return true;
            }
        }

        false
    }

    pub fn update(
        &mut self,
        now: Moment,
        pad_source: &HashMap<Pad, ActionId>,
        pad_up: &HashMap<Pad, ActionId>,
        strict_v_shape: bool,
    ) {
        if self.common.judge.is_final() {
            return;
        }

        if now < self.available_moment {
            return;
        }

        const MAX_STEPS: usize = 64;
        for _ in 0..MAX_STEPS {
            if !self.progress_once(now, pad_source, pad_up, strict_v_shape) {
                break;
            }
        }

        if self.cur_area_idx >= self.total_area_num() {
            let on_time = (now - self.critical_moment).abs() <= self.critical_delta;
            let shifted = (now - self.critical_moment + SLIDE_DELTA_SHIFT).abs() <= SLIDE_CRITICAL;
            let judge = if on_time || shifted { Judge::Critical } else { Judge::Bad };
            let action = self.area_judge_log.last().copied().flatten().map(|(a, _)| a);
            self.common.judge_as(now, judge, action);
            return;
        }

        if now > self.end_moment + SLIDE_AVAILABLE {
            self.common.judge_as(now, Judge::Bad, None);
        }
    }

    pub fn finish(&self, now: Moment) -> bool {
        self.common.judge.is_final() && now > self.end_moment
    }
}

#[derive(Clone, Debug, Default)]
pub struct WifiLane {
    pub judge_sequence: Vec<Pad>,
    pub cur_area_idx: usize,
    pub pressing: Option<Pad>,
    pub finished: bool,
    pub area_judge_log: Vec<Option<(ActionId, Moment)>>,
}

impl WifiLane {
    fn progress_once(&mut self, now: Moment, pad_source: &HashMap<Pad, ActionId>) -> bool {
        if self.finished {
            return false;
        }

        if self.cur_area_idx >= self.judge_sequence.len() {
            self.finished = true;
            return false;
        }

        let area_pad = self.judge_sequence[self.cur_area_idx];

        if self.pressing.is_none() {
            if let Some(&action) = pad_source.get(&area_pad) {
                self.pressing = Some(area_pad);
                self.area_judge_log[self.cur_area_idx] = Some((action, now));
                self.cur_area_idx += 1;
                if self.cur_area_idx >= self.judge_sequence.len() {
                    self.finished = true;
                }
                return true;
            }
            return false;
        }

        if let Some(p) = self.pressing {
            if !pad_source.contains_key(&p) {
                self.pressing = None;
                return true;
            }
        }

        false
    }
}

#[derive(Clone, Debug)]
pub struct WifiNote {
    pub common: NoteCommon,
    pub start_pad: Pad,
    pub lanes: [WifiLane; 3],
    pub shoot_moment: Moment,
    pub end_moment: Moment,
    pub critical_moment: Moment,
    pub critical_delta: Moment,
    pub available_moment: Moment,
    pub wifi_need_c: bool,
    pub pad_c_passed: bool,
    middle_lane_advanced: bool,
}

impl WifiNote {
    pub fn new(
        common: NoteCommon,
        start_pad: Pad,
        lanes: [WifiLane; 3],
        shoot_moment: Moment,
        end_moment: Moment,
        critical_moment: Moment,
        critical_delta: Moment,
        available_moment: Moment,
        wifi_need_c: bool,
    ) -> Self {
        Self {
            common,
            start_pad,
            lanes,
            shoot_moment,
            end_moment,
            critical_moment,
            critical_delta,
            available_moment,
            wifi_need_c,
            pad_c_passed: false,
            middle_lane_advanced: false,
        }
    }

    pub fn update(
        &mut self,
        now: Moment,
        pad_source: &HashMap<Pad, ActionId>,
        pad_up: &HashMap<Pad, ActionId>,
    ) {
        if self.common.judge.is_final() {
            return;
        }

        if now < self.available_moment {
            return;
        }

        const MAX_STEPS: usize = 16;
        for lane in &mut self.lanes {
            for _ in 0..MAX_STEPS {
                if !lane.progress_once(now, pad_source) {
                    break;
                }
            }
        }

        if self.lanes[1].cur_area_idx > 0 {
            self.middle_lane_advanced = true;
        }

        if self.wifi_need_c && self.middle_lane_advanced && pad_up.contains_key(&Pad::new(crate::geometry::Group::C, 0))
        {
            self.pad_c_passed = true;
        }

        let lanes_done = self.lanes.iter().all(|l| l.finished);
        let c_ready = !self.wifi_need_c || self.pad_c_passed;

        if lanes_done && c_ready {
            let on_time = (now - self.critical_moment).abs() <= self.critical_delta;
            let shifted = (now - self.critical_moment + SLIDE_DELTA_SHIFT).abs() <= SLIDE_CRITICAL;
            let judge = if on_time || shifted { Judge::Critical } else { Judge::Bad };
            let action = self.lanes[1]
                .area_judge_log
                .last()
                .copied()
                .flatten()
                .map(|(a, _)| a);
            self.common.judge_as(now, judge, action);
            return;
        }

        if now > self.end_moment + SLIDE_AVAILABLE {
            self.common.judge_as(now, Judge::Bad, None);
        }
    }

    pub fn finish(&self, now: Moment) -> bool {
        self.common.judge.is_final() && now > self.end_moment
    }
}

/// Shared simple-note judge logic for Tap/Hold/Touch/TouchHold: judge on the
/// first matching pad-down inside the available window, else time out.
fn simple_on_pad_down(
    common: &mut NoteCommon,
    pad: Pad,
    moment: Moment,
    critical_window: Moment,
    available_window: Moment,
    now: Moment,
    down_pad: Pad,
    action: ActionId,
) -> bool {
    if common.judge.is_final() || down_pad != pad || now < moment - available_window {
        return false;
    }

    let judge = if (now - moment).abs() <= critical_window {
        Judge::Critical
    } else {
        Judge::Bad
    };
    common.judge_as(now, judge, Some(action));
    true
}

fn simple_update(common: &mut NoteCommon, moment: Moment, available_window: Moment, now: Moment) {
    if !common.judge.is_final() && now - moment > available_window {
        common.judge_as(now, Judge::Bad, None);
    }
}

/// One note, in whichever variant the parser produced it as.
#[derive(Clone, Debug)]
pub enum Note {
    Tap(TapNote),
    Hold(HoldNote),
    Touch(TouchNote),
    TouchHold(TouchHoldNote),
    TouchGroup(TouchGroupNote),
    SlideChain(SlideChainNote),
    Wifi(WifiNote),
}

impl Note {
    pub fn common(&self) -> &NoteCommon {
        match self {
            Note::Tap(n) => &n.common,
            Note::Hold(n) => &n.common,
            Note::Touch(n) => &n.common,
            Note::TouchHold(n) => &n.common,
            Note::TouchGroup(n) => &n.common,
            Note::SlideChain(n) => &n.common,
            Note::Wifi(n) => &n.common,
        }
    }

    /// Offers a pad-down event to this note. Returns `true` if it was
    /// consumed (the dispatcher stops walking further notes for this pad).
    pub fn on_pad_down(&mut self, now: Moment, pad: Pad, action: ActionId) -> bool {
        match self {
            Note::Tap(n) => simple_on_pad_down(
                &mut n.common,
                n.pad,
                n.common.moment,
                TAP_CRITICAL,
                TAP_AVAILABLE,
                now,
                pad,
                action,
            ),
            Note::Hold(n) => simple_on_pad_down(
                &mut n.common,
                n.pad,
                n.common.moment,
                TAP_CRITICAL,
                TAP_AVAILABLE,
                now,
                pad,
                action,
            ),
            Note::Touch(n) => simple_on_pad_down(
                &mut n.common,
                n.pad,
                n.common.moment,
                TOUCH_CRITICAL,
                TOUCH_AVAILABLE,
                now,
                pad,
                action,
            ),
            Note::TouchHold(n) => simple_on_pad_down(
                &mut n.common,
                n.pad,
                n.common.moment,
                TOUCH_CRITICAL,
                TOUCH_AVAILABLE,
                now,
                pad,
                action,
            ),
            Note::TouchGroup(group) => {
                let moment = group.common.moment;
                let mut any_consumed = false;
                let mut judged_count = group.children.iter().filter(|c| c.judge.is_final()).count();

                for child in &mut group.children {
                    if child.judge.is_final() {
                        continue;
                    }
                    if child.pad != pad || now < moment - TOUCH_AVAILABLE {
                        continue;
                    }
                    child.judge = if (now - moment).abs() <= TOUCH_CRITICAL {
                        Judge::Critical
                    } else {
                        Judge::Bad
                    };
                    child.judge_moment = Some(now);
                    child.judge_action = Some(action);
                    any_consumed = true;
                    judged_count += 1;
                    break;
                }

                if judged_count >= group.threshold {
                    for child in &mut group.children {
                        if !child.judge.is_final() {
                            child.judge = Judge::Critical;
                            child.judge_moment = Some(now);
                        }
                    }
                }

                any_consumed
            }
            // Slides and wifi progress via `update`'s pad-source/pad-up maps,
            // not the dispatcher's consuming offer.
            Note::SlideChain(_) | Note::Wifi(_) => false,
        }
    }

    pub fn update(
        &mut self,
        now: Moment,
        pad_source: &HashMap<Pad, ActionId>,
        pad_up: &HashMap<Pad, ActionId>,
        strict_v_shape_skip: bool,
    ) {
        match self {
            Note::Tap(n) => simple_update(&mut n.common, n.common.moment, TAP_AVAILABLE, now),
            Note::Hold(n) => simple_update(&mut n.common, n.common.moment, TAP_AVAILABLE, now),
            Note::Touch(n) => simple_update(&mut n.common, n.common.moment, TOUCH_AVAILABLE, now),
            Note::TouchHold(n) => simple_update(&mut n.common, n.common.moment, TOUCH_AVAILABLE, now),
            Note::TouchGroup(group) => {
                let moment = group.common.moment;
                for child in &mut group.children {
                    if !child.judge.is_final() && now - moment > TOUCH_AVAILABLE {
                        child.judge = Judge::Bad;
                        child.judge_moment = Some(now);
                    }
                }
                if group.children.iter().all(|c| c.judge.is_final()) && !group.common.judge.is_final() {
                    let worst = if group.children.iter().any(|c| c.judge == Judge::Bad) {
                        Judge::Bad
                    } else {
                        Judge::Critical
                    };
                    group.common.judge_as(now, worst, None);
                }
            }
            Note::SlideChain(n) => n.update(now, pad_source, pad_up, strict_v_shape_skip),
            Note::Wifi(n) => n.update(now, pad_source, pad_up),
        }
    }

    pub fn finish(&self, now: Moment) -> bool {
        match self {
            Note::Tap(n) => n.common.judge.is_final(),
            Note::Hold(n) => n.common.judge.is_final() && now > n.end_moment,
            Note::Touch(n) => n.common.judge.is_final(),
            Note::TouchHold(n) => n.common.judge.is_final() && now > n.end_moment,
            Note::TouchGroup(n) => n.children.iter().all(|c| c.judge.is_final()),
            Note::SlideChain(n) => n.finish(now),
            Note::Wifi(n) => n.finish(now),
        }
    }

    /// Key combo numbering sorts by: slides and wifi order by their
    /// critical moment (when the shape completes), holds by their tail, and
    /// everything else by their head moment.
    pub fn combo_sort_key(&self) -> Moment {
        match self {
            Note::Hold(n) => n.end_moment,
            Note::TouchHold(n) => n.end_moment,
            Note::SlideChain(n) => n.critical_moment,
            Note::Wifi(n) => n.critical_moment,
            Note::Tap(n) => n.common.moment,
            Note::Touch(n) => n.common.moment,
            Note::TouchGroup(n) => n.common.moment,
        }
    }

    pub fn set_combo(&mut self, combo: u32) {
        match self {
            Note::Tap(n) => n.common.combo = combo,
            Note::Hold(n) => n.common.combo = combo,
            Note::Touch(n) => n.common.combo = combo,
            Note::TouchHold(n) => n.common.combo = combo,
            Note::TouchGroup(n) => n.common.combo = combo,
            Note::SlideChain(n) => n.common.combo = combo,
            Note::Wifi(n) => n.common.combo = combo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Group;

    fn cursor() -> Cursor {
        Cursor::new(1, 1, "1")
    }

    #[test]
    fn tap_judges_critical_within_window() {
        let mut note = Note::Tap(TapNote {
            common: NoteCommon::new(cursor(), 0),
            pad: Pad::from_number(Group::A, 1),
            is_slide_head: false,
        });
        assert!(note.on_pad_down(0, Pad::from_number(Group::A, 1), 7));
        assert_eq!(note.common().judge, Judge::Critical);
    }

    #[test]
    fn tap_times_out_to_bad() {
        let mut note = Note::Tap(TapNote {
            common: NoteCommon::new(cursor(), 0),
            pad: Pad::from_number(Group::A, 1),
            is_slide_head: false,
        });
        note.update(TAP_AVAILABLE + 1, &HashMap::new(), &HashMap::new(), true);
        assert_eq!(note.common().judge, Judge::Bad);
    }

    #[test]
    fn touch_group_auto_judges_past_threshold() {
        let mut group = TouchGroupNote {
            common: NoteCommon::new(cursor(), 0),
            children: vec![
                TouchChild { pad: Pad::from_number(Group::B, 1), judge: Judge::NotYet, judge_moment: None, judge_action: None },
                TouchChild { pad: Pad::from_number(Group::B, 2), judge: Judge::NotYet, judge_moment: None, judge_action: None },
                TouchChild { pad: Pad::from_number(Group::B, 3), judge: Judge::NotYet, judge_moment: None, judge_action: None },
            ],
            center: crate::geometry::Point::ZERO,
            radius: 10.0,
            on_slide: false,
            threshold: 2,
        };
        let mut note = Note::TouchGroup(group.clone());
        assert!(note.on_pad_down(0, Pad::from_number(Group::B, 1), 1));
        assert!(note.on_pad_down(0, Pad::from_number(Group::B, 2), 2));
        let Note::TouchGroup(g) = note else { unreachable!() };
        group = g;
        assert!(group.children.iter().all(|c| c.judge.is_final()));
    }
}
