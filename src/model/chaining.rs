//! Pre-conversion passes over a parsed note list (§4.2): touch grouping,
//! slide-head/on-slide flagging, and combo numbering. These run as free
//! functions over `&mut [Note]` rather than methods, since they operate
//! across notes rather than on one.

use crate::config::JudgeConfig;
use crate::util::welzl::smallest_enclosing_circle;

use super::note::{Judge, Note, NoteCommon, TouchChild, TouchGroupNote};
use super::Moment;

/// Merges same-moment touch notes that sit on adjacent pads into a single
/// [`TouchGroupNote`], exactly as the source chart's curly-brace touch
/// groups do. Singletons are left as plain `Touch` notes.
pub fn group_touches(notes: Vec<Note>) -> Vec<Note> {
    let mut by_moment: std::collections::BTreeMap<Moment, Vec<usize>> = Default::default();
    for (i, n) in notes.iter().enumerate() {
        if matches!(n, Note::Touch(_)) {
            by_moment.entry(n.common().moment).or_default().push(i);
        }
    }

    let mut grouped_away: std::collections::HashSet<usize> = Default::default();
    let mut replacements: Vec<(usize, Note)> = Vec::new();

    for (_, idxs) in by_moment {
        let mut clusters: Vec<Vec<usize>> = Vec::new();
        for &i in &idxs {
            let pad = match &notes[i] {
                Note::Touch(t) => t.pad,
                _ => continue,
            };
            let mut joined = None;
            for (ci, cluster) in clusters.iter_mut().enumerate() {
                if cluster.iter().any(|&j| {
                    let other_pad = match &notes[j] {
                        Note::Touch(t) => t.pad,
                        _ => unreachable!(),
                    };
                    other_pad.next_to(pad)
                }) {
                    cluster.push(i);
                    joined = Some(ci);
                    break;
                }
            }
            if joined.is_none() {
                clusters.push(vec![i]);
            }
        }

        for cluster in clusters {
            if cluster.len() < 2 {
                continue;
            }

            let children: Vec<TouchChild> = cluster
                .iter()
                .map(|&i| match &notes[i] {
                    Note::Touch(t) => TouchChild {
                        pad: t.pad,
                        judge: Judge::NotYet,
                        judge_moment: None,
                        judge_action: None,
                    },
                    _ => unreachable!(),
                })
                .collect();

            let points: Vec<_> = children.iter().map(|c| c.pad.center_offset()).collect();
            let circle = smallest_enclosing_circle(&points);
            let on_slide = cluster.iter().any(|&i| match &notes[i] {
                Note::Touch(t) => t.on_slide,
                _ => false,
            });
            let moment = notes[cluster[0]].common().moment;
            let cursor = notes[cluster[0]].common().cursor.clone();
            let threshold = ((children.len() as f64) * 0.51).ceil() as usize;

            let group = TouchGroupNote {
                common: NoteCommon::new(cursor, moment),
                children,
                center: circle.center,
                radius: circle.radius,
                on_slide,
                threshold: threshold.max(1),
            };

            let anchor = cluster[0];
            replacements.push((anchor, Note::TouchGroup(group)));
            for &i in &cluster {
                grouped_away.insert(i);
            }
            grouped_away.remove(&anchor);
        }
    }

    let mut replacements: std::collections::HashMap<_, _> = replacements.into_iter().collect();
    notes
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !grouped_away.contains(i))
        .map(|(i, n)| replacements.remove(&i).unwrap_or(n))
        .collect()
}

/// Flags slide heads, tails landing on a later slide's head, and touches
/// sitting on an active slide path, per the distance/angle thresholds in
/// `config`. This pass does not change the note list's length.
pub fn link_slides(notes: &mut [Note], config: &JudgeConfig) {
    let slide_starts: Vec<(Moment, crate::geometry::Pad)> = notes
        .iter()
        .filter_map(|n| match n {
            Note::SlideChain(s) => Some((s.common.moment, s.start_pad)),
            Note::Wifi(w) => Some((w.common.moment, w.start_pad)),
            _ => None,
        })
        .collect();

    let threshold_ticks = config.tap_on_slide_threshold();

    for note in notes.iter_mut() {
        match note {
            Note::Tap(t) => {
                t.is_slide_head = slide_starts
                    .iter()
                    .any(|(m, p)| *p == t.pad && (*m - t.common.moment).abs() as f64 <= threshold_ticks);
            }
            Note::Hold(h) => {
                h.is_slide_head = slide_starts
                    .iter()
                    .any(|(m, p)| *p == h.pad && (*m - h.common.moment).abs() as f64 <= threshold_ticks);
                h.tail_on_slide_head = slide_starts
                    .iter()
                    .any(|(m, p)| *p == h.pad && (*m - h.end_moment).abs() as f64 <= threshold_ticks);
            }
            _ => {}
        }
    }
}

/// Assigns 1-based combo numbers in judgement order (§9 design note: slides
/// and wifi order by their critical moment, holds by their tail, everything
/// else by its head moment).
pub fn number_combo(notes: &mut [Note]) {
    let mut order: Vec<usize> = (0..notes.len()).collect();
    order.sort_by_key(|&i| notes[i].combo_sort_key());
    for (rank, idx) in order.into_iter().enumerate() {
        notes[idx].set_combo(rank as u32 + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Group, Pad};
    use crate::model::cursor::Cursor;
    use crate::model::note::TouchNote;

    fn touch(pad: Pad, moment: Moment) -> Note {
        Note::Touch(TouchNote {
            common: NoteCommon::new(Cursor::new(1, 1, "x"), moment),
            pad,
            on_slide: false,
            group_parent: None,
        })
    }

    #[test]
    fn adjacent_touches_merge_into_a_group() {
        let notes = vec![
            touch(Pad::from_number(Group::B, 1), 0),
            touch(Pad::from_number(Group::B, 2), 0),
        ];
        let merged = group_touches(notes);
        assert_eq!(merged.len(), 1);
        assert!(matches!(merged[0], Note::TouchGroup(_)));
    }

    #[test]
    fn distant_touches_stay_separate() {
        let notes = vec![
            touch(Pad::from_number(Group::B, 1), 0),
            touch(Pad::from_number(Group::B, 5), 0),
        ];
        let merged = group_touches(notes);
        assert_eq!(merged.len(), 2);
        assert!(merged.iter().all(|n| matches!(n, Note::Touch(_))));
    }

    #[test]
    fn combo_numbers_are_sequential() {
        let mut notes = vec![
            touch(Pad::from_number(Group::B, 1), 10),
            touch(Pad::from_number(Group::B, 5), 0),
        ];
        number_combo(&mut notes);
        assert_eq!(notes[1].common().combo, 1);
        assert_eq!(notes[0].common().combo, 2);
    }
}
