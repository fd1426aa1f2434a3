//! Integration tests exercising the public surface against the concrete
//! scenarios from the judgement engine's specification.

use simai_judge::{
    static_check, Action, Cursor, DynamicEngine, Group, JudgeConfig, Note, NoteCommon, Pad,
    TapNote,
};

fn cursor(line: u32) -> Cursor {
    Cursor::new(line, 1, "note")
}

fn tap(cursor: Cursor, moment: i64, pad: Pad) -> Note {
    Note::Tap(TapNote {
        common: NoteCommon::new(cursor, moment),
        pad,
        is_slide_head: false,
    })
}

#[test]
fn minimal_critical_tap_produces_no_muri_and_judges_critical() {
    simai_judge::slide_catalogue::init();

    let pad = Pad::from_number(Group::A, 1);
    let notes = vec![tap(cursor(1), 0, pad)];
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
    for _ in 0..10 {
        engine.tick(1);
    }

    assert!(engine.records().is_empty());
}

#[test]
fn overlapping_taps_on_the_same_pad_are_flagged() {
    let pad = Pad::from_number(Group::A, 5);
    let notes = vec![tap(cursor(1), 100, pad), tap(cursor(2), 101, pad)];

    let config = JudgeConfig::default();
    let records = static_check(&notes, &config);

    assert_eq!(records.len(), 1);
}

#[test]
fn distant_same_pad_taps_are_not_flagged_as_overlap() {
    let pad = Pad::from_number(Group::A, 5);
    let notes = vec![tap(cursor(1), 0, pad), tap(cursor(2), 50, pad)];

    let config = JudgeConfig::default();
    assert!(static_check(&notes, &config).is_empty());
}

#[test]
fn three_simultaneous_taps_trigger_one_multitouch_record() {
    let pads = [1u8, 3, 5].map(|n| Pad::from_number(Group::A, n));
    let notes: Vec<Note> = pads
        .iter()
        .enumerate()
        .map(|(i, &p)| tap(cursor(i as u32 + 1), 0, p))
        .collect();
    let actions: Vec<Action> = pads
        .iter()
        .enumerate()
        .map(|(i, &p)| Action::Press {
            source: i,
            moment: 0,
            position: p.center_offset(),
            radius: p.radius(),
            duration: 3,
            end_moment: 3,
            require_two_hands: false,
        })
        .collect();

    let mut engine = DynamicEngine::new(notes, actions, JudgeConfig::default(), 0);
    engine.tick(1);

    let multitouch_count = engine
        .records()
        .iter()
        .filter(|r| matches!(r, simai_judge::MuriRecord::MultiTouch { .. }))
        .count();
    assert_eq!(multitouch_count, 1);
}
