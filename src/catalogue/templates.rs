//! Canonical, un-rotated slide templates (always drawn starting from pad
//! "1") and the generator that rotates/reflects each one across every start
//! pad to populate the catalogue.
//!
//! Every template is authored relative to `pad_b(0)`, i.e. numbered pad 1,
//! so that reflecting about the 1/5 axis before rotating (see
//! [`super::shape::SlidePath`]) reproduces the mirrored shape the game draws
//! for the opposite chart notation.

use std::collections::HashMap;
use std::f64::consts::PI;

use crate::geometry::{Group, Pad, Point};

use super::curve::Curve;
use super::shape::{derive_judge_sequence, default_candidates, JudgeArea, Shape, SlidePath, SlideShape, WifiShape};

/// Pad `delta` steps (CCW) after numbered pad 1, as a `B`-ring pad.
fn pad_b(delta: i32) -> Pad {
    Pad::new(Group::B, (1 + delta).rem_euclid(8) as u8)
}

const HUB: Point = Point::ZERO;

fn bisector(a: Point, b: Point) -> Point {
    let sum = a + b;
    if sum.length() > 1e-6 {
        sum.normalize()
    } else {
        // Opposite pads: fall back to a vector perpendicular to `a`.
        Point::new(-a.im, a.re).normalize()
    }
}

struct TemplateSpec {
    shape_letter: &'static str,
    delta: i32,
    via_delta: Option<i32>,
    chiral: bool,
    curve: Curve,
    is_l_shape: bool,
    is_special_l: bool,
    critical_last_segment_proportion: f64,
}

fn straight_template(delta: i32) -> TemplateSpec {
    TemplateSpec {
        shape_letter: "-",
        delta,
        via_delta: None,
        chiral: false,
        curve: Curve::Line(pad_b(0).center_offset(), pad_b(delta).center_offset()),
        is_l_shape: false,
        is_special_l: false,
        critical_last_segment_proportion: 0.25,
    }
}

fn circle_template(delta: i32, ccw: bool) -> TemplateSpec {
    let radius = pad_b(0).center_offset().length();
    let start_angle = PI / 4.0; // pad_b(0) sits at angle 45deg
    let sweep = if ccw {
        delta as f64 * PI / 4.0
    } else {
        -((8 - delta) as f64) * PI / 4.0
    };

    TemplateSpec {
        shape_letter: if ccw { "<" } else { ">" },
        delta,
        via_delta: None,
        chiral: false,
        curve: Curve::Arc {
            center: HUB,
            radius,
            start_radians: start_angle,
            sweep_radians: sweep,
        },
        is_l_shape: false,
        is_special_l: false,
        critical_last_segment_proportion: 0.2,
    }
}

fn hook_template(delta: i32, depth: f64, shape_letter: &'static str) -> TemplateSpec {
    let start = pad_b(0).center_offset();
    let end = pad_b(delta).center_offset();
    let control = bisector(start.normalize(), end.normalize()) * (start.length() * depth);

    TemplateSpec {
        shape_letter,
        delta,
        via_delta: None,
        chiral: true,
        curve: Curve::Quadratic(start, control, end),
        is_l_shape: false,
        is_special_l: false,
        critical_last_segment_proportion: 0.3,
    }
}

fn cup_template(delta: i32) -> TemplateSpec {
    let start = pad_b(0).center_offset();
    let end = pad_b(delta).center_offset();
    let out = start.length() * 1.8;
    let bis = bisector(start.normalize(), end.normalize());
    // Offset the two control points unevenly around the bisector so the cup
    // is chiral rather than symmetric.
    let c1 = start.normalize().rotate(Point::from_angle(-PI / 10.0)) * out;
    let c2 = bis.rotate(Point::from_angle(PI / 14.0)) * out;

    TemplateSpec {
        shape_letter: "pp",
        delta,
        via_delta: None,
        chiral: true,
        curve: Curve::Cubic(start, c1, c2, end),
        is_l_shape: false,
        is_special_l: false,
        critical_last_segment_proportion: 0.35,
    }
}

fn lightning_template() -> TemplateSpec {
    let start = pad_b(0).center_offset();
    let end = pad_b(4).center_offset();
    let mid = (start + end) / 2.0;
    let perp = Point::new(-(end - start).im, (end - start).re).normalize();
    let zig_a = mid + perp * (start.length() * 0.3) - (end - start) * 0.15;
    let zig_b = mid - perp * (start.length() * 0.3) + (end - start) * 0.15;

    TemplateSpec {
        shape_letter: "s",
        delta: 4,
        via_delta: None,
        chiral: true,
        curve: Curve::Chain(vec![
            Curve::Line(start, zig_a),
            Curve::Line(zig_a, zig_b),
            Curve::Line(zig_b, end),
        ]),
        is_l_shape: false,
        is_special_l: false,
        critical_last_segment_proportion: 0.2,
    }
}

fn v_template(delta: i32) -> TemplateSpec {
    let start = pad_b(0).center_offset();
    let end = pad_b(delta).center_offset();

    TemplateSpec {
        shape_letter: "v",
        delta,
        via_delta: None,
        chiral: false,
        curve: Curve::Chain(vec![Curve::Line(start, HUB), Curve::Line(HUB, end)]),
        is_l_shape: false,
        is_special_l: false,
        critical_last_segment_proportion: 0.3,
    }
}

fn grand_v_template(via_delta: i32, end_delta: i32) -> TemplateSpec {
    let start = pad_b(0).center_offset();
    let via = pad_b(via_delta).center_offset();
    let end = pad_b(end_delta).center_offset();
    let special = (via_delta - end_delta).rem_euclid(8) == 4 || (end_delta - via_delta).rem_euclid(8) == 4;

    TemplateSpec {
        shape_letter: "V",
        delta: end_delta,
        via_delta: Some(via_delta),
        chiral: true,
        curve: Curve::Chain(vec![Curve::Line(start, via), Curve::Line(via, end)]),
        is_l_shape: true,
        is_special_l: special,
        critical_last_segment_proportion: 0.25,
    }
}

fn wifi_lane_curve(end_delta: i32) -> Curve {
    let start = pad_b(0).center_offset();
    let end = pad_b(end_delta).center_offset();
    Curve::Chain(vec![Curve::Line(start, HUB), Curve::Line(HUB, end)])
}

/// Build every rotated (and, for chiral templates, reflected) variant of one
/// canonical [`TemplateSpec`] and register it under its simai-style key.
fn register_variants(spec: TemplateSpec, out: &mut HashMap<String, Shape>) {
    let candidates = default_candidates();
    let orientations: &[bool] = if spec.chiral { &[false, true] } else { &[false] };

    for &reflected in orientations {
        for steps in 0..8 {
            let path = SlidePath::new(spec.curve.clone(), reflected, steps);
            let judge_sequence = derive_judge_sequence(&path, &candidates);

            let start_number = pad_b(0).rotate(steps).number();
            let end_number = pad_b(spec.delta).rotate(steps).number();
            let key = match spec.via_delta {
                Some(via_delta) => {
                    let via_number = pad_b(via_delta).rotate(steps).number();
                    format!("{start_number}{}{via_number}{end_number}", spec.shape_letter)
                }
                None => format!("{start_number}{}{end_number}", spec.shape_letter),
            };

            let shape = SlideShape {
                key: key.clone(),
                path,
                judge_sequence,
                is_l_shape: spec.is_l_shape,
                is_special_l: spec.is_special_l,
                critical_last_segment_proportion: spec.critical_last_segment_proportion,
            };

            out.entry(key).or_insert(Shape::Slide(shape));
        }
    }
}

fn register_wifi(out: &mut HashMap<String, Shape>) {
    let lane_deltas = [3, 4, 5];
    let candidates = default_candidates();

    for steps in 0..8 {
        let paths: Vec<SlidePath> = lane_deltas
            .iter()
            .map(|&d| SlidePath::new(wifi_lane_curve(d), false, steps))
            .collect();
        let lanes: Vec<Vec<JudgeArea>> = paths
            .iter()
            .map(|p| derive_judge_sequence(p, &candidates))
            .collect();

        let start_number = pad_b(0).rotate(steps).number();
        let end_number = pad_b(4).rotate(steps).number();
        let key = format!("{start_number}w{end_number}");

        let shape = WifiShape {
            key: key.clone(),
            lanes: [lanes[0].clone(), lanes[1].clone(), lanes[2].clone()],
            paths: [paths[0].clone(), paths[1].clone(), paths[2].clone()],
        };

        out.entry(key).or_insert(Shape::Wifi(shape));
    }
}

/// Build the complete catalogue of slide shapes.
pub fn build() -> HashMap<String, Shape> {
    let mut out = HashMap::new();

    for delta in 2..=6 {
        register_variants(straight_template(delta), &mut out);
        register_variants(circle_template(delta, true), &mut out);
        register_variants(circle_template(delta, false), &mut out);
        register_variants(hook_template(delta, 1.4, "p"), &mut out);
        register_variants(cup_template(delta), &mut out);
        register_variants(v_template(delta), &mut out);
    }

    register_variants(lightning_template(), &mut out);
    register_variants(grand_v_template(-2, 0), &mut out);
    register_variants(grand_v_template(3, 6), &mut out);
    register_wifi(&mut out);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn straight_shape_starts_and_ends_on_named_pads() {
        let catalogue = build();
        let shape = catalogue.get("1-3").expect("straight 1-3 should exist");
        let Shape::Slide(slide) = shape else {
            panic!("expected a slide shape");
        };
        assert_eq!(slide.judge_sequence.first().unwrap().pad.number(), 1);
        assert_eq!(slide.judge_sequence.last().unwrap().pad.number(), 3);
    }

    #[test]
    fn grand_v_is_flagged_as_l_shape() {
        let catalogue = build();
        let shape = catalogue.values().find(|s| matches!(s, Shape::Slide(sl) if sl.is_l_shape));
        assert!(shape.is_some());
    }

    #[test]
    fn wifi_has_three_lanes_of_similar_length() {
        let catalogue = build();
        let wifi = catalogue.get("1w5").expect("wifi 1-5 should exist");
        let Shape::Wifi(w) = wifi else {
            panic!("expected a wifi shape");
        };
        for lane in &w.lanes {
            assert!(!lane.is_empty());
        }
    }
}
