//! Catalogue entry types: a transformed path plus the judge areas derived
//! from sampling it.

use crate::geometry::{Group, Pad, Point};

use super::curve::Curve;

/// A canonical [`Curve`] plus the rigid transform (reflection, then
/// rotation) that places it at a concrete start pad. Evaluated lazily so the
/// catalogue can store one canonical curve per base template and derive all
/// 8 (or 16, for chiral shapes) rotated/reflected variants from it.
#[derive(Clone, Debug)]
pub struct SlidePath {
    curve: Curve,
    reflected: bool,
    rotation_steps: i32,
}

impl SlidePath {
    pub fn new(curve: Curve, reflected: bool, rotation_steps: i32) -> Self {
        Self {
            curve,
            reflected,
            rotation_steps,
        }
    }

    /// Reflect about the axis through pads numbered 1 and 5 — the same axis
    /// [`Pad::reflect`] fixes — then rotate by `rotation_steps * 45°`. Both
    /// steps are linear (no translation), so the same transform applies
    /// directly to tangent vectors.
    fn transform(&self, p: Point) -> Point {
        let p = if self.reflected {
            p.conj().rotate(Point::from_angle(std::f64::consts::FRAC_PI_2))
        } else {
            p
        };
        let angle = self.rotation_steps as f64 * 45.0_f64.to_radians();
        p.rotate(Point::from_angle(angle))
    }

    pub fn point(&self, t: f64) -> Point {
        self.transform(self.curve.point(t))
    }

    pub fn tangent(&self, t: f64) -> Point {
        self.transform(self.curve.tangent(t))
    }

    pub fn length(&self) -> f64 {
        self.curve.length()
    }
}

/// One ordered step of a slide's progression: the pad (or pad set, for
/// segment boundaries shared between two templates) the cursor must be
/// resting on, and the fraction of the path (`t`) at which it first enters.
#[derive(Clone, Debug, PartialEq)]
pub struct JudgeArea {
    pub pad: Pad,
    pub enter_t: f64,
}

/// A non-wifi slide shape: one path and the judge areas it passes through.
#[derive(Clone, Debug)]
pub struct SlideShape {
    pub key: String,
    pub path: SlidePath,
    pub judge_sequence: Vec<JudgeArea>,
    pub is_l_shape: bool,
    pub is_special_l: bool,
    pub critical_last_segment_proportion: f64,
}

/// A wifi shape: three parallel lanes sharing a start pad, each judged
/// independently.
#[derive(Clone, Debug)]
pub struct WifiShape {
    pub key: String,
    pub lanes: [Vec<JudgeArea>; 3],
    pub paths: [SlidePath; 3],
}

/// One registered catalogue entry.
#[derive(Clone, Debug)]
pub enum Shape {
    Slide(SlideShape),
    Wifi(WifiShape),
}

impl Shape {
    pub fn key(&self) -> &str {
        match self {
            Shape::Slide(s) => &s.key,
            Shape::Wifi(w) => &w.key,
        }
    }
}

/// Sample `path` at a fixed resolution and collect the ordered, deduplicated
/// sequence of judge-ring pads the cursor passes over. `candidates` is the
/// set of pads eligible to host a judge area for this template (the full `B`
/// ring, plus `C` for templates that cross the hub).
pub fn derive_judge_sequence(path: &SlidePath, candidates: &[Pad]) -> Vec<JudgeArea> {
    const SAMPLES: usize = 256;
    let mut sequence = Vec::new();
    let mut last_pad: Option<Pad> = None;

    for i in 0..=SAMPLES {
        let t = i as f64 / SAMPLES as f64;
        let p = path.point(t);

        let Some(&pad) = candidates
            .iter()
            .find(|pad| p.distance(pad.center_offset()) <= pad.radius())
        else {
            continue;
        };

        if last_pad != Some(pad) {
            sequence.push(JudgeArea { pad, enter_t: t });
            last_pad = Some(pad);
        }
    }

    sequence
}

/// The `B` ring plus the center hub — the candidate judge pads for every
/// non-wifi template.
pub fn default_candidates() -> Vec<Pad> {
    let mut pads: Vec<Pad> = (0..8).map(|i| Pad::new(Group::B, i)).collect();
    pads.push(Pad::new(Group::C, 0));
    pads
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_judge_sequence_finds_start_and_end() {
        let start = Pad::new(Group::B, 0).center_offset();
        let end = Pad::new(Group::B, 4).center_offset();
        let path = SlidePath::new(Curve::Line(start, end), false, 0);
        let seq = derive_judge_sequence(&path, &default_candidates());
        assert_eq!(seq.first().unwrap().pad, Pad::new(Group::B, 0));
        assert_eq!(seq.last().unwrap().pad, Pad::new(Group::B, 4));
    }
}
