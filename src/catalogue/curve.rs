//! Parametric curves used by the slide catalogue, in reference (1080-canvas)
//! units, parameterized over `t` in `[0, 1]`.
//!
//! Mirrors the teacher's slider-curve abstraction (one enum over the
//! possible curve kinds, each exposing `point`/`tangent`) rather than a
//! trait object, since the set of kinds is closed and known at compile time.

use crate::geometry::Point;

/// One segment of a slide path.
#[derive(Clone, Debug, PartialEq)]
pub enum Curve {
    /// A straight chord between two points.
    Line(Point, Point),
    /// A circular arc, swept `sweep_radians` starting at `start_radians`
    /// (positive = counter-clockwise).
    Arc {
        center: Point,
        radius: f64,
        start_radians: f64,
        sweep_radians: f64,
    },
    /// A quadratic Bezier curve (one control point) — used for the hook
    /// ("U-curve") and lightning templates.
    Quadratic(Point, Point, Point),
    /// A cubic Bezier curve (two control points) — used for the deeper
    /// hook ("cup-curve") template.
    Cubic(Point, Point, Point, Point),
    /// A sequence of curves played back to back, each covering an equal
    /// share of `t` — used for V-shapes, L-shapes (grand-V), and lightning.
    Chain(Vec<Curve>),
}

impl Curve {
    pub fn point(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);

        match self {
            Curve::Line(a, b) => *a + (*b - *a) * t,
            Curve::Arc {
                center,
                radius,
                start_radians,
                sweep_radians,
            } => *center + Point::from_angle(start_radians + sweep_radians * t) * *radius,
            Curve::Quadratic(p0, p1, p2) => {
                let u = 1.0 - t;
                *p0 * (u * u) + *p1 * (2.0 * u * t) + *p2 * (t * t)
            }
            Curve::Cubic(p0, p1, p2, p3) => {
                let u = 1.0 - t;
                *p0 * (u * u * u)
                    + *p1 * (3.0 * u * u * t)
                    + *p2 * (3.0 * u * t * t)
                    + *p3 * (t * t * t)
            }
            Curve::Chain(parts) => {
                let (idx, local_t) = chain_local(parts.len(), t);
                parts[idx].point(local_t)
            }
        }
    }

    pub fn tangent(&self, t: f64) -> Point {
        let t = t.clamp(0.0, 1.0);
        const H: f64 = 1e-4;
        let (t0, t1) = ((t - H).max(0.0), (t + H).min(1.0));

        if (t1 - t0).abs() < f64::EPSILON {
            return Point::ZERO;
        }

        (self.point(t1) - self.point(t0)) / (t1 - t0)
    }

    /// Approximate arc length via piecewise-linear sampling.
    pub fn length(&self) -> f64 {
        const SAMPLES: usize = 128;
        let mut total = 0.0;
        let mut prev = self.point(0.0);

        for i in 1..=SAMPLES {
            let t = i as f64 / SAMPLES as f64;
            let next = self.point(t);
            total += prev.distance(next);
            prev = next;
        }

        total
    }
}

fn chain_local(n_parts: usize, t: f64) -> (usize, f64) {
    if n_parts == 0 {
        return (0, 0.0);
    }

    let scaled = t * n_parts as f64;
    let idx = (scaled.floor() as usize).min(n_parts - 1);
    let local = scaled - idx as f64;

    (idx, local)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_endpoints() {
        let l = Curve::Line(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
        assert_eq!(l.point(0.0), Point::new(0.0, 0.0));
        assert_eq!(l.point(1.0), Point::new(10.0, 0.0));
        assert_eq!(l.point(0.5), Point::new(5.0, 0.0));
    }

    #[test]
    fn arc_sweeps_quarter_turn() {
        let arc = Curve::Arc {
            center: Point::ZERO,
            radius: 1.0,
            start_radians: 0.0,
            sweep_radians: std::f64::consts::FRAC_PI_2,
        };
        let end = arc.point(1.0);
        assert!((end.re).abs() < 1e-9);
        assert!((end.im - 1.0).abs() < 1e-9);
    }

    #[test]
    fn chain_visits_parts_in_order() {
        let chain = Curve::Chain(vec![
            Curve::Line(Point::new(0.0, 0.0), Point::new(1.0, 0.0)),
            Curve::Line(Point::new(1.0, 0.0), Point::new(1.0, 1.0)),
        ]);
        assert_eq!(chain.point(0.0), Point::new(0.0, 0.0));
        assert_eq!(chain.point(0.5), Point::new(1.0, 0.0));
        assert_eq!(chain.point(1.0), Point::new(1.0, 1.0));
    }
}
