//! Smallest enclosing circle via Welzl's randomized algorithm.

use rand::seq::SliceRandom;
use rand::thread_rng;

use crate::geometry::Point;

/// A circle described by its center and radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    fn contains(&self, p: Point, eps: f64) -> bool {
        self.center.distance(p) <= self.radius + eps
    }

    fn from_two(a: Point, b: Point) -> Self {
        let center = (a + b) / 2.0;
        Self {
            center,
            radius: center.distance(a),
        }
    }

    fn from_three(a: Point, b: Point, c: Point) -> Option<Self> {
        // Circumcircle via the perpendicular-bisector intersection.
        let ax = a.re;
        let ay = a.im;
        let bx = b.re;
        let by = b.im;
        let cx = c.re;
        let cy = c.im;

        let d = 2.0 * (ax * (by - cy) + bx * (cy - ay) + cx * (ay - by));
        if d.abs() < 1e-9 {
            return None;
        }

        let ux = ((ax * ax + ay * ay) * (by - cy)
            + (bx * bx + by * by) * (cy - ay)
            + (cx * cx + cy * cy) * (ay - by))
            / d;
        let uy = ((ax * ax + ay * ay) * (cx - bx)
            + (bx * bx + by * by) * (ax - cx)
            + (cx * cx + cy * cy) * (bx - ax))
            / d;

        let center = Point::new(ux, uy);
        Some(Self {
            center,
            radius: center.distance(a),
        })
    }
}

const EPS: f64 = 1e-7;

/// Smallest circle enclosing every point in `points`. Degenerate inputs
/// (empty, single point, collinear) are handled explicitly rather than
/// falling out of the general three-point case.
pub fn smallest_enclosing_circle(points: &[Point]) -> Circle {
    match points.len() {
        0 => Circle {
            center: Point::ZERO,
            radius: 0.0,
        },
        1 => Circle {
            center: points[0],
            radius: 0.0,
        },
        _ => {
            let mut shuffled: Vec<Point> = points.to_vec();
            shuffled.shuffle(&mut thread_rng());
            welzl(&shuffled)
        }
    }
}

fn welzl(points: &[Point]) -> Circle {
    let mut boundary: Vec<Point> = Vec::with_capacity(3);
    let mut circle = trivial(&boundary);

    for i in 0..points.len() {
        if !circle.contains(points[i], EPS) {
            boundary.push(points[i]);
            circle = trivial(&boundary);

            for j in 0..i {
                if !circle.contains(points[j], EPS) {
                    boundary.push(points[j]);
                    circle = trivial(&boundary);
                    boundary.pop();
                }
            }

            boundary.pop();
        }
    }

    circle
}

/// Smallest circle through at most 3 boundary points.
fn trivial(boundary: &[Point]) -> Circle {
    match boundary.len() {
        0 => Circle {
            center: Point::ZERO,
            radius: 0.0,
        },
        1 => Circle {
            center: boundary[0],
            radius: 0.0,
        },
        2 => Circle::from_two(boundary[0], boundary[1]),
        _ => {
            // Try the circumcircle; if the three points are collinear, fall
            // back to the largest of the three two-point circles.
            if let Some(c) = Circle::from_three(boundary[0], boundary[1], boundary[2]) {
                if boundary
                    .iter()
                    .all(|&p| c.contains(p, EPS))
                {
                    return c;
                }
            }

            let pairs = [
                (boundary[0], boundary[1]),
                (boundary[0], boundary[2]),
                (boundary[1], boundary[2]),
            ];

            pairs
                .into_iter()
                .map(|(a, b)| Circle::from_two(a, b))
                .filter(|c| boundary.iter().all(|&p| c.contains(p, EPS)))
                .max_by(|a, b| a.radius.partial_cmp(&b.radius).unwrap())
                .expect("at least one two-point circle must contain all three points")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_point_has_zero_radius() {
        let c = smallest_enclosing_circle(&[Point::new(3.0, 4.0)]);
        assert_eq!(c.radius, 0.0);
        assert_eq!(c.center, Point::new(3.0, 4.0));
    }

    #[test]
    fn two_points_circle_is_diameter() {
        let c = smallest_enclosing_circle(&[Point::new(0.0, 0.0), Point::new(4.0, 0.0)]);
        assert!((c.radius - 2.0).abs() < 1e-6);
        assert!((c.center.re - 2.0).abs() < 1e-6);
    }

    #[test]
    fn collinear_points_do_not_panic() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(2.0, 0.0),
        ];
        let c = smallest_enclosing_circle(&pts);
        assert!((c.radius - 1.0).abs() < 1e-6);
    }

    #[test]
    fn encloses_every_input_point() {
        let pts: Vec<Point> = (0..8)
            .map(|i| Point::from_angle(i as f64 * std::f64::consts::FRAC_PI_4) * 100.0)
            .collect();
        let c = smallest_enclosing_circle(&pts);
        for &p in &pts {
            assert!(c.center.distance(p) <= c.radius + 1e-6);
        }
    }
}
