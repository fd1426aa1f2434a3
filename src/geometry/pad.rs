use std::f64::consts::PI;
use std::fmt;

use super::point::Point;

/// Canvas side length (px) the game's geometry is authored against; all
/// scaling configs (`JudgeConfig::canvas_size`) are relative to this.
pub const REFERENCE_CANVAS: f64 = 1080.0;

/// The five rings of touch-sensitive pads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Group {
    A = 0,
    B = 1,
    D = 2,
    E = 3,
    C = 4,
}

impl Group {
    const ALL_RINGS: [Self; 4] = [Self::A, Self::B, Self::D, Self::E];

    const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::D => 'D',
            Self::E => 'E',
            Self::C => 'C',
        }
    }

    /// Distance of the ring from canvas center, in reference (1080) pixels.
    /// Not traced from any concrete asset; chosen to keep rings nested in
    /// the documented outside-in order A > E > B > D > C (see DESIGN.md).
    const fn ring_radius(self) -> f64 {
        match self {
            Self::A => 300.0,
            Self::E => 230.0,
            Self::B => 205.0,
            Self::D => 110.0,
            Self::C => 0.0,
        }
    }

    /// Detection radius of a single pad disc in this ring, reference pixels.
    const fn pad_radius(self) -> f64 {
        match self {
            Self::A => 60.0,
            Self::B => 55.0,
            Self::D => 50.0,
            Self::E => 50.0,
            Self::C => 90.0,
        }
    }

    /// Angular offset applied on top of `index * 45°`. Ring E is rotated by
    /// half a step relative to A/B/D so that it sits diagonally between two
    /// adjacent A pads, matching the `A <-> E` diagonal adjacency.
    const fn angle_offset_deg(self) -> f64 {
        match self {
            Self::E => 22.5,
            _ => 0.0,
        }
    }
}

/// One of the 33 fixed touch-sensitive regions on the playfield: a disc
/// belonging to one of the four outer rings (`A`, `B`, `D`, `E`, eight pads
/// each) or the single center pad `C`.
///
/// Encoded as a 6-bit value `(group << 3) | index`, matching the wire
/// encoding used when a caller persists pad references (§6 of the spec).
/// `index` is 0..8 for the ring groups, with `0` representing the pad
/// numbered "8"; it is always `0` for `C`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pad(u8);

impl Pad {
    #[inline]
    pub fn new(group: Group, index: u8) -> Self {
        let index = if matches!(group, Group::C) { 0 } else { index % 8 };
        Self(((group as u8) << 3) | index)
    }

    /// Construct from the 1..8 numbering used in simai source text (8 maps
    /// to index 0).
    #[inline]
    pub fn from_number(group: Group, number: u8) -> Self {
        Self::new(group, number % 8)
    }

    #[inline]
    pub const fn from_encoded(value: u8) -> Self {
        Self(value)
    }

    #[inline]
    pub const fn encoded(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn group(self) -> Group {
        match self.0 >> 3 {
            0 => Group::A,
            1 => Group::B,
            2 => Group::D,
            3 => Group::E,
            _ => Group::C,
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0 & 0b111
    }

    /// The 1..8 display number (index 0 displays as 8).
    #[inline]
    pub const fn number(self) -> u8 {
        if self.index() == 0 {
            8
        } else {
            self.index()
        }
    }

    /// Unit vector from canvas center.
    pub fn unit_vec(self) -> Point {
        if matches!(self.group(), Group::C) {
            return Point::ZERO;
        }

        let degrees = self.index() as f64 * 45.0 + self.group().angle_offset_deg();
        Point::from_angle(degrees * PI / 180.0)
    }

    /// Offset from canvas center, scaled to the reference (1080) canvas.
    pub fn center_offset(self) -> Point {
        self.unit_vec() * self.group().ring_radius()
    }

    /// Detection radius, scaled to the reference (1080) canvas.
    pub fn radius(self) -> f64 {
        self.group().pad_radius()
    }

    /// Rotate by `steps * 45°` clockwise (index arithmetic; no-op on `C`).
    /// `rotate(8)` is the identity for every pad.
    pub fn rotate(self, steps: i32) -> Self {
        if matches!(self.group(), Group::C) {
            return self;
        }

        let idx = self.index() as i32;
        let rotated = (idx + steps).rem_euclid(8) as u8;
        Self::new(self.group(), rotated)
    }

    /// Reflect about the axis through pads 1 and 5. Involutive, and `C`
    /// maps to itself.
    pub fn reflect(self) -> Self {
        if matches!(self.group(), Group::C) {
            return self;
        }

        let idx = self.index() as i32;
        let reflected = (2 - idx).rem_euclid(8) as u8;
        Self::new(self.group(), reflected)
    }

    /// Whether two pads are adjacent in the game's fixed touch graph.
    /// Symmetric and irreflexive.
    pub fn next_to(self, other: Self) -> bool {
        if self == other {
            return false;
        }

        let (a, b) = (self, other);
        let same_ring_neighbor = |x: Self, y: Self| {
            x.group() as u8 == y.group() as u8
                && !matches!(x.group(), Group::C)
                && {
                    let d = (x.index() as i32 - y.index() as i32).rem_euclid(8);
                    d == 1 || d == 7
                }
        };
        let radial = |x: Self, y: Self, gx: Group, gy: Group| {
            x.group() as u8 == gx as u8 && y.group() as u8 == gy as u8 && x.index() == y.index()
        };
        let diagonal = |x: Self, y: Self, gx: Group, gy: Group| {
            x.group() as u8 == gx as u8
                && y.group() as u8 == gy as u8
                && {
                    let d = (x.index() as i32 - y.index() as i32).rem_euclid(8);
                    d == 0 || d == 1
                }
        };
        let hub = |x: Self, y: Self, gy: Group| matches!(x.group(), Group::C) && y.group() as u8 == gy as u8;

        same_ring_neighbor(a, b)
            || radial(a, b, Group::A, Group::B)
            || radial(b, a, Group::A, Group::B)
            || radial(a, b, Group::B, Group::D)
            || radial(b, a, Group::B, Group::D)
            || diagonal(a, b, Group::A, Group::E)
            || diagonal(b, a, Group::A, Group::E)
            || diagonal(a, b, Group::D, Group::E)
            || diagonal(b, a, Group::D, Group::E)
            || hub(a, b, Group::B)
            || hub(b, a, Group::B)
            || hub(a, b, Group::D)
            || hub(b, a, Group::D)
    }

    /// Iterate all 33 pads in a fixed, stable order (A0..A7, B0..B7, D0..D7,
    /// E0..E7, C).
    pub fn all() -> impl Iterator<Item = Pad> {
        Group::ALL_RINGS
            .into_iter()
            .flat_map(|g| (0..8).map(move |i| Pad::new(g, i)))
            .chain(std::iter::once(Pad::new(Group::C, 0)))
    }
}

impl fmt::Debug for Pad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for Pad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if matches!(self.group(), Group::C) {
            write!(f, "C")
        } else {
            write!(f, "{}{}", self.group().letter(), self.number())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_yields_33_pads() {
        assert_eq!(Pad::all().count(), 33);
    }

    #[test]
    fn rotate_by_eight_is_identity() {
        for pad in Pad::all() {
            assert_eq!(pad.rotate(8), pad);
            assert_eq!(pad.rotate(-8), pad);
        }
    }

    #[test]
    fn reflect_is_involutive() {
        for pad in Pad::all() {
            assert_eq!(pad.reflect().reflect(), pad);
        }
    }

    #[test]
    fn reflect_fixes_one_and_five() {
        assert_eq!(Pad::from_number(Group::A, 1).reflect(), Pad::from_number(Group::A, 1));
        assert_eq!(Pad::from_number(Group::B, 5).reflect(), Pad::from_number(Group::B, 5));
    }

    #[test]
    fn next_to_is_symmetric_and_irreflexive() {
        let pads: Vec<_> = Pad::all().collect();
        for &p in &pads {
            assert!(!p.next_to(p));
            for &q in &pads {
                assert_eq!(p.next_to(q), q.next_to(p));
            }
        }
    }

    #[test]
    fn ring_neighbors_are_adjacent() {
        let b3 = Pad::from_number(Group::B, 3);
        let b4 = Pad::from_number(Group::B, 4);
        assert!(b3.next_to(b4));
    }

    #[test]
    fn b_and_c_are_adjacent() {
        let b1 = Pad::from_number(Group::B, 1);
        let c = Pad::new(Group::C, 0);
        assert!(b1.next_to(c));
    }

    #[test]
    fn display_formats_like_simai() {
        assert_eq!(Pad::from_number(Group::B, 3).to_string(), "B3");
        assert_eq!(Pad::from_number(Group::A, 8).to_string(), "A8");
        assert_eq!(Pad::new(Group::C, 0).to_string(), "C");
    }
}
