use crate::params::Handedness;
use floorcoil_core::{Segment, Vec2};

/// Moving frame the router steers.
///
/// The heading is kept at the pipe spacing, so every probe derived from it
/// is measured in spacings. Probes are computed on demand and always agree
/// with the current position and heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Turtle {
    position: Vec2,
    heading: Vec2,
    handedness: Handedness,
}

impl Turtle {
    pub fn new(position: Vec2, heading: Vec2, handedness: Handedness) -> Self {
        Self {
            position,
            heading,
            handedness,
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn heading(&self) -> Vec2 {
        self.heading
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// +1 when walking clockwise, -1 otherwise.
    pub fn up(&self) -> f64 {
        self.handedness.sign()
    }

    /// Offset toward the wall being followed.
    fn side(&self) -> Vec2 {
        let up = self.up();
        Vec2::new(self.heading.y * up, -self.heading.x * up)
    }

    pub fn front(&self) -> Segment {
        Segment::new(self.position, self.heading)
    }

    pub fn front2(&self) -> Segment {
        Segment::new(self.position, self.heading * 2.0)
    }

    pub fn front3(&self) -> Segment {
        Segment::new(self.position, self.heading * 3.0)
    }

    pub fn left(&self) -> Segment {
        Segment::new(self.position, -self.side())
    }

    pub fn left2(&self) -> Segment {
        Segment::new(self.position, -self.side() * 2.0)
    }

    pub fn right(&self) -> Segment {
        Segment::new(self.position, self.side())
    }

    pub fn move_by(&mut self, delta: Vec2) {
        self.position += delta;
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn rotate_to(&mut self, heading: Vec2) {
        self.heading = heading;
    }

    pub fn turn_right(&mut self) {
        self.heading = self.side();
    }

    pub fn turn_left(&mut self) {
        self.heading = -self.side();
    }
}
