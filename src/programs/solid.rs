use super::Program;
use crate::color::Correction;
use crate::frame::Frame;

/// Fills the whole ring with one fixed color.
pub struct Solid {
    color: rgb::RGB8,
}

impl Solid {
    pub fn new(color: rgb::RGB8) -> Self {
        Self { color }
    }
}

impl Program for Solid {
    fn tick(
        &mut self,
        _now: time::OffsetDateTime,
        frame: &mut Frame,
        correction: &Correction,
    ) -> bool {
        frame.fill(correction.correct(self.color));
        true
    }
}
