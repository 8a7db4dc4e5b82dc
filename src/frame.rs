use rgb::RGB8;

use crate::color::Channel;
use crate::color::Corrected;

/// The pixel buffer for one ring.
///
/// Owned by the render task; programs get a mutable borrow for the duration
/// of a single tick and never keep it around.
pub struct Frame {
    pixels: Vec<Corrected>,
}

impl Frame {
    pub fn new(len: usize) -> Self {
        Self {
            pixels: vec![Corrected::OFF; len],
        }
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn clear(&mut self) {
        self.fill(Corrected::OFF);
    }

    pub fn fill(&mut self, color: Corrected) {
        self.pixels.fill(color);
    }

    /// Panics when `index` is outside the ring, that is a bug in the caller.
    pub fn set(&mut self, index: usize, color: Corrected) {
        self.pixels[index] = color;
    }

    /// Writes a single channel of one pixel, leaving the other two channels
    /// untouched.
    pub fn set_channel(&mut self, index: usize, channel: Channel, value: u8) {
        *self.pixels[index].channel_mut(channel) = value;
    }

    pub fn get(&self, index: usize) -> Corrected {
        self.pixels[index]
    }

    /// The buffer in the form the LED driver takes.
    pub fn iter_hardware(&self) -> impl Iterator<Item = RGB8> + '_ {
        self.pixels.iter().map(|pixel| pixel.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use rgb::RGB8;

    use super::Frame;
    use crate::color::Channel;
    use crate::color::Correction;

    #[test]
    fn new_frame_is_dark() {
        let frame = Frame::new(24);
        assert_eq!(frame.len(), 24);
        assert!(frame
            .iter_hardware()
            .all(|pixel| pixel == RGB8 { r: 0, g: 0, b: 0 }));
    }

    #[test]
    fn channel_writes_do_not_clobber_other_channels() {
        let correction = Correction::new(1.0, 1.0, 1.0, 1.0);
        let mut frame = Frame::new(24);

        frame.set(3, correction.correct(RGB8 { r: 0, g: 0, b: 17 }));
        frame.set_channel(3, Channel::Red, 255);

        let pixel = frame.get(3).into_inner();
        assert_eq!(pixel.r, 255);
        assert_eq!(pixel.b, correction.correct_channel(Channel::Blue, 17));
    }

    #[test]
    fn clear_resets_every_pixel() {
        let correction = Correction::new(1.0, 1.0, 1.0, 1.0);
        let mut frame = Frame::new(8);
        frame.fill(correction.correct(RGB8 {
            r: 255,
            g: 255,
            b: 255,
        }));
        frame.clear();
        assert!(frame
            .iter_hardware()
            .all(|pixel| pixel == RGB8 { r: 0, g: 0, b: 0 }));
    }

    #[test]
    #[should_panic]
    fn out_of_range_index_is_a_bug() {
        let mut frame = Frame::new(4);
        frame.set_channel(4, Channel::Red, 1);
    }
}
