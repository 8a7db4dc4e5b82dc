use super::Program;
use crate::color::Channel;
use crate::color::Correction;
use crate::frame::Frame;

/// Three dots chasing each other around the ring.
///
/// Each channel has its own fractional pointer, advanced by a fixed step per
/// tick (red 1/2, green 1/3, blue 1/4 pixel), so the dots run at different
/// speeds and overtake each other periodically. When two pointers land on
/// the same pixel the channels merge, the writes are per channel.
#[derive(Default)]
pub struct Hare {
    red: f64,
    green: f64,
    blue: f64,
}

impl Program for Hare {
    fn tick(
        &mut self,
        _now: time::OffsetDateTime,
        frame: &mut Frame,
        correction: &Correction,
    ) -> bool {
        let n = frame.len() as f64;

        self.red = (self.red + 1.0 / 2.0).rem_euclid(n);
        self.green = (self.green + 1.0 / 3.0).rem_euclid(n);
        self.blue = (self.blue + 1.0 / 4.0).rem_euclid(n);

        frame.clear();
        for (pointer, channel) in [
            (self.red, Channel::Red),
            (self.green, Channel::Green),
            (self.blue, Channel::Blue),
        ] {
            frame.set_channel(
                pointer as usize,
                channel,
                correction.correct_channel(channel, 255),
            );
        }

        true
    }
}
