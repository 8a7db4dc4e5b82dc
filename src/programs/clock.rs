use super::Program;
use crate::color::Correction;
use crate::frame::Frame;

/// An analog clock face made of three colored glows.
///
/// Red follows the seconds, green the minutes, blue the hours. Each hand is
/// a "comet": full brightness on the pixel under the hand, falling off with
/// `3^-d` over the circular distance `d` to it. Hands move fractionally, so
/// the glow slides smoothly around the ring instead of jumping per pixel.
pub struct ClockFace;

impl Program for ClockFace {
    fn tick(
        &mut self,
        now: time::OffsetDateTime,
        frame: &mut Frame,
        correction: &Correction,
    ) -> bool {
        let local = now.to_offset(crate::konst::TIMEZONE);

        let second = f64::from(local.second());
        let minute = f64::from(local.minute()) + second / 60.0;
        let hour = f64::from(local.hour() % 12) + minute / 60.0;

        let n = frame.len() as f64;
        let second_center = n * second / 60.0;
        let minute_center = n * minute / 60.0;
        let hour_center = n * hour / 12.0;

        for index in 0..frame.len() {
            let pixel = index as f64;
            let logical = rgb::RGB8 {
                r: glow(second_center, pixel, n),
                g: glow(minute_center, pixel, n),
                b: glow(hour_center, pixel, n),
            };
            frame.set(index, correction.correct(logical));
        }

        true
    }
}

/// Shortest way around the ring between two fractional positions.
fn circular_distance(a: f64, b: f64, n: f64) -> f64 {
    ((a - b).rem_euclid(n)).min((b - a).rem_euclid(n))
}

fn glow(center: f64, pixel: f64, n: f64) -> u8 {
    (255.0 * 3f64.powf(-circular_distance(center, pixel, n))) as u8
}
