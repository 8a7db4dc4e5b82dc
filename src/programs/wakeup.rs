use super::Program;
use crate::color::Correction;
use crate::frame::Frame;

/// How long after the configured end time the ring keeps glowing.
const HOLD_SECONDS: i64 = 25 * 60;

/// Simulated sunrise between two configured times of day.
///
/// Progress through the window drives a logistic ease per channel with
/// staggered midpoints (red first, then green, then blue), sweeping the
/// whole ring from dark over red and yellow to white. The light stays on
/// for a while past the end time, then cuts to dark.
pub struct Wakeup {
    start: u32,
    end: u32,
}

impl Wakeup {
    /// Panics when the window is empty. [`crate::config::Config`] validation
    /// rejects such a configuration before a program can be built from it.
    pub fn new(start: crate::config::TimeOfDay, end: crate::config::TimeOfDay) -> Self {
        let start = start.seconds_of_day();
        let end = end.seconds_of_day();
        assert_ne!(start, end, "wakeup window must not be empty");

        Self { start, end }
    }
}

impl Program for Wakeup {
    fn tick(
        &mut self,
        now: time::OffsetDateTime,
        frame: &mut Frame,
        correction: &Correction,
    ) -> bool {
        let local = now.to_offset(crate::konst::TIMEZONE);
        let second_of_day = i64::from(local.hour()) * 3600
            + i64::from(local.minute()) * 60
            + i64::from(local.second());

        let logical = if second_of_day - HOLD_SECONDS < i64::from(self.end) {
            let tf = (second_of_day - i64::from(self.start)) as f64
                / (i64::from(self.end) - i64::from(self.start)) as f64;
            rgb::RGB8 {
                r: sunrise_channel(tf, 0.3) as u8,
                g: sunrise_channel(tf, 0.5) as u8,
                b: sunrise_channel(tf, 0.8) as u8,
            }
        } else {
            rgb::RGB8 { r: 0, g: 0, b: 0 }
        };

        frame.fill(correction.correct(logical));
        true
    }
}

/// Logistic ease from 0 to 255, hitting half scale at `midpoint`.
fn sunrise_channel(tf: f64, midpoint: f64) -> f64 {
    255.0 / (1.0 + (-6.0 * (tf - midpoint)).exp())
}

#[cfg(test)]
mod tests {
    use super::sunrise_channel;
    use super::Program;
    use super::Wakeup;
    use crate::color::Correction;
    use crate::config::TimeOfDay;
    use crate::frame::Frame;

    fn wakeup() -> Wakeup {
        Wakeup::new("05:30".parse().unwrap(), "06:15".parse().unwrap())
    }

    fn tick_at(program: &mut Wakeup, hour: u8, minute: u8, frame: &mut Frame) {
        // The program applies +2 itself, feed it UTC.
        let local = time::OffsetDateTime::UNIX_EPOCH
            + time::Duration::seconds(i64::from(hour) * 3600 + i64::from(minute) * 60)
            - time::Duration::hours(2);
        let correction = Correction::new(1.0, 1.0, 1.0, 1.0);
        assert!(program.tick(local, frame, &correction));
    }

    #[test]
    fn red_channel_is_half_scale_at_its_midpoint() {
        assert_eq!(sunrise_channel(0.3, 0.3), 127.5);
    }

    #[test]
    fn ease_saturates_at_the_extremes() {
        assert!(sunrise_channel(-100.0, 0.3) < 0.001);
        assert!(sunrise_channel(100.0, 0.8) > 254.999);
        assert!(sunrise_channel(-100.0, 0.5) >= 0.0);
    }

    #[test]
    fn channels_rise_in_order() {
        // Midway through the window red leads, blue trails.
        let r = sunrise_channel(0.5, 0.3);
        let g = sunrise_channel(0.5, 0.5);
        let b = sunrise_channel(0.5, 0.8);
        assert!(r > g);
        assert!(g > b);
        assert_eq!(g, 127.5);
    }

    #[test]
    fn long_before_start_the_ring_is_dark() {
        let mut program = wakeup();
        let mut frame = Frame::new(24);
        tick_at(&mut program, 3, 0, &mut frame);

        assert!(frame
            .iter_hardware()
            .all(|pixel| pixel == rgb::RGB8 { r: 0, g: 0, b: 0 }));
    }

    #[test]
    fn well_past_the_window_the_ring_cuts_to_dark() {
        let mut program = wakeup();
        let mut frame = Frame::new(24);

        // End is 06:15, hold is 25 minutes: 06:40 exactly is already off.
        tick_at(&mut program, 6, 40, &mut frame);
        assert!(frame
            .iter_hardware()
            .all(|pixel| pixel == rgb::RGB8 { r: 0, g: 0, b: 0 }));
    }

    #[test]
    fn just_before_the_hold_expires_the_ring_still_glows() {
        let mut program = wakeup();
        let mut frame = Frame::new(24);

        tick_at(&mut program, 6, 39, &mut frame);
        let pixel = frame.get(0).into_inner();
        assert!(pixel.r > 200, "red should be saturated, got {}", pixel.r);
    }

    #[test]
    fn at_the_end_time_all_channels_are_bright() {
        let mut program = wakeup();
        let mut frame = Frame::new(24);

        // 06:15 is tf = 1.0, past every midpoint.
        tick_at(&mut program, 6, 15, &mut frame);
        let pixel = frame.get(0).into_inner();
        assert!(pixel.r > 200);
        assert!(pixel.g > 180);
        assert!(pixel.b > 100);
    }

    #[test]
    fn epoch_is_tolerated() {
        // Unsynced clock: midnight UTC, 02:00 local, long before the window.
        let mut program = wakeup();
        let mut frame = Frame::new(24);
        let correction = Correction::new(1.0, 1.0, 1.0, 1.0);
        assert!(program.tick(time::OffsetDateTime::UNIX_EPOCH, &mut frame, &correction));
        assert!(frame
            .iter_hardware()
            .all(|pixel| pixel == rgb::RGB8 { r: 0, g: 0, b: 0 }));
    }

    #[test]
    #[should_panic]
    fn empty_window_is_a_configuration_bug() {
        let time: TimeOfDay = "06:00".parse().unwrap();
        let _ = Wakeup::new(time, time);
    }
}
