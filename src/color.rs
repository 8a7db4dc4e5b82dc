use rgb::RGB8;

/// Gamma exponent of the ring hardware.
const GAMMA: f64 = 2.2;

/// One of the three color channels of a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// A hardware-ready color.
///
/// Only [`Correction`] produces values of this type, so a logical color can
/// never reach the driver uncorrected and a corrected color can never be
/// corrected a second time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Corrected(RGB8);

impl Corrected {
    pub const OFF: Corrected = Corrected(RGB8 { r: 0, g: 0, b: 0 });

    pub fn into_inner(self) -> RGB8 {
        self.0
    }

    pub(crate) fn channel_mut(&mut self, channel: Channel) -> &mut u8 {
        match channel {
            Channel::Red => &mut self.0.r,
            Channel::Green => &mut self.0.g,
            Channel::Blue => &mut self.0.b,
        }
    }
}

/// Maps logical colors onto what the ring should actually emit.
///
/// Built once from the configuration, read-only afterwards.
#[derive(Debug, Clone, Copy)]
pub struct Correction {
    brightness: f64,
    r_factor: f64,
    g_factor: f64,
    b_factor: f64,
}

impl Correction {
    pub fn new(brightness: f64, r_factor: f64, g_factor: f64, b_factor: f64) -> Self {
        Self {
            brightness,
            r_factor,
            g_factor,
            b_factor,
        }
    }

    pub fn correct(&self, logical: RGB8) -> Corrected {
        Corrected(RGB8 {
            r: self.correct_channel(Channel::Red, logical.r),
            g: self.correct_channel(Channel::Green, logical.g),
            b: self.correct_channel(Channel::Blue, logical.b),
        })
    }

    /// Corrects a single channel value, for programs that write channels
    /// individually instead of whole pixels.
    pub fn correct_channel(&self, channel: Channel, value: u8) -> u8 {
        let factor = match channel {
            Channel::Red => self.r_factor,
            Channel::Green => self.g_factor,
            Channel::Blue => self.b_factor,
        };

        let scaled = (self.brightness * factor * f64::from(value)) / 255.0;
        (scaled.powf(GAMMA) * 255.0).round().clamp(0.0, 255.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use rgb::RGB8;

    use super::Channel;
    use super::Correction;

    #[test]
    fn black_stays_black() {
        let correction = Correction::new(1.0, 1.0, 0.8, 0.8);
        assert_eq!(
            correction.correct(RGB8 { r: 0, g: 0, b: 0 }).into_inner(),
            RGB8 { r: 0, g: 0, b: 0 }
        );

        let dimmed = Correction::new(0.1, 1.0, 1.0, 1.0);
        assert_eq!(
            dimmed.correct(RGB8 { r: 0, g: 0, b: 0 }).into_inner(),
            RGB8 { r: 0, g: 0, b: 0 }
        );
    }

    #[test]
    fn full_scale_is_preserved() {
        let correction = Correction::new(1.0, 1.0, 1.0, 1.0);
        assert_eq!(correction.correct_channel(Channel::Red, 255), 255);
    }

    #[test]
    fn gamma_curve_darkens_midtones() {
        let correction = Correction::new(1.0, 1.0, 1.0, 1.0);
        // (128/255)^2.2 * 255 = 55.98
        assert_eq!(correction.correct_channel(Channel::Red, 128), 56);
    }

    #[test]
    fn channel_factor_is_applied_before_gamma() {
        let correction = Correction::new(1.0, 1.0, 0.8, 0.8);
        // (0.8)^2.2 * 255 = 156.08
        assert_eq!(correction.correct_channel(Channel::Green, 255), 156);
        assert_eq!(correction.correct_channel(Channel::Blue, 255), 156);
        assert_eq!(correction.correct_channel(Channel::Red, 255), 255);
    }

    #[test]
    fn zero_brightness_turns_everything_off() {
        let correction = Correction::new(0.0, 1.0, 1.0, 1.0);
        assert_eq!(
            correction
                .correct(RGB8 {
                    r: 255,
                    g: 255,
                    b: 255
                })
                .into_inner(),
            RGB8 { r: 0, g: 0, b: 0 }
        );
    }

    #[test]
    fn output_is_monotonic_in_brightness() {
        for value in [1u8, 42, 128, 200, 255] {
            let mut previous = 0u8;
            for step in 0..=20 {
                let brightness = f64::from(step) / 20.0;
                let correction = Correction::new(brightness, 1.0, 1.0, 1.0);
                let corrected = correction.correct_channel(Channel::Red, value);
                assert!(
                    corrected >= previous,
                    "channel value {value} went from {previous} to {corrected} at brightness {brightness}"
                );
                previous = corrected;
            }
        }
    }
}
