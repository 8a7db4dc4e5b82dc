/// Fixed display offset applied to UTC before any time-of-day computation.
pub(crate) const TIMEZONE: time::UtcOffset = time::macros::offset!(+2);

pub(crate) const DEFAULT_NUM_LEDS: usize = 24;

pub(crate) const RED: rgb::RGB8 = rgb::RGB8 { r: 255, g: 0, b: 0 };

pub(crate) const GREEN: rgb::RGB8 = rgb::RGB8 { r: 0, g: 255, b: 0 };

pub(crate) const BLUE: rgb::RGB8 = rgb::RGB8 { r: 0, g: 0, b: 255 };

pub(crate) const WHITE: rgb::RGB8 = rgb::RGB8 { r: 255, g: 255, b: 255 };

pub(crate) const DIM: rgb::RGB8 = rgb::RGB8 { r: 64, g: 36, b: 1 };
