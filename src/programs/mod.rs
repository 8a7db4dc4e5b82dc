pub mod clock;
pub mod hare;
pub mod solid;
pub mod wakeup;

pub use self::clock::ClockFace;
pub use self::hare::Hare;
pub use self::solid::Solid;
pub use self::wakeup::Wakeup;

use crate::color::Correction;
use crate::frame::Frame;
use crate::state::DeviceState;
use crate::state::ProgramKind;

/// One lighting behavior, producing at most one frame per tick.
pub trait Program {
    /// Advances the program and writes the frame for `now` (UTC).
    ///
    /// Returns whether the frame was written and needs to reach the ring.
    /// A tick is synchronous from start to finish, a partially computed
    /// frame can never leave this call.
    fn tick(&mut self, now: time::OffsetDateTime, frame: &mut Frame, correction: &Correction)
        -> bool;
}

/// The currently running program.
///
/// Resolved from [`DeviceState`] once per state change, so the per-tick path
/// is a plain enum dispatch and never looks at program names again.
pub enum ActiveProgram {
    Null,
    Solid(Solid),
    Clock(ClockFace),
    Hare(Hare),
    Wakeup(Wakeup),
}

impl ActiveProgram {
    pub fn from_state(state: DeviceState, wakeup: &crate::config::WakeupConfig) -> Self {
        if !state.light_on {
            return ActiveProgram::Null;
        }

        let Some(kind) = state.program else {
            return ActiveProgram::Null;
        };

        match kind {
            ProgramKind::Red => ActiveProgram::Solid(Solid::new(crate::konst::RED)),
            ProgramKind::Green => ActiveProgram::Solid(Solid::new(crate::konst::GREEN)),
            ProgramKind::Blue => ActiveProgram::Solid(Solid::new(crate::konst::BLUE)),
            ProgramKind::White => ActiveProgram::Solid(Solid::new(crate::konst::WHITE)),
            ProgramKind::Dim => ActiveProgram::Solid(Solid::new(crate::konst::DIM)),
            ProgramKind::Clock => ActiveProgram::Clock(ClockFace),
            ProgramKind::Hare => ActiveProgram::Hare(Hare::default()),
            ProgramKind::Wakeup => ActiveProgram::Wakeup(Wakeup::new(wakeup.start, wakeup.end)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ActiveProgram::Null => "null",
            ActiveProgram::Solid(_) => "solid",
            ActiveProgram::Clock(_) => "clock",
            ActiveProgram::Hare(_) => "hare",
            ActiveProgram::Wakeup(_) => "wakeup",
        }
    }

    pub fn tick(
        &mut self,
        now: time::OffsetDateTime,
        frame: &mut Frame,
        correction: &Correction,
    ) -> bool {
        match self {
            // The render task cleared the buffer when it switched here.
            ActiveProgram::Null => false,
            ActiveProgram::Solid(program) => program.tick(now, frame, correction),
            ActiveProgram::Clock(program) => program.tick(now, frame, correction),
            ActiveProgram::Hare(program) => program.tick(now, frame, correction),
            ActiveProgram::Wakeup(program) => program.tick(now, frame, correction),
        }
    }
}
