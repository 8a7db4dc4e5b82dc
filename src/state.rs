use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

/// What the user asked the ring to do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct DeviceState {
    pub light_on: bool,
    pub program: Option<ProgramKind>,
}

/// The programs selectable from the control page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgramKind {
    Red,
    Green,
    Blue,
    White,
    Dim,
    Clock,
    Wakeup,
    Hare,
}

impl ProgramKind {
    pub const ALL: [ProgramKind; 8] = [
        ProgramKind::Red,
        ProgramKind::Green,
        ProgramKind::Blue,
        ProgramKind::White,
        ProgramKind::Dim,
        ProgramKind::Clock,
        ProgramKind::Wakeup,
        ProgramKind::Hare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProgramKind::Red => "red",
            ProgramKind::Green => "green",
            ProgramKind::Blue => "blue",
            ProgramKind::White => "white",
            ProgramKind::Dim => "dim",
            ProgramKind::Clock => "clock",
            ProgramKind::Wakeup => "wakeup",
            ProgramKind::Hare => "hare",
        }
    }
}

impl std::str::FromStr for ProgramKind {
    type Err = UnknownProgram;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "red" => Ok(ProgramKind::Red),
            "green" => Ok(ProgramKind::Green),
            "blue" => Ok(ProgramKind::Blue),
            "white" => Ok(ProgramKind::White),
            "dim" => Ok(ProgramKind::Dim),
            "clock" => Ok(ProgramKind::Clock),
            "wakeup" => Ok(ProgramKind::Wakeup),
            "hare" => Ok(ProgramKind::Hare),
            other => Err(UnknownProgram(other.to_string())),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown program name '{}'", .0)]
pub struct UnknownProgram(String);

/// A partial update as it arrives from the control page.
///
/// The outer `Option` says whether the request carried the field at all; for
/// `program`, the inner `Option` is `None` when the requested name did not
/// parse, which deliberately switches the ring to "no program".
#[derive(Debug, Clone, Copy, Default)]
pub struct StateUpdate {
    pub light_on: Option<bool>,
    pub program: Option<Option<ProgramKind>>,
}

/// Shared cell holding the device state plus a coalescing change flag.
///
/// Writers set the flag in the same critical section as the mutation, so no
/// update can get lost between the two. The render task clears the flag when
/// it picks the state up; updates arriving faster than the render interval
/// collapse into one re-render of the latest state. The lock is only ever
/// held for a few loads and stores, never across an await point.
#[derive(Clone, Default)]
pub struct StateHandle {
    inner: Arc<Mutex<Cell>>,
}

#[derive(Debug, Default)]
struct Cell {
    state: DeviceState,
    changed: bool,
}

impl StateHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> DeviceState {
        self.lock().state
    }

    pub fn apply_update(&self, update: StateUpdate) {
        if update.light_on.is_none() && update.program.is_none() {
            return;
        }

        let mut cell = self.lock();
        if let Some(light_on) = update.light_on {
            cell.state.light_on = light_on;
        }
        if let Some(program) = update.program {
            cell.state.program = program;
        }
        cell.changed = true;
    }

    /// Returns the latest state and clears the change flag, or `None` when
    /// nothing changed since the last call.
    pub fn consume_change(&self) -> Option<DeviceState> {
        let mut cell = self.lock();
        if cell.changed {
            cell.changed = false;
            Some(cell.state)
        } else {
            None
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cell> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
