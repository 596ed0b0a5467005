use crate::error::{Error, Result};
use crate::timer::Phase;

pub const MAX_UNIT: u32 = 59;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    Minutes,
    Seconds,
}

impl Unit {
    pub fn label(self) -> &'static str {
        match self {
            Unit::Minutes => "Minutes",
            Unit::Seconds => "Seconds",
        }
    }
}

/// Every selectable value of one dropdown.
pub fn options() -> impl Iterator<Item = u32> {
    0..=MAX_UNIT
}

/// Minutes and seconds pickers composing a countdown length.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationSelector {
    minutes: u32,
    seconds: u32,
}

impl DurationSelector {
    pub fn new(minutes: u32, seconds: u32) -> Self {
        Self {
            minutes: minutes.min(MAX_UNIT),
            seconds: seconds.min(MAX_UNIT),
        }
    }

    pub fn minutes(&self) -> u32 {
        self.minutes
    }

    pub fn seconds(&self) -> u32 {
        self.seconds
    }

    pub fn get(&self, unit: Unit) -> u32 {
        match unit {
            Unit::Minutes => self.minutes,
            Unit::Seconds => self.seconds,
        }
    }

    /// Values outside the option list are not offered by the UI; clamp anyway.
    pub fn set(&mut self, unit: Unit, value: u32) {
        let value = value.min(MAX_UNIT);
        match unit {
            Unit::Minutes => self.minutes = value,
            Unit::Seconds => self.seconds = value,
        }
    }

    pub fn total_seconds(&self) -> u32 {
        self.minutes * 60 + self.seconds
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryControl {
    Start { enabled: bool },
    Resume,
    Stop,
}

impl PrimaryControl {
    pub fn label(self) -> &'static str {
        match self {
            PrimaryControl::Start { .. } => "Start",
            PrimaryControl::Resume => "Resume",
            PrimaryControl::Stop => "Stop",
        }
    }
}

/// Controls offered for the current timer phase. Interrupt is always there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerControls {
    pub primary: PrimaryControl,
}

impl TimerControls {
    pub fn for_state(phase: Phase, total_selected: u32) -> Self {
        let primary = match phase {
            Phase::Running => PrimaryControl::Stop,
            Phase::Paused => PrimaryControl::Resume,
            Phase::Idle | Phase::Finished => PrimaryControl::Start {
                enabled: total_selected > 0,
            },
        };
        Self { primary }
    }
}

/// Parses `MM:SS` or a bare `SS` into seconds. Each part must be 0..=59 and
/// the total must be positive.
pub fn parse_duration(raw: &str) -> Result<u32> {
    let raw = raw.trim();
    let (m, s) = match raw.split_once(':') {
        Some((m, s)) => (parse_unit(m, "minutes")?, parse_unit(s, "seconds")?),
        None => (0, parse_unit(raw, "seconds")?),
    };
    let total = DurationSelector::new(m, s).total_seconds();
    if total == 0 {
        return Err(Error::msg("duration must be greater than 00:00"));
    }
    Ok(total)
}

fn parse_unit(raw: &str, what: &str) -> Result<u32> {
    let v: u32 = raw
        .trim()
        .parse()
        .map_err(|_| Error::msg(format!("invalid {what} '{raw}'")))?;
    if v > MAX_UNIT {
        return Err(Error::msg(format!("{what} must be within 0..={MAX_UNIT}")));
    }
    Ok(v)
}
