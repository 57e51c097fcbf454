//! Process priority classes understood by the loader's `-priority` flag.

use std::fmt::{Display, Formatter};

/// One of the six Windows process priority classes.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PriorityClass {
    /// `ABOVE_NORMAL_PRIORITY_CLASS`.
    AboveNormal,
    /// `BELOW_NORMAL_PRIORITY_CLASS`.
    BelowNormal,
    /// `HIGH_PRIORITY_CLASS`.
    High,
    /// `IDLE_PRIORITY_CLASS`.
    Idle,
    /// `NORMAL_PRIORITY_CLASS`.
    Normal,
    /// `REALTIME_PRIORITY_CLASS`.
    Realtime,
}

impl PriorityClass {
    /// All classes, in lookup-table order.
    pub const ALL: [Self; 6] = [
        Self::AboveNormal,
        Self::BelowNormal,
        Self::High,
        Self::Idle,
        Self::Normal,
        Self::Realtime,
    ];

    /// Name passed to the loader.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::AboveNormal => "above_normal",
            Self::BelowNormal => "below_normal",
            Self::High => "high",
            Self::Idle => "idle",
            Self::Normal => "normal",
            Self::Realtime => "realtime",
        }
    }

    /// Raw value returned by `GetPriorityClass`.
    #[must_use]
    pub fn raw(self) -> u32 {
        match self {
            Self::AboveNormal => 0x0000_8000,
            Self::BelowNormal => 0x0000_4000,
            Self::High => 0x0000_0080,
            Self::Idle => 0x0000_0040,
            Self::Normal => 0x0000_0020,
            Self::Realtime => 0x0000_0100,
        }
    }

    /// Look up a class by its raw Windows value.
    #[must_use]
    pub fn from_raw(raw: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.raw() == raw)
    }

    /// Look up a class by its loader name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|class| class.name() == name)
    }

    /// Closest class for a Unix nice value.
    #[must_use]
    pub fn from_nice(nice: i32) -> Self {
        match nice {
            i32::MIN..=-15 => Self::High,
            -14..=-1 => Self::AboveNormal,
            0 => Self::Normal,
            1..=9 => Self::BelowNormal,
            _ => Self::Idle,
        }
    }
}

impl Display for PriorityClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
