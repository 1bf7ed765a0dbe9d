//! Level registry: the fixed, ordered table of severity levels
//!
//! Lower rank means more severe. Ranks only need to be strictly ordered;
//! the gap at 6 has no meaning.

use serde::Serialize;
use std::fmt;

/// Level that is always forwarded to the bus, whatever the threshold
pub const REMOTE: &str = "remote";

/// Audit level, always forwarded to the bus with its own payload shape
pub const AUDIT: &str = "audit";

/// Display color of a level on the console
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LevelColor {
    Red,
    Yellow,
    Magenta,
    Green,
    Cyan,
    /// Terminal default, no color applied
    Reset,
    Gray,
}

impl LevelColor {
    /// Terminal color, `None` for the terminal default
    pub fn terminal(self) -> Option<colored::Color> {
        match self {
            Self::Red => Some(colored::Color::Red),
            Self::Yellow => Some(colored::Color::Yellow),
            Self::Magenta => Some(colored::Color::Magenta),
            Self::Green => Some(colored::Color::Green),
            Self::Cyan => Some(colored::Color::Cyan),
            Self::Reset => None,
            Self::Gray => Some(colored::Color::BrightBlack),
        }
    }
}

/// A named severity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Level {
    name: &'static str,
    rank: u8,
    color: LevelColor,
}

const LEVELS: [Level; 7] = [
    // Something really bad happened
    Level::new("error", 0, LevelColor::Red),
    // Something went wrong, but did not fail completely
    Level::new("warn", 1, LevelColor::Yellow),
    Level::new(REMOTE, 2, LevelColor::Magenta),
    Level::new(AUDIT, 3, LevelColor::Green),
    Level::new("info", 4, LevelColor::Cyan),
    Level::new("debug", 5, LevelColor::Reset),
    Level::new("silly", 7, LevelColor::Gray),
];

impl Level {
    const fn new(name: &'static str, rank: u8, color: LevelColor) -> Self {
        Self { name, rank, color }
    }

    /// Every registered level, most severe first
    pub fn all() -> &'static [Level] {
        &LEVELS
    }

    /// Look up a level by exact name
    pub fn find(name: &str) -> Option<&'static Level> {
        LEVELS.iter().find(|level| level.name == name)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn rank(&self) -> u8 {
        self.rank
    }

    pub fn color(&self) -> LevelColor {
        self.color
    }

    /// Whether this level passes a floor of `threshold` (equally or more severe)
    pub fn is_enabled_for(&self, threshold: &Level) -> bool {
        self.rank <= threshold.rank
    }

    /// Whether this level is forwarded to the bus regardless of threshold
    pub fn is_mandatory_forward(&self) -> bool {
        self.name == REMOTE || self.name == AUDIT
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Rank of a level name, `None` if the name is not registered
pub fn rank(name: &str) -> Option<u8> {
    Level::find(name).map(Level::rank)
}
