// Author: Dustin Pilgrim
// License: MIT

#[cfg(feature = "clap")]
use clap::ValueEnum;

#[cfg_attr(feature = "clap", derive(ValueEnum))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Primary,
    /// Right-click / context gesture.
    Secondary,
    Middle,
}

impl MouseButton {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "primary" | "left" => Some(Self::Primary),
            "secondary" | "right" | "alt" => Some(Self::Secondary),
            "middle" => Some(Self::Middle),
            _ => None,
        }
    }
}
