//! Commands and types used throughout hyprousel.
//!
//! This module defines the vocabulary that all components share:
//! [`Command`] is the entire external control surface of the carousel,
//! and [`WorkspaceInfo`] / [`MonitorInfo`] provide the supporting data
//! types.
//!
//! Commands arrive as JSON strings; parsing is case-insensitive so
//! key-bind helpers can send `"next"` as well as `"Next"`.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Every action the carousel can perform.
///
/// Commands are produced by [`CommandSource`](crate::traits::CommandSource)
/// implementations and consumed by the
/// [`Carousel`](crate::carousel::Carousel).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Command {
    /// Activate the carousel overlay, or deactivate it if already active.
    ///
    /// Activation snapshots the eligible workspaces and positions the ring
    /// on the currently active one.
    Toggle,

    /// Rotate the ring to the next workspace (wraps around).
    Next,

    /// Rotate the ring to the previous workspace (wraps around).
    Prev,

    /// Switch to the selected workspace and leave the carousel.
    Select,

    /// Leave the carousel without switching.
    Exit,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Toggle => write!(f, "toggle"),
            Command::Next => write!(f, "next"),
            Command::Prev => write!(f, "prev"),
            Command::Select => write!(f, "select"),
            Command::Exit => write!(f, "exit"),
        }
    }
}

/// Parse a command string (case-insensitive; accepts "next", "Prev",
/// "previous", etc.).
fn parse_command(s: &str) -> Option<Command> {
    let normalized = s.trim().to_lowercase();
    match normalized.as_str() {
        "toggle" => Some(Command::Toggle),
        "next" => Some(Command::Next),
        "prev" | "previous" => Some(Command::Prev),
        "select" => Some(Command::Select),
        "exit" => Some(Command::Exit),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for Command {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_command(&s).ok_or_else(|| DeError::custom(format!("invalid command: {:?}", s)))
    }
}

/// Snapshot of a workspace known to the compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceInfo {
    /// Compositor workspace id.  Special workspaces carry negative ids.
    pub id: i32,
    /// Human-readable name (e.g. `"3"` or `"special:scratchpad"`).
    pub name: String,
    /// Name of the monitor the workspace lives on (e.g. `"DP-1"`).
    pub monitor: String,
    /// Number of mapped windows on the workspace.
    pub windows: u32,
}

impl WorkspaceInfo {
    /// Whether this workspace may appear on the carousel.
    ///
    /// Eligible means: at least one window, and not a special/hidden
    /// workspace (negative id or a `special:` name on Hyprland).
    pub fn is_eligible(&self) -> bool {
        self.windows > 0 && self.id > 0 && !self.name.starts_with("special")
    }
}

/// Static information about a monitor known to the compositor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorInfo {
    /// Unique name the compositor uses for this monitor (e.g. `"DP-1"`).
    pub name: String,
    /// Horizontal resolution in pixels.
    pub width: u32,
    /// Vertical resolution in pixels.
    pub height: u32,
    /// X position on the virtual desktop (pixels).
    pub x: i32,
    /// Y position on the virtual desktop (pixels).
    pub y: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_display() {
        assert_eq!(Command::Toggle.to_string(), "toggle");
        assert_eq!(Command::Next.to_string(), "next");
        assert_eq!(Command::Prev.to_string(), "prev");
        assert_eq!(Command::Select.to_string(), "select");
        assert_eq!(Command::Exit.to_string(), "exit");
    }

    #[test]
    fn parse_is_case_insensitive() {
        for (text, expected) in [
            (r#""toggle""#, Command::Toggle),
            (r#""Next""#, Command::Next),
            (r#""PREV""#, Command::Prev),
            (r#""previous""#, Command::Prev),
            (r#"" select ""#, Command::Select),
            (r#""Exit""#, Command::Exit),
        ] {
            let cmd: Command = serde_json::from_str(text).unwrap();
            assert_eq!(cmd, expected, "parsing {}", text);
        }
    }

    #[test]
    fn unknown_command_is_an_error() {
        let result: Result<Command, _> = serde_json::from_str(r#""sideways""#);
        assert!(result.is_err());
    }

    #[test]
    fn workspace_with_windows_is_eligible() {
        let ws = WorkspaceInfo {
            id: 3,
            name: "3".into(),
            monitor: "DP-1".into(),
            windows: 2,
        };
        assert!(ws.is_eligible());
    }

    #[test]
    fn empty_workspace_is_not_eligible() {
        let ws = WorkspaceInfo {
            id: 4,
            name: "4".into(),
            monitor: "DP-1".into(),
            windows: 0,
        };
        assert!(!ws.is_eligible());
    }

    #[test]
    fn special_workspace_is_not_eligible() {
        let ws = WorkspaceInfo {
            id: -99,
            name: "special:scratchpad".into(),
            monitor: "DP-1".into(),
            windows: 3,
        };
        assert!(!ws.is_eligible());
    }

    #[test]
    fn monitor_info_creation() {
        let m = MonitorInfo {
            name: "DP-1".into(),
            width: 2560,
            height: 1440,
            x: 0,
            y: 0,
        };
        assert_eq!(m.name, "DP-1");
        assert_eq!(m.width, 2560);
    }
}
