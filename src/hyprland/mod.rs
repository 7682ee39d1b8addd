//! Hyprland-specific implementations.
//!
//! This module provides the concrete backend for the
//! [`WorkspaceSource`](crate::traits::WorkspaceSource) trait, powered by
//! Hyprland's IPC socket.
//!
//! Nothing outside this module should reference Hyprland directly.

pub mod workspaces;
