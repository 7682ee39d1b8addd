//! [`WorkspaceSource`] implementation backed by Hyprland IPC.
//!
//! Communicates directly with Hyprland through its Unix socket at
//! `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`,
//! avoiding any shell command invocation or third-party crate for socket
//! discovery.

use crate::command::{MonitorInfo, WorkspaceInfo};
use crate::traits::WorkspaceSource;
use serde::Deserialize;
use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::path::PathBuf;

/// Hyprland-backed workspace source.
///
/// All communication happens over Hyprland's IPC socket
/// (`$XDG_RUNTIME_DIR/hypr/<instance>/.socket.sock`).  No child processes
/// are spawned.
pub struct HyprlandWorkspaces;

/// Errors that can occur when talking to Hyprland.
#[derive(Debug, thiserror::Error)]
#[error("hyprland IPC error: {0}")]
pub struct HyprlandError(String);

impl Default for HyprlandWorkspaces {
    fn default() -> Self {
        Self
    }
}

impl HyprlandWorkspaces {
    /// Create a new handle.
    ///
    /// No connection is opened eagerly; each method call opens a
    /// short-lived IPC request.
    pub fn new() -> Self {
        Self
    }
}

//  Direct Hyprland IPC helpers

/// Resolve the Hyprland command socket path.
///
/// Hyprland ≥ 0.40 stores its sockets at
/// `$XDG_RUNTIME_DIR/hypr/$HYPRLAND_INSTANCE_SIGNATURE/.socket.sock`.
fn socket_path() -> Result<PathBuf, HyprlandError> {
    let runtime_dir = std::env::var("XDG_RUNTIME_DIR")
        .map_err(|_| HyprlandError("XDG_RUNTIME_DIR not set".into()))?;
    let his = std::env::var("HYPRLAND_INSTANCE_SIGNATURE")
        .map_err(|_| HyprlandError("HYPRLAND_INSTANCE_SIGNATURE not set".into()))?;
    Ok(PathBuf::from(format!(
        "{}/hypr/{}/.socket.sock",
        runtime_dir, his
    )))
}

/// Send a raw command to the Hyprland command socket and return the
/// response as a string.
fn ipc_request(command: &str) -> Result<String, HyprlandError> {
    let path = socket_path()?;
    let mut stream = UnixStream::connect(&path)
        .map_err(|e| HyprlandError(format!("connect to {}: {}", path.display(), e)))?;

    stream
        .write_all(command.as_bytes())
        .map_err(|e| HyprlandError(format!("write: {}", e)))?;

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .map_err(|e| HyprlandError(format!("read: {}", e)))?;

    String::from_utf8(response).map_err(|e| HyprlandError(format!("utf-8: {}", e)))
}

/// Send a JSON data query (`j/<command>`) and return the raw JSON string.
fn ipc_json(data_command: &str) -> Result<String, HyprlandError> {
    ipc_request(&format!("j/{}", data_command))
}

/// Send a dispatch command and check for `"ok"`.
fn ipc_dispatch(args: &str) -> Result<(), HyprlandError> {
    let response = ipc_request(&format!("/dispatch {}", args))?;
    if response.trim() == "ok" {
        Ok(())
    } else {
        Err(HyprlandError(format!("dispatch error: {}", response)))
    }
}

//  Minimal serde structs for the JSON we care about

/// Subset of the JSON object returned by `j/workspaces` and
/// `j/activeworkspace`.
#[derive(Deserialize)]
struct WorkspaceJson {
    id: i32,
    name: String,
    monitor: String,
    windows: u32,
}

impl From<WorkspaceJson> for WorkspaceInfo {
    fn from(ws: WorkspaceJson) -> Self {
        WorkspaceInfo {
            id: ws.id,
            name: ws.name,
            monitor: ws.monitor,
            windows: ws.windows,
        }
    }
}

/// Subset of the JSON object returned by `j/monitors`.
#[derive(Deserialize)]
struct MonitorJson {
    name: String,
    width: u32,
    height: u32,
    x: i32,
    y: i32,
}

//  WorkspaceSource implementation

impl WorkspaceSource for HyprlandWorkspaces {
    type Error = HyprlandError;

    fn workspaces(&self) -> Result<Vec<WorkspaceInfo>, Self::Error> {
        let json = ipc_json("workspaces")?;
        let mut workspaces: Vec<WorkspaceJson> =
            serde_json::from_str(&json).map_err(|e| HyprlandError(format!("parse: {}", e)))?;
        // Hyprland enumerates in creation order; sort by id so the ring
        // order is stable across activations.
        workspaces.sort_by_key(|ws| ws.id);
        Ok(workspaces.into_iter().map(WorkspaceInfo::from).collect())
    }

    fn active_workspace(&self) -> Result<Option<WorkspaceInfo>, Self::Error> {
        let json = ipc_json("activeworkspace")?;
        // Hyprland returns an empty object `{}` when nothing is focused.
        if json.trim() == "{}" {
            return Ok(None);
        }
        let ws: WorkspaceJson =
            serde_json::from_str(&json).map_err(|e| HyprlandError(format!("parse: {}", e)))?;
        Ok(Some(ws.into()))
    }

    fn switch_to(&self, workspace_id: i32) -> Result<(), Self::Error> {
        ipc_dispatch(&format!("workspace {}", workspace_id))
    }

    fn monitors(&self) -> Result<Vec<MonitorInfo>, Self::Error> {
        let json = ipc_json("monitors")?;
        let monitors: Vec<MonitorJson> =
            serde_json::from_str(&json).map_err(|e| HyprlandError(format!("parse: {}", e)))?;
        Ok(monitors
            .into_iter()
            .map(|m| MonitorInfo {
                name: m.name,
                width: m.width,
                height: m.height,
                x: m.x,
                y: m.y,
            })
            .collect())
    }
}
