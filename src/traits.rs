//! Core traits that decouple hyprousel from any specific compositor,
//! renderer, or transport mechanism.
//!
//! Every concrete backend (Hyprland, a Unix-socket listener, a test
//! harness, …) implements one of these traits.  The
//! [`Carousel`](crate::carousel::Carousel) only depends on these
//! abstractions.

use crate::command::{Command, MonitorInfo, WorkspaceInfo};
use crate::layout::{ScreenBox, Viewport};
use std::sync::mpsc;

/// Abstraction over a compositor that can enumerate and switch workspaces.
///
/// An implementation might talk to Hyprland via IPC, or it might be a
/// no-op stub used in tests.  All methods are read-only queries except
/// [`switch_to`](WorkspaceSource::switch_to), which is the single
/// fire-and-forget write the carousel ever performs.
pub trait WorkspaceSource {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Return every workspace the compositor knows about, in enumeration
    /// order.  Eligibility filtering is the caller's concern.
    fn workspaces(&self) -> Result<Vec<WorkspaceInfo>, Self::Error>;

    /// Return the currently active workspace, or `None` if the compositor
    /// cannot tell.
    fn active_workspace(&self) -> Result<Option<WorkspaceInfo>, Self::Error>;

    /// Switch the compositor to the workspace with the given id.
    fn switch_to(&self, workspace_id: i32) -> Result<(), Self::Error>;

    /// Return the list of monitors, used to size the carousel viewport.
    fn monitors(&self) -> Result<Vec<MonitorInfo>, Self::Error>;
}

//  Render sink

/// One slot's draw parameters within a [`Frame`].
#[derive(Debug, Clone, PartialEq)]
pub struct SlotDraw {
    /// Where to draw, in screen pixels (grow scale already applied).
    pub screen_box: ScreenBox,
    /// Opacity in `[0.3, 1.0]`.
    pub alpha: f32,
    /// Workspace this slot shows; `None` for the placeholder slot.
    pub workspace: Option<WorkspaceInfo>,
    /// Whether the renderer should draw the selection highlight around
    /// this slot.
    pub selected: bool,
}

/// A fully solved carousel frame, ready to be drawn.
///
/// Slots appear in enumeration order, not depth order; a renderer that
/// needs painter's-algorithm ordering can sort by box size.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// The area the frame was solved for.
    pub viewport: Viewport,
    /// Per-slot draw requests.
    pub slots: Vec<SlotDraw>,
}

/// A surface that can draw carousel frames.
///
/// The carousel computes geometry only; everything GPU-shaped lives behind
/// this trait.  Submission is fallible — a sink that is not ready (no
/// compositor surface yet, lost context, …) returns an error and the
/// carousel simply skips drawing that frame.
pub trait RenderSink {
    /// The error type produced by this sink.
    type Error: std::error::Error + Send + 'static;

    /// Draw one frame.
    fn submit(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

//  Command source

/// A source of [`Command`]s.
///
/// Implementations listen on some transport — a Unix socket, an in-memory
/// channel, … — and forward parsed commands into the provided
/// [`mpsc::Sender`].
///
/// # Contract
///
/// * [`run`](CommandSource::run) **blocks** until the source is exhausted
///   or an unrecoverable error occurs.
/// * Each received command must be sent through `sink` exactly once.
/// * Implementations must be [`Send`] so they can run on a dedicated
///   thread.
pub trait CommandSource: Send {
    /// The error type produced by this source.
    type Error: std::error::Error + Send + 'static;

    /// Start listening and forward every incoming [`Command`] into `sink`.
    ///
    /// This method blocks the calling thread.  To run multiple sources
    /// concurrently, spawn each one on its own thread.
    fn run(&mut self, sink: mpsc::Sender<Command>) -> Result<(), Self::Error>;
}
