//! The main orchestrator that ties the slot registry, layout solver, and
//! animation controller together.
//!
//! [`Carousel`] owns all carousel state and reacts to [`Command`]s by
//! updating the selection and retargeting the rotation animation.  Each
//! frame tick produces a [`Frame`] for an external
//! [`RenderSink`](crate::traits::RenderSink); the carousel itself never
//! touches the GPU.
//!
//! There is no singleton: the embedding code creates a `Carousel` and owns
//! its lifecycle.

use crate::animation::{AnimationController, RotationState};
use crate::command::Command;
use crate::config::CarouselConfig;
use crate::layout::{self, target_rotation, Viewport};
use crate::slots::SlotRegistry;
use crate::traits::{Frame, SlotDraw, WorkspaceSource};
use log::{debug, info, warn};
use std::time::{Duration, Instant};

/// Viewport used when the compositor reports no monitors.
const FALLBACK_VIEWPORT: Viewport = Viewport {
    width: 1920.0,
    height: 1080.0,
};

/// Possible errors from the carousel.
#[derive(Debug, thiserror::Error)]
pub enum CarouselError {
    /// The workspace switch dispatch failed.
    #[error("workspace source error: {0}")]
    Source(String),
}

/// Orchestrates carousel state and compositor calls.
///
/// The carousel is generic over any [`WorkspaceSource`] implementation,
/// making it completely independent of Hyprland or any other concrete
/// backend.  All methods take the current [`Instant`] so the whole state
/// machine is deterministic under test.
///
/// # Typical usage
///
/// ```ignore
/// let source = HyprlandWorkspaces::new();
/// let mut carousel = Carousel::new(source, config);
/// carousel.handle(Command::Toggle, Instant::now())?;
/// ```
pub struct Carousel<W: WorkspaceSource> {
    source: W,
    config: CarouselConfig,
    slots: SlotRegistry,
    animation: AnimationController,
    viewport: Viewport,
    active: bool,
    /// Set by `Select`: leave the carousel once the grow pulse finishes.
    exit_pending: bool,
}

impl<W: WorkspaceSource> Carousel<W> {
    /// Create an inactive carousel.
    ///
    /// `config` is sanitized once here; it is never mutated afterwards.
    pub fn new(source: W, config: CarouselConfig) -> Self {
        let config = config.sanitized();
        let animation = AnimationController::new(Duration::from_millis(
            config.animation_duration_ms,
        ));
        Self {
            source,
            config,
            slots: SlotRegistry::new(),
            animation,
            viewport: FALLBACK_VIEWPORT,
            active: false,
            exit_pending: false,
        }
    }

    //  Accessors

    /// Whether the carousel overlay is currently active.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The slot registry (for tests and integration).
    pub fn slots(&self) -> &SlotRegistry {
        &self.slots
    }

    /// The current animation rotation state.
    pub fn rotation_state(&self) -> RotationState {
        self.animation.rotation_state()
    }

    /// The sanitized configuration snapshot.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    //  Command handling

    /// Process a single [`Command`].
    ///
    /// Navigation commands while the carousel is inactive are no-ops.  The
    /// only fallible path is `Select`, whose workspace-switch dispatch may
    /// fail; the carousel still schedules its exit in that case so the
    /// overlay never gets stuck.
    pub fn handle(&mut self, cmd: Command, now: Instant) -> Result<(), CarouselError> {
        match cmd {
            Command::Toggle => {
                if self.active {
                    info!("carousel deactivated");
                    self.deactivate();
                } else {
                    self.activate();
                }
            }

            Command::Next => {
                if !self.active {
                    debug!("next ignored: carousel inactive");
                    return Ok(());
                }
                let selected = self.slots.select_next();
                debug!("next -> slot {}", selected);
                self.retarget(selected, now);
            }

            Command::Prev => {
                if !self.active {
                    debug!("prev ignored: carousel inactive");
                    return Ok(());
                }
                let selected = self.slots.select_prev();
                debug!("prev -> slot {}", selected);
                self.retarget(selected, now);
            }

            Command::Select => {
                if !self.active {
                    debug!("select ignored: carousel inactive");
                    return Ok(());
                }
                return self.select(now);
            }

            Command::Exit => {
                if self.active {
                    info!("exit carousel");
                    self.deactivate();
                }
            }
        }
        Ok(())
    }

    /// Advance the animation and solve the current frame.
    ///
    /// Returns `None` while the carousel is inactive (including the moment
    /// a pending exit completes).  Submission of the returned frame to a
    /// render sink — and handling of its failure — is the caller's concern.
    pub fn frame(&mut self, now: Instant) -> Option<Frame> {
        if !self.active {
            return None;
        }

        self.animation.tick(now);

        if self.exit_pending && !self.animation.grow_active() {
            info!("selection pulse finished, leaving carousel");
            self.deactivate();
            return None;
        }

        let layouts = layout::solve(
            self.slots.len(),
            self.slots.selected(),
            self.animation.rotation(),
            &self.config,
            &self.viewport,
        );

        let grow = self.animation.grow_scale();
        let slots = layouts
            .into_iter()
            .zip(self.slots.iter())
            .map(|(l, slot)| {
                let mut screen_box = l.screen_box;
                if l.is_selected && grow != 1.0 {
                    // Scale the selected box around its center.
                    let dw = screen_box.width * (grow - 1.0);
                    let dh = screen_box.height * (grow - 1.0);
                    screen_box.x -= dw / 2.0;
                    screen_box.y -= dh / 2.0;
                    screen_box.width += dw;
                    screen_box.height += dh;
                }
                SlotDraw {
                    screen_box,
                    alpha: l.alpha,
                    workspace: slot.workspace.clone(),
                    selected: l.is_selected,
                }
            })
            .collect();

        Some(Frame {
            viewport: self.viewport,
            slots,
        })
    }

    //  Internal

    /// Snapshot workspaces, center the ring on the active one, and show
    /// the overlay.
    ///
    /// Every query failure degrades: no workspaces means the placeholder
    /// slot, no monitors means the fallback viewport.  Activation never
    /// fails.
    fn activate(&mut self) {
        let workspaces = match self.source.workspaces() {
            Ok(ws) => ws,
            Err(e) => {
                warn!("workspace query failed, using placeholder: {}", e);
                Vec::new()
            }
        };
        let count = self.slots.load(workspaces);

        let active_ws = self.source.active_workspace().ok().flatten();
        if let Some(ws) = &active_ws {
            self.slots.select_workspace(ws.id);
        }

        self.viewport = self.resolve_viewport(active_ws.as_ref().map(|ws| ws.monitor.as_str()));

        // Open already centered on the selection; only subsequent
        // navigation animates.
        self.animation
            .snap_to(target_rotation(self.slots.selected(), count));
        self.active = true;
        self.exit_pending = false;
        info!("carousel activated with {} slot(s)", count);
    }

    /// Hide the overlay and drop all derived state.
    fn deactivate(&mut self) {
        self.active = false;
        self.exit_pending = false;
        self.slots = SlotRegistry::new();
        self.animation.snap_to(0.0);
    }

    /// Begin animating the ring towards `selected`.
    fn retarget(&mut self, selected: usize, now: Instant) {
        self.animation
            .retarget(target_rotation(selected, self.slots.len()), now);
    }

    /// Dispatch the workspace switch for the selected slot, start the grow
    /// pulse, and schedule the exit.
    fn select(&mut self, now: Instant) -> Result<(), CarouselError> {
        let target = self.slots.selected_slot().workspace.clone();

        // The pulse runs (and the exit is scheduled) whether or not the
        // dispatch succeeds, so the overlay cannot get stuck.
        self.animation.start_grow(now);
        self.exit_pending = true;

        match target {
            Some(ws) => {
                info!("select workspace {} ({})", ws.id, ws.name);
                self.source
                    .switch_to(ws.id)
                    .map_err(|e| CarouselError::Source(e.to_string()))
            }
            None => {
                debug!("select on placeholder slot, nothing to switch");
                Ok(())
            }
        }
    }

    /// Pick the viewport from the monitor the active workspace is on,
    /// falling back to the first monitor, then to a fixed size.
    fn resolve_viewport(&self, active_monitor: Option<&str>) -> Viewport {
        let monitors = match self.source.monitors() {
            Ok(m) => m,
            Err(e) => {
                warn!("monitor query failed, using fallback viewport: {}", e);
                return FALLBACK_VIEWPORT;
            }
        };
        let chosen = active_monitor
            .and_then(|name| monitors.iter().find(|m| m.name == name))
            .or_else(|| monitors.first());
        match chosen {
            Some(m) => Viewport {
                width: m.width as f32,
                height: m.height as f32,
            },
            None => FALLBACK_VIEWPORT,
        }
    }
}

//  Tests
