//! Entry point for the **hyprousel** daemon.
//!
//! Spawns the configured [`CommandSource`](hyprousel::traits::CommandSource)s
//! on background threads and processes incoming commands on the main
//! thread.  While the carousel is active the loop ticks at roughly 60 Hz,
//! solving a frame per tick; while inactive it blocks on the command
//! channel and consumes no CPU.

use hyprousel::carousel::Carousel;
use hyprousel::command::Command;
use hyprousel::config::Config;
use hyprousel::hyprland::workspaces::HyprlandWorkspaces;
use hyprousel::ipc::listener::UnixSocketListener;
use hyprousel::traits::{CommandSource, Frame, RenderSink, WorkspaceSource};
use log::{error, info, trace, warn};
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// Frame budget while the carousel is visible (~60 Hz).
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Default socket path for the command listener.
fn default_socket_path() -> String {
    let runtime = std::env::var("XDG_RUNTIME_DIR").unwrap_or_else(|_| "/tmp".into());
    format!("{}/hyprousel.sock", runtime)
}

/// Resolve the config directory (`$XDG_CONFIG_HOME/hyprousel`).
fn config_dir() -> std::path::PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME").unwrap_or_else(|_| {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
        format!("{}/.config", home)
    });
    std::path::PathBuf::from(base).join("hyprousel")
}

/// Try to load the config from `$XDG_CONFIG_HOME/hyprousel/config.json`,
/// falling back to compiled-in defaults.
fn load_config() -> Config {
    let path = config_dir().join("config.json");
    match Config::load(&path) {
        Ok(cfg) => {
            info!("loaded config from {}", path.display());
            cfg
        }
        Err(e) => {
            info!("no config file ({}), using defaults", e);
            Config::default()
        }
    }
}

//  Render sink

/// A [`RenderSink`] that logs each frame at trace level.
///
/// The actual overlay surface is drawn by a compositor-side renderer; this
/// sink exists so the daemon is fully runnable (and debuggable with
/// `RUST_LOG=trace`) without one.
struct LogSink;

impl RenderSink for LogSink {
    type Error = std::convert::Infallible;

    fn submit(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        for (i, slot) in frame.slots.iter().enumerate() {
            trace!(
                "slot {}: box=({:.0},{:.0} {:.0}x{:.0}) alpha={:.2}{}",
                i,
                slot.screen_box.x,
                slot.screen_box.y,
                slot.screen_box.width,
                slot.screen_box.height,
                slot.alpha,
                if slot.selected { " [selected]" } else { "" },
            );
        }
        Ok(())
    }
}

//  Main

fn main() {
    env_logger::init();

    let config = load_config();

    let source = HyprlandWorkspaces::new();
    match source.monitors() {
        Ok(m) => info!("found {} monitor(s)", m.len()),
        Err(e) => warn!("could not query monitors yet: {}", e),
    }

    let carousel = Carousel::new(source, config.carousel);

    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>();
    spawn_command_sources(cmd_tx);

    run_event_loop(carousel, cmd_rx);
}

//  Event loop

fn run_event_loop<W: WorkspaceSource>(
    mut carousel: Carousel<W>,
    cmd_rx: mpsc::Receiver<Command>,
) {
    info!("hyprousel running");
    let mut sink = LogSink;

    loop {
        // Block while idle; poll at the frame interval while visible.
        let cmd = if carousel.is_active() {
            match cmd_rx.recv_timeout(FRAME_INTERVAL) {
                Ok(cmd) => Some(cmd),
                Err(mpsc::RecvTimeoutError::Timeout) => None,
                Err(mpsc::RecvTimeoutError::Disconnected) => break,
            }
        } else {
            match cmd_rx.recv() {
                Ok(cmd) => Some(cmd),
                Err(_) => break,
            }
        };

        let now = Instant::now();

        if let Some(cmd) = cmd {
            if let Err(e) = carousel.handle(cmd, now) {
                error!("command error: {}", e);
            }
        }

        if let Some(frame) = carousel.frame(now) {
            if let Err(e) = sink.submit(&frame) {
                warn!("render sink rejected frame: {}", e);
            }
        }
    }
    info!("all command sources closed, exiting");
}

//  Helpers

fn spawn_command_sources(tx: mpsc::Sender<Command>) {
    {
        let tx = tx.clone();
        let path = default_socket_path();
        std::thread::spawn(move || {
            let mut source = UnixSocketListener::new(&path);
            if let Err(e) = source.run(tx) {
                error!("socket listener error: {}", e);
            }
        });
    }

    drop(tx);
}
