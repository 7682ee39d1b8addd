//! **hyprousel** — a 3D workspace carousel switcher.
//!
//! Eligible workspaces (those with at least one window, special workspaces
//! excluded) are arranged as thumbnails on a rotating ring.  Navigation
//! commands turn the ring towards the chosen workspace with an eased
//! animation; selecting a slot switches to that workspace.
//!
//! # Architecture
//!
//! The crate is organised around three core traits:
//!
//! * [`traits::WorkspaceSource`] — abstracts workspace enumeration and
//!   switching so the carousel logic is not coupled to any specific
//!   compositor.
//! * [`traits::RenderSink`] — abstracts the surface that draws the solved
//!   frames; the carousel only computes boxes and opacities, it never holds
//!   GPU state.
//! * [`traits::CommandSource`] — abstracts the transport that delivers
//!   user-intent (a Unix socket, a test harness, …) so the main loop is not
//!   coupled to any specific IPC mechanism.
//!
//! Concrete implementations live in [`hyprland`] (Hyprland IPC) and
//! [`ipc`] (Unix-socket command listener).  The geometry itself is a pure
//! function in [`layout`], driven by the eased rotation from [`animation`].

pub mod animation;
pub mod carousel;
pub mod command;
pub mod config;
pub mod easing;
pub mod hyprland;
pub mod ipc;
pub mod layout;
pub mod slots;
pub mod traits;
