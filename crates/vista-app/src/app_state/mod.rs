//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the tokio runtime and the one active
//! [`ViewerHandle`](crate::viewer::ViewerHandle).

mod core;
mod event_handler;
mod init;
mod shutdown;
mod title;

pub use core::{Launch, VistaApp};
