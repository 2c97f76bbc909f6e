//! Terminal host for the tactics board.
//!
//! The crate backs the runtime's [`RenderTarget`](runtime::RenderTarget) with a
//! ratatui screen and turns keyboard input into the surface's pointer events:
//! a keyboard focus stands in for the mouse, moving it emits leave/enter, and
//! Enter emits a click.

mod app;
mod config;
mod input;
pub mod logging;
pub mod presentation;

pub use app::CliApp;
pub use config::CliConfig;
pub use input::{InputHandler, KeyAction};
