//! Terminal presentation: screen model, styling and the render target.
pub mod board;
pub mod target;
pub mod terminal;
pub mod theme;
pub mod ui;

pub use board::BoardFrame;
pub use target::TerminalTarget;
