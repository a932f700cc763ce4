//! Terminal rendering for the game.
//!
//! [`GameView`] lays a [`core::GameSnapshot`] out on a [`Canvas`] of styled
//! characters; [`TerminalRenderer`] pushes canvases to the terminal through
//! crossterm. Keeping the two apart lets the layout be tested without a tty.

pub mod canvas;
pub mod game_view;
pub mod renderer;

pub use frostfall_core as core;
pub use frostfall_types as types;

pub use canvas::{Canvas, Glyph, Rgb, Style};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_frame, TerminalRenderer};
