//! Terminal presentation layer.
//!
//! The core never draws. This crate takes a [`RenderSnapshot`](crate::core::RenderSnapshot),
//! paints it through the small [`Surface`] trait and flushes the result to a
//! terminal with `crossterm`.
//!
//! - [`fb`]: styled character framebuffer implementing `Surface`
//! - [`game_view`]: board, pieces, side panel and overlays
//! - [`renderer`]: raw-mode terminal session with diffed flushing

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Surface};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
