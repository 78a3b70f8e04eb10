//! Umbra Render System
//!
//! Only the debug-draw queue lives here for now; scripts submit primitives
//! through the call surface and the frame loop drains them.

pub mod debug;

pub use debug::{DrawCommand, DrawList};
