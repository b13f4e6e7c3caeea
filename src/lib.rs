//! Reconstructs windowed path graphs and turns them into replayable draw
//! command sequences for a 3D canvas.

pub mod canvas;
pub mod path;
pub mod render;
pub mod source;
