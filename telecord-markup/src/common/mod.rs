//! Text utilities shared by the tree renderers and the span renderer.

pub mod escape;
pub mod utf16;
