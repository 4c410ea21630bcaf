//! Presentation boundary
//!
//! The simulation never touches images or a window. Each frame the host asks
//! for a draw list and paints it in order; bottles without a loaded sprite are
//! drawn as solid placeholders of the same size.

pub mod draw_list;

pub use draw_list::{DrawCommand, Fill, NoSprites, SpriteId, SpriteSource, build_draw_list};
