pub mod color;
pub mod document;
pub mod geometry;

pub use color::Color;
pub use document::{count_items, OutlineItem, PendingLink};
pub use geometry::{Rect, Size};
