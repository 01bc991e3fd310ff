#![forbid(unsafe_code)]

//! Core: geometry, declarative sizing values and the [`Sizeable`] contract
//! every child must satisfy to be placed by a layout.

pub mod geometry;
pub mod sizeable;
pub mod sizing;

pub use geometry::{Margin, Padding, Point, Rect, Sides, Size};
pub use sizeable::Sizeable;
pub use sizing::{HorizontalAlign, SizeEstimate, SizeLimits, SizeSpec, VerticalAlign};
