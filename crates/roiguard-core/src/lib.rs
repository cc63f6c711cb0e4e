// Author: Dustin Pilgrim
// License: MIT

pub mod bounds;
pub mod button;
pub mod correction;
pub mod error;
pub mod rect;

pub use bounds::{BoundsProvider, CanvasBounds};
pub use button::MouseButton;
pub use correction::{Edge, EdgeViolations, correct_to_bounds};
pub use error::RoiError;
pub use rect::{Limits, Point, Position};
