// Author: Dustin Pilgrim
// License: MIT

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum RoiError {
    #[error("invalid geometry: width and height must be finite and >= 0 (got {w} x {h})")]
    InvalidGeometry { w: f64, h: f64 },

    #[error("roi {0} has already been deleted")]
    Deleted(u64),

    #[error("no affordance with id {0}")]
    UnknownAffordance(u64),
}
