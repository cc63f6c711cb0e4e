// Author: Dustin Pilgrim
// License: MIT
//
// Guarded rectangle ROIs for a 2D canvas: a delete affordance that follows
// the ROI around, a one-time containment correction at creation, and
// pass-through of alternate clicks to the image underneath.

pub mod affordance;
pub mod canvas;
pub mod config;
pub mod factory;
pub mod forward;
pub mod ids;
pub mod logging;
pub mod registry;
pub mod sync;
pub mod widget;

pub use affordance::{AffordanceSettings, MarkerStyle};
pub use canvas::{Canvas, ClickTarget, ContentKind, DrawGesture, Item, Layer, WeakCanvas};
pub use config::RoiguardConfig;
pub use factory::{GuardedRoi, RoiFactory, RoiOptions};
pub use forward::Forwarded;
pub use ids::{AffordanceId, ContentId, RoiId, SubscriptionId};
pub use registry::AffordanceRecord;
pub use sync::{Offset, RoiLink};
pub use widget::{FillClick, RectRoi, WeakRoi};

pub use roiguard_core::{BoundsProvider, CanvasBounds, Limits, MouseButton, Point, Position, RoiError};
