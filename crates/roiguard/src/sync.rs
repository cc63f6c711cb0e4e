// Author: Dustin Pilgrim
// License: MIT

use std::rc::Rc;

use eventline::debug;
use roiguard_core::{BoundsProvider, Point, Position};

use crate::canvas::WeakCanvas;
use crate::ids::AffordanceId;
use crate::widget::WeakRoi;

/// Affordance placement relative to the ROI's top-right corner.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Offset {
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self { dx, dy }
    }
}

/// Everything a guard callback needs, bundled instead of captured piecemeal.
/// Holds no strong references: a link never keeps its ROI or canvas alive.
#[derive(Clone)]
pub struct RoiLink {
    pub roi: WeakRoi,
    pub affordance: AffordanceId,
    pub offset: Offset,
    pub canvas: WeakCanvas,
    pub metadata_key: Rc<str>,
}

pub fn anchor_for(pos: &Position, offset: Offset) -> Point {
    pos.top_right().offset(offset.dx, offset.dy)
}

/// Position-changed handler: move the marker, recompute its visibility
/// against the live canvas limits, refresh the cached ROI position.
///
/// Silently does nothing once any half of the link is gone.
pub fn synchronize(link: &RoiLink, new_pos: Position) {
    let Some(canvas) = link.canvas.upgrade() else {
        return;
    };
    let Some(roi) = link.roi.upgrade() else {
        return;
    };

    let anchor = anchor_for(&new_pos, link.offset);
    let visible = canvas.bounds().contains_point(anchor);
    let live = roi.position();

    let mut flipped = None;
    let updated = canvas.update_affordance(link.affordance, |rec| {
        if rec.visible != visible {
            flipped = Some(visible);
        }
        rec.anchor = anchor;
        rec.visible = visible;
        rec.set_metadata(&link.metadata_key, live);
    });

    if !updated {
        return;
    }
    if let Some(v) = flipped {
        debug!(
            "{} now {} at ({}, {})",
            link.affordance,
            if v { "visible" } else { "hidden" },
            anchor.x,
            anchor.y
        );
    }
}
