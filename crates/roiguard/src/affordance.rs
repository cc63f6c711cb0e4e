// Author: Dustin Pilgrim
// License: MIT
//
// Delete affordance: a small marker pinned to the ROI's top-right corner on
// the canvas overlay layer. Clicking it removes marker and ROI together.

use std::rc::Rc;

use eventline::{debug, info};

use crate::canvas::Canvas;
use crate::registry::AffordanceRecord;
use crate::sync::{self, Offset, RoiLink};
use crate::widget::RectRoi;

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerStyle {
    pub label: String,
    /// ARGB
    pub colour: u32,
    /// Half-size of the square hit box around the anchor.
    pub hit_radius: f64,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            label: "X".into(),
            colour: 0xFFFF_0000,
            hit_radius: 4.0,
        }
    }
}

/// Per-canvas guard settings shared by every affordance a factory creates.
#[derive(Debug, Clone, PartialEq)]
pub struct AffordanceSettings {
    pub tag: String,
    pub metadata_key: String,
    pub offset: Offset,
    pub style: MarkerStyle,
}

impl Default for AffordanceSettings {
    fn default() -> Self {
        Self {
            tag: "roi-delete".into(),
            metadata_key: "roi_position".into(),
            offset: Offset::default(),
            style: MarkerStyle::default(),
        }
    }
}

/// Create the marker for `roi`, place it, and wire its activation to
/// `delete_both`. The returned link addresses the pair from then on.
pub fn attach(canvas: &Canvas, roi: &RectRoi, settings: &AffordanceSettings) -> RoiLink {
    let roi_id = roi.id();
    let affordance = canvas.insert_affordance(|id| {
        AffordanceRecord::new(id, &settings.tag, roi_id, settings.style.clone())
    });

    let link = RoiLink {
        roi: roi.downgrade(),
        affordance,
        offset: settings.offset,
        canvas: canvas.downgrade(),
        metadata_key: Rc::from(settings.metadata_key.as_str()),
    };

    // Initial placement, visibility and cached position.
    sync::synchronize(&link, roi.position());

    let on_click = link.clone();
    canvas.set_affordance_activation(affordance, Rc::new(move || delete_both(&on_click)));

    debug!("{affordance} attached to {roi_id}");
    link
}

/// Remove the marker, then the ROI. Both are gone when this returns.
pub fn delete_both(link: &RoiLink) {
    let removed = link
        .canvas
        .upgrade()
        .and_then(|c| c.remove_affordance(link.affordance));

    let roi = link.roi.upgrade();
    if let Some(roi) = roi.as_ref() {
        roi.delete();
    }

    if removed.is_some() || roi.is_some() {
        info!("deleted {} and its roi", link.affordance);
    }
}

/// Deletion-observer half: the ROI is going away by some other path, so
/// take the marker with it.
pub fn detach(link: &RoiLink) {
    if let Some(canvas) = link.canvas.upgrade() {
        if canvas.remove_affordance(link.affordance).is_some() {
            debug!("{} removed with its roi", link.affordance);
        }
    }
}
