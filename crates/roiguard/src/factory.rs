// Author: Dustin Pilgrim
// License: MIT
//
// Guarded ROI construction:
//   1) get a rectangle (given, or drawn interactively; cancel => None)
//   2) create the base widget, strip its fill context menu, make it
//      non-deletable, install the drag-time clamp
//   3) one-shot creation-time correction against the live canvas limits
//   4) attach the delete affordance, then register the position
//      synchroniser, the fill-click forwarder and the deletion observer

use eventline::{debug, info, warn};
use roiguard_core::{BoundsProvider, EdgeViolations, MouseButton, Position, RoiError};

use crate::affordance::{self, AffordanceSettings};
use crate::canvas::Canvas;
use crate::config::RoiguardConfig;
use crate::forward;
use crate::ids::AffordanceId;
use crate::sync::{self, RoiLink};
use crate::widget::RectRoi;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoiOptions {
    /// Initial rectangle. `None` asks the canvas for an interactive draw.
    pub position: Option<Position>,
}

impl RoiOptions {
    pub fn at(position: Position) -> Self {
        Self {
            position: Some(position),
        }
    }

    pub fn interactive() -> Self {
        Self { position: None }
    }
}

/// A base ROI plus its delete affordance and standing callbacks.
pub struct GuardedRoi {
    roi: RectRoi,
    link: RoiLink,
}

impl GuardedRoi {
    pub fn roi(&self) -> &RectRoi {
        &self.roi
    }

    pub fn affordance(&self) -> AffordanceId {
        self.link.affordance
    }

    pub fn position(&self) -> Position {
        self.roi.position()
    }

    pub fn is_alive(&self) -> bool {
        !self.roi.is_deleted()
    }

    /// Same as clicking the affordance.
    pub fn delete(&self) {
        affordance::delete_both(&self.link);
    }
}

#[derive(Debug, Clone)]
pub struct RoiFactory {
    settings: AffordanceSettings,
    alternate: MouseButton,
}

impl Default for RoiFactory {
    fn default() -> Self {
        Self::new(AffordanceSettings::default(), MouseButton::Secondary)
    }
}

impl RoiFactory {
    pub fn new(settings: AffordanceSettings, alternate: MouseButton) -> Self {
        Self {
            settings,
            alternate,
        }
    }

    pub fn from_config(cfg: &RoiguardConfig) -> Self {
        Self::new(cfg.affordance_settings(), cfg.alternate_button)
    }

    pub fn settings(&self) -> &AffordanceSettings {
        &self.settings
    }

    /// `None` only when interactive creation was aborted, or the geometry
    /// handed in could not make a widget at all.
    pub fn create(&self, canvas: &Canvas, options: RoiOptions) -> Option<GuardedRoi> {
        match self.try_create(canvas, options) {
            Ok(guarded) => guarded,
            Err(e) => {
                warn!("roi creation failed: {e}");
                None
            }
        }
    }

    /// `Ok(None)` is an aborted draw; `Err` is geometry that was refused.
    pub fn try_create(
        &self,
        canvas: &Canvas,
        options: RoiOptions,
    ) -> Result<Option<GuardedRoi>, RoiError> {
        let initial = match options.position {
            Some(p) => p,
            None => match canvas.draw_rectangle() {
                Some(p) => p,
                None => {
                    info!("roi creation cancelled");
                    return Ok(None);
                }
            },
        };

        self.build(canvas, initial).map(Some)
    }

    fn build(&self, canvas: &Canvas, initial: Position) -> Result<GuardedRoi, RoiError> {
        let roi = canvas.create_rect_roi(initial)?;

        roi.strip_fill_context_menu();
        roi.set_deletable(false);

        let drag_bounds = canvas.bounds();
        roi.set_position_constraint(move |p| drag_bounds.clamp_move(p));

        if let Err(e) = correct_at_creation(canvas, &roi) {
            roi.delete();
            return Err(e);
        }

        let link = affordance::attach(canvas, &roi, &self.settings);

        let on_move = link.clone();
        roi.on_position_changed(move |p| sync::synchronize(&on_move, p));

        let on_click = link.clone();
        let alternate = self.alternate;
        roi.on_fill_click(move |button| {
            forward::forward_click(&on_click, button, alternate);
        });

        let on_delete = link.clone();
        roi.on_deleting(move || affordance::detach(&on_delete));

        let p = roi.position();
        info!(
            "created {} at ({}, {}, {}, {}) with {}",
            roi.id(),
            p.x,
            p.y,
            p.w,
            p.h,
            link.affordance
        );

        Ok(GuardedRoi { roi, link })
    }
}

/// Flags are taken once from the original rect; each correction then works
/// on the position read back from the widget.
fn correct_at_creation(canvas: &Canvas, roi: &RectRoi) -> Result<(), RoiError> {
    let bounds = canvas.bounds();
    let violations = EdgeViolations::detect(&roi.position(), &bounds);
    if !violations.any() {
        return Ok(());
    }

    for edge in violations.edges() {
        let current = roi.position();
        roi.set_position(edge.correct(current, &bounds))?;
        debug!("{}: corrected {edge:?} edge", roi.id());
    }
    Ok(())
}
