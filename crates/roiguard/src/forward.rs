// Author: Dustin Pilgrim
// License: MIT

use eventline::{debug, warn};
use roiguard_core::MouseButton;

use crate::sync::RoiLink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forwarded {
    NotAlternate,
    /// Canvas is gone.
    NoCanvas,
    /// Zero or several candidates underneath.
    Ambiguous(usize),
    NoHandler,
    Delivered,
    /// Handler ran and returned an error, which was dropped.
    HandlerFailed,
}

/// Fill-click handler: pass an alternate click through to the single image
/// under the ROI, if there is exactly one.
pub fn forward_click(link: &RoiLink, button: MouseButton, alternate: MouseButton) -> Forwarded {
    if button != alternate {
        return Forwarded::NotAlternate;
    }

    let Some(canvas) = link.canvas.upgrade() else {
        return Forwarded::NoCanvas;
    };

    let targets = canvas.displayable_contents();
    let [target] = targets.as_slice() else {
        debug!(
            "{}: {} candidate(s) under roi, not forwarding",
            link.affordance,
            targets.len()
        );
        return Forwarded::Ambiguous(targets.len());
    };

    let Some(handler) = canvas.click_handler(*target) else {
        return Forwarded::NoHandler;
    };

    match handler() {
        Ok(()) => {
            debug!("forwarded {button:?} click to {target}");
            Forwarded::Delivered
        }
        Err(e) => {
            warn!("forwarded click handler on {target} failed: {e}");
            Forwarded::HandlerFailed
        }
    }
}
