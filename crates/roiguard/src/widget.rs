// Author: Dustin Pilgrim
// License: MIT
//
// Base rectangle ROI widget. This is the host-side primitive the guard layer
// builds on: it knows its position, an optional drag-time constraint, who
// wants to hear about moves and deletion, and what to do with a click on its
// fill. It does not know about delete affordances.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use eventline::debug;
use roiguard_core::{MouseButton, Position, RoiError};

use crate::canvas::WeakCanvas;
use crate::ids::{RoiId, SubscriptionId};

pub type PositionCallback = Rc<dyn Fn(Position)>;
pub type DeletingCallback = Rc<dyn Fn()>;
pub type FillClickCallback = Rc<dyn Fn(MouseButton)>;
pub type PositionConstraint = Rc<dyn Fn(Position) -> Position>;

/// What the widget did with a click on its fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillClick {
    /// Native context menu opened; the click goes no further.
    ContextMenu,
    /// Delivered to the installed fill click handler.
    Handled,
    /// Nothing listening.
    Ignored,
}

struct RoiState {
    id: RoiId,
    position: Position,
    constraint: Option<PositionConstraint>,
    deletable: bool,
    fill_context_menu: bool,
    position_subs: Vec<(SubscriptionId, PositionCallback)>,
    deleting_subs: Vec<DeletingCallback>,
    fill_click: Option<FillClickCallback>,
    next_sub: u64,
    deleted: bool,
    canvas: WeakCanvas,
}

#[derive(Clone)]
pub struct RectRoi {
    inner: Rc<RefCell<RoiState>>,
}

#[derive(Clone, Default)]
pub struct WeakRoi {
    inner: Weak<RefCell<RoiState>>,
}

impl WeakRoi {
    /// Upgrades only while the ROI is still alive (not deleted).
    pub fn upgrade(&self) -> Option<RectRoi> {
        let inner = self.inner.upgrade()?;
        let roi = RectRoi { inner };
        if roi.is_deleted() { None } else { Some(roi) }
    }
}

impl std::fmt::Debug for RectRoi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = self.inner.borrow();
        f.debug_struct("RectRoi")
            .field("id", &s.id)
            .field("position", &s.position)
            .field("deleted", &s.deleted)
            .finish()
    }
}

impl RectRoi {
    /// Base widgets come up deletable with their native context menu in place.
    pub(crate) fn new(id: RoiId, position: Position, canvas: WeakCanvas) -> Self {
        Self {
            inner: Rc::new(RefCell::new(RoiState {
                id,
                position,
                constraint: None,
                deletable: true,
                fill_context_menu: true,
                position_subs: Vec::new(),
                deleting_subs: Vec::new(),
                fill_click: None,
                next_sub: 1,
                deleted: false,
                canvas,
            })),
        }
    }

    pub fn id(&self) -> RoiId {
        self.inner.borrow().id
    }

    pub fn downgrade(&self) -> WeakRoi {
        WeakRoi {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn position(&self) -> Position {
        self.inner.borrow().position
    }

    pub fn is_deleted(&self) -> bool {
        self.inner.borrow().deleted
    }

    /// Programmatic move/resize. Bypasses the drag constraint and notifies
    /// every position subscriber before returning.
    pub fn set_position(&self, position: Position) -> Result<(), RoiError> {
        let position = Position::checked(position.x, position.y, position.w, position.h)?;

        let subs: Vec<PositionCallback> = {
            let mut s = self.inner.borrow_mut();
            if s.deleted {
                return Err(RoiError::Deleted(s.id.0));
            }
            s.position = position;
            s.position_subs.iter().map(|(_, cb)| cb.clone()).collect()
        };

        // Borrow released: subscribers are free to read the widget back.
        for cb in subs {
            cb(position);
        }
        Ok(())
    }

    /// Interactive drag: the requested rect is passed through the drag-time
    /// constraint (if any) before being applied.
    pub fn drag_to(&self, requested: Position) -> Result<Position, RoiError> {
        let constraint = self.inner.borrow().constraint.clone();
        let applied = match constraint {
            Some(f) => f(requested),
            None => requested,
        };
        self.set_position(applied)?;
        Ok(applied)
    }

    pub fn set_position_constraint<F>(&self, f: F)
    where
        F: Fn(Position) -> Position + 'static,
    {
        self.inner.borrow_mut().constraint = Some(Rc::new(f));
    }

    pub fn on_position_changed<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(Position) + 'static,
    {
        let mut s = self.inner.borrow_mut();
        let id = SubscriptionId(s.next_sub);
        s.next_sub += 1;
        s.position_subs.push((id, Rc::new(f)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut s = self.inner.borrow_mut();
        let before = s.position_subs.len();
        s.position_subs.retain(|(sid, _)| *sid != id);
        s.position_subs.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().position_subs.len()
    }

    /// Runs once, right before the widget leaves its canvas.
    pub fn on_deleting<F>(&self, f: F)
    where
        F: Fn() + 'static,
    {
        self.inner.borrow_mut().deleting_subs.push(Rc::new(f));
    }

    pub fn on_fill_click<F>(&self, f: F)
    where
        F: Fn(MouseButton) + 'static,
    {
        self.inner.borrow_mut().fill_click = Some(Rc::new(f));
    }

    pub fn set_deletable(&self, deletable: bool) {
        self.inner.borrow_mut().deletable = deletable;
    }

    pub fn is_deletable(&self) -> bool {
        self.inner.borrow().deletable
    }

    pub fn strip_fill_context_menu(&self) {
        self.inner.borrow_mut().fill_context_menu = false;
    }

    pub fn has_fill_context_menu(&self) -> bool {
        self.inner.borrow().fill_context_menu
    }

    /// A click landing on the filled body.
    ///
    /// With the native menu still attached, secondary clicks never reach the
    /// fill handler.
    pub fn click_fill(&self, button: MouseButton) -> FillClick {
        let handler = {
            let s = self.inner.borrow();
            if s.deleted {
                return FillClick::Ignored;
            }
            if s.fill_context_menu && button == MouseButton::Secondary {
                return FillClick::ContextMenu;
            }
            s.fill_click.clone()
        };

        match handler {
            Some(f) => {
                f(button);
                FillClick::Handled
            }
            None => FillClick::Ignored,
        }
    }

    /// Host-native removal (keyboard/context-menu delete). Honoured only
    /// while the widget is flagged deletable.
    pub fn native_delete(&self) -> bool {
        if !self.is_deletable() {
            debug!("native delete refused for {}: not deletable", self.id());
            return false;
        }
        self.delete();
        true
    }

    /// Tear the widget down. Idempotent.
    ///
    /// Deletion observers fire first, then the widget is detached from its
    /// canvas; all of it completes before this returns.
    pub fn delete(&self) {
        let (id, deleting, canvas) = {
            let mut s = self.inner.borrow_mut();
            if s.deleted {
                return;
            }
            s.deleted = true;
            s.position_subs.clear();
            s.fill_click = None;
            s.constraint = None;
            (s.id, std::mem::take(&mut s.deleting_subs), s.canvas.clone())
        };

        for cb in deleting {
            cb();
        }

        if let Some(canvas) = canvas.upgrade() {
            canvas.detach_roi(id);
        }
        debug!("{id} deleted");
    }
}
