// Author: Dustin Pilgrim
// License: MIT
//
// Headless drawing surface. Holds the visible limits, the content objects
// (images and friends), the ROIs attached to it and the affordance registry.
// Paint order has two layers: regular content, then the overlay layer that
// delete affordances live on.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use eventline::{debug, warn};
use roiguard_core::{BoundsProvider, Limits, MouseButton, Point, Position, RoiError};

use crate::ids::{AffordanceId, ContentId, RoiId};
use crate::registry::{ActivateFn, AffordanceRecord, AffordanceRegistry};
use crate::widget::{FillClick, RectRoi};

pub type HandlerError = Box<dyn std::error::Error>;
pub type ClickHandler = Rc<dyn Fn() -> Result<(), HandlerError>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Image,
    Line,
    Text,
}

impl ContentKind {
    /// Kinds that count as "the thing underneath" for click pass-through.
    pub fn is_displayable(self) -> bool {
        matches!(self, ContentKind::Image)
    }
}

#[derive(Clone)]
pub struct ContentObject {
    pub id: ContentId,
    pub kind: ContentKind,
    pub name: String,
    pub extent: Option<Position>,
    click: Option<ClickHandler>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Content,
    Overlay,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Item {
    Content(ContentId),
    Roi(RoiId),
    Affordance(AffordanceId),
}

impl Item {
    pub fn layer(self) -> Layer {
        match self {
            Item::Affordance(_) => Layer::Overlay,
            _ => Layer::Content,
        }
    }
}

/// Scripted interactive draw input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawGesture {
    Rect(Position),
    Cancel,
}

/// Where `click_at` delivered a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Affordance(AffordanceId),
    Roi(RoiId, FillClick),
    Content(ContentId),
    Nothing,
}

struct CanvasState {
    x: Limits,
    y: Limits,
    next_id: u64,
    z: Vec<Item>,
    contents: Vec<ContentObject>,
    rois: Vec<RectRoi>,
    affordances: AffordanceRegistry,
    draw_queue: VecDeque<DrawGesture>,
}

#[derive(Clone)]
pub struct Canvas {
    inner: Rc<RefCell<CanvasState>>,
}

#[derive(Clone, Default)]
pub struct WeakCanvas {
    inner: Weak<RefCell<CanvasState>>,
}

impl WeakCanvas {
    pub fn upgrade(&self) -> Option<Canvas> {
        self.inner.upgrade().map(|inner| Canvas { inner })
    }
}

impl BoundsProvider for Canvas {
    fn x_limits(&self) -> Limits {
        self.inner.borrow().x
    }

    fn y_limits(&self) -> Limits {
        self.inner.borrow().y
    }
}

impl Canvas {
    pub fn new(x: Limits, y: Limits) -> Self {
        Self {
            inner: Rc::new(RefCell::new(CanvasState {
                x,
                y,
                next_id: 1,
                z: Vec::new(),
                contents: Vec::new(),
                rois: Vec::new(),
                affordances: AffordanceRegistry::new(),
                draw_queue: VecDeque::new(),
            })),
        }
    }

    pub fn downgrade(&self) -> WeakCanvas {
        WeakCanvas {
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn alloc_id(&self) -> u64 {
        let mut s = self.inner.borrow_mut();
        let id = s.next_id;
        s.next_id += 1;
        id
    }

    /// Pan/zoom. Nothing is re-synchronised here; limits are read lazily.
    pub fn set_limits(&self, x: Limits, y: Limits) {
        let mut s = self.inner.borrow_mut();
        s.x = x;
        s.y = y;
        debug!(
            "canvas limits now x=[{}, {}] y=[{}, {}]",
            x.min, x.max, y.min, y.max
        );
    }

    // -------------------- content --------------------

    pub fn add_content(&self, kind: ContentKind, name: &str, extent: Option<Position>) -> ContentId {
        let id = ContentId(self.alloc_id());
        let mut s = self.inner.borrow_mut();
        s.contents.push(ContentObject {
            id,
            kind,
            name: name.to_string(),
            extent,
            click: None,
        });
        s.z.push(Item::Content(id));
        id
    }

    /// Image covering the current limits.
    pub fn add_image(&self, name: &str) -> ContentId {
        let b = self.bounds();
        let extent = Position::new(b.x.min, b.y.min, b.x.span(), b.y.span());
        self.add_content(ContentKind::Image, name, Some(extent))
    }

    pub fn remove_content(&self, id: ContentId) -> bool {
        let mut s = self.inner.borrow_mut();
        let before = s.contents.len();
        s.contents.retain(|c| c.id != id);
        s.z.retain(|i| *i != Item::Content(id));
        s.contents.len() != before
    }

    pub fn set_click_handler<F>(&self, id: ContentId, f: F) -> bool
    where
        F: Fn() -> Result<(), HandlerError> + 'static,
    {
        let mut s = self.inner.borrow_mut();
        match s.contents.iter_mut().find(|c| c.id == id) {
            Some(c) => {
                c.click = Some(Rc::new(f));
                true
            }
            None => false,
        }
    }

    pub fn click_handler(&self, id: ContentId) -> Option<ClickHandler> {
        let s = self.inner.borrow();
        s.contents
            .iter()
            .find(|c| c.id == id)
            .and_then(|c| c.click.clone())
    }

    pub fn content(&self, id: ContentId) -> Option<ContentObject> {
        self.inner.borrow().contents.iter().find(|c| c.id == id).cloned()
    }

    pub fn displayable_contents(&self) -> Vec<ContentId> {
        self.inner
            .borrow()
            .contents
            .iter()
            .filter(|c| c.kind.is_displayable())
            .map(|c| c.id)
            .collect()
    }

    // -------------------- interactive draw --------------------

    pub fn queue_draw(&self, gesture: DrawGesture) {
        self.inner.borrow_mut().draw_queue.push_back(gesture);
    }

    /// Next interactive rectangle; `None` when the user cancels or there is
    /// nothing to draw.
    pub fn draw_rectangle(&self) -> Option<Position> {
        match self.inner.borrow_mut().draw_queue.pop_front() {
            Some(DrawGesture::Rect(p)) => Some(p),
            Some(DrawGesture::Cancel) | None => None,
        }
    }

    // -------------------- rois --------------------

    /// Base widget create. Negative extents are normalised; non-finite
    /// coordinates are rejected.
    pub fn create_rect_roi(&self, position: Position) -> Result<RectRoi, RoiError> {
        let mut p = position;
        if p.w < 0.0 {
            p.x += p.w;
            p.w = -p.w;
        }
        if p.h < 0.0 {
            p.y += p.h;
            p.h = -p.h;
        }
        let p = Position::checked(p.x, p.y, p.w, p.h)?;

        let id = RoiId(self.alloc_id());
        let roi = RectRoi::new(id, p, self.downgrade());
        let mut s = self.inner.borrow_mut();
        s.rois.push(roi.clone());
        s.z.push(Item::Roi(id));
        Ok(roi)
    }

    pub(crate) fn detach_roi(&self, id: RoiId) {
        let mut s = self.inner.borrow_mut();
        s.rois.retain(|r| r.id() != id);
        s.z.retain(|i| *i != Item::Roi(id));
    }

    pub fn rois(&self) -> Vec<RectRoi> {
        self.inner.borrow().rois.clone()
    }

    pub fn roi(&self, id: RoiId) -> Option<RectRoi> {
        self.inner.borrow().rois.iter().find(|r| r.id() == id).cloned()
    }

    pub fn has_roi(&self, id: RoiId) -> bool {
        self.inner.borrow().rois.iter().any(|r| r.id() == id)
    }

    // -------------------- affordances --------------------

    pub(crate) fn insert_affordance<F>(&self, build: F) -> AffordanceId
    where
        F: FnOnce(AffordanceId) -> AffordanceRecord,
    {
        let id = AffordanceId(self.alloc_id());
        let record = build(id);
        let mut s = self.inner.borrow_mut();
        s.affordances.insert(record);
        s.z.push(Item::Affordance(id));
        id
    }

    pub(crate) fn set_affordance_activation(&self, id: AffordanceId, f: ActivateFn) -> bool {
        self.inner.borrow_mut().affordances.set_on_activate(id, f)
    }

    /// Mutate a live affordance in place. Returns `false` if it is gone.
    pub(crate) fn update_affordance<F>(&self, id: AffordanceId, f: F) -> bool
    where
        F: FnOnce(&mut AffordanceRecord),
    {
        let mut s = self.inner.borrow_mut();
        match s.affordances.get_mut(id) {
            Some(r) => {
                f(r);
                true
            }
            None => false,
        }
    }

    pub(crate) fn remove_affordance(&self, id: AffordanceId) -> Option<AffordanceRecord> {
        let mut s = self.inner.borrow_mut();
        s.z.retain(|i| *i != Item::Affordance(id));
        s.affordances.remove(id)
    }

    pub fn has_affordance(&self, id: AffordanceId) -> bool {
        self.inner.borrow().affordances.contains(id)
    }

    pub fn affordance(&self, id: AffordanceId) -> Option<AffordanceRecord> {
        self.inner.borrow().affordances.get(id).cloned()
    }

    pub fn affordances_tagged(&self, tag: &str) -> Vec<AffordanceRecord> {
        self.inner.borrow().affordances.tagged(tag).cloned().collect()
    }

    pub fn affordance_metadata(&self, id: AffordanceId, key: &str) -> Option<Position> {
        self.inner
            .borrow()
            .affordances
            .get(id)
            .and_then(|r| r.metadata(key))
    }

    /// Geometry of every ROI guarded on this canvas, read from the markers.
    pub fn cached_roi_positions(&self, tag: &str, key: &str) -> Vec<Position> {
        self.inner
            .borrow()
            .affordances
            .tagged(tag)
            .filter_map(|r| r.metadata(key))
            .collect()
    }

    /// Fire the affordance's action, as a click on it would.
    pub fn activate_affordance(&self, id: AffordanceId) -> Result<(), RoiError> {
        if !self.has_affordance(id) {
            return Err(RoiError::UnknownAffordance(id.0));
        }
        self.fire_activation(id);
        Ok(())
    }

    fn fire_activation(&self, id: AffordanceId) {
        let action = self.inner.borrow().affordances.activation(id);
        if let Some(f) = action {
            f();
        }
    }

    // -------------------- paint / hit testing --------------------

    /// Bottom to top. Overlay items always follow content items.
    pub fn paint_order(&self) -> Vec<Item> {
        let s = self.inner.borrow();
        let mut items = s.z.clone();
        items.sort_by_key(|i| match i.layer() {
            Layer::Content => 0,
            Layer::Overlay => 1,
        });
        items
    }

    /// Deliver a click at `p` to the topmost item under it.
    pub fn click_at(&self, p: Point, button: MouseButton) -> ClickTarget {
        let order = self.paint_order();

        for item in order.iter().rev() {
            match *item {
                Item::Affordance(id) => {
                    let hit = {
                        let s = self.inner.borrow();
                        s.affordances
                            .get(id)
                            .is_some_and(|r| r.visible && r.hit(p))
                    };
                    if hit {
                        if button == MouseButton::Primary {
                            self.fire_activation(id);
                        }
                        return ClickTarget::Affordance(id);
                    }
                }
                Item::Roi(id) => {
                    if let Some(roi) = self.roi(id) {
                        if roi.position().contains(p) {
                            let outcome = roi.click_fill(button);
                            return ClickTarget::Roi(id, outcome);
                        }
                    }
                }
                Item::Content(id) => {
                    let Some(c) = self.content(id) else { continue };
                    if c.extent.is_some_and(|e| e.contains(p)) {
                        if let Some(f) = c.click {
                            if let Err(e) = f() {
                                warn!("click handler on {} ({}) failed: {e}", c.id, c.name);
                            }
                        }
                        return ClickTarget::Content(id);
                    }
                }
            }
        }

        ClickTarget::Nothing
    }
}
