// Author: Dustin Pilgrim
// License: MIT

use std::cell::Cell;
use std::rc::Rc;

use roiguard::{
    AffordanceSettings, BoundsProvider, Canvas, ClickTarget, FillClick, Item, Limits, MouseButton,
    Offset, Point, Position, RoiFactory, RoiOptions,
};

fn canvas() -> Canvas {
    Canvas::new(Limits::new(0.0, 200.0), Limits::new(0.0, 100.0))
}

fn counting_image(canvas: &Canvas, name: &str) -> Rc<Cell<u32>> {
    let id = canvas.add_image(name);
    let hits = Rc::new(Cell::new(0));
    let h = hits.clone();
    canvas.set_click_handler(id, move || {
        h.set(h.get() + 1);
        Ok(())
    });
    hits
}

#[test]
fn end_to_end_scenario() {
    let c = canvas();
    let factory = RoiFactory::default();

    let g = factory
        .create(&c, RoiOptions::at(Position::new(190.0, 10.0, 30.0, 20.0)))
        .expect("created");
    assert_eq!(g.position(), Position::new(190.0, 10.0, 10.0, 20.0));

    g.roi().set_position(Position::new(50.0, 50.0, 30.0, 20.0)).expect("alive");
    let rec = c.affordance(g.affordance()).expect("live");
    assert_eq!(rec.anchor, Point::new(80.0, 50.0));
    assert!(rec.visible);

    // A user drag past the edge is held back by the creation-time clamp.
    let applied = g
        .roi()
        .drag_to(Position::new(195.0, 50.0, 30.0, 20.0))
        .expect("alive");
    assert_eq!(applied, Position::new(170.0, 50.0, 30.0, 20.0));
    let rec = c.affordance(g.affordance()).expect("live");
    assert_eq!(rec.anchor, Point::new(200.0, 50.0));
    assert!(rec.visible);

    // Host-side writes bypass the drag constraint.
    g.roi().set_position(Position::new(195.0, 50.0, 30.0, 20.0)).expect("alive");
    let rec = c.affordance(g.affordance()).expect("live");
    assert_eq!(rec.anchor, Point::new(225.0, 50.0));
    assert!(!rec.visible);

    c.activate_affordance(g.affordance()).expect("known");
    assert!(!c.has_affordance(g.affordance()));
    assert!(!c.has_roi(g.roi().id()));
    assert!(!g.is_alive());
}

#[test]
fn sync_invariant_holds_across_drags_and_pans() {
    let c = canvas();
    let g = RoiFactory::default()
        .create(&c, RoiOptions::at(Position::new(10.0, 10.0, 30.0, 20.0)))
        .expect("created");

    let steps: [(Position, Option<(Limits, Limits)>); 5] = [
        (Position::new(20.0, 20.0, 30.0, 20.0), None),
        (Position::new(160.0, 5.0, 40.0, 20.0), None),
        (
            Position::new(160.0, 5.0, 40.0, 20.0),
            Some((Limits::new(0.0, 150.0), Limits::new(0.0, 100.0))),
        ),
        (Position::new(100.0, 0.0, 10.0, 10.0), None),
        (
            Position::new(0.0, 80.0, 10.0, 10.0),
            Some((Limits::new(20.0, 150.0), Limits::new(0.0, 100.0))),
        ),
    ];

    for (p, limits) in steps {
        if let Some((x, y)) = limits {
            c.set_limits(x, y);
        }
        g.roi().drag_to(p).expect("alive");

        let live = g.position();
        let rec = c.affordance(g.affordance()).expect("live");
        let expected = Point::new(live.x + live.w, live.y);
        assert_eq!(rec.anchor, expected);
        assert_eq!(rec.visible, c.bounds().contains_point(expected));
        assert_eq!(rec.metadata("roi_position"), Some(live));
    }
}

#[test]
fn direct_roi_delete_takes_affordance_along() {
    let c = canvas();
    let g = RoiFactory::default()
        .create(&c, RoiOptions::at(Position::new(10.0, 10.0, 30.0, 20.0)))
        .expect("created");

    g.roi().delete();
    assert!(!c.has_roi(g.roi().id()));
    assert!(!c.has_affordance(g.affordance()));
    assert!(c.paint_order().is_empty());
}

#[test]
fn guarded_delete_matches_affordance_click() {
    let c = canvas();
    let g = RoiFactory::default()
        .create(&c, RoiOptions::at(Position::new(10.0, 10.0, 30.0, 20.0)))
        .expect("created");
    g.delete();
    assert!(c.rois().is_empty());
    assert!(c.affordances_tagged("roi-delete").is_empty());
}

#[test]
fn clicking_the_marker_deletes_the_pair() {
    let c = canvas();
    let g = RoiFactory::default()
        .create(&c, RoiOptions::at(Position::new(50.0, 50.0, 30.0, 20.0)))
        .expect("created");

    // Marker sits on the ROI's top-right corner, above the ROI fill.
    let target = c.click_at(Point::new(80.0, 50.0), MouseButton::Primary);
    assert_eq!(target, ClickTarget::Affordance(g.affordance()));
    assert!(c.rois().is_empty());
    assert!(!c.has_affordance(g.affordance()));
}

#[test]
fn hidden_marker_is_not_clickable() {
    let c = canvas();
    let settings = AffordanceSettings {
        offset: Offset::new(10.0, 0.0),
        ..AffordanceSettings::default()
    };
    let g = RoiFactory::new(settings, MouseButton::Secondary)
        .create(&c, RoiOptions::at(Position::new(50.0, 50.0, 30.0, 20.0)))
        .expect("created");
    assert_eq!(
        c.affordance(g.affordance()).map(|r| r.anchor),
        Some(Point::new(90.0, 50.0))
    );

    // Zoom in past the marker, then nudge the ROI so it resynchronises.
    c.set_limits(Limits::new(0.0, 85.0), Limits::new(0.0, 100.0));
    g.roi().set_position(g.position()).expect("alive");
    assert!(!c.affordance(g.affordance()).expect("live").visible);

    let target = c.click_at(Point::new(90.0, 50.0), MouseButton::Primary);
    assert_eq!(target, ClickTarget::Nothing);
    assert!(g.is_alive());
}

#[test]
fn alternate_click_on_fill_reaches_image_once() {
    let c = canvas();
    let hits = counting_image(&c, "scan");
    let g = RoiFactory::default()
        .create(&c, RoiOptions::at(Position::new(50.0, 50.0, 30.0, 20.0)))
        .expect("created");

    let inside = Point::new(60.0, 60.0);
    assert_eq!(
        c.click_at(inside, MouseButton::Primary),
        ClickTarget::Roi(g.roi().id(), FillClick::Handled)
    );
    assert_eq!(hits.get(), 0);

    assert_eq!(
        c.click_at(inside, MouseButton::Secondary),
        ClickTarget::Roi(g.roi().id(), FillClick::Handled)
    );
    assert_eq!(hits.get(), 1);
}

#[test]
fn alternate_click_with_two_images_forwards_nothing() {
    let c = canvas();
    let a = counting_image(&c, "a");
    let b = counting_image(&c, "b");
    RoiFactory::default()
        .create(&c, RoiOptions::at(Position::new(50.0, 50.0, 30.0, 20.0)))
        .expect("created");

    c.click_at(Point::new(60.0, 60.0), MouseButton::Secondary);
    assert_eq!(a.get() + b.get(), 0);
}

#[test]
fn unguarded_roi_keeps_its_context_menu() {
    let c = canvas();
    let hits = counting_image(&c, "scan");
    let plain = c
        .create_rect_roi(Position::new(50.0, 50.0, 30.0, 20.0))
        .expect("finite");

    assert_eq!(
        c.click_at(Point::new(60.0, 60.0), MouseButton::Secondary),
        ClickTarget::Roi(plain.id(), FillClick::ContextMenu)
    );
    assert_eq!(hits.get(), 0);
}

#[test]
fn bulk_inspection_without_roi_handles() {
    let c = canvas();
    let factory = RoiFactory::default();
    let rects = [
        Position::new(10.0, 10.0, 20.0, 20.0),
        Position::new(60.0, 30.0, 25.0, 10.0),
        Position::new(120.0, 50.0, 40.0, 40.0),
    ];
    for r in rects {
        // Handles dropped on purpose; the canvas keeps the ROIs alive.
        factory.create(&c, RoiOptions::at(r)).expect("created");
    }

    assert_eq!(c.cached_roi_positions("roi-delete", "roi_position"), rects.to_vec());

    let markers = c.affordances_tagged("roi-delete");
    assert_eq!(markers.len(), 3);
    let moved = c.roi(markers[1].roi).expect("alive");
    moved
        .set_position(Position::new(70.0, 30.0, 25.0, 10.0))
        .expect("alive");
    assert_eq!(
        c.affordance_metadata(markers[1].id, "roi_position"),
        Some(Position::new(70.0, 30.0, 25.0, 10.0))
    );

    c.activate_affordance(markers[0].id).expect("known");
    assert_eq!(c.cached_roi_positions("roi-delete", "roi_position").len(), 2);
    assert_eq!(c.rois().len(), 2);
}

#[test]
fn marker_stays_on_top_of_later_content() {
    let c = canvas();
    let g = RoiFactory::default()
        .create(&c, RoiOptions::at(Position::new(50.0, 50.0, 30.0, 20.0)))
        .expect("created");
    let late = c.add_image("late");

    let order = c.paint_order();
    assert_eq!(order.last(), Some(&Item::Affordance(g.affordance())));
    assert!(order.contains(&Item::Content(late)));
}
