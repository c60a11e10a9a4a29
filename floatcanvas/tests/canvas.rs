// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `floatcanvas` crate.
//!
//! These drive a whole [`Canvas`] the way a host would: objects are added,
//! the view is moved, and pointer input is fed through the active mode.
//! Hit tests run on the pixmap backend so hit colours are read back from
//! real pixels; everything else records draw calls.

use core::cell::{Cell, RefCell};
use core::time::Duration;
use std::rc::Rc;

use floatcanvas::{
    Canvas, CanvasConfig, CanvasError, CanvasEvent, Cursor, DotGrid, DrawObject, HitEvent,
    HitEventKind, KeyEvent, KeyState, MouseButtons, PanMode, PointerButton, PointerEvent,
    PointerKind, RubberBandMode, Tier, ZoomInMode, ZoomOutMode,
};
use floatcanvas_surface::{DrawCall, PixmapBackend, RecordingBackend};
use floatcanvas_view::{BBox, CoordSpace, PixelPoint, PixelSize, Projection, ZoomAnchor};
use kurbo::{Point, Vec2};
use peniko::Color;

const SIZE: PixelSize = PixelSize::new(200, 100);

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn recording() -> Canvas<RecordingBackend> {
    init_tracing();
    Canvas::new(RecordingBackend::default(), SIZE, CanvasConfig::default()).expect("canvas")
}

fn pixmap() -> Canvas<PixmapBackend> {
    init_tracing();
    Canvas::new(PixmapBackend::default(), SIZE, CanvasConfig::default()).expect("canvas")
}

fn square(x: f64, y: f64) -> DrawObject {
    DrawObject::rectangle(Point::new(x, y), Vec2::new(10.0, 10.0))
        .with_fill(Color::from_rgb8(0, 128, 0))
}

fn assert_near(a: Point, b: Point, tol: f64) {
    assert!(
        (a.x - b.x).abs() <= tol && (a.y - b.y).abs() <= tol,
        "{a:?} is not within {tol} of {b:?}"
    );
}

#[test]
fn zoom_to_content_centres_and_fits() {
    let mut canvas = recording();
    canvas.add_objects([square(0.0, 0.0), square(20.0, 0.0)]);

    let bb = canvas.bounding_box();
    assert_eq!(bb.min(), Some(Point::new(0.0, 0.0)));
    assert_eq!(bb.max(), Some(Point::new(30.0, 10.0)));

    canvas.zoom_to_bb(None, true).expect("zoom");
    assert_eq!(canvas.view().center(), Point::new(15.0, 5.0));
    // Width limits: 200 px over 30 units, with the fit margin.
    assert!((canvas.view().scale() - 200.0 / 30.0 * 0.95).abs() < 1e-9);
    assert!(canvas.last_draw_stats().background_redrawn);
    assert_eq!(canvas.last_draw_stats().painted, 2);
}

#[test]
fn empty_or_flat_content_has_no_bounding_box() {
    let mut canvas = recording();
    assert!(canvas.bounding_box().is_null());
    canvas.add_object(DrawObject::line(vec![
        Point::new(0.0, 0.0),
        Point::new(10.0, 0.0),
    ]));
    assert!(canvas.bounding_box().is_null());

    canvas.zoom_to_bb(None, false).expect("zoom");
    assert_eq!(canvas.view().scale(), 1.0);
    assert_eq!(canvas.view().center(), Point::ORIGIN);
}

#[test]
fn fit_shows_every_object() {
    let mut canvas = recording();
    canvas.add_object(square(0.0, 0.0));
    canvas.add_object(DrawObject::circle(Point::new(100.0, 100.0), 20.0));
    canvas.zoom_to_bb(None, true).expect("zoom");

    let viewport = canvas.view().viewport_bbox();
    assert!(BBox::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0)).inside(&viewport));
    assert!(BBox::new(Point::new(90.0, 90.0), Point::new(110.0, 110.0)).inside(&viewport));
}

#[test]
fn pan_and_back_restores_the_view() {
    let mut canvas = recording();
    canvas.add_object(square(0.0, 0.0));
    let before = canvas.view().center();

    canvas
        .move_image(Vec2::new(50.0, 0.0), CoordSpace::Pixel, true)
        .expect("pan");
    assert_eq!(canvas.view().center(), Point::new(50.0, 0.0));
    canvas
        .move_image(Vec2::new(-50.0, 0.0), CoordSpace::Pixel, true)
        .expect("pan");
    assert_eq!(canvas.view().center(), before);

    canvas
        .move_image(Vec2::new(0.25, -0.5), CoordSpace::Panel, false)
        .expect("pan");
    canvas
        .move_image(Vec2::new(-0.25, 0.5), CoordSpace::Panel, false)
        .expect("pan");
    assert_near(canvas.view().center(), before, 1e-9);
}

#[test]
fn wheel_zoom_keeps_the_point_under_the_pointer() {
    let mut canvas = recording();
    canvas.set_mode(ZoomOutMode::new());
    let pos = PixelPoint::new(30, 70);
    let world = canvas.pixel_to_world(pos);

    canvas
        .handle_pointer(&PointerEvent::wheel(1.0, pos))
        .expect("wheel");
    assert!((canvas.view().scale() - 1.1).abs() < 1e-12);
    assert_near(canvas.pixel_to_world(pos), world, 1e-9);

    canvas.zoom(4.0, ZoomAnchor::KeepPixel(pos)).expect("zoom");
    assert_near(canvas.pixel_to_world(pos), world, 1e-9);
}

#[test]
fn left_down_callback_fires_once_with_world_position() {
    let mut canvas = pixmap();
    let id = canvas.add_object(square(0.0, 0.0));
    let seen: Rc<RefCell<Vec<HitEvent>>> = Rc::default();
    let sink = Rc::clone(&seen);
    canvas
        .bind(id, HitEventKind::LeftDown, move |obj, event| {
            obj.set_fill_color(Some(Color::from_rgb8(255, 0, 0)));
            sink.borrow_mut().push(*event);
        })
        .expect("bind");
    canvas.zoom_to_bb(None, true).expect("zoom");

    let center = canvas.world_to_pixel(Point::new(5.0, 5.0));
    canvas
        .handle_pointer(&PointerEvent::down(PointerButton::Left, center))
        .expect("press");

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].object, id);
    assert_eq!(seen[0].kind, HitEventKind::LeftDown);
    assert_near(seen[0].world, Point::new(5.0, 5.0), 1.0);
    // Consumed by the callback, so not raised.
    assert!(canvas.take_events().is_empty());
    assert_eq!(
        canvas.object(id).and_then(|o| o.style.fill_color),
        Some(Color::from_rgb8(255, 0, 0))
    );

    // A press with no binding for its kind falls through to the host.
    canvas
        .handle_pointer(&PointerEvent::down(PointerButton::Right, center))
        .expect("press");
    assert!(matches!(
        canvas.take_events()[..],
        [CanvasEvent::Pointer {
            kind: PointerKind::Down(PointerButton::Right),
            ..
        }]
    ));
}

#[test]
fn presses_beyond_the_panel_edge_hit_nothing() {
    let mut canvas = pixmap();
    // Pixel columns 0..10 and rows 10..20 in the default view.
    let id = canvas.add_object(square(-100.0, 30.0));
    let fired = Rc::new(Cell::new(0_u32));
    let count = Rc::clone(&fired);
    canvas
        .bind(id, HitEventKind::LeftDown, move |_, _| count.set(count.get() + 1))
        .expect("bind");
    canvas.draw(false).expect("draw");
    assert_eq!(canvas.hit_object_at(PixelPoint::new(0, 15)), Some(id));

    // Just past the right edge lines up with the left column one row down.
    for pos in [
        PixelPoint::new(200, 14),
        PixelPoint::new(205, 15),
        PixelPoint::new(-1, 15),
        PixelPoint::new(5, 100),
    ] {
        assert_eq!(canvas.hit_object_at(pos), None, "{pos:?}");
        assert!(!canvas.hit_test(pos, HitEventKind::LeftDown).expect("hit test"));
    }
    assert_eq!(fired.get(), 0);

    assert!(canvas.hit_test(PixelPoint::new(5, 15), HitEventKind::LeftDown).expect("hit test"));
    assert_eq!(fired.get(), 1);
}

#[test]
fn each_bound_object_gets_its_own_colour() {
    let mut canvas = pixmap();
    let a = canvas.add_object(square(0.0, 0.0));
    let b = canvas.add_object(square(20.0, 0.0));
    let c = canvas.add_object(square(40.0, 0.0));
    for id in [a, b, c] {
        canvas
            .bind(id, HitEventKind::LeftUp, |_, _| {})
            .expect("bind");
    }
    canvas.zoom_to_bb(None, true).expect("zoom");

    let colors: Vec<_> = [a, b, c]
        .iter()
        .map(|id| canvas.object(*id).and_then(|o| o.hit.color()))
        .collect();
    assert!(colors.iter().all(Option::is_some));
    assert_ne!(colors[0], colors[1]);
    assert_ne!(colors[1], colors[2]);
    assert_ne!(colors[0], colors[2]);

    for (id, x) in [(a, 5.0), (b, 25.0), (c, 45.0)] {
        let pos = canvas.world_to_pixel(Point::new(x, 5.0));
        assert_eq!(canvas.hit_object_at(pos), Some(id));
    }
    let gap = canvas.world_to_pixel(Point::new(15.0, 5.0));
    assert_eq!(canvas.hit_object_at(gap), None);
}

#[test]
fn hover_enters_once_and_leaves_once() {
    let mut canvas = pixmap();
    let id = canvas.add_object(square(0.0, 0.0));
    let log: Rc<RefCell<Vec<HitEventKind>>> = Rc::default();
    for kind in [HitEventKind::EnterObject, HitEventKind::LeaveObject] {
        let log = Rc::clone(&log);
        canvas
            .bind(id, kind, move |_, event| log.borrow_mut().push(event.kind))
            .expect("bind");
    }
    canvas.zoom_to_bb(None, true).expect("zoom");

    let inside = canvas.world_to_pixel(Point::new(5.0, 5.0));
    let outside = PixelPoint::new(1, 1);
    for pos in [inside, inside, outside, outside] {
        canvas
            .handle_pointer(&PointerEvent::moved(pos, MouseButtons::empty()))
            .expect("move");
    }
    assert_eq!(
        *log.borrow(),
        [HitEventKind::EnterObject, HitEventKind::LeaveObject]
    );
    // Motion is raised whether or not it hit anything.
    assert_eq!(canvas.take_events().len(), 4);
}

#[test]
fn removed_objects_release_their_bindings() {
    let mut canvas = pixmap();
    let id = canvas.add_object(square(0.0, 0.0));
    canvas
        .bind(id, HitEventKind::LeftDown, |_, _| {})
        .expect("bind");
    canvas.zoom_to_bb(None, true).expect("zoom");
    let center = canvas.world_to_pixel(Point::new(5.0, 5.0));

    let removed = canvas.remove_object(id).expect("remove");
    assert!(removed.hit.color().is_none());
    canvas.draw(false).expect("draw");
    assert!(!canvas.hit_test(center, HitEventKind::LeftDown).expect("hit"));

    assert!(matches!(
        canvas.remove_object(id),
        Err(CanvasError::UnknownObject(gone)) if gone == id
    ));
    assert!(matches!(
        canvas.bind(id, HitEventKind::LeftDown, |_, _| {}),
        Err(CanvasError::UnknownObject(_))
    ));
}

#[test]
fn clear_all_empties_the_canvas() {
    let mut canvas = pixmap();
    let id = canvas.add_object(square(0.0, 0.0));
    canvas
        .bind(id, HitEventKind::LeftDown, |_, _| {})
        .expect("bind");
    canvas.zoom_to_bb(None, true).expect("zoom");
    assert!(canvas.uses_hit_test());

    canvas.clear_all(true).expect("clear");
    assert!(canvas.objects().is_empty());
    assert!(!canvas.uses_hit_test());
    assert!(canvas.bounding_box().is_null());
    assert_eq!(canvas.view().scale(), 1.0);
}

#[test]
fn objects_outside_the_viewport_are_culled() {
    let mut canvas = recording();
    canvas.add_object(square(0.0, 0.0));
    canvas.add_object(square(1000.0, 1000.0));
    canvas.add_object(square(-5.0, -5.0).hidden());

    canvas.draw(true).expect("draw");
    let stats = canvas.last_draw_stats();
    assert!(stats.background_redrawn);
    assert_eq!(stats.painted, 1);
    assert_eq!(stats.culled, 1);

    // Nothing changed, so the cached background is reused.
    canvas.draw(false).expect("draw");
    let stats = canvas.last_draw_stats();
    assert!(!stats.background_redrawn);
    assert_eq!(stats.painted, 0);
}

#[test]
fn foreground_buffer_follows_foreground_objects() {
    let mut canvas = recording();
    canvas.add_object(square(0.0, 0.0));
    let fg = canvas.add_object(square(20.0, 0.0).in_foreground());
    assert_eq!(canvas.objects().tier(Tier::Foreground), &[fg]);
    let created = canvas.backend().created.len();

    canvas.draw(false).expect("draw");
    assert_eq!(canvas.backend().created.len(), created + 1);
    assert_eq!(canvas.last_draw_stats().painted, 2);

    // Foreground objects repaint every time, background ones only when dirty.
    canvas.draw(false).expect("draw");
    assert_eq!(canvas.last_draw_stats().painted, 1);

    canvas.set_tier(fg, Tier::Background).expect("tier");
    assert!(canvas.objects().tier(Tier::Foreground).is_empty());
    assert_eq!(canvas.objects().tier(Tier::Background).len(), 2);
}

#[test]
fn resize_rebuilds_buffers_after_the_debounce() {
    let mut canvas = recording();
    let created = canvas.backend().created.len();
    let new_size = PixelSize::new(300, 200);

    canvas.on_size(new_size);
    // Coordinates follow at once.
    assert_eq!(canvas.view().panel_size(), new_size);
    let due = canvas.next_deadline().expect("resize pending");

    canvas
        .tick(due - Duration::from_millis(1))
        .expect("early tick");
    assert_eq!(canvas.backend().created.len(), created);

    canvas.tick(due).expect("tick");
    let rebuilt = &canvas.backend().created[created..];
    assert!(!rebuilt.is_empty());
    assert!(rebuilt.iter().all(|(size, _)| *size == new_size));
    assert_eq!(canvas.next_deadline(), None);
}

#[test]
fn pan_mode_drags_the_view() {
    let mut canvas = recording();
    canvas.set_mode(PanMode::new());
    assert_eq!(canvas.mode_name(), Some("pan"));
    assert_eq!(canvas.cursor(), Cursor::Hand);

    let start = PixelPoint::new(100, 50);
    let end = PixelPoint::new(120, 40);
    let world = canvas.pixel_to_world(start);
    canvas
        .handle_pointer(&PointerEvent::down(PointerButton::Left, start))
        .expect("press");
    assert_eq!(canvas.cursor(), Cursor::GrabHand);
    canvas
        .handle_pointer(&PointerEvent::moved(end, MouseButtons::LEFT))
        .expect("drag");
    assert!(canvas.next_deadline().is_some());
    canvas
        .handle_pointer(&PointerEvent::up(PointerButton::Left, end))
        .expect("release");
    assert_eq!(canvas.cursor(), Cursor::Hand);

    // The world point grabbed stays under the pointer.
    assert_near(canvas.pixel_to_world(end), world, 1e-9);
}

#[test]
fn zoom_in_click_recentres_on_the_point() {
    let mut canvas = recording();
    canvas.set_mode(ZoomInMode::new());
    assert_eq!(canvas.cursor(), Cursor::MagPlus);
    let pos = PixelPoint::new(150, 25);
    let world = canvas.pixel_to_world(pos);

    canvas
        .handle_pointer(&PointerEvent::down(PointerButton::Left, pos))
        .expect("press");
    canvas
        .handle_pointer(&PointerEvent::up(PointerButton::Left, pos))
        .expect("release");
    assert!((canvas.view().scale() - 1.5).abs() < 1e-12);
    assert_near(canvas.view().center(), world, 1e-9);
}

#[test]
fn zoom_in_box_fits_the_dragged_area() {
    let mut canvas = recording();
    canvas.set_mode(ZoomInMode::new());
    let start = PixelPoint::new(50, 25);
    let end = PixelPoint::new(150, 75);
    let expected = BBox::new(canvas.pixel_to_world(start), canvas.pixel_to_world(end));

    canvas
        .handle_pointer(&PointerEvent::down(PointerButton::Left, start))
        .expect("press");
    canvas
        .handle_pointer(&PointerEvent::moved(end, MouseButtons::LEFT))
        .expect("drag");
    canvas
        .handle_pointer(&PointerEvent::up(PointerButton::Left, end))
        .expect("release");

    assert_near(
        canvas.view().center(),
        expected.center().expect("box"),
        1e-9,
    );
    // Half the panel was boxed, so the scale roughly doubles.
    assert!((canvas.view().scale() - 2.0 * 0.95).abs() < 1e-9);
}

#[test]
fn zoom_clicks_refresh_the_flat_earth_projection() {
    let mut canvas = recording();
    canvas.set_projection(Projection::FlatEarth).expect("projection");
    assert!((canvas.view().projection_vector().x - 1.0).abs() < 1e-12);

    // Latitude 30 at scale 1.
    canvas.set_mode(ZoomInMode::new());
    let pos = PixelPoint::new(100, 20);
    canvas
        .handle_pointer(&PointerEvent::down(PointerButton::Left, pos))
        .expect("press");
    canvas
        .handle_pointer(&PointerEvent::up(PointerButton::Left, pos))
        .expect("release");
    assert_near(canvas.view().center(), Point::new(0.0, 30.0), 1e-9);
    let cos30 = 30.0_f64.to_radians().cos();
    assert!((canvas.view().projection_vector().x - cos30).abs() < 1e-9);

    // Latitude 60 at scale 1.5.
    canvas.set_mode(ZoomOutMode::new());
    canvas
        .handle_pointer(&PointerEvent::down(PointerButton::Left, PixelPoint::new(100, 5)))
        .expect("press");
    assert_near(canvas.view().center(), Point::new(0.0, 60.0), 1e-9);
    assert!((canvas.view().projection_vector().x - 0.5).abs() < 1e-9);
    assert!((canvas.view().scale() - 1.0).abs() < 1e-12);
}

#[test]
fn rubber_band_reports_the_world_box() {
    let mut canvas = recording();
    let boxes: Rc<RefCell<Vec<BBox>>> = Rc::default();
    let sink = Rc::clone(&boxes);
    canvas.set_mode(RubberBandMode::new(move |bb| sink.borrow_mut().push(bb)));
    assert_eq!(canvas.cursor(), Cursor::Cross);

    let start = PixelPoint::new(10, 10);
    let end = PixelPoint::new(50, 40);
    canvas
        .handle_pointer(&PointerEvent::down(PointerButton::Left, start))
        .expect("press");
    canvas
        .handle_pointer(&PointerEvent::moved(end, MouseButtons::LEFT))
        .expect("drag");
    canvas
        .handle_pointer(&PointerEvent::up(PointerButton::Left, end))
        .expect("release");

    let xors = canvas
        .screen()
        .calls()
        .iter()
        .filter(|c| matches!(c, DrawCall::XorRectangle(_)))
        .count();
    // Drawn once and erased once.
    assert_eq!(xors, 2);

    let boxes = boxes.borrow();
    assert_eq!(boxes.len(), 1);
    assert_eq!(boxes[0].min(), Some(Point::new(-90.0, 10.0)));
    assert_eq!(boxes[0].max(), Some(Point::new(-50.0, 40.0)));
    // The view is untouched.
    assert_eq!(canvas.view().scale(), 1.0);
}

#[test]
fn tiny_rubber_band_is_ignored() {
    let mut canvas = recording();
    let boxes: Rc<RefCell<Vec<BBox>>> = Rc::default();
    let sink = Rc::clone(&boxes);
    canvas.set_mode(RubberBandMode::new(move |bb| sink.borrow_mut().push(bb)));

    let start = PixelPoint::new(10, 10);
    let end = PixelPoint::new(13, 60);
    canvas
        .handle_pointer(&PointerEvent::down(PointerButton::Left, start))
        .expect("press");
    canvas
        .handle_pointer(&PointerEvent::moved(end, MouseButtons::LEFT))
        .expect("drag");
    canvas
        .handle_pointer(&PointerEvent::up(PointerButton::Left, end))
        .expect("release");
    assert!(boxes.borrow().is_empty());
}

#[test]
fn rubber_band_shrunk_back_inside_the_tolerance_is_ignored() {
    let mut canvas = recording();
    let boxes: Rc<RefCell<Vec<BBox>>> = Rc::default();
    let sink = Rc::clone(&boxes);
    canvas.set_mode(RubberBandMode::new(move |bb| sink.borrow_mut().push(bb)));

    let start = PixelPoint::new(10, 10);
    let back = PixelPoint::new(12, 12);
    canvas
        .handle_pointer(&PointerEvent::down(PointerButton::Left, start))
        .expect("press");
    canvas
        .handle_pointer(&PointerEvent::moved(PixelPoint::new(50, 40), MouseButtons::LEFT))
        .expect("drag out");
    canvas
        .handle_pointer(&PointerEvent::moved(back, MouseButtons::LEFT))
        .expect("drag back");
    canvas
        .handle_pointer(&PointerEvent::up(PointerButton::Left, back))
        .expect("release");

    assert!(boxes.borrow().is_empty());
    let xors = canvas
        .screen()
        .calls()
        .iter()
        .filter(|c| matches!(c, DrawCall::XorRectangle(_)))
        .count();
    assert_eq!(xors, 2);
}

#[test]
fn keys_are_always_raised() {
    let mut canvas = recording();
    canvas
        .handle_key(&KeyEvent::new("Escape"), KeyState::Down)
        .expect("key");
    canvas
        .handle_key(&KeyEvent::new("Escape"), KeyState::Up)
        .expect("key");
    assert_eq!(
        canvas.take_events(),
        [
            CanvasEvent::KeyDown(KeyEvent::new("Escape")),
            CanvasEvent::KeyUp(KeyEvent::new("Escape")),
        ]
    );
}

#[test]
fn grid_over_draws_on_the_screen() {
    let mut canvas = recording();
    canvas.set_grid_over(Some(Box::new(DotGrid::new(Vec2::new(50.0, 50.0)))));
    canvas.draw(false).expect("draw");
    assert!(
        canvas
            .screen()
            .calls()
            .iter()
            .any(|c| matches!(c, DrawCall::Points { .. }))
    );
    assert!(
        !canvas
            .background_buffer()
            .calls()
            .iter()
            .any(|c| matches!(c, DrawCall::Points { .. }))
    );
}

#[test]
fn fine_grid_survives_a_far_zoom_out() {
    let mut canvas = recording();
    canvas.set_grid_under(Some(Box::new(DotGrid::new(Vec2::new(1.0, 1.0)))));
    canvas.draw(false).expect("draw");
    assert!(
        canvas
            .background_buffer()
            .calls()
            .iter()
            .any(|c| matches!(c, DrawCall::Points { .. }))
    );

    canvas.zoom(1e-7, ZoomAnchor::ViewportCenter).expect("zoom");
    let calls = canvas.background_buffer().calls();
    let last_clear = calls
        .iter()
        .rposition(|c| matches!(c, DrawCall::Clear(_)))
        .expect("background repainted");
    assert!(
        !calls[last_clear..]
            .iter()
            .any(|c| matches!(c, DrawCall::Points { .. }))
    );
}

#[test]
fn save_as_image_writes_a_png() {
    let mut canvas = pixmap();
    canvas.add_object(square(0.0, 0.0));
    canvas.zoom_to_bb(None, true).expect("zoom");

    let path = std::env::temp_dir().join(format!("floatcanvas-{}.png", std::process::id()));
    canvas.save_as_image(&path).expect("save");
    let bytes = std::fs::read(&path).expect("read back");
    let _ = std::fs::remove_file(&path);
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

    assert!(matches!(
        canvas.save_as_image(path.with_extension("nope")),
        Err(CanvasError::Surface(_))
    ));
}
