// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction modes: what pointer input does to a canvas.
//!
//! A canvas holds exactly one [`GuiMode`] at a time and routes every pointer
//! and key event to it. The built-in modes are:
//!
//! - [`MouseMode`]: hit-test button presses against bound objects, track
//!   enter/leave, and raise everything else for the host.
//! - [`PanMode`]: drag to move the view.
//! - [`ZoomInMode`]: click to zoom in about a point, or drag a box to fit.
//! - [`ZoomOutMode`]: click to zoom out.
//! - [`RubberBandMode`]: drag a box and report it in world units.
//!
//! All modes except [`MouseMode`] zoom about the pointer on wheel turns.

use core::fmt;

use floatcanvas_event_state::drag::DragState;
use floatcanvas_surface::Backend;
use floatcanvas_view::{BBox, CoordSpace, PixelPoint, ZoomAnchor};
use kurbo::{Point, Rect};

use crate::events::{Cursor, KeyEvent, PointerEvent, PointerKind};
use crate::hit::HitEventKind;
use crate::{Canvas, CanvasError};

/// Zoom factor of a click in the zoom modes.
const CLICK_ZOOM: f64 = 1.5;

/// Zoom factors of one wheel notch towards and away from the user.
const WHEEL_ZOOM_OUT: f64 = 0.9;
const WHEEL_ZOOM_IN: f64 = 1.1;

/// A drag must move more than this on both axes to count as a zoom box.
const ZOOM_BOX_THRESHOLD: f64 = 10.0;

/// Default smallest rubber band, in pixels on each axis.
const RUBBER_BAND_TOLERANCE: f64 = 5.0;

/// An interaction mode.
///
/// Every handler defaults to doing nothing.
#[expect(unused_variables, reason = "default handlers ignore their arguments")]
pub trait GuiMode<B: Backend> {
    /// Short name, for logs.
    fn name(&self) -> &'static str;

    /// Pointer shape while this mode is idle.
    fn cursor(&self) -> Cursor {
        Cursor::Default
    }

    /// Called when another mode replaces this one.
    fn unset(&mut self, canvas: &mut Canvas<B>) {}

    /// Left button pressed.
    fn on_left_down(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Left button released.
    fn on_left_up(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Left button double-clicked.
    fn on_left_double(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Middle button pressed.
    fn on_middle_down(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Middle button released.
    fn on_middle_up(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Middle button double-clicked.
    fn on_middle_double(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Right button pressed.
    fn on_right_down(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Right button released.
    fn on_right_up(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Right button double-clicked.
    fn on_right_double(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Wheel turned.
    fn on_wheel(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Pointer moved.
    fn on_move(&mut self, canvas: &mut Canvas<B>, event: &PointerEvent) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Key pressed. The canvas raises the key for the host afterwards.
    fn on_key_down(&mut self, canvas: &mut Canvas<B>, event: &KeyEvent) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Key released. The canvas raises the key for the host afterwards.
    fn on_key_up(&mut self, canvas: &mut Canvas<B>, event: &KeyEvent) -> Result<(), CanvasError> {
        Ok(())
    }

    /// Called after every draw, so overlays drawn straight onto the screen
    /// can be restored.
    fn update_screen(&mut self, canvas: &mut Canvas<B>) {}
}

/// Zooms about the pointer: in when the wheel turns away from the user.
fn wheel_zoom<B: Backend>(canvas: &mut Canvas<B>, event: &PointerEvent) -> Result<(), CanvasError> {
    let PointerKind::Wheel(delta) = event.kind else {
        return Ok(());
    };
    let factor = if delta < 0.0 {
        WHEEL_ZOOM_OUT
    } else {
        WHEEL_ZOOM_IN
    };
    canvas.zoom(factor, ZoomAnchor::KeepPixel(event.pos))
}

/// Hit-tests presses against bound objects and raises what they do not
/// consume.
#[derive(Clone, Copy, Debug, Default)]
pub struct MouseMode;

impl MouseMode {
    /// Creates the mode.
    pub fn new() -> Self {
        Self
    }

    fn button<B: Backend>(
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
        kind: HitEventKind,
    ) -> Result<(), CanvasError> {
        if !canvas.hit_test(event.pos, kind)? {
            canvas.raise_pointer(event);
        }
        Ok(())
    }
}

impl<B: Backend> GuiMode<B> for MouseMode {
    fn name(&self) -> &'static str {
        "mouse"
    }

    fn on_left_down(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Self::button(canvas, event, HitEventKind::LeftDown)
    }

    fn on_left_up(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Self::button(canvas, event, HitEventKind::LeftUp)
    }

    fn on_left_double(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Self::button(canvas, event, HitEventKind::LeftDoubleClick)
    }

    fn on_middle_down(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Self::button(canvas, event, HitEventKind::MiddleDown)
    }

    fn on_middle_up(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Self::button(canvas, event, HitEventKind::MiddleUp)
    }

    fn on_middle_double(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Self::button(canvas, event, HitEventKind::MiddleDoubleClick)
    }

    fn on_right_down(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Self::button(canvas, event, HitEventKind::RightDown)
    }

    fn on_right_up(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Self::button(canvas, event, HitEventKind::RightUp)
    }

    fn on_right_double(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        Self::button(canvas, event, HitEventKind::RightDoubleClick)
    }

    fn on_wheel(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        canvas.raise_pointer(event);
        Ok(())
    }

    fn on_move(&mut self, canvas: &mut Canvas<B>, event: &PointerEvent) -> Result<(), CanvasError> {
        // Motion is always raised, hit or not.
        canvas.mouse_over_test(event.pos)?;
        canvas.raise_pointer(event);
        Ok(())
    }
}

/// Drag with the left button to move the view.
///
/// While dragging, the finished buffer is shown shifted on the screen and
/// the full redraw waits until the pointer rests for
/// [`pan_redraw_delay`](crate::CanvasConfig::pan_redraw_delay).
#[derive(Clone, Copy, Debug, Default)]
pub struct PanMode {
    /// `start_pos` is where the on-screen buffer was last drawn from;
    /// `last_pos` is how far the view has actually moved.
    drag: DragState,
}

impl PanMode {
    /// Creates the mode.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<B: Backend> GuiMode<B> for PanMode {
    fn name(&self) -> &'static str {
        "pan"
    }

    fn cursor(&self) -> Cursor {
        Cursor::Hand
    }

    fn unset(&mut self, _canvas: &mut Canvas<B>) {
        self.drag.end();
    }

    fn on_left_down(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        canvas.set_cursor(Cursor::GrabHand);
        self.drag.start(event.pos.to_point());
        Ok(())
    }

    fn on_left_up(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        canvas.set_cursor(Cursor::Hand);
        let Some(step) = self.drag.update(event.pos.to_point()) else {
            return Ok(());
        };
        self.drag.end();
        canvas.move_image(-step, CoordSpace::Pixel, true)
    }

    fn on_move(&mut self, canvas: &mut Canvas<B>, event: &PointerEvent) -> Result<(), CanvasError> {
        canvas.raise_pointer(event);
        if !(event.left_is_down() && self.drag.is_dragging()) {
            return Ok(());
        }
        let end = event.pos.to_point();
        if let Some(shown) = self.drag.total_offset(end) {
            canvas.present_shifted(shown);
        }
        if let Some(step) = self.drag.update(end) {
            canvas.move_image(-step, CoordSpace::Pixel, false)?;
        }
        let delay = canvas.config().pan_redraw_delay;
        canvas.schedule_redraw(delay);
        Ok(())
    }

    fn on_wheel(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        wheel_zoom(canvas, event)
    }

    fn update_screen(&mut self, _canvas: &mut Canvas<B>) {
        // The buffer now shows the view as moved so far.
        self.drag.rebase();
    }
}

/// Click to zoom in about the point, drag a box to zoom to it, right click
/// to zoom out.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZoomInMode {
    drag: DragState,
    /// Box currently inverted on the screen.
    shown: Option<Rect>,
}

impl ZoomInMode {
    /// Creates the mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// The zoom box between `start` and `end`, widened to the panel's
    /// aspect ratio about its centre.
    fn zoom_box(start: Point, end: Point, aspect: f64) -> Rect {
        let d = end - start;
        let w = d.x.abs().max((d.y.abs() * aspect).trunc());
        let h = (w / aspect).trunc();
        Rect::from_center_size(start.midpoint(end), (w, h))
    }
}

impl<B: Backend> GuiMode<B> for ZoomInMode {
    fn name(&self) -> &'static str {
        "zoom-in"
    }

    fn cursor(&self) -> Cursor {
        Cursor::MagPlus
    }

    fn unset(&mut self, canvas: &mut Canvas<B>) {
        if let Some(rect) = self.shown.take() {
            canvas.xor_on_screen(rect);
        }
        self.drag.end();
    }

    fn on_left_down(
        &mut self,
        _canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        self.drag.start(event.pos.to_point());
        self.shown = None;
        Ok(())
    }

    fn on_left_up(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        let Some(start) = self.drag.start_pos else {
            return Ok(());
        };
        let end = event.pos.to_point();
        let exceeds = self.drag.exceeds(end, ZOOM_BOX_THRESHOLD);
        self.drag.end();
        self.shown = None;
        let start = canvas.pixel_to_world(PixelPoint::round_from(start));
        if exceeds {
            let end = canvas.pixel_to_world(event.pos);
            canvas.zoom_to_bb(Some(BBox::new(start, end)), true)
        } else {
            canvas.zoom(CLICK_ZOOM, ZoomAnchor::RecenterWorld(start))
        }
    }

    fn on_move(&mut self, canvas: &mut Canvas<B>, event: &PointerEvent) -> Result<(), CanvasError> {
        canvas.raise_pointer(event);
        let Some(start) = self.drag.start_pos else {
            return Ok(());
        };
        if !event.left_is_down() {
            return Ok(());
        }
        let aspect = canvas.view().panel_size().aspect_ratio();
        let rect = Self::zoom_box(start, event.pos.to_point(), aspect);
        if let Some(prev) = self.shown.replace(rect) {
            canvas.xor_on_screen(prev);
        }
        canvas.xor_on_screen(rect);
        Ok(())
    }

    fn on_right_down(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        canvas.zoom(1.0 / CLICK_ZOOM, ZoomAnchor::RecenterPixel(event.pos))
    }

    fn on_wheel(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        wheel_zoom(canvas, event)
    }

    fn update_screen(&mut self, canvas: &mut Canvas<B>) {
        // The redraw wiped the box; put it back.
        if let Some(rect) = self.shown {
            canvas.xor_on_screen(rect);
        }
    }
}

/// Click to zoom out about the point, right click to zoom in.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZoomOutMode;

impl ZoomOutMode {
    /// Creates the mode.
    pub fn new() -> Self {
        Self
    }
}

impl<B: Backend> GuiMode<B> for ZoomOutMode {
    fn name(&self) -> &'static str {
        "zoom-out"
    }

    fn cursor(&self) -> Cursor {
        Cursor::MagMinus
    }

    fn on_left_down(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        canvas.zoom(1.0 / CLICK_ZOOM, ZoomAnchor::RecenterPixel(event.pos))
    }

    fn on_right_down(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        canvas.zoom(CLICK_ZOOM, ZoomAnchor::RecenterPixel(event.pos))
    }

    fn on_move(&mut self, canvas: &mut Canvas<B>, event: &PointerEvent) -> Result<(), CanvasError> {
        canvas.raise_pointer(event);
        Ok(())
    }

    fn on_wheel(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        wheel_zoom(canvas, event)
    }
}

/// Drag a box and report it, in world units, on release. The view does not
/// change.
pub struct RubberBandMode {
    callback: Box<dyn FnMut(BBox)>,
    tolerance: f64,
    drag: DragState,
    shown: Option<Rect>,
}

impl fmt::Debug for RubberBandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RubberBandMode")
            .field("tolerance", &self.tolerance)
            .field("drag", &self.drag)
            .field("shown", &self.shown)
            .finish_non_exhaustive()
    }
}

impl RubberBandMode {
    /// Creates the mode; `callback` receives each finished box.
    pub fn new(callback: impl FnMut(BBox) + 'static) -> Self {
        Self {
            callback: Box::new(callback),
            tolerance: RUBBER_BAND_TOLERANCE,
            drag: DragState::default(),
            shown: None,
        }
    }

    /// Boxes no larger than `tolerance` pixels on either axis are ignored.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    fn erase<B: Backend>(&mut self, canvas: &mut Canvas<B>) {
        if let Some(rect) = self.shown.take() {
            canvas.xor_on_screen(rect);
        }
    }
}

impl<B: Backend> GuiMode<B> for RubberBandMode {
    fn name(&self) -> &'static str {
        "rubber-band"
    }

    fn cursor(&self) -> Cursor {
        Cursor::Cross
    }

    fn unset(&mut self, canvas: &mut Canvas<B>) {
        self.erase(canvas);
        self.drag.end();
    }

    fn on_left_down(
        &mut self,
        _canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        self.drag.start(event.pos.to_point());
        Ok(())
    }

    fn on_left_up(
        &mut self,
        canvas: &mut Canvas<B>,
        event: &PointerEvent,
    ) -> Result<(), CanvasError> {
        let end = event.pos.to_point();
        let rect = if self.drag.exceeds(end, self.tolerance) {
            self.drag.rect_to(end)
        } else {
            None
        };
        self.drag.end();
        self.erase(canvas);
        let Some(rect) = rect else {
            return Ok(());
        };
        let corners = [
            PixelPoint::round_from(Point::new(rect.x0, rect.y0)),
            PixelPoint::round_from(Point::new(rect.x1, rect.y1)),
        ];
        let world = canvas.pixel_to_world_batch(&corners);
        (self.callback)(BBox::new(world[0], world[1]));
        Ok(())
    }

    fn on_move(&mut self, canvas: &mut Canvas<B>, event: &PointerEvent) -> Result<(), CanvasError> {
        let end = event.pos.to_point();
        if self.drag.exceeds(end, self.tolerance) {
            if let Some(rect) = self.drag.rect_to(end) {
                self.erase(canvas);
                canvas.xor_on_screen(rect);
                self.shown = Some(rect);
            }
        } else {
            // Back inside the tolerance: no box to show.
            self.erase(canvas);
        }
        canvas.raise_pointer(event);
        Ok(())
    }

    fn update_screen(&mut self, canvas: &mut Canvas<B>) {
        if let Some(rect) = self.shown {
            canvas.xor_on_screen(rect);
        }
    }
}
