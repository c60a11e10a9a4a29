// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The canvas: objects, view, buffers and input in one place.

use core::fmt;
use core::time::Duration;
use std::collections::VecDeque;
use std::path::Path;
use std::time::Instant;

use floatcanvas_event_state::hover::{HoverEvent, HoverState};
use floatcanvas_surface::{Backend, ImageFormat, Rgb, Surface};
use floatcanvas_view::{
    BBox, CoordSpace, PixelPoint, PixelSize, Projection, ViewTransform, ZoomAnchor,
};
use kurbo::{Point, Rect, Vec2};

use crate::draw_list::DrawList;
use crate::events::{
    CanvasEvent, Cursor, KeyEvent, KeyState, PointerButton, PointerEvent, PointerKind,
};
use crate::grid::Grid;
use crate::hit::{HitColorGenerator, HitEvent, HitEventKind, HitIndex};
use crate::modes::{GuiMode, MouseMode};
use crate::paint::{PaintCtx, Pass};
use crate::{CanvasConfig, CanvasError, DrawObject, ObjectId, Tier};

/// Counters from the most recent [`Canvas::draw`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// `true` if the background buffer was repainted.
    pub background_redrawn: bool,
    /// Objects painted, both tiers.
    pub painted: usize,
    /// Visible objects skipped because they lie outside the viewport.
    pub culled: usize,
}

/// Off-screen surfaces of one canvas.
struct Buffers<S> {
    background: S,
    hit: Option<S>,
    foreground: Option<S>,
    foreground_hit: Option<S>,
    screen: S,
}

/// A zoomable, pannable canvas of [`DrawObject`]s.
///
/// The canvas owns every object, the world/pixel transform, the off-screen
/// buffers and the active interaction mode. The host feeds it input with
/// [`Canvas::handle_pointer`], [`Canvas::handle_key`] and
/// [`Canvas::on_size`], calls [`Canvas::tick`] from its timer, presents
/// [`Canvas::screen`], and drains [`Canvas::take_events`].
///
/// ## Buffers
///
/// Background objects are painted into a cached background buffer that is
/// only repainted when something in it changed. Foreground objects are
/// painted over a copy of it on every draw. Objects bound to hit events are
/// painted a second time, in their hit colour, into matching hit buffers.
///
/// ```rust
/// use floatcanvas::{Canvas, CanvasConfig, DrawObject, HitEventKind};
/// use floatcanvas_surface::PixmapBackend;
/// use floatcanvas_view::PixelSize;
/// use kurbo::{Point, Vec2};
/// use peniko::Color;
///
/// let mut canvas =
///     Canvas::new(PixmapBackend::default(), PixelSize::new(200, 100), CanvasConfig::default())?;
/// let id = canvas.add_object(
///     DrawObject::rectangle(Point::new(0.0, 0.0), Vec2::new(10.0, 10.0))
///         .with_fill(Color::from_rgb8(0, 0, 255)),
/// );
/// canvas.bind(id, HitEventKind::LeftDown, |obj, _| obj.set_fill_color(None))?;
/// canvas.zoom_to_bb(None, true)?;
/// let center = canvas.world_to_pixel(Point::new(5.0, 5.0));
/// assert!(canvas.hit_test(center, HitEventKind::LeftDown)?);
/// # Ok::<(), floatcanvas::CanvasError>(())
/// ```
pub struct Canvas<B: Backend> {
    backend: B,
    config: CanvasConfig,
    transform: ViewTransform,
    panel_size: PixelSize,
    list: DrawList,
    bbox: BBox,
    bbox_dirty: bool,
    background_dirty: bool,
    buffers: Buffers<B::Surface>,
    hit_colors: HitColorGenerator,
    hit_index: HitIndex,
    use_hit_test: bool,
    hover: HoverState<ObjectId>,
    mode: Option<Box<dyn GuiMode<B>>>,
    cursor: Cursor,
    events: VecDeque<CanvasEvent>,
    grid_under: Option<Box<dyn Grid>>,
    grid_over: Option<Box<dyn Grid>>,
    resize_due: Option<Instant>,
    redraw_due: Option<Instant>,
    last_draw: DrawStats,
}

impl<B: Backend> fmt::Debug for Canvas<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("transform", &self.transform)
            .field("objects", &self.list.len())
            .field("use_hit_test", &self.use_hit_test)
            .field("mode", &self.mode.as_ref().map(|m| m.name()))
            .field("cursor", &self.cursor)
            .finish_non_exhaustive()
    }
}

impl<B: Backend> Canvas<B> {
    /// Creates an empty canvas of `size` pixels drawing through `backend`.
    ///
    /// The canvas starts in [`MouseMode`].
    pub fn new(mut backend: B, size: PixelSize, config: CanvasConfig) -> Result<Self, CanvasError> {
        let mut transform = ViewTransform::new(size);
        transform.set_projection(config.projection)?;
        transform.set_scale_limits(config.min_scale, config.max_scale);
        let buffers = Self::alloc_buffers(
            &mut backend,
            transform.panel_size(),
            config.background,
            false,
            false,
        )?;
        Ok(Self {
            backend,
            config,
            transform,
            panel_size: size,
            list: DrawList::new(),
            bbox: BBox::NULL,
            bbox_dirty: false,
            background_dirty: true,
            buffers,
            hit_colors: HitColorGenerator::new(),
            hit_index: HitIndex::new(),
            use_hit_test: false,
            hover: HoverState::new(),
            mode: Some(Box::new(MouseMode::new())),
            cursor: Cursor::Default,
            events: VecDeque::new(),
            grid_under: None,
            grid_over: None,
            resize_due: None,
            redraw_due: None,
            last_draw: DrawStats::default(),
        })
    }

    fn alloc_buffers(
        backend: &mut B,
        size: PixelSize,
        background: peniko::Color,
        hit: bool,
        foreground: bool,
    ) -> Result<Buffers<B::Surface>, CanvasError> {
        let mut screen = backend.create_surface(size)?;
        screen.clear(background);
        let mut buffers = Buffers {
            background: backend.create_surface(size)?,
            hit: None,
            foreground: None,
            foreground_hit: None,
            screen,
        };
        if hit {
            buffers.hit = Some(backend.create_hit_surface(size)?);
        }
        if foreground {
            buffers.foreground = Some(backend.create_surface(size)?);
            if hit {
                buffers.foreground_hit = Some(backend.create_hit_surface(size)?);
            }
        }
        Ok(buffers)
    }

    /// Reallocates every buffer at the current panel size.
    fn make_new_buffers(&mut self) -> Result<(), CanvasError> {
        let size = self.transform.panel_size();
        let foreground = !self.list.tier(Tier::Foreground).is_empty();
        self.buffers = Self::alloc_buffers(
            &mut self.backend,
            size,
            self.config.background,
            self.use_hit_test,
            foreground,
        )?;
        self.background_dirty = true;
        tracing::debug!(width = size.width, height = size.height, "rebuilt canvas buffers");
        Ok(())
    }

    fn make_hit_buffers(&mut self) -> Result<(), CanvasError> {
        let size = self.buffers.background.size();
        self.buffers.hit = Some(self.backend.create_hit_surface(size)?);
        if self.buffers.foreground.is_some() {
            self.buffers.foreground_hit = Some(self.backend.create_hit_surface(size)?);
        }
        Ok(())
    }

    fn drop_foreground_buffers(&mut self) {
        self.buffers.foreground = None;
        self.buffers.foreground_hit = None;
    }

    // -------------------------------------------------------------------------
    // Configuration and accessors
    // -------------------------------------------------------------------------

    /// Settings the canvas was created with.
    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// The backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The world/pixel transform.
    pub fn view(&self) -> &ViewTransform {
        &self.transform
    }

    /// Panel size as last reported by the host, before clamping.
    pub fn panel_size(&self) -> PixelSize {
        self.panel_size
    }

    /// The objects, in draw order.
    pub fn objects(&self) -> &DrawList {
        &self.list
    }

    /// The object behind `id`.
    pub fn object(&self, id: ObjectId) -> Option<&DrawObject> {
        self.list.get(id)
    }

    /// The surface to present: the final buffer plus any mode overlay.
    pub fn screen(&self) -> &B::Surface {
        &self.buffers.screen
    }

    /// The cached background buffer.
    pub fn background_buffer(&self) -> &B::Surface {
        &self.buffers.background
    }

    /// The hit buffer consulted by hit tests, if hit testing is on.
    pub fn hit_buffer(&self) -> Option<&B::Surface> {
        self.buffers
            .foreground_hit
            .as_ref()
            .or(self.buffers.hit.as_ref())
    }

    /// Pointer shape requested by the active mode.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Sets the pointer shape. Modes call this mid-gesture.
    pub fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    /// Counters from the most recent draw.
    pub fn last_draw_stats(&self) -> DrawStats {
        self.last_draw
    }

    /// `true` while any object is bound to a hit event.
    pub fn uses_hit_test(&self) -> bool {
        self.use_hit_test
    }

    // -------------------------------------------------------------------------
    // Coordinates
    // -------------------------------------------------------------------------

    /// World point to the nearest pixel.
    pub fn world_to_pixel(&self, pt: Point) -> PixelPoint {
        self.transform.world_to_pixel(pt)
    }

    /// World points to pixels.
    pub fn world_to_pixel_batch(&self, pts: &[Point]) -> Vec<PixelPoint> {
        self.transform.world_to_pixel_batch(pts)
    }

    /// Pixel to world point.
    pub fn pixel_to_world(&self, pt: PixelPoint) -> Point {
        self.transform.pixel_to_world(pt)
    }

    /// Pixels to world points.
    pub fn pixel_to_world_batch(&self, pts: &[PixelPoint]) -> Vec<Point> {
        self.transform.pixel_to_world_batch(pts)
    }

    /// World length to pixels.
    pub fn scale_world_to_pixel(&self, len: Vec2) -> Vec2 {
        self.transform.scale_world_to_pixel(len)
    }

    /// Pixel length to world units.
    pub fn scale_pixel_to_world(&self, len: Vec2) -> Vec2 {
        self.transform.scale_pixel_to_world(len)
    }

    // -------------------------------------------------------------------------
    // Objects
    // -------------------------------------------------------------------------

    /// Adds an object at the end of its tier.
    pub fn add_object(&mut self, mut object: DrawObject) -> ObjectId {
        object.layout(self.backend.metrics());
        let tier = object.tier;
        let id = self.list.insert(object);
        if tier == Tier::Background {
            self.background_dirty = true;
        }
        self.bbox_dirty = true;
        tracing::trace!(?id, ?tier, "added object");
        id
    }

    /// Adds several objects, returning their ids in order.
    pub fn add_objects(&mut self, objects: impl IntoIterator<Item = DrawObject>) -> Vec<ObjectId> {
        objects.into_iter().map(|o| self.add_object(o)).collect()
    }

    /// Removes an object and its bindings, returning it.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<DrawObject, CanvasError> {
        let Some(mut entry) = self.list.remove(id) else {
            tracing::warn!(?id, "remove of unknown object");
            return Err(CanvasError::UnknownObject(id));
        };
        if let Some(rgb) = entry.object.hit.color.take() {
            self.release_color(rgb);
        }
        self.hover.forget(id);
        match entry.object.tier {
            Tier::Background => self.background_dirty = true,
            Tier::Foreground => {
                if self.list.tier(Tier::Foreground).is_empty() {
                    self.drop_foreground_buffers();
                }
            }
        }
        self.bbox_dirty = true;
        Ok(entry.object)
    }

    /// Removes several objects. Stops at the first unknown id; objects
    /// before it stay removed.
    pub fn remove_objects(
        &mut self,
        ids: impl IntoIterator<Item = ObjectId>,
    ) -> Result<Vec<DrawObject>, CanvasError> {
        ids.into_iter().map(|id| self.remove_object(id)).collect()
    }

    /// Removes every object and binding and reallocates the buffers.
    ///
    /// With `reset_bb` the bounding box becomes null and the view returns
    /// to its defaults; otherwise the last bounding box is kept.
    pub fn clear_all(&mut self, reset_bb: bool) -> Result<(), CanvasError> {
        if reset_bb {
            self.bbox = BBox::NULL;
            self.transform.reset();
        } else {
            self.refresh_bounding_box();
        }
        self.bbox_dirty = false;
        self.list.clear();
        self.hit_index.clear();
        self.hit_colors.reset();
        self.use_hit_test = false;
        self.hover.clear();
        tracing::debug!(reset_bb, "cleared canvas");
        self.make_new_buffers()
    }

    /// Edits an object in place, then re-measures it and marks what it
    /// touches for redraw. Returns what `edit` returns.
    ///
    /// Changing the object's [`Tier`] here moves it to the end of the new
    /// tier.
    pub fn update_object<R>(
        &mut self,
        id: ObjectId,
        edit: impl FnOnce(&mut DrawObject) -> R,
    ) -> Result<R, CanvasError> {
        let Some(object) = self.list.get_mut(id) else {
            tracing::warn!(?id, "update of unknown object");
            return Err(CanvasError::UnknownObject(id));
        };
        let out = edit(object);
        object.layout(self.backend.metrics());
        self.object_changed(id);
        Ok(out)
    }

    /// Moves an object by `delta` world units.
    pub fn move_object(&mut self, id: ObjectId, delta: Vec2) -> Result<(), CanvasError> {
        self.update_object(id, |o| o.translate(delta))
    }

    /// Moves an object to the end of `tier`.
    pub fn set_tier(&mut self, id: ObjectId, tier: Tier) -> Result<(), CanvasError> {
        self.update_object(id, |o| o.tier = tier)
    }

    /// Shows or hides an object.
    pub fn set_visible(&mut self, id: ObjectId, visible: bool) -> Result<(), CanvasError> {
        self.update_object(id, |o| o.visible = visible)
    }

    fn object_changed(&mut self, id: ObjectId) {
        let Some(was) = self.list.sync_tier(id) else {
            return;
        };
        let now = self.list.get(id).map(|o| o.tier);
        if was == Tier::Background || now == Some(Tier::Background) {
            self.background_dirty = true;
        }
        if self.list.tier(Tier::Foreground).is_empty() {
            self.drop_foreground_buffers();
        }
        self.bbox_dirty = true;
    }

    // -------------------------------------------------------------------------
    // Bounding box
    // -------------------------------------------------------------------------

    /// World box of every object. Null when empty, or when the content has
    /// no area.
    pub fn bounding_box(&mut self) -> BBox {
        if self.bbox_dirty {
            self.refresh_bounding_box();
        }
        self.bbox
    }

    fn refresh_bounding_box(&mut self) {
        let bbox = BBox::from_bboxes(
            self.list
                .iter()
                .map(|(_, o)| o.bounding_box())
                .filter(|b| !b.is_null()),
        );
        self.bbox = if bbox.width() == 0.0 || bbox.height() == 0.0 {
            BBox::NULL
        } else {
            bbox
        };
        self.bbox_dirty = false;
    }

    // -------------------------------------------------------------------------
    // View
    // -------------------------------------------------------------------------

    /// Pans by `shift` in `space` units, optionally redrawing.
    pub fn move_image(
        &mut self,
        shift: Vec2,
        space: CoordSpace,
        redraw: bool,
    ) -> Result<(), CanvasError> {
        self.transform.move_by(shift, space);
        self.background_dirty = true;
        if redraw {
            self.draw(false)?;
        }
        Ok(())
    }

    /// Multiplies the scale by `factor` about `anchor` and redraws.
    pub fn zoom(&mut self, factor: f64, anchor: ZoomAnchor) -> Result<(), CanvasError> {
        self.transform.zoom(factor, anchor);
        tracing::debug!(factor, scale = self.transform.scale(), "zoom");
        self.background_dirty = true;
        self.draw(false)
    }

    /// Fits `bbox`, or the content when `None`, into the panel.
    ///
    /// Null content resets the view to scale `1.0` about the origin.
    pub fn zoom_to_bb(&mut self, bbox: Option<BBox>, redraw: bool) -> Result<(), CanvasError> {
        let bbox = match bbox {
            Some(bbox) => bbox,
            None => self.bounding_box(),
        };
        self.transform.zoom_to_bbox(&bbox);
        tracing::debug!(scale = self.transform.scale(), "zoom to bounding box");
        self.background_dirty = true;
        if redraw {
            self.draw(false)?;
        }
        Ok(())
    }

    /// Replaces the projection. The old one stays if `projection` is
    /// invalid at the current centre.
    pub fn set_projection(&mut self, projection: Projection) -> Result<(), CanvasError> {
        self.transform.set_projection(projection)?;
        self.config.projection = projection;
        self.background_dirty = true;
        Ok(())
    }

    /// Bounds the scale; the current scale is clamped immediately.
    pub fn set_scale_limits(&mut self, min_scale: Option<f64>, max_scale: Option<f64>) {
        self.transform.set_scale_limits(min_scale, max_scale);
        (self.config.min_scale, self.config.max_scale) = self.transform.scale_limits();
        self.background_dirty = true;
    }

    // -------------------------------------------------------------------------
    // Drawing
    // -------------------------------------------------------------------------

    /// Redraws the buffers and the screen.
    ///
    /// The background is repainted only when it is dirty or `force` is
    /// set; foreground objects are repainted every time.
    pub fn draw(&mut self, force: bool) -> Result<(), CanvasError> {
        if self.panel_size.width <= 2 || self.panel_size.height <= 2 {
            return Ok(());
        }
        let view = self.transform.clone();
        let viewport = view.viewport_bbox();
        let ctx = PaintCtx {
            view: &view,
            min_hit_line_width: self.config.min_hit_line_width,
        };
        let blit_interval = self.config.blit_interval.max(1);
        let mut stats = DrawStats::default();

        let Buffers {
            background,
            hit,
            foreground,
            foreground_hit,
            screen,
        } = &mut self.buffers;

        if self.background_dirty || force {
            background.clear(self.config.background);
            if let Some(hit) = hit.as_mut() {
                hit.clear(Rgb::BLACK.to_color());
            }
            if let Some(grid) = &self.grid_under {
                grid.draw(background, &view);
            }
            paint_tier(
                &self.list,
                Tier::Background,
                background,
                hit.as_mut(),
                screen,
                &ctx,
                &viewport,
                blit_interval,
                &mut stats,
            );
            self.background_dirty = false;
            stats.background_redrawn = true;
        }

        let finished = if self.list.tier(Tier::Foreground).is_empty() {
            &*background
        } else {
            // Created on the first draw after a foreground object appears.
            let size = background.size();
            if foreground.is_none() {
                *foreground = Some(self.backend.create_surface(size)?);
            }
            if self.use_hit_test && foreground_hit.is_none() {
                *foreground_hit = Some(self.backend.create_hit_surface(size)?);
            }
            let Some(fg) = foreground.as_mut() else {
                return Ok(());
            };
            fg.clear(self.config.background);
            fg.blit_from(background, Vec2::ZERO);
            let mut fg_hit = foreground_hit.as_mut();
            if let Some(fg_hit) = fg_hit.as_deref_mut() {
                fg_hit.clear(Rgb::BLACK.to_color());
                if let Some(hit) = hit.as_ref() {
                    fg_hit.blit_from(hit, Vec2::ZERO);
                }
            }
            paint_tier(
                &self.list,
                Tier::Foreground,
                fg,
                fg_hit,
                screen,
                &ctx,
                &viewport,
                blit_interval,
                &mut stats,
            );
            &*fg
        };

        screen.clear(self.config.background);
        screen.blit_from(finished, Vec2::ZERO);
        if let Some(grid) = &self.grid_over {
            grid.draw(screen, &view);
        }
        tracing::debug!(
            background = stats.background_redrawn,
            painted = stats.painted,
            culled = stats.culled,
            "canvas drawn"
        );
        self.last_draw = stats;

        if let Some(mut mode) = self.mode.take() {
            mode.update_screen(self);
            self.restore_mode(mode);
        }
        Ok(())
    }

    /// Shows the finished buffer shifted by `offset` pixels, with the
    /// uncovered edges in the background colour. Used while panning.
    pub fn present_shifted(&mut self, offset: Vec2) {
        let Buffers {
            background,
            foreground,
            screen,
            ..
        } = &mut self.buffers;
        let finished = match foreground {
            Some(fg) if !self.list.tier(Tier::Foreground).is_empty() => &*fg,
            _ => &*background,
        };
        screen.clear(self.config.background);
        screen.blit_from(finished, offset);
    }

    /// Inverts a rectangle outline on the screen. Drawing the same
    /// rectangle again erases it.
    pub fn xor_on_screen(&mut self, rect: Rect) {
        self.buffers.screen.xor_rectangle(rect);
    }

    /// Installs a grid drawn under every object.
    pub fn set_grid_under(&mut self, grid: Option<Box<dyn Grid>>) {
        self.grid_under = grid;
        self.background_dirty = true;
    }

    /// Installs a grid drawn over every object.
    pub fn set_grid_over(&mut self, grid: Option<Box<dyn Grid>>) {
        self.grid_over = grid;
    }

    /// Writes the background buffer to `path`. The format follows the
    /// file extension.
    pub fn save_as_image(&self, path: impl AsRef<Path>) -> Result<(), CanvasError> {
        let path = path.as_ref();
        let format = ImageFormat::from_path(path)?;
        let bytes = self.buffers.background.encode(format)?;
        std::fs::write(path, bytes).map_err(floatcanvas_surface::SurfaceError::from)?;
        tracing::debug!(path = %path.display(), "saved canvas image");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Hit testing
    // -------------------------------------------------------------------------

    /// Binds `callback` to `kind` on an object, giving the object a hit
    /// colour if it has none yet.
    ///
    /// The first binding on a canvas turns hit testing on and allocates the
    /// hit buffers. Rebinding a kind replaces its callback.
    pub fn bind(
        &mut self,
        id: ObjectId,
        kind: HitEventKind,
        callback: impl FnMut(&mut DrawObject, &HitEvent) + 'static,
    ) -> Result<(), CanvasError> {
        let Some(existing) = self.list.get(id).map(|o| o.hit.color) else {
            tracing::warn!(?id, ?kind, "bind on unknown object");
            return Err(CanvasError::UnknownObject(id));
        };
        if !self.use_hit_test {
            self.make_hit_buffers()?;
            self.use_hit_test = true;
        }
        let rgb = match existing {
            Some(rgb) => rgb,
            None => {
                let backend = &mut self.backend;
                let Some(rgb) = self
                    .hit_colors
                    .next_color(|rgb| backend.reproduces_color(rgb))
                else {
                    tracing::warn!(?id, "no hit colours left");
                    return Err(CanvasError::HitColorsExhausted);
                };
                tracing::trace!(?id, %rgb, "assigned hit colour");
                rgb
            }
        };
        let entry = self
            .list
            .entry_mut(id)
            .ok_or(CanvasError::UnknownObject(id))?;
        entry.object.hit.color = Some(rgb);
        entry.callbacks.insert(kind, Box::new(callback));
        self.hit_index.insert(kind, rgb, id);
        self.background_dirty = true;
        Ok(())
    }

    /// Drops every binding of an object and releases its hit colour.
    pub fn unbind_all(&mut self, id: ObjectId) -> Result<(), CanvasError> {
        let Some(entry) = self.list.entry_mut(id) else {
            tracing::warn!(?id, "unbind on unknown object");
            return Err(CanvasError::UnknownObject(id));
        };
        entry.callbacks.clear();
        if let Some(rgb) = entry.object.hit.color.take() {
            self.release_color(rgb);
        }
        self.hover.forget(id);
        self.background_dirty = true;
        Ok(())
    }

    /// Drops every binding on the canvas and turns hit testing off.
    pub fn unbind_everything(&mut self) {
        for entry in self.list.entries_mut() {
            entry.callbacks.clear();
            entry.object.hit.color = None;
        }
        self.hit_index.clear();
        self.hit_colors.reset();
        self.hover.clear();
        self.use_hit_test = false;
        self.buffers.hit = None;
        self.buffers.foreground_hit = None;
        self.background_dirty = true;
    }

    fn release_color(&mut self, rgb: Rgb) {
        self.hit_index.remove_color(rgb);
        self.hit_colors.release(rgb);
    }

    /// Colour of the hit buffer under `pos`.
    fn hit_color_at(&self, pos: PixelPoint) -> Option<Rgb> {
        self.hit_buffer()?.pixel(pos)
    }

    /// The bound object drawn under `pos`, whatever it is bound to.
    pub fn hit_object_at(&self, pos: PixelPoint) -> Option<ObjectId> {
        if !self.use_hit_test {
            return None;
        }
        self.hit_index.find(self.hit_color_at(pos)?)
    }

    /// Runs the `kind` callback of the object under `pos`, if any, and
    /// redraws. Returns `true` if a callback ran.
    pub fn hit_test(&mut self, pos: PixelPoint, kind: HitEventKind) -> Result<bool, CanvasError> {
        if !self.use_hit_test || self.hit_index.is_empty(kind) {
            return Ok(false);
        }
        let Some(id) = self
            .hit_color_at(pos)
            .and_then(|rgb| self.hit_index.get(kind, rgb))
        else {
            return Ok(false);
        };
        let fired = self.dispatch_hit(id, kind, pos);
        if fired {
            self.draw(false)?;
        }
        Ok(fired)
    }

    /// Tracks the object under the pointer, running leave then enter
    /// callbacks when it changes. Returns `true` if a callback ran.
    pub fn mouse_over_test(&mut self, pos: PixelPoint) -> Result<bool, CanvasError> {
        if !self.use_hit_test || self.hit_index.has_no_hover() {
            return Ok(false);
        }
        let hit = self
            .hit_color_at(pos)
            .and_then(|rgb| self.hit_index.get_hover(rgb));
        let transition = self.hover.update(hit);
        let mut fired = false;
        for event in transition.iter() {
            fired |= match event {
                HoverEvent::Leave(id) => self.dispatch_hit(id, HitEventKind::LeaveObject, pos),
                HoverEvent::Enter(id) => self.dispatch_hit(id, HitEventKind::EnterObject, pos),
            };
        }
        if fired {
            self.draw(false)?;
        }
        Ok(fired)
    }

    fn dispatch_hit(&mut self, id: ObjectId, kind: HitEventKind, pos: PixelPoint) -> bool {
        let event = HitEvent {
            object: id,
            kind,
            pixel: pos,
            world: self.transform.pixel_to_world(pos),
        };
        let Some(entry) = self.list.entry_mut(id) else {
            return false;
        };
        let Some(callback) = entry.callbacks.get_mut(&kind) else {
            return false;
        };
        tracing::trace!(?id, ?kind, x = pos.x, y = pos.y, "hit callback");
        callback(&mut entry.object, &event);
        entry.object.layout(self.backend.metrics());
        self.object_changed(id);
        true
    }

    // -------------------------------------------------------------------------
    // Input
    // -------------------------------------------------------------------------

    /// Name of the active mode.
    pub fn mode_name(&self) -> Option<&'static str> {
        self.mode.as_ref().map(|m| m.name())
    }

    /// Replaces the interaction mode: the old mode is unset and the new
    /// mode's cursor applied.
    pub fn set_mode(&mut self, mode: impl GuiMode<B> + 'static) {
        if let Some(mut old) = self.mode.take() {
            old.unset(self);
        }
        self.cursor = mode.cursor();
        tracing::debug!(mode = mode.name(), "mode set");
        self.mode = Some(Box::new(mode));
    }

    fn restore_mode(&mut self, mut mode: Box<dyn GuiMode<B>>) {
        if self.mode.is_none() {
            self.mode = Some(mode);
        } else {
            // A handler installed a new mode.
            mode.unset(self);
        }
    }

    /// Routes pointer input to the active mode.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> Result<(), CanvasError> {
        use PointerButton::{Left, Middle, Right};

        let Some(mut mode) = self.mode.take() else {
            return Ok(());
        };
        let result = match event.kind {
            PointerKind::Down(Left) => mode.on_left_down(self, event),
            PointerKind::Up(Left) => mode.on_left_up(self, event),
            PointerKind::DoubleClick(Left) => mode.on_left_double(self, event),
            PointerKind::Down(Middle) => mode.on_middle_down(self, event),
            PointerKind::Up(Middle) => mode.on_middle_up(self, event),
            PointerKind::DoubleClick(Middle) => mode.on_middle_double(self, event),
            PointerKind::Down(Right) => mode.on_right_down(self, event),
            PointerKind::Up(Right) => mode.on_right_up(self, event),
            PointerKind::DoubleClick(Right) => mode.on_right_double(self, event),
            PointerKind::Move => mode.on_move(self, event),
            PointerKind::Wheel(_) => mode.on_wheel(self, event),
        };
        self.restore_mode(mode);
        result
    }

    /// Routes a key to the active mode, then raises it for the host.
    pub fn handle_key(&mut self, event: &KeyEvent, state: KeyState) -> Result<(), CanvasError> {
        let result = match self.mode.take() {
            Some(mut mode) => {
                let result = match state {
                    KeyState::Down => mode.on_key_down(self, event),
                    KeyState::Up => mode.on_key_up(self, event),
                };
                self.restore_mode(mode);
                result
            }
            None => Ok(()),
        };
        self.events.push_back(match state {
            KeyState::Down => CanvasEvent::KeyDown(event.clone()),
            KeyState::Up => CanvasEvent::KeyUp(event.clone()),
        });
        result
    }

    /// Queues a pointer event for the host, with its world position.
    pub fn raise_pointer(&mut self, event: &PointerEvent) {
        self.events.push_back(CanvasEvent::Pointer {
            kind: event.kind,
            pixel: event.pos,
            world: self.transform.pixel_to_world(event.pos),
        });
    }

    /// Takes every raised event, oldest first.
    pub fn take_events(&mut self) -> Vec<CanvasEvent> {
        self.events.drain(..).collect()
    }

    // -------------------------------------------------------------------------
    // Deferred work
    // -------------------------------------------------------------------------

    /// The panel was resized. Coordinates follow at once; the buffers are
    /// rebuilt by [`Canvas::tick`] once the resize settles.
    pub fn on_size(&mut self, size: PixelSize) {
        self.panel_size = size;
        self.transform.set_panel_size(size);
        self.resize_due = Some(Instant::now() + self.config.resize_debounce);
        tracing::trace!(width = size.width, height = size.height, "resize");
    }

    /// Requests a draw `delay` from now, replacing any pending request.
    pub fn schedule_redraw(&mut self, delay: Duration) {
        self.redraw_due = Some(Instant::now() + delay);
    }

    /// Earliest time [`Canvas::tick`] has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.resize_due, self.redraw_due) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Runs deferred work that is due at `now`.
    pub fn tick(&mut self, now: Instant) -> Result<(), CanvasError> {
        if self.resize_due.is_some_and(|due| due <= now) {
            self.resize_due = None;
            self.make_new_buffers()?;
            self.draw(false)?;
        }
        if self.redraw_due.is_some_and(|due| due <= now) {
            self.redraw_due = None;
            self.draw(false)?;
        }
        Ok(())
    }
}

/// Paints the visible objects of `tier` that overlap the viewport, and
/// their hit shapes when a hit buffer is given. The screen gets a partial
/// copy every `blit_interval` objects.
fn paint_tier<S: Surface>(
    list: &DrawList,
    tier: Tier,
    visual: &mut S,
    mut hit: Option<&mut S>,
    screen: &mut S,
    ctx: &PaintCtx<'_>,
    viewport: &BBox,
    blit_interval: usize,
    stats: &mut DrawStats,
) {
    let mut painted = 0;
    for &id in list.tier(tier) {
        let Some(object) = list.get(id) else {
            continue;
        };
        if !object.visible {
            continue;
        }
        if !object.bounding_box().overlaps(viewport) {
            stats.culled += 1;
            continue;
        }
        object.paint(visual, ctx, Pass::Visual);
        if let (Some(hit), Some(rgb)) = (hit.as_deref_mut(), object.hit.color) {
            object.paint(hit, ctx, Pass::Hit(rgb));
        }
        painted += 1;
        if painted % blit_interval == 0 {
            screen.blit_from(visual, Vec2::ZERO);
        }
    }
    stats.painted += painted;
}
