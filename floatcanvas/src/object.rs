// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use floatcanvas_surface::{Brush, FillStyle, LineStyle, Pen, Raster, Rgb, Surface, TextMeasure};
use floatcanvas_view::BBox;
use kurbo::{Point, Vec2};
use peniko::Color;

use crate::paint::{Look, PaintCtx, Pass};
use crate::shapes::{
    Arrow, ArrowLine, Bitmap, PieChart, PointSet, ScaledBitmap, ScaledText, ScaledTextBox, Shape,
    Text,
};

/// Z-order tier of an object.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Drawn into the cached background buffer.
    #[default]
    Background,
    /// Redrawn on every draw, on top of the background.
    Foreground,
}

/// Outline and fill of an object's visual pass.
///
/// `None` colours paint nothing.
#[derive(Clone, Debug, PartialEq)]
pub struct PaintStyle {
    /// Outline colour.
    pub line_color: Option<Color>,
    /// Outline width in pixels.
    pub line_width: f64,
    /// Outline dash pattern.
    pub line_style: LineStyle,
    /// Fill colour.
    pub fill_color: Option<Color>,
    /// Fill pattern.
    pub fill_style: FillStyle,
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self {
            line_color: Some(Color::BLACK),
            line_width: 1.0,
            line_style: LineStyle::Solid,
            fill_color: None,
            fill_style: FillStyle::Solid,
        }
    }
}

impl PaintStyle {
    /// A single colour used for both outline and fill, one pixel wide.
    pub fn color_only(color: Color) -> Self {
        Self {
            line_color: Some(color),
            fill_color: Some(color),
            ..Self::default()
        }
    }

    /// The outline pen.
    pub fn pen(&self) -> Pen {
        match self.line_color {
            Some(color) if self.line_style != LineStyle::Transparent => {
                Pen::new(color, self.line_width).with_style(self.line_style)
            }
            _ => Pen::transparent(),
        }
    }

    /// The fill brush.
    pub fn brush(&self) -> Brush {
        match self.fill_color {
            Some(color) if self.fill_style != FillStyle::Transparent => {
                Brush::solid(color).with_style(self.fill_style)
            }
            _ => Brush::transparent(),
        }
    }
}

/// How an object paints itself into the hit-test buffer.
#[derive(Clone, Debug, PartialEq)]
pub struct HitStyle {
    pub(crate) color: Option<Rgb>,
    /// Pen width of the hit pass. `None` derives it from the shape: the
    /// visual width raised to the canvas minimum.
    pub line_width: Option<f64>,
    /// Paint the outline in the hit pass.
    pub hit_line: bool,
    /// Paint the fill in the hit pass.
    pub hit_fill: bool,
}

impl Default for HitStyle {
    fn default() -> Self {
        Self {
            color: None,
            line_width: None,
            hit_line: true,
            hit_fill: true,
        }
    }
}

impl HitStyle {
    /// The hit colour, once the object has been bound on a canvas.
    pub fn color(&self) -> Option<Rgb> {
        self.color
    }
}

/// What happens when zooming out makes a shape tiny.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SizePolicy {
    /// Smallest pixel extent a shape is drawn at. Text uses it as the
    /// smallest font size.
    pub min_pixels: f64,
    /// Skip drawing entirely at or below `min_pixels`, instead of clamping.
    pub disappear_when_small: bool,
}

impl Default for SizePolicy {
    fn default() -> Self {
        Self {
            min_pixels: 1.0,
            disappear_when_small: true,
        }
    }
}

/// An object on a canvas: geometry in world coordinates plus everything
/// needed to paint and pick it.
///
/// ```rust
/// use floatcanvas::DrawObject;
/// use kurbo::{Point, Vec2};
/// use peniko::Color;
///
/// let rect = DrawObject::rectangle(Point::new(0.0, 0.0), Vec2::new(10.0, 5.0))
///     .with_fill(Color::from_rgb8(255, 0, 0))
///     .with_line_width(2.0);
/// let bb = rect.bounding_box();
/// assert_eq!(bb.width(), 10.0);
/// assert_eq!(bb.height(), 5.0);
/// ```
#[derive(Clone, Debug)]
pub struct DrawObject {
    /// Geometry.
    pub shape: Shape,
    /// Visual paint attributes.
    pub style: PaintStyle,
    /// Z-order tier.
    pub tier: Tier,
    /// Hidden objects are neither painted nor hit.
    pub visible: bool,
    /// Hit-pass attributes.
    pub hit: HitStyle,
    /// Degenerate-size handling.
    pub size_policy: SizePolicy,
}

impl DrawObject {
    /// Wraps a shape with the default style of its kind: point marks are a
    /// single black colour, arrows have a two pixel line, pie charts have no
    /// outline, everything else a one pixel black outline and no fill.
    pub fn new(shape: Shape) -> Self {
        let style = match &shape {
            Shape::Point { .. } | Shape::SquarePoint { .. } | Shape::PointSet(_) => {
                PaintStyle::color_only(Color::BLACK)
            }
            Shape::Arrow(_) => PaintStyle {
                line_width: 2.0,
                ..PaintStyle::default()
            },
            Shape::PieChart(_) => PaintStyle {
                line_color: None,
                ..PaintStyle::default()
            },
            _ => PaintStyle::default(),
        };
        Self {
            shape,
            style,
            tier: Tier::Background,
            visible: true,
            hit: HitStyle::default(),
            size_policy: SizePolicy::default(),
        }
    }

    /// A round dot of fixed pixel `diameter`.
    pub fn point(xy: Point, diameter: f64) -> Self {
        Self::new(Shape::Point { xy, diameter })
    }

    /// A square dot of fixed pixel `size`.
    pub fn square_point(xy: Point, size: f64) -> Self {
        Self::new(Shape::SquarePoint { xy, size })
    }

    /// Many same-sized dots picked as one object.
    pub fn point_set(points: Vec<Point>, diameter: f64) -> Self {
        Self::new(Shape::PointSet(PointSet::new(points, diameter)))
    }

    /// An open polyline.
    pub fn line(points: Vec<Point>) -> Self {
        Self::new(Shape::Line(points))
    }

    /// A quadratic B-spline through control points.
    pub fn spline(points: Vec<Point>) -> Self {
        Self::new(Shape::Spline(points))
    }

    /// A closed, fillable polygon.
    pub fn polygon(points: Vec<Point>) -> Self {
        Self::new(Shape::Polygon(points))
    }

    /// A fixed pixel-length arrow pointing from `xy`; `direction` is in
    /// degrees clockwise from straight up.
    pub fn arrow(xy: Point, length: f64, direction: f64) -> Self {
        Self::new(Shape::Arrow(Arrow::new(xy, length, direction)))
    }

    /// A polyline with an arrow head at the end of every segment.
    pub fn arrow_line(points: Vec<Point>) -> Self {
        Self::new(Shape::ArrowLine(ArrowLine::new(points)))
    }

    /// An axis-aligned rectangle from corner `xy` spanning `wh`.
    pub fn rectangle(xy: Point, wh: Vec2) -> Self {
        Self::new(Shape::Rectangle { xy, wh })
    }

    /// The ellipse inscribed in the rectangle from `xy` spanning `wh`.
    pub fn ellipse(xy: Point, wh: Vec2) -> Self {
        Self::new(Shape::Ellipse { xy, wh })
    }

    /// A circle of world `diameter` around `xy`.
    pub fn circle(xy: Point, diameter: f64) -> Self {
        Self::new(Shape::Circle { xy, diameter })
    }

    /// A circular arc counter-clockwise from `start` to `end` around `center`.
    pub fn arc(start: Point, end: Point, center: Point) -> Self {
        Self::new(Shape::Arc { start, end, center })
    }

    /// Fixed pixel-size text.
    pub fn text(text: impl Into<String>, xy: Point) -> Self {
        Self::new(Shape::Text(Text::new(text, xy)))
    }

    /// Text whose size is in world units.
    pub fn scaled_text(text: impl Into<String>, xy: Point, size: f64) -> Self {
        Self::new(Shape::ScaledText(ScaledText::new(text, xy, size)))
    }

    /// A box of wrapped, world-sized text.
    pub fn scaled_text_box(text: impl Into<String>, xy: Point, size: f64) -> Self {
        Self::new(Shape::ScaledTextBox(ScaledTextBox::new(text, xy, size)))
    }

    /// An image at its native pixel size.
    pub fn bitmap(raster: Raster, xy: Point) -> Self {
        Self::new(Shape::Bitmap(Bitmap::new(raster, xy)))
    }

    /// An image whose height is in world units.
    pub fn scaled_bitmap(raster: Raster, xy: Point, height: f64) -> Self {
        Self::new(Shape::ScaledBitmap(ScaledBitmap::new(raster, xy, height)))
    }

    /// A pie chart of `values` around `xy`.
    pub fn pie_chart(xy: Point, diameter: f64, values: Vec<f64>) -> Self {
        Self::new(Shape::PieChart(PieChart::new(xy, diameter, values)))
    }

    /// Objects that move, hide and hit-test as one.
    pub fn group(children: Vec<Self>) -> Self {
        Self::new(Shape::Group(children))
    }

    /// Moves the object to the foreground tier.
    #[must_use]
    pub fn in_foreground(mut self) -> Self {
        self.tier = Tier::Foreground;
        self
    }

    /// Starts hidden.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Sets the single colour of point marks and text, or the outline of
    /// anything else.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.set_color(color);
        self
    }

    /// Sets the outline colour and width.
    #[must_use]
    pub fn with_line(mut self, color: Color, width: f64) -> Self {
        self.set_line_color(Some(color));
        self.set_line_width(width);
        self
    }

    /// Removes the outline.
    #[must_use]
    pub fn without_line(mut self) -> Self {
        self.set_line_color(None);
        self
    }

    /// Sets the outline width.
    #[must_use]
    pub fn with_line_width(mut self, width: f64) -> Self {
        self.set_line_width(width);
        self
    }

    /// Sets the outline dash pattern.
    #[must_use]
    pub fn with_line_style(mut self, style: LineStyle) -> Self {
        self.set_line_style(style);
        self
    }

    /// Sets the fill colour.
    #[must_use]
    pub fn with_fill(mut self, color: Color) -> Self {
        self.set_fill_color(Some(color));
        self
    }

    /// Sets the fill pattern.
    #[must_use]
    pub fn with_fill_style(mut self, style: FillStyle) -> Self {
        self.set_fill_style(style);
        self
    }

    /// Overrides the hit-pass pen width.
    #[must_use]
    pub fn with_hit_line_width(mut self, width: f64) -> Self {
        self.hit.line_width = Some(width);
        self
    }

    /// Chooses which parts are painted in the hit pass.
    #[must_use]
    pub fn with_hit_parts(mut self, line: bool, fill: bool) -> Self {
        self.hit.hit_line = line;
        self.hit.hit_fill = fill;
        self
    }

    /// Sets the degenerate-size policy.
    #[must_use]
    pub fn with_size_policy(mut self, policy: SizePolicy) -> Self {
        self.size_policy = policy;
        self
    }

    /// Sets the colour. Point marks and groups apply it to outline and fill,
    /// text to its glyphs, other shapes to the outline.
    pub fn set_color(&mut self, color: Color) {
        match &mut self.shape {
            Shape::Point { .. } | Shape::SquarePoint { .. } | Shape::PointSet(_) => {
                self.style.line_color = Some(color);
                self.style.fill_color = Some(color);
            }
            Shape::Text(t) => t.color = color,
            Shape::ScaledText(t) => t.color = color,
            Shape::ScaledTextBox(t) => t.color = color,
            Shape::Group(children) => children.iter_mut().for_each(|c| c.set_color(color)),
            _ => self.style.line_color = Some(color),
        }
    }

    /// Sets the outline colour; groups apply it to every child.
    pub fn set_line_color(&mut self, color: Option<Color>) {
        if let Shape::Group(children) = &mut self.shape {
            children.iter_mut().for_each(|c| c.set_line_color(color));
        }
        self.style.line_color = color;
    }

    /// Sets the outline width; groups apply it to every child.
    pub fn set_line_width(&mut self, width: f64) {
        if let Shape::Group(children) = &mut self.shape {
            children.iter_mut().for_each(|c| c.set_line_width(width));
        }
        self.style.line_width = width;
    }

    /// Sets the outline dash pattern; groups apply it to every child.
    pub fn set_line_style(&mut self, style: LineStyle) {
        if let Shape::Group(children) = &mut self.shape {
            children.iter_mut().for_each(|c| c.set_line_style(style));
        }
        self.style.line_style = style;
    }

    /// Sets the fill colour; groups apply it to every child.
    pub fn set_fill_color(&mut self, color: Option<Color>) {
        if let Shape::Group(children) = &mut self.shape {
            children.iter_mut().for_each(|c| c.set_fill_color(color));
        }
        self.style.fill_color = color;
    }

    /// Sets the fill pattern; groups apply it to every child.
    pub fn set_fill_style(&mut self, style: FillStyle) {
        if let Shape::Group(children) = &mut self.shape {
            children.iter_mut().for_each(|c| c.set_fill_style(style));
        }
        self.style.fill_style = style;
    }

    /// World-space bounding box.
    pub fn bounding_box(&self) -> BBox {
        self.shape.bounding_box()
    }

    /// Moves the geometry by `delta` world units.
    pub fn translate(&mut self, delta: Vec2) {
        self.shape.translate(delta);
    }

    /// Recomputes measured text layout. Canvases call this whenever the
    /// object is added or updated.
    pub fn layout(&mut self, metrics: &dyn TextMeasure) {
        self.shape.layout(metrics);
    }

    /// Pen width of the hit pass.
    pub fn hit_line_width(&self, min_width: f64) -> f64 {
        if let Some(width) = self.hit.line_width {
            return width;
        }
        match &self.shape {
            Shape::Point { .. } | Shape::SquarePoint { .. } => min_width,
            Shape::PointSet(set) => min_width.min(set.diameter),
            _ => self.style.line_width.max(min_width),
        }
    }

    pub(crate) fn visual_look(&self) -> Look {
        Look {
            pen: self.style.pen(),
            brush: self.style.brush(),
            hit: false,
        }
    }

    fn hit_look(&self, rgb: Rgb, min_width: f64) -> Look {
        let color = rgb.to_color();
        Look {
            pen: if self.hit.hit_line {
                Pen::new(color, self.hit_line_width(min_width))
            } else {
                Pen::transparent()
            },
            brush: if self.hit.hit_fill {
                Brush::solid(color)
            } else {
                Brush::transparent()
            },
            hit: true,
        }
    }

    pub(crate) fn paint<S: Surface>(&self, surface: &mut S, ctx: &PaintCtx<'_>, pass: Pass) {
        if !self.visible {
            return;
        }
        let look = match pass {
            Pass::Visual => self.visual_look(),
            Pass::Hit(rgb) => self.hit_look(rgb, ctx.min_hit_line_width),
        };
        self.paint_with(surface, ctx, &look);
    }

    pub(crate) fn paint_with<S: Surface>(&self, surface: &mut S, ctx: &PaintCtx<'_>, look: &Look) {
        self.shape.paint(surface, ctx, look, &self.size_policy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_styles_follow_kind() {
        let dot = DrawObject::point(Point::ORIGIN, 3.0);
        assert_eq!(dot.style.fill_color, Some(Color::BLACK));
        let arrow = DrawObject::arrow(Point::ORIGIN, 20.0, 0.0);
        assert_eq!(arrow.style.line_width, 2.0);
        let rect = DrawObject::rectangle(Point::ORIGIN, Vec2::new(1.0, 1.0));
        assert_eq!(rect.style.fill_color, None);
        assert!(!rect.style.brush().is_visible());
        assert!(rect.style.pen().is_visible());
    }

    #[test]
    fn hit_width_rules() {
        let thin = DrawObject::line(vec![Point::ORIGIN, Point::new(1.0, 1.0)]);
        assert_eq!(thin.hit_line_width(3.0), 3.0);
        let thick = thin.clone().with_line_width(7.0);
        assert_eq!(thick.hit_line_width(3.0), 7.0);
        let set = DrawObject::point_set(vec![Point::ORIGIN], 2.0).with_line_width(9.0);
        assert_eq!(set.hit_line_width(3.0), 2.0);
        let dot = DrawObject::point(Point::ORIGIN, 10.0).with_line_width(9.0);
        assert_eq!(dot.hit_line_width(3.0), 3.0);
        assert_eq!(dot.with_hit_line_width(5.0).hit_line_width(3.0), 5.0);
    }

    #[test]
    fn hit_parts_can_be_switched_off() {
        let obj = DrawObject::polygon(vec![Point::ORIGIN]).with_hit_parts(false, true);
        let look = obj.hit_look(Rgb::new(0, 0, 9), 3.0);
        assert!(!look.pen.is_visible());
        assert!(look.brush.is_visible());
        assert!(look.hit);
    }

    #[test]
    fn group_setters_reach_children() {
        let mut group = DrawObject::group(vec![
            DrawObject::rectangle(Point::ORIGIN, Vec2::new(1.0, 1.0)),
            DrawObject::point(Point::ORIGIN, 1.0),
        ]);
        let red = Color::from_rgb8(255, 0, 0);
        group.set_color(red);
        group.set_fill_color(Some(red));
        let Shape::Group(children) = &group.shape else {
            panic!("group shape");
        };
        assert_eq!(children[0].style.line_color, Some(red));
        assert_eq!(children[0].style.fill_color, Some(red));
        assert_eq!(children[1].style.fill_color, Some(red));
    }

    #[test]
    fn transparent_line_style_hides_pen() {
        let obj = DrawObject::line(vec![]).with_line_style(LineStyle::Transparent);
        assert!(!obj.style.pen().is_visible());
    }
}
