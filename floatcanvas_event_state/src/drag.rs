// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag state helper for pan, zoom‑box, and rubber‑band gestures.
//!
//! ## Usage
//!
//! 1) Call [`DragState::start`] on button press with the pointer position.
//! 2) On each move, call [`DragState::update`] for the delta since the last
//!    move, or [`DragState::total_offset`] for the offset from the start.
//! 3) Use [`DragState::rect_to`] for the rectangle swept so far, and
//!    [`DragState::exceeds`] to ignore gestures that barely moved.
//! 4) Call [`DragState::end`] on release.
//!
//! Positions are in device pixels. The state never converts to world space;
//! that is the caller's transform's job.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `abs`
use kurbo::{Point, Rect, Vec2};

/// Tracks one press‑drag‑release gesture.
#[derive(Debug, Clone, Default, Copy)]
pub struct DragState {
    /// Position where the gesture started.
    pub start_pos: Option<Point>,
    /// Last position seen by [`DragState::update`].
    pub last_pos: Option<Point>,
}

impl DragState {
    /// Starts tracking a gesture at `pos`.
    pub fn start(&mut self, pos: Point) {
        self.start_pos = Some(pos);
        self.last_pos = Some(pos);
    }

    /// Records a move, returning the delta since the previous one.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        self.start_pos?;
        let last = self.last_pos.replace(pos)?;
        Some(pos - last)
    }

    /// Offset from the start position to `current`.
    pub fn total_offset(&self, current: Point) -> Option<Vec2> {
        self.start_pos.map(|start| current - start)
    }

    /// Normalized rectangle between the start position and `current`.
    pub fn rect_to(&self, current: Point) -> Option<Rect> {
        self.start_pos.map(|start| Rect::from_points(start, current))
    }

    /// Returns `true` if `current` is more than `tolerance` pixels from the
    /// start on **both** axes.
    pub fn exceeds(&self, current: Point, tolerance: f64) -> bool {
        self.total_offset(current)
            .is_some_and(|d| d.x.abs() > tolerance && d.y.abs() > tolerance)
    }

    /// Moves the reference start to the last seen position.
    ///
    /// Used after the screen has been repainted mid‑drag, so that later total
    /// offsets are measured from what is now on screen.
    pub fn rebase(&mut self) {
        if self.start_pos.is_some() {
            self.start_pos = self.last_pos;
        }
    }

    /// Ends the gesture and clears state.
    pub fn end(&mut self) {
        self.start_pos = None;
        self.last_pos = None;
    }

    /// Returns `true` while a gesture is active.
    pub fn is_dragging(&self) -> bool {
        self.start_pos.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_state_reports_nothing() {
        let mut drag = DragState::default();
        assert!(!drag.is_dragging());
        assert_eq!(drag.update(Point::new(1.0, 1.0)), None);
        assert_eq!(drag.total_offset(Point::new(1.0, 1.0)), None);
        assert_eq!(drag.rect_to(Point::new(1.0, 1.0)), None);
        assert!(!drag.exceeds(Point::new(100.0, 100.0), 1.0));
    }

    #[test]
    fn update_returns_incremental_deltas() {
        let mut drag = DragState::default();
        drag.start(Point::new(10.0, 20.0));
        assert_eq!(drag.update(Point::new(15.0, 25.0)), Some(Vec2::new(5.0, 5.0)));
        assert_eq!(drag.update(Point::new(14.0, 30.0)), Some(Vec2::new(-1.0, 5.0)));
        assert_eq!(
            drag.total_offset(Point::new(14.0, 30.0)),
            Some(Vec2::new(4.0, 10.0))
        );
    }

    #[test]
    fn update_without_last_position_only_records() {
        let mut drag = DragState {
            start_pos: Some(Point::new(10.0, 20.0)),
            last_pos: None,
        };
        assert_eq!(drag.update(Point::new(11.0, 21.0)), None);
        assert_eq!(drag.last_pos, Some(Point::new(11.0, 21.0)));
    }

    #[test]
    fn exceeds_needs_both_axes() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0));
        assert!(!drag.exceeds(Point::new(50.0, 3.0), 10.0));
        assert!(!drag.exceeds(Point::new(10.0, 50.0), 10.0));
        assert!(drag.exceeds(Point::new(-11.0, 11.0), 10.0));
    }

    #[test]
    fn rebase_moves_start_to_last_seen() {
        let mut drag = DragState::default();
        drag.start(Point::new(0.0, 0.0));
        drag.update(Point::new(8.0, 3.0));
        drag.rebase();
        assert_eq!(drag.start_pos, Some(Point::new(8.0, 3.0)));
        assert_eq!(drag.total_offset(Point::new(10.0, 3.0)), Some(Vec2::new(2.0, 0.0)));
    }

    #[test]
    fn end_resets() {
        let mut drag = DragState::default();
        drag.start(Point::new(1.0, 1.0));
        drag.end();
        assert!(!drag.is_dragging());
        assert!(drag.last_pos.is_none());
    }
}
