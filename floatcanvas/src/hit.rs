// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Colour-keyed hit testing.
//!
//! Every object bound to a hit event is painted a second time into an
//! off-screen hit buffer, in a colour unique to that object. Hit testing is
//! then a single pixel read followed by a lookup in the [`HitIndex`].

use floatcanvas_surface::Rgb;
use floatcanvas_view::PixelPoint;
use hashbrown::HashMap;
use kurbo::Point;

use crate::events::PointerButton;
use crate::{DrawObject, ObjectId};

/// Number of distinct 24-bit colours.
const COLOR_SPACE: u32 = 1 << 24;

/// Events an object can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HitEventKind {
    /// Left button pressed over the object.
    LeftDown,
    /// Left button released over the object.
    LeftUp,
    /// Left button double-clicked over the object.
    LeftDoubleClick,
    /// Middle button pressed over the object.
    MiddleDown,
    /// Middle button released over the object.
    MiddleUp,
    /// Middle button double-clicked over the object.
    MiddleDoubleClick,
    /// Right button pressed over the object.
    RightDown,
    /// Right button released over the object.
    RightUp,
    /// Right button double-clicked over the object.
    RightDoubleClick,
    /// The pointer moved onto the object.
    EnterObject,
    /// The pointer moved off the object.
    LeaveObject,
}

impl HitEventKind {
    /// Every kind, in index order.
    pub const ALL: [Self; 11] = [
        Self::LeftDown,
        Self::LeftUp,
        Self::LeftDoubleClick,
        Self::MiddleDown,
        Self::MiddleUp,
        Self::MiddleDoubleClick,
        Self::RightDown,
        Self::RightUp,
        Self::RightDoubleClick,
        Self::EnterObject,
        Self::LeaveObject,
    ];

    pub(crate) const fn index(self) -> usize {
        self as usize
    }

    /// The press event of `button`.
    pub fn down(button: PointerButton) -> Self {
        match button {
            PointerButton::Left => Self::LeftDown,
            PointerButton::Middle => Self::MiddleDown,
            PointerButton::Right => Self::RightDown,
        }
    }

    /// The release event of `button`.
    pub fn up(button: PointerButton) -> Self {
        match button {
            PointerButton::Left => Self::LeftUp,
            PointerButton::Middle => Self::MiddleUp,
            PointerButton::Right => Self::RightUp,
        }
    }

    /// The double-click event of `button`.
    pub fn double_click(button: PointerButton) -> Self {
        match button {
            PointerButton::Left => Self::LeftDoubleClick,
            PointerButton::Middle => Self::MiddleDoubleClick,
            PointerButton::Right => Self::RightDoubleClick,
        }
    }

    /// `true` for enter and leave, which are driven by motion.
    pub fn is_hover(self) -> bool {
        matches!(self, Self::EnterObject | Self::LeaveObject)
    }
}

/// What a hit callback is told.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitEvent {
    /// The object that was hit.
    pub object: ObjectId,
    /// The event it was hit with.
    pub kind: HitEventKind,
    /// Pointer position in panel pixels.
    pub pixel: PixelPoint,
    /// Pointer position in world units.
    pub world: Point,
}

/// A callback bound to an object and event.
///
/// It may mutate the object; the canvas re-measures it and redraws
/// afterwards.
pub type HitCallback = Box<dyn FnMut(&mut DrawObject, &HitEvent)>;

/// Hands out unique hit colours.
///
/// Colours are walked as a packed `0xRRGGBB` cursor with blue fastest,
/// starting after black (the clear colour of hit buffers). Released
/// colours are reused only once the cursor runs off the end, so a stale
/// hit buffer never names a freshly bound object.
#[derive(Clone, Debug)]
pub struct HitColorGenerator {
    cursor: u32,
    released: Vec<Rgb>,
}

impl Default for HitColorGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl HitColorGenerator {
    /// A generator whose next colour is `(0, 0, 1)`.
    pub fn new() -> Self {
        Self {
            cursor: 1,
            released: Vec::new(),
        }
    }

    #[cfg(test)]
    fn starting_at(cursor: u32) -> Self {
        Self {
            cursor,
            released: Vec::new(),
        }
    }

    /// Returns the next colour `accept` agrees to, or `None` when every
    /// colour is in use.
    ///
    /// `accept` is normally the backend's round-trip probe; colours it
    /// rejects are skipped for good.
    pub fn next_color(&mut self, mut accept: impl FnMut(Rgb) -> bool) -> Option<Rgb> {
        while self.cursor < COLOR_SPACE {
            let rgb = unpack(self.cursor);
            self.cursor += 1;
            if accept(rgb) {
                return Some(rgb);
            }
            tracing::trace!(%rgb, "hit colour does not round-trip, skipped");
        }
        self.released.pop()
    }

    /// Returns a colour to the pool.
    pub fn release(&mut self, rgb: Rgb) {
        self.released.push(rgb);
    }

    /// Forgets every colour handed out.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "each component is masked to eight bits"
)]
fn unpack(packed: u32) -> Rgb {
    Rgb::new(
        (packed >> 16 & 0xff) as u8,
        (packed >> 8 & 0xff) as u8,
        (packed & 0xff) as u8,
    )
}

/// Hit colour to object lookup, one table per event kind.
#[derive(Clone, Debug)]
pub struct HitIndex {
    maps: [HashMap<Rgb, ObjectId>; HitEventKind::ALL.len()],
}

impl Default for HitIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl HitIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self {
            maps: core::array::from_fn(|_| HashMap::new()),
        }
    }

    /// Binds `rgb` to `id` for `kind`.
    pub fn insert(&mut self, kind: HitEventKind, rgb: Rgb, id: ObjectId) {
        self.maps[kind.index()].insert(rgb, id);
    }

    /// The object painted in `rgb`, if it is bound to `kind`.
    pub fn get(&self, kind: HitEventKind, rgb: Rgb) -> Option<ObjectId> {
        self.maps[kind.index()].get(&rgb).copied()
    }

    /// The object painted in `rgb` if it is bound to either hover event.
    pub fn get_hover(&self, rgb: Rgb) -> Option<ObjectId> {
        self.get(HitEventKind::EnterObject, rgb)
            .or_else(|| self.get(HitEventKind::LeaveObject, rgb))
    }

    /// The object painted in `rgb`, whatever it is bound to.
    pub fn find(&self, rgb: Rgb) -> Option<ObjectId> {
        self.maps.iter().find_map(|map| map.get(&rgb).copied())
    }

    /// Removes `rgb` from every table.
    pub fn remove_color(&mut self, rgb: Rgb) {
        for map in &mut self.maps {
            map.remove(&rgb);
        }
    }

    /// `true` if nothing is bound to `kind`.
    pub fn is_empty(&self, kind: HitEventKind) -> bool {
        self.maps[kind.index()].is_empty()
    }

    /// `true` if nothing is bound to either hover event.
    pub fn has_no_hover(&self) -> bool {
        self.is_empty(HitEventKind::EnterObject) && self.is_empty(HitEventKind::LeaveObject)
    }

    /// Empties every table.
    pub fn clear(&mut self) {
        for map in &mut self.maps {
            map.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_colours_skip_black_and_step_blue() {
        let mut colors = HitColorGenerator::new();
        assert_eq!(colors.next_color(|_| true), Some(Rgb::new(0, 0, 1)));
        assert_eq!(colors.next_color(|_| true), Some(Rgb::new(0, 0, 2)));
        let mut late = HitColorGenerator::starting_at(0xff);
        assert_eq!(late.next_color(|_| true), Some(Rgb::new(0, 0, 255)));
        assert_eq!(late.next_color(|_| true), Some(Rgb::new(0, 1, 0)));
    }

    #[test]
    fn rejected_colours_are_skipped() {
        let mut colors = HitColorGenerator::new();
        let got = colors.next_color(|rgb| rgb.b % 2 == 0);
        assert_eq!(got, Some(Rgb::new(0, 0, 2)));
    }

    #[test]
    fn released_colours_return_after_the_cursor_runs_out() {
        let mut colors = HitColorGenerator::starting_at(COLOR_SPACE - 1);
        let last = colors.next_color(|_| true);
        assert_eq!(last, Some(Rgb::new(255, 255, 255)));
        assert_eq!(colors.next_color(|_| true), None);
        colors.release(Rgb::new(0, 0, 7));
        assert_eq!(colors.next_color(|_| true), Some(Rgb::new(0, 0, 7)));
        assert_eq!(colors.next_color(|_| true), None);
        colors.reset();
        assert_eq!(colors.next_color(|_| true), Some(Rgb::new(0, 0, 1)));
    }

    #[test]
    fn index_keeps_kinds_apart() {
        let mut index = HitIndex::new();
        let id = ObjectId::new(0, 1);
        let rgb = Rgb::new(0, 0, 3);
        index.insert(HitEventKind::LeftDown, rgb, id);
        assert_eq!(index.get(HitEventKind::LeftDown, rgb), Some(id));
        assert_eq!(index.get(HitEventKind::RightDown, rgb), None);
        assert!(index.has_no_hover());
        index.insert(HitEventKind::LeaveObject, rgb, id);
        assert_eq!(index.get_hover(rgb), Some(id));
        index.remove_color(rgb);
        assert!(index.is_empty(HitEventKind::LeftDown));
        assert!(index.has_no_hover());
    }

    #[test]
    fn button_kinds_map_by_button() {
        assert_eq!(
            HitEventKind::down(PointerButton::Middle),
            HitEventKind::MiddleDown
        );
        assert_eq!(HitEventKind::up(PointerButton::Right), HitEventKind::RightUp);
        assert!(HitEventKind::EnterObject.is_hover());
        for (i, kind) in HitEventKind::ALL.iter().enumerate() {
            assert_eq!(kind.index(), i);
        }
    }
}
