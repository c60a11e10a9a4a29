// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state helper: turn successive hit results into enter/leave events.
//!
//! A canvas hit‑tests the pointer on every motion event and passes the
//! result (an object handle, or `None`) to [`HoverState::update`]. The state
//! remembers the previous answer and reports:
//!
//! - nothing, when the object under the pointer is unchanged,
//! - `Leave(old)` then `Enter(new)`, when it changed between two objects,
//! - only `Enter(new)` or only `Leave(old)` when moving on or off objects.
//!
//! Each transition therefore fires exactly once.

/// A hover transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HoverEvent<K> {
    /// The pointer moved onto this object.
    Enter(K),
    /// The pointer moved off this object.
    Leave(K),
}

/// Up to two transitions produced by one update.
///
/// When both are present, the leave fires before the enter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HoverTransition<K> {
    /// Object the pointer moved off.
    pub leave: Option<K>,
    /// Object the pointer moved onto.
    pub enter: Option<K>,
}

impl<K: Copy> HoverTransition<K> {
    /// Returns `true` if nothing changed.
    pub fn is_empty(&self) -> bool {
        self.leave.is_none() && self.enter.is_none()
    }

    /// Iterates the transitions in firing order (leave before enter).
    pub fn iter(&self) -> impl Iterator<Item = HoverEvent<K>> {
        self.leave
            .map(HoverEvent::Leave)
            .into_iter()
            .chain(self.enter.map(HoverEvent::Enter))
    }
}

/// Tracks the object currently under the pointer.
#[derive(Clone, Debug, Default)]
pub struct HoverState<K> {
    current: Option<K>,
}

impl<K: Copy + PartialEq> HoverState<K> {
    /// Creates a state with nothing under the pointer.
    pub fn new() -> Self {
        Self { current: None }
    }

    /// The object currently under the pointer.
    pub fn current(&self) -> Option<K> {
        self.current
    }

    /// Feeds the latest hit result and returns the resulting transitions.
    pub fn update(&mut self, hit: Option<K>) -> HoverTransition<K> {
        if self.current == hit {
            return HoverTransition {
                leave: None,
                enter: None,
            };
        }
        let leave = core::mem::replace(&mut self.current, hit);
        HoverTransition { leave, enter: hit }
    }

    /// Forgets the current object without producing a transition.
    ///
    /// Used when the object is removed from the canvas.
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Forgets `key` if it is the current object, without a transition.
    pub fn forget(&mut self, key: K) {
        if self.current == Some(key) {
            self.current = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{HoverEvent, HoverState};

    #[test]
    fn repeated_hits_fire_enter_once_and_never_leave() {
        let mut hover = HoverState::new();
        let mut enters = 0;
        let mut leaves = 0;
        for _ in 0..10 {
            let t = hover.update(Some(3_u32));
            enters += usize::from(t.enter.is_some());
            leaves += usize::from(t.leave.is_some());
        }
        assert_eq!(enters, 1);
        assert_eq!(leaves, 0);
    }

    #[test]
    fn switching_objects_leaves_then_enters() {
        let mut hover = HoverState::new();
        hover.update(Some(1_u32));
        let t = hover.update(Some(2));
        let mut it = t.iter();
        assert_eq!(it.next(), Some(HoverEvent::Leave(1)));
        assert_eq!(it.next(), Some(HoverEvent::Enter(2)));
        assert_eq!(it.next(), None);
        assert_eq!(hover.current(), Some(2));
    }

    #[test]
    fn moving_off_fires_only_leave() {
        let mut hover = HoverState::new();
        hover.update(Some(5_u32));
        let t = hover.update(None);
        assert_eq!(t.leave, Some(5));
        assert_eq!(t.enter, None);
        assert!(hover.update(None).is_empty());
    }

    #[test]
    fn forget_drops_current_silently() {
        let mut hover = HoverState::new();
        hover.update(Some(5_u32));
        hover.forget(4);
        assert_eq!(hover.current(), Some(5));
        hover.forget(5);
        assert_eq!(hover.current(), None);
        assert_eq!(hover.update(Some(5)).enter, Some(5));
    }
}
