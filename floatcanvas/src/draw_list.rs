// Copyright 2026 the FloatCanvas Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Object storage: a generational arena plus the two draw-order tiers.

use core::fmt;

use hashbrown::HashMap;

use crate::hit::{HitCallback, HitEventKind};
use crate::{DrawObject, Tier};

/// Handle to an object on a canvas.
///
/// It consists of a slot index and a generation counter.
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `ObjectId` that pointed to
///   that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a
///   new, distinct `ObjectId`.
///
/// Stale handles never alias a different live object because the
/// generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObjectId(u32, u32);

impl ObjectId {
    pub(crate) const fn new(slot: u32, generation: u32) -> Self {
        Self(slot, generation)
    }

    const fn slot(self) -> usize {
        self.0 as usize
    }
}

/// A stored object with its bound callbacks.
pub(crate) struct Entry {
    pub(crate) object: DrawObject,
    pub(crate) callbacks: HashMap<HitEventKind, HitCallback>,
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("object", &self.object)
            .field("callbacks", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    entry: Option<Entry>,
}

/// Every object on a canvas, with background and foreground draw order.
///
/// Within a tier, objects are drawn in insertion order, so later objects
/// paint over earlier ones.
#[derive(Debug, Default)]
pub struct DrawList {
    slots: Vec<Slot>,
    free: Vec<u32>,
    background: Vec<ObjectId>,
    foreground: Vec<ObjectId>,
}

impl DrawList {
    /// An empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `object` at the end of its tier.
    pub fn insert(&mut self, object: DrawObject) -> ObjectId {
        let tier = object.tier;
        let entry = Entry {
            object,
            callbacks: HashMap::new(),
        };
        let id = if let Some(slot) = self.free.pop() {
            let s = &mut self.slots[slot as usize];
            s.generation += 1;
            s.entry = Some(entry);
            ObjectId::new(slot, s.generation)
        } else {
            let slot = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
            self.slots.push(Slot {
                generation: 1,
                entry: Some(entry),
            });
            ObjectId::new(slot, 1)
        };
        self.tier_mut(tier).push(id);
        id
    }

    /// Removes the object, returning it with its callbacks.
    pub(crate) fn remove(&mut self, id: ObjectId) -> Option<Entry> {
        if !self.is_alive(id) {
            return None;
        }
        let entry = self.slots[id.slot()].entry.take()?;
        self.tier_mut(entry.object.tier).retain(|&other| other != id);
        self.free.push(id.0);
        Some(entry)
    }

    /// `true` if `id` names a live object.
    pub fn is_alive(&self, id: ObjectId) -> bool {
        self.slots
            .get(id.slot())
            .is_some_and(|s| s.generation == id.1 && s.entry.is_some())
    }

    /// The object behind `id`.
    pub fn get(&self, id: ObjectId) -> Option<&DrawObject> {
        self.entry(id).map(|e| &e.object)
    }

    /// Mutable access to the object behind `id`.
    ///
    /// Changing [`DrawObject::tier`] here does not move the object; use
    /// [`DrawList::sync_tier`] afterwards.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut DrawObject> {
        self.entry_mut(id).map(|e| &mut e.object)
    }

    pub(crate) fn entry(&self, id: ObjectId) -> Option<&Entry> {
        let slot = self.slots.get(id.slot())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.entry.as_ref()
    }

    pub(crate) fn entry_mut(&mut self, id: ObjectId) -> Option<&mut Entry> {
        let slot = self.slots.get_mut(id.slot())?;
        if slot.generation != id.1 {
            return None;
        }
        slot.entry.as_mut()
    }

    /// Ids in `tier`, in draw order.
    pub fn tier(&self, tier: Tier) -> &[ObjectId] {
        match tier {
            Tier::Background => &self.background,
            Tier::Foreground => &self.foreground,
        }
    }

    fn tier_mut(&mut self, tier: Tier) -> &mut Vec<ObjectId> {
        match tier {
            Tier::Background => &mut self.background,
            Tier::Foreground => &mut self.foreground,
        }
    }

    /// Moves the object to the end of `tier`. Returns the tier it was in.
    pub fn set_tier(&mut self, id: ObjectId, tier: Tier) -> Option<Tier> {
        let object = self.get_mut(id)?;
        let old = core::mem::replace(&mut object.tier, tier);
        if old != tier {
            self.tier_mut(old).retain(|&other| other != id);
            self.tier_mut(tier).push(id);
        }
        Some(old)
    }

    /// Brings the draw order in line with the object's own `tier` field
    /// after it was edited in place. Returns the tier it was drawn in.
    pub fn sync_tier(&mut self, id: ObjectId) -> Option<Tier> {
        let tier = self.get(id)?.tier;
        if self.tier(tier).contains(&id) {
            return Some(tier);
        }
        let other = match tier {
            Tier::Background => Tier::Foreground,
            Tier::Foreground => Tier::Background,
        };
        self.tier_mut(other).retain(|&o| o != id);
        self.tier_mut(tier).push(id);
        Some(other)
    }

    /// Number of live objects.
    pub fn len(&self) -> usize {
        self.background.len() + self.foreground.len()
    }

    /// `true` if there are no objects.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Live objects, background tier first, each in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &DrawObject)> + '_ {
        self.background
            .iter()
            .chain(&self.foreground)
            .filter_map(|&id| self.get(id).map(|o| (id, o)))
    }

    pub(crate) fn entries_mut(&mut self) -> impl Iterator<Item = &mut Entry> + '_ {
        self.slots.iter_mut().filter_map(|s| s.entry.as_mut())
    }

    /// Removes every object. Outstanding ids become stale.
    pub fn clear(&mut self) {
        for (slot, s) in self.slots.iter_mut().enumerate() {
            if s.entry.take().is_some() {
                self.free.push(u32::try_from(slot).unwrap_or(u32::MAX));
            }
        }
        self.background.clear();
        self.foreground.clear();
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;

    fn dot() -> DrawObject {
        DrawObject::point(Point::ORIGIN, 2.0)
    }

    #[test]
    fn stale_ids_do_not_alias_reused_slots() {
        let mut list = DrawList::new();
        let a = list.insert(dot());
        assert!(list.remove(a).is_some());
        let b = list.insert(dot());
        assert_ne!(a, b);
        assert!(!list.is_alive(a));
        assert!(list.is_alive(b));
        assert!(list.get(a).is_none());
        assert!(list.remove(a).is_none());
    }

    #[test]
    fn tiers_keep_insertion_order() {
        let mut list = DrawList::new();
        let a = list.insert(dot());
        let f = list.insert(dot().in_foreground());
        let b = list.insert(dot());
        assert_eq!(list.tier(Tier::Background), &[a, b]);
        assert_eq!(list.tier(Tier::Foreground), &[f]);
        assert_eq!(list.set_tier(a, Tier::Foreground), Some(Tier::Background));
        assert_eq!(list.tier(Tier::Background), &[b]);
        assert_eq!(list.tier(Tier::Foreground), &[f, a]);
        let order: Vec<_> = list.iter().map(|(id, _)| id).collect();
        assert_eq!(order, vec![b, f, a]);
    }

    #[test]
    fn sync_tier_follows_edited_field() {
        let mut list = DrawList::new();
        let a = list.insert(dot());
        if let Some(obj) = list.get_mut(a) {
            obj.tier = Tier::Foreground;
        }
        assert_eq!(list.sync_tier(a), Some(Tier::Background));
        assert_eq!(list.tier(Tier::Foreground), &[a]);
        assert!(list.tier(Tier::Background).is_empty());
        assert_eq!(list.sync_tier(a), Some(Tier::Foreground));
    }

    #[test]
    fn clear_invalidates_everything() {
        let mut list = DrawList::new();
        let a = list.insert(dot());
        let b = list.insert(dot().in_foreground());
        list.clear();
        assert!(list.is_empty());
        assert!(!list.is_alive(a));
        assert!(!list.is_alive(b));
        let c = list.insert(dot());
        assert_eq!(list.len(), 1);
        assert!(list.is_alive(c));
    }
}
