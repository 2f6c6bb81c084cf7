//! Slot pool: growable storage for every tween plus its active-set tracker.
//!
//! Indices are handles, so a live slot never moves. Growth doubles the array
//! and copies slots positionally; shrinking happens only when nothing is
//! active, which is the one time no handle can be outstanding.

use crate::active::ActiveSet;
use crate::config::GROWTH_FACTOR;
use crate::ids::{GenerationCounter, OwnerKey, TargetHandle, TweenId};
use crate::slot::{Payload, Slot, SlotFlags, TweenMode};

static FREE_SLOT: Slot = Slot::FREE;

/// Caller-provided fields of a new slot.
#[derive(Copy, Clone, Debug)]
pub struct SlotInit {
    pub mode: TweenMode,
    pub payload: Payload,
    pub duration: f32,
    pub owner: OwnerKey,
    pub target: TargetHandle,
    pub flags: SlotFlags,
}

#[derive(Debug)]
pub struct SlotPool {
    slots: Vec<Slot>,
    active: ActiveSet,
    generations: GenerationCounter,
    floor: usize,
}

impl SlotPool {
    /// Pool with `floor` free slots; `floor` is also the shrink target.
    pub fn new(floor: usize) -> Self {
        let floor = floor.max(1);
        Self {
            slots: vec![Slot::FREE; floor],
            active: ActiveSet::with_capacity(floor),
            generations: GenerationCounter::new(),
            floor,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn floor(&self) -> usize {
        self.floor
    }

    /// Number of occupied slots.
    #[inline]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    #[inline]
    pub fn active(&self) -> &ActiveSet {
        &self.active
    }

    /// Occupy the first free slot (growing when there is none) and register it
    /// as active from `frame`. Never fails.
    pub fn allocate(&mut self, init: SlotInit, frame: u64) -> TweenId {
        let index = match self.slots.iter().position(Slot::is_free) {
            Some(i) => i,
            None => {
                let first_new = self.capacity();
                self.grow();
                first_new
            }
        };
        let generation = self.generations.mint();
        self.slots[index] = Slot {
            index: index as i32,
            generation,
            owner: init.owner,
            target: init.target,
            mode: init.mode,
            payload: init.payload,
            duration: init.duration,
            flags: init.flags,
            ..Slot::FREE
        };
        self.active.insert(index as u32, frame);
        TweenId {
            index: index as u32,
            generation,
        }
    }

    /// Reset the slot at `index` to free and drop it from the active set.
    /// Returns `false` if it was already free.
    pub fn free(&mut self, index: u32) -> bool {
        match self.slots.get_mut(index as usize) {
            Some(slot) if !slot.is_free() => {
                slot.release();
                self.active.remove(index);
                true
            }
            _ => false,
        }
    }

    /// Live slot for `id`; `None` when freed or reused.
    pub fn get(&self, id: TweenId) -> Option<&Slot> {
        self.slots
            .get(id.index as usize)
            .filter(|slot| slot.matches(id))
    }

    pub fn get_mut(&mut self, id: TweenId) -> Option<&mut Slot> {
        self.slots
            .get_mut(id.index as usize)
            .filter(|slot| slot.matches(id))
    }

    /// Raw slot at `index`, free or not.
    pub fn slot_at(&self, index: u32) -> Option<&Slot> {
        self.slots.get(index as usize)
    }

    /// First live slot of `owner` in pool order.
    pub fn find_owner(&self, owner: OwnerKey) -> Option<TweenId> {
        self.owner_ids(owner).next()
    }

    /// Like [`Self::find_owner`] but returns a free sentinel slot on a miss.
    pub fn slot_for_owner(&self, owner: OwnerKey) -> &Slot {
        self.slots
            .iter()
            .find(|slot| !slot.is_free() && slot.owner == owner)
            .unwrap_or(&FREE_SLOT)
    }

    /// Every live slot of `owner`, in pool order.
    pub fn owner_ids(&self, owner: OwnerKey) -> impl Iterator<Item = TweenId> + '_ {
        self.slots
            .iter()
            .filter(move |slot| slot.owner == owner)
            .filter_map(Slot::id)
    }

    /// Every live slot, in pool order.
    pub fn live_ids(&self) -> impl Iterator<Item = TweenId> + '_ {
        self.slots.iter().filter_map(Slot::id)
    }

    /// Double the capacity (or restore the floor after [`Self::release`]).
    pub fn grow(&mut self) {
        let old = self.capacity();
        let new = (old * GROWTH_FACTOR).max(self.floor);
        self.slots.resize(new, Slot::FREE);
        self.active.grow(new);
        log::debug!("tween pool grew {old} -> {new}");
    }

    /// Rebuild storage at the floor when idle. Returns whether it shrank.
    pub fn shrink_to_floor(&mut self) -> bool {
        if !self.active.is_empty() || self.capacity() <= self.floor {
            return false;
        }
        let old = self.capacity();
        self.slots = vec![Slot::FREE; self.floor];
        self.active.reset(self.floor);
        log::debug!("tween pool shrank {old} -> {}", self.floor);
        true
    }

    /// Drop all storage. The next allocation regrows to the floor.
    pub fn release(&mut self) {
        self.slots = Vec::new();
        self.active.reset(0);
    }
}
