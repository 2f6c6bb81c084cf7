//! Callback registry: per-slot multicast handlers tagged by event kind.
//!
//! Handlers live in a sparse map keyed by slot index (most tweens carry none).
//! Every handler of a slot sees every event and filters on its own kind.
//! Handlers receive the scheduler, so they can chain follow-up tweens or
//! cancel other ones. The scheduler takes a slot's handlers out of the map
//! while invoking them and puts them back afterwards if the slot survived.

use core::fmt;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ids::{OwnerKey, TweenId};
use crate::scheduler::Scheduler;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EventKind {
    /// Every frame the tween ran; carries the tick (the value for float tweens).
    Update = 1,
    /// Final completion, or a loop boundary when repeat notification is on.
    Complete = 2,
    /// A loop boundary that did not end the tween.
    LoopCycle = 3,
    /// The tween is gone: completed or cancelled. Always fires exactly once.
    Final = 4,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TweenEvent {
    pub id: TweenId,
    pub owner: OwnerKey,
    pub kind: EventKind,
    pub value: f32,
}

pub type Callback = Box<dyn FnMut(&mut Scheduler, &TweenEvent)>;

struct Handler {
    kind: EventKind,
    callback: Callback,
}

/// All handlers attached to one slot.
#[derive(Default)]
pub struct SlotHandlers {
    generation: u32,
    handlers: Vec<Handler>,
}

impl SlotHandlers {
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Invoke every handler registered for `event.kind`.
    pub fn invoke(&mut self, scheduler: &mut Scheduler, event: &TweenEvent) {
        for h in self.handlers.iter_mut().filter(|h| h.kind == event.kind) {
            (h.callback)(scheduler, event);
        }
    }
}

impl fmt::Debug for SlotHandlers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotHandlers")
            .field("generation", &self.generation)
            .field(
                "kinds",
                &self.handlers.iter().map(|h| h.kind).collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[derive(Debug, Default)]
pub struct CallbackRegistry {
    slots: HashMap<u32, SlotHandlers>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach `callback` for `kind` to the tween `id`.
    pub fn register(&mut self, id: TweenId, kind: EventKind, callback: Callback) {
        let entry = self.slots.entry(id.index).or_default();
        if entry.generation != id.generation {
            // Leftover from an earlier occupant of this index.
            entry.handlers.clear();
            entry.generation = id.generation;
        }
        entry.handlers.push(Handler { kind, callback });
    }

    /// Remove and return the handlers of `id`, if any are registered.
    pub fn take(&mut self, id: TweenId) -> Option<SlotHandlers> {
        match self.slots.get(&id.index) {
            Some(h) if h.generation == id.generation => self.slots.remove(&id.index),
            _ => None,
        }
    }

    /// Put back handlers taken with [`Self::take`]. Handlers registered for
    /// the same tween in the meantime are kept after the restored ones.
    pub fn restore(&mut self, id: TweenId, mut handlers: SlotHandlers) {
        handlers.generation = id.generation;
        if let Some(added) = self.take(id) {
            handlers.handlers.extend(added.handlers);
        }
        self.slots.insert(id.index, handlers);
    }

    /// Drop everything attached to slot `index`.
    pub fn detach(&mut self, index: u32) {
        self.slots.remove(&index);
    }

    pub fn contains(&self, id: TweenId) -> bool {
        self.slots
            .get(&id.index)
            .is_some_and(|h| h.generation == id.generation && !h.is_empty())
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}
