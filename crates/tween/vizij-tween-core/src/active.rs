//! Active-set tracker: which pool slots are live and the frame each one joined.
//!
//! Storage is a fixed-capacity array grown and shrunk in lockstep with the
//! slot pool. An entry only becomes eligible on a frame strictly after the one
//! it was inserted on, so a tween created mid-frame (or from a callback) is
//! not stepped before the driver's next tick.

/// A live slot index paired with its insertion frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ActiveEntry {
    pub index: u32,
    pub frame: u64,
}

#[derive(Debug, Default)]
pub struct ActiveSet {
    entries: Vec<Option<ActiveEntry>>,
    count: usize,
}

impl ActiveSet {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: vec![None; capacity],
            count: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.entries.len()
    }

    /// Number of live entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Record `index` as live from `frame`. Returns `false` when storage is full;
    /// the caller is expected to have grown it alongside the pool.
    pub fn insert(&mut self, index: u32, frame: u64) -> bool {
        match self.entries.iter_mut().find(|e| e.is_none()) {
            Some(free) => {
                *free = Some(ActiveEntry { index, frame });
                self.count += 1;
                true
            }
            None => {
                log::warn!("active set full ({} entries); dropped slot {index}", self.capacity());
                false
            }
        }
    }

    /// Forget `index`. Returns whether an entry was found.
    pub fn remove(&mut self, index: u32) -> bool {
        for entry in self.entries.iter_mut() {
            if matches!(entry, Some(e) if e.index == index) {
                *entry = None;
                self.count -= 1;
                return true;
            }
        }
        false
    }

    pub fn contains(&self, index: u32) -> bool {
        self.entries
            .iter()
            .flatten()
            .any(|e| e.index == index)
    }

    /// Entries inserted strictly before `frame`, in storage order.
    pub fn eligible(&self, frame: u64) -> impl Iterator<Item = ActiveEntry> + '_ {
        self.entries
            .iter()
            .flatten()
            .filter(move |e| e.frame < frame)
            .copied()
    }

    /// Grow to `capacity`, keeping every entry in place.
    pub fn grow(&mut self, capacity: usize) {
        if capacity > self.entries.len() {
            self.entries.resize(capacity, None);
        }
    }

    /// Rebuild empty storage at `capacity`.
    pub fn reset(&mut self, capacity: usize) {
        self.entries = vec![None; capacity];
        self.count = 0;
    }
}
