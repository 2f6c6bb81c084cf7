//! Identifiers for tweens, their owners, and the external objects they drive.

use serde::{Deserialize, Serialize};

/// Handle to a pooled tween: slot index plus the generation stamped at allocation.
///
/// A handle stays valid until its tween completes or is cancelled. After that
/// the slot may be reused; the generation no longer matches and every call
/// taking the handle reports [`crate::TweenError::StaleHandle`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TweenId {
    pub index: u32,
    pub generation: u32,
}

/// Logical owner of a tween (usually a stable identity of the target object).
/// One owner can run several tweens at once, e.g. a move and a rotate.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct OwnerKey(pub i64);

impl OwnerKey {
    /// Owner recorded on free slots.
    pub const NONE: OwnerKey = OwnerKey(-1);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Self::NONE
    }
}

/// Opaque, non-owning key of the externally owned object a tween mutates.
/// The scheduler never dereferences it; it is echoed back in every change.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TargetHandle(pub u64);

/// Monotonic generation source. Survives pool shrink so handles minted before a
/// shrink never match slots recreated after it.
#[derive(Default, Debug)]
pub struct GenerationCounter {
    next: u32,
}

impl GenerationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn mint(&mut self) -> u32 {
        let g = self.next;
        self.next = self.next.wrapping_add(1);
        g
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_are_monotonic() {
        let mut gens = GenerationCounter::new();
        assert_eq!(gens.mint(), 0);
        assert_eq!(gens.mint(), 1);
        assert_eq!(gens.mint(), 2);
    }

    #[test]
    fn none_owner_is_minus_one() {
        assert!(OwnerKey(-1).is_none());
        assert!(!OwnerKey(0).is_none());
    }
}
