//! Reverse index from segment id to the flat pixel offsets it owns.
//!
//! Removal is lazy: unregistering an offset only flips a tombstone flag, and
//! the storage is compacted later in one batch via [`ReverseIndex::compact`].
//! A per-pixel slot table remembers where each pixel sits in its owner's
//! list, which keeps single-pixel removal O(1) instead of O(segment).

use std::collections::{BTreeSet, HashMap};

use crate::SegmentId;

/// Offsets owned by one id, with a parallel tombstone sequence.
#[derive(Debug, Clone, Default)]
struct Entry {
    offsets: Vec<usize>,
    deleted: Vec<bool>,
    live: usize,
}

impl Entry {
    fn live_offsets(&self) -> impl Iterator<Item = usize> + '_ {
        self.offsets
            .iter()
            .zip(&self.deleted)
            .filter(|&(_, &deleted)| !deleted)
            .map(|(&offset, _)| offset)
    }
}

#[derive(Debug, Clone)]
pub struct ReverseIndex {
    entries: HashMap<SegmentId, Entry>,
    /// Position of each pixel inside its current owner's `offsets`.
    slots: Vec<usize>,
    /// Ids holding tombstones since the last compaction.
    dirty: BTreeSet<SegmentId>,
}

impl ReverseIndex {
    /// Create an empty index for a raster of `len` pixels.
    pub fn new(len: usize) -> Self {
        Self {
            entries: HashMap::new(),
            slots: vec![0; len],
            dirty: BTreeSet::new(),
        }
    }

    /// Append `offset` as a live pixel of `id`.
    pub fn register(&mut self, id: SegmentId, offset: usize) {
        let Some(slot) = self.slots.get_mut(offset) else {
            return;
        };
        let entry = self.entries.entry(id).or_default();
        *slot = entry.offsets.len();
        entry.offsets.push(offset);
        entry.deleted.push(false);
        entry.live += 1;
    }

    /// Tombstone `offset` under `id`. Returns whether a live entry was found.
    ///
    /// Missing offsets are expected (a previous edit already removed them) and
    /// are ignored.
    pub fn unregister(&mut self, id: SegmentId, offset: usize) -> bool {
        let Some(&pos) = self.slots.get(offset) else {
            return false;
        };
        let Some(entry) = self.entries.get_mut(&id) else {
            return false;
        };
        if entry.offsets.get(pos) != Some(&offset) || entry.deleted[pos] {
            return false;
        }
        entry.deleted[pos] = true;
        entry.live -= 1;
        self.dirty.insert(id);
        true
    }

    /// Drop every offset of `id`, live or not.
    pub fn clear(&mut self, id: SegmentId) {
        if let Some(entry) = self.entries.get_mut(&id) {
            *entry = Entry::default();
        }
        self.dirty.remove(&id);
    }

    /// Remove tombstones for one id. Returns how many entries were dropped.
    pub fn compact_id(&mut self, id: SegmentId) -> usize {
        self.dirty.remove(&id);
        let Some(entry) = self.entries.get_mut(&id) else {
            return 0;
        };
        let before = entry.offsets.len();
        let offsets: Vec<usize> = entry.live_offsets().collect();
        for (pos, &offset) in offsets.iter().enumerate() {
            self.slots[offset] = pos;
        }
        entry.deleted = vec![false; offsets.len()];
        entry.offsets = offsets;
        before - entry.live
    }

    /// Compact every id touched since the last call. Returns dropped entries.
    pub fn compact(&mut self) -> usize {
        let dirty = std::mem::take(&mut self.dirty);
        dirty.into_iter().map(|id| self.compact_id(id)).sum()
    }

    /// Live offsets of `id` in registration order.
    pub fn live_offsets(&self, id: SegmentId) -> impl Iterator<Item = usize> + '_ {
        self.entries
            .get(&id)
            .into_iter()
            .flat_map(|entry| entry.live_offsets())
    }

    /// Number of live offsets of `id`.
    pub fn live_len(&self, id: SegmentId) -> usize {
        self.entries.get(&id).map_or(0, |entry| entry.live)
    }

    /// Stored entries for `id`, tombstones included.
    pub fn stored_len(&self, id: SegmentId) -> usize {
        self.entries.get(&id).map_or(0, |entry| entry.offsets.len())
    }

    /// Ids waiting for compaction.
    pub fn dirty_ids(&self) -> impl Iterator<Item = SegmentId> + '_ {
        self.dirty.iter().copied()
    }

    /// Ids that currently own at least one pixel, ascending.
    pub fn live_ids(&self) -> Vec<SegmentId> {
        let mut ids: Vec<SegmentId> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.live > 0)
            .map(|(&id, _)| id)
            .collect();
        ids.sort_unstable();
        ids
    }
}
