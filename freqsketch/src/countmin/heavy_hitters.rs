// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// An item tracked as a heavy hitter together with its estimate at the time of its last
/// update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeavyHitter<T> {
    item: T,
    estimate: u64,
}

impl<T> HeavyHitter<T> {
    /// Returns the tracked item.
    pub fn item(&self) -> &T {
        &self.item
    }

    /// Returns the estimate recorded for the item.
    pub fn estimate(&self) -> u64 {
        self.estimate
    }

    /// Splits the entry into the item and its estimate.
    pub fn into_parts(self) -> (T, u64) {
        (self.item, self.estimate)
    }
}

/// What [`HeavyHitterTracker::offer`] did with an offered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Offer<T> {
    /// The item was already tracked and its estimate was refreshed.
    Updated,
    /// The item was added without displacing anything.
    Admitted,
    /// The item displaced the returned entry, which had the smallest estimate.
    Evicted(HeavyHitter<T>),
    /// The item did not beat the smallest tracked estimate.
    Rejected,
}

/// Bounded top-k set kept as an indexed binary min-heap.
///
/// `heap[0]` holds the smallest tracked estimate and `slots` maps every tracked item to
/// its position in `heap`. Both are only touched through the methods below, which restore
/// the heap order and the slot index together.
#[derive(Debug, Clone)]
pub(super) struct HeavyHitterTracker<T> {
    capacity: usize,
    heap: Vec<HeavyHitter<T>>,
    slots: HashMap<T, usize>,
}

impl<T: Hash + Eq + Clone> HeavyHitterTracker<T> {
    pub(super) fn new(capacity: usize) -> Self {
        HeavyHitterTracker {
            capacity,
            heap: Vec::with_capacity(capacity),
            slots: HashMap::with_capacity(capacity),
        }
    }

    pub(super) fn capacity(&self) -> usize {
        self.capacity
    }

    pub(super) fn len(&self) -> usize {
        self.heap.len()
    }

    pub(super) fn get<Q>(&self, item: &Q) -> Option<u64>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.slots.get(item).map(|&slot| self.heap[slot].estimate)
    }

    /// Returns the smallest tracked estimate.
    pub(super) fn min_estimate(&self) -> Option<u64> {
        self.heap.first().map(|entry| entry.estimate)
    }

    /// Records the latest estimate for `item`.
    ///
    /// Ties with the current minimum keep the incumbent: a newcomer must be strictly larger
    /// to evict it.
    pub(super) fn offer(&mut self, item: T, estimate: u64) -> Offer<T> {
        match self.upsert(item, estimate) {
            Ok(offer) => offer,
            Err(item) => match self.replace_min_if_above(item, estimate) {
                Some(evicted) => Offer::Evicted(evicted),
                None => Offer::Rejected,
            },
        }
    }

    /// Refreshes a tracked item or inserts it while there is room.
    ///
    /// Hands the item back when it is untracked and the tracker is full.
    pub(super) fn upsert(&mut self, item: T, estimate: u64) -> Result<Offer<T>, T> {
        if let Some(&slot) = self.slots.get(&item) {
            self.set_estimate(slot, estimate);
            return Ok(Offer::Updated);
        }
        if self.heap.len() >= self.capacity {
            return Err(item);
        }

        let slot = self.heap.len();
        self.slots.insert(item.clone(), slot);
        self.heap.push(HeavyHitter { item, estimate });
        self.sift_up(slot);
        Ok(Offer::Admitted)
    }

    /// Swaps out the minimum entry for `item` if `estimate` is strictly larger than it.
    ///
    /// `item` must not already be tracked.
    pub(super) fn replace_min_if_above(
        &mut self,
        item: T,
        estimate: u64,
    ) -> Option<HeavyHitter<T>> {
        debug_assert!(!self.slots.contains_key(&item));
        match self.heap.first() {
            Some(min) if estimate > min.estimate => {}
            _ => return None,
        }

        let evicted = std::mem::replace(
            &mut self.heap[0],
            HeavyHitter {
                item: item.clone(),
                estimate,
            },
        );
        self.slots.remove(&evicted.item);
        self.slots.insert(item, 0);
        self.sift_down(0);
        Some(evicted)
    }

    /// Copies the tracked pairs out; the result shares nothing with the tracker.
    pub(super) fn snapshot(&self) -> HashMap<T, u64> {
        self.heap
            .iter()
            .map(|entry| (entry.item.clone(), entry.estimate))
            .collect()
    }

    /// Copies the tracked entries out, largest estimate first.
    pub(super) fn sorted(&self) -> Vec<HeavyHitter<T>> {
        let mut entries = self.heap.clone();
        entries.sort_by(|a, b| b.estimate.cmp(&a.estimate));
        entries
    }

    fn set_estimate(&mut self, slot: usize, estimate: u64) {
        let previous = std::mem::replace(&mut self.heap[slot].estimate, estimate);
        if estimate > previous {
            self.sift_down(slot);
        } else if estimate < previous {
            self.sift_up(slot);
        }
    }

    fn sift_up(&mut self, mut pos: usize) {
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if self.heap[parent].estimate <= self.heap[pos].estimate {
                break;
            }
            self.swap(parent, pos);
            pos = parent;
        }
    }

    fn sift_down(&mut self, mut pos: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            let mut smallest = pos;
            if left < len && self.heap[left].estimate < self.heap[smallest].estimate {
                smallest = left;
            }
            if right < len && self.heap[right].estimate < self.heap[smallest].estimate {
                smallest = right;
            }
            if smallest == pos {
                break;
            }
            self.swap(pos, smallest);
            pos = smallest;
        }
    }

    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        for pos in [a, b] {
            if let Some(slot) = self.slots.get_mut(&self.heap[pos].item) {
                *slot = pos;
            }
        }
    }
}
