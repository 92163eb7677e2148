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

use super::CountMinSketchBuilder;
use super::HeavyHitter;
use super::hash_family::HashFamily;
use super::heavy_hitters::HeavyHitterTracker;
use super::heavy_hitters::Offer;
use crate::error::Error;

/// Count-Min sketch for estimating item frequencies, with heavy-hitter tracking.
///
/// The sketch keeps a `depth` x `width` table of counters. Every update adds its weight to
/// one counter per row and every estimate is the minimum of those counters, so estimates
/// never fall below the true frequency. With probability [`confidence`](Self::confidence)
/// an estimate exceeds the true frequency by at most
/// [`relative_error`](Self::relative_error) times [`total_count`](Self::total_count).
///
/// Alongside the table the sketch tracks up to `capacity` items with the largest estimates.
/// An item displaced from that set is forgotten until it is updated again.
#[derive(Debug, Clone)]
pub struct CountMinSketch<T> {
    width: usize,
    depth: usize,
    seed: u64,
    total_count: u64,
    counts: Vec<u64>,
    hashes: HashFamily,
    heavy_hitters: HeavyHitterTracker<T>,
}

impl<T: Hash + Eq + Clone> CountMinSketch<T> {
    /// Creates a sketch of `depth` rows by `width` columns tracking 10 heavy hitters.
    ///
    /// Fails with [`ErrorKind::InvalidConfig`](crate::error::ErrorKind::InvalidConfig) if
    /// `width` or `depth` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use freqsketch::countmin::CountMinSketch;
    /// let mut sketch = CountMinSketch::new(2000, 10).unwrap();
    /// sketch.update("a");
    /// assert!(sketch.estimate("a") >= 1);
    ///
    /// assert!(CountMinSketch::<&str>::new(0, 5).is_err());
    /// ```
    pub fn new(width: usize, depth: usize) -> Result<Self, Error> {
        CountMinSketchBuilder::with_dimensions(width, depth).build()
    }

    /// Creates a sketch tracking up to `capacity` heavy hitters.
    pub fn with_capacity(width: usize, depth: usize, capacity: usize) -> Result<Self, Error> {
        CountMinSketchBuilder::with_dimensions(width, depth)
            .capacity(capacity)
            .build()
    }

    /// Creates a sketch sized for relative error `epsilon` and confidence `delta`.
    ///
    /// See [`CountMinSketchBuilder::with_error_bounds`] for the derivation.
    pub fn from_error_bounds(epsilon: f64, delta: f64) -> Result<Self, Error> {
        CountMinSketchBuilder::with_error_bounds(epsilon, delta).build()
    }

    pub(super) fn make(width: usize, depth: usize, capacity: usize, seed: u64) -> Self {
        let sketch = CountMinSketch {
            width,
            depth,
            seed,
            total_count: 0,
            counts: vec![0u64; width * depth],
            hashes: HashFamily::new(seed, depth, width),
            heavy_hitters: HeavyHitterTracker::new(capacity),
        };
        tracing::debug!(
            width,
            depth,
            capacity,
            seed,
            epsilon = sketch.relative_error(),
            delta = sketch.confidence(),
            "created count-min sketch"
        );
        sketch
    }

    /// Returns the number of columns per row.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the number of rows (hash functions).
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the maximum number of tracked heavy hitters.
    pub fn capacity(&self) -> usize {
        self.heavy_hitters.capacity()
    }

    /// Returns the seed of the hash family.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the sum of all weights applied so far.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    /// Returns true if no weight has been applied yet.
    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }

    /// Returns epsilon, the error bound relative to the total count: `2 / width`.
    pub fn relative_error(&self) -> f64 {
        2.0 / self.width as f64
    }

    /// Returns delta, the probability that the error bound holds: `1 - 0.5^depth`.
    pub fn confidence(&self) -> f64 {
        1.0 - 0.5f64.powi(self.depth as i32)
    }

    /// Records one occurrence of `item`.
    pub fn update(&mut self, item: T) {
        self.apply(item, 1);
    }

    /// Records `weight` occurrences of `item`.
    ///
    /// A weight of zero leaves the counters alone but still offers the item to the
    /// heavy-hitter set. A negative weight fails with
    /// [`ErrorKind::InvalidArgument`](crate::error::ErrorKind::InvalidArgument) and leaves
    /// the sketch untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// # use freqsketch::countmin::CountMinSketch;
    /// # use freqsketch::error::ErrorKind;
    /// let mut sketch = CountMinSketch::new(100, 4).unwrap();
    /// sketch.update_with_weight("x", 3).unwrap();
    ///
    /// let err = sketch.update_with_weight("x", -1).unwrap_err();
    /// assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    /// assert_eq!(sketch.total_count(), 3);
    /// ```
    pub fn update_with_weight(&mut self, item: T, weight: i64) -> Result<(), Error> {
        if weight < 0 {
            tracing::debug!(weight, "rejected negative weight");
            return Err(Error::invalid_argument(
                "cannot add a negative weight to the sketch",
            )
            .with_context("weight", weight));
        }
        self.apply(item, weight as u64);
        Ok(())
    }

    fn apply(&mut self, item: T, weight: u64) {
        self.total_count = self.total_count.saturating_add(weight);

        let width = self.width;
        let mut estimate = u64::MAX;
        for (row, column) in self.hashes.columns(&item).enumerate() {
            let counter = &mut self.counts[row * width + column];
            *counter = counter.saturating_add(weight);
            estimate = estimate.min(*counter);
        }

        match self.heavy_hitters.offer(item, estimate) {
            Offer::Evicted(evicted) => tracing::trace!(
                estimate,
                evicted_estimate = evicted.estimate(),
                "heavy hitter replaced"
            ),
            Offer::Admitted => tracing::trace!(estimate, "heavy hitter admitted"),
            Offer::Updated | Offer::Rejected => {}
        }
    }

    /// Returns the estimated frequency of `item`.
    ///
    /// The estimate is never below the total weight applied to `item`.
    pub fn estimate<Q>(&self, item: &Q) -> u64
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.hashes
            .columns(item)
            .enumerate()
            .map(|(row, column)| self.counts[row * self.width + column])
            .min()
            .unwrap_or(0)
    }

    /// Returns a lower bound on the true frequency of `item`.
    ///
    /// This is the estimate minus `relative_error * total_count`, floored at zero. It holds
    /// with probability [`confidence`](Self::confidence).
    pub fn lower_bound<Q>(&self, item: &Q) -> u64
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let error = (self.relative_error() * self.total_count as f64) as u64;
        self.estimate(item).saturating_sub(error)
    }

    /// Returns the heavy hitters and their estimates as of their last update.
    ///
    /// The map is a copy; changing it does not affect the sketch.
    pub fn heavy_hitters(&self) -> HashMap<T, u64> {
        self.heavy_hitters.snapshot()
    }

    /// Returns the heavy hitters ordered from largest to smallest estimate.
    pub fn top_k(&self) -> Vec<HeavyHitter<T>> {
        self.heavy_hitters.sorted()
    }

    /// Returns the tracked estimate for `item`, if it is currently a heavy hitter.
    pub fn heavy_hitter<Q>(&self, item: &Q) -> Option<u64>
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.heavy_hitters.get(item)
    }

    /// Returns the number of heavy hitters currently tracked.
    pub fn num_heavy_hitters(&self) -> usize {
        self.heavy_hitters.len()
    }

    /// Returns the smallest estimate among the tracked heavy hitters.
    pub fn min_heavy_hitter_estimate(&self) -> Option<u64> {
        self.heavy_hitters.min_estimate()
    }

    /// Merging is not supported.
    ///
    /// Always fails with [`ErrorKind::Unsupported`](crate::error::ErrorKind::Unsupported),
    /// whatever `other` is, and leaves both sketches unchanged.
    pub fn merge(&mut self, other: &CountMinSketch<T>) -> Result<(), Error> {
        tracing::debug!(
            width = other.width,
            depth = other.depth,
            seed = other.seed,
            "rejected count-min sketch merge"
        );
        Err(Error::unsupported("merge"))
    }
}
