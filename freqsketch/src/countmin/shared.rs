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
use std::sync::Arc;

use parking_lot::Mutex;

use super::CountMinSketch;
use super::HeavyHitter;
use crate::error::Error;

/// A cloneable, thread-safe handle to a [`CountMinSketch`].
///
/// Every call takes the lock for its full duration, so an update to the counters and the
/// heavy-hitter set is never observed half done. Clones share the same sketch.
///
/// # Examples
///
/// ```
/// # use freqsketch::countmin::CountMinSketch;
/// # use freqsketch::countmin::SharedCountMinSketch;
/// let shared = SharedCountMinSketch::new(CountMinSketch::new(1000, 5).unwrap());
///
/// std::thread::scope(|s| {
///     for _ in 0..4 {
///         let handle = shared.clone();
///         s.spawn(move || {
///             for _ in 0..100 {
///                 handle.update("tick");
///             }
///         });
///     }
/// });
///
/// assert_eq!(shared.total_count(), 400);
/// assert!(shared.estimate("tick") >= 400);
/// ```
#[derive(Debug)]
pub struct SharedCountMinSketch<T> {
    inner: Arc<Mutex<CountMinSketch<T>>>,
}

impl<T> Clone for SharedCountMinSketch<T> {
    fn clone(&self) -> Self {
        SharedCountMinSketch {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Hash + Eq + Clone> SharedCountMinSketch<T> {
    /// Wraps `sketch` for shared use.
    pub fn new(sketch: CountMinSketch<T>) -> Self {
        SharedCountMinSketch {
            inner: Arc::new(Mutex::new(sketch)),
        }
    }

    /// See [`CountMinSketch::update`].
    pub fn update(&self, item: T) {
        self.inner.lock().update(item);
    }

    /// See [`CountMinSketch::update_with_weight`].
    pub fn update_with_weight(&self, item: T, weight: i64) -> Result<(), Error> {
        self.inner.lock().update_with_weight(item, weight)
    }

    /// See [`CountMinSketch::estimate`].
    pub fn estimate<Q>(&self, item: &Q) -> u64
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().estimate(item)
    }

    /// See [`CountMinSketch::heavy_hitters`].
    pub fn heavy_hitters(&self) -> HashMap<T, u64> {
        self.inner.lock().heavy_hitters()
    }

    /// See [`CountMinSketch::top_k`].
    pub fn top_k(&self) -> Vec<HeavyHitter<T>> {
        self.inner.lock().top_k()
    }

    /// See [`CountMinSketch::total_count`].
    pub fn total_count(&self) -> u64 {
        self.inner.lock().total_count()
    }

    /// Runs `f` with exclusive access to the sketch.
    ///
    /// Use this to read several values from one consistent state.
    pub fn with_sketch<R>(&self, f: impl FnOnce(&mut CountMinSketch<T>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Returns a copy of the sketch as it is now.
    pub fn snapshot(&self) -> CountMinSketch<T> {
        self.inner.lock().clone()
    }
}
