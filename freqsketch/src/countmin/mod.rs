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

//! Count-Min sketch with heavy-hitter tracking.
//!
//! The Count-Min sketch summarises a stream in a fixed `depth` x `width` table of counters.
//! Each row has its own hash function; an update adds its weight to one counter per row
//! and a query returns the minimum over those counters.
//!
//! # Properties
//!
//! - **No underestimates**: collisions only ever add to a counter, so an estimate is never
//!   below the true frequency.
//! - **Bounded error**: with probability `delta = 1 - 0.5^depth` the overestimate is at
//!   most `epsilon * total_count`, where `epsilon = 2 / width`.
//! - **Fixed size**: the table never grows; counters saturate instead of wrapping.
//! - **No deletions**: weights must be non-negative.
//!
//! # Heavy hitters
//!
//! The sketch also keeps the `capacity` items with the largest estimates seen on their
//! own updates. The set is maintained incrementally: an item that falls out of it is not
//! reconsidered until it is updated again, even if collisions later inflate its estimate.
//!
//! # Usage
//!
//! ```rust
//! use freqsketch::countmin::CountMinSketch;
//!
//! let mut sketch = CountMinSketch::with_capacity(2000, 10, 10).unwrap();
//! sketch.update_with_weight("a", 5).unwrap();
//! sketch.update_with_weight("b", 3).unwrap();
//! sketch.update_with_weight("a", 2).unwrap();
//!
//! assert!(sketch.estimate("a") >= 7);
//! assert!(sketch.estimate("b") >= 3);
//! assert_eq!(sketch.total_count(), 10);
//!
//! let hitters = sketch.heavy_hitters();
//! assert!(hitters["a"] >= hitters["b"]);
//! ```
//!
//! # Sizing
//!
//! Either give the table shape directly, or derive it from error bounds:
//!
//! ```rust
//! # use freqsketch::countmin::CountMinSketch;
//! # use freqsketch::countmin::CountMinSketchBuilder;
//! // width = ceil(1 / 0.001), depth = ceil(log_0.5(1 - 0.99))
//! let sketch: CountMinSketch<u64> = CountMinSketchBuilder::with_error_bounds(0.001, 0.99)
//!     .capacity(20)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! assert_eq!(sketch.width(), 1000);
//! assert_eq!(sketch.depth(), 7);
//! ```
//!
//! # Concurrency
//!
//! [`CountMinSketch`] has no internal locking. Share it across threads through
//! [`SharedCountMinSketch`], or behind a lock of your own.

mod builder;
mod hash_family;
mod heavy_hitters;
mod shared;
mod sketch;

pub use self::builder::CountMinSketchBuilder;
pub use self::builder::DEFAULT_CAPACITY;
pub use self::builder::MAX_TABLE_ENTRIES;
pub use self::heavy_hitters::HeavyHitter;
pub use self::shared::SharedCountMinSketch;
pub use self::sketch::CountMinSketch;
