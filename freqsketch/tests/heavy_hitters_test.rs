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

use freqsketch::countmin::CountMinSketch;
use freqsketch::countmin::HeavyHitter;
use googletest::assert_that;
use googletest::prelude::ge;
use googletest::prelude::le;

// Wide enough that a handful of items never collide in every row.
const WIDTH: usize = 1 << 16;
const DEPTH: usize = 5;

fn sketch(capacity: usize) -> CountMinSketch<&'static str> {
    CountMinSketch::with_capacity(WIDTH, DEPTH, capacity).unwrap()
}

fn tracked(sketch: &CountMinSketch<&'static str>) -> Vec<(&'static str, u64)> {
    sketch
        .top_k()
        .into_iter()
        .map(HeavyHitter::into_parts)
        .collect()
}

#[test]
fn test_never_exceeds_capacity() {
    let mut sketch = CountMinSketch::with_capacity(256, 4, 5).unwrap();
    for i in 0..1_000u64 {
        sketch.update_with_weight(i % 97, (i % 13) as i64).unwrap();
        assert_that!(sketch.heavy_hitters().len(), le(5));
        assert_that!(sketch.num_heavy_hitters(), le(5));
    }
    assert_eq!(sketch.num_heavy_hitters(), 5);
}

#[test]
fn test_evicts_minimum() {
    let mut sketch = sketch(3);
    sketch.update_with_weight("a", 5).unwrap();
    sketch.update_with_weight("b", 2).unwrap();
    sketch.update_with_weight("c", 8).unwrap();
    assert_eq!(sketch.min_heavy_hitter_estimate(), Some(2));

    sketch.update_with_weight("d", 3).unwrap();
    assert_eq!(tracked(&sketch), vec![("c", 8), ("a", 5), ("d", 3)]);
    assert_eq!(sketch.heavy_hitter("b"), None);
    assert_eq!(sketch.min_heavy_hitter_estimate(), Some(3));
}

#[test]
fn test_not_above_minimum_leaves_set_unchanged() {
    let mut sketch = sketch(2);
    sketch.update_with_weight("a", 5).unwrap();
    sketch.update_with_weight("b", 2).unwrap();
    let before = sketch.heavy_hitters();

    // equal to the minimum: the incumbent stays
    sketch.update_with_weight("c", 2).unwrap();
    assert_eq!(sketch.heavy_hitters(), before);

    // below the minimum
    sketch.update_with_weight("d", 1).unwrap();
    assert_eq!(sketch.heavy_hitters(), before);

    // the sketch still counted them
    assert_eq!(sketch.estimate("c"), 2);
    assert_eq!(sketch.estimate("d"), 1);
}

#[test]
fn test_tracked_estimates_follow_updates() {
    let mut sketch = sketch(3);
    sketch.update("a");
    sketch.update("b");
    sketch.update("c");
    for _ in 0..10 {
        sketch.update("a");
    }
    assert_eq!(sketch.heavy_hitter("a"), Some(11));
    assert_eq!(sketch.min_heavy_hitter_estimate(), Some(1));

    // "a" grew, so one of the others is the one to go
    sketch.update_with_weight("d", 2).unwrap();
    assert_eq!(sketch.heavy_hitter("a"), Some(11));
    assert_eq!(sketch.heavy_hitter("d"), Some(2));
    assert_eq!(sketch.num_heavy_hitters(), 3);
}

#[test]
fn test_displaced_item_is_forgotten_until_updated() {
    let mut sketch = sketch(2);
    sketch.update_with_weight("a", 5).unwrap();
    sketch.update_with_weight("b", 4).unwrap();
    sketch.update_with_weight("c", 10).unwrap();
    assert_eq!(sketch.heavy_hitter("b"), None);
    assert_eq!(sketch.estimate("b"), 4);

    // A zero weight offers "b" again, but 4 does not beat the minimum of 5.
    sketch.update_with_weight("b", 0).unwrap();
    assert_eq!(sketch.heavy_hitter("b"), None);

    sketch.update_with_weight("b", 2).unwrap();
    assert_eq!(tracked(&sketch), vec![("c", 10), ("b", 6)]);
}

#[test]
fn test_snapshot_isolation() {
    let mut sketch = sketch(4);
    sketch.update_with_weight("a", 3).unwrap();
    sketch.update_with_weight("b", 1).unwrap();

    let mut snapshot = sketch.heavy_hitters();
    snapshot.insert("z", 1_000);
    snapshot.remove("a");
    if let Some(b) = snapshot.get_mut("b") {
        *b = 99;
    }

    let fresh = sketch.heavy_hitters();
    assert_eq!(fresh.len(), 2);
    assert_eq!(fresh["a"], 3);
    assert_eq!(fresh["b"], 1);
    assert_eq!(sketch.estimate("z"), 0);
    assert_eq!(sketch.estimate("b"), 1);
}

#[test]
fn test_heavy_hitters_surface_frequent_items() {
    let mut sketch: CountMinSketch<u64> = CountMinSketch::with_capacity(2000, 10, 5).unwrap();
    // items 0..5 are heavy, the rest is noise
    for round in 0..200u64 {
        for heavy in 0..5u64 {
            sketch.update(heavy);
        }
        sketch.update(1_000 + round);
    }

    let hitters = sketch.heavy_hitters();
    for heavy in 0..5u64 {
        assert_that!(hitters.get(&heavy).copied().unwrap_or(0), ge(200));
    }
    let top = sketch.top_k();
    assert!(top.windows(2).all(|w| w[0].estimate() >= w[1].estimate()));
}
