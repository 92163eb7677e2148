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

use std::collections::HashMap;

use freqsketch::countmin::CountMinSketch;
use freqsketch::countmin::SharedCountMinSketch;
use freqsketch::error::ErrorKind;
use googletest::assert_that;
use googletest::prelude::ge;

#[test]
fn test_concurrent_updates_are_serialized() {
    let shared = SharedCountMinSketch::new(CountMinSketch::with_capacity(4096, 5, 8).unwrap());
    let workers = 8u64;
    let rounds = 1_000u64;

    std::thread::scope(|s| {
        for worker in 0..workers {
            let handle = shared.clone();
            s.spawn(move || {
                for i in 0..rounds {
                    handle.update(i % 16);
                    handle.update_with_weight(100 + worker, 2).unwrap();
                }
            });
        }
    });

    // 1000 is not a multiple of 16, so the shared items end up with uneven counts.
    let mut exact: HashMap<u64, u64> = HashMap::new();
    for worker in 0..workers {
        for i in 0..rounds {
            *exact.entry(i % 16).or_default() += 1;
        }
        exact.insert(100 + worker, 2 * rounds);
    }
    assert_eq!(exact[&0], 504);
    assert_eq!(exact[&8], 496);

    assert_eq!(shared.total_count(), workers * rounds * 3);
    assert_eq!(shared.total_count(), exact.values().sum::<u64>());
    for (item, count) in &exact {
        assert_that!(shared.estimate(item), ge(*count));
    }

    shared.with_sketch(|sketch| {
        assert!(sketch.num_heavy_hitters() <= sketch.capacity());
        for (item, estimate) in sketch.heavy_hitters() {
            assert_that!(sketch.estimate(&item), ge(estimate));
        }
    });
}

#[test]
fn test_clones_share_state() {
    let shared = SharedCountMinSketch::new(CountMinSketch::new(128, 3).unwrap());
    let other = shared.clone();
    other.update("a");
    shared.update_with_weight("a", 2).unwrap();

    assert_eq!(shared.estimate("a"), 3);
    assert_eq!(other.heavy_hitters()["a"], 3);
    assert_eq!(shared.top_k()[0].estimate(), 3);

    let err = other.update_with_weight("a", -5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert_eq!(shared.total_count(), 3);
}

#[test]
fn test_snapshot_is_detached() {
    let shared = SharedCountMinSketch::new(CountMinSketch::new(128, 3).unwrap());
    shared.update("a");
    let mut copy = shared.snapshot();
    copy.update("a");

    assert_eq!(copy.estimate("a"), 2);
    assert_eq!(shared.estimate("a"), 1);
}
