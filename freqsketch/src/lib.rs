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

//! # freqsketch
//!
//! Bounded-memory frequency estimation for high-volume streams.
//!
//! The crate provides a Count-Min sketch that answers "how often has this item been seen?"
//! with a one-sided error, together with an approximate top-k ("heavy hitters") tracker
//! that is maintained on every update.
//!
//! ```rust
//! use freqsketch::countmin::CountMinSketch;
//!
//! let mut sketch = CountMinSketch::new(2000, 10).unwrap();
//! sketch.update_with_weight("rust", 5).unwrap();
//! sketch.update("wasm");
//!
//! assert!(sketch.estimate("rust") >= 5);
//! assert_eq!(sketch.total_count(), 6);
//! assert_eq!(sketch.top_k()[0].item(), &"rust");
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod countmin;
pub mod error;

mod hash;
