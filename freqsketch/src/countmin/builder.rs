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

use std::hash::Hash;

use super::CountMinSketch;
use crate::error::Error;
use crate::hash::DEFAULT_UPDATE_SEED;

/// Number of heavy hitters tracked when no capacity is given.
pub const DEFAULT_CAPACITY: usize = 10;

/// Upper limit on `width * depth`.
pub const MAX_TABLE_ENTRIES: usize = 1 << 30;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Shape {
    Dimensions { width: usize, depth: usize },
    ErrorBounds { epsilon: f64, delta: f64 },
}

/// Builder for creating [`CountMinSketch`] instances.
///
/// Provides two ways to pick the table shape:
/// - [`with_dimensions()`](Self::with_dimensions): explicit width and depth
/// - [`with_error_bounds()`](Self::with_error_bounds): width and depth derived from a
///   target error and confidence
///
/// Nothing is validated until [`build()`](Self::build), which reports every invalid
/// configuration as an [`ErrorKind::InvalidConfig`](crate::error::ErrorKind::InvalidConfig)
/// error.
#[derive(Debug, Clone)]
pub struct CountMinSketchBuilder {
    shape: Shape,
    capacity: usize,
    seed: u64,
}

impl CountMinSketchBuilder {
    /// Creates a builder for a `depth` x `width` counter table.
    ///
    /// # Examples
    ///
    /// ```
    /// # use freqsketch::countmin::CountMinSketch;
    /// # use freqsketch::countmin::CountMinSketchBuilder;
    /// let sketch: CountMinSketch<String> = CountMinSketchBuilder::with_dimensions(10, 3)
    ///     .capacity(5)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(sketch.relative_error(), 0.2);
    /// assert_eq!(sketch.confidence(), 0.875);
    /// ```
    pub fn with_dimensions(width: usize, depth: usize) -> Self {
        CountMinSketchBuilder {
            shape: Shape::Dimensions { width, depth },
            capacity: DEFAULT_CAPACITY,
            seed: DEFAULT_UPDATE_SEED,
        }
    }

    /// Creates a builder whose dimensions are derived from error bounds.
    ///
    /// The width is `ceil(1 / epsilon)` and the depth is `ceil(log_0.5(1 - delta))`, see
    /// [`suggest_width`](Self::suggest_width) and [`suggest_depth`](Self::suggest_depth).
    ///
    /// # Examples
    ///
    /// ```
    /// # use freqsketch::countmin::CountMinSketch;
    /// # use freqsketch::countmin::CountMinSketchBuilder;
    /// let sketch: CountMinSketch<u64> = CountMinSketchBuilder::with_error_bounds(0.01, 0.99)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(sketch.width(), 100);
    /// assert_eq!(sketch.depth(), 7);
    /// ```
    pub fn with_error_bounds(epsilon: f64, delta: f64) -> Self {
        CountMinSketchBuilder {
            shape: Shape::ErrorBounds { epsilon, delta },
            capacity: DEFAULT_CAPACITY,
            seed: DEFAULT_UPDATE_SEED,
        }
    }

    /// Sets how many heavy hitters are tracked (default: 10).
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Sets a custom hash seed (default: 9001).
    ///
    /// Sketches with different seeds place the same item in different columns.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the sketch with zeroed counters and no heavy hitters.
    pub fn build<T: Hash + Eq + Clone>(self) -> Result<CountMinSketch<T>, Error> {
        let (width, depth) = match self.shape {
            Shape::Dimensions { width, depth } => (width, depth),
            Shape::ErrorBounds { epsilon, delta } => {
                (Self::suggest_width(epsilon)?, Self::suggest_depth(delta)?)
            }
        };

        if width == 0 {
            return Err(Error::non_positive("width", width).with_context("depth", depth));
        }
        if depth == 0 {
            return Err(Error::non_positive("depth", depth).with_context("width", width));
        }
        if self.capacity == 0 {
            return Err(Error::non_positive("capacity", self.capacity));
        }
        match width.checked_mul(depth) {
            Some(entries) if entries < MAX_TABLE_ENTRIES => {}
            _ => {
                return Err(Error::invalid_config(format!(
                    "width * depth must be < {MAX_TABLE_ENTRIES}"
                ))
                .with_context("width", width)
                .with_context("depth", depth));
            }
        }

        Ok(CountMinSketch::make(width, depth, self.capacity, self.seed))
    }

    /// Suggests the width for a target error `epsilon`: `ceil(1 / epsilon)`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use freqsketch::countmin::CountMinSketchBuilder;
    /// assert_eq!(CountMinSketchBuilder::suggest_width(0.1).unwrap(), 10);
    /// assert!(CountMinSketchBuilder::suggest_width(0.0).is_err());
    /// ```
    pub fn suggest_width(epsilon: f64) -> Result<usize, Error> {
        if !(epsilon > 0.0 && epsilon.is_finite()) {
            return Err(Error::non_positive("epsilon", epsilon));
        }
        let width = (1.0 / epsilon).ceil();
        if width >= MAX_TABLE_ENTRIES as f64 {
            return Err(
                Error::invalid_config(format!("width must be < {MAX_TABLE_ENTRIES}"))
                    .with_context("epsilon", epsilon),
            );
        }
        Ok(width as usize)
    }

    /// Suggests the depth for a target confidence `delta`: `ceil(log_0.5(1 - delta))`.
    ///
    /// `delta` must lie in `(0, 1)`. A `delta` so small that the derived depth rounds to
    /// zero is rejected as well.
    ///
    /// # Examples
    ///
    /// ```
    /// # use freqsketch::countmin::CountMinSketchBuilder;
    /// assert_eq!(CountMinSketchBuilder::suggest_depth(0.875).unwrap(), 3);
    /// assert!(CountMinSketchBuilder::suggest_depth(1.0).is_err());
    /// ```
    pub fn suggest_depth(delta: f64) -> Result<usize, Error> {
        if !(delta > 0.0 && delta < 1.0) {
            return Err(Error::invalid_config(format!(
                "delta must be in (0, 1), got {delta}"
            )));
        }
        // log_0.5(x) == -log2(x)
        let depth = (-(1.0 - delta).log2()).ceil();
        if depth < 1.0 {
            return Err(Error::invalid_config(format!(
                "delta {delta} derives a depth below 1"
            )));
        }
        Ok(depth as usize)
    }
}
