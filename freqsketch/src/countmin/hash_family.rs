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
use std::hash::Hasher;

use crate::hash::MurmurHash3X64128;

/// Maps an item to one column per row of the counter table.
///
/// The item is digested once with the sketch seed. Each row then rehashes the digest
/// together with its row index, so rows behave as independent hash functions while the
/// item itself is only walked once.
#[derive(Debug, Clone)]
pub(super) struct HashFamily {
    seed: u64,
    depth: usize,
    width: u64,
}

impl HashFamily {
    pub(super) fn new(seed: u64, depth: usize, width: usize) -> Self {
        HashFamily {
            seed,
            depth,
            width: width as u64,
        }
    }

    /// Returns the column for `item` in every row, in row order.
    pub(super) fn columns<Q: Hash + ?Sized>(&self, item: &Q) -> impl Iterator<Item = usize> {
        let (h1, h2) = MurmurHash3X64128::digest(item, self.seed);
        let seed = self.seed;
        let width = self.width;
        (0..self.depth).map(move |row| column_for(seed, h1, h2, row, width))
    }

    #[cfg(test)]
    pub(super) fn column<Q: Hash + ?Sized>(&self, item: &Q, row: usize) -> usize {
        let (h1, h2) = MurmurHash3X64128::digest(item, self.seed);
        column_for(self.seed, h1, h2, row, self.width)
    }
}

fn column_for(seed: u64, h1: u64, h2: u64, row: usize, width: u64) -> usize {
    let mut hasher = MurmurHash3X64128::with_seed(seed);
    hasher.write(&h1.to_le_bytes());
    hasher.write(&h2.to_le_bytes());
    hasher.write(&(row as u64).to_le_bytes());
    (hasher.finish128().0 % width) as usize
}
