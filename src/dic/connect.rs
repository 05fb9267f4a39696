/*
 *  Copyright (c) 2021 Works Applications Co., Ltd.
 *
 *  Licensed under the Apache License, Version 2.0 (the "License");
 *  you may not use this file except in compliance with the License.
 *  You may obtain a copy of the License at
 *
 *      http://www.apache.org/licenses/LICENSE-2.0
 *
 *   Unless required by applicable law or agreed to in writing, software
 *  distributed under the License is distributed on an "AS IS" BASIS,
 *  WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 *  See the License for the specific language governing permissions and
 *  limitations under the License.
 */

use crate::error::{WakachiError, WakachiResult};

/// Bigram connection cost table.
///
/// `cost(right, left)` is the cost of the transition from a node with
/// right connection id `right` to a node with left connection id `left`.
/// Id 0 is reserved for the BOS/EOS boundary context.
#[derive(Debug)]
pub struct ConnectionMatrix {
    data: Vec<i16>,
    num_right: usize,
    num_left: usize,
}

impl ConnectionMatrix {
    pub fn new(data: Vec<i16>, num_right: usize, num_left: usize) -> WakachiResult<ConnectionMatrix> {
        if data.len() != num_right * num_left {
            return Err(WakachiError::InvalidDataFormat(
                0,
                format!(
                    "connection matrix needs {}x{}={} entries, got {}",
                    num_right,
                    num_left,
                    num_right * num_left,
                    data.len()
                ),
            ));
        }
        Ok(ConnectionMatrix {
            data,
            num_right,
            num_left,
        })
    }

    /// Build a matrix from a cost function, mostly useful for tests
    pub fn from_fn<F: Fn(u16, u16) -> i16>(
        num_right: usize,
        num_left: usize,
        f: F,
    ) -> ConnectionMatrix {
        let mut data = Vec::with_capacity(num_right * num_left);
        for right in 0..num_right {
            for left in 0..num_left {
                data.push(f(right as u16, left as u16));
            }
        }
        ConnectionMatrix {
            data,
            num_right,
            num_left,
        }
    }

    #[inline(always)]
    fn index(&self, right: u16, left: u16) -> usize {
        let uright = right as usize;
        let uleft = left as usize;
        debug_assert!(uright < self.num_right);
        debug_assert!(uleft < self.num_left);
        uright * self.num_left + uleft
    }

    /// Gets the value of the connection matrix
    ///
    /// It is performance critical that this function
    /// 1. Has no branches
    /// 2. Is inlined to the caller
    #[inline(always)]
    pub fn cost(&self, right: u16, left: u16) -> i16 {
        self.data[self.index(right, left)]
    }

    /// Returns maximum number of right connection ID
    pub fn num_right(&self) -> usize {
        self.num_right
    }

    /// Returns maximum number of left connection ID
    pub fn num_left(&self) -> usize {
        self.num_left
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use claim::assert_matches;

    #[test]
    fn row_major_layout() {
        let conn = ConnectionMatrix::new(vec![0, 1, 2, 3, 4, 5], 2, 3).unwrap();
        assert_eq!(0, conn.cost(0, 0));
        assert_eq!(2, conn.cost(0, 2));
        assert_eq!(3, conn.cost(1, 0));
        assert_eq!(5, conn.cost(1, 2));
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let result = ConnectionMatrix::new(vec![0; 5], 2, 3);
        assert_matches!(result, Err(WakachiError::InvalidDataFormat(_, _)));
    }

    #[test]
    fn from_fn_matches_new() {
        let conn = ConnectionMatrix::from_fn(3, 3, |r, l| (r * 100 + l) as i16);
        assert_eq!(201, conn.cost(2, 1));
        assert_eq!(3, conn.num_right());
    }
}
