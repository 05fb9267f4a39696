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

use std::fmt;
use std::ops::Range;

use crate::dic::word_id::WordId;

/// Accessor trait for right connection id
pub trait RightId {
    fn right_id(&self) -> u16;
}

/// Accessor trait for the full path cost
pub trait PathCost {
    fn total_cost(&self) -> i32;

    #[inline]
    fn is_connected_to_bos(&self) -> bool {
        self.total_cost() != i32::MAX
    }
}

pub trait LatticeNode: RightId {
    fn begin(&self) -> usize;
    fn end(&self) -> usize;
    fn cost(&self) -> i16;
    fn word_id(&self) -> WordId;
    fn left_id(&self) -> u16;

    /// Is true when the word does not come from the dictionary.
    /// BOS and EOS are also treated as OOV.
    #[inline]
    fn is_oov(&self) -> bool {
        self.word_id().is_oov()
    }

    /// If a node is a special system node like BOS or EOS.
    #[inline]
    fn is_special_node(&self) -> bool {
        self.word_id().is_special()
    }

    /// Utility method for extracting [begin, end) char range.
    #[inline]
    fn char_range(&self) -> Range<usize> {
        self.begin()..self.end()
    }
}

/// Handle of a lattice node: the end boundary it is stored under and
/// its index inside that boundary slot. Replaces the prev pointer of
/// the classic formulation.
#[derive(Clone, Copy, Eq, PartialEq, Debug)]
pub struct NodeIdx {
    end: u16,
    index: u16,
}

impl NodeIdx {
    pub fn empty() -> NodeIdx {
        NodeIdx {
            end: u16::MAX,
            index: u16::MAX,
        }
    }

    pub fn new(end: u16, index: u16) -> NodeIdx {
        NodeIdx { end, index }
    }

    pub fn end(&self) -> u16 {
        self.end
    }

    pub fn index(&self) -> u16 {
        self.index
    }
}

/// Candidate morpheme occurrence.
///
/// Arrives from the dictionary collaborators fully populated; the
/// lattice only decides its predecessor and accumulated path cost.
#[derive(Clone, Debug)]
pub struct Node {
    begin: u16,
    end: u16,
    left_id: u16,
    right_id: u16,
    cost: i16,
    word_id: WordId,
    space: bool,
}

impl Node {
    pub fn new(
        begin: u16,
        end: u16,
        left_id: u16,
        right_id: u16,
        cost: i16,
        word_id: WordId,
    ) -> Node {
        Node {
            begin,
            end,
            left_id,
            right_id,
            cost,
            word_id,
            space: false,
        }
    }

    /// A transparent delimiter span. Never connected nor charged for:
    /// the lattice carries paths over it unmodified.
    pub fn space(begin: u16, end: u16) -> Node {
        Node {
            begin,
            end,
            left_id: 0,
            right_id: 0,
            cost: 0,
            word_id: WordId::oov(0),
            space: true,
        }
    }

    /// The BOS sentinel: zero-width boundary node with cost 0 and the
    /// boundary connection context id 0. Carries no per-analysis state.
    pub const fn bos() -> Node {
        Node {
            begin: 0,
            end: 0,
            left_id: 0,
            right_id: 0,
            cost: 0,
            word_id: WordId::BOS,
            space: false,
        }
    }

    /// The EOS sentinel at the given text end boundary
    pub const fn eos(boundary: u16) -> Node {
        Node {
            begin: boundary,
            end: boundary,
            left_id: 0,
            right_id: 0,
            cost: 0,
            word_id: WordId::EOS,
            space: false,
        }
    }

    pub fn is_space(&self) -> bool {
        self.space
    }
}

impl RightId for Node {
    #[inline(always)]
    fn right_id(&self) -> u16 {
        self.right_id
    }
}

impl LatticeNode for Node {
    fn begin(&self) -> usize {
        self.begin as usize
    }

    fn end(&self) -> usize {
        self.end as usize
    }

    fn cost(&self) -> i16 {
        self.cost
    }

    fn word_id(&self) -> WordId {
        self.word_id
    }

    fn left_id(&self) -> u16 {
        self.left_id
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {} {}",
            self.begin, self.end, self.word_id, self.left_id, self.right_id, self.cost
        )
    }
}
