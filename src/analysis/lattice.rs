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

use std::io::Write;

use crate::analysis::node::{LatticeNode, Node, NodeIdx, PathCost, RightId};
use crate::dic::connect::ConnectionMatrix;
use crate::error::{WakachiError, WakachiResult};
use crate::input::InputText;

/// Lattice node for the Viterbi search.
/// Extremely small for better cache locality.
#[derive(Clone)]
struct VNode {
    total_cost: i32,
    right_id: u16,
}

impl RightId for VNode {
    #[inline]
    fn right_id(&self) -> u16 {
        self.right_id
    }
}

impl PathCost for VNode {
    #[inline]
    fn total_cost(&self) -> i32 {
        self.total_cost
    }
}

impl VNode {
    #[inline]
    fn new(right_id: u16, total_cost: i32) -> VNode {
        VNode {
            total_cost,
            right_id,
        }
    }
}

/// Lattice which is constructed for performing the Viterbi search.
/// Contains several parallel arrays.
/// First level of parallel arrays is indexed by end word boundary.
/// Word boundaries are always aligned to char boundaries, not to byte
/// boundaries.
///
/// `indices` keeps, for every stored node, the handle of its committed
/// minimum-cost predecessor. It is the only edge information retained;
/// nothing else survives decoding.
///
/// During the successive analysis, we do not drop inner vectors, so
/// the size of vectors never shrink.
/// You must use the size parameter to check the current size and never
/// access vectors after the end.
pub struct Lattice {
    ends: Vec<Vec<VNode>>,
    ends_full: Vec<Vec<Node>>,
    indices: Vec<Vec<NodeIdx>>,
    eos: Option<(NodeIdx, i32)>,
    size: usize,
}

impl Default for Lattice {
    fn default() -> Self {
        Lattice {
            ends: Vec::new(),
            ends_full: Vec::new(),
            indices: Vec::new(),
            eos: None,
            size: 0,
        }
    }
}

impl Lattice {
    fn reset_vec<T>(data: &mut Vec<Vec<T>>, target: usize) {
        for v in data.iter_mut() {
            v.clear();
        }
        let cur_len = data.len();
        if cur_len <= target {
            data.reserve(target - cur_len);
            for _ in cur_len..target {
                data.push(Vec::with_capacity(16))
            }
        }
    }

    /// Prepare lattice for the next analysis of a sentence with the
    /// specified length (in chars)
    pub fn reset(&mut self, length: usize) {
        Self::reset_vec(&mut self.ends, length + 1);
        Self::reset_vec(&mut self.ends_full, length + 1);
        Self::reset_vec(&mut self.indices, length + 1);
        self.eos = None;
        self.size = length + 1;
        self.connect_bos();
    }

    fn connect_bos(&mut self) {
        self.ends[0].push(VNode::new(0, 0));
        self.ends_full[0].push(Node::bos());
        self.indices[0].push(NodeIdx::empty());
    }

    /// Find EOS node -- finish the lattice construction
    pub fn connect_eos(&mut self, conn: &ConnectionMatrix) -> WakachiResult<()> {
        let boundary = (self.size - 1) as u16;
        let node = Node::eos(boundary);
        let (idx, cost) = self.connect_node(&node, conn);
        if cost == i32::MAX {
            Err(WakachiError::EosBosDisconnect)
        } else {
            self.eos = Some((idx, cost));
            Ok(())
        }
    }

    /// Insert a single node in the lattice, committing the path to the
    /// minimum-cost predecessor.
    /// Assumption: lattice for all previous boundaries is already constructed
    pub fn insert(&mut self, node: Node, conn: &ConnectionMatrix) -> i32 {
        let (idx, cost) = self.connect_node(&node, conn);
        debug_assert_ne!(cost, i32::MAX);
        let end_idx = node.end();
        self.ends[end_idx].push(VNode::new(node.right_id(), cost));
        self.indices[end_idx].push(idx);
        self.ends_full[end_idx].push(node);
        debug_assert!(self.ends[end_idx].len() <= u16::MAX as usize);
        cost
    }

    /// Carry all paths alive at the `begin` boundary over a transparent
    /// span to the `end` boundary, as-is: same accumulated cost, same
    /// committed predecessor, same span. No transition cost is charged.
    pub fn carry_over(&mut self, begin: usize, end: usize) {
        debug_assert!(begin < end);
        let vnodes = self.ends[begin].clone();
        self.ends[end].extend(vnodes);
        let nodes = self.ends_full[begin].clone();
        self.ends_full[end].extend(nodes);
        let indices = self.indices[begin].clone();
        self.indices[end].extend(indices);
    }

    /// Find the path with the minimal cost through the lattice to the
    /// attached node. Ties keep the first-seen predecessor.
    /// Assumption: lattice for all previous boundaries is already constructed
    #[inline]
    pub fn connect_node(&self, r_node: &Node, conn: &ConnectionMatrix) -> (NodeIdx, i32) {
        let begin = r_node.begin();

        let node_cost = r_node.cost() as i32;
        let mut min_cost = i32::MAX;
        let mut prev_idx = NodeIdx::empty();

        for (i, l_node) in self.ends[begin].iter().enumerate() {
            if !l_node.is_connected_to_bos() {
                continue;
            }

            let connect_cost = conn.cost(l_node.right_id(), r_node.left_id()) as i32;
            let new_cost = l_node.total_cost() + connect_cost + node_cost;
            if new_cost < min_cost {
                min_cost = new_cost;
                prev_idx = NodeIdx::new(begin as u16, i as u16);
            }
        }

        (prev_idx, min_cost)
    }

    /// Checks if there exists at least one node at the word end boundary
    pub fn has_previous_node(&self, i: usize) -> bool {
        self.ends.get(i).map(|d| !d.is_empty()).unwrap_or(false)
    }

    /// Lookup a node for the index
    pub fn node(&self, id: NodeIdx) -> (&Node, i32) {
        let node = &self.ends_full[id.end() as usize][id.index() as usize];
        let cost = self.ends[id.end() as usize][id.index() as usize].total_cost;
        (node, cost)
    }

    /// Accumulated cost of the full minimum path, when EOS was connected
    pub fn path_cost(&self) -> Option<i32> {
        self.eos.map(|(_, cost)| cost)
    }

    /// Fill the path with the minimum cost (indices only).
    /// **Attention**: the path will be reversed (end to beginning) and will need to be traversed
    /// in the reverse order.
    pub fn fill_top_path(&self, result: &mut Vec<NodeIdx>) {
        let (eos_prev, _) = match self.eos {
            Some(v) => v,
            None => return,
        };
        let mut idx = eos_prev;
        loop {
            let (node, _) = self.node(idx);
            // BOS, or a carry-over copy of it on an all-space input
            if node.is_special_node() {
                break;
            }
            result.push(idx);
            idx = self.indices[idx.end() as usize][idx.index() as usize];
        }
    }
}

impl Lattice {
    pub fn dump<W: Write>(&self, input: &InputText, out: &mut W) -> WakachiResult<()> {
        let mut dump_idx = 0;

        for boundary in (0..self.size).rev() {
            for r_node in &self.ends_full[boundary] {
                let surface = if r_node.is_special_node() {
                    "(null)"
                } else {
                    input.char_slice(r_node.char_range())
                };

                write!(out, "{}: {} {}:", dump_idx, surface, r_node)?;
                for l_node in &self.ends[r_node.begin()] {
                    write!(out, " {}", l_node.total_cost())?;
                }
                writeln!(out)?;

                dump_idx += 1;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dic::word_id::WordId;
    use claim::assert_matches;

    // uniform transition cost 1, except from/to the boundary id 0
    fn conn() -> ConnectionMatrix {
        ConnectionMatrix::from_fn(4, 4, |r, l| if r == 0 || l == 0 { 0 } else { 1 })
    }

    fn word(begin: u16, end: u16, cost: i16, id: u32) -> Node {
        Node::new(begin, end, 1, 1, cost, WordId::word(id))
    }

    #[test]
    fn single_node_path() {
        let conn = conn();
        let mut lattice = Lattice::default();
        lattice.reset(1);
        let cost = lattice.insert(word(0, 1, 5, 0), &conn);
        assert_eq!(5, cost);
        lattice.connect_eos(&conn).unwrap();
        assert_eq!(Some(5), lattice.path_cost());

        let mut path = Vec::new();
        lattice.fill_top_path(&mut path);
        assert_eq!(1, path.len());
        let (node, _) = lattice.node(path[0]);
        assert_eq!(WordId::word(0), node.word_id());
    }

    #[test]
    fn shorter_path_wins() {
        // "ab": A(5) + B(3) with two transitions loses to AB(6) with one
        let conn = ConnectionMatrix::from_fn(2, 2, |r, l| if r == 0 || l == 0 { 0 } else { 1 });
        let mut lattice = Lattice::default();
        lattice.reset(2);
        lattice.insert(word(0, 1, 5, 0), &conn);
        lattice.insert(word(1, 2, 3, 1), &conn);
        lattice.insert(word(0, 2, 6, 2), &conn);
        lattice.connect_eos(&conn).unwrap();

        assert_eq!(Some(6), lattice.path_cost());
        let mut path = Vec::new();
        lattice.fill_top_path(&mut path);
        assert_eq!(1, path.len());
        let (node, total) = lattice.node(path[0]);
        assert_eq!(WordId::word(2), node.word_id());
        assert_eq!(6, total);
    }

    #[test]
    fn tie_keeps_first_seen() {
        let conn = conn();
        let mut lattice = Lattice::default();
        lattice.reset(2);
        lattice.insert(word(0, 1, 5, 10), &conn);
        lattice.insert(word(0, 1, 5, 11), &conn);
        let (prev, _) = lattice.connect_node(&word(1, 2, 1, 12), &conn);
        assert_eq!(NodeIdx::new(1, 0), prev);
        let (node, _) = lattice.node(prev);
        assert_eq!(WordId::word(10), node.word_id());
    }

    #[test]
    fn carry_over_is_transparent() {
        let conn = conn();

        // "ax b": space at offset 1..2 carried over, no transition charged
        let mut lattice = Lattice::default();
        lattice.reset(3);
        lattice.insert(word(0, 1, 5, 0), &conn);
        lattice.carry_over(1, 2);
        lattice.insert(word(2, 3, 3, 1), &conn);
        lattice.connect_eos(&conn).unwrap();

        // same total as the adjacent "ab" lattice
        assert_eq!(Some(9), lattice.path_cost());

        let mut path = Vec::new();
        lattice.fill_top_path(&mut path);
        let words: Vec<WordId> = path
            .iter()
            .rev()
            .map(|idx| lattice.node(*idx).0.word_id())
            .collect();
        assert_eq!(vec![WordId::word(0), WordId::word(1)], words);
    }

    #[test]
    fn all_space_input_has_empty_path() {
        let conn = conn();
        let mut lattice = Lattice::default();
        lattice.reset(2);
        lattice.carry_over(0, 2);
        lattice.connect_eos(&conn).unwrap();

        assert_eq!(Some(0), lattice.path_cost());
        let mut path = Vec::new();
        lattice.fill_top_path(&mut path);
        assert!(path.is_empty());
    }

    #[test]
    fn eos_disconnect_is_an_error() {
        let conn = conn();
        let mut lattice = Lattice::default();
        lattice.reset(2);
        lattice.insert(word(0, 1, 5, 0), &conn);
        // nothing ends at the final boundary
        assert_matches!(
            lattice.connect_eos(&conn),
            Err(WakachiError::EosBosDisconnect)
        );
    }

    #[test]
    fn dump_lists_all_nodes() {
        let conn = conn();
        let input = InputText::new("ab");
        let mut lattice = Lattice::default();
        lattice.reset(2);
        lattice.insert(word(0, 1, 5, 0), &conn);
        lattice.insert(word(1, 2, 3, 1), &conn);
        lattice.connect_eos(&conn).unwrap();

        let mut out = Vec::new();
        lattice.dump(&input, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        // two word nodes plus BOS
        assert_eq!(3, text.lines().count());
        assert!(text.contains("(null)"));
    }
}
