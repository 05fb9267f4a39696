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
use std::ops::Deref;

use crate::analysis::lattice::Lattice;
use crate::analysis::morpheme::Morpheme;
use crate::analysis::node::{LatticeNode, Node};
use crate::dic::connect::ConnectionMatrix;
use crate::dic::lexicon::WordLexicon;
use crate::dic::unknown::UnknownWordProvider;
use crate::error::{WakachiError, WakachiResult};
use crate::input::InputText;

pub mod lattice;
pub mod morpheme;
pub mod node;

/// Node offsets are u16, limiting the analyzable input length
pub const MAX_INPUT_CHARS: usize = u16::MAX as usize - 1;

/// Consumer of candidate nodes discovered by the dictionary
/// collaborators. The collaborators push their discoveries; the
/// lattice builder is the receiving end.
pub trait NodeSink {
    fn accept(&mut self, node: Node);
}

/// Provides access to dictionary data
pub trait DictionaryAccess {
    fn lexicon(&self) -> &dyn WordLexicon;
    fn unknown(&self) -> &dyn UnknownWordProvider;
    fn conn_matrix(&self) -> &ConnectionMatrix;
}

impl<T> DictionaryAccess for T
where
    T: Deref,
    <T as Deref>::Target: DictionaryAccess,
{
    fn lexicon(&self) -> &dyn WordLexicon {
        <T as Deref>::deref(self).lexicon()
    }

    fn unknown(&self) -> &dyn UnknownWordProvider {
        <T as Deref>::deref(self).unknown()
    }

    fn conn_matrix(&self) -> &ConnectionMatrix {
        <T as Deref>::deref(self).conn_matrix()
    }
}

/// Sink which builds the lattice while the dictionary collaborators
/// report candidates starting at the `begin` boundary. Space candidates
/// are carried over instead of being connected; everything else is
/// Viterbi-connected on the spot.
struct LatticeSink<'a> {
    lattice: &'a mut Lattice,
    conn: &'a ConnectionMatrix,
    begin: usize,
    empty: bool,
}

impl<'a> LatticeSink<'a> {
    fn new(lattice: &'a mut Lattice, begin: usize, conn: &'a ConnectionMatrix) -> LatticeSink<'a> {
        LatticeSink {
            lattice,
            conn,
            begin,
            empty: true,
        }
    }

    fn has_candidates(&self) -> bool {
        !self.empty
    }
}

impl NodeSink for LatticeSink<'_> {
    fn accept(&mut self, node: Node) {
        self.empty = false;
        debug_assert_eq!(node.begin(), self.begin);
        if node.is_space() {
            self.lattice.carry_over(self.begin, node.end());
        } else {
            self.lattice.insert(node, self.conn);
        }
    }
}

/// Morphological analyzer: finds the minimum-cost segmentation of an
/// input text over the lattice of candidates its dictionary provides.
///
/// Generic over dictionary pointers: usable where the dictionary is a
/// struct itself, `&`, `Rc<.>`, `Arc<.>`.
pub struct Tagger<D> {
    dictionary: D,
    debug: bool,
}

impl<D: DictionaryAccess> Tagger<D> {
    /// Create a new non-debug tagger
    pub fn new(dictionary: D) -> Tagger<D> {
        Self::create(dictionary, false)
    }

    /// Create a new tagger with the following options
    pub fn create(dictionary: D, debug: bool) -> Tagger<D> {
        Tagger { dictionary, debug }
    }

    pub fn set_debug(&mut self, debug: bool) -> bool {
        std::mem::replace(&mut self.debug, debug)
    }

    /// Borrow current dictionary
    pub fn dict(&self) -> &D {
        &self.dictionary
    }

    /// Break text into `Morpheme`s
    pub fn tokenize<'a>(&'a self, text: &'a str) -> WakachiResult<Vec<Morpheme<'a>>> {
        let input = InputText::new(text);
        let lattice = self.decode(&input)?;

        let mut indices = Vec::new();
        lattice.fill_top_path(&mut indices);

        let lexicon = self.dictionary.lexicon();
        let mut result = Vec::with_capacity(indices.len());
        for idx in indices.iter().rev() {
            let (node, total_cost) = lattice.node(*idx);
            result.push(Morpheme::new(
                input.char_slice(node.char_range()),
                lexicon.word_data(node.word_id()),
                node.word_id(),
                node.begin(),
                node.end(),
                total_cost,
            ));
        }
        Ok(result)
    }

    /// Break text into surface substrings, skipping feature resolution
    pub fn wakati<'a>(&self, text: &'a str) -> WakachiResult<Vec<&'a str>> {
        let input = InputText::new(text);
        let lattice = self.decode(&input)?;

        let mut indices = Vec::new();
        lattice.fill_top_path(&mut indices);

        Ok(indices
            .iter()
            .rev()
            .map(|idx| input.char_slice(lattice.node(*idx).0.char_range()))
            .collect())
    }

    /// One left-to-right sweep: query the collaborators at every
    /// reachable boundary, connecting candidates as they arrive, then
    /// connect EOS.
    fn decode(&self, input: &InputText) -> WakachiResult<Lattice> {
        let len = input.char_len();
        if len > MAX_INPUT_CHARS {
            return Err(WakachiError::InputTooLong(len, MAX_INPUT_CHARS));
        }

        let lexicon = self.dictionary.lexicon();
        let unknown = self.dictionary.unknown();
        let conn = self.dictionary.conn_matrix();

        let mut lattice = Lattice::default();
        lattice.reset(len);

        for i in 0..len {
            if !lattice.has_previous_node(i) {
                continue;
            }

            let mut sink = LatticeSink::new(&mut lattice, i, conn);
            lexicon.search(input, i, &mut sink);
            let has_word = sink.has_candidates();
            unknown.provide(input, i, has_word, &mut sink);

            if !sink.has_candidates() {
                return Err(WakachiError::LatticeDisconnect(i));
            }
        }

        lattice.connect_eos(conn)?;

        if self.debug {
            println!("=== Lattice dump:");
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lattice.dump(input, &mut lock)?;
            lock.flush()?;
        }

        Ok(lattice)
    }
}
