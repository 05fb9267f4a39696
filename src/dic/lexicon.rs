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

use std::collections::HashMap;
use std::io::Read;

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use csv::{ReaderBuilder, Trim};
use itertools::Itertools;

use crate::analysis::node::Node;
use crate::analysis::NodeSink;
use crate::dic::connect::ConnectionMatrix;
use crate::dic::word_id::WordId;
use crate::error::{WakachiError, WakachiResult};
use crate::input::InputText;

/// Known-word dictionary collaborator.
///
/// `search` must be read-only and side-effect free; independent
/// analyses may query it concurrently.
pub trait WordLexicon: Sync + Send {
    /// Invokes the sink once per known word starting at `offset`,
    /// each candidate fully populated (span, connection ids, cost)
    fn search(&self, input: &InputText, offset: usize, sink: &mut dyn NodeSink);

    /// Feature/tag data of a word; used only during Morpheme
    /// construction, never while decoding
    fn word_data(&self, word_id: WordId) -> &str;
}

#[derive(Debug)]
struct WordParam {
    left_id: u16,
    right_id: u16,
    cost: i16,
}

/// In-memory lexicon built from MeCab-style CSV rows
/// `surface,left_id,right_id,cost,feature...`.
///
/// Common-prefix lookup is an anchored overlapping Aho-Corasick scan
/// over the surface set; homonyms share one pattern and keep their
/// CSV order.
#[derive(Debug)]
pub struct MemoryLexicon {
    ac: AhoCorasick,
    // per pattern: surface length in chars + word ids sharing the surface
    surfaces: Vec<(u16, Vec<u32>)>,
    // per word id, in CSV row order
    params: Vec<WordParam>,
    features: Vec<String>,
    unk_feature: String,
}

impl MemoryLexicon {
    pub fn from_csv<R: Read>(reader: R, unk_feature: &str) -> WakachiResult<MemoryLexicon> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(reader);

        let mut patterns: Vec<String> = Vec::new();
        let mut pattern_ids: HashMap<String, usize> = HashMap::new();
        let mut surfaces: Vec<(u16, Vec<u32>)> = Vec::new();
        let mut params: Vec<WordParam> = Vec::new();
        let mut features: Vec<String> = Vec::new();

        for (line, record) in rdr.records().enumerate() {
            let record = record?;
            let surface = record
                .get(0)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| WakachiError::InvalidDataFormat(line, "empty surface".into()))?;
            if record.len() < 4 {
                return Err(WakachiError::InvalidDataFormat(
                    line,
                    format!("need at least 4 columns, got {}", record.len()),
                ));
            }
            let left_id: u16 = record[1].parse()?;
            let right_id: u16 = record[2].parse()?;
            let cost: i16 = record[3].parse()?;
            let feature = record.iter().skip(4).join(",");

            let word_id = params.len() as u32;
            params.push(WordParam {
                left_id,
                right_id,
                cost,
            });
            features.push(feature);

            match pattern_ids.get(surface) {
                Some(&pattern) => surfaces[pattern].1.push(word_id),
                None => {
                    let char_len = surface.chars().count() as u16;
                    pattern_ids.insert(surface.to_owned(), patterns.len());
                    patterns.push(surface.to_owned());
                    surfaces.push((char_len, vec![word_id]));
                }
            }
        }

        let ac = AhoCorasickBuilder::new()
            .anchored(true)
            .match_kind(MatchKind::Standard)
            .build(&patterns);

        Ok(MemoryLexicon {
            ac,
            surfaces,
            params,
            features,
            unk_feature: unk_feature.to_owned(),
        })
    }

    /// Fail fast when a word references a connection id the matrix
    /// does not have; decoding would index out of bounds otherwise
    pub fn validate(&self, conn: &ConnectionMatrix) -> WakachiResult<()> {
        for (word_id, param) in self.params.iter().enumerate() {
            if param.left_id as usize >= conn.num_left()
                || param.right_id as usize >= conn.num_right()
            {
                return Err(WakachiError::InvalidConnectionId(format!(
                    "word {} has connection ids ({}, {}), matrix is {}x{}",
                    word_id,
                    param.left_id,
                    param.right_id,
                    conn.num_right(),
                    conn.num_left()
                )));
            }
        }
        Ok(())
    }

    /// Number of words in the lexicon
    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

impl WordLexicon for MemoryLexicon {
    fn search(&self, input: &InputText, offset: usize, sink: &mut dyn NodeSink) {
        let tail = input.suffix(offset);
        if tail.is_empty() {
            return;
        }

        let begin = offset as u16;
        for m in self.ac.find_overlapping_iter(tail) {
            debug_assert_eq!(0, m.start());
            let (char_len, word_ids) = &self.surfaces[m.pattern()];
            let end = begin + char_len;
            for &word_id in word_ids {
                let param = &self.params[word_id as usize];
                sink.accept(Node::new(
                    begin,
                    end,
                    param.left_id,
                    param.right_id,
                    param.cost,
                    WordId::word(word_id),
                ));
            }
        }
    }

    fn word_data(&self, word_id: WordId) -> &str {
        if word_id.is_oov() {
            return &self.unk_feature;
        }
        let idx = word_id.idx() as usize;
        debug_assert!(idx < self.features.len());
        self.features
            .get(idx)
            .map(String::as_str)
            .unwrap_or(&self.unk_feature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::node::LatticeNode;

    const LEXICON: &str = "\
東,1,1,100,名詞,地名
東京,1,1,200,名詞,地名
東京,2,2,210,名詞,会社名
京都,1,1,150,名詞,地名
";

    fn lexicon() -> MemoryLexicon {
        MemoryLexicon::from_csv(LEXICON.as_bytes(), "UNK").expect("bad test lexicon")
    }

    fn collect(lex: &MemoryLexicon, text: &str, offset: usize) -> Vec<Node> {
        struct Collect(Vec<Node>);
        impl NodeSink for Collect {
            fn accept(&mut self, node: Node) {
                self.0.push(node);
            }
        }
        let input = InputText::new(text);
        let mut sink = Collect(Vec::new());
        lex.search(&input, offset, &mut sink);
        sink.0
    }

    #[test]
    fn common_prefix_search() {
        let lex = lexicon();
        let nodes = collect(&lex, "東京都", 0);
        // 東 plus both 東京 homonyms, in CSV order
        assert_eq!(3, nodes.len());
        assert_eq!(0..1, nodes[0].char_range());
        assert_eq!(0..2, nodes[1].char_range());
        assert_eq!(0..2, nodes[2].char_range());
        assert_eq!(WordId::word(1), nodes[1].word_id());
        assert_eq!(WordId::word(2), nodes[2].word_id());
        assert_eq!(2, nodes[2].left_id());
    }

    #[test]
    fn search_at_inner_offset() {
        let lex = lexicon();
        let nodes = collect(&lex, "東京都", 1);
        assert_eq!(1, nodes.len());
        assert_eq!(1..3, nodes[0].char_range());
        assert_eq!(WordId::word(3), nodes[0].word_id());
    }

    #[test]
    fn no_match_is_silent() {
        let lex = lexicon();
        assert!(collect(&lex, "大阪", 0).is_empty());
        assert!(collect(&lex, "", 0).is_empty());
    }

    #[test]
    fn word_data_resolution() {
        let lex = lexicon();
        assert_eq!("名詞,地名", lex.word_data(WordId::word(0)));
        assert_eq!("名詞,会社名", lex.word_data(WordId::word(2)));
        assert_eq!("UNK", lex.word_data(WordId::oov(0)));
    }

    #[test]
    fn malformed_rows_are_rejected() {
        let short = MemoryLexicon::from_csv("東,1,1".as_bytes(), "UNK");
        assert!(short.is_err());
        let bad_id = MemoryLexicon::from_csv("東,x,1,100".as_bytes(), "UNK");
        assert!(bad_id.is_err());
    }

    #[test]
    fn len_counts_homonyms() {
        assert_eq!(4, lexicon().len());
        assert!(!lexicon().is_empty());
    }
}
