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

/// A morpheme of the analysis result: a surface slice of the input
/// together with its dictionary feature data. Immutable once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Morpheme<'a> {
    surface: &'a str,
    feature: &'a str,
    word_id: WordId,
    begin: usize,
    end: usize,
    total_cost: i32,
}

impl<'a> Morpheme<'a> {
    pub(crate) fn new(
        surface: &'a str,
        feature: &'a str,
        word_id: WordId,
        begin: usize,
        end: usize,
        total_cost: i32,
    ) -> Morpheme<'a> {
        Morpheme {
            surface,
            feature,
            word_id,
            begin,
            end,
            total_cost,
        }
    }

    /// Surface substring of the original input
    pub fn surface(&self) -> &'a str {
        self.surface
    }

    /// Feature/tag data resolved from the dictionary
    pub fn feature(&self) -> &'a str {
        self.feature
    }

    pub fn word_id(&self) -> WordId {
        self.word_id
    }

    /// Is true when the word does not come from the lexicon
    pub fn is_oov(&self) -> bool {
        self.word_id.is_oov()
    }

    /// Begin offset in chars of the surface in the input
    pub fn begin(&self) -> usize {
        self.begin
    }

    /// End offset in chars of the surface in the input
    pub fn end(&self) -> usize {
        self.end
    }

    /// The [begin, end) char range
    pub fn char_range(&self) -> Range<usize> {
        self.begin..self.end
    }

    /// Accumulated minimum path cost from BOS up to this morpheme
    pub fn total_cost(&self) -> i32 {
        self.total_cost
    }
}

impl fmt::Display for Morpheme<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}\t{}", self.surface, self.feature)
    }
}
