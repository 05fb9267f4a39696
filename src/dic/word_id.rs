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

use std::fmt::{Debug, Display, Formatter};

/// Dictionary word ID
///
/// Encode the word kind and the word internal ID as 4 bits and 28 bits
/// respectively.
/// Kind 0 - regular lexicon word
/// Kind 14 - OOV (the internal ID is the unknown word class)
/// Kind 15 - special nodes (BOS/EOS)
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[repr(transparent)]
pub struct WordId {
    raw: u32,
}

const WORD_MASK: u32 = 0x0fff_ffff;
const KIND_WORD: u32 = 0x0;
const KIND_OOV: u32 = 0xe;
const KIND_SPECIAL: u32 = 0xf;

impl Debug for WordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for WordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.is_special() {
            write!(f, "(special, {})", self.idx())
        } else if self.is_oov() {
            write!(f, "(oov, {})", self.idx())
        } else {
            write!(f, "(word, {})", self.idx())
        }
    }
}

impl WordId {
    pub const BOS: WordId = WordId::from_parts(KIND_SPECIAL, 0);
    pub const EOS: WordId = WordId::from_parts(KIND_SPECIAL, 1);

    const fn from_parts(kind: u32, word: u32) -> WordId {
        WordId {
            raw: (kind << 28) | (word & WORD_MASK),
        }
    }

    /// Create an ID for a regular lexicon word
    pub fn word(id: u32) -> WordId {
        debug_assert_eq!(id & !WORD_MASK, 0);
        WordId::from_parts(KIND_WORD, id)
    }

    /// Create an ID for an unknown word of the given class
    pub fn oov(class: u32) -> WordId {
        debug_assert_eq!(class & !WORD_MASK, 0);
        WordId::from_parts(KIND_OOV, class)
    }

    /// Extract the word internal ID
    pub fn idx(&self) -> u32 {
        self.raw & WORD_MASK
    }

    /// Is true when the word does not come from the lexicon.
    /// BOS and EOS are also treated as OOV.
    pub fn is_oov(&self) -> bool {
        self.raw >> 28 != KIND_WORD
    }

    /// Is true for the BOS/EOS sentinels
    pub fn is_special(&self) -> bool {
        self.raw >> 28 == KIND_SPECIAL
    }
}
