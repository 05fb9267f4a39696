/*
 * Copyright (c) 2021 Works Applications Co., Ltd.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

use std::ops::Range;

/// View of the input text with a char-to-byte offset table.
///
/// All lattice offsets are in chars (codepoints); surfaces are sliced
/// from the original string by the byte ranges computed here.
pub struct InputText<'a> {
    original: &'a str,
    // byte offset of every char boundary, length char_len + 1
    byte_offsets: Vec<usize>,
}

impl<'a> InputText<'a> {
    pub fn new(original: &'a str) -> InputText<'a> {
        let mut byte_offsets: Vec<usize> = Vec::with_capacity(original.len() + 1);
        byte_offsets.extend(original.char_indices().map(|(b, _)| b));
        byte_offsets.push(original.len());
        InputText {
            original,
            byte_offsets,
        }
    }

    /// Full original text
    pub fn original(&self) -> &'a str {
        self.original
    }

    /// Length in chars
    pub fn char_len(&self) -> usize {
        self.byte_offsets.len() - 1
    }

    /// Byte offset of the char boundary at `char_idx`
    pub fn byte_offset(&self, char_idx: usize) -> usize {
        self.byte_offsets[char_idx]
    }

    /// Remaining text starting at the char boundary `char_idx`
    pub fn suffix(&self, char_idx: usize) -> &'a str {
        &self.original[self.byte_offsets[char_idx]..]
    }

    /// Slice of the original text for a char range
    pub fn char_slice(&self, range: Range<usize>) -> &'a str {
        &self.original[self.byte_offsets[range.start]..self.byte_offsets[range.end]]
    }

    /// Char at the char boundary `char_idx`, if any
    pub fn char_at(&self, char_idx: usize) -> Option<char> {
        self.suffix(char_idx).chars().next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_offsets() {
        let input = InputText::new("abc");
        assert_eq!(3, input.char_len());
        assert_eq!(1, input.byte_offset(1));
        assert_eq!("bc", input.char_slice(1..3));
    }

    #[test]
    fn multibyte_offsets() {
        let input = InputText::new("す\u{3082}も");
        assert_eq!(3, input.char_len());
        assert_eq!(3, input.byte_offset(1));
        assert_eq!(9, input.byte_offset(3));
        assert_eq!("も", input.char_slice(2..3));
        assert_eq!(Some('も'), input.char_at(2));
    }

    #[test]
    fn empty_text() {
        let input = InputText::new("");
        assert_eq!(0, input.char_len());
        assert_eq!("", input.char_slice(0..0));
        assert_eq!(None, input.char_at(0));
    }
}
