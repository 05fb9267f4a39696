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

use lazy_static::lazy_static;

use wakachi::analysis::Tagger;
use wakachi::dic::connect::ConnectionMatrix;
use wakachi::dic::lexicon::MemoryLexicon;
use wakachi::dic::unknown::SimpleUnknownProvider;
use wakachi::dic::Dictionary;

// id 0 is the boundary context, 1 nominal words, 2 particles/verbs
pub const LEXICON_CSV: &str = "\
東,1,1,500,名詞,方角
東京,1,1,300,名詞,地名
東京都,1,1,400,名詞,地名
京都,1,1,350,名詞,地名
都,1,1,600,名詞,接尾
に,2,2,100,助詞,格助詞
行く,2,2,200,動詞,五段
";

pub fn matrix() -> ConnectionMatrix {
    ConnectionMatrix::from_fn(3, 3, |right, left| match (right, left) {
        (0, _) | (_, 0) => 0,
        (1, 1) => 300,
        (1, 2) => 50,
        (2, 1) => 50,
        (2, 2) => 100,
        _ => unreachable!(),
    })
}

pub fn build_dict() -> Dictionary {
    let lexicon = MemoryLexicon::from_csv(LEXICON_CSV.as_bytes(), "UNK").expect("bad lexicon");
    Dictionary::new(lexicon, SimpleUnknownProvider::new(1, 1, 10000), matrix())
        .expect("bad dictionary")
}

lazy_static! {
    pub static ref DICT: Dictionary = build_dict();
}

pub fn tagger() -> Tagger<&'static Dictionary> {
    Tagger::new(&*DICT)
}
