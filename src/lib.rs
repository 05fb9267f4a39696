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

//! Viterbi lattice core for morphological analysis of text without
//! explicit word boundaries.
//!
//! The main entry point of the library is the
//! [`Tagger`](analysis/struct.Tagger.html) struct, which finds the
//! globally minimum-cost segmentation of an input over a lattice of
//! dictionary candidates and returns it as a sequence of
//! [`Morpheme`](analysis/morpheme/struct.Morpheme.html)s.

pub mod analysis;
pub mod dic;
pub mod error;
pub mod input;

pub mod prelude {
    pub use crate::{
        analysis::morpheme::Morpheme,
        analysis::Tagger,
        error::WakachiError,
        error::WakachiResult,
    };
}
