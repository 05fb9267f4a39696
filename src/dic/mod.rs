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

use crate::analysis::DictionaryAccess;
use crate::dic::connect::ConnectionMatrix;
use crate::dic::lexicon::{MemoryLexicon, WordLexicon};
use crate::dic::unknown::{SimpleUnknownProvider, UnknownWordProvider};
use crate::error::{WakachiError, WakachiResult};

pub mod connect;
pub mod lexicon;
pub mod unknown;
pub mod word_id;

/// Owning bundle of the three dictionary collaborators.
///
/// Construction is fail-fast: every connection id referenced by the
/// lexicon or the unknown-word provider must exist in the matrix, so
/// analysis itself can never fail on dictionary data.
#[derive(Debug)]
pub struct Dictionary {
    lexicon: MemoryLexicon,
    unknown: SimpleUnknownProvider,
    conn: ConnectionMatrix,
}

impl Dictionary {
    pub fn new(
        lexicon: MemoryLexicon,
        unknown: SimpleUnknownProvider,
        conn: ConnectionMatrix,
    ) -> WakachiResult<Dictionary> {
        lexicon
            .validate(&conn)
            .map_err(|e| e.with_context("lexicon"))?;
        if unknown.left_id() as usize >= conn.num_left()
            || unknown.right_id() as usize >= conn.num_right()
        {
            return Err(WakachiError::InvalidConnectionId(format!(
                "unknown words have connection ids ({}, {}), matrix is {}x{}",
                unknown.left_id(),
                unknown.right_id(),
                conn.num_right(),
                conn.num_left()
            )));
        }
        Ok(Dictionary {
            lexicon,
            unknown,
            conn,
        })
    }
}

impl DictionaryAccess for Dictionary {
    fn lexicon(&self) -> &dyn WordLexicon {
        &self.lexicon
    }

    fn unknown(&self) -> &dyn UnknownWordProvider {
        &self.unknown
    }

    fn conn_matrix(&self) -> &ConnectionMatrix {
        &self.conn
    }
}
