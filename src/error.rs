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

use thiserror::Error;

pub type WakachiResult<T> = Result<T, WakachiError>;

/// Wakachi error
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum WakachiError {
    #[error("{context}: {cause}")]
    ErrWithContext {
        context: String,
        cause: Box<WakachiError>,
    },

    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse Int Error")]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Invalid data format: {1} at line {0}")]
    InvalidDataFormat(usize, String),

    #[error("Invalid connection id: {0}")]
    InvalidConnectionId(String),

    #[error("End of sentence (EOS) is not connected to beginning of sentence (BOS)")]
    EosBosDisconnect,

    #[error("No morpheme candidates at offset {0}, the unknown word fallback contract was violated")]
    LatticeDisconnect(usize),

    #[error("Input is too long, it can't be more than {1} chars, was {0}")]
    InputTooLong(usize, usize),
}

impl WakachiError {
    pub fn with_context<S: Into<String>>(self, ctx: S) -> Self {
        WakachiError::ErrWithContext {
            cause: Box::new(self),
            context: ctx.into(),
        }
    }
}
