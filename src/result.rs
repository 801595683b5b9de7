//
// Copyright 2025 Hans W. Uhlig. All Rights Reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//

//! Error types and results for the intensity segments library.

use thiserror::Error;

/// A specialized Result type for intensity segment operations.
pub type IntensityResult<T> = Result<T, IntensityError>;

/// Errors that can occur during intensity segment operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntensityError {
    /// The requested range is empty or reversed (`from >= to`).
    #[error("invalid range {from}..{to}: from must be less than to")]
    InvalidRange {
        /// Inclusive start of the rejected range.
        from: i64,
        /// Exclusive end of the rejected range.
        to: i64,
    },

    /// Applying the update would push an intensity outside the representable range.
    #[error("intensity overflow at position {position}")]
    Overflow {
        /// Position of the breakpoint whose value would overflow.
        position: i64,
    },

    /// A snapshot violates the breakpoint invariants or is not well formed.
    #[error("malformed snapshot: {message}")]
    Malformed {
        /// Description of the violation.
        message: String,
    },

    /// A script line could not be parsed into a command.
    #[error("line {line}: {message}")]
    Parse {
        /// 1-based line number, or 0 when parsing a standalone command.
        line: usize,
        /// Description of the parse failure.
        message: String,
    },

    /// A script command failed while being applied.
    #[error("line {line}: {source}")]
    Script {
        /// 1-based line number of the failing command.
        line: usize,
        /// The underlying failure.
        #[source]
        source: Box<IntensityError>,
    },
}

impl IntensityError {
    /// Create a malformed snapshot error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Create a parse error for a standalone command.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse {
            line: 0,
            message: message.into(),
        }
    }

    /// Attach a script line number to this error.
    #[must_use]
    pub fn at_line(self, line: usize) -> Self {
        match self {
            Self::Parse { message, .. } => Self::Parse { line, message },
            other => Self::Script {
                line,
                source: Box::new(other),
            },
        }
    }
}
